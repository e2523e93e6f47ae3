//! Decomposition of a disorder profile into IDRs and folded domains.
//!
//! ## Pipeline
//!
//! ```text
//! raw scores ─ smooth ─ binarize ─ close gaps ─ drop short runs
//!            ─ extract runs ─ reclassify weak gaps + merge ─ assemble
//! ```
//!
//! Each stage is a pure transformation; nothing is kept between calls. The
//! stages are exposed individually in the submodules and chained by
//! [`Decomposition`], whose type parameter tracks how far the pipeline has
//! progressed: gap closure, run filtering and partitioning each consume the
//! previous stage, so they can only be chained in pipeline order. The one
//! branch is [`Decomposition::classify_whole`], taken straight from the mask
//! for sequences below the whole-sequence cutoff.
//!
//! ## Modules
//!
//! - [`gap_closure`]: fills short ordered gaps between disordered stretches
//! - [`size_filter`]: removes disordered runs at or below the minimum IDR size
//! - [`boundaries`]: turns the final mask into run intervals
//! - [`reclassification`]: folds weak gaps back into the disordered set
//! - [`assembly`]: slices residues for each interval

pub mod assembly;
pub mod boundaries;
pub mod gap_closure;
pub mod reclassification;
pub mod size_filter;

use std::marker::PhantomData;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DomainParameters;
use crate::domains::assembly::assemble_domains;
use crate::domains::boundaries::{Interval, extract_boundaries};
use crate::domains::gap_closure::close_gaps;
use crate::domains::reclassification::reclassify_gaps;
use crate::domains::size_filter::remove_short_runs;
use crate::signal::{binarize, mask_mean, smooth};
use crate::types::{BinaryMask, Domain, DomainKind, IdrError};

/// Marker trait for decomposition progress.
pub trait PipelineStage {}

/// Profile smoothed, no mask yet.
#[derive(Debug, Clone)]
pub struct Smoothed;

/// Mask available, not yet cleaned.
#[derive(Debug, Clone)]
pub struct Masked;

/// Short ordered gaps closed.
#[derive(Debug, Clone)]
pub struct GapClosed;

/// Short disordered runs removed; ready to partition.
#[derive(Debug, Clone)]
pub struct Filtered;

/// Final disordered / folded intervals computed.
#[derive(Debug, Clone)]
pub struct Partitioned;

impl PipelineStage for Smoothed {}
impl PipelineStage for Masked {}
impl PipelineStage for GapClosed {}
impl PipelineStage for Filtered {}
impl PipelineStage for Partitioned {}

/// Working state of one decomposition.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::config::DomainParameters;
/// use idrscan_core::domains::Decomposition;
///
/// let params = DomainParameters::default();
/// let profile = vec![0.9; 80];
///
/// let boundaries = Decomposition::smooth(&profile, &params)?
///     .binarize()?
///     .close_gaps()
///     .filter_short_runs()
///     .partition()
///     .into_boundaries();
///
/// assert_eq!(boundaries.disordered.len(), 1);
/// # Ok::<(), idrscan_core::types::IdrError>(())
/// ```
#[derive(Debug)]
pub struct Decomposition<'a, S: PipelineStage> {
    params: &'a DomainParameters,
    smoothed: Vec<f64>,
    mask: BinaryMask,
    disordered: Vec<Interval>,
    folded: Vec<Interval>,
    _stage: PhantomData<S>,
}

impl<'a, S: PipelineStage> Decomposition<'a, S> {
    fn advance<T: PipelineStage>(self) -> Decomposition<'a, T> {
        Decomposition {
            params: self.params,
            smoothed: self.smoothed,
            mask: self.mask,
            disordered: self.disordered,
            folded: self.folded,
            _stage: PhantomData,
        }
    }

    /// Smoothed profile
    pub fn smoothed(&self) -> &[f64] {
        &self.smoothed
    }

    /// Current mask; empty before binarization.
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }
}

impl<'a> Decomposition<'a, Smoothed> {
    /// Starts a decomposition by smoothing `profile`.
    ///
    /// # Errors
    ///
    /// Propagates smoothing parameter errors.
    pub fn smooth(profile: &[f64], params: &'a DomainParameters) -> Result<Self, IdrError> {
        let smoothed = smooth(profile, params.smoothing_window, params.poly_order)?;
        Ok(Self {
            params,
            smoothed,
            mask: Vec::new(),
            disordered: Vec::new(),
            folded: Vec::new(),
            _stage: PhantomData,
        })
    }

    /// Thresholds the smoothed profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdrError::InternalInvariant`] if the mask length differs
    /// from the profile length.
    pub fn binarize(mut self) -> Result<Decomposition<'a, Masked>, IdrError> {
        self.mask = binarize(&self.smoothed, self.params.disorder_threshold);
        if self.mask.len() != self.smoothed.len() {
            return Err(IdrError::InternalInvariant(format!(
                "binary mask has {} positions but profile has {}",
                self.mask.len(),
                self.smoothed.len()
            )));
        }
        Ok(self.advance())
    }
}

impl<'a> Decomposition<'a, Masked> {
    /// `true` when the sequence is too short for run-level analysis.
    pub fn is_whole_sequence(&self) -> bool {
        self.mask.len() < self.params.whole_sequence_cutoff()
    }

    /// Decides the whole sequence as one domain.
    ///
    /// Disordered when the fraction of disordered mask positions is at least
    /// the disorder threshold, folded otherwise.
    pub fn classify_whole(mut self) -> Decomposition<'a, Partitioned> {
        let whole = Interval::new(0, self.mask.len());
        let fraction = mask_mean(&self.mask);
        if fraction >= self.params.disorder_threshold {
            self.disordered.push(whole);
        } else {
            self.folded.push(whole);
        }
        debug!(
            length = self.mask.len(),
            fraction, "classified whole sequence as a single domain"
        );
        self.advance()
    }

    pub fn close_gaps(mut self) -> Decomposition<'a, GapClosed> {
        close_gaps(&mut self.mask, self.params.gap_closure);
        self.advance()
    }
}

impl<'a> Decomposition<'a, GapClosed> {
    pub fn filter_short_runs(mut self) -> Decomposition<'a, Filtered> {
        remove_short_runs(&mut self.mask, self.params.minimum_idr_size);
        self.advance()
    }
}

impl<'a> Decomposition<'a, Filtered> {
    /// Extracts runs and reclassifies weak gaps.
    pub fn partition(mut self) -> Decomposition<'a, Partitioned> {
        let runs = extract_boundaries(&self.mask);
        let (disordered, folded) =
            reclassify_gaps(runs.domains, &runs.gaps, &self.smoothed, self.params);
        debug!(
            idrs = disordered.len(),
            folded = folded.len(),
            "partitioned disorder profile"
        );
        self.disordered = disordered;
        self.folded = folded;
        self.advance()
    }
}

impl Decomposition<'_, Partitioned> {
    pub fn into_boundaries(self) -> DomainBoundaries {
        DomainBoundaries {
            smoothed: self.smoothed,
            disordered: self.disordered,
            folded: self.folded,
        }
    }
}

/// Interval-level decomposition result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainBoundaries {
    /// Smoothed disorder profile
    pub smoothed: Vec<f64>,
    /// Disordered intervals, sorted and disjoint
    pub disordered: Vec<Interval>,
    /// Folded intervals, sorted and disjoint
    pub folded: Vec<Interval>,
}

/// Residue-level decomposition result returned by [`get_domains`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainDecomposition {
    /// Smoothed disorder profile
    pub smoothed: Vec<f64>,
    /// Intrinsically disordered regions
    pub disordered: Vec<Domain>,
    /// Folded domains
    pub folded: Vec<Domain>,
}

/// Decomposes a disorder profile without a residue sequence.
///
/// # Errors
///
/// - [`IdrError::InvalidParameter`] for out-of-range parameters or
///   non-finite profile values
/// - [`IdrError::EmptyInput`] for an empty profile
/// - [`IdrError::InternalInvariant`] if binarization loses positions
pub fn domains_from_profile(
    disorder: &[f64],
    params: &DomainParameters,
) -> Result<DomainBoundaries, IdrError> {
    params.validate()?;
    if disorder.is_empty() {
        return Err(IdrError::EmptyInput);
    }
    if let Some(position) = disorder.iter().position(|v| !v.is_finite()) {
        return Err(IdrError::InvalidParameter(format!(
            "disorder profile value at position {position} is not finite"
        )));
    }

    let masked = Decomposition::smooth(disorder, params)?.binarize()?;
    let partitioned = if masked.is_whole_sequence() {
        warn!(
            length = disorder.len(),
            cutoff = params.whole_sequence_cutoff(),
            "sequence too short for domain decomposition, classifying as one domain"
        );
        masked.classify_whole()
    } else {
        masked.close_gaps().filter_short_runs().partition()
    };

    Ok(partitioned.into_boundaries())
}

/// Splits `sequence` into disordered and folded domains using `disorder`.
///
/// # Errors
///
/// - [`IdrError::EmptyInput`] if the sequence or profile is empty
/// - [`IdrError::LengthMismatch`] if their lengths differ
/// - [`IdrError::InvalidSequence`] if the sequence is not ASCII
/// - anything [`domains_from_profile`] reports
///
/// # Examples
///
/// ```rust
/// use idrscan_core::config::DomainParameters;
/// use idrscan_core::domains::get_domains;
///
/// let sequence = format!("{}{}{}", "A".repeat(30), "G".repeat(5), "A".repeat(30));
/// let disorder: Vec<f64> = sequence
///     .chars()
///     .map(|c| if c == 'A' { 0.9 } else { 0.1 })
///     .collect();
/// let params = DomainParameters { disorder_threshold: 0.5, ..Default::default() };
///
/// let result = get_domains(&sequence, &disorder, &params)?;
/// assert_eq!(result.disordered.len(), 1);
/// assert_eq!((result.disordered[0].start, result.disordered[0].end), (0, 65));
/// assert!(result.folded.is_empty());
/// # Ok::<(), idrscan_core::types::IdrError>(())
/// ```
pub fn get_domains(
    sequence: &str,
    disorder: &[f64],
    params: &DomainParameters,
) -> Result<DomainDecomposition, IdrError> {
    if sequence.is_empty() || disorder.is_empty() {
        return Err(IdrError::EmptyInput);
    }
    if !sequence.is_ascii() {
        return Err(IdrError::InvalidSequence(
            "sequence contains non-ASCII characters".to_string(),
        ));
    }
    if sequence.len() != disorder.len() {
        return Err(IdrError::LengthMismatch {
            sequence: sequence.len(),
            profile: disorder.len(),
        });
    }

    let boundaries = domains_from_profile(disorder, params)?;
    Ok(DomainDecomposition {
        disordered: assemble_domains(sequence, &boundaries.disordered, DomainKind::Disordered),
        folded: assemble_domains(sequence, &boundaries.folded, DomainKind::Folded),
        smoothed: boundaries.smoothed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(threshold: f64) -> DomainParameters {
        DomainParameters {
            disorder_threshold: threshold,
            ..Default::default()
        }
    }

    fn profile_from(segments: &[(usize, f64)]) -> Vec<f64> {
        segments
            .iter()
            .flat_map(|&(len, value)| std::iter::repeat_n(value, len))
            .collect()
    }

    fn assert_partition(boundaries: &DomainBoundaries, length: usize) {
        let mut all: Vec<Interval> = boundaries
            .disordered
            .iter()
            .chain(&boundaries.folded)
            .copied()
            .collect();
        all.sort();
        assert_eq!(all.first().map(|i| i.start), Some(0));
        assert_eq!(all.last().map(|i| i.end), Some(length));
        for pair in all.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "{:?}", all);
        }
    }

    #[test]
    fn test_round_trip_small_gap_reclassified() {
        let sequence = format!("{}{}{}", "A".repeat(30), "G".repeat(5), "A".repeat(30));
        let disorder = profile_from(&[(30, 0.9), (5, 0.1), (30, 0.9)]);
        let result = get_domains(&sequence, &disorder, &params(0.5)).unwrap();

        assert_eq!(result.disordered.len(), 1);
        assert_eq!(result.disordered[0].start, 0);
        assert_eq!(result.disordered[0].end, 65);
        assert_eq!(result.disordered[0].sequence, sequence);
        assert!(result.folded.is_empty());
        assert_eq!(result.smoothed.len(), 65);
    }

    #[test]
    fn test_short_sequence_disordered() {
        let result = get_domains("MSEEK", &[0.9; 5], &params(0.5)).unwrap();
        assert_eq!(result.disordered.len(), 1);
        assert_eq!((result.disordered[0].start, result.disordered[0].end), (0, 5));
        assert!(result.folded.is_empty());
    }

    #[test]
    fn test_short_sequence_folded() {
        let result = get_domains("MVLIW", &[0.1; 5], &params(0.5)).unwrap();
        assert!(result.disordered.is_empty());
        assert_eq!(result.folded.len(), 1);
        assert_eq!(result.folded[0].sequence, "MVLIW");
    }

    #[test]
    fn test_short_sequence_uses_mask_fraction() {
        // 20 residues, below the 31-residue cutoff. Half the mask is
        // disordered, so the fraction 0.5 is compared against the threshold.
        let disorder = profile_from(&[(10, 1.0), (10, 0.0)]);
        let sequence = "A".repeat(20);

        let at_half = get_domains(&sequence, &disorder, &params(0.5)).unwrap();
        let fraction = mask_mean(&binarize(&at_half.smoothed, 0.5));
        assert_eq!(at_half.disordered.is_empty(), fraction < 0.5);

        let strict = get_domains(&sequence, &disorder, &params(0.9)).unwrap();
        assert!(strict.disordered.is_empty());
        assert_eq!(strict.folded.len(), 1);
    }

    #[test]
    fn test_all_disordered_profile() {
        let boundaries = domains_from_profile(&[0.95; 120], &params(0.5)).unwrap();
        assert_eq!(boundaries.disordered, vec![Interval::new(0, 120)]);
        assert!(boundaries.folded.is_empty());
    }

    #[test]
    fn test_all_folded_profile() {
        let boundaries = domains_from_profile(&[0.05; 120], &params(0.5)).unwrap();
        assert!(boundaries.disordered.is_empty());
        assert_eq!(boundaries.folded, vec![Interval::new(0, 120)]);
    }

    #[test]
    fn test_idr_flanking_folded_domain() {
        let disorder = profile_from(&[(40, 0.9), (100, 0.05), (40, 0.9)]);
        let boundaries = domains_from_profile(&disorder, &params(0.5)).unwrap();

        assert_eq!(boundaries.disordered.len(), 2);
        assert_eq!(boundaries.folded.len(), 1);
        assert_eq!(boundaries.disordered[0].start, 0);
        assert_eq!(boundaries.disordered[1].end, 180);
        let folded = boundaries.folded[0];
        assert!((35..=45).contains(&folded.start), "{folded:?}");
        assert!((135..=145).contains(&folded.end), "{folded:?}");
        assert_partition(&boundaries, 180);
    }

    #[test]
    fn test_short_disordered_blip_removed() {
        // A 6-residue disordered blip inside a folded protein does not survive
        let disorder = profile_from(&[(60, 0.05), (6, 0.95), (60, 0.05)]);
        let boundaries = domains_from_profile(&disorder, &params(0.5)).unwrap();
        assert!(boundaries.disordered.is_empty());
        assert_eq!(boundaries.folded, vec![Interval::new(0, 126)]);
    }

    #[test]
    fn test_partition_on_mixed_profile() {
        let disorder: Vec<f64> = (0..300)
            .map(|i| 0.5 + 0.45 * ((i as f64) / 17.0).sin())
            .collect();
        let boundaries = domains_from_profile(&disorder, &params(0.42)).unwrap();
        assert_partition(&boundaries, 300);
    }

    #[test]
    fn test_length_mismatch() {
        let err = get_domains("MSEEK", &[0.5; 4], &params(0.5)).unwrap_err();
        assert!(matches!(
            err,
            IdrError::LengthMismatch {
                sequence: 5,
                profile: 4
            }
        ));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(
            get_domains("", &[], &params(0.5)),
            Err(IdrError::EmptyInput)
        ));
        assert!(matches!(
            domains_from_profile(&[], &params(0.5)),
            Err(IdrError::EmptyInput)
        ));
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(matches!(
            get_domains("MSEEK", &[0.5; 5], &params(1.5)),
            Err(IdrError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_non_finite_profile_rejected() {
        let mut disorder = vec![0.5; 40];
        disorder[17] = f64::NAN;
        assert!(matches!(
            domains_from_profile(&disorder, &params(0.5)),
            Err(IdrError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_out_of_range_scores_tolerated() {
        let disorder = profile_from(&[(50, 1.7), (50, -0.4)]);
        let boundaries = domains_from_profile(&disorder, &params(0.5)).unwrap();
        assert_partition(&boundaries, 100);
        assert_eq!(boundaries.disordered.first().map(|i| i.start), Some(0));
    }

    #[test]
    fn test_pipeline_stages_expose_intermediate_mask() {
        let p = params(0.5);
        let disorder = profile_from(&[(40, 0.9), (3, 0.1), (40, 0.9)]);
        let masked = Decomposition::smooth(&disorder, &p)
            .unwrap()
            .binarize()
            .unwrap();
        assert_eq!(masked.mask().len(), 83);
        assert!(!masked.is_whole_sequence());
        let closed = masked.close_gaps();
        assert!(closed.mask().iter().all(|&v| v == 1));
        let filtered = closed.filter_short_runs();
        assert_eq!(filtered.mask().len(), 83);
        let boundaries = filtered.partition().into_boundaries();
        assert_eq!(boundaries.disordered, vec![Interval::new(0, 83)]);
    }

    #[test]
    fn test_huge_gap_closure_rejected() {
        let p = DomainParameters {
            gap_closure: usize::MAX / 2,
            ..Default::default()
        };
        assert!(matches!(
            get_domains(&"A".repeat(80), &[0.9; 80], &p),
            Err(IdrError::InvalidParameter(_))
        ));
    }
}
