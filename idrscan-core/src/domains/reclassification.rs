//! Tiered reclassification of weak folded gaps and merging of the resulting
//! disordered intervals.

use tracing::trace;

use crate::config::DomainParameters;
use crate::constants::{TIER_1_THRESHOLD_FACTOR, TIER_2_THRESHOLD_FACTOR, TIER_3_THRESHOLD_FACTOR};
use crate::domains::boundaries::Interval;
use crate::signal::mean;

/// Which size tier, if any, turns a gap of `size` residues with mean smoothed
/// score `score` into a disordered interval.
///
/// Tiers are checked in order:
///
/// 1. `size < minimum_folded_domain` and `score > 0.75 * threshold`
/// 2. `size < 35` and `score > 0.35 * threshold`
/// 3. `size < 20` and `score > 0.25 * threshold`
///
/// With `override_folded_domain_minsize` the bounds of tiers 2 and 3 become
/// `minimum_folded_domain` as well.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::config::DomainParameters;
/// use idrscan_core::domains::reclassification::reclassification_tier;
///
/// let params = DomainParameters { disorder_threshold: 0.5, ..Default::default() };
/// assert_eq!(reclassification_tier(19, 0.15, &params), Some(3));
/// assert_eq!(reclassification_tier(20, 0.15, &params), None);
/// ```
pub fn reclassification_tier(size: usize, score: f64, params: &DomainParameters) -> Option<u8> {
    let threshold = params.disorder_threshold;
    let (tier_2_size, tier_3_size) = params.folded_domain_tiers();

    if size < params.minimum_folded_domain && score > TIER_1_THRESHOLD_FACTOR * threshold {
        Some(1)
    } else if size < tier_2_size && score > TIER_2_THRESHOLD_FACTOR * threshold {
        Some(2)
    } else if size < tier_3_size && score > TIER_3_THRESHOLD_FACTOR * threshold {
        Some(3)
    } else {
        None
    }
}

/// Re-evaluates every gap against the smoothed profile.
///
/// Gaps that hit a reclassification tier join `domains`; the disordered list
/// is then merged so adjacent intervals collapse. Returns
/// `(disordered, folded)`, both sorted by start.
pub fn reclassify_gaps(
    domains: Vec<Interval>,
    gaps: &[Interval],
    smoothed: &[f64],
    params: &DomainParameters,
) -> (Vec<Interval>, Vec<Interval>) {
    let mut disordered = domains;
    let mut folded = Vec::with_capacity(gaps.len());

    for gap in gaps {
        let score = mean(&smoothed[gap.start..gap.end]);
        match reclassification_tier(gap.len(), score, params) {
            Some(tier) => {
                trace!(start = gap.start, end = gap.end, score, tier, "gap reclassified as disordered");
                disordered.push(*gap);
            }
            None => folded.push(*gap),
        }
    }

    (merge_intervals(&disordered), folded)
}

/// Merges disjoint intervals that touch.
///
/// All endpoints are flattened and sorted; an endpoint equal to its
/// successor marks a shared internal boundary and both copies are dropped.
/// The remaining endpoints pair up into maximal intervals. Empty intervals
/// vanish in the process.
///
/// The input must not contain overlapping intervals.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::domains::boundaries::Interval;
/// use idrscan_core::domains::reclassification::merge_intervals;
///
/// let merged = merge_intervals(&[Interval::new(10, 20), Interval::new(0, 10)]);
/// assert_eq!(merged, vec![Interval::new(0, 20)]);
/// ```
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut endpoints: Vec<usize> = intervals
        .iter()
        .flat_map(|interval| [interval.start, interval.end])
        .collect();
    endpoints.sort_unstable();

    let mut kept = Vec::with_capacity(endpoints.len());
    let mut i = 0;
    while i < endpoints.len() {
        if i + 1 < endpoints.len() && endpoints[i] == endpoints[i + 1] {
            i += 2;
        } else {
            kept.push(endpoints[i]);
            i += 1;
        }
    }

    kept.chunks_exact(2)
        .map(|pair| Interval::new(pair[0], pair[1]))
        .collect()
}
