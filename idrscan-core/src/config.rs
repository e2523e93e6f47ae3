use std::str::FromStr;

use crate::constants::{
    DEFAULT_DISORDER_THRESHOLD, DEFAULT_GAP_CLOSURE, DEFAULT_MINIMUM_FOLDED_DOMAIN,
    DEFAULT_MINIMUM_IDR_SIZE, DEFAULT_POLY_ORDER, DEFAULT_SMOOTHING_WINDOW,
    FOLDED_DOMAIN_MIN_SIZE_1, FOLDED_DOMAIN_MIN_SIZE_2,
};
use crate::model::ModelVersion;
use crate::types::IdrError;

/// Output format options for prediction results.
///
/// # Formats
///
/// - **Domains**: one tab-separated row per IDR / folded domain
/// - **Scores**: one comma-separated row per residue
/// - **Json**: full records serialised with `serde_json`
///
/// # Examples
///
/// ```rust
/// use idrscan_core::config::{IdrConfig, OutputFormat};
///
/// let config = IdrConfig {
///     output_format: OutputFormat::Json,
///     ..Default::default()
/// };
/// assert_eq!("scores".parse::<OutputFormat>().unwrap(), OutputFormat::Scores);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Domain table, the default.
    #[default]
    Domains,

    /// Per-residue raw and smoothed scores.
    Scores,

    /// JSON array of records.
    Json,
}

impl FromStr for OutputFormat {
    type Err = IdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "domains" | "tsv" => Ok(Self::Domains),
            "scores" | "csv" => Ok(Self::Scores),
            "json" => Ok(Self::Json),
            other => Err(IdrError::InvalidParameter(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}

/// Knobs of the domain decomposition.
///
/// The defaults reproduce the reference behaviour: threshold `0.42`, minimum
/// IDR size `12`, minimum folded domain `50`, gap closure `10`, and a
/// Savitzky-Golay smoother with window `25` and polynomial order `3`.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::config::DomainParameters;
///
/// let params = DomainParameters {
///     disorder_threshold: 0.5,
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DomainParameters {
    /// Residues whose smoothed score is strictly above this are disordered.
    ///
    /// Must lie in `[0, 1]`.
    pub disorder_threshold: f64,

    /// Disordered runs of this length or shorter are removed.
    pub minimum_idr_size: usize,

    /// Gaps shorter than this may be reclassified as disordered.
    pub minimum_folded_domain: usize,

    /// Largest gap closed between disordered stretches.
    pub gap_closure: usize,

    /// Use `minimum_folded_domain` for every size tier instead of 35 / 20.
    pub override_folded_domain_minsize: bool,

    /// Savitzky-Golay window length, must be odd.
    pub smoothing_window: usize,

    /// Savitzky-Golay polynomial order, must be below `smoothing_window`.
    pub poly_order: usize,
}

impl Default for DomainParameters {
    fn default() -> Self {
        Self {
            disorder_threshold: DEFAULT_DISORDER_THRESHOLD,
            minimum_idr_size: DEFAULT_MINIMUM_IDR_SIZE,
            minimum_folded_domain: DEFAULT_MINIMUM_FOLDED_DOMAIN,
            gap_closure: DEFAULT_GAP_CLOSURE,
            override_folded_domain_minsize: false,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            poly_order: DEFAULT_POLY_ORDER,
        }
    }
}

impl DomainParameters {
    /// Checks the parameters before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`IdrError::InvalidParameter`] if the threshold is outside
    /// `[0, 1]`, the smoothing window is even or zero, the polynomial order
    /// is not below the window, or `3 * gap_closure + 1` overflows.
    pub fn validate(&self) -> Result<(), IdrError> {
        if !(0.0..=1.0).contains(&self.disorder_threshold) {
            return Err(IdrError::InvalidParameter(format!(
                "disorder threshold must be within [0, 1], got {}",
                self.disorder_threshold
            )));
        }
        if self.smoothing_window % 2 == 0 {
            return Err(IdrError::InvalidParameter(format!(
                "smoothing window must be odd, got {}",
                self.smoothing_window
            )));
        }
        if self.poly_order >= self.smoothing_window {
            return Err(IdrError::InvalidParameter(format!(
                "polynomial order {} must be below the smoothing window {}",
                self.poly_order, self.smoothing_window
            )));
        }
        if self
            .gap_closure
            .checked_mul(3)
            .and_then(|span| span.checked_add(1))
            .is_none()
        {
            return Err(IdrError::InvalidParameter(format!(
                "gap closure {} is too large",
                self.gap_closure
            )));
        }
        Ok(())
    }

    /// Size bounds of the second and third reclassification tiers.
    #[must_use]
    pub const fn folded_domain_tiers(&self) -> (usize, usize) {
        if self.override_folded_domain_minsize {
            (self.minimum_folded_domain, self.minimum_folded_domain)
        } else {
            (FOLDED_DOMAIN_MIN_SIZE_1, FOLDED_DOMAIN_MIN_SIZE_2)
        }
    }

    /// Sequences shorter than this are classified as a single domain.
    #[must_use]
    pub const fn whole_sequence_cutoff(&self) -> usize {
        let closure_span = self.gap_closure.saturating_mul(3).saturating_add(1);
        if closure_span > self.minimum_idr_size {
            closure_span
        } else {
            self.minimum_idr_size
        }
    }
}

/// Configuration for a [`DisorderAnalyzer`](crate::engine::DisorderAnalyzer).
///
/// # Examples
///
/// ```rust
/// use idrscan_core::config::IdrConfig;
/// use idrscan_core::model::ModelVersion;
///
/// let config = IdrConfig {
///     model: ModelVersion::Legacy,
///     num_threads: Some(4),
///     quiet: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdrConfig {
    /// Which registered model the analyzer was built for.
    ///
    /// **Default**: [`ModelVersion::V3`]
    pub model: ModelVersion,

    /// Decomposition parameters.
    ///
    /// `None` derives them from the model's registry entry.
    pub domain_parameters: Option<DomainParameters>,

    /// Output format for written results.
    pub output_format: OutputFormat,

    /// Size of the dedicated rayon pool used for batch prediction.
    ///
    /// **Default**: `None` (rayon's global pool)
    pub num_threads: Option<usize>,

    /// Suppress per-sequence progress logging.
    pub quiet: bool,
}
