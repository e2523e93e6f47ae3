//! Disorder model registry and scorer handle.
//!
//! A trained network is an external collaborator: anything that turns a
//! residue string into one score per residue implements [`DisorderScorer`].
//! Each [`ModelVersion`] maps to a fixed [`ModelParameters`] entry holding the
//! decomposition settings the model was calibrated with. A [`ModelHandle`]
//! bundles the two; it is built once at start-up and passed by reference.
//!
//! The crate ships [`PropensityScorer`], a windowed amino-acid propensity
//! scorer, so prediction works without network weights.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::DomainParameters;
use crate::constants::{
    DEFAULT_GAP_CLOSURE, DEFAULT_MINIMUM_FOLDED_DOMAIN, DEFAULT_MINIMUM_IDR_SIZE,
    DEFAULT_POLY_ORDER, DEFAULT_PROPENSITY_WINDOW, DEFAULT_SMOOTHING_WINDOW,
    PROPENSITY_LOGISTIC_SLOPE,
};
use crate::types::IdrError;

/// Registered disorder models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVersion {
    /// Original model, calibrated against a 0.42 cutoff
    Legacy,
    V2,
    #[default]
    V3,
}

/// Fixed settings attached to a [`ModelVersion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    /// Registry key
    pub name: &'static str,
    /// Score cutoff the model was calibrated against
    pub disorder_threshold: f64,
    /// Savitzky-Golay window length
    pub smoothing_window: usize,
    /// Savitzky-Golay polynomial order
    pub poly_order: usize,
    /// Averaging window of the built-in propensity scorer
    pub propensity_window: usize,
}

impl ModelParameters {
    /// Decomposition parameters matching this model.
    #[must_use]
    pub const fn domain_parameters(&self) -> DomainParameters {
        DomainParameters {
            disorder_threshold: self.disorder_threshold,
            minimum_idr_size: DEFAULT_MINIMUM_IDR_SIZE,
            minimum_folded_domain: DEFAULT_MINIMUM_FOLDED_DOMAIN,
            gap_closure: DEFAULT_GAP_CLOSURE,
            override_folded_domain_minsize: false,
            smoothing_window: self.smoothing_window,
            poly_order: self.poly_order,
        }
    }
}

const REGISTRY: [ModelParameters; 3] = [
    ModelParameters {
        name: "legacy",
        disorder_threshold: 0.42,
        smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        poly_order: DEFAULT_POLY_ORDER,
        propensity_window: DEFAULT_PROPENSITY_WINDOW,
    },
    ModelParameters {
        name: "v2",
        disorder_threshold: 0.5,
        smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        poly_order: DEFAULT_POLY_ORDER,
        propensity_window: DEFAULT_PROPENSITY_WINDOW,
    },
    ModelParameters {
        name: "v3",
        disorder_threshold: 0.5,
        smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        poly_order: DEFAULT_POLY_ORDER,
        propensity_window: 21,
    },
];

impl ModelVersion {
    pub const ALL: [Self; 3] = [Self::Legacy, Self::V2, Self::V3];

    /// Registry entry for this model
    #[must_use]
    pub const fn parameters(self) -> &'static ModelParameters {
        match self {
            Self::Legacy => &REGISTRY[0],
            Self::V2 => &REGISTRY[1],
            Self::V3 => &REGISTRY[2],
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        self.parameters().name
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModelVersion {
    type Err = IdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|version| version.key() == key)
            .ok_or_else(|| IdrError::InvalidParameter(format!("unknown model '{s}'")))
    }
}

/// Produces one disorder score per residue.
pub trait DisorderScorer: Send + Sync {
    /// Scores `sequence`; the result must have one value per residue.
    ///
    /// # Errors
    ///
    /// Implementations return [`IdrError::Scoring`] when inference fails.
    fn score(&self, sequence: &str) -> Result<Vec<f64>, IdrError>;

    /// Short label used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

/// Per-residue disorder propensities, indexed by `residue - b'A'`.
///
/// Positive values favour disorder. Letters that are not standard amino acids
/// score 0.0.
const DISORDER_PROPENSITY: [f64; 26] = [
    0.06,   // A
    0.0,    // B
    0.02,   // C
    0.192,  // D
    0.736,  // E
    -0.697, // F
    0.166,  // G
    0.303,  // H
    -0.486, // I
    0.0,    // J
    0.586,  // K
    -0.326, // L
    -0.397, // M
    0.007,  // N
    0.0,    // O
    0.987,  // P
    0.318,  // Q
    0.180,  // R
    0.341,  // S
    0.059,  // T
    0.0,    // U
    -0.121, // V
    -0.884, // W
    0.0,    // X
    -0.510, // Y
    0.0,    // Z
];

/// Propensity value at which the logistic crosses 0.5
const PROPENSITY_MIDPOINT: f64 = 0.15;

fn propensity(residue: u8) -> f64 {
    let upper = residue.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        DISORDER_PROPENSITY[(upper - b'A') as usize]
    } else {
        0.0
    }
}

/// Windowed amino-acid propensity scorer.
///
/// Averages residue propensities over a centred window (truncated at the
/// sequence ends) and maps the average through a logistic, giving values in
/// `(0, 1)`.
#[derive(Debug, Clone)]
pub struct PropensityScorer {
    window: usize,
}

impl PropensityScorer {
    #[must_use]
    pub const fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for PropensityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_PROPENSITY_WINDOW)
    }
}

impl DisorderScorer for PropensityScorer {
    fn score(&self, sequence: &str) -> Result<Vec<f64>, IdrError> {
        if self.window == 0 || self.window % 2 == 0 {
            return Err(IdrError::Scoring(format!(
                "propensity window must be odd and non-zero, got {}",
                self.window
            )));
        }
        let raw: Vec<f64> = sequence.bytes().map(propensity).collect();
        let length = raw.len();
        let half = self.window / 2;

        // Prefix sums keep the windowed average linear in the sequence length
        let mut prefix = Vec::with_capacity(length + 1);
        prefix.push(0.0);
        for value in &raw {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + value);
        }

        Ok((0..length)
            .map(|i| {
                let start = i.saturating_sub(half);
                let end = (i + half + 1).min(length);
                let average = (prefix[end] - prefix[start]) / (end - start) as f64;
                1.0 / (1.0 + (-PROPENSITY_LOGISTIC_SLOPE * (average - PROPENSITY_MIDPOINT)).exp())
            })
            .collect())
    }

    fn name(&self) -> &str {
        "propensity"
    }
}

/// A model version together with the scorer that implements it.
pub struct ModelHandle {
    version: ModelVersion,
    scorer: Box<dyn DisorderScorer>,
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("version", &self.version)
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl ModelHandle {
    pub fn new(version: ModelVersion, scorer: Box<dyn DisorderScorer>) -> Self {
        Self { version, scorer }
    }

    /// Handle backed by the built-in [`PropensityScorer`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idrscan_core::model::{ModelHandle, ModelVersion};
    ///
    /// let model = ModelHandle::with_propensity_scorer(ModelVersion::Legacy);
    /// let scores = model.score("MSEEKKPQSTWFLIV")?;
    /// assert_eq!(scores.len(), 15);
    /// # Ok::<(), idrscan_core::types::IdrError>(())
    /// ```
    pub fn with_propensity_scorer(version: ModelVersion) -> Self {
        let window = version.parameters().propensity_window;
        Self::new(version, Box::new(PropensityScorer::new(window)))
    }

    pub const fn version(&self) -> ModelVersion {
        self.version
    }

    pub const fn parameters(&self) -> &'static ModelParameters {
        self.version.parameters()
    }

    /// Scores `sequence` and clamps every value into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Propagates scorer failures; returns [`IdrError::LengthMismatch`] if the
    /// scorer does not return one value per residue and [`IdrError::Scoring`]
    /// for non-finite scores.
    pub fn score(&self, sequence: &str) -> Result<Vec<f64>, IdrError> {
        let mut scores = self.scorer.score(sequence)?;
        if scores.len() != sequence.len() {
            return Err(IdrError::LengthMismatch {
                sequence: sequence.len(),
                profile: scores.len(),
            });
        }
        for value in &mut scores {
            if !value.is_finite() {
                return Err(IdrError::Scoring(format!(
                    "{} scorer produced a non-finite value",
                    self.scorer.name()
                )));
            }
            *value = value.clamp(0.0, 1.0);
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScorer(Vec<f64>);

    impl DisorderScorer for FixedScorer {
        fn score(&self, _sequence: &str) -> Result<Vec<f64>, IdrError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(ModelVersion::Legacy.parameters().disorder_threshold, 0.42);
        assert_eq!(ModelVersion::V2.parameters().disorder_threshold, 0.5);
        assert_eq!(ModelVersion::V3.parameters().disorder_threshold, 0.5);
        for version in ModelVersion::ALL {
            assert_eq!(version.parameters().name, version.key());
            assert!(version.parameters().domain_parameters().validate().is_ok());
        }
    }

    #[test]
    fn test_model_version_parsing() {
        assert_eq!("legacy".parse::<ModelVersion>().unwrap(), ModelVersion::Legacy);
        assert_eq!("V2".parse::<ModelVersion>().unwrap(), ModelVersion::V2);
        assert!("v9".parse::<ModelVersion>().is_err());
        assert_eq!(ModelVersion::default().to_string(), "v3");
    }

    #[test]
    fn test_legacy_domain_parameters_match_defaults() {
        assert_eq!(
            ModelVersion::Legacy.parameters().domain_parameters(),
            DomainParameters::default()
        );
    }

    #[test]
    fn test_propensity_scorer_separates_residue_classes() {
        let scorer = PropensityScorer::default();
        let disordered = scorer.score(&"EPKSEPKQ".repeat(5)).unwrap();
        let ordered = scorer.score(&"WFILYVMW".repeat(5)).unwrap();
        assert!(disordered.iter().all(|&s| s > 0.5));
        assert!(ordered.iter().all(|&s| s < 0.5));
        assert!(disordered.iter().chain(&ordered).all(|&s| (0.0..=1.0).contains(&s)));
    }

    #[test]
    fn test_propensity_scorer_lowercase_matches_uppercase() {
        let scorer = PropensityScorer::default();
        assert_eq!(
            scorer.score("mseekkpq").unwrap(),
            scorer.score("MSEEKKPQ").unwrap()
        );
    }

    #[test]
    fn test_propensity_scorer_rejects_even_window() {
        assert!(matches!(
            PropensityScorer::new(4).score("MSEEK"),
            Err(IdrError::Scoring(_))
        ));
    }

    #[test]
    fn test_handle_clamps_scores() {
        let handle = ModelHandle::new(ModelVersion::V2, Box::new(FixedScorer(vec![-0.2, 0.5, 1.3])));
        assert_eq!(handle.score("MSE").unwrap(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_handle_rejects_wrong_length() {
        let handle = ModelHandle::new(ModelVersion::V2, Box::new(FixedScorer(vec![0.5, 0.5])));
        assert!(matches!(
            handle.score("MSE"),
            Err(IdrError::LengthMismatch {
                sequence: 3,
                profile: 2
            })
        ));
    }

    #[test]
    fn test_handle_rejects_nan() {
        let handle = ModelHandle::new(ModelVersion::V2, Box::new(FixedScorer(vec![f64::NAN])));
        assert!(matches!(handle.score("M"), Err(IdrError::Scoring(_))));
    }

    #[test]
    fn test_handle_debug_names_scorer() {
        let handle = ModelHandle::with_propensity_scorer(ModelVersion::V3);
        let debug = format!("{handle:?}");
        assert!(debug.contains("V3"));
        assert!(debug.contains("propensity"));
    }
}
