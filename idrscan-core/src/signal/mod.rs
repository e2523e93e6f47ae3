//! Continuous-profile utilities: smoothing and thresholding.
//!
//! ## Modules
//!
//! - [`smoothing`]: Savitzky-Golay local polynomial smoothing

pub mod smoothing;

pub use smoothing::smooth;

use crate::constants::{DISORDERED, ORDERED};
use crate::types::BinaryMask;

/// Thresholds a profile into a 0/1 mask.
///
/// `mask[i] == 1` iff `values[i] > threshold`; a value equal to the threshold
/// is ordered.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::signal::binarize;
///
/// assert_eq!(binarize(&[0.1, 0.5, 0.51], 0.5), vec![0, 0, 1]);
/// assert!(binarize(&[], 0.5).is_empty());
/// ```
pub fn binarize(values: &[f64], threshold: f64) -> BinaryMask {
    values
        .iter()
        .map(|&v| if v > threshold { DISORDERED } else { ORDERED })
        .collect()
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fraction of disordered positions in a mask.
pub fn mask_mean(mask: &[u8]) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    mask.iter().filter(|&&m| m == DISORDERED).count() as f64 / mask.len() as f64
}
