//! Savitzky-Golay smoothing of disorder profiles.
//!
//! Every interior residue is replaced by the value at the window centre of a
//! least-squares polynomial fitted to the surrounding window. The first and
//! last half-windows are taken from the polynomial fitted to the first and
//! last full window respectively (the `interp` edge mode), so the output has
//! the same length as the input.

use tracing::warn;

use crate::types::IdrError;

/// Smooths `profile` with a Savitzky-Golay filter.
///
/// If the profile is shorter than `window_size`, the window shrinks to the
/// largest odd length that fits and `poly_order` is capped below it. A
/// profile of length 1 or 2 therefore passes through unchanged.
///
/// # Errors
///
/// Returns [`IdrError::InvalidParameter`] if `window_size` is even or
/// `poly_order >= window_size`, and [`IdrError::InternalInvariant`] if the
/// normal equations turn out singular.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::signal::smooth;
///
/// let flat = vec![0.7; 40];
/// let smoothed = smooth(&flat, 25, 3)?;
/// assert!(smoothed.iter().all(|v| (v - 0.7).abs() < 1e-9));
/// # Ok::<(), idrscan_core::types::IdrError>(())
/// ```
pub fn smooth(profile: &[f64], window_size: usize, poly_order: usize) -> Result<Vec<f64>, IdrError> {
    if window_size % 2 == 0 {
        return Err(IdrError::InvalidParameter(format!(
            "smoothing window must be odd, got {window_size}"
        )));
    }
    if poly_order >= window_size {
        return Err(IdrError::InvalidParameter(format!(
            "polynomial order {poly_order} must be below the smoothing window {window_size}"
        )));
    }

    let length = profile.len();
    if length == 0 {
        return Ok(Vec::new());
    }

    let (window, order) = effective_window(length, window_size, poly_order);
    if window < window_size {
        warn!(
            length,
            window, order, "profile shorter than smoothing window, reducing window"
        );
    }

    let fit = LocalFit::new(window, order)?;
    let half = window / 2;
    let mut smoothed = vec![0.0; length];

    let centre = fit.centre_weights();
    for i in half..length - half {
        smoothed[i] = centre
            .iter()
            .zip(&profile[i - half..=i + half])
            .map(|(w, v)| w * v)
            .sum();
    }

    let head = fit.coefficients(&profile[..window]);
    for (i, value) in smoothed.iter_mut().enumerate().take(half) {
        *value = evaluate(&head, i as f64 - half as f64);
    }

    let tail_start = length - window;
    let tail = fit.coefficients(&profile[tail_start..]);
    for (i, value) in smoothed.iter_mut().enumerate().skip(length - half) {
        *value = evaluate(&tail, (i - tail_start) as f64 - half as f64);
    }

    Ok(smoothed)
}

/// Window and order actually used for a profile of `length` residues.
pub(crate) fn effective_window(length: usize, window: usize, order: usize) -> (usize, usize) {
    if length >= window {
        return (window, order);
    }
    let reduced = if length % 2 == 0 { length - 1 } else { length };
    (reduced, order.min(reduced - 1))
}

/// Least-squares projection for a fixed window and polynomial order.
///
/// `projection[j][k]` is the weight of the `k`-th window sample in the `j`-th
/// polynomial coefficient, with the abscissa centred on the window middle.
struct LocalFit {
    projection: Vec<Vec<f64>>,
}

impl LocalFit {
    fn new(window: usize, order: usize) -> Result<Self, IdrError> {
        let half = (window / 2) as f64;
        let terms = order + 1;

        // Vandermonde matrix, one row per window sample
        let design: Vec<Vec<f64>> = (0..window)
            .map(|k| {
                let x = k as f64 - half;
                (0..terms).map(|j| x.powi(j as i32)).collect()
            })
            .collect();

        let mut normal = vec![vec![0.0; terms]; terms];
        for row in &design {
            for a in 0..terms {
                for b in 0..terms {
                    normal[a][b] += row[a] * row[b];
                }
            }
        }

        let inverse = invert(normal).ok_or_else(|| {
            IdrError::InternalInvariant(format!(
                "singular normal equations for window {window}, order {order}"
            ))
        })?;

        let projection = (0..terms)
            .map(|j| {
                design
                    .iter()
                    .map(|row| (0..terms).map(|b| inverse[j][b] * row[b]).sum())
                    .collect()
            })
            .collect();

        Ok(Self { projection })
    }

    fn centre_weights(&self) -> &[f64] {
        &self.projection[0]
    }

    fn coefficients(&self, samples: &[f64]) -> Vec<f64> {
        self.projection
            .iter()
            .map(|weights| weights.iter().zip(samples).map(|(w, y)| w * y).sum())
            .collect()
    }
}

/// Horner evaluation of `coefficients[0] + coefficients[1] x + ...`
fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Gauss-Jordan inversion with partial pivoting.
fn invert(mut matrix: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let size = matrix.len();
    let mut inverse: Vec<Vec<f64>> = (0..size)
        .map(|i| (0..size).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..size {
        let pivot = (col..size).max_by(|&a, &b| {
            matrix[a][col]
                .abs()
                .partial_cmp(&matrix[b][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot);
        inverse.swap(col, pivot);

        let scale = matrix[col][col];
        for j in 0..size {
            matrix[col][j] /= scale;
            inverse[col][j] /= scale;
        }

        for row in 0..size {
            if row == col {
                continue;
            }
            let factor = matrix[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..size {
                matrix[row][j] -= factor * matrix[col][j];
                inverse[row][j] -= factor * inverse[col][j];
            }
        }
    }

    Some(inverse)
}
