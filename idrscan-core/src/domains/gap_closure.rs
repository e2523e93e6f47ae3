//! Closing of short ordered gaps between disordered stretches.

use crate::constants::{DISORDERED, ORDERED};

/// Fills short gaps in `mask`, for every gap size `1..=gap_closure`.
///
/// For each gap size `g` a cursor `i` scans from 0 and looks at the three
/// windows `[i, i+g)`, `[i+g, i+2g)` and `[i+2g, i+3g)`:
///
/// - all three ordered: jump to `i + 3g`
/// - all three disordered: jump to `i + 2g`
/// - otherwise, if the outer windows are both disordered the middle one is
///   set disordered; the cursor moves by one
///
/// The scan for `g` stops once `i + 3g >= mask.len()`, so a window triple that
/// ends exactly at the end of the mask is never inspected.
///
/// The scan is greedy and the jump sizes are part of the contract: later
/// stages were tuned against exactly this behaviour.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::domains::gap_closure::close_gaps;
///
/// let mut mask = vec![1, 1, 0, 0, 1, 1, 1];
/// close_gaps(&mut mask, 2);
/// assert_eq!(mask, vec![1, 1, 1, 1, 1, 1, 1]);
/// ```
pub fn close_gaps(mask: &mut [u8], gap_closure: usize) {
    let length = mask.len();
    for gap in 1..=gap_closure {
        let span = gap.saturating_mul(3);
        if span >= length {
            break;
        }
        let mut i = 0;
        while i + span < length {
            let window = &mask[i..i + span];
            if window.iter().all(|&v| v == ORDERED) {
                i += span;
            } else if window.iter().all(|&v| v == DISORDERED) {
                i += 2 * gap;
            } else {
                let left = is_disordered(&mask[i..i + gap]);
                let right = is_disordered(&mask[i + 2 * gap..i + span]);
                if left && right {
                    mask[i + gap..i + 2 * gap].fill(DISORDERED);
                }
                i += 1;
            }
        }
    }
}

fn is_disordered(window: &[u8]) -> bool {
    window.iter().all(|&v| v == DISORDERED)
}
