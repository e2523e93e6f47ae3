//! Removal of disordered runs that are too short to count as IDRs.

use crate::constants::{BOUNDARY, DISORDERED, ORDERED};

/// Zeroes every maximal disordered run of length `<= minimum_idr_size`.
///
/// The mask is padded with a [`BOUNDARY`] sentinel on both ends, then for
/// each run length `1..=minimum_idr_size` in increasing order every run of
/// exactly that many disordered positions, bounded on both sides by an
/// ordered position or the sentinel, is overwritten with ordered positions.
/// Runs at the sequence ends are therefore removed as well.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::domains::size_filter::remove_short_runs;
///
/// let mut mask = vec![1, 1, 0, 1, 1, 1, 0, 1];
/// remove_short_runs(&mut mask, 2);
/// assert_eq!(mask, vec![0, 0, 0, 1, 1, 1, 0, 0]);
/// ```
pub fn remove_short_runs(mask: &mut [u8], minimum_idr_size: usize) {
    if mask.is_empty() || minimum_idr_size == 0 {
        return;
    }

    let mut padded = Vec::with_capacity(mask.len() + 2);
    padded.push(BOUNDARY);
    padded.extend_from_slice(mask);
    padded.push(BOUNDARY);

    for run_length in 1..=minimum_idr_size.min(mask.len()) {
        erase_exact_runs(&mut padded, run_length);
    }

    let last = padded.len() - 1;
    mask.copy_from_slice(&padded[1..last]);
}

/// Overwrites runs of exactly `run_length` disordered positions.
fn erase_exact_runs(padded: &mut [u8], run_length: usize) {
    let mut i = 1;
    while i + run_length < padded.len() {
        let opens = padded[i - 1] != DISORDERED;
        let closes = padded[i + run_length] != DISORDERED;
        if opens && closes && padded[i..i + run_length].iter().all(|&v| v == DISORDERED) {
            padded[i..i + run_length].fill(ORDERED);
            i += run_length + 1;
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_at_both_boundaries_removed() {
        let mut mask = vec![1, 1, 0, 0, 0, 0, 0, 1];
        remove_short_runs(&mut mask, 2);
        assert_eq!(mask, vec![0; 8]);
    }

    #[test]
    fn test_run_longer_than_minimum_kept() {
        let mut mask = vec![0, 1, 1, 1, 0];
        remove_short_runs(&mut mask, 2);
        assert_eq!(mask, vec![0, 1, 1, 1, 0]);
    }

    #[test]
    fn test_run_equal_to_minimum_removed() {
        let mut mask = vec![0, 1, 1, 1, 0, 1, 1, 1, 1];
        remove_short_runs(&mut mask, 3);
        assert_eq!(mask, vec![0, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_exact_length_not_substring() {
        // A run of 5 contains runs of 1..=4 as substrings but must survive
        let mut mask = vec![1, 1, 1, 1, 1];
        remove_short_runs(&mut mask, 4);
        assert_eq!(mask, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_whole_mask_single_short_run() {
        let mut mask = vec![1, 1, 1];
        remove_short_runs(&mut mask, 12);
        assert_eq!(mask, vec![0, 0, 0]);
    }

    #[test]
    fn test_zero_minimum_is_noop() {
        let mut mask = vec![1, 0, 1];
        remove_short_runs(&mut mask, 0);
        assert_eq!(mask, vec![1, 0, 1]);
    }

    #[test]
    fn test_adjacent_short_runs() {
        let mut mask = vec![1, 0, 1, 0, 1, 1, 0, 1, 1, 1, 1];
        remove_short_runs(&mut mask, 2);
        assert_eq!(mask, vec![0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_empty_mask() {
        let mut mask: Vec<u8> = Vec::new();
        remove_short_runs(&mut mask, 12);
        assert!(mask.is_empty());
    }
}
