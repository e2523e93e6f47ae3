use serde::Serialize;

use crate::constants::DISORDERED;

/// Half-open residue interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<(usize, usize)> for Interval {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

/// Maximal runs of a mask, split by value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundaries {
    /// Maximal runs of disordered positions
    pub domains: Vec<Interval>,
    /// Maximal runs of ordered positions
    pub gaps: Vec<Interval>,
}

/// Walks the mask left to right and emits every maximal run.
///
/// The two lists interleave and together partition `[0, mask.len())`. An
/// all-0 mask yields one full-length gap, an all-1 mask one full-length
/// domain.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::domains::boundaries::{extract_boundaries, Interval};
///
/// let runs = extract_boundaries(&[0, 1, 1, 0]);
/// assert_eq!(runs.domains, vec![Interval::new(1, 3)]);
/// assert_eq!(runs.gaps, vec![Interval::new(0, 1), Interval::new(3, 4)]);
/// ```
pub fn extract_boundaries(mask: &[u8]) -> Boundaries {
    let mut boundaries = Boundaries::default();
    let Some(&first) = mask.first() else {
        return boundaries;
    };

    let mut run_start = 0;
    let mut current = first;
    for (i, &value) in mask.iter().enumerate().skip(1) {
        if value != current {
            boundaries.push_run(current, Interval::new(run_start, i));
            run_start = i;
            current = value;
        }
    }
    boundaries.push_run(current, Interval::new(run_start, mask.len()));

    boundaries
}

impl Boundaries {
    fn push_run(&mut self, value: u8, run: Interval) {
        if value == DISORDERED {
            self.domains.push(run);
        } else {
            self.gaps.push(run);
        }
    }
}
