use crate::domains::boundaries::Interval;
use crate::types::{Domain, DomainKind};

/// Slices `sequence` along each interval, dropping empty intervals.
///
/// `sequence` must be ASCII and at least as long as the last interval end.
pub fn assemble_domains(sequence: &str, intervals: &[Interval], kind: DomainKind) -> Vec<Domain> {
    intervals
        .iter()
        .filter(|interval| !interval.is_empty())
        .map(|interval| Domain {
            kind,
            start: interval.start,
            end: interval.end,
            sequence: sequence[interval.start..interval.end].to_string(),
        })
        .collect()
}
