use std::io::Write;

use crate::{results::DisorderRecord, types::IdrError};

pub const DOMAINS_HEADER: &str = "#id\tkind\tstart\tend\tlength\tsequence";

/// Write one row per domain, IDRs and folded domains interleaved by start.
///
/// Coordinates are 0-based and half-open.
pub fn write_domains_format<W: Write>(
    writer: &mut W,
    record: &DisorderRecord,
) -> Result<(), IdrError> {
    for domain in record.domains() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            record.sequence_info.id,
            domain.kind,
            domain.start,
            domain.end,
            domain.len(),
            domain.sequence
        )?;
    }
    Ok(())
}
