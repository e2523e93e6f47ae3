use std::io::Write;

use crate::{results::DisorderRecord, types::IdrError};

pub const SCORES_HEADER: &str = "id,position,residue,score,smoothed,idr";

/// Write one CSV row per residue: raw score, smoothed score and whether the
/// residue falls inside an IDR (`1`) or not (`0`).
pub fn write_scores_format<W: Write>(
    writer: &mut W,
    record: &DisorderRecord,
) -> Result<(), IdrError> {
    let length = record.sequence.len();
    let mut in_idr = vec![false; length];
    for idr in &record.idrs {
        let end = idr.end.min(length);
        if idr.start < end {
            in_idr[idr.start..end].fill(true);
        }
    }

    let rows = record
        .sequence
        .chars()
        .zip(&record.scores)
        .zip(&record.smoothed)
        .zip(&in_idr);
    for (position, (((residue, score), smoothed), &idr)) in rows.enumerate() {
        writeln!(
            writer,
            "{},{},{},{:.4},{:.4},{}",
            record.sequence_info.id,
            position,
            residue,
            score,
            smoothed,
            u8::from(idr)
        )?;
    }
    Ok(())
}
