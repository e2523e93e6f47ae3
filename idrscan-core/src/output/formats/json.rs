use std::io::Write;

use crate::{results::DisorderRecord, types::IdrError};

/// Write the record as a single-line JSON object.
pub fn write_json_format<W: Write>(
    writer: &mut W,
    record: &DisorderRecord,
) -> Result<(), IdrError> {
    serde_json::to_writer(&mut *writer, record)?;
    writeln!(writer)?;
    Ok(())
}
