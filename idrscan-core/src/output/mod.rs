//! Output formatting for disorder predictions.
//!
//! This module provides writers for converting [`DisorderRecord`]s into
//! plain-text tables or JSON.
//!
//! ## Supported Formats
//!
//! - **Domains**: tab-separated, one row per IDR or folded domain
//! - **Scores**: comma-separated, one row per residue
//! - **Json**: one JSON object per line (JSON Lines)
//!
//! ## Examples
//!
//! ```rust
//! use idrscan_core::{DisorderAnalyzer, config::{IdrConfig, OutputFormat}};
//! use idrscan_core::output::{write_header, write_results};
//!
//! let analyzer = DisorderAnalyzer::with_config(IdrConfig::default());
//! let record = analyzer.predict("demo", "MSEEKKPQSTPPEEKSAS")?;
//!
//! let mut out = Vec::new();
//! write_header(&mut out, OutputFormat::Domains)?;
//! write_results(&mut out, &record, OutputFormat::Domains)?;
//! assert!(String::from_utf8(out).unwrap().starts_with("#id\tkind"));
//! # Ok::<(), idrscan_core::types::IdrError>(())
//! ```

use std::io::Write;

use crate::{config::OutputFormat, results::DisorderRecord, types::IdrError};

mod formats {
    pub mod domains;
    pub mod json;
    pub mod scores;
}

use formats::{
    domains::{DOMAINS_HEADER, write_domains_format},
    json::write_json_format,
    scores::{SCORES_HEADER, write_scores_format},
};

/// Writes the column header of a tabular format, once per output stream.
///
/// JSON output has no header.
///
/// # Errors
///
/// Returns [`IdrError::IoError`] if writing fails.
pub fn write_header<W: Write>(writer: &mut W, format: OutputFormat) -> Result<(), IdrError> {
    match format {
        OutputFormat::Domains => writeln!(writer, "{DOMAINS_HEADER}")?,
        OutputFormat::Scores => writeln!(writer, "{SCORES_HEADER}")?,
        OutputFormat::Json => {}
    }
    Ok(())
}

/// Writes one prediction in the specified format.
///
/// # Errors
///
/// Returns [`IdrError`] if writing or serialisation fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    record: &DisorderRecord,
    format: OutputFormat,
) -> Result<(), IdrError> {
    match format {
        OutputFormat::Domains => write_domains_format(writer, record),
        OutputFormat::Scores => write_scores_format(writer, record),
        OutputFormat::Json => write_json_format(writer, record),
    }
}
