//! Protein sequence reading and validation.
//!
//! ## Modules
//!
//! - [`io`]: FASTA reading via rust-bio
//!
//! ## Examples
//!
//! ```rust
//! use idrscan_core::sequence::normalize_sequence;
//!
//! let residues = normalize_sequence(b"mseek kpq*\n")?;
//! assert_eq!(residues, "MSEEKKPQ");
//! # Ok::<(), idrscan_core::types::IdrError>(())
//! ```

pub mod io;

pub use io::{FastaRecord, read_fasta, read_fasta_sequences};

use crate::types::IdrError;

/// Uppercases residues and strips whitespace and a trailing stop `*`.
///
/// # Errors
///
/// Returns [`IdrError::InvalidSequence`] if any remaining byte is not an
/// ASCII letter, and [`IdrError::EmptyInput`] if nothing is left.
pub fn normalize_sequence(raw: &[u8]) -> Result<String, IdrError> {
    let mut residues: Vec<u8> = raw
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .map(u8::to_ascii_uppercase)
        .collect();
    if residues.last() == Some(&b'*') {
        residues.pop();
    }

    if let Some(position) = residues.iter().position(|b| !b.is_ascii_uppercase()) {
        return Err(IdrError::InvalidSequence(format!(
            "unexpected character '{}' at residue {}",
            residues[position].escape_ascii(),
            position + 1
        )));
    }
    if residues.is_empty() {
        return Err(IdrError::EmptyInput);
    }

    // Only ASCII letters remain
    String::from_utf8(residues).map_err(|e| IdrError::InvalidSequence(e.to_string()))
}
