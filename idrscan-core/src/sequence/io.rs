use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;

use crate::types::IdrError;

/// FASTA record as `(id, description, residues)`
pub type FastaRecord = (String, Option<String>, Vec<u8>);

/// Reads every record of a FASTA file.
///
/// # Errors
///
/// Returns [`IdrError::IoError`] if the file cannot be opened and
/// [`IdrError::ParseError`] for malformed records.
pub fn read_fasta_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>, IdrError> {
    let file = File::open(path)?;
    read_fasta(file)
}

/// Reads every FASTA record from any reader, e.g. stdin.
pub fn read_fasta<R: Read>(reader: R) -> Result<Vec<FastaRecord>, IdrError> {
    let reader = fasta::Reader::new(reader);
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| IdrError::ParseError(e.to_string()))?;
        let id = record.id().to_string();
        let description = record.desc().map(String::from);
        let seq = record.seq().to_vec();
        sequences.push((id, description, seq));
    }

    Ok(sequences)
}
