#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

pub const SHORT_ID: &str = "short";
pub const SHORT_SEQUENCE: &str = "MSEEKKPQSTPPEEKSASGS";
pub const LONG_ID: &str = "long";
pub const LONG_SEQUENCE: &str = "MKVLAAGIVALLLAAGCSSWFLIVMYWFLIVAACDEFGHIKLMNPQRSTVWYACDEFGHI";

/// Builds an `idrscan` command from the workspace binary
pub fn idrscan() -> Command {
    Command::cargo_bin("idrscan").unwrap()
}

/// Renders `(id, sequence)` pairs as FASTA text
pub fn fasta(records: &[(&str, &str)]) -> String {
    records
        .iter()
        .map(|(id, sequence)| format!(">{id}\n{sequence}\n"))
        .collect()
}

/// Writes `(id, sequence)` pairs to a temporary FASTA file
pub fn write_fasta(records: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(fasta(records).as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Runs idrscan on a FASTA file and returns stdout
pub fn run_idrscan(input: &NamedTempFile, args: &[&str]) -> String {
    let output = idrscan()
        .arg("-i")
        .arg(input.path())
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}
