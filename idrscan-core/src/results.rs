use serde::Serialize;

use crate::model::ModelVersion;
use crate::types::{Domain, IdrError};

/// Disorder prediction for one protein.
///
/// Built once per prediction and never modified afterwards.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::{DisorderAnalyzer, config::IdrConfig};
/// use idrscan_core::model::{ModelHandle, ModelVersion};
///
/// let analyzer = DisorderAnalyzer::new(
///     IdrConfig::default(),
///     ModelHandle::with_propensity_scorer(ModelVersion::V3),
/// );
/// let record = analyzer.predict("demo", "MSEEKKPQSTPPEEKSAS")?;
///
/// println!("{}: {} residues", record.sequence_info.id, record.sequence_info.length);
/// for idr in &record.idrs {
///     println!("IDR {}-{}: {}", idr.start, idr.end, idr.sequence);
/// }
/// # Ok::<(), idrscan_core::types::IdrError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisorderRecord {
    /// Identifier and length of the protein.
    pub sequence_info: SequenceInfo,

    /// Model the scores came from.
    pub model: ModelVersion,

    /// Residues, uppercased.
    pub sequence: String,

    /// Per-residue disorder scores as produced by the scorer.
    pub scores: Vec<f64>,

    /// Savitzky-Golay smoothed scores used for domain calls.
    pub smoothed: Vec<f64>,

    /// Intrinsically disordered regions sorted by start.
    pub idrs: Vec<Domain>,

    /// Folded domains sorted by start.
    pub folded_domains: Vec<Domain>,
}

impl DisorderRecord {
    /// Fraction of residues inside an IDR.
    pub fn disorder_fraction(&self) -> f64 {
        if self.sequence.is_empty() {
            return 0.0;
        }
        let disordered: usize = self.idrs.iter().map(Domain::len).sum();
        disordered as f64 / self.sequence.len() as f64
    }

    /// IDRs and folded domains interleaved in sequence order.
    pub fn domains(&self) -> Vec<&Domain> {
        let mut all: Vec<&Domain> = self.idrs.iter().chain(&self.folded_domains).collect();
        all.sort_by_key(|domain| domain.start);
        all
    }
}

/// Information about a processed sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceInfo {
    /// Sequence identifier, the first word of the FASTA header
    pub id: String,

    /// Remainder of the FASTA header line
    pub description: Option<String>,

    /// Number of residues
    pub length: usize,
}

/// Result of one sequence in a batch run, keyed by sequence id.
#[derive(Debug)]
pub struct BatchOutcome {
    pub id: String,
    pub result: Result<DisorderRecord, IdrError>,
}
