use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{DomainParameters, IdrConfig};
use crate::domains::get_domains;
use crate::model::ModelHandle;
use crate::results::{BatchOutcome, DisorderRecord, SequenceInfo};
use crate::sequence::{FastaRecord, normalize_sequence, read_fasta_sequences};
use crate::types::IdrError;

/// High-level disorder predictor.
///
/// Couples an [`IdrConfig`] with a [`ModelHandle`]: sequences are scored by
/// the model, clamped into `[0, 1]`, then decomposed into IDRs and folded
/// domains. The analyzer holds no per-sequence state, so a single instance
/// can serve any number of predictions, including concurrent ones.
///
/// # Examples
///
/// ```rust
/// use idrscan_core::{DisorderAnalyzer, config::IdrConfig};
///
/// let analyzer = DisorderAnalyzer::with_config(IdrConfig::default());
/// let record = analyzer.predict("demo", "MSEEKKPQSTPPEEKSASWFLIVMYWFLIVAAC")?;
/// assert_eq!(record.sequence_info.length, 33);
/// # Ok::<(), idrscan_core::types::IdrError>(())
/// ```
#[derive(Debug)]
pub struct DisorderAnalyzer {
    /// Configuration options for prediction
    pub config: IdrConfig,
    model: ModelHandle,
}

impl DisorderAnalyzer {
    /// Creates an analyzer around an existing model handle.
    ///
    /// `config.model` is overwritten with the handle's version.
    pub fn new(mut config: IdrConfig, model: ModelHandle) -> Self {
        config.model = model.version();
        Self { config, model }
    }

    /// Creates an analyzer backed by the built-in propensity scorer for
    /// `config.model`.
    pub fn with_config(config: IdrConfig) -> Self {
        let model = ModelHandle::with_propensity_scorer(config.model);
        Self::new(config, model)
    }

    pub const fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Decomposition parameters in effect: the configured override, or the
    /// model's registry defaults.
    pub fn domain_parameters(&self) -> DomainParameters {
        self.config
            .domain_parameters
            .clone()
            .unwrap_or_else(|| self.model.parameters().domain_parameters())
    }

    /// Scores and decomposes one sequence.
    ///
    /// # Arguments
    ///
    /// * `id` - Sequence identifier carried into the record
    /// * `sequence` - Residues; case and whitespace are normalised
    ///
    /// # Errors
    ///
    /// Returns [`IdrError`] if the sequence is invalid, the scorer fails, or
    /// the decomposition rejects its input.
    pub fn predict(&self, id: &str, sequence: &str) -> Result<DisorderRecord, IdrError> {
        self.predict_record(id, None, sequence.as_bytes())
    }

    /// Decomposes a sequence using a precomputed disorder profile.
    ///
    /// The profile is used as given; it is not clamped.
    ///
    /// # Errors
    ///
    /// Returns [`IdrError::LengthMismatch`] if `profile` and `sequence`
    /// differ in length, plus anything [`get_domains`] reports.
    pub fn predict_with_profile(
        &self,
        id: &str,
        sequence: &str,
        profile: &[f64],
    ) -> Result<DisorderRecord, IdrError> {
        let residues = normalize_sequence(sequence.as_bytes())?;
        let info = SequenceInfo {
            id: id.to_string(),
            description: None,
            length: residues.len(),
        };
        self.build_record(info, residues, profile.to_vec())
    }

    /// Predicts every record in parallel.
    ///
    /// One rayon task runs per sequence. Outcomes come back in input order,
    /// each keyed by its sequence id; a failing sequence produces an `Err`
    /// outcome and does not affect the others.
    ///
    /// # Errors
    ///
    /// Only fails if the dedicated thread pool requested through
    /// `config.num_threads` cannot be built.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idrscan_core::{DisorderAnalyzer, config::IdrConfig};
    ///
    /// let analyzer = DisorderAnalyzer::with_config(IdrConfig::default());
    /// let records = vec![
    ///     ("ok".to_string(), None, b"MSEEKKPQSTPPEEKS".to_vec()),
    ///     ("bad".to_string(), None, b"MSE1K".to_vec()),
    /// ];
    /// let outcomes = analyzer.predict_batch(&records)?;
    /// assert!(outcomes[0].result.is_ok());
    /// assert!(outcomes[1].result.is_err());
    /// # Ok::<(), idrscan_core::types::IdrError>(())
    /// ```
    pub fn predict_batch(&self, records: &[FastaRecord]) -> Result<Vec<BatchOutcome>, IdrError> {
        let run = || -> Vec<BatchOutcome> {
            records
                .par_iter()
                .map(|(id, description, residues)| BatchOutcome {
                    id: id.clone(),
                    result: self.predict_record(id, description.clone(), residues),
                })
                .collect()
        };

        let outcomes = match self.config.num_threads {
            Some(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| {
                    IdrError::InvalidParameter(format!("Failed to configure thread pool: {e}"))
                })?
                .install(run),
            None => run(),
        };

        for outcome in &outcomes {
            match &outcome.result {
                Ok(record) if !self.config.quiet => info!(
                    id = %outcome.id,
                    length = record.sequence_info.length,
                    idrs = record.idrs.len(),
                    folded = record.folded_domains.len(),
                    "predicted"
                ),
                Ok(_) => {}
                Err(error) => warn!(id = %outcome.id, %error, "prediction failed"),
            }
        }

        Ok(outcomes)
    }

    /// Reads a FASTA file and predicts every sequence in it.
    ///
    /// # Errors
    ///
    /// Returns [`IdrError`] if the file cannot be read or parsed. Failures of
    /// individual sequences are reported inside the returned outcomes.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use idrscan_core::{DisorderAnalyzer, config::IdrConfig};
    ///
    /// let analyzer = DisorderAnalyzer::with_config(IdrConfig::default());
    /// for outcome in analyzer.analyze_fasta_file("proteome.fasta")? {
    ///     match outcome.result {
    ///         Ok(record) => println!("{}: {} IDRs", outcome.id, record.idrs.len()),
    ///         Err(e) => eprintln!("{}: {e}", outcome.id),
    ///     }
    /// }
    /// # Ok::<(), idrscan_core::types::IdrError>(())
    /// ```
    pub fn analyze_fasta_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<BatchOutcome>, IdrError> {
        let records = read_fasta_sequences(path)?;
        if !self.config.quiet {
            info!(sequences = records.len(), model = %self.model.version(), "loaded FASTA");
        }
        self.predict_batch(&records)
    }

    fn predict_record(
        &self,
        id: &str,
        description: Option<String>,
        raw: &[u8],
    ) -> Result<DisorderRecord, IdrError> {
        let residues = normalize_sequence(raw)?;
        let scores = self.model.score(&residues)?;
        let info = SequenceInfo {
            id: id.to_string(),
            description,
            length: residues.len(),
        };
        self.build_record(info, residues, scores)
    }

    fn build_record(
        &self,
        sequence_info: SequenceInfo,
        sequence: String,
        scores: Vec<f64>,
    ) -> Result<DisorderRecord, IdrError> {
        let params = self.domain_parameters();
        let decomposition = get_domains(&sequence, &scores, &params)?;
        debug!(
            id = %sequence_info.id,
            idrs = decomposition.disordered.len(),
            folded = decomposition.folded.len(),
            "decomposed disorder profile"
        );

        Ok(DisorderRecord {
            sequence_info,
            model: self.model.version(),
            sequence,
            scores,
            smoothed: decomposition.smoothed,
            idrs: decomposition.disordered,
            folded_domains: decomposition.folded,
        })
    }
}
