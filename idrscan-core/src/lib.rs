//! # idrscan - intrinsically disordered region detection
//!
//! Decomposes a protein sequence into intrinsically disordered regions (IDRs)
//! and folded domains from a per-residue disorder profile.
//!
//! ## Overview
//!
//! A disorder predictor assigns every residue a score between 0 and 1. That
//! raw profile is noisy, so the library smooths it, thresholds it into a
//! binary mask, closes short gaps, drops short disordered runs, and finally
//! folds weakly ordered stretches back into the flanking IDRs. The output is
//! an ordered, non-overlapping partition of the sequence into IDRs and folded
//! domains.
//!
//! ## Features
//!
//! - **Profile decomposition**: [`domains::get_domains`] works on any profile
//!   you already have
//! - **Built-in scoring**: versioned models in [`model`] produce the profile
//!   from sequence alone
//! - **Batch analysis**: FASTA input scored in parallel using Rayon
//! - **Multiple output formats**: domain table, per-residue scores and JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use idrscan_core::{config::DomainParameters, domains::get_domains};
//!
//! let sequence = "A".repeat(80);
//! let profile = vec![0.9; 80];
//!
//! let result = get_domains(&sequence, &profile, &DomainParameters::default())?;
//! assert_eq!(result.disordered.len(), 1);
//! assert!(result.folded.is_empty());
//! # Ok::<(), idrscan_core::types::IdrError>(())
//! ```
//!
//! ## Scoring From Sequence
//!
//! ```rust
//! use idrscan_core::{DisorderAnalyzer, config::IdrConfig};
//!
//! let analyzer = DisorderAnalyzer::with_config(IdrConfig::default());
//! let record = analyzer.predict("p53_tad", "MEEPQSDPSVEPPLSQETFSDLWKLLPENNVLSPLPSQAMDDLMLSPDDIEQWFTEDPGP")?;
//!
//! println!("{:.1}% disordered", 100.0 * record.disorder_fraction());
//! # Ok::<(), idrscan_core::types::IdrError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Decomposition parameters and run configuration
//! - [`constants`]: Default thresholds and sizes
//! - [`signal`]: Smoothing and thresholding of the raw profile
//! - [`domains`]: The decomposition pipeline
//! - [`model`]: Versioned disorder scoring models
//! - [`engine`]: Single and batch analysis
//! - [`sequence`]: FASTA reading and residue normalisation
//! - [`results`]: Per-sequence prediction records
//! - [`output`]: Output writers
//! - [`types`]: Core data types and errors
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, IdrError>`](types::IdrError),
//! reporting:
//!
//! - Invalid decomposition parameters
//! - Empty input or a profile whose length differs from the sequence
//! - Unexpected characters in a sequence
//! - I/O and parse errors when reading FASTA

pub mod config;
pub mod constants;
pub mod domains;
pub mod engine;
pub mod model;
pub mod output;
pub mod results;
pub mod sequence;
pub mod signal;
pub mod types;

pub use engine::DisorderAnalyzer;
