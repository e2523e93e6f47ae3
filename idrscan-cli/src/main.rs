//! # idrscan - Command-Line IDR Finder
//!
//! A command-line interface for decomposing proteins into intrinsically
//! disordered regions and folded domains.
//!
//! ## Usage
//!
//! ```bash
//! # Domain table for every protein in a FASTA file
//! idrscan -i proteome.fasta -o domains.tsv
//!
//! # Per-residue scores
//! idrscan -i proteome.fasta -f scores -o scores.csv
//!
//! # Read from stdin, legacy model, stricter threshold
//! cat p53.fasta | idrscan -m legacy -t 0.5
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input FASTA file (default: stdin)
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-f, --format <FORMAT>`: Output format: domains, scores, json (default: domains)
//! - `-m, --model <MODEL>`: Model version: legacy, v2, v3 (default: v3)
//! - `-t, --threshold <VALUE>`: Disorder threshold (default: the model's)
//! - `--min-idr <N>`, `--min-folded <N>`, `--gap-closure <N>`: Decomposition sizes
//! - `--override-folded-minsize`: Use the minimum folded size for every gap tier
//! - `-j, --threads <N>`: Worker threads (default: all cores)
//! - `-q, --quiet`: Only log warnings and errors
//! - `-v, --verbose`: Debug logging (repeat for trace)
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use idrscan_core::config::{IdrConfig, OutputFormat};
use idrscan_core::model::ModelVersion;
use idrscan_core::output::{write_header, write_results};
use idrscan_core::sequence::read_fasta;
use idrscan_core::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("idrscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Intrinsically disordered region and folded domain finder")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input FASTA file (default: stdin)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: domains, scores, json")
                .value_parser(value_parser!(OutputFormat))
                .default_value("domains"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model version: legacy, v2, v3")
                .value_parser(value_parser!(ModelVersion))
                .default_value("v3"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_name("VALUE")
                .help("Disorder threshold in [0, 1] (default: the model's)")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("min-idr")
                .long("min-idr")
                .value_name("N")
                .help("Minimum IDR size")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("min-folded")
                .long("min-folded")
                .value_name("N")
                .help("Minimum folded domain size")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("gap-closure")
                .long("gap-closure")
                .value_name("N")
                .help("Largest ordered gap closed between disordered stretches")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("override-folded-minsize")
                .long("override-folded-minsize")
                .action(ArgAction::SetTrue)
                .help("Apply the minimum folded domain size to every gap tier"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_name("N")
                .help("Number of worker threads (default: all cores)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Quiet mode"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Verbose logging (repeat for more)"),
        )
}

fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("quiet") {
        "warn"
    } else {
        match matches.get_count("verbose") {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(matches: &ArgMatches) -> IdrConfig {
    let model = *matches
        .get_one::<ModelVersion>("model")
        .unwrap_or(&ModelVersion::default());

    let mut params = model.parameters().domain_parameters();
    let mut overridden = false;
    if let Some(&threshold) = matches.get_one::<f64>("threshold") {
        params.disorder_threshold = threshold;
        overridden = true;
    }
    if let Some(&size) = matches.get_one::<usize>("min-idr") {
        params.minimum_idr_size = size;
        overridden = true;
    }
    if let Some(&size) = matches.get_one::<usize>("min-folded") {
        params.minimum_folded_domain = size;
        overridden = true;
    }
    if let Some(&size) = matches.get_one::<usize>("gap-closure") {
        params.gap_closure = size;
        overridden = true;
    }
    if matches.get_flag("override-folded-minsize") {
        params.override_folded_domain_minsize = true;
        overridden = true;
    }

    IdrConfig {
        model,
        domain_parameters: overridden.then_some(params),
        output_format: matches
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or_default(),
        num_threads: matches.get_one::<usize>("threads").copied(),
        quiet: matches.get_flag("quiet"),
    }
}

/// Main entry point for the idrscan CLI application.
///
/// Parses command-line arguments, scores every input sequence, and writes
/// the decomposition in the requested format. Sequences that fail are
/// logged and skipped; the process exits with an error if any failed.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();
    init_logging(&matches);

    let config = build_config(&matches);
    if let Some(params) = &config.domain_parameters {
        params.validate()?;
    }
    let format = config.output_format;
    let analyzer = DisorderAnalyzer::with_config(config);

    let outcomes = if let Some(input_file) = matches.get_one::<String>("input") {
        analyzer.analyze_fasta_file(input_file)?
    } else {
        let records = read_fasta(io::stdin().lock())?;
        analyzer.predict_batch(&records)?
    };

    let mut writer: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output")
    {
        Box::new(BufWriter::new(File::create(output_file)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    write_header(&mut writer, format)?;
    let mut failed = 0usize;
    let mut idr_count = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(record) => {
                idr_count += record.idrs.len();
                write_results(&mut writer, record, format)?;
            }
            Err(e) => {
                failed += 1;
                error!(id = %outcome.id, "skipped: {e}");
            }
        }
    }
    writer.flush()?;

    info!(
        "Analysis complete! Found {} IDRs in {} sequences.",
        idr_count,
        outcomes.len() - failed
    );

    if failed > 0 {
        return Err(format!("{failed} of {} sequences failed", outcomes.len()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }

    #[test]
    fn test_defaults_leave_parameters_to_model() {
        let matches = cli().get_matches_from(["idrscan"]);
        let config = build_config(&matches);
        assert_eq!(config.model, ModelVersion::V3);
        assert_eq!(config.output_format, OutputFormat::Domains);
        assert!(config.domain_parameters.is_none());
        assert!(config.num_threads.is_none());
    }

    #[test]
    fn test_overrides_start_from_model_parameters() {
        let matches =
            cli().get_matches_from(["idrscan", "-m", "legacy", "--min-idr", "20", "-j", "2"]);
        let config = build_config(&matches);
        let params = config.domain_parameters.unwrap();
        assert_eq!(params.minimum_idr_size, 20);
        assert_eq!(params.disorder_threshold, 0.42);
        assert_eq!(config.num_threads, Some(2));
    }
}
