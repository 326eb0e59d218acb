// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-pgx CLI
//!
//! Command-line interface for pharmacogenomic drug-risk assessment of VCF files.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ferro_pgx::cli::{
    open_output, output_error, write_drug_table, write_gene_table, write_profile, write_report,
    OutputFormat,
};
use ferro_pgx::config::PgxConfig;
use ferro_pgx::input::{parse_drug_list, validate_path};
use ferro_pgx::pgx::{build_profile, AnalysisReport};
use ferro_pgx::vcf::{open_vcf_limited, read_vcf_limited};
use ferro_pgx::{PgxError, VariantRecord};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ferro-pgx")]
#[command(author, version, about = "Pharmacogenomic drug-risk assessment from VCF genotypes")]
#[command(
    long_about = "Call coarse phenotypes for CYP2D6, CYP2C9, CYP2C19, SLCO1B1, TPMT and DPYD
from a single-sample VCF and assess drug risk against a fixed decision table.

Examples:
  ferro-pgx analyze -i sample.vcf
  ferro-pgx analyze -i sample.vcf.gz --drugs codeine,warfarin -f json -o report.json
  cat sample.vcf | ferro-pgx analyze -i -
  ferro-pgx profile -i sample.vcf
  ferro-pgx drugs"
)]
struct Cli {
    /// Log level or filter directive (e.g. debug, ferro_pgx=trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Config file (default: .ferro-pgx.toml, then ~/.config/ferro-pgx/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess drug risk for a VCF file
    Analyze {
        /// Input VCF file, optionally gzipped (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated drug names (default: config list, then all supported drugs)
        #[arg(long)]
        drugs: Option<String>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the gene profile and confidence score only
    Profile {
        /// Input VCF file, optionally gzipped (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List supported drugs with their gene and mechanism
    Drugs {
        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List tracked genes and their markers
    Genes {
        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn init_tracing(level: &str) -> Result<(), PgxError> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_new(level).map_err(|e| PgxError::Config {
        msg: format!("Invalid log level '{}': {}", level, e),
    })?;

    // stdout carries the report, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    debug!("Tracing initialized with level: {}", level);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PgxConfig, PgxError> {
    match path {
        Some(p) => PgxConfig::load_from_path(p),
        None => Ok(PgxConfig::load()?.unwrap_or_default()),
    }
}

/// Validate and read the input; `-` reads stdin and skips the name checks.
///
/// The size limit is enforced on the decoded stream as well, which covers
/// stdin and gzip input.
fn read_input(input: &Path, config: &PgxConfig) -> Result<Vec<VariantRecord>, PgxError> {
    let limits = config.upload_limits();
    if input == Path::new("-") {
        return read_vcf_limited(io::stdin().lock(), limits.max_file_size);
    }
    validate_path(input, &limits)?;
    open_vcf_limited(input, limits.max_file_size)
}

fn run_analyze(
    input: &Path,
    drugs: Option<&str>,
    format: OutputFormat,
    output: Option<&Path>,
    config: &PgxConfig,
) -> Result<(), PgxError> {
    let cli_drugs = drugs.map(parse_drug_list).transpose()?;
    let drugs = config.drugs_with_cli(cli_drugs);
    if drugs.is_empty() {
        return Err(PgxError::NoDrugsRequested);
    }

    let variants = read_input(input, config)?;
    let report = AnalysisReport::from_profile(build_profile(&variants), &drugs);
    info!(
        input = %input.display(),
        drugs = drugs.len(),
        confidence = report.confidence_score,
        "Analysis complete"
    );

    let mut out = open_output(output)?;
    write_report(&mut out, &report, format)?;
    out.flush()?;
    Ok(())
}

fn run_profile(input: &Path, format: OutputFormat, config: &PgxConfig) -> Result<(), PgxError> {
    let variants = read_input(input, config)?;
    let profile = build_profile(&variants);

    let mut out = open_output(None)?;
    write_profile(&mut out, &profile, format)?;
    out.flush()?;
    Ok(())
}

fn run_listing<F>(write: F) -> Result<(), PgxError>
where
    F: FnOnce(&mut Box<dyn Write>) -> io::Result<()>,
{
    let mut out = open_output(None)?;
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), PgxError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            drugs,
            format,
            output,
        } => run_analyze(
            &input,
            drugs.as_deref(),
            parse_format(&format),
            output.as_deref(),
            &config,
        ),
        Commands::Profile { input, format } => run_profile(&input, parse_format(&format), &config),
        Commands::Drugs { format } => {
            run_listing(|w| write_drug_table(w, parse_format(&format)))
        }
        Commands::Genes { format } => {
            run_listing(|w| write_gene_table(w, parse_format(&format)))
        }
    }
}

fn parse_format(format: &str) -> OutputFormat {
    // FromStr for OutputFormat is infallible
    format.parse().unwrap_or_default()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("{}", e.detailed_message());
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = output_error(&mut io::stderr(), &e, OutputFormat::Text);
            ExitCode::FAILURE
        }
    }
}
