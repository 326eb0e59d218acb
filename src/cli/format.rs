//! Output formatting utilities for CLI operations

use std::io::{self, Write};
use std::str::FromStr;

use crate::error::PgxError;
use crate::pgx::{AnalysisReport, PatientProfile, RULES, TRACKED_GENES};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Column-aligned text (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_pgx::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

fn json_io_error(e: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn write_confidence<W: Write>(writer: &mut W, profile: &PatientProfile) -> io::Result<()> {
    writeln!(
        writer,
        "Confidence: {}% ({}) - {}/{} markers resolved",
        profile.confidence_score,
        profile.confidence_tier().label(),
        profile.resolved_markers,
        profile.total_markers
    )
}

/// Write a full analysis report
///
/// Text output is a header line with the confidence score followed by one
/// row per requested drug.
///
/// # Examples
///
/// ```
/// use ferro_pgx::analyze;
/// use ferro_pgx::cli::{write_report, OutputFormat};
/// use std::io::Cursor;
///
/// let report = analyze("", &["CODEINE"]);
/// let mut buffer = Cursor::new(Vec::new());
/// write_report(&mut buffer, &report, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("CODEINE"));
/// assert!(result.contains("Low Confidence"));
/// ```
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &AnalysisReport,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report).map_err(json_io_error)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            write_confidence(writer, &report.profile)?;
            writeln!(writer)?;
            writeln!(
                writer,
                "{:<14}{:<10}{:<17}{:<26}{:<15}RECOMMENDATION",
                "DRUG", "GENE", "DIPLOTYPE", "PHENOTYPE", "RISK"
            )?;
            for a in &report.results {
                writeln!(
                    writer,
                    "{:<14}{:<10}{:<17}{:<26}{:<15}{}",
                    a.drug,
                    a.associated_gene,
                    a.diplotype_label.as_str(),
                    a.phenotype_label.as_str(),
                    a.risk_category.as_str(),
                    a.recommendation_text
                )?;
            }
            Ok(())
        }
    }
}

/// Write only the gene profile and confidence score
pub fn write_profile<W: Write>(
    writer: &mut W,
    profile: &PatientProfile,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, profile).map_err(json_io_error)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            write_confidence(writer, profile)?;
            writeln!(writer)?;
            writeln!(
                writer,
                "{:<10}{:<17}{:<26}ACTIVITY",
                "GENE", "DIPLOTYPE", "PHENOTYPE"
            )?;
            for (gene, call) in &profile.gene_phenotypes {
                writeln!(
                    writer,
                    "{:<10}{:<17}{:<26}{:.1}",
                    gene.symbol(),
                    call.diplotype_label.as_str(),
                    call.phenotype_label.as_str(),
                    call.activity_score
                )?;
            }
            Ok(())
        }
    }
}

/// List the drugs in the decision table
pub fn write_drug_table<W: Write>(writer: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let drugs: Vec<_> = RULES
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "drug": r.drug,
                        "gene": r.gene,
                        "mechanism": r.mechanism,
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &drugs).map_err(json_io_error)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            writeln!(writer, "{:<14}{:<10}MECHANISM", "DRUG", "GENE")?;
            for rule in RULES {
                writeln!(
                    writer,
                    "{:<14}{:<10}{}",
                    rule.drug,
                    rule.gene.symbol(),
                    rule.mechanism.as_str()
                )?;
            }
            Ok(())
        }
    }
}

/// List the tracked genes and their markers
pub fn write_gene_table<W: Write>(writer: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let genes: Vec<_> = TRACKED_GENES
                .iter()
                .map(|g| {
                    serde_json::json!({
                        "gene": g,
                        "markers": g.markers(),
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &genes).map_err(json_io_error)?;
            writeln!(writer)
        }
        OutputFormat::Text => {
            writeln!(writer, "{:<10}MARKERS", "GENE")?;
            for gene in TRACKED_GENES {
                writeln!(writer, "{:<10}{}", gene.symbol(), gene.markers().join(", "))?;
            }
            Ok(())
        }
    }
}

/// Write an error to the output
///
/// # Examples
///
/// ```
/// use ferro_pgx::cli::{output_error, OutputFormat};
/// use ferro_pgx::PgxError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// output_error(&mut buffer, &PgxError::EmptyInput, OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.starts_with("ERROR [E1003]"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    error: &PgxError,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "error": error.to_string(),
                "code": error.code().as_str(),
                "status": "error",
            });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => writeln!(writer, "ERROR [{}]: {}", error.code(), error),
    }
}
