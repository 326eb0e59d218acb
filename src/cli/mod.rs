//! CLI utilities for ferro-pgx
//!
//! Testable pieces of the command-line binary: output formatting and input
//! cleanup. Keeping them in the library lets them be unit tested without
//! end-to-end CLI runs.

pub mod format;

pub use format::{
    output_error, write_drug_table, write_gene_table, write_profile, write_report, OutputFormat,
};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::PgxError;

pub use crate::vcf::strip_bom;

/// Open the report destination: a file when a path is given, stdout otherwise.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, PgxError> {
    match path {
        Some(p) => {
            let file = File::create(p).map_err(|e| PgxError::Io {
                msg: format!("Failed to create '{}': {}", p.display(), e),
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        {
            let mut out = open_output(Some(&path)).unwrap();
            writeln!(out, "hello").unwrap();
            out.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_open_output_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.txt");
        assert!(matches!(
            open_output(Some(&path)),
            Err(PgxError::Io { .. })
        ));
    }
}
