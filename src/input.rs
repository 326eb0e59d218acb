//! Upload validation for callers of the analysis core
//!
//! The core accepts any text. Callers that accept files from users should
//! reject obviously wrong uploads (wrong extension, empty, oversized) and
//! empty drug lists before invoking it.

use std::collections::HashSet;
use std::path::Path;

use crate::error::PgxError;

/// Default upload size limit: 50 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Limits applied to uploaded files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// Maximum file size in bytes
    pub max_file_size: u64,
    /// Require a `.vcf` or `.vcf.gz` file name
    pub require_vcf_extension: bool,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            require_vcf_extension: true,
        }
    }
}

/// Whether a file name carries a VCF extension (case-insensitive)
pub fn has_vcf_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".vcf") || lower.ends_with(".vcf.gz")
}

/// Validate an upload by name and size.
pub fn validate_upload(name: &str, size: u64, limits: &UploadLimits) -> Result<(), PgxError> {
    if limits.require_vcf_extension && !has_vcf_extension(name) {
        return Err(PgxError::InvalidFileType {
            name: name.to_string(),
        });
    }
    if size == 0 {
        return Err(PgxError::EmptyInput);
    }
    if size > limits.max_file_size {
        return Err(PgxError::FileTooLarge {
            size,
            limit: limits.max_file_size,
        });
    }
    Ok(())
}

/// Validate a file on disk using its metadata.
pub fn validate_path(path: &Path, limits: &UploadLimits) -> Result<(), PgxError> {
    let metadata = std::fs::metadata(path).map_err(|e| PgxError::Io {
        msg: format!("Failed to stat '{}': {}", path.display(), e),
    })?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    validate_upload(name, metadata.len(), limits)
}

/// Normalize drug names: trim, uppercase, and drop empties and repeats,
/// keeping the first occurrence.
pub fn normalize_drug_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|d| d.as_ref().trim().to_uppercase())
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

/// Parse a comma-separated drug list.
///
/// Entries are trimmed and uppercased; empty entries and repeats are dropped,
/// keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use ferro_pgx::input::parse_drug_list;
///
/// let drugs = parse_drug_list(" codeine, WARFARIN,,Codeine ").unwrap();
/// assert_eq!(drugs, vec!["CODEINE", "WARFARIN"]);
/// assert!(parse_drug_list(" , ").is_err());
/// ```
pub fn parse_drug_list(list: &str) -> Result<Vec<String>, PgxError> {
    let drugs = normalize_drug_names(list.split(','));
    if drugs.is_empty() {
        Err(PgxError::NoDrugsRequested)
    } else {
        Ok(drugs)
    }
}
