//! Configuration file support for ferro-pgx.
//!
//! This module loads `.ferro-pgx.toml` configuration files, which can set
//! upload limits and the default drug list.
//!
//! # Example Configuration
//!
//! ```toml
//! [input]
//! max-file-size = 52428800
//! require-vcf-extension = true
//!
//! [analysis]
//! drugs = ["CODEINE", "WARFARIN"]
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-pgx.toml` in current directory
//! 2. `~/.config/ferro-pgx/config.toml`
//!
//! CLI flags take precedence over config file settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::PgxError;
use crate::input::{normalize_drug_names, UploadLimits};
use crate::pgx::supported_drugs;

/// Parsed configuration from a .ferro-pgx.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PgxConfig {
    pub input: InputConfig,
    pub analysis: AnalysisConfig,
}

/// `[input]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InputConfig {
    /// Maximum accepted file size in bytes.
    pub max_file_size: Option<u64>,
    /// Reject files without a `.vcf` / `.vcf.gz` name.
    pub require_vcf_extension: Option<bool>,
}

/// `[analysis]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnalysisConfig {
    /// Drugs evaluated when none are given on the command line.
    pub drugs: Vec<String>,
}

impl PgxConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-pgx.toml` in current directory
    /// 2. `~/.config/ferro-pgx/config.toml`
    ///
    /// A file that exists but fails to load is reported as an error rather
    /// than skipped.
    pub fn load() -> Result<Option<Self>, PgxError> {
        let cwd_config = PathBuf::from(".ferro-pgx.toml");
        if cwd_config.exists() {
            return Self::load_from_path(&cwd_config).map(Some);
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro-pgx").join("config.toml");
            if home_config.exists() {
                return Self::load_from_path(&home_config).map(Some);
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, PgxError> {
        debug!(path = %path.display(), "Loading configuration");
        let content = fs::read_to_string(path).map_err(|e| PgxError::Io {
            msg: format!("Failed to read config '{}': {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Unknown sections and keys are ignored. Drug names are normalized the
    /// same way as a `--drugs` list.
    pub fn parse(content: &str) -> Result<Self, PgxError> {
        let mut config: PgxConfig = toml::from_str(content).map_err(|e| PgxError::Config {
            msg: format!("Invalid configuration: {}", e),
        })?;
        config.analysis.drugs = normalize_drug_names(&config.analysis.drugs);
        Ok(config)
    }

    /// Upload limits with defaults filled in.
    pub fn upload_limits(&self) -> UploadLimits {
        let defaults = UploadLimits::default();
        UploadLimits {
            max_file_size: self.input.max_file_size.unwrap_or(defaults.max_file_size),
            require_vcf_extension: self
                .input
                .require_vcf_extension
                .unwrap_or(defaults.require_vcf_extension),
        }
    }

    /// Drug list to evaluate: CLI list, then config list, then every drug
    /// in the rule table.
    pub fn drugs_with_cli(&self, cli_drugs: Option<Vec<String>>) -> Vec<String> {
        if let Some(drugs) = cli_drugs {
            return drugs;
        }
        if !self.analysis.drugs.is_empty() {
            return self.analysis.drugs.clone();
        }
        supported_drugs().into_iter().map(str::to_string).collect()
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
