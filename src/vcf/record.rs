//! Normalized variant record
//!
//! This module provides the record type produced by the VCF parser. Records
//! keep the raw text of most columns and reduce the first sample's genotype
//! to one of four states.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Genotype call for a single marker, reduced to the states the rules engine uses.
///
/// Phased calls are treated as unphased and `1/0` is the same call as `0/1`.
/// Anything else (missing data, multi-allelic calls, malformed text) is
/// [`Genotype::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Genotype {
    /// Homozygous reference (0/0)
    #[serde(rename = "0/0")]
    HomRef,
    /// Heterozygous (0/1)
    #[serde(rename = "0/1")]
    Het,
    /// Homozygous alternate (1/1)
    #[serde(rename = "1/1")]
    HomAlt,
    /// Missing, multi-allelic or malformed call
    #[default]
    Unknown,
}

impl Genotype {
    /// Parse the GT subfield of a sample column.
    ///
    /// Only the text before the first `:` is considered.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_pgx::Genotype;
    ///
    /// assert_eq!(Genotype::from_sample("1|0:35:99"), Genotype::Het);
    /// assert_eq!(Genotype::from_sample("./."), Genotype::Unknown);
    /// ```
    pub fn from_sample(sample: &str) -> Self {
        let gt = sample.split(':').next().unwrap_or(sample);
        match gt {
            "0/0" | "0|0" => Genotype::HomRef,
            "0/1" | "0|1" | "1/0" | "1|0" => Genotype::Het,
            "1/1" | "1|1" => Genotype::HomAlt,
            _ => Genotype::Unknown,
        }
    }

    /// Whether this is one of the three resolved calls
    pub fn is_called(&self) -> bool {
        !matches!(self, Genotype::Unknown)
    }

    /// Number of alternate alleles carried, `None` for unknown calls
    pub fn alt_allele_count(&self) -> Option<u32> {
        match self {
            Genotype::HomRef => Some(0),
            Genotype::Het => Some(1),
            Genotype::HomAlt => Some(2),
            Genotype::Unknown => None,
        }
    }

    /// Canonical text form ("0/0", "0/1", "1/1" or "Unknown")
    pub fn as_str(&self) -> &'static str {
        match self {
            Genotype::HomRef => "0/0",
            Genotype::Het => "0/1",
            Genotype::HomAlt => "1/1",
            Genotype::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single data line of a VCF file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    /// Chromosome label, verbatim (e.g., "7", "chr7")
    pub chromosome: String,

    /// 1-based position, `None` when the POS column is not a non-negative integer
    pub position: Option<u64>,

    /// Variant identifier; `chr<chromosome>:<position>` when the ID column is "."
    pub identifier: String,

    /// Reference allele, verbatim
    pub reference_allele: String,

    /// Alternate allele(s), verbatim
    pub alternate_allele: String,

    /// QUAL column, verbatim
    pub quality: String,

    /// FILTER column, verbatim
    pub filter_status: String,

    /// INFO key-value pairs; flags map to "true"
    #[serde(default)]
    pub info: BTreeMap<String, String>,

    /// FORMAT column, empty when absent
    #[serde(default)]
    pub format_spec: String,

    /// Genotype of the first sample column
    #[serde(default)]
    pub genotype: Genotype,

    /// Number of sample columns on the line
    #[serde(default)]
    pub sample_count: usize,
}

impl VariantRecord {
    /// Create a record with the given identifier and genotype and empty
    /// optional columns.
    pub fn new(chromosome: &str, position: u64, identifier: &str, genotype: Genotype) -> Self {
        Self {
            chromosome: chromosome.to_string(),
            position: Some(position),
            identifier: identifier.to_string(),
            reference_allele: "N".to_string(),
            alternate_allele: ".".to_string(),
            quality: ".".to_string(),
            filter_status: ".".to_string(),
            info: BTreeMap::new(),
            format_spec: String::new(),
            genotype,
            sample_count: 1,
        }
    }

    /// Whether the first sample has a resolved genotype call
    pub fn is_called(&self) -> bool {
        self.genotype.is_called()
    }

    /// Whether this is a single-base substitution
    pub fn is_snv(&self) -> bool {
        self.reference_allele.len() == 1
            && self.alternate_allele.len() == 1
            && self.reference_allele != self.alternate_allele
    }

    /// Get an INFO value by key
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// Whether an INFO flag (or any INFO key) is present
    pub fn has_info(&self, key: &str) -> bool {
        self.info.contains_key(key)
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| ".".to_string());
        write!(
            f,
            "{}:{} {}>{} ({}) {}",
            self.chromosome,
            pos,
            self.reference_allele,
            self.alternate_allele,
            self.identifier,
            self.genotype
        )
    }
}
