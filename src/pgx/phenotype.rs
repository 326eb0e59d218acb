//! Diplotype and phenotype calls
//!
//! Real star-allele calling phases haplotypes against an allele definition
//! table. This crate does not: it counts alternate alleles across a gene's
//! tracked markers and buckets that count. [`AlleleBurden`] names that
//! approximation so callers do not mistake it for a diplotype caller.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::gene::GeneFamily;

/// Summed alternate-allele count across one gene's tracked markers
///
/// A heterozygous marker adds one, a homozygous-alternate marker adds two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct AlleleBurden(pub u32);

impl AlleleBurden {
    /// Approximate diplotype: 0 is wild type, 1 is one variant allele, 2+ is two
    pub fn diplotype(&self) -> Diplotype {
        match self.0 {
            0 => Diplotype::WildType,
            1 => Diplotype::Heterozygous,
            _ => Diplotype::Homozygous,
        }
    }

    /// Phenotype in the vocabulary of the gene family
    pub fn phenotype(&self, family: GeneFamily) -> Phenotype {
        match (family, self.diplotype()) {
            (GeneFamily::Enzyme, Diplotype::WildType) => Phenotype::NormalMetabolizer,
            (GeneFamily::Enzyme, Diplotype::Heterozygous) => Phenotype::IntermediateMetabolizer,
            (GeneFamily::Enzyme, _) => Phenotype::PoorMetabolizer,
            (GeneFamily::Transporter, Diplotype::WildType) => Phenotype::NormalFunction,
            (GeneFamily::Transporter, Diplotype::Heterozygous) => Phenotype::DecreasedFunction,
            (GeneFamily::Transporter, _) => Phenotype::PoorFunction,
        }
    }

    /// Activity score proxy: 2.0 wild type, 1.0 one variant, 0.0 two or more
    pub fn activity_score(&self) -> f64 {
        match self.diplotype() {
            Diplotype::WildType => 2.0,
            Diplotype::Heterozygous => 1.0,
            _ => 0.0,
        }
    }
}

/// Approximate diplotype label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diplotype {
    #[serde(rename = "*1/*1")]
    WildType,
    #[serde(rename = "Variant/*1")]
    Heterozygous,
    #[serde(rename = "Variant/Variant")]
    Homozygous,
    Unknown,
}

impl Diplotype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diplotype::WildType => "*1/*1",
            Diplotype::Heterozygous => "Variant/*1",
            Diplotype::Homozygous => "Variant/Variant",
            Diplotype::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metabolizer or transporter function category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phenotype {
    #[serde(rename = "Normal Metabolizer")]
    NormalMetabolizer,
    #[serde(rename = "Intermediate Metabolizer")]
    IntermediateMetabolizer,
    #[serde(rename = "Poor Metabolizer")]
    PoorMetabolizer,
    /// Never produced by [`AlleleBurden`]; present so rule rows can name it
    #[serde(rename = "Ultrarapid Metabolizer")]
    UltrarapidMetabolizer,
    #[serde(rename = "Normal Function")]
    NormalFunction,
    #[serde(rename = "Decreased Function")]
    DecreasedFunction,
    #[serde(rename = "Poor Function")]
    PoorFunction,
    Indeterminate,
}

impl Phenotype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phenotype::NormalMetabolizer => "Normal Metabolizer",
            Phenotype::IntermediateMetabolizer => "Intermediate Metabolizer",
            Phenotype::PoorMetabolizer => "Poor Metabolizer",
            Phenotype::UltrarapidMetabolizer => "Ultrarapid Metabolizer",
            Phenotype::NormalFunction => "Normal Function",
            Phenotype::DecreasedFunction => "Decreased Function",
            Phenotype::PoorFunction => "Poor Function",
            Phenotype::Indeterminate => "Indeterminate",
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gene-level result inside a patient profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenePhenotype {
    #[serde(rename = "diplotype")]
    pub diplotype_label: Diplotype,
    #[serde(rename = "phenotype")]
    pub phenotype_label: Phenotype,
    /// 2.0, 1.0 or 0.0 for resolved calls; -1.0 when indeterminate
    pub activity_score: f64,
}

impl GenePhenotype {
    /// Result for a gene with at least one missing or unknown marker
    pub const INDETERMINATE: GenePhenotype = GenePhenotype {
        diplotype_label: Diplotype::Unknown,
        phenotype_label: Phenotype::Indeterminate,
        activity_score: -1.0,
    };

    /// Call a fully resolved gene from its allele burden
    pub fn from_burden(burden: AlleleBurden, family: GeneFamily) -> Self {
        Self {
            diplotype_label: burden.diplotype(),
            phenotype_label: burden.phenotype(family),
            activity_score: burden.activity_score(),
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.phenotype_label == Phenotype::Indeterminate
    }
}
