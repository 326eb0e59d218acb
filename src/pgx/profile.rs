//! Patient profile building
//!
//! A gene is called only when every one of its tracked markers has a resolved
//! genotype. A single missing or unknown marker makes the whole gene
//! indeterminate; partial calls are never produced.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, info};

use crate::vcf::{Genotype, VariantRecord};

use super::gene::{Gene, TRACKED_GENES};
use super::phenotype::{AlleleBurden, GenePhenotype, Phenotype};

/// Per-gene phenotypes plus a data-completeness score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// One entry per tracked gene
    #[serde(rename = "genes")]
    pub gene_phenotypes: BTreeMap<Gene, GenePhenotype>,
    /// Percentage of tracked markers with a resolved genotype (0-100)
    pub confidence_score: u8,
    /// Number of tracked markers with a resolved genotype
    pub resolved_markers: usize,
    /// Number of tracked markers across all genes
    pub total_markers: usize,
}

impl PatientProfile {
    /// Get the call for a gene
    pub fn gene(&self, gene: Gene) -> Option<&GenePhenotype> {
        self.gene_phenotypes.get(&gene)
    }

    /// Phenotype for a gene, `Indeterminate` if the gene is absent
    pub fn phenotype(&self, gene: Gene) -> Phenotype {
        self.gene(gene)
            .map(|g| g.phenotype_label)
            .unwrap_or(Phenotype::Indeterminate)
    }

    pub fn confidence_tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence_score)
    }
}

/// Coarse bucket of the confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Below 50 is low, below 80 is medium, anything else is high
    pub fn from_score(score: u8) -> Self {
        if score < 50 {
            ConfidenceTier::Low
        } else if score < 80 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low Confidence",
            ConfidenceTier::Medium => "Medium Confidence",
            ConfidenceTier::High => "High Confidence",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round `100 * resolved / total` to the nearest integer; 0 when `total` is 0.
///
/// # Examples
///
/// ```
/// use ferro_pgx::pgx::confidence_score;
///
/// assert_eq!(confidence_score(10, 13), 77);
/// assert_eq!(confidence_score(15, 15), 100);
/// ```
pub fn confidence_score(resolved: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (resolved.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

/// Build the patient profile from parsed variants.
///
/// Variants are indexed by identifier; when an identifier repeats, the last
/// record wins.
pub fn build_profile(variants: &[VariantRecord]) -> PatientProfile {
    let mut by_id: HashMap<&str, &VariantRecord> = HashMap::with_capacity(variants.len());
    for variant in variants {
        if !variant.identifier.is_empty() {
            by_id.insert(variant.identifier.as_str(), variant);
        }
    }

    let mut gene_phenotypes = BTreeMap::new();
    let mut resolved_markers = 0usize;
    let mut total_markers = 0usize;

    for gene in TRACKED_GENES {
        let markers = gene.markers();
        total_markers += markers.len();

        let mut burden = AlleleBurden::default();
        let mut complete = true;

        for rsid in markers {
            let genotype = by_id
                .get(rsid)
                .map(|v| v.genotype)
                .unwrap_or(Genotype::Unknown);

            match genotype.alt_allele_count() {
                Some(count) => {
                    resolved_markers += 1;
                    burden.0 += count;
                }
                None => complete = false,
            }
        }

        let call = if complete {
            GenePhenotype::from_burden(burden, gene.family())
        } else {
            GenePhenotype::INDETERMINATE
        };
        debug!(
            gene = gene.symbol(),
            burden = burden.0,
            complete,
            phenotype = call.phenotype_label.as_str(),
            "Called gene"
        );
        gene_phenotypes.insert(gene, call);
    }

    let score = confidence_score(resolved_markers, total_markers);
    info!(
        resolved = resolved_markers,
        total = total_markers,
        confidence = score,
        "Built pharmacogenomic profile"
    );

    PatientProfile {
        gene_phenotypes,
        confidence_score: score,
        resolved_markers,
        total_markers,
    }
}
