//! Per-drug risk assessment

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::phenotype::{Diplotype, Phenotype};
use super::profile::PatientProfile;
use super::rules::{lookup_rule, Evidence};

/// Gene placeholder for drugs outside the decision table
pub const UNASSESSED_GENE: &str = "N/A";

/// Recommendation for drugs outside the decision table
pub const UNASSESSED_RECOMMENDATION: &str = "Drug not analyzed by deterministic engine.";

/// Clinical risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Toxic,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Safe => "Safe",
            RiskCategory::AdjustDosage => "Adjust Dosage",
            RiskCategory::Toxic => "Toxic",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pharmacological pathway the gene affects for a drug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearanceMechanism {
    #[serde(rename = "Prodrug Activation")]
    ProdrugActivation,
    #[serde(rename = "Active Clearance")]
    ActiveClearance,
    Transporter,
    Unknown,
}

impl ClearanceMechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearanceMechanism::ProdrugActivation => "Prodrug Activation",
            ClearanceMechanism::ActiveClearance => "Active Clearance",
            ClearanceMechanism::Transporter => "Transporter",
            ClearanceMechanism::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ClearanceMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk assessment for one requested drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRiskAssessment {
    /// Uppercased drug name
    pub drug: String,
    #[serde(rename = "risk")]
    pub risk_category: RiskCategory,
    /// Gene symbol, or "N/A" for drugs outside the table
    #[serde(rename = "gene")]
    pub associated_gene: String,
    #[serde(rename = "diplotype")]
    pub diplotype_label: Diplotype,
    #[serde(rename = "phenotype")]
    pub phenotype_label: Phenotype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_score: Option<f64>,
    #[serde(rename = "recommendation")]
    pub recommendation_text: String,
    #[serde(rename = "evidenceStrength")]
    pub evidence_strength: Evidence,
    #[serde(rename = "mechanism")]
    pub clearance_mechanism: ClearanceMechanism,
}

impl DrugRiskAssessment {
    /// Fallback assessment for a drug outside the decision table
    pub fn unassessed(drug: &str) -> Self {
        Self {
            drug: drug.to_string(),
            risk_category: RiskCategory::AdjustDosage,
            associated_gene: UNASSESSED_GENE.to_string(),
            diplotype_label: Diplotype::Unknown,
            phenotype_label: Phenotype::Indeterminate,
            activity_score: None,
            recommendation_text: UNASSESSED_RECOMMENDATION.to_string(),
            evidence_strength: Evidence::Unassessed,
            clearance_mechanism: ClearanceMechanism::Unknown,
        }
    }

    /// Whether the drug was covered by the decision table
    pub fn is_assessed(&self) -> bool {
        self.clearance_mechanism != ClearanceMechanism::Unknown
    }
}

/// Evaluate one drug against a patient profile.
///
/// The drug name is matched case-insensitively. Drugs outside the decision
/// table get the [`DrugRiskAssessment::unassessed`] fallback; this never fails.
///
/// # Examples
///
/// ```
/// use ferro_pgx::{build_profile, evaluate_drug, RiskCategory};
///
/// let profile = build_profile(&[]);
/// let assessment = evaluate_drug("aspirin", &profile);
/// assert_eq!(assessment.drug, "ASPIRIN");
/// assert_eq!(assessment.risk_category, RiskCategory::AdjustDosage);
/// assert_eq!(assessment.associated_gene, "N/A");
/// ```
pub fn evaluate_drug(drug_name: &str, profile: &PatientProfile) -> DrugRiskAssessment {
    let drug = drug_name.to_uppercase();

    let Some(rule) = lookup_rule(&drug) else {
        warn!(drug = %drug, "Drug is not covered by the decision table");
        return DrugRiskAssessment::unassessed(&drug);
    };

    let (diplotype, phenotype, activity_score) = match profile.gene(rule.gene) {
        Some(call) => (
            call.diplotype_label,
            call.phenotype_label,
            Some(call.activity_score),
        ),
        None => (Diplotype::Unknown, Phenotype::Indeterminate, None),
    };
    let outcome = rule.outcome(phenotype);

    DrugRiskAssessment {
        drug,
        risk_category: outcome.risk,
        associated_gene: rule.gene.symbol().to_string(),
        diplotype_label: diplotype,
        phenotype_label: phenotype,
        activity_score,
        recommendation_text: outcome.recommendation.to_string(),
        evidence_strength: outcome.evidence,
        clearance_mechanism: rule.mechanism,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgx::gene::{Gene, TRACKED_GENES};
    use crate::pgx::phenotype::{AlleleBurden, GenePhenotype};
    use crate::pgx::profile::build_profile;
    use std::collections::BTreeMap;

    fn profile_with(gene: Gene, call: GenePhenotype) -> PatientProfile {
        let mut profile = build_profile(&[]);
        profile.gene_phenotypes.insert(gene, call);
        profile
    }

    fn uniform_profile(burden: u32) -> PatientProfile {
        let gene_phenotypes: BTreeMap<_, _> = TRACKED_GENES
            .iter()
            .map(|g| (*g, GenePhenotype::from_burden(AlleleBurden(burden), g.family())))
            .collect();
        PatientProfile {
            gene_phenotypes,
            confidence_score: 100,
            resolved_markers: 15,
            total_markers: 15,
        }
    }

    #[test]
    fn test_codeine_normal() {
        let assessment = evaluate_drug("codeine", &uniform_profile(0));
        assert_eq!(assessment.drug, "CODEINE");
        assert_eq!(assessment.risk_category, RiskCategory::Safe);
        assert_eq!(assessment.associated_gene, "CYP2D6");
        assert_eq!(assessment.diplotype_label, Diplotype::WildType);
        assert_eq!(assessment.phenotype_label, Phenotype::NormalMetabolizer);
        assert_eq!(assessment.activity_score, Some(2.0));
        assert_eq!(
            assessment.clearance_mechanism,
            ClearanceMechanism::ProdrugActivation
        );
        assert_eq!(assessment.evidence_strength, Evidence::CpicLevelA);
        assert_eq!(assessment.recommendation_text, "Safe to use standard dosing.");
    }

    #[test]
    fn test_codeine_ultrarapid_is_toxic() {
        let call = GenePhenotype {
            diplotype_label: Diplotype::Homozygous,
            phenotype_label: Phenotype::UltrarapidMetabolizer,
            activity_score: 3.0,
        };
        let assessment = evaluate_drug("CODEINE", &profile_with(Gene::Cyp2d6, call));
        assert_eq!(assessment.risk_category, RiskCategory::Toxic);
        assert!(assessment
            .recommendation_text
            .contains("respiratory depression"));
    }

    #[test]
    fn test_indeterminate_gene() {
        let assessment = evaluate_drug("WARFARIN", &build_profile(&[]));
        assert_eq!(assessment.risk_category, RiskCategory::AdjustDosage);
        assert_eq!(assessment.phenotype_label, Phenotype::Indeterminate);
        assert_eq!(assessment.diplotype_label, Diplotype::Unknown);
        assert_eq!(assessment.activity_score, Some(-1.0));
        assert_eq!(assessment.evidence_strength, Evidence::StandardOfCare);
    }

    #[test]
    fn test_missing_gene_entry_defaults_to_indeterminate() {
        let mut profile = uniform_profile(0);
        profile.gene_phenotypes.remove(&Gene::Tpmt);
        let assessment = evaluate_drug("AZATHIOPRINE", &profile);
        assert_eq!(assessment.phenotype_label, Phenotype::Indeterminate);
        assert_eq!(assessment.activity_score, None);
        assert_eq!(
            assessment.recommendation_text,
            "Test enzymatically if proceeding. Profile indeterminate."
        );
    }

    #[test]
    fn test_unrecognized_drug() {
        let assessment = evaluate_drug("Aspirin", &uniform_profile(2));
        assert_eq!(assessment.drug, "ASPIRIN");
        assert_eq!(assessment.risk_category, RiskCategory::AdjustDosage);
        assert_eq!(assessment.associated_gene, "N/A");
        assert_eq!(assessment.clearance_mechanism, ClearanceMechanism::Unknown);
        assert_eq!(assessment.evidence_strength, Evidence::Unassessed);
        assert!(!assessment.is_assessed());
    }

    #[test]
    fn test_assessment_json() {
        let assessment = evaluate_drug("SIMVASTATIN", &uniform_profile(1));
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["drug"], "SIMVASTATIN");
        assert_eq!(json["risk"], "Adjust Dosage");
        assert_eq!(json["gene"], "SLCO1B1");
        assert_eq!(json["diplotype"], "Variant/*1");
        assert_eq!(json["phenotype"], "Decreased Function");
        assert_eq!(json["activityScore"], 1.0);
        assert_eq!(json["evidenceStrength"], "CPIC Level A");
        assert_eq!(json["mechanism"], "Transporter");

        let fallback = serde_json::to_value(DrugRiskAssessment::unassessed("X")).unwrap();
        assert!(fallback.get("activityScore").is_none());
        assert_eq!(fallback["evidenceStrength"], "None");
    }
}
