//! Pharmacogenomic rules engine
//!
//! Turns parsed variants into a per-gene [`PatientProfile`] and evaluates
//! requested drugs against a fixed decision table.
//!
//! # Example
//!
//! ```
//! use ferro_pgx::pgx::{analyze, RiskCategory};
//!
//! let vcf = "22\t42128945\trs3892097\tC\tT\t50\tPASS\t.\tGT\t0/0\n\
//!            22\t42130692\trs1065852\tG\tA\t50\tPASS\t.\tGT\t0/0\n\
//!            22\t42126611\trs16947\tG\tA\t50\tPASS\t.\tGT\t0/0\n\
//!            22\t42126938\trs1135840\tC\tG\t50\tPASS\t.\tGT\t0/0\n";
//!
//! let report = analyze(vcf, &["CODEINE"]);
//! assert_eq!(report.results[0].risk_category, RiskCategory::Safe);
//! ```

mod assessment;
mod gene;
mod phenotype;
mod profile;
mod rules;

pub use assessment::{
    evaluate_drug, ClearanceMechanism, DrugRiskAssessment, RiskCategory, UNASSESSED_GENE,
    UNASSESSED_RECOMMENDATION,
};
pub use gene::{total_marker_count, Gene, GeneFamily, TRACKED_GENES};
pub use phenotype::{AlleleBurden, Diplotype, GenePhenotype, Phenotype};
pub use profile::{build_profile, confidence_score, ConfidenceTier, PatientProfile};
pub use rules::{
    lookup_rule, supported_drugs, DrugRule, Evidence, Outcome, PhenotypeMatch, RuleRow, RULES,
};

use serde::{Deserialize, Serialize};

use crate::vcf::parse_vcf;

/// Result of one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub confidence_score: u8,
    pub confidence_tier: ConfidenceTier,
    pub profile: PatientProfile,
    /// One assessment per requested drug, in request order
    pub results: Vec<DrugRiskAssessment>,
}

impl AnalysisReport {
    /// Evaluate drugs against an already built profile
    pub fn from_profile<S: AsRef<str>>(profile: PatientProfile, drugs: &[S]) -> Self {
        let results = drugs
            .iter()
            .map(|d| evaluate_drug(d.as_ref(), &profile))
            .collect();
        Self {
            confidence_score: profile.confidence_score,
            confidence_tier: profile.confidence_tier(),
            profile,
            results,
        }
    }

    /// Assessments with the given risk category
    pub fn with_risk(&self, risk: RiskCategory) -> impl Iterator<Item = &DrugRiskAssessment> {
        self.results
            .iter()
            .filter(move |a| a.risk_category == risk)
    }
}

/// Run the full pipeline: parse, build the profile, evaluate each drug.
pub fn analyze<S: AsRef<str>>(vcf_text: &str, drugs: &[S]) -> AnalysisReport {
    let variants = parse_vcf(vcf_text);
    AnalysisReport::from_profile(build_profile(&variants), drugs)
}
