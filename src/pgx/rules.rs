//! Drug decision table
//!
//! Each drug is bound to one gene and a fixed mechanism, and carries an
//! ordered list of phenotype rows. The first row whose phenotype matches wins;
//! when none match, the drug's default row applies. The table is a snapshot of
//! published guidance and is not looked up from any external source.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::assessment::{ClearanceMechanism, RiskCategory};
use super::gene::Gene;
use super::phenotype::Phenotype;

/// Strength of the evidence behind a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evidence {
    #[serde(rename = "CPIC Level A")]
    CpicLevelA,
    #[serde(rename = "Standard of Care")]
    StandardOfCare,
    #[serde(
        rename = "No CPIC Level A guideline currently available; interpretation based on pharmacokinetic evidence."
    )]
    NoFormalGuideline,
    /// Drug is not covered by the table
    #[serde(rename = "None")]
    Unassessed,
}

impl Evidence {
    pub fn label(&self) -> &'static str {
        match self {
            Evidence::CpicLevelA => "CPIC Level A",
            Evidence::StandardOfCare => "Standard of Care",
            Evidence::NoFormalGuideline => {
                "No CPIC Level A guideline currently available; interpretation based on pharmacokinetic evidence."
            }
            Evidence::Unassessed => "None",
        }
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phenotype predicate of a rule row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhenotypeMatch {
    Is(Phenotype),
    AnyOf(&'static [Phenotype]),
}

impl PhenotypeMatch {
    pub fn matches(&self, phenotype: Phenotype) -> bool {
        match self {
            PhenotypeMatch::Is(p) => *p == phenotype,
            PhenotypeMatch::AnyOf(ps) => ps.contains(&phenotype),
        }
    }
}

/// Risk, recommendation and evidence selected by a rule row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub risk: RiskCategory,
    pub recommendation: &'static str,
    pub evidence: Evidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleRow {
    pub when: PhenotypeMatch,
    pub then: Outcome,
}

/// All rules for one drug
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrugRule {
    /// Uppercase drug name
    pub drug: &'static str,
    pub gene: Gene,
    pub mechanism: ClearanceMechanism,
    pub rows: &'static [RuleRow],
    /// Applies when no row matches (normal function)
    pub default: Outcome,
}

impl DrugRule {
    /// Select the outcome for a phenotype
    pub fn outcome(&self, phenotype: Phenotype) -> &Outcome {
        self.rows
            .iter()
            .find(|row| row.when.matches(phenotype))
            .map(|row| &row.then)
            .unwrap_or(&self.default)
    }
}

const fn outcome(risk: RiskCategory, recommendation: &'static str, evidence: Evidence) -> Outcome {
    Outcome {
        risk,
        recommendation,
        evidence,
    }
}

const fn row(
    when: Phenotype,
    risk: RiskCategory,
    recommendation: &'static str,
    evidence: Evidence,
) -> RuleRow {
    RuleRow {
        when: PhenotypeMatch::Is(when),
        then: outcome(risk, recommendation, evidence),
    }
}

use ClearanceMechanism::{ActiveClearance, ProdrugActivation, Transporter};
use Evidence::{CpicLevelA, NoFormalGuideline, StandardOfCare};
use Phenotype::{
    DecreasedFunction, Indeterminate, IntermediateMetabolizer, PoorFunction, PoorMetabolizer,
    UltrarapidMetabolizer,
};
use RiskCategory::{AdjustDosage, Safe, Toxic};

const STANDARD_DOSING: &str = "Standard dosing.";
const PROFILE_INDETERMINATE: &str = "Profile indeterminate.";

/// The decision table, in the order drugs are offered for analysis
pub static RULES: &[DrugRule] = &[
    DrugRule {
        drug: "CODEINE",
        gene: Gene::Cyp2d6,
        mechanism: ProdrugActivation,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Avoid codeine explicitly due to lack of efficacy (failure to activate to morphine). Prescribe alternative non-CYP2D6 dependent analgesics.",
                CpicLevelA,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "Reduced prodrug activation results in lower morphine formation and potential reduced analgesic response. Consider alternative opioid not dependent on CYP2D6. Avoid dose escalation without specialist review.",
                CpicLevelA,
            ),
            row(
                UltrarapidMetabolizer,
                Toxic,
                "Avoid codeine due to potential for life-threatening respiratory depression from rapid morphine accumulation.",
                CpicLevelA,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                "Genomic profile indeterminate. Use clinical caution.",
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, "Safe to use standard dosing.", CpicLevelA),
    },
    DrugRule {
        drug: "WARFARIN",
        gene: Gene::Cyp2c9,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Reduce dose 50-75%. High risk of severe bleeding.",
                CpicLevelA,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "Moderate reduction. Monitor INR closely.",
                CpicLevelA,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                "Genomic profile indeterminate. Use standard clinical INR protocols.",
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, "Standard dosing protocol.", CpicLevelA),
    },
    DrugRule {
        drug: "CLOPIDOGREL",
        gene: Gene::Cyp2c19,
        mechanism: ProdrugActivation,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Avoid clopidogrel (cannot activate prodrug to active thiol metabolite). Prescribe alternative antiplatelet.",
                CpicLevelA,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "Consider alternative antiplatelet therapy. CYP2C19 activation to active thiol metabolite is significantly reduced.",
                CpicLevelA,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                "Profile indeterminate. Proceed with clinical standard of care.",
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, CpicLevelA),
    },
    DrugRule {
        drug: "SIMVASTATIN",
        gene: Gene::Slco1b1,
        mechanism: Transporter,
        rows: &[
            RuleRow {
                when: PhenotypeMatch::AnyOf(&[PoorFunction, DecreasedFunction]),
                then: outcome(
                    AdjustDosage,
                    "Dose cap at 20mg daily or prescribe alternative statin (e.g., rosuvastatin) due to myopathy risk.",
                    CpicLevelA,
                ),
            },
            row(
                Indeterminate,
                AdjustDosage,
                "Profile indeterminate. Monitor standard statin limits.",
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, CpicLevelA),
    },
    DrugRule {
        drug: "AZATHIOPRINE",
        gene: Gene::Tpmt,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Start at 10% standard dose 3x weekly. High risk of myelosuppression.",
                CpicLevelA,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "30-80% dose reduction based on clinical judgment.",
                CpicLevelA,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                "Test enzymatically if proceeding. Profile indeterminate.",
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, CpicLevelA),
    },
    DrugRule {
        drug: "FLUOROURACIL",
        gene: Gene::Dpyd,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Avoid completely due to severe, fatal toxicity risk.",
                CpicLevelA,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "50% dose reduction. Monitor carefully.",
                CpicLevelA,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                PROFILE_INDETERMINATE,
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, CpicLevelA),
    },
    DrugRule {
        drug: "AMIODARONE",
        gene: Gene::Cyp2c9,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "High risk of amiodarone toxicity. Heavily reduce dosing.",
                NoFormalGuideline,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "Consider lower maintenance dose.",
                NoFormalGuideline,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                PROFILE_INDETERMINATE,
                NoFormalGuideline,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, NoFormalGuideline),
    },
    DrugRule {
        drug: "CITALOPRAM",
        gene: Gene::Cyp2c19,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Maximum dose 20mg/day to prevent QTc prolongation.",
                NoFormalGuideline,
            ),
            row(
                UltrarapidMetabolizer,
                AdjustDosage,
                "Consider alternative SSRI due to rapid clearance.",
                NoFormalGuideline,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                PROFILE_INDETERMINATE,
                NoFormalGuideline,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, NoFormalGuideline),
    },
    DrugRule {
        drug: "OMEPRAZOLE",
        gene: Gene::Cyp2c19,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                AdjustDosage,
                "Consider lowering dose if treating long-term.",
                NoFormalGuideline,
            ),
            row(
                UltrarapidMetabolizer,
                AdjustDosage,
                "Increase dose by 100-200% or split dose.",
                NoFormalGuideline,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                PROFILE_INDETERMINATE,
                NoFormalGuideline,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, NoFormalGuideline),
    },
    DrugRule {
        drug: "PHENYTOIN",
        gene: Gene::Cyp2c9,
        mechanism: ActiveClearance,
        rows: &[
            row(
                PoorMetabolizer,
                Toxic,
                "Reduce 50-75% of maintenance dose. TDM required.",
                CpicLevelA,
            ),
            row(
                IntermediateMetabolizer,
                AdjustDosage,
                "Reduce 25-50% of maintenance dose. TDM recommended.",
                CpicLevelA,
            ),
            row(
                Indeterminate,
                AdjustDosage,
                "Profile indeterminate. TDM required.",
                StandardOfCare,
            ),
        ],
        default: outcome(Safe, STANDARD_DOSING, CpicLevelA),
    },
];

/// Find the rule for an already uppercased drug name
pub fn lookup_rule(drug: &str) -> Option<&'static DrugRule> {
    RULES.iter().find(|rule| rule.drug == drug)
}

/// Names of all drugs in the table, in table order
pub fn supported_drugs() -> Vec<&'static str> {
    RULES.iter().map(|rule| rule.drug).collect()
}
