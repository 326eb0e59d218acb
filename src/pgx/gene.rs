//! Tracked pharmacogenes and their diagnostic markers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gene family, which decides the phenotype vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneFamily {
    /// Drug-metabolizing enzymes, described in Metabolizer terms
    Enzyme,
    /// Drug transporters, described in Function terms
    Transporter,
}

/// One of the six genes the rules engine tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gene {
    #[serde(rename = "CYP2D6")]
    Cyp2d6,
    #[serde(rename = "CYP2C9")]
    Cyp2c9,
    #[serde(rename = "CYP2C19")]
    Cyp2c19,
    #[serde(rename = "SLCO1B1")]
    Slco1b1,
    #[serde(rename = "TPMT")]
    Tpmt,
    #[serde(rename = "DPYD")]
    Dpyd,
}

/// All tracked genes in table order
pub const TRACKED_GENES: [Gene; 6] = [
    Gene::Cyp2d6,
    Gene::Cyp2c9,
    Gene::Cyp2c19,
    Gene::Slco1b1,
    Gene::Tpmt,
    Gene::Dpyd,
];

impl Gene {
    /// HGNC gene symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Gene::Cyp2d6 => "CYP2D6",
            Gene::Cyp2c9 => "CYP2C9",
            Gene::Cyp2c19 => "CYP2C19",
            Gene::Slco1b1 => "SLCO1B1",
            Gene::Tpmt => "TPMT",
            Gene::Dpyd => "DPYD",
        }
    }

    /// rsIDs whose genotypes decide this gene's call
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Gene::Cyp2d6 => &["rs3892097", "rs1065852", "rs16947", "rs1135840"],
            Gene::Cyp2c9 => &["rs1799853", "rs1057910"],
            Gene::Cyp2c19 => &["rs4244285", "rs4986893"],
            Gene::Slco1b1 => &["rs4149056", "rs2306283"],
            Gene::Tpmt => &["rs1142345", "rs1800460", "rs1800462"],
            Gene::Dpyd => &["rs3918290", "rs67376798"],
        }
    }

    pub fn family(&self) -> GeneFamily {
        match self {
            Gene::Slco1b1 => GeneFamily::Transporter,
            _ => GeneFamily::Enzyme,
        }
    }
}

/// Total number of tracked markers across all genes
pub fn total_marker_count() -> usize {
    TRACKED_GENES.iter().map(|g| g.markers().len()).sum()
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Gene {
    type Err = String;

    /// Parse a gene symbol, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TRACKED_GENES
            .iter()
            .copied()
            .find(|g| g.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Untracked gene: {}", s))
    }
}
