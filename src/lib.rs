// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-pgx: pharmacogenomic drug-risk assessment from VCF genotypes
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Parses single-sample VCF text, calls a coarse phenotype for six
//! pharmacogenes from a fixed panel of diagnostic markers, and evaluates
//! requested drugs against a static decision table.
//!
//! # Example
//!
//! ```
//! use ferro_pgx::{analyze, parse_vcf, build_profile, evaluate_drug, RiskCategory};
//!
//! let vcf = "##fileformat=VCFv4.2\n\
//!            #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE\n\
//!            10\t94942290\trs4244285\tG\tA\t99\tPASS\t.\tGT\t1/1\n\
//!            10\t94981296\trs4986893\tG\tA\t99\tPASS\t.\tGT\t0/0\n";
//!
//! // Step by step
//! let variants = parse_vcf(vcf);
//! let profile = build_profile(&variants);
//! let clopidogrel = evaluate_drug("clopidogrel", &profile);
//! assert_eq!(clopidogrel.risk_category, RiskCategory::Toxic);
//!
//! // Or in one call
//! let report = analyze(vcf, &["CLOPIDOGREL"]);
//! assert_eq!(report.results[0], clopidogrel);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod pgx;
pub mod vcf;

// Re-export commonly used types
pub use error::PgxError;
pub use pgx::{
    analyze, build_profile, evaluate_drug, AnalysisReport, DrugRiskAssessment, PatientProfile,
    RiskCategory,
};
pub use vcf::{parse_vcf, Genotype, VariantRecord};

/// Result type alias for ferro-pgx operations
pub type Result<T> = std::result::Result<T, PgxError>;
