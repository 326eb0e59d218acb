//! Fuzz target for the analysis pipeline
//!
//! Feeds arbitrary text through parsing, profile building and drug
//! evaluation. The pipeline is total, so any panic is a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;

const DRUGS: &[&str] = &["CODEINE", "SIMVASTATIN", "CITALOPRAM", "aspirin", ""];

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let records = ferro_pgx::parse_vcf(&input);
    assert_eq!(records, ferro_pgx::parse_vcf(&input));

    let report = ferro_pgx::analyze(&input, DRUGS);
    assert_eq!(report.results.len(), DRUGS.len());
    assert!(report.confidence_score <= 100);
});
