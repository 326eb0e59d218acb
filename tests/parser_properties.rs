//! Property-based tests for VCF parsing and the analysis pipeline
//!
//! The core is total: any text yields a result, never a panic. These tests
//! generate both well-formed data lines and arbitrary text.

use ferro_pgx::pgx::{total_marker_count, TRACKED_GENES};
use ferro_pgx::vcf::MIN_FIELDS;
use ferro_pgx::{analyze, build_profile, parse_vcf, Genotype};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

fn chromosome() -> impl Strategy<Value = String> {
    prop_oneof![
        (1..23u32).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("chr7".to_string()),
    ]
}

fn identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(".".to_string()),
        Just(String::new()),
        "[0-9]{3,9}".prop_map(|n| format!("rs{}", n)),
        prop::sample::select(
            TRACKED_GENES
                .iter()
                .flat_map(|g| g.markers().iter().copied())
                .collect::<Vec<_>>()
        )
        .prop_map(str::to_string),
    ]
}

fn sample_column() -> impl Strategy<Value = String> {
    let gt = prop_oneof![
        Just("0/0"),
        Just("0|1"),
        Just("1/0"),
        Just("1/1"),
        Just("./."),
        Just("1/2"),
    ];
    (gt, prop::option::of(1..100u32)).prop_map(|(gt, dp)| match dp {
        Some(dp) => format!("{}:{}", gt, dp),
        None => gt.to_string(),
    })
}

fn data_line() -> impl Strategy<Value = String> {
    (
        chromosome(),
        1..250_000_000u64,
        identifier(),
        "[ACGT]{1,3}",
        "[ACGT]{1,3}",
        sample_column(),
    )
        .prop_map(|(chrom, pos, id, r, a, sample)| {
            format!("{}\t{}\t{}\t{}\t{}\t50\tPASS\tDP=10\tGT\t{}", chrom, pos, id, r, a, sample)
        })
}

fn short_line() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z0-9.]{1,6}", 1..MIN_FIELDS).prop_map(|f| f.join("\t"))
}

fn header_line() -> impl Strategy<Value = String> {
    "[A-Za-z=<>,]{0,20}".prop_map(|s| format!("##{}", s))
}

fn vcf_document() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(
        prop_oneof![
            3 => data_line().prop_map(|l| (l, 1usize)),
            1 => short_line().prop_map(|l| (l, 0usize)),
            1 => header_line().prop_map(|l| (l, 0usize)),
            1 => Just((String::new(), 0usize)),
        ],
        0..40,
    )
    .prop_map(|lines| {
        let expected: usize = lines.iter().map(|(_, n)| n).sum();
        let text = lines
            .into_iter()
            .map(|(l, _)| l)
            .collect::<Vec<_>>()
            .join("\n");
        (text, expected)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// One record per data line with at least eight columns, none otherwise
    #[test]
    fn test_record_count_matches_data_lines((text, expected) in vcf_document()) {
        prop_assert_eq!(parse_vcf(&text).len(), expected);
    }

    /// The ID column is kept verbatim unless it is `.`, which is synthesized
    #[test]
    fn test_identifier_from_id_column(chrom in chromosome(), pos in 1..250_000_000u64, id in identifier()) {
        let line = format!("{}\t{}\t{}\tA\tG\t.\t.\t.\tGT\t0/1", chrom, pos, id);
        let records = parse_vcf(&line);
        prop_assert_eq!(records.len(), 1);
        let expected = if id == "." { format!("chr{}:{}", chrom, pos) } else { id };
        prop_assert_eq!(&records[0].identifier, &expected);
    }

    /// Parsing the same text twice gives identical records and profiles
    #[test]
    fn test_parse_is_deterministic((text, _) in vcf_document()) {
        let first = parse_vcf(&text);
        let second = parse_vcf(&text);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(build_profile(&first), build_profile(&second));
    }

    /// The genotype comes from the first subfield of the sample column
    #[test]
    fn test_genotype_from_first_subfield(sample in sample_column()) {
        let line = format!("1\t100\trs1\tA\tG\t.\t.\t.\tGT:DP\t{}", sample);
        let records = parse_vcf(&line);
        prop_assert_eq!(records.len(), 1);
        let expected = match sample.split(':').next().unwrap() {
            "0/0" => Genotype::HomRef,
            "0|1" | "1/0" => Genotype::Het,
            "1/1" => Genotype::HomAlt,
            _ => Genotype::Unknown,
        };
        prop_assert_eq!(records[0].genotype, expected);
    }

    /// Confidence stays within 0-100 and the profile always covers all genes
    #[test]
    fn test_profile_bounds((text, _) in vcf_document()) {
        let profile = build_profile(&parse_vcf(&text));
        prop_assert!(profile.confidence_score <= 100);
        prop_assert_eq!(profile.gene_phenotypes.len(), TRACKED_GENES.len());
        prop_assert_eq!(profile.total_markers, total_marker_count());
        prop_assert!(profile.resolved_markers <= profile.total_markers);
    }

    /// Arbitrary text never panics and yields one result per requested drug
    #[test]
    fn test_analyze_total(text in any::<String>(), drugs in prop::collection::vec("[A-Za-z]{0,12}", 0..5)) {
        let report = analyze(&text, &drugs);
        prop_assert_eq!(report.results.len(), drugs.len());
        for (assessment, drug) in report.results.iter().zip(&drugs) {
            prop_assert_eq!(&assessment.drug, &drug.to_uppercase());
        }
    }
}
