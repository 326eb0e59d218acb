//! Parallel processing support for ferro-pgx
//!
//! Every analysis request is independent and shares nothing but the static
//! rule table, so batches of samples can be analyzed on rayon's pool.
//! Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_pgx::parallel::analyze_batch;
//!
//! let inputs = vec![
//!     ("patient-a".to_string(), "22\t42128945\trs3892097\tC\tT\t.\tPASS\t.\tGT\t0/1\n".to_string()),
//!     ("patient-b".to_string(), String::new()),
//! ];
//!
//! for (name, report) in analyze_batch(&inputs, &["CODEINE"]) {
//!     println!("{}: {}", name, report.confidence_score);
//! }
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::PgxError;
use crate::pgx::{analyze, build_profile, AnalysisReport, ConfidenceTier};
use crate::vcf::open_vcf;

/// Analyze many independent samples in parallel
///
/// Returns one `(name, report)` pair per input. Order is preserved.
pub fn analyze_batch<N, T, S>(inputs: &[(N, T)], drugs: &[S]) -> Vec<(N, AnalysisReport)>
where
    N: Clone + Send + Sync,
    T: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|(name, text)| (name.clone(), analyze(text.as_ref(), drugs)))
        .collect()
}

/// Read and analyze many VCF files in parallel
///
/// A file that cannot be read yields an error in its slot without affecting
/// the others. Order is preserved.
pub fn analyze_files<P, S>(paths: &[P], drugs: &[S]) -> Vec<(PathBuf, Result<AnalysisReport, PgxError>)>
where
    P: AsRef<Path> + Sync,
    S: AsRef<str> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let report = open_vcf(path)
                .map(|variants| AnalysisReport::from_profile(build_profile(&variants), drugs));
            (path.to_path_buf(), report)
        })
        .collect()
}

/// Confidence distribution over a batch of reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl BatchSummary {
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a AnalysisReport>,
    {
        let mut summary = BatchSummary::default();
        for report in reports {
            summary.total += 1;
            match report.confidence_tier {
                ConfidenceTier::High => summary.high += 1,
                ConfidenceTier::Medium => summary.medium += 1,
                ConfidenceTier::Low => summary.low += 1,
            }
        }
        summary
    }

    /// Share of reports with high confidence, as a percentage
    pub fn high_confidence_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.high as f64 / self.total as f64) * 100.0
        }
    }
}
