//! Baseline-relative performance ratios
//!
//! For each parameter point and trial run the engine divides the baseline
//! latency by the candidate latency. Rows of the two inputs are paired by
//! position; making sure they describe the same parameter points is up to
//! the caller.

use relperf_stats::ratio::RatioStat;
use tracing::warn;

use crate::{error::AnalysisError, samples::SampleMatrix};

/// Per-point ratio statistics of `candidate` relative to `baseline`.
///
/// A zero candidate latency produces an infinite (or `NaN`) ratio which is
/// kept in the reduction and counted in [`RatioStat::undefined`].
///
/// # Errors
///
/// [`AnalysisError::ShapeMismatch`] if the inputs differ in number of
/// points or trials.
pub fn ratio(
    baseline: &SampleMatrix,
    candidate: &SampleMatrix,
) -> Result<Vec<RatioStat>, AnalysisError> {
    if baseline.points() != candidate.points() || baseline.trials() != candidate.trials() {
        return Err(AnalysisError::ShapeMismatch {
            baseline_rows: baseline.points(),
            baseline_trials: baseline.trials(),
            candidate_rows: candidate.points(),
            candidate_trials: candidate.trials(),
        });
    }

    baseline
        .rows()
        .zip(candidate.rows())
        .enumerate()
        .map(|(point, (base, cand))| {
            let stat = ratio_of_row(base, cand).ok_or(AnalysisError::EmptySelection)?;
            if stat.is_undefined() {
                warn!(
                    point,
                    undefined = stat.undefined,
                    "undefined performance ratio (zero-latency sample)"
                );
            }
            Ok(stat)
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn ratio_of_row(baseline: &[i64], candidate: &[i64]) -> Option<RatioStat> {
    RatioStat::from_pairs(
        baseline
            .iter()
            .zip(candidate)
            .map(|(&b, &c)| (b as f64, c as f64)),
    )
}
