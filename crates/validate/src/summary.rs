//! Aggregate scores over many validated events.

use serde::Serialize;

use crate::report::ValidationReport;

/// Count, mean and range of one metric over the events where it is defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MetricSummary {
    /// Summarises the defined values of `values`.
    pub fn from_values(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let defined: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        Self {
            count: defined.len(),
            mean: creek_stats::mean(&defined),
            min: defined.iter().copied().reduce(f64::min),
            max: defined.iter().copied().reduce(f64::max),
        }
    }
}

/// Per-metric summary of a batch of validation reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub n_events: usize,
    /// Events with at least one matched peak pair.
    pub n_matched_events: usize,
    pub correlation: MetricSummary,
    pub shifted_correlation: MetricSummary,
    pub rmse: MetricSummary,
    pub mean_peak_error: MetricSummary,
    pub mean_peak_anticipation: MetricSummary,
}

impl ScoreSummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a ValidationReport>) -> Self {
        let reports: Vec<&ValidationReport> = reports.into_iter().collect();
        Self {
            n_events: reports.len(),
            n_matched_events: reports
                .iter()
                .filter(|r| r.matched_pairs().next().is_some())
                .count(),
            correlation: MetricSummary::from_values(reports.iter().map(|r| r.correlation)),
            shifted_correlation: MetricSummary::from_values(
                reports.iter().map(|r| r.shifted_correlation),
            ),
            rmse: MetricSummary::from_values(reports.iter().map(|r| r.rmse)),
            mean_peak_error: MetricSummary::from_values(reports.iter().map(|r| r.mean_peak_error)),
            mean_peak_anticipation: MetricSummary::from_values(
                reports.iter().map(|r| r.mean_peak_anticipation),
            ),
        }
    }
}
