//! Crisis report orchestration.

use chrono::NaiveDate;
use crisisdesk_core::{AnalysisConfig, CrisisConfig, DatasetKind};

use crate::breakdown::{CommentBreakdown, MediaBreakdown};
use crate::error::AnalysisError;
use crate::loader::load_records_from_path;
use crate::report::CrisisReport;
use crate::summary::ExecutiveSummary;

/// Build the full report for one configured crisis.
///
/// 1. Load the media and comment datasets with the configured delimiter.
/// 2. Build the per-dataset breakdowns.
/// 3. Combine both summaries into the executive summary.
///
/// # Errors
///
/// Returns [`AnalysisError`] if either file cannot be read or parsed, or if
/// either dataset is empty.
pub fn run_crisis_report(
    config: &AnalysisConfig,
    crisis: &CrisisConfig,
    report_date: NaiveDate,
) -> Result<CrisisReport, AnalysisError> {
    tracing::info!(crisis = %crisis.name, slug = %crisis.slug(), "building crisis report");

    let media_records =
        load_records_from_path(&crisis.media_path, DatasetKind::Media, config.csv_delimiter)?;
    let comment_records = load_records_from_path(
        &crisis.comments_path,
        DatasetKind::Comments,
        config.csv_delimiter,
    )?;

    tracing::debug!(
        crisis = %crisis.name,
        media = media_records.len(),
        comments = comment_records.len(),
        "datasets loaded"
    );

    let media = MediaBreakdown::build(&media_records, config.top_sources, config.spike_multiplier)?;
    let comments = CommentBreakdown::build(&comment_records, config.spike_multiplier)?;
    let executive =
        ExecutiveSummary::build(&crisis.name, report_date, &media.summary, &comments.summary)?;

    if !comments.spikes.is_empty() {
        tracing::warn!(
            crisis = %crisis.name,
            spikes = comments.spikes.len(),
            "comment volume spikes detected"
        );
    }

    tracing::info!(
        crisis = %crisis.name,
        overall_negative_pct = executive.overall_negative_pct,
        risk = %executive.risk_level,
        "crisis report built"
    );

    Ok(CrisisReport {
        executive,
        media,
        comments,
    })
}

/// Build a report for every crisis, in order.
///
/// A failing crisis is logged and returned as an `Err` entry; the remaining
/// crises still run.
#[must_use]
pub fn run_all(
    config: &AnalysisConfig,
    crises: &[CrisisConfig],
    report_date: NaiveDate,
) -> Vec<(String, Result<CrisisReport, AnalysisError>)> {
    crises
        .iter()
        .map(|crisis| {
            let result = run_crisis_report(config, crisis, report_date);
            if let Err(e) = &result {
                tracing::error!(crisis = %crisis.name, error = %e, "crisis report failed");
            }
            (crisis.name.clone(), result)
        })
        .collect()
}
