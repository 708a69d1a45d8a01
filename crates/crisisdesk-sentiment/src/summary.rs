//! Per-dataset summary statistics and the combined executive summary.

use std::collections::HashSet;

use chrono::NaiveDate;
use crisisdesk_core::{DatasetKind, Record};
use serde::Serialize;

use crate::aggregate::{combined_negative_sentiment, RiskLevel};
use crate::error::AnalysisError;
use crate::grouping::{count_by_day, distribution_by, sentiment_key, Distribution};
use crate::rounding::round_percent;
use crate::spikes::{identify_spikes, mean_daily_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Daily volume figures, reported for the comments dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeStats {
    pub avg_daily_count: f64,
    pub spike_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub kind: DatasetKind,
    pub total_count: usize,
    pub date_range: DateRange,
    pub unique_platform_count: usize,
    /// Distinct sources (media) or categories (comments).
    pub unique_grouping_count: usize,
    pub sentiment_distribution: Distribution,
    pub volume: Option<VolumeStats>,
}

impl SummaryStats {
    /// Share of `Negative` records, `0.0` when there are none.
    #[must_use]
    pub fn negative_pct(&self) -> f64 {
        self.sentiment_distribution.percent_of("Negative")
    }

    #[must_use]
    pub fn spike_count(&self) -> usize {
        self.volume.as_ref().map_or(0, |v| v.spike_dates.len())
    }
}

/// Summarize one dataset.
///
/// Volume figures are filled in for [`DatasetKind::Comments`] only.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDataset`] if `records` is empty.
pub fn summarize(
    kind: DatasetKind,
    records: &[Record],
    spike_multiplier: f64,
) -> Result<SummaryStats, AnalysisError> {
    let dates = records.iter().map(|r| r.date);
    let (Some(start), Some(end)) = (dates.clone().min(), dates.max()) else {
        return Err(AnalysisError::EmptyDataset {
            context: "summary statistics",
        });
    };

    let sentiment_distribution = distribution_by(records, sentiment_key)?;

    let unique_platform_count = records
        .iter()
        .map(|r| r.platform.as_str())
        .collect::<HashSet<_>>()
        .len();
    let unique_grouping_count = records
        .iter()
        .map(|r| r.grouping_key.as_str())
        .collect::<HashSet<_>>()
        .len();

    let volume = match kind {
        DatasetKind::Media => None,
        DatasetKind::Comments => {
            let daily = count_by_day(records);
            let avg_daily_count = mean_daily_count(&daily).map_or(0.0, round_percent);
            Some(VolumeStats {
                avg_daily_count,
                spike_dates: identify_spikes(&daily, spike_multiplier)
                    .into_iter()
                    .collect(),
            })
        }
    };

    Ok(SummaryStats {
        kind,
        total_count: records.len(),
        date_range: DateRange { start, end },
        unique_platform_count,
        unique_grouping_count,
        sentiment_distribution,
        volume,
    })
}

/// Combined, read-only view over the media and comment summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub report_date: NaiveDate,
    pub crisis_name: String,
    pub total_media_mentions: usize,
    pub total_social_comments: usize,
    pub total_reach: usize,
    pub media_negative_pct: f64,
    pub social_negative_pct: f64,
    pub overall_negative_pct: f64,
    pub risk_level: RiskLevel,
    pub platforms_monitored: usize,
    pub unique_media_sources: usize,
    pub volume_spikes_detected: usize,
}

impl ExecutiveSummary {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InsufficientData`] if both summaries are empty.
    pub fn build(
        crisis_name: &str,
        report_date: NaiveDate,
        media: &SummaryStats,
        comments: &SummaryStats,
    ) -> Result<Self, AnalysisError> {
        let overall_negative_pct = combined_negative_sentiment(media, comments)?;

        Ok(Self {
            report_date,
            crisis_name: crisis_name.to_string(),
            total_media_mentions: media.total_count,
            total_social_comments: comments.total_count,
            total_reach: media.total_count + comments.total_count,
            media_negative_pct: round_percent(media.negative_pct()),
            social_negative_pct: round_percent(comments.negative_pct()),
            overall_negative_pct,
            risk_level: RiskLevel::from_negative_pct(overall_negative_pct),
            platforms_monitored: media.unique_platform_count,
            unique_media_sources: media.unique_grouping_count,
            volume_spikes_detected: comments.spike_count(),
        })
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
