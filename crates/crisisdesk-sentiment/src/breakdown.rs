//! Per-dataset tables handed to the presentation layer for charting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use crisisdesk_core::{DatasetKind, Record};
use serde::Serialize;

use crate::error::AnalysisError;
use crate::grouping::{
    count_by, count_by_day, grouping_key, platform_key, sentiment_breakdown_by, top_n,
    DailyCount, Distribution,
};
use crate::spikes::spike_volumes;
use crate::summary::{summarize, SummaryStats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaBreakdown {
    pub summary: SummaryStats,
    pub daily: DailyCount,
    pub platforms: Vec<(String, usize)>,
    pub top_sources: Vec<(String, usize)>,
}

impl MediaBreakdown {
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDataset`] if `records` is empty.
    pub fn build(
        records: &[Record],
        top_sources: usize,
        spike_multiplier: f64,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            summary: summarize(DatasetKind::Media, records, spike_multiplier)?,
            daily: count_by_day(records),
            platforms: count_by(records, platform_key),
            top_sources: top_n(records, grouping_key, top_sources),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentBreakdown {
    pub summary: SummaryStats,
    pub daily: DailyCount,
    pub categories: Vec<(String, usize)>,
    pub sentiment_by_category: BTreeMap<String, Distribution>,
    pub sentiment_by_platform: BTreeMap<String, Distribution>,
    pub spikes: Vec<(NaiveDate, usize)>,
}

impl CommentBreakdown {
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyDataset`] if `records` is empty.
    pub fn build(records: &[Record], spike_multiplier: f64) -> Result<Self, AnalysisError> {
        let summary = summarize(DatasetKind::Comments, records, spike_multiplier)?;
        let daily = count_by_day(records);
        let spikes = spike_volumes(&daily, spike_multiplier);

        Ok(Self {
            summary,
            categories: count_by(records, grouping_key),
            sentiment_by_category: sentiment_breakdown_by(records, grouping_key)?,
            sentiment_by_platform: sentiment_breakdown_by(records, platform_key)?,
            spikes,
            daily,
        })
    }
}
