//! Volume spike detection over per-day counts.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::grouping::DailyCount;

pub use crisisdesk_core::app_config::DEFAULT_SPIKE_MULTIPLIER;

/// Mean of the per-day totals, or `None` when no day was observed.
#[must_use]
pub fn mean_daily_count(daily: &DailyCount) -> Option<f64> {
    if daily.is_empty() {
        return None;
    }
    let sum: usize = daily.totals.values().sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / daily.day_count() as f64;
    Some(mean)
}

/// Days whose volume strictly exceeds `mean * multiplier`.
///
/// The mean is taken over the days present in `daily` only. An empty input
/// yields an empty set.
#[must_use]
pub fn identify_spikes(daily: &DailyCount, multiplier: f64) -> BTreeSet<NaiveDate> {
    spike_volumes(daily, multiplier)
        .into_iter()
        .map(|(date, _)| date)
        .collect()
}

/// Like [`identify_spikes`], but keeps each spike day's volume.
#[must_use]
pub fn spike_volumes(daily: &DailyCount, multiplier: f64) -> Vec<(NaiveDate, usize)> {
    let Some(mean) = mean_daily_count(daily) else {
        return Vec::new();
    };
    let threshold = mean * multiplier;

    #[allow(clippy::cast_precision_loss)]
    let spikes: Vec<(NaiveDate, usize)> = daily
        .totals
        .iter()
        .filter(|&(_, &count)| count as f64 > threshold)
        .map(|(&date, &count)| (date, count))
        .collect();

    tracing::debug!(
        days = daily.day_count(),
        mean,
        multiplier,
        spikes = spikes.len(),
        "spike detection complete"
    );
    spikes
}
