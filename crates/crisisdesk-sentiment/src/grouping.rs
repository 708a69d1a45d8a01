//! Grouping, counting, and percentage distributions over record slices.
//!
//! Every ranked output orders keys by count descending, breaking ties by the
//! order in which keys were first seen in the input.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use crisisdesk_core::{Record, Sentiment};
use serde::Serialize;

use crate::error::AnalysisError;
use crate::rounding::apportion_percent;

/// One key's slice of a [`Distribution`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub key: String,
    pub count: usize,
    pub percent: f64,
}

/// Percentage breakdown of records by a categorical key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    shares: Vec<Share>,
}

impl Distribution {
    #[must_use]
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Share> {
        self.shares.iter().find(|s| s.key == key)
    }

    /// Percentage for `key`, or `0.0` when the key never occurred.
    #[must_use]
    pub fn percent_of(&self, key: &str) -> f64 {
        self.get(key).map_or(0.0, |s| s.percent)
    }

    #[must_use]
    pub fn total_percent(&self) -> f64 {
        self.shares.iter().map(|s| s.percent).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Per-day volume, overall and split by sentiment. Only observed dates appear.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DailyCount {
    pub totals: BTreeMap<NaiveDate, usize>,
    pub by_sentiment: BTreeMap<NaiveDate, BTreeMap<Sentiment, usize>>,
}

impl DailyCount {
    /// Build directly from per-day totals, with no sentiment split.
    #[cfg(test)]
    pub(crate) fn from_totals(totals: BTreeMap<NaiveDate, usize>) -> Self {
        Self {
            totals,
            by_sentiment: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.totals.get(&date).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[must_use]
pub fn platform_key(record: &Record) -> &str {
    &record.platform
}

#[must_use]
pub fn grouping_key(record: &Record) -> &str {
    &record.grouping_key
}

#[must_use]
pub fn sentiment_key(record: &Record) -> &str {
    record.sentiment.as_str()
}

/// Count keys in first-seen order, then rank them by count (stable).
fn ranked_tally<'a, I>(keys: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut tally: Vec<(&'a str, usize)> = Vec::new();

    for key in keys {
        if let Some(&idx) = positions.get(key) {
            tally[idx].1 += 1;
        } else {
            positions.insert(key, tally.len());
            tally.push((key, 1));
        }
    }

    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
}

fn distribution_from_tally(tally: &[(&str, usize)], total: usize) -> Distribution {
    let counts: Vec<usize> = tally.iter().map(|&(_, count)| count).collect();
    let percents = apportion_percent(&counts, total);

    Distribution {
        shares: tally
            .iter()
            .zip(percents)
            .map(|(&(key, count), percent)| Share {
                key: key.to_string(),
                count,
                percent,
            })
            .collect(),
    }
}

/// Exact record count per calendar date, plus the per-date sentiment split.
#[must_use]
pub fn count_by_day(records: &[Record]) -> DailyCount {
    let mut daily = DailyCount::default();
    for record in records {
        *daily.totals.entry(record.date).or_insert(0) += 1;
        *daily
            .by_sentiment
            .entry(record.date)
            .or_default()
            .entry(record.sentiment.clone())
            .or_insert(0) += 1;
    }
    daily
}

/// Share of records per `key_fn` value, in percent rounded to one decimal.
///
/// Percentages are taken over `records.len()` and sum to 100 within 0.1.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDataset`] if `records` is empty.
pub fn distribution_by<'a, F>(records: &'a [Record], key_fn: F) -> Result<Distribution, AnalysisError>
where
    F: Fn(&'a Record) -> &'a str,
{
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            context: "distribution",
        });
    }

    let tally = ranked_tally(records.iter().map(key_fn));
    Ok(distribution_from_tally(&tally, records.len()))
}

/// Every `key_fn` value with its count, ranked.
#[must_use]
pub fn count_by<'a, F>(records: &'a [Record], key_fn: F) -> Vec<(String, usize)>
where
    F: Fn(&'a Record) -> &'a str,
{
    ranked_tally(records.iter().map(key_fn))
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}

/// The `n` most frequent `key_fn` values with their counts.
#[must_use]
pub fn top_n<'a, F>(records: &'a [Record], key_fn: F, n: usize) -> Vec<(String, usize)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut counts = count_by(records, key_fn);
    counts.truncate(n);
    counts
}

/// Sentiment distribution within each `key_fn` group, normalized per group.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDataset`] if `records` is empty.
pub fn sentiment_breakdown_by<'a, F>(
    records: &'a [Record],
    key_fn: F,
) -> Result<BTreeMap<String, Distribution>, AnalysisError>
where
    F: Fn(&'a Record) -> &'a str,
{
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            context: "sentiment breakdown",
        });
    }

    let mut groups: BTreeMap<&'a str, Vec<&'a Record>> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record);
    }

    Ok(groups
        .into_iter()
        .map(|(key, members)| {
            let tally = ranked_tally(members.iter().map(|r| r.sentiment.as_str()));
            (key.to_string(), distribution_from_tally(&tally, members.len()))
        })
        .collect())
}

#[cfg(test)]
#[path = "grouping_test.rs"]
mod tests;
