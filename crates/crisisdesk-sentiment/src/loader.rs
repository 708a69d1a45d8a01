//! Delimited-text loader producing validated, date-sorted [`Record`]s.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use crisisdesk_core::{DatasetKind, Record, Sentiment};

use crate::error::AnalysisError;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// `%Y` accepts one to three digit years, so `3/1/24` would otherwise
/// match `%Y/%m/%d` as year 3.
const MIN_YEAR: i32 = 1000;

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    (date.year() >= MIN_YEAR).then_some(date)
}

/// Parse a calendar date from any of the accepted spellings.
///
/// Years must have four digits, except in the US short form `M/D/YY`,
/// where `00`..=`69` map to 20xx and `70`..=`99` to 19xx. Timestamps (naive
/// or RFC 3339) are truncated to their date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok().and_then(plausible))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| {
                    NaiveDateTime::parse_from_str(raw, fmt)
                        .ok()
                        .and_then(|dt| plausible(dt.date()))
                })
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Positions of the required columns within a header row.
#[derive(Debug)]
struct ColumnIndex {
    date: usize,
    platform: usize,
    grouping: usize,
    sentiment: usize,
    grouping_name: &'static str,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord, kind: DatasetKind) -> Result<Self, AnalysisError> {
        let find = |name: &str| -> Result<usize, AnalysisError> {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    AnalysisError::malformed(
                        Some(1),
                        format!("missing required column '{name}' for {kind} dataset"),
                    )
                })
        };

        let grouping_name = kind.grouping_column();
        Ok(Self {
            date: find("Date")?,
            platform: find("Platform")?,
            grouping: find(grouping_name)?,
            sentiment: find("Sentiment")?,
            grouping_name,
        })
    }

    fn parse_row(&self, row: &csv::StringRecord, line: Option<u64>) -> Result<Record, AnalysisError> {
        let raw_date = required(row, self.date, "Date", line)?;
        let date = parse_date(raw_date).ok_or_else(|| {
            AnalysisError::malformed(line, format!("unparsable date {raw_date:?}"))
        })?;

        Ok(Record {
            date,
            platform: required(row, self.platform, "Platform", line)?.to_string(),
            grouping_key: required(row, self.grouping, self.grouping_name, line)?.to_string(),
            sentiment: Sentiment::parse(required(row, self.sentiment, "Sentiment", line)?),
        })
    }
}

fn required<'r>(
    row: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    line: Option<u64>,
) -> Result<&'r str, AnalysisError> {
    match row.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AnalysisError::malformed(
            line,
            format!("empty value in required column '{name}'"),
        )),
    }
}

fn csv_error(err: &csv::Error) -> AnalysisError {
    let line = err.position().map(csv::Position::line);
    AnalysisError::malformed(line, err.to_string())
}

/// Load one dataset from delimited text with a header row.
///
/// Required columns are `Date`, `Platform`, `Sentiment`, and `Source` (media)
/// or `Category` (comments); header matching ignores case and surrounding
/// whitespace, and any other columns are ignored. Records come back sorted by
/// date; rows sharing a date keep their input order.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedInput`] if a required column is missing,
/// a required cell is empty, a date cannot be parsed, or the text is not
/// well-formed delimited data. A single bad row fails the whole load.
pub fn load_records<R: Read>(
    reader: R,
    kind: DatasetKind,
    delimiter: u8,
) -> Result<Vec<Record>, AnalysisError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| csv_error(&e))?.clone();
    let columns = ColumnIndex::locate(&headers, kind)?;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| csv_error(&e))?;
        let line = row.position().map(csv::Position::line);
        records.push(columns.parse_row(&row, line)?);
    }

    records.sort_by_key(|r| r.date);

    tracing::debug!(kind = %kind, records = records.len(), "dataset loaded");
    Ok(records)
}

/// Open `path` and load it with [`load_records`].
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] if the file cannot be opened, otherwise the
/// same errors as [`load_records`].
pub fn load_records_from_path(
    path: &Path,
    kind: DatasetKind,
    delimiter: u8,
) -> Result<Vec<Record>, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_records(file, kind, delimiter)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
