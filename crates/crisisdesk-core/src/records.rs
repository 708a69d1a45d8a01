//! Typed rows shared by the loader and the aggregation engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentiment label attached to a single mention or comment.
///
/// Labels outside the three standard ones are kept verbatim in
/// [`Sentiment::Other`] so dataset-specific variants still show up in
/// distributions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Other(String),
}

impl Sentiment {
    /// Parse a raw label. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Other(trimmed.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
            Sentiment::Other(label) => label,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Sentiment {
    fn from(raw: String) -> Self {
        Sentiment::parse(&raw)
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.as_str().to_string()
    }
}

/// Which of the two input datasets a record set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Media,
    Comments,
}

impl DatasetKind {
    /// Header of the column that feeds [`Record::grouping_key`].
    #[must_use]
    pub fn grouping_column(self) -> &'static str {
        match self {
            DatasetKind::Media => "Source",
            DatasetKind::Comments => "Category",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Media => write!(f, "media"),
            DatasetKind::Comments => write!(f, "comments"),
        }
    }
}

/// One validated input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub platform: String,
    /// News source for media rows, comment category for comment rows.
    pub grouping_key: String,
    pub sentiment: Sentiment,
}

impl Record {
    #[must_use]
    pub fn new(
        date: NaiveDate,
        platform: impl Into<String>,
        grouping_key: impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            date,
            platform: platform.into(),
            grouping_key: grouping_key.into(),
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard_labels_case_insensitive() {
        assert_eq!(Sentiment::parse("Positive"), Sentiment::Positive);
        assert_eq!(Sentiment::parse("  NEUTRAL "), Sentiment::Neutral);
        assert_eq!(Sentiment::parse("negative"), Sentiment::Negative);
    }

    #[test]
    fn parse_unknown_label_keeps_trimmed_text() {
        assert_eq!(
            Sentiment::parse(" Mixed "),
            Sentiment::Other("Mixed".to_string())
        );
    }

    #[test]
    fn sentiment_display_uses_canonical_names() {
        assert_eq!(Sentiment::parse("negative").to_string(), "Negative");
        assert_eq!(Sentiment::Other("Sarcastic".into()).to_string(), "Sarcastic");
    }

    #[test]
    fn sentiment_serializes_as_plain_string() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
        let back: Sentiment = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(back, Sentiment::Positive);
    }

    #[test]
    fn sentiment_works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Sentiment::Other("Mixed".into()), 2_usize);
        map.insert(Sentiment::Negative, 1_usize);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Negative":1,"Mixed":2}"#);
    }

    #[test]
    fn grouping_column_per_dataset() {
        assert_eq!(DatasetKind::Media.grouping_column(), "Source");
        assert_eq!(DatasetKind::Comments.grouping_column(), "Category");
    }

    #[test]
    fn dataset_kind_display() {
        assert_eq!(DatasetKind::Media.to_string(), "media");
        assert_eq!(DatasetKind::Comments.to_string(), "comments");
    }
}
