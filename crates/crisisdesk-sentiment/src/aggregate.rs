//! Cross-source, reach-weighted sentiment and risk classification.

use serde::Serialize;

use crate::error::AnalysisError;
use crate::rounding::round_percent;
use crate::summary::SummaryStats;

/// Negative share at or above which risk is no longer low.
pub const MODERATE_RISK_FLOOR: f64 = 30.0;

/// Negative share at or above which risk is high.
pub const HIGH_RISK_FLOOR: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Classify an overall negative-sentiment percentage.
    ///
    /// Each bracket includes its lower bound: `30.0` is moderate and `60.0`
    /// is high.
    #[must_use]
    pub fn from_negative_pct(negative_pct: f64) -> Self {
        if negative_pct < MODERATE_RISK_FLOOR {
            RiskLevel::Low
        } else if negative_pct < HIGH_RISK_FLOOR {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW RISK"),
            RiskLevel::Moderate => write!(f, "MODERATE RISK"),
            RiskLevel::High => write!(f, "HIGH RISK"),
        }
    }
}

/// Overall negative share across media and comments, weighted by each
/// dataset's volume, rounded to one decimal.
///
/// A dataset without any `Negative` records contributes 0%.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientData`] if both datasets are empty.
pub fn combined_negative_sentiment(
    media: &SummaryStats,
    comments: &SummaryStats,
) -> Result<f64, AnalysisError> {
    weighted_negative_pct(
        media.total_count,
        media.negative_pct(),
        comments.total_count,
        comments.negative_pct(),
    )
}

#[allow(clippy::cast_precision_loss)]
fn weighted_negative_pct(
    media_total: usize,
    media_negative_pct: f64,
    comments_total: usize,
    comments_negative_pct: f64,
) -> Result<f64, AnalysisError> {
    let total_reach = media_total + comments_total;
    if total_reach == 0 {
        return Err(AnalysisError::InsufficientData);
    }

    let weighted_negative = media_total as f64 * media_negative_pct / 100.0
        + comments_total as f64 * comments_negative_pct / 100.0;

    Ok(round_percent(weighted_negative / total_reach as f64 * 100.0))
}
