//! Sentiment and volume aggregation for crisis monitoring.
//!
//! Loads media mentions and social comments from delimited files, computes
//! sentiment distributions, daily volume and spike days per dataset, and
//! combines both into a reach-weighted executive summary with a risk level.

pub mod aggregate;
pub mod breakdown;
pub mod error;
pub mod grouping;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod rounding;
pub mod spikes;
pub mod summary;

pub use aggregate::{combined_negative_sentiment, RiskLevel};
pub use breakdown::{CommentBreakdown, MediaBreakdown};
pub use error::AnalysisError;
pub use grouping::{count_by_day, distribution_by, DailyCount, Distribution, Share};
pub use loader::{load_records, load_records_from_path};
pub use pipeline::{run_all, run_crisis_report};
pub use report::{render_json, render_markdown, CrisisReport};
pub use spikes::{identify_spikes, DEFAULT_SPIKE_MULTIPLIER};
pub use summary::{summarize, DateRange, ExecutiveSummary, SummaryStats, VolumeStats};
