//! Crisis report assembly and its JSON and markdown renderings.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::breakdown::{CommentBreakdown, MediaBreakdown};
use crate::error::AnalysisError;
use crate::grouping::Distribution;
use crate::summary::ExecutiveSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrisisReport {
    pub executive: ExecutiveSummary,
    pub media: MediaBreakdown,
    pub comments: CommentBreakdown,
}

/// Pretty-printed JSON for a presentation layer to consume.
///
/// # Errors
///
/// Returns [`AnalysisError::Json`] if serialization fails.
pub fn render_json(report: &CrisisReport) -> Result<String, AnalysisError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Markdown executive briefing.
///
/// # Errors
///
/// Returns [`AnalysisError::Format`] if a field fails to format.
pub fn render_markdown(report: &CrisisReport) -> Result<String, AnalysisError> {
    let mut out = String::new();
    write_markdown(&mut out, report)?;
    Ok(out)
}

/// Follow-up steps listed on every briefing.
const RECOMMENDED_ACTIONS: &[&str] = &[
    "Continue monitoring all platforms for emerging narratives",
    "Prepare response to key negative themes",
    "Brief spokespersons on common questions",
    "Schedule the next update",
];

const FOOTER: &str = "CONFIDENTIAL - For Internal Use Only";

fn write_markdown(out: &mut String, report: &CrisisReport) -> fmt::Result {
    let exec = &report.executive;

    writeln!(out, "# {}: Daily Crisis Report", exec.crisis_name)?;
    writeln!(out)?;
    writeln!(out, "**Report Date**: {}", exec.report_date.format("%Y-%m-%d"))?;
    writeln!(out, "**Current Status**: {}", exec.risk_level)?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;

    writeln!(out, "## Key Metrics")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|--------|-------|")?;
    writeln!(out, "| Total Media Mentions | {} |", exec.total_media_mentions)?;
    writeln!(out, "| Total Social Comments | {} |", exec.total_social_comments)?;
    writeln!(out, "| Total Reach | {} |", exec.total_reach)?;
    writeln!(out, "| Overall Negative Sentiment | {:.1}% |", exec.overall_negative_pct)?;
    writeln!(out, "| Media Sources | {} |", exec.unique_media_sources)?;
    writeln!(out, "| Platforms Monitored | {} |", exec.platforms_monitored)?;
    writeln!(out, "| Volume Spikes | {} |", exec.volume_spikes_detected)?;
    writeln!(out)?;

    writeln!(out, "## Situation Overview")?;
    writeln!(out)?;
    writeln!(
        out,
        "- Media coverage: {} mentions across {} sources ({})",
        exec.total_media_mentions, exec.unique_media_sources, report.media.summary.date_range
    )?;
    writeln!(
        out,
        "- Social media: {} comments with {} volume spikes detected",
        exec.total_social_comments, exec.volume_spikes_detected
    )?;
    writeln!(out, "- Sentiment:")?;
    writeln!(out, "  - Media: {:.1}% negative", exec.media_negative_pct)?;
    writeln!(out, "  - Social: {:.1}% negative", exec.social_negative_pct)?;
    writeln!(out, "  - Overall: {:.1}% negative", exec.overall_negative_pct)?;
    writeln!(out)?;

    writeln!(out, "## Media Coverage")?;
    writeln!(out)?;
    write_sentiment_table(out, &report.media.summary.sentiment_distribution)?;
    if !report.media.top_sources.is_empty() {
        writeln!(out)?;
        writeln!(out, "| Top Source | Mentions |")?;
        writeln!(out, "|------------|----------|")?;
        for (source, count) in &report.media.top_sources {
            writeln!(out, "| {source} | {count} |")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Social Media Comments")?;
    writeln!(out)?;
    if let Some(volume) = &report.comments.summary.volume {
        writeln!(out, "**Avg Daily Comments**: {:.1}", volume.avg_daily_count)?;
        writeln!(out)?;
    }
    write_sentiment_table(out, &report.comments.summary.sentiment_distribution)?;
    writeln!(out)?;

    if report.comments.spikes.is_empty() {
        writeln!(out, "No volume spikes detected.")?;
    } else {
        writeln!(out, "### Volume Spikes")?;
        writeln!(out)?;
        for (date, count) in &report.comments.spikes {
            writeln!(out, "- {}: {count} comments", date.format("%Y-%m-%d"))?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Recommended Actions")?;
    writeln!(out)?;
    for action in RECOMMENDED_ACTIONS {
        writeln!(out, "- {action}")?;
    }
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(out, "*{FOOTER}*")
}

fn write_sentiment_table(out: &mut String, distribution: &Distribution) -> fmt::Result {
    writeln!(out, "| Sentiment | Share |")?;
    writeln!(out, "|-----------|-------|")?;
    for share in distribution.shares() {
        writeln!(out, "| {} | {:.1}% |", share.key, share.percent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crisisdesk_core::{Record, Sentiment};

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample_report() -> CrisisReport {
        let media_records = vec![
            Record::new(day(1), "TV", "CNN", Sentiment::Negative),
            Record::new(day(2), "Print", "NYT", Sentiment::Positive),
        ];
        let mut comment_records = vec![
            Record::new(day(1), "Twitter", "Complaint", Sentiment::Negative),
            Record::new(day(2), "Facebook", "Question", Sentiment::Neutral),
            Record::new(day(3), "Twitter", "Support", Sentiment::Positive),
        ];
        comment_records
            .extend((0..9).map(|_| Record::new(day(4), "Twitter", "Complaint", Sentiment::Negative)));

        let media = MediaBreakdown::build(&media_records, 10, 2.0).unwrap();
        let comments = CommentBreakdown::build(&comment_records, 2.0).unwrap();
        let executive =
            ExecutiveSummary::build("Data Breach", day(5), &media.summary, &comments.summary)
                .unwrap();
        CrisisReport {
            executive,
            media,
            comments,
        }
    }

    #[test]
    fn markdown_contains_headline_figures() {
        let md = render_markdown(&sample_report()).unwrap();
        assert!(md.starts_with("# Data Breach: Daily Crisis Report\n"));
        assert!(md.contains("**Report Date**: 2024-03-05"));
        // (2 * 50.0% + 12 * 83.3%) / 14 = 78.5%
        assert!(md.contains("**Current Status**: HIGH RISK"), "{md}");
        assert!(md.contains("| Overall Negative Sentiment | 78.5% |"), "{md}");
        assert!(md.contains("| Total Reach | 14 |"));
        assert!(md.contains("| CNN | 1 |"));
        assert!(md.contains("- 2024-03-04: 9 comments"));
        assert!(md.contains("**Avg Daily Comments**: 3.0"));
    }

    #[test]
    fn markdown_without_spikes_says_so() {
        let mut report = sample_report();
        report.comments.spikes.clear();
        let md = render_markdown(&report).unwrap();
        assert!(md.contains("No volume spikes detected."));
    }

    #[test]
    fn markdown_ends_with_actions_and_confidential_footer() {
        let md = render_markdown(&sample_report()).unwrap();
        let actions = md
            .find("## Recommended Actions")
            .expect("briefing lists recommended actions");
        assert!(md.contains("- Brief spokespersons on common questions"));
        let footer = md
            .find("CONFIDENTIAL - For Internal Use Only")
            .expect("briefing carries the confidentiality footer");
        assert!(actions < footer);
        assert!(md.trim_end().ends_with("*CONFIDENTIAL - For Internal Use Only*"));
    }

    #[test]
    fn json_has_executive_and_breakdowns() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["executive"]["crisis_name"], "Data Breach");
        assert_eq!(value["executive"]["risk_level"], "HIGH");
        assert_eq!(value["executive"]["report_date"], "2024-03-05");
        assert_eq!(value["comments"]["spikes"][0][0], "2024-03-04");
        assert_eq!(value["comments"]["spikes"][0][1], 9);
        assert_eq!(value["media"]["summary"]["kind"], "media");
        assert_eq!(value["comments"]["daily"]["totals"]["2024-03-04"], 9);
        assert_eq!(
            value["comments"]["daily"]["by_sentiment"]["2024-03-04"]["Negative"],
            9
        );
    }
}
