use super::*;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn rec(day: u32, platform: &str, key: &str, sentiment: &str) -> Record {
    Record::new(date(day), platform, key, Sentiment::parse(sentiment))
}

fn sample() -> Vec<Record> {
    vec![
        rec(1, "Twitter", "Complaint", "Negative"),
        rec(1, "Facebook", "Question", "Neutral"),
        rec(2, "Twitter", "Question", "Neutral"),
        rec(2, "Instagram", "Support", "Positive"),
        rec(2, "Facebook", "Complaint", "Negative"),
        rec(4, "Twitter", "Complaint", "Negative"),
    ]
}

#[test]
fn count_by_day_only_contains_observed_dates() {
    let daily = count_by_day(&sample());
    assert_eq!(daily.day_count(), 3);
    assert_eq!(daily.count_on(date(1)), 2);
    assert_eq!(daily.count_on(date(2)), 3);
    assert_eq!(daily.count_on(date(3)), 0);
    assert!(!daily.totals.contains_key(&date(3)));
    assert_eq!(daily.count_on(date(4)), 1);
}

#[test]
fn count_by_day_splits_by_sentiment() {
    let daily = count_by_day(&sample());
    let day2 = &daily.by_sentiment[&date(2)];
    assert_eq!(day2[&Sentiment::Neutral], 1);
    assert_eq!(day2[&Sentiment::Positive], 1);
    assert_eq!(day2[&Sentiment::Negative], 1);
    assert!(!daily.by_sentiment[&date(4)].contains_key(&Sentiment::Positive));
}

#[test]
fn count_by_day_empty_input() {
    assert!(count_by_day(&[]).is_empty());
}

#[test]
fn distribution_by_sentiment() {
    let dist = distribution_by(&sample(), sentiment_key).unwrap();
    assert_eq!(dist.len(), 3);
    assert!((dist.percent_of("Negative") - 50.0).abs() < 1e-9);
    assert!((dist.percent_of("Neutral") - 33.3).abs() < 1e-9);
    assert!((dist.percent_of("Positive") - 16.7).abs() < 1e-9);
    assert_eq!(dist.shares()[0].key, "Negative");
    assert_eq!(dist.shares()[0].count, 3);
}

#[test]
fn distribution_missing_key_is_zero_percent() {
    let records = vec![rec(1, "TV", "CNN", "Positive")];
    let dist = distribution_by(&records, sentiment_key).unwrap();
    assert!(dist.get("Negative").is_none());
    assert!(dist.percent_of("Negative").abs() < f64::EPSILON);
    assert!((dist.percent_of("Positive") - 100.0).abs() < 1e-9);
}

#[test]
fn distribution_sums_to_one_hundred_within_rounding() {
    let mut records = Vec::new();
    let platforms = ["A", "B", "C", "D", "E", "F", "G"];
    for n in 1..=60_usize {
        for (i, p) in platforms.iter().enumerate() {
            if n % (i + 2) == 0 {
                records.push(rec(1, p, "k", "Neutral"));
            }
        }
        let dist = distribution_by(&records, platform_key);
        if records.is_empty() {
            assert!(dist.is_err());
            continue;
        }
        let total = dist.unwrap().total_percent();
        assert!(
            (total - 100.0).abs() <= 0.1 + 1e-9,
            "{} records summed to {total}",
            records.len()
        );
    }
}

#[test]
fn distribution_of_empty_input_is_empty_dataset_error() {
    let err = distribution_by(&[], platform_key).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyDataset { .. }), "got: {err:?}");
}

#[test]
fn distribution_accepts_closures() {
    let records = sample();
    let dist = distribution_by(&records, |r| r.grouping_key.as_str()).unwrap();
    assert!((dist.percent_of("Complaint") - 50.0).abs() < 1e-9);
}

#[test]
fn count_by_ranks_with_first_seen_tiebreak() {
    let counts = count_by(&sample(), platform_key);
    assert_eq!(
        counts,
        vec![
            ("Twitter".to_string(), 3),
            ("Facebook".to_string(), 2),
            ("Instagram".to_string(), 1),
        ]
    );
}

#[test]
fn top_n_breaks_ties_by_first_seen_order() {
    let records = vec![
        rec(1, "TV", "CNN", "Neutral"),
        rec(1, "TV", "AP", "Neutral"),
        rec(1, "TV", "BBC", "Neutral"),
        rec(2, "TV", "BBC", "Neutral"),
        rec(2, "TV", "AP", "Neutral"),
        rec(3, "TV", "NPR", "Neutral"),
    ];
    let top = top_n(&records, grouping_key, 2);
    // AP and BBC both have 2; AP appeared first.
    assert_eq!(top, vec![("AP".to_string(), 2), ("BBC".to_string(), 2)]);

    let top = top_n(&records, grouping_key, 10);
    assert_eq!(top.len(), 4);
    assert_eq!(top[2], ("CNN".to_string(), 1));
    assert_eq!(top[3], ("NPR".to_string(), 1));
}

#[test]
fn top_n_zero_is_empty() {
    assert!(top_n(&sample(), grouping_key, 0).is_empty());
}

#[test]
fn sentiment_breakdown_normalizes_each_group() {
    let breakdown = sentiment_breakdown_by(&sample(), platform_key).unwrap();
    assert_eq!(breakdown.len(), 3);

    let twitter = &breakdown["Twitter"];
    assert!((twitter.percent_of("Negative") - 66.7).abs() < 1e-9);
    assert!((twitter.percent_of("Neutral") - 33.3).abs() < 1e-9);

    let instagram = &breakdown["Instagram"];
    assert!((instagram.percent_of("Positive") - 100.0).abs() < 1e-9);

    for dist in breakdown.values() {
        assert!((dist.total_percent() - 100.0).abs() <= 0.1 + 1e-9);
    }
}

#[test]
fn sentiment_breakdown_rows_sorted_by_key() {
    let breakdown = sentiment_breakdown_by(&sample(), grouping_key).unwrap();
    let keys: Vec<&str> = breakdown.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Complaint", "Question", "Support"]);
}

#[test]
fn sentiment_breakdown_of_empty_input_errors() {
    let err = sentiment_breakdown_by(&[], grouping_key).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyDataset { .. }));
}

#[test]
fn distribution_serializes_as_list_of_shares() {
    let records = vec![rec(1, "TV", "CNN", "Negative")];
    let dist = distribution_by(&records, sentiment_key).unwrap();
    let json = serde_json::to_value(&dist).unwrap();
    assert_eq!(json[0]["key"], "Negative");
    assert_eq!(json[0]["count"], 1);
    assert_eq!(json[0]["percent"], 100.0);
}
