use crate::models::{labels_match, FeedbackRecord, SentimentFilter};

/// Records matching `filter`, in their original order.
///
/// Label matching ignores case. A label nobody used yields an empty list.
pub fn filter_records<'a>(
    records: &'a [FeedbackRecord],
    filter: &SentimentFilter,
) -> Vec<&'a FeedbackRecord> {
    match filter {
        SentimentFilter::All => records.iter().collect(),
        SentimentFilter::Label(label) => records
            .iter()
            .filter(|record| labels_match(&record.sentiment, label))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_record(rating: i32, sentiment: &str) -> FeedbackRecord {
        FeedbackRecord {
            id: Uuid::new_v4(),
            username: "kiara".to_string(),
            email: "kiara@example.com".to_string(),
            rating,
            comment: "checkout flow".to_string(),
            sentiment: sentiment.to_string(),
            sentiment_score: 0.8,
            created_at: Utc::now(),
        }
    }

    fn snapshot() -> Vec<FeedbackRecord> {
        vec![
            sample_record(5, "Happy"),
            sample_record(2, "Sad"),
            sample_record(4, "happy"),
            sample_record(3, "Neutral"),
        ]
    }

    #[test]
    fn all_returns_every_record_in_order() {
        let records = snapshot();
        let filtered = filter_records(&records, &SentimentFilter::parse("ALL"));
        assert_eq!(filtered.len(), records.len());
        assert!(filtered
            .iter()
            .zip(records.iter())
            .all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn label_match_ignores_case() {
        let records = snapshot();
        let upper = filter_records(&records, &SentimentFilter::parse("Happy"));
        let lower = filter_records(&records, &SentimentFilter::parse("happy"));
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
        assert_eq!(upper[0].id, records[0].id);
        assert_eq!(upper[1].id, records[2].id);
    }

    #[test]
    fn unknown_label_yields_empty() {
        let records = snapshot();
        let filtered = filter_records(&records, &SentimentFilter::parse("nonexistent-label"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn empty_label_matches_unclassified_records() {
        let records = vec![sample_record(3, ""), sample_record(4, "Positive")];
        let filtered = filter_records(&records, &SentimentFilter::Label(String::new()));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].rating, 3);
    }
}
