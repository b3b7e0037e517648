use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// One submitted piece of feedback after sentiment classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub rating: i32,
    pub comment: String,
    /// Classifier label, kept in its original case. Empty when unclassified.
    pub sentiment: String,
    pub sentiment_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_feedback: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentBucket {
    pub label: String,
    pub count: usize,
}

/// Label to count mapping.
///
/// Labels are stored exactly as the classifier produced them, so `"Happy"`
/// and `"happy"` are separate entries. Iteration follows the order in which
/// each label was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    buckets: Vec<SentimentBucket>,
}

impl SentimentCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_buckets(buckets: Vec<SentimentBucket>) -> Self {
        Self { buckets }
    }

    /// Count for a label matched exactly.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|bucket| bucket.label == label)
            .map(|bucket| bucket.count)
    }

    /// Sum of every bucket whose label equals `label` ignoring case.
    pub fn get_ignore_case(&self, label: &str) -> usize {
        self.buckets
            .iter()
            .filter(|bucket| labels_match(&bucket.label, label))
            .map(|bucket| bucket.count)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SentimentBucket> {
        self.buckets.iter()
    }
}

impl Serialize for SentimentCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.label, &bucket.count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SentimentFilter {
    #[default]
    All,
    Label(String),
}

impl SentimentFilter {
    pub const ALL: &'static str = "all";

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case(Self::ALL) {
            SentimentFilter::All
        } else {
            SentimentFilter::Label(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SentimentFilter::All => Self::ALL,
            SentimentFilter::Label(label) => label,
        }
    }
}

impl std::str::FromStr for SentimentFilter {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(SentimentFilter::parse(value))
    }
}

impl std::fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub top_sentiments: Vec<SentimentBucket>,
    pub all_sentiment_counts: SentimentCounts,
    pub filtered_records: Vec<FeedbackRecord>,
}

/// One entry of the dashboard filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTab {
    pub filter: SentimentFilter,
    pub count: usize,
}

impl FilterTab {
    pub fn display_name(&self) -> &str {
        match &self.filter {
            SentimentFilter::All => "All",
            SentimentFilter::Label(label) => label,
        }
    }
}

pub(crate) fn labels_match(stored: &str, requested: &str) -> bool {
    stored.to_lowercase() == requested.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> SentimentCounts {
        SentimentCounts::from_buckets(vec![
            SentimentBucket {
                label: "Happy".to_string(),
                count: 3,
            },
            SentimentBucket {
                label: "happy".to_string(),
                count: 1,
            },
            SentimentBucket {
                label: "Sad".to_string(),
                count: 2,
            },
        ])
    }

    #[test]
    fn exact_lookup_is_case_sensitive() {
        let counts = counts();
        assert_eq!(counts.get("Happy"), Some(3));
        assert_eq!(counts.get("happy"), Some(1));
        assert_eq!(counts.get("HAPPY"), None);
    }

    #[test]
    fn ignore_case_lookup_sums_variants() {
        let counts = counts();
        assert_eq!(counts.get_ignore_case("HAPPY"), 4);
        assert_eq!(counts.get_ignore_case("sad"), 2);
        assert_eq!(counts.get_ignore_case("angry"), 0);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn counts_serialize_as_ordered_map() {
        let json = serde_json::to_string(&counts()).unwrap();
        assert_eq!(json, r#"{"Happy":3,"happy":1,"Sad":2}"#);
    }

    #[test]
    fn filter_parses_all_in_any_case() {
        assert_eq!(SentimentFilter::parse("all"), SentimentFilter::All);
        assert_eq!(SentimentFilter::parse("ALL"), SentimentFilter::All);
        assert_eq!(
            SentimentFilter::parse("Positive"),
            SentimentFilter::Label("Positive".to_string())
        );
        assert_eq!(SentimentFilter::default().to_string(), "all");
    }
}
