use std::collections::HashMap;

use crate::models::{FeedbackRecord, FilterTab, SentimentBucket, SentimentCounts, SentimentFilter};

pub const TOP_SENTIMENT_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentDistribution {
    pub all_counts: SentimentCounts,
    pub top_sentiments: Vec<SentimentBucket>,
}

/// Counts records per sentiment label and ranks the busiest labels.
///
/// Buckets are keyed by the label exactly as stored. Ranking is by count
/// descending; equal counts keep the order in which the labels first appeared
/// in `records`.
pub fn build_distribution(records: &[FeedbackRecord]) -> SentimentDistribution {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<SentimentBucket> = Vec::new();

    for record in records {
        let slot = *index.entry(record.sentiment.as_str()).or_insert_with(|| {
            buckets.push(SentimentBucket {
                label: record.sentiment.clone(),
                count: 0,
            });
            buckets.len() - 1
        });
        buckets[slot].count += 1;
    }

    // sort_by is stable, which is what keeps first-seen order on ties.
    let mut ranked = buckets.clone();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_SENTIMENT_LIMIT);

    SentimentDistribution {
        all_counts: SentimentCounts::from_buckets(buckets),
        top_sentiments: ranked,
    }
}

/// Tabs for the dashboard filter bar: `All` first, then each label in
/// alphabetical order.
pub fn filter_tabs(counts: &SentimentCounts) -> Vec<FilterTab> {
    let mut labels: Vec<_> = counts.iter().collect();
    labels.sort_by(|a, b| a.label.cmp(&b.label));

    std::iter::once(FilterTab {
        filter: SentimentFilter::All,
        count: counts.total(),
    })
    .chain(labels.into_iter().map(|bucket| FilterTab {
        filter: SentimentFilter::Label(bucket.label.clone()),
        count: bucket.count,
    }))
    .collect()
}
