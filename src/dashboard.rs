use crate::distribution;
use crate::filter;
use crate::models::{DashboardView, FeedbackRecord, SentimentFilter};
use crate::stats;

/// Builds the admin dashboard for one snapshot.
///
/// Stats and sentiment counts always cover the whole snapshot; `filter` only
/// narrows `filtered_records`. The result depends on nothing but the inputs.
pub fn assemble_view(records: &[FeedbackRecord], filter: &SentimentFilter) -> DashboardView {
    let stats = stats::compute_stats(records);
    let distribution = distribution::build_distribution(records);
    let filtered_records: Vec<FeedbackRecord> = filter::filter_records(records, filter)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        total = stats.total_feedback,
        labels = distribution.all_counts.len(),
        filter = %filter,
        matched = filtered_records.len(),
        "assembled dashboard view"
    );

    DashboardView {
        stats,
        top_sentiments: distribution.top_sentiments,
        all_sentiment_counts: distribution.all_counts,
        filtered_records,
    }
}
