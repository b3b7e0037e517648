//! Aggregation engine behind the feedback sentiment dashboard.
//!
//! Takes a snapshot of already-classified feedback and produces summary
//! stats, a ranked sentiment distribution and a filtered record list. The
//! store, report and CLI layers sit around it.

pub mod dashboard;
pub mod db;
pub mod distribution;
pub mod filter;
pub mod logging;
pub mod models;
pub mod report;
pub mod stats;
pub mod validation;

pub use dashboard::assemble_view;
pub use distribution::{build_distribution, filter_tabs, SentimentDistribution};
pub use filter::filter_records;
pub use models::{
    DashboardStats, DashboardView, FeedbackRecord, FilterTab, SentimentBucket, SentimentCounts,
    SentimentFilter,
};
pub use stats::compute_stats;
