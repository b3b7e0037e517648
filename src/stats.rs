use crate::models::{DashboardStats, FeedbackRecord};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn compute_stats(records: &[FeedbackRecord]) -> DashboardStats {
    let total_feedback = records.len();
    let rating_sum: i64 = records
        .iter()
        .map(|record| clamp_rating(record.rating) as i64)
        .sum();

    DashboardStats {
        total_feedback,
        average_rating: if total_feedback == 0 {
            0.0
        } else {
            rating_sum as f64 / total_feedback as f64
        },
    }
}

/// Pulls a malformed rating into range so one bad row cannot skew the mean.
pub fn clamp_rating(rating: i32) -> i32 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_record(rating: i32) -> FeedbackRecord {
        FeedbackRecord {
            id: Uuid::new_v4(),
            username: "avery".to_string(),
            email: "avery@example.com".to_string(),
            rating,
            comment: "solid onboarding".to_string(),
            sentiment: "Positive".to_string(),
            sentiment_score: 0.91,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_snapshot_has_zero_average() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_feedback, 0);
        assert_eq!(stats.average_rating, 0.0);
    }

    #[test]
    fn averages_ratings_without_rounding() {
        let records = vec![sample_record(5), sample_record(1), sample_record(4)];
        let stats = compute_stats(&records);
        assert_eq!(stats.total_feedback, 3);
        assert!((stats.average_rating - 10.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn out_of_range_ratings_are_clamped_for_the_mean() {
        let records = vec![sample_record(9), sample_record(-3)];
        let stats = compute_stats(&records);
        assert_eq!(stats.total_feedback, 2);
        assert!((stats.average_rating - 3.0).abs() < 0.001);
    }

    #[test]
    fn clamp_keeps_valid_ratings() {
        assert_eq!(clamp_rating(3), 3);
        assert_eq!(clamp_rating(0), 1);
        assert_eq!(clamp_rating(6), 5);
    }
}
