use std::sync::OnceLock;

use regex::Regex;

use crate::stats::{MAX_RATING, MIN_RATING};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i32),
    #[error("invalid email format: {0}")]
    InvalidEmail(String),
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

pub fn validate_email(email: &str) -> Result<(), SubmissionError> {
    if email.trim().is_empty() {
        return Err(SubmissionError::MissingField("email"));
    }
    if !email_pattern().is_match(email) {
        return Err(SubmissionError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Checks a feedback row before it is stored.
pub fn validate_submission(
    username: &str,
    email: &str,
    rating: i32,
    comment: &str,
) -> Result<(), SubmissionError> {
    if username.trim().is_empty() {
        return Err(SubmissionError::MissingField("username"));
    }
    validate_email(email)?;
    if comment.trim().is_empty() {
        return Err(SubmissionError::MissingField("comment"));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(SubmissionError::RatingOutOfRange(rating));
    }
    Ok(())
}
