use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::FeedbackRecord;
use crate::validation;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Reasons a feedback row cannot be attached to a stored user.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UserConflict {
    #[error("username is already registered with {stored}")]
    EmailMismatch { stored: String },
    #[error("email {0} belongs to another username")]
    EmailTaken(String),
}

/// Decides whether an incoming identity matches the user already stored
/// under its username. Stored emails are never rewritten.
pub fn match_existing_user(
    email: &str,
    existing: Option<(Uuid, String)>,
) -> Result<Uuid, UserConflict> {
    match existing {
        Some((id, stored)) if stored == email => Ok(id),
        Some((_, stored)) => Err(UserConflict::EmailMismatch { stored }),
        None => Err(UserConflict::EmailTaken(email.to_string())),
    }
}

async fn find_or_create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> anyhow::Result<Result<Uuid, UserConflict>> {
    let created = sqlx::query(
        r#"
        INSERT INTO feedback_dashboard.users (id, username, email)
        VALUES ($1, $2, $3)
        ON CONFLICT DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to create user {username}"))?;

    if let Some(row) = created {
        return Ok(Ok(row.get("id")));
    }

    let existing = sqlx::query("SELECT id, email FROM feedback_dashboard.users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to look up user {username}"))?
        .map(|row| (row.get::<Uuid, _>("id"), row.get::<String, _>("email")));

    Ok(match_existing_user(email, existing))
}

#[allow(clippy::too_many_arguments)]
async fn insert_feedback(
    pool: &PgPool,
    user_id: Uuid,
    rating: i32,
    comment: &str,
    sentiment: Option<&str>,
    sentiment_score: Option<f64>,
    created_at: Option<DateTime<Utc>>,
    source_key: &str,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO feedback_dashboard.feedback
        (id, user_id, rating, comment, sentiment, sentiment_score, created_at, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW()), $8)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .bind(sentiment)
    .bind(sentiment_score)
    .bind(created_at)
    .bind(source_key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<usize> {
    let users = vec![
        ("avery.lee", "avery.lee@example.com"),
        ("jules.moreno", "jules.moreno@example.com"),
        ("kiara.patel", "kiara.patel@example.com"),
    ];

    let feedback = vec![
        (
            "seed-001",
            "avery.lee",
            5,
            "The new dashboard makes reviewing feedback effortless",
            "Positive",
            0.942,
            (2026, 2, 2),
        ),
        (
            "seed-002",
            "jules.moreno",
            2,
            "Checkout timed out twice before the order went through",
            "Negative",
            0.871,
            (2026, 1, 30),
        ),
        (
            "seed-003",
            "kiara.patel",
            3,
            "Delivery arrived on the expected day",
            "Neutral",
            0.655,
            (2026, 1, 28),
        ),
        (
            "seed-004",
            "jules.moreno",
            4,
            "Support answered within minutes and fixed my issue",
            "Positive",
            0.903,
            (2026, 1, 27),
        ),
    ];

    let mut inserted = 0usize;
    for (source_key, username, rating, comment, sentiment, score, (y, m, d)) in feedback {
        let email = users
            .iter()
            .find(|(name, _)| *name == username)
            .map(|(_, email)| *email)
            .context("seed feedback references an unknown user")?;
        let user_id = find_or_create_user(pool, username, email).await??;
        let created_at = Utc
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .context("invalid seed date")?;

        if insert_feedback(
            pool,
            user_id,
            rating,
            comment,
            Some(sentiment),
            Some(score),
            Some(created_at),
            source_key,
        )
        .await?
        {
            inserted += 1;
        }
    }

    tracing::info!(inserted, "seeded feedback");
    Ok(inserted)
}

/// Current snapshot of all feedback, newest first.
pub async fn fetch_feedback(pool: &PgPool) -> anyhow::Result<Vec<FeedbackRecord>> {
    let rows = sqlx::query(
        "SELECT f.id, f.rating, f.comment, f.sentiment, f.sentiment_score, f.created_at, \
         u.username, u.email \
         FROM feedback_dashboard.feedback f \
         JOIN feedback_dashboard.users u ON u.id = f.user_id \
         ORDER BY f.created_at DESC",
    )
    .fetch_all(pool)
    .await
    .context("failed to load feedback")?;

    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let sentiment: Option<String> = row.get("sentiment");
        let sentiment_score: Option<f64> = row.get("sentiment_score");
        records.push(FeedbackRecord {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            rating: row.get("rating"),
            comment: row.get("comment"),
            sentiment: sentiment.unwrap_or_default(),
            sentiment_score: sentiment_score.unwrap_or(0.0),
            created_at: row.get("created_at"),
        });
    }

    tracing::info!(count = records.len(), "loaded feedback snapshot");
    Ok(records)
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ImportRow {
    pub username: String,
    pub email: String,
    pub rating: i32,
    pub comment: String,
    pub sentiment: Option<String>,
    pub sentiment_score: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub source_key: Option<String>,
}

/// Parses and validates CSV feedback, returning usable rows with their
/// 1-based row number. Rows that fail either step are logged and dropped.
pub fn read_import_rows<R: std::io::Read>(source: R) -> Vec<(usize, ImportRow)> {
    let mut reader = csv::Reader::from_reader(source);
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
        let line = index + 1;
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(row = line, error = %err, "skipping unreadable feedback row");
                continue;
            }
        };

        if let Err(err) =
            validation::validate_submission(&row.username, &row.email, row.rating, &row.comment)
        {
            tracing::warn!(row = line, error = %err, "skipping invalid feedback row");
            continue;
        }

        rows.push((line, row));
    }

    rows
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for (line, row) in read_import_rows(file) {
        let user_id = match find_or_create_user(pool, &row.username, &row.email).await? {
            Ok(id) => id,
            Err(conflict) => {
                tracing::warn!(
                    row = line,
                    username = %row.username,
                    error = %conflict,
                    "skipping feedback row with conflicting user"
                );
                continue;
            }
        };
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        if insert_feedback(
            pool,
            user_id,
            row.rating,
            &row.comment,
            row.sentiment.as_deref(),
            row.sentiment_score,
            row.created_at,
            &source_key,
        )
        .await?
        {
            inserted += 1;
        }
    }

    tracing::info!(inserted, path = %csv_path.display(), "imported feedback");
    Ok(inserted)
}
