use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use feedback_dashboard::{db, distribution, logging, report, SentimentFilter};

#[derive(Parser)]
#[command(name = "feedback-dashboard")]
#[command(about = "Sentiment analytics over collected user feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed feedback
    Seed,
    /// Import classified feedback from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print dashboard stats and the filtered feedback list
    Dashboard {
        #[arg(long, default_value = "all")]
        filter: SentimentFilter,
        /// Emit the full dashboard view as JSON
        #[arg(long)]
        json: bool,
    },
    /// List sentiment filter tabs with their counts
    Labels,
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "all")]
        filter: SentimentFilter,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set to a Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let inserted = db::seed(&pool).await?;
            println!("Seed data inserted ({inserted} new feedback rows).");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} feedback rows from {}.", csv.display());
        }
        Commands::Dashboard { filter, json } => {
            let records = db::fetch_feedback(&pool).await?;
            let view = feedback_dashboard::assemble_view(&records, &filter);

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            println!(
                "Total feedback: {}  Average rating: {}",
                view.stats.total_feedback,
                report::display_average(view.stats.average_rating)
            );
            for bucket in view.top_sentiments.iter() {
                println!("- {}: {}", report::display_label(&bucket.label), bucket.count);
            }

            if view.filtered_records.is_empty() {
                println!(
                    "No feedback matches filter '{}'.",
                    report::display_label(filter.as_str())
                );
                return Ok(());
            }

            println!("Feedback ({filter}):");
            for record in view.filtered_records.iter() {
                println!(
                    "- {} {} [{} {:.3}] {}",
                    record.username,
                    report::render_stars(record.rating),
                    report::display_label(&record.sentiment),
                    record.sentiment_score,
                    record.comment
                );
            }
        }
        Commands::Labels => {
            let records = db::fetch_feedback(&pool).await?;
            let sentiments = distribution::build_distribution(&records);
            for tab in distribution::filter_tabs(&sentiments.all_counts) {
                println!("{} ({})", report::display_label(tab.display_name()), tab.count);
            }
        }
        Commands::Report { filter, out } => {
            let records = db::fetch_feedback(&pool).await?;
            let view = feedback_dashboard::assemble_view(&records, &filter);
            let markdown = report::build_report(&view, &filter);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
