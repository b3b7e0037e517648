use std::fmt::Write;

use crate::distribution;
use crate::models::{labels_match, DashboardView, SentimentFilter};
use crate::stats::{clamp_rating, MAX_RATING};

/// Average rating as shown on the dashboard cards.
pub fn display_average(average: f64) -> String {
    format!("{:.2}", average)
}

pub fn render_stars(rating: i32) -> String {
    let filled = clamp_rating(rating) as usize;
    let empty = MAX_RATING as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

pub fn build_report(view: &DashboardView, filter: &SentimentFilter) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Feedback Sentiment Dashboard");
    let _ = writeln!(output, "Emotion analysis and feedback overview (filter: {filter})");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Total feedback: {}", view.stats.total_feedback);
    let _ = writeln!(
        output,
        "- Average rating: {}",
        display_average(view.stats.average_rating)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Sentiments");

    if view.top_sentiments.is_empty() {
        let _ = writeln!(output, "No sentiment data yet.");
    } else {
        for bucket in view.top_sentiments.iter() {
            let _ = writeln!(output, "- {}: {}", display_label(&bucket.label), bucket.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Filters");
    for tab in distribution::filter_tabs(&view.all_sentiment_counts) {
        let marker = if active_tab(&tab.filter, filter) { " (active)" } else { "" };
        let _ = writeln!(
            output,
            "- {} ({}){}",
            display_label(tab.display_name()),
            tab.count,
            marker
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Feedback");

    if view.filtered_records.is_empty() {
        let _ = match filter {
            SentimentFilter::All => writeln!(output, "No feedback found"),
            SentimentFilter::Label(label) => {
                writeln!(output, "No {} feedback found", display_label(label))
            }
        };
    } else {
        for record in view.filtered_records.iter() {
            let _ = writeln!(
                output,
                "- {} <{}> {} on {} [{}]: {}",
                record.username,
                record.email,
                render_stars(record.rating),
                record.created_at.format("%Y-%m-%d"),
                display_label(&record.sentiment),
                record.comment
            );
        }
    }

    output
}

/// Label as shown to people; unclassified feedback has an empty label.
pub fn display_label(label: &str) -> &str {
    if label.is_empty() {
        "Unclassified"
    } else {
        label
    }
}

fn active_tab(tab: &SentimentFilter, selected: &SentimentFilter) -> bool {
    match (tab, selected) {
        (SentimentFilter::All, SentimentFilter::All) => true,
        (SentimentFilter::Label(tab), SentimentFilter::Label(selected)) => {
            labels_match(tab, selected)
        }
        _ => false,
    }
}
