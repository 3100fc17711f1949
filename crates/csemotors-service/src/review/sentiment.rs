//! Keyword sentiment scoring.
//!
//! Keyword hits are counted in SQL; this module turns the counts into a
//! length-normalized score and a class.

use csemotors_entity::sentiment::{
    ScoredReview, Sentiment, SentimentReport, SentimentRow, SentimentSummary,
};

/// Scores above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.5;
/// Scores below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.5;

/// `(positive - negative) / max(text_length / 100, 1)`.
pub fn score(row: &SentimentRow) -> f64 {
    let hits = (row.positive_word_count - row.negative_word_count) as f64;
    let weight = (f64::from(row.text_length) / 100.0).max(1.0);
    hits / weight
}

pub fn classify(score: f64) -> Sentiment {
    if score > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Score every row and summarize the classes, keeping row order.
pub fn analyze(rows: Vec<SentimentRow>) -> SentimentReport {
    let mut summary = SentimentSummary {
        total_reviews: rows.len(),
        ..SentimentSummary::default()
    };

    let reviews = rows
        .into_iter()
        .map(|row| {
            let sentiment_score = score(&row);
            let sentiment = classify(sentiment_score);
            match sentiment {
                Sentiment::Positive => summary.positive_sentiment += 1,
                Sentiment::Neutral => summary.neutral_sentiment += 1,
                Sentiment::Negative => summary.negative_sentiment += 1,
            }
            ScoredReview {
                row,
                sentiment_score,
                sentiment,
            }
        })
        .collect();

    SentimentReport { reviews, summary }
}
