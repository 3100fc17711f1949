//! Keyword-based sentiment rows and report types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use csemotors_core::types::ReviewId;

/// An approved review with its keyword hit counts, as computed in SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SentimentRow {
    pub review_id: ReviewId,
    pub review_title: String,
    pub review_text: String,
    pub review_rating: i32,
    pub inv_make: String,
    pub inv_model: String,
    /// Character length of the review body.
    pub text_length: i32,
    /// Number of words in the body found in the positive keyword list.
    pub positive_word_count: i64,
    /// Number of words in the body found in the negative keyword list.
    pub negative_word_count: i64,
}

/// Sentiment class of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// A review with its sentiment score and class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub row: SentimentRow,
    pub sentiment_score: f64,
    pub sentiment: Sentiment,
}

/// Per-class counts over a set of scored reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total_reviews: usize,
    pub positive_sentiment: usize,
    pub negative_sentiment: usize,
    pub neutral_sentiment: usize,
}

/// Scored reviews plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub reviews: Vec<ScoredReview>,
    pub summary: SentimentSummary,
}
