//! Review row models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use csemotors_core::types::{AccountId, ReviewId, VehicleId};

/// A review joined with its author and vehicle, as listed by the advanced
/// review management screen and the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReviewListing {
    /// Review primary key.
    pub review_id: ReviewId,
    /// The reviewed vehicle.
    pub inv_id: VehicleId,
    /// The reviewing account.
    pub account_id: AccountId,
    /// Review headline.
    pub review_title: String,
    /// Review body.
    pub review_text: String,
    /// Star rating (1-5).
    pub review_rating: i32,
    /// When the review was submitted.
    pub review_date: DateTime<Utc>,
    /// Whether a moderator approved the review.
    pub review_approved: bool,
    /// Reviewer first name.
    pub account_firstname: String,
    /// Reviewer last name.
    pub account_lastname: String,
    /// Vehicle make.
    pub inv_make: String,
    /// Vehicle model.
    pub inv_model: String,
    /// Vehicle model year.
    pub inv_year: i32,
    /// Vehicle colour.
    pub inv_color: String,
}

impl ReviewListing {
    /// Reviewer display name.
    pub fn reviewer_name(&self) -> String {
        format!("{} {}", self.account_firstname, self.account_lastname)
    }
}

/// An approved review shown on a vehicle's detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VehicleReview {
    pub review_id: ReviewId,
    pub review_title: String,
    pub review_text: String,
    pub review_rating: i32,
    pub review_date: DateTime<Utc>,
    pub account_firstname: String,
    pub account_lastname: String,
}

/// Aggregate rating statistics over a vehicle's approved reviews.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow)]
pub struct VehicleReviewStats {
    /// Number of approved reviews.
    pub total_reviews: i64,
    /// Average rating rounded to one decimal (`None` without reviews).
    pub avg_rating: Option<f64>,
    pub five_star: i64,
    pub four_star: i64,
    pub three_star: i64,
    pub two_star: i64,
    pub one_star: i64,
}
