//! Filters for the advanced review listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest star rating a review can carry.
pub const MIN_RATING: i32 = 1;
/// Highest star rating a review can carry.
pub const MAX_RATING: i32 = 5;

/// The set of recognized review filters.
///
/// Every field except the rating bounds is optional; an absent field adds
/// no predicate. `approved_status` is tri-state: `None` matches approved and
/// pending reviews alike, `Some(false)` matches pending reviews only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFilter {
    /// Inclusive lower rating bound.
    #[serde(default = "default_rating_min")]
    pub rating_min: i32,
    /// Inclusive upper rating bound.
    #[serde(default = "default_rating_max")]
    pub rating_max: i32,
    /// Inclusive lower bound on the review date.
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the review date.
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
    /// Approval state to match.
    #[serde(default)]
    pub approved_status: Option<bool>,
    /// Vehicle make, matched case-insensitively and exactly.
    #[serde(default)]
    pub make: Option<String>,
    /// Vehicle model, matched case-insensitively and exactly.
    #[serde(default)]
    pub model: Option<String>,
    /// Free text matched as a substring of title, body, and reviewer name.
    #[serde(default)]
    pub search_term: Option<String>,
}

impl ReviewFilter {
    /// Rating bounds with out-of-range values replaced by their defaults.
    ///
    /// `rating_min <= rating_max` is deliberately not enforced here.
    pub fn rating_bounds(&self) -> (i32, i32) {
        let clamp = |value: i32, default: i32| {
            if (MIN_RATING..=MAX_RATING).contains(&value) {
                value
            } else {
                default
            }
        };
        (
            clamp(self.rating_min, MIN_RATING),
            clamp(self.rating_max, MAX_RATING),
        )
    }

    /// The make filter, if present and non-blank.
    pub fn make(&self) -> Option<&str> {
        non_blank(self.make.as_deref())
    }

    /// The model filter, if present and non-blank.
    pub fn model(&self) -> Option<&str> {
        non_blank(self.model.as_deref())
    }

    /// The search term, if present and non-blank.
    pub fn search_term(&self) -> Option<&str> {
        non_blank(self.search_term.as_deref())
    }
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            rating_min: MIN_RATING,
            rating_max: MAX_RATING,
            date_from: None,
            date_to: None,
            approved_status: None,
            make: None,
            model: None,
            search_term: None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_rating_min() -> i32 {
    MIN_RATING
}

fn default_rating_max() -> i32 {
    MAX_RATING
}
