//! Request DTOs with validation.
//!
//! Query-string fields arrive as raw strings and are parsed leniently:
//! anything empty or unparseable is treated as absent so that the listing
//! falls back to its defaults instead of rejecting the request.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use csemotors_core::types::PageRequest;
use csemotors_database::repositories::review_moderation;
use csemotors_entity::review::filter::{MAX_RATING, MIN_RATING};
use csemotors_entity::review::{ReviewFilter, ReviewSort};

/// Query string of the review listing and export endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewQueryParams {
    pub rating_min: Option<String>,
    pub rating_max: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC).
    pub date_from: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC).
    pub date_to: Option<String>,
    /// `true` for approved reviews, any other value for pending ones.
    pub approved_status: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ReviewQueryParams {
    /// The filter these parameters describe.
    pub fn filter(&self) -> ReviewFilter {
        ReviewFilter {
            rating_min: parse_rating(&self.rating_min).unwrap_or(MIN_RATING),
            rating_max: parse_rating(&self.rating_max).unwrap_or(MAX_RATING),
            date_from: present(&self.date_from).and_then(parse_date),
            date_to: present(&self.date_to).and_then(parse_date),
            approved_status: present(&self.approved_status).map(|s| s == "true"),
            make: present(&self.make).map(str::to_string),
            model: present(&self.model).map(str::to_string),
            search_term: present(&self.search).map(str::to_string),
        }
    }

    /// The requested sort; unknown names are resolved later against the
    /// allow-list.
    pub fn sort(&self) -> ReviewSort {
        ReviewSort {
            sort_by: present(&self.sort_by).map(str::to_string),
            sort_order: present(&self.sort_order).map(str::to_string),
        }
    }

    /// The requested page, falling back to page 1 and `default_limit`.
    pub fn page_request(&self, default_limit: u64) -> PageRequest {
        PageRequest::from_raw(
            parse_int(&self.page),
            parse_int(&self.limit),
            default_limit,
        )
    }
}

/// Largest `review_ids` list a bulk request can carry. The configured
/// `reviews.max_bulk_ids` may lower it further.
pub const MAX_BULK_IDS: u64 = review_moderation::MAX_BULK_IDS as u64;

/// Body of `POST /api/reviews/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkActionRequest {
    /// `approve`, `reject`, or `delete`.
    #[serde(default)]
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
    /// Reviews to act on.
    #[serde(default)]
    #[validate(
        length(
            min = 1,
            max = MAX_BULK_IDS,
            message = "Review IDs array must hold between 1 and 65534 ids"
        ),
        custom(function = "validate_positive_ids")
    )]
    pub review_ids: Vec<i64>,
}

fn validate_positive_ids(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.iter().all(|id| *id > 0) {
        Ok(())
    } else {
        Err(ValidationError::new("positive_ids")
            .with_message("Review IDs must be positive integers".into()))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_int(value: &Option<String>) -> Option<i64> {
    present(value).and_then(|v| v.parse().ok())
}

fn parse_rating(value: &Option<String>) -> Option<i32> {
    parse_int(value).and_then(|v| i32::try_from(v).ok())
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
