//! Bulk moderation value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use csemotors_core::AppError;
use csemotors_core::types::ReviewId;

/// A moderation action applied to a batch of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    /// Mark the reviews approved.
    Approve,
    /// Mark the reviews pending again.
    Reject,
    /// Remove the reviews.
    Delete,
}

impl BulkAction {
    /// The approval flag an approve/reject action writes, `None` for delete.
    pub fn approval_flag(&self) -> Option<bool> {
        match self {
            Self::Approve => Some(true),
            Self::Reject => Some(false),
            Self::Delete => None,
        }
    }

    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "delete" => Ok(Self::Delete),
            blank if blank.trim().is_empty() => {
                Err(AppError::invalid_request("Action is required").with_subject("action"))
            }
            _ => Err(AppError::invalid_request(format!(
                "Unsupported bulk action '{s}'. Expected one of: approve, reject, delete"
            ))
            .with_subject(s.to_string())),
        }
    }
}

/// A row returned by the set-based approval update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ModeratedReview {
    /// The updated review.
    pub review_id: ReviewId,
    /// Its approval flag after the update.
    pub review_approved: bool,
}

/// The result of a bulk moderation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// Approve/reject result: one set-based update.
    StatusUpdated {
        /// Rows the update touched (ids that do not exist are not counted).
        updated_count: u64,
        /// The ids the update touched.
        affected_ids: Vec<ReviewId>,
    },
    /// Delete result: one statement per id, each attempted independently.
    Deleted {
        /// Number of reviews actually removed.
        deleted_count: u64,
        /// Ids that were removed.
        deleted_ids: Vec<ReviewId>,
        /// Ids whose delete statement failed.
        failed_ids: Vec<ReviewId>,
    },
}

impl BulkOutcome {
    /// Number of reviews the action changed.
    pub fn affected(&self) -> u64 {
        match self {
            Self::StatusUpdated { updated_count, .. } => *updated_count,
            Self::Deleted { deleted_count, .. } => *deleted_count,
        }
    }
}
