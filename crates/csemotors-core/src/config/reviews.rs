//! Review listing and export configuration.

use serde::{Deserialize, Serialize};

use crate::types::pagination::DEFAULT_PAGE_SIZE;

/// Limits applied to the review analytics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsConfig {
    /// Page size used when the request does not carry a usable `limit`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for the `limit` a listing request may ask for.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Maximum number of rows written to a CSV export.
    #[serde(default = "default_export_limit")]
    pub export_limit: u64,
    /// Most review ids one bulk moderation request may carry.
    #[serde(default = "default_max_bulk_ids")]
    pub max_bulk_ids: usize,
    /// Most per-id delete statements in flight at once.
    #[serde(default = "default_delete_concurrency")]
    pub delete_concurrency: usize,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            export_limit: default_export_limit(),
            max_bulk_ids: default_max_bulk_ids(),
            delete_concurrency: default_delete_concurrency(),
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u64 {
    100
}

fn default_export_limit() -> u64 {
    10_000
}

fn default_max_bulk_ids() -> usize {
    1_000
}

fn default_delete_concurrency() -> usize {
    4
}
