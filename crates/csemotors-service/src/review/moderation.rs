//! Bulk moderation use case.

use std::sync::Arc;

use csemotors_core::error::AppError;
use csemotors_core::result::AppResult;
use csemotors_core::types::ReviewId;
use csemotors_database::PgExecutor;
use csemotors_database::repositories::ReviewModerationRepository;
use csemotors_entity::moderation::{BulkAction, BulkOutcome};

use crate::store::ReviewStore;

/// Validates raw bulk requests and hands them to the moderation repository.
#[derive(Debug, Clone)]
pub struct ModerationService<E = PgExecutor> {
    moderation_repo: Arc<ReviewModerationRepository<E>>,
}

impl<E> ModerationService<E>
where
    E: ReviewStore,
{
    /// Creates a new moderation service.
    pub fn new(moderation_repo: Arc<ReviewModerationRepository<E>>) -> Self {
        Self { moderation_repo }
    }

    /// Parse `action`, then apply it to the reviews in `raw_ids`.
    ///
    /// An unsupported action is reported before anything about the ids.
    pub async fn bulk(&self, action: &str, raw_ids: &[i64]) -> AppResult<BulkOutcome> {
        let action: BulkAction = action.parse()?;
        self.apply(action, raw_ids).await
    }

    /// Apply `action` to the reviews in `raw_ids`.
    ///
    /// Every id must be a positive integer that fits a review key.
    pub async fn apply(&self, action: BulkAction, raw_ids: &[i64]) -> AppResult<BulkOutcome> {
        let ids = raw_ids
            .iter()
            .map(|&raw| {
                ReviewId::from_raw(raw).ok_or_else(|| {
                    AppError::invalid_request(format!("Invalid review ID: {raw}"))
                        .with_subject("review_ids")
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        self.moderation_repo.apply(action, &ids).await
    }
}
