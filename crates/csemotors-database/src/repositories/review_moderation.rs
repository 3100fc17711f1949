//! Bulk approve, reject, and delete over batches of reviews.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use csemotors_core::error::AppError;
use csemotors_core::result::AppResult;
use csemotors_core::traits::{RowFetcher, StatementExecutor};
use csemotors_core::types::{ReviewId, SqlValue};
use csemotors_entity::moderation::{BulkAction, BulkOutcome, ModeratedReview};

use crate::executor::PgExecutor;
use crate::query::ParamList;

const DELETE_SQL: &str = "DELETE FROM review WHERE review_id = $1";

/// Hard ceiling on ids per bulk action. PostgreSQL binds at most 65535
/// parameters per statement and the approval update spends one on the flag.
pub const MAX_BULK_IDS: usize = 65_534;

const DEFAULT_DELETE_CONCURRENCY: usize = 4;

/// Applies moderation actions to batches of reviews.
#[derive(Debug, Clone)]
pub struct ReviewModerationRepository<E = PgExecutor> {
    executor: E,
    /// Largest id list accepted.
    max_ids: usize,
    /// Delete statements in flight at once.
    delete_concurrency: usize,
}

impl<E> ReviewModerationRepository<E>
where
    E: StatementExecutor + RowFetcher<ModeratedReview>,
{
    /// Create a new review moderation repository.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            max_ids: MAX_BULK_IDS,
            delete_concurrency: DEFAULT_DELETE_CONCURRENCY,
        }
    }

    /// Override the id-list cap (never above [`MAX_BULK_IDS`]) and the
    /// delete fan-out width.
    pub fn with_limits(mut self, max_ids: usize, delete_concurrency: usize) -> Self {
        self.max_ids = max_ids.clamp(1, MAX_BULK_IDS);
        self.delete_concurrency = delete_concurrency.max(1);
        self
    }

    /// Apply `action` to `ids`.
    ///
    /// The list must hold between one and the configured maximum of ids,
    /// counted before duplicates are collapsed (first-seen order is kept).
    pub async fn apply(&self, action: BulkAction, ids: &[ReviewId]) -> AppResult<BulkOutcome> {
        if ids.is_empty() {
            return Err(
                AppError::invalid_request("Review IDs array is required and cannot be empty")
                    .with_subject("review_ids"),
            );
        }
        if ids.len() > self.max_ids {
            return Err(AppError::invalid_request(format!(
                "At most {} review IDs can be moderated at once, got {}",
                self.max_ids,
                ids.len()
            ))
            .with_subject("review_ids"));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let ids: Vec<ReviewId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let outcome = match action.approval_flag() {
            Some(approved) => self.set_approval(&ids, approved).await?,
            None => self.delete_each(&ids).await,
        };

        info!(
            action = %action,
            requested = ids.len(),
            affected = outcome.affected(),
            "Bulk moderation applied"
        );
        Ok(outcome)
    }

    /// One set-based update over every id.
    async fn set_approval(&self, ids: &[ReviewId], approved: bool) -> AppResult<BulkOutcome> {
        let mut params = ParamList::new();
        let flag = params.bind(approved);
        let placeholders = params.bind_all(ids.iter().copied());
        let sql = format!(
            "UPDATE review SET review_approved = {flag} \
             WHERE review_id IN ({placeholders}) \
             RETURNING review_id, review_approved"
        );

        let rows = <E as RowFetcher<ModeratedReview>>::fetch_rows(
            &self.executor,
            &sql,
            params.as_slice(),
        )
        .await?;

        Ok(BulkOutcome::StatusUpdated {
            updated_count: rows.len() as u64,
            affected_ids: rows.into_iter().map(|row| row.review_id).collect(),
        })
    }

    /// One delete per id, at most `delete_concurrency` at a time. A failed
    /// delete is logged and reported in `failed_ids`; it does not abort the
    /// others.
    async fn delete_each(&self, ids: &[ReviewId]) -> BulkOutcome {
        let results: Vec<(ReviewId, AppResult<u64>)> = stream::iter(ids.iter().copied())
            .map(|id| async move {
                let params = [SqlValue::from(id)];
                (id, self.executor.execute(DELETE_SQL, &params).await)
            })
            .buffered(self.delete_concurrency)
            .collect()
            .await;

        let mut deleted_ids = Vec::new();
        let mut failed_ids = Vec::new();
        for (id, result) in results {
            match result {
                Ok(0) => {}
                Ok(_) => deleted_ids.push(id),
                Err(e) => {
                    warn!(review_id = %id, error = %e, "Failed to delete review");
                    failed_ids.push(id);
                }
            }
        }

        BulkOutcome::Deleted {
            deleted_count: deleted_ids.len() as u64,
            deleted_ids,
            failed_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{CallKind, FakeExecutor};

    fn ids(raw: &[i32]) -> Vec<ReviewId> {
        raw.iter().copied().map(ReviewId).collect()
    }

    fn moderated(raw: &[i32], approved: bool) -> Vec<ModeratedReview> {
        raw.iter()
            .map(|&id| ModeratedReview {
                review_id: ReviewId(id),
                review_approved: approved,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_ids_rejected_without_queries() {
        let fake = FakeExecutor::new();
        let repo = ReviewModerationRepository::new(fake.clone());

        let err = repo.apply(BulkAction::Approve, &[]).await.unwrap_err();
        assert!(err.is_invalid_request());
        assert_eq!(err.subject.as_deref(), Some("review_ids"));
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_approve_is_one_set_based_statement() {
        let fake = FakeExecutor::new();
        fake.push_rows(moderated(&[4, 9, 2], true));
        let repo = ReviewModerationRepository::new(fake.clone());

        let outcome = repo.apply(BulkAction::Approve, &ids(&[4, 9, 2])).await.unwrap();

        assert_eq!(
            outcome,
            BulkOutcome::StatusUpdated {
                updated_count: 3,
                affected_ids: ids(&[4, 9, 2]),
            }
        );
        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, CallKind::Rows);
        assert!(calls[0].sql.contains("SET review_approved = $1"));
        assert!(calls[0].sql.contains("IN ($2, $3, $4)"));
        assert_eq!(
            calls[0].params,
            vec![
                SqlValue::Boolean(true),
                SqlValue::Integer(4),
                SqlValue::Integer(9),
                SqlValue::Integer(2),
            ]
        );
    }

    #[tokio::test]
    async fn test_reject_counts_only_existing_rows() {
        let fake = FakeExecutor::new();
        fake.push_rows(moderated(&[1], false));
        let repo = ReviewModerationRepository::new(fake.clone());

        let outcome = repo.apply(BulkAction::Reject, &ids(&[1, 999])).await.unwrap();

        assert_eq!(outcome.affected(), 1);
        assert_eq!(fake.calls()[0].params[0], SqlValue::Boolean(false));
    }

    #[tokio::test]
    async fn test_approving_twice_counts_the_same() {
        let fake = FakeExecutor::new();
        fake.push_rows(moderated(&[1, 2, 3], true));
        fake.push_rows(moderated(&[1, 2, 3], true));
        let repo = ReviewModerationRepository::new(fake.clone());

        let first = repo.apply(BulkAction::Approve, &ids(&[1, 2, 3])).await.unwrap();
        let second = repo.apply(BulkAction::Approve, &ids(&[1, 2, 3])).await.unwrap();

        assert_eq!(first.affected(), 3);
        assert_eq!(first, second);
        let calls = fake.calls();
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_bound_once() {
        let fake = FakeExecutor::new();
        let repo = ReviewModerationRepository::new(fake.clone());

        repo.apply(BulkAction::Approve, &ids(&[5, 5, 6, 5])).await.unwrap();

        assert_eq!(
            fake.calls()[0].params,
            vec![
                SqlValue::Boolean(true),
                SqlValue::Integer(5),
                SqlValue::Integer(6),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_absorbs_per_id_failures() {
        let fake = FakeExecutor::new().on_execute(|_, params| match params {
            [SqlValue::Integer(2)] => Err(AppError::storage("foreign key violation")),
            _ => Ok(1),
        });
        let repo = ReviewModerationRepository::new(fake.clone());

        let outcome = repo.apply(BulkAction::Delete, &ids(&[1, 2, 3])).await.unwrap();

        assert_eq!(
            outcome,
            BulkOutcome::Deleted {
                deleted_count: 2,
                deleted_ids: ids(&[1, 3]),
                failed_ids: ids(&[2]),
            }
        );
        let calls = fake.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.kind == CallKind::Execute && c.sql == DELETE_SQL));
    }

    #[tokio::test]
    async fn test_delete_of_missing_id_is_neither_deleted_nor_failed() {
        let fake = FakeExecutor::new().on_execute(|_, params| match params {
            [SqlValue::Integer(8)] => Ok(0),
            _ => Ok(1),
        });
        let repo = ReviewModerationRepository::new(fake);

        let outcome = repo.apply(BulkAction::Delete, &ids(&[7, 8])).await.unwrap();

        assert_eq!(
            outcome,
            BulkOutcome::Deleted {
                deleted_count: 1,
                deleted_ids: ids(&[7]),
                failed_ids: Vec::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_oversized_id_list_rejected_without_queries() {
        let fake = FakeExecutor::new();
        let repo = ReviewModerationRepository::new(fake.clone()).with_limits(5, 2);

        let err = repo.apply(BulkAction::Approve, &ids(&[1, 2, 3, 4, 5, 6])).await.unwrap_err();

        assert!(err.is_invalid_request());
        assert_eq!(err.subject.as_deref(), Some("review_ids"));
        assert_eq!(fake.call_count(), 0);
        assert!(repo.apply(BulkAction::Approve, &ids(&[1, 2, 3, 4, 5])).await.is_ok());
    }

    #[tokio::test]
    async fn test_default_cap_fits_one_statement() {
        let fake = FakeExecutor::new();
        let repo = ReviewModerationRepository::new(fake.clone());
        let too_many: Vec<i32> = (1..=70_000).collect();

        let err = repo.apply(BulkAction::Approve, &ids(&too_many)).await.unwrap_err();
        assert_eq!(err.subject.as_deref(), Some("review_ids"));
        assert_eq!(fake.call_count(), 0);

        let at_cap: Vec<i32> = (1..=MAX_BULK_IDS as i32).collect();
        repo.apply(BulkAction::Reject, &ids(&at_cap)).await.unwrap();
        assert_eq!(fake.calls()[0].params.len(), usize::from(u16::MAX));
    }

    #[tokio::test]
    async fn test_limits_are_clamped() {
        let repo = ReviewModerationRepository::new(FakeExecutor::new()).with_limits(1_000_000, 0);
        assert_eq!(repo.max_ids, MAX_BULK_IDS);
        assert_eq!(repo.delete_concurrency, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_fan_out_is_bounded_and_ordered() {
        let fake = FakeExecutor::new().with_execute_delay(Duration::from_millis(50));
        let repo = ReviewModerationRepository::new(fake.clone()).with_limits(100, 3);
        let raw: Vec<i32> = (1..=20).collect();

        let outcome = repo.apply(BulkAction::Delete, &ids(&raw)).await.unwrap();

        assert_eq!(
            outcome,
            BulkOutcome::Deleted {
                deleted_count: 20,
                deleted_ids: ids(&raw),
                failed_ids: Vec::new(),
            }
        );
        assert_eq!(fake.peak_in_flight(), 3);
    }
}
