//! Per-vehicle review queries.

use csemotors_core::result::AppResult;
use csemotors_core::traits::{RowFetcher, StatementExecutor};
use csemotors_core::types::{SqlValue, VehicleId};
use csemotors_entity::review::{VehicleReview, VehicleReviewStats};

use crate::executor::PgExecutor;

/// Repository for approved-review lookups and the moderation badge.
#[derive(Debug, Clone)]
pub struct ReviewRepository<E = PgExecutor> {
    executor: E,
}

impl<E> ReviewRepository<E>
where
    E: StatementExecutor,
{
    /// Create a new review repository.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Rating statistics over a vehicle's approved reviews.
    pub async fn vehicle_stats(&self, vehicle: VehicleId) -> AppResult<VehicleReviewStats>
    where
        E: RowFetcher<VehicleReviewStats>,
    {
        let rows = <E as RowFetcher<VehicleReviewStats>>::fetch_rows(
            &self.executor,
            "SELECT COUNT(*) AS total_reviews, \
             ROUND(AVG(review_rating), 1)::FLOAT8 AS avg_rating, \
             COUNT(*) FILTER (WHERE review_rating = 5) AS five_star, \
             COUNT(*) FILTER (WHERE review_rating = 4) AS four_star, \
             COUNT(*) FILTER (WHERE review_rating = 3) AS three_star, \
             COUNT(*) FILTER (WHERE review_rating = 2) AS two_star, \
             COUNT(*) FILTER (WHERE review_rating = 1) AS one_star \
             FROM review \
             WHERE inv_id = $1 AND review_approved",
            &[SqlValue::from(vehicle)],
        )
        .await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// The most recent approved reviews of a vehicle.
    pub async fn recent_for_vehicle(
        &self,
        vehicle: VehicleId,
        limit: u64,
    ) -> AppResult<Vec<VehicleReview>>
    where
        E: RowFetcher<VehicleReview>,
    {
        <E as RowFetcher<VehicleReview>>::fetch_rows(
            &self.executor,
            "SELECT r.review_id, r.review_title, r.review_text, r.review_rating, \
             r.review_date, a.account_firstname, a.account_lastname \
             FROM review r \
             JOIN account a ON r.account_id = a.account_id \
             WHERE r.inv_id = $1 AND r.review_approved \
             ORDER BY r.review_date DESC \
             LIMIT $2",
            &[SqlValue::from(vehicle), SqlValue::from(limit)],
        )
        .await
    }

    /// Number of reviews awaiting moderation.
    pub async fn pending_count(&self) -> AppResult<u64> {
        let count = self
            .executor
            .fetch_count("SELECT COUNT(*) FROM review WHERE NOT review_approved", &[])
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
