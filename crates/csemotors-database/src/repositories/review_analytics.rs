//! Review listing, dashboard, sentiment, and comparison queries.

use tracing::debug;

use csemotors_core::result::AppResult;
use csemotors_core::traits::{RowFetcher, StatementExecutor};
use csemotors_core::types::{PageRequest, PageResponse, SqlValue, VehicleId};
use csemotors_entity::analytics::{ComparativeRating, DashboardRow, ReviewDashboard};
use csemotors_entity::review::{ReviewFilter, ReviewListing, ReviewSort};
use csemotors_entity::sentiment::SentimentRow;

use crate::executor::PgExecutor;
use crate::query::{ParamList, compile};

/// Keywords counted as positive by the sentiment query.
pub const POSITIVE_KEYWORDS: [&str; 10] = [
    "great",
    "excellent",
    "amazing",
    "fantastic",
    "wonderful",
    "perfect",
    "outstanding",
    "superb",
    "brilliant",
    "awesome",
];

/// Keywords counted as negative by the sentiment query.
pub const NEGATIVE_KEYWORDS: [&str; 10] = [
    "terrible",
    "awful",
    "horrible",
    "bad",
    "worst",
    "disappointing",
    "poor",
    "useless",
    "broken",
    "failed",
];

const DASHBOARD_SQL: &str = r#"
WITH review_stats AS (
    SELECT
        COUNT(*) AS total_reviews,
        COUNT(*) FILTER (WHERE review_approved) AS approved_reviews,
        COUNT(*) FILTER (WHERE NOT review_approved) AS pending_reviews,
        ROUND(AVG(review_rating), 2) AS overall_avg_rating,
        COUNT(DISTINCT account_id) AS unique_reviewers,
        COUNT(DISTINCT inv_id) AS vehicles_with_reviews
    FROM review
),
rating_distribution AS (
    SELECT
        review_rating,
        COUNT(*) AS count,
        ROUND(COUNT(*) * 100.0 / SUM(COUNT(*)) OVER (), 1) AS percentage
    FROM review
    WHERE review_approved
    GROUP BY review_rating
),
monthly_trends AS (
    SELECT
        DATE_TRUNC('month', review_date) AS month,
        COUNT(*) AS review_count,
        ROUND(AVG(review_rating), 2) AS avg_rating
    FROM review
    WHERE review_date >= NOW() - INTERVAL '12 months'
    GROUP BY DATE_TRUNC('month', review_date)
    ORDER BY month DESC
    LIMIT 12
),
top_vehicles AS (
    SELECT
        i.inv_id,
        i.inv_make,
        i.inv_model,
        i.inv_year,
        COUNT(r.review_id) AS review_count,
        ROUND(AVG(r.review_rating), 1) AS avg_rating
    FROM inventory i
    JOIN review r ON i.inv_id = r.inv_id
    WHERE r.review_approved
    GROUP BY i.inv_id, i.inv_make, i.inv_model, i.inv_year
    ORDER BY review_count DESC, avg_rating DESC
    LIMIT 10
)
SELECT
    (SELECT row_to_json(review_stats) FROM review_stats) AS stats,
    (SELECT json_agg(rating_distribution ORDER BY review_rating DESC) FROM rating_distribution) AS rating_dist,
    (SELECT json_agg(monthly_trends ORDER BY month DESC) FROM monthly_trends) AS trends,
    (SELECT json_agg(top_vehicles ORDER BY review_count DESC, avg_rating DESC) FROM top_vehicles) AS top_vehicles
"#;

const COMPARATIVE_SQL: &str = r#"
WITH vehicle_stats AS (
    SELECT
        i.inv_id,
        i.inv_make,
        i.inv_model,
        i.inv_year,
        COUNT(r.review_id) AS review_count,
        ROUND(AVG(r.review_rating), 2)::FLOAT8 AS avg_rating,
        MIN(r.review_rating) AS min_rating,
        MAX(r.review_rating) AS max_rating,
        MODE() WITHIN GROUP (ORDER BY r.review_rating) AS mode_rating
    FROM inventory i
    JOIN review r ON i.inv_id = r.inv_id AND r.review_approved
    WHERE LOWER(i.inv_make) = LOWER($1)
    GROUP BY i.inv_id, i.inv_make, i.inv_model, i.inv_year
),
make_average AS (
    SELECT ROUND(AVG(avg_rating)::NUMERIC, 2)::FLOAT8 AS make_avg_rating
    FROM vehicle_stats
)
SELECT
    vs.*,
    ma.make_avg_rating,
    CASE
        WHEN vs.avg_rating > ma.make_avg_rating THEN 'above_average'
        WHEN vs.avg_rating < ma.make_avg_rating THEN 'below_average'
        ELSE 'average'
    END AS performance_vs_make
FROM vehicle_stats vs
CROSS JOIN make_average ma
ORDER BY vs.avg_rating DESC, vs.review_count DESC
"#;

/// Read-side queries behind the review analytics screens.
#[derive(Debug, Clone)]
pub struct ReviewAnalyticsRepository<E = PgExecutor> {
    executor: E,
}

impl<E> ReviewAnalyticsRepository<E>
where
    E: StatementExecutor,
{
    /// Create a new review analytics repository.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Find one page of reviews matching `filter`.
    ///
    /// The count and the page are fetched concurrently with the same WHERE
    /// clause; if either fails, the whole call fails.
    pub async fn find_page(
        &self,
        filter: &ReviewFilter,
        sort: &ReviewSort,
        page: PageRequest,
    ) -> AppResult<PageResponse<ReviewListing>>
    where
        E: RowFetcher<ReviewListing>,
    {
        let compiled = compile(filter, sort, page);
        let count_sql = compiled.count_sql();
        let data_sql = compiled.data_sql();

        let (total, rows) = tokio::try_join!(
            self.executor.fetch_count(&count_sql, compiled.count_params()),
            <E as RowFetcher<ReviewListing>>::fetch_rows(
                &self.executor,
                &data_sql,
                compiled.data_params()
            ),
        )?;

        let total = u64::try_from(total).unwrap_or(0);
        debug!(
            total_records = total,
            review_count = rows.len(),
            page = page.page,
            "Loaded review page"
        );
        Ok(PageResponse::new(rows, &compiled.page(), total))
    }

    /// Fetch the rows of one page without counting the full result.
    pub async fn search(
        &self,
        filter: &ReviewFilter,
        sort: &ReviewSort,
        page: PageRequest,
    ) -> AppResult<Vec<ReviewListing>>
    where
        E: RowFetcher<ReviewListing>,
    {
        let compiled = compile(filter, sort, page);
        <E as RowFetcher<ReviewListing>>::fetch_rows(
            &self.executor,
            &compiled.data_sql(),
            compiled.data_params(),
        )
        .await
    }

    /// Compute the dashboard aggregates.
    pub async fn dashboard(&self) -> AppResult<ReviewDashboard>
    where
        E: RowFetcher<DashboardRow>,
    {
        let rows =
            <E as RowFetcher<DashboardRow>>::fetch_rows(&self.executor, DASHBOARD_SQL, &[]).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(ReviewDashboard::from_row(row)?),
            None => Ok(ReviewDashboard::default()),
        }
    }

    /// Approved reviews with their keyword hit counts, newest first,
    /// optionally limited to one vehicle.
    pub async fn sentiment_rows(&self, vehicle: Option<VehicleId>) -> AppResult<Vec<SentimentRow>>
    where
        E: RowFetcher<SentimentRow>,
    {
        let mut params = ParamList::new();
        let vehicle_clause = vehicle
            .map(|id| format!(" AND r.inv_id = {}", params.bind(id)))
            .unwrap_or_default();
        let positive = params.bind(&POSITIVE_KEYWORDS[..]);
        let negative = params.bind(&NEGATIVE_KEYWORDS[..]);

        let sql = format!(
            "SELECT r.review_id, r.review_title, r.review_text, r.review_rating, \
             i.inv_make, i.inv_model, LENGTH(r.review_text) AS text_length, \
             (SELECT COUNT(*) FROM unnest(string_to_array(LOWER(r.review_text), ' ')) AS word \
              WHERE word = ANY({positive})) AS positive_word_count, \
             (SELECT COUNT(*) FROM unnest(string_to_array(LOWER(r.review_text), ' ')) AS word \
              WHERE word = ANY({negative})) AS negative_word_count \
             FROM review r \
             JOIN inventory i ON r.inv_id = i.inv_id \
             WHERE r.review_approved{vehicle_clause} \
             ORDER BY r.review_date DESC"
        );

        <E as RowFetcher<SentimentRow>>::fetch_rows(&self.executor, &sql, params.as_slice()).await
    }

    /// Per-vehicle approved-review statistics for `make`, compared with the
    /// make's average.
    pub async fn comparative_ratings(&self, make: &str) -> AppResult<Vec<ComparativeRating>>
    where
        E: RowFetcher<ComparativeRating>,
    {
        <E as RowFetcher<ComparativeRating>>::fetch_rows(
            &self.executor,
            COMPARATIVE_SQL,
            &[SqlValue::from(make)],
        )
        .await
    }
}
