//! Review listing and analytics use cases.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use csemotors_core::config::ReviewsConfig;
use csemotors_core::error::AppError;
use csemotors_core::result::AppResult;
use csemotors_core::types::{PageRequest, PageResponse, VehicleId};
use csemotors_database::PgExecutor;
use csemotors_database::repositories::{ReviewAnalyticsRepository, ReviewRepository};
use csemotors_entity::analytics::{ComparativeRating, ReviewDashboard, ReviewStats};
use csemotors_entity::review::{
    ReviewFilter, ReviewListing, ReviewSort, VehicleReview, VehicleReviewStats,
};
use csemotors_entity::sentiment::SentimentReport;

use super::export::{CsvExport, export_filename, render_csv};
use super::sentiment;
use crate::store::ReviewStore;

/// Approved reviews shown alongside a vehicle's statistics.
const RECENT_REVIEW_COUNT: u64 = 3;

/// A vehicle's rating statistics and its latest approved reviews.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReviewSummary {
    pub stats: VehicleReviewStats,
    pub recent_reviews: Vec<VehicleReview>,
}

/// Read-side review use cases: listing, export, and analytics.
#[derive(Debug, Clone)]
pub struct ReviewAnalyticsService<E = PgExecutor> {
    /// Listing and analytics queries.
    analytics_repo: Arc<ReviewAnalyticsRepository<E>>,
    /// Per-vehicle queries.
    review_repo: Arc<ReviewRepository<E>>,
    /// Page size and export limits.
    config: ReviewsConfig,
}

impl<E> ReviewAnalyticsService<E>
where
    E: ReviewStore,
{
    /// Creates a new review analytics service.
    pub fn new(
        analytics_repo: Arc<ReviewAnalyticsRepository<E>>,
        review_repo: Arc<ReviewRepository<E>>,
        config: ReviewsConfig,
    ) -> Self {
        Self {
            analytics_repo,
            review_repo,
            config,
        }
    }

    /// Page size used when a request does not name one.
    pub fn default_page_size(&self) -> u64 {
        self.config.default_page_size
    }

    /// One page of reviews matching `filter`, with the page size capped at
    /// the configured maximum.
    pub async fn list_reviews(
        &self,
        filter: &ReviewFilter,
        sort: &ReviewSort,
        page: PageRequest,
    ) -> AppResult<PageResponse<ReviewListing>> {
        let page = page.capped(self.config.max_page_size);
        self.analytics_repo.find_page(filter, sort, page).await
    }

    /// Every review matching `filter` (up to the export limit), newest
    /// first, as a CSV document.
    pub async fn export_csv(&self, filter: &ReviewFilter) -> AppResult<CsvExport> {
        let sort = ReviewSort::new("review_date", "DESC");
        let page = PageRequest::new(1, self.config.export_limit);
        let rows = self.analytics_repo.search(filter, &sort, page).await?;

        let content = render_csv(&rows)?;
        let export = CsvExport {
            filename: export_filename(Utc::now().date_naive()),
            row_count: rows.len(),
            content,
        };
        info!(
            row_count = export.row_count,
            filename = %export.filename,
            "Exported reviews"
        );
        Ok(export)
    }

    /// Keyword sentiment over approved reviews, optionally for one vehicle.
    pub async fn sentiment(&self, vehicle: Option<VehicleId>) -> AppResult<SentimentReport> {
        let rows = self.analytics_repo.sentiment_rows(vehicle).await?;
        Ok(sentiment::analyze(rows))
    }

    /// Dashboard totals, distribution, trends, and top vehicles.
    pub async fn dashboard(&self) -> AppResult<ReviewDashboard> {
        self.analytics_repo.dashboard().await
    }

    /// Headline counts across every review, without the dashboard lists.
    pub async fn overall_stats(&self) -> AppResult<ReviewStats> {
        Ok(self.analytics_repo.dashboard().await?.stats)
    }

    /// Per-vehicle ratings of `make` compared with the make's average.
    pub async fn compare_make(&self, make: &str) -> AppResult<Vec<ComparativeRating>> {
        let make = make.trim();
        if make.is_empty() {
            return Err(AppError::invalid_request("Vehicle make is required").with_subject("make"));
        }
        self.analytics_repo.comparative_ratings(make).await
    }

    /// Rating statistics and the latest approved reviews of a vehicle.
    pub async fn vehicle_summary(&self, vehicle: VehicleId) -> AppResult<VehicleReviewSummary> {
        let (stats, recent_reviews) = tokio::try_join!(
            self.review_repo.vehicle_stats(vehicle),
            self.review_repo
                .recent_for_vehicle(vehicle, RECENT_REVIEW_COUNT),
        )?;
        Ok(VehicleReviewSummary {
            stats,
            recent_reviews,
        })
    }

    /// Number of reviews awaiting moderation.
    pub async fn pending_count(&self) -> AppResult<u64> {
        self.review_repo.pending_count().await
    }
}
