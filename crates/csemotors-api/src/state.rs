//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use csemotors_core::config::AppConfig;
use csemotors_database::DatabasePool;
use csemotors_database::repositories::{
    ReviewAnalyticsRepository, ReviewModerationRepository, ReviewRepository,
};
use csemotors_service::{ModerationService, ReviewAnalyticsService};

/// Shared state available to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool (readiness checks).
    pub db: DatabasePool,
    /// Listing, export, and analytics use cases.
    pub analytics_service: Arc<ReviewAnalyticsService>,
    /// Bulk moderation use case.
    pub moderation_service: Arc<ModerationService>,
}

impl AppState {
    /// Wire repositories and services over `db`.
    pub fn new(config: AppConfig, db: DatabasePool) -> Self {
        let executor = db.executor();

        let analytics_repo = Arc::new(ReviewAnalyticsRepository::new(executor.clone()));
        let review_repo = Arc::new(ReviewRepository::new(executor.clone()));
        let moderation_repo = Arc::new(
            ReviewModerationRepository::new(executor)
                .with_limits(config.reviews.max_bulk_ids, config.reviews.delete_concurrency),
        );

        let analytics_service = Arc::new(ReviewAnalyticsService::new(
            analytics_repo,
            review_repo,
            config.reviews.clone(),
        ));
        let moderation_service = Arc::new(ModerationService::new(moderation_repo));

        Self {
            config: Arc::new(config),
            db,
            analytics_service,
            moderation_service,
        }
    }
}
