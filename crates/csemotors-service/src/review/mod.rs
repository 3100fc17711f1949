//! Review analytics, export, sentiment, and moderation services.

pub mod analytics;
pub mod export;
pub mod moderation;
pub mod sentiment;

pub use analytics::{ReviewAnalyticsService, VehicleReviewSummary};
pub use export::CsvExport;
pub use moderation::ModerationService;
