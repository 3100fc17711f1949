//! Repository implementations for the review subsystem.

pub mod review;
pub mod review_analytics;
pub mod review_moderation;

pub use review::ReviewRepository;
pub use review_analytics::ReviewAnalyticsRepository;
pub use review_moderation::ReviewModerationRepository;
