//! # csemotors-service
//!
//! Use cases of the review back office. Services take their repositories
//! at construction time and are generic over the storage executor, so the
//! same code runs against PostgreSQL and against the recording fake used in
//! tests.

pub mod review;
pub mod store;

pub use review::{CsvExport, ModerationService, ReviewAnalyticsService};
pub use store::ReviewStore;
