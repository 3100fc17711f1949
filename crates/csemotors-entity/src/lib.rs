//! # csemotors-entity
//!
//! Domain entity models for the CSE Motors review subsystem. Row structs
//! derive `sqlx::FromRow`; request-side value objects (filters, sort and
//! bulk actions) are plain serde types.

pub mod analytics;
pub mod moderation;
pub mod review;
pub mod sentiment;
