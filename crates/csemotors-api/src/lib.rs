//! # csemotors-api
//!
//! HTTP API for the CSE Motors review back office, built on Axum.
//!
//! Provides the review analytics and moderation endpoints, health checks,
//! middleware (request logging, CORS, compression), request DTOs, and the
//! mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
