//! Route definitions for the review HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the router with every route and the shared state.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(review_routes()).merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Review analytics and moderation endpoints.
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews/advanced", get(handlers::reviews::list_reviews))
        .route("/reviews/bulk", post(handlers::reviews::bulk_action))
        .route("/reviews/export", get(handlers::reviews::export_csv))
        .route("/reviews/sentiment", get(handlers::reviews::sentiment))
        .route(
            "/reviews/sentiment/{inv_id}",
            get(handlers::reviews::vehicle_sentiment),
        )
        .route("/reviews/analytics", get(handlers::reviews::analytics))
        .route("/reviews/compare/{make}", get(handlers::reviews::compare_make))
        .route("/reviews/stats", get(handlers::reviews::overall_stats))
        .route("/reviews/stats/{inv_id}", get(handlers::reviews::vehicle_stats))
        .route(
            "/reviews/pending/count",
            get(handlers::reviews::pending_count),
        )
}

/// Liveness and readiness.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::readiness))
}
