//! Review analytics and moderation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use validator::Validate;

use csemotors_core::error::AppError;
use csemotors_core::types::{PageResponse, VehicleId};
use csemotors_entity::analytics::{ComparativeRating, ReviewDashboard, ReviewStats};
use csemotors_entity::moderation::{BulkAction, BulkOutcome};
use csemotors_entity::review::ReviewListing;
use csemotors_entity::sentiment::SentimentReport;
use csemotors_service::review::VehicleReviewSummary;

use crate::dto::request::{BulkActionRequest, ReviewQueryParams};
use crate::dto::response::{ApiResponse, PendingCountResponse};
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// GET /api/reviews/advanced
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewQueryParams>,
) -> ApiResult<PageResponse<ReviewListing>> {
    let page = params.page_request(state.analytics_service.default_page_size());
    let result = state
        .analytics_service
        .list_reviews(&params.filter(), &params.sort(), page)
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/reviews/bulk
pub async fn bulk_action(
    State(state): State<AppState>,
    Json(req): Json<BulkActionRequest>,
) -> ApiResult<BulkOutcome> {
    // An unsupported action is reported ahead of any problem with the ids.
    let action: BulkAction = req.action.parse()?;
    req.validate()?;
    let outcome = state
        .moderation_service
        .apply(action, &req.review_ids)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/reviews/export
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ReviewQueryParams>,
) -> Result<Response, ApiError> {
    let export = state.analytics_service.export_csv(&params.filter()).await?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.content).into_response())
}

/// GET /api/reviews/sentiment
pub async fn sentiment(State(state): State<AppState>) -> ApiResult<SentimentReport> {
    let report = state.analytics_service.sentiment(None).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/reviews/sentiment/{inv_id}
pub async fn vehicle_sentiment(
    State(state): State<AppState>,
    Path(inv_id): Path<String>,
) -> ApiResult<SentimentReport> {
    let vehicle = parse_vehicle_id(&inv_id)?;
    let report = state.analytics_service.sentiment(Some(vehicle)).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/reviews/analytics
pub async fn analytics(State(state): State<AppState>) -> ApiResult<ReviewDashboard> {
    let dashboard = state.analytics_service.dashboard().await?;
    Ok(Json(ApiResponse::ok(dashboard)))
}

/// GET /api/reviews/stats
pub async fn overall_stats(State(state): State<AppState>) -> ApiResult<ReviewStats> {
    let stats = state.analytics_service.overall_stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/reviews/compare/{make}
pub async fn compare_make(
    State(state): State<AppState>,
    Path(make): Path<String>,
) -> ApiResult<Vec<ComparativeRating>> {
    let ratings = state.analytics_service.compare_make(&make).await?;
    Ok(Json(ApiResponse::ok(ratings)))
}

/// GET /api/reviews/stats/{inv_id}
pub async fn vehicle_stats(
    State(state): State<AppState>,
    Path(inv_id): Path<String>,
) -> ApiResult<VehicleReviewSummary> {
    let vehicle = parse_vehicle_id(&inv_id)?;
    let summary = state.analytics_service.vehicle_summary(vehicle).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/reviews/pending/count
pub async fn pending_count(State(state): State<AppState>) -> ApiResult<PendingCountResponse> {
    let pending_count = state.analytics_service.pending_count().await?;
    Ok(Json(ApiResponse::ok(PendingCountResponse { pending_count })))
}

fn parse_vehicle_id(raw: &str) -> Result<VehicleId, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(VehicleId::from_raw)
        .ok_or_else(|| {
            AppError::invalid_request(format!("Invalid vehicle ID: {raw}")).with_subject("inv_id")
        })
}
