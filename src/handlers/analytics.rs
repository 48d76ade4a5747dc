use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;
use validator::Validate;

use crate::{
    app::AppState,
    models::analytics::{AnalyticsParams, PaginatedLinkStats},
    utils::service_error::ServiceError,
};

/// Paginated click statistics for every link, newest first
/// GET /api/v1/analytics
#[utoipa::path(
    get,
    path = "/api/v1/analytics",
    tag = "Analytics",
    operation_id = "getAnalytics",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "One page of link statistics", body = PaginatedLinkStats),
        (status = 422, description = "page or page_size out of range")
    )
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    params: Result<Query<AnalyticsParams>, QueryRejection>,
) -> Result<Json<PaginatedLinkStats>, ServiceError> {
    let Query(params) = params?;
    params
        .validate()
        .map_err(|e| ServiceError::from_validation("query", &e))?;

    info!(
        "Getting analytics (page={}, page_size={})",
        params.page, params.page_size
    );

    let stats = state.analytics_service.list_with_stats(params).await?;
    Ok(Json(stats))
}
