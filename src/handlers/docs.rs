// OpenAPI document, generated from the handler annotations

use axum::Json;
use utoipa::OpenApi;

use crate::models::{
    analytics::{LinkStats, MonthlyStats, PaginatedLinkStats},
    link::{CreateLinkRequest, LinkResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shortlink Backend API",
        description = "URL shortener with click tracking and per-link earnings"
    ),
    paths(
        super::links::create_link,
        super::analytics::get_analytics,
        super::redirect::redirect_to_url,
        super::health::health,
        super::health::health_db,
        super::health::health_redis,
    ),
    components(schemas(
        CreateLinkRequest,
        LinkResponse,
        LinkStats,
        MonthlyStats,
        PaginatedLinkStats
    )),
    tags(
        (name = "Links", description = "Short link creation"),
        (name = "Analytics", description = "Click statistics and earnings"),
        (name = "Redirect", description = "Short link resolution"),
        (name = "Health", description = "Liveness and dependency probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification at /api/v1/openapi.json
pub async fn serve_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
