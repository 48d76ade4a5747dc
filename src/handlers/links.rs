// Link creation API endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    app::AppState,
    models::link::{CreateLinkRequest, LinkResponse},
    utils::{service_error::ServiceError, url_validator::normalize_url},
};

// =============================================================================
// LINK HANDLERS
// =============================================================================

/// Create a short link, or return the one this URL already has
/// POST /api/v1/link
#[utoipa::path(
    post,
    path = "/api/v1/link",
    tag = "Links",
    operation_id = "createLink",
    request_body = CreateLinkRequest,
    responses(
        (status = 201, description = "Short link created or reused", body = LinkResponse),
        (status = 422, description = "Malformed body or URL")
    )
)]
pub async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), ServiceError> {
    let Json(request) = payload?;

    let original_url = normalize_url(&request.original_url)?;
    info!("Generating short link for URL: {}", original_url);

    let link = state.link_service.create_or_get(&original_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.config.base_url)),
    ))
}
