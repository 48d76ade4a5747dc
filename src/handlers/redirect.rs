// Short code redirect handler

use axum::{
    extract::{ConnectInfo, FromRequestParts, Path, State},
    http::{header, request::Parts},
    response::Redirect,
};
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::{app::AppState, services::ClientInfo, utils::service_error::ServiceError};

// Peer address comes from `into_make_service_with_connect_info`; when the
// server runs without it the IP is simply absent.
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ClientInfo {
            ip_address,
            user_agent,
        })
    }
}

/// Follow a short link
/// GET /{short_code}
#[utoipa::path(
    get,
    path = "/{short_code}",
    tag = "Redirect",
    operation_id = "redirect",
    params(("short_code" = String, Path, description = "Short code issued by POST /api/v1/link")),
    responses(
        (status = 303, description = "Redirect to the original URL"),
        (status = 404, description = "Short link not found")
    )
)]
pub async fn redirect_to_url(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
    client: ClientInfo,
) -> Result<Redirect, ServiceError> {
    let target = state.redirect_service.resolve(&short_code, &client).await?;
    Ok(Redirect::to(&target))
}
