use crate::error::Result;
use crate::model::{ResolveResponse, ShortenBody, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use tracing::debug;

pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let custom = request.custom_code.is_some();

    let shortened = state.shortener().shorten(request)?;
    let short_url = state.short_url(&shortened.code);
    debug!(code = %shortened.code, custom, short_url = %short_url, "shorten request served");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            shortcode: shortened.code.to_string(),
            short_url,
            expires_at: shortened.expires_at,
        }),
    ))
}

pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>> {
    let resolved = state.resolver().resolve(&code)?;
    Ok(Json(ResolveResponse {
        long_url: resolved.long_url,
        expires_at: resolved.expires_at,
    }))
}

pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let resolved = state.resolver().resolve(&code)?;
    Ok(Redirect::temporary(&resolved.long_url))
}
