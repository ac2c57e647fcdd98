use crate::error::{AppError, Result};
use crate::model::{ClearLinksResponse, LinkResponse, ShortenRequest};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{Link, ShortCode};
use tracing::debug;

fn to_responses(state: &AppState, headers: &HeaderMap, links: Vec<Link>) -> Vec<LinkResponse> {
    links
        .into_iter()
        .map(|link| LinkResponse {
            short_url: state.short_url(&link.short_code, headers),
            original_url: link.original_url,
        })
        .collect()
}

pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<LinkResponse>>)> {
    let Json(request) =
        payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if request.urls.is_empty() {
        return Err(AppError::BadRequest(
            "the 'urls' array must not be empty".to_string(),
        ));
    }

    let links = state.shortener().shorten_many(&request.urls).await?;
    debug!(requested = request.urls.len(), shortened = links.len(), "shorten batch done");

    Ok((
        StatusCode::CREATED,
        Json(to_responses(&state, &headers, links)),
    ))
}

pub async fn list_links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkResponse>>> {
    let links = state.shortener().list().await?;
    Ok(Json(to_responses(&state, &headers, links)))
}

pub async fn clear_links_handler(State(state): State<AppState>) -> Result<Json<ClearLinksResponse>> {
    let removed = state.shortener().clear().await?;

    Ok(Json(ClearLinksResponse {
        message: "All links were removed successfully.".to_string(),
        links_removidos: removed,
    }))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // Anything that cannot be a short code cannot be stored either.
    let code = ShortCode::new(short_code).map_err(|_| AppError::NotFound)?;

    let link = state
        .shortener()
        .resolve(&code)
        .await?
        .ok_or(AppError::NotFound)?;

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        AppError::Internal(format!(
            "stored url for {code} is not a valid Location header: {e}"
        ))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
