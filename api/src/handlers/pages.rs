//! Page handlers
//!
//! Dashboard pages as HTML or JSON. Responses carry an `ETag` derived from
//! the dataset fingerprint and the page URL, so a client revalidating an
//! unchanged page gets `304 Not Modified`.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use sha2::{Digest, Sha256};

use super::wants_json;
use crate::dashboard::{build_page, pages, render_page, renderer::page_href, Dashboard, PageQuery};
use crate::error::AppError;
use crate::AppState;

/// GET /
pub async fn root() -> Redirect {
    Redirect::temporary(&format!("/pages/{}", pages::EXECUTIVE))
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(state.dashboard.as_ref().clone())
}

/// Strong validator for one representation of a page
pub fn page_etag(fingerprint: &str, slug: &str, query: &PageQuery, json: bool) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fingerprint.as_bytes());
    hasher.update(page_href(slug, query).as_bytes());
    hasher.update(if json { b"json".as_slice() } else { b"html".as_slice() });
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// True when `If-None-Match` lists `etag` (or `*`)
fn not_modified(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|candidate| candidate == etag || candidate == "*")
}

/// GET /pages/:slug
///
/// - Accept: application/json → page widget tree
/// - Otherwise → rendered HTML
pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let loaded = state.dataset_service.current().await;
    let page = build_page(&slug, &loaded.datasets, &query)
        .ok_or_else(|| AppError::NotFound(format!("page {}", slug)))?;

    let json = wants_json(&headers);
    let etag = page_etag(&loaded.fingerprint, &slug, &query, json);
    let etag_value =
        HeaderValue::from_str(&etag).map_err(|e| AppError::Internal(e.to_string()))?;

    if not_modified(&headers, &etag) {
        tracing::debug!(page = %slug, "Page not modified");
        return Ok((
            StatusCode::NOT_MODIFIED,
            [(header::ETAG, etag_value)],
        )
            .into_response());
    }

    let cache_headers = [
        (header::ETAG, etag_value),
        (header::VARY, HeaderValue::from_static("Accept")),
        (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
    ];

    if json {
        Ok((cache_headers, Json(page)).into_response())
    } else {
        let html = render_page(&state.dashboard, &page, &query);
        Ok((
            cache_headers,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response())
    }
}
