//! Pages API endpoint.
//!
//! Renders a chapter and returns JSON with metadata, navigation, table of
//! contents and HTML content. Responses carry an `ETag` so unchanged pages
//! are answered with `304 Not Modified`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::handlers::{LocaleQuery, request_locale};
use crate::state::AppState;

/// Handle GET /api/pages/{slug}.
pub(crate) async fn get_page(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let locale = request_locale(&state, &query, &headers);
    let Some(page) = state.library.page(locale, &slug)? else {
        return Err(ServerError::ChapterNotFound {
            locale: locale.to_owned(),
            slug,
        });
    };

    // Navigation links change with sibling chapters, so hash the whole body
    let body = serde_json::to_string(&page)?;
    let etag = compute_etag(&state.version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
