//! Chapters API endpoints.
//!
//! Lists a locale's chapters and returns single chapters with navigation.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use folio_site::{ChapterMeta, ChapterWithNav};

use crate::error::ServerError;
use crate::handlers::{LocaleQuery, request_locale};
use crate::state::AppState;

/// Handle GET /api/chapters.
pub(crate) async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChapterMeta>>, ServerError> {
    let locale = request_locale(&state, &query, &headers);
    let chapters = state.library.list_chapters(locale)?;
    Ok(Json(chapters))
}

/// Handle GET /api/chapters/{slug}.
pub(crate) async fn get_chapter(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Result<Json<ChapterWithNav>, ServerError> {
    let locale = request_locale(&state, &query, &headers);
    state
        .library
        .chapter_with_navigation(locale, &slug)?
        .map(Json)
        .ok_or_else(|| ServerError::ChapterNotFound {
            locale: locale.to_owned(),
            slug,
        })
}
