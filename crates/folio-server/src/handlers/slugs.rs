//! Slugs API endpoint.
//!
//! Returns every slug known in at least one configured locale, for route
//! enumeration.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/slugs.
pub(crate) async fn get_slugs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.library.all_slugs()?))
}
