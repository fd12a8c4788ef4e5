//! Configuration API endpoint.
//!
//! Returns the locale configuration for the frontend language switcher.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/config.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigResponse {
    /// Configured locales, in display order.
    locales: Vec<String>,
    /// Locale used when a request names none.
    default_locale: String,
}

/// Handle GET /api/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        locales: state.library.locales().to_vec(),
        default_locale: state.library.default_locale().to_owned(),
    })
}
