//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_site::SiteError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No chapter with the requested slug in the resolved locale.
    #[error("Chapter not found: {locale}/{slug}")]
    ChapterNotFound {
        /// Resolved locale.
        locale: String,
        /// Requested slug.
        slug: String,
    },

    /// Repository error from folio-site.
    #[error(transparent)]
    Site(#[from] SiteError),

    /// Response body could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::ChapterNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Site(e) if e.is_invalid_path() => StatusCode::BAD_REQUEST,
            Self::Site(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::ChapterNotFound { .. } => json!({"error": "Chapter not found"}),
            Self::Site(e) if e.is_invalid_path() => json!({"error": "Invalid locale or slug"}),
            Self::Site(_) | Self::Json(_) => {
                tracing::error!(error = %self, "Request failed");
                json!({"error": self.to_string()})
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
