//! Application state.
//!
//! Shared state for all request handlers.

use folio_site::Library;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Chapter repository.
    pub(crate) library: Library,
    /// Application version, mixed into page `ETag`s.
    pub(crate) version: String,
}
