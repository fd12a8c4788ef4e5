//! HTTP request handlers.

pub(crate) mod chapters;
pub(crate) mod config;
pub(crate) mod pages;
pub(crate) mod slugs;

use axum::http::{HeaderMap, header};
use serde::Deserialize;

use crate::state::AppState;

/// Cookie holding the reader's stored language preference.
pub(crate) const LOCALE_COOKIE: &str = "language";

/// Query string accepted by locale-aware endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LocaleQuery {
    /// Explicitly requested locale.
    pub(crate) locale: Option<String>,
}

/// Find a cookie value across all `Cookie` headers.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Resolve the locale of a request: query parameter, then cookie, then default.
pub(crate) fn request_locale<'a>(
    state: &'a AppState,
    query: &'a LocaleQuery,
    headers: &'a HeaderMap,
) -> &'a str {
    state
        .library
        .resolve_locale(query.locale.as_deref(), cookie_value(headers, LOCALE_COOKIE))
}
