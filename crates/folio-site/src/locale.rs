//! Request locale selection.

/// Locale used when a request names none.
pub const DEFAULT_LOCALE: &str = "en";

/// Pick the first non-empty locale candidate, falling back to `default`.
///
/// Candidates are given in priority order, e.g. the `locale` query parameter
/// followed by the `language` cookie. Whitespace-only values count as absent.
/// The result is not checked against any locale list; an unknown locale
/// simply has no chapters.
///
/// # Examples
///
/// ```
/// use folio_site::resolve_locale;
///
/// assert_eq!(resolve_locale([Some("lo"), Some("en")], "en"), "lo");
/// assert_eq!(resolve_locale([Some(""), Some("lo")], "en"), "lo");
/// assert_eq!(resolve_locale([None, None], "en"), "en");
/// ```
#[must_use]
pub fn resolve_locale<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    default: &'a str,
) -> &'a str {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|locale| !locale.is_empty())
        .unwrap_or(default)
}
