//! Heading slugs and anchor assignment.
//!
//! [`slugify`] is the single source of heading anchors. Both the HTML renderer
//! and [`TableOfContents`](crate::TableOfContents) derive ids through
//! [`HeadingIds`], so a table of contents link always points at a rendered
//! anchor.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character, whitespace or a dash.
static STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// Runs of whitespace.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Id used for headings whose text slugifies to nothing.
const FALLBACK_ID: &str = "section";

/// Convert heading text to an anchor slug.
///
/// Trims and lowercases the text, drops every character that is not a word
/// character, whitespace or `-`, then replaces whitespace runs with a single
/// `-`. Word characters are Unicode-aware, so non-Latin scripts keep their
/// letters and marks.
///
/// # Examples
///
/// ```
/// use folio_renderer::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// assert_eq!(slugify("ຕົວປ່ຽນ"), "ຕົວປ່ຽນ");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let stripped = STRIP.replace_all(&lower, "");
    WHITESPACE.replace_all(stripped.trim(), "-").into_owned()
}

/// Assigns unique anchor ids to the headings of one document.
///
/// The first heading with a given slug keeps it; repeats get `-1`, `-2`, ...
/// appended in document order.
#[derive(Debug, Default)]
pub struct HeadingIds {
    counts: HashMap<String, usize>,
}

impl HeadingIds {
    /// Create an empty id assigner for a new document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the id for the next heading with `text`.
    pub fn assign(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            FALLBACK_ID.clone_into(&mut base);
        }

        let count = self.counts.entry(base.clone()).or_default();
        let id = match *count {
            0 => base,
            n => format!("{base}-{n}"),
        };
        *count += 1;
        id
    }
}
