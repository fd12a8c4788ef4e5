//! Chapter data types.

use serde::Serialize;

use crate::front_matter::{FrontMatter, MetadataError};

/// A content unit as read from storage: slug, parsed front matter, raw body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawChapter {
    /// Unique-per-locale identifier derived from the unit's name.
    pub slug: String,
    /// Parsed front matter (fields may be missing).
    pub front_matter: FrontMatter,
    /// Body text after the front matter, uncompiled.
    pub body: String,
}

impl RawChapter {
    /// Build chapter metadata, defaulting missing fields.
    ///
    /// Missing or empty `title` becomes the slug, missing `description`
    /// becomes `""` and missing `order` becomes `0`.
    #[must_use]
    pub fn meta(&self) -> ChapterMeta {
        let title = self
            .front_matter
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.slug);

        ChapterMeta {
            title: title.to_owned(),
            description: self.front_matter.description.clone().unwrap_or_default(),
            order: self.front_matter.order.unwrap_or(0),
            slug: self.slug.clone(),
        }
    }

    /// Convert into chapter content, applying the same defaults as [`meta`](Self::meta).
    #[must_use]
    pub fn into_content(self) -> ChapterContent {
        ChapterContent {
            meta: self.meta(),
            content: self.body,
        }
    }
}

/// Chapter metadata used for listings and navigation.
///
/// Identity is `(locale, slug)`; the locale is implied by the query that
/// produced the value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterMeta {
    /// Display title.
    pub title: String,
    /// Short summary, empty when not set.
    pub description: String,
    /// Sort key within the locale.
    pub order: i64,
    /// Chapter identifier.
    pub slug: String,
}

/// Chapter metadata plus the raw body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterContent {
    /// Chapter metadata.
    #[serde(flatten)]
    pub meta: ChapterMeta,
    /// Raw body text.
    pub content: String,
}

/// A content unit skipped during a scan because its front matter is malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataIssue {
    /// Slug of the skipped unit.
    pub slug: String,
    /// Why the front matter was rejected.
    pub error: MetadataError,
}

/// Result of scanning one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Parsed chapters in storage enumeration order.
    pub chapters: Vec<RawChapter>,
    /// Units skipped because of malformed front matter.
    pub issues: Vec<MetadataIssue>,
}

impl ScanResult {
    /// Check if the scan found nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty() && self.issues.is_empty()
    }
}
