//! Chapter repository.
//!
//! [`Library`] answers every chapter query of the site: ordered listings per
//! locale, direct lookups, the global slug set and chapter pages with
//! navigation. It keeps no state between calls; every query reads the
//! [`Storage`] afresh.

use std::collections::HashSet;
use std::sync::Arc;

use folio_renderer::{TableOfContents, render};
use folio_storage::{ChapterContent, ChapterMeta, RawChapter, Storage, StorageErrorKind};
use serde::Serialize;

use crate::error::SiteError;
use crate::locale::{DEFAULT_LOCALE, resolve_locale};
use crate::navigation::Adjacent;

/// A chapter with its raw body and navigation links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterWithNav {
    /// The chapter, including its raw body.
    pub chapter: ChapterContent,
    /// Previous chapter in the locale listing.
    pub prev: Option<ChapterMeta>,
    /// Next chapter in the locale listing.
    pub next: Option<ChapterMeta>,
}

/// A rendered chapter page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterPage {
    /// Chapter metadata.
    pub meta: ChapterMeta,
    /// Previous chapter in the locale listing.
    pub prev: Option<ChapterMeta>,
    /// Next chapter in the locale listing.
    pub next: Option<ChapterMeta>,
    /// Level 2-4 headings of the body.
    pub toc: TableOfContents,
    /// Rendered HTML body.
    pub content: String,
}

/// Locale-aware chapter repository over a [`Storage`] backend.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use folio_site::Library;
/// use folio_storage_fs::FsStorage;
///
/// let storage = Arc::new(FsStorage::new("content".into()));
/// let library = Library::new(storage).with_locales(vec!["en".into(), "lo".into()], "en");
///
/// for chapter in library.list_chapters("lo")? {
///     println!("{} {}", chapter.order, chapter.title);
/// }
/// ```
pub struct Library {
    storage: Arc<dyn Storage>,
    locales: Vec<String>,
    default_locale: String,
}

impl Library {
    /// Create a library serving only the default locale (`"en"`).
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            locales: vec![DEFAULT_LOCALE.to_owned()],
            default_locale: DEFAULT_LOCALE.to_owned(),
        }
    }

    /// Set the known locales and the fallback locale.
    ///
    /// Known locales determine which namespaces contribute to
    /// [`all_slugs`](Self::all_slugs).
    #[must_use]
    pub fn with_locales(mut self, locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        self.locales = locales;
        self.default_locale = default_locale.into();
        self
    }

    /// Known locales in configured order.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Locale used when a request names none.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Pick the request locale from an explicit choice and a stored
    /// preference, falling back to the default locale.
    #[must_use]
    pub fn resolve_locale<'a>(
        &'a self,
        requested: Option<&'a str>,
        preferred: Option<&'a str>,
    ) -> &'a str {
        resolve_locale([requested, preferred], &self.default_locale)
    }

    /// List chapter metadata of a locale, ordered by `order`.
    ///
    /// Chapters sharing an `order` keep storage enumeration order. Chapters
    /// with malformed front matter are skipped and logged. An unknown or
    /// empty locale yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the locale cannot be read.
    pub fn list_chapters(&self, locale: &str) -> Result<Vec<ChapterMeta>, SiteError> {
        let scan = self.storage.scan(locale)?;

        for issue in &scan.issues {
            tracing::warn!(
                locale,
                slug = %issue.slug,
                error = %issue.error,
                "Skipping chapter with malformed front matter"
            );
        }

        let mut chapters: Vec<ChapterMeta> = scan.chapters.iter().map(RawChapter::meta).collect();
        chapters.sort_by_key(|c| c.order);
        Ok(chapters)
    }

    /// Look up a single chapter with its raw body.
    ///
    /// Reads the chapter directly, so a chapter missing from the listing can
    /// still be fetched.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Metadata`] if the chapter's front matter is
    /// malformed, or [`SiteError::Storage`] if it cannot be read.
    pub fn get_chapter(
        &self,
        locale: &str,
        slug: &str,
    ) -> Result<Option<ChapterContent>, SiteError> {
        let raw = self.storage.read(locale, slug).map_err(|e| {
            if e.kind() == StorageErrorKind::InvalidMetadata {
                SiteError::Metadata {
                    locale: locale.to_owned(),
                    slug: slug.to_owned(),
                    source: e,
                }
            } else {
                SiteError::Storage(e)
            }
        })?;

        Ok(raw.map(RawChapter::into_content))
    }

    /// Every slug present in at least one known locale.
    ///
    /// Slugs appear once, in first-seen order over the known locales. Units
    /// with malformed front matter still contribute their slug, since a route
    /// exists for every content file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if any locale cannot be read.
    pub fn all_slugs(&self) -> Result<Vec<String>, SiteError> {
        let mut seen = HashSet::new();
        let mut slugs = Vec::new();

        for locale in &self.locales {
            let scan = self.storage.scan(locale)?;
            let names = scan
                .chapters
                .into_iter()
                .map(|c| c.slug)
                .chain(scan.issues.into_iter().map(|i| i.slug));
            for slug in names {
                if seen.insert(slug.clone()) {
                    slugs.push(slug);
                }
            }
        }

        Ok(slugs)
    }

    /// Look up a chapter together with its previous/next neighbours.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the chapter or the listing cannot be read.
    pub fn chapter_with_navigation(
        &self,
        locale: &str,
        slug: &str,
    ) -> Result<Option<ChapterWithNav>, SiteError> {
        let Some(chapter) = self.get_chapter(locale, slug)? else {
            return Ok(None);
        };
        let Adjacent { prev, next } = self.resolve_adjacent(locale, slug)?;

        Ok(Some(ChapterWithNav {
            chapter,
            prev,
            next,
        }))
    }

    /// Render a chapter page: metadata, navigation, TOC and HTML body.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the chapter or the listing cannot be read.
    pub fn page(&self, locale: &str, slug: &str) -> Result<Option<ChapterPage>, SiteError> {
        let Some(found) = self.chapter_with_navigation(locale, slug)? else {
            return Ok(None);
        };

        let rendered = render(&found.chapter.content);
        tracing::debug!(
            locale,
            slug,
            headings = rendered.toc.entries().len(),
            "Rendered chapter"
        );

        Ok(Some(ChapterPage {
            meta: found.chapter.meta,
            prev: found.prev,
            next: found.next,
            toc: rendered.toc,
            content: rendered.html,
        }))
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::Library: Send, Sync);

    use std::fs;

    use folio_storage::MockStorage;
    use folio_storage_fs::FsStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn library(storage: MockStorage) -> Library {
        Library::new(Arc::new(storage))
            .with_locales(vec!["en".to_owned(), "lo".to_owned()], "en")
    }

    fn chapter(title: &str, order: i64) -> String {
        format!("---\ntitle: {title}\norder: {order}\n---\n# {title}\n")
    }

    fn abc_storage() -> MockStorage {
        MockStorage::new()
            .with_chapter("en", "a", chapter("A", 1))
            .with_chapter("en", "b", chapter("B", 2))
            .with_chapter("en", "c", chapter("C", 3))
            .with_chapter("lo", "a", chapter("ກ", 1))
    }

    fn slugs(chapters: &[ChapterMeta]) -> Vec<&str> {
        chapters.iter().map(|c| c.slug.as_str()).collect()
    }

    // ========================================================================
    // Listing
    // ========================================================================

    #[test]
    fn test_list_chapters_unknown_locale_is_empty() {
        let library = library(abc_storage());

        assert!(library.list_chapters("fr").unwrap().is_empty());
    }

    #[test]
    fn test_list_chapters_sorted_by_order() {
        let storage = MockStorage::new()
            .with_chapter("en", "third", chapter("Third", 3))
            .with_chapter("en", "first", chapter("First", 1))
            .with_chapter("en", "second", chapter("Second", 2));

        let chapters = library(storage).list_chapters("en").unwrap();

        assert_eq!(slugs(&chapters), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_list_chapters_stable_for_equal_order() {
        let storage = MockStorage::new()
            .with_chapter("en", "z", chapter("Z", 1))
            .with_chapter("en", "late", chapter("Late", 2))
            .with_chapter("en", "m", chapter("M", 1))
            .with_chapter("en", "a", chapter("A", 1));

        let chapters = library(storage).list_chapters("en").unwrap();

        assert_eq!(slugs(&chapters), vec!["z", "m", "a", "late"]);
    }

    #[test]
    fn test_list_chapters_defaults_missing_metadata() {
        let storage = MockStorage::new().with_chapter("en", "setup", "No front matter");

        let chapters = library(storage).list_chapters("en").unwrap();

        assert_eq!(
            chapters,
            vec![ChapterMeta {
                title: "setup".to_owned(),
                description: String::new(),
                order: 0,
                slug: "setup".to_owned(),
            }]
        );
    }

    #[test]
    fn test_list_chapters_negative_order_first() {
        let storage = MockStorage::new()
            .with_chapter("en", "intro", "Body")
            .with_chapter("en", "preface", chapter("Preface", -1));

        let chapters = library(storage).list_chapters("en").unwrap();

        assert_eq!(slugs(&chapters), vec!["preface", "intro"]);
    }

    #[test]
    fn test_list_chapters_skips_malformed() {
        let storage = MockStorage::new()
            .with_chapter("en", "good", chapter("Good", 1))
            .with_chapter("en", "broken", "---\ntitle: [oops\n---\n");

        let chapters = library(storage).list_chapters("en").unwrap();

        assert_eq!(slugs(&chapters), vec!["good"]);
    }

    #[test]
    fn test_list_chapters_keeps_mistyped_order() {
        let storage = MockStorage::new()
            .with_chapter("en", "intro", "---\ntitle: Intro\norder: \"1\"\n---\n")
            .with_chapter("en", "next", chapter("Next", 2))
            .with_chapter("en", "odd", "---\ntitle: Odd\norder: 1.5\n---\n");

        let chapters = library(storage).list_chapters("en").unwrap();

        assert_eq!(slugs(&chapters), vec!["odd", "intro", "next"]);
        assert_eq!(chapters[0].order, 0);
        assert_eq!(chapters[1].order, 1);
    }

    #[test]
    fn test_list_chapters_propagates_storage_failure() {
        let storage = abc_storage().with_failure("en", StorageErrorKind::Unavailable);

        let err = library(storage).list_chapters("en").unwrap_err();

        assert_eq!(err.storage_kind(), StorageErrorKind::Unavailable);
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[test]
    fn test_get_chapter_round_trip() {
        let storage = MockStorage::new().with_chapter(
            "en",
            "intro",
            "---\ntitle: Intro\ndescription: d\norder: 1\n---\n# Intro\n\nWelcome.\n",
        );

        let content = library(storage).get_chapter("en", "intro").unwrap().unwrap();

        assert_eq!(
            content,
            ChapterContent {
                meta: ChapterMeta {
                    title: "Intro".to_owned(),
                    description: "d".to_owned(),
                    order: 1,
                    slug: "intro".to_owned(),
                },
                content: "# Intro\n\nWelcome.\n".to_owned(),
            }
        );
    }

    #[test]
    fn test_get_chapter_quoted_order() {
        let storage = MockStorage::new().with_chapter(
            "en",
            "intro",
            "---\ntitle: Intro\norder: \"3\"\n---\nHi",
        );

        let content = library(storage).get_chapter("en", "intro").unwrap().unwrap();

        assert_eq!(content.meta.order, 3);
        assert_eq!(content.content, "Hi");
    }

    #[test]
    fn test_get_chapter_missing_is_none() {
        let library = library(abc_storage());

        assert_eq!(library.get_chapter("lo", "b").unwrap(), None);
        assert_eq!(library.get_chapter("fr", "a").unwrap(), None);
    }

    #[test]
    fn test_get_chapter_malformed_is_metadata_error() {
        let storage = MockStorage::new().with_chapter("en", "broken", "---\ntitle: [x\n---\n");

        let err = library(storage).get_chapter("en", "broken").unwrap_err();

        match err {
            SiteError::Metadata { locale, slug, .. } => {
                assert_eq!((locale.as_str(), slug.as_str()), ("en", "broken"));
            }
            other => panic!("expected metadata error, got {other:?}"),
        }
    }

    #[test]
    fn test_get_chapter_invalid_slug() {
        let err = library(abc_storage()).get_chapter("en", "../a").unwrap_err();

        assert!(err.is_invalid_path());
    }

    #[test]
    fn test_get_chapter_underscore_slug() {
        let storage = MockStorage::new().with_chapter("en", "_draft", chapter("Draft", 1));
        let library = library(storage);

        assert!(library.get_chapter("en", "_draft").unwrap().is_some());
    }

    // ========================================================================
    // Slugs
    // ========================================================================

    #[test]
    fn test_all_slugs_is_union() {
        let slugs = library(abc_storage()).all_slugs().unwrap();

        assert_eq!(slugs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_all_slugs_includes_single_locale_chapters() {
        let storage = MockStorage::new()
            .with_chapter("en", "a", chapter("A", 1))
            .with_chapter("lo", "lao-only", chapter("ລາວ", 1));

        let slugs = library(storage).all_slugs().unwrap();

        assert_eq!(slugs, vec!["a", "lao-only"]);
    }

    #[test]
    fn test_all_slugs_ignores_unconfigured_locales() {
        let storage = abc_storage().with_chapter("fr", "french", chapter("Fr", 1));

        let slugs = library(storage).all_slugs().unwrap();

        assert!(!slugs.contains(&"french".to_owned()));
    }

    #[test]
    fn test_all_slugs_empty_locale_contributes_nothing() {
        let storage = MockStorage::new().with_locale("lo");

        assert!(library(storage).all_slugs().unwrap().is_empty());
    }

    #[test]
    fn test_all_slugs_includes_malformed_units() {
        let storage = MockStorage::new().with_chapter("en", "broken", "---\nno end");

        assert_eq!(library(storage).all_slugs().unwrap(), vec!["broken"]);
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    #[test]
    fn test_resolve_adjacent_scenario() {
        let library = library(abc_storage());

        let middle = library.resolve_adjacent("en", "b").unwrap();
        assert_eq!(middle.prev.map(|c| c.slug), Some("a".to_owned()));
        assert_eq!(middle.next.map(|c| c.slug), Some("c".to_owned()));

        let first = library.resolve_adjacent("en", "a").unwrap();
        assert_eq!(first.prev, None);
        assert_eq!(first.next.map(|c| c.slug), Some("b".to_owned()));
    }

    #[test]
    fn test_resolve_adjacent_single_chapter_locale() {
        let adjacent = library(abc_storage()).resolve_adjacent("lo", "a").unwrap();

        assert_eq!(adjacent, Adjacent::default());
    }

    #[test]
    fn test_resolve_adjacent_propagates_failure() {
        let storage = abc_storage().with_failure("en", StorageErrorKind::PermissionDenied);

        assert!(library(storage).resolve_adjacent("en", "b").is_err());
    }

    #[test]
    fn test_chapter_with_navigation() {
        let found = library(abc_storage())
            .chapter_with_navigation("en", "c")
            .unwrap()
            .unwrap();

        assert_eq!(found.chapter.meta.title, "C");
        assert_eq!(found.prev.map(|c| c.slug), Some("b".to_owned()));
        assert_eq!(found.next, None);
    }

    #[test]
    fn test_chapter_with_navigation_missing() {
        let found = library(abc_storage()).chapter_with_navigation("lo", "b").unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn test_chapter_with_navigation_serializes() {
        let found = library(abc_storage())
            .chapter_with_navigation("en", "a")
            .unwrap()
            .unwrap();

        let json = serde_json::to_value(&found).unwrap();

        assert_eq!(json["chapter"]["slug"], "a");
        assert_eq!(json["chapter"]["content"], "# A\n");
        assert_eq!(json["prev"], serde_json::Value::Null);
        assert_eq!(json["next"]["slug"], "b");
    }

    // ========================================================================
    // Pages
    // ========================================================================

    #[test]
    fn test_page_renders_body() {
        let storage = MockStorage::new().with_chapter(
            "en",
            "intro",
            "---\ntitle: Intro\n---\n# Intro\n\n## First steps\n\nText.\n",
        );

        let page = library(storage).page("en", "intro").unwrap().unwrap();

        assert!(page.content.contains(r#"<h2 id="first-steps">First steps</h2>"#));
        assert_eq!(page.toc.read_through("first-steps"), vec!["first-steps"]);
        assert_eq!(page.meta.title, "Intro");
    }

    #[test]
    fn test_page_missing() {
        assert!(library(abc_storage()).page("en", "zzz").unwrap().is_none());
    }

    // ========================================================================
    // Locales
    // ========================================================================

    #[test]
    fn test_resolve_locale_fallback() {
        let library = library(abc_storage());

        assert_eq!(library.resolve_locale(Some("lo"), Some("en")), "lo");
        assert_eq!(library.resolve_locale(None, Some("lo")), "lo");
        assert_eq!(library.resolve_locale(Some(""), None), "en");
    }

    #[test]
    fn test_default_library_locales() {
        let library = Library::new(Arc::new(MockStorage::new()));

        assert_eq!(library.locales(), ["en".to_owned()]);
        assert_eq!(library.default_locale(), "en");
    }

    // ========================================================================
    // Filesystem integration
    // ========================================================================

    #[test]
    fn test_fs_library_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let en = temp_dir.path().join("en");
        let lo = temp_dir.path().join("lo");
        fs::create_dir_all(&en).unwrap();
        fs::create_dir_all(&lo).unwrap();
        fs::write(en.join("a.mdx"), chapter("A", 1)).unwrap();
        fs::write(en.join("b.mdx"), chapter("B", 2)).unwrap();
        fs::write(en.join("c.mdx"), chapter("C", 3)).unwrap();
        fs::write(lo.join("a.mdx"), chapter("ກ", 1)).unwrap();

        let storage = Arc::new(FsStorage::new(temp_dir.path().to_path_buf()));
        let library =
            Library::new(storage).with_locales(vec!["en".to_owned(), "lo".to_owned()], "en");

        assert_eq!(library.all_slugs().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(library.get_chapter("lo", "b").unwrap(), None);
        let adjacent = library.resolve_adjacent("en", "b").unwrap();
        assert_eq!(adjacent.prev.map(|c| c.slug), Some("a".to_owned()));
        assert_eq!(adjacent.next.map(|c| c.slug), Some("c".to_owned()));
    }

    #[test]
    fn test_fs_library_keeps_quoted_order_and_underscore_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let en = temp_dir.path().join("en");
        fs::create_dir_all(&en).unwrap();
        fs::write(en.join("intro.mdx"), "---\ntitle: Intro\norder: \"1\"\n---\n").unwrap();
        fs::write(en.join("next.mdx"), chapter("Next", 2)).unwrap();
        fs::write(en.join("_appendix.mdx"), chapter("Appendix", 9)).unwrap();

        let storage = Arc::new(FsStorage::new(temp_dir.path().to_path_buf()));
        let library = Library::new(storage);

        let chapters = library.list_chapters("en").unwrap();
        assert_eq!(slugs(&chapters), vec!["intro", "next", "_appendix"]);
        assert_eq!(library.all_slugs().unwrap(), vec!["_appendix", "intro", "next"]);
        let intro = library.get_chapter("en", "intro").unwrap().unwrap();
        assert_eq!(intro.meta.order, 1);
        let adjacent = library.resolve_adjacent("en", "_appendix").unwrap();
        assert_eq!(adjacent.prev.map(|c| c.slug), Some("next".to_owned()));
    }
}
