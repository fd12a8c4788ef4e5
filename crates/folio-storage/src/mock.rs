//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::chapter::{MetadataIssue, RawChapter, ScanResult};
use crate::front_matter::parse_chapter;
use crate::storage::{Storage, StorageError, StorageErrorKind, validate_segment};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Holds raw content units in memory, keyed by locale, in insertion order.
/// Units go through the same front matter parser as real backends.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_chapter("en", "intro", "---\ntitle: Intro\norder: 1\n---\nBody")
///     .with_chapter("lo", "intro", "---\ntitle: ບົດນຳ\n---\nBody");
///
/// let scan = storage.scan("en").unwrap();
/// let chapter = storage.read("lo", "intro").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    units: RwLock<BTreeMap<String, Vec<(String, String)>>>,
    failures: RwLock<HashMap<String, StorageErrorKind>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw content unit to a locale.
    ///
    /// Adding a slug twice replaces the earlier text in place.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_chapter(
        self,
        locale: impl Into<String>,
        slug: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let slug = slug.into();
        let text = text.into();
        {
            let mut units = self.units.write().unwrap();
            let entries = units.entry(locale.into()).or_default();
            match entries.iter_mut().find(|(s, _)| *s == slug) {
                Some(entry) => entry.1 = text,
                None => entries.push((slug, text)),
            }
        }
        self
    }

    /// Register an empty locale namespace.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_locale(self, locale: impl Into<String>) -> Self {
        self.units.write().unwrap().entry(locale.into()).or_default();
        self
    }

    /// Make every operation on `locale` fail with the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, locale: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.failures.write().unwrap().insert(locale.into(), kind);
        self
    }

    fn check_failure(&self, locale: &str) -> Result<(), StorageError> {
        match self.failures.read().unwrap().get(locale) {
            Some(kind) => Err(StorageError::new(*kind)
                .with_path(locale)
                .with_backend(BACKEND)),
            None => Ok(()),
        }
    }
}

impl Storage for MockStorage {
    fn scan(&self, locale: &str) -> Result<ScanResult, StorageError> {
        validate_segment(locale).map_err(|e| e.with_backend(BACKEND))?;
        self.check_failure(locale)?;

        let units = self.units.read().unwrap();
        let mut result = ScanResult::default();
        for (slug, text) in units.get(locale).into_iter().flatten() {
            match parse_chapter(text) {
                Ok((front_matter, body)) => result.chapters.push(RawChapter {
                    slug: slug.clone(),
                    front_matter,
                    body: body.to_owned(),
                }),
                Err(error) => result.issues.push(MetadataIssue {
                    slug: slug.clone(),
                    error,
                }),
            }
        }
        Ok(result)
    }

    fn read(&self, locale: &str, slug: &str) -> Result<Option<RawChapter>, StorageError> {
        validate_segment(locale).map_err(|e| e.with_backend(BACKEND))?;
        validate_segment(slug).map_err(|e| e.with_backend(BACKEND))?;
        self.check_failure(locale)?;

        let units = self.units.read().unwrap();
        let Some((_, text)) = units
            .get(locale)
            .and_then(|entries| entries.iter().find(|(s, _)| s == slug))
        else {
            return Ok(None);
        };

        let (front_matter, body) = parse_chapter(text).map_err(|e| {
            StorageError::metadata(e, PathBuf::from(locale).join(slug)).with_backend(BACKEND)
        })?;

        Ok(Some(RawChapter {
            slug: slug.to_owned(),
            front_matter,
            body: body.to_owned(),
        }))
    }

    fn locales(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.units.read().unwrap().keys().cloned().collect())
    }
}
