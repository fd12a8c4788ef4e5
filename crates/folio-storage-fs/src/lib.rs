//! Filesystem chapter storage for the Folio book engine.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](folio_storage::Storage) trait. Chapters live in one directory
//! per locale:
//!
//! ```text
//! content/
//! ├── en/
//! │   ├── introduction.mdx
//! │   └── variables.mdx
//! └── lo/
//!     └── introduction.mdx
//! ```
//!
//! The slug of a chapter is its file name without the extension. Files in a
//! locale are read in parallel; results keep file name order.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_storage::Storage;
//! use folio_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("content"));
//! let chapter = storage.read("en", "introduction")?;
//! ```

mod scanner;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use folio_storage::{
    MetadataIssue, RawChapter, ScanResult, Storage, StorageError, parse_chapter, validate_segment,
};
use rayon::prelude::*;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default chapter file extension.
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Filesystem storage implementation.
///
/// Reads `<content_dir>/<locale>/<slug>.<extension>` on every call; nothing
/// is cached between calls.
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Root directory holding one subdirectory per locale.
    content_dir: PathBuf,
    /// Chapter file extension without the leading dot.
    extension: String,
}

impl FsStorage {
    /// Create a new filesystem storage reading `.mdx` files.
    #[must_use]
    pub fn new(content_dir: PathBuf) -> Self {
        Self::with_extension(content_dir, DEFAULT_EXTENSION)
    }

    /// Create a new filesystem storage with a custom chapter extension.
    ///
    /// `extension` is given without the leading dot (`"md"`).
    #[must_use]
    pub fn with_extension(content_dir: PathBuf, extension: &str) -> Self {
        Self {
            content_dir,
            extension: extension.to_owned(),
        }
    }

    /// Resolve the directory of a locale after validating it.
    fn locale_dir(&self, locale: &str) -> Result<PathBuf, StorageError> {
        validate_segment(locale).map_err(|e| e.with_backend(BACKEND))?;
        Ok(self.content_dir.join(locale))
    }

    /// Resolve the file of a chapter after validating locale and slug.
    fn chapter_path(&self, locale: &str, slug: &str) -> Result<PathBuf, StorageError> {
        let dir = self.locale_dir(locale)?;
        validate_segment(slug).map_err(|e| e.with_backend(BACKEND))?;
        Ok(dir.join(format!("{slug}.{}", self.extension)))
    }
}

/// Read a file, treating a file that vanished since listing as absent.
fn read_text(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND)),
    }
}

impl Storage for FsStorage {
    fn scan(&self, locale: &str) -> Result<ScanResult, StorageError> {
        let dir = self.locale_dir(locale)?;
        if !dir.is_dir() {
            tracing::debug!(locale, dir = %dir.display(), "Locale directory not found");
            return Ok(ScanResult::default());
        }

        let units = scanner::list_units(&dir, &self.extension)
            .map_err(|e| StorageError::io(e, Some(dir.clone())).with_backend(BACKEND))?;

        let texts = units
            .par_iter()
            .map(|unit| read_text(&unit.path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = ScanResult::default();
        for (unit, text) in units.into_iter().zip(texts) {
            let Some(text) = text else {
                continue;
            };
            match parse_chapter(&text) {
                Ok((front_matter, body)) => result.chapters.push(RawChapter {
                    slug: unit.slug,
                    front_matter,
                    body: body.to_owned(),
                }),
                Err(error) => result.issues.push(MetadataIssue {
                    slug: unit.slug,
                    error,
                }),
            }
        }

        tracing::debug!(
            locale,
            chapters = result.chapters.len(),
            issues = result.issues.len(),
            "Scanned locale"
        );
        Ok(result)
    }

    fn read(&self, locale: &str, slug: &str) -> Result<Option<RawChapter>, StorageError> {
        let path = self.chapter_path(locale, slug)?;
        if !path.is_file() {
            return Ok(None);
        }

        let Some(text) = read_text(&path)? else {
            return Ok(None);
        };

        let (front_matter, body) = parse_chapter(&text)
            .map_err(|e| StorageError::metadata(e, path.clone()).with_backend(BACKEND))?;

        Ok(Some(RawChapter {
            slug: slug.to_owned(),
            front_matter,
            body: body.to_owned(),
        }))
    }

    fn locales(&self) -> Result<Vec<String>, StorageError> {
        let entries = match fs::read_dir(&self.content_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(
                    StorageError::io(e, Some(self.content_dir.clone())).with_backend(BACKEND)
                );
            }
        };

        let mut locales = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StorageError::io(e, Some(self.content_dir.clone())).with_backend(BACKEND)
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && !name.starts_with('.')
            {
                locales.push(name.to_owned());
            }
        }

        locales.sort();
        Ok(locales)
    }
}
