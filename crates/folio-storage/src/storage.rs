//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for reading locale-partitioned chapters,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Naming Convention
//!
//! Storage methods take a `locale` and a `slug`, never file paths:
//! - `locale` names a namespace (e.g., `"en"`, `"lo"`)
//! - `slug` names a chapter inside it (e.g., `"intro"`)
//!
//! Both must be single path segments, see [`validate_segment`]. Backends map
//! them to their internal layout.

use std::path::{Path, PathBuf};

use crate::chapter::{RawChapter, ScanResult};
use crate::front_matter::MetadataError;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Locale or slug is not a valid single segment.
    InvalidPath,
    /// Front matter of a content unit could not be parsed.
    InvalidMetadata,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend identifier (e.g., "Fs", "Mock").
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create an invalid metadata error wrapping the parse failure.
    #[must_use]
    pub fn metadata(err: MetadataError, path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidMetadata)
            .with_path(path)
            .with_source(err)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidMetadata => "Invalid metadata",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Check that a locale or slug is a single, visible path segment.
///
/// Rejects empty values, `.` and `..`, anything containing a path separator
/// or NUL, and names starting with `.`. Backends call this before touching
/// their namespace so that a request parameter can never escape it.
///
/// # Errors
///
/// Returns a [`StorageErrorKind::InvalidPath`] error for rejected values.
pub fn validate_segment(value: &str) -> Result<(), StorageError> {
    let invalid = value.is_empty()
        || value.starts_with('.')
        || value.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidPath).with_path(value));
    }
    Ok(())
}

/// Storage abstraction for locale-partitioned chapters.
///
/// Every call reads the backing store afresh. Implementations hold no
/// per-request state, so a single instance can be shared across threads.
pub trait Storage: Send + Sync {
    /// Read every content unit of a locale in enumeration order.
    ///
    /// A locale without a namespace in the backing store yields an empty
    /// [`ScanResult`]. Units whose front matter cannot be parsed are reported
    /// in [`ScanResult::issues`] instead of failing the scan.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the locale is not a valid segment or the
    /// backing store cannot be read.
    fn scan(&self, locale: &str) -> Result<ScanResult, StorageError>;

    /// Read a single chapter.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(chapter))` - the chapter exists and was parsed
    /// - `Ok(None)` - no content unit with this slug exists in the locale
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on invalid segments, I/O failure, or
    /// [`StorageErrorKind::InvalidMetadata`] when the front matter is malformed.
    fn read(&self, locale: &str, slug: &str) -> Result<Option<RawChapter>, StorageError>;

    /// List locale namespaces present in the backing store, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be enumerated.
    fn locales(&self) -> Result<Vec<String>, StorageError>;
}
