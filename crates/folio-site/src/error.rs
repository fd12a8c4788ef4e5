//! Site error type.

use folio_storage::{StorageError, StorageErrorKind};

/// Error returned by [`Library`](crate::Library) operations.
///
/// A chapter that does not exist is not an error; lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A directly requested chapter has front matter that cannot be parsed.
    #[error("Malformed front matter in chapter {locale}/{slug}")]
    Metadata {
        /// Locale of the chapter.
        locale: String,
        /// Slug of the chapter.
        slug: String,
        /// Underlying storage error carrying the parse failure.
        #[source]
        source: StorageError,
    },
    /// The backing store could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SiteError {
    /// Storage error kind behind this error.
    #[must_use]
    pub fn storage_kind(&self) -> StorageErrorKind {
        match self {
            Self::Metadata { source, .. } | Self::Storage(source) => source.kind(),
        }
    }

    /// Check if the request named an invalid locale or slug.
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        self.storage_kind() == StorageErrorKind::InvalidPath
    }
}
