//! Chapter repository and navigation for Folio.
//!
//! This crate provides:
//! - [`Library`]: ordered chapter listings, direct lookups and the global slug set
//! - [`adjacent_in`] and [`Library::resolve_adjacent`]: previous/next navigation
//! - [`resolve_locale`]: request locale selection with a default fallback
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use folio_site::Library;
//! use folio_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
//! let library = Library::new(storage).with_locales(vec!["en".into(), "lo".into()], "en");
//!
//! let chapters = library.list_chapters("en")?;
//! let nav = library.chapter_with_navigation("en", "introduction")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod library;
mod locale;
mod navigation;

pub use error::SiteError;
pub use library::{ChapterPage, ChapterWithNav, Library};
pub use locale::{DEFAULT_LOCALE, resolve_locale};
pub use navigation::{Adjacent, adjacent_in};

// Re-export chapter and TOC types for convenience
pub use folio_renderer::{TableOfContents, TocEntry};
pub use folio_storage::{ChapterContent, ChapterMeta};
