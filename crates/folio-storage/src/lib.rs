//! Chapter storage abstraction for the Folio book engine.
//!
//! This crate provides a [`Storage`] trait for reading chapters from a
//! locale-partitioned backing store. Each locale is an independent namespace
//! of named content units; each unit is a YAML front-matter block followed by
//! a Markdown body.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, and `locales()` methods
//! - [`RawChapter`], [`ChapterMeta`] and [`ChapterContent`] data types
//! - [`parse_chapter`] for splitting front matter from the body
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `folio-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use folio_storage::Storage;
//! use folio_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new("content".into());
//! let scan = storage.scan("en")?;
//! for chapter in &scan.chapters {
//!     println!("{}: {}", chapter.slug, chapter.meta().title);
//! }
//! ```

mod chapter;
mod front_matter;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use chapter::{ChapterContent, ChapterMeta, MetadataIssue, RawChapter, ScanResult};
pub use front_matter::{FrontMatter, MetadataError, parse_chapter};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, validate_segment};
