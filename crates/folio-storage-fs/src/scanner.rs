//! Content unit discovery by directory listing.
//!
//! Separates the discovery phase (finding files) from the loading phase
//! (reading and parsing). The scanner only identifies files that form
//! chapters, returning lightweight references for `FsStorage` to load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reference to a chapter file. No content is read at this stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UnitRef {
    /// Slug derived from the file stem.
    pub slug: String,
    /// Full path to the content file.
    pub path: PathBuf,
}

/// List chapter files of one locale directory, sorted by file name.
///
/// Only regular files with the given extension count. Hidden (`.`) files and
/// subdirectories are skipped.
pub(crate) fn list_units(dir: &Path, extension: &str) -> io::Result<Vec<UnitRef>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let path = entry.path();

        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        if !path.extension().is_some_and(|e| e == extension) || !path.is_file() {
            continue;
        }

        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::debug!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };

        entries.push((name, slug.to_owned(), path));
    }

    // Byte-wise file name order; chapters sharing an `order` keep it.
    entries.sort_by(|(a, _, _), (b, _, _)| a.cmp(b));

    Ok(entries
        .into_iter()
        .map(|(_, slug, path)| UnitRef { slug, path })
        .collect())
}
