//! Previous/next chapter navigation.

use folio_storage::ChapterMeta;
use serde::Serialize;

use crate::error::SiteError;
use crate::library::Library;

/// Neighbours of a chapter in its locale's ordered listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    /// Chapter before, `None` for the first chapter.
    pub prev: Option<ChapterMeta>,
    /// Chapter after, `None` for the last chapter.
    pub next: Option<ChapterMeta>,
}

/// Find the neighbours of `slug` in an ordered chapter list.
///
/// The sequence is open-ended: the first chapter has no `prev` and the last
/// has no `next`. A slug that is not in the list has neither.
#[must_use]
pub fn adjacent_in(chapters: &[ChapterMeta], slug: &str) -> Adjacent {
    let Some(index) = chapters.iter().position(|c| c.slug == slug) else {
        return Adjacent::default();
    };

    Adjacent {
        prev: index
            .checked_sub(1)
            .and_then(|i| chapters.get(i))
            .cloned(),
        next: chapters.get(index + 1).cloned(),
    }
}

impl Library {
    /// Resolve previous/next chapters of `slug` within `locale`.
    ///
    /// Recomputed from [`list_chapters`](Self::list_chapters) on every call.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the listing cannot be read; a storage failure
    /// is never reported as missing navigation.
    pub fn resolve_adjacent(&self, locale: &str, slug: &str) -> Result<Adjacent, SiteError> {
        let chapters = self.list_chapters(locale)?;
        Ok(adjacent_in(&chapters, slug))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn meta(slug: &str, order: i64) -> ChapterMeta {
        ChapterMeta {
            title: slug.to_owned(),
            description: String::new(),
            order,
            slug: slug.to_owned(),
        }
    }

    fn slugs(adjacent: &Adjacent) -> (Option<&str>, Option<&str>) {
        (
            adjacent.prev.as_ref().map(|c| c.slug.as_str()),
            adjacent.next.as_ref().map(|c| c.slug.as_str()),
        )
    }

    #[test]
    fn test_adjacent_middle() {
        let chapters = vec![meta("a", 1), meta("b", 2), meta("c", 3)];

        assert_eq!(slugs(&adjacent_in(&chapters, "b")), (Some("a"), Some("c")));
    }

    #[test]
    fn test_adjacent_first_and_last() {
        let chapters = vec![meta("a", 1), meta("b", 2), meta("c", 3)];

        assert_eq!(slugs(&adjacent_in(&chapters, "a")), (None, Some("b")));
        assert_eq!(slugs(&adjacent_in(&chapters, "c")), (Some("b"), None));
    }

    #[test]
    fn test_adjacent_single_chapter() {
        let chapters = vec![meta("only", 0)];

        assert_eq!(adjacent_in(&chapters, "only"), Adjacent::default());
    }

    #[test]
    fn test_adjacent_absent_slug() {
        let chapters = vec![meta("a", 1), meta("b", 2)];

        assert_eq!(adjacent_in(&chapters, "zzz"), Adjacent::default());
        assert_eq!(adjacent_in(&[], "a"), Adjacent::default());
    }

    #[test]
    fn test_adjacent_serializes_nulls() {
        let json = serde_json::to_value(Adjacent::default()).unwrap();

        assert_eq!(json, serde_json::json!({"prev": null, "next": null}));
    }
}
