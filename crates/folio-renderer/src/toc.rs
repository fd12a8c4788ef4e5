//! Table of contents extraction and reading progress.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::renderer::parser_options;
use crate::state::{HeadingState, ImageState};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (2-4).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor id, identical to the rendered heading's `id`.
    pub id: String,
}

/// Ordered table of contents of a chapter body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TableOfContents {
    entries: Vec<TocEntry>,
}

impl TableOfContents {
    /// Build a table of contents from entries in document order.
    #[must_use]
    pub fn new(entries: Vec<TocEntry>) -> Self {
        Self { entries }
    }

    /// Extract level 2-4 headings from a Markdown body.
    ///
    /// Headings inside code blocks are not headings and are ignored. Ids are
    /// assigned over every heading of the document, in the same pass the
    /// renderer uses, so they match rendered anchors.
    #[must_use]
    pub fn from_markdown(markdown: &str) -> Self {
        let mut heading = HeadingState::default();
        let mut image = ImageState::default();

        for event in Parser::new_ext(markdown, parser_options()) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => heading.start(level),
                Event::End(TagEnd::Heading(_)) => {
                    heading.complete();
                }
                Event::Start(Tag::Image { .. }) => image.start(),
                Event::End(TagEnd::Image) => {
                    image.end();
                }
                Event::Text(text) | Event::Code(text)
                    if heading.is_active() && !image.is_active() =>
                {
                    heading.push_text(&text);
                }
                _ => {}
            }
        }

        Self::new(heading.take_toc())
    }

    /// Entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Check if the chapter has no TOC headings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by anchor id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TocEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Ids of every entry up to and including `id`.
    ///
    /// This is the "already read" set when the reader's viewport is at the
    /// heading `id`. Unknown ids yield an empty list.
    #[must_use]
    pub fn read_through(&self, id: &str) -> Vec<&str> {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => self.entries[..=index]
                .iter()
                .map(|e| e.id.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}
