//! State structs tracking context during event processing.

use pulldown_cmark::{Alignment, HeadingLevel};

use crate::slug::HeadingIds;
use crate::toc::TocEntry;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    /// Language from the fence info string (e.g., "rust", "python").
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.buffer.push('\n');
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Alignment style attribute for the current cell.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// State for capturing image alt text.
///
/// Images nest (an image inside a link inside an image's alt is legal
/// Markdown), so depth is tracked rather than a flag.
#[derive(Default)]
pub(crate) struct ImageState {
    depth: usize,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt_text.clear();
        }
        self.depth += 1;
    }

    /// End an image; returns the alt text once the outermost image closes.
    pub(crate) fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        (self.depth == 0).then(|| std::mem::take(&mut self.alt_text))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Heading levels included in the table of contents.
const TOC_LEVELS: std::ops::RangeInclusive<u8> = 2..=4;

/// A heading completed by [`HeadingState::complete`].
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// State for heading text capture, id assignment and TOC collection.
///
/// Shared by the renderer and
/// [`TableOfContents::from_markdown`](crate::TableOfContents::from_markdown),
/// so both walk headings identically.
#[derive(Default)]
pub(crate) struct HeadingState {
    current_level: Option<u8>,
    /// Plain heading text, used for the id and the TOC title.
    text: String,
    /// Heading HTML with inline formatting.
    html: String,
    ids: HeadingIds,
    toc: Vec<TocEntry>,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start(&mut self, level: HeadingLevel) {
        self.current_level = Some(heading_level_to_num(level));
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    /// Complete the current heading, assign its id and record it in the TOC.
    pub(crate) fn complete(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let title = text.trim();
        let id = self.ids.assign(title);

        if TOC_LEVELS.contains(&level) {
            self.toc.push(TocEntry {
                level,
                title: title.to_owned(),
                id: id.clone(),
            });
        }

        Some(CompletedHeading {
            level,
            id,
            html: std::mem::take(&mut self.html),
        })
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
