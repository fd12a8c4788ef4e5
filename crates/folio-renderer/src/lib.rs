//! Markdown chapter renderer for the Folio book engine.
//!
//! Turns a chapter body into HTML with stable heading anchors and a table of
//! contents. Anchors, TOC links and reading progress all come from one
//! slugification function ([`slugify`]) and one id pass ([`HeadingIds`]).
//!
//! # Example
//!
//! ```
//! use folio_renderer::{TableOfContents, render};
//!
//! let body = "# Variables\n\n## Declaring\n\n## Shadowing\n";
//! let rendered = render(body);
//!
//! assert!(rendered.html.contains(r#"<h2 id="declaring">"#));
//! assert_eq!(rendered.toc, TableOfContents::from_markdown(body));
//! assert_eq!(rendered.toc.read_through("shadowing"), vec!["declaring", "shadowing"]);
//! ```

mod renderer;
mod slug;
mod state;
mod toc;

pub use renderer::{MarkdownRenderer, RenderedChapter, render};
pub use slug::{HeadingIds, slugify};
pub use state::escape_html;
pub use toc::{TableOfContents, TocEntry};
