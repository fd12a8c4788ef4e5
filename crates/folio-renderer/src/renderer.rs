//! Markdown to HTML rendering.

use pulldown_cmark::{BlockQuoteKind, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, escape_html};
use crate::toc::TableOfContents;

/// Result of rendering a chapter body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedChapter {
    /// Rendered HTML.
    pub html: String,
    /// Level 2-4 headings, with ids matching the rendered anchors.
    pub toc: TableOfContents,
}

/// Parser options shared by rendering and TOC extraction.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a chapter body to HTML.
///
/// Shorthand for [`MarkdownRenderer::new`] followed by
/// [`render`](MarkdownRenderer::render).
#[must_use]
pub fn render(markdown: &str) -> RenderedChapter {
    MarkdownRenderer::new().render(markdown)
}

/// Event-driven HTML renderer for chapter bodies.
///
/// Output conventions:
/// - every heading gets an `id` from [`HeadingIds`](crate::HeadingIds)
/// - fenced code blocks carry `data-language` on `<pre>`
/// - tables are wrapped in `<div class="table-wrapper">`
/// - images load lazily
/// - links starting with `http` open in a new tab
///
/// Raw HTML and MDX component tags are passed through untouched.
#[derive(Default)]
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    /// Pending image (src, title) waiting for its alt text.
    pending_images: Vec<(String, String)>,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            ..Self::default()
        }
    }

    /// Render Markdown text, consuming the renderer.
    #[must_use]
    pub fn render(mut self, markdown: &str) -> RenderedChapter {
        for event in Parser::new_ext(markdown, parser_options()) {
            self.process_event(event);
        }

        RenderedChapter {
            html: self.output,
            toc: TableOfContents::new(self.heading.take_toc()),
        }
    }

    /// Push content to the heading buffer when inside a heading, else to output.
    ///
    /// Markup inside image alt text is dropped.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => {
                if self.code.is_active() {
                    self.code.push_newline();
                } else if self.image.is_active() {
                    self.image.push_str(" ");
                } else {
                    self.push_inline("\n");
                }
            }
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" disabled checked>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known
                self.heading.start(level);
            }
            Tag::BlockQuote(kind) => match kind {
                Some(kind) => {
                    self.output.push_str(r#"<blockquote class="alert alert-"#);
                    self.output.push_str(alert_class(kind));
                    self.output.push_str(r#"">"#);
                }
                None => self.output.push_str("<blockquote>"),
            },
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code.start(language);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    self.output.push_str(r#"<ol start=""#);
                    self.output.push_str(&n.to_string());
                    self.output.push_str(r#"">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str(r#"<div class="table-wrapper"><table>"#);
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let cell = if self.table.is_in_head() { "<th" } else { "<td" };
                self.output.push_str(cell);
                self.output.push_str(self.table.current_alignment_style());
                self.output.push('>');
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let link = link_open_tag(&dest_url, &title);
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the matching end tag
                self.image.start();
                self.pending_images
                    .push((dest_url.into_string(), title.into_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete() {
                    let level = heading.level;
                    self.output.push_str(&format!(
                        r#"<h{level} id="{}">{}</h{level}>"#,
                        escape_html(&heading.id),
                        heading.html.trim()
                    ));
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (language, content) = self.code.end();
                self.output.push_str(&code_block(language.as_deref(), &content));
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table></div>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let src_title = self.pending_images.pop();
                if let (Some(alt), Some((src, title))) = (self.image.end(), src_title) {
                    let img = image_tag(&src, &alt, &title);
                    self.push_inline(&img);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let html = format!("<code>{}</code>", escape_html(code));
        self.push_inline(&html);
    }
}

fn alert_class(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}

/// Check whether a link leaves the site.
fn is_external(url: &str) -> bool {
    url.starts_with("http")
}

fn link_open_tag(url: &str, title: &str) -> String {
    let mut tag = format!(r#"<a href="{}""#, escape_html(url));
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, escape_html(title)));
    }
    if is_external(url) {
        tag.push_str(r#" target="_blank" rel="noopener noreferrer""#);
    }
    tag.push('>');
    tag
}

fn image_tag(src: &str, alt: &str, title: &str) -> String {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    format!(
        r#"<img src="{}"{title_attr} alt="{}" loading="lazy">"#,
        escape_html(src),
        escape_html(alt)
    )
}

fn code_block(language: Option<&str>, content: &str) -> String {
    match language {
        Some(lang) => {
            let lang = escape_html(lang);
            format!(
                r#"<pre data-language="{lang}"><code class="language-{lang}">{}</code></pre>"#,
                escape_html(content)
            )
        }
        None => format!("<pre><code>{}</code></pre>", escape_html(content)),
    }
}
