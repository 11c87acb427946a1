//! Render a pre-rendered HTML article body to styled ratatui lines.
//!
//! Article bodies arrive as markup generated by the static-site build
//! (headings, paragraphs, lists, code, links, images). The renderer walks
//! the tag stream event by event and emits one styled `Line` per display
//! line. It is deliberately forgiving: the input is HTML, not XML, so
//! mismatched end tags are accepted, and anything the parser chokes on
//! degrades to a tag-stripped plain-text rendering of the same body, so
//! one broken article never takes down the rest of the browser.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Convert an HTML article body to styled ratatui Lines.
/// Returns owned Lines for caching.
pub fn render_html(html: &str) -> Vec<Line<'static>> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut r = BodyRenderer::default();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(tag)) => r.open(&tag),
            Ok(Event::Empty(tag)) => {
                // Void elements: <br/>, <img .../>, <hr/>
                r.open(&tag);
                let name = tag.local_name().as_ref().to_ascii_lowercase();
                r.close(&name);
            }
            Ok(Event::End(tag)) => {
                let name = tag.local_name().as_ref().to_ascii_lowercase();
                r.close(&name);
            }
            Ok(Event::Text(text)) => {
                let decoded = match text.unescape() {
                    Ok(s) => s.into_owned(),
                    // Unknown entity or bad escape: keep the raw text
                    Err(_) => String::from_utf8_lossy(text.as_ref()).into_owned(),
                };
                r.text(&decoded);
            }
            Ok(_) => {} // Comments, CDATA, PIs, doctypes
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable article markup, falling back to plain text");
                return plain_fallback(html);
            }
        }
    }

    r.finish()
}

/// Streaming tag-to-lines state machine.
#[derive(Default)]
struct BodyRenderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    heading: bool,
    pre: bool,
    code: bool,
    emphasis: bool,
    strong: bool,
    quote: bool,
    list_depth: usize,
    link_href: Vec<String>,
}

impl BodyRenderer {
    fn open(&mut self, tag: &BytesStart<'_>) {
        let name = tag.local_name().as_ref().to_ascii_lowercase();
        match name.as_slice() {
            b"h1" | b"h2" | b"h3" | b"h4" | b"h5" | b"h6" => {
                self.flush();
                self.heading = true;
            }
            b"p" => {}
            b"pre" => {
                self.flush();
                self.pre = true;
            }
            b"code" => self.code = true,
            b"em" | b"i" => self.emphasis = true,
            b"strong" | b"b" => self.strong = true,
            b"blockquote" => {
                self.flush();
                self.quote = true;
            }
            b"ul" | b"ol" => {
                self.flush();
                self.list_depth += 1;
            }
            b"li" => {
                self.flush();
                let indent = "  ".repeat(self.list_depth.max(1));
                self.spans.push(Span::raw(format!("{}• ", indent)));
            }
            b"br" => self.flush(),
            b"hr" => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "────────",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            b"a" => {
                let href = attribute(tag, b"href");
                self.link_href.push(href.unwrap_or_default());
            }
            b"img" => {
                let src = attribute(tag, b"src").unwrap_or_default();
                self.spans.push(Span::styled(
                    format!("[Image: {}]", src),
                    Style::default().fg(Color::Blue),
                ));
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"h1" | b"h2" | b"h3" | b"h4" | b"h5" | b"h6" => {
                self.flush();
                self.heading = false;
                self.lines.push(Line::from(""));
            }
            b"p" => {
                self.flush();
                self.lines.push(Line::from(""));
            }
            b"pre" => {
                self.flush();
                self.pre = false;
                self.lines.push(Line::from(""));
            }
            b"code" => self.code = false,
            b"em" | b"i" => self.emphasis = false,
            b"strong" | b"b" => self.strong = false,
            b"blockquote" => {
                self.flush();
                self.quote = false;
                self.lines.push(Line::from(""));
            }
            b"ul" | b"ol" => {
                self.flush();
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.lines.push(Line::from(""));
                }
            }
            b"li" => self.flush(),
            b"a" => {
                if let Some(href) = self.link_href.pop() {
                    if !href.is_empty() {
                        self.spans.push(Span::styled(
                            format!(" ({})", href),
                            Style::default().fg(Color::Blue),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, s: &str) {
        if self.pre {
            // Preformatted text keeps its own line structure
            for (i, part) in s.split('\n').enumerate() {
                if i > 0 {
                    self.flush_always();
                }
                if !part.is_empty() {
                    self.spans.push(Span::styled(
                        part.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
            }
            return;
        }

        // Inter-tag whitespace is markup formatting, not content
        if s.trim().is_empty() {
            if !self.spans.is_empty() {
                self.push_space();
            }
            return;
        }

        let normalized = normalize_whitespace(s);
        self.spans
            .push(Span::styled(normalized, self.current_style()));
    }

    fn current_style(&self) -> Style {
        if self.code {
            Style::default().fg(Color::Yellow)
        } else if self.heading {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan)
        } else if self.strong {
            Style::default().add_modifier(Modifier::BOLD)
        } else if self.emphasis {
            Style::default().add_modifier(Modifier::ITALIC)
        } else if self.quote {
            Style::default().fg(Color::Gray)
        } else {
            Style::default()
        }
    }

    /// Append a single space unless one is already pending.
    fn push_space(&mut self) {
        if let Some(last) = self.spans.last() {
            if !last.content.ends_with(' ') {
                self.spans.push(Span::raw(" "));
            }
        }
    }

    /// Flush pending spans into a line, if any.
    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    /// Flush even when empty (blank line inside <pre>).
    fn flush_always(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        // Drop trailing blank lines left by the last block element
        while self
            .lines
            .last()
            .is_some_and(|l| l.spans.iter().all(|s| s.content.trim().is_empty()))
        {
            self.lines.pop();
        }
        self.lines
    }
}

/// Collapse runs of whitespace (including newlines) to single spaces.
fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(c);
            in_ws = false;
        }
    }
    out
}

/// Read an attribute's unescaped value from a start tag.
fn attribute(tag: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    tag.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Tag-stripping fallback for markup the event parser rejects.
///
/// Everything between `<` and `>` is dropped; the five predefined entities
/// are decoded. Coarse, but readable, and it always terminates.
fn plain_fallback(html: &str) -> Vec<Line<'static>> {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    text.lines()
        .map(|l| Line::from(l.trim_end().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_paragraph() {
        let lines = render_html("<p>Hello world</p>");
        assert_eq!(text_of(&lines), vec!["Hello world"]);
    }

    #[test]
    fn test_heading_styled_bold() {
        let lines = render_html("<h1>Title</h1><p>Body</p>");
        let texts = text_of(&lines);
        assert_eq!(texts[0], "Title");
        assert!(lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(texts.contains(&"Body".to_string()));
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let lines = render_html("<p>One</p><p>Two</p>");
        assert_eq!(text_of(&lines), vec!["One", "", "Two"]);
    }

    #[test]
    fn test_inline_styles() {
        let lines = render_html("<p>a <strong>bold</strong> and <em>italic</em> word</p>");
        let line = &lines[0];
        let bold = line
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "bold")
            .unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = line
            .spans
            .iter()
            .find(|s| s.content.as_ref() == "italic")
            .unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_list_items_get_bullets() {
        let lines = render_html("<ul><li>one</li><li>two</li></ul>");
        let texts = text_of(&lines);
        assert_eq!(texts[0], "  • one");
        assert_eq!(texts[1], "  • two");
    }

    #[test]
    fn test_pre_keeps_line_structure() {
        let lines = render_html("<pre>line one\nline two</pre>");
        let texts = text_of(&lines);
        assert_eq!(texts[0], "line one");
        assert_eq!(texts[1], "line two");
    }

    #[test]
    fn test_image_marker() {
        let lines = render_html(r#"<p><img src="cat.jpg" alt="a cat"/></p>"#);
        assert_eq!(text_of(&lines), vec!["[Image: cat.jpg]"]);
    }

    #[test]
    fn test_link_href_shown_after_text() {
        let lines = render_html(r#"<p><a href="https://example.com">link</a></p>"#);
        assert_eq!(text_of(&lines), vec!["link (https://example.com)"]);
    }

    #[test]
    fn test_entities_decoded() {
        let lines = render_html("<p>fish &amp; chips</p>");
        assert_eq!(text_of(&lines), vec!["fish & chips"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(render_html("").is_empty());
    }

    #[test]
    fn test_plain_text_without_tags() {
        let lines = render_html("just words");
        assert_eq!(text_of(&lines), vec!["just words"]);
    }

    #[test]
    fn test_mismatched_end_tags_accepted() {
        // HTML in the wild closes tags it never opened
        let lines = render_html("<p>text</div></p>");
        assert_eq!(text_of(&lines), vec!["text"]);
    }

    #[test]
    fn test_fallback_strips_tags() {
        let lines = plain_fallback("<p>fish &amp; <b>chips</b></p>");
        assert_eq!(text_of(&lines), vec!["fish & chips"]);
    }
}
