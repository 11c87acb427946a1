use crate::app::App;
use crate::util::sanitize;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

/// Render the full article view.
///
/// The grid's place is taken by a single block: title, body, published
/// date. Rendered body lines are cached per article index, so re-entering
/// a detail view (or scrolling it) never re-parses the markup.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    app.detail_visible_lines = area.height.saturating_sub(2) as usize;

    let Some(index) = app.detail_index else {
        let paragraph = Paragraph::new("No article selected")
            .block(Block::default().borders(Borders::ALL).title("Article"));
        f.render_widget(paragraph, area);
        return;
    };

    let body = body_lines(app, index);

    let Some(article) = app.articles.get(index) else {
        return;
    };

    let heading_style = app.style("detail_heading");
    let meta_style = app.style("detail_metadata");

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            sanitize(&article.title).into_owned(),
            heading_style,
        )),
        Line::from(Span::styled(
            format!("/{}", article.relative_path),
            meta_style,
        )),
        Line::from(""),
    ];
    lines.extend(body.iter().cloned());
    if !article.published_date.is_empty() {
        // Prefer a formatted calendar date; fall back to the raw string for
        // values like "unknown"
        let date = article
            .published()
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| article.published_date.clone());
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Published {}", date),
            meta_style,
        )));
    }

    // Scroll bounds must count display lines after wrapping, or the end of
    // a long-lined article becomes unreachable
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let total_lines: usize = lines
        .iter()
        .map(|line| wrapped_line_count(line, inner_width))
        .sum();
    app.clamp_detail_scroll(total_lines);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title("Article"),
        )
        .style(Style::default())
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset.min(u16::MAX as usize) as u16, 0));

    f.render_widget(paragraph, area);
}

/// How many display lines a single Line occupies after wrapping.
fn wrapped_line_count(line: &Line<'_>, viewport_width: usize) -> usize {
    let width = viewport_width.max(1);
    let line_width: usize = line
        .spans
        .iter()
        .map(|s| crate::util::display_width(&s.content))
        .sum();
    if line_width == 0 {
        1 // Empty lines still take one line
    } else {
        line_width.div_ceil(width)
    }
}

/// Rendered body lines for an article, via the LRU cache.
fn body_lines(app: &mut App, index: usize) -> Arc<Vec<Line<'static>>> {
    if let Some(cached) = app.body_cache.get(&index) {
        return Arc::clone(cached);
    }
    let html = app
        .articles
        .get(index)
        .map(|a| a.html.clone())
        .unwrap_or_default();
    let lines = Arc::new(super::body::render_html(&html));
    app.body_cache.put(index, Arc::clone(&lines));
    lines
}
