use crate::app::{App, Focus};
use crate::manifest::Article;
use crate::util::{sanitize, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the article tile list for the active path.
///
/// Each tile is a three-line item: title row (image marker, title, date),
/// blurb row, tag row. Tiles follow manifest order; there is no sorting.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Tiles;

    let items: Vec<ListItem> = if app.visible.is_empty() {
        vec![ListItem::new("No articles")]
    } else {
        app.visible
            .iter()
            .enumerate()
            .filter_map(|(i, &index)| {
                let article = app.articles.get(index)?;
                Some(tile(app, article, i == app.selected_tile, area.width))
            })
            .collect()
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = if app.path.is_empty() {
        format!("Articles ({})", app.visible.len())
    } else {
        format!("Articles - /{} ({})", app.path, app.visible.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    let mut state = ListState::default().with_selected(Some(app.selected_tile));
    f.render_stateful_widget(list, area, &mut state);
}

/// Build one article tile.
fn tile(app: &App, article: &Article, selected: bool, panel_width: u16) -> ListItem<'static> {
    let text_width = panel_width.saturating_sub(4) as usize;

    let title_style = if selected {
        app.style("tile_selected")
    } else {
        app.style("tile_title")
    };

    // Title row: optional image marker, title, published date
    let mut title_spans = Vec::with_capacity(3);
    if article.random_image.is_some() {
        title_spans.push(Span::styled("▣ ", app.style("tile_image_marker")));
    }
    let marker_width = if article.random_image.is_some() { 2 } else { 0 };
    let date_width = article.published_date.len() + 2;
    let title_max = text_width.saturating_sub(marker_width + date_width);
    title_spans.push(Span::styled(
        truncate_to_width(&sanitize(&article.title), title_max).into_owned(),
        title_style,
    ));
    if !article.published_date.is_empty() {
        title_spans.push(Span::styled(
            format!("  {}", article.published_date),
            app.style("tile_date"),
        ));
    }

    let mut lines = vec![Line::from(title_spans)];

    // Blurb row
    if !article.quick_blurb.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&sanitize(&article.quick_blurb), text_width).into_owned(),
            app.style("tile_blurb"),
        )));
    }

    // Tag row
    if !article.tags.is_empty() {
        let tags = article
            .tags
            .iter()
            .map(|t| sanitize(t).into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            truncate_to_width(&tags, text_width).into_owned(),
            app.style("tile_tags"),
        )));
    }

    // Separator between tiles
    lines.push(Line::from(""));

    ListItem::new(lines)
}
