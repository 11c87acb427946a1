use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the navbar tree panel: "All", one entry per category, and the
/// open submenu's subcategory entries indented beneath their category.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Navbar;
    let tree = app.nav_tree();
    let selected = app.selected_nav.min(tree.len().saturating_sub(1));

    let style_selected = app.style("navbar_selected");
    let style_normal = app.style("navbar_normal");
    let style_count = app.style("navbar_count");

    let items: Vec<ListItem> = tree
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let indent = "  ".repeat(item.depth);
            let icon = if item.path.is_empty() {
                // "All" item
                ""
            } else if item.has_children {
                if app.expanded.as_deref() == Some(item.path.as_str()) {
                    "v "
                } else {
                    "> "
                }
            } else {
                "  "
            };

            let style = if i == selected {
                style_selected
            } else {
                style_normal
            };

            let mut spans = Vec::with_capacity(3);
            spans.push(Span::styled(format!("{}{}", indent, icon), style));
            spans.push(Span::styled(
                crate::util::sanitize(&item.label).into_owned(),
                style,
            ));
            spans.push(Span::styled(
                format!(" ({})", item.article_count),
                if i == selected { style } else { style_count },
            ));

            ListItem::new(Line::from(spans))
        })
        .collect();

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Browse"),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
