use crate::app::{App, Focus, ManifestState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar: location on the left, message or key hints on
/// the right.
///
/// The location line mirrors the site's own URL scheme: `/{path}` for
/// grids, `/{relative_path}/{title}.md` for detail views.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let hints: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.view {
            View::Grid => match app.focus {
                Focus::Navbar => {
                    Cow::Borrowed("[j/k]move [Enter]open [Tab]tiles [Esc]back [r]eload [?]help [q]uit")
                }
                Focus::Tiles => {
                    Cow::Borrowed("[j/k]move [Enter]read [Tab]navbar [Esc]back [?]help [q]uit")
                }
            },
            View::Detail => {
                Cow::Borrowed("[j/k]scroll [Ctrl+d/u]page [Esc]back [?]help [q]uit")
            }
        }
    };

    let location = match app.manifest_state {
        ManifestState::Ready => app.location(),
        _ => String::new(),
    };

    let style = app.style("status_bar");
    let location_width = (location.len() + 1).min((area.width / 2) as usize) as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(location_width), Constraint::Min(0)])
        .split(area);

    let location_bar =
        Paragraph::new(Line::from(Span::styled(location, app.style("location")))).style(style);
    f.render_widget(location_bar, chunks[0]);

    let hint_bar = Paragraph::new(Line::from(Span::raw(hints))).style(style);
    f.render_widget(hint_bar, chunks[1]);
}
