//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the appropriate
//! view based on application state.

use crate::app::{App, ManifestState, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{detail, grid, help, navbar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Frames of the loading spinner animation.
pub(super) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render dispatch function.
///
/// Routes to the appropriate view renderer based on current application
/// state. Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Minimum terminal size check for usable UI
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    match &app.manifest_state {
        ManifestState::Loading => render_loading(f, app),
        ManifestState::Failed { error } => render_error(f, app, &error.clone()),
        ManifestState::Ready => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(f.area());

            match app.view {
                View::Grid => render_grid_view(f, app, chunks[0]),
                View::Detail => detail::render(f, app, chunks[0]),
            }
            status::render(f, app, chunks[1]);
        }
    }

    // Render help overlay on top of any view when active
    if app.show_help {
        help::render(f, app);
    }
}

/// Render the browse layout: navbar tree on the left, tiles on the right.
fn render_grid_view(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(area);

    navbar::render(f, app, chunks[0]);
    grid::render(f, app, chunks[1]);
}

/// Render the startup screen while the manifest is being fetched.
fn render_loading(f: &mut Frame, app: &App) {
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Loading manifest...", spinner),
            app.style("detail_metadata"),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.manifest_url.clone(),
            app.style("location"),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("folio"));
    f.render_widget(paragraph, f.area());
}

/// Render the manifest fetch failure screen.
fn render_error(f: &mut Frame, app: &App, error: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Failed to load manifest",
            app.style("detail_error"),
        )),
        Line::from(""),
        Line::from(Span::raw(error.to_string())),
        Line::from(""),
        Line::from(Span::styled(
            app.manifest_url.clone(),
            app.style("location"),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[r]etry  [q]uit",
            app.style("detail_metadata"),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("folio"));
    f.render_widget(paragraph, f.area());
}
