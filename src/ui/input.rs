//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current view and mode.

use crate::app::{App, AppEvent, Focus, ManifestState, View};
use crate::keybindings::Action as KbAction;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::loop_runner::spawn_manifest_load;
use super::Action;

/// Tiles moved per page step in the grid.
const GRID_PAGE: usize = 5;

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on current mode and view.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    // Before the manifest is available only quit and reload make sense
    match app.manifest_state {
        ManifestState::Loading => {
            if let KeyCode::Char('q') = code {
                return Ok(Action::Quit);
            }
            return Ok(Action::Continue);
        }
        ManifestState::Failed { .. } => {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),
                KeyCode::Char('r') => {
                    spawn_manifest_load(app, event_tx);
                }
                _ => {}
            }
            return Ok(Action::Continue);
        }
        ManifestState::Ready => {}
    }

    let action = app.keybindings.action_for_key(code, modifiers);
    match app.view {
        View::Grid => handle_grid_input(app, action, event_tx),
        View::Detail => handle_detail_input(app, action, event_tx),
    }
}

/// Handle input while the help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    if let KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') = code {
        app.show_help = false;
    }
    Action::Continue
}

/// Handle input in grid view (navbar + tiles panels).
fn handle_grid_input(
    app: &mut App,
    action: Option<KbAction>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match action {
        Some(KbAction::Quit) => return Ok(Action::Quit),
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::CycleFocus) => {
            app.focus = match app.focus {
                Focus::Navbar => Focus::Tiles,
                Focus::Tiles => Focus::Navbar,
            };
        }
        Some(KbAction::Select) => match app.focus {
            // A navbar entry behaves like a navbar link: push its path and
            // re-render the grid for it
            Focus::Navbar => {
                if let Some(item) = app.selected_nav_item() {
                    app.navigate(item.path);
                }
            }
            // A tile behaves like a tile click: swap in the detail view
            Focus::Tiles => app.enter_detail(),
        },
        Some(KbAction::HistoryBack) => app.history_back(),
        Some(KbAction::HistoryForward) => app.history_forward(),
        Some(KbAction::Reload) => {
            spawn_manifest_load(app, event_tx);
            app.set_status("Reloading manifest...");
        }
        Some(KbAction::Help) => app.show_help = true,
        Some(KbAction::ToggleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::Top) => match app.focus {
            Focus::Navbar => app.nav_jump_to(0),
            Focus::Tiles => app.selected_tile = 0,
        },
        Some(KbAction::Bottom) => match app.focus {
            Focus::Navbar => {
                let last = app.nav_tree().len().saturating_sub(1);
                app.nav_jump_to(last);
            }
            Focus::Tiles => {
                app.selected_tile = app.visible.len().saturating_sub(1);
            }
        },
        Some(KbAction::PageUp) => match app.focus {
            Focus::Navbar => {
                let target = app.selected_nav.saturating_sub(GRID_PAGE);
                app.nav_jump_to(target);
            }
            Focus::Tiles => {
                app.selected_tile = app.selected_tile.saturating_sub(GRID_PAGE);
            }
        },
        Some(KbAction::PageDown) => match app.focus {
            Focus::Navbar => {
                let target = app.selected_nav.saturating_add(GRID_PAGE);
                app.nav_jump_to(target);
            }
            Focus::Tiles => {
                if !app.visible.is_empty() {
                    let max_index = app.visible.len() - 1;
                    app.selected_tile = app.selected_tile.saturating_add(GRID_PAGE).min(max_index);
                }
            }
        },
        None => {}
    }
    Ok(Action::Continue)
}

/// Handle input in the detail view.
fn handle_detail_input(
    app: &mut App,
    action: Option<KbAction>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    let page = app.detail_visible_lines.max(1) / 2 + 1;

    match action {
        Some(KbAction::Quit) => return Ok(Action::Quit),
        Some(KbAction::NavDown) => app.scroll_down(1),
        Some(KbAction::NavUp) => app.scroll_up(1),
        Some(KbAction::PageDown) => app.scroll_down(page),
        Some(KbAction::PageUp) => app.scroll_up(page),
        Some(KbAction::Top) => app.scroll_offset = 0,
        // Clamped to the real end during the next render
        Some(KbAction::Bottom) => app.scroll_offset = usize::MAX,
        Some(KbAction::HistoryBack) => app.history_back(),
        Some(KbAction::HistoryForward) => app.history_forward(),
        Some(KbAction::Reload) => {
            spawn_manifest_load(app, event_tx);
            app.set_status("Reloading manifest...");
        }
        Some(KbAction::Help) => app.show_help = true,
        Some(KbAction::ToggleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::Select) | Some(KbAction::CycleFocus) | None => {}
    }
    Ok(Action::Continue)
}
