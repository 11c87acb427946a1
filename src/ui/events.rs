//! Background task event processing.
//!
//! The manifest fetch is the application's only background task; its
//! completion funnels through here between input events.

use crate::app::{App, AppEvent};

/// Apply a background event to application state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ManifestLoaded { generation, result } => {
            if generation != app.load_generation {
                tracing::debug!(
                    generation,
                    current = app.load_generation,
                    "Discarding stale manifest load"
                );
                return;
            }
            app.load_handle = None;

            match result {
                Ok(articles) => {
                    let count = articles.len();
                    app.manifest_loaded(articles);
                    app.set_status(format!("Loaded {} articles", count));
                }
                Err(e) => {
                    tracing::warn!(error = %e, url = %app.manifest_url, "Manifest fetch failed");
                    app.manifest_failed(e.to_string());
                }
            }
        }
    }
}
