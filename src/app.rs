use crate::config::Config;
use crate::history::{History, ViewState};
use crate::keybindings::KeybindingRegistry;
use crate::manifest::{Article, ManifestError};
use crate::nav::{self, NavItem};
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::Result;
use lru::LruCache;
use ratatui::style::Style;
use ratatui::text::Line;
use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::time::Instant;

/// Number of rendered article bodies kept in the LRU cache.
const BODY_CACHE_SIZE: usize = 16;

// ============================================================================
// View and Focus Enums
// ============================================================================

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Grid,   // Navbar + filtered article tiles
    Detail, // Single article shown in place of the grid
}

/// Which panel has focus in Grid view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Navbar,
    Tiles,
}

/// Lifecycle of the one-shot manifest fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestState {
    Loading,
    Ready,
    Failed { error: String },
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks.
///
/// The manifest fetch is the only background task; its completion arrives
/// here as a single event, processed between input events by the main loop.
pub enum AppEvent {
    /// Manifest fetch finished.
    ///
    /// `generation` is the load generation at spawn time; a completion whose
    /// generation no longer matches (the user pressed reload meanwhile) is
    /// discarded.
    ManifestLoaded {
        generation: u64,
        result: Result<Vec<Article>, ManifestError>,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// All view state is explicit here and threaded through the input handlers;
/// nothing hides in closures or globals. The manifest itself is immutable
/// once loaded (`Arc<Vec<Article>>`), so article indices are stable
/// identifiers for the process lifetime.
pub struct App {
    pub http_client: reqwest::Client,
    pub manifest_url: String,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Keybindings
    pub keybindings: KeybindingRegistry,

    // Data
    pub articles: Arc<Vec<Article>>,
    pub manifest_state: ManifestState,

    // UI state
    pub view: View,
    pub focus: Focus,
    /// Active path prefix; empty means "show all".
    pub path: String,
    /// Manifest indices of the articles visible under `path`, manifest order.
    pub visible: Vec<usize>,
    /// Cursor position in the navbar tree.
    pub selected_nav: usize,
    /// Category whose submenu is currently open, if any.
    pub expanded: Option<String>,
    /// Cursor position in the visible tile list.
    pub selected_tile: usize,
    /// Manifest index of the article shown in Detail view.
    pub detail_index: Option<usize>,
    pub scroll_offset: usize,
    /// Viewport height of the detail body, updated during rendering.
    pub detail_visible_lines: usize,

    // Navigation history
    pub history: History,

    // Status message with expiry — Cow avoids allocation for static literals
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,

    /// Generation counter for manifest loads.
    ///
    /// Incremented each time a load is spawned; a completion carrying a
    /// stale generation is ignored so a reload cannot be overwritten by the
    /// fetch it replaced.
    pub load_generation: u64,

    /// Handle to the in-flight manifest load, for cancellation.
    pub load_handle: Option<tokio::task::JoinHandle<()>>,

    /// Rendered body lines per article index.
    ///
    /// Rendering a body is pure (html in, lines out) and the manifest is
    /// immutable, so entries never go stale; the cache only bounds memory.
    pub body_cache: LruCache<usize, Arc<Vec<Line<'static>>>>,

    /// Cached navbar tree; invalidated when `expanded` or the manifest changes.
    pub cached_nav_tree: Option<Vec<NavItem>>,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
}

impl App {
    pub fn new(manifest_url: String, config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(3))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let theme_variant = match ThemeVariant::from_str_name(&config.theme) {
            Some(v) => v,
            None => {
                tracing::warn!(theme = %config.theme, "Unknown theme name, falling back to dark");
                ThemeVariant::Dark
            }
        };

        let cache_size = NonZeroUsize::new(BODY_CACHE_SIZE).expect("cache size is non-zero");

        Ok(Self {
            http_client,
            manifest_url,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings: KeybindingRegistry::with_overrides(&config.keybindings),
            articles: Arc::new(Vec::new()),
            manifest_state: ManifestState::Loading,
            view: View::Grid,
            focus: Focus::Navbar,
            path: String::new(),
            visible: Vec::new(),
            selected_nav: 0,
            expanded: None,
            selected_tile: 0,
            detail_index: None,
            scroll_offset: 0,
            detail_visible_lines: 0,
            history: History::new(),
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            load_generation: 0,
            load_handle: None,
            body_cache: LruCache::new(cache_size),
            cached_nav_tree: None,
            show_help: false,
        })
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ------------------------------------------------------------------
    // Status line
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds).
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Navbar tree
    // ------------------------------------------------------------------

    /// Build the navbar tree, caching the result.
    pub fn build_nav_tree(&mut self) -> Vec<NavItem> {
        if let Some(ref cached) = self.cached_nav_tree {
            return cached.clone();
        }
        let tree = nav::nav_tree(&self.articles, self.expanded.as_deref());
        self.cached_nav_tree = Some(tree.clone());
        tree
    }

    /// Get the cached navbar tree, or build it fresh.
    ///
    /// For read-only callers (render functions) that cannot mutate App.
    pub fn nav_tree(&self) -> Cow<'_, [NavItem]> {
        match &self.cached_nav_tree {
            Some(cached) => Cow::Borrowed(cached.as_slice()),
            None => Cow::Owned(nav::nav_tree(&self.articles, self.expanded.as_deref())),
        }
    }

    /// Invalidate the cached navbar tree.
    ///
    /// Must be called after any mutation to `expanded` or `articles`.
    pub fn invalidate_nav_tree(&mut self) {
        self.cached_nav_tree = None;
    }

    /// Move the navbar cursor by one step, opening the submenu of the
    /// category the cursor lands on and closing any other.
    ///
    /// Hover semantics: resting on a category shows its subcategories,
    /// leaving it removes them. The tree is rebuilt after an expansion
    /// change and the cursor re-anchored by path, since expansion shifts
    /// indices.
    fn move_nav(&mut self, down: bool) {
        let tree = self.build_nav_tree();
        if tree.is_empty() {
            return;
        }

        let current = self.selected_nav.min(tree.len() - 1);
        let target = if down {
            (current + 1).min(tree.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        self.nav_jump_to(target);
    }

    /// Place the navbar cursor on a tree index, updating the open submenu.
    ///
    /// Expansion changes shift tree indices, so the cursor is re-anchored by
    /// the target's path after the rebuild.
    pub fn nav_jump_to(&mut self, index: usize) {
        let tree = self.build_nav_tree();
        if tree.is_empty() {
            return;
        }
        let target = index.min(tree.len() - 1);
        let target_path = tree[target].path.clone();

        let new_expanded = target_path
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if new_expanded != self.expanded {
            self.expanded = new_expanded;
            self.invalidate_nav_tree();
            let tree = self.build_nav_tree();
            self.selected_nav = tree
                .iter()
                .position(|item| item.path == target_path)
                .unwrap_or(0);
        } else {
            self.selected_nav = target;
        }
    }

    /// Re-anchor the navbar cursor onto `path` (after history navigation).
    fn sync_nav_cursor(&mut self, path: &str) {
        self.expanded = path
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self.invalidate_nav_tree();
        let tree = self.build_nav_tree();
        self.selected_nav = tree.iter().position(|item| item.path == path).unwrap_or(0);
    }

    /// The navbar item under the cursor.
    pub fn selected_nav_item(&self) -> Option<NavItem> {
        let tree = self.nav_tree();
        tree.get(self.selected_nav).cloned()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Recompute the visible tile set from the current path.
    fn refresh_visible(&mut self) {
        self.visible = nav::select_visible(&self.articles, &self.path);
        self.clamp_selections();
    }

    /// Navigate to a path prefix, pushing a history entry.
    pub fn navigate(&mut self, path: String) {
        self.history.push(ViewState::Grid { path: path.clone() });
        self.show_grid(path);
    }

    /// Enter the detail view for the tile under the cursor, pushing a
    /// history entry.
    pub fn enter_detail(&mut self) {
        let Some(&index) = self.visible.get(self.selected_tile) else {
            return;
        };
        self.history.push(ViewState::Detail { article: index });
        self.show_detail(index);
    }

    /// Step back in history. The entry is applied through the same path as
    /// forward navigation, so detail entries restore the detail view.
    pub fn history_back(&mut self) {
        match self.history.back().cloned() {
            Some(state) => self.apply_state(state),
            None => self.set_status("Start of history"),
        }
    }

    /// Step forward in history.
    pub fn history_forward(&mut self) {
        match self.history.forward().cloned() {
            Some(state) => self.apply_state(state),
            None => self.set_status("End of history"),
        }
    }

    /// Apply a history entry without pushing.
    ///
    /// The single place view state is restored from history; both back and
    /// forward funnel through here, and the entry itself always wins. A
    /// detail entry whose index no longer resolves (defensive only; the
    /// manifest is immutable) degrades to the unfiltered grid.
    pub fn apply_state(&mut self, state: ViewState) {
        match state {
            ViewState::Grid { path } => {
                self.view = View::Grid;
                self.sync_nav_cursor(&path);
                self.path = path;
                self.refresh_visible();
                self.selected_tile = 0;
                self.scroll_offset = 0;
            }
            ViewState::Detail { article } => {
                if article < self.articles.len() {
                    self.view = View::Detail;
                    self.detail_index = Some(article);
                    self.scroll_offset = 0;
                } else {
                    tracing::warn!(article, "History entry points past the manifest");
                    self.view = View::Grid;
                    self.path.clear();
                    self.refresh_visible();
                }
            }
        }
    }

    /// Show the grid for a path without touching history.
    fn show_grid(&mut self, path: String) {
        self.view = View::Grid;
        self.path = path;
        self.refresh_visible();
        self.selected_tile = 0;
        self.scroll_offset = 0;
    }

    /// Show the detail view for a manifest index without touching history.
    fn show_detail(&mut self, index: usize) {
        self.view = View::Detail;
        self.detail_index = Some(index);
        self.scroll_offset = 0;
    }

    /// The article shown in the detail view, bounds-checked.
    pub fn detail_article(&self) -> Option<&Article> {
        self.detail_index.and_then(|i| self.articles.get(i))
    }

    /// The article under the tile cursor, with its manifest index.
    pub fn selected_tile_article(&self) -> Option<(usize, &Article)> {
        let index = *self.visible.get(self.selected_tile)?;
        self.articles.get(index).map(|a| (index, a))
    }

    /// Location of the current view, matching the site's own URL scheme:
    /// `/{path}` for grids, `/{relative_path}/{title}.md` for details.
    pub fn location(&self) -> String {
        match self.view {
            View::Detail => self
                .detail_article()
                .map(Article::location)
                .unwrap_or_else(|| format!("/{}", self.path)),
            View::Grid => format!("/{}", self.path),
        }
    }

    // ------------------------------------------------------------------
    // Cursor movement
    // ------------------------------------------------------------------

    /// Move the cursor up in the focused panel.
    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Navbar => self.move_nav(false),
            Focus::Tiles => {
                self.selected_tile = self.selected_tile.saturating_sub(1);
            }
        }
    }

    /// Move the cursor down in the focused panel.
    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Navbar => self.move_nav(true),
            Focus::Tiles => {
                if !self.visible.is_empty() {
                    let max_index = self.visible.len() - 1;
                    self.selected_tile = self.selected_tile.saturating_add(1).min(max_index);
                }
            }
        }
    }

    /// Clamp all selection indices to valid ranges.
    pub fn clamp_selections(&mut self) {
        self.selected_tile = if self.visible.is_empty() {
            0
        } else {
            self.selected_tile.min(self.visible.len() - 1)
        };
        let tree_len = self.nav_tree().len();
        self.selected_nav = if tree_len == 0 {
            0
        } else {
            self.selected_nav.min(tree_len - 1)
        };
    }

    // ------------------------------------------------------------------
    // Detail scrolling
    // ------------------------------------------------------------------

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// Clamp the detail scroll offset so the viewport never runs past the
    /// end of the content.
    pub fn clamp_detail_scroll(&mut self, content_lines: usize) {
        let max_scroll = content_lines.saturating_sub(self.detail_visible_lines);
        self.scroll_offset = self.scroll_offset.min(max_scroll).min(u16::MAX as usize);
    }

    // ------------------------------------------------------------------
    // Manifest lifecycle
    // ------------------------------------------------------------------

    /// Install a freshly fetched manifest.
    ///
    /// Reload semantics match a browser page load: history and caches reset,
    /// the taxonomy is rebuilt, and the initial unfiltered grid is pushed as
    /// the first history entry.
    pub fn manifest_loaded(&mut self, articles: Vec<Article>) {
        self.articles = Arc::new(articles);
        self.manifest_state = ManifestState::Ready;
        self.expanded = None;
        self.selected_nav = 0;
        self.focus = Focus::Navbar;
        self.detail_index = None;
        self.body_cache.clear();
        self.invalidate_nav_tree();
        self.history.clear();
        self.history.push(ViewState::Grid {
            path: String::new(),
        });
        self.show_grid(String::new());
    }

    /// Record a failed manifest fetch for the error view.
    pub fn manifest_failed(&mut self, error: String) {
        self.manifest_state = ManifestState::Failed { error };
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort the in-flight manifest load on App drop so no orphaned task
/// outlives the event loop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted manifest load task on App drop");
        }
    }
}
