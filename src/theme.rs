//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Navbar tree --
    pub navbar_normal: Style,
    pub navbar_selected: Style,
    pub navbar_count: Style,

    // -- Tile grid --
    pub tile_title: Style,
    pub tile_selected: Style,
    pub tile_blurb: Style,
    pub tile_tags: Style,
    pub tile_date: Style,
    pub tile_image_marker: Style,

    // -- Detail view --
    pub detail_heading: Style,
    pub detail_body: Style,
    pub detail_metadata: Style,
    pub detail_code: Style,
    pub detail_emphasis: Style,
    pub detail_strong: Style,
    pub detail_link: Style,
    pub detail_image: Style,
    pub detail_error: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub location: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            // Navbar
            navbar_normal: Style::default(),
            navbar_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            navbar_count: Style::default().fg(Color::DarkGray),

            // Tiles
            tile_title: Style::default().add_modifier(Modifier::BOLD),
            tile_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            tile_blurb: Style::default().fg(Color::Gray),
            tile_tags: Style::default().fg(Color::Cyan),
            tile_date: Style::default().fg(Color::DarkGray),
            tile_image_marker: Style::default().fg(Color::Blue),

            // Detail
            detail_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_code: Style::default().fg(Color::Yellow),
            detail_emphasis: Style::default().add_modifier(Modifier::ITALIC),
            detail_strong: Style::default().add_modifier(Modifier::BOLD),
            detail_link: Style::default().fg(Color::Blue),
            detail_image: Style::default().fg(Color::Blue),
            detail_error: Style::default().fg(Color::Red),

            // Chrome
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            location: Style::default().fg(Color::Cyan),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            navbar_normal: Style::default().fg(Color::Black),
            navbar_selected: Style::default().bg(Color::Blue).fg(Color::White),
            navbar_count: Style::default().fg(Color::DarkGray),

            tile_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tile_selected: Style::default().bg(Color::Blue).fg(Color::White),
            tile_blurb: Style::default().fg(Color::DarkGray),
            tile_tags: Style::default().fg(Color::Blue),
            tile_date: Style::default().fg(Color::DarkGray),
            tile_image_marker: Style::default().fg(Color::Blue),

            detail_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_code: Style::default().fg(Color::DarkGray),
            detail_emphasis: Style::default().add_modifier(Modifier::ITALIC),
            detail_strong: Style::default().add_modifier(Modifier::BOLD),
            detail_link: Style::default().fg(Color::Blue),
            detail_image: Style::default().fg(Color::Blue),
            detail_error: Style::default().fg(Color::Red),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            location: Style::default().fg(Color::Blue),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"detail_heading"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 22] = [
    "navbar_normal",
    "navbar_selected",
    "navbar_count",
    "tile_title",
    "tile_selected",
    "tile_blurb",
    "tile_tags",
    "tile_date",
    "tile_image_marker",
    "detail_heading",
    "detail_body",
    "detail_metadata",
    "detail_code",
    "detail_emphasis",
    "detail_strong",
    "detail_link",
    "detail_image",
    "detail_error",
    "status_bar",
    "location",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 22] = [
            p.navbar_normal,
            p.navbar_selected,
            p.navbar_count,
            p.tile_title,
            p.tile_selected,
            p.tile_blurb,
            p.tile_tags,
            p.tile_date,
            p.tile_image_marker,
            p.detail_heading,
            p.detail_body,
            p.detail_metadata,
            p.detail_code,
            p.detail_emphasis,
            p.detail_strong,
            p.detail_link,
            p.detail_image,
            p.detail_error,
            p.status_bar,
            p.location,
            p.panel_border,
            p.panel_border_focused,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_selection_styles() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.tile_selected,
            Style::default().bg(Color::DarkGray).fg(Color::White)
        );
        assert_eq!(
            palette.panel_border_focused,
            Style::default().fg(Color::Cyan)
        );
    }

    #[test]
    fn dark_palette_status_bar() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.status_bar,
            Style::default().bg(Color::DarkGray).fg(Color::White)
        );
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.tile_selected, light.tile_selected);
        assert_ne!(dark.navbar_selected, light.navbar_selected);
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycles() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("tile_selected"), palette.tile_selected);
        assert_eq!(sm.resolve("detail_heading"), palette.detail_heading);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn role_names_count_matches_palette_fields() {
        // Keeps ROLE_NAMES in sync with the palette: adding a field without
        // a name shows up as a length mismatch in from_palette.
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
    }
}
