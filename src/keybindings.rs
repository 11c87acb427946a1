//! Keybinding registry: maps key presses to semantic actions.
//!
//! Defaults cover the whole keymap; the `[keybindings]` table in the config
//! file can rebind any action by name. A config override binds its key to
//! the named action, replacing whatever that key previously did.

use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Semantic input actions, interpreted per view by the input dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NavUp,
    NavDown,
    /// Activate the entry under the cursor (navbar entry or tile).
    Select,
    /// Switch focus between the navbar and the tile grid.
    CycleFocus,
    HistoryBack,
    HistoryForward,
    /// Re-fetch the manifest (fresh page load).
    Reload,
    Help,
    ToggleTheme,
    Top,
    Bottom,
    PageUp,
    PageDown,
}

impl Action {
    /// Parse an action name as it appears in the config file.
    fn from_config_name(name: &str) -> Option<Self> {
        match name {
            "quit" => Some(Self::Quit),
            "nav_up" => Some(Self::NavUp),
            "nav_down" => Some(Self::NavDown),
            "select" => Some(Self::Select),
            "cycle_focus" => Some(Self::CycleFocus),
            "history_back" => Some(Self::HistoryBack),
            "history_forward" => Some(Self::HistoryForward),
            "reload" => Some(Self::Reload),
            "help" => Some(Self::Help),
            "toggle_theme" => Some(Self::ToggleTheme),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "page_up" => Some(Self::PageUp),
            "page_down" => Some(Self::PageDown),
            _ => None,
        }
    }
}

/// A single bindable key: code plus modifiers.
type Key = (KeyCode, KeyModifiers);

/// Registry of key → action bindings with config-file overrides.
#[derive(Debug, Clone)]
pub struct KeybindingRegistry {
    bindings: HashMap<Key, Action>,
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingRegistry {
    /// Build the default keymap.
    pub fn new() -> Self {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let defaults: &[(KeyCode, KeyModifiers, Action)] = &[
            (KeyCode::Char('q'), none, Action::Quit),
            (KeyCode::Char('j'), none, Action::NavDown),
            (KeyCode::Down, none, Action::NavDown),
            (KeyCode::Char('k'), none, Action::NavUp),
            (KeyCode::Up, none, Action::NavUp),
            (KeyCode::Enter, none, Action::Select),
            (KeyCode::Tab, none, Action::CycleFocus),
            (KeyCode::Char('['), none, Action::HistoryBack),
            (KeyCode::Backspace, none, Action::HistoryBack),
            (KeyCode::Esc, none, Action::HistoryBack),
            (KeyCode::Char(']'), none, Action::HistoryForward),
            (KeyCode::Char('r'), none, Action::Reload),
            (KeyCode::Char('?'), none, Action::Help),
            (KeyCode::Char('t'), none, Action::ToggleTheme),
            (KeyCode::Char('g'), none, Action::Top),
            (KeyCode::Char('G'), none, Action::Bottom),
            (KeyCode::Char('u'), ctrl, Action::PageUp),
            (KeyCode::Char('d'), ctrl, Action::PageDown),
            (KeyCode::PageUp, none, Action::PageUp),
            (KeyCode::PageDown, none, Action::PageDown),
        ];

        let bindings = defaults
            .iter()
            .map(|&(code, mods, action)| ((code, mods), action))
            .collect();

        Self { bindings }
    }

    /// Build the default keymap and apply config overrides on top.
    ///
    /// Unknown action names and unparseable key strings are skipped with a
    /// warning rather than failing startup.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();
        for (action_name, key_str) in overrides {
            let Some(action) = Action::from_config_name(action_name) else {
                tracing::warn!(action = %action_name, "Unknown action in [keybindings], ignoring");
                continue;
            };
            let Some(key) = parse_key(key_str) else {
                tracing::warn!(key = %key_str, "Unparseable key in [keybindings], ignoring");
                continue;
            };
            registry.bindings.insert(key, action);
        }
        registry
    }

    /// Look up the action bound to a key press.
    ///
    /// SHIFT is stripped for character keys, since the case is already in the
    /// char itself (crossterm reports 'G' as Char('G') + SHIFT).
    pub fn action_for_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let mods = match code {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        self.bindings.get(&(code, mods)).copied()
    }
}

/// Parse a key string from the config file: "q", "Ctrl+q", "F5", "Enter", ...
fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = s.trim();

    loop {
        let lower = rest.to_ascii_lowercase();
        if let Some(tail) = lower.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = &rest[rest.len() - tail.len()..];
        } else if let Some(tail) = lower.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = &rest[rest.len() - tail.len()..];
        } else if let Some(tail) = lower.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = &rest[rest.len() - tail.len()..];
        } else {
            break;
        }
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        f if f.starts_with('f') && f.len() > 1 => {
            let n: u8 = f[1..].parse().ok()?;
            if n == 0 || n > 24 {
                return None;
            }
            KeyCode::F(n)
        }
        _ => {
            let mut chars = rest.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    // Char keys fold SHIFT into the char itself, same as lookup
    if let KeyCode::Char(_) = code {
        modifiers = modifiers.difference(KeyModifiers::SHIFT);
    }

    Some((code, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE),
            Some(Action::Select)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(Action::PageDown)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('x'), KeyModifiers::NONE),
            None
        );
    }

    #[test]
    fn test_shift_stripped_for_chars() {
        let reg = KeybindingRegistry::new();
        // 'G' arrives as Char('G') + SHIFT
        assert_eq!(
            reg.action_for_key(KeyCode::Char('G'), KeyModifiers::SHIFT),
            Some(Action::Bottom)
        );
    }

    #[test]
    fn test_parse_key_strings() {
        assert_eq!(
            parse_key("q"),
            Some((KeyCode::Char('q'), KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("Ctrl+q"),
            Some((KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
        assert_eq!(parse_key("F5"), Some((KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(parse_key("Enter"), Some((KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(
            parse_key("Space"),
            Some((KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(parse_key("F99"), None);
        assert_eq!(parse_key("NoSuchKey"), None);
    }

    #[test]
    fn test_override_rebinds_key() {
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+c".to_string());
        let reg = KeybindingRegistry::with_overrides(&overrides);

        assert_eq!(
            reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        // The default binding is untouched
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_steals_bound_key() {
        let mut overrides = HashMap::new();
        overrides.insert("reload".to_string(), "q".to_string());
        let reg = KeybindingRegistry::with_overrides(&overrides);

        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Reload)
        );
    }

    #[test]
    fn test_invalid_overrides_skipped() {
        let mut overrides = HashMap::new();
        overrides.insert("no_such_action".to_string(), "q".to_string());
        overrides.insert("quit".to_string(), "NotAKey99".to_string());
        let reg = KeybindingRegistry::with_overrides(&overrides);

        // Defaults survive both bad entries
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
    }
}
