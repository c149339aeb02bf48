//! Keybinding registry — maps actions to key events with config overrides.
//!
//! Replaces hardcoded key match arms with a data-driven registry that
//! supports user customization via config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,
    Contact,
    ShowDetails,
    OpenFilters,
    ClearFilters,
    ToggleMute,
    ToggleLike,
    ToggleSave,
    Follow,
    OpenInBrowser,
    Refresh,
    CycleTheme,
    ShowHelp,
    Back,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NextItem => "Next listing",
            Self::PrevItem => "Previous listing",
            Self::FirstItem => "Jump to first listing",
            Self::LastItem => "Jump to last listing",
            Self::Contact => "Contact the broker",
            Self::ShowDetails => "Show listing details",
            Self::OpenFilters => "Open filter panel",
            Self::ClearFilters => "Clear all filters",
            Self::ToggleMute => "Mute / unmute clip",
            Self::ToggleLike => "Like listing",
            Self::ToggleSave => "Save listing",
            Self::Follow => "Follow broker",
            Self::OpenInBrowser => "Open clip in browser",
            Self::Refresh => "Reload listings",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::Back => "Dismiss overlay",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context — determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    /// The feed itself (no overlay open).
    Feed,
    /// Any modal overlay (contact, details, download prompt, help).
    Overlay,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Backspace"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.len() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    if s.starts_with('F') || s.starts_with('f') {
        if let Ok(n) = s[1..].parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    if s.len() == 1 {
        let c = s.chars().next()?;
        return Some(KeySpec::plain(KeyCode::Char(c)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config
/// overrides.
///
/// Lookup is O(1) via HashMap. The registry supports context-aware
/// dispatch: the same key can map to different actions in different
/// contexts (Esc dismisses an overlay but quits nothing in the feed).
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    /// Create a registry with the default bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;

        // === Global ===
        self.bind(Context::Global, KeySpec::plain(Char('q')), Action::Quit);
        self.bind(
            Context::Global,
            KeySpec::plain(Char('T')),
            Action::CycleTheme,
        );
        self.bind(Context::Global, KeySpec::plain(Char('?')), Action::ShowHelp);

        // === Feed ===
        // Navigation: ArrowDown/j step forward, ArrowUp/k step back
        self.bind(Context::Feed, KeySpec::plain(Char('j')), Action::NextItem);
        self.bind(Context::Feed, KeySpec::plain(Down), Action::NextItem);
        self.bind(Context::Feed, KeySpec::plain(Char('k')), Action::PrevItem);
        self.bind(Context::Feed, KeySpec::plain(Up), Action::PrevItem);
        self.bind(Context::Feed, KeySpec::plain(Char('g')), Action::FirstItem);
        self.bind(Context::Feed, KeySpec::plain(Char('G')), Action::LastItem);

        // Item actions
        self.bind(Context::Feed, KeySpec::plain(Char('c')), Action::Contact);
        self.bind(Context::Feed, KeySpec::plain(Enter), Action::Contact);
        self.bind(
            Context::Feed,
            KeySpec::plain(Char('d')),
            Action::ShowDetails,
        );
        self.bind(Context::Feed, KeySpec::plain(Char('m')), Action::ToggleMute);
        self.bind(Context::Feed, KeySpec::plain(Char('l')), Action::ToggleLike);
        self.bind(Context::Feed, KeySpec::plain(Char('s')), Action::ToggleSave);
        self.bind(Context::Feed, KeySpec::plain(Char('F')), Action::Follow);
        self.bind(
            Context::Feed,
            KeySpec::plain(Char('o')),
            Action::OpenInBrowser,
        );

        // Filters
        self.bind(
            Context::Feed,
            KeySpec::plain(Char('f')),
            Action::OpenFilters,
        );
        self.bind(
            Context::Feed,
            KeySpec::plain(Char('x')),
            Action::ClearFilters,
        );
        self.bind(Context::Feed, KeySpec::plain(Char('r')), Action::Refresh);

        // === Overlays ===
        self.bind(Context::Overlay, KeySpec::plain(Esc), Action::Back);
        self.bind(Context::Overlay, KeySpec::plain(Char('q')), Action::Back);
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "next"), values are
    /// key strings (e.g., "q", "Ctrl+d", "F5"). Returns warnings for
    /// unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            // Re-bind in the same contexts the action was bound in
            let contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "next_item" | "next" => Some(Action::NextItem),
        "prev_item" | "prev" => Some(Action::PrevItem),
        "first_item" | "first" => Some(Action::FirstItem),
        "last_item" | "last" => Some(Action::LastItem),
        "contact" => Some(Action::Contact),
        "show_details" | "details" => Some(Action::ShowDetails),
        "open_filters" | "filters" => Some(Action::OpenFilters),
        "clear_filters" => Some(Action::ClearFilters),
        "toggle_mute" | "mute" => Some(Action::ToggleMute),
        "toggle_like" | "like" => Some(Action::ToggleLike),
        "toggle_save" | "save" => Some(Action::ToggleSave),
        "follow" => Some(Action::Follow),
        "open_in_browser" | "open" => Some(Action::OpenInBrowser),
        "refresh" | "reload" => Some(Action::Refresh),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        "back" => Some(Action::Back),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        let action = reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global);
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_default_nav_keys_match_web_app() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('j'), KeyModifiers::NONE, Context::Feed),
            Some(Action::NextItem)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Down, KeyModifiers::NONE, Context::Feed),
            Some(Action::NextItem)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('k'), KeyModifiers::NONE, Context::Feed),
            Some(Action::PrevItem)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Up, KeyModifiers::NONE, Context::Feed),
            Some(Action::PrevItem)
        );
    }

    #[test]
    fn test_overlay_context_overrides_feed() {
        let reg = KeybindingRegistry::new();
        // In an overlay, 'q' dismisses instead of quitting
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Overlay),
            Some(Action::Back)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Overlay),
            Some(Action::Back)
        );
    }

    #[test]
    fn test_feed_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('?'), KeyModifiers::NONE, Context::Feed),
            Some(Action::ShowHelp)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Feed),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::F(12), KeyModifiers::NONE, Context::Feed),
            None
        );
    }

    #[test]
    fn test_override_rebinds_action() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        // Old binding removed, new one active
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            None
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_unknown_action_warns() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("teleport".to_string(), "t".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("teleport"));
    }

    #[test]
    fn test_override_bad_key_warns() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "NotAKey".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        // Binding unchanged
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::NONE, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_parse_key_string_formats() {
        assert_eq!(
            parse_key_string("Ctrl+d"),
            Some(KeySpec::ctrl('d'))
        );
        assert_eq!(
            parse_key_string("Enter"),
            Some(KeySpec::plain(KeyCode::Enter))
        );
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(
            parse_key_string("j"),
            Some(KeySpec::plain(KeyCode::Char('j')))
        );
        assert_eq!(parse_key_string("Ctrl+Shift+x"), None);
    }

    #[test]
    fn test_all_bindings_for_help() {
        let reg = KeybindingRegistry::new();
        let bindings = reg.all_bindings();
        assert!(!bindings.is_empty());
        assert!(bindings
            .iter()
            .any(|(_, key, action, _)| key == "j" && *action == Action::NextItem));
    }
}
