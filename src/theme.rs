//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes.

use ratatui::style::{Color, Modifier, Style};

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
///
/// Each field corresponds to a specific visual element in the TUI.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Listing card --
    pub card_title: Style,
    pub card_price: Style,
    pub card_location: Style,
    pub card_specs: Style,
    pub card_border: Style,
    pub card_placeholder: Style,

    // -- Broker strip --
    pub broker_name: Style,
    pub broker_verified: Style,
    pub broker_follow: Style,
    pub broker_following: Style,

    // -- Action rail --
    pub rail_icon: Style,
    pub rail_active: Style,
    pub rail_count: Style,

    // -- Playback --
    pub progress_filled: Style,
    pub progress_empty: Style,
    pub muted_badge: Style,

    // -- Overlays --
    pub overlay_border: Style,
    pub overlay_title: Style,
    pub overlay_body: Style,
    pub overlay_accent: Style,
    pub overlay_dim: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub status_error: Style,
    pub position_indicator: Style,
    pub hint_text: Style,
}

impl ColorPalette {
    /// Dark palette — the default look.
    fn dark() -> Self {
        Self {
            // Listing card
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            card_location: Style::default().fg(Color::Gray),
            card_specs: Style::default().fg(Color::DarkGray),
            card_border: Style::default().fg(Color::DarkGray),
            card_placeholder: Style::default().fg(Color::DarkGray),

            // Broker strip
            broker_name: Style::default().add_modifier(Modifier::BOLD),
            broker_verified: Style::default().fg(Color::Cyan),
            broker_follow: Style::default().fg(Color::Magenta),
            broker_following: Style::default().fg(Color::DarkGray),

            // Action rail
            rail_icon: Style::default().fg(Color::White),
            rail_active: Style::default().fg(Color::Red),
            rail_count: Style::default().fg(Color::Gray),

            // Playback
            progress_filled: Style::default().fg(Color::White),
            progress_empty: Style::default().fg(Color::DarkGray),
            muted_badge: Style::default().fg(Color::Yellow),

            // Overlays
            overlay_border: Style::default().fg(Color::Cyan),
            overlay_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            overlay_body: Style::default(),
            overlay_accent: Style::default().fg(Color::Green),
            overlay_dim: Style::default().fg(Color::DarkGray),

            // Chrome
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_error: Style::default().bg(Color::DarkGray).fg(Color::Red),
            position_indicator: Style::default().fg(Color::Gray),
            hint_text: Style::default().fg(Color::DarkGray),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            // Listing card
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            card_location: Style::default().fg(Color::DarkGray),
            card_specs: Style::default().fg(Color::Gray),
            card_border: Style::default().fg(Color::Gray),
            card_placeholder: Style::default().fg(Color::Gray),

            // Broker strip
            broker_name: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            broker_verified: Style::default().fg(Color::Blue),
            broker_follow: Style::default().fg(Color::Magenta),
            broker_following: Style::default().fg(Color::Gray),

            // Action rail
            rail_icon: Style::default().fg(Color::Black),
            rail_active: Style::default().fg(Color::Red),
            rail_count: Style::default().fg(Color::DarkGray),

            // Playback
            progress_filled: Style::default().fg(Color::Black),
            progress_empty: Style::default().fg(Color::Gray),
            muted_badge: Style::default().fg(Color::Magenta),

            // Overlays
            overlay_border: Style::default().fg(Color::Blue),
            overlay_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            overlay_body: Style::default().fg(Color::Black),
            overlay_accent: Style::default().fg(Color::Green),
            overlay_dim: Style::default().fg(Color::Gray),

            // Chrome
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_error: Style::default().bg(Color::White).fg(Color::Red),
            position_indicator: Style::default().fg(Color::DarkGray),
            hint_text: Style::default().fg(Color::Gray),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_price_is_bold_green() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.card_price,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
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
        assert_ne!(dark.status_bar, light.status_bar);
        assert_ne!(dark.overlay_border, light.overlay_border);
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
}
