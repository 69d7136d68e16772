//! Centralized theme constants and style functions for consistent UI styling.
//!
//! Colors come from a [`Palette`]; the light and dark palettes are switched
//! at runtime. Layout constants are shared by both.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use tally_api::endpoints::Amount;

// =============================================================================
// Theme selection
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

// =============================================================================
// Colors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Income, positive balances, remaining budget
    pub positive: Color,
    /// Expenses, overspent budget
    pub negative: Color,
    pub zero: Color,
    pub text: Color,
    pub selection_bg: Color,
    pub header: Color,
    pub help_text: Color,
    pub title: Color,
    pub loading: Color,
    pub border_danger: Color,
    pub border_info: Color,
    pub border_accent: Color,
    pub input_focused: Color,
    pub form_field_bg: Color,
    pub marked: Color,
}

pub const DARK: Palette = Palette {
    positive: Color::Green,
    negative: Color::Red,
    zero: Color::DarkGray,
    text: Color::White,
    selection_bg: Color::DarkGray,
    header: Color::Yellow,
    help_text: Color::Gray,
    title: Color::Cyan,
    loading: Color::Yellow,
    border_danger: Color::Red,
    border_info: Color::Blue,
    border_accent: Color::Cyan,
    input_focused: Color::Yellow,
    form_field_bg: Color::DarkGray,
    marked: Color::Magenta,
};

pub const LIGHT: Palette = Palette {
    positive: Color::Rgb(22, 128, 61),
    negative: Color::Rgb(185, 28, 28),
    zero: Color::Gray,
    text: Color::Black,
    selection_bg: Color::Rgb(219, 234, 254),
    header: Color::Rgb(30, 64, 175),
    help_text: Color::DarkGray,
    title: Color::Rgb(37, 99, 235),
    loading: Color::Rgb(180, 83, 9),
    border_danger: Color::Rgb(185, 28, 28),
    border_info: Color::Rgb(37, 99, 235),
    border_accent: Color::Rgb(14, 116, 144),
    input_focused: Color::Rgb(180, 83, 9),
    form_field_bg: Color::Rgb(229, 231, 235),
    marked: Color::Rgb(126, 34, 206),
};

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of filter input when visible
pub const FILTER_INPUT_HEIGHT: u16 = 3;

/// Standard column spacing for tables
pub const TABLE_COLUMN_SPACING: u16 = 2;

/// Width of the navigation sidebar
pub const SIDEBAR_WIDTH: u16 = 20;

/// Height of summary cards
pub const SUMMARY_CARD_HEIGHT: u16 = 3;

/// Height of the pagination bar
pub const PAGINATION_HEIGHT: u16 = 1;

// =============================================================================
// Style Functions
// =============================================================================

impl Palette {
    /// Style for selected/highlighted rows in tables and lists
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn help_text_style(&self) -> Style {
        Style::default().fg(self.help_text)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn loading_style(&self) -> Style {
        Style::default().fg(self.loading)
    }

    pub fn form_field_focused_style(&self) -> Style {
        Style::default()
            .bg(self.form_field_bg)
            .fg(self.input_focused)
            .add_modifier(Modifier::BOLD)
    }

    pub fn form_field_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.negative)
    }

    /// Style for danger/warning borders (delete confirmations)
    pub fn danger_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_info)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_border_style(&self) -> Style {
        Style::default().fg(self.border_accent)
    }

    /// Positive = green, negative = red, zero = gray
    pub fn amount_color(&self, amount: Amount) -> Color {
        if amount.is_positive() {
            self.positive
        } else if amount.is_negative() {
            self.negative
        } else {
            self.zero
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle().toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.palette(), &LIGHT);
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
    }
}
