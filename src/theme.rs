//! Centralized theme and styling for the TUI.
//!
//! Single source of truth for colors and common styles so the screens stay
//! visually consistent.

#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

/// Core color palette for the application.
pub struct Colors;

impl Colors {
    /// Primary dark background.
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color.
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color.
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color.
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent - borders, titles, highlights.
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent - selected items, emphasis.
    pub const SECONDARY: Color = Color::Yellow;

    /// Success/positive feedback.
    pub const SUCCESS: Color = Color::Green;

    /// Warnings and manual-step notices.
    pub const WARNING: Color = Color::Yellow;

    /// Errors and failures.
    pub const ERROR: Color = Color::Red;

    /// Informational/progress feedback.
    pub const INFO: Color = Color::Cyan;
}

/// Pre-built styles for common elements.
pub struct Styles;

impl Styles {
    /// Screen and panel titles.
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// The highlighted row in a list.
    pub fn list_highlight() -> Style {
        Style::default()
            .bg(Color::Rgb(32, 57, 84))
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Muted helper text (key hints, footers).
    pub fn hint() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }
}
