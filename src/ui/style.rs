//! Theming and color definitions.
//!
//! `Auto` keeps the terminal's own foreground/background and only uses
//! modifiers plus a few ANSI accents; `Light` and `Dark` paint explicit
//! backgrounds.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Whole-screen base style
    pub base: Style,
    /// Unfocused key cap
    pub key: Style,
    /// Key under the on-screen focus
    pub key_focused: Style,
    /// Latched keys: shift while upper, delete while held
    pub key_latched: Style,
    /// Border of the bound field
    pub field_active: Style,
    /// Border of other fields
    pub field_idle: Style,
    /// Cell under the text cursor
    pub cursor: Style,
    pub status: Style,
    pub dim: Style,
}

pub fn palette(theme: ThemeMode) -> Palette {
    match theme {
        ThemeMode::Auto => Palette {
            base: Style::default(),
            key: Style::default().add_modifier(Modifier::BOLD),
            key_focused: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            key_latched: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            field_active: Style::default().fg(Color::Cyan),
            field_idle: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            status: Style::default().bg(Color::DarkGray).fg(Color::White),
            dim: Style::default().fg(Color::Indexed(245)),
        },
        ThemeMode::Light => Palette {
            base: Style::default().bg(Color::Indexed(255)).fg(Color::Indexed(235)),
            key: Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_focused: Style::default()
                .bg(Color::Indexed(24))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            key_latched: Style::default()
                .bg(Color::Indexed(252))
                .fg(Color::Indexed(24))
                .add_modifier(Modifier::BOLD),
            field_active: Style::default().fg(Color::Indexed(24)),
            field_idle: Style::default().fg(Color::Indexed(246)),
            cursor: Style::default().bg(Color::Indexed(24)).fg(Color::White),
            status: Style::default().bg(Color::Indexed(250)).fg(Color::Black),
            dim: Style::default().fg(Color::Indexed(241)),
        },
        ThemeMode::Dark => Palette {
            base: Style::default().bg(Color::Indexed(234)).fg(Color::Indexed(252)),
            key: Style::default()
                .bg(Color::Indexed(238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            key_focused: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_latched: Style::default()
                .bg(Color::Indexed(240))
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            field_active: Style::default().fg(Color::Cyan),
            field_idle: Style::default().fg(Color::Indexed(240)),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
            status: Style::default().bg(Color::Indexed(238)).fg(Color::White),
            dim: Style::default().fg(Color::Indexed(245)),
        },
    }
}
