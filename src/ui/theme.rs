//! Rendering palette for the form

use ratatui::style::{Color, Modifier, Style};

/// Immutable set of styles handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub question: Style,
    pub help: Style,
    pub input: Style,
    pub cursor: Style,
    pub error: Style,
    pub success: Style,
    pub cancelled: Style,
    pub muted: Style,
    pub border: Style,
    pub key: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            question: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            help: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            input: Style::default().fg(Color::LightMagenta),
            cursor: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            cancelled: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Cyan),
            key: Style::default().fg(Color::Cyan),
        }
    }
}

impl Theme {
    /// Theme without colors, for terminals that set `NO_COLOR`
    pub fn plain() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            title: bold,
            question: bold,
            help: Style::default(),
            input: Style::default(),
            cursor: Style::default(),
            error: bold,
            success: bold,
            cancelled: bold,
            muted: Style::default(),
            border: Style::default(),
            key: bold,
        }
    }

    /// Pick the theme for the current environment
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            Self::plain()
        } else {
            Self::default()
        }
    }
}
