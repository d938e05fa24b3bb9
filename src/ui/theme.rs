//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all UI components.

use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // List panels
    pub row_normal: Style,
    pub row_active: Style,
    pub row_cursor: Style,
    pub placeholder: Style,
    pub loading: Style,

    // Header, breadcrumbs and banner
    pub app_title: Style,
    pub connected: Style,
    pub disconnected: Style,
    pub connection_unknown: Style,
    pub breadcrumb: Style,
    pub breadcrumb_current: Style,
    pub breadcrumb_separator: Style,
    pub error_banner: Style,

    // Content pane
    pub content_title: Style,
    pub welcome: Style,
    pub details_header: Style,
    pub details_type: Style,
    pub details_nullable: Style,

    // Command bar
    pub command_prompt: Style,
    pub command_input: Style,

    // Status messages
    pub status_success: Style,
    pub status_error: Style,
    pub status_info: Style,
    pub status_warning: Style,
    pub status_hint: Style,

    // Help overlay
    pub help_section: Style,
    pub help_key: Style,
    pub help_desc: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Borders
            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            // List panels
            row_normal: Style::default().fg(Color::White),
            row_active: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            row_cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            loading: Style::default().fg(Color::Yellow),

            // Header
            app_title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            connected: Style::default().fg(Color::Green),
            disconnected: Style::default().fg(Color::Red),
            connection_unknown: Style::default().fg(Color::Yellow),
            breadcrumb: Style::default().fg(Color::Gray),
            breadcrumb_current: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            breadcrumb_separator: Style::default().fg(Color::DarkGray),
            error_banner: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),

            // Content pane
            content_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            welcome: Style::default().fg(Color::Gray),
            details_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            details_type: Style::default().fg(Color::Blue),
            details_nullable: Style::default().fg(Color::DarkGray),

            // Command bar
            command_prompt: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            command_input: Style::default().fg(Color::White),

            // Status messages
            status_success: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red),
            status_info: Style::default().fg(Color::Blue),
            status_warning: Style::default().fg(Color::Yellow),
            status_hint: Style::default().fg(Color::DarkGray),

            // Help overlay
            help_section: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Cyan),
            help_desc: Style::default().fg(Color::White),
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get border style based on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}
