//! Help overlay: keybinding reference modal
//!
//! Displays all keybindings organized by panel context as a centered popup.

use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Help overlay showing keybinding reference
pub struct HelpOverlay {
    visible: bool,
    scroll_offset: usize,
}

/// Total number of content lines in the help text
const HELP_LINE_COUNT: usize = 29;

impl HelpOverlay {
    pub fn new() -> Self {
        Self {
            visible: false,
            scroll_offset: 0,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.scroll_offset = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.scroll_offset = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < HELP_LINE_COUNT {
            self.scroll_offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(20);
    }

    pub fn page_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 20).min(HELP_LINE_COUNT.saturating_sub(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = HELP_LINE_COUNT.saturating_sub(1);
    }

    /// Build styled help content lines
    fn build_lines<'a>(&self, theme: &Theme) -> Vec<Line<'a>> {
        let section = theme.help_section;
        let key = theme.help_key;
        let desc = theme.help_desc;
        let blank = Line::from("");

        vec![
            Line::from(Span::styled("Global", section)),
            help_line("  Ctrl+Q", "Quit", key, desc),
            help_line("  Tab / Shift+Tab", "Cycle panel focus", key, desc),
            help_line("  Ctrl+P / :", "Command bar", key, desc),
            help_line("  F1 / ?", "Help", key, desc),
            blank.clone(),
            Line::from(Span::styled("Catalogs / Schemas / Tables", section)),
            help_line("  j/k  \u{2191}/\u{2193}", "Move", key, desc),
            help_line("  Enter / l", "Open catalog or schema, select table", key, desc),
            help_line("  g / G", "Top / Bottom", key, desc),
            help_line("  PgUp / PgDn", "Page up / down", key, desc),
            help_line("  d", "Describe selected table", key, desc),
            help_line("  y", "Copy qualified name", key, desc),
            help_line("  r", "Reload catalogs", key, desc),
            blank.clone(),
            Line::from(Span::styled("Columns", section)),
            help_line("  j/k  \u{2191}/\u{2193}", "Scroll", key, desc),
            blank.clone(),
            Line::from(Span::styled("Command Bar", section)),
            help_line("  Enter", "Run command", key, desc),
            help_line("  Esc", "Cancel", key, desc),
            blank.clone(),
            Line::from(Span::styled("Commands", section)),
            help_line("  /refresh", "Reload catalogs", key, desc),
            help_line("  /health", "Re-check the connection", key, desc),
            help_line("  /describe", "Show columns of the selected table", key, desc),
            help_line("  /copy", "Copy qualified name", key, desc),
            help_line("  /help", "Show this help", key, desc),
            help_line("  /quit", "Quit", key, desc),
        ]
    }

    /// Render the help content into the given area
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let lines = self.build_lines(theme);
        let visible_height = area.height as usize;

        for i in 0..visible_height {
            let line_idx = self.scroll_offset + i;
            let y = area.y + i as u16;

            if line_idx < lines.len() {
                frame.render_widget(
                    Paragraph::new(lines[line_idx].clone()),
                    Rect::new(area.x, y, area.width, 1),
                );
            }
        }
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a single help line: "  key           description"
fn help_line<'a>(
    key_text: &'a str,
    desc_text: &'a str,
    key_style: Style,
    desc_style: Style,
) -> Line<'a> {
    // Pad key to 20 chars for alignment
    let padded_key = format!("{:<20}", key_text);
    Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc_text, desc_style),
    ])
}
