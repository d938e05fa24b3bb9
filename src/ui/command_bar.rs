//! Command bar widget
//!
//! Input bar for entering commands (starting with /)

use crate::ui::theme::Theme;
use crate::ui::{Component, ComponentAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Command bar component
pub struct CommandBar {
    /// Input buffer
    input: String,

    /// Cursor position (in chars)
    cursor: usize,

    /// Whether the command bar is visible/active
    active: bool,
}

impl CommandBar {
    /// Create a new command bar
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            active: false,
        }
    }

    /// Activate the command bar
    pub fn activate(&mut self) {
        self.active = true;
        self.input.clear();
        self.cursor = 0;
    }

    /// Deactivate the command bar
    pub fn deactivate(&mut self) {
        self.active = false;
        self.input.clear();
        self.cursor = 0;
    }

    /// Check if command bar is active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the current input
    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.input.remove(at);
        }
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

impl Default for CommandBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CommandBar {
    fn handle_key(&mut self, key: KeyEvent) -> ComponentAction {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c);
                ComponentAction::Consumed
            }
            KeyCode::Backspace => {
                self.delete_char();
                ComponentAction::Consumed
            }
            KeyCode::Left => {
                self.move_left();
                ComponentAction::Consumed
            }
            KeyCode::Right => {
                self.move_right();
                ComponentAction::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                ComponentAction::Consumed
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
                ComponentAction::Consumed
            }
            _ => ComponentAction::Ignored,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let line = Line::from(vec![
            Span::styled("/", theme.command_prompt),
            Span::styled(self.input.as_str(), theme.command_input),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        if focused {
            let x = area.x + 1 + self.cursor as u16;
            if x < area.x + area.width {
                frame.set_cursor_position((x, area.y));
            }
        }
    }
}
