//! Catalog, schema and table list panels
//!
//! One `ListPanel` per hierarchy level. A panel is filled from a fetched list
//! of names; every row carries the navigation intent it raises when
//! activated, with the parent keys captured at fill time.

use crate::nav::{Level, NavIntent};
use crate::ui::Component;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

/// Text shown while a load is in flight
pub const LOADING_TEXT: &str = "Loading...";

/// A selectable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub label: String,
    pub intent: NavIntent,
}

/// What a panel currently displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    /// Nothing rendered yet (or a loading placeholder was removed)
    Blank,
    Loading,
    /// "No data" placeholder, zero rows
    Placeholder(&'static str),
    Rows(Vec<PanelRow>),
}

/// List panel for one hierarchy level
pub struct ListPanel {
    level: Level,
    content: PanelContent,
    visible: bool,
    /// Cursor row index
    cursor: usize,
    /// Name of the row marked active (the committed selection)
    active: Option<String>,
}

impl ListPanel {
    /// Create an empty panel. Only the catalog panel starts visible.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            content: PanelContent::Blank,
            visible: level == Level::Catalogs,
            cursor: 0,
            active: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            Level::Catalogs => " Catalogs ",
            Level::Schemas => " Schemas ",
            Level::Tables => " Tables ",
            Level::Details => " Columns ",
        }
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Fill the panel from a fetched list.
    ///
    /// An empty or absent list yields the level's placeholder and no rows.
    /// Otherwise one row per name, its intent built by `intent_for`. The panel
    /// becomes visible either way.
    pub fn render_items<F>(&mut self, items: Option<Vec<String>>, intent_for: F)
    where
        F: Fn(&str) -> NavIntent,
    {
        self.content = match items {
            Some(names) if !names.is_empty() => PanelContent::Rows(
                names
                    .into_iter()
                    .map(|label| PanelRow {
                        intent: intent_for(&label),
                        label,
                    })
                    .collect(),
            ),
            _ => PanelContent::Placeholder(self.level.empty_message()),
        };
        self.cursor = 0;
        self.visible = true;
        self.focus_active_row();
    }

    /// Interactive rows (empty for placeholders and loading)
    pub fn rows(&self) -> &[PanelRow] {
        match &self.content {
            PanelContent::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self.content {
            PanelContent::Placeholder(text) => Some(text),
            _ => None,
        }
    }

    /// Replace the content with the loading placeholder
    pub fn show_loading(&mut self) {
        self.content = PanelContent::Loading;
        self.cursor = 0;
    }

    /// Drop the loading placeholder if present
    pub fn hide_loading(&mut self) {
        if self.content == PanelContent::Loading {
            self.content = PanelContent::Blank;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.content == PanelContent::Loading
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Mark the row named `name` as active; `None` clears the mark
    pub fn set_active(&mut self, name: Option<&str>) {
        self.active = name.map(str::to_string);
        self.focus_active_row();
    }

    /// Index of the active row, matched by exact name
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active.as_deref()?;
        self.rows().iter().position(|row| row.label == active)
    }

    /// Forget rows, marks and cursor
    pub fn reset(&mut self) {
        self.content = PanelContent::Blank;
        self.cursor = 0;
        self.active = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(10);
    }

    pub fn page_down(&mut self) {
        self.cursor = (self.cursor + 10).min(self.rows().len().saturating_sub(1));
    }

    pub fn go_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.cursor = self.rows().len().saturating_sub(1);
    }

    /// Intent of the row under the cursor
    pub fn selected_intent(&self) -> Option<NavIntent> {
        self.rows().get(self.cursor).map(|row| row.intent.clone())
    }

    fn focus_active_row(&mut self) {
        if let Some(idx) = self.active_index() {
            self.cursor = idx;
        }
    }
}

impl Component for ListPanel {
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        if area.height == 0 {
            return;
        }
        match &self.content {
            PanelContent::Blank => {}
            PanelContent::Loading => {
                frame.render_widget(Paragraph::new(LOADING_TEXT).style(theme.loading), area);
            }
            PanelContent::Placeholder(text) => {
                frame.render_widget(Paragraph::new(*text).style(theme.placeholder), area);
            }
            PanelContent::Rows(rows) => {
                let active = self.active_index();
                let items: Vec<ListItem> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let (marker, style) = if Some(i) == active {
                            ("● ", theme.row_active)
                        } else {
                            ("  ", theme.row_normal)
                        };
                        // Names are drawn as literal text
                        ListItem::new(Line::from(vec![
                            Span::styled(marker, style),
                            Span::styled(row.label.as_str(), style),
                        ]))
                    })
                    .collect();

                let mut list = List::new(items);
                if focused {
                    list = list.highlight_style(theme.row_cursor);
                }
                let mut state = ListState::default().with_selected(Some(self.cursor));
                frame.render_stateful_widget(list, area, &mut state);
            }
        }
    }
}
