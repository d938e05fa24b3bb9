//! Table details pane
//!
//! Shows the column metadata of the selected table once it has been
//! described. Scrollable for wide tables.

use crate::api::ColumnInfo;
use crate::ui::Component;
use crate::ui::panel::LOADING_TEXT;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Row, Table};

/// Hint shown for a selection that has not been described
pub const DESCRIBE_HINT: &str = "Select a table and press d to show its columns";

#[derive(Debug, Clone, PartialEq, Eq)]
enum DetailsContent {
    Hidden,
    Loading,
    Columns(Vec<ColumnInfo>),
}

/// Column listing for one table
pub struct DetailsPane {
    table: Option<String>,
    content: DetailsContent,
    scroll_offset: usize,
}

impl DetailsPane {
    pub fn new() -> Self {
        Self {
            table: None,
            content: DetailsContent::Hidden,
            scroll_offset: 0,
        }
    }

    pub fn show_loading(&mut self, table: &str) {
        self.table = Some(table.to_string());
        self.content = DetailsContent::Loading;
        self.scroll_offset = 0;
    }

    pub fn hide_loading(&mut self) {
        if self.content == DetailsContent::Loading {
            self.content = DetailsContent::Hidden;
        }
    }

    /// Show the columns of the table passed to `show_loading`; `None` counts as empty
    pub fn set_columns(&mut self, columns: Option<Vec<ColumnInfo>>) {
        self.content = DetailsContent::Columns(columns.unwrap_or_default());
        self.scroll_offset = 0;
    }

    pub fn hide(&mut self) {
        self.table = None;
        self.content = DetailsContent::Hidden;
        self.scroll_offset = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.content != DetailsContent::Hidden
    }

    pub fn is_loading(&self) -> bool {
        self.content == DetailsContent::Loading
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        match &self.content {
            DetailsContent::Columns(columns) => columns,
            _ => &[],
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.columns().len() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.columns().len().saturating_sub(1);
    }
}

impl Default for DetailsPane {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DetailsPane {
    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool, theme: &Theme) {
        if area.height == 0 {
            return;
        }
        match &self.content {
            DetailsContent::Hidden => {
                frame.render_widget(Paragraph::new(DESCRIBE_HINT).style(theme.welcome), area);
            }
            DetailsContent::Loading => {
                frame.render_widget(Paragraph::new(LOADING_TEXT).style(theme.loading), area);
            }
            DetailsContent::Columns(columns) if columns.is_empty() => {
                frame.render_widget(
                    Paragraph::new(crate::nav::Level::Details.empty_message())
                        .style(theme.placeholder),
                    area,
                );
            }
            DetailsContent::Columns(columns) => {
                let header = Row::new(vec!["Column", "Type", "Null"]).style(theme.details_header);
                let rows: Vec<Row> = columns
                    .iter()
                    .skip(self.scroll_offset)
                    .map(|c| {
                        Row::new(vec![
                            Span::raw(c.column_name.as_str()),
                            Span::styled(c.data_type.as_str(), theme.details_type),
                            Span::styled(
                                if c.nullable() { "yes" } else { "no" },
                                theme.details_nullable,
                            ),
                        ])
                    })
                    .collect();
                let widths = [
                    Constraint::Percentage(45),
                    Constraint::Percentage(40),
                    Constraint::Length(4),
                ];
                frame.render_widget(Table::new(rows, widths).header(header), area);
            }
        }
    }
}
