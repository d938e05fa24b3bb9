//! Panel layout management
//!
//! Handles the arrangement of panels and terminal screen layout.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub breadcrumbs: Rect,
    /// Present only while an error banner is shown
    pub banner: Option<Rect>,
    pub catalogs: Rect,
    pub schemas: Rect,
    pub tables: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

/// Calculate panel layout for the main screen
///
/// Rows: header, breadcrumbs, optional error banner, body, status bar.
/// The body holds the three list columns and the content pane.
pub fn calculate_layout(area: Rect, with_banner: bool) -> AppLayout {
    let banner_height = if with_banner { 1 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(rows[3]);

    AppLayout {
        header: rows[0],
        breadcrumbs: rows[1],
        banner: with_banner.then_some(rows[2]),
        catalogs: columns[0],
        schemas: columns[1],
        tables: columns[2],
        content: columns[3],
        status_bar: rows[4],
    }
}

/// Rect of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
