//! Top-level render function
//!
//! Draws the whole screen from `App` state each frame, using the layout module.

use crate::app::{App, PanelFocus, StatusLevel};
use crate::monitor::ConnectionStatus;
use crate::nav::HOME;
use crate::ui::Component;
use crate::ui::layout::{calculate_layout, centered_rect};
use crate::ui::panel::ListPanel;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Shown in the content pane before anything is selected
pub const WELCOME_TEXT: &str = "Select a catalog to start exploring";

const BREADCRUMB_SEPARATOR: &str = " › ";

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let layout = calculate_layout(frame.area(), app.error_banner.is_some());

    render_header(frame, layout.header, app, theme);
    render_breadcrumbs(frame, layout.breadcrumbs, app, theme);
    if let (Some(area), Some(message)) = (layout.banner, app.error_banner.as_deref()) {
        frame.render_widget(
            Paragraph::new(format!(" {}", message)).style(theme.error_banner),
            area,
        );
    }

    let panels = [
        (&app.catalogs, layout.catalogs, PanelFocus::Catalogs),
        (&app.schemas, layout.schemas, PanelFocus::Schemas),
        (&app.tables, layout.tables, PanelFocus::Tables),
    ];
    for (panel, area, focus) in panels {
        if panel.is_visible() {
            render_panel(frame, area, panel, app.focus == focus, theme);
        }
    }
    render_content(frame, layout.content, app, theme);

    render_status_bar(frame, layout.status_bar, app, theme);

    if app.help.is_visible() {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(theme.border_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        app.help.render(frame, inner, theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = Line::from(vec![
        Span::styled(" trinav ", theme.app_title),
        Span::styled(app.base_url.as_str(), theme.status_hint),
    ]);
    frame.render_widget(Paragraph::new(title), area);

    let status = &app.connection.status;
    let (dot, style) = match status {
        ConnectionStatus::Connected { .. } => ("●", theme.connected),
        ConnectionStatus::Disconnected { .. } => ("○", theme.disconnected),
        ConnectionStatus::Unknown => ("○", theme.connection_unknown),
    };
    let indicator = Line::from(vec![
        Span::styled(dot, style),
        Span::raw(" "),
        Span::styled(app.connection.indicator_label(), style),
        Span::raw(" "),
    ]);
    frame.render_widget(Paragraph::new(indicator).alignment(Alignment::Right), area);
}

fn render_breadcrumbs(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let trail = app.selection().breadcrumbs();
    let last = trail.len() - 1;
    let mut spans = vec![Span::raw(" ")];
    for (i, crumb) in trail.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(BREADCRUMB_SEPARATOR, theme.breadcrumb_separator));
        }
        let style = if i == last && *crumb != HOME {
            theme.breadcrumb_current
        } else {
            theme.breadcrumb
        };
        spans.push(Span::styled(*crumb, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &ListPanel, focused: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(panel.title())
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    panel.render(frame, inner, focused, theme);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == PanelFocus::Details;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", app.selection().title()),
            theme.content_title,
        ))
        .border_style(theme.border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.selection().is_empty() {
        frame.render_widget(Paragraph::new(WELCOME_TEXT).style(theme.welcome), inner);
    } else {
        app.details.render(frame, inner, focused, theme);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if app.command_bar.is_active() {
        app.command_bar.render(frame, area, true, theme);
    } else if let Some(ref status) = app.status_message {
        let style = match status.level {
            StatusLevel::Info => theme.status_info,
            StatusLevel::Success => theme.status_success,
            StatusLevel::Warning => theme.status_warning,
            StatusLevel::Error => theme.status_error,
        };
        frame.render_widget(Paragraph::new(status.message.as_str()).style(style), area);
    } else {
        frame.render_widget(
            Paragraph::new("Press : for commands, F1 for help, Ctrl+Q to quit")
                .style(theme.status_hint),
            area,
        );
    }
}
