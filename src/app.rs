//! Application state and event handling
//!
//! Central state machine: events come in, state updates, actions go out.

use crate::api::ColumnInfo;
use crate::commands::parse_command;
use crate::error::Result;
use crate::keymap::{KeyAction, KeyMap};
use crate::monitor::{ConnectionStatus, HealthCheck};
use crate::nav::{Level, LoadTicket, LoadTracker, NavIntent, Selection, StalePolicy};
use crate::ui::Component;
use crate::ui::ComponentAction;
use crate::ui::command_bar::CommandBar;
use crate::ui::details::DetailsPane;
use crate::ui::help::HelpOverlay;
use crate::ui::panel::ListPanel;
use crate::ui::theme::Theme;
use crossterm::event::KeyEvent;
use tracing::{debug, info};

/// Main application state
pub struct App {
    /// Current catalog/schema/table; replaced whole by `dispatch`
    selection: Selection,

    /// Which panel currently has focus
    pub focus: PanelFocus,

    /// Focus before a modal was opened (to restore on Escape)
    pub previous_focus: PanelFocus,

    /// UI Components
    pub catalogs: ListPanel,
    pub schemas: ListPanel,
    pub tables: ListPanel,
    pub details: DetailsPane,
    pub command_bar: CommandBar,
    pub help: HelpOverlay,

    /// Outcome of the latest health check
    pub connection: HealthCheck,

    /// Latest surfaced error, shown until the next catalog selection
    pub error_banner: Option<String>,

    /// Base URL of the explorer API (shown in the header)
    pub base_url: String,

    loads: LoadTracker,
    /// Sequence number of the newest health check
    health_seq: u64,
    stale_policy: StalePolicy,

    /// Data-driven keybinding configuration
    pub keymap: KeyMap,

    /// UI theme (created once, reused every frame)
    pub theme: Theme,

    /// Status message to display
    pub status_message: Option<StatusMessage>,

    /// Persistent clipboard handle (kept alive to avoid Linux clipboard drop race)
    clipboard: Option<arboard::Clipboard>,

    /// Error from clipboard initialization (preserved for diagnostics)
    clipboard_error: Option<String>,

    /// Whether the application is running
    pub running: bool,
}

/// Panel focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelFocus {
    Catalogs,
    Schemas,
    Tables,
    Details,
    CommandBar,
    Help,
}

/// Browsing panels in Tab order
const BROWSE_ORDER: [PanelFocus; 4] = [
    PanelFocus::Catalogs,
    PanelFocus::Schemas,
    PanelFocus::Tables,
    PanelFocus::Details,
];

/// Status message with severity level
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Application events from the event loop and background loads
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize event
    Resize,
    /// Health check `seq` finished; `error` is set when the request failed
    HealthChecked {
        seq: u64,
        status: ConnectionStatus,
        error: Option<String>,
    },
    /// `None` when the response lacked the `catalogs` field
    CatalogsLoaded {
        ticket: LoadTicket,
        catalogs: Option<Vec<String>>,
    },
    SchemasLoaded {
        ticket: LoadTicket,
        schemas: Option<Vec<String>>,
    },
    TablesLoaded {
        ticket: LoadTicket,
        tables: Option<Vec<String>>,
    },
    DetailsLoaded {
        ticket: LoadTicket,
        columns: Option<Vec<ColumnInfo>>,
    },
    /// A request failed; `ticket` is `None` for untracked requests
    LoadFailed {
        ticket: Option<LoadTicket>,
        message: String,
    },
}

/// Actions returned by event handlers for the main loop to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CheckHealth {
        seq: u64,
    },
    LoadCatalogs {
        ticket: LoadTicket,
    },
    LoadSchemas {
        ticket: LoadTicket,
        catalog: String,
    },
    LoadTables {
        ticket: LoadTicket,
        catalog: String,
        schema: String,
    },
    LoadDetails {
        ticket: LoadTicket,
        catalog: String,
        schema: String,
        table: String,
    },
    Quit,
    None,
}

impl App {
    /// Create an app browsing the API at `base_url`
    pub fn new(base_url: impl Into<String>, stale_policy: StalePolicy) -> Self {
        let (clipboard, clipboard_error) = match arboard::Clipboard::new() {
            Ok(c) => (Some(c), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            selection: Selection::new(),
            focus: PanelFocus::Catalogs,
            previous_focus: PanelFocus::Catalogs,
            catalogs: ListPanel::new(Level::Catalogs),
            schemas: ListPanel::new(Level::Schemas),
            tables: ListPanel::new(Level::Tables),
            details: DetailsPane::new(),
            command_bar: CommandBar::new(),
            help: HelpOverlay::new(),
            connection: HealthCheck::new(ConnectionStatus::Unknown),
            error_banner: None,
            base_url: base_url.into(),
            loads: LoadTracker::new(),
            health_seq: 0,
            stale_policy,
            keymap: KeyMap::default(),
            theme: Theme::default(),
            status_message: None,
            clipboard,
            clipboard_error,
            running: true,
        }
    }

    /// The current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Actions to run once the event loop is up: the health check and the
    /// catalog load, issued independently
    pub fn startup(&mut self) -> Vec<Action> {
        vec![self.check_health(), self.load_catalogs()]
    }

    /// Handle an application event and return resulting action
    pub fn handle_event(&mut self, event: AppEvent) -> Result<Action> {
        match event {
            AppEvent::Key(key) => Ok(self.handle_key(key)),
            AppEvent::Resize => Ok(Action::None),
            AppEvent::HealthChecked { seq, status, error } => {
                if self.stale_policy == StalePolicy::Discard && seq != self.health_seq {
                    debug!(seq, latest = self.health_seq, "discarding stale health check");
                    return Ok(Action::None);
                }
                info!(connected = status.is_connected(), label = status.label(), "health checked");
                self.connection = HealthCheck::new(status);
                if let Some(message) = error {
                    self.show_error(message);
                }
                Ok(Action::None)
            }
            AppEvent::CatalogsLoaded { ticket, catalogs } => {
                if !self.accepts(&ticket) {
                    return Ok(Action::None);
                }
                let Some(names) = catalogs else {
                    self.catalogs.hide_loading();
                    return Ok(Action::None);
                };
                self.report_loaded(Level::Catalogs, names.len());
                self.catalogs.render_items(Some(names), |catalog| {
                    NavIntent::SelectCatalog {
                        catalog: catalog.to_string(),
                    }
                });
                self.catalogs.set_active(self.selection.catalog());
                Ok(Action::None)
            }
            AppEvent::SchemasLoaded { ticket, schemas } => {
                if !self.accepts(&ticket) {
                    return Ok(Action::None);
                }
                let Some(names) = schemas else {
                    self.schemas.hide_loading();
                    return Ok(Action::None);
                };
                let [catalog] = ticket.parents.as_slice() else {
                    debug!(?ticket, "schema ticket without a catalog");
                    return Ok(Action::None);
                };
                self.report_loaded(Level::Schemas, names.len());
                let has_rows = !names.is_empty();
                self.schemas.render_items(Some(names), |schema| {
                    NavIntent::SelectSchema {
                        catalog: catalog.clone(),
                        schema: schema.to_string(),
                    }
                });
                self.schemas.set_active(self.selection.schema());
                self.tables.hide();
                if has_rows && self.focus == PanelFocus::Catalogs {
                    self.focus = PanelFocus::Schemas;
                }
                Ok(Action::None)
            }
            AppEvent::TablesLoaded { ticket, tables } => {
                if !self.accepts(&ticket) {
                    return Ok(Action::None);
                }
                let Some(names) = tables else {
                    self.tables.hide_loading();
                    return Ok(Action::None);
                };
                let [catalog, schema] = ticket.parents.as_slice() else {
                    debug!(?ticket, "table ticket without catalog and schema");
                    return Ok(Action::None);
                };
                self.report_loaded(Level::Tables, names.len());
                let has_rows = !names.is_empty();
                self.tables.render_items(Some(names), |table| NavIntent::SelectTable {
                    catalog: catalog.clone(),
                    schema: schema.clone(),
                    table: table.to_string(),
                });
                self.tables.set_active(self.selection.table());
                if has_rows && self.focus == PanelFocus::Schemas {
                    self.focus = PanelFocus::Tables;
                }
                Ok(Action::None)
            }
            AppEvent::DetailsLoaded { ticket, columns } => {
                if !self.accepts(&ticket) {
                    return Ok(Action::None);
                }
                match columns {
                    Some(columns) => {
                        self.report_loaded(Level::Details, columns.len());
                        self.details.set_columns(Some(columns));
                    }
                    None => self.details.hide_loading(),
                }
                Ok(Action::None)
            }
            AppEvent::LoadFailed { ticket, message } => {
                if let Some(ticket) = ticket
                    && !self.accepts(&ticket)
                {
                    return Ok(Action::None);
                }
                self.show_error(message);
                Ok(Action::None)
            }
        }
    }

    /// Apply a navigation intent and return the load it triggers
    pub fn dispatch(&mut self, intent: NavIntent) -> Action {
        debug!(?intent, "dispatch");
        self.selection = intent.apply();
        match intent {
            NavIntent::SelectCatalog { catalog } => {
                self.error_banner = None;
                self.details.hide();
                self.catalogs.set_active(Some(catalog.as_str()));

                self.schemas.reset();
                self.schemas.show_loading();
                self.schemas.hide();
                self.tables.reset();
                self.tables.hide();

                self.set_status(format!("Loading schemas of {}...", catalog), StatusLevel::Info);
                let ticket = self.loads.issue(Level::Schemas, vec![catalog.clone()]);
                Action::LoadSchemas { ticket, catalog }
            }
            NavIntent::SelectSchema { catalog, schema } => {
                self.details.hide();
                self.schemas.set_active(Some(schema.as_str()));

                self.tables.reset();
                self.tables.show_loading();

                self.set_status(format!("Loading tables of {}...", schema), StatusLevel::Info);
                let ticket = self
                    .loads
                    .issue(Level::Tables, vec![catalog.clone(), schema.clone()]);
                Action::LoadTables {
                    ticket,
                    catalog,
                    schema,
                }
            }
            NavIntent::SelectTable { table, .. } => {
                if self.details.table() != Some(table.as_str()) {
                    self.details.hide();
                }
                self.tables.set_active(Some(table.as_str()));
                Action::None
            }
        }
    }

    /// Set the error banner and take every panel out of its loading state
    pub fn show_error(&mut self, message: String) {
        self.catalogs.hide_loading();
        self.schemas.hide_loading();
        self.tables.hide_loading();
        self.details.hide_loading();
        self.error_banner = Some(message);
    }

    /// Issue a fresh catalog load
    pub fn load_catalogs(&mut self) -> Action {
        self.catalogs.show_loading();
        let ticket = self.loads.issue(Level::Catalogs, Vec::new());
        Action::LoadCatalogs { ticket }
    }

    /// Forget the selection and every loaded level, then reload catalogs
    pub fn refresh(&mut self) -> Action {
        self.selection = Selection::new();
        self.error_banner = None;
        self.catalogs.reset();
        self.schemas.reset();
        self.schemas.hide();
        self.tables.reset();
        self.tables.hide();
        self.details.hide();
        self.focus = PanelFocus::Catalogs;
        self.set_status("Refreshing catalogs...".to_string(), StatusLevel::Info);
        self.load_catalogs()
    }

    /// Run the health check again
    pub fn check_health(&mut self) -> Action {
        self.connection = HealthCheck::new(ConnectionStatus::Unknown);
        self.health_seq += 1;
        Action::CheckHealth {
            seq: self.health_seq,
        }
    }

    /// Load the columns of the selected table
    pub fn describe_selected(&mut self) -> Action {
        let (Some(catalog), Some(schema), Some(table)) = (
            self.selection.catalog(),
            self.selection.schema(),
            self.selection.table(),
        ) else {
            self.set_status("Select a table to describe".to_string(), StatusLevel::Warning);
            return Action::None;
        };
        let (catalog, schema, table) = (catalog.to_string(), schema.to_string(), table.to_string());

        self.details.show_loading(&table);
        let ticket = self.loads.issue(
            Level::Details,
            vec![catalog.clone(), schema.clone(), table.clone()],
        );
        Action::LoadDetails {
            ticket,
            catalog,
            schema,
            table,
        }
    }

    /// Copy `catalog.schema.table` of the deepest selection
    pub fn copy_qualified_name(&mut self) {
        match self.selection.qualified_name() {
            Some(name) => self.copy_to_clipboard(&name),
            None => self.set_status("Nothing selected".to_string(), StatusLevel::Warning),
        }
    }

    pub fn show_help(&mut self) {
        if self.focus != PanelFocus::Help {
            self.previous_focus = self.focus;
        }
        self.focus = PanelFocus::Help;
        self.help.show();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.status_message = None;

        // Try KeyMap first: global bindings, then panel-specific
        if let Some(key_action) = self.keymap.resolve(self.focus, key) {
            // Suppress global actions in modal panels so the key does not
            // fall through to the component (e.g. Ctrl+P typing 'p')
            let modal = matches!(self.focus, PanelFocus::CommandBar | PanelFocus::Help);
            match key_action {
                KeyAction::OpenCommandBar | KeyAction::CycleFocus | KeyAction::CycleFocusReverse
                    if modal =>
                {
                    return Action::None;
                }
                KeyAction::ShowHelp if self.focus == PanelFocus::CommandBar => {
                    return Action::None;
                }
                KeyAction::ShowHelp if self.focus == PanelFocus::Help => {
                    return self.execute_key_action(KeyAction::Dismiss);
                }
                _ => return self.execute_key_action(key_action),
            }
        }

        // Fall through to component for free-form text input
        let component_action = match self.focus {
            PanelFocus::CommandBar => self.command_bar.handle_key(key),
            _ => ComponentAction::Ignored,
        };
        self.process_component_action(component_action)
    }

    fn execute_key_action(&mut self, action: KeyAction) -> Action {
        match action {
            // ── Global ───────────────────────────────────────
            KeyAction::Quit => Action::Quit,
            KeyAction::OpenCommandBar => {
                self.open_command_bar();
                Action::None
            }
            KeyAction::CycleFocus => {
                self.cycle_focus();
                Action::None
            }
            KeyAction::CycleFocusReverse => {
                self.cycle_focus_reverse();
                Action::None
            }
            KeyAction::ShowHelp => {
                self.show_help();
                Action::None
            }

            // ── Navigation ───────────────────────────────────
            KeyAction::MoveUp => {
                match self.focus {
                    PanelFocus::Details => self.details.scroll_up(),
                    PanelFocus::Help => self.help.scroll_up(),
                    _ => self.with_focused_list(ListPanel::move_up),
                }
                Action::None
            }
            KeyAction::MoveDown => {
                match self.focus {
                    PanelFocus::Details => self.details.scroll_down(),
                    PanelFocus::Help => self.help.scroll_down(),
                    _ => self.with_focused_list(ListPanel::move_down),
                }
                Action::None
            }
            KeyAction::PageUp => {
                match self.focus {
                    PanelFocus::Help => self.help.page_up(),
                    _ => self.with_focused_list(ListPanel::page_up),
                }
                Action::None
            }
            KeyAction::PageDown => {
                match self.focus {
                    PanelFocus::Help => self.help.page_down(),
                    _ => self.with_focused_list(ListPanel::page_down),
                }
                Action::None
            }
            KeyAction::GoToTop => {
                match self.focus {
                    PanelFocus::Details => self.details.scroll_to_top(),
                    PanelFocus::Help => self.help.scroll_to_top(),
                    _ => self.with_focused_list(ListPanel::go_to_top),
                }
                Action::None
            }
            KeyAction::GoToBottom => {
                match self.focus {
                    PanelFocus::Details => self.details.scroll_to_bottom(),
                    PanelFocus::Help => self.help.scroll_to_bottom(),
                    _ => self.with_focused_list(ListPanel::go_to_bottom),
                }
                Action::None
            }

            // ── Browsing ─────────────────────────────────────
            KeyAction::Activate => match self.focused_list().and_then(ListPanel::selected_intent) {
                Some(intent) => self.dispatch(intent),
                None => Action::None,
            },
            KeyAction::Describe => {
                // Describing from the table list selects the row under the cursor first
                if self.focus == PanelFocus::Tables
                    && let Some(intent) = self.tables.selected_intent()
                {
                    self.dispatch(intent);
                }
                self.describe_selected()
            }
            KeyAction::CopyName => {
                self.copy_qualified_name();
                Action::None
            }
            KeyAction::Refresh => self.refresh(),

            // ── Modal dismiss/submit ─────────────────────────
            KeyAction::Dismiss => {
                match self.focus {
                    PanelFocus::CommandBar => {
                        self.command_bar.deactivate();
                        self.focus = self.previous_focus;
                    }
                    PanelFocus::Help => {
                        self.help.hide();
                        self.focus = self.previous_focus;
                    }
                    _ => {}
                }
                Action::None
            }
            KeyAction::Submit => {
                if self.focus != PanelFocus::CommandBar {
                    return Action::None;
                }
                let input = self.command_bar.input_text().to_string();
                self.command_bar.deactivate();
                self.focus = self.previous_focus;

                if input.trim().is_empty() {
                    return Action::None;
                }
                match parse_command(&input) {
                    Ok(command) => self.execute_command(command),
                    Err(e) => {
                        self.set_status(e.to_string(), StatusLevel::Error);
                        Action::None
                    }
                }
            }
        }
    }

    fn process_component_action(&mut self, action: ComponentAction) -> Action {
        // Components only return Consumed/Ignored for text input.
        // All meaningful actions are handled by KeyMap → execute_key_action.
        match action {
            ComponentAction::Consumed | ComponentAction::Ignored => Action::None,
        }
    }

    /// Whether a response for `ticket` still applies under the stale policy
    fn accepts(&self, ticket: &LoadTicket) -> bool {
        let accepted = self
            .loads
            .accepts(ticket, &self.selection, self.stale_policy);
        if !accepted {
            debug!(
                level = ?ticket.level,
                seq = ticket.seq,
                parents = ?ticket.parents,
                "discarding stale response"
            );
        }
        accepted
    }

    fn report_loaded(&mut self, level: Level, count: usize) {
        self.set_status(format!("Loaded {} {}", count, level.noun()), StatusLevel::Success);
    }

    fn focused_list(&self) -> Option<&ListPanel> {
        match self.focus {
            PanelFocus::Catalogs => Some(&self.catalogs),
            PanelFocus::Schemas => Some(&self.schemas),
            PanelFocus::Tables => Some(&self.tables),
            _ => None,
        }
    }

    fn with_focused_list(&mut self, f: fn(&mut ListPanel)) {
        match self.focus {
            PanelFocus::Catalogs => f(&mut self.catalogs),
            PanelFocus::Schemas => f(&mut self.schemas),
            PanelFocus::Tables => f(&mut self.tables),
            _ => {}
        }
    }

    fn is_focusable(&self, focus: PanelFocus) -> bool {
        match focus {
            PanelFocus::Catalogs => true,
            PanelFocus::Schemas => self.schemas.is_visible(),
            PanelFocus::Tables => self.tables.is_visible(),
            PanelFocus::Details => self.details.is_visible(),
            PanelFocus::CommandBar | PanelFocus::Help => false,
        }
    }

    /// Move focus to the next visible browsing panel, wrapping around
    pub fn cycle_focus(&mut self) {
        self.step_focus(true);
    }

    fn cycle_focus_reverse(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let Some(pos) = BROWSE_ORDER.iter().position(|f| *f == self.focus) else {
            return;
        };
        let n = BROWSE_ORDER.len();
        for step in 1..n {
            let idx = if forward {
                (pos + step) % n
            } else {
                (pos + n - step) % n
            };
            if self.is_focusable(BROWSE_ORDER[idx]) {
                self.focus = BROWSE_ORDER[idx];
                return;
            }
        }
    }

    fn open_command_bar(&mut self) {
        self.previous_focus = self.focus;
        self.focus = PanelFocus::CommandBar;
        self.command_bar.activate();
    }

    pub fn set_status(&mut self, message: String, level: StatusLevel) {
        self.status_message = Some(StatusMessage { message, level });
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => self.set_status(format!("Copied {}", text), StatusLevel::Success),
                Err(e) => {
                    self.set_status(format!("Clipboard error: {}", e), StatusLevel::Warning);
                }
            }
        } else {
            let reason = self.clipboard_error.as_deref().unwrap_or("unknown reason");
            self.set_status(
                format!("Clipboard unavailable: {}", reason),
                StatusLevel::Warning,
            );
        }
    }
}
