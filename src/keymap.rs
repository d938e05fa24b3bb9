//! Data-driven keybinding configuration
//!
//! All keybindings are defined as data in `KeyMap::default()`, not as match arms
//! scattered across components. To add a new binding, add an entry to the
//! appropriate context in `KeyMap::default()` and handle the `KeyAction` in
//! `App::execute_key_action()`.

use crate::app::PanelFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Semantic key actions: what a key means, not what key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Global
    Quit,
    OpenCommandBar,
    CycleFocus,
    CycleFocusReverse,
    ShowHelp,

    // Navigation (shared by lists, columns and help)
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Browsing
    Activate,
    Describe,
    CopyName,
    Refresh,

    // Modal dismiss/submit
    Dismiss,
    Submit,
}

type Bindings = HashMap<KeyBind, KeyAction>;

/// Keybinding configuration: maps key combos to semantic actions per context.
pub struct KeyMap {
    /// Bindings that apply regardless of focus (checked first)
    global: Bindings,
    /// Per-panel bindings (checked after global)
    panels: HashMap<PanelFocus, Bindings>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action.
    /// Checks global bindings first, then panel-specific bindings.
    pub fn resolve(&self, focus: PanelFocus, key: KeyEvent) -> Option<KeyAction> {
        let bind = KeyBind::from(key);
        if let Some(action) = self.global.get(&bind) {
            return Some(*action);
        }
        self.panels
            .get(&focus)
            .and_then(|m| m.get(&bind))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let global = Bindings::from([
            (KeyBind::ctrl('q'), KeyAction::Quit),
            (KeyBind::ctrl('c'), KeyAction::Quit),
            (KeyBind::ctrl('p'), KeyAction::OpenCommandBar),
            (KeyBind::plain(KeyCode::Tab), KeyAction::CycleFocus),
            (
                KeyBind::new(KeyCode::BackTab, KeyModifiers::SHIFT),
                KeyAction::CycleFocusReverse,
            ),
            (KeyBind::plain(KeyCode::F(1)), KeyAction::ShowHelp),
        ]);

        let mut panels = HashMap::new();

        // ── Catalog / schema / table lists ───────────────────────
        let mut list = Bindings::new();
        insert_scroll_nav(&mut list);
        insert_browse_keys(&mut list);
        list.insert(KeyBind::plain(KeyCode::Enter), KeyAction::Activate);
        list.insert(KeyBind::plain(KeyCode::Char('l')), KeyAction::Activate);
        list.insert(KeyBind::plain(KeyCode::Right), KeyAction::Activate);
        list.insert(KeyBind::plain(KeyCode::Char('r')), KeyAction::Refresh);
        for focus in [PanelFocus::Catalogs, PanelFocus::Schemas, PanelFocus::Tables] {
            panels.insert(focus, list.clone());
        }

        // ── Columns ──────────────────────────────────────────────
        let mut details = Bindings::new();
        insert_scroll_nav(&mut details);
        insert_browse_keys(&mut details);
        panels.insert(PanelFocus::Details, details);

        // ── Help ─────────────────────────────────────────────────
        let mut help = Bindings::new();
        insert_scroll_nav(&mut help);
        help.insert(KeyBind::plain(KeyCode::Esc), KeyAction::Dismiss);
        help.insert(KeyBind::plain(KeyCode::Char('q')), KeyAction::Dismiss);
        help.insert(KeyBind::plain(KeyCode::Char('?')), KeyAction::Dismiss);
        help.insert(
            KeyBind::new(KeyCode::Char('?'), KeyModifiers::SHIFT),
            KeyAction::Dismiss,
        );
        panels.insert(PanelFocus::Help, help);

        // ── Command bar ──────────────────────────────────────────
        let command_bar = Bindings::from([
            (KeyBind::plain(KeyCode::Enter), KeyAction::Submit),
            (KeyBind::plain(KeyCode::Esc), KeyAction::Dismiss),
        ]);
        panels.insert(PanelFocus::CommandBar, command_bar);

        Self { global, panels }
    }
}

/// Describe, copy, help and command bar keys shared by every browsing panel.
/// `?` and `:` are registered with and without SHIFT since terminals differ.
fn insert_browse_keys(map: &mut Bindings) {
    map.insert(KeyBind::plain(KeyCode::Char('d')), KeyAction::Describe);
    map.insert(KeyBind::plain(KeyCode::Char('y')), KeyAction::CopyName);
    for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT] {
        map.insert(
            KeyBind::new(KeyCode::Char('?'), modifiers),
            KeyAction::ShowHelp,
        );
        map.insert(
            KeyBind::new(KeyCode::Char(':'), modifiers),
            KeyAction::OpenCommandBar,
        );
    }
}

/// Insert vertical navigation bindings (arrows + jk + page + g/G + Home/End)
fn insert_scroll_nav(map: &mut Bindings) {
    map.insert(KeyBind::plain(KeyCode::Down), KeyAction::MoveDown);
    map.insert(KeyBind::plain(KeyCode::Char('j')), KeyAction::MoveDown);
    map.insert(KeyBind::plain(KeyCode::Up), KeyAction::MoveUp);
    map.insert(KeyBind::plain(KeyCode::Char('k')), KeyAction::MoveUp);
    map.insert(KeyBind::plain(KeyCode::PageDown), KeyAction::PageDown);
    map.insert(KeyBind::plain(KeyCode::PageUp), KeyAction::PageUp);
    map.insert(KeyBind::plain(KeyCode::Char('g')), KeyAction::GoToTop);
    map.insert(
        KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
        KeyAction::GoToBottom,
    );
    map.insert(KeyBind::plain(KeyCode::Char('G')), KeyAction::GoToBottom);
    map.insert(KeyBind::plain(KeyCode::Home), KeyAction::GoToTop);
    map.insert(KeyBind::plain(KeyCode::End), KeyAction::GoToBottom);
}
