//! Keyboard action registry
//!
//! Every editor command is registered once with its label, shortcuts and an
//! enable condition. The run loop asks the registry which actions fired this
//! frame and feeds them to the editor; the HUD reads the same table for its
//! key hints.
//!
//! # Example
//! ```ignore
//! let registry = ActionRegistry::with_defaults();
//! for action in registry.process_triggers(&ActionContext::from_state(editor.state())) {
//!     editor.run_action(action, &store, &prompt);
//! }
//! ```

use macroquad::prelude::*;

use crate::editor::{EditorAction, EditorState};

/// A keyboard shortcut (key + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: KeyCode,
    pub ctrl: bool, // Cmd on Mac
    pub shift: bool,
    pub alt: bool,
}

impl Shortcut {
    /// Create a shortcut with just a key (no modifiers)
    pub fn key(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    /// Check if this shortcut is currently pressed
    pub fn is_pressed(&self) -> bool {
        if !is_key_pressed(self.key) {
            return false;
        }

        let ctrl_down = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);
        let shift_down = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let alt_down = is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt);

        self.ctrl == ctrl_down && self.shift == shift_down && self.alt == alt_down
    }

    /// Format shortcut for display (e.g., "Ctrl+S", "Esc")
    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl+");
        }
        if self.shift {
            parts.push("Shift+");
        }
        if self.alt {
            parts.push("Alt+");
        }
        parts.push(key_name(self.key));
        parts.join("")
    }
}

/// Get a human-readable name for a key
fn key_name(key: KeyCode) -> &'static str {
    match key {
        KeyCode::A => "A",
        KeyCode::O => "O",
        KeyCode::Q => "Q",
        KeyCode::S => "S",
        KeyCode::X => "X",
        KeyCode::Z => "Z",
        KeyCode::Key1 => "1",
        KeyCode::Key2 => "2",
        KeyCode::Key3 => "3",
        KeyCode::Key4 => "4",
        KeyCode::Key5 => "5",
        KeyCode::Key6 => "6",
        KeyCode::Key7 => "7",
        KeyCode::Key8 => "8",
        KeyCode::Key9 => "9",
        KeyCode::Escape => "Esc",
        _ => "?",
    }
}

/// Number keys bound to the sheet quick-switch actions
const SHEET_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// Context for checking action enable/disable conditions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionContext {
    /// Palette sheets loaded
    pub sheet_count: usize,
}

impl ActionContext {
    pub fn from_state(state: &EditorState) -> Self {
        Self {
            sheet_count: state.palette.sheets().len(),
        }
    }
}

/// Enable condition; receives the action so sheet keys can check their index
type EnableFn = fn(EditorAction, &ActionContext) -> bool;

/// Always enabled
fn always_enabled(_: EditorAction, _: &ActionContext) -> bool {
    true
}

/// A registered action
#[derive(Clone)]
pub struct Action {
    pub action: EditorAction,
    /// Human-readable label
    pub label: &'static str,
    pub shortcuts: Vec<Shortcut>,
    /// Function to check if action is enabled
    enabled_fn: EnableFn,
}

impl Action {
    pub fn new(action: EditorAction) -> Self {
        Self {
            action,
            label: "",
            shortcuts: Vec::new(),
            enabled_fn: always_enabled,
        }
    }

    /// Set the display label
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Add a keyboard shortcut
    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }

    /// Set the enable condition
    pub fn enabled_when(mut self, f: EnableFn) -> Self {
        self.enabled_fn = f;
        self
    }

    /// Check if this action is enabled in the given context
    pub fn is_enabled(&self, ctx: &ActionContext) -> bool {
        (self.enabled_fn)(self.action, ctx)
    }

    /// Check if one of this action's shortcuts is pressed and the action is enabled
    pub fn is_triggered(&self, ctx: &ActionContext) -> bool {
        self.is_enabled(ctx) && self.shortcuts.iter().any(Shortcut::is_pressed)
    }

    /// Shortcut list for display, e.g. "Q/Esc"
    pub fn shortcut_text(&self) -> String {
        self.shortcuts
            .iter()
            .map(Shortcut::display)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Central registry for all actions, in registration order
#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    /// Registry holding the editor's standard key map
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for action in editor_actions() {
            registry.register(action);
        }
        registry
    }

    /// Register an action (replaces an earlier registration of the same action)
    pub fn register(&mut self, action: Action) {
        self.actions.retain(|a| a.action != action.action);
        self.actions.push(action);
    }

    /// Get an action by its editor command
    #[cfg(test)]
    pub fn get(&self, action: EditorAction) -> Option<&Action> {
        self.actions.iter().find(|a| a.action == action)
    }

    /// Check if an action is enabled
    #[cfg(test)]
    pub fn is_enabled(&self, action: EditorAction, ctx: &ActionContext) -> bool {
        self.get(action).is_some_and(|a| a.is_enabled(ctx))
    }

    /// One-line key reference for the HUD (sheet keys collapsed to "1-9")
    pub fn help_line(&self) -> String {
        let mut parts: Vec<String> = self
            .actions
            .iter()
            .filter(|a| !matches!(a.action, EditorAction::SelectSheet(_)))
            .map(|a| format!("{} {}", a.shortcut_text(), a.label))
            .collect();
        if self.actions.iter().any(|a| matches!(a.action, EditorAction::SelectSheet(_))) {
            parts.push("1-9 Sheet".to_string());
        }
        parts.join("  ")
    }

    /// Process all triggered actions this frame, in registration order
    pub fn process_triggers(&self, ctx: &ActionContext) -> Vec<EditorAction> {
        self.actions
            .iter()
            .filter(|a| a.is_triggered(ctx))
            .map(|a| a.action)
            .collect()
    }
}

/// The editor's key map
pub fn editor_actions() -> Vec<Action> {
    let mut actions = vec![
        Action::new(EditorAction::OpenBase)
            .label("Open")
            .shortcut(Shortcut::key(KeyCode::O)),
        Action::new(EditorAction::AddSheet)
            .label("Add")
            .shortcut(Shortcut::key(KeyCode::A)),
        Action::new(EditorAction::Save)
            .label("Save")
            .shortcut(Shortcut::key(KeyCode::S)),
        Action::new(EditorAction::ToggleGrid)
            .label("Grid")
            .shortcut(Shortcut::key(KeyCode::Z)),
        Action::new(EditorAction::Erase)
            .label("Erase")
            .shortcut(Shortcut::key(KeyCode::X)),
        Action::new(EditorAction::Quit)
            .label("Quit")
            .shortcut(Shortcut::key(KeyCode::Q))
            .shortcut(Shortcut::key(KeyCode::Escape)),
    ];

    for (index, key) in SHEET_KEYS.iter().enumerate() {
        actions.push(
            Action::new(EditorAction::SelectSheet(index))
                .label("Sheet")
                .shortcut(Shortcut::key(*key))
                .enabled_when(|action, ctx| match action {
                    EditorAction::SelectSheet(i) => i < ctx.sheet_count,
                    _ => false,
                }),
        );
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_display() {
        assert_eq!(Shortcut::key(KeyCode::Escape).display(), "Esc");
        let s = Shortcut {
            ctrl: true,
            ..Shortcut::key(KeyCode::S)
        };
        assert_eq!(s.display(), "Ctrl+S");
    }

    #[test]
    fn test_default_key_map() {
        let registry = ActionRegistry::with_defaults();
        let keys = |action| {
            registry
                .get(action)
                .map(|a| a.shortcuts.iter().map(|s| s.key).collect::<Vec<_>>())
                .unwrap_or_default()
        };

        assert_eq!(keys(EditorAction::OpenBase), vec![KeyCode::O]);
        assert_eq!(keys(EditorAction::AddSheet), vec![KeyCode::A]);
        assert_eq!(keys(EditorAction::Save), vec![KeyCode::S]);
        assert_eq!(keys(EditorAction::ToggleGrid), vec![KeyCode::Z]);
        assert_eq!(keys(EditorAction::Erase), vec![KeyCode::X]);
        assert_eq!(keys(EditorAction::Quit), vec![KeyCode::Q, KeyCode::Escape]);
        assert_eq!(keys(EditorAction::SelectSheet(0)), vec![KeyCode::Key1]);
        assert_eq!(keys(EditorAction::SelectSheet(8)), vec![KeyCode::Key9]);
        assert!(registry.get(EditorAction::SelectSheet(9)).is_none());
    }

    #[test]
    fn test_erase_always_reaches_editor() {
        // NoCanvas and the holding-a-tile refusal are reported by the editor
        let registry = ActionRegistry::with_defaults();
        assert!(registry.is_enabled(EditorAction::Erase, &ActionContext::default()));
        assert!(registry.is_enabled(EditorAction::AddSheet, &ActionContext::default()));
    }

    #[test]
    fn test_sheet_keys_follow_sheet_count() {
        let registry = ActionRegistry::with_defaults();
        let ctx = ActionContext {
            sheet_count: 2,
            ..Default::default()
        };
        assert!(registry.is_enabled(EditorAction::SelectSheet(1), &ctx));
        assert!(!registry.is_enabled(EditorAction::SelectSheet(2), &ctx));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ActionRegistry::new();
        registry.register(Action::new(EditorAction::Save).label("Save"));
        registry.register(Action::new(EditorAction::Save).label("Export"));

        assert_eq!(registry.get(EditorAction::Save).map(|a| a.label), Some("Export"));
        assert_eq!(registry.process_triggers(&ActionContext::default()), Vec::new());
    }

    #[test]
    fn test_shortcut_text_and_help_line() {
        let registry = ActionRegistry::with_defaults();
        let quit = registry.get(EditorAction::Quit).unwrap();
        assert_eq!(quit.shortcut_text(), "Q/Esc");
        assert_eq!(
            registry.help_line(),
            "O Open  A Add  S Save  Z Grid  X Erase  Q/Esc Quit  1-9 Sheet"
        );
    }
}
