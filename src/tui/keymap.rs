use crossterm::event::{KeyCode, KeyModifiers};

// ── Actions ──────────────────────────────────────────────────────────

/// Every discrete action the dashboard performs from normal mode.
///
/// Actions are context-free identifiers; `App` decides what happens based on
/// the current focus and selected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Global
    Quit,
    ShowHelp,

    // Navigation
    MoveUp,
    MoveDown,
    FocusForm,
    FocusEvents,

    // Events
    NewEvent,
    Activate,
    Expand,
    Collapse,

    // Tasks
    NewTask,
}

// ── Help categories ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpCategory {
    Navigation,
    Events,
    Tasks,
    Editing,
}

impl HelpCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Events => "Events",
            Self::Tasks => "Tasks",
            Self::Editing => "Text Inputs",
        }
    }

    /// Fixed display order for the help overlay.
    const ORDERED: &[Self] = &[Self::Navigation, Self::Events, Self::Tasks, Self::Editing];
}

// ── Keybinding ───────────────────────────────────────────────────────

/// A single key → action mapping with metadata for the help overlay.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    /// Key label shown in help; empty for aliases.
    pub label: &'static str,
    pub description: &'static str,
    pub category: HelpCategory,
}

/// A single row in the help overlay.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub label: &'static str,
    pub description: &'static str,
}

// ── KeyMap ────────────────────────────────────────────────────────────

/// Declarative registry of the normal-mode key bindings.
pub struct KeyMap {
    pub normal: Vec<KeyBinding>,
}

impl KeyMap {
    pub fn default_keymap() -> Self {
        Self {
            normal: default_normal_bindings(),
        }
    }

    pub fn lookup_normal(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        // Terminals report Shift on some punctuation ('?'); match on the
        // character alone for those.
        let modifiers = if matches!(code, KeyCode::Char(_)) {
            modifiers - KeyModifiers::SHIFT
        } else {
            modifiers
        };
        self.normal
            .iter()
            .find(|kb| kb.code == code && kb.modifiers == modifiers)
            .map(|kb| kb.action)
    }

    /// Grouped help entries in display order.
    ///
    /// Text-input entries are hardcoded: those keys are handled by
    /// `TextInput`, not the normal table.
    pub fn help_entries(&self) -> Vec<(&'static str, Vec<HelpEntry>)> {
        let mut out = Vec::new();

        for &cat in HelpCategory::ORDERED {
            let mut entries: Vec<HelpEntry> = self
                .normal
                .iter()
                .filter(|kb| kb.category == cat && !kb.description.is_empty())
                .map(|kb| HelpEntry {
                    label: kb.label,
                    description: kb.description,
                })
                .collect();

            if cat == HelpCategory::Editing {
                entries.extend([
                    HelpEntry {
                        label: "  Enter",
                        description: "Submit (title field: next field)",
                    },
                    HelpEntry {
                        label: "  Tab",
                        description: "Switch title / date field",
                    },
                    HelpEntry {
                        label: "  Esc",
                        description: "Leave input",
                    },
                    HelpEntry {
                        label: "  Ctrl+W/U",
                        description: "Delete word / line",
                    },
                ]);
            }

            if !entries.is_empty() {
                out.push((cat.label(), entries));
            }
        }

        out
    }
}

// ── Default normal-mode bindings ─────────────────────────────────────

#[allow(clippy::enum_glob_use)]
fn default_normal_bindings() -> Vec<KeyBinding> {
    use Action::*;
    use HelpCategory::*;

    let bind = |code, modifiers, action, label, description, category| KeyBinding {
        code,
        modifiers,
        action,
        label,
        description,
        category,
    };
    let none = KeyModifiers::NONE;

    vec![
        // ── Navigation ───────────────────────────────────────────
        bind(KeyCode::Char('j'), none, MoveDown, "  j/k", "Navigate down/up", Navigation),
        bind(KeyCode::Char('k'), none, MoveUp, "", "", Navigation),
        bind(KeyCode::Down, none, MoveDown, "", "", Navigation),
        bind(KeyCode::Up, none, MoveUp, "", "", Navigation),
        bind(KeyCode::Char('1'), none, FocusForm, "  1/2", "Focus new-event form / events", Navigation),
        bind(KeyCode::Char('2'), none, FocusEvents, "", "", Navigation),
        bind(KeyCode::Char('?'), none, ShowHelp, "  ?", "This help screen", Navigation),
        bind(KeyCode::Char('q'), none, Quit, "  q", "Quit", Navigation),
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, Quit, "", "", Navigation),
        // ── Events ───────────────────────────────────────────────
        bind(KeyCode::Char('a'), none, NewEvent, "  a", "Add event", Events),
        bind(KeyCode::Enter, none, Activate, "  Enter/Space", "Open/close panel, toggle task", Events),
        bind(KeyCode::Char(' '), none, Activate, "", "", Events),
        bind(KeyCode::Char('l'), none, Expand, "  l/h", "Open / close panel", Events),
        bind(KeyCode::Right, none, Expand, "", "", Events),
        bind(KeyCode::Char('h'), none, Collapse, "", "", Events),
        bind(KeyCode::Left, none, Collapse, "", "", Events),
        // ── Tasks ────────────────────────────────────────────────
        bind(KeyCode::Char('n'), none, NewTask, "  n", "New task in selected event", Tasks),
    ]
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_quit_bindings() {
        let km = KeyMap::default_keymap();
        assert_eq!(
            km.lookup_normal(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
        assert_eq!(
            km.lookup_normal(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn lookup_help_ignores_shift() {
        let km = KeyMap::default_keymap();
        assert_eq!(
            km.lookup_normal(KeyCode::Char('?'), KeyModifiers::SHIFT),
            Some(Action::ShowHelp)
        );
    }

    #[test]
    fn enter_and_space_activate() {
        let km = KeyMap::default_keymap();
        for code in [KeyCode::Enter, KeyCode::Char(' ')] {
            assert_eq!(km.lookup_normal(code, KeyModifiers::NONE), Some(Action::Activate));
        }
    }

    #[test]
    fn unknown_key_has_no_action() {
        let km = KeyMap::default_keymap();
        assert_eq!(km.lookup_normal(KeyCode::Char('z'), KeyModifiers::NONE), None);
        assert_eq!(km.lookup_normal(KeyCode::Char('q'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn help_entries_cover_all_categories() {
        let km = KeyMap::default_keymap();
        let labels: Vec<&str> = km.help_entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Navigation", "Events", "Tasks", "Text Inputs"]);
    }

    #[test]
    fn help_entries_skip_aliases_and_have_no_duplicates() {
        let km = KeyMap::default_keymap();
        for (_, entries) in km.help_entries() {
            let mut seen = std::collections::HashSet::new();
            for e in &entries {
                assert!(!e.label.is_empty());
                assert!(seen.insert(e.label), "duplicate help label: {:?}", e.label);
            }
        }
    }

    #[test]
    fn no_binding_is_shadowed() {
        let km = KeyMap::default_keymap();
        let mut seen = std::collections::HashSet::new();
        for kb in &km.normal {
            assert!(
                seen.insert((kb.code, kb.modifiers)),
                "key bound twice: {:?}",
                kb.code
            );
        }
    }
}
