use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::store::{Event, Store, Task};

use super::event::{self, AppEvent};
use super::form::TextInput;
use super::keymap::{Action, KeyMap};
use super::theme::Theme;
use super::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Events,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NewEvent,
    NewTask,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Date,
}

/// A selectable line in the event list, as indices into the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Event(usize),
    Task { event: usize, task: usize },
}

impl Row {
    pub fn event_index(self) -> usize {
        match self {
            Row::Event(e) | Row::Task { event: e, .. } => e,
        }
    }
}

pub struct App {
    /// Current snapshot; replaced wholesale by every mutation.
    pub store: Store,
    pub keymap: KeyMap,
    pub theme: Theme,
    pub should_quit: bool,
    pub focus: Focus,
    pub input_mode: InputMode,

    // Panel open state (event id -> open). Absent means closed.
    pub expanded: HashMap<u32, bool>,

    // Index into `rows()`
    pub row_index: usize,

    // Add-event form drafts
    pub form_field: FormField,
    pub new_event_title: TextInput,
    pub new_event_date: TextInput,

    // Task input, bound to one event while active
    pub task_input: TextInput,
    pub task_target: Option<u32>,

    pub status_message: String,
}

impl App {
    pub fn new(store: Store, theme: Theme) -> Self {
        let focus = if store.is_empty() {
            Focus::Form
        } else {
            Focus::Events
        };
        App {
            store,
            keymap: KeyMap::default_keymap(),
            theme,
            should_quit: false,
            focus,
            input_mode: InputMode::Normal,
            expanded: HashMap::new(),
            row_index: 0,
            form_field: FormField::Title,
            new_event_title: TextInput::default(),
            new_event_date: TextInput::default(),
            task_input: TextInput::default(),
            task_target: None,
            status_message: String::new(),
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal, tick_rate: Duration) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let AppEvent::Key(key) = event::poll(tick_rate)? {
                self.handle_key(key.code, key.modifiers);
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // ── Queries ──

    pub fn is_expanded(&self, event_id: u32) -> bool {
        self.expanded.get(&event_id).copied().unwrap_or(false)
    }

    /// Event headers plus the task rows of open panels, in display order.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (e, event) in self.store.events().iter().enumerate() {
            rows.push(Row::Event(e));
            if self.is_expanded(event.id) {
                rows.extend((0..event.tasks.len()).map(|t| Row::Task { event: e, task: t }));
            }
        }
        rows
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows().get(self.row_index).copied()
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_row()
            .and_then(|row| self.store.events().get(row.event_index()))
    }

    pub fn selected_task(&self) -> Option<(&Event, &Task)> {
        match self.selected_row()? {
            Row::Task { event, task } => {
                let event = self.store.events().get(event)?;
                Some((event, event.tasks.get(task)?))
            }
            Row::Event(_) => None,
        }
    }

    // ── Key handling ──

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.status_message.clear();
        match self.input_mode {
            InputMode::Normal => {
                if let Some(action) = self.keymap.lookup_normal(code, modifiers) {
                    self.execute(action);
                }
            }
            InputMode::NewEvent => self.handle_event_form_key(code, modifiers),
            InputMode::NewTask => self.handle_task_input_key(code, modifiers),
            InputMode::Help => self.input_mode = InputMode::Normal,
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ShowHelp => self.input_mode = InputMode::Help,
            Action::MoveDown => self.move_down(),
            Action::MoveUp => self.move_up(),
            Action::FocusForm => self.focus = Focus::Form,
            Action::FocusEvents => self.focus = Focus::Events,
            Action::NewEvent => self.open_event_form(),
            Action::Activate => match self.focus {
                Focus::Form => self.open_event_form(),
                Focus::Events => self.activate_selected(),
            },
            Action::Expand => {
                if self.focus == Focus::Events
                    && let Some(id) = self.selected_event().map(|e| e.id)
                {
                    self.expanded.insert(id, true);
                }
            }
            Action::Collapse => {
                if self.focus == Focus::Events {
                    self.collapse_selected();
                }
            }
            Action::NewTask => self.open_task_input(),
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Form => {
                if !self.store.is_empty() {
                    self.focus = Focus::Events;
                }
            }
            Focus::Events => {
                let count = self.rows().len();
                if count > 0 {
                    self.row_index = (self.row_index + 1).min(count - 1);
                }
            }
        }
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Form => {}
            Focus::Events => {
                if self.row_index == 0 {
                    self.focus = Focus::Form;
                } else {
                    self.row_index -= 1;
                }
            }
        }
    }

    /// Enter/Space on the event list: open or close a panel, or toggle a task.
    fn activate_selected(&mut self) {
        match self.selected_row() {
            Some(Row::Event(e)) => {
                if let Some(id) = self.store.events().get(e).map(|ev| ev.id) {
                    let open = !self.is_expanded(id);
                    self.expanded.insert(id, open);
                }
            }
            Some(Row::Task { .. }) => {
                if let Some((event_id, task_id)) = self.selected_task().map(|(e, t)| (e.id, t.id)) {
                    self.store = self.store.toggle_task(event_id, task_id);
                }
            }
            None => {}
        }
    }

    /// Close the selected panel and move the cursor onto its header.
    fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let e = row.event_index();
        let Some(id) = self.store.events().get(e).map(|ev| ev.id) else {
            return;
        };
        self.expanded.insert(id, false);
        if let Some(pos) = self.rows().iter().position(|r| *r == Row::Event(e)) {
            self.row_index = pos;
        }
    }

    // ── Add event form ──

    fn open_event_form(&mut self) {
        self.focus = Focus::Form;
        self.form_field = FormField::Title;
        self.input_mode = InputMode::NewEvent;
    }

    fn handle_event_form_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::BackTab => {
                self.form_field = match self.form_field {
                    FormField::Title => FormField::Date,
                    FormField::Date => FormField::Title,
                };
            }
            KeyCode::Enter => match self.form_field {
                FormField::Title => self.form_field = FormField::Date,
                FormField::Date => self.submit_new_event(),
            },
            _ => {
                let input = match self.form_field {
                    FormField::Title => &mut self.new_event_title,
                    FormField::Date => &mut self.new_event_date,
                };
                input.handle_key(code, modifiers);
            }
        }
    }

    /// Add the drafted event. On success the drafts are cleared and the new
    /// event is selected; otherwise nothing changes.
    pub fn submit_new_event(&mut self) {
        let next = self
            .store
            .add_event(self.new_event_title.value(), self.new_event_date.value());
        if next.len() == self.store.len() {
            return;
        }

        self.store = next;
        self.status_message = format!("Added event '{}'", self.new_event_title.value());
        self.new_event_title.clear();
        self.new_event_date.clear();
        self.form_field = FormField::Title;
        self.input_mode = InputMode::Normal;
        self.focus = Focus::Events;

        let last = self.store.len() - 1;
        if let Some(pos) = self.rows().iter().position(|r| *r == Row::Event(last)) {
            self.row_index = pos;
        }
    }

    // ── Task input ──

    fn open_task_input(&mut self) {
        if self.focus != Focus::Events {
            return;
        }
        let Some(id) = self.selected_event().map(|e| e.id) else {
            return;
        };
        self.expanded.insert(id, true);
        self.task_target = Some(id);
        self.task_input.clear();
        self.input_mode = InputMode::NewTask;
    }

    fn handle_task_input_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => {
                self.task_input.clear();
                self.task_target = None;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.submit_task(),
            _ => {
                self.task_input.handle_key(code, modifiers);
            }
        }
    }

    /// Add whatever is in the task input (empty titles included) and keep the
    /// input open for the next one.
    pub fn submit_task(&mut self) {
        let Some(event_id) = self.task_target else {
            return;
        };
        let title = self.task_input.take();
        self.store = self.store.add_task(event_id, &title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Store::seeded(), Theme::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::NONE);
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn panels_start_closed() {
        let app = app();
        assert_eq!(app.rows(), vec![Row::Event(0), Row::Event(1)]);
        assert_eq!(app.focus, Focus::Events);
    }

    #[test]
    fn empty_store_starts_on_form() {
        let app = App::new(Store::new(), Theme::default());
        assert_eq!(app.focus, Focus::Form);
        assert!(app.rows().is_empty());
    }

    #[test]
    fn enter_toggles_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.is_expanded(1));
        assert_eq!(app.rows().len(), 5);
        press(&mut app, KeyCode::Enter);
        assert!(!app.is_expanded(1));
        assert_eq!(app.rows().len(), 2);
    }

    #[test]
    fn space_on_task_row_toggles_completion() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_row(), Some(Row::Task { event: 0, task: 0 }));

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.store.event(1).unwrap().tasks[0].completed);
        assert!(app.store.event(1).unwrap().progress().abs() < f64::EPSILON);
    }

    #[test]
    fn collapse_from_task_row_selects_header() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_row(), Some(Row::Task { event: 1, task: 1 }));

        press(&mut app, KeyCode::Char('h'));
        assert!(!app.is_expanded(2));
        assert_eq!(app.selected_row(), Some(Row::Event(1)));
    }

    #[test]
    fn navigation_clamps_and_reaches_form() {
        let mut app = app();
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.row_index, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::Form);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Focus::Events);
    }

    #[test]
    fn add_event_through_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::NewEvent);
        type_str(&mut app, "Workshop");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form_field, FormField::Date);
        type_str(&mut app, "2024-09-10");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.len(), 3);
        let event = app.store.event(3).unwrap();
        assert_eq!(event.title, "Workshop");
        assert_eq!(event.date, "2024-09-10");
        assert!(app.new_event_title.is_empty());
        assert!(app.new_event_date.is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.selected_row(), Some(Row::Event(2)));
        assert!(!app.status_message.is_empty());
    }

    #[test]
    fn incomplete_event_form_keeps_drafts() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Workshop");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.len(), 2);
        assert_eq!(app.new_event_title.value(), "Workshop");
        assert_eq!(app.input_mode, InputMode::NewEvent);
    }

    #[test]
    fn escape_leaves_form_keeping_drafts() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Half");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.new_event_title.value(), "Half");
    }

    #[test]
    fn typing_q_in_form_does_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "quiz");
        assert!(!app.should_quit);
        assert_eq!(app.new_event_title.value(), "quiz");
    }

    #[test]
    fn task_input_adds_tasks_until_escape() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::NewTask);
        assert_eq!(app.task_target, Some(2));
        assert!(app.is_expanded(2));

        type_str(&mut app, "Press release");
        press(&mut app, KeyCode::Enter);
        assert!(app.task_input.is_empty());
        assert_eq!(app.input_mode, InputMode::NewTask);

        // Empty titles are accepted
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        let tasks = &app.store.event(2).unwrap().tasks;
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[3].id, 4);
        assert_eq!(tasks[3].title, "Press release");
        assert_eq!(tasks[4].title, "");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.task_target, None);
    }

    #[test]
    fn new_task_needs_event_focus() {
        let mut app = App::new(Store::new(), Theme::default());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn workshop_scenario() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Workshop");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2024-09-10");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Book room");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_row(), Some(Row::Task { event: 2, task: 0 }));
        press(&mut app, KeyCode::Enter);

        let event = app.store.event(3).unwrap();
        assert_eq!(event.tasks[0].id, 1);
        assert!(event.tasks[0].completed);
        assert!((event.progress() - 100.0).abs() < f64::EPSILON);
    }
}
