use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::store::{Event, rounded_percent};

use super::app::{App, Focus, FormField, InputMode, Row};
use super::form::{self, TextInput};

const PROGRESS_BAR_WIDTH: usize = 24;

pub fn draw(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title(frame, app, outer[0]);
    draw_event_form(frame, app, outer[1]);
    draw_events(frame, app, outer[2]);
    draw_status(frame, app, outer[3]);

    if app.input_mode == InputMode::Help {
        draw_help(frame, app);
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Event Project Manager ",
            Style::default()
                .fg(app.theme.text_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            crate::VERSION,
            Style::default().fg(app.theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// One input field of the add-event card: the draft with a cursor while it
/// is being edited, the placeholder while empty.
fn input_spans<'a>(
    app: &App,
    label: &'a str,
    input: &TextInput,
    placeholder: &'a str,
    active: bool,
) -> Vec<Span<'a>> {
    let theme = &app.theme;
    let value = if active {
        Span::styled(input.display(), theme.form_field_style(true))
    } else if input.is_empty() {
        Span::styled(
            placeholder,
            Style::default()
                .fg(theme.form_dim)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(input.value().to_string(), Style::default().fg(theme.text_primary))
    };
    vec![
        Span::styled(label, theme.form_field_style(active)),
        value,
        Span::raw("   "),
    ]
}

fn draw_event_form(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::NewEvent;
    let block = Block::default()
        .title(" Add New Event ")
        .borders(Borders::ALL)
        .border_style(app.theme.border(editing || app.focus == Focus::Form));

    let mut spans = input_spans(
        app,
        " Title: ",
        &app.new_event_title,
        "Event Title",
        editing && app.form_field == FormField::Title,
    );
    spans.extend(input_spans(
        app,
        "Date: ",
        &app.new_event_date,
        "YYYY-MM-DD",
        editing && app.form_field == FormField::Date,
    ));
    spans.push(Span::styled(
        "[+ Add Event]",
        Style::default()
            .fg(app.theme.text_accent)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_events(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Events;
    let block = Block::default()
        .title(" Events ")
        .borders(Borders::ALL)
        .border_style(app.theme.border(focused));

    if app.store.is_empty() {
        let msg = Paragraph::new("  No events yet. Press 'a' to add one.")
            .style(Style::default().fg(app.theme.text_secondary))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let selected = if focused { app.selected_row() } else { None };
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_item = None;

    for (e, event) in app.store.events().iter().enumerate() {
        if selected == Some(Row::Event(e)) {
            selected_item = Some(items.len());
        }
        items.push(ListItem::new(event_header(app, event, selected == Some(Row::Event(e)))));

        if !app.is_expanded(event.id) {
            continue;
        }

        items.push(ListItem::new(Line::from(Span::styled(
            "      Tasks",
            Style::default()
                .fg(app.theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))));

        for (t, task) in event.tasks.iter().enumerate() {
            let is_selected = selected == Some(Row::Task { event: e, task: t });
            if is_selected {
                selected_item = Some(items.len());
            }
            items.push(ListItem::new(Line::from(vec![
                selection_marker(app, is_selected),
                Span::raw("    "),
                Span::styled(task.symbol(), app.theme.task_check_style(task.completed)),
                Span::raw(" "),
                Span::styled(&task.title, app.theme.task_title_style(task.completed)),
            ])));
        }

        items.push(ListItem::new(task_input_line(app, event)));
        items.push(ListItem::new(progress_line(app, event)));
        items.push(ListItem::new(Line::from("")));
    }

    let mut state = ListState::default().with_selected(selected_item);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn selection_marker(app: &App, selected: bool) -> Span<'static> {
    if selected {
        Span::styled("▸ ", Style::default().fg(app.theme.selection_indicator))
    } else {
        Span::raw("  ")
    }
}

fn event_header<'a>(app: &App, event: &'a Event, selected: bool) -> Line<'a> {
    let chevron = if app.is_expanded(event.id) { "▾ " } else { "▸ " };
    let title_style = if selected {
        Style::default()
            .fg(app.theme.text_primary)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
            .fg(app.theme.text_primary)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        selection_marker(app, selected),
        Span::styled(chevron, Style::default().fg(app.theme.text_accent)),
        Span::styled(&event.title, title_style),
        Span::styled("  ◷ ", Style::default().fg(app.theme.text_secondary)),
        Span::styled(&event.date, Style::default().fg(app.theme.date)),
    ])
}

fn task_input_line<'a>(app: &App, event: &Event) -> Line<'a> {
    let active =
        app.input_mode == InputMode::NewTask && app.task_target == Some(event.id);
    let field = if active {
        Span::styled(app.task_input.display(), app.theme.form_field_style(true))
    } else {
        Span::styled(
            "New task",
            Style::default()
                .fg(app.theme.form_dim)
                .add_modifier(Modifier::ITALIC),
        )
    };
    Line::from(vec![
        Span::raw("      "),
        Span::styled("+ ", app.theme.form_field_style(active)),
        field,
    ])
}

fn progress_line<'a>(app: &App, event: &Event) -> Line<'a> {
    let pct = event.progress();
    Line::from(vec![
        Span::styled(
            "      Progress ",
            Style::default().fg(app.theme.text_secondary),
        ),
        Span::styled(
            progress_bar(pct, PROGRESS_BAR_WIDTH),
            Style::default().fg(app.theme.progress_color(pct)),
        ),
        Span::styled(
            format!(" {:>3}%", rounded_percent(pct)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Text progress bar `width` cells wide. The fill is computed from the
/// unrounded percentage, with eighth-cell resolution.
pub fn progress_bar(pct: f64, width: usize) -> String {
    const PARTIALS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

    let eighths = ((pct.clamp(0.0, 100.0) / 100.0) * (width * 8) as f64).floor() as usize;
    let full = eighths / 8;
    let rem = eighths % 8;

    let mut bar = "█".repeat(full);
    if full < width {
        if rem > 0 {
            bar.push(PARTIALS[rem]);
        }
        let used = full + usize::from(rem > 0);
        bar.push_str(&"░".repeat(width - used));
    }
    bar
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    if !app.status_message.is_empty() {
        let line = Line::from(Span::styled(
            format!(" {}", app.status_message),
            Style::default()
                .fg(app.theme.status_message)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::NewEvent => &[
            (" Tab", ":switch field  "),
            ("Enter", ":next/add  "),
            ("Esc", ":back"),
        ],
        InputMode::NewTask => &[(" Enter", ":add task  "), ("Esc", ":done")],
        InputMode::Help => &[(" any key", ":close help")],
        InputMode::Normal => &[
            (" a", ":add event  "),
            ("n", ":new task  "),
            ("Enter", ":open/toggle  "),
            ("j/k", ":navigate  "),
            ("?", ":help  "),
            ("q", ":quit"),
        ],
    };
    form::render_hints(
        frame,
        area,
        hints,
        Style::default().fg(app.theme.text_accent),
        Style::default().fg(app.theme.text_secondary),
    );
}

fn draw_help(frame: &mut Frame, app: &App) {
    let sections = app.keymap.help_entries();
    let rows: usize = sections.iter().map(|(_, entries)| entries.len() + 2).sum();
    let inner = form::render_modal(
        frame,
        " Keys ",
        app.theme.focused_border(),
        56,
        rows as u16 + 2,
    );

    let mut lines = Vec::new();
    for (title, entries) in sections {
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_accent)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<16}", entry.label),
                    Style::default().fg(app.theme.form_highlight),
                ),
                Span::styled(entry.description, Style::default().fg(app.theme.text_primary)),
            ]));
        }
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}
