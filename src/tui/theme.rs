use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Semantic colour theme for the dashboard.
///
/// Every colour used by the renderer is stored here so the user can
/// override any of them via `[theme]` in `config.toml`.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Borders ───────────────────────────────────────────────
    pub border_focused: Color,
    pub border_unfocused: Color,

    // ── Text ──────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_accent: Color,
    pub date: Color,

    // ── Tasks ─────────────────────────────────────────────────
    pub task_done: Color,
    pub task_open: Color,

    // ── Progress bar ──────────────────────────────────────────
    pub progress_low: Color,
    pub progress_medium: Color,
    pub progress_high: Color,

    // ── Forms ─────────────────────────────────────────────────
    pub form_highlight: Color,
    pub form_dim: Color,

    // ── Misc ──────────────────────────────────────────────────
    pub selection_indicator: Color,
    pub status_message: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_focused: Color::Cyan,
            border_unfocused: Color::DarkGray,

            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            text_accent: Color::Cyan,
            date: Color::Gray,

            task_done: Color::Green,
            task_open: Color::DarkGray,

            progress_low: Color::Red,
            progress_medium: Color::Yellow,
            progress_high: Color::Green,

            form_highlight: Color::Yellow,
            form_dim: Color::DarkGray,

            selection_indicator: Color::Cyan,
            status_message: Color::Yellow,
        }
    }
}

impl Theme {
    /// Style for a focused panel border.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Style for an unfocused panel border.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.border_unfocused)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.focused_border()
        } else {
            self.unfocused_border()
        }
    }

    /// Check glyph style: green when done, gray otherwise.
    pub fn task_check_style(&self, completed: bool) -> Style {
        if completed {
            Style::default().fg(self.task_done)
        } else {
            Style::default().fg(self.task_open)
        }
    }

    /// Task title style; completed tasks are struck through.
    pub fn task_title_style(&self, completed: bool) -> Style {
        let style = Style::default().fg(self.text_primary);
        if completed {
            style.add_modifier(Modifier::CROSSED_OUT)
        } else {
            style
        }
    }

    /// Colour for a progress bar at the given percentage.
    pub fn progress_color(&self, pct: f64) -> Color {
        if pct >= 100.0 {
            self.progress_high
        } else if pct >= 50.0 {
            self.progress_medium
        } else {
            self.progress_low
        }
    }

    /// Style for the field currently being edited in a form.
    pub fn form_field_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.form_highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.form_dim)
        }
    }
}

// ── Config deserialization ────────────────────────────────────────────

/// All-optional mirror of [`Theme`] for `config.toml` `[theme]` section.
///
/// Only `Some` fields override the default; everything else keeps its default.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ThemeConfig {
    pub border_focused: Option<String>,
    pub border_unfocused: Option<String>,

    pub text_primary: Option<String>,
    pub text_secondary: Option<String>,
    pub text_accent: Option<String>,
    pub date: Option<String>,

    pub task_done: Option<String>,
    pub task_open: Option<String>,

    pub progress_low: Option<String>,
    pub progress_medium: Option<String>,
    pub progress_high: Option<String>,

    pub form_highlight: Option<String>,
    pub form_dim: Option<String>,

    pub selection_indicator: Option<String>,
    pub status_message: Option<String>,
}

/// Parse a colour string into a ratatui `Color`.
///
/// Supports named colours (`"cyan"`, `"red"`, `"dark_gray"`, etc.) and
/// `"rgb(R,G,B)"` syntax.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }

    // Named colours (case-insensitive, with underscore tolerance)
    let lower = s.to_lowercase().replace('-', "_");
    match lower.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "light_red" | "lightred" => Some(Color::LightRed),
        "light_green" | "lightgreen" => Some(Color::LightGreen),
        "light_yellow" | "lightyellow" => Some(Color::LightYellow),
        "light_blue" | "lightblue" => Some(Color::LightBlue),
        "light_magenta" | "lightmagenta" => Some(Color::LightMagenta),
        "light_cyan" | "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Overwrite `target` if `source` parses to a colour. Unparseable values are
/// logged and ignored.
fn apply(target: &mut Color, key: &str, source: Option<&String>) {
    let Some(s) = source else {
        return;
    };
    match parse_color(s) {
        Some(color) => *target = color,
        None => tracing::warn!("ignoring theme.{key}: unknown colour '{s}'"),
    }
}

impl ThemeConfig {
    /// Build a `Theme` starting from defaults, overriding any fields that were
    /// set in the config file.
    pub fn build(&self) -> Theme {
        let mut t = Theme::default();

        let overrides: [(&mut Color, &str, Option<&String>); 15] = [
            (&mut t.border_focused, "border_focused", self.border_focused.as_ref()),
            (&mut t.border_unfocused, "border_unfocused", self.border_unfocused.as_ref()),
            (&mut t.text_primary, "text_primary", self.text_primary.as_ref()),
            (&mut t.text_secondary, "text_secondary", self.text_secondary.as_ref()),
            (&mut t.text_accent, "text_accent", self.text_accent.as_ref()),
            (&mut t.date, "date", self.date.as_ref()),
            (&mut t.task_done, "task_done", self.task_done.as_ref()),
            (&mut t.task_open, "task_open", self.task_open.as_ref()),
            (&mut t.progress_low, "progress_low", self.progress_low.as_ref()),
            (&mut t.progress_medium, "progress_medium", self.progress_medium.as_ref()),
            (&mut t.progress_high, "progress_high", self.progress_high.as_ref()),
            (&mut t.form_highlight, "form_highlight", self.form_highlight.as_ref()),
            (&mut t.form_dim, "form_dim", self.form_dim.as_ref()),
            (
                &mut t.selection_indicator,
                "selection_indicator",
                self.selection_indicator.as_ref(),
            ),
            (&mut t.status_message, "status_message", self.status_message.as_ref()),
        ];
        for (target, key, source) in overrides {
            apply(target, key, source);
        }

        t
    }
}
