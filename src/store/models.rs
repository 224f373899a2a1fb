use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: u32, title: &str) -> Self {
        Task {
            id,
            title: title.to_string(),
            completed: false,
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.completed { "✓" } else { "○" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub title: String,
    /// `YYYY-MM-DD` by convention; only checked for presence.
    pub date: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Event {
    pub fn new(id: u32, title: &str, date: &str) -> Self {
        Event {
            id,
            title: title.to_string(),
            date: date.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn progress(&self) -> f64 {
        progress(&self.tasks)
    }
}

/// Percentage of `tasks` marked completed, in `[0, 100]`. An empty list is 0.
pub fn progress(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    (completed as f64 / tasks.len() as f64) * 100.0
}

/// Integer readout of a progress value (nearest, halves away from zero).
pub fn rounded_percent(pct: f64) -> u8 {
    pct.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(flags: &[bool]) -> Vec<Task> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &completed)| Task {
                id: i as u32 + 1,
                title: format!("task {}", i + 1),
                completed,
            })
            .collect()
    }

    #[test]
    fn progress_of_empty_list_is_zero() {
        assert!(progress(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_counts_completed_fraction() {
        let cases: &[(&[bool], f64)] = &[
            (&[true], 100.0),
            (&[false], 0.0),
            (&[true, false], 50.0),
            (&[true, false, false], 100.0 / 3.0),
            (&[true, true, false], 200.0 / 3.0),
            (&[true, true, true, false], 75.0),
        ];
        for (flags, expected) in cases {
            let got = progress(&tasks(flags));
            assert!((got - expected).abs() < 1e-9, "{flags:?}: {got} != {expected}");
        }
    }

    #[test]
    fn rounded_percent_rounds_to_nearest() {
        assert_eq!(rounded_percent(100.0 / 3.0), 33);
        assert_eq!(rounded_percent(200.0 / 3.0), 67);
        assert_eq!(rounded_percent(50.0), 50);
        assert_eq!(rounded_percent(0.0), 0);
        assert_eq!(rounded_percent(100.0), 100);
    }

    #[test]
    fn new_task_starts_open() {
        let task = Task::new(4, "Hire band");
        assert!(!task.completed);
        assert_eq!(task.symbol(), "\u{25cb}");
    }

    #[test]
    fn event_completed_count() {
        let mut event = Event::new(1, "Gala", "2024-12-01");
        assert_eq!(event.completed_count(), 0);
        event.tasks = tasks(&[true, false, true]);
        assert_eq!(event.completed_count(), 2);
    }

    #[test]
    fn event_deserializes_without_tasks() {
        let event: Event =
            serde_json::from_str(r#"{"id":7,"title":"Retreat","date":"2025-03-02"}"#).unwrap();
        assert_eq!(event.id, 7);
        assert!(event.tasks.is_empty());
    }
}
