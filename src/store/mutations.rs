use super::Store;
use super::models::{Event, Task};

impl Store {
    // ── Events ──

    /// Append a new event with `id = len + 1`.
    ///
    /// Empty `title` or `date` leaves the store unchanged.
    pub fn add_event(&self, title: &str, date: &str) -> Store {
        if title.is_empty() || date.is_empty() {
            tracing::debug!(title, date, "add_event skipped: title and date are required");
            return self.clone();
        }

        let id = self.events.len() as u32 + 1;
        let mut events = self.events.clone();
        events.push(Event::new(id, title, date));
        tracing::info!(id, title, date, "event added");
        Store { events }
    }

    // ── Tasks ──

    /// Append a task to the first event matching `event_id`, with
    /// `id = that event's task count + 1`. The title is not validated.
    pub fn add_task(&self, event_id: u32, title: &str) -> Store {
        let Some(pos) = self.events.iter().position(|e| e.id == event_id) else {
            tracing::debug!(event_id, "add_task skipped: no such event");
            return self.clone();
        };

        let mut events = self.events.clone();
        let event = &mut events[pos];
        let id = event.tasks.len() as u32 + 1;
        event.tasks.push(Task::new(id, title));
        tracing::debug!(event_id, task_id = id, "task added");
        Store { events }
    }

    /// Flip `completed` on every task with `task_id` inside every event with
    /// `event_id`. Duplicate ids are all toggled.
    pub fn toggle_task(&self, event_id: u32, task_id: u32) -> Store {
        let matched = self
            .events
            .iter()
            .filter(|e| e.id == event_id)
            .any(|e| e.tasks.iter().any(|t| t.id == task_id));
        if !matched {
            tracing::debug!(event_id, task_id, "toggle_task skipped: no such task");
            return self.clone();
        }

        let events = self
            .events
            .iter()
            .map(|event| {
                if event.id != event_id {
                    return event.clone();
                }
                Event {
                    tasks: event
                        .tasks
                        .iter()
                        .map(|task| {
                            if task.id == task_id {
                                Task {
                                    completed: !task.completed,
                                    ..task.clone()
                                }
                            } else {
                                task.clone()
                            }
                        })
                        .collect(),
                    ..event.clone()
                }
            })
            .collect();
        Store { events }
    }
}
