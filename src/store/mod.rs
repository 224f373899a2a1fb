//! In-memory event/task store.
//!
//! A [`Store`] is an immutable snapshot: every mutator takes `&self` and
//! returns a fresh `Store`, leaving earlier snapshots untouched. The caller
//! (the TUI) holds the current snapshot and replaces it after each call.

mod models;
mod mutations;

pub use models::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    events: Vec<Event>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn from_events(events: Vec<Event>) -> Self {
        Store { events }
    }

    /// The two sample events the dashboard starts with.
    pub fn seeded() -> Self {
        let task = |id, title: &str, completed| Task {
            id,
            title: title.to_string(),
            completed,
        };

        Store::from_events(vec![
            Event {
                id: 1,
                title: "Annual Conference".into(),
                date: "2024-06-15".into(),
                tasks: vec![
                    task(1, "Book venue", true),
                    task(2, "Send invitations", false),
                    task(3, "Arrange catering", false),
                ],
            },
            Event {
                id: 2,
                title: "Product Launch".into(),
                date: "2024-08-01".into(),
                tasks: vec![
                    task(1, "Finalize product details", true),
                    task(2, "Prepare marketing materials", true),
                    task(3, "Set up online store", false),
                ],
            },
        ])
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// First event with the given id.
    pub fn event(&self, id: u32) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
