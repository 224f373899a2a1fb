mod app;
mod event;
mod form;
mod keymap;
pub mod theme;
mod ui;

use std::time::Duration;

use anyhow::Result;

use crate::store::Store;

pub use app::App;
use theme::Theme;

pub fn run(store: Store, theme: Theme, tick_rate: Duration) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = App::new(store, theme);
    tracing::info!(events = app.store.len(), "dashboard started");
    let result = app.run(&mut terminal, tick_rate);
    ratatui::restore();
    tracing::info!("dashboard closed");
    result
}
