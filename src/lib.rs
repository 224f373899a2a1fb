pub mod config;
pub mod logging;
pub mod store;
pub mod tui;

/// Version string baked in at compile time by `build.rs`.
/// Format: `version-<7-char-commit-hash>`, or `dev` outside a git checkout.
pub const VERSION: &str = env!("EVENTBOARD_VERSION");

/// The snapshot the dashboard and the CLI listings start from.
pub fn initial_store(cfg: &config::Config) -> store::Store {
    if cfg.seed_sample_events {
        store::Store::seeded()
    } else {
        store::Store::new()
    }
}
