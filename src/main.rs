use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use eventboard::store::rounded_percent;
use eventboard::{config, logging, tui};

#[derive(Parser)]
#[command(
    name = "eventboard",
    about = "Track events and their task checklists",
    version = eventboard::VERSION
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the TUI dashboard (default)
    Dashboard,
    /// Create ~/.eventboard/ and a default config.toml
    Init,
    /// Print the starting events with their task progress
    List,
    /// Print the starting events as JSON
    Export {
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Init => {
            config::ensure_dirs()?;
            let path = config::config_path()?;
            if config::write_default(&path)? {
                println!("eventboard initialized at {}", path.display());
            } else {
                println!("{} already exists", path.display());
            }
            Ok(())
        }
        Commands::List => {
            let cfg = config::load()?;
            let store = eventboard::initial_store(&cfg);
            if store.is_empty() {
                println!("No events.");
                return Ok(());
            }
            for event in store.events() {
                println!(
                    "  {} ({}) {}/{} tasks, {}%",
                    event.title,
                    event.date,
                    event.completed_count(),
                    event.tasks.len(),
                    rounded_percent(event.progress()),
                );
                for task in &event.tasks {
                    println!("    {} {}", task.symbol(), task.title);
                }
            }
            Ok(())
        }
        Commands::Export { compact } => {
            let cfg = config::load()?;
            let store = eventboard::initial_store(&cfg);
            let json = if compact {
                serde_json::to_string(&store)
            } else {
                serde_json::to_string_pretty(&store)
            }
            .context("failed to encode events")?;
            println!("{json}");
            Ok(())
        }
        Commands::Dashboard => {
            let cfg = config::load()?;
            logging::init(&cfg)?;
            let store = eventboard::initial_store(&cfg);
            let theme = cfg.theme.build();
            tui::run(store, theme, Duration::from_millis(cfg.tick_rate_ms))
        }
    }
}
