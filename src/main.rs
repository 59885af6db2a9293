use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pulsequest::config::Settings;
use pulsequest::engine::EventsService;
use pulsequest::store::SqliteStore;

mod cli;

#[derive(Parser)]
#[command(name = "pulsequest")]
#[command(about = "Gamified ECG interpretation training")]
#[command(version)]
struct Cli {
    /// Directory for the state database (defaults to ~/.pulsequest)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events with progress summaries
    Events,

    /// Show one event's days and tasks
    Show {
        /// Event id (falls back to default_event from settings)
        event_id: Option<String>,
    },

    /// Record a task completion
    Complete {
        event_id: String,
        task_id: String,

        /// Score achieved (doubles as XP)
        #[arg(long)]
        score: u32,

        /// Minutes spent on the task
        #[arg(long, default_value_t = 0)]
        minutes: u32,

        /// Owning day id; resolved from the catalog when omitted
        #[arg(long)]
        day: Option<String>,
    },

    /// Show overall stats, rank and streak
    Stats,

    /// Write a progress backup (stdout unless --out is given)
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Restore progress from a backup file
    Import { file: PathBuf },

    /// Clear all progress (catalog cache is kept)
    Reset {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Regenerate the content catalog cache
    Regen,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let settings = Settings::load();
    let data_dir = settings.resolve_data_dir(cli.data_dir.as_deref());
    let store = SqliteStore::open(&data_dir.join("state.db"))?;
    let mut service = EventsService::new(Arc::new(store));

    match cli.command {
        Commands::Events => cli::events::events_command(&service)?,
        Commands::Show { event_id } => {
            let target = event_id.or(settings.default_event);
            match target {
                Some(id) => cli::events::show_command(&service, &id)?,
                None => println!("No event given and no default_event configured."),
            }
        }
        Commands::Complete {
            event_id,
            task_id,
            score,
            minutes,
            day,
        } => {
            cli::complete::complete_command(&mut service, &event_id, &task_id, score, minutes, day)?
        }
        Commands::Stats => cli::stats::stats_command(&service)?,
        Commands::Export { out } => cli::transfer::export_command(&service, out)?,
        Commands::Import { file } => cli::transfer::import_command(&mut service, &file)?,
        Commands::Reset { yes } => cli::transfer::reset_command(&mut service, yes)?,
        Commands::Regen => cli::transfer::regen_command(&mut service)?,
    }

    Ok(())
}
