mod controller;
mod error;
mod form;
mod models;
mod stats;
mod store;
mod tui;
mod view;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use models::Filter;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use store::RecordStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use view::{Card, View};

#[derive(Parser)]
#[command(name = "apptrack")]
#[command(about = "Job application tracker - record, filter, and count applications for this session")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log file path (defaults to the user data directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive tracker (default)
    Tui {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Print counters and applications without opening the tracker
    Report {
        #[command(flatten)]
        session: SessionArgs,

        /// Print the matching applications as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
struct SessionArgs {
    /// JSON file of applications to start the session with (read only)
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Initial filter (all, applied, interview, offer, rejected)
    #[arg(short, long, default_value = "all")]
    filter: Filter,
}

impl SessionArgs {
    fn open_store(&self) -> Result<RecordStore> {
        let mut store = RecordStore::new();
        if let Some(path) = &self.seed {
            let count = store.load_seed(path)?;
            info!(count, path = %path.display(), "seed loaded");
        }
        Ok(store)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.log_file.as_deref())?;

    match cli.command.unwrap_or(Commands::Tui {
        session: SessionArgs::default(),
    }) {
        Commands::Tui { session } => {
            info!(log = %log_path.display(), filter = %session.filter, "starting tracker");
            let store = session.open_store()?;
            tui::run_tracker(store, session.filter)?;
        }

        Commands::Report { session, json } => {
            let store = session.open_store()?;
            if json {
                let records = view::project(store.all(), session.filter);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&records).context("Failed to encode applications")?
                );
            } else {
                print_report(&store, session.filter);
            }
        }
    }

    Ok(())
}

fn default_log_path() -> PathBuf {
    // Use XDG data directory or fallback
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "apptrack") {
        proj_dirs.data_dir().join("apptrack.log")
    } else {
        PathBuf::from("apptrack.log")
    }
}

/// Logs go to a file because the tracker owns the terminal.
fn init_logging(path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(path)
}

fn print_report(store: &RecordStore, filter: Filter) {
    let stats = stats::aggregate(store.all());
    let counters: Vec<String> = stats
        .counters()
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();
    println!("{}", counters.join("  |  "));
    println!("Filter: {}\n", filter.label());

    match view::render(store.all(), filter) {
        View::Empty(empty) => {
            println!("{}", empty.title);
            println!("{}", empty.hint);
        }
        View::Cards(cards) => {
            println!(
                "{:<5} {:<10} {:<20} {:<24} {:<16} {:<10} {:<10}",
                "ID", "STATUS", "COMPANY", "POSITION", "LOCATION", "SALARY", "APPLIED"
            );
            println!("{}", "-".repeat(101));
            for card in &cards {
                print_card_row(card);
            }
        }
    }
}

fn print_card_row(card: &Card) {
    println!(
        "{:<5} {:<10} {:<20} {:<24} {:<16} {:<10} {:<10}",
        card.id,
        card.status_label(),
        truncate(&card.company, 18),
        truncate(&card.position, 22),
        truncate(card.detail("Location").unwrap_or("-"), 14),
        truncate(card.detail("Salary").unwrap_or("-"), 10),
        card.detail("Applied").unwrap_or("-"),
    );
    if let Some(notes) = &card.notes {
        for line in textwrap::wrap(notes, 90) {
            println!("      \"{}\"", line);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
