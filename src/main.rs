// Calendar Layout
// Command line entry point: lays out a JSON event file for one view and date

use anyhow::{anyhow, Context, Result};
use calendar_layout::models::event::CalendarEvent;
use calendar_layout::services::app::CalendarApp;
use calendar_layout::services::settings::{load_config_or_default, SettingsService};
use calendar_layout::utils::date::parse_date;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "calendar-layout",
    about = "Computes day, week and month calendar layouts and prints them as JSON"
)]
struct Args {
    /// JSON file holding an array of events
    #[arg(long)]
    events: PathBuf,

    /// TOML configuration file; defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to lay out: day, week, month-grid or month-agenda
    #[arg(long)]
    view: Option<String>,

    /// Pivot date as YYYY-MM-DD; defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    log::info!("Starting calendar layout");

    // An explicit config file must load; the default location may be absent or broken
    let config = match &args.config {
        Some(path) => SettingsService::new(path).get()?,
        None => load_config_or_default(&SettingsService::from_default_location()),
    };
    let events = load_events(&args.events)?;

    let mut builder = CalendarApp::builder().config(config).events(events);
    if let Some(view) = &args.view {
        builder = builder.selected_view(view.clone());
    }
    if let Some(date) = &args.date {
        let date = parse_date(date).map_err(|_| anyhow!("Invalid date '{}', expected YYYY-MM-DD", date))?;
        builder = builder.selected_date(date);
    }

    let app = builder.build().context("Failed to compute layout")?;
    let snapshot = app.snapshot();
    for rejected in &snapshot.rejected {
        log::warn!("Skipped event {}: {}", rejected.id, rejected.error);
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(snapshot.as_ref())?
    } else {
        serde_json::to_string(snapshot.as_ref())?
    };
    println!("{}", output);

    Ok(())
}
