//! `rendezvous` CLI: recommend meeting times and inspect group availability
//! from a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Top recommendations (stdin → stdout)
//! cat snapshot.json | rendezvous recommend
//!
//! # Top 10, evaluated in UTC-5, written to a file
//! rendezvous recommend -i snapshot.json -o best.json --limit 10 --offset-minutes -300
//!
//! # Dense per-day / per-period heatmap
//! rendezvous heatmap -i snapshot.json
//!
//! # Sparse overlap index at a chosen granularity
//! rendezvous overlap -i snapshot.json --granularity day-period
//!
//! # Response counts
//! rendezvous summary -i snapshot.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see per-run scoring details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rendezvous_engine::{
    build_heatmap, build_overlap_index, recommend_with_options, summarize_responses, Granularity,
    RecommendOptions, RecommendationOutput, Snapshot, TimezoneOffset,
    DEFAULT_RECOMMENDATION_LIMIT,
};
use serde_json::Value;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rendezvous",
    version,
    about = "Group availability aggregation and meeting-time recommendation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the best candidate windows for the event
    Recommend {
        #[command(flatten)]
        io: IoArgs,
        /// Maximum number of windows to return
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: usize,
    },
    /// Dense availability heatmap over the event's date range
    Heatmap {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Sparse overlap index of participant slots
    Overlap {
        #[command(flatten)]
        io: IoArgs,
        /// Bucket size: slot, day-period or day
        #[arg(long, default_value = "slot")]
        granularity: String,
    },
    /// Count responders and non-responders
    Summary {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input snapshot JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Viewer offset in minutes east of UTC; overrides the snapshot's value
    #[arg(long, allow_hyphen_values = true)]
    offset_minutes: Option<i32>,
}

impl IoArgs {
    fn load(&self) -> Result<Snapshot> {
        let json = read_input(self.input.as_deref())?;
        let mut snapshot = Snapshot::from_json(&json).context("Failed to parse snapshot")?;
        if let Some(minutes) = self.offset_minutes {
            snapshot.timezone_offset =
                TimezoneOffset::from_minutes(minutes).context("Invalid --offset-minutes")?;
        }
        tracing::debug!(
            event_id = %snapshot.event.id,
            participants = snapshot.participants.len(),
            offset_minutes = snapshot.timezone_offset.minutes(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    fn emit(&self, value: &Value) -> Result<()> {
        let pretty = serde_json::to_string_pretty(value)?;
        write_output(self.output.as_deref(), &pretty)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { io, limit } => {
            let snapshot = io.load()?;
            let options = RecommendOptions {
                timezone_offset: snapshot.timezone_offset,
                limit,
            };
            let windows =
                recommend_with_options(&snapshot.event, &snapshot.participants, &options);
            if windows.is_empty() {
                tracing::info!(event_id = %snapshot.event.id, "no candidate windows fit the event");
            }
            let output: Vec<RecommendationOutput> =
                windows.iter().map(RecommendationOutput::from).collect();
            io.emit(&serde_json::to_value(output)?)?;
        }
        Commands::Heatmap { io } => {
            let snapshot = io.load()?;
            let cells = build_heatmap(
                &snapshot.event,
                &snapshot.participants,
                snapshot.timezone_offset,
            );
            io.emit(&serde_json::to_value(cells)?)?;
        }
        Commands::Overlap { io, granularity } => {
            let granularity: Granularity = granularity
                .parse()
                .context("Invalid --granularity")?;
            let snapshot = io.load()?;
            let index = build_overlap_index(
                &snapshot.participants,
                granularity,
                snapshot.timezone_offset,
            );
            io.emit(&serde_json::to_value(index.entries())?)?;
        }
        Commands::Summary { io } => {
            let snapshot = io.load()?;
            let summary = summarize_responses(&snapshot.participants);
            io.emit(&serde_json::to_value(summary)?)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays valid JSON. Defaults to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
