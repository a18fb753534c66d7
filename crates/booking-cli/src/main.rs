//! `booking` CLI: run the reservation conflict checks against a day snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Would alice (employee 1) booking service 1 at 10:45 collide with anything?
//! booking check -i day.json --employee 1 --service 1 --at 10:45
//!
//! # Re-validate reservation 101 moved to 11:15 with a 90-minute duration
//! booking check -i day.json --employee 1 --service 1 --at 11:15 --duration 90 --exclude 101
//!
//! # Lane index for every reservation, and calendar column order
//! booking lanes -i day.json
//! booking columns -i day.json
//!
//! # Open start times for a service, every 15 minutes
//! cat day.json | booking slots --employee 4 --service 1 --step 15
//!
//! # Bed demand over the day
//! booking usage -i day.json
//! ```
//!
//! `BOOKING_TOTAL_BEDS`, `BOOKING_DAY_START` and `BOOKING_DAY_END` (environment
//! or `.env`) override the snapshot's store settings; `--total-beds` overrides both.
//! Set `RUST_LOG=debug` to see what the engine decided and why.

mod config;

use std::io::{self, Read};

use anyhow::{Context, Result};
use booking_engine::adapter::{parse_time, to_wall_clock};
use booking_engine::model::Ms;
use booking_engine::{find_open_starts, parse_day, DaySnapshot, SlotQuery};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Reservation bed-capacity and double-booking checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Day snapshot JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Override the store's total bed count
    #[arg(long, global = true)]
    total_beds: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a proposed reservation for bed and employee conflicts
    Check {
        /// Employee id the reservation is for
        #[arg(long)]
        employee: i64,
        /// Service id from the snapshot's catalog
        #[arg(long)]
        service: i64,
        /// Start time on the snapshot's day (HH:MM)
        #[arg(long)]
        at: String,
        /// Duration override in minutes
        #[arg(long)]
        duration: Option<u32>,
        /// Bed count override
        #[arg(long)]
        beds: Option<u32>,
        /// Reservation being edited; it is not counted against itself
        #[arg(long)]
        exclude: Option<i64>,
    },
    /// Print the lane index of every reservation
    Lanes,
    /// Print employee usernames in calendar column order
    Columns,
    /// List conflict-free start times for a service
    Slots {
        #[arg(long)]
        employee: i64,
        #[arg(long)]
        service: i64,
        /// Minutes between candidate start times
        #[arg(long, default_value_t = 15)]
        step: u32,
        /// Reservation being rescheduled
        #[arg(long)]
        exclude: Option<i64>,
    },
    /// Print the bed demand profile of the day
    Usage,
}

fn main() -> Result<()> {
    init_tracing();
    // A missing .env file is fine; only explicit variables matter.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let day = load_day(cli.input.as_deref(), cli.total_beds)?;

    let output = match cli.command {
        Commands::Check {
            employee,
            service,
            at,
            duration,
            beds,
            exclude,
        } => {
            let at = parse_time(&at).with_context(|| format!("Invalid --at time: {at}"))?;
            let mut candidate = day
                .candidate(employee, service, at)
                .context("Cannot build candidate reservation")?;
            if let Some(minutes) = duration {
                anyhow::ensure!(minutes > 0, "--duration must be greater than 0");
                candidate = candidate.with_duration(minutes);
            }
            if let Some(beds) = beds {
                candidate = candidate.with_beds(beds);
            }
            let report = day.check(&candidate, exclude);
            debug!(?report, "check finished");
            serde_json::to_string_pretty(&report)?
        }
        Commands::Lanes => {
            let rows: Vec<_> = day
                .lanes()
                .into_iter()
                .map(|(id, lane)| json!({ "id": id, "lane": lane }))
                .collect();
            serde_json::to_string_pretty(&rows)?
        }
        Commands::Columns => {
            let names: Vec<&str> = day.columns().iter().map(|e| e.username.as_str()).collect();
            serde_json::to_string_pretty(&names)?
        }
        Commands::Slots {
            employee,
            service,
            step,
            exclude,
        } => {
            anyhow::ensure!(
                day.employee(employee).is_some(),
                "Unknown employee: {employee}"
            );
            let service = day.service(service)?;
            let query = SlotQuery {
                employee_id: employee,
                service,
                step_minutes: step,
                exclude_id: exclude,
            };
            let starts = find_open_starts(&day, &query)?
                .into_iter()
                .map(clock)
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_string_pretty(&starts)?
        }
        Commands::Usage => {
            let rows = day
                .bed_usage()
                .into_iter()
                .map(|u| -> Result<serde_json::Value> {
                    Ok(json!({
                        "start": clock(u.span.start)?,
                        "end": clock(u.span.end)?,
                        "beds": u.beds,
                        "over_capacity": u.beds > day.store.total_beds,
                    }))
                })
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_string_pretty(&rows)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Install a stderr subscriber so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_day(path: Option<&str>, total_beds: Option<u32>) -> Result<DaySnapshot> {
    let json = read_input(path)?;
    let mut day = parse_day(&json).context("Failed to parse day snapshot")?;
    config::apply_overrides(&mut day.store, total_beds)?;
    debug!(
        date = %day.date,
        total_beds = day.store.total_beds,
        reservations = day.reservations.len(),
        "day snapshot loaded"
    );
    Ok(day)
}

/// `HH:MM` wall-clock rendering of an engine instant.
fn clock(ms: Ms) -> Result<String> {
    Ok(to_wall_clock(ms)?.format("%H:%M").to_string())
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
