//! `workplan` CLI: plan prioritized tasks into work periods around events.
//!
//! ## Usage
//!
//! ```sh
//! # Write a sample calendar document for three working days
//! workplan sample --start 2026-03-16 --days 3 --zone Europe/London -o calendar.json
//!
//! # Print the day-by-day schedule
//! workplan schedule -i calendar.json
//!
//! # Same, as JSON, with an explicit current time
//! workplan schedule -i calendar.json --format json --now 2026-03-16T10:00:00Z
//!
//! # Show only the work time left after removing events
//! workplan overlay -i calendar.json
//! ```
//!
//! `schedule` exits with status 2 when the tasks do not fit. The partial
//! schedule is still printed.

mod document;

use std::io::{self, Read, Write};
use std::process;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use work_planner::{parse_zone, WorkPeriod};

use crate::document::{CalendarDocument, PeriodDto, ScheduleDto};

/// Exit status for a schedule that could not place every task.
const EXIT_UNSUCCESSFUL: i32 = 2;

#[derive(Parser)]
#[command(
    name = "workplan",
    version,
    about = "Plan prioritized tasks into work periods around calendar events"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log scheduling decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate the document's tasks and print the schedule
    Schedule {
        #[command(flatten)]
        io: IoArgs,
        /// Current time (RFC 3339); work before it is not scheduled
        #[arg(long, env = "WORKPLAN_NOW")]
        now: Option<String>,
    },
    /// Print the work periods left after removing event time
    Overlay {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Write a sample calendar document
    Sample {
        /// First day (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Number of working days
        #[arg(long, default_value = "3")]
        days: usize,
        /// IANA timezone for the sample
        #[arg(long, env = "WORKPLAN_TZ", default_value = "UTC")]
        zone: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input calendar document (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// IANA timezone of the work periods; overrides the document's zone
    #[arg(long, env = "WORKPLAN_TZ")]
    zone: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Schedule { io: args, now } => {
            let doc = CalendarDocument::parse(&read_input(args.input.as_deref())?)?;
            let zone = resolve_zone(args.zone.as_deref(), &doc)?;
            let now = resolve_now(now.as_deref(), &doc)?;
            let calendar = doc.to_calendar()?;
            debug!(%now, zone = zone.name(), "scheduling");

            let schedule = calendar.create_schedule(now, &zone);
            let rendered = match args.format {
                Format::Text => format!("{}\n", schedule),
                Format::Json => {
                    serde_json::to_string_pretty(&ScheduleDto::from(&schedule))? + "\n"
                }
            };
            write_output(args.output.as_deref(), &rendered)?;

            if !schedule.is_successful() {
                process::exit(EXIT_UNSUCCESSFUL);
            }
        }
        Commands::Overlay { io: args } => {
            let doc = CalendarDocument::parse(&read_input(args.input.as_deref())?)?;
            let zone = resolve_zone(args.zone.as_deref(), &doc)?;
            let free = doc.to_calendar()?.overlay_events(&zone);
            let rendered = match args.format {
                Format::Text => render_periods(&free),
                Format::Json => {
                    let dtos: Vec<PeriodDto> = free.iter().map(PeriodDto::from).collect();
                    serde_json::to_string_pretty(&dtos)? + "\n"
                }
            };
            write_output(args.output.as_deref(), &rendered)?;
        }
        Commands::Sample {
            start,
            days,
            zone,
            output,
        } => {
            let zone = parse_zone(&zone)?;
            let start = start.unwrap_or_else(|| Utc::now().with_timezone(&zone).date_naive());
            let doc = CalendarDocument::sample(zone, start, days)?;
            write_output(output.as_deref(), &(serde_json::to_string_pretty(&doc)? + "\n"))?;
        }
    }

    Ok(())
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_zone(flag: Option<&str>, doc: &CalendarDocument) -> Result<Tz> {
    let name = flag.unwrap_or(&doc.zone);
    Ok(parse_zone(name)?)
}

fn resolve_now(flag: Option<&str>, doc: &CalendarDocument) -> Result<DateTime<Utc>> {
    match (flag, doc.now) {
        (Some(raw), _) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now timestamp: {}", raw)),
        (None, Some(now)) => Ok(now.with_timezone(&Utc)),
        (None, None) => Ok(Utc::now()),
    }
}

fn render_periods(periods: &[WorkPeriod]) -> String {
    let mut out = String::new();
    for period in periods {
        out.push_str(&format!(
            "{} to {}\n",
            period.start().format("%Y-%m-%d %H:%M"),
            period.end().format("%Y-%m-%d %H:%M")
        ));
    }
    out
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
            let mut stdout = io::stdout();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
