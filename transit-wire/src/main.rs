//! Command-line tool for inspecting transit API payloads.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transit_wire::domain::PartialLocation;
use transit_wire::query::{Mode, TripPlanFilter, Usage, trip_plan_query};
use transit_wire::settings::TripSettings;
use transit_wire::source::{FixtureSource, PayloadSource};
use transit_wire::wire;

#[derive(Parser)]
#[command(name = "transit-wire")]
#[command(version, about = "Decode and re-encode transit API payloads", long_about = None)]
struct Cli {
    /// Verbosity level (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a payload file and print its canonical encoding
    Decode {
        /// What the payload holds
        #[arg(short, long, value_enum)]
        kind: PayloadKind,

        /// Skip bad segments instead of failing the plan
        #[arg(long)]
        lenient: bool,

        /// JSON file to decode
        path: PathBuf,
    },

    /// Decode a recorded response from a fixture directory
    Fixture {
        /// Directory of `{endpoint}.json` files
        #[arg(short, long, env = "TRANSIT_FIXTURES")]
        dir: PathBuf,

        #[arg(short, long, value_enum, default_value = "plans")]
        kind: PayloadKind,

        /// Endpoint name, e.g. `trip-planner`
        endpoint: String,
    },

    /// Print the trip planner query for two partial locations
    ///
    /// Locations are given as JSON, e.g. '{"Stop": 10064}' or
    /// '{"Point": [49.9, -97.1]}'. Settings come from TRANSIT_* variables.
    Query {
        origin: String,
        destination: String,

        #[arg(long, value_enum)]
        mode: Option<CliMode>,

        #[arg(long, value_enum, default_value = "normal")]
        usage: CliUsage,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PayloadKind {
    LocationTagged,
    LocationUntagged,
    Segment,
    Plan,
    Plans,
    Stop,
    Stops,
    StopSchedule,
    ServiceAdvisories,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliMode {
    DepartBefore,
    DepartAfter,
    ArriveBefore,
    ArriveAfter,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::DepartBefore => Mode::DepartBefore,
            CliMode::DepartAfter => Mode::DepartAfter,
            CliMode::ArriveBefore => Mode::ArriveBefore,
            CliMode::ArriveAfter => Mode::ArriveAfter,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliUsage {
    Normal,
    Long,
    Short,
}

impl From<CliUsage> for Usage {
    fn from(usage: CliUsage) -> Self {
        match usage {
            CliUsage::Normal => Usage::Normal,
            CliUsage::Long => Usage::Long,
            CliUsage::Short => Usage::Short,
        }
    }
}

const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Decode a payload and render it: the canonical re-encoding for kinds
/// that encode, a debug dump for inbound-only kinds.
fn render(kind: PayloadKind, lenient: bool, value: &Value) -> anyhow::Result<String> {
    let encoded = match kind {
        PayloadKind::LocationTagged => wire::encode_tagged(&wire::decode_tagged(value)?),
        PayloadKind::LocationUntagged => wire::encode_untagged(&wire::decode_untagged(value)?),
        PayloadKind::Segment => wire::encode_segment(&wire::decode_segment(value)?),
        PayloadKind::Plan if lenient => {
            let decoded = wire::decode_plan_lenient(value)?;
            if !decoded.rejected.is_empty() {
                eprintln!("skipped {} segment(s)", decoded.rejected.len());
            }
            wire::encode_plan(&decoded.plan)
        }
        PayloadKind::Plan => wire::encode_plan(&wire::decode_plan(value)?),
        PayloadKind::Plans => {
            let mut plans = Vec::new();
            for (index, plan) in wire::decode_plans(value)?.into_iter().enumerate() {
                match plan {
                    Ok(plan) => plans.push(wire::encode_plan(&plan)),
                    Err(e) => eprintln!("plan {index}: {e}"),
                }
            }
            serde_json::json!({ "plans": plans })
        }
        PayloadKind::Stop => return Ok(format!("{:#?}", wire::decode_stop(value)?)),
        PayloadKind::Stops => return Ok(format!("{:#?}", successes(wire::decode_stops(value)?))),
        PayloadKind::StopSchedule => {
            return Ok(format!("{:#?}", wire::decode_stop_schedule(value)?));
        }
        PayloadKind::ServiceAdvisories => {
            return Ok(format!(
                "{:#?}",
                successes(wire::decode_service_advisories(value)?)
            ));
        }
    };
    Ok(serde_json::to_string_pretty(&encoded)?)
}

/// Keep the decoded items, reporting the failures on stderr.
fn successes<T>(items: Vec<Result<T, wire::DecodeError>>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Ok(item) => Some(item),
            Err(e) => {
                eprintln!("item {index}: {e}");
                None
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| log_filter_from_verbosity(cli.verbose).to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Decode {
            kind,
            lenient,
            path,
        } => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            let value = wire::parse(&bytes)?;
            println!("{}", render(kind, lenient, &value)?);
        }
        Commands::Fixture {
            dir,
            kind,
            endpoint,
        } => {
            let source = FixtureSource::new(&dir)?;
            let value = source.fetch(&endpoint)?;
            println!("{}", render(kind, false, &value)?);
        }
        Commands::Query {
            origin,
            destination,
            mode,
            usage,
        } => {
            let origin: PartialLocation =
                serde_json::from_str(&origin).context("parsing origin")?;
            let destination: PartialLocation =
                serde_json::from_str(&destination).context("parsing destination")?;

            let mut filters = TripSettings::from_env().trip_plan_filters();
            if let Some(mode) = mode {
                filters.push(TripPlanFilter::Mode(mode.into()));
            }

            println!(
                "{}",
                trip_plan_query(&origin, &destination, &filters, usage.into())
            );
        }
    }

    Ok(())
}
