//! Command-line front door for the rail route planner.
//!
//! Loads a BPLAN LOC/NWK snapshot, validates and plans a route between two
//! TIPLOCs, and prints the resulting TIPLOC sequence (or leg-by-leg
//! breakdown) to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use vstp_router::error::RouteError;
use vstp_router::loader::{load_links, load_locations};
use vstp_router::planner::plan_route;

#[derive(Parser, Debug)]
#[command(
    name = "vstp",
    version,
    about = "Plan a UK rail route over a BPLAN topology snapshot"
)]
struct Cli {
    /// Path to the BPLAN LOC file.
    #[arg(long)]
    loc: PathBuf,

    /// Path to the BPLAN NWK file.
    #[arg(long)]
    nwk: PathBuf,

    /// Start TIPLOC.
    #[arg(long)]
    start: String,

    /// End TIPLOC.
    #[arg(long)]
    end: String,

    /// Comma-separated TIPLOCs the route must pass through, in order.
    #[arg(long, value_delimiter = ',')]
    via: Vec<String>,

    /// Comma-separated TIPLOCs the route must not pass through.
    #[arg(long, value_delimiter = ',')]
    avoid: Vec<String>,

    /// Print the route broken down leg by leg instead of one flat sequence.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    legs: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let via: Vec<String> = cli.via.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
    let avoid: Vec<String> = cli.avoid.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();

    match run(&cli, &via, &avoid) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, via: &[String], avoid: &[String]) -> Result<(), RouteError> {
    let load_span = tracing::info_span!("load_bplan");
    let _enter = load_span.enter();
    let locations = load_locations(&cli.loc)?;
    let links = load_links(&cli.nwk)?;
    drop(_enter);

    let plan_span = tracing::info_span!("plan_route", start = %cli.start, end = %cli.end);
    let _enter = plan_span.enter();
    let outcome = plan_route(&cli.start, &cli.end, via, avoid, cli.legs, &locations, &links)?;
    drop(_enter);

    for (from, to) in &outcome.missing_legs {
        eprintln!("MISSING LEG: {} to {}", from, to);
    }

    match &outcome.legs {
        Some(legs) => {
            for leg in legs {
                for tiploc in leg {
                    println!("{}", tiploc);
                }
                println!();
            }
        }
        None => {
            for tiploc in &outcome.route_locations {
                println!("{}", tiploc);
            }
        }
    }

    info!(
        stops = outcome.route_locations.len(),
        missing_legs = outcome.missing_legs.len(),
        "route plan complete"
    );

    Ok(())
}

/// Initialise the global `tracing` subscriber once. Guarded with
/// `try_init` so running the binary's own test harness (or embedding it
/// in a larger process) never panics on a double-init.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
