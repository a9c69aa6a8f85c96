use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flight_planner::catalog::{Catalog, load_json};
use flight_planner::domain::Airport;
use flight_planner::planner::{self, SearchConfig, SearchStrategy, TerminalRule};

fn airport(code: &str) -> Airport {
    Airport::parse(code).expect("airport codes in the default config are valid")
}

fn datetime(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("dates in the default config are valid")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
}

/// Default search: autumn 2025 out of Boston, ending at a New England
/// terminal, with overnights allowed at a handful of mid-size airports.
fn default_config() -> SearchConfig {
    let regional_earliest = NaiveTime::from_hms_opt(6, 0, 0).expect("valid time");
    let regional_latest = NaiveTime::from_hms_opt(21, 0, 0).expect("valid time");

    SearchConfig {
        window_start: datetime(2025, 8, 1),
        window_end: datetime(2025, 11, 21),
        latest_start: NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date"),
        min_layover: Duration::minutes(50),
        max_layover: Duration::hours(18),
        max_day_layover: Some(Duration::hours(5)),
        overnight_threshold: Duration::hours(3),
        overnight_checkpoint: NaiveTime::from_hms_opt(3, 0, 0).expect("valid time"),
        overnight_airports: HashSet::from([
            airport("RDU"),
            airport("DCA"),
            airport("BUF"),
            airport("PVD"),
            airport("PIT"),
        ]),
        min_trip_gap: Duration::days(3),
        max_trip_gap: Duration::days(7),
        max_plan_duration: Duration::days(28),
        min_destinations: 15,
        max_duplicate_legs: 2,
        destination_cap: 25,
        start_airport: airport("BOS"),
        terminals: vec![
            // Home arrivals are unrestricted; a clock window here would
            // reject arrivals at exactly midnight (both bounds exclusive)
            TerminalRule::open(airport("BOS")),
            TerminalRule::windowed(airport("PVD"), regional_earliest, regional_latest),
            TerminalRule::windowed(airport("ORH"), regional_earliest, regional_latest),
        ],
        strategy: SearchStrategy::default(),
        workers: std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1).max(1))
            .unwrap_or(1),
    }
}

/// Best-plan report for `--json` output.
#[derive(Serialize)]
struct PlanReport {
    legs: Vec<LegReport>,
    destinations: Vec<String>,
    distinct_days: usize,
    overnight_layovers: usize,
    total_minutes: i64,
    effective_minutes: i64,
}

#[derive(Serialize)]
struct LegReport {
    number: u32,
    origin: String,
    destination: String,
    departure: String,
    arrival: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut json = false;
    let mut path = PathBuf::from("flights.json");
    for arg in std::env::args_os().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            path = arg.into();
        }
    }

    let config = default_config();
    if let Err(e) = config.validate() {
        eprintln!("invalid search configuration: {e}");
        return ExitCode::FAILURE;
    }

    let flights = match load_json(&path) {
        Ok(flights) => flights,
        Err(e) => {
            eprintln!("failed to load {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let catalog = Catalog::within_window(flights, config.window_start, config.window_end);
    info!(flights = catalog.len(), "catalog loaded");

    let report = planner::run(&catalog, &config, None);
    if !json {
        println!(
            "Searched {} states across {} worker(s){}.",
            report.states,
            config.workers,
            if report.complete { "" } else { " (stopped early)" }
        );
    }
    for failure in &report.failures {
        eprintln!(
            "warning: chunk {} (starts {}..{}) was lost to a worker failure",
            failure.chunk,
            failure.first,
            failure.first + failure.len
        );
    }

    match report.best {
        Some(plan) if json => {
            let legs = plan
                .flights
                .iter()
                .map(|&id| {
                    let f = catalog.flight(id);
                    LegReport {
                        number: f.number,
                        origin: f.origin.to_string(),
                        destination: f.destination.to_string(),
                        departure: f.departure.to_string(),
                        arrival: f.arrival.to_string(),
                    }
                })
                .collect();
            let out = PlanReport {
                legs,
                destinations: plan.destinations.iter().map(|a| a.to_string()).collect(),
                distinct_days: plan.distinct_days,
                overnight_layovers: plan.overnight_layovers,
                total_minutes: plan.total_duration.num_minutes(),
                effective_minutes: plan.effective_duration.num_minutes(),
            };
            match serde_json::to_string_pretty(&out) {
                Ok(s) => {
                    println!("{s}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("failed to serialise plan: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(plan) => {
            println!(
                "Best plan: {} legs, {} destinations, {} distinct days, {} overnight layover(s)",
                plan.legs(),
                plan.destinations.len(),
                plan.distinct_days,
                plan.overnight_layovers
            );
            println!(
                "Total duration {}, effective duration {}",
                plan.total_duration, plan.effective_duration
            );
            for id in &plan.flights {
                let f = catalog.flight(*id);
                println!(
                    "  {} {} -> {} dep {} arr {}",
                    f.number, f.origin, f.destination, f.departure, f.arrival
                );
            }
            ExitCode::SUCCESS
        }
        None => {
            if json {
                println!("null");
            } else {
                println!("No qualifying plan found.");
            }
            ExitCode::SUCCESS
        }
    }
}
