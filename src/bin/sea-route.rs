//! sea-route - plan land-avoiding maritime routes from the command line.
//!
//! Prints a GeoJSON FeatureCollection (or, with `--scan`, the itinerary
//! waypoint scan as JSON) to stdout. Logs go to stderr; set `RUST_LOG` to
//! change verbosity.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sea_route_planner::direct::DirectRouter;
use sea_route_planner::export::itinerary_to_geojson;
use sea_route_planner::land_data::LandDataConfig;
use sea_route_planner::osrm::{OsrmConfig, OsrmRouter};
use sea_route_planner::sanitize::scan_itinerary;
use sea_route_planner::{LandOracle, MaritimeRouter, PipelineConfig, RoutePlanner, Waypoint};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Plan a maritime route that avoids land
struct Args {
    /// Departure as LON,LAT
    #[arg(long, value_parser = parse_waypoint, allow_hyphen_values = true)]
    from: Waypoint,

    /// Destination as LON,LAT
    #[arg(long, value_parser = parse_waypoint, allow_hyphen_values = true)]
    to: Waypoint,

    /// Intermediate stops as LON,LAT, in order
    #[arg(long, value_parser = parse_waypoint, allow_hyphen_values = true)]
    via: Vec<Waypoint>,

    /// Base URL of the OSRM-compatible maritime routing service
    #[arg(long, default_value = "http://localhost:5000")]
    router_url: String,

    #[arg(long, default_value = "ship")]
    profile: String,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Directory holding the land grid and polygon shapefiles
    #[arg(long, default_value = "land-data")]
    land_data: PathBuf,

    /// Pipeline configuration as JSON; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the densify cap from the configuration
    #[arg(long)]
    max_segment_km: Option<f64>,

    /// Use direct segments instead of a routing service
    #[arg(long)]
    direct: bool,

    /// Report which stops sit on land instead of planning
    #[arg(long)]
    scan: bool,
}

fn parse_waypoint(value: &str) -> Result<Waypoint, String> {
    let (lon, lat) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{}'", value))?;
    let lon: f64 = lon.trim().parse().map_err(|err| format!("bad longitude '{}': {}", lon, err))?;
    let lat: f64 = lat.trim().parse().map_err(|err| format!("bad latitude '{}': {}", lat, err))?;
    let waypoint = Waypoint::new(lon, lat);
    if !waypoint.is_valid() {
        return Err(format!("coordinate out of range: {}", value));
    }
    Ok(waypoint)
}

fn load_config(args: &Args) -> Result<PipelineConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| format!("reading {}: {}", path.display(), err))?;
            serde_json::from_str(&text).map_err(|err| format!("parsing {}: {}", path.display(), err))?
        }
        None => PipelineConfig::default(),
    };
    if let Some(max_segment_km) = args.max_segment_km {
        config.max_segment_km = max_segment_km;
    }
    Ok(config)
}

fn run<R: MaritimeRouter>(router: R, oracle: LandOracle, config: PipelineConfig, stops: &[Waypoint]) -> ExitCode {
    let planner = RoutePlanner::with_config(router, oracle, config);
    let legs = planner.compute_itinerary(stops);

    let mut failed = 0usize;
    for leg in &legs {
        if let Err(err) = &leg.result {
            failed += 1;
            error!(leg = leg.index, from = ?leg.from, to = ?leg.to, "leg failed: {}", err);
        }
    }

    println!("{}", itinerary_to_geojson(&legs));
    if failed > 0 {
        ExitCode::FAILURE
    } else {
        info!(legs = legs.len(), "itinerary planned");
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sea_route_planner=info")))
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut stops = Vec::with_capacity(args.via.len() + 2);
    stops.push(args.from);
    stops.extend(args.via.iter().copied());
    stops.push(args.to);

    let oracle = LandOracle::load(&LandDataConfig::new(&args.land_data));

    if args.scan {
        let Some(land) = oracle.check() else {
            error!("no land data found under {}", args.land_data.display());
            return ExitCode::FAILURE;
        };
        let scans = scan_itinerary(&land, &stops, &config.sanitize);
        return match serde_json::to_string_pretty(&scans) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("failed to serialize scan: {}", err);
                ExitCode::FAILURE
            }
        };
    }

    if args.direct {
        return run(DirectRouter, oracle, config, &stops);
    }

    let router = match OsrmRouter::new(OsrmConfig {
        base_url: args.router_url.clone(),
        profile: args.profile.clone(),
        timeout_secs: args.timeout_secs,
    }) {
        Ok(router) => router,
        Err(err) => {
            error!("failed to create routing client: {}", err);
            return ExitCode::FAILURE;
        }
    };
    run(router, oracle, config, &stops)
}
