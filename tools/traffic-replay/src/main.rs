//! traffic-replay: headless driver for the SeaTraffic engine.
//!
//! Usage:
//!   traffic-replay inspect --routes data/solent.txt
//!   traffic-replay replay --routes data/solent.txt --lat 50.8 --lon -1.3 --seconds 3600

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::prelude::*;

use seatraffic_core::config::SimConfig;
use seatraffic_core::geo::displaced;
use seatraffic_core::types::GeoPoint;
use seatraffic_routes::{RouteStore, TileIndex};
use seatraffic_sim::stock::{FlatSea, StockModels};
use seatraffic_sim::TrafficEngine;

#[derive(Debug, Parser)]
#[command(author, version, about = "SeaTraffic route inspection and replay")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarise a route file
    Inspect {
        /// Route file to load
        #[arg(long)]
        routes: PathBuf,

        /// Number of busiest tiles to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Move an observer across the routes and print JSON snapshots
    Replay {
        /// Route file to load
        #[arg(long)]
        routes: PathBuf,

        /// Observer start latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Observer start longitude
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Observer track, degrees true
        #[arg(long, default_value_t = 0.0)]
        heading_deg: f64,

        /// Observer ground speed, m/s
        #[arg(long, default_value_t = 0.0)]
        speed: f64,

        /// Simulated duration in seconds
        #[arg(long, default_value_t = 600.0)]
        seconds: f64,

        /// Frame interval in seconds
        #[arg(long, default_value_t = 1.0)]
        step: f64,

        /// Seconds between printed snapshots
        #[arg(long, default_value_t = 60.0)]
        report_every: f64,

        /// JSON simulation config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match Cli::parse().command {
        Command::Inspect { routes, top } => inspect(routes, top),
        Command::Replay {
            routes,
            lat,
            lon,
            heading_deg,
            speed,
            seconds,
            step,
            report_every,
            config,
            seed,
        } => {
            let mut config = match config {
                Some(path) => SimConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => SimConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let track = Track {
                start: GeoPoint::new(lat, lon),
                heading: heading_deg.to_radians(),
                speed,
            };
            replay(routes, config, track, seconds, step, report_every)
        }
    }
}

fn inspect(path: PathBuf, top: usize) -> Result<()> {
    let store = RouteStore::load_path(&path)?;
    let index = TileIndex::build(&store);

    println!("{}: {} routes", path.display(), store.len());
    for (kind, count) in store.count_by_kind() {
        println!("  {:<8} {count}", kind.token());
    }
    println!("{} tiles crossed", index.populated_tiles());
    for (tile, count) in index.busiest(top) {
        println!("  {:>4} {:>5}  {count} routes", tile.south, tile.west);
    }
    Ok(())
}

/// Observer moving on a constant great-circle heading.
struct Track {
    start: GeoPoint,
    heading: f64,
    speed: f64,
}

impl Track {
    fn at(&self, elapsed: f64) -> GeoPoint {
        if self.speed == 0.0 {
            self.start
        } else {
            displaced(self.start, self.heading, self.speed * elapsed)
        }
    }
}

fn replay(
    routes: PathBuf,
    config: SimConfig,
    track: Track,
    seconds: f64,
    step: f64,
    report_every: f64,
) -> Result<()> {
    anyhow::ensure!(step > 0.0, "--step must be positive");

    let mut engine =
        TrafficEngine::from_route_file(config, &routes, Box::new(StockModels), Box::new(FlatSea))
            .with_context(|| format!("starting engine on {}", routes.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut next_report = 0.0;
    let frames = (seconds / step).floor() as u64;

    for frame in 0..=frames {
        let now = frame as f64 * step;
        let observer = track.at(now);
        engine.update(now, observer);

        for event in engine.drain_events() {
            tracing::debug!(?event, "traffic event");
        }

        if now >= next_report {
            next_report += report_every;
            let snapshot = engine.snapshot(observer);
            serde_json::to_writer(&mut out, &snapshot)?;
            writeln!(out)?;
        }
    }

    info!(
        frames = frames + 1,
        active = engine.pool().len(),
        "replay finished"
    );
    Ok(())
}
