//! Command-line driver: run one lane and print its space-time diagram.
//!
//! ```bash
//! # Closed loop, 20% density, fixed seed
//! nasch --boundary circular --cells 100 --density 0.2 --steps 100 --seed 42
//!
//! # Open lane with a slow region in the middle
//! nasch --boundary bottleneck --inflow 0.6 --zone-start 40 --zone-end 59 --zone-v-max 1
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use nasch::{
    BoundaryKind, CarCount, InjectionPolicy, SimulationConfig, Simulator, SlowZone, Velocity,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nasch", version, about = "Nagel-Schreckenberg single-lane traffic simulator")]
struct Args {
    /// Lane topology: circular or bottleneck.
    #[arg(short = 'b', long, default_value = "circular")]
    boundary: BoundaryKind,

    /// Number of cells in the lane.
    #[arg(short = 'c', long, default_value_t = 100)]
    cells: usize,

    /// Speed limit in cells per step.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    v_max: Velocity,

    /// Random braking probability.
    #[arg(short = 'p', long, default_value_t = 0.5, allow_negative_numbers = true)]
    braking: f64,

    /// Fraction of occupied cells on a circular lane.
    #[arg(long, default_value_t = 0.15, allow_negative_numbers = true)]
    density: f64,

    /// Exact car count on a circular lane (overrides --density).
    #[arg(long)]
    cars: Option<usize>,

    /// Probability that a car enters a free entry cell (bottleneck).
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    inflow: f64,

    /// Fill every free entry cell (bottleneck; overrides --inflow).
    #[arg(long)]
    always_inject: bool,

    /// First cell of the slow zone (bottleneck; needs --zone-end).
    #[arg(long)]
    zone_start: Option<usize>,

    /// Last cell of the slow zone, inclusive.
    #[arg(long)]
    zone_end: Option<usize>,

    /// Speed limit inside the slow zone.
    #[arg(long, default_value_t = 1)]
    zone_v_max: Velocity,

    /// Steps to record.
    #[arg(short = 's', long, default_value_t = 100)]
    steps: usize,

    /// Unrecorded steps run before the first snapshot.
    #[arg(long, default_value_t = 0)]
    warmup: usize,

    /// Random seed for reproducible runs. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Print only the trace fingerprint instead of the diagram.
    #[arg(long)]
    fingerprint: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,nasch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = build_config(&args)?.with_seed(seed).with_warmup(args.warmup);

    info!(
        boundary = %config.boundary.kind(),
        cells = args.cells,
        v_max = args.v_max,
        braking = args.braking,
        seed,
        steps = args.steps,
        "Starting simulation"
    );

    let mut simulator = Simulator::new(config).context("invalid simulation parameters")?;
    let trace = simulator
        .run(args.steps)
        .context("simulation aborted")?;

    let counts = trace.occupied_counts();
    info!(
        rows = trace.len(),
        first_count = counts.first().copied().unwrap_or(0),
        last_count = counts.last().copied().unwrap_or(0),
        "Simulation complete"
    );

    if args.fingerprint {
        println!("{}", trace.fingerprint());
    } else {
        print!("{}", trace.render());
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let config = match args.boundary {
        BoundaryKind::Circular => {
            let cars = match args.cars {
                Some(n) => CarCount::Exact(n),
                None => CarCount::Density(args.density),
            };
            SimulationConfig::circular(args.cells, args.v_max, args.braking, cars)
        }
        BoundaryKind::Bottleneck => {
            let injection = if args.always_inject {
                InjectionPolicy::Always
            } else {
                InjectionPolicy::Probability(args.inflow)
            };
            let config = SimulationConfig::bottleneck(args.cells, args.v_max, args.braking, injection);
            let zone = SlowZone::from_bounds(args.zone_start, args.zone_end, args.zone_v_max)
                .context("--zone-start and --zone-end must be given together")?;
            match zone {
                Some(zone) => config.with_slow_zone(zone),
                None => config,
            }
        }
    };
    Ok(config)
}
