//! Print a space-time diagram for a closed loop and an open lane with a slow region.

use nasch::{CarCount, InjectionPolicy, SimulationConfig, SlowZone};

fn main() -> anyhow::Result<()> {
    let ring = SimulationConfig::circular(80, 5, 0.3, CarCount::Density(0.15))
        .with_seed(2024)
        .with_warmup(200);
    let trace = nasch::run(&ring, 40)?;
    println!("circular lane, density 0.15");
    print!("{}", trace.render());

    let open = SimulationConfig::bottleneck(80, 5, 0.3, InjectionPolicy::Probability(0.6))
        .with_slow_zone(SlowZone::new(40, 55, 1))
        .with_seed(2024)
        .with_warmup(200);
    let trace = nasch::run(&open, 40)?;
    println!("\nbottleneck lane, slow zone 40..=55");
    print!("{}", trace.render());

    let counts = trace.occupied_counts();
    println!(
        "\ncars on the open lane: min {} max {}",
        counts.iter().min().copied().unwrap_or(0),
        counts.iter().max().copied().unwrap_or(0)
    );

    Ok(())
}
