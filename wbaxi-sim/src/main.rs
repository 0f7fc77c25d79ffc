use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wbaxi_bridge::{Config, Preset};
use wbaxi_sim::{Scenario, SimError};

/// Runs the Wishbone to AXI4 bridge against a memory model.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Scenario to run. Every scenario when omitted.
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Bus widths and queue depth.
    #[arg(long, default_value_t = Preset::Wb32Axi128)]
    preset: Preset,

    /// Seed of the random memory readies and traffic.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Cycle budget per scenario.
    #[arg(long, default_value_t = 100_000)]
    cycles: u64,

    /// Log level, overridden by `RUST_LOG`.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

fn main() -> Result<(), SimError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_env_filter(EnvFilter::builder().with_default_directive(cli.log_level.into()).from_env_lossy())
        .init();

    let config = Config::preset(cli.preset);
    let scenarios = match cli.scenario {
        Some(scenario) => vec![scenario],
        None => Scenario::ALL.to_vec(),
    };

    for scenario in scenarios {
        let report = scenario.run(config, cli.seed, cli.cycles)?;
        println!("{:>16} {}: {}", scenario, cli.preset, report);
    }
    Ok(())
}
