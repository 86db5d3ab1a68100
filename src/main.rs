use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rgrover::config::default_concurrency;
use rgrover::{Config, Report, Rounding, Sweep};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Measure how often a simulated Grover search finds the marked state.
#[derive(Parser)]
#[command(name = "rgrover")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Smallest number of simulated qubits
    #[arg(long, env = "GROVER_MIN_QUBITS", default_value_t = 1)]
    min_qubits: usize,

    /// Largest number of simulated qubits
    #[arg(long, env = "GROVER_MAX_QUBITS", default_value_t = 10)]
    max_qubits: usize,

    /// Trials per qubit count
    #[arg(short, long, env = "GROVER_TRIALS", default_value_t = 1000)]
    trials: usize,

    /// Maximum trials in flight (defaults to available parallelism)
    #[arg(short = 'j', long, env = "GROVER_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Iteration count rounding (nearest, truncate)
    #[arg(long, env = "GROVER_ROUNDING", default_value = "nearest")]
    rounding: Rounding,

    /// Seed for a reproducible run
    #[arg(long, env = "GROVER_SEED")]
    seed: Option<u64>,

    /// Decimal places in the accuracy column
    #[arg(long, env = "GROVER_DECIMALS", default_value_t = 2)]
    decimals: usize,

    /// Do not print the elapsed time
    #[arg(long)]
    no_timing: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            min_qubits: self.min_qubits,
            max_qubits: self.max_qubits,
            trials: self.trials,
            concurrency: self.concurrency.unwrap_or_else(default_concurrency),
            rounding: self.rounding,
            seed: self.seed,
            decimals: self.decimals,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    let decimals = config.decimals;
    info!(?config, "starting sweep");
    let sweep = Sweep::new(config).context("invalid configuration")?;

    let t0 = Instant::now();
    let results = sweep.run().context("simulation failed")?;
    let elapsed = (!cli.no_timing).then(|| t0.elapsed());

    print!(
        "{}",
        Report {
            results: &results,
            decimals,
            elapsed,
        }
    );
    Ok(())
}
