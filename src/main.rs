use anyhow::{Context, Result};
use clap::Parser;
use formicary_core::init_logging;
use formicary_lib::app::{self, RunOptions};
use formicary_lib::Colony;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Seconds simulated per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Size of the rayon thread pool (overrides the config file)
    #[arg(long)]
    threads: Option<usize>,

    /// Update ants on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    summary_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = app::load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(threads) = args.threads {
        config.threads = Some(threads);
    }
    if args.sequential {
        config.parallel = false;
    }

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the rayon thread pool")?;
    }

    let mut colony = Colony::new(config).context("Invalid simulation configuration")?;
    let summary = app::run(
        &mut colony,
        RunOptions {
            ticks: args.ticks,
            dt: args.dt,
        },
    )?;

    if args.summary_json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
