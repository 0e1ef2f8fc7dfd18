use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use propp_pi::env_config;
use propp_pi::params::{parse_count, parse_flag, parse_seed};
use propp_pi::{save_estimate, simulate_coin_pi, Result, SimulationParams};

/// Estimate π from the stopping time of a fair coin.
///
/// Numeric and boolean values are taken as text and validated, so
/// `--seed bad` or `--progress NA` are reported as argument errors.
#[derive(Parser, Debug)]
#[command(name = "propp-pi", version)]
struct Args {
    /// Number of trials (default: $PROPP_PI_SIMS or 100000)
    #[arg(long, value_name = "N")]
    sims: Option<String>,

    /// Trials simulated at once (default: $PROPP_PI_CHUNK_SIZE or 10000)
    #[arg(long, value_name = "N")]
    chunk_size: Option<String>,

    /// RNG seed (may be negative); omit for an entropy-seeded run
    #[arg(long, value_name = "S", allow_negative_numbers = true)]
    seed: Option<String>,

    /// Log a notice after each chunk (default: $PROPP_PI_PROGRESS or tty)
    #[arg(long, value_name = "BOOL")]
    progress: Option<String>,

    /// Keep every per-trial ratio in the result
    #[arg(long, value_name = "BOOL")]
    ratios: Option<String>,

    /// Fail if any trial runs longer than N flips
    #[arg(long, value_name = "N")]
    max_flips: Option<String>,

    /// Write the estimate as JSON to FILE
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn build_params(args: &Args) -> Result<SimulationParams> {
    let n_sims = match &args.sims {
        Some(raw) => parse_count("n_sims", raw)?,
        None => env_config::n_sims()?,
    };
    let chunk_size = match &args.chunk_size {
        Some(raw) => parse_count("chunk_size", raw)?,
        None => env_config::chunk_size()?,
    };
    let seed = args.seed.as_deref().map(parse_seed).transpose()?;
    let progress = match &args.progress {
        Some(raw) => parse_flag("progress", raw)?,
        None => env_config::progress_or_terminal()?,
    };
    let return_ratios = match &args.ratios {
        Some(raw) => parse_flag("return_ratios", raw)?,
        None => false,
    };

    let mut params = SimulationParams::new(n_sims, chunk_size)
        .with_progress(progress)
        .with_ratios(return_ratios);
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }
    if let Some(raw) = &args.max_flips {
        params = params.with_max_flips(parse_count("max_flips", raw)?);
    }
    params.validate()?;
    Ok(params)
}

fn run(args: Args) -> Result<()> {
    let params = build_params(&args)?;

    println!("Propp π simulation ({} trials)", params.n_sims());
    let start = Instant::now();
    let estimate = simulate_coin_pi(&params)?;
    let elapsed = start.elapsed();

    let throughput = estimate.n_sims() as f64 / elapsed.as_secs_f64();
    println!("  Elapsed:     {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    println!("  Throughput:  {:.0} trials/sec", throughput);
    println!();
    println!("{estimate}");

    if let Some(path) = &args.output {
        save_estimate(&estimate, path)?;
        info!("estimate written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_config::init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
