use anyhow::{Context, Result};
use clap::Parser;
use rmp_serde::encode;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use stochmean::{config::Config, compute_stochastic_mean, walk::RandomWalk};

/// Compute the lag-binned stochastic mean of a generated random walk.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Write the result as MessagePack to this file.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = Config::from_file(&args.config).context("failed to construct cfg")?;
    log::info!("{cfg:#?}");

    let walk = RandomWalk::generate(&cfg.walk).context("failed to generate random walk")?;
    log::info!("generated walk with {} samples", walk.positions.len());

    let res = compute_stochastic_mean(
        &walk.times,
        &walk.positions,
        &cfg.analysis.bins,
        &cfg.analysis.kernel,
    )
    .context("failed to compute stochastic mean")?;

    // Reference for an uncorrelated walk: MSD = D * t.
    let diff_coef = RandomWalk::step_variance(&cfg.walk);
    log::info!("kernel {}, reference D * t with D = {diff_coef:.6}", cfg.analysis.kernel);
    for i_bin in 0..res.len() {
        log::info!(
            "t = {:>10.3} mean = {:>14.6} ref = {:>14.6} n_vals = {}",
            res.bins[i_bin],
            res.means[i_bin],
            diff_coef * res.bins[i_bin],
            res.n_vals[i_bin]
        );
    }

    if let Some(output) = &args.output {
        let file = File::create(output).with_context(|| format!("failed to create {output:?}"))?;
        let mut writer = BufWriter::new(file);
        encode::write(&mut writer, &res).context("failed to serialize result")?;
        writer.flush().context("failed to flush writer stream")?;
        log::info!("saved {output:?}");
    }

    Ok(())
}
