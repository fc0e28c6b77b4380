use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use log::info;

use elevation_ring::chart;
use elevation_ring::draw::ring::Ring;
use elevation_ring::profile::cache;
use elevation_ring::Config;

/// Renders a folder of GPX tracks as a circular elevation-profile SVG
/// plus a rectangular overview chart.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml", value_name = "FILE")]
    config: PathBuf,
    /// Recompute the elevation series even if a cache file exists
    #[arg(long)]
    rebuild: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;

    for output in [
        &config.elevation_data,
        &config.metadata_file,
        &config.elevation_plot_file,
        &config.design_file,
    ] {
        if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
        }
    }

    let (profile, freshly_built) = cache::load_or_build(&config, args.rebuild)?;
    info!(
        "Total distance: {:.0} m, total elevation points: {}",
        profile.total_distance(),
        profile.len()
    );
    if freshly_built {
        info!(
            "Stop metadata can be customised in {}",
            config.metadata_file.display()
        );
        chart::render(&profile, &config).context("plotting the rectangular elevation profile")?;
    }

    let stop_table = cache::load_stop_metadata(&config.metadata_file)?;
    let ring = Ring::compose(&profile, &stop_table, &config)?;

    // compose in memory first so a failure leaves no partial scene file
    let mut scene = Vec::new();
    ring.write_svg_to(&mut scene)?;
    fs::write(&config.design_file, &scene)
        .with_context(|| format!("writing {}", config.design_file.display()))?;
    info!("Wrote {}", config.design_file.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
