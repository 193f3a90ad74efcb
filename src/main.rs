use hike_rust::common::SearchOutcome;
use hike_rust::config::{Cli, Config};
use hike_rust::map::Map;
use hike_rust::solver::build_solver;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let map = Map::from_file(&config.map_path)?;
    info!(
        "Loaded {}x{} map, entry {:?}, exit {:?}",
        map.width, map.height, map.entry, map.exit
    );
    if !map.has_slopes() {
        info!("Map has no slopes, both regimes give the same answer");
    }

    for directed in config.directed_regimes()? {
        let regime = if directed { "slopes" } else { "free" };
        let mut solver = build_solver(&config.solver, &map, directed)?;

        match solver.solve(&config) {
            SearchOutcome::Longest { length, .. } => println!("{regime}: {length}"),
            SearchOutcome::Unreachable => println!("{regime}: unreachable"),
            SearchOutcome::BudgetExceeded { expanded } => {
                error!("{regime} search aborted, budget of {expanded} states exceeded");
                println!("{regime}: aborted");
            }
        }

        if let Some(output_path) = &config.output_path {
            solver.stats().append_json(output_path)?;
        }
    }

    Ok(())
}
