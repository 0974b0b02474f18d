//! Trial runner for the spatial prisoner's dilemma simulation.
//!
//! Loads configuration, runs every configured certainty scenario, and
//! reports the averaged start and end state of each.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `dilemma-config.yaml` (or `$DILEMMA_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Seed the master random source
//! 4. Run every scenario
//! 5. Log the reports and optionally write them as JSON

mod error;
mod report;

use std::path::PathBuf;

use dilemma_core::config::SimulationConfig;
use dilemma_core::trials;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "dilemma-config.yaml";

/// Environment variable overriding the configuration path.
const CONFIG_PATH_ENV: &str = "DILEMMA_CONFIG";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading, a trial, or report output
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so note the fallback
    //    and report it once the subscriber is installed.
    let (config, loaded_from) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("dilemma-engine starting");
    match &loaded_from {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        seed = config.world.seed,
        rows = config.world.rows,
        columns = config.world.columns,
        rounds = config.round.rounds,
        replacement = ?config.round.replacement,
        trials = config.trials.count,
        "Simulation configured"
    );

    // 3. Seed the master random source.
    let mut rng = match config.world.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    // 4. Run every scenario.
    let reports = trials::run_all(&config, &mut rng).map_err(EngineError::from)?;

    // 5. Report.
    for scenario in &reports {
        report::log_report(scenario);
    }
    if let Some(path) = &config.trials.report_path {
        report::write_reports(path, &reports)?;
    }

    info!(scenarios = reports.len(), "dilemma-engine finished");
    Ok(())
}

/// Load configuration from `$DILEMMA_CONFIG` or `dilemma-config.yaml`.
///
/// If the file does not exist, defaults are used. Returns the path the
/// configuration came from, if any.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        Ok((SimulationConfig::default(), None))
    }
}
