//! Certainty scenarios, repeated trials, and aggregation.
//!
//! A trial builds a fresh grid whose certainties follow a [`Scenario`],
//! records start-state statistics, runs the configured number of rounds,
//! and records end-state statistics. A [`ScenarioReport`] averages those
//! statistics over every trial of one scenario and classifies the skew of
//! the averaged end state.

use std::ops::Range;

use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use dilemma_types::{Skew, SummaryStats};
use dilemma_world::{WorldError, WorldGrid};

use crate::config::{ConfigError, SimulationConfig};
use crate::round::SimulationState;
use crate::runner::{self, NoOpCallback, RunSummary};

/// Certainty range of ordinary players.
const BASELINE: Range<f64> = 1.0..2.0;

/// Certainty range of highly certain deviants.
const LARGE: Range<f64> = 4.0..5.0;

/// Certainty range of barely certain deviants.
const SMALL: Range<f64> = 0.0..1.0;

/// Errors that can occur while running trials.
#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    /// The grid could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The configuration is invalid.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },
}

/// How the initial certainties of a trial are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Every certainty uniform in `[1, 2)`.
    Uniform,
    /// Uniform baseline with deviants in `[4, 5)`.
    LargeDeviants,
    /// Uniform baseline with deviants in `[0, 1)`.
    SmallDeviants,
    /// Uniform baseline with deviants at both extremes.
    Diverse,
}

impl Scenario {
    /// Every scenario, in reporting order.
    pub const ALL: [Self; 4] = [
        Self::Uniform,
        Self::LargeDeviants,
        Self::SmallDeviants,
        Self::Diverse,
    ];

    /// Human-readable description for logs.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Uniform => "certainties uniform in [1, 2)",
            Self::LargeDeviants => "uniform [1, 2) with deviants in [4, 5)",
            Self::SmallDeviants => "uniform [1, 2) with deviants in [0, 1)",
            Self::Diverse => "uniform [1, 2) with deviants in [0, 1) and [4, 5)",
        }
    }

    /// Generate `cells` certainties for this scenario.
    ///
    /// `floor(deviant_ratio * cells)` deviant draws are made, each choosing
    /// a cell uniformly at random (the same cell may be drawn twice). A
    /// diverse draw places one large and one small deviant.
    pub fn certainties(self, cells: usize, deviant_ratio: f64, rng: &mut impl Rng) -> Vec<f64> {
        let mut certainties: Vec<f64> = (0..cells).map(|_| rng.random_range(BASELINE)).collect();
        if cells == 0 {
            return certainties;
        }

        let ranges: &[Range<f64>] = match self {
            Self::Uniform => &[],
            Self::LargeDeviants => &[LARGE],
            Self::SmallDeviants => &[SMALL],
            Self::Diverse => &[LARGE, SMALL],
        };

        for _ in 0..deviant_count(cells, deviant_ratio) {
            for range in ranges {
                let cell = rng.random_range(0..cells);
                if let Some(slot) = certainties.get_mut(cell) {
                    *slot = rng.random_range(range.clone());
                }
            }
        }
        certainties
    }
}

/// Number of deviant draws for a grid of `cells` cells.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn deviant_count(cells: usize, deviant_ratio: f64) -> usize {
    let count = (deviant_ratio.clamp(0.0, 1.0) * cells as f64).floor();
    (count as usize).min(cells)
}

/// Start and end statistics of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Certainty statistics before the first round.
    pub start: SummaryStats,
    /// Certainty statistics after the last round.
    pub end: SummaryStats,
    /// What the run loop reported.
    pub run: RunSummary,
}

/// Mean, median, max, and min averaged over several trials.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Average of the per-trial means.
    pub mean: f64,
    /// Average of the per-trial medians.
    pub median: f64,
    /// Average of the per-trial maxima.
    pub max: f64,
    /// Average of the per-trial minima.
    pub min: f64,
}

impl AggregateStats {
    /// Average the given statistics. An empty slice yields zeros.
    pub fn average(stats: &[SummaryStats]) -> Self {
        let Ok(count) = u32::try_from(stats.len()) else {
            return Self::default();
        };
        if count == 0 {
            return Self::default();
        }
        let n = f64::from(count);
        let sum = |field: fn(&SummaryStats) -> f64| stats.iter().map(field).sum::<f64>() / n;
        Self {
            mean: sum(|s| s.mean),
            median: sum(|s| s.median),
            max: sum(|s| s.max),
            min: sum(|s| s.min),
        }
    }

    /// Skew judged from the averaged median and mean.
    pub fn skew(&self) -> Skew {
        Skew::classify(self.median, self.mean)
    }
}

/// Aggregated results of every trial of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// The scenario that was run.
    pub scenario: Scenario,
    /// Number of trials averaged.
    pub trials: u32,
    /// Players per grid.
    pub population: u32,
    /// Averaged start-state statistics.
    pub start: AggregateStats,
    /// Averaged end-state statistics.
    pub end: AggregateStats,
    /// Skew of the averaged end state.
    pub skew: Skew,
    /// Replacements summed over every trial.
    pub total_deaths: u64,
}

/// Run one trial of `scenario`.
///
/// # Errors
///
/// Returns [`TrialError::World`] if the grid cannot be built from the
/// configuration.
pub fn run_trial(
    config: &SimulationConfig,
    scenario: Scenario,
    rng: &mut SmallRng,
) -> Result<TrialOutcome, TrialError> {
    let world_config = &config.world;
    let certainties = scenario.certainties(world_config.cells(), config.trials.deviant_ratio, rng);
    let template = config.player.player_config(BASELINE.start);
    let world = WorldGrid::from_certainties(
        world_config.columns,
        world_config.rows,
        &certainties,
        &template,
        world_config.space_horizon,
        rng,
    )?;

    let mut state = SimulationState::new(world, config.birth.clone(), config.round.replacement);
    let start = state.world.summary_stats();
    let run = runner::run_rounds(&mut state, config.round.rounds, &mut NoOpCallback);
    let end = state.world.summary_stats();

    Ok(TrialOutcome { start, end, run })
}

/// Run every trial of `scenario` and aggregate the results.
///
/// # Errors
///
/// Returns [`TrialError::Config`] if the configuration fails validation, or
/// [`TrialError::World`] if a grid cannot be built.
pub fn run_scenario(
    config: &SimulationConfig,
    scenario: Scenario,
    rng: &mut SmallRng,
) -> Result<ScenarioReport, TrialError> {
    config.validate()?;

    let mut starts = Vec::new();
    let mut ends = Vec::new();
    let mut total_deaths: u64 = 0;
    for trial in 0..config.trials.count {
        let outcome = run_trial(config, scenario, rng)?;
        info!(
            ?scenario,
            trial,
            start_mean = outcome.start.mean,
            end_mean = outcome.end.mean,
            deaths = outcome.run.total_deaths,
            "Trial complete"
        );
        total_deaths = total_deaths.saturating_add(outcome.run.total_deaths);
        starts.push(outcome.start);
        ends.push(outcome.end);
    }

    let end = AggregateStats::average(&ends);
    Ok(ScenarioReport {
        scenario,
        trials: config.trials.count,
        population: u32::try_from(config.world.cells()).unwrap_or(u32::MAX),
        start: AggregateStats::average(&starts),
        end,
        skew: end.skew(),
        total_deaths,
    })
}

/// Run every configured scenario in order.
///
/// # Errors
///
/// Same as [`run_scenario`].
pub fn run_all(
    config: &SimulationConfig,
    rng: &mut SmallRng,
) -> Result<Vec<ScenarioReport>, TrialError> {
    config
        .trials
        .scenarios
        .iter()
        .map(|&scenario| {
            info!(?scenario, description = scenario.description(), "Scenario starting");
            run_scenario(config, scenario, rng)
        })
        .collect()
}
