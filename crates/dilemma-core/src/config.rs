//! Configuration loading and typed config structures for the simulation.
//!
//! The configuration lives in `dilemma-config.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure, and provides a
//! loader that reads and validates the file. Every field has a default, so
//! an empty document is a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use dilemma_agents::{BirthConfig, PlayerConfig};
use dilemma_types::ReplacementPolicy;

use crate::trials::Scenario;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible simulation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid shape and seeding.
    #[serde(default)]
    pub world: WorldConfig,

    /// Template every initial player is built from.
    #[serde(default)]
    pub player: PlayerTemplate,

    /// Offspring mutation parameters.
    #[serde(default)]
    pub birth: BirthConfig,

    /// Round count and replacement policy.
    #[serde(default)]
    pub round: RoundConfig,

    /// Trial scenarios and reporting.
    #[serde(default)]
    pub trials: TrialsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the round engine cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.world.rows == 0, "world.rows must be at least 1"),
            (self.world.columns == 0, "world.columns must be at least 1"),
            (self.world.space_horizon == 0, "world.space_horizon must be at least 1"),
            (self.player.life_points <= 0, "player.life_points must be positive"),
            (self.player.memory_span == 0, "player.memory_span must be at least 1"),
            (
                !self.player.misanthropy.is_finite() || !self.player.optimism.is_finite(),
                "player.misanthropy and player.optimism must be finite",
            ),
            (
                !(0.0..=1.0).contains(&self.birth.mutation_chance),
                "birth.mutation_chance must be within [0, 1]",
            ),
            (
                !self.birth.mutation_scale.is_finite() || self.birth.mutation_scale < 0.0,
                "birth.mutation_scale must be finite and non-negative",
            ),
            (self.round.rounds == 0, "round.rounds must be at least 1"),
            (self.trials.count == 0, "trials.count must be at least 1"),
            (
                !(0.0..=1.0).contains(&self.trials.deviant_ratio),
                "trials.deviant_ratio must be within [0, 1]",
            ),
            (self.trials.scenarios.is_empty(), "trials.scenarios must not be empty"),
        ];

        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, reason)) => Err(ConfigError::Invalid {
                reason: (*reason).to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Grid shape and seeding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Master random seed. Absent means seed from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of rows (M).
    #[serde(default = "default_grid_side")]
    pub rows: usize,

    /// Number of columns (N).
    #[serde(default = "default_grid_side")]
    pub columns: usize,

    /// Neighborhood radius.
    #[serde(default = "default_space_horizon")]
    pub space_horizon: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rows: default_grid_side(),
            columns: default_grid_side(),
            space_horizon: default_space_horizon(),
        }
    }
}

impl WorldConfig {
    /// Number of cells.
    pub const fn cells(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

/// Shared parameters of the initial players. Certainty is chosen per cell
/// by the trial scenario.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerTemplate {
    /// Starting vitality.
    #[serde(default = "default_life_points")]
    pub life_points: i32,

    /// Logistic bias term.
    #[serde(default = "default_misanthropy")]
    pub misanthropy: f64,

    /// Memory baseline.
    #[serde(default = "default_optimism")]
    pub optimism: f64,

    /// Memory length in rounds (the time horizon).
    #[serde(default = "default_memory_span")]
    pub memory_span: usize,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            life_points: default_life_points(),
            misanthropy: default_misanthropy(),
            optimism: default_optimism(),
            memory_span: default_memory_span(),
        }
    }
}

impl PlayerTemplate {
    /// Complete the template with a certainty.
    pub const fn player_config(&self, certainty: f64) -> PlayerConfig {
        PlayerConfig {
            life_points: self.life_points,
            misanthropy: self.misanthropy,
            certainty,
            memory_span: self.memory_span,
            optimism: self.optimism,
        }
    }
}

/// Round count and replacement policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoundConfig {
    /// Rounds per trial.
    #[serde(default = "default_rounds")]
    pub rounds: u64,

    /// How the replacement phase reads neighbor state.
    #[serde(default)]
    pub replacement: ReplacementPolicy,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            replacement: ReplacementPolicy::default(),
        }
    }
}

/// Trial scenarios and reporting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrialsConfig {
    /// Trials per scenario.
    #[serde(default = "default_trial_count")]
    pub count: u32,

    /// Fraction of cells reassigned to deviant certainties.
    #[serde(default = "default_deviant_ratio")]
    pub deviant_ratio: f64,

    /// Scenarios to run, in order.
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<Scenario>,

    /// Where to write the JSON report, if anywhere.
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

impl Default for TrialsConfig {
    fn default() -> Self {
        Self {
            count: default_trial_count(),
            deviant_ratio: default_deviant_ratio(),
            scenarios: default_scenarios(),
            report_path: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

const fn default_grid_side() -> usize {
    100
}

const fn default_space_horizon() -> usize {
    1
}

const fn default_life_points() -> i32 {
    30
}

const fn default_misanthropy() -> f64 {
    -2.0
}

const fn default_optimism() -> f64 {
    2.0
}

const fn default_memory_span() -> usize {
    3
}

const fn default_rounds() -> u64 {
    200
}

const fn default_trial_count() -> u32 {
    1
}

const fn default_deviant_ratio() -> f64 {
    0.25
}

fn default_scenarios() -> Vec<Scenario> {
    Scenario::ALL.to_vec()
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SimulationConfig::parse("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.world.rows, 100);
        assert_eq!(config.world.columns, 100);
        assert_eq!(config.player.life_points, 30);
        assert_eq!(config.player.memory_span, 3);
        assert_eq!(config.round.rounds, 200);
        assert_eq!(config.round.replacement, ReplacementPolicy::InPlace);
        assert_eq!(config.trials.scenarios, Scenario::ALL.to_vec());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_document_overrides() {
        let yaml = "
world:
  seed: 7
  rows: 4
  columns: 5
player:
  misanthropy: 0.5
birth:
  mutation_chance: 0.5
round:
  rounds: 10
  replacement: snapshot
trials:
  count: 3
  scenarios: [uniform, diverse]
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.world.cells(), 20);
        assert!((config.player.misanthropy - 0.5).abs() < f64::EPSILON);
        assert!((config.player.optimism - 2.0).abs() < f64::EPSILON);
        assert!((config.birth.mutation_chance - 0.5).abs() < f64::EPSILON);
        assert!((config.birth.mutation_scale - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.round.replacement, ReplacementPolicy::Snapshot);
        assert_eq!(config.trials.scenarios, vec![Scenario::Uniform, Scenario::Diverse]);
    }

    #[test]
    fn invalid_values_rejected() {
        for yaml in [
            "world: { rows: 0 }",
            "player: { memory_span: 0 }",
            "player: { life_points: 0 }",
            "birth: { mutation_chance: 1.5 }",
            "round: { rounds: 0 }",
            "trials: { scenarios: [] }",
        ] {
            assert!(
                matches!(SimulationConfig::parse(yaml), Err(ConfigError::Invalid { .. })),
                "{yaml} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_yaml_rejected() {
        assert!(matches!(
            SimulationConfig::parse("world: [not, a, map"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn template_completes_player_config() {
        let template = PlayerTemplate::default();
        let player = template.player_config(1.75);
        assert!((player.certainty - 1.75).abs() < f64::EPSILON);
        assert_eq!(player.life_points, template.life_points);
    }
}
