//! Configuration for player construction and reproduction.
//!
//! [`PlayerConfig`] describes a player at world initialization. [`BirthConfig`]
//! bundles the mutation tunables used whenever a dead player is replaced by
//! the offspring of a neighbor.

use serde::{Deserialize, Serialize};

/// Parameters for constructing a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Starting (and base) vitality (default: 30).
    pub life_points: i32,

    /// Logistic bias term; higher values favor defection (default: -2.0).
    pub misanthropy: f64,

    /// Logistic slope term; must be non-negative (default: 1.0).
    pub certainty: f64,

    /// Number of remembered rounds (default: 3).
    pub memory_span: usize,

    /// Baseline every memory slot starts at (default: 2.0).
    pub optimism: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            life_points: 30,
            misanthropy: -2.0,
            certainty: 1.0,
            memory_span: 3,
            optimism: 2.0,
        }
    }
}

impl PlayerConfig {
    /// Return a copy of this config with a different certainty.
    pub fn with_certainty(&self, certainty: f64) -> Self {
        Self {
            certainty,
            ..self.clone()
        }
    }
}

/// Mutation parameters applied when a player gives birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthConfig {
    /// Probability that the offspring's certainty is perturbed (default: 0.2).
    pub mutation_chance: f64,

    /// Width of the uniform perturbation window centered on zero
    /// (default: 0.1, i.e. at most 0.05 either way).
    pub mutation_scale: f64,
}

impl Default for BirthConfig {
    fn default() -> Self {
        Self {
            mutation_chance: 0.2,
            mutation_scale: 0.1,
        }
    }
}
