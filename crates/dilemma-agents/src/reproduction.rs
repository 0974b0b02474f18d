//! Reproduction: replacing a dead player with a neighbor's offspring.
//!
//! An offspring copies its parent's base vitality, misanthropy, memory span
//! and optimism, starts at full base vitality with memory reset to the
//! optimism baseline, and gets its own random source split off the parent's.
//! With probability `mutation_chance` its certainty is nudged by a uniform
//! amount in `[-scale / 2, scale / 2)`, clamped at zero.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::BirthConfig;
use crate::player::Player;

/// Possibly mutate a certainty value.
///
/// Draws one value to decide whether to mutate and, if so, one more for
/// the perturbation. The result is never negative.
pub fn mutate_certainty(certainty: f64, config: &BirthConfig, rng: &mut impl Rng) -> f64 {
    let roll: f64 = rng.random();
    if roll < config.mutation_chance {
        let jitter: f64 = rng.random();
        (certainty + (jitter - 0.5) * config.mutation_scale).max(0.0)
    } else {
        certainty
    }
}

impl Player {
    /// Produce an offspring of this player.
    ///
    /// Consumes draws from this player's random source: the mutation rolls
    /// and the seed for the offspring's own source.
    pub fn birth(&mut self, config: &BirthConfig) -> Self {
        let certainty = mutate_certainty(self.policy.certainty(), config, &mut self.rng);
        let mut policy = self.policy;
        policy.set_certainty(certainty);

        trace!(
            parent_certainty = self.policy.certainty(),
            child_certainty = certainty,
            "Player born"
        );

        Self {
            vitality: self.base_vitality,
            base_vitality: self.base_vitality,
            policy,
            optimism: self.optimism,
            memory: self.memory.fresh(self.optimism),
            rng: SmallRng::from_rng(&mut self.rng),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::PlayerConfig;

    fn parent(certainty: f64) -> Player {
        Player::seeded(&PlayerConfig::default().with_certainty(certainty), 42).unwrap()
    }

    #[test]
    fn mutation_stays_in_window() {
        let config = BirthConfig::default();
        for seed in 0..200_u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let child = mutate_certainty(1.0, &config, &mut rng);
            assert!((0.95..=1.05).contains(&child), "certainty {child} outside window");
        }
    }

    #[test]
    fn mutation_never_negative() {
        let config = BirthConfig {
            mutation_chance: 1.0,
            mutation_scale: 0.1,
        };
        for seed in 0..200_u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            assert!(mutate_certainty(0.01, &config, &mut rng) >= 0.0);
        }
    }

    #[test]
    fn no_mutation_copies_exactly() {
        let config = BirthConfig {
            mutation_chance: 0.0,
            mutation_scale: 0.1,
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let child = mutate_certainty(1.25, &config, &mut rng);
        assert!((child - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn mutation_rate_roughly_matches_chance() {
        let config = BirthConfig::default();
        let mut rng = SmallRng::seed_from_u64(1234);
        let mutated = (0..10_000)
            .filter(|_| (mutate_certainty(1.0, &config, &mut rng) - 1.0).abs() > 0.0)
            .count();
        assert!((1_700..=2_300).contains(&mutated), "got {mutated}");
    }

    #[test]
    fn offspring_inherits_parent_traits() {
        let mut mom = parent(1.5);
        mom.set_misanthropy(0.75);
        mom.decrease_vitality(29);
        mom.remember(-4.0);

        let child = mom.birth(&BirthConfig::default());
        assert_eq!(child.vitality(), 30);
        assert_eq!(child.base_vitality(), 30);
        assert_eq!(child.memory_span(), 3);
        assert_eq!(child.memory(), vec![2.0; 3]);
        assert!((child.misanthropy() - 0.75).abs() < f64::EPSILON);
        assert!((child.optimism() - 2.0).abs() < f64::EPSILON);
        assert!((child.certainty() - 1.5).abs() <= 0.05);
    }

    #[test]
    fn offspring_rng_is_independent_of_parent() {
        let mut mom = parent(1.0);
        let mut child = mom.birth(&BirthConfig::default());
        let parent_moods: Vec<_> = (0..20).map(|_| mom.decide_with(0.0)).collect();
        let child_moods: Vec<_> = (0..20).map(|_| child.decide_with(0.0)).collect();
        assert_ne!(parent_moods, child_moods);
    }
}
