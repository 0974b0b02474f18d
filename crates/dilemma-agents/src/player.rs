//! Players of the iterated prisoner's dilemma.
//!
//! A [`Player`] bundles vitality, a [`DecisionPolicy`], a [`MemoryBuffer`]
//! of past round outcomes, the optimism baseline its memory starts from, and
//! its own pseudorandom source. Players have no identity beyond the grid
//! cell that holds them.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use dilemma_types::Decision;

use crate::config::PlayerConfig;
use crate::error::AgentError;
use crate::memory::MemoryBuffer;
use crate::policy::DecisionPolicy;

/// One agent on the grid.
#[derive(Debug, Clone)]
pub struct Player {
    pub(crate) vitality: i32,
    pub(crate) base_vitality: i32,
    pub(crate) policy: DecisionPolicy,
    pub(crate) optimism: f64,
    pub(crate) memory: MemoryBuffer,
    pub(crate) rng: SmallRng,
}

impl Player {
    /// Build a player from `config`, drawing moods from `rng`.
    ///
    /// # Errors
    ///
    /// - [`AgentError::NonPositiveVitality`] if `life_points <= 0`
    /// - [`AgentError::ZeroMemorySpan`] if `memory_span == 0`
    /// - [`AgentError::InvalidParameter`] if misanthropy, certainty or
    ///   optimism is not finite, or certainty is negative
    pub fn new(config: &PlayerConfig, rng: SmallRng) -> Result<Self, AgentError> {
        if config.life_points <= 0 {
            return Err(AgentError::NonPositiveVitality(config.life_points));
        }
        check_finite("misanthropy", config.misanthropy)?;
        check_finite("certainty", config.certainty)?;
        check_finite("optimism", config.optimism)?;
        if config.certainty < 0.0 {
            return Err(AgentError::InvalidParameter {
                name: "certainty",
                value: config.certainty,
            });
        }
        let memory = MemoryBuffer::new(config.memory_span, config.optimism)?;

        Ok(Self {
            vitality: config.life_points,
            base_vitality: config.life_points,
            policy: DecisionPolicy::new(config.misanthropy, config.certainty),
            optimism: config.optimism,
            memory,
            rng,
        })
    }

    /// Build a player whose random source is seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`Player::new`].
    pub fn seeded(config: &PlayerConfig, seed: u64) -> Result<Self, AgentError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    // -----------------------------------------------------------------------
    // Vitality
    // -----------------------------------------------------------------------

    /// Current vitality.
    pub const fn vitality(&self) -> i32 {
        self.vitality
    }

    /// Vitality assigned at birth, inherited unchanged by offspring.
    pub const fn base_vitality(&self) -> i32 {
        self.base_vitality
    }

    /// A player is dead once its vitality reaches zero.
    pub const fn is_dead(&self) -> bool {
        self.vitality <= 0
    }

    /// Overwrite current vitality.
    pub const fn set_vitality(&mut self, vitality: i32) {
        self.vitality = vitality;
    }

    /// Add `amount` to vitality.
    pub const fn increase_vitality(&mut self, amount: i32) {
        self.vitality = self.vitality.saturating_add(amount);
    }

    /// Subtract `amount` from vitality.
    pub const fn decrease_vitality(&mut self, amount: i32) {
        self.vitality = self.vitality.saturating_sub(amount);
    }

    // -----------------------------------------------------------------------
    // Disposition
    // -----------------------------------------------------------------------

    /// The decision policy.
    pub const fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Logistic bias term.
    pub const fn misanthropy(&self) -> f64 {
        self.policy.misanthropy()
    }

    /// Logistic slope term, never negative.
    pub const fn certainty(&self) -> f64 {
        self.policy.certainty()
    }

    /// Baseline memory slots are filled with at birth.
    pub const fn optimism(&self) -> f64 {
        self.optimism
    }

    /// Replace the bias term.
    pub const fn set_misanthropy(&mut self, misanthropy: f64) {
        self.policy.set_misanthropy(misanthropy);
    }

    /// Replace the slope term; negative values are clamped to zero.
    pub fn set_certainty(&mut self, certainty: f64) {
        self.policy.set_certainty(certainty);
    }

    /// Replace the random source.
    pub fn reseed(&mut self, rng: SmallRng) {
        self.rng = rng;
    }

    // -----------------------------------------------------------------------
    // Memory
    // -----------------------------------------------------------------------

    /// Remembered samples, oldest first.
    pub fn memory(&self) -> Vec<f64> {
        self.memory.to_vec()
    }

    /// The memory buffer itself.
    pub const fn memory_buffer(&self) -> &MemoryBuffer {
        &self.memory
    }

    /// Number of remembered rounds.
    pub fn memory_span(&self) -> usize {
        self.memory.span()
    }

    /// Reallocate memory to `span` zero-filled slots.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ZeroMemorySpan`] if `span` is zero.
    pub fn set_memory_span(&mut self, span: usize) -> Result<(), AgentError> {
        self.memory.resize(span)
    }

    /// Forget everything: every slot becomes `value`.
    pub fn amnesia(&mut self, value: f64) {
        self.memory.reset(value);
    }

    /// Record the outcome of a round as the newest memory.
    pub fn remember(&mut self, sample: f64) {
        self.memory.push(sample);
    }

    /// The conditions this player currently perceives: the triangular
    /// weighted average of its memory.
    pub fn conditions(&self) -> f64 {
        self.memory.weighted_average()
    }

    // -----------------------------------------------------------------------
    // Decisions
    // -----------------------------------------------------------------------

    /// Probability of cooperating under `conditions`.
    pub fn threshold(&self, conditions: f64) -> f64 {
        self.policy.threshold(conditions)
    }

    /// Decide under caller-supplied conditions, ignoring memory.
    pub fn decide_with(&mut self, conditions: f64) -> Decision {
        self.policy.decide(conditions, &mut self.rng)
    }

    /// Decide under the conditions remembered in memory.
    pub fn decide(&mut self) -> Decision {
        let conditions = self.conditions();
        self.policy.decide(conditions, &mut self.rng)
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), AgentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AgentError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_player() -> Player {
        Player::seeded(&PlayerConfig::default(), 42).unwrap()
    }

    #[test]
    fn new_player_uses_config() {
        let player = test_player();
        assert_eq!(player.vitality(), 30);
        assert_eq!(player.base_vitality(), 30);
        assert_eq!(player.memory_span(), 3);
        assert_eq!(player.memory(), vec![2.0; 3]);
        assert!((player.certainty() - 1.0).abs() < f64::EPSILON);
        assert!(!player.is_dead());
    }

    #[test]
    fn rejects_bad_construction() {
        let base = PlayerConfig::default();

        let cfg = PlayerConfig { life_points: 0, ..base.clone() };
        assert!(matches!(Player::seeded(&cfg, 1), Err(AgentError::NonPositiveVitality(0))));

        let cfg = PlayerConfig { memory_span: 0, ..base.clone() };
        assert!(matches!(Player::seeded(&cfg, 1), Err(AgentError::ZeroMemorySpan)));

        let cfg = base.with_certainty(-0.5);
        assert!(matches!(
            Player::seeded(&cfg, 1),
            Err(AgentError::InvalidParameter { name: "certainty", .. })
        ));

        let cfg = PlayerConfig { misanthropy: f64::NAN, ..base };
        assert!(matches!(
            Player::seeded(&cfg, 1),
            Err(AgentError::InvalidParameter { name: "misanthropy", .. })
        ));
    }

    #[test]
    fn vitality_mutators() {
        let mut player = test_player();
        player.decrease_vitality(12);
        assert_eq!(player.vitality(), 18);
        player.increase_vitality(-18);
        assert_eq!(player.vitality(), 0);
        assert!(player.is_dead());
        player.set_vitality(5);
        assert_eq!(player.vitality(), 5);
        assert_eq!(player.base_vitality(), 30);
    }

    #[test]
    fn certainty_setter_clamps() {
        let mut player = test_player();
        player.set_certainty(-2.0);
        assert!(player.certainty().abs() < f64::EPSILON);
    }

    #[test]
    fn memory_span_reconfiguration_zero_fills() {
        let mut player = test_player();
        player.remember(4.0);
        assert!(player.set_memory_span(5).is_ok());
        assert_eq!(player.memory(), vec![0.0; 5]);
        assert!(player.set_memory_span(0).is_err());
        assert_eq!(player.memory_span(), 5);
    }

    #[test]
    fn amnesia_and_remember() {
        let mut player = test_player();
        player.amnesia(0.0);
        player.remember(-2.0);
        assert_eq!(player.memory(), vec![0.0, 0.0, -2.0]);
        // (3 * -2) / 6
        assert!((player.conditions() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn same_seed_same_decisions() {
        let mut a = test_player();
        let mut b = test_player();
        for _ in 0..50 {
            assert_eq!(a.decide(), b.decide());
        }
    }

    #[test]
    fn decisions_are_sentinels() {
        let mut player = test_player();
        for x in [-4.0, -1.0, 0.0, 1.0, 4.0] {
            let value = player.decide_with(x).value();
            assert!(value == 1 || value == -1);
        }
    }

    #[test]
    fn hopeless_conditions_defect() {
        let cfg = PlayerConfig {
            misanthropy: 0.0,
            certainty: 50.0,
            ..PlayerConfig::default()
        };
        let mut player = Player::seeded(&cfg, 3).unwrap();
        for _ in 0..100 {
            assert_eq!(player.decide_with(-4.0), Decision::Defect);
        }
    }

    #[test]
    fn reseeding_aligns_decision_streams() {
        let mut a = test_player();
        let mut b = Player::seeded(&PlayerConfig::default(), 7).unwrap();
        a.reseed(SmallRng::seed_from_u64(99));
        b.reseed(SmallRng::seed_from_u64(99));
        for _ in 0..50 {
            assert_eq!(a.decide_with(0.5), b.decide_with(0.5));
        }
    }

    #[test]
    fn policy_and_memory_views_agree_with_player() {
        let mut player = test_player();
        player.remember(-1.0);

        let policy = player.policy();
        assert!((policy.threshold(0.3) - player.threshold(0.3)).abs() < f64::EPSILON);
        assert!((policy.misanthropy() - player.misanthropy()).abs() < f64::EPSILON);
        assert!((policy.certainty() - player.certainty()).abs() < f64::EPSILON);

        let memory = player.memory_buffer();
        assert_eq!(memory.span(), player.memory_span());
        assert_eq!(memory.to_vec(), vec![2.0, 2.0, -1.0]);
        assert!((memory.weighted_average() - player.conditions()).abs() < f64::EPSILON);
    }
}
