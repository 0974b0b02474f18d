//! The logistic decision function.
//!
//! A player facing conditions `x` cooperates with probability
//!
//! ```text
//! p(x) = 1 / (1 + e^(misanthropy - certainty * x))
//! ```
//!
//! The draw is made by comparing a uniform mood `u` in `[0, 1)` against the
//! threshold: `u <= p` cooperates, anything else defects. Misanthropy shifts
//! the curve toward defection; certainty steepens it so the decision follows
//! the sign of the conditions more closely.

use rand::Rng;

use dilemma_types::Decision;

/// The two scalars that parameterize a player's disposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    misanthropy: f64,
    certainty: f64,
}

impl DecisionPolicy {
    /// Create a policy. Negative certainty is clamped to zero.
    pub fn new(misanthropy: f64, certainty: f64) -> Self {
        Self {
            misanthropy,
            certainty: certainty.max(0.0),
        }
    }

    /// The bias term `a`.
    pub const fn misanthropy(&self) -> f64 {
        self.misanthropy
    }

    /// The slope term `b`, always non-negative.
    pub const fn certainty(&self) -> f64 {
        self.certainty
    }

    /// Replace the bias term.
    pub const fn set_misanthropy(&mut self, misanthropy: f64) {
        self.misanthropy = misanthropy;
    }

    /// Replace the slope term, clamping negative values to zero.
    pub fn set_certainty(&mut self, certainty: f64) {
        self.certainty = certainty.max(0.0);
    }

    /// Probability of cooperating under `conditions`.
    pub fn threshold(&self, conditions: f64) -> f64 {
        1.0 / (1.0 + (self.misanthropy - self.certainty * conditions).exp())
    }

    /// Draw one mood from `rng` and decide under `conditions`.
    ///
    /// Consumes exactly one random draw.
    pub fn decide(&self, conditions: f64, rng: &mut impl Rng) -> Decision {
        let mood: f64 = rng.random();
        Self::resolve(mood, self.threshold(conditions))
    }

    /// Compare a mood against a threshold.
    pub fn resolve(mood: f64, threshold: f64) -> Decision {
        if mood <= threshold {
            Decision::Cooperate
        } else {
            Decision::Defect
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn neutral_policy_is_a_coin_flip() {
        let policy = DecisionPolicy::new(0.0, 1.0);
        assert!((policy.threshold(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn threshold_in_open_unit_interval() {
        for misanthropy in [-3.0, -1.0, 0.0, 1.0, 3.0] {
            for certainty in [0.0, 0.5, 1.0, 4.0] {
                let policy = DecisionPolicy::new(misanthropy, certainty);
                for x in [-4.0, -2.0, 0.0, 2.0, 4.0] {
                    let p = policy.threshold(x);
                    assert!(p > 0.0 && p < 1.0, "threshold {p} out of range");
                }
            }
        }
    }

    #[test]
    fn threshold_matches_logistic() {
        let policy = DecisionPolicy::new(-2.0, 1.5);
        let expected = 1.0 / (1.0 + (-2.0_f64 - 1.5 * 2.0).exp());
        assert!((policy.threshold(2.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn misanthropy_lowers_cooperation() {
        let kind = DecisionPolicy::new(-2.0, 1.0);
        let grim = DecisionPolicy::new(2.0, 1.0);
        assert!(kind.threshold(0.0) > grim.threshold(0.0));
    }

    #[test]
    fn certainty_follows_conditions() {
        let policy = DecisionPolicy::new(0.0, 3.0);
        assert!(policy.threshold(2.0) > 0.99);
        assert!(policy.threshold(-2.0) < 0.01);
    }

    #[test]
    fn negative_certainty_clamped() {
        let mut policy = DecisionPolicy::new(0.0, -1.0);
        assert!(policy.certainty().abs() < f64::EPSILON);
        policy.set_certainty(-0.3);
        assert!(policy.certainty().abs() < f64::EPSILON);
        policy.set_certainty(0.7);
        assert!((policy.certainty() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn resolve_boundary_cooperates() {
        assert_eq!(DecisionPolicy::resolve(0.5, 0.5), Decision::Cooperate);
        assert_eq!(DecisionPolicy::resolve(0.5001, 0.5), Decision::Defect);
        assert_eq!(DecisionPolicy::resolve(0.0, 0.0), Decision::Cooperate);
    }

    #[test]
    fn decisions_track_threshold_frequency() {
        let policy = DecisionPolicy::new(0.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let trials = 10_000;
        let cooperations = (0..trials)
            .filter(|_| policy.decide(1.0, &mut rng).is_cooperate())
            .count();
        // p(1) ~= 0.731
        assert!((6_900..=7_700).contains(&cooperations), "got {cooperations}");
    }
}
