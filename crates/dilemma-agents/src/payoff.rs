//! The pairwise payoff rule.
//!
//! Every game costs vitality. Mutual cooperation is cheapest, mutual
//! defection costs more, and a lone cooperator pays the most while the
//! defector walks away untouched:
//!
//! | own       | neighbor  | own delta | neighbor delta |
//! |-----------|-----------|-----------|----------------|
//! | Defect    | Cooperate | 0         | -3             |
//! | Cooperate | Defect    | -3        | 0              |
//! | Cooperate | Cooperate | -1        | -1             |
//! | Defect    | Defect    | -2        | -2             |

use serde::{Deserialize, Serialize};

use dilemma_types::Decision;

/// Loss for each player when both cooperate.
pub const MUTUAL_COOPERATION: i32 = -1;

/// Loss for each player when both defect.
pub const MUTUAL_DEFECTION: i32 = -2;

/// Loss for the cooperator when the other player defects.
pub const SUCKER: i32 = -3;

/// Loss for the defector when the other player cooperates.
pub const TEMPTATION: i32 = 0;

/// Vitality deltas for `(own, neighbor)` given both decisions.
pub const fn payoff(own: Decision, neighbor: Decision) -> (i32, i32) {
    match (own, neighbor) {
        (Decision::Defect, Decision::Cooperate) => (TEMPTATION, SUCKER),
        (Decision::Cooperate, Decision::Defect) => (SUCKER, TEMPTATION),
        (Decision::Cooperate, Decision::Cooperate) => (MUTUAL_COOPERATION, MUTUAL_COOPERATION),
        (Decision::Defect, Decision::Defect) => (MUTUAL_DEFECTION, MUTUAL_DEFECTION),
    }
}

/// The two simultaneous decisions made across one grid edge.
///
/// `own` belongs to the cell that records the edge, `neighbor` to its north
/// or east neighbor. Keeping the roles straight matters because the payoff
/// is asymmetric when the decisions differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionPair {
    /// Decision of the recording cell.
    pub own: Decision,
    /// Decision of the neighboring cell.
    pub neighbor: Decision,
}

impl DecisionPair {
    /// Pair two decisions.
    pub const fn new(own: Decision, neighbor: Decision) -> Self {
        Self { own, neighbor }
    }

    /// Vitality deltas for `(own, neighbor)`.
    pub const fn payoffs(&self) -> (i32, i32) {
        payoff(self.own, self.neighbor)
    }
}
