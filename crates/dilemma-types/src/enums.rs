//! Enumeration types for the simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// The outcome of one player's decision function for one round.
///
/// Each variant carries a fixed sentinel value (see [`Decision::value`]) that
/// feeds the memory samples pushed after every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Cooperate with the opponent (sentinel `+1`).
    Cooperate,
    /// Defect against the opponent (sentinel `-1`).
    Defect,
}

impl Decision {
    /// Return the sentinel value of this decision: `+1` or `-1`.
    pub const fn value(self) -> i32 {
        match self {
            Self::Cooperate => 1,
            Self::Defect => -1,
        }
    }

    /// Return `true` for [`Decision::Cooperate`].
    pub const fn is_cooperate(self) -> bool {
        matches!(self, Self::Cooperate)
    }
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// One of the four cardinal neighbors of a grid cell.
///
/// North is the previous row, south the next row, west the previous column
/// and east the next column. All four wrap around the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Row - 1.
    North,
    /// Column + 1.
    East,
    /// Row + 1.
    South,
    /// Column - 1.
    West,
}

impl Direction {
    /// All four directions in quartile order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Map a uniform draw in `[0, 1)` to a direction by quartile.
    ///
    /// `[0, .25)` is north, `[.25, .5)` east, `[.5, .75)` south and
    /// everything from `.75` up is west.
    pub fn from_quartile(roll: f64) -> Self {
        if roll < 0.25 {
            Self::North
        } else if roll < 0.5 {
            Self::East
        } else if roll < 0.75 {
            Self::South
        } else {
            Self::West
        }
    }
}

// ---------------------------------------------------------------------------
// Replacement policy
// ---------------------------------------------------------------------------

/// How the replacement phase reads neighbor state while refilling dead cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// Traverse columns then rows and read the live grid. A parent chosen
    /// for a later cell may itself be an offspring placed earlier in the
    /// same phase.
    #[default]
    InPlace,
    /// Choose every parent and collect every birth before placing any
    /// offspring, so parents are read as they stood when the phase starts.
    /// Which parent a cell inherits from does not depend on traversal order.
    Snapshot,
}

// ---------------------------------------------------------------------------
// Skew
// ---------------------------------------------------------------------------

/// Rough shape of a distribution, judged from its median and mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skew {
    /// The median exceeds the mean by more than 5% of the mean.
    Left,
    /// The mean exceeds the median by more than 5% of the mean.
    Right,
    /// Median and mean are within 5% of the mean of each other.
    None,
}

impl Skew {
    /// Classify a distribution from its median and mean.
    pub fn classify(median: f64, mean: f64) -> Self {
        let tolerance = 0.05 * mean;
        if median - mean > tolerance {
            Self::Left
        } else if mean - median > tolerance {
            Self::Right
        } else {
            Self::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_sentinels() {
        assert_eq!(Decision::Cooperate.value(), 1);
        assert_eq!(Decision::Defect.value(), -1);
        assert!(Decision::Cooperate.is_cooperate());
        assert!(!Decision::Defect.is_cooperate());
    }

    #[test]
    fn quartile_boundaries() {
        assert_eq!(Direction::from_quartile(0.0), Direction::North);
        assert_eq!(Direction::from_quartile(0.249), Direction::North);
        assert_eq!(Direction::from_quartile(0.25), Direction::East);
        assert_eq!(Direction::from_quartile(0.5), Direction::South);
        assert_eq!(Direction::from_quartile(0.75), Direction::West);
        assert_eq!(Direction::from_quartile(0.999), Direction::West);
    }

    #[test]
    fn skew_classification() {
        assert_eq!(Skew::classify(1.2, 1.0), Skew::Left);
        assert_eq!(Skew::classify(0.8, 1.0), Skew::Right);
        assert_eq!(Skew::classify(1.04, 1.0), Skew::None);
        assert_eq!(Skew::classify(0.96, 1.0), Skew::None);
    }

    #[test]
    fn replacement_policy_serde_names() {
        let json = serde_json::to_string(&ReplacementPolicy::InPlace);
        assert_eq!(json.ok().as_deref(), Some("\"in_place\""));
        let parsed: Result<ReplacementPolicy, _> = serde_json::from_str("\"snapshot\"");
        assert_eq!(parsed.ok(), Some(ReplacementPolicy::Snapshot));
        assert_eq!(ReplacementPolicy::default(), ReplacementPolicy::InPlace);
    }
}
