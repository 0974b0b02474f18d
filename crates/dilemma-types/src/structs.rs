//! Value structs shared between the world, the round engine, and harnesses.

use serde::{Deserialize, Serialize};

/// A cell address on the grid.
///
/// Cells are addressed column first, matching the `[column][row]` layout of
/// the agent arrays the grid is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Zero-based column index, `0..width`.
    pub column: usize,
    /// Zero-based row index, `0..height`.
    pub row: usize,
}

impl CellPos {
    /// Create a position from a column and a row.
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl core::fmt::Display for CellPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Population statistics over the certainty parameter.
///
/// Produced by the summary extractor for start/end-state comparisons. The
/// fixed order of [`SummaryStats::to_array`] is the order trial harnesses
/// index into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean certainty.
    pub mean: f64,
    /// Lower-middle element of the sorted certainties.
    pub median: f64,
    /// Largest certainty.
    pub max: f64,
    /// Smallest certainty.
    pub min: f64,
    /// Fraction of players whose certainty is at least the median.
    pub fraction_above_median: f64,
    /// Fraction of players whose certainty is at least the mean.
    pub fraction_above_mean: f64,
    /// Number of players on the grid.
    pub population: u32,
}

impl SummaryStats {
    /// Stats of a population with no players: every field is zero.
    pub const EMPTY: Self = Self {
        mean: 0.0,
        median: 0.0,
        max: 0.0,
        min: 0.0,
        fraction_above_median: 0.0,
        fraction_above_mean: 0.0,
        population: 0,
    };

    /// Return the stats as the fixed-order 7-element vector
    /// `[mean, median, max, min, fraction_above_median, fraction_above_mean, population]`.
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.mean,
            self.median,
            self.max,
            self.min,
            self.fraction_above_median,
            self.fraction_above_mean,
            f64::from(self.population),
        ]
    }
}

/// What happened during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundSummary {
    /// One-based round number.
    pub round: u64,
    /// Players who chose to cooperate this round.
    pub cooperations: u32,
    /// Players who chose to defect this round.
    pub defections: u32,
    /// Players at or below zero vitality that were replaced.
    pub deaths: u32,
    /// Sum of all vitality lost across the grid (non-positive).
    pub total_damage: i64,
}
