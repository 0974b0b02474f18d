//! Read-only statistics over player certainty.
//!
//! Trial harnesses compare these numbers between the start and end of a run
//! to see how the population's disposition drifted. Nothing here touches
//! simulation state.
//!
//! The median is the element at index `(count - 1) / 2` of the sorted
//! values: for an even count that is the lower of the two middle values,
//! not their average.

use dilemma_agents::Player;
use dilemma_types::SummaryStats;

use crate::grid::WorldGrid;

/// Summarize a list of certainty values. Returns `None` when `values` is
/// empty.
pub fn summarize(values: &[f64]) -> Option<SummaryStats> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let min = *sorted.first()?;
    let max = *sorted.last()?;
    let median = *sorted.get(sorted.len().saturating_sub(1) / 2)?;
    let count = count_as_f64(sorted.len());
    let mean = sorted.iter().sum::<f64>() / count;

    Some(SummaryStats {
        mean,
        median,
        max,
        min,
        fraction_above_median: fraction_at_least(&sorted, median),
        fraction_above_mean: fraction_at_least(&sorted, mean),
        population: u32::try_from(sorted.len()).unwrap_or(u32::MAX),
    })
}

/// Fraction of `values` strictly below `threshold`. Zero for an empty list.
pub fn fraction_below(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|&&v| v < threshold).count();
    count_as_f64(below) / count_as_f64(values.len())
}

/// Fraction of `values` at or above `threshold`. Zero for an empty list.
pub fn fraction_at_least(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    1.0 - fraction_below(values, threshold)
}

fn count_as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

impl WorldGrid {
    /// Mean, median, max, min, threshold fractions and population of the
    /// certainty parameter across all players.
    pub fn summary_stats(&self) -> SummaryStats {
        summarize(&self.certainties()).unwrap_or(SummaryStats::EMPTY)
    }

    /// Fraction of players whose certainty is strictly below `threshold`.
    pub fn percent_less_than(&self, threshold: f64) -> f64 {
        fraction_below(&self.certainties(), threshold)
    }

    /// Fraction of players whose certainty is at or above `threshold`,
    /// always `1 - percent_less_than(threshold)`.
    pub fn percent_greater_equal_than(&self, threshold: f64) -> f64 {
        1.0 - self.percent_less_than(threshold)
    }

    /// Mean certainty of the grid.
    pub fn mean_certainty(&self) -> f64 {
        let total: f64 = self.players().iter().map(Player::certainty).sum();
        total / count_as_f64(self.population())
    }
}
