//! Per-round record of the games played across grid edges.
//!
//! Each cell owns two edges: the vertical one to its north neighbor and the
//! horizontal one to its east neighbor. Recording both per cell covers all
//! `2 * M * N` edges of the torus exactly once, and lets the damage phase
//! read each game from both endpoints without replaying it.

use dilemma_agents::DecisionPair;
use dilemma_types::Decision;

/// Two parallel arrays of decision pairs, indexed like the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeOutcomes {
    vertical: Vec<DecisionPair>,
    horizontal: Vec<DecisionPair>,
}

impl EdgeOutcomes {
    /// Allocate records for `cells` cells. Every edge starts as mutual
    /// cooperation until the first round overwrites it.
    pub fn new(cells: usize) -> Self {
        let blank = DecisionPair::new(Decision::Cooperate, Decision::Cooperate);
        Self {
            vertical: vec![blank; cells],
            horizontal: vec![blank; cells],
        }
    }

    /// Record the games owned by the cell at `index`. Out-of-range indices
    /// are ignored.
    pub fn record(&mut self, index: usize, vertical: DecisionPair, horizontal: DecisionPair) {
        if let Some(slot) = self.vertical.get_mut(index) {
            *slot = vertical;
        }
        if let Some(slot) = self.horizontal.get_mut(index) {
            *slot = horizontal;
        }
    }

    /// The game between the cell at `index` and its north neighbor.
    pub fn vertical(&self, index: usize) -> Option<DecisionPair> {
        self.vertical.get(index).copied()
    }

    /// The game between the cell at `index` and its east neighbor.
    pub fn horizontal(&self, index: usize) -> Option<DecisionPair> {
        self.horizontal.get(index).copied()
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.vertical.len()
    }

    /// `true` when no cells are covered.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_read_back() {
        let mut edges = EdgeOutcomes::new(4);
        let v = DecisionPair::new(Decision::Defect, Decision::Cooperate);
        let h = DecisionPair::new(Decision::Cooperate, Decision::Defect);
        edges.record(2, v, h);
        assert_eq!(edges.vertical(2), Some(v));
        assert_eq!(edges.horizontal(2), Some(h));
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut edges = EdgeOutcomes::new(1);
        let pair = DecisionPair::new(Decision::Defect, Decision::Defect);
        edges.record(5, pair, pair);
        assert_eq!(edges.vertical(5), None);
        assert_eq!(
            edges.vertical(0),
            Some(DecisionPair::new(Decision::Cooperate, Decision::Cooperate))
        );
    }
}
