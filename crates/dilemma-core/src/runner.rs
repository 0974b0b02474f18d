//! Fixed-length run loop.
//!
//! [`run_rounds`] wraps the single-round [`run_round`] function, notifying a
//! [`RoundCallback`] after each round and accumulating a [`RunSummary`].
//!
//! [`run_round`]: crate::round::run_round

use tracing::info;

use dilemma_types::RoundSummary;

use crate::round::{self, SimulationState};

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Number of rounds executed.
    pub rounds: u64,
    /// Replacements summed over every round.
    pub total_deaths: u64,
    /// The last round summary, if any round ran.
    pub final_summary: Option<RoundSummary>,
}

/// Callback invoked after each round completes.
pub trait RoundCallback {
    /// Called after a round completes.
    fn on_round(&mut self, summary: &RoundSummary, state: &SimulationState);
}

/// A no-op round callback.
pub struct NoOpCallback;

impl RoundCallback for NoOpCallback {
    fn on_round(&mut self, _summary: &RoundSummary, _state: &SimulationState) {}
}

/// Records every round summary in order.
#[derive(Debug, Default)]
pub struct RoundHistory {
    /// Summaries collected so far.
    pub summaries: Vec<RoundSummary>,
}

impl RoundCallback for RoundHistory {
    fn on_round(&mut self, summary: &RoundSummary, _state: &SimulationState) {
        self.summaries.push(*summary);
    }
}

/// Run `rounds` rounds on `state`.
///
/// Zero rounds leaves the state untouched and returns an empty summary.
pub fn run_rounds(
    state: &mut SimulationState,
    rounds: u64,
    callback: &mut dyn RoundCallback,
) -> RunSummary {
    let mut result = RunSummary::default();

    for _ in 0..rounds {
        let summary = round::run_round(state);
        callback.on_round(&summary, state);

        result.rounds = result.rounds.saturating_add(1);
        result.total_deaths = result.total_deaths.saturating_add(u64::from(summary.deaths));
        result.final_summary = Some(summary);
    }

    info!(
        rounds = result.rounds,
        total_deaths = result.total_deaths,
        final_round = result.final_summary.as_ref().map(|s| s.round),
        "Run complete"
    );
    result
}
