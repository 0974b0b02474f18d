//! Round cycle: the three-phase loop that drives the simulation.
//!
//! Each round runs these phases over the whole grid:
//!
//! 1. **Decision** -- every player decides exactly once from its memory.
//!    The decision is recorded on the player's northern edge and on its
//!    eastern edge, so every edge of the torus holds one decision pair.
//!
//! 2. **Damage** -- every player collects the payoffs of the four games it
//!    took part in and remembers the sum of its opponents' decision values.
//!
//! 3. **Replacement** -- dead players are replaced by the offspring of a
//!    randomly chosen orthogonal neighbor. See [`crate::replacement`].
//!
//! The cycle is deterministic given the grid's random sources.

use tracing::{debug, warn};

use dilemma_agents::{BirthConfig, DecisionPair, Player};
use dilemma_types::{Decision, Direction, ReplacementPolicy, RoundSummary};
use dilemma_world::grid::GridPartsMut;
use dilemma_world::{EdgeOutcomes, Torus, WorldGrid};

use crate::replacement;

/// The mutable simulation state passed through the round cycle.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The player grid.
    pub world: WorldGrid,
    /// Mutation parameters for offspring.
    pub birth: BirthConfig,
    /// How the replacement phase reads neighbor state.
    pub replacement: ReplacementPolicy,
    round: u64,
}

impl SimulationState {
    /// Wrap a grid for simulation, starting at round zero.
    pub const fn new(world: WorldGrid, birth: BirthConfig, replacement: ReplacementPolicy) -> Self {
        Self {
            world,
            birth,
            replacement,
            round: 0,
        }
    }

    /// Number of rounds completed so far.
    pub const fn round(&self) -> u64 {
        self.round
    }

    /// Run one round. Shorthand for [`run_round`].
    pub fn advance_round(&mut self) -> RoundSummary {
        run_round(self)
    }
}

/// The four games one cell plays in a round, read from the edge records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentGames {
    /// Game with the northern neighbor (this cell is `own`).
    pub north: DecisionPair,
    /// Game with the southern neighbor (this cell is `neighbor`).
    pub south: DecisionPair,
    /// Game with the eastern neighbor (this cell is `own`).
    pub east: DecisionPair,
    /// Game with the western neighbor (this cell is `neighbor`).
    pub west: DecisionPair,
}

impl IncidentGames {
    /// Collect the games of cell `index`. Returns `None` if the edge
    /// records do not cover the index.
    pub fn at(edges: &EdgeOutcomes, torus: &Torus, index: usize) -> Option<Self> {
        let south = torus.neighbor_index(index, Direction::South);
        let west = torus.neighbor_index(index, Direction::West);
        Some(Self {
            north: edges.vertical(index)?,
            south: edges.vertical(south)?,
            east: edges.horizontal(index)?,
            west: edges.horizontal(west)?,
        })
    }

    /// Total vitality change for this cell: the sum of its four payoffs.
    pub const fn vitality_delta(&self) -> i32 {
        self.north
            .payoffs()
            .0
            .saturating_add(self.south.payoffs().1)
            .saturating_add(self.east.payoffs().0)
            .saturating_add(self.west.payoffs().1)
    }

    /// Sum of the four opponents' decision values, in `[-4, 4]`.
    pub const fn opponent_sum(&self) -> i32 {
        self.north
            .neighbor
            .value()
            .saturating_add(self.south.own.value())
            .saturating_add(self.east.neighbor.value())
            .saturating_add(self.west.own.value())
    }
}

/// Execute a single round of the simulation.
///
/// Runs Decision, Damage, and Replacement in order and returns a summary
/// of what happened.
pub fn run_round(state: &mut SimulationState) -> RoundSummary {
    let round = state.round.saturating_add(1);

    let (cooperations, defections) = phase_decisions(&mut state.world);
    let total_damage = phase_damage(&mut state.world);
    let deaths = replacement::phase_replacement(&mut state.world, &state.birth, state.replacement);

    let population = state.world.population();
    if deaths > 0 && usize::try_from(deaths).is_ok_and(|d| d == population) {
        warn!(round, population, "Entire population replaced");
    }

    debug!(
        round,
        cooperations, defections, deaths, total_damage, "Round complete"
    );

    state.round = round;
    RoundSummary {
        round,
        cooperations,
        defections,
        deaths,
        total_damage,
    }
}

// ---------------------------------------------------------------------------
// Phase 1: Decision
// ---------------------------------------------------------------------------

/// Every player decides once; the decision fills its northern and eastern
/// edge records. Returns `(cooperations, defections)`.
fn phase_decisions(world: &mut WorldGrid) -> (u32, u32) {
    let torus = *world.torus();
    let GridPartsMut { players, edges, .. } = world.parts_mut();

    let decisions: Vec<Decision> = players.iter_mut().map(Player::decide).collect();

    for (index, &own) in decisions.iter().enumerate() {
        let north = torus.neighbor_index(index, Direction::North);
        let east = torus.neighbor_index(index, Direction::East);
        let (Some(&north_decision), Some(&east_decision)) = (decisions.get(north), decisions.get(east))
        else {
            continue;
        };
        edges.record(
            index,
            DecisionPair::new(own, north_decision),
            DecisionPair::new(own, east_decision),
        );
    }

    let cooperations = decisions.iter().filter(|d| d.is_cooperate()).count();
    let defections = decisions.len().saturating_sub(cooperations);
    (
        u32::try_from(cooperations).unwrap_or(u32::MAX),
        u32::try_from(defections).unwrap_or(u32::MAX),
    )
}

// ---------------------------------------------------------------------------
// Phase 2: Damage
// ---------------------------------------------------------------------------

/// Apply every cell's payoffs and push its opponent sum into memory.
/// Returns the summed vitality change over the grid.
fn phase_damage(world: &mut WorldGrid) -> i64 {
    let torus = *world.torus();
    let GridPartsMut { players, edges, .. } = world.parts_mut();

    let mut total_damage: i64 = 0;
    for (index, player) in players.iter_mut().enumerate() {
        let Some(games) = IncidentGames::at(edges, &torus, index) else {
            continue;
        };
        let delta = games.vitality_delta();
        player.increase_vitality(delta);
        player.remember(f64::from(games.opponent_sum()));
        total_damage = total_damage.saturating_add(i64::from(delta));
    }
    total_damage
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use dilemma_agents::PlayerConfig;
    use dilemma_types::CellPos;

    use super::*;

    fn template() -> PlayerConfig {
        PlayerConfig {
            life_points: 10,
            misanthropy: 0.0,
            certainty: 1.0,
            memory_span: 1,
            optimism: 0.0,
        }
    }

    fn state(columns: usize, rows: usize, config: &PlayerConfig, seed: u64) -> SimulationState {
        let mut rng = SmallRng::seed_from_u64(seed);
        let world = WorldGrid::uniform(columns, rows, config, 1, &mut rng).unwrap();
        SimulationState::new(world, BirthConfig::default(), ReplacementPolicy::InPlace)
    }

    #[test]
    fn two_by_two_round_applies_edge_payoffs() {
        let mut state = state(2, 2, &template(), 11);
        let summary = state.advance_round();

        assert_eq!(summary.round, 1);
        assert_eq!(state.round(), 1);
        assert_eq!(summary.cooperations + summary.defections, 4);

        let torus = *state.world.torus();
        let mut dead = 0;
        for index in 0..torus.len() {
            let delta = IncidentGames::at(state.world.edges(), &torus, index)
                .unwrap()
                .vitality_delta();
            assert!((-12..=0).contains(&delta), "delta {delta}");

            let player = state.world.players().get(index).unwrap();
            assert!(!player.is_dead());
            if 10 + delta > 0 {
                assert_eq!(player.vitality(), 10 + delta);
            } else {
                assert_eq!(player.vitality(), 10);
                dead += 1;
            }
        }
        assert_eq!(summary.deaths, dead);
    }

    #[test]
    fn each_cell_decides_once_per_round() {
        // With one decision per cell, the northern edge of a cell and the
        // southern edge of its northern neighbor share the same pair, and
        // every cell's own decision appears identically on both its edges.
        let mut state = state(3, 4, &template(), 5);
        state.advance_round();

        let torus = *state.world.torus();
        let edges = state.world.edges();
        for index in 0..torus.len() {
            let vertical = edges.vertical(index).unwrap();
            let horizontal = edges.horizontal(index).unwrap();
            assert_eq!(vertical.own, horizontal.own);

            let north = torus.neighbor_index(index, Direction::North);
            assert_eq!(vertical.neighbor, edges.vertical(north).unwrap().own);
            let east = torus.neighbor_index(index, Direction::East);
            assert_eq!(horizontal.neighbor, edges.horizontal(east).unwrap().own);
        }
    }

    #[test]
    fn damage_matches_payoff_table() {
        let mut state = state(3, 3, &template(), 21);
        let summary = state.advance_round();

        let torus = *state.world.torus();
        let mut total = 0_i64;
        for index in 0..torus.len() {
            let games = IncidentGames::at(state.world.edges(), &torus, index).unwrap();
            let player = state.world.players().get(index).unwrap();
            assert_eq!(player.vitality(), 10 + games.vitality_delta());
            assert_eq!(player.memory(), vec![f64::from(games.opponent_sum())]);
            total += i64::from(games.vitality_delta());
        }
        assert_eq!(summary.total_damage, total);
    }

    #[test]
    fn all_cooperators_lose_four_per_round() {
        // A huge negative misanthropy pushes the threshold to 1.
        let config = PlayerConfig {
            misanthropy: -1000.0,
            ..template()
        };
        let mut state = state(2, 3, &config, 3);
        let summary = state.advance_round();
        assert_eq!(summary.defections, 0);
        assert_eq!(summary.total_damage, -24);
        for player in state.world.players() {
            assert_eq!(player.vitality(), 6);
            assert_eq!(player.memory(), vec![4.0]);
        }
    }

    #[test]
    fn all_defectors_lose_eight_per_round() {
        let config = PlayerConfig {
            misanthropy: 1000.0,
            ..template()
        };
        let mut state = state(2, 2, &config, 3);
        let summary = state.advance_round();
        assert_eq!(summary.cooperations, 0);
        for player in state.world.players() {
            assert_eq!(player.vitality(), 2);
            assert_eq!(player.memory(), vec![-4.0]);
        }
    }

    #[test]
    fn dead_players_are_replaced_within_the_round() {
        let config = PlayerConfig {
            life_points: 8,
            misanthropy: 1000.0,
            ..template()
        };
        let mut state = state(2, 2, &config, 3);
        let summary = state.advance_round();
        assert_eq!(summary.deaths, 4);
        for player in state.world.players() {
            assert!(!player.is_dead());
            assert_eq!(player.vitality(), 8);
        }
    }

    #[test]
    fn one_by_one_grid_plays_itself() {
        let config = PlayerConfig {
            misanthropy: -1000.0,
            ..template()
        };
        let mut state = state(1, 1, &config, 9);
        state.advance_round();
        let player = state.world.player(CellPos::new(0, 0)).unwrap();
        assert_eq!(player.vitality(), 6);
    }

    #[test]
    fn same_seed_same_history() {
        let config = PlayerConfig {
            life_points: 12,
            ..template()
        };
        let mut a = state(4, 4, &config, 77);
        let mut b = state(4, 4, &config, 77);
        for _ in 0..20 {
            assert_eq!(a.advance_round(), b.advance_round());
        }
        assert_eq!(a.world.certainties(), b.world.certainties());
    }
}
