//! Replacement phase: refill dead cells with a neighbor's offspring.
//!
//! Cells are visited column by column, rows inner. For each dead cell one
//! value is drawn from the grid's random source and split into quartiles
//! to choose the parent: north, east, south, or west. The parent gives
//! birth (which may mutate the offspring's certainty) and the offspring
//! takes the dead player's cell.
//!
//! Under [`ReplacementPolicy::InPlace`] the parent is read from the live
//! grid, so an offspring placed earlier in the pass can itself become a
//! parent. Under [`ReplacementPolicy::Snapshot`] every parent is chosen and
//! gives birth before any offspring is placed, so parents are read as they
//! stood when the phase started. Either way the birth runs on the live
//! parent and advances that parent's own random source.

use rand::Rng;
use tracing::debug;

use dilemma_agents::{BirthConfig, Player};
use dilemma_types::{Direction, ReplacementPolicy};
use dilemma_world::grid::GridPartsMut;
use dilemma_world::{Torus, WorldGrid};

/// One dead cell and the neighbor chosen to refill it.
#[derive(Debug, Clone, Copy)]
struct Pairing {
    cell: usize,
    parent: usize,
    direction: Direction,
}

/// Replace every dead player. Returns the number of replacements.
pub fn phase_replacement(
    world: &mut WorldGrid,
    birth: &BirthConfig,
    policy: ReplacementPolicy,
) -> u32 {
    let torus = *world.torus();
    let GridPartsMut { players, rng, .. } = world.parts_mut();

    match policy {
        ReplacementPolicy::InPlace => replace_in_place(&torus, players, rng, birth),
        ReplacementPolicy::Snapshot => replace_from_phase_start(&torus, players, rng, birth),
    }
}

fn replace_in_place(
    torus: &Torus,
    players: &mut [Player],
    rng: &mut impl Rng,
    birth: &BirthConfig,
) -> u32 {
    let mut replaced: u32 = 0;
    for cell in torus.column_major() {
        if !players.get(cell).is_some_and(Player::is_dead) {
            continue;
        }
        let pairing = choose_parent(torus, cell, rng);
        let Some(offspring) = players.get_mut(pairing.parent).map(|p| p.birth(birth)) else {
            continue;
        };
        if place(torus, players, pairing, offspring) {
            replaced = replaced.saturating_add(1);
        }
    }
    replaced
}

fn replace_from_phase_start(
    torus: &Torus,
    players: &mut [Player],
    rng: &mut impl Rng,
    birth: &BirthConfig,
) -> u32 {
    let pairings: Vec<Pairing> = torus
        .column_major()
        .filter(|&cell| players.get(cell).is_some_and(Player::is_dead))
        .map(|cell| choose_parent(torus, cell, rng))
        .collect();

    // Nothing is placed until every parent has given birth.
    let births: Vec<(Pairing, Player)> = pairings
        .into_iter()
        .filter_map(|pairing| {
            let offspring = players.get_mut(pairing.parent)?.birth(birth);
            Some((pairing, offspring))
        })
        .collect();

    let mut replaced: u32 = 0;
    for (pairing, offspring) in births {
        if place(torus, players, pairing, offspring) {
            replaced = replaced.saturating_add(1);
        }
    }
    replaced
}

/// Draw one grid-level value and pick the parent quartile.
fn choose_parent(torus: &Torus, cell: usize, rng: &mut impl Rng) -> Pairing {
    let direction = Direction::from_quartile(rng.random::<f64>());
    Pairing {
        cell,
        parent: torus.neighbor_index(cell, direction),
        direction,
    }
}

fn place(torus: &Torus, players: &mut [Player], pairing: Pairing, offspring: Player) -> bool {
    let Some(slot) = players.get_mut(pairing.cell) else {
        return false;
    };
    debug!(
        cell = %torus.pos(pairing.cell),
        parent = %torus.pos(pairing.parent),
        direction = ?pairing.direction,
        certainty = offspring.certainty(),
        "Player replaced"
    );
    *slot = offspring;
    true
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use dilemma_agents::PlayerConfig;
    use dilemma_types::CellPos;

    use super::*;

    fn config() -> PlayerConfig {
        PlayerConfig {
            life_points: 10,
            misanthropy: 0.0,
            certainty: 1.0,
            memory_span: 2,
            optimism: 0.5,
        }
    }

    fn grid(columns: usize, rows: usize, certainties: &[f64]) -> WorldGrid {
        seeded_grid(columns, rows, certainties, 99)
    }

    fn seeded_grid(columns: usize, rows: usize, certainties: &[f64], seed: u64) -> WorldGrid {
        let mut rng = SmallRng::seed_from_u64(seed);
        WorldGrid::from_certainties(columns, rows, certainties, &config(), 1, &mut rng).unwrap()
    }

    fn moods(player: &mut Player) -> Vec<dilemma_types::Decision> {
        (0..32).map(|_| player.decide_with(0.0)).collect()
    }

    /// Replay the grid-level draws of a phase in which every cell is dead,
    /// returning the certainties each policy should produce without
    /// mutation and how many cells inherited from an offspring placed
    /// earlier in the same pass.
    fn replay_all_dead(world: &WorldGrid, policy: ReplacementPolicy) -> (Vec<f64>, usize) {
        let torus = *world.torus();
        let original = world.certainties();
        let mut current = original.clone();
        let mut replaced = vec![false; torus.len()];
        let mut from_offspring = 0;

        let mut replay = world.clone();
        let rng = replay.rng_mut();
        for cell in torus.column_major() {
            let direction = Direction::from_quartile(rng.random::<f64>());
            let parent = torus.neighbor_index(cell, direction);
            let inherited = match policy {
                ReplacementPolicy::InPlace => {
                    if replaced[parent] {
                        from_offspring += 1;
                    }
                    current[parent]
                }
                ReplacementPolicy::Snapshot => original[parent],
            };
            current[cell] = inherited;
            replaced[cell] = true;
        }
        (current, from_offspring)
    }

    fn no_mutation() -> BirthConfig {
        BirthConfig {
            mutation_chance: 0.0,
            mutation_scale: 0.1,
        }
    }

    #[test]
    fn living_grid_is_untouched() {
        let mut world = grid(3, 3, &[1.0; 9]);
        let before = world.certainties();
        let replaced = phase_replacement(&mut world, &no_mutation(), ReplacementPolicy::InPlace);
        assert_eq!(replaced, 0);
        assert_eq!(world.certainties(), before);
    }

    #[test]
    fn dead_cell_takes_a_neighbor_certainty() {
        // Column-major certainties: column 1, row 1 is the center cell.
        let certainties = [0.1, 0.2, 0.3, 0.4, 9.0, 0.6, 0.7, 0.8, 0.9];
        let mut world = grid(3, 3, &certainties);
        let center = CellPos::new(1, 1);
        world.player_mut(center).unwrap().set_vitality(0);

        let replaced = phase_replacement(&mut world, &no_mutation(), ReplacementPolicy::InPlace);
        assert_eq!(replaced, 1);

        let child = world.player(center).unwrap();
        assert_eq!(child.vitality(), 10);
        assert_eq!(child.memory(), vec![0.5, 0.5]);
        let neighbors: Vec<f64> = Direction::ALL
            .iter()
            .map(|&d| world.neighbor(center, d).unwrap().certainty())
            .collect();
        assert!(neighbors.contains(&child.certainty()));
        assert!((child.certainty() - 9.0).abs() > f64::EPSILON);
    }

    #[test]
    fn offspring_are_always_alive() {
        let mut world = grid(4, 2, &[1.0; 8]);
        for player in world.players_mut() {
            player.set_vitality(-5);
        }
        let replaced = phase_replacement(&mut world, &BirthConfig::default(), ReplacementPolicy::InPlace);
        assert_eq!(replaced, 8);
        assert!(world.players().iter().all(|p| !p.is_dead()));
    }

    #[test]
    fn snapshot_parents_come_from_phase_start() {
        // A 1 x 2 column: both cells dead, each cell's only neighbors are the
        // other cell (north and south) and itself (east and west). Under the
        // snapshot policy neither offspring can inherit from an offspring
        // placed earlier, so certainties stay within the original pair.
        let mut world = grid(1, 2, &[1.0, 3.0]);
        for player in world.players_mut() {
            player.set_vitality(0);
        }
        let replaced = phase_replacement(&mut world, &no_mutation(), ReplacementPolicy::Snapshot);
        assert_eq!(replaced, 2);
        for certainty in world.certainties() {
            let original = [1.0, 3.0].iter().any(|c: &f64| (c - certainty).abs() < f64::EPSILON);
            assert!(original, "unexpected {certainty}");
        }
    }

    #[test]
    fn snapshot_and_in_place_agree_on_isolated_deaths() {
        let certainties: Vec<f64> = (0..16_u32).map(f64::from).collect();
        let mut in_place = grid(4, 4, &certainties);
        let mut snapshot = in_place.clone();
        for world in [&mut in_place, &mut snapshot] {
            world.player_mut(CellPos::new(0, 0)).unwrap().set_vitality(0);
            world.player_mut(CellPos::new(2, 2)).unwrap().set_vitality(0);
        }

        phase_replacement(&mut in_place, &no_mutation(), ReplacementPolicy::InPlace);
        phase_replacement(&mut snapshot, &no_mutation(), ReplacementPolicy::Snapshot);
        assert_eq!(in_place.certainties(), snapshot.certainties());

        // Parents advanced their own sources identically under both policies.
        for (a, b) in in_place.players_mut().iter_mut().zip(snapshot.players_mut()) {
            assert_eq!(moods(a), moods(b));
        }
    }

    #[test]
    fn births_advance_the_live_parents_source() {
        let certainties: Vec<f64> = (1..=9_u32).map(f64::from).collect();
        let birth = BirthConfig {
            mutation_chance: 0.5,
            mutation_scale: 0.1,
        };
        let center = CellPos::new(1, 1);

        for policy in [ReplacementPolicy::InPlace, ReplacementPolicy::Snapshot] {
            let mut world = grid(3, 3, &certainties);
            world.player_mut(center).unwrap().set_vitality(0);

            let mut replay = world.clone();
            let direction = Direction::from_quartile(replay.rng_mut().random::<f64>());
            let parent_pos = world.torus().neighbor(center, direction);
            let mut expected_parent = world.player(parent_pos).unwrap().clone();
            let mut expected_child = expected_parent.birth(&birth);

            phase_replacement(&mut world, &birth, policy);

            let child = world.player_mut(center).unwrap();
            assert!((child.certainty() - expected_child.certainty()).abs() < f64::EPSILON);
            assert_eq!(moods(child), moods(&mut expected_child), "{policy:?} child");

            // The parent's next draws follow the ones spent on the birth,
            // so they are not the draws that decided the mutation.
            let parent = world.player_mut(parent_pos).unwrap();
            assert_eq!(moods(parent), moods(&mut expected_parent), "{policy:?} parent");
        }
    }

    #[test]
    fn in_place_offspring_parent_later_cells() {
        let certainties: Vec<f64> = (1..=6_u32).map(f64::from).collect();
        let mut inherited_from_offspring = 0;
        let mut policies_diverged = false;

        for seed in 0..32 {
            let mut in_place = seeded_grid(1, 6, &certainties, seed);
            for player in in_place.players_mut() {
                player.set_vitality(0);
            }
            let mut snapshot = in_place.clone();

            let (expected_in_place, from_offspring) =
                replay_all_dead(&in_place, ReplacementPolicy::InPlace);
            let (expected_snapshot, snapshot_from_offspring) =
                replay_all_dead(&snapshot, ReplacementPolicy::Snapshot);
            assert_eq!(snapshot_from_offspring, 0);

            phase_replacement(&mut in_place, &no_mutation(), ReplacementPolicy::InPlace);
            phase_replacement(&mut snapshot, &no_mutation(), ReplacementPolicy::Snapshot);

            assert_eq!(in_place.certainties(), expected_in_place, "seed {seed}");
            assert_eq!(snapshot.certainties(), expected_snapshot, "seed {seed}");

            inherited_from_offspring += from_offspring;
            policies_diverged |= in_place.certainties() != snapshot.certainties();
        }

        assert!(inherited_from_offspring > 0);
        assert!(policies_diverged);
    }
}
