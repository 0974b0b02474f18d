//! The world grid: an M x N torus of players.
//!
//! A [`WorldGrid`] is built once per simulation run and mutated in place
//! by the round engine. Its dimensions never change and every cell always
//! holds exactly one player; replacement swaps a dead player for a new one
//! in the same cell.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use dilemma_agents::{Player, PlayerConfig};
use dilemma_types::{CellPos, Direction};

use crate::edges::EdgeOutcomes;
use crate::error::WorldError;
use crate::torus::Torus;

/// Mutable borrows of the grid's players, edge records and grid-level
/// random source, handed to the round engine together.
pub struct GridPartsMut<'a> {
    /// Players in flat row-major order.
    pub players: &'a mut [Player],
    /// Edge records for the current round.
    pub edges: &'a mut EdgeOutcomes,
    /// Random source for replacement-parent selection.
    pub rng: &'a mut SmallRng,
}

/// A toroidal grid of players.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    torus: Torus,
    space_horizon: usize,
    players: Vec<Player>,
    edges: EdgeOutcomes,
    rng: SmallRng,
}

impl WorldGrid {
    /// Build a grid from columns of players, seeding the grid-level random
    /// source from the operating system.
    ///
    /// `columns[c][r]` becomes the cell at column `c`, row `r`.
    ///
    /// # Errors
    ///
    /// See [`WorldGrid::with_rng`].
    pub fn new(columns: Vec<Vec<Player>>, space_horizon: usize) -> Result<Self, WorldError> {
        Self::with_rng(columns, space_horizon, SmallRng::from_os_rng())
    }

    /// Build a grid from columns of players with an explicit grid-level
    /// random source.
    ///
    /// # Errors
    ///
    /// - [`WorldError::EmptyGrid`] if there are no columns or no rows
    /// - [`WorldError::RaggedGrid`] if columns differ in length
    /// - [`WorldError::ZeroSpaceHorizon`] if `space_horizon` is zero
    pub fn with_rng(
        columns: Vec<Vec<Player>>,
        space_horizon: usize,
        rng: SmallRng,
    ) -> Result<Self, WorldError> {
        if space_horizon == 0 {
            return Err(WorldError::ZeroSpaceHorizon);
        }
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyGrid);
        }
        for (column, cells) in columns.iter().enumerate() {
            if cells.len() != height {
                return Err(WorldError::RaggedGrid {
                    column,
                    expected: height,
                    found: cells.len(),
                });
            }
        }

        // Transpose column lists into row-major storage.
        let torus = Torus::new(width, height);
        let mut iters: Vec<_> = columns.into_iter().map(Vec::into_iter).collect();
        let mut players = Vec::with_capacity(torus.len());
        for _ in 0..height {
            for (column, cells) in iters.iter_mut().enumerate() {
                let player = cells.next().ok_or(WorldError::RaggedGrid {
                    column,
                    expected: height,
                    found: 0,
                })?;
                players.push(player);
            }
        }

        debug!(width, height, space_horizon, "World grid created");

        Ok(Self {
            torus,
            space_horizon,
            edges: EdgeOutcomes::new(players.len()),
            players,
            rng,
        })
    }

    /// Build a `columns` x `rows` grid from a flat certainty array and a
    /// player template, drawing every random source from `rng`.
    ///
    /// The certainty for column `c`, row `r` is `certainties[c * rows + r]`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::EmptyGrid`] if either dimension is zero
    /// - [`WorldError::CertaintyCountMismatch`] if `certainties.len() != columns * rows`
    /// - [`WorldError::Agent`] if the template is invalid
    /// - [`WorldError::ZeroSpaceHorizon`] if `space_horizon` is zero
    pub fn from_certainties(
        columns: usize,
        rows: usize,
        certainties: &[f64],
        template: &PlayerConfig,
        space_horizon: usize,
        rng: &mut impl RngCore,
    ) -> Result<Self, WorldError> {
        if columns == 0 || rows == 0 {
            return Err(WorldError::EmptyGrid);
        }
        let expected = columns.saturating_mul(rows);
        if certainties.len() != expected {
            return Err(WorldError::CertaintyCountMismatch {
                expected,
                found: certainties.len(),
            });
        }

        let grid_rng = SmallRng::from_rng(rng);
        let mut cells = Vec::with_capacity(columns);
        for column in certainties.chunks(rows) {
            let mut players = Vec::with_capacity(rows);
            for &certainty in column {
                let config = template.with_certainty(certainty);
                players.push(Player::new(&config, SmallRng::from_rng(rng))?);
            }
            cells.push(players);
        }

        Self::with_rng(cells, space_horizon, grid_rng)
    }

    /// Build a grid of identical players.
    ///
    /// # Errors
    ///
    /// Same as [`WorldGrid::from_certainties`].
    pub fn uniform(
        columns: usize,
        rows: usize,
        template: &PlayerConfig,
        space_horizon: usize,
        rng: &mut impl RngCore,
    ) -> Result<Self, WorldError> {
        let certainties = vec![template.certainty; columns.saturating_mul(rows)];
        Self::from_certainties(columns, rows, &certainties, template, space_horizon, rng)
    }

    // -----------------------------------------------------------------------
    // Shape
    // -----------------------------------------------------------------------

    /// Index math for this grid.
    pub const fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Number of columns (N).
    pub const fn width(&self) -> usize {
        self.torus.width()
    }

    /// Number of rows (M).
    pub const fn height(&self) -> usize {
        self.torus.height()
    }

    /// Neighborhood radius. Stored for configuration round-trips; games are
    /// always played with the four adjacent cells.
    pub const fn space_horizon(&self) -> usize {
        self.space_horizon
    }

    /// Number of players, always `width * height`.
    pub fn population(&self) -> usize {
        self.players.len()
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// The player at `pos`, or `None` if `pos` is off the grid.
    pub fn player(&self, pos: CellPos) -> Option<&Player> {
        if pos.column >= self.width() || pos.row >= self.height() {
            return None;
        }
        self.players.get(self.torus.index(pos))
    }

    /// Mutable access to the player at `pos`.
    pub fn player_mut(&mut self, pos: CellPos) -> Option<&mut Player> {
        if pos.column >= self.width() || pos.row >= self.height() {
            return None;
        }
        let index = self.torus.index(pos);
        self.players.get_mut(index)
    }

    /// The neighbor of `pos` in `direction`.
    pub fn neighbor(&self, pos: CellPos, direction: Direction) -> Option<&Player> {
        self.player(self.torus.neighbor(pos, direction))
    }

    /// All players in flat row-major order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Mutable access to all players in flat row-major order.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Put `player` into the cell at `pos`, returning the player it
    /// displaced. Returns `player` back if `pos` is off the grid.
    pub fn replace(&mut self, pos: CellPos, player: Player) -> Result<Player, Player> {
        match self.player_mut(pos) {
            Some(slot) => Ok(std::mem::replace(slot, player)),
            None => Err(player),
        }
    }

    /// Certainty of every player in flat row-major order.
    pub fn certainties(&self) -> Vec<f64> {
        self.players.iter().map(Player::certainty).collect()
    }

    // -----------------------------------------------------------------------
    // Round state
    // -----------------------------------------------------------------------

    /// Edge records from the most recent round.
    pub const fn edges(&self) -> &EdgeOutcomes {
        &self.edges
    }

    /// Grid-level random source used for replacement-parent selection.
    pub const fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Split into independent mutable borrows for a round.
    pub fn parts_mut(&mut self) -> GridPartsMut<'_> {
        GridPartsMut {
            players: &mut self.players,
            edges: &mut self.edges,
            rng: &mut self.rng,
        }
    }
}
