//! The toroidal world grid for the prisoner's dilemma simulation.
//!
//! This crate models the physical arrangement of players: an M x N torus
//! where every cell holds exactly one player and every cell has four
//! neighbors, plus the per-cell record of the two games (vertical and
//! horizontal) each cell owns in a round.
//!
//! # Modules
//!
//! - [`edges`] -- Per-round record of vertical and horizontal edge outcomes.
//! - [`error`] -- Construction-time error types ([`WorldError`]).
//! - [`grid`] -- [`WorldGrid`]: construction, accessors, in-place replacement.
//! - [`summary`] -- Read-only statistics over player certainty.
//! - [`torus`] -- Wraparound index math shared by every grid traversal.

pub mod edges;
pub mod error;
pub mod grid;
pub mod summary;
pub mod torus;

// Re-export primary types at crate root.
pub use edges::EdgeOutcomes;
pub use error::WorldError;
pub use grid::WorldGrid;
pub use summary::summarize;
pub use torus::Torus;
