//! Player state, decision policy, memory, and reproduction for the
//! prisoner's dilemma simulation.
//!
//! This crate contains the agent-local logic: everything that operates on a
//! single player (or a single pair of players) without knowing about the
//! grid. The world crate arranges players on a torus and the core crate
//! drives rounds over them.
//!
//! # Modules
//!
//! - [`config`] -- Construction and reproduction parameters ([`PlayerConfig`], [`BirthConfig`])
//! - [`error`] -- Error types for player construction and reconfiguration ([`AgentError`])
//! - [`memory`] -- Fixed-capacity rolling memory with triangular weighting ([`MemoryBuffer`])
//! - [`payoff`] -- The pairwise payoff rule ([`payoff()`], [`DecisionPair`])
//! - [`player`] -- The player itself ([`Player`])
//! - [`policy`] -- The logistic decision function ([`DecisionPolicy`])
//! - [`reproduction`] -- Offspring creation with certainty mutation

pub mod config;
pub mod error;
pub mod memory;
pub mod payoff;
pub mod player;
pub mod policy;
pub mod reproduction;

// Re-export primary types at crate root for convenience.
pub use config::{BirthConfig, PlayerConfig};
pub use error::AgentError;
pub use memory::MemoryBuffer;
pub use payoff::{DecisionPair, payoff};
pub use player::Player;
pub use policy::DecisionPolicy;
pub use reproduction::mutate_certainty;
