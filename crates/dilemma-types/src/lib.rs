//! Shared type definitions for the spatial prisoner's dilemma simulation.
//!
//! This crate is the single source of truth for the small value types that
//! cross crate boundaries: decisions, grid directions and positions, and the
//! per-round and summary statistics handed to trial harnesses.
//!
//! # Modules
//!
//! - [`enums`] -- Enumeration types (decisions, directions, replacement
//!   policy, skew classification)
//! - [`structs`] -- Value structs (cell positions, round and summary stats)

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Decision, Direction, ReplacementPolicy, Skew};
pub use structs::{CellPos, RoundSummary, SummaryStats};
