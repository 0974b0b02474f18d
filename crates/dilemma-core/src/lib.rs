//! Round engine, configuration, and trial orchestration for the
//! prisoner's dilemma simulation.
//!
//! This crate owns the three-phase round that drives the simulation:
//! Decision, Damage, and Replacement.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `dilemma-config.yaml` into
//!   strongly-typed structs.
//! - [`replacement`] -- The replacement phase: dead players are swapped for
//!   a neighbor's offspring.
//! - [`round`] -- [`SimulationState`] and the three-phase round.
//! - [`runner`] -- Fixed-length run loop with a per-round callback.
//! - [`trials`] -- Certainty scenarios, repeated trials, and aggregation.
//!
//! [`SimulationState`]: round::SimulationState

pub mod config;
pub mod replacement;
pub mod round;
pub mod runner;
pub mod trials;
