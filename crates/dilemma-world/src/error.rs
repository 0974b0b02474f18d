//! Error types for the `dilemma-world` crate.
//!
//! Every variant is a construction-time configuration problem. Once a grid
//! exists, no grid operation fails.

use dilemma_agents::AgentError;

/// Errors that can occur while building a world grid.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid has no columns or no rows.
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    /// Columns of the supplied player array differ in length.
    #[error("column {column} has {found} rows, expected {expected}")]
    RaggedGrid {
        /// Index of the offending column.
        column: usize,
        /// Row count of the first column.
        expected: usize,
        /// Row count of the offending column.
        found: usize,
    },

    /// The certainty array does not have one entry per cell.
    #[error("certainty array has {found} entries, grid has {expected} cells")]
    CertaintyCountMismatch {
        /// Number of cells (rows * columns).
        expected: usize,
        /// Number of certainties supplied.
        found: usize,
    },

    /// The neighborhood radius must be at least one cell.
    #[error("space horizon must be at least 1")]
    ZeroSpaceHorizon,

    /// A player could not be constructed.
    #[error("player error: {source}")]
    Agent {
        /// The underlying player error.
        #[from]
        source: AgentError,
    },
}
