//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of a run, from configuration
//! loading to writing the report.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: dilemma_core::config::ConfigError,
    },

    /// A trial failed.
    #[error("trial error: {source}")]
    Trial {
        /// The underlying trial error.
        #[from]
        source: dilemma_core::trials::TrialError,
    },

    /// The report could not be serialized.
    #[error("report serialization failed: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The report could not be written.
    #[error("failed to write report to {path}: {source}")]
    Write {
        /// Destination path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
