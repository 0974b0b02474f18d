//! Error types for the dilemma-agents crate.
//!
//! Only construction and explicit reconfiguration can fail. Decisions,
//! damage, memory pushes and births never return errors.

/// Errors that can occur while building or reconfiguring a player.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A memory span of zero leaves the weighted average undefined.
    #[error("memory span must be at least 1")]
    ZeroMemorySpan,

    /// Players must start alive, otherwise their offspring would too.
    #[error("starting vitality must be positive, got {0}")]
    NonPositiveVitality(i32),

    /// A decision parameter was non-finite or out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Which parameter was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
