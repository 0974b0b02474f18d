//! Fixed-capacity rolling memory of past round outcomes.
//!
//! A player remembers the last `span` samples in chronological order (index
//! 0 is the oldest). The decision policy reads the memory through a
//! triangular weighted average: slot `i` carries weight `i + 1`, normalized
//! by `span * (span + 1) / 2`, so the newest sample dominates while the whole
//! horizon still contributes.

use std::collections::VecDeque;

use crate::error::AgentError;

/// Rolling FIFO buffer with a fixed number of slots.
///
/// The buffer is never empty and never grows: [`push`](Self::push) evicts
/// the oldest sample before appending the newest one.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryBuffer {
    slots: VecDeque<f64>,
}

impl MemoryBuffer {
    /// Create a buffer of `span` slots, all set to `baseline`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ZeroMemorySpan`] if `span` is zero.
    pub fn new(span: usize, baseline: f64) -> Result<Self, AgentError> {
        if span == 0 {
            return Err(AgentError::ZeroMemorySpan);
        }
        Ok(Self {
            slots: std::iter::repeat_n(baseline, span).collect(),
        })
    }

    /// Create a buffer of `span` zero-filled slots.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ZeroMemorySpan`] if `span` is zero.
    pub fn zeroed(span: usize) -> Result<Self, AgentError> {
        Self::new(span, 0.0)
    }

    /// Create a buffer with the same span as this one, all set to `baseline`.
    pub fn fresh(&self, baseline: f64) -> Self {
        Self {
            slots: std::iter::repeat_n(baseline, self.span()).collect(),
        }
    }

    /// Number of slots.
    pub fn span(&self) -> usize {
        self.slots.len()
    }

    /// Evict the oldest sample and append `value` as the newest.
    pub fn push(&mut self, value: f64) {
        self.slots.pop_front();
        self.slots.push_back(value);
    }

    /// Overwrite every slot with `value`, keeping the span.
    pub fn reset(&mut self, value: f64) {
        for slot in &mut self.slots {
            *slot = value;
        }
    }

    /// Reallocate to `span` zero-filled slots, discarding all history.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ZeroMemorySpan`] if `span` is zero. The buffer
    /// is left untouched in that case.
    pub fn resize(&mut self, span: usize) -> Result<(), AgentError> {
        *self = Self::zeroed(span)?;
        Ok(())
    }

    /// Iterate over the samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.slots.iter().copied()
    }

    /// Copy the samples out, oldest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Triangular weighted average of the samples.
    pub fn weighted_average(&self) -> f64 {
        let mut weight = 0.0_f64;
        let mut total = 0.0_f64;
        for sample in self.iter() {
            weight += 1.0;
            total += weight * sample;
        }
        // weight == span here
        let normalizer = weight * (weight + 1.0) / 2.0;
        total / normalizer
    }
}
