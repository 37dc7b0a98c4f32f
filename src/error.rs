//! Core errors raised while building or propagating a pyramid.

use crate::graph::SlotId;
use thiserror::Error;

/// Result type for pyramid construction and propagation.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested shape or seed placement does not exist in the pyramid.
    /// Also returned when a slot outside the pyramid is handed to the
    /// triple-solver.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A seed value cannot be represented as a slot value.
    #[error("invalid seed for {slot}: {value}")]
    InvalidSeed { slot: SlotId, value: f64 },

    /// A triple produced a value outside the real, finite domain.
    #[error("numeric domain error at {slot}: {reason}")]
    NumericDomain { slot: SlotId, reason: String },
}
