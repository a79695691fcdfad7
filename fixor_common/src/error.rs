//! Error types for graph descriptions and level files.

use thiserror::Error;

/// Errors produced while validating or loading a [`crate::GraphDescription`] or [`crate::Level`].
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// The adjacency matrix does not hold `N * N` entries for the declared node counts.
    #[error("Adjacency matrix has {actual} entries, expected {expected}")]
    DimensionMismatch {
        /// `N * N` for the declared counts.
        expected: usize,
        /// Length of the stored matrix.
        actual: usize,
    },

    /// The declared counts are too large for an `N * N` matrix to be addressed.
    #[error("Node counts {inputs} + {gates} + {outputs} are too large for an adjacency matrix")]
    TooManyNodes {
        /// Declared input count.
        inputs: usize,
        /// Declared gate count.
        gates: usize,
        /// Declared output count.
        outputs: usize,
    },

    /// The gate kind list does not hold one entry per gate.
    #[error("Gate kind list has {actual} entries, expected {expected}")]
    GateKindCountMismatch {
        /// The declared gate count.
        expected: usize,
        /// Length of the stored list.
        actual: usize,
    },

    /// An edge leaves an output node or enters an input node.
    #[error("Invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        /// Driving node index.
        from: usize,
        /// Driven node index.
        to: usize,
        /// Which partition rule the edge breaks.
        reason: &'static str,
    },

    /// The description or level file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The description or level file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for description handling.
pub type Result<T> = std::result::Result<T, DescriptionError>;
