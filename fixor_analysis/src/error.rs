use fixor_common::{DescriptionError, GateKind};
use thiserror::Error;

/// Errors that can occur while analyzing a description.
///
/// All of them mean "this circuit cannot be verified"; none leave state behind.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The description contains a cycle, so no evaluation order exists.
    #[error("Graph contains a cycle: topological sort reached {visited} of {total} nodes")]
    CyclicGraph {
        /// Nodes consumed by the sort before it stalled.
        visited: usize,
        /// Total node count.
        total: usize,
    },

    /// A gate without a transfer function reached evaluation.
    #[error("Gate kind {kind} at node {node} cannot be evaluated")]
    UnsupportedGate {
        /// The offending kind.
        kind: GateKind,
        /// Description index of the gate.
        node: usize,
    },

    /// The input count exceeds what may be enumerated.
    #[error("Truth table over {inputs} inputs exceeds the limit of {limit}")]
    TooManyInputs {
        /// Declared input count.
        inputs: usize,
        /// Effective ceiling.
        limit: usize,
    },

    /// The description itself is malformed.
    #[error(transparent)]
    Description(#[from] DescriptionError),
}

/// Result alias for analysis.
pub type Result<T> = std::result::Result<T, AnalysisError>;
