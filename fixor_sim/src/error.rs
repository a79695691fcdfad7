//! Error types for the live graph and sessions.

use fixor_analysis::AnalysisError;
use fixor_common::{DescriptionError, GateKind};
use thiserror::Error;

use crate::{NodeId, PinRef, Spawnable, WireId};

/// Errors raised by the live graph and sessions built on it.
#[derive(Debug, Error)]
pub enum SimError {
    /// A wire must run from an output pin to an input pin.
    #[error("Cannot wire {from} to {to}: wires run from an output pin to an input pin")]
    InvalidConnection {
        /// The requested driving end.
        from: PinRef,
        /// The requested driven end.
        to: PinRef,
    },

    /// The node handle refers to a destroyed node.
    #[error("Node {0} no longer exists")]
    StaleNode(NodeId),

    /// The wire handle refers to a removed wire.
    #[error("Wire {0} no longer exists")]
    StaleWire(WireId),

    /// The node exists but has no pin at that direction and index.
    #[error("Node has no pin {0}")]
    NoSuchPin(PinRef),

    /// Only input sources can be toggled or set.
    #[error("Node {0} is not an input source")]
    NotAnInputSource(NodeId),

    /// The live engine cannot evaluate this gate kind.
    #[error("Gate kind {0} has no transfer function")]
    UnsupportedGate(GateKind),

    /// Gates take `1..=32` input pins and exactly one output pin.
    #[error("Gate {kind} cannot have {inputs} input pins and {outputs} output pins")]
    InvalidPinCount {
        /// Kind of the rejected gate.
        kind: GateKind,
        /// Requested input pins.
        inputs: usize,
        /// Requested output pins.
        outputs: usize,
    },

    /// The session's level does not offer this spawnable.
    #[error("Spawning {0} is not allowed in this level")]
    SpawnNotAllowed(Spawnable),

    /// A description or level was malformed.
    #[error(transparent)]
    Description(#[from] DescriptionError),

    /// The analyzer rejected a circuit.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result alias for live graph operations.
pub type Result<T> = std::result::Result<T, SimError>;
