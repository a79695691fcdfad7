//! Pins and the references that address them.

use std::fmt;

use crate::{NodeId, WireId};

/// Which side of a node a pin sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinDirection {
    /// Receives a value from at most one wire.
    Input,
    /// Drives any number of wires.
    Output,
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "in"),
            Self::Output => write!(f, "out"),
        }
    }
}

/// Addresses one pin of one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PinRef {
    /// Owning node.
    pub node: NodeId,
    /// Input or output side.
    pub direction: PinDirection,
    /// Position on that side, starting at 0.
    pub index: usize,
}

impl PinRef {
    /// The `index`-th input pin of `node`.
    #[must_use]
    pub const fn input(node: NodeId, index: usize) -> Self {
        Self {
            node,
            direction: PinDirection::Input,
            index,
        }
    }

    /// The `index`-th output pin of `node`.
    #[must_use]
    pub const fn output(node: NodeId, index: usize) -> Self {
        Self {
            node,
            direction: PinDirection::Output,
            index,
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}", self.node, self.direction, self.index)
    }
}

/// A single-bit terminal on a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pin {
    direction: PinDirection,
    index: usize,
    state: bool,
    wires: Vec<WireId>,
}

impl Pin {
    pub(crate) const fn new(direction: PinDirection, index: usize) -> Self {
        Self {
            direction,
            index,
            state: false,
            wires: Vec::new(),
        }
    }

    /// Side of the node this pin sits on.
    pub const fn direction(&self) -> PinDirection {
        self.direction
    }

    /// Position among the node's pins on the same side.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current value carried by the pin.
    pub const fn state(&self) -> bool {
        self.state
    }

    /// Wires attached to this pin. Input pins hold at most one.
    pub fn wires(&self) -> &[WireId] {
        &self.wires
    }

    /// Returns true if any wire is attached.
    pub fn is_connected(&self) -> bool {
        !self.wires.is_empty()
    }

    pub(crate) const fn set_state(&mut self, state: bool) {
        self.state = state;
    }

    pub(crate) fn attach(&mut self, wire: WireId) {
        self.wires.push(wire);
    }

    pub(crate) fn detach(&mut self, wire: WireId) {
        self.wires.retain(|&w| w != wire);
    }
}
