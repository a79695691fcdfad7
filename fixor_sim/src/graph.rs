//! The live graph: node and wire storage plus the structural mutation API.
//!
//! Every structural change reseeds the propagation queue with all input sources and the node it
//! touched, but nothing is evaluated until the next [`Graph::tick`]. The one exception is the wire
//! pulse: a new wire copies its driver's current value onto the input pin it lands on, and a
//! removed wire clears it, so pin states are always consistent with the wiring.

use fixor_common::{Config, GateKind};
use indexmap::IndexSet;
use tracing::debug;

use crate::engine::Propagator;
use crate::node::{Gate, InputSource, OutputSink};
use crate::{
    Arena, Node, NodeId, NodeKind, Pin, PinDirection, PinRef, Result, SimError, Wire, WireId,
};

/// Most input pins a gate may carry; packed pin words are `u32`.
pub const MAX_GATE_PINS: usize = u32::BITS as usize;

/// A mutable logic circuit with event-driven propagation.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    config: Config,
    nodes: Arena<NodeId, Node>,
    wires: Arena<WireId, Wire>,
    pub(crate) sources: IndexSet<NodeId>,
    pub(crate) gates: IndexSet<NodeId>,
    pub(crate) sinks: IndexSet<NodeId>,
    pub(crate) propagator: Propagator,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Engine settings this graph was created with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Removes every node and wire and drops any pending propagation work.
    pub fn reset(&mut self) {
        debug!(
            "Resetting graph with {} nodes and {} wires",
            self.nodes.len(),
            self.wires.len()
        );
        self.nodes.clear();
        self.wires.clear();
        self.sources.clear();
        self.gates.clear();
        self.sinks.clear();
        self.propagator.clear();
    }

    /// Creates a gate with its default pin layout.
    ///
    /// # Errors
    /// See [`Graph::create_gate_with_pins`].
    pub fn create_gate(&mut self, kind: GateKind) -> Result<NodeId> {
        self.create_gate_with_pins(kind, kind.default_input_pins(), 1)
    }

    /// Creates a gate with an explicit pin layout and evaluates it once.
    ///
    /// Gates always have exactly one output pin; the count is taken so callers can state it.
    ///
    /// # Errors
    /// [`SimError::UnsupportedGate`] for kinds without a transfer function, and
    /// [`SimError::InvalidPinCount`] unless `input_pins` lies in `1..=32` and `output_pins` is 1.
    pub fn create_gate_with_pins(
        &mut self,
        kind: GateKind,
        input_pins: usize,
        output_pins: usize,
    ) -> Result<NodeId> {
        if !kind.is_evaluable() {
            return Err(SimError::UnsupportedGate(kind));
        }
        if !(1..=MAX_GATE_PINS).contains(&input_pins) || output_pins != 1 {
            return Err(SimError::InvalidPinCount {
                kind,
                inputs: input_pins,
                outputs: output_pins,
            });
        }

        let mut node = Node::Gate(Gate::new(kind, input_pins));
        node.pulse();
        let id = self.nodes.insert(node);
        self.gates.insert(id);
        debug!("Created {} gate {} with {} inputs", kind, id, input_pins);
        self.reseed();
        Ok(id)
    }

    /// Creates an input source, initially low.
    pub fn create_input_source(&mut self) -> NodeId {
        let id = self.nodes.insert(Node::InputSource(InputSource::new()));
        self.sources.insert(id);
        debug!("Created input source {}", id);
        self.reseed();
        id
    }

    /// Creates an output sink, initially low.
    pub fn create_output_sink(&mut self) -> NodeId {
        let id = self.nodes.insert(Node::OutputSink(OutputSink::new()));
        self.sinks.insert(id);
        debug!("Created output sink {}", id);
        self.reseed();
        id
    }

    /// Wires an output pin to an input pin, displacing whatever already drove that input.
    ///
    /// The driver's current value is copied onto the input pin immediately; the receiving node is
    /// scheduled but not evaluated until the next tick.
    ///
    /// # Errors
    /// [`SimError::StaleNode`] if either node is gone, [`SimError::InvalidConnection`] if the
    /// directions are wrong, and [`SimError::NoSuchPin`] if a pin index is out of range.
    pub fn connect(&mut self, from: PinRef, to: PinRef) -> Result<WireId> {
        for end in [from, to] {
            if !self.nodes.contains(end.node) {
                return Err(SimError::StaleNode(end.node));
            }
        }
        if from.direction != PinDirection::Output || to.direction != PinDirection::Input {
            return Err(SimError::InvalidConnection { from, to });
        }
        let value = self.pin(from)?.state();
        let displaced = self.pin(to)?.wires().to_vec();
        for wire in displaced {
            debug!("Displacing wire {} from {}", wire, to);
            self.detach_wire(wire);
        }

        let id = self.wires.insert(Wire::new(from, to));
        self.pin_mut(from)?.attach(id);
        let pin = self.pin_mut(to)?;
        pin.attach(id);
        pin.set_state(value);
        debug!("Connected {} -> {} as {}", from, to, id);

        self.reseed();
        self.propagator.enqueue(to.node);
        Ok(id)
    }

    /// Removes a wire and pulls the input pin it drove low.
    ///
    /// # Errors
    /// [`SimError::StaleWire`] if the wire no longer exists.
    pub fn disconnect(&mut self, wire: WireId) -> Result<()> {
        let removed = self.detach_wire(wire).ok_or(SimError::StaleWire(wire))?;
        debug!("Disconnected {} -> {}", removed.from(), removed.to());
        self.reseed();
        Ok(())
    }

    /// Removes a node together with every wire touching it.
    ///
    /// # Errors
    /// [`SimError::StaleNode`] if the node no longer exists.
    pub fn destroy_node(&mut self, node: NodeId) -> Result<()> {
        let wires = self.node(node).ok_or(SimError::StaleNode(node))?.wires();
        for wire in wires {
            self.detach_wire(wire);
        }
        self.sources.shift_remove(&node);
        self.gates.shift_remove(&node);
        self.sinks.shift_remove(&node);
        if let Some(removed) = self.nodes.remove(node) {
            debug!("Destroyed {} {}", removed.kind(), node);
        }
        self.reseed();
        Ok(())
    }

    /// Flips an input source and schedules it. Returns the new value.
    ///
    /// # Errors
    /// [`SimError::StaleNode`] or [`SimError::NotAnInputSource`].
    pub fn toggle_input(&mut self, source: NodeId) -> Result<bool> {
        let node = self
            .nodes
            .get_mut(source)
            .ok_or(SimError::StaleNode(source))?;
        let Node::InputSource(input) = node else {
            return Err(SimError::NotAnInputSource(source));
        };
        let value = input.toggle();
        debug!("Toggled {} to {}", source, value);
        self.propagator.enqueue(source);
        Ok(value)
    }

    /// Drives an input source to `value`, toggling it only if it differs.
    ///
    /// # Errors
    /// See [`Graph::toggle_input`].
    pub fn set_input(&mut self, source: NodeId, value: bool) -> Result<()> {
        let current = match self.node(source) {
            None => return Err(SimError::StaleNode(source)),
            Some(Node::InputSource(input)) => input.state(),
            Some(_) => return Err(SimError::NotAnInputSource(source)),
        };
        if current != value {
            self.toggle_input(source)?;
        }
        Ok(())
    }

    /// Removes a wire from storage and from both pins. Returns `None` for stale handles.
    fn detach_wire(&mut self, id: WireId) -> Option<Wire> {
        let wire = self.wires.remove(id)?;
        let (from, to) = (wire.from(), wire.to());
        if let Ok(pin) = self.pin_mut(from) {
            pin.detach(id);
        }
        if let Ok(pin) = self.pin_mut(to) {
            pin.detach(id);
            pin.set_state(false);
            self.propagator.enqueue(to.node);
        }
        Some(wire)
    }

    fn pin_mut(&mut self, pin: PinRef) -> Result<&mut Pin> {
        self.nodes
            .get_mut(pin.node)
            .ok_or(SimError::StaleNode(pin.node))?
            .pin_mut(pin.direction, pin.index)
            .ok_or(SimError::NoSuchPin(pin))
    }

    /// Resolves a pin reference.
    ///
    /// # Errors
    /// [`SimError::StaleNode`] or [`SimError::NoSuchPin`].
    pub fn pin(&self, pin: PinRef) -> Result<&Pin> {
        self.node(pin.node)
            .ok_or(SimError::StaleNode(pin.node))?
            .pin(pin.direction, pin.index)
            .ok_or(SimError::NoSuchPin(pin))
    }

    /// Resolves a node handle, `None` once the node is destroyed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Resolves a wire handle, `None` once the wire is removed.
    #[must_use]
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Observable value of a node; see [`Node::state`].
    ///
    /// # Errors
    /// [`SimError::StaleNode`] if the node no longer exists.
    pub fn node_state(&self, id: NodeId) -> Result<bool> {
        self.node(id).map(Node::state).ok_or(SimError::StaleNode(id))
    }

    /// Kind of a live node.
    #[must_use]
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(Node::kind)
    }

    /// Input sources in creation order.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.sources.iter().copied()
    }

    /// Gates in creation order.
    pub fn gates(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.gates.iter().copied()
    }

    /// Output sinks in creation order.
    pub fn sinks(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.sinks.iter().copied()
    }

    /// Every live wire.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> + '_ {
        self.wires.iter()
    }

    /// Number of live nodes of every kind.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live wires.
    #[must_use]
    pub const fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// `|gates| + |wires| + |sources| + |sinks|`, the basis of the default phase budget.
    #[must_use]
    pub const fn entity_count(&self) -> usize {
        self.nodes.len() + self.wires.len()
    }

    /// Values of every output sink in creation order.
    #[must_use]
    pub fn sink_states(&self) -> Vec<bool> {
        self.sinks
            .iter()
            .filter_map(|&id| self.node(id))
            .map(Node::state)
            .collect()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }
}
