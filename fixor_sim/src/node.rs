//! Node payloads stored in the graph arena.

use std::fmt;
use std::iter;

use fixor_common::{GateKind, ops};

use crate::{Pin, PinDirection, WireId};

/// Coarse classification of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A host-toggled source with one output pin.
    InputSource,
    /// A logic gate of the given kind.
    Gate(GateKind),
    /// A sink latching its single input pin.
    OutputSink,
}

impl NodeKind {
    /// Returns true for [`NodeKind::InputSource`].
    #[must_use]
    pub const fn is_input_source(&self) -> bool {
        matches!(self, Self::InputSource)
    }

    /// Returns true for any [`NodeKind::Gate`].
    #[must_use]
    pub const fn is_gate(&self) -> bool {
        matches!(self, Self::Gate(_))
    }

    /// Returns true for [`NodeKind::OutputSink`].
    #[must_use]
    pub const fn is_output_sink(&self) -> bool {
        matches!(self, Self::OutputSink)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputSource => write!(f, "input source"),
            Self::Gate(kind) => write!(f, "{kind} gate"),
            Self::OutputSink => write!(f, "output sink"),
        }
    }
}

/// A logic gate with any number of input pins and a single output pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate {
    kind: GateKind,
    inputs: Vec<Pin>,
    output: Pin,
    /// Packed inputs seen by the last evaluation, `None` before the first one.
    in_pins: Option<u32>,
    out_pins: u32,
}

impl Gate {
    pub(crate) fn new(kind: GateKind, input_pins: usize) -> Self {
        Self {
            kind,
            inputs: (0..input_pins)
                .map(|i| Pin::new(PinDirection::Input, i))
                .collect(),
            output: Pin::new(PinDirection::Output, 0),
            in_pins: None,
            out_pins: 0,
        }
    }

    /// The gate's transfer function.
    pub const fn kind(&self) -> GateKind {
        self.kind
    }

    /// Input pins in index order.
    pub fn inputs(&self) -> &[Pin] {
        &self.inputs
    }

    /// The single output pin.
    pub const fn output(&self) -> &Pin {
        &self.output
    }

    /// Input word seen by the last evaluation, 0 before the first one.
    pub fn in_pins(&self) -> u32 {
        self.in_pins.unwrap_or(0)
    }

    /// Output word from the last evaluation. Only bit 0 is ever set.
    pub const fn out_pins(&self) -> u32 {
        self.out_pins
    }

    /// Value of the output pin.
    pub const fn state(&self) -> bool {
        self.out_pins & 1 == 1
    }

    /// Input word the gate would see right now.
    ///
    /// Connected pins are packed in pin order, so bit 0 is the lowest connected pin and
    /// unconnected pins are skipped. When exactly one pin of a multi-pin gate is wired, its value
    /// fills every bit, so a NAND fed from a single wire behaves as NOT. This is the same reading
    /// the truth-table analyzer applies to a snapshot of the graph.
    pub fn effective_inputs(&self) -> u32 {
        let connected: Vec<bool> = self
            .inputs
            .iter()
            .filter(|p| p.is_connected())
            .map(Pin::state)
            .collect();
        match connected.as_slice() {
            &[only] if self.inputs.len() > 1 => {
                ops::pack(iter::repeat_n(only, self.inputs.len()))
            }
            _ => ops::pack(connected),
        }
    }

    /// Recomputes the output. Returns true if it changed.
    fn pulse(&mut self) -> bool {
        let word = self.effective_inputs();
        let first = self.in_pins.is_none();
        if self.in_pins == Some(word) {
            return false;
        }
        self.in_pins = Some(word);

        let Some(value) = self.kind.evaluate(word) else {
            return false;
        };
        let changed = self.output.state() != value;
        self.output.set_state(value);
        self.out_pins = u32::from(value);
        changed || first
    }
}

/// A node whose single output is set by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSource {
    state: bool,
    output: Pin,
}

impl InputSource {
    pub(crate) const fn new() -> Self {
        Self {
            state: false,
            output: Pin::new(PinDirection::Output, 0),
        }
    }

    /// The value set by the host.
    pub const fn state(&self) -> bool {
        self.state
    }

    pub(crate) const fn toggle(&mut self) -> bool {
        self.state = !self.state;
        self.state
    }

    /// The single output pin.
    pub const fn output(&self) -> &Pin {
        &self.output
    }
}

/// A node that latches the value on its single input pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSink {
    state: bool,
    input: Pin,
}

impl OutputSink {
    pub(crate) const fn new() -> Self {
        Self {
            state: false,
            input: Pin::new(PinDirection::Input, 0),
        }
    }

    /// The value latched on the last evaluation.
    pub const fn state(&self) -> bool {
        self.state
    }

    /// The single input pin.
    pub const fn input(&self) -> &Pin {
        &self.input
    }
}

/// Payload of a graph node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// See [`InputSource`].
    InputSource(InputSource),
    /// See [`Gate`].
    Gate(Gate),
    /// See [`OutputSink`].
    OutputSink(OutputSink),
}

impl Node {
    /// Classification of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::InputSource(_) => NodeKind::InputSource,
            Self::Gate(gate) => NodeKind::Gate(gate.kind),
            Self::OutputSink(_) => NodeKind::OutputSink,
        }
    }

    /// Observable value: the source or sink latch, or output pin 0 of a gate.
    #[must_use]
    pub const fn state(&self) -> bool {
        match self {
            Self::InputSource(source) => source.state,
            Self::Gate(gate) => gate.state(),
            Self::OutputSink(sink) => sink.state,
        }
    }

    /// Input pins in index order; empty for sources.
    #[must_use]
    pub fn input_pins(&self) -> &[Pin] {
        match self {
            Self::InputSource(_) => &[],
            Self::Gate(gate) => &gate.inputs,
            Self::OutputSink(sink) => std::slice::from_ref(&sink.input),
        }
    }

    /// Output pins in index order; empty for sinks.
    #[must_use]
    pub fn output_pins(&self) -> &[Pin] {
        match self {
            Self::InputSource(source) => std::slice::from_ref(&source.output),
            Self::Gate(gate) => std::slice::from_ref(&gate.output),
            Self::OutputSink(_) => &[],
        }
    }

    fn pins_mut(&mut self, direction: PinDirection) -> &mut [Pin] {
        match (self, direction) {
            (Self::Gate(gate), PinDirection::Input) => gate.inputs.as_mut_slice(),
            (Self::Gate(gate), PinDirection::Output) => std::slice::from_mut(&mut gate.output),
            (Self::OutputSink(sink), PinDirection::Input) => std::slice::from_mut(&mut sink.input),
            (Self::InputSource(source), PinDirection::Output) => {
                std::slice::from_mut(&mut source.output)
            }
            _ => Default::default(),
        }
    }

    /// Looks up one pin, `None` if the index is out of range.
    #[must_use]
    pub fn pin(&self, direction: PinDirection, index: usize) -> Option<&Pin> {
        match direction {
            PinDirection::Input => self.input_pins().get(index),
            PinDirection::Output => self.output_pins().get(index),
        }
    }

    pub(crate) fn pin_mut(&mut self, direction: PinDirection, index: usize) -> Option<&mut Pin> {
        self.pins_mut(direction).get_mut(index)
    }

    /// Every wire attached to any pin of this node, without duplicates.
    pub(crate) fn wires(&self) -> Vec<WireId> {
        let mut wires: Vec<_> = self
            .input_pins()
            .iter()
            .chain(self.output_pins())
            .flat_map(|pin| pin.wires().iter().copied())
            .collect();
        wires.sort_unstable();
        wires.dedup();
        wires
    }

    /// Runs one evaluation step. Returns true if downstream nodes must be scheduled.
    ///
    /// Sources always report a change so their value is re-pushed along every wire.
    pub(crate) fn pulse(&mut self) -> bool {
        match self {
            Self::InputSource(source) => {
                source.output.set_state(source.state);
                true
            }
            Self::Gate(gate) => gate.pulse(),
            Self::OutputSink(sink) => {
                let value = sink.input.state();
                let changed = sink.state != value;
                sink.state = value;
                changed
            }
        }
    }
}
