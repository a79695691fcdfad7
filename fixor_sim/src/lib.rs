//! Live logic-circuit simulation.
//!
//! A [`Graph`] owns gates, input sources, output sinks and the wires between their pins, all
//! addressed through generation-checked handles. Structural edits and input toggles schedule work;
//! [`Graph::tick`] propagates it in bounded phases, so feedback loops are allowed and simply keep
//! oscillating across ticks. Graphs convert to and from
//! [`GraphDescription`](fixor_common::GraphDescription)s, and a [`Session`] wraps a graph with a
//! puzzle [`Level`](fixor_common::Level).

mod arena;
mod codec;
mod engine;
mod error;
mod graph;
mod node;
mod pin;
mod session;
mod wire;

pub use crate::arena::{Arena, ArenaKey, Key, NodeId, WireId};
pub use crate::engine::TickStats;
pub use crate::error::{Result, SimError};
pub use crate::graph::{Graph, MAX_GATE_PINS};
pub use crate::node::{Gate, InputSource, Node, NodeKind, OutputSink};
pub use crate::pin::{Pin, PinDirection, PinRef};
pub use crate::session::{Session, Spawnable};
pub use crate::wire::Wire;
