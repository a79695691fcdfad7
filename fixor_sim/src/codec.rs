//! Conversion between a live [`Graph`] and a [`GraphDescription`].

use std::collections::HashMap;

use fixor_analysis::Adjacency;
use fixor_common::{Config, GraphDescription, NodeRole};
use tracing::{info, warn};

use crate::{Graph, MAX_GATE_PINS, NodeId, NodeKind, PinRef, Result, SimError};

impl Graph {
    /// Builds a fresh graph from `desc`.
    ///
    /// # Errors
    /// See [`Graph::load`].
    pub fn from_description(desc: &GraphDescription, config: Config) -> Result<Self> {
        let mut graph = Self::new(config);
        graph.load(desc)?;
        Ok(graph)
    }

    /// Replaces the contents of this graph with `desc`.
    ///
    /// Node `i` of the description becomes the `i`-th entry of the returned handles. Gates get
    /// enough input pins for every driver (never fewer than their default), and drivers land on
    /// pins `0, 1, ...` in ascending index order. An output sink driven from several nodes keeps
    /// only the lowest-indexed driver.
    ///
    /// The graph is left untouched if the description is rejected.
    ///
    /// # Errors
    /// Fails for malformed descriptions and for gate kinds without a transfer function.
    pub fn load(&mut self, desc: &GraphDescription) -> Result<Vec<NodeId>> {
        desc.validate()?;
        if let Some(kind) = desc.gate_kinds().iter().find(|k| !k.is_evaluable()) {
            return Err(SimError::UnsupportedGate(*kind));
        }

        let adjacency = Adjacency::build(desc);
        for (g, &kind) in desc.gate_kinds().iter().enumerate() {
            let drivers = adjacency.fanin(desc.gate_offset() + g).len();
            if drivers > MAX_GATE_PINS {
                return Err(SimError::InvalidPinCount {
                    kind,
                    inputs: drivers,
                    outputs: 1,
                });
            }
        }

        self.reset();
        let mut ids = Vec::with_capacity(desc.node_count());
        for index in 0..desc.node_count() {
            let id = match desc.role(index) {
                Some(NodeRole::Input(_)) => self.create_input_source(),
                Some(NodeRole::Gate(g)) => {
                    let kind = desc.gate_kinds()[g];
                    let pins = kind.default_input_pins().max(adjacency.fanin(index).len());
                    self.create_gate_with_pins(kind, pins, 1)?
                }
                Some(NodeRole::Output(_)) | None => self.create_output_sink(),
            };
            ids.push(id);
        }

        for (to, &target) in ids.iter().enumerate().skip(desc.gate_offset()) {
            let drivers = adjacency.fanin(to);
            let drivers = match desc.role(to) {
                Some(NodeRole::Output(o)) if drivers.len() > 1 => {
                    warn!(
                        "Output {} has {} drivers, keeping node {}",
                        o,
                        drivers.len(),
                        drivers[0]
                    );
                    &drivers[..1]
                }
                _ => drivers,
            };
            for (pin, &from) in drivers.iter().enumerate() {
                self.connect(PinRef::output(ids[from], 0), PinRef::input(target, pin))?;
            }
        }

        info!(
            "Loaded graph: {} inputs, {} gates, {} outputs, {} wires",
            desc.input_count(),
            desc.gate_count(),
            desc.output_count(),
            self.wire_count()
        );
        Ok(ids)
    }

    /// Captures the current wiring as a description.
    ///
    /// Nodes are numbered sources first, then gates, then sinks, each in creation order. Only
    /// output pin wires are recorded, so several wires between the same pair of nodes collapse
    /// into one edge.
    #[must_use]
    pub fn snapshot(&self) -> GraphDescription {
        let order: Vec<NodeId> = self
            .sources()
            .chain(self.gates())
            .chain(self.sinks())
            .collect();
        let index: HashMap<NodeId, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let kinds = self
            .gates()
            .filter_map(|id| match self.node_kind(id) {
                Some(NodeKind::Gate(kind)) => Some(kind),
                _ => None,
            })
            .collect();

        let mut desc = GraphDescription::new(self.sources().len(), kinds, self.sinks().len());
        for (from, &id) in order.iter().enumerate() {
            let Some(node) = self.node(id) else { continue };
            let targets = node
                .output_pins()
                .iter()
                .flat_map(|pin| pin.wires())
                .filter_map(|&wire| index.get(&self.wire(wire)?.to().node));
            for &to in targets {
                if let Err(e) = desc.add_edge(from, to) {
                    warn!("Dropping wire {} -> {} from snapshot: {}", from, to, e);
                }
            }
        }
        desc
    }
}
