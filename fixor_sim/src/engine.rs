//! Event-driven propagation.
//!
//! Work is tracked in two deduplicated FIFO queues. A tick drains `current` one phase at a time;
//! nodes whose outputs changed schedule their successors into `next`, and the queues swap at the
//! end of every phase. Values travel along wires only at phase boundaries, so every evaluation in
//! a phase reads the state left by the previous one.
//!
//! A tick stops when no work is left or the phase budget runs out. Leftover work carries into the
//! next tick, which is how oscillating loops keep running without stalling the host.

use indexmap::IndexSet;
use tracing::{debug, trace};

use crate::{Graph, NodeId, PinDirection, PinRef};

#[derive(Clone, Debug, Default)]
pub(crate) struct Propagator {
    current: IndexSet<NodeId>,
    next: IndexSet<NodeId>,
}

impl Propagator {
    pub(crate) fn enqueue(&mut self, node: NodeId) {
        self.current.insert(node);
    }

    pub(crate) fn clear(&mut self) {
        self.current.clear();
        self.next.clear();
    }

    fn pending(&self) -> usize {
        self.current.len() + self.next.len()
    }
}

/// What a single [`Graph::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Phases run, at most the phase budget.
    pub phases: usize,
    /// Node evaluations performed, stale entries excluded.
    pub evaluations: usize,
    /// True if the tick ended with no pending work.
    pub settled: bool,
}

impl Graph {
    /// Schedules every input source for the next tick.
    pub fn reseed(&mut self) {
        for &source in &self.sources {
            self.propagator.current.insert(source);
        }
    }

    /// Returns true if no propagation work is pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.propagator.pending() == 0
    }

    /// Number of nodes waiting to be evaluated.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.propagator.pending()
    }

    /// Advances propagation by up to one phase budget.
    ///
    /// Never fails: handles that went stale while queued are skipped.
    pub fn tick(&mut self) -> TickStats {
        let budget = self.config().phase_budget.phases(self.entity_count());
        let mut stats = TickStats::default();

        while stats.phases < budget && !self.propagator.current.is_empty() {
            let batch = std::mem::take(&mut self.propagator.current);
            let mut deliveries = Vec::new();
            for node in batch {
                let Some(changed) = self.evaluate(node) else {
                    trace!("Skipping stale node {}", node);
                    continue;
                };
                stats.evaluations += 1;
                if changed {
                    deliveries.extend(self.outgoing(node));
                }
            }
            for (to, value) in deliveries {
                if self.write_input(to, value) {
                    self.propagator.next.insert(to.node);
                }
            }
            std::mem::swap(&mut self.propagator.current, &mut self.propagator.next);
            stats.phases += 1;
        }

        stats.settled = self.is_settled();
        debug!(
            "Tick ran {} of {} phases, {} evaluations, {} pending",
            stats.phases,
            budget,
            stats.evaluations,
            self.propagator.pending()
        );
        stats
    }

    /// Ticks until settled or `max_ticks` ticks have run. Returns the number of ticks run.
    pub fn run_until_settled(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks {
            ticks += 1;
            if self.tick().settled {
                break;
            }
        }
        ticks
    }

    /// Pulses one node. `None` if the handle is stale, otherwise whether its outputs changed.
    fn evaluate(&mut self, id: NodeId) -> Option<bool> {
        let node = self.node_mut(id)?;
        let changed = node.pulse();
        trace!("Evaluated {} {}: changed={}", node.kind(), id, changed);
        Some(changed)
    }

    /// Values `id` currently drives onto the far end of each of its wires.
    fn outgoing(&self, id: NodeId) -> Vec<(PinRef, bool)> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        node.output_pins()
            .iter()
            .flat_map(|pin| pin.wires().iter().map(move |&wire| (wire, pin.state())))
            .filter_map(|(wire, value)| Some((self.wire(wire)?.to(), value)))
            .collect()
    }

    /// Sets an input pin. Returns false if the pin no longer exists.
    fn write_input(&mut self, to: PinRef, value: bool) -> bool {
        match self
            .node_mut(to.node)
            .and_then(|n| n.pin_mut(PinDirection::Input, to.index))
        {
            Some(pin) => {
                pin.set_state(value);
                true
            }
            None => false,
        }
    }
}
