//! Configuration for the live engine and the static analyzer.
//!
//! Both knobs default to the historical behavior: a tick runs as many phases as the graph has
//! entities, and truth tables are enumerated for any input count that fits in a `u64`.
//!
//! ```ignore
//! use fixor_common::{Config, PhaseBudget};
//! let cfg = Config::default().with_phase_budget(PhaseBudget::Fixed(16));
//! ```

use serde::{Deserialize, Serialize};

/// How many propagation phases a single tick may run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseBudget {
    /// `|gates| + |wires| + |sources| + |sinks|`, an upper bound on the longest dependency chain.
    #[default]
    GraphSize,
    /// A constant bound chosen by the host.
    Fixed(usize),
}

impl PhaseBudget {
    /// Resolves the budget against the current entity count of a graph.
    #[must_use]
    pub const fn phases(&self, entity_count: usize) -> usize {
        match self {
            Self::GraphSize => entity_count,
            Self::Fixed(n) => *n,
        }
    }
}

/// Global engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Per-tick phase bound for the live engine.
    pub phase_budget: PhaseBudget,
    /// Optional ceiling on the number of inputs a truth table may enumerate.
    pub max_table_inputs: Option<usize>,
}

impl Config {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(phase_budget: PhaseBudget, max_table_inputs: Option<usize>) -> Self {
        Self {
            phase_budget,
            max_table_inputs,
        }
    }

    /// Replaces the phase budget.
    #[must_use]
    pub const fn with_phase_budget(mut self, phase_budget: PhaseBudget) -> Self {
        self.phase_budget = phase_budget;
        self
    }

    /// Caps the number of inputs a truth table may enumerate.
    #[must_use]
    pub const fn with_max_table_inputs(mut self, limit: usize) -> Self {
        self.max_table_inputs = Some(limit);
        self
    }
}
