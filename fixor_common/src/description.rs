//! Declarative circuit descriptions.
//!
//! A [`GraphDescription`] is a node-count + gate-kind-list + adjacency-matrix snapshot of a circuit.
//! Node indices are partitioned in a fixed order: inputs first, then gates, then outputs.
//! `matrix[i * N + j] == true` means node `i` drives node `j`.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DescriptionError, GateKind, Result};

/// The partition a description node index falls in, with its index inside that partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// A user-toggleable input source.
    Input(usize),
    /// A gate; the payload indexes `gate_kinds`.
    Gate(usize),
    /// A passive output sink.
    Output(usize),
}

/// Serialization-friendly snapshot of a circuit graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDescription {
    input_count: usize,
    gate_count: usize,
    output_count: usize,
    gate_kinds: Vec<GateKind>,
    matrix: Vec<bool>,
}

impl GraphDescription {
    /// Creates a description with the given partitions and no edges.
    ///
    /// # Panics
    /// If the `N * N` matrix cannot be allocated.
    #[must_use]
    pub fn new(input_count: usize, gate_kinds: Vec<GateKind>, output_count: usize) -> Self {
        let gate_count = gate_kinds.len();
        let n = input_count
            .saturating_add(gate_count)
            .saturating_add(output_count);
        Self {
            input_count,
            gate_count,
            output_count,
            gate_kinds,
            matrix: vec![false; n.saturating_mul(n)],
        }
    }

    /// Assembles a description from raw parts and validates it.
    ///
    /// # Errors
    /// Fails if the parts violate any rule checked by [`GraphDescription::validate`].
    pub fn from_parts(
        input_count: usize,
        gate_count: usize,
        output_count: usize,
        gate_kinds: Vec<GateKind>,
        matrix: Vec<bool>,
    ) -> Result<Self> {
        let desc = Self {
            input_count,
            gate_count,
            output_count,
            gate_kinds,
            matrix,
        };
        desc.validate()?;
        Ok(desc)
    }

    /// Number of input sources.
    #[must_use]
    pub const fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of gates.
    #[must_use]
    pub const fn gate_count(&self) -> usize {
        self.gate_count
    }

    /// Number of output sinks.
    #[must_use]
    pub const fn output_count(&self) -> usize {
        self.output_count
    }

    /// Total node count `N`. Saturates for declared counts that [`GraphDescription::validate`]
    /// would reject.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.output_offset().saturating_add(self.output_count)
    }

    /// Gate kinds in positional order.
    #[must_use]
    pub fn gate_kinds(&self) -> &[GateKind] {
        &self.gate_kinds
    }

    /// The row-major adjacency matrix.
    #[must_use]
    pub fn matrix(&self) -> &[bool] {
        &self.matrix
    }

    /// Index of the first gate node.
    #[must_use]
    pub const fn gate_offset(&self) -> usize {
        self.input_count
    }

    /// Index of the first output node.
    #[must_use]
    pub const fn output_offset(&self) -> usize {
        self.input_count.saturating_add(self.gate_count)
    }

    /// Classifies a node index, or `None` when it is out of range.
    #[must_use]
    pub const fn role(&self, index: usize) -> Option<NodeRole> {
        if index < self.input_count {
            Some(NodeRole::Input(index))
        } else if index < self.output_offset() {
            Some(NodeRole::Gate(index - self.input_count))
        } else if index < self.node_count() {
            Some(NodeRole::Output(index - self.output_offset()))
        } else {
            None
        }
    }

    /// Kind of the gate at node index `index`, if that node is a gate.
    #[must_use]
    pub fn gate_kind_at(&self, index: usize) -> Option<GateKind> {
        match self.role(index)? {
            NodeRole::Gate(g) => self.gate_kinds.get(g).copied(),
            _ => None,
        }
    }

    /// Returns true if `from` drives `to`.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        let n = self.node_count();
        from < n && to < n && self.matrix.get(from * n + to).copied().unwrap_or(false)
    }

    /// Adds the edge `from -> to`.
    ///
    /// # Errors
    /// Fails with [`DescriptionError::InvalidEdge`] if either index is out of range, `from` is an
    /// output node, or `to` is an input node.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_edge(from, to)?;
        let n = self.node_count();
        self.matrix[from * n + to] = true;
        Ok(())
    }

    /// Builder form of [`GraphDescription::add_edge`] for several edges.
    ///
    /// # Errors
    /// Fails on the first invalid edge.
    pub fn with_edges(mut self, edges: &[(usize, usize)]) -> Result<Self> {
        for &(from, to) in edges {
            self.add_edge(from, to)?;
        }
        Ok(self)
    }

    /// Removes the edge `from -> to` if present.
    pub fn remove_edge(&mut self, from: usize, to: usize) {
        let n = self.node_count();
        if from < n && to < n {
            self.matrix[from * n + to] = false;
        }
    }

    /// Iterates all edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.node_count();
        self.matrix
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(k, _)| (k / n, k % n))
    }

    /// The set of edges, for structural comparison.
    #[must_use]
    pub fn edge_set(&self) -> BTreeSet<(usize, usize)> {
        self.edges().collect()
    }

    /// Nodes with an edge into `to`, in ascending index order.
    #[must_use]
    pub fn drivers(&self, to: usize) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&from| self.has_edge(from, to))
            .collect()
    }

    /// Checks counts, matrix dimensions and the partition rules on edges.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.gate_kinds.len() != self.gate_count {
            return Err(DescriptionError::GateKindCountMismatch {
                expected: self.gate_count,
                actual: self.gate_kinds.len(),
            });
        }
        let expected = self
            .input_count
            .checked_add(self.gate_count)
            .and_then(|n| n.checked_add(self.output_count))
            .and_then(|n| n.checked_mul(n))
            .ok_or(DescriptionError::TooManyNodes {
                inputs: self.input_count,
                gates: self.gate_count,
                outputs: self.output_count,
            })?;
        if self.matrix.len() != expected {
            return Err(DescriptionError::DimensionMismatch {
                expected,
                actual: self.matrix.len(),
            });
        }
        for (from, to) in self.edges() {
            self.check_edge(from, to)?;
        }
        Ok(())
    }

    fn check_edge(&self, from: usize, to: usize) -> Result<()> {
        let invalid = |reason| DescriptionError::InvalidEdge { from, to, reason };
        match (self.role(from), self.role(to)) {
            (None, _) | (_, None) => Err(invalid("node index out of range")),
            (Some(NodeRole::Output(_)), _) => Err(invalid("outputs have no outgoing edges")),
            (_, Some(NodeRole::Input(_))) => Err(invalid("inputs have no incoming edges")),
            _ => Ok(()),
        }
    }

    /// Parses and validates a description from JSON text.
    ///
    /// # Errors
    /// Fails on malformed JSON or an invalid description.
    pub fn from_json(json: &str) -> Result<Self> {
        let desc: Self = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Serializes the description to pretty-printed JSON.
    ///
    /// # Errors
    /// Fails only if serialization itself fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads and validates a description from a JSON file.
    ///
    /// # Errors
    /// Fails if the file cannot be read or does not hold a valid description.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading graph description from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Writes the description to a JSON file.
    ///
    /// # Errors
    /// Fails if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
