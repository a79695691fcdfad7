use fixor_common::{Config, GraphDescription, NodeRole, ops};
use tracing::{debug, trace};

use crate::{Adjacency, AnalysisError, Result, topological_order};

/// Inputs past this count cannot be enumerated in a `u64` combination counter.
const HARD_INPUT_LIMIT: usize = u64::BITS as usize - 1;

/// One input combination and the outputs it produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Row {
    /// Input values, index `i` is input node `i`.
    pub inputs: Vec<bool>,
    /// Output values, index `i` is the `i`-th output node.
    pub outputs: Vec<bool>,
}

/// The full truth table of a description, rows in combination order `0 .. 2^inputs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TruthTable {
    input_count: usize,
    output_count: usize,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Number of input columns.
    #[must_use]
    pub const fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of output columns.
    #[must_use]
    pub const fn output_count(&self) -> usize {
        self.output_count
    }

    /// Rows in combination order; bit `i` of the row index is input `i`.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row for a given input combination.
    #[must_use]
    pub fn row(&self, combination: usize) -> Option<&Row> {
        self.rows.get(combination)
    }
}

/// Evaluates `desc` for every input combination with the default [`Config`].
///
/// # Errors
/// See [`evaluate_truth_table_with`].
pub fn evaluate_truth_table(desc: &GraphDescription) -> Result<TruthTable> {
    evaluate_truth_table_with(desc, &Config::default())
}

/// Evaluates `desc` for every input combination.
///
/// Gates read their drivers in ascending index order, packed left pin first. A two-pin gate with a
/// single driver reads that driver on both pins; drivers past the gate's pin count are ignored.
/// Each output is the OR of its drivers.
///
/// # Errors
/// Fails if the description is malformed, cyclic, has too many inputs for `config`, or contains
/// a gate kind without a transfer function.
pub fn evaluate_truth_table_with(desc: &GraphDescription, config: &Config) -> Result<TruthTable> {
    desc.validate()?;

    let inputs = desc.input_count();
    let limit = config
        .max_table_inputs
        .map_or(HARD_INPUT_LIMIT, |cap| cap.min(HARD_INPUT_LIMIT));
    if inputs > limit {
        return Err(AnalysisError::TooManyInputs { inputs, limit });
    }

    let adjacency = Adjacency::build(desc);
    let order = topological_order(&adjacency)?;
    let combinations = 1u64 << inputs;
    debug!(
        "Evaluating {} combinations over {} nodes",
        combinations,
        desc.node_count()
    );

    let mut values = vec![false; desc.node_count()];
    let mut rows = Vec::new();
    for combination in 0..combinations {
        for &node in &order {
            values[node] = evaluate_node(desc, &adjacency, &values, node, combination)?;
        }
        let row = Row {
            inputs: values[..inputs].to_vec(),
            outputs: values[desc.output_offset()..].to_vec(),
        };
        trace!("combination {}: {:?}", combination, row);
        rows.push(row);
    }

    Ok(TruthTable {
        input_count: inputs,
        output_count: desc.output_count(),
        rows,
    })
}

fn evaluate_node(
    desc: &GraphDescription,
    adjacency: &Adjacency,
    values: &[bool],
    node: usize,
    combination: u64,
) -> Result<bool> {
    let drivers = adjacency.fanin(node);
    match desc.role(node) {
        Some(NodeRole::Input(i)) => Ok((combination >> i) & 1 == 1),
        Some(NodeRole::Gate(g)) => {
            let kind = desc.gate_kinds()[g];
            let arity = kind.default_input_pins();
            let mut pins: Vec<bool> = drivers.iter().take(arity).map(|&d| values[d]).collect();
            if pins.len() == 1 && arity > 1 {
                pins.resize(arity, pins[0]);
            }
            kind.evaluate(ops::pack(pins))
                .ok_or(AnalysisError::UnsupportedGate { kind, node })
        }
        Some(NodeRole::Output(_)) => Ok(drivers.iter().any(|&d| values[d])),
        None => unreachable!("topological order only holds in-range nodes"),
    }
}
