//! Offline, side-effect-free evaluation of graph descriptions.
//!
//! The analyzer turns a [`GraphDescription`](fixor_common::GraphDescription) into a
//! [`TruthTable`] by topologically sorting its nodes and evaluating every gate for every input
//! combination, then renders the table into a canonical string. Two circuits are equivalent iff
//! their canonical strings are byte-identical.
//!
//! Unlike the live engine, the analyzer rejects cyclic graphs.

mod adjacency;
mod canonical;
mod error;
mod topo;
mod truth_table;

pub use adjacency::Adjacency;
pub use canonical::{
    canonical_string, canonical_string_with, equivalent, input_label, output_label,
};
pub use error::{AnalysisError, Result};
pub use topo::topological_order;
pub use truth_table::{Row, TruthTable, evaluate_truth_table, evaluate_truth_table_with};
