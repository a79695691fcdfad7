//! Canonical text rendering of truth tables.
//!
//! The header lists input labels (`A`, `B`, ...) separated by single spaces, then `|`, then output
//! labels (`OA`, `OB`, ...) each preceded by two spaces. Every row follows the same layout with
//! `T`/`F` tokens. Every line ends in `\n`:
//!
//! ```text
//! A B |  OA
//! F F |  F
//! T F |  F
//! F T |  F
//! T T |  T
//! ```
//!
//! The string is the only basis for solution equality, so circuits with different input or output
//! counts never compare equal even when logically equivalent.

use std::fmt;

use fixor_common::{Config, GraphDescription};
use itertools::Itertools;
use tracing::info;

use crate::{Result, TruthTable, evaluate_truth_table_with};

/// Spreadsheet-style column label: `A`..`Z`, then `AA`, `AB`, ...
#[must_use]
pub fn input_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.iter().rev().map(|&b| b as char).collect()
}

/// Label of the `index`-th output: `O` followed by [`input_label`].
#[must_use]
pub fn output_label(index: usize) -> String {
    format!("O{}", input_label(index))
}

const fn token(value: bool) -> &'static str {
    if value { "T" } else { "F" }
}

fn write_line<I, O>(f: &mut fmt::Formatter<'_>, inputs: I, outputs: O) -> fmt::Result
where
    I: Iterator,
    I::Item: fmt::Display,
    O: Iterator,
    O::Item: fmt::Display,
{
    write!(f, "{}", inputs.format(" "))?;
    write!(f, " |")?;
    for out in outputs {
        write!(f, "  {out}")?;
    }
    writeln!(f)
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_line(
            f,
            (0..self.input_count()).map(input_label),
            (0..self.output_count()).map(output_label),
        )?;
        for row in self.rows() {
            write_line(
                f,
                row.inputs.iter().map(|&v| token(v)),
                row.outputs.iter().map(|&v| token(v)),
            )?;
        }
        Ok(())
    }
}

/// Evaluates `desc` with the default [`Config`] and renders its canonical truth table.
///
/// # Errors
/// Fails with the same errors as [`evaluate_truth_table_with`], notably
/// [`crate::AnalysisError::CyclicGraph`] for cyclic descriptions.
pub fn canonical_string(desc: &GraphDescription) -> Result<String> {
    canonical_string_with(desc, &Config::default())
}

/// Evaluates `desc` under `config` and renders its canonical truth table.
///
/// # Errors
/// See [`canonical_string`].
pub fn canonical_string_with(desc: &GraphDescription, config: &Config) -> Result<String> {
    Ok(evaluate_truth_table_with(desc, config)?.to_string())
}

/// Verification contract: two descriptions pass iff their canonical strings are byte-identical.
///
/// # Errors
/// Fails if either description cannot be evaluated.
pub fn equivalent(
    candidate: &GraphDescription,
    reference: &GraphDescription,
    config: &Config,
) -> Result<bool> {
    let lhs = canonical_string_with(candidate, config)?;
    let rhs = canonical_string_with(reference, config)?;
    let passed = lhs == rhs;
    info!("Solution check: {}", if passed { "pass" } else { "fail" });
    Ok(passed)
}
