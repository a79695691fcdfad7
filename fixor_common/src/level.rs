//! Puzzle level definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{GateKind, GraphDescription, PALETTE, Result, UNIVERSAL_GATES};

/// A puzzle: the circuit the player starts from, the circuit whose truth table they must
/// reproduce, and what they are allowed to spawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Reference circuit used to check the player's answer.
    pub solution: GraphDescription,
    /// Starting circuit loaded into the live graph.
    pub provided: GraphDescription,
    /// Whether new input sources and output sinks may be spawned.
    #[serde(default = "default_true")]
    pub allow_io_spawning: bool,
    /// Whether new gates may be spawned.
    #[serde(default = "default_true")]
    pub allow_gate_spawning: bool,
    /// Restricts gate spawning to NAND and NOR.
    #[serde(default)]
    pub universal_gates_only: bool,
}

const fn default_true() -> bool {
    true
}

impl Level {
    /// Creates a level with every spawn permission enabled.
    #[must_use]
    pub const fn new(solution: GraphDescription, provided: GraphDescription) -> Self {
        Self {
            solution,
            provided,
            allow_io_spawning: true,
            allow_gate_spawning: true,
            universal_gates_only: false,
        }
    }

    /// Gate kinds the player may spawn in this level.
    #[must_use]
    pub fn spawnable_gates(&self) -> &'static [GateKind] {
        match (self.allow_gate_spawning, self.universal_gates_only) {
            (false, _) => &[],
            (true, true) => &UNIVERSAL_GATES,
            (true, false) => &PALETTE,
        }
    }

    /// Returns true if `kind` may be spawned in this level.
    #[must_use]
    pub fn can_spawn(&self, kind: GateKind) -> bool {
        self.spawnable_gates().contains(&kind)
    }

    /// Validates both descriptions.
    ///
    /// # Errors
    /// Returns the first invalid description's error.
    pub fn validate(&self) -> Result<()> {
        self.solution.validate()?;
        self.provided.validate()
    }

    /// Parses and validates a level from JSON text.
    ///
    /// # Errors
    /// Fails on malformed JSON or an invalid description.
    pub fn from_json(json: &str) -> Result<Self> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Reads and validates a level from a JSON file.
    ///
    /// # Errors
    /// Fails if the file cannot be read or does not hold a valid level.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading level from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }
}
