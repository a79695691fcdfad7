//! A puzzle attempt: a live graph seeded from a level, spawn rules, and answer checking.

use std::fmt;

use fixor_analysis::{canonical_string_with, equivalent};
use fixor_common::{Config, GateKind, Level};
use tracing::info;

use crate::{Graph, NodeId, Result, SimError};

/// Something a player may ask to place on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Spawnable {
    /// A gate of the given kind.
    Gate(GateKind),
    /// A new input source.
    InputSource,
    /// A new output sink.
    OutputSink,
}

impl fmt::Display for Spawnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate(kind) => write!(f, "a {kind} gate"),
            Self::InputSource => write!(f, "an input source"),
            Self::OutputSink => write!(f, "an output sink"),
        }
    }
}

/// A player's attempt at a [`Level`].
#[derive(Clone, Debug)]
pub struct Session {
    level: Level,
    graph: Graph,
}

impl Session {
    /// Loads the level's starting circuit into a new graph.
    ///
    /// # Errors
    /// Fails if either circuit of the level is malformed or the starting circuit cannot be
    /// instantiated.
    pub fn new(level: Level, config: Config) -> Result<Self> {
        level.validate()?;
        let graph = Graph::from_description(&level.provided, config)?;
        info!(
            "Started level with {} provided nodes",
            level.provided.node_count()
        );
        Ok(Self { level, graph })
    }

    /// The level being played.
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// The board as currently wired.
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Direct access for wiring, toggling and ticking.
    pub const fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    fn check(&self, what: Spawnable) -> Result<()> {
        let allowed = match what {
            Spawnable::Gate(kind) => self.level.can_spawn(kind),
            Spawnable::InputSource | Spawnable::OutputSink => self.level.allow_io_spawning,
        };
        if allowed {
            Ok(())
        } else {
            Err(SimError::SpawnNotAllowed(what))
        }
    }

    /// Spawns a gate if the level's palette offers it.
    ///
    /// # Errors
    /// [`SimError::SpawnNotAllowed`] when the level forbids it.
    pub fn spawn_gate(&mut self, kind: GateKind) -> Result<NodeId> {
        self.check(Spawnable::Gate(kind))?;
        self.graph.create_gate(kind)
    }

    /// Spawns an input source if the level allows I/O spawning.
    ///
    /// # Errors
    /// [`SimError::SpawnNotAllowed`] when the level forbids I/O spawning.
    pub fn spawn_input(&mut self) -> Result<NodeId> {
        self.check(Spawnable::InputSource)?;
        Ok(self.graph.create_input_source())
    }

    /// Spawns an output sink if the level allows I/O spawning.
    ///
    /// # Errors
    /// [`SimError::SpawnNotAllowed`] when the level forbids I/O spawning.
    pub fn spawn_output(&mut self) -> Result<NodeId> {
        self.check(Spawnable::OutputSink)?;
        Ok(self.graph.create_output_sink())
    }

    /// Canonical truth table the player has to reproduce.
    ///
    /// # Errors
    /// Fails if the reference circuit cannot be analyzed.
    pub fn target_table(&self) -> Result<String> {
        Ok(canonical_string_with(
            &self.level.solution,
            self.graph.config(),
        )?)
    }

    /// Canonical truth table of the board as currently wired.
    ///
    /// # Errors
    /// Fails if the board is cyclic or otherwise cannot be analyzed.
    pub fn current_table(&self) -> Result<String> {
        Ok(canonical_string_with(
            &self.graph.snapshot(),
            self.graph.config(),
        )?)
    }

    /// Checks the board against the reference circuit.
    ///
    /// # Errors
    /// Fails if either circuit cannot be analyzed, notably when the board contains a loop.
    pub fn verify(&self) -> Result<bool> {
        let attempt = self.graph.snapshot();
        let passed = equivalent(&attempt, &self.level.solution, self.graph.config())?;
        info!(
            "Verified attempt with {} gates: {}",
            attempt.gate_count(),
            if passed { "solved" } else { "not solved" }
        );
        Ok(passed)
    }

    /// Throws away the player's changes and reloads the starting circuit.
    ///
    /// # Errors
    /// See [`Graph::load`].
    pub fn restart(&mut self) -> Result<()> {
        self.graph.load(&self.level.provided)?;
        info!("Restarted level");
        Ok(())
    }
}
