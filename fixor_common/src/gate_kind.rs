use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ops;

/// Categorizes gates by their boolean transfer function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// Inverter gate.
    Not,
    /// Logical AND gate.
    And,
    /// Logical OR gate.
    Or,
    /// Logical XOR gate.
    Xor,
    /// Inverted AND gate.
    Nand,
    /// Inverted OR gate.
    Nor,
    /// Reserved for composite gates. Has no transfer function.
    Custom,
}

/// Gate kinds a player can spawn, in palette order.
pub const PALETTE: [GateKind; 6] = [
    GateKind::Nand,
    GateKind::Not,
    GateKind::And,
    GateKind::Or,
    GateKind::Xor,
    GateKind::Nor,
];

/// Gate kinds that remain spawnable when a level restricts play to universal gates.
pub const UNIVERSAL_GATES: [GateKind; 2] = [GateKind::Nand, GateKind::Nor];

impl GateKind {
    /// Number of input pins a freshly spawned gate of this kind gets.
    #[must_use]
    pub const fn default_input_pins(&self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }

    /// Returns true if the kind has a defined transfer function.
    #[must_use]
    pub const fn is_evaluable(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Returns true if the kind is functionally complete on its own.
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        matches!(self, Self::Nand | Self::Nor)
    }

    /// Applies the transfer function to packed input pins.
    ///
    /// Returns the raw output word (bit 0 is the gate output), or `None` for [`GateKind::Custom`].
    #[must_use]
    pub const fn operate(&self, input: u32) -> Option<u32> {
        let out = match self {
            Self::Not => ops::not(input),
            Self::And => ops::and(input),
            Self::Or => ops::or(input),
            Self::Xor => ops::xor(input),
            Self::Nand => ops::nand(input),
            Self::Nor => ops::nor(input),
            Self::Custom => return None,
        };
        Some(out)
    }

    /// Like [`GateKind::operate`], reduced to the single output bit.
    #[must_use]
    pub const fn evaluate(&self, input: u32) -> Option<bool> {
        match self.operate(input) {
            Some(out) => Some(out & 1 == 1),
            None => None,
        }
    }

    /// The upper-case name used in descriptions and on gate labels.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a gate kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gate kind '{0}'")]
pub struct UnknownGateKind(pub String);

impl FromStr for GateKind {
    type Err = UnknownGateKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NOT" => Ok(Self::Not),
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "XOR" => Ok(Self::Xor),
            "NAND" => Ok(Self::Nand),
            "NOR" => Ok(Self::Nor),
            "CUSTOM" => Ok(Self::Custom),
            _ => Err(UnknownGateKind(s.to_string())),
        }
    }
}
