//! Common types shared across the Fixor workspace.
//!
//! This crate provides the gate kinds and their boolean transfer functions, the declarative
//! [`GraphDescription`] exchanged between the live simulator and the static analyzer, the
//! engine configuration, and puzzle [`Level`] definitions.

mod config;
mod description;
mod error;
mod gate_kind;
mod level;
pub mod ops;

pub use crate::config::*;
pub use crate::description::*;
pub use crate::error::*;
pub use crate::gate_kind::*;
pub use crate::level::*;
