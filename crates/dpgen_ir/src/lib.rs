//! Netlist model for the random datapath generator.
//!
//! This crate defines the structures the synthesis engine produces and the
//! emitters consume: the [`SignalRegistry`] and its [`Signal`]s, the closed
//! [`OpKind`] set with its arity and shape rules, [`Operation`]s, the two
//! [`ControlBlock`] forms, and the [`Netlist`] aggregate with its
//! [`verify`](Netlist::verify) pass.

#![warn(missing_docs)]

pub mod arena;
pub mod control;
pub mod error;
pub mod ids;
pub mod netlist;
pub mod op;
pub mod signal;
mod verify;

pub use arena::{Arena, ArenaId};
pub use control::{Assignment, Branch, CaseItem, CaseStatement, ControlBlock, IfElseChain};
pub use error::NetlistError;
pub use ids::SignalId;
pub use netlist::{Netlist, OperandGraph, OutputBinding};
pub use op::{Arity, Constant, OpCategory, OpKind, Operation};
pub use signal::{Shape, Signal, SignalRegistry, SignalRole};
