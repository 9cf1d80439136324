//! Weighted-random netlist synthesis engine.
//!
//! Given a [`GeneratorConfig`], this crate builds a structurally valid
//! [`Netlist`]: ports, a combinational datapath over inputs and prior wires,
//! optional case statements and if-else chains writing registers, optional
//! resource-sharing groups, and pass-through output bindings.
//!
//! Generation runs as a fixed sequence of [`Phase`]s driven by one seeded
//! random engine, so the same configuration always yields the same netlist.
//!
//! # Usage
//!
//! ```ignore
//! use dpgen_synth::generate;
//! let netlist = generate(&config)?;
//! netlist.verify()?;
//! ```

#![warn(missing_docs)]

mod control;
mod datapath;
mod generator;
mod phase;
mod rng;
mod schedule;

pub use generator::NetlistGenerator;
pub use phase::Phase;

use dpgen_config::{ConfigError, GeneratorConfig};
use dpgen_ir::Netlist;

/// Validates `config` and runs every generation phase.
///
/// The only failure is an invalid configuration, which is reported before
/// any generation happens. Undersized operand pools are not errors: the
/// affected operation or control block is skipped.
pub fn generate(config: &GeneratorConfig) -> Result<Netlist, ConfigError> {
    Ok(NetlistGenerator::new(config.clone())?.run())
}
