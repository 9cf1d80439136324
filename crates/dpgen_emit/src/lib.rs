//! Verilog emission for generated netlists.
//!
//! [`VerilogWriter`] writes the module text and [`write_testbench`] the
//! companion stimulus harness. Both are pure functions of the netlist and a
//! caller-supplied timestamp. Operations with missing operands render an
//! in-band `/* ERROR: ... */` marker instead of failing; the only error is a
//! failing output sink.
//!
//! # Usage
//!
//! ```ignore
//! use dpgen_emit::emit_verilog;
//! let text = emit_verilog(&netlist, "2024-01-01 00:00:00")?;
//! ```

#![warn(missing_docs)]

mod block;
pub mod error;
mod expr;
mod testbench;
mod verilog;

pub use block::write_control_block;
pub use error::EmitError;
pub use expr::{assignment, expression};
pub use testbench::{emit_testbench, write_testbench};
pub use verilog::{emit_verilog, VerilogWriter};
