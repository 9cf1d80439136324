//! Conformance test helpers for the random datapath generator.
//!
//! Provides configuration builders and a pipeline function that runs
//! configuration → generation → verification → emission and returns every
//! intermediate result for assertion in integration tests.

#![warn(missing_docs)]

use dpgen_config::{load_config_from_str, ConfigError, GeneratorConfig};
use dpgen_emit::{emit_testbench, emit_verilog, EmitError};
use dpgen_ir::{Netlist, NetlistError};

/// Timestamp stamped into every header emitted by [`full_pipeline`].
pub const FIXED_TIMESTAMP: &str = "2000-01-01 00:00:00";

/// Errors from any stage of [`full_pipeline`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The configuration was rejected.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// The generated netlist broke a structural invariant.
    #[error("netlist: {0}")]
    Netlist(#[from] NetlistError),
    /// Emission failed.
    #[error("emit: {0}")]
    Emit(#[from] EmitError),
}

/// Result of running the full generate → verify → emit pipeline.
pub struct PipelineResult {
    /// The generated netlist.
    pub netlist: Netlist,
    /// Emitted module text.
    pub verilog: String,
    /// Emitted stimulus harness, when the configuration asks for one.
    pub testbench: Option<String>,
}

/// Parses a TOML document with `seed` prepended.
pub fn make_config(seed: u64, extra_toml: &str) -> Result<GeneratorConfig, ConfigError> {
    load_config_from_str(&format!("seed = {seed}\n{extra_toml}"))
}

/// A configuration that only draws operators from one category.
///
/// `category` is a key of `[weights.category]`, e.g. `"shift"`.
pub fn single_category_config(seed: u64, category: &str) -> Result<GeneratorConfig, ConfigError> {
    let weights: Vec<String> = [
        "arithmetic",
        "logical",
        "comparison",
        "shift",
        "mux",
        "concat",
        "reduction",
    ]
    .iter()
    .map(|name| {
        let w = if *name == category { 1.0 } else { 0.0 };
        format!("{name} = {w:?}")
    })
    .collect();
    make_config(
        seed,
        &format!(
            "num_operations = 60\n\n[weights.category]\n{}\n",
            weights.join("\n")
        ),
    )
}

/// A configuration exercising every control-block feature.
pub fn control_heavy_config(seed: u64) -> Result<GeneratorConfig, ConfigError> {
    make_config(
        seed,
        r#"
num_operations = 30
num_case_statements = 3
num_if_else_chains = 3
generate_sharing_opportunities = true
generate_testbench = true
"#,
    )
}

/// Runs generation, verification and emission for `config`.
pub fn full_pipeline(config: &GeneratorConfig) -> Result<PipelineResult, PipelineError> {
    let netlist = dpgen_synth::generate(config)?;
    netlist.verify()?;
    let verilog = emit_verilog(&netlist, FIXED_TIMESTAMP)?;
    let testbench = if config.generate_testbench {
        Some(emit_testbench(&netlist, FIXED_TIMESTAMP)?)
    } else {
        None
    };
    Ok(PipelineResult {
        netlist,
        verilog,
        testbench,
    })
}
