//! The generator configuration record.
//!
//! Every field has a default, so a TOML document only needs to name the
//! settings it changes.

use serde::{Deserialize, Serialize};

/// All knobs of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed of the single random engine; same config and seed give the same design.
    pub seed: u64,
    /// Name of the emitted module.
    pub module_name: String,

    /// Number of input ports.
    pub num_inputs: u32,
    /// Number of output ports.
    pub num_outputs: u32,
    /// Smallest input (and register) width.
    pub input_width_min: u32,
    /// Largest input (and register) width.
    pub input_width_max: u32,
    /// Smallest output width.
    pub output_width_min: u32,
    /// Largest output width.
    pub output_width_max: u32,

    /// Number of datapath operation slots.
    pub num_operations: u32,
    /// Modulus of the construction-order depth tag.
    pub max_depth: u32,
    /// Pipeline stage count; `0` means purely combinational.
    pub num_pipeline_stages: u32,

    /// Weighted draws for operator selection.
    pub weights: WeightConfig,

    /// Accepted for compatibility; has no effect on generation.
    pub use_parameters: bool,
    /// Allow signed ports and registers (each drawn with probability 0.5).
    pub use_signed: bool,
    /// Accepted for compatibility; has no effect on generation.
    pub use_tristate: bool,
    /// Ask the emitter for a stimulus harness alongside the module.
    pub generate_testbench: bool,

    /// Generate two case statements when `num_case_statements` is zero.
    pub generate_case_statements: bool,
    /// Generate two if-else chains when `num_if_else_chains` is zero.
    pub generate_if_else_chains: bool,
    /// Synthesize shareable operations inside control blocks and append
    /// enable-gated operation groups to the datapath.
    pub generate_sharing_opportunities: bool,
    /// Explicit case-statement count; overrides `generate_case_statements`.
    pub num_case_statements: u32,
    /// Explicit if-else-chain count; overrides `generate_if_else_chains`.
    pub num_if_else_chains: u32,
    /// Upper bound on labels per case statement.
    pub cases_per_statement: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            module_name: "random_datapath".to_string(),
            num_inputs: 8,
            num_outputs: 4,
            input_width_min: 8,
            input_width_max: 32,
            output_width_min: 8,
            output_width_max: 32,
            num_operations: 50,
            max_depth: 10,
            num_pipeline_stages: 0,
            weights: WeightConfig::default(),
            use_parameters: false,
            use_signed: true,
            use_tristate: false,
            generate_testbench: false,
            generate_case_statements: false,
            generate_if_else_chains: false,
            generate_sharing_opportunities: false,
            num_case_statements: 0,
            num_if_else_chains: 0,
            cases_per_statement: 4,
        }
    }
}

impl GeneratorConfig {
    /// Number of case statements the engine will attempt.
    pub fn case_statement_count(&self) -> u32 {
        if self.num_case_statements > 0 {
            self.num_case_statements
        } else if self.generate_case_statements {
            2
        } else {
            0
        }
    }

    /// Number of if-else chains the engine will attempt.
    pub fn if_else_chain_count(&self) -> u32 {
        if self.num_if_else_chains > 0 {
            self.num_if_else_chains
        } else if self.generate_if_else_chains {
            2
        } else {
            0
        }
    }
}

/// The three weight sets, as `[weights.category]`, `[weights.arithmetic]`,
/// and `[weights.shift]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// First draw: operator family.
    pub category: CategoryWeights,
    /// Second draw inside the arithmetic family.
    pub arithmetic: ArithmeticWeights,
    /// Second draw inside the shift family.
    pub shift: ShiftWeights,
}

/// Relative weight of each operator family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    /// `+ - * / %`
    pub arithmetic: f64,
    /// Bitwise logic.
    pub logical: f64,
    /// Relational operators.
    pub comparison: f64,
    /// Shifts.
    pub shift: f64,
    /// Multiplexers.
    pub mux: f64,
    /// Concatenation.
    pub concat: f64,
    /// Unary reductions.
    pub reduction: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            arithmetic: 0.3,
            logical: 0.2,
            comparison: 0.1,
            shift: 0.15,
            mux: 0.15,
            concat: 0.05,
            reduction: 0.05,
        }
    }
}

impl CategoryWeights {
    /// Weights in the fixed order arithmetic, logical, comparison, shift,
    /// mux, concat, reduction.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.arithmetic,
            self.logical,
            self.comparison,
            self.shift,
            self.mux,
            self.concat,
            self.reduction,
        ]
    }
}

/// Relative weight of each arithmetic operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticWeights {
    /// Addition.
    pub add: f64,
    /// Subtraction.
    pub sub: f64,
    /// Multiplication.
    pub mult: f64,
    /// Division.
    pub div: f64,
    /// Modulo.
    #[serde(rename = "mod")]
    pub modulo: f64,
}

impl Default for ArithmeticWeights {
    fn default() -> Self {
        Self {
            add: 0.3,
            sub: 0.3,
            mult: 0.25,
            div: 0.1,
            modulo: 0.05,
        }
    }
}

impl ArithmeticWeights {
    /// Weights in the order add, sub, mult, div, mod.
    pub fn as_array(&self) -> [f64; 5] {
        [self.add, self.sub, self.mult, self.div, self.modulo]
    }
}

/// Relative weight of each shift operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftWeights {
    /// Shift left logical.
    pub sll: f64,
    /// Shift right logical.
    pub srl: f64,
    /// Shift right arithmetic.
    pub sra: f64,
}

impl Default for ShiftWeights {
    fn default() -> Self {
        Self {
            sll: 0.4,
            srl: 0.4,
            sra: 0.2,
        }
    }
}

impl ShiftWeights {
    /// Weights in the order sll, srl, sra.
    pub fn as_array(&self) -> [f64; 3] {
        [self.sll, self.srl, self.sra]
    }
}
