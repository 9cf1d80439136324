//! Operator kinds and the operations built from them.
//!
//! [`OpKind`] is closed: each kind declares its operand contract through
//! [`OpKind::arity`] and its output shape through [`OpKind::output_shape`].
//! The synthesis engine sizes every output wire with `output_shape`, so a
//! netlist built by the engine satisfies these rules by construction.

use crate::ids::SignalId;
use crate::signal::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse operator family used for the first weighted draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpCategory {
    /// `+ - * / %`
    Arithmetic,
    /// Bitwise `& | ^ ~` and their negations.
    Logical,
    /// Relational operators producing one bit.
    Comparison,
    /// `<< >> >>>`
    Shift,
    /// 2-way and 4-way multiplexers, and the general conditional.
    Mux,
    /// `{a, b, ...}`
    Concat,
    /// Unary reductions producing one bit.
    Reduction,
}

impl OpCategory {
    /// All categories, in the order their weights appear in the configuration.
    pub const ALL: [OpCategory; 7] = [
        OpCategory::Arithmetic,
        OpCategory::Logical,
        OpCategory::Comparison,
        OpCategory::Shift,
        OpCategory::Mux,
        OpCategory::Concat,
        OpCategory::Reduction,
    ];
}

/// Required operand count of an operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Exactly this many operands.
    Exact(usize),
    /// At least this many operands.
    AtLeast(usize),
}

impl Arity {
    /// Returns `true` if `count` operands satisfy this contract.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// The minimum operand count.
    pub fn min(self) -> usize {
        match self {
            Arity::Exact(n) | Arity::AtLeast(n) => n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Every operator the generator can place in a netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    // --- Arithmetic ---
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`, full-width product.
    Mul,
    /// `a / b`
    Div,
    /// `a % b`
    Mod,

    // --- Logical ---
    /// `a & b`
    And,
    /// `a | b`
    Or,
    /// `a ^ b`
    Xor,
    /// `~a`
    Not,
    /// `~(a & b)`
    Nand,
    /// `~(a | b)`
    Nor,
    /// `~(a ^ b)`
    Xnor,

    // --- Comparison ---
    /// `a == b`
    Eq,
    /// `a != b`
    Ne,
    /// `a < b`
    Lt,
    /// `a > b`
    Gt,
    /// `a <= b`
    Le,
    /// `a >= b`
    Ge,

    // --- Shift ---
    /// Logical shift left.
    Sll,
    /// Logical shift right.
    Srl,
    /// Arithmetic shift right.
    Sra,

    // --- Reduction ---
    /// `&a`
    RedAnd,
    /// `|a`
    RedOr,
    /// `^a`
    RedXor,
    /// `~&a`
    RedNand,
    /// `~|a`
    RedNor,
    /// `~^a`
    RedXnor,

    // --- Selection ---
    /// `sel ? a : b`; operands are `[sel, a, b]`.
    Mux2,
    /// Four-way select on the two low selector bits; operands are
    /// `[sel, d0, d1, d2, d3]`.
    Mux4,
    /// Bit concatenation of two or more operands.
    Concat,
    /// General ternary `c ? a : b`; operands are `[c, a, b]`.
    Conditional,
}

impl OpKind {
    /// Arithmetic kinds in configuration weight order.
    pub const ARITHMETIC: [OpKind; 5] = [
        OpKind::Add,
        OpKind::Sub,
        OpKind::Mul,
        OpKind::Div,
        OpKind::Mod,
    ];

    /// Logical kinds, drawn uniformly.
    pub const LOGICAL: [OpKind; 7] = [
        OpKind::And,
        OpKind::Or,
        OpKind::Xor,
        OpKind::Not,
        OpKind::Nand,
        OpKind::Nor,
        OpKind::Xnor,
    ];

    /// Comparison kinds, drawn uniformly.
    pub const COMPARISON: [OpKind; 6] = [
        OpKind::Eq,
        OpKind::Ne,
        OpKind::Lt,
        OpKind::Gt,
        OpKind::Le,
        OpKind::Ge,
    ];

    /// Shift kinds in configuration weight order.
    pub const SHIFT: [OpKind; 3] = [OpKind::Sll, OpKind::Srl, OpKind::Sra];

    /// Reduction kinds, drawn uniformly.
    pub const REDUCTION: [OpKind; 6] = [
        OpKind::RedAnd,
        OpKind::RedOr,
        OpKind::RedXor,
        OpKind::RedNand,
        OpKind::RedNor,
        OpKind::RedXnor,
    ];

    /// The family this kind belongs to.
    pub fn category(self) -> OpCategory {
        use OpKind::*;
        match self {
            Add | Sub | Mul | Div | Mod => OpCategory::Arithmetic,
            And | Or | Xor | Not | Nand | Nor | Xnor => OpCategory::Logical,
            Eq | Ne | Lt | Gt | Le | Ge => OpCategory::Comparison,
            Sll | Srl | Sra => OpCategory::Shift,
            RedAnd | RedOr | RedXor | RedNand | RedNor | RedXnor => OpCategory::Reduction,
            Mux2 | Mux4 | Conditional => OpCategory::Mux,
            Concat => OpCategory::Concat,
        }
    }

    /// Operand contract of this kind.
    pub fn arity(self) -> Arity {
        use OpKind::*;
        match self {
            Not | RedAnd | RedOr | RedXor | RedNand | RedNor | RedXnor => Arity::Exact(1),
            Mux2 | Conditional => Arity::Exact(3),
            Mux4 => Arity::Exact(5),
            Concat => Arity::AtLeast(2),
            Add | Sub | Mul | Div | Mod | And | Or | Xor | Nand | Nor | Xnor | Eq | Ne | Lt
            | Gt | Le | Ge | Sll | Srl | Sra => Arity::Exact(2),
        }
    }

    /// Upper-case mnemonic, e.g. `MULT`.
    pub fn mnemonic(self) -> &'static str {
        use OpKind::*;
        match self {
            Add => "ADD",
            Sub => "SUB",
            Mul => "MULT",
            Div => "DIV",
            Mod => "MOD",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Not => "NOT",
            Nand => "NAND",
            Nor => "NOR",
            Xnor => "XNOR",
            Eq => "EQ",
            Ne => "NEQ",
            Lt => "LT",
            Gt => "GT",
            Le => "LTE",
            Ge => "GTE",
            Sll => "SLL",
            Srl => "SRL",
            Sra => "SRA",
            RedAnd => "RED_AND",
            RedOr => "RED_OR",
            RedXor => "RED_XOR",
            RedNand => "RED_NAND",
            RedNor => "RED_NOR",
            RedXnor => "RED_XNOR",
            Mux2 => "MUX2",
            Mux4 => "MUX4",
            Concat => "CONCAT",
            Conditional => "CONDITIONAL",
        }
    }

    /// Derives the output shape from operand shapes.
    ///
    /// `extra_width` is the total width of inline constants, which only
    /// concatenation consumes. Returns `None` when the operand count breaks
    /// the arity contract or a summed width does not fit in a `u32`.
    pub fn output_shape(self, operands: &[Shape], extra_width: u32) -> Option<Shape> {
        use OpKind::*;
        if !self.arity().accepts(operands.len()) {
            return None;
        }
        let any_signed = |ops: &[Shape]| ops.iter().any(|s| s.signed);
        let max_width = |ops: &[Shape]| ops.iter().map(|s| s.width).max().unwrap_or(1);
        let sum_width = |ops: &[Shape], start: u32| {
            ops.iter().try_fold(start, |acc, s| acc.checked_add(s.width))
        };

        let shape = match self {
            Add | Sub | Div | Mod => Shape::new(max_width(operands), any_signed(operands)),
            Mul => Shape::new(sum_width(operands, 0)?, any_signed(operands)),
            Not => operands[0],
            And | Or | Xor | Nand | Nor | Xnor => Shape::new(max_width(operands), false),
            Eq | Ne | Lt | Gt | Le | Ge => Shape::bit(),
            RedAnd | RedOr | RedXor | RedNand | RedNor | RedXnor => Shape::bit(),
            Sll | Srl | Sra => operands[0],
            Mux2 | Conditional => {
                let data = &operands[1..];
                Shape::new(max_width(data), any_signed(data))
            }
            Mux4 => Shape::new(operands[1].width, false),
            Concat => Shape::new(sum_width(operands, extra_width)?, false),
        };
        Some(shape)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A sized literal carried inline by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    /// Literal value.
    pub value: u64,
    /// Literal width in bits.
    pub width: u32,
}

/// One operator instance: a single output driven from ordered operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operator kind.
    pub kind: OpKind,
    /// The wire this operation drives.
    pub output: SignalId,
    /// Signal operands in positional order.
    pub inputs: Vec<SignalId>,
    /// Inline literals appended after the signal operands.
    pub constants: Vec<Constant>,
    /// Construction-order depth tag; not a dependency depth.
    pub depth: u32,
    /// Pipeline stage bucket derived from `depth`; zero when pipelining is off.
    pub stage: u32,
    /// Shared enable that nominally guards a resource-sharing group. Metadata
    /// only; it does not appear in the rendered assignment.
    pub enable: Option<SignalId>,
}

impl Operation {
    /// Creates an operation with default scheduling metadata.
    pub fn new(kind: OpKind, output: SignalId, inputs: Vec<SignalId>) -> Self {
        Self {
            kind,
            output,
            inputs,
            constants: Vec::new(),
            depth: 0,
            stage: 0,
            enable: None,
        }
    }

    /// Appends an inline constant.
    pub fn with_constant(mut self, value: u64, width: u32) -> Self {
        self.constants.push(Constant { value, width });
        self
    }

    /// Total width contributed by inline constants.
    pub fn constant_width(&self) -> u32 {
        self.constants
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.width))
    }

    /// Returns `true` if the operand count matches the kind's contract.
    pub fn has_valid_arity(&self) -> bool {
        self.kind.arity().accepts(self.inputs.len())
    }
}
