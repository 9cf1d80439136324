//! Expression text for single operations.
//!
//! Every [`OpKind`] has one rendering arm. An operation with too few
//! operands renders a `/* ERROR: ... */` marker in place of the expression;
//! extra operands past the kind's arity are ignored.

use dpgen_ir::{Netlist, OpKind, Operation, SignalId};

const NOT_ENOUGH_INPUTS: &str = "/* ERROR: not enough inputs */";
const NO_INPUT: &str = "/* ERROR: no input */";
const NOT_ENOUGH_MUX: &str = "/* ERROR: not enough inputs for mux */";
const NOT_ENOUGH_CONCAT: &str = "/* ERROR: not enough inputs for concat */";
const NOT_ENOUGH_CONDITIONAL: &str = "/* ERROR: not enough inputs for conditional */";
const UNKNOWN_SIGNAL: &str = "/* ERROR: unknown signal */";

/// Name of a signal, or an error marker for a handle this netlist does not own.
pub(crate) fn signal_name(netlist: &Netlist, id: SignalId) -> &str {
    netlist
        .signals
        .get(id)
        .map_or(UNKNOWN_SIGNAL, |s| s.name.as_str())
}

/// `assign <output> = <expr>;`
pub fn assignment(netlist: &Netlist, op: &Operation) -> String {
    format!(
        "assign {} = {};",
        signal_name(netlist, op.output),
        expression(netlist, op)
    )
}

/// Right-hand side of an operation's assignment.
pub fn expression(netlist: &Netlist, op: &Operation) -> String {
    let r = Renderer { netlist, op };
    match op.kind {
        OpKind::Add => r.binary("+"),
        OpKind::Sub => r.binary("-"),
        OpKind::Mul => r.binary("*"),
        OpKind::Div => r.binary("/"),
        OpKind::Mod => r.binary("%"),
        OpKind::And => r.binary("&"),
        OpKind::Or => r.binary("|"),
        OpKind::Xor => r.binary("^"),
        OpKind::Not => r.prefix("~"),
        OpKind::Nand => r.negated("&"),
        OpKind::Nor => r.negated("|"),
        OpKind::Xnor => r.negated("^"),
        OpKind::Eq => r.binary("=="),
        OpKind::Ne => r.binary("!="),
        OpKind::Lt => r.binary("<"),
        OpKind::Gt => r.binary(">"),
        OpKind::Le => r.binary("<="),
        OpKind::Ge => r.binary(">="),
        OpKind::Sll => r.binary("<<"),
        OpKind::Srl => r.binary(">>"),
        OpKind::Sra => r.binary(">>>"),
        OpKind::RedAnd => r.prefix("&"),
        OpKind::RedOr => r.prefix("|"),
        OpKind::RedXor => r.prefix("^"),
        OpKind::RedNand => r.prefix("~&"),
        OpKind::RedNor => r.prefix("~|"),
        OpKind::RedXnor => r.prefix("~^"),
        OpKind::Mux2 => r.ternary(NOT_ENOUGH_MUX),
        OpKind::Mux4 => r.mux4(),
        OpKind::Concat => r.concat(),
        OpKind::Conditional => r.ternary(NOT_ENOUGH_CONDITIONAL),
    }
}

struct Renderer<'a> {
    netlist: &'a Netlist,
    op: &'a Operation,
}

impl Renderer<'_> {
    fn operand(&self, index: usize) -> &str {
        signal_name(self.netlist, self.op.inputs[index])
    }

    fn has(&self, count: usize) -> bool {
        self.op.inputs.len() >= count
    }

    fn binary(&self, symbol: &str) -> String {
        if !self.has(2) {
            return NOT_ENOUGH_INPUTS.to_string();
        }
        format!("({} {symbol} {})", self.operand(0), self.operand(1))
    }

    fn negated(&self, symbol: &str) -> String {
        if !self.has(2) {
            return NOT_ENOUGH_INPUTS.to_string();
        }
        format!("~({})", self.binary(symbol))
    }

    fn prefix(&self, symbol: &str) -> String {
        if !self.has(1) {
            return NO_INPUT.to_string();
        }
        format!("({symbol}{})", self.operand(0))
    }

    fn ternary(&self, marker: &str) -> String {
        if !self.has(3) {
            return marker.to_string();
        }
        format!(
            "({} ? {} : {})",
            self.operand(0),
            self.operand(1),
            self.operand(2)
        )
    }

    /// Bit 1 of the selector picks the pair, bit 0 the member.
    fn mux4(&self) -> String {
        if !self.has(5) {
            return NOT_ENOUGH_MUX.to_string();
        }
        let sel = self.op.inputs[0];
        let (hi, lo) = match self.netlist.signals.get(sel) {
            Some(s) => (s.bit(1), s.bit(0)),
            None => (UNKNOWN_SIGNAL.to_string(), UNKNOWN_SIGNAL.to_string()),
        };
        format!(
            "({hi} ? ({lo} ? {} : {}) : ({lo} ? {} : {}))",
            self.operand(4),
            self.operand(3),
            self.operand(2),
            self.operand(1)
        )
    }

    /// Signal parts first, then constants as sized decimal literals.
    fn concat(&self) -> String {
        if !self.has(2) {
            return NOT_ENOUGH_CONCAT.to_string();
        }
        let mut parts: Vec<String> = (0..self.op.inputs.len())
            .map(|i| self.operand(i).to_string())
            .collect();
        parts.extend(
            self.op
                .constants
                .iter()
                .map(|c| format!("{}'d{}", c.width, c.value)),
        );
        format!("{{{}}}", parts.join(", "))
    }
}
