//! Structural invariant violations reported by [`Netlist::verify`](crate::Netlist::verify).

use crate::ids::SignalId;
use crate::op::{Arity, OpKind};
use crate::signal::{Shape, SignalRole};

/// A broken netlist invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetlistError {
    /// A handle does not belong to this netlist's registry.
    #[error("{context} references unknown signal {id}")]
    DanglingSignal {
        /// Where the handle was found.
        context: String,
        /// The offending handle.
        id: SignalId,
    },

    /// Operand count does not match the operator's contract.
    #[error("{kind} driving '{output}' has {found} operands, expected {expected}")]
    ArityMismatch {
        /// Operator kind.
        kind: OpKind,
        /// Name of the driven signal.
        output: String,
        /// Required operand count.
        expected: Arity,
        /// Actual operand count.
        found: usize,
    },

    /// Output width or signedness differs from the derivation rule.
    #[error("{kind} driving '{output}' has shape {found:?}, rule gives {expected:?}")]
    ShapeMismatch {
        /// Operator kind.
        kind: OpKind,
        /// Name of the driven signal.
        output: String,
        /// Shape derived from operands.
        expected: Shape,
        /// Declared shape of the output.
        found: Shape,
    },

    /// An operation drives something other than a wire.
    #[error("operation output '{name}' is a {role}, expected a wire")]
    OutputNotWire {
        /// Name of the driven signal.
        name: String,
        /// Its role.
        role: SignalRole,
    },

    /// An operand was created after the wire it feeds.
    #[error("'{output}' reads '{operand}', which was created after it")]
    ForwardReference {
        /// Name of the driven signal.
        output: String,
        /// Name of the operand.
        operand: String,
    },

    /// A control-block assignment targets a non-register.
    #[error("control block assigns '{name}', a {role}; only registers may be targets")]
    TargetNotRegister {
        /// Name of the target.
        name: String,
        /// Its role.
        role: SignalRole,
    },

    /// An arm of a control block leaves an allocated register unassigned or
    /// assigns it more than once.
    #[error("control block {block}: {arm} assigns '{target}' {count} times, expected exactly once")]
    IncompleteArm {
        /// Index of the control block.
        block: usize,
        /// Human-readable arm description.
        arm: String,
        /// Name of the register.
        target: String,
        /// Number of assignments found.
        count: usize,
    },

    /// An if-else chain whose `else` is missing or not last.
    #[error("if-else chain {block} is malformed: {reason}")]
    MalformedChain {
        /// Index of the control block.
        block: usize,
        /// What is wrong.
        reason: String,
    },

    /// Two signals share a name.
    #[error("duplicate signal name '{0}'")]
    DuplicateName(String),

    /// The dependency graph has a cycle.
    #[error("dependency cycle through '{0}'")]
    Cycle(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_arity_mismatch() {
        let err = NetlistError::ArityMismatch {
            kind: OpKind::Mux4,
            output: "wire_3".to_string(),
            expected: Arity::Exact(5),
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "MUX4 driving 'wire_3' has 3 operands, expected 5"
        );
    }

    #[test]
    fn display_duplicate_name() {
        let err = NetlistError::DuplicateName("in_0".to_string());
        assert_eq!(err.to_string(), "duplicate signal name 'in_0'");
    }

    #[test]
    fn display_target_not_register() {
        let err = NetlistError::TargetNotRegister {
            name: "wire_1".to_string(),
            role: SignalRole::Wire,
        };
        assert_eq!(
            err.to_string(),
            "control block assigns 'wire_1', a wire; only registers may be targets"
        );
    }
}
