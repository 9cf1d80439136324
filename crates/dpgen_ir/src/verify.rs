//! Structural checks over a finished netlist.

use crate::control::{Assignment, ControlBlock};
use crate::error::NetlistError;
use crate::ids::SignalId;
use crate::netlist::Netlist;
use crate::op::Operation;
use crate::signal::{Shape, SignalRole};
use std::collections::HashSet;

impl Netlist {
    /// Checks every structural invariant of a generated netlist.
    ///
    /// Handles resolve in this registry; operand counts match arity; output
    /// shapes follow the derivation rules; operations drive wires from
    /// strictly older signals; control blocks write only registers and
    /// assign each of them exactly once per arm; names are unique; the
    /// dependency graph is acyclic. Returns the first violation found.
    pub fn verify(&self) -> Result<(), NetlistError> {
        self.check_names()?;
        for op in &self.operations {
            self.check_operation(op, "operation")?;
        }
        for (index, cb) in self.control_blocks.iter().enumerate() {
            self.check_control_block(index, cb)?;
        }
        for binding in &self.output_bindings {
            self.check_handle(binding.output, "output binding")?;
            self.check_handle(binding.source, "output binding")?;
        }
        self.check_acyclic()
    }

    fn check_handle(&self, id: SignalId, context: &str) -> Result<(), NetlistError> {
        if self.signals.contains(id) {
            Ok(())
        } else {
            Err(NetlistError::DanglingSignal {
                context: context.to_string(),
                id,
            })
        }
    }

    fn check_names(&self) -> Result<(), NetlistError> {
        let mut seen = HashSet::new();
        for sig in self.signals.iter() {
            if !seen.insert(sig.name.as_str()) {
                return Err(NetlistError::DuplicateName(sig.name.clone()));
            }
        }
        Ok(())
    }

    fn check_operation(&self, op: &Operation, context: &str) -> Result<(), NetlistError> {
        self.check_handle(op.output, context)?;
        for &input in &op.inputs {
            self.check_handle(input, context)?;
        }
        if let Some(enable) = op.enable {
            self.check_handle(enable, context)?;
        }

        let out = self.signal(op.output);
        if out.role != SignalRole::Wire {
            return Err(NetlistError::OutputNotWire {
                name: out.name.clone(),
                role: out.role,
            });
        }

        let operand_shapes: Vec<Shape> =
            op.inputs.iter().map(|&i| self.signal(i).shape()).collect();
        let Some(expected) = op.kind.output_shape(&operand_shapes, op.constant_width()) else {
            return Err(NetlistError::ArityMismatch {
                kind: op.kind,
                output: out.name.clone(),
                expected: op.kind.arity(),
                found: op.inputs.len(),
            });
        };
        if expected != out.shape() {
            return Err(NetlistError::ShapeMismatch {
                kind: op.kind,
                output: out.name.clone(),
                expected,
                found: out.shape(),
            });
        }

        for &input in &op.inputs {
            if input >= op.output {
                return Err(NetlistError::ForwardReference {
                    output: out.name.clone(),
                    operand: self.signal(input).name.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_control_block(&self, index: usize, cb: &ControlBlock) -> Result<(), NetlistError> {
        for id in cb.control_signals() {
            self.check_handle(id, "control block")?;
        }
        for op in cb.operations() {
            self.check_operation(op, "control block operation")?;
        }
        for a in cb.assignments() {
            self.check_handle(a.target, "control block assignment")?;
            self.check_handle(a.source, "control block assignment")?;
            let target = self.signal(a.target);
            if target.role != SignalRole::Register {
                return Err(NetlistError::TargetNotRegister {
                    name: target.name.clone(),
                    role: target.role,
                });
            }
        }

        let targets = cb.written_signals();
        match cb {
            ControlBlock::Case(case) => {
                for item in &case.items {
                    self.check_arm(
                        index,
                        &format!("label {}", item.label),
                        &targets,
                        &item.assignments,
                    )?;
                }
                if let Some(default) = &case.default {
                    self.check_arm(index, "default", &targets, default)?;
                }
            }
            ControlBlock::IfElse(chain) => {
                let Some((last, guarded)) = chain.branches.split_last() else {
                    return Err(NetlistError::MalformedChain {
                        block: index,
                        reason: "no branches".to_string(),
                    });
                };
                if last.condition.is_some() {
                    return Err(NetlistError::MalformedChain {
                        block: index,
                        reason: "final branch has a condition".to_string(),
                    });
                }
                if guarded.iter().any(|b| b.condition.is_none()) {
                    return Err(NetlistError::MalformedChain {
                        block: index,
                        reason: "unconditional branch before the end".to_string(),
                    });
                }
                for (i, branch) in chain.branches.iter().enumerate() {
                    self.check_arm(index, &format!("branch {i}"), &targets, &branch.assignments)?;
                }
            }
        }
        Ok(())
    }

    fn check_arm(
        &self,
        block: usize,
        arm: &str,
        targets: &[SignalId],
        assignments: &[Assignment],
    ) -> Result<(), NetlistError> {
        for &target in targets {
            let count = assignments.iter().filter(|a| a.target == target).count();
            if count != 1 {
                return Err(NetlistError::IncompleteArm {
                    block,
                    arm: arm.to_string(),
                    target: self.signal(target).name.clone(),
                    count,
                });
            }
        }
        Ok(())
    }

    fn check_acyclic(&self) -> Result<(), NetlistError> {
        let g = self.operand_graph();
        petgraph::algo::toposort(&g.graph, None)
            .map(|_| ())
            .map_err(|cycle| {
                let id = g.graph[cycle.node_id()];
                NetlistError::Cycle(self.signal(id).name.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{CaseStatement, IfElseChain};
    use crate::netlist::OutputBinding;
    use crate::op::OpKind;

    fn base() -> (Netlist, SignalId, SignalId) {
        let mut nl = Netlist::new("t");
        let a = nl.signals.create(SignalRole::Input, 8, false);
        let b = nl.signals.create(SignalRole::Input, 4, true);
        (nl, a, b)
    }

    #[test]
    fn well_formed_netlist_passes() {
        let (mut nl, a, b) = base();
        let o = nl.signals.create(SignalRole::Output, 8, false);
        let w = nl.signals.create(SignalRole::Wire, 12, true);
        nl.operations.push(Operation::new(OpKind::Mul, w, vec![a, b]));
        let r = nl.signals.create(SignalRole::Register, 8, false);
        let mut case = CaseStatement::new(b);
        case.add_item(0).assignments.push(Assignment::new(r, a));
        case.add_item(1).assignments.push(Assignment::new(r, w));
        case.default = Some(vec![Assignment::new(r, b)]);
        nl.control_blocks.push(ControlBlock::Case(case));
        nl.output_bindings.push(OutputBinding { output: o, source: w });
        assert_eq!(nl.verify(), Ok(()));
    }

    #[test]
    fn wrong_multiply_width_is_caught() {
        let (mut nl, a, b) = base();
        let w = nl.signals.create(SignalRole::Wire, 8, true);
        nl.operations.push(Operation::new(OpKind::Mul, w, vec![a, b]));
        assert!(matches!(nl.verify(), Err(NetlistError::ShapeMismatch { .. })));
    }

    #[test]
    fn short_mux4_is_caught() {
        let (mut nl, a, b) = base();
        let w = nl.signals.create(SignalRole::Wire, 8, false);
        nl.operations.push(Operation::new(OpKind::Mux4, w, vec![a, b, a]));
        assert!(matches!(nl.verify(), Err(NetlistError::ArityMismatch { found: 3, .. })));
    }

    #[test]
    fn forward_reference_is_caught() {
        let (mut nl, a, _) = base();
        let w0 = nl.signals.create(SignalRole::Wire, 8, false);
        let w1 = nl.signals.create(SignalRole::Wire, 8, false);
        nl.operations.push(Operation::new(OpKind::And, w0, vec![a, w1]));
        assert!(matches!(nl.verify(), Err(NetlistError::ForwardReference { .. })));
    }

    #[test]
    fn assigning_a_wire_is_caught() {
        let (mut nl, a, b) = base();
        let w = nl.signals.create(SignalRole::Wire, 8, false);
        let mut chain = IfElseChain::new();
        chain.add_branch(a).assignments.push(Assignment::new(w, b));
        chain.add_else().assignments.push(Assignment::new(w, a));
        nl.control_blocks.push(ControlBlock::IfElse(chain));
        assert!(matches!(nl.verify(), Err(NetlistError::TargetNotRegister { .. })));
    }

    #[test]
    fn branch_missing_an_output_is_caught() {
        let (mut nl, a, b) = base();
        let r0 = nl.signals.create(SignalRole::Register, 8, false);
        let r1 = nl.signals.create(SignalRole::Register, 8, false);
        let mut chain = IfElseChain::new();
        let first = chain.add_branch(a);
        first.assignments.push(Assignment::new(r0, b));
        first.assignments.push(Assignment::new(r1, b));
        chain.add_else().assignments.push(Assignment::new(r0, a));
        nl.control_blocks.push(ControlBlock::IfElse(chain));
        let err = nl.verify().unwrap_err();
        assert_eq!(
            err,
            NetlistError::IncompleteArm {
                block: 0,
                arm: "branch 1".to_string(),
                target: "reg_1".to_string(),
                count: 0,
            }
        );
    }

    #[test]
    fn chain_ending_in_condition_is_caught() {
        let (mut nl, a, b) = base();
        let r = nl.signals.create(SignalRole::Register, 8, false);
        let mut chain = IfElseChain::new();
        chain.add_branch(a).assignments.push(Assignment::new(r, b));
        nl.control_blocks.push(ControlBlock::IfElse(chain));
        assert!(matches!(nl.verify(), Err(NetlistError::MalformedChain { .. })));
    }

    #[test]
    fn foreign_handle_is_caught() {
        let (mut nl, _, _) = base();
        let o = nl.signals.create(SignalRole::Output, 8, false);
        nl.output_bindings.push(OutputBinding {
            output: o,
            source: SignalId::from_raw(40),
        });
        assert!(matches!(nl.verify(), Err(NetlistError::DanglingSignal { .. })));
    }
}
