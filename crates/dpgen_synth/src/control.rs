//! Control-block construction and the sharing pass.
//!
//! Case statements and if-else chains write freshly allocated registers
//! from mutually exclusive arms. When sharing is enabled, arms may compute
//! their value with a nested operation, so the same operator recurs across
//! arms that can never be active together.

use crate::generator::NetlistGenerator;
use dpgen_ir::{
    Assignment, CaseStatement, ControlBlock, IfElseChain, OpKind, Operation, SignalId, SignalRole,
};
use log::{debug, trace};

const CASE_OP_PROBABILITY: f64 = 0.7;
const BRANCH_MUL_PROBABILITY: f64 = 0.8;
const SHARING_MUL_PROBABILITY: f64 = 0.7;

/// Selector widths above this do not add labels.
const MAX_SELECTOR_BITS: u32 = 4;

impl NetlistGenerator {
    pub(crate) fn generate_control_blocks(&mut self) {
        for _ in 0..self.config.case_statement_count() {
            if let Some(case) = self.case_statement() {
                debug!(
                    "case statement on {} with {} labels",
                    self.netlist.signal(case.selector).name,
                    case.items.len()
                );
                self.netlist.control_blocks.push(ControlBlock::Case(case));
            } else {
                trace!("skipped case statement: no operands");
            }
        }
        for _ in 0..self.config.if_else_chain_count() {
            if let Some(chain) = self.if_else_chain() {
                debug!("if-else chain with {} branches", chain.branches.len());
                self.netlist.control_blocks.push(ControlBlock::IfElse(chain));
            } else {
                trace!("skipped if-else chain: fewer than 3 operands");
            }
        }
        if self.config.generate_sharing_opportunities {
            self.sharing_groups();
        }
    }

    fn case_statement(&mut self) -> Option<CaseStatement> {
        let available = self.available_signals();
        let selector = self.rng.pick(&available)?;
        let selector_bits = self.netlist.signal(selector).width.min(MAX_SELECTOR_BITS);
        let labels = (1u32 << selector_bits).min(self.config.cases_per_statement);

        let targets = self.fresh_registers();
        let mut case = CaseStatement::new(selector);
        for label in 0..labels {
            let mut operations = Vec::new();
            let mut assignments = Vec::with_capacity(targets.len());
            for &target in &targets {
                let nested = if self.config.generate_sharing_opportunities
                    && self.rng.chance(CASE_OP_PROBABILITY)
                {
                    self.nested_arithmetic(&available)
                } else {
                    None
                };
                let source = match nested {
                    Some(op) => {
                        let out = op.output;
                        operations.push(op);
                        out
                    }
                    None => self.rng.pick(&available)?,
                };
                assignments.push(Assignment::new(target, source));
            }
            let item = case.add_item(label);
            item.operations = operations;
            item.assignments = assignments;
        }

        let mut default = Vec::with_capacity(targets.len());
        for &target in &targets {
            default.push(Assignment::new(target, self.rng.pick(&available)?));
        }
        case.default = Some(default);
        Some(case)
    }

    fn if_else_chain(&mut self) -> Option<IfElseChain> {
        let available = self.available_signals();
        if available.len() < 3 {
            return None;
        }
        let targets = self.fresh_registers();
        let branch_count = self.rng.int_in(2, 4);

        let mut chain = IfElseChain::new();
        for index in 0..branch_count {
            let condition = if index + 1 < branch_count {
                Some(self.rng.pick(&available)?)
            } else {
                None
            };
            let mut operations = Vec::new();
            let mut assignments = Vec::with_capacity(targets.len());
            for &target in &targets {
                let nested = if self.config.generate_sharing_opportunities
                    && self.rng.chance(BRANCH_MUL_PROBABILITY)
                {
                    self.binary_op(OpKind::Mul, &available)
                } else {
                    None
                };
                let source = match nested {
                    Some(op) => {
                        let out = op.output;
                        operations.push(op);
                        out
                    }
                    None => self.rng.pick(&available)?,
                };
                assignments.push(Assignment::new(target, source));
            }
            let branch = match condition {
                Some(cond) => chain.add_branch(cond),
                None => chain.add_else(),
            };
            branch.operations = operations;
            branch.assignments = assignments;
        }
        Some(chain)
    }

    /// Groups of multiplies and adds sharing one enable signal, appended
    /// to the top-level datapath.
    fn sharing_groups(&mut self) {
        let available = self.available_signals();
        if available.len() < 4 {
            trace!("skipped sharing groups: fewer than 4 operands");
            return;
        }
        let groups = self.rng.int_in(1, 3);
        for _ in 0..groups {
            let Some(enable) = self.rng.pick(&available) else {
                continue;
            };
            let count = self.rng.int_in(2, 3);
            for _ in 0..count {
                let kind = if self.rng.chance(SHARING_MUL_PROBABILITY) {
                    OpKind::Mul
                } else {
                    OpKind::Add
                };
                if let Some(mut op) = self.binary_op(kind, &available) {
                    op.enable = Some(enable);
                    self.netlist.operations.push(op);
                }
            }
            debug!(
                "sharing group of {count} operations enabled by {}",
                self.netlist.signal(enable).name
            );
        }
    }

    /// Arithmetic operation whose result feeds one case-arm assignment.
    fn nested_arithmetic(&mut self, available: &[SignalId]) -> Option<Operation> {
        let a = self.rng.pick(available)?;
        let b = self.rng.pick(available)?;
        let kind = self.draw_arithmetic()?;
        self.build_op(kind, vec![a, b])
    }

    /// One to three registers sized from the input width range.
    fn fresh_registers(&mut self) -> Vec<SignalId> {
        let count = self.rng.int_in(1, 3);
        (0..count)
            .map(|_| {
                let width = self.input_width();
                let signed = self.random_signedness();
                self.netlist
                    .signals
                    .create(SignalRole::Register, width, signed)
            })
            .collect()
    }
}
