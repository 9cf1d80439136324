//! Top-level datapath construction: one weighted draw per operation slot.

use crate::generator::NetlistGenerator;
use dpgen_ir::{OpCategory, OpKind, Operation, SignalId, SignalRole};
use log::trace;

/// Probability that a mux slot builds a 4-way mux instead of a 2-way one.
const MUX4_PROBABILITY: f64 = 0.3;

impl NetlistGenerator {
    pub(crate) fn generate_datapath(&mut self) {
        for slot in 0..self.config.num_operations {
            let Some(category) = self.draw_category() else {
                continue;
            };
            let mut available = self.available_signals();
            if available.is_empty() {
                available = self.netlist.inputs().to_vec();
            }
            match self.generate_in_category(category, &available) {
                Some(op) => {
                    trace!("slot {slot}: {} -> {}", op.kind, op.output);
                    self.netlist.operations.push(op);
                }
                None => trace!("slot {slot}: skipped {category:?}"),
            }
        }
    }

    fn draw_category(&mut self) -> Option<OpCategory> {
        let index = self.rng.weighted(&self.config.weights.category.as_array())?;
        OpCategory::ALL.get(index).copied()
    }

    /// Arithmetic operator from the per-operator weights.
    pub(crate) fn draw_arithmetic(&mut self) -> Option<OpKind> {
        let index = self.rng.weighted(&self.config.weights.arithmetic.as_array())?;
        OpKind::ARITHMETIC.get(index).copied()
    }

    fn draw_shift(&mut self) -> Option<OpKind> {
        let index = self.rng.weighted(&self.config.weights.shift.as_array())?;
        OpKind::SHIFT.get(index).copied()
    }

    fn generate_in_category(
        &mut self,
        category: OpCategory,
        available: &[SignalId],
    ) -> Option<Operation> {
        match category {
            OpCategory::Arithmetic => {
                let kind = self.draw_arithmetic()?;
                self.binary_op(kind, available)
            }
            OpCategory::Logical => {
                let kind = self.rng.pick(&OpKind::LOGICAL)?;
                if kind == OpKind::Not {
                    let a = self.rng.pick(available)?;
                    self.build_op(kind, vec![a])
                } else {
                    self.binary_op(kind, available)
                }
            }
            OpCategory::Comparison => {
                let kind = self.rng.pick(&OpKind::COMPARISON)?;
                self.binary_op(kind, available)
            }
            OpCategory::Shift => {
                let kind = self.draw_shift()?;
                self.binary_op(kind, available)
            }
            OpCategory::Mux => {
                if self.rng.chance(MUX4_PROBABILITY) {
                    self.mux4(available)
                } else {
                    let sel = self.rng.pick(available)?;
                    let a = self.rng.pick(available)?;
                    let b = self.rng.pick(available)?;
                    self.build_op(OpKind::Mux2, vec![sel, a, b])
                }
            }
            OpCategory::Concat => {
                let count = self.rng.int_in(2, 4);
                let mut parts = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    parts.push(self.rng.pick(available)?);
                }
                self.build_op(OpKind::Concat, parts)
            }
            OpCategory::Reduction => {
                let kind = self.rng.pick(&OpKind::REDUCTION)?;
                let a = self.rng.pick(available)?;
                self.build_op(kind, vec![a])
            }
        }
    }

    /// Two independently drawn operands; repeats are allowed.
    pub(crate) fn binary_op(&mut self, kind: OpKind, available: &[SignalId]) -> Option<Operation> {
        let a = self.rng.pick(available)?;
        let b = self.rng.pick(available)?;
        self.build_op(kind, vec![a, b])
    }

    /// 4-way mux. A selector narrower than two bits is replaced by a fresh
    /// 2-bit wire that nothing drives.
    fn mux4(&mut self, available: &[SignalId]) -> Option<Operation> {
        let mut sel = self.rng.pick(available)?;
        if self.netlist.signal(sel).width < 2 {
            sel = self.netlist.signals.create(SignalRole::Wire, 2, false);
        }
        let mut inputs = Vec::with_capacity(5);
        inputs.push(sel);
        for _ in 0..4 {
            inputs.push(self.rng.pick(available)?);
        }
        self.build_op(OpKind::Mux4, inputs)
    }
}
