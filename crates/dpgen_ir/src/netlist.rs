//! The netlist aggregate handed from the generator to the emitters.

use crate::control::ControlBlock;
use crate::ids::SignalId;
use crate::op::Operation;
use crate::signal::{Signal, SignalRegistry};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pass-through connection from an internal value to an output port.
///
/// Widths of `source` and `output` may differ; the binding records the
/// connection as-is and leaves extension or truncation to the RTL semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputBinding {
    /// Output port being driven.
    pub output: SignalId,
    /// Signal driving it.
    pub source: SignalId,
}

/// A complete generated design: signals, datapath operations, control blocks,
/// and output connections for one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Netlist {
    /// Module name used in the emitted text.
    pub module_name: String,
    /// Owner of every signal referenced below.
    pub signals: SignalRegistry,
    /// Top-level datapath operations in construction order.
    pub operations: Vec<Operation>,
    /// Case statements and if-else chains in construction order.
    pub control_blocks: Vec<ControlBlock>,
    /// One binding per connected output port.
    pub output_bindings: Vec<OutputBinding>,
}

/// Signal-level dependency graph: an edge `a -> b` means `b` is computed from `a`.
pub struct OperandGraph {
    /// The graph; node weights are signal handles.
    pub graph: DiGraph<SignalId, ()>,
    /// Node of each signal.
    pub nodes: HashMap<SignalId, NodeIndex>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            signals: SignalRegistry::new(),
            operations: Vec::new(),
            control_blocks: Vec::new(),
            output_bindings: Vec::new(),
        }
    }

    /// Resolves a handle created by this netlist's registry.
    ///
    /// # Panics
    ///
    /// Panics on a handle from another registry.
    pub fn signal(&self, id: SignalId) -> &Signal {
        &self.signals[id]
    }

    /// Input port handles.
    pub fn inputs(&self) -> &[SignalId] {
        self.signals.inputs()
    }

    /// Output port handles.
    pub fn outputs(&self) -> &[SignalId] {
        self.signals.outputs()
    }

    /// Wire handles.
    pub fn wires(&self) -> &[SignalId] {
        self.signals.wires()
    }

    /// Register handles.
    pub fn registers(&self) -> &[SignalId] {
        self.signals.registers()
    }

    /// Top-level operations followed by every operation nested in control blocks.
    pub fn all_operations(&self) -> Vec<&Operation> {
        self.operations
            .iter()
            .chain(self.control_blocks.iter().flat_map(|cb| cb.operations()))
            .collect()
    }

    /// Builds the dependency graph over all signals.
    ///
    /// Edges come from operation operands, control-block assignments, and
    /// output bindings. Selector and condition signals are not edges: they
    /// steer which assignment fires rather than feed a value.
    pub fn operand_graph(&self) -> OperandGraph {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for sig in self.signals.iter() {
            nodes.insert(sig.id, graph.add_node(sig.id));
        }
        let mut link = |from: SignalId, to: SignalId| {
            if let (Some(&a), Some(&b)) = (nodes.get(&from), nodes.get(&to)) {
                graph.add_edge(a, b, ());
            }
        };
        for op in self.all_operations() {
            for &input in &op.inputs {
                link(input, op.output);
            }
        }
        for cb in &self.control_blocks {
            for a in cb.assignments() {
                link(a.source, a.target);
            }
        }
        for b in &self.output_bindings {
            link(b.source, b.output);
        }
        OperandGraph { graph, nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Assignment, IfElseChain};
    use crate::op::OpKind;
    use crate::signal::SignalRole;

    fn small() -> Netlist {
        let mut nl = Netlist::new("top");
        let a = nl.signals.create(SignalRole::Input, 8, false);
        let b = nl.signals.create(SignalRole::Input, 8, false);
        let o = nl.signals.create(SignalRole::Output, 8, false);
        let w = nl.signals.create(SignalRole::Wire, 8, false);
        let r = nl.signals.create(SignalRole::Register, 8, false);
        nl.operations.push(Operation::new(OpKind::Add, w, vec![a, b]));
        let mut chain = IfElseChain::new();
        chain.add_branch(a).assignments.push(Assignment::new(r, w));
        chain.add_else().assignments.push(Assignment::new(r, b));
        nl.control_blocks.push(ControlBlock::IfElse(chain));
        nl.output_bindings.push(OutputBinding { output: o, source: w });
        nl
    }

    #[test]
    fn accessors_split_by_role() {
        let nl = small();
        assert_eq!(nl.inputs().len(), 2);
        assert_eq!(nl.outputs().len(), 1);
        assert_eq!(nl.wires().len(), 1);
        assert_eq!(nl.registers().len(), 1);
        assert_eq!(nl.signal(nl.wires()[0]).name, "wire_0");
    }

    #[test]
    fn operand_graph_edges() {
        let nl = small();
        let g = nl.operand_graph();
        assert_eq!(g.graph.node_count(), 5);
        // a->w, b->w, w->r, b->r, w->o
        assert_eq!(g.graph.edge_count(), 5);
        assert!(!petgraph::algo::is_cyclic_directed(&g.graph));
    }

    #[test]
    fn serde_roundtrip() {
        let nl = small();
        let json = serde_json::to_string(&nl).unwrap();
        let restored: Netlist = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, nl);
    }
}
