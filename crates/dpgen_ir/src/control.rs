//! Control blocks: case dispatch and if/else-if/else chains.
//!
//! Both forms render as combinational `always` blocks whose branches are
//! mutually exclusive. Each branch owns the operations it synthesizes and a
//! list of register assignments, which is the pattern a downstream tool can
//! collapse into one shared functional unit.

use crate::ids::SignalId;
use crate::op::Operation;
use serde::{Deserialize, Serialize};

/// A blocking `target = source` assignment inside a control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Register being written.
    pub target: SignalId,
    /// Value being read.
    pub source: SignalId,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(target: SignalId, source: SignalId) -> Self {
        Self { target, source }
    }
}

/// One labelled arm of a [`CaseStatement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseItem {
    /// Integer label matched against the selector.
    pub label: u32,
    /// Operations evaluated only in this arm.
    pub operations: Vec<Operation>,
    /// Register assignments made in this arm.
    pub assignments: Vec<Assignment>,
}

/// Multi-way dispatch on a selector signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStatement {
    /// Signal being matched.
    pub selector: SignalId,
    /// Arms in label order.
    pub items: Vec<CaseItem>,
    /// Assignments of the `default` arm, if one exists.
    pub default: Option<Vec<Assignment>>,
}

impl CaseStatement {
    /// Creates a case statement with no arms.
    pub fn new(selector: SignalId) -> Self {
        Self {
            selector,
            items: Vec::new(),
            default: None,
        }
    }

    /// Appends an empty arm and returns it for filling.
    pub fn add_item(&mut self, label: u32) -> &mut CaseItem {
        self.items.push(CaseItem {
            label,
            operations: Vec::new(),
            assignments: Vec::new(),
        });
        let last = self.items.len() - 1;
        &mut self.items[last]
    }
}

/// One arm of an [`IfElseChain`]. A missing condition denotes the final `else`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Guard signal, `None` for `else`.
    pub condition: Option<SignalId>,
    /// Operations evaluated only in this branch.
    pub operations: Vec<Operation>,
    /// Register assignments made in this branch.
    pub assignments: Vec<Assignment>,
}

/// An `if / else if / else` chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IfElseChain {
    /// Branches in priority order.
    pub branches: Vec<Branch>,
}

impl IfElseChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a guarded branch and returns it for filling.
    pub fn add_branch(&mut self, condition: SignalId) -> &mut Branch {
        self.push(Some(condition))
    }

    /// Appends the unconditional `else` branch and returns it for filling.
    pub fn add_else(&mut self) -> &mut Branch {
        self.push(None)
    }

    fn push(&mut self, condition: Option<SignalId>) -> &mut Branch {
        self.branches.push(Branch {
            condition,
            operations: Vec::new(),
            assignments: Vec::new(),
        });
        let last = self.branches.len() - 1;
        &mut self.branches[last]
    }
}

/// A control block of either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlBlock {
    /// `case (sel) ... endcase`
    Case(CaseStatement),
    /// `if ... else if ... else`
    IfElse(IfElseChain),
}

impl ControlBlock {
    /// Registers written anywhere in the block, in first-write order, without duplicates.
    pub fn written_signals(&self) -> Vec<SignalId> {
        let mut written = Vec::new();
        for a in self.assignments() {
            if !written.contains(&a.target) {
                written.push(a.target);
            }
        }
        written
    }

    /// Every assignment in the block, including the case `default` arm.
    pub fn assignments(&self) -> Vec<&Assignment> {
        match self {
            ControlBlock::Case(case) => case
                .items
                .iter()
                .flat_map(|item| item.assignments.iter())
                .chain(case.default.iter().flatten())
                .collect(),
            ControlBlock::IfElse(chain) => chain
                .branches
                .iter()
                .flat_map(|b| b.assignments.iter())
                .collect(),
        }
    }

    /// Every operation nested in the block's arms.
    pub fn operations(&self) -> Vec<&Operation> {
        match self {
            ControlBlock::Case(case) => case
                .items
                .iter()
                .flat_map(|item| item.operations.iter())
                .collect(),
            ControlBlock::IfElse(chain) => chain
                .branches
                .iter()
                .flat_map(|b| b.operations.iter())
                .collect(),
        }
    }

    /// Selector and condition signals read by the block's control flow.
    pub fn control_signals(&self) -> Vec<SignalId> {
        match self {
            ControlBlock::Case(case) => vec![case.selector],
            ControlBlock::IfElse(chain) => {
                chain.branches.iter().filter_map(|b| b.condition).collect()
            }
        }
    }
}
