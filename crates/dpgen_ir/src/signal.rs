//! Signals and the registry that owns them.
//!
//! A [`Signal`] is a named, typed value: a port, an internal wire, or a
//! register. Every signal in a netlist is created by exactly one
//! [`SignalRegistry`] and referred to elsewhere only through its [`SignalId`].

use crate::arena::Arena;
use crate::ids::SignalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a signal is used for, which decides its name prefix and declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalRole {
    /// A module input port.
    Input,
    /// A module output port.
    Output,
    /// A combinational intermediate value.
    Wire,
    /// A clocked storage element, written only from control blocks.
    Register,
}

impl SignalRole {
    /// Prefix used when the registry names a signal of this role.
    pub fn name_prefix(self) -> &'static str {
        match self {
            SignalRole::Input => "in",
            SignalRole::Output => "out",
            SignalRole::Wire => "wire",
            SignalRole::Register => "reg",
        }
    }

    /// Declaration keyword in RTL text.
    pub fn keyword(self) -> &'static str {
        match self {
            SignalRole::Input => "input",
            SignalRole::Output => "output",
            SignalRole::Wire => "wire",
            SignalRole::Register => "reg",
        }
    }
}

impl fmt::Display for SignalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Width and signedness of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Bit width, at least 1.
    pub width: u32,
    /// Whether the value is interpreted as two's complement.
    pub signed: bool,
}

impl Shape {
    /// Creates a shape.
    pub fn new(width: u32, signed: bool) -> Self {
        Self { width, signed }
    }

    /// A single unsigned bit.
    pub fn bit() -> Self {
        Self::new(1, false)
    }
}

/// An immutable named value in the netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Handle of this signal inside its registry.
    pub id: SignalId,
    /// Unique name, e.g. `in_0` or `wire_12`.
    pub name: String,
    /// Bit width, at least 1.
    pub width: u32,
    /// Signedness qualifier.
    pub signed: bool,
    /// Port, wire, or register.
    pub role: SignalRole,
}

impl Signal {
    /// Returns the width and signedness of this signal.
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.signed)
    }

    /// Packed range such as `[7:0]`, or `None` for a single bit.
    pub fn range(&self) -> Option<String> {
        if self.width > 1 {
            Some(format!("[{}:0]", self.width - 1))
        } else {
            None
        }
    }

    /// A single-bit select, e.g. `sel[1]`.
    pub fn bit(&self, index: u32) -> String {
        format!("{}[{index}]", self.name)
    }

    /// Declaration body without a trailing `;`, e.g. `wire signed [7:0] wire_3`.
    pub fn declaration(&self) -> String {
        self.declaration_as(self.role.keyword())
    }

    /// Declaration with an explicit keyword, used when a port is redeclared
    /// as a harness `reg` or `wire`.
    pub fn declaration_as(&self, keyword: &str) -> String {
        let mut decl = String::from(keyword);
        decl.push(' ');
        if self.signed {
            decl.push_str("signed ");
        }
        if let Some(range) = self.range() {
            decl.push_str(&range);
            decl.push(' ');
        }
        decl.push_str(&self.name);
        decl
    }
}

/// Creates and owns every signal of one netlist.
///
/// Inputs and outputs are numbered by position (`in_0`, `out_0`, ...). Wires
/// and registers share one counter, so `wire_0`, `reg_1`, `wire_2` can appear
/// in the same netlist but never two signals with the same number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalRegistry {
    signals: Arena<SignalId, Signal>,
    inputs: Vec<SignalId>,
    outputs: Vec<SignalId>,
    wires: Vec<SignalId>,
    registers: Vec<SignalId>,
    next_internal: u32,
}

impl SignalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signal with a fresh, role-prefixed name.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero; a zero-width signal is a caller bug.
    pub fn create(&mut self, role: SignalRole, width: u32, signed: bool) -> SignalId {
        assert!(width >= 1, "signal width must be at least 1");
        let index = match role {
            SignalRole::Input => self.inputs.len() as u32,
            SignalRole::Output => self.outputs.len() as u32,
            SignalRole::Wire | SignalRole::Register => {
                let n = self.next_internal;
                self.next_internal += 1;
                n
            }
        };
        let id = self.signals.next_id();
        self.signals.alloc(Signal {
            id,
            name: format!("{}_{index}", role.name_prefix()),
            width,
            signed,
            role,
        });
        match role {
            SignalRole::Input => self.inputs.push(id),
            SignalRole::Output => self.outputs.push(id),
            SignalRole::Wire => self.wires.push(id),
            SignalRole::Register => self.registers.push(id),
        }
        id
    }

    /// Looks up a signal this registry created.
    pub fn get(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id)
    }

    /// Returns `true` if `id` was created by this registry.
    pub fn contains(&self, id: SignalId) -> bool {
        self.signals.contains(id)
    }

    /// Input ports in declaration order.
    pub fn inputs(&self) -> &[SignalId] {
        &self.inputs
    }

    /// Output ports in declaration order.
    pub fn outputs(&self) -> &[SignalId] {
        &self.outputs
    }

    /// Internal wires in creation order.
    pub fn wires(&self) -> &[SignalId] {
        &self.wires
    }

    /// Registers in creation order.
    pub fn registers(&self) -> &[SignalId] {
        &self.registers
    }

    /// Total number of signals of every role.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns `true` if no signal has been created.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Iterates all signals in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }
}

impl std::ops::Index<SignalId> for SignalRegistry {
    type Output = Signal;

    fn index(&self, id: SignalId) -> &Signal {
        &self.signals[id]
    }
}
