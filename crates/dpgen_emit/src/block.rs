//! Always-block text for case statements and if-else chains.

use crate::expr::{assignment, signal_name};
use dpgen_ir::{Assignment, CaseStatement, ControlBlock, IfElseChain, Netlist, Operation};
use std::io::{self, Write};

fn indent(level: usize) -> String {
    " ".repeat(level * 4)
}

/// Writes one control block as a combinational `always @(*)` block.
///
/// `level` is the nesting depth of the `always` keyword, four spaces each.
pub fn write_control_block<W: Write>(
    w: &mut W,
    netlist: &Netlist,
    block: &ControlBlock,
    level: usize,
) -> io::Result<()> {
    match block {
        ControlBlock::Case(case) => write_case(w, netlist, case, level),
        ControlBlock::IfElse(chain) => write_if_else(w, netlist, chain, level),
    }
}

fn write_body<W: Write>(
    w: &mut W,
    netlist: &Netlist,
    pad: &str,
    ops: &[Operation],
    assigns: &[Assignment],
) -> io::Result<()> {
    for op in ops {
        writeln!(w, "{pad}    {}", assignment(netlist, op))?;
    }
    for a in assigns {
        writeln!(
            w,
            "{pad}    {} = {};",
            signal_name(netlist, a.target),
            signal_name(netlist, a.source)
        )?;
    }
    Ok(())
}

fn write_case<W: Write>(
    w: &mut W,
    netlist: &Netlist,
    case: &CaseStatement,
    level: usize,
) -> io::Result<()> {
    let (ind, ind1, ind2) = (indent(level), indent(level + 1), indent(level + 2));
    writeln!(w, "{ind}always @(*) begin")?;
    writeln!(w, "{ind1}case ({})", signal_name(netlist, case.selector))?;
    for item in &case.items {
        writeln!(w, "{ind2}{}: begin", item.label)?;
        write_body(w, netlist, &ind2, &item.operations, &item.assignments)?;
        writeln!(w, "{ind2}end")?;
    }
    if let Some(default) = case.default.as_deref().filter(|d| !d.is_empty()) {
        writeln!(w, "{ind2}default: begin")?;
        write_body(w, netlist, &ind2, &[], default)?;
        writeln!(w, "{ind2}end")?;
    }
    writeln!(w, "{ind1}endcase")?;
    writeln!(w, "{ind}end")
}

fn write_if_else<W: Write>(
    w: &mut W,
    netlist: &Netlist,
    chain: &IfElseChain,
    level: usize,
) -> io::Result<()> {
    let (ind, ind1) = (indent(level), indent(level + 1));
    writeln!(w, "{ind}always @(*) begin")?;
    for (i, branch) in chain.branches.iter().enumerate() {
        match (i, branch.condition) {
            (0, Some(c)) => writeln!(w, "{ind1}if ({}) begin", signal_name(netlist, c))?,
            (0, None) => writeln!(w, "{ind1}begin")?,
            (_, Some(c)) => writeln!(w, "{ind1}end else if ({}) begin", signal_name(netlist, c))?,
            (_, None) => writeln!(w, "{ind1}end else begin")?,
        }
        write_body(w, netlist, &ind1, &branch.operations, &branch.assignments)?;
    }
    if !chain.branches.is_empty() {
        writeln!(w, "{ind1}end")?;
    }
    writeln!(w, "{ind}end")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpgen_ir::{OpKind, SignalRole};

    fn control_block(netlist: &Netlist, block: &ControlBlock, level: usize) -> String {
        let mut buf = Vec::new();
        write_control_block(&mut buf, netlist, block, level).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn case_block_layout() {
        let mut nl = Netlist::new("m");
        let sel = nl.signals.create(SignalRole::Input, 2, false);
        let a = nl.signals.create(SignalRole::Input, 8, false);
        let r = nl.signals.create(SignalRole::Register, 8, false);
        let w = nl.signals.create(SignalRole::Wire, 8, false);

        let mut case = CaseStatement::new(sel);
        let item = case.add_item(0);
        item.operations.push(Operation::new(OpKind::Add, w, vec![a, sel]));
        item.assignments.push(Assignment::new(r, w));
        case.add_item(1).assignments.push(Assignment::new(r, a));
        case.default = Some(vec![Assignment::new(r, sel)]);

        let text = control_block(&nl, &ControlBlock::Case(case), 1);
        let expected = "    always @(*) begin
        case (in_0)
            0: begin
                assign wire_1 = (in_1 + in_0);
                reg_0 = wire_1;
            end
            1: begin
                reg_0 = in_1;
            end
            default: begin
                reg_0 = in_0;
            end
        endcase
    end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn if_else_layout() {
        let mut nl = Netlist::new("m");
        let c0 = nl.signals.create(SignalRole::Input, 1, false);
        let c1 = nl.signals.create(SignalRole::Input, 1, false);
        let r = nl.signals.create(SignalRole::Register, 4, true);

        let mut chain = IfElseChain::new();
        chain.add_branch(c0).assignments.push(Assignment::new(r, c1));
        chain.add_branch(c1).assignments.push(Assignment::new(r, c0));
        chain.add_else().assignments.push(Assignment::new(r, c0));

        let text = control_block(&nl, &ControlBlock::IfElse(chain), 1);
        let expected = "    always @(*) begin
        if (in_0) begin
            reg_0 = in_1;
        end else if (in_1) begin
            reg_0 = in_0;
        end else begin
            reg_0 = in_0;
        end
    end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_default_is_omitted() {
        let mut nl = Netlist::new("m");
        let sel = nl.signals.create(SignalRole::Input, 1, false);
        let mut case = CaseStatement::new(sel);
        case.default = Some(Vec::new());
        let text = control_block(&nl, &ControlBlock::Case(case), 0);
        assert!(!text.contains("default"));
        assert!(text.starts_with("always @(*) begin\n    case (in_0)\n"));
    }
}
