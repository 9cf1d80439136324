//! Module text for a generated netlist.
//!
//! Sections appear in a fixed order: header comment, port list, wire and
//! register declarations, combinational assignments, output connections,
//! control blocks, the register reset block, and `endmodule`. Empty
//! collections drop their section.

use std::io::Write;

use dpgen_ir::{Netlist, Signal};

use crate::block::write_control_block;
use crate::error::EmitError;
use crate::expr::{assignment, signal_name};

pub(crate) const FILE_RULE: &str =
    "// ============================================================================";
const SECTION_RULE: &str = "    // ========================================";

/// Writes Verilog module text for a [`Netlist`].
///
/// The timestamp is written verbatim into the header, so output is a pure
/// function of the netlist and the timestamp.
pub struct VerilogWriter<W: Write> {
    writer: W,
    timestamp: String,
}

impl<W: Write> VerilogWriter<W> {
    /// Creates a writer stamping `timestamp` into every header it writes.
    pub fn new(writer: W, timestamp: impl Into<String>) -> Self {
        Self {
            writer,
            timestamp: timestamp.into(),
        }
    }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the complete module.
    pub fn write_module(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        self.write_header(netlist)?;
        self.write_ports(netlist)?;
        self.write_declarations(netlist)?;
        self.write_combinational(netlist)?;
        self.write_output_connections(netlist)?;
        self.write_control_blocks(netlist)?;
        self.write_reset_block(netlist)?;
        writeln!(self.writer, "endmodule")?;
        Ok(())
    }

    fn write_header(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        let w = &mut self.writer;
        writeln!(w, "{FILE_RULE}")?;
        writeln!(w, "// Random Verilog Datapath Generator")?;
        writeln!(w, "// Generated: {}", self.timestamp)?;
        writeln!(w, "{FILE_RULE}")?;
        writeln!(
            w,
            "// This file was automatically generated for synthesis tool benchmarking."
        )?;
        writeln!(w, "// Module: {}", netlist.module_name)?;
        writeln!(w, "// Inputs: {}", netlist.inputs().len())?;
        writeln!(w, "// Outputs: {}", netlist.outputs().len())?;
        writeln!(w, "// Operations: {}", netlist.operations.len())?;
        writeln!(w, "{FILE_RULE}")?;
        writeln!(w)?;
        Ok(())
    }

    fn write_ports(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        writeln!(self.writer, "module {} (", netlist.module_name)?;
        let ports: Vec<&Signal> = netlist
            .inputs()
            .iter()
            .chain(netlist.outputs())
            .filter_map(|&id| netlist.signals.get(id))
            .collect();
        for (i, port) in ports.iter().enumerate() {
            let sep = if i + 1 < ports.len() { "," } else { "" };
            writeln!(self.writer, "    {}{sep}", port.declaration())?;
        }
        writeln!(self.writer, ");")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_declarations(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        for (title, ids) in [
            ("Internal wires", netlist.wires()),
            ("Registers", netlist.registers()),
        ] {
            if ids.is_empty() {
                continue;
            }
            writeln!(self.writer, "    // {title}")?;
            for sig in ids.iter().filter_map(|&id| netlist.signals.get(id)) {
                writeln!(self.writer, "    {};", sig.declaration())?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_section_title(&mut self, lines: &[&str]) -> Result<(), EmitError> {
        writeln!(self.writer, "{SECTION_RULE}")?;
        for line in lines {
            writeln!(self.writer, "    // {line}")?;
        }
        writeln!(self.writer, "{SECTION_RULE}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_combinational(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        if netlist.operations.is_empty() {
            writeln!(self.writer, "    // No operations generated")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        self.write_section_title(&["Combinational Logic"])?;
        for op in &netlist.operations {
            writeln!(self.writer, "    {}", assignment(netlist, op))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_output_connections(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        if netlist.output_bindings.is_empty() {
            return Ok(());
        }
        self.write_section_title(&["Output Connections"])?;
        for binding in &netlist.output_bindings {
            writeln!(
                self.writer,
                "    assign {} = {};",
                signal_name(netlist, binding.output),
                signal_name(netlist, binding.source)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_control_blocks(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        if netlist.control_blocks.is_empty() {
            return Ok(());
        }
        self.write_section_title(&[
            "Control Flow Structures",
            "(for testing synthesis optimization)",
        ])?;
        for block in &netlist.control_blocks {
            write_control_block(&mut self.writer, netlist, block, 1)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Emitted whenever registers exist, independent of pipeline stages.
    fn write_reset_block(&mut self, netlist: &Netlist) -> Result<(), EmitError> {
        let regs: Vec<&str> = netlist
            .registers()
            .iter()
            .map(|&id| signal_name(netlist, id))
            .collect();
        if regs.is_empty() {
            return Ok(());
        }
        self.write_section_title(&["Sequential Logic (Pipeline Registers)"])?;
        let w = &mut self.writer;
        writeln!(w, "    always @(posedge clk or negedge rst_n) begin")?;
        writeln!(w, "        if (!rst_n) begin")?;
        for name in &regs {
            writeln!(w, "            {name} <= 0;")?;
        }
        writeln!(w, "        end else begin")?;
        writeln!(w, "            // Pipeline stage updates")?;
        for name in &regs {
            writeln!(w, "            // {name} <= ...;")?;
        }
        writeln!(w, "        end")?;
        writeln!(w, "    end")?;
        writeln!(w)?;
        Ok(())
    }
}

/// Renders the module text into a `String`.
pub fn emit_verilog(netlist: &Netlist, timestamp: &str) -> Result<String, EmitError> {
    let mut writer = VerilogWriter::new(Vec::new(), timestamp);
    writer.write_module(netlist)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpgen_ir::{
        Assignment, CaseStatement, ControlBlock, OpKind, Operation, OutputBinding, SignalRole,
    };

    const TS: &str = "2024-01-01 00:00:00";

    fn adder() -> Netlist {
        let mut nl = Netlist::new("adder");
        let a = nl.signals.create(SignalRole::Input, 8, false);
        let b = nl.signals.create(SignalRole::Input, 1, true);
        let out = nl.signals.create(SignalRole::Output, 8, false);
        let w = nl.signals.create(SignalRole::Wire, 8, true);
        nl.operations.push(Operation::new(OpKind::Add, w, vec![a, b]));
        nl.output_bindings.push(OutputBinding { output: out, source: w });
        nl
    }

    #[test]
    fn full_module_text() {
        let text = emit_verilog(&adder(), TS).unwrap();
        let expected = "\
// ============================================================================
// Random Verilog Datapath Generator
// Generated: 2024-01-01 00:00:00
// ============================================================================
// This file was automatically generated for synthesis tool benchmarking.
// Module: adder
// Inputs: 2
// Outputs: 1
// Operations: 1
// ============================================================================

module adder (
    input [7:0] in_0,
    input signed in_1,
    output [7:0] out_0
);

    // Internal wires
    wire signed [7:0] wire_0;

    // ========================================
    // Combinational Logic
    // ========================================

    assign wire_0 = (in_0 + in_1);

    // ========================================
    // Output Connections
    // ========================================

    assign out_0 = wire_0;

endmodule
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_datapath_placeholder() {
        let mut nl = Netlist::new("bare");
        nl.signals.create(SignalRole::Input, 4, false);
        let text = emit_verilog(&nl, TS).unwrap();
        assert!(text.contains("module bare (\n    input [3:0] in_0\n);\n\n"));
        assert!(text.contains("    // No operations generated\n\n"));
        assert!(!text.contains("Internal wires"));
        assert!(!text.contains("always"));
        assert!(text.ends_with("endmodule\n"));
    }

    #[test]
    fn registers_get_reset_block_after_control_blocks() {
        let mut nl = adder();
        let sel = nl.inputs()[1];
        let src = nl.inputs()[0];
        let r = nl.signals.create(SignalRole::Register, 8, false);
        let mut case = CaseStatement::new(sel);
        case.add_item(0).assignments.push(Assignment::new(r, src));
        case.add_item(1).assignments.push(Assignment::new(r, src));
        case.default = Some(vec![Assignment::new(r, src)]);
        nl.control_blocks.push(ControlBlock::Case(case));

        let text = emit_verilog(&nl, TS).unwrap();
        assert!(text.contains("    // Registers\n    reg [7:0] reg_1;\n\n"));
        let control = text.find("// Control Flow Structures").unwrap();
        let reset = text.find("always @(posedge clk or negedge rst_n)").unwrap();
        assert!(control < reset);
        assert!(text.contains("            reg_1 <= 0;\n"));
        assert!(text.contains("            // reg_1 <= ...;\n"));
        assert!(text.contains("    end\n\n    // ========"));
    }

    #[test]
    fn same_input_same_text() {
        let nl = adder();
        assert_eq!(emit_verilog(&nl, TS).unwrap(), emit_verilog(&nl, TS).unwrap());
        assert_ne!(
            emit_verilog(&nl, TS).unwrap(),
            emit_verilog(&nl, "2025-06-30 12:00:00").unwrap()
        );
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_is_reported() {
        let mut writer = VerilogWriter::new(FailingSink, TS);
        assert!(matches!(writer.write_module(&adder()), Err(EmitError::Io(_))));
    }
}
