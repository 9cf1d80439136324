//! Stimulus harness for a generated module.
//!
//! The harness drives every input with 100 random vectors ten time units
//! apart and monitors every output in hex.

use std::io::Write;

use dpgen_ir::{Netlist, Signal};

use crate::error::EmitError;
use crate::verilog::FILE_RULE;

/// Random vectors applied before `$finish`.
const VECTOR_COUNT: u32 = 100;

/// Writes the stimulus harness instantiating `netlist`'s module as `dut`.
pub fn write_testbench<W: Write>(
    w: &mut W,
    netlist: &Netlist,
    timestamp: &str,
) -> Result<(), EmitError> {
    let name = &netlist.module_name;
    let inputs: Vec<&Signal> = ports(netlist, netlist.inputs());
    let outputs: Vec<&Signal> = ports(netlist, netlist.outputs());

    writeln!(w, "{FILE_RULE}")?;
    writeln!(w, "// Testbench for {name}")?;
    writeln!(w, "// Generated: {timestamp}")?;
    writeln!(w, "{FILE_RULE}")?;
    writeln!(w)?;
    writeln!(w, "`timescale 1ns / 1ps")?;
    writeln!(w)?;
    writeln!(w, "module tb_{name};")?;
    writeln!(w)?;

    writeln!(w, "    // Testbench signals")?;
    for sig in &inputs {
        writeln!(w, "    {};", sig.declaration_as("reg"))?;
    }
    for sig in &outputs {
        writeln!(w, "    {};", sig.declaration_as("wire"))?;
    }
    writeln!(w)?;

    writeln!(w, "    // Instantiate DUT")?;
    writeln!(w, "    {name} dut (")?;
    let total = inputs.len() + outputs.len();
    for (i, sig) in inputs.iter().chain(&outputs).enumerate() {
        let sep = if i + 1 < total { "," } else { "" };
        writeln!(w, "        .{0}({0}){sep}", sig.name)?;
    }
    writeln!(w, "    );")?;
    writeln!(w)?;

    writeln!(w, "    // Test stimulus")?;
    writeln!(w, "    initial begin")?;
    writeln!(w, "        $dumpfile(\"{name}.vcd\");")?;
    writeln!(w, "        $dumpvars(0, tb_{name});")?;
    writeln!(w)?;
    writeln!(w, "        // Initialize inputs")?;
    for sig in &inputs {
        writeln!(w, "        {} = 0;", sig.name)?;
    }
    writeln!(w)?;
    writeln!(w, "        // Apply random test vectors")?;
    writeln!(w, "        repeat ({VECTOR_COUNT}) begin")?;
    writeln!(w, "            #10;")?;
    for sig in &inputs {
        writeln!(w, "            {} = $random;", sig.name)?;
    }
    writeln!(w, "        end")?;
    writeln!(w)?;
    writeln!(w, "        #100 $finish;")?;
    writeln!(w, "    end")?;
    writeln!(w)?;

    writeln!(w, "    // Monitor outputs")?;
    writeln!(w, "    initial begin")?;
    write!(w, "        $monitor(\"Time=%0t\", $time")?;
    for sig in &outputs {
        write!(w, ", \" {0}=%h\", {0}", sig.name)?;
    }
    writeln!(w, ");")?;
    writeln!(w, "    end")?;
    writeln!(w)?;
    writeln!(w, "endmodule")?;
    Ok(())
}

fn ports<'a>(netlist: &'a Netlist, ids: &[dpgen_ir::SignalId]) -> Vec<&'a Signal> {
    ids.iter().filter_map(|&id| netlist.signals.get(id)).collect()
}

/// Renders the stimulus harness into a `String`.
pub fn emit_testbench(netlist: &Netlist, timestamp: &str) -> Result<String, EmitError> {
    let mut buf = Vec::new();
    write_testbench(&mut buf, netlist, timestamp)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpgen_ir::SignalRole;

    fn netlist() -> Netlist {
        let mut nl = Netlist::new("dp");
        nl.signals.create(SignalRole::Input, 8, true);
        nl.signals.create(SignalRole::Input, 1, false);
        nl.signals.create(SignalRole::Output, 16, false);
        nl
    }

    #[test]
    fn harness_text() {
        let text = emit_testbench(&netlist(), "now").unwrap();
        let expected = "\
// ============================================================================
// Testbench for dp
// Generated: now
// ============================================================================

`timescale 1ns / 1ps

module tb_dp;

    // Testbench signals
    reg signed [7:0] in_0;
    reg in_1;
    wire [15:0] out_0;

    // Instantiate DUT
    dp dut (
        .in_0(in_0),
        .in_1(in_1),
        .out_0(out_0)
    );

    // Test stimulus
    initial begin
        $dumpfile(\"dp.vcd\");
        $dumpvars(0, tb_dp);

        // Initialize inputs
        in_0 = 0;
        in_1 = 0;

        // Apply random test vectors
        repeat (100) begin
            #10;
            in_0 = $random;
            in_1 = $random;
        end

        #100 $finish;
    end

    // Monitor outputs
    initial begin
        $monitor(\"Time=%0t\", $time, \" out_0=%h\", out_0);
    end

endmodule
";
        assert_eq!(text, expected);
    }

    #[test]
    fn monitor_lists_every_output() {
        let mut nl = netlist();
        nl.signals.create(SignalRole::Output, 1, false);
        let text = emit_testbench(&nl, "now").unwrap();
        assert!(text.contains(
            "$monitor(\"Time=%0t\", $time, \" out_0=%h\", out_0, \" out_1=%h\", out_1);"
        ));
        assert!(text.contains("        .out_0(out_0),\n        .out_1(out_1)\n    );"));
    }
}
