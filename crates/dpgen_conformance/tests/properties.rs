//! Structural properties of generated netlists across many seeds.

use std::collections::HashSet;

use dpgen_conformance::{
    control_heavy_config, full_pipeline, make_config, single_category_config,
};
use dpgen_config::GeneratorConfig;
use dpgen_ir::{ControlBlock, Netlist, OpKind, Operation, Shape, SignalRole};

const SEEDS: std::ops::Range<u64> = 0..40;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn configs(seed: u64) -> Vec<GeneratorConfig> {
    vec![
        make_config(seed, "").unwrap(),
        control_heavy_config(seed).unwrap(),
        make_config(seed, "num_pipeline_stages = 3\nmax_depth = 6\nuse_signed = false").unwrap(),
        make_config(
            seed,
            "num_inputs = 2\ninput_width_min = 1\ninput_width_max = 2\nnum_operations = 15",
        )
        .unwrap(),
    ]
}

fn each_netlist(mut check: impl FnMut(&Netlist)) {
    for seed in SEEDS {
        for cfg in configs(seed) {
            let result = full_pipeline(&cfg)
                .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
            check(&result.netlist);
        }
    }
}

fn all_ops(nl: &Netlist) -> Vec<&Operation> {
    nl.all_operations()
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_config_same_bytes() {
    init();
    for seed in 0..10 {
        for cfg in configs(seed) {
            let a = full_pipeline(&cfg).unwrap();
            let b = full_pipeline(&cfg).unwrap();
            assert_eq!(a.netlist, b.netlist);
            assert_eq!(a.verilog, b.verilog);
            assert_eq!(a.testbench, b.testbench);
            assert_eq!(
                serde_json::to_string(&a.netlist).unwrap(),
                serde_json::to_string(&b.netlist).unwrap()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Width legality
// ---------------------------------------------------------------------------

#[test]
fn output_widths_follow_rules() {
    init();
    each_netlist(|nl| {
        for op in all_ops(nl) {
            let ins: Vec<Shape> = op.inputs.iter().map(|&i| nl.signal(i).shape()).collect();
            let out = nl.signal(op.output).shape();
            let max = ins.iter().map(|s| s.width).max().unwrap_or(0);
            let sum: u32 = ins.iter().map(|s| s.width).sum();
            let any_signed = ins.iter().any(|s| s.signed);
            let expected = match op.kind {
                OpKind::Mul => Shape::new(sum, any_signed),
                OpKind::Add | OpKind::Sub | OpKind::Div | OpKind::Mod => {
                    Shape::new(max, any_signed)
                }
                OpKind::Not => ins[0],
                OpKind::And | OpKind::Or | OpKind::Xor | OpKind::Nand | OpKind::Nor
                | OpKind::Xnor => Shape::new(max, false),
                OpKind::Sll | OpKind::Srl | OpKind::Sra => ins[0],
                OpKind::Mux2 | OpKind::Conditional => Shape::new(
                    ins[1].width.max(ins[2].width),
                    ins[1].signed || ins[2].signed,
                ),
                OpKind::Mux4 => Shape::new(ins[1].width, false),
                OpKind::Concat => Shape::new(sum + op.constant_width(), false),
                k if k.category() == dpgen_ir::OpCategory::Comparison
                    || k.category() == dpgen_ir::OpCategory::Reduction =>
                {
                    Shape::new(1, false)
                }
                k => panic!("unexpected kind {k}"),
            };
            assert_eq!(out, expected, "{} driving {}", op.kind, nl.signal(op.output).name);
        }
    });
}

#[test]
fn every_category_produces_legal_operations() {
    init();
    for category in [
        "arithmetic",
        "logical",
        "comparison",
        "shift",
        "mux",
        "concat",
        "reduction",
    ] {
        for seed in 0..5 {
            let cfg = single_category_config(seed, category).unwrap();
            let result = full_pipeline(&cfg).unwrap();
            assert_eq!(result.netlist.operations.len(), 60, "{category}");
            assert!(!result.verilog.contains("/* ERROR"));
        }
    }
}

// ---------------------------------------------------------------------------
// Acyclicity
// ---------------------------------------------------------------------------

#[test]
fn operands_created_before_results() {
    init();
    each_netlist(|nl| {
        for op in all_ops(nl) {
            for &i in &op.inputs {
                assert!(i < op.output);
                let role = nl.signal(i).role;
                assert!(matches!(role, SignalRole::Input | SignalRole::Wire));
            }
        }
        let g = nl.operand_graph();
        for e in g.graph.edge_indices() {
            let Some((from, to)) = g.graph.edge_endpoints(e) else {
                continue;
            };
            let (from, to) = (g.graph[from], g.graph[to]);
            if nl.signal(to).role == SignalRole::Wire {
                assert!(from < to, "{} feeds older {}", nl.signal(from).name, nl.signal(to).name);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Arity conformance
// ---------------------------------------------------------------------------

#[test]
fn operand_counts_match_kinds() {
    init();
    each_netlist(|nl| {
        for op in all_ops(nl) {
            assert!(op.has_valid_arity(), "{} with {}", op.kind, op.inputs.len());
            if op.kind == OpKind::Mux4 {
                assert_eq!(op.inputs.len(), 5);
                assert!(nl.signal(op.inputs[0]).width >= 2);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Control-block completeness
// ---------------------------------------------------------------------------

#[test]
fn control_blocks_are_complete() {
    init();
    let mut blocks = 0;
    each_netlist(|nl| {
        for block in &nl.control_blocks {
            blocks += 1;
            let written = block.written_signals();
            let arms: Vec<Vec<_>> = match block {
                ControlBlock::Case(case) => {
                    let mut arms: Vec<Vec<_>> = case
                        .items
                        .iter()
                        .map(|i| i.assignments.iter().map(|a| a.target).collect())
                        .collect();
                    if let Some(d) = &case.default {
                        arms.push(d.iter().map(|a| a.target).collect());
                    }
                    arms
                }
                ControlBlock::IfElse(chain) => {
                    assert!(chain.branches.last().unwrap().condition.is_none());
                    chain
                        .branches
                        .iter()
                        .map(|b| b.assignments.iter().map(|a| a.target).collect())
                        .collect()
                }
            };
            for targets in arms {
                let mut sorted = targets.clone();
                sorted.sort();
                sorted.dedup();
                assert_eq!(sorted.len(), targets.len(), "target assigned twice");
                let mut expected = written.clone();
                expected.sort();
                assert_eq!(sorted, expected);
            }
        }
    });
    assert!(blocks > 0);
}

// ---------------------------------------------------------------------------
// Naming uniqueness
// ---------------------------------------------------------------------------

#[test]
fn signal_names_are_unique() {
    init();
    each_netlist(|nl| {
        let mut seen = HashSet::new();
        for sig in nl.signals.iter() {
            assert!(seen.insert(sig.name.clone()), "duplicate {}", sig.name);
            assert!(sig.width >= 1);
        }
    });
}
