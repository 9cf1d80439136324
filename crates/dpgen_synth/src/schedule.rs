//! Depth and pipeline-stage heuristics.
//!
//! Depth is the operation's construction index modulo `max_depth`. It is a
//! tag for downstream tools, not the length of the longest operand path:
//! an operation reading a wire built just before it can carry a smaller
//! depth than its producer. Stages bucket that depth linearly into
//! `stages` bins.

use dpgen_ir::Operation;

/// Construction-order depth of the operation at `index`.
pub(crate) fn heuristic_depth(index: usize, max_depth: u32) -> u32 {
    (index as u64 % u64::from(max_depth)) as u32
}

/// Stage bucket of a depth: `depth * stages / max_depth`, rounded down.
pub(crate) fn stage_for_depth(depth: u32, stages: u32, max_depth: u32) -> u32 {
    (u64::from(depth) * u64::from(stages) / u64::from(max_depth)) as u32
}

/// Tags every operation with its heuristic depth.
pub(crate) fn assign_depths(operations: &mut [Operation], max_depth: u32) {
    for (index, op) in operations.iter_mut().enumerate() {
        op.depth = heuristic_depth(index, max_depth);
    }
}

/// Buckets every operation into a pipeline stage.
///
/// Runs before depth tags are written, so the stage is computed from the
/// depth the operation's index will receive.
pub(crate) fn assign_stages(operations: &mut [Operation], stages: u32, max_depth: u32) {
    for (index, op) in operations.iter_mut().enumerate() {
        op.stage = stage_for_depth(heuristic_depth(index, max_depth), stages, max_depth);
    }
}
