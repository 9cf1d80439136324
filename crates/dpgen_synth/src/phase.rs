//! Generation phases, in the only order they may run.

use std::fmt;

/// One step of the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Create the input ports.
    Inputs,
    /// Create the output ports.
    Outputs,
    /// Fill the configured operation slots.
    Datapath,
    /// Bucket datapath operations into pipeline stages.
    Pipeline,
    /// Case statements, if-else chains, then sharing groups.
    ControlBlocks,
    /// Bind every output port to a source.
    ConnectOutputs,
    /// Tag operations with their construction-order depth.
    DepthAssignment,
}

impl Phase {
    /// The first phase of every run.
    pub const FIRST: Phase = Phase::Inputs;

    /// The phase after `self`, or `None` once the run is complete.
    ///
    /// `pipelined` is `true` when the configuration asks for at least one
    /// pipeline stage; otherwise [`Phase::Pipeline`] is skipped.
    pub fn next(self, pipelined: bool) -> Option<Phase> {
        match self {
            Phase::Inputs => Some(Phase::Outputs),
            Phase::Outputs => Some(Phase::Datapath),
            Phase::Datapath if pipelined => Some(Phase::Pipeline),
            Phase::Datapath | Phase::Pipeline => Some(Phase::ControlBlocks),
            Phase::ControlBlocks => Some(Phase::ConnectOutputs),
            Phase::ConnectOutputs => Some(Phase::DepthAssignment),
            Phase::DepthAssignment => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Inputs => "inputs",
            Phase::Outputs => "outputs",
            Phase::Datapath => "datapath",
            Phase::Pipeline => "pipeline",
            Phase::ControlBlocks => "control blocks",
            Phase::ConnectOutputs => "connect outputs",
            Phase::DepthAssignment => "depth assignment",
        };
        f.write_str(name)
    }
}
