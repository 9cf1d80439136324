//! The phase-driven generation state machine.

use crate::phase::Phase;
use crate::rng::SeededRng;
use crate::schedule;
use dpgen_config::{ConfigError, GeneratorConfig};
use dpgen_ir::{Netlist, OpKind, Operation, OutputBinding, SignalId, SignalRole};
use log::{debug, info};

/// Builds one netlist from a validated configuration.
///
/// Owns the configuration, the seeded random engine, and the growing
/// [`Netlist`]. Each call to [`step`](Self::step) runs the next [`Phase`];
/// a phase runs at most once.
pub struct NetlistGenerator {
    pub(crate) config: GeneratorConfig,
    pub(crate) rng: SeededRng,
    pub(crate) netlist: Netlist,
    next_phase: Option<Phase>,
}

impl NetlistGenerator {
    /// Validates `config` and prepares a generator seeded with `config.seed`.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: SeededRng::new(config.seed),
            netlist: Netlist::new(config.module_name.clone()),
            config,
            next_phase: Some(Phase::FIRST),
        })
    }

    /// The phase the next [`step`](Self::step) will run, or `None` when finished.
    pub fn next_phase(&self) -> Option<Phase> {
        self.next_phase
    }

    /// The netlist built so far.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Runs the next phase and returns it, or `None` if every phase has run.
    pub fn step(&mut self) -> Option<Phase> {
        let phase = self.next_phase?;
        match phase {
            Phase::Inputs => self.generate_inputs(),
            Phase::Outputs => self.generate_outputs(),
            Phase::Datapath => self.generate_datapath(),
            Phase::Pipeline => schedule::assign_stages(
                &mut self.netlist.operations,
                self.config.num_pipeline_stages,
                self.config.max_depth,
            ),
            Phase::ControlBlocks => self.generate_control_blocks(),
            Phase::ConnectOutputs => self.connect_outputs(),
            Phase::DepthAssignment => {
                schedule::assign_depths(&mut self.netlist.operations, self.config.max_depth)
            }
        }
        debug!("finished phase: {phase}");
        self.next_phase = phase.next(self.config.num_pipeline_stages > 0);
        Some(phase)
    }

    /// Runs every remaining phase and returns the finished netlist.
    pub fn run(mut self) -> Netlist {
        while self.step().is_some() {}
        info!(
            "generated {} operations, {} control blocks, {} signals",
            self.netlist.operations.len(),
            self.netlist.control_blocks.len(),
            self.netlist.signals.len()
        );
        self.netlist
    }

    fn generate_inputs(&mut self) {
        for _ in 0..self.config.num_inputs {
            let width = self.input_width();
            let signed = self.random_signedness();
            self.netlist.signals.create(SignalRole::Input, width, signed);
        }
    }

    fn generate_outputs(&mut self) {
        for _ in 0..self.config.num_outputs {
            let width = self
                .rng
                .int_in(self.config.output_width_min, self.config.output_width_max);
            let signed = self.random_signedness();
            self.netlist.signals.create(SignalRole::Output, width, signed);
        }
    }

    /// Binds each output to a randomly chosen input or wire.
    ///
    /// The source width is not matched to the output width.
    fn connect_outputs(&mut self) {
        let available = self.available_signals();
        let outputs = self.netlist.outputs().to_vec();
        for output in outputs {
            if let Some(source) = self.rng.pick(&available) {
                self.netlist
                    .output_bindings
                    .push(OutputBinding { output, source });
            }
        }
    }

    /// Operand pool: every input, then every wire created so far.
    pub(crate) fn available_signals(&self) -> Vec<SignalId> {
        let mut pool = self.netlist.inputs().to_vec();
        pool.extend_from_slice(self.netlist.wires());
        pool
    }

    /// Width drawn from the input range; also used for registers.
    pub(crate) fn input_width(&mut self) -> u32 {
        self.rng
            .int_in(self.config.input_width_min, self.config.input_width_max)
    }

    /// Signed with probability 0.5 when signed values are allowed.
    pub(crate) fn random_signedness(&mut self) -> bool {
        self.config.use_signed && self.rng.chance(0.5)
    }

    /// Creates an operation whose output wire is sized by the kind's shape rule.
    ///
    /// The output wire is created after every operand, so operands always
    /// precede the value they feed.
    pub(crate) fn build_op(&mut self, kind: OpKind, inputs: Vec<SignalId>) -> Option<Operation> {
        let shapes: Vec<_> = inputs
            .iter()
            .map(|&id| self.netlist.signal(id).shape())
            .collect();
        let shape = kind.output_shape(&shapes, 0)?;
        let output = self
            .netlist
            .signals
            .create(SignalRole::Wire, shape.width, shape.signed);
        Some(Operation::new(kind, output, inputs))
    }
}
