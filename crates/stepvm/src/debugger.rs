//! Instruction-level debugger for the execution engine.
//!
//! The debugger never executes anything on its own. Each public stepping method drives
//! the engine through [`ExecutionEngine::execute_next`] until its stopping condition holds
//! and then hands control back. Pausing is just the engine state being set to
//! [`VmState::Break`] between two instructions.
//!
//! The debugger only moves the engine between `None` and `Break`. `Halt` and `Fault`
//! are reported exactly as the engine produced them.

use crate::{
    breakpoints::Breakpoints,
    engine::{ExecutionContext, ExecutionEngine},
    limits::DebuggerLimits,
    state::VmState,
    tracer::{DebugTracer, NoopTracer},
};

/// Drives an [`ExecutionEngine`] one instruction at a time with breakpoints.
#[derive(Debug)]
pub struct Debugger<E: ExecutionEngine, Tr: DebugTracer = NoopTracer> {
    engine: E,
    breakpoints: Breakpoints,
    limits: DebuggerLimits,
    tracer: Tr,
}

impl<E: ExecutionEngine> Debugger<E> {
    /// Creates a debugger with no breakpoints, no limits and no tracing.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::with_tracer(engine, NoopTracer)
    }
}

impl<E: ExecutionEngine, Tr: DebugTracer> Debugger<E, Tr> {
    /// Creates a debugger that reports every step and breakpoint event to `tracer`.
    #[must_use]
    pub fn with_tracer(engine: E, tracer: Tr) -> Self {
        Self {
            engine,
            breakpoints: Breakpoints::new(),
            limits: DebuggerLimits::default(),
            tracer,
        }
    }

    /// Replaces the per-call limits.
    #[must_use]
    pub fn with_limits(mut self, limits: DebuggerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the breakpoint index, e.g. with one restored via [`Breakpoints::load`].
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Current engine state.
    #[must_use]
    pub fn state(&self) -> VmState {
        self.engine.state()
    }

    /// Shared access to the engine being debugged.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to load another script between runs.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Consumes the debugger and returns the engine.
    #[must_use]
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Registered breakpoints.
    #[must_use]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Per-call limits in effect.
    #[must_use]
    pub fn limits(&self) -> &DebuggerLimits {
        &self.limits
    }

    /// The tracer receiving debugger events.
    #[must_use]
    pub fn tracer(&self) -> &Tr {
        &self.tracer
    }

    /// Registers a breakpoint at `offset` in the script identified by `script_hash`.
    ///
    /// Adding an existing breakpoint has no effect.
    pub fn add_breakpoint(&mut self, script_hash: &[u8], offset: u32) {
        if self.breakpoints.insert(script_hash, offset) {
            self.tracer.on_breakpoint_added(script_hash, offset);
        }
    }

    /// Removes a breakpoint, returning false if it was not registered.
    pub fn remove_breakpoint(&mut self, script_hash: &[u8], offset: u32) -> bool {
        let removed = self.breakpoints.remove(script_hash, offset);
        if removed {
            self.tracer.on_breakpoint_removed(script_hash, offset);
        }
        removed
    }

    /// Resumes execution until the engine halts, faults or reaches a breakpoint.
    ///
    /// A paused engine is resumed first. Returns the state execution stopped in.
    pub fn run(&mut self) -> VmState {
        if self.engine.state() == VmState::Break {
            self.force_state(VmState::None);
        }
        let mut executed = 0;
        while self.engine.state() == VmState::None {
            if self.limits.exhausted(executed) {
                self.force_state(VmState::Break);
                break;
            }
            self.execute_and_check_breakpoints();
            executed += 1;
        }
        self.engine.state()
    }

    /// Executes exactly one instruction and pauses.
    ///
    /// Breakpoints are not consulted. A halted or faulted engine is left untouched.
    pub fn step_into(&mut self) -> VmState {
        if self.engine.state().is_terminal() {
            return self.engine.state();
        }
        self.engine.execute_next();
        self.tracer.on_step(self.engine.invocation_depth(), self.engine.state());
        if self.engine.state() == VmState::None {
            self.force_state(VmState::Break);
        }
        self.engine.state()
    }

    /// Runs until the current frame returns to its caller.
    ///
    /// Stops early on a breakpoint, halt or fault.
    pub fn step_out(&mut self) -> VmState {
        if self.engine.state() == VmState::Break {
            self.force_state(VmState::None);
        }
        let depth = self.engine.invocation_depth();
        let mut executed = 0;
        while self.engine.state() == VmState::None && self.engine.invocation_depth() >= depth {
            if self.limits.exhausted(executed) {
                break;
            }
            self.execute_and_check_breakpoints();
            executed += 1;
        }
        self.pause_if_runnable();
        self.engine.state()
    }

    /// Executes the current instruction and any calls it makes, pausing back at the
    /// current depth.
    ///
    /// Breakpoints inside the called code still interrupt the step. A halted or faulted
    /// engine is left untouched.
    pub fn step_over(&mut self) -> VmState {
        if self.engine.state().is_terminal() {
            return self.engine.state();
        }
        self.force_state(VmState::None);
        let depth = self.engine.invocation_depth();
        let mut executed = 0;
        loop {
            self.execute_and_check_breakpoints();
            executed += 1;
            let deeper = self.engine.invocation_depth() > depth;
            if self.engine.state() != VmState::None || !deeper || self.limits.exhausted(executed) {
                break;
            }
        }
        self.pause_if_runnable();
        self.engine.state()
    }

    /// Executes one instruction, then pauses if it landed on a breakpoint.
    ///
    /// The lookup is skipped entirely while no breakpoint is registered.
    fn execute_and_check_breakpoints(&mut self) {
        self.engine.execute_next();
        let state = self.engine.state();
        self.tracer.on_step(self.engine.invocation_depth(), state);
        if state != VmState::None || self.engine.invocation_depth() == 0 || self.breakpoints.is_empty() {
            return;
        }
        let hit = match self.engine.current_context() {
            Some(context) => {
                let offset = context.instruction_pointer();
                let hit = self.breakpoints.contains(context.script_hash(), offset);
                if hit {
                    self.tracer.on_breakpoint_hit(context.script_hash(), offset);
                }
                hit
            }
            None => false,
        };
        if hit {
            self.force_state(VmState::Break);
        }
    }

    fn pause_if_runnable(&mut self) {
        if self.engine.state() == VmState::None {
            self.force_state(VmState::Break);
        }
    }

    /// Moves the engine between `None` and `Break`, reporting real transitions only.
    fn force_state(&mut self, to: VmState) {
        debug_assert!(!to.is_terminal(), "debugger must not force {to}");
        let from = self.engine.state();
        if from != to {
            self.engine.set_state(to);
            self.tracer.on_state_change(from, to);
        }
    }
}
