/// Optional bounds applied by the debugger to a single stepping call.
///
/// All limits are disabled by default, which gives the plain stepping semantics:
/// `run()` keeps executing until the engine halts, faults or hits a breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DebuggerLimits {
    /// Maximum number of instructions a single `run`, `step_out` or `step_over` call may
    /// execute before the debugger pauses with `Break`. `step_into` always executes
    /// exactly one instruction and ignores this.
    pub max_instructions: Option<usize>,
}

impl DebuggerLimits {
    /// Creates limits with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-call instruction budget.
    ///
    /// A budget of zero makes `run` and `step_out` pause without executing anything;
    /// `step_over` still executes its one mandatory instruction.
    #[must_use]
    pub fn max_instructions(mut self, limit: usize) -> Self {
        self.max_instructions = Some(limit);
        self
    }

    /// Returns true once `executed` instructions use up the budget.
    #[must_use]
    pub(crate) fn exhausted(&self, executed: usize) -> bool {
        self.max_instructions.is_some_and(|limit| executed >= limit)
    }
}
