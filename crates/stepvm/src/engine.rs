//! The slice of the execution engine that the debugger drives.
//!
//! Instruction dispatch, script loading and metering live in the engine itself. The
//! debugger only needs to read and nudge the run state, inspect the invocation stack,
//! and ask for exactly one instruction to be executed.

use crate::state::VmState;

/// A call frame on the engine's invocation stack.
pub trait ExecutionContext {
    /// Identity of the script this frame is executing, compared by content.
    fn script_hash(&self) -> &[u8];

    /// Offset of the next instruction to execute within the script.
    fn instruction_pointer(&self) -> u32;
}

/// Execution engine contract consumed by [`Debugger`](crate::Debugger).
///
/// Implementations must treat [`execute_next`](Self::execute_next) as atomic: the debugger
/// never observes a half-executed instruction.
pub trait ExecutionEngine {
    /// Frame type returned by [`current_context`](Self::current_context).
    type Context: ExecutionContext;

    /// Current run state.
    fn state(&self) -> VmState;

    /// Overwrites the run state.
    ///
    /// The debugger only calls this with `None` or `Break`.
    fn set_state(&mut self, state: VmState);

    /// Number of frames on the invocation stack.
    fn invocation_depth(&self) -> usize;

    /// Top frame of the invocation stack, `None` when the stack is empty.
    fn current_context(&self) -> Option<&Self::Context>;

    /// Executes exactly one instruction. May move the state to any value.
    fn execute_next(&mut self);
}
