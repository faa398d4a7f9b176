//! Debugger tracing infrastructure.
//!
//! The [`Debugger`](crate::Debugger) carries its tracer as a type parameter, so with the
//! default [`NoopTracer`] every hook is monomorphized away and stepping costs nothing
//! extra.
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | Zero-cost no-op (default) |
//! | [`StderrTracer`] | Human-readable stepping log to stderr |
//! | [`LogTracer`] | Structured `tracing` events for hosts with a subscriber installed |
//! | [`RecordingTracer`] | Full event recording for post-mortem analysis |
//!
//! ```ignore
//! let mut debugger = Debugger::with_tracer(engine, RecordingTracer::new());
//! debugger.run();
//! for event in debugger.tracer().events() { /* ... */ }
//! ```

use std::fmt;

use crate::state::VmState;

/// Event emitted while the debugger drives the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent {
    /// The debugger executed one instruction.
    Step {
        /// Invocation stack depth after the instruction.
        depth: usize,
        /// Engine state after the instruction.
        state: VmState,
    },
    /// Execution stopped at a registered breakpoint.
    BreakpointHit { script_hash: Vec<u8>, offset: u32 },
    /// The debugger forced a `None`/`Break` transition.
    StateChange { from: VmState, to: VmState },
    BreakpointAdded { script_hash: Vec<u8>, offset: u32 },
    BreakpointRemoved { script_hash: Vec<u8>, offset: u32 },
}

/// Trait for debugger tracing.
///
/// All methods default to no-ops; implementations override only the hooks they need.
pub trait DebugTracer: fmt::Debug {
    /// Called after every instruction the debugger executes.
    ///
    /// This is the hottest hook. `step_into` calls it once, `run` once per instruction.
    #[inline(always)]
    fn on_step(&mut self, _depth: usize, _state: VmState) {}

    /// Called when the breakpoint check forces a pause.
    #[inline(always)]
    fn on_breakpoint_hit(&mut self, _script_hash: &[u8], _offset: u32) {}

    /// Called whenever the debugger itself changes the engine state.
    ///
    /// `from` and `to` are always `None` and `Break` in some order.
    #[inline(always)]
    fn on_state_change(&mut self, _from: VmState, _to: VmState) {}

    /// Called when a breakpoint is newly registered. Re-adding an existing one is silent.
    #[inline(always)]
    fn on_breakpoint_added(&mut self, _script_hash: &[u8], _offset: u32) {}

    /// Called when a registered breakpoint is removed.
    #[inline(always)]
    fn on_breakpoint_removed(&mut self, _script_hash: &[u8], _offset: u32) {}
}

/// Lowercase hex rendering of a script hash.
struct Hex<'a>(&'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// ============================================================================
// NoopTracer — zero-cost default
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl DebugTracer for NoopTracer {}

// ============================================================================
// StderrTracer — human-readable stepping log
// ============================================================================

/// Tracer that prints a stepping log to stderr.
///
/// ```text
/// step  depth=1  state=NONE
/// step  depth=2  state=NONE
///   !!! BREAK 0xa1b2c3@3
///   ... NONE -> BREAK
/// ```
#[derive(Debug, Default)]
pub struct StderrTracer {
    /// Maximum number of steps to log before going quiet. None = unlimited.
    limit: Option<usize>,
    count: usize,
    stopped: bool,
}

impl StderrTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracer that stops logging after `limit` steps.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}

impl DebugTracer for StderrTracer {
    #[inline]
    fn on_step(&mut self, depth: usize, state: VmState) {
        if self.stopped {
            return;
        }
        eprintln!("step  depth={depth}  state={state}");
        self.count += 1;
        if let Some(limit) = self.limit
            && self.count >= limit
        {
            eprintln!("--- trace limit reached ({limit} steps) ---");
            self.stopped = true;
        }
    }

    fn on_breakpoint_hit(&mut self, script_hash: &[u8], offset: u32) {
        if self.stopped {
            return;
        }
        eprintln!("  !!! BREAK 0x{}@{offset}", Hex(script_hash));
    }

    fn on_state_change(&mut self, from: VmState, to: VmState) {
        if self.stopped {
            return;
        }
        eprintln!("  ... {from} -> {to}");
    }

    fn on_breakpoint_added(&mut self, script_hash: &[u8], offset: u32) {
        eprintln!("  +++ breakpoint 0x{}@{offset}", Hex(script_hash));
    }

    fn on_breakpoint_removed(&mut self, script_hash: &[u8], offset: u32) {
        eprintln!("  --- breakpoint 0x{}@{offset}", Hex(script_hash));
    }
}

// ============================================================================
// LogTracer — structured `tracing` events
// ============================================================================

/// Tracer that forwards every hook to the `tracing` crate.
///
/// Steps are emitted at `TRACE`, breakpoint hits and breakpoint edits at `DEBUG`. Nothing
/// is printed unless the host installs a subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl DebugTracer for LogTracer {
    #[inline]
    fn on_step(&mut self, depth: usize, state: VmState) {
        tracing::trace!(depth, %state, "step");
    }

    fn on_breakpoint_hit(&mut self, script_hash: &[u8], offset: u32) {
        tracing::debug!(script_hash = %Hex(script_hash), offset, "breakpoint hit");
    }

    fn on_state_change(&mut self, from: VmState, to: VmState) {
        tracing::trace!(%from, %to, "state forced");
    }

    fn on_breakpoint_added(&mut self, script_hash: &[u8], offset: u32) {
        tracing::debug!(script_hash = %Hex(script_hash), offset, "breakpoint added");
    }

    fn on_breakpoint_removed(&mut self, script_hash: &[u8], offset: u32) {
        tracing::debug!(script_hash = %Hex(script_hash), offset, "breakpoint removed");
    }
}

// ============================================================================
// RecordingTracer — full event recording
// ============================================================================

/// Tracer that records every event in order.
///
/// Allocates per event; use it for tests and for short debugging sessions.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<DebugEvent>,
    /// Optional limit on number of events recorded.
    limit: Option<usize>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recording tracer that stops recording after `limit` events.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::with_capacity(limit.min(1024)),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn events(&self) -> &[DebugEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<DebugEvent> {
        self.events
    }

    /// Number of `Step` events recorded, i.e. instructions executed through the debugger.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DebugEvent::Step { .. }))
            .count()
    }

    fn push(&mut self, event: DebugEvent) {
        if self.limit.is_some_and(|l| self.events.len() >= l) {
            return;
        }
        self.events.push(event);
    }
}

impl DebugTracer for RecordingTracer {
    #[inline]
    fn on_step(&mut self, depth: usize, state: VmState) {
        self.push(DebugEvent::Step { depth, state });
    }

    fn on_breakpoint_hit(&mut self, script_hash: &[u8], offset: u32) {
        self.push(DebugEvent::BreakpointHit {
            script_hash: script_hash.to_vec(),
            offset,
        });
    }

    fn on_state_change(&mut self, from: VmState, to: VmState) {
        self.push(DebugEvent::StateChange { from, to });
    }

    fn on_breakpoint_added(&mut self, script_hash: &[u8], offset: u32) {
        self.push(DebugEvent::BreakpointAdded {
            script_hash: script_hash.to_vec(),
            offset,
        });
    }

    fn on_breakpoint_removed(&mut self, script_hash: &[u8], offset: u32) {
        self.push(DebugEvent::BreakpointRemoved {
            script_hash: script_hash.to_vec(),
            offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_tracer_goes_quiet_after_limit() {
        let mut tracer = StderrTracer::with_limit(2);
        tracer.on_step(1, VmState::None);
        assert!(!tracer.stopped);
        tracer.on_step(1, VmState::None);
        assert!(tracer.stopped);
        tracer.on_step(2, VmState::None);
        tracer.on_breakpoint_hit(b"\xa1\xb2", 3);
        assert_eq!(tracer.count, 2);
    }

    #[test]
    fn unlimited_stderr_tracer_never_stops() {
        let mut tracer = StderrTracer::new();
        for depth in 0..100 {
            tracer.on_step(depth, VmState::None);
        }
        tracer.on_state_change(VmState::None, VmState::Break);
        assert!(!tracer.stopped);
        assert_eq!(tracer.count, 100);
    }

    #[test]
    fn script_hashes_render_as_lowercase_hex() {
        assert_eq!(Hex(&[0xA1, 0x0B, 0xFF]).to_string(), "a10bff");
        assert_eq!(Hex(&[]).to_string(), "");
    }

    #[test]
    fn recording_tracer_respects_limit() {
        let mut tracer = RecordingTracer::with_limit(1);
        tracer.on_breakpoint_added(b"a", 1);
        tracer.on_breakpoint_removed(b"a", 1);
        assert_eq!(
            tracer.into_events(),
            vec![DebugEvent::BreakpointAdded {
                script_hash: b"a".to_vec(),
                offset: 1,
            }]
        );
    }
}
