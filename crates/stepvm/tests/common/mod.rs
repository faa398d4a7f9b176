//! Deterministic engine used to drive the debugger in integration tests.
//!
//! Programs are lists of scripts; script 0 is the entry point. Each frame's instruction
//! pointer is the offset of the *next* instruction, so a breakpoint at offset `n` pauses
//! after instruction `n - 1` has executed and before instruction `n` runs.
#![allow(dead_code, reason = "each test binary uses a different subset of these helpers")]

use stepvm::{ExecutionContext, ExecutionEngine, VmState};

/// One instruction of a test script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Nop,
    /// Calls the script with this index, starting at its offset 0.
    Call(usize),
    Ret,
    Fault,
}

#[derive(Debug, Clone)]
pub struct Script {
    pub hash: Vec<u8>,
    pub ops: Vec<Op>,
}

pub fn script(hash: &[u8], ops: Vec<Op>) -> Script {
    Script {
        hash: hash.to_vec(),
        ops,
    }
}

/// `len - 1` no-ops followed by a return.
pub fn straight_line(hash: &[u8], len: usize) -> Script {
    let mut ops = vec![Op::Nop; len - 1];
    ops.push(Op::Ret);
    script(hash, ops)
}

#[derive(Debug, Clone)]
pub struct Frame {
    script: usize,
    hash: Vec<u8>,
    ip: u32,
}

impl ExecutionContext for Frame {
    fn script_hash(&self) -> &[u8] {
        &self.hash
    }

    fn instruction_pointer(&self) -> u32 {
        self.ip
    }
}

#[derive(Debug)]
pub struct ScriptedEngine {
    scripts: Vec<Script>,
    frames: Vec<Frame>,
    state: VmState,
    executed: usize,
}

impl ScriptedEngine {
    /// Loads `scripts[0]` as the entry frame.
    pub fn new(scripts: Vec<Script>) -> Self {
        let entry = Frame {
            script: 0,
            hash: scripts[0].hash.clone(),
            ip: 0,
        };
        Self {
            scripts,
            frames: vec![entry],
            state: VmState::None,
            executed: 0,
        }
    }

    /// Number of instructions executed so far.
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Instruction pointer of the top frame, if any.
    pub fn ip(&self) -> Option<u32> {
        self.frames.last().map(|frame| frame.ip)
    }

    fn push_frame(&mut self, script: usize) {
        self.frames.push(Frame {
            script,
            hash: self.scripts[script].hash.clone(),
            ip: 0,
        });
    }

    fn pop_frame(&mut self) {
        self.frames.pop();
        if self.frames.is_empty() {
            self.state = VmState::Halt;
        }
    }
}

impl ExecutionEngine for ScriptedEngine {
    type Context = Frame;

    fn state(&self) -> VmState {
        self.state
    }

    fn set_state(&mut self, state: VmState) {
        self.state = state;
    }

    fn invocation_depth(&self) -> usize {
        self.frames.len()
    }

    fn current_context(&self) -> Option<&Frame> {
        self.frames.last()
    }

    fn execute_next(&mut self) {
        let Some(frame) = self.frames.last_mut() else {
            self.state = VmState::Halt;
            return;
        };
        self.executed += 1;
        // running off the end of a script behaves like an explicit return
        let op = self.scripts[frame.script]
            .ops
            .get(frame.ip as usize)
            .copied()
            .unwrap_or(Op::Ret);
        frame.ip += 1;
        match op {
            Op::Nop => {}
            Op::Call(target) => self.push_frame(target),
            Op::Ret => self.pop_frame(),
            Op::Fault => self.state = VmState::Fault,
        }
    }
}
