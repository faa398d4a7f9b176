#![doc = include_str!("../../../README.md")]

mod breakpoints;
mod debugger;
mod engine;
mod error;
mod limits;
mod state;
pub mod tracer;
pub mod types;

pub use crate::{
    breakpoints::Breakpoints,
    debugger::Debugger,
    engine::{ExecutionContext, ExecutionEngine},
    error::{CoercionTarget, StackItemError},
    limits::DebuggerLimits,
    state::VmState,
    tracer::{DebugEvent, DebugTracer, LogTracer, NoopTracer, RecordingTracer, StderrTracer},
    types::{ByteString, Integer, InteropInterface, InteropObject, Pointer, StackItem, StackItemType},
};
