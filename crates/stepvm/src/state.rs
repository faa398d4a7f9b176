/// Run state of the execution engine as observed (and partially controlled) by the debugger.
///
/// The engine owns `Halt` and `Fault`; the debugger only ever moves the state between
/// `None` and `Break`.
///
/// | Operation    | Entry state        | Effect before stepping | Stops when                         |
/// |--------------|--------------------|------------------------|------------------------------------|
/// | `run`        | any                | `Break` → `None`       | state ≠ `None`                     |
/// | `step_into`  | `Halt`/`Fault`     | returns immediately    | -                                  |
/// | `step_into`  | `None`/`Break`     | none                   | after one instruction              |
/// | `step_out`   | any                | `Break` → `None`       | state ≠ `None` or depth < entry    |
/// | `step_over`  | `Halt`/`Fault`     | returns immediately    | -                                  |
/// | `step_over`  | `None`/`Break`     | forced to `None`       | state ≠ `None` or depth ≤ entry    |
///
/// Every stepping operation except `run` converts a final `None` into `Break`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString, serde::Serialize, serde::Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum VmState {
    /// Runnable: the engine will execute the next instruction when asked.
    #[default]
    None,
    /// Terminated successfully.
    Halt,
    /// Terminated with an error.
    Fault,
    /// Paused by the debugger between two instructions.
    Break,
}

impl VmState {
    /// Returns true for the engine-owned terminal states `Halt` and `Fault`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Halt | Self::Fault)
    }
}
