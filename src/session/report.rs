//! Text lines printed by the command-line front end.

use crate::bits::format_binary;
use crate::register::{ShiftRegister, StepRecord};

/// A `"<label>: 0b…"` line, padded to the register width.
pub fn labelled(label: &str, value: u64, width: u32) -> String {
    format!("{}: {}", label, format_binary(value, width))
}

/// Initial state, output bit and state after one shift.
///
/// The register is taken by value; the caller's copy is not stepped.
pub fn show_lines(mut register: ShiftRegister) -> [String; 3] {
    let width = register.width();
    let initial = labelled("Initial state", register.value(), width);
    let output = labelled("Output", register.current_output().to_u64(), width);
    let state = register.step();
    [initial, output, labelled("State", state, width)]
}

/// One line of a run listing, e.g. `001: out 0  state 0b0101101`.
pub fn step_line(record: &StepRecord, width: u32) -> String {
    format!("{:03}: out {}  state {}", record.cycle, record.output, format_binary(record.state, width))
}
