//! Stepping engine for a shift register.
//!
//! Owns a register, counts cycles and keeps a trace of every bit that was
//! shifted out.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};
use crate::bits::{format_binary, Bit};
use crate::register::ShiftRegister;

/// Stepper execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepperState {
    /// Register still holds set bits.
    Running,
    /// Register is zero; every further step outputs 0.
    Drained,
}

/// One executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Cycle number, starting at 1.
    pub cycle: u64,
    /// Bit shifted out on this cycle.
    pub output: Bit,
    /// Register value after the shift.
    pub state: u64,
}

/// A finished run, suitable for printing or serializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub width: u32,
    pub initial: u64,
    pub steps: Vec<StepRecord>,
}

impl Trace {
    /// The serial output stream, in the order the bits left the register.
    pub fn output_bits(&self) -> Vec<Bit> {
        self.steps.iter().map(|s| s.output).collect()
    }

    /// Output stream as a digit string, e.g. `"0101101"`.
    pub fn output_string(&self) -> String {
        self.steps.iter().map(|s| s.output.to_char()).collect()
    }
}

/// Most steps a single run may request; each step keeps a trace record.
pub const MAX_RUN_STEPS: u64 = 1 << 20;

/// Value held by a register started at `initial` after `steps` shifts.
fn shifted(initial: u64, steps: u64) -> u64 {
    u32::try_from(steps)
        .ok()
        .and_then(|s| initial.checked_shr(s))
        .unwrap_or(0)
}

/// The shift register stepper.
///
/// Invariants kept by `step` and `reset`: the trace holds one record per
/// cycle, numbered 1..=cycles, and the register equals the initial value
/// shifted right `cycles` times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stepper {
    /// Register being stepped.
    register: ShiftRegister,
    /// Register as it was before the first step (restored by `reset`).
    initial: ShiftRegister,
    /// Number of steps executed.
    cycles: u64,
    trace: Vec<StepRecord>,
}

impl Stepper {
    pub fn new(register: ShiftRegister) -> Self {
        Self {
            register,
            initial: register,
            cycles: 0,
            trace: Vec::new(),
        }
    }

    /// Restore the initial register and clear the trace.
    pub fn reset(&mut self) {
        self.register = self.initial;
        self.cycles = 0;
        self.trace.clear();
        info!(register = %self.register, "stepper reset");
    }

    /// Execute a single step.
    ///
    /// Reads the output bit, shifts, and records the result.
    pub fn step(&mut self) -> StepRecord {
        let output = self.register.current_output();
        let state = self.register.step();
        self.cycles += 1;

        let record = StepRecord { cycle: self.cycles, output, state };
        debug!(
            cycle = record.cycle,
            output = %record.output,
            state = %format_binary(state, self.register.width()),
            "step"
        );
        self.trace.push(record);
        record
    }

    /// Execute exactly `count` steps. Returns the records of this run.
    pub fn run(&mut self, count: u64) -> &[StepRecord] {
        let start = self.trace.len();
        for _ in 0..count {
            self.step();
        }
        &self.trace[start..]
    }

    /// Step until the register drains or `limit` steps have run.
    ///
    /// Returns the number of steps executed.
    pub fn run_until_drained(&mut self, limit: u64) -> u64 {
        let start_cycles = self.cycles;

        while !self.is_drained() && self.cycles - start_cycles < limit {
            self.step();
        }

        let executed = self.cycles - start_cycles;
        info!(executed, drained = self.is_drained(), "run finished");
        executed
    }

    pub fn state(&self) -> StepperState {
        if self.register.is_zero() {
            StepperState::Drained
        } else {
            StepperState::Running
        }
    }

    #[inline]
    pub fn is_drained(&self) -> bool {
        self.state() == StepperState::Drained
    }

    pub fn register(&self) -> &ShiftRegister {
        &self.register
    }

    /// Number of steps executed since creation or the last reset.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn initial(&self) -> &ShiftRegister {
        &self.initial
    }

    /// Every step executed since creation or the last reset.
    pub fn history(&self) -> &[StepRecord] {
        &self.trace
    }

    /// Last executed step (for display).
    pub fn last_step(&self) -> Option<&StepRecord> {
        self.trace.last()
    }

    /// Snapshot the history as a [`Trace`].
    pub fn trace(&self) -> Trace {
        Trace {
            width: self.initial.width(),
            initial: self.initial.value(),
            steps: self.trace.clone(),
        }
    }

    /// Check that the history could have been produced by stepping the
    /// initial register. Needed for stepper state that was deserialized.
    pub fn check_history(&self) -> Result<(), HistoryError> {
        if self.trace.len() as u64 != self.cycles {
            return Err(HistoryError::LengthMismatch {
                cycles: self.cycles,
                records: self.trace.len(),
            });
        }

        let initial = self.initial.value();
        for (index, record) in self.trace.iter().enumerate() {
            let before = index as u64;
            let cycle = before + 1;
            if record.cycle != cycle {
                return Err(HistoryError::CycleOrder { index, expected: cycle, found: record.cycle });
            }

            let output = Bit::from_u64(shifted(initial, before));
            if record.output != output {
                return Err(HistoryError::Output { cycle, expected: output, found: record.output });
            }

            let state = shifted(initial, cycle);
            if record.state != state {
                return Err(HistoryError::State { cycle, expected: state, found: record.state });
            }
        }

        let expected = shifted(initial, self.cycles);
        if self.register.value() != expected {
            return Err(HistoryError::Register {
                cycles: self.cycles,
                expected,
                found: self.register.value(),
            });
        }

        Ok(())
    }
}

/// A stepper history that stepping the initial register cannot produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("{records} trace records for {cycles} cycles")]
    LengthMismatch { cycles: u64, records: usize },

    #[error("trace record {index} has cycle {found}, expected {expected}")]
    CycleOrder { index: usize, expected: u64, found: u64 },

    #[error("cycle {cycle} records output {found}, expected {expected}")]
    Output { cycle: u64, expected: Bit, found: Bit },

    #[error("cycle {cycle} records state {found}, expected {expected}")]
    State { cycle: u64, expected: u64, found: u64 },

    #[error("register holds {found} after {cycles} cycles, expected {expected}")]
    Register { cycles: u64, expected: u64, found: u64 },
}
