//! Shift register emulation.
//!
//! - [`ShiftRegister`] - fixed-width value with the read/shift step
//! - [`Stepper`] - cycle counter and output trace around a register

pub mod shift;
pub mod stepper;

pub use shift::{ShiftRegister, RegisterError};
pub use stepper::{Stepper, StepperState, StepRecord, Trace, HistoryError, MAX_RUN_STEPS};
