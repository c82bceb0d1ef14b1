//! # LFSR Step
//!
//! A fixed-width binary shift register. Each step reads the least
//! significant bit as the output and shifts the register right by one,
//! filling the top with zero.
//!
//! No feedback taps are applied: the register drains to zero after at most
//! `width` steps.

pub mod bits;
pub mod register;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use bits::{Bit, format_binary, parse_binary, ParseError};
pub use register::{ShiftRegister, RegisterError, Stepper, StepperState, StepRecord, Trace, HistoryError, MAX_RUN_STEPS};
pub use session::{Config, ConfigError, SnapshotError, load_snapshot, save_snapshot, show_lines, step_line};

#[cfg(feature = "tui")]
pub use tui::run_viewer;
