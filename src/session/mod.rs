//! Persistent session data and front-end output.
//!
//! This module provides:
//! - JSON snapshots of a stepper (save, load, resume)
//! - Run configuration with file and flag overrides
//! - The text lines printed for a register and its steps

pub mod config;
pub mod report;
pub mod snapshot;

pub use config::{Config, ConfigError};
pub use report::{show_lines, step_line};
pub use snapshot::{load_snapshot, save_snapshot, SnapshotError};
