//! TUI viewer for the shift register.
//!
//! Provides an interactive terminal view with:
//! - Register bits with the output position marked
//! - Scrollable step trace
//! - Step/run/pause/reset controls

mod app;
mod ui;

pub use app::{ViewerApp, run_viewer};
