//! Binary digit primitives.
//!
//! This module provides:
//! - [`Bit`] - A single binary digit (0, 1)
//! - [`format_binary`] / [`parse_binary`] - `0b`-prefixed fixed-width text

mod bit;
mod format;

pub use bit::Bit;
pub use format::{format_binary, parse_binary, ParseError, MAX_WIDTH};
