//! Fixed-width binary shift register.
//!
//! The register holds an unsigned value of `width` bits. Each step reads
//! the least significant bit as the output and shifts the whole value right
//! by one, filling the top with zero. No feedback taps are applied.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::bits::{format_binary, parse_binary, Bit, ParseError, MAX_WIDTH};

/// A fixed-width shift register.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftRegister {
    value: u64,
    width: u32,
}

impl ShiftRegister {
    /// Create a register holding `value`.
    ///
    /// # Panics
    /// Panics if `width` is outside 1..=64 or `value` does not fit in
    /// `width` bits.
    pub fn new(value: u64, width: u32) -> Self {
        assert!(
            (1..=MAX_WIDTH).contains(&width),
            "Width {} out of range for ShiftRegister [1, {}]",
            width, MAX_WIDTH
        );
        assert!(
            value <= Self::mask(width),
            "Value {} out of range for {}-bit ShiftRegister",
            value, width
        );

        Self { value, width }
    }

    /// Create a register, rejecting values that do not fit.
    pub fn try_new(value: u64, width: u32) -> Result<Self, RegisterError> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(RegisterError::InvalidWidth(width));
        }
        if value > Self::mask(width) {
            return Err(RegisterError::OutOfRange { value, width });
        }
        Ok(Self { value, width })
    }

    /// All-ones mask for a register of `width` bits.
    #[inline]
    pub const fn mask(width: u32) -> u64 {
        if width >= MAX_WIDTH {
            u64::MAX
        } else {
            (1u64 << width) - 1
        }
    }

    /// Current stored value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Bit width, fixed for the register's lifetime.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// The bit that the next step shifts out.
    #[inline]
    pub const fn current_output(&self) -> Bit {
        Bit::from_u64(self.value & 1)
    }

    /// Shift right by one position, zero-filling the top.
    /// Returns the new value.
    #[inline]
    pub fn step(&mut self) -> u64 {
        self.value >>= 1;
        self.value
    }

    /// Get a single bit by index (0 = LSB).
    ///
    /// # Panics
    /// Panics if `index` is not below the width.
    pub fn bit(&self, index: u32) -> Bit {
        assert!(index < self.width, "Bit index {} out of range (0-{})", index, self.width - 1);
        Bit::from_u64(self.value >> index)
    }

    /// All bits, least significant first.
    pub fn bits(&self) -> Vec<Bit> {
        (0..self.width).map(|i| Bit::from_u64(self.value >> i)).collect()
    }

    /// Check the range invariant, for values that arrive from outside
    /// (deserialized snapshots, JS callers).
    pub fn validate(&self) -> Result<(), RegisterError> {
        Self::try_new(self.value, self.width).map(|_| ())
    }
}

impl fmt::Debug for ShiftRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShiftRegister({} = {})", format_binary(self.value, self.width), self.value)
    }
}

impl fmt::Display for ShiftRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_binary(self.value, self.width))
    }
}

impl FromStr for ShiftRegister {
    type Err = RegisterError;

    /// Parse `0b1011010` as a 7-bit register holding 90.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, width) = parse_binary(s)?;
        Self::try_new(value, width)
    }
}

/// Errors raised when a register is built from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("value {value} does not fit in {width} bits")]
    OutOfRange { value: u64, width: u32 },

    #[error("width {0} out of range (1-64)")]
    InvalidWidth(u32),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}
