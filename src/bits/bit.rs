//! Single binary digit.
//!
//! A bit holds one of two values, 0 or 1. The variants are named `O` and
//! `I` so that a row of them reads like the register it came from.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A single binary digit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    /// Zero (0)
    #[default]
    O = 0,
    /// One (1)
    I = 1,
}

impl Bit {
    /// Both bit values in order: O, I
    pub const ALL: [Bit; 2] = [Bit::O, Bit::I];

    /// Take the least significant bit of a word.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        if value & 1 == 1 { Bit::I } else { Bit::O }
    }

    /// Numeric value, 0 or 1.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Numeric value widened to a word.
    #[inline]
    pub const fn to_u64(self) -> u64 {
        self as u64
    }

    #[inline]
    pub const fn is_set(self) -> bool {
        matches!(self, Bit::I)
    }

    /// Binary digit character, '0' or '1'.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Bit::O => '0',
            Bit::I => '1',
        }
    }
}

impl fmt::Debug for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bit::O => write!(f, "O"),
            Bit::I => write!(f, "I"),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl From<Bit> for u64 {
    fn from(bit: Bit) -> Self {
        bit.to_u64()
    }
}
