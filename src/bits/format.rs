//! Binary text helpers.
//!
//! Registers are printed the way a `{:#0Nb}` format would print them: a
//! `0b` marker followed by exactly `width` digits, MSB first.

use std::fmt;
use crate::bits::Bit;

/// Widest register the crate can hold.
pub const MAX_WIDTH: u32 = u64::BITS;

/// Render `value` in base 2, zero-padded on the left to `width` digits and
/// prefixed with `0b`.
///
/// ```
/// assert_eq!(lfsr::format_binary(45, 7), "0b0101101");
/// ```
pub fn format_binary(value: u64, width: u32) -> String {
    format!("0b{:0width$b}", value, width = width as usize)
}

/// Parse a binary literal such as `0b1011010` or `1011_010`.
///
/// Returns the value together with its width, which is the number of
/// digits written (leading zeros count).
pub fn parse_binary(s: &str) -> Result<(u64, u32), ParseError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0b")
        .or_else(|| s.strip_prefix("0B"))
        .unwrap_or(s);

    let mut value: u64 = 0;
    let mut width: u32 = 0;

    for c in s.chars() {
        let bit = match c {
            '0' => Bit::O,
            '1' => Bit::I,
            '_' => continue,
            _ => return Err(ParseError::InvalidChar(c)),
        };
        width += 1;
        if width > MAX_WIDTH {
            let got = s.chars().filter(|c| matches!(c, '0' | '1')).count();
            return Err(ParseError::TooWide { max: MAX_WIDTH, got });
        }
        value = (value << 1) | bit.to_u64();
    }

    if width == 0 {
        return Err(ParseError::Empty);
    }

    Ok((value, width))
}

/// Errors that can occur when parsing binary strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No digits after the optional prefix.
    Empty,
    /// An invalid character was encountered.
    InvalidChar(char),
    /// More digits than a register can hold.
    TooWide { max: u32, got: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no binary digits"),
            ParseError::InvalidChar(c) => {
                write!(f, "invalid bit character: '{}' (expected 0 or 1)", c)
            }
            ParseError::TooWide { max, got } => {
                write!(f, "expected at most {} bits, got {}", max, got)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_width() {
        assert_eq!(format_binary(0b1011010, 7), "0b1011010");
        assert_eq!(format_binary(0, 7), "0b0000000");
        assert_eq!(format_binary(45, 7), "0b0101101");
        assert_eq!(format_binary(1, 3), "0b001");
    }

    #[test]
    fn test_format_display_width_nine() {
        // Same output as a `{:#09b}` format: nine characters total.
        let text = format_binary(0b1011010, 7);
        assert_eq!(text.len(), 9);
    }

    #[test]
    fn test_format_full_width() {
        let text = format_binary(u64::MAX, 64);
        assert_eq!(text.len(), 66);
        assert!(text[2..].chars().all(|c| c == '1'));
    }

    #[test]
    fn test_parse_with_prefix() {
        assert_eq!(parse_binary("0b1011010"), Ok((90, 7)));
        assert_eq!(parse_binary("0B101"), Ok((5, 3)));
    }

    #[test]
    fn test_parse_keeps_leading_zeros_in_width() {
        assert_eq!(parse_binary("0b0101101"), Ok((45, 7)));
        assert_eq!(parse_binary("000"), Ok((0, 3)));
    }

    #[test]
    fn test_parse_separators() {
        assert_eq!(parse_binary("1011_010"), Ok((90, 7)));
        assert_eq!(parse_binary(" 0b1_0_1 "), Ok((5, 3)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_binary(""), Err(ParseError::Empty));
        assert_eq!(parse_binary("0b"), Err(ParseError::Empty));
        assert_eq!(parse_binary("0b___"), Err(ParseError::Empty));
        assert_eq!(parse_binary("0b102"), Err(ParseError::InvalidChar('2')));
        assert_eq!(parse_binary("0x1f"), Err(ParseError::InvalidChar('x')));

        let wide = "1".repeat(65);
        assert_eq!(
            parse_binary(&wide),
            Err(ParseError::TooWide { max: 64, got: 65 })
        );
    }

    #[test]
    fn test_too_wide_counts_only_digits() {
        let text = format!("{}xyz", "1".repeat(66));
        assert_eq!(
            parse_binary(&text),
            Err(ParseError::TooWide { max: 64, got: 66 })
        );
    }

    #[test]
    fn test_parse_accepts_max_width() {
        let full = "1".repeat(64);
        assert_eq!(parse_binary(&full), Ok((u64::MAX, 64)));
    }

    #[test]
    fn test_format_parse_agree() {
        for (value, width) in [(0u64, 1u32), (5, 3), (90, 7), (45, 9)] {
            assert_eq!(parse_binary(&format_binary(value, width)), Ok((value, width)));
        }
    }
}
