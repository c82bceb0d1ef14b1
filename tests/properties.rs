//! Property-based tests for the shift register step.
//!
//! Covers output extraction, the shift rule, draining and binary formatting
//! over arbitrary widths and in-range values.

use lfsr::{format_binary, parse_binary, Bit, ShiftRegister, Stepper};
use proptest::prelude::*;

/// Generate a width in 1..=64 and a value that fits in it.
fn arb_register() -> impl Strategy<Value = (u64, u32)> {
    (1_u32..=64).prop_flat_map(|width| {
        (0..=ShiftRegister::mask(width), Just(width))
    })
}

proptest! {
    /// A fresh register outputs the low bit of its initial value.
    #[test]
    fn test_output_is_low_bit((value, width) in arb_register()) {
        let reg = ShiftRegister::new(value, width);
        prop_assert_eq!(reg.current_output().to_u64(), value & 1);
    }

    /// After one step the output is bit 1 of the pre-step value.
    #[test]
    fn test_step_exposes_second_bit((value, width) in arb_register()) {
        let mut reg = ShiftRegister::new(value, width);
        let new_value = reg.step();

        prop_assert_eq!(new_value, value >> 1);
        prop_assert_eq!(reg.current_output(), Bit::from_u64(value >> 1));
    }

    /// Shifting a W-bit register W times always leaves zero.
    #[test]
    fn test_width_steps_drain((value, width) in arb_register()) {
        let mut reg = ShiftRegister::new(value, width);
        for _ in 0..width {
            reg.step();
        }
        prop_assert_eq!(reg.value(), 0);
    }

    /// The value never leaves the register's range while stepping.
    #[test]
    fn test_step_stays_in_range((value, width) in arb_register(), steps in 0_u32..80) {
        let mut reg = ShiftRegister::new(value, width);
        for _ in 0..steps {
            reg.step();
            prop_assert!(reg.validate().is_ok());
            prop_assert!(reg.value() <= value);
        }
    }

    /// Formatting yields exactly `width` digits that spell the value.
    #[test]
    fn test_format_has_width_digits((value, width) in arb_register()) {
        let text = format_binary(value, width);
        let digits = text.strip_prefix("0b").expect("missing 0b marker");

        prop_assert_eq!(digits.len(), width as usize);
        prop_assert!(digits.chars().all(|c| c == '0' || c == '1'));
        prop_assert_eq!(u64::from_str_radix(digits, 2).unwrap(), value);
        prop_assert_eq!(parse_binary(&text), Ok((value, width)));
    }

    /// The stepper's output stream is the value read LSB first.
    #[test]
    fn test_stream_spells_value((value, width) in arb_register()) {
        let mut stepper = Stepper::new(ShiftRegister::new(value, width));
        stepper.run(width as u64);

        let rebuilt = stepper
            .history()
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, r)| acc | (r.output.to_u64() << i));
        prop_assert_eq!(rebuilt, value);
    }

    /// try_new accepts exactly the values below 2^width.
    #[test]
    fn test_try_new_boundary(width in 1_u32..64) {
        let limit = 1u64 << width;
        prop_assert!(ShiftRegister::try_new(limit - 1, width).is_ok());
        prop_assert!(ShiftRegister::try_new(limit, width).is_err());
    }
}

#[test]
fn test_classic_example() {
    let mut reg: ShiftRegister = "0b1011010".parse().unwrap();
    assert_eq!(reg.width(), 7);
    assert_eq!(reg.current_output(), Bit::O);
    assert_eq!(reg.step(), 0b0101101);
    assert_eq!(format!("{}", reg), "0b0101101");
}
