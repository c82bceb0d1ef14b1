//! WebAssembly bindings for the shift register stepper.
//!
//! This module provides JavaScript-friendly wrappers around the core stepper.

use wasm_bindgen::prelude::*;
use crate::{ShiftRegister, Stepper};
use crate::bits::format_binary;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly register wrapper.
#[wasm_bindgen]
pub struct WasmRegister {
    stepper: Stepper,
}

#[wasm_bindgen]
impl WasmRegister {
    /// Create a register. Throws if the value does not fit in `width` bits.
    #[wasm_bindgen(constructor)]
    pub fn new(initial: u64, width: u32) -> Result<WasmRegister, JsError> {
        let register = ShiftRegister::try_new(initial, width)
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(Self { stepper: Stepper::new(register) })
    }

    /// Create a register from a binary literal such as "0b1011010".
    #[wasm_bindgen]
    pub fn parse(text: &str) -> Result<WasmRegister, JsError> {
        let register: ShiftRegister = text.parse()
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(Self { stepper: Stepper::new(register) })
    }

    /// Step once. Returns the bit shifted out (0 or 1).
    #[wasm_bindgen]
    pub fn step(&mut self) -> u8 {
        self.stepper.step().output.to_u8()
    }

    /// Step until drained or `limit` steps. Returns steps executed.
    #[wasm_bindgen]
    pub fn run_until_drained(&mut self, limit: u32) -> u64 {
        self.stepper.run_until_drained(limit as u64)
    }

    /// The bit the next step will shift out.
    #[wasm_bindgen]
    pub fn output(&self) -> u8 {
        self.stepper.register().current_output().to_u8()
    }

    #[wasm_bindgen]
    pub fn value(&self) -> u64 {
        self.stepper.register().value()
    }

    #[wasm_bindgen]
    pub fn width(&self) -> u32 {
        self.stepper.register().width()
    }

    /// Register as a `0b`-prefixed string.
    #[wasm_bindgen]
    pub fn binary(&self) -> String {
        format!("{}", self.stepper.register())
    }

    #[wasm_bindgen]
    pub fn cycles(&self) -> u64 {
        self.stepper.cycles()
    }

    #[wasm_bindgen]
    pub fn is_drained(&self) -> bool {
        self.stepper.is_drained()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.stepper.reset();
    }

    /// Output bits collected so far, in shift-out order.
    #[wasm_bindgen]
    pub fn output_bits(&self) -> js_sys::Uint8Array {
        let bits: Vec<u8> = self.stepper.history().iter().map(|r| r.output.to_u8()).collect();
        js_sys::Uint8Array::from(bits.as_slice())
    }

    /// Get the trace as JSON string.
    #[wasm_bindgen]
    pub fn trace_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.stepper.trace())
            .map_err(|e| JsError::new(&format!("{}", e)))
    }
}

/// Format a value as a `0b`-prefixed binary string of `width` digits.
/// Throws if `width` is outside 1..=64 or `value` does not fit.
#[wasm_bindgen]
pub fn wasm_format_binary(value: u64, width: u32) -> Result<String, JsError> {
    let register = ShiftRegister::try_new(value, width)
        .map_err(|e| JsError::new(&format!("{}", e)))?;
    Ok(format_binary(register.value(), register.width()))
}
