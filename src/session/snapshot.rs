//! Snapshot files for stepper sessions.
//!
//! A snapshot is the serialized [`Stepper`]: current register, initial
//! register, cycle count and trace, stored as pretty-printed JSON.

use std::path::Path;
use thiserror::Error;
use tracing::info;
use crate::register::{HistoryError, RegisterError, Stepper};

/// Save a stepper session to disk.
pub fn save_snapshot<P: AsRef<Path>>(path: P, stepper: &Stepper) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(stepper)
        .map_err(|e| SnapshotError::Json(e.to_string()))?;
    std::fs::write(path.as_ref(), json)
        .map_err(|e| SnapshotError::Io(e.to_string()))?;

    info!(path = %path.as_ref().display(), cycles = stepper.cycles(), "snapshot saved");
    Ok(())
}

/// Load a stepper session from disk.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Stepper, SnapshotError> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| SnapshotError::Io(e.to_string()))?;
    let stepper = snapshot_from_str(&text)?;

    info!(path = %path.as_ref().display(), cycles = stepper.cycles(), "snapshot loaded");
    Ok(stepper)
}

/// Decode a snapshot from JSON text, checking both registers and that the
/// trace matches what stepping the initial register produces.
pub fn snapshot_from_str(text: &str) -> Result<Stepper, SnapshotError> {
    let stepper: Stepper = serde_json::from_str(text)
        .map_err(|e| SnapshotError::Json(e.to_string()))?;

    stepper.register().validate()?;
    stepper.initial().validate()?;
    if stepper.register().width() != stepper.initial().width() {
        return Err(SnapshotError::WidthMismatch {
            register: stepper.register().width(),
            initial: stepper.initial().width(),
        });
    }
    stepper.check_history()?;

    Ok(stepper)
}

/// Errors that can occur during snapshot operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("invalid register in snapshot: {0}")]
    Invalid(#[from] RegisterError),

    #[error("register width {register} does not match initial width {initial}")]
    WidthMismatch { register: u32, initial: u32 },

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(#[from] HistoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::ShiftRegister;

    #[test]
    fn test_snapshot_file_roundtrip() {
        let mut stepper = Stepper::new(ShiftRegister::new(0b1011010, 7));
        stepper.run(2);

        let path = std::env::temp_dir().join(format!("lfsr-snapshot-{}.json", std::process::id()));
        save_snapshot(&path, &stepper).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, stepper);
        assert_eq!(loaded.register().value(), 0b0010110);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut stepper = Stepper::new(ShiftRegister::new(90, 7));
        stepper.step();
        let value: serde_json::Value = serde_json::to_value(&stepper).unwrap();

        assert_eq!(value["register"]["value"], 45);
        assert_eq!(value["initial"]["value"], 90);
        assert_eq!(value["cycles"], 1);
        assert_eq!(value["trace"][0]["output"], "O");
    }

    #[test]
    fn test_snapshot_rejects_out_of_range_register() {
        let text = r#"{
            "register": {"value": 200, "width": 7},
            "initial": {"value": 90, "width": 7},
            "cycles": 0,
            "trace": []
        }"#;
        assert_eq!(
            snapshot_from_str(text),
            Err(SnapshotError::Invalid(RegisterError::OutOfRange { value: 200, width: 7 }))
        );
    }

    #[test]
    fn test_snapshot_rejects_width_mismatch() {
        let text = r#"{
            "register": {"value": 1, "width": 3},
            "initial": {"value": 90, "width": 7},
            "cycles": 0,
            "trace": []
        }"#;
        assert!(matches!(
            snapshot_from_str(text),
            Err(SnapshotError::WidthMismatch { register: 3, initial: 7 })
        ));
    }

    #[test]
    fn test_snapshot_rejects_register_not_derived_from_initial() {
        let text = r#"{
            "register": {"value": 127, "width": 7},
            "initial": {"value": 1, "width": 7},
            "cycles": 0,
            "trace": []
        }"#;
        assert_eq!(
            snapshot_from_str(text),
            Err(SnapshotError::Inconsistent(HistoryError::Register {
                cycles: 0,
                expected: 1,
                found: 127,
            }))
        );
    }

    #[test]
    fn test_snapshot_rejects_trace_longer_than_cycles() {
        let text = r#"{
            "register": {"value": 1, "width": 7},
            "initial": {"value": 1, "width": 7},
            "cycles": 0,
            "trace": [{"cycle": 5, "output": "I", "state": 0}]
        }"#;
        assert_eq!(
            snapshot_from_str(text),
            Err(SnapshotError::Inconsistent(HistoryError::LengthMismatch { cycles: 0, records: 1 }))
        );
    }

    #[test]
    fn test_snapshot_rejects_out_of_order_cycles() {
        let text = r#"{
            "register": {"value": 22, "width": 7},
            "initial": {"value": 90, "width": 7},
            "cycles": 2,
            "trace": [
                {"cycle": 2, "output": "O", "state": 45},
                {"cycle": 1, "output": "I", "state": 22}
            ]
        }"#;
        assert_eq!(
            snapshot_from_str(text),
            Err(SnapshotError::Inconsistent(HistoryError::CycleOrder { index: 0, expected: 1, found: 2 }))
        );
    }

    #[test]
    fn test_snapshot_rejects_tampered_record() {
        let text = r#"{
            "register": {"value": 22, "width": 7},
            "initial": {"value": 90, "width": 7},
            "cycles": 2,
            "trace": [
                {"cycle": 1, "output": "I", "state": 45},
                {"cycle": 2, "output": "I", "state": 22}
            ]
        }"#;
        assert!(matches!(
            snapshot_from_str(text),
            Err(SnapshotError::Inconsistent(HistoryError::Output { cycle: 1, .. }))
        ));
    }

    #[test]
    fn test_resumed_snapshot_keeps_cycle_numbering() {
        let mut stepper = Stepper::new(ShiftRegister::new(0b1011010, 7));
        stepper.run(3);
        let text = serde_json::to_string(&stepper).unwrap();

        let mut resumed = snapshot_from_str(&text).unwrap();
        resumed.run(2);

        let cycles: Vec<u64> = resumed.history().iter().map(|r| r.cycle).collect();
        assert_eq!(cycles, vec![1, 2, 3, 4, 5]);
        assert_eq!(resumed.check_history(), Ok(()));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_snapshot("/nonexistent/lfsr/snapshot.json");
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }
}
