//! End-to-end checks of the `lfsr-step` binary.

use std::process::Command;

fn lfsr_step(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lfsr-step"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to start lfsr-step")
}

#[test]
fn test_no_command_prints_classic_example() {
    let out = lfsr_step(&[]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Initial state: 0b1011010\nOutput: 0b0000000\nState: 0b0101101\n"
    );
}

#[test]
fn test_show_with_flags() {
    let out = lfsr_step(&["show", "--initial", "0b101", "--width", "4"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Initial state: 0b0101\nOutput: 0b0001\nState: 0b0010\n"
    );
}

#[test]
fn test_run_rejects_huge_step_count() {
    let out = lfsr_step(&["run", "--steps", "10000000000"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_invalid_register_fails() {
    let out = lfsr_step(&["show", "--initial", "0b1111", "--width", "2"]);
    assert!(!out.status.success());
}
