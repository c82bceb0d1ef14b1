//! LFSR Step - CLI Entry Point
//!
//! Commands:
//! - `lfsr-step` - Print the initial state, output bit and shifted state
//! - `lfsr-step show` - Same, for a chosen register
//! - `lfsr-step run` - Step a register and print the trace
//! - `lfsr-step resume <snapshot>` - Continue a saved session
//! - `lfsr-step debug` - Interactive viewer
//! - `lfsr-step test` - Built-in self-test

use clap::{Args, Parser, Subcommand};
use std::path::Path;
use lfsr::{format_binary, show_lines, step_line, Config, ShiftRegister, Stepper};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lfsr-step")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "A fixed-width binary shift register stepper")]
struct Cli {
    /// Enable debug logging (per-step events on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Register selection shared by several commands.
#[derive(Args, Clone, Default)]
struct RegisterArgs {
    /// Initial value as a binary literal, e.g. 0b1011010
    #[arg(short, long)]
    initial: Option<String>,
    /// Register width in bits (default: number of digits in --initial)
    #[arg(short, long)]
    width: Option<u32>,
    /// JSON config file with initial/width/steps
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print initial state, output bit and state after one shift
    Show {
        #[command(flatten)]
        register: RegisterArgs,
    },
    /// Step a register and print every step
    Run {
        #[command(flatten)]
        register: RegisterArgs,
        /// Number of steps (default: from config, or 1; at most 2^20)
        #[arg(short, long)]
        steps: Option<u64>,
        /// Step until the register is zero (at most `width` steps)
        #[arg(short, long)]
        until_drained: bool,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
        /// Save the session to a snapshot file
        #[arg(long)]
        save: Option<String>,
    },
    /// Continue a saved session and write it back
    Resume {
        /// Path to the snapshot file
        snapshot: String,
        /// Number of steps to run (at most 2^20)
        #[arg(short, long, default_value = "1")]
        steps: u64,
    },
    /// Interactive register viewer
    Debug {
        #[command(flatten)]
        register: RegisterArgs,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Show { register }) => {
            let (_, reg) = resolve_register(&register);
            show_step(reg);
        }
        Some(Commands::Run { register, steps, until_drained, json, save }) => {
            let (config, reg) = resolve_register(&register);
            let steps = checked_steps(steps.unwrap_or(config.steps));
            run_register(reg, steps, until_drained, json, save);
        }
        Some(Commands::Resume { snapshot, steps }) => {
            resume_snapshot(&snapshot, checked_steps(steps));
        }
        Some(Commands::Debug { register }) => {
            let (_, reg) = resolve_register(&register);
            debug_register(reg);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            let (_, reg) = resolve_register(&RegisterArgs::default());
            show_step(reg);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the register from defaults, config file and flags, in that order.
fn resolve_register(args: &RegisterArgs) -> (Config, ShiftRegister) {
    let path = args.config.as_deref().map(Path::new);
    let resolved = Config::resolve(path, args.initial.as_deref(), args.width)
        .and_then(|config| config.register().map(|reg| (config, reg)));
    match resolved {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("❌ Invalid register: {}", e);
            std::process::exit(1);
        }
    }
}

fn checked_steps(steps: u64) -> u64 {
    match Config::check_steps(steps) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn show_step(reg: ShiftRegister) {
    for line in show_lines(reg) {
        println!("{}", line);
    }
}

fn print_steps(stepper: &Stepper, from: usize) {
    let width = stepper.register().width();
    for record in &stepper.history()[from..] {
        println!("{}", step_line(record, width));
    }
}

fn run_register(reg: ShiftRegister, steps: u64, until_drained: bool, json: bool, save: Option<String>) {
    let mut stepper = Stepper::new(reg);

    if until_drained {
        stepper.run_until_drained(reg.width() as u64);
    } else {
        stepper.run(steps);
    }

    if json {
        match serde_json::to_string_pretty(&stepper.trace()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to encode trace: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("Initial state: {}", reg);
        print_steps(&stepper, 0);
        println!("Output stream: {}", stepper.trace().output_string());
    }

    if let Some(path) = save {
        if let Err(e) = lfsr::save_snapshot(&path, &stepper) {
            eprintln!("❌ Failed to save snapshot: {}", e);
            std::process::exit(1);
        }
    }
}

fn resume_snapshot(path: &str, steps: u64) {
    let mut stepper = match lfsr::load_snapshot(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("❌ Failed to load snapshot: {}", e);
            std::process::exit(1);
        }
    };

    let from = stepper.history().len();
    println!("Resuming at cycle {}: {}", stepper.cycles(), stepper.register());
    stepper.run(steps);
    print_steps(&stepper, from);

    if let Err(e) = lfsr::save_snapshot(path, &stepper) {
        eprintln!("❌ Failed to save snapshot: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "tui")]
fn debug_register(reg: ShiftRegister) {
    if let Err(e) = lfsr::run_viewer(reg) {
        eprintln!("❌ Viewer error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn debug_register(_reg: ShiftRegister) {
    eprintln!("❌ Built without the `tui` feature");
    std::process::exit(1);
}

fn run_self_test() {
    use lfsr::Bit;

    println!("━━━ Shift Register Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Output is the low bit
    print!("Output is initial & 1... ");
    let ok = [(0u64, 1u32), (1, 1), (90, 7), (91, 7), (u64::MAX, 64)]
        .iter()
        .all(|&(v, w)| ShiftRegister::new(v, w).current_output().to_u64() == v & 1);
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: After a step the output is the old bit 1
    print!("Step exposes bit 1... ");
    let ok = [(0b10u64, 2u32), (0b01, 2), (90, 7), (45, 7)].iter().all(|&(v, w)| {
        let mut reg = ShiftRegister::new(v, w);
        reg.step();
        reg.current_output().to_u64() == (v >> 1) & 1
    });
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 3: Width steps drain the register
    print!("Width shifts reach zero... ");
    let ok = [(ShiftRegister::mask(7), 7u32), (ShiftRegister::mask(64), 64), (5, 3)]
        .iter()
        .all(|&(v, w)| {
            let mut stepper = Stepper::new(ShiftRegister::new(v, w));
            stepper.run(w as u64);
            stepper.register().is_zero()
        });
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 4: Formatting width
    print!("Binary format width... ");
    let text = format_binary(45, 7);
    if text == "0b0101101" {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {}, expected 0b0101101)", text);
        failed += 1;
    }

    // Test 5: Classic example
    print!("0b1011010 steps to 0b0101101... ");
    let mut reg = ShiftRegister::new(0b1011010, 7);
    let out = reg.current_output();
    let state = reg.step();
    if out == Bit::O && state == 45 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got output {}, state {})", out, state);
        failed += 1;
    }

    // Test 6: Three-bit drain sequence
    print!("0b101 drains as 2, 1, 0... ");
    let mut stepper = Stepper::new(ShiftRegister::new(0b101, 3));
    let states: Vec<u64> = stepper.run(3).iter().map(|r| r.state).collect();
    if states == [2, 1, 0] {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got {:?})", states);
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
