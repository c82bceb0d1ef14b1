//! Viewer application state and logic.

use crate::{ShiftRegister, Stepper};
use crate::bits::format_binary;

/// Steps executed per tick while running continuously.
const STEPS_PER_TICK: u64 = 1;

/// Viewer application state.
pub struct ViewerApp {
    /// The stepper being viewed.
    pub stepper: Stepper,
    /// Is the viewer running continuously?
    pub running: bool,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    /// Trace view scroll offset.
    pub trace_scroll: usize,
}

impl ViewerApp {
    pub fn new(register: ShiftRegister) -> Self {
        Self {
            stepper: Stepper::new(register),
            running: false,
            should_quit: false,
            status: "Ready. Press 's' to step, 'r' to run, 'q' to quit.".into(),
            trace_scroll: 0,
        }
    }

    /// Step one cycle.
    pub fn step(&mut self) {
        let record = self.stepper.step();
        let width = self.stepper.register().width();
        self.status = format!(
            "Cycle {}: output {}  state {}",
            record.cycle,
            record.output,
            format_binary(record.state, width)
        );
    }

    /// Run until the register drains.
    pub fn run(&mut self) {
        if self.stepper.is_drained() {
            self.status = "Register is drained. Press 'x' to reset.".into();
            return;
        }
        self.running = true;
        self.status = "Running...".into();
    }

    /// Run one iteration of continuous stepping.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        if self.stepper.is_drained() {
            self.running = false;
            self.status = format!("Drained after {} cycles", self.stepper.cycles());
            return;
        }

        for _ in 0..STEPS_PER_TICK {
            self.step();
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.status = "Paused.".into();
    }

    /// Reset the register to its initial value.
    pub fn reset(&mut self) {
        self.stepper.reset();
        self.running = false;
        self.trace_scroll = 0;
        self.status = "Reset. Ready.".into();
    }

    pub fn scroll_up(&mut self) {
        self.trace_scroll = self.trace_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.trace_scroll + 1 < self.stepper.history().len() {
            self.trace_scroll += 1;
        }
    }

    /// Collected output bits as a digit string.
    pub fn output_stream(&self) -> String {
        self.stepper.history().iter().map(|r| r.output.to_char()).collect()
    }
}

/// Run the viewer on a register.
pub fn run_viewer(register: ShiftRegister) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = ViewerApp::new(register);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('s') => {
                            app.running = false;
                            app.step();
                        }
                        KeyCode::Char('r') => app.run(),
                        KeyCode::Char('p') => app.pause(),
                        KeyCode::Char('x') => app.reset(),
                        KeyCode::Up => app.scroll_up(),
                        KeyCode::Down => app.scroll_down(),
                        _ => {}
                    }
                }
            }
        }

        if app.running {
            app.tick();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
