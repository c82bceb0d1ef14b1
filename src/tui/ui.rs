//! UI rendering for the viewer.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::{Bit, StepperState};
use crate::bits::format_binary;
use super::app::ViewerApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &ViewerApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(frame.area());

    // Left side: register and status
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    draw_register(frame, left_chunks[0], app);
    draw_status(frame, left_chunks[1], app);

    // Right side: trace and help
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    draw_trace(frame, right_chunks[0], app);
    draw_help(frame, right_chunks[1]);
}

/// Draw the register bits, MSB on the left, with the output bit marked.
fn draw_register(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let reg = app.stepper.register();

    let mut cells: Vec<Span> = vec![Span::raw("0b ")];
    for bit in reg.bits().iter().rev() {
        cells.push(Span::styled(format!("{} ", bit), bit_style(*bit)));
    }

    let content = vec![
        Line::from(cells),
        Line::from(vec![
            Span::raw(" ".repeat(3 + 2 * (reg.width() as usize - 1))),
            Span::styled("^ out", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Value: "),
            Span::styled(format!("{}", reg.value()), Style::default().fg(Color::White)),
            Span::raw("   Width: "),
            Span::styled(format!("{}", reg.width()), Style::default().fg(Color::White)),
            Span::raw("   Initial: "),
            Span::raw(format!("{}", app.stepper.initial())),
        ]),
        Line::from(vec![
            Span::raw("Cycles: "),
            Span::styled(format!("{}", app.stepper.cycles()), Style::default().fg(Color::Cyan)),
            Span::raw("   State: "),
            Span::styled(format!("{:?}", app.stepper.state()),
                match app.stepper.state() {
                    StepperState::Running => Style::default().fg(Color::Green),
                    StepperState::Drained => Style::default().fg(Color::Red),
                }),
        ]),
        Line::from(vec![
            Span::raw("Output stream: "),
            Span::styled(app.output_stream(), Style::default().fg(Color::Yellow)),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Register ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw the step trace.
fn draw_trace(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let width = app.stepper.register().width();
    let history = app.stepper.history();
    let last = history.len().checked_sub(1);

    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .skip(app.trace_scroll)
        .map(|(idx, record)| {
            let text = format!(
                "{:03}: out {}  {}",
                record.cycle,
                record.output,
                format_binary(record.state, width)
            );

            let style = if Some(idx) == last {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if record.output.is_set() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Trace ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)));

    frame.render_widget(list, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("s: Step  r: Run  p: Pause  x: Reset"),
        Line::from("↑↓: Scroll trace  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Get color style for a bit.
fn bit_style(b: Bit) -> Style {
    match b {
        Bit::O => Style::default().fg(Color::Gray),
        Bit::I => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    }
}
