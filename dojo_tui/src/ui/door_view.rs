//! Entry gate view

use super::{bar_text, stat_line};
use crate::app::{App, DoorField};
use dojo_core::DoorState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const DOOR_ART: [&str; 7] = [
    "╔══════════╗",
    "║ ▓▓▓▓▓▓▓▓ ║",
    "║ ▓▓ 道 ▓▓ ║",
    "║ ▓▓▓▓▓▓▓▓ ║",
    "║ ▓▓▓▓▓▓●▓ ║",
    "║ ▓▓▓▓▓▓▓▓ ║",
    "╚══════════╝",
];

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_door(f, app, chunks[0]);
    draw_sliders(f, app, chunks[1]);
}

fn draw_door(f: &mut Frame, app: &App, area: Rect) {
    let (dx, dy, color) = match app.door.state() {
        DoorState::Idle => (0, 0, Color::Rgb(160, 82, 45)),
        DoorState::Shaking { offset } => (offset.0, offset.1, Color::Red),
        DoorState::Open => (0, 0, Color::Yellow),
    };

    let mut lines: Vec<Line> = Vec::new();
    // Vertical shake pushes the door down; negative offsets just pin it to the top
    for _ in 0..(2 + dy.max(-2)) {
        lines.push(Line::from(""));
    }

    let pad = " ".repeat((4 + dx.max(-4)) as usize);
    if app.door.is_open() {
        lines.push(Line::from(Span::styled(
            format!("{}╔══════════╗", pad),
            Style::default().fg(color),
        )));
        for _ in 0..5 {
            lines.push(Line::from(Span::styled(
                format!("{}║    ✦✦    ║", pad),
                Style::default().fg(color),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("{}╚══════════╝", pad),
            Style::default().fg(color),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "The door swings open...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    } else {
        for row in DOOR_ART {
            lines.push(Line::from(Span::styled(
                format!("{}{}", pad, row),
                Style::default().fg(color),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" The Dojo Gate "));

    f.render_widget(paragraph, area);
}

fn draw_sliders(f: &mut Frame, app: &App, area: Rect) {
    let max = app.door.slider_max() as f64;
    let width = area.width.saturating_sub(16).min(40);

    let slider = |label: &str, value: u32, field: DoorField| {
        let selected = app.door_field == field;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected { "► " } else { "  " };
        Line::from(vec![
            Span::styled(format!("{}{:10}", marker, label), style),
            Span::styled(bar_text(value as f64, max, width), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {:3}", value), style),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            "Push the door with just the right torque.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        slider("Force", app.door.force(), DoorField::Force),
        Line::from(""),
        slider("Distance", app.door.distance(), DoorField::Distance),
        Line::from(""),
        stat_line("Torque", app.door.torque()),
        stat_line("Attempts", app.door.attempts()),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Torque = Force × Distance "));

    f.render_widget(paragraph, area);
}
