//! Help overlay

use super::section_header;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        section_header("Navigation"),
        key_line("t / s / p", "Training, Skill Tree, Progress"),
        key_line("↑/k  ↓/j  ←/h  →/l", "Move selection"),
        key_line("Esc", "Close popups, leave a game"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section_header("Gate"),
        key_line("↑/↓", "Pick force or distance"),
        key_line("←/→  +/-", "Adjust by 1 or 10"),
        key_line("Enter / Space", "Push the door"),
        Line::from(""),
        section_header("Training"),
        key_line("1 / 2", "Typing dojo / obstacle jumping"),
        key_line("Enter / Space", "Submit word"),
        key_line("Space", "Jump"),
        key_line("1-9", "Tap mantra points when idle"),
        Line::from(""),
        section_header("Progression"),
        Line::from(format!(
            "  Every {} EXP becomes a skill point.",
            dojo_core::EXP_THRESHOLD
        )),
        Line::from(format!(
            "  Each Jump Height level: +{:.0}% jump height, +{:.0}% jump time.",
            app.config.obstacle.jump_height_bonus * 100.0,
            app.config.obstacle.jump_duration_penalty * 100.0
        )),
        Line::from("  The progress room is dark. Move the lamp with arrows or the mouse."),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
