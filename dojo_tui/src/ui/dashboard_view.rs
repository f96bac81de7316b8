//! Progress dashboard, lit only around the lamp

use super::{bar_text, stat_line};
use crate::app::{App, BACK_BUTTON, LAMP_RADIUS};
use dojo_core::{effects::lamp_visibility, Point, SkillId, EXP_THRESHOLD};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_WIDTH: u16 = 34;
const CARD_HEIGHT: u16 = 7;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    app.dashboard_area.set(area);

    let stats = &app.stats;
    let cards: [(Point, &str, Vec<Line<'static>>); 4] = [
        (
            Point::new(25.0, 22.0),
            " Character ",
            vec![
                stat_line("Name", &stats.name),
                stat_line("Level", stats.level),
                stat_line("Experience", format!("{}/{}", stats.experience, EXP_THRESHOLD)),
                Line::from(bar_text(stats.experience as f64, EXP_THRESHOLD as f64, 24)),
                stat_line("Skill points", stats.skill_points),
            ],
        ),
        (
            Point::new(75.0, 22.0),
            " Battle Stats ",
            vec![
                stat_line("Health", stats.health),
                stat_line("Attack", stats.attack),
                stat_line("Agility", stats.agility),
                stat_line("Defense", stats.defense),
            ],
        ),
        (
            Point::new(25.0, 65.0),
            " Training ",
            vec![
                stat_line("Completed", stats.training_completed),
                stat_line("Skills learned", stats.skills_learned()),
            ],
        ),
        (
            Point::new(75.0, 65.0),
            " Skills ",
            vec![
                stat_line("Jump Height", stats.skill_level(SkillId::JUMP_HEIGHT)),
                stat_line("Punch Power", stats.skill_level(SkillId::PUNCH_POWER)),
                stat_line("Dodge Chance", stats.skill_level(SkillId::DODGE_CHANCE)),
                stat_line("Inner Peace", stats.skill_level(SkillId::INNER_PEACE)),
            ],
        ),
    ];

    f.render_widget(Block::default().borders(Borders::ALL).title(" Progress "), area);

    for (center, title, lines) in cards {
        let visibility = lamp_visibility(app.lamp, center, LAMP_RADIUS * 1.5);
        let Some(color) = shade(visibility) else {
            continue;
        };
        let rect = place(area, center, CARD_WIDTH, CARD_HEIGHT);
        let card = Paragraph::new(lines)
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            );
        f.render_widget(card, rect);
    }

    let back_visibility = lamp_visibility(app.lamp, BACK_BUTTON, LAMP_RADIUS);
    if let Some(color) = shade(back_visibility) {
        let label = if app.lamp_on_back_button() { "[Enter] Back" } else { "Back" };
        let rect = place(area, BACK_BUTTON, 15, 1);
        f.render_widget(
            Paragraph::new(Span::styled(label, Style::default().fg(color))),
            rect,
        );
    }

    let lamp = place(area, app.lamp, 1, 1);
    f.render_widget(
        Paragraph::new(Span::styled("◉", Style::default().fg(Color::LightYellow))),
        lamp,
    );
}

/// Text color for a visibility level; None when fully dark
fn shade(visibility: f64) -> Option<Color> {
    if visibility <= 0.05 {
        None
    } else if visibility < 0.35 {
        Some(Color::DarkGray)
    } else if visibility < 0.7 {
        Some(Color::Gray)
    } else {
        Some(Color::White)
    }
}

/// A `width` x `height` rect centered on a point given in percent of `area`
fn place(area: Rect, center: Point, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let cx = area.x as f64 + center.x / 100.0 * area.width as f64;
    let cy = area.y as f64 + center.y / 100.0 * area.height as f64;

    let max_x = area.right().saturating_sub(width);
    let max_y = area.bottom().saturating_sub(height);
    let x = ((cx - width as f64 / 2.0).max(area.x as f64) as u16).min(max_x);
    let y = ((cy - height as f64 / 2.0).max(area.y as f64) as u16).min(max_y);
    Rect::new(x, y, width, height)
}
