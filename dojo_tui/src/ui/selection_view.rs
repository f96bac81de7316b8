//! Warrior selection view

use super::centered_rect;
use crate::app::App;
use dojo_core::selection::REAL_WARRIOR;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        "Choose your warrior",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(heading, chunks[0]);

    draw_cards(f, app, chunks[1]);

    if let Some(notice) = app.selection.notice() {
        let popup = centered_rect(50, 30, area);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] OK",
                Style::default().fg(Color::Yellow),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Taken "),
            );
        f.render_widget(Clear, popup);
        f.render_widget(paragraph, popup);
    }
}

fn draw_cards(f: &mut Frame, app: &App, area: Rect) {
    let count = app.card_count();
    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Ratio(1, count as u32))
        .collect();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let decoys = app.selection.decoys();
    for (i, slot) in slots.iter().enumerate() {
        let selected = i == app.selected_card;
        let border = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let (title, body) = match decoys.get(i) {
            Some(warrior) if app.selection.is_attempted(warrior.id) => (
                warrior.display_name,
                Span::styled("TAKEN", Style::default().fg(Color::Red)),
            ),
            Some(warrior) => (
                warrior.display_name,
                Span::styled("?", Style::default().fg(Color::Gray)),
            ),
            None => (
                REAL_WARRIOR.display_name,
                Span::styled(
                    "🐼 Still free!",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ),
        };

        let card = Paragraph::new(vec![Line::from(""), Line::from(body)])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", title)),
            );
        f.render_widget(card, *slot);
    }
}
