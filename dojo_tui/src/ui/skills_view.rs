//! Skill tree view

use super::{section_header, stat_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(area);

    draw_skill_list(f, app, chunks[0]);
    draw_skill_details(f, app, chunks[1]);
}

fn draw_skill_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let style = if i == app.selected_skill {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if i == app.selected_skill { "► " } else { "  " };
            let level = app.stats.skill_level(skill.id.as_str());
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{} {}", prefix, skill.icon, skill.name), style),
                Span::styled(format!("  Lv {}", level), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();

    let title = format!(" Skill Tree ({} points) ", app.stats.skill_points);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}

fn draw_skill_details(f: &mut Frame, app: &App, area: Rect) {
    let Some(skill) = app.skills.get(app.selected_skill) else {
        let empty = Paragraph::new("No skills loaded.")
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(empty, area);
        return;
    };

    let level = app.stats.skill_level(skill.id.as_str());
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", skill.icon, skill.name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        stat_line("Level", level),
        stat_line("Cost", upgrade_cost(skill.cost)),
        Line::from(""),
        Line::from(vec![
            Span::styled("+ ", Style::default().fg(Color::Green)),
            Span::styled(skill.benefit.clone(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("- ", Style::default().fg(Color::Red)),
            Span::styled(skill.drawback.clone(), Style::default().fg(Color::Red)),
        ]),
    ];

    if !skill.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            skill.description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(section_header("Upgrade"));
    if app.stats.skill_points > 0 {
        lines.push(Line::from(Span::styled(
            match skill.cost {
                Some(cost) => format!("[Enter] UPGRADE ({} EXP)", cost),
                None => "[Enter] Spend 1 skill point".to_string(),
            },
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Train to earn skill points (one per 300 EXP).",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Details "));

    f.render_widget(paragraph, area);
}

fn upgrade_cost(cost: Option<u32>) -> String {
    match cost {
        Some(cost) => format!("{} EXP", cost),
        None => "-".to_string(),
    }
}
