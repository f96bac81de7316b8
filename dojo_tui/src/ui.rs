//! UI rendering

mod dashboard_view;
mod door_view;
mod help_view;
mod selection_view;
mod skills_view;
mod training_view;

use crate::app::App;
use dojo_core::Route;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Route bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_routes(f, app, chunks[0]);

    match app.route() {
        Route::Entry => door_view::draw(f, app, chunks[1]),
        Route::Selection => selection_view::draw(f, app, chunks[1]),
        Route::Training => training_view::draw(f, app, chunks[1]),
        Route::Skills => skills_view::draw(f, app, chunks[1]),
        Route::Dashboard => dashboard_view::draw(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);

    if app.show_help {
        let popup = centered_rect(70, 80, f.area());
        help_view::draw(f, app, popup);
    }
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = if app.is_typing() {
        vec![("Esc", "Leave game"), ("Ctrl+C", "Quit")]
    } else {
        vec![("?", "Help"), ("q", "Quit")]
    };

    let route_keys: Vec<(&str, &str)> = match app.route() {
        Route::Entry => vec![
            ("↑/↓", "Slider"),
            ("←/→", "±1"),
            ("+/-", "±10"),
            ("Enter", "Push"),
        ],
        Route::Selection => vec![("←/→", "Choose"), ("Enter", "Select")],
        Route::Training if app.is_typing() => vec![
            ("Enter/Space", "Submit word"),
            ("1-9", "Tap mantra"),
        ],
        Route::Training => vec![
            ("1", "Typing"),
            ("2", "Jumping"),
            ("Space", "Jump"),
            ("Enter", "Claim"),
            ("s", "Skills"),
            ("p", "Progress"),
        ],
        Route::Skills => vec![
            ("↑/↓", "Select skill"),
            ("Enter", "Upgrade"),
            ("t", "Training"),
            ("p", "Progress"),
        ],
        Route::Dashboard => vec![("←↑↓→/mouse", "Move lamp"), ("Enter", "Back button")],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in route_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !route_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let text = app.status.clone().unwrap_or_default();
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::LightMagenta),
    )));
    f.render_widget(paragraph, area);
}

fn draw_routes(f: &mut Frame, app: &App, area: Rect) {
    let current = app.route();
    let titles: Vec<Line> = Route::all()
        .iter()
        .map(|r| {
            let style = if *r == current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(r.name(), style))
        })
        .collect();

    let selected = Route::all().iter().position(|r| *r == current).unwrap_or(0);
    let title = format!(" DuskDojo {} ", current.path());
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("›");

    f.render_widget(tabs, area);
}

pub fn bar_text(current: f64, max: f64, width: u16) -> String {
    let percent = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (percent * width as f64) as usize;
    let empty = (width as usize).saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

pub fn stat_line(name: &str, value: impl std::fmt::Display) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:20}", name),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            value.to_string(),
            Style::default().fg(Color::White),
        ),
    ])
}

pub fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

/// A rectangle of the given percentage size in the middle of `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_text_clamps() {
        assert_eq!(bar_text(5.0, 10.0, 4), "██░░");
        assert_eq!(bar_text(20.0, 10.0, 3), "███");
        assert_eq!(bar_text(1.0, 0.0, 2), "░░");
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 25);
        assert_eq!(popup.x, 25);
    }
}
