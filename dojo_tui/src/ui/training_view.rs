//! Training hall view: game picker, typing dojo, obstacle course, summary

use super::{bar_text, section_header, stat_line};
use crate::app::App;
use dojo_core::training::{GameKind, ObstacleCourse, ObstacleKind, TrainingPhase, TrainingSummary, TypingGame};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const LANE_ROWS: usize = 8;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    match app.training.phase() {
        TrainingPhase::Selection => draw_menu(f, app, area),
        TrainingPhase::Typing(game) => draw_typing(f, game, area),
        TrainingPhase::Jumping(course) => draw_course(f, course, area),
        TrainingPhase::Summary(summary) => draw_summary(f, summary, area),
    }
}

fn draw_menu(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        section_header("Training Hall"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [1] ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("⌨  Typing Dojo", Style::default().fg(Color::White)),
            Span::styled(
                "   type the words before the incense burns out",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("  [2] ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("🚀 Obstacle Jumping", Style::default().fg(Color::White)),
            Span::styled(
                format!(
                    "   clear {} obstacles in a row",
                    app.config.obstacle.clears_to_win
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        stat_line("Trainings completed", app.stats.training_completed),
        stat_line("Skill points", app.stats.skill_points),
    ];

    if let Some(notice) = app.training.notice() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Training "));
    f.render_widget(paragraph, area);
}

fn draw_typing(f: &mut Frame, game: &TypingGame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled("Time ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{:>2}s", game.remaining_secs()),
            Style::default().fg(if game.remaining_secs() <= 10 { Color::Red } else { Color::White }),
        ),
        Span::styled("   Words ", Style::default().fg(Color::Gray)),
        Span::styled(game.correct().to_string(), Style::default().fg(Color::Green)),
        Span::styled("   AFK ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}s", game.idle_secs()),
            Style::default().fg(if game.is_idle() { Color::Red } else { Color::DarkGray }),
        ),
    ]);
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title(" Typing Dojo ")),
        chunks[0],
    );

    if game.is_idle() {
        draw_mantra(f, game, chunks[1]);
    } else {
        let spans: Vec<Span> = game
            .words()
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let style = if i < game.index() {
                    Style::default().fg(Color::DarkGray)
                } else if i == game.index() {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::White)
                };
                Span::styled(format!("{} ", word), style)
            })
            .collect();
        let words = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Words "));
        f.render_widget(words, chunks[1]);
    }

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(game.input().to_string(), Style::default().fg(Color::White)),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(input, chunks[2]);
}

fn draw_mantra(f: &mut Frame, game: &TypingGame, area: Rect) {
    let points: Vec<Span> = game
        .mantra_points()
        .iter()
        .map(|point| {
            let style = if point.active {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" [{}] ✦ ", point.id), style)
        })
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You drifted off. Tap every mantra point to refocus.",
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(points),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Meditation "));
    f.render_widget(paragraph, area);
}

fn draw_course(f: &mut Frame, course: &ObstacleCourse, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(LANE_ROWS as u16 + 3)])
        .split(area);

    let progress = Line::from(vec![
        Span::styled("Cleared ", Style::default().fg(Color::Gray)),
        Span::styled(
            bar_text(course.clears() as f64, course.clears_to_win() as f64, 20),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(" {}/{}", course.clears(), course.clears_to_win()),
            Style::default().fg(Color::White),
        ),
    ]);
    f.render_widget(
        Paragraph::new(progress).block(Block::default().borders(Borders::ALL).title(" Obstacle Jumping ")),
        chunks[0],
    );

    let width = chunks[1].width.saturating_sub(2).max(1) as usize;
    let lane = lane_lines(course, width);
    let paragraph = Paragraph::new(lane).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, chunks[1]);
}

/// Rows of the course from the sky down to the ground line
fn lane_lines(course: &ObstacleCourse, width: usize) -> Vec<Line<'static>> {
    let scale = course.jump_peak().max(1.0);
    let rows_for = |height: f64| ((height / scale) * (LANE_ROWS - 1) as f64).round() as usize;
    let column = |x: f64| ((x.clamp(0.0, 100.0) / 100.0) * (width - 1) as f64).round() as usize;

    let mut grid: Vec<Vec<(char, Color)>> = vec![vec![(' ', Color::Reset); width]; LANE_ROWS];

    for obstacle in course.obstacles() {
        let opacity = obstacle.opacity();
        if opacity <= 0.0 || obstacle.x > 100.0 {
            continue;
        }
        let color = if opacity < 1.0 {
            Color::DarkGray
        } else if obstacle.kind == ObstacleKind::High {
            Color::Red
        } else {
            Color::LightRed
        };
        let tall = match obstacle.kind {
            ObstacleKind::Low => 1,
            ObstacleKind::High => 2,
        };
        let col = column(obstacle.x);
        for row in 0..tall {
            grid[LANE_ROWS - 1 - row][col] = ('▓', color);
        }
    }

    let player_row = rows_for(course.player_height()).min(LANE_ROWS - 1);
    let col = column(course.player_x());
    grid[LANE_ROWS - 1 - player_row][col] = ('P', Color::Yellow);

    let mut lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(c, color)| Span::styled(c.to_string(), Style::default().fg(color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "▔".repeat(width),
        Style::default().fg(Color::Green),
    )));
    lines
}

fn draw_summary(f: &mut Frame, summary: &TrainingSummary, area: Rect) {
    let (title, score_label) = match summary.kind {
        GameKind::Typing => ("Typing Complete!", "Words typed"),
        GameKind::Jumping => ("Course Cleared!", "Obstacles cleared"),
    };

    let mut lines = vec![
        section_header(title),
        Line::from(""),
        stat_line(score_label, summary.score),
        stat_line("Experience earned", summary.reward),
        Line::from(""),
    ];

    if summary.can_claim() {
        lines.push(Line::from(Span::styled(
            "[Enter] Claim reward",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Nothing to claim this time. [Enter] Back",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Training Summary "));
    f.render_widget(paragraph, area);
}
