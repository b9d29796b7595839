use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Difficulty, GameOverCause};
use crate::metrics::GameMetrics;
use crate::session::{Phase, Snapshot};

/// Draws snapshots into a terminal frame
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        notice: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match snapshot.phase {
            Phase::Idle => self.render_menu(snapshot),
            Phase::Running => self.render_grid(snapshot, " Snake "),
            Phase::Paused => self.render_grid(snapshot, " Paused - Space to resume, M for menu "),
            Phase::GameOver => self.render_game_over(snapshot),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(self.render_controls(snapshot.phase, notice), chunks[2]);
    }

    fn render_grid<'a>(&self, snapshot: &Snapshot, title: &'a str) -> Paragraph<'a> {
        let head = snapshot.head();
        let mut lines = Vec::new();

        for row in 0..snapshot.tile_count {
            let mut spans = Vec::new();

            for col in 0..snapshot.tile_count {
                let cell = Cell::new(col, row);

                let span = if Some(cell) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if Some(cell) == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let border = if snapshot.phase == Phase::Paused {
            Color::Yellow
        } else {
            Color::White
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        Paragraph::new(vec![Line::from(self.stats_spans(snapshot, metrics))])
            .alignment(Alignment::Center)
    }

    fn stats_spans(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Vec<Span<'static>> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(snapshot.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(snapshot.difficulty.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Food: ", label),
            Span::styled(metrics.foods_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Runs: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ]
    }

    fn render_menu(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "PIXEL SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("High score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let preset = difficulty.preset();
            let selected = *difficulty == snapshot.selected_difficulty;
            let style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if selected { "> " } else { "  " };
            text.push(Line::from(Span::styled(
                format!(
                    "{marker}{} {:<6} {:>3} ms  x{}",
                    i + 1,
                    difficulty.name(),
                    preset.tick_interval_ms,
                    preset.score_multiplier
                ),
                style,
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let reason = match snapshot.game_over_cause {
            Some(GameOverCause::Wall) => "You hit the wall",
            Some(GameOverCause::SelfCollision) => "You ran into yourself",
            Some(GameOverCause::BoardFull) => "The board is full",
            None => "",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if snapshot.new_high_score {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "M",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for menu or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase, notice: Option<&str>) -> Paragraph<'static> {
        if let Some(notice) = notice {
            return Paragraph::new(Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Yellow),
            )))
            .alignment(Alignment::Center);
        }

        let line = match phase {
            Phase::Idle => Line::from(vec![
                Span::styled("1-3", Style::default().fg(Color::Cyan)),
                Span::raw(" difficulty | "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("R", Style::default().fg(Color::Cyan)),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
