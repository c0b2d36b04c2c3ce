use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, Phase, Position};

use super::theme::{Palette, Theme};

/// Per-frame values the game state alone does not carry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Brightness of the score highlight after eating
    pub score_flash: f64,
    /// How far the game-over panel has dropped in
    pub panel_reveal: f64,
    /// The game that just ended beat the previous record
    pub new_high_score: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            score_flash: 0.0,
            panel_reveal: 1.0,
            new_high_score: false,
        }
    }
}

/// Zero-padded score as shown in the header
pub fn format_score(score: u32) -> String {
    format!("{:06}", score)
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: theme.palette(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, overlay: &Overlay) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, overlay), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match state.phase {
            Phase::NotStarted => self.render_start_screen(state),
            Phase::Running | Phase::Paused => self.render_grid(state),
            Phase::GameOver => self.render_game_over(state, overlay),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(self.render_controls(state.phase), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let lines: Vec<Line> = (0..state.grid.height as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid.width as i32)
                    .map(|x| self.cell(state, head, Position::new(x, y)))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if state.phase == Phase::Paused {
            " Snake - PAUSED "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(self.palette.border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn cell(&self, state: &GameState, head: Position, pos: Position) -> Span<'static> {
        if pos == head {
            Span::styled(
                "■ ",
                Style::default()
                    .fg(self.palette.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if state.snake.contains(pos) {
            Span::styled("□ ", Style::default().fg(self.palette.snake_body))
        } else if pos == state.food {
            Span::styled(
                "● ",
                Style::default()
                    .fg(self.palette.food)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(". ", Style::default().fg(Color::DarkGray))
        }
    }

    fn render_stats(&self, state: &GameState, overlay: &Overlay) -> Paragraph<'_> {
        let mut score_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        if overlay.score_flash > 0.5 {
            score_style = score_style.fg(self.palette.score).add_modifier(Modifier::REVERSED);
        } else if overlay.score_flash > 0.0 {
            score_style = score_style.fg(self.palette.score);
        }

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(self.palette.score)),
            Span::styled(format_score(state.score), score_style),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(self.palette.score)),
            Span::styled(format_score(state.high_score), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(self.palette.score)),
            Span::styled(
                format!("{}ms", state.tick_interval_ms),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_screen(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(self.palette.snake_head)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("High score: ", Style::default().fg(self.palette.score)),
                Span::raw(format_score(state.high_score)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.palette.border)),
        )
    }

    fn render_game_over(&self, state: &GameState, overlay: &Overlay) -> Paragraph<'_> {
        // The panel drops in from above as the reveal runs
        let drop = ((1.0 - overlay.panel_reveal.clamp(0.0, 1.0)) * 6.0).round() as usize;
        let mut text = vec![Line::from(""); drop + 1];

        text.push(Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        if overlay.new_high_score {
            text.push(Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(self.palette.score)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "SPACE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for the menu or ", Style::default().fg(Color::Gray)),
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

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let action = match phase {
            Phase::Running => " to pause | ",
            Phase::Paused => " to resume | ",
            Phase::NotStarted | Phase::GameOver => " to start | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("SPACE", Style::default().fg(Color::Cyan)),
            Span::raw(action),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
