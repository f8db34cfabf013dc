use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Phase, Position, Snapshot};
use crate::leaderboard::ScoreEntry;

/// What the leaderboard panel currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardView {
    Loading,
    Entries(Vec<ScoreEntry>),
    Unavailable,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot<'_>,
        name_input: &str,
        leaderboard: Option<&LeaderboardView>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if let Some(view) = leaderboard {
            frame.render_widget(self.render_leaderboard(view), game_area);
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);

            let popup = centered_rect(60, 9, game_area);
            match snapshot.phase {
                Phase::Playing => {}
                Phase::Waiting => {
                    frame.render_widget(Clear, popup);
                    frame.render_widget(self.render_prompt("RIVAL SNAKE", "to start"), popup);
                }
                Phase::GameOver => {
                    frame.render_widget(Clear, popup);
                    frame.render_widget(self.render_prompt("GAME OVER", "to restart"), popup);
                }
                Phase::EnteringName => {
                    frame.render_widget(Clear, popup);
                    frame.render_widget(self.render_name_entry(snapshot.score, name_input), popup);
                }
            }
        }

        frame.render_widget(self.render_controls(snapshot.phase, leaderboard.is_some()), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let ai = snapshot.ai.unwrap_or(&[]);

        for y in 0..snapshot.grid.height {
            let mut spans = Vec::new();

            for x in 0..snapshot.grid.width {
                let pos = Position::new(x, y);

                let cell = if snapshot.player.first() == Some(&pos) {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.player.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Blue))
                } else if ai.first() == Some(&pos) {
                    Span::styled(
                        "■ ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if ai.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Red))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Rival Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>) -> Paragraph<'_> {
        let rival = if snapshot.ai.is_some() {
            Span::styled("hunting", Style::default().fg(Color::Red))
        } else {
            Span::styled("respawning", Style::default().fg(Color::DarkGray))
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Next food: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("+{}", snapshot.points_per_food),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Rival: ", Style::default().fg(Color::Yellow)),
            rival,
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_prompt(&self, title: &'static str, action: &'static str) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {action}"), Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_name_entry<'a>(&self, score: u32, name_input: &'a str) -> Paragraph<'a> {
        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Name: ", Style::default().fg(Color::Gray)),
                Span::styled(name_input, Style::default().fg(Color::Cyan)),
                Span::styled("_", Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to save | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to skip"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Game Over "),
        )
    }

    fn render_leaderboard(&self, view: &LeaderboardView) -> Paragraph<'_> {
        let lines = match view {
            LeaderboardView::Loading => {
                vec![Line::from(Span::styled(
                    "Loading scores...",
                    Style::default().fg(Color::Gray),
                ))]
            }
            LeaderboardView::Unavailable => {
                vec![Line::from(Span::styled(
                    "Failed to load scores.",
                    Style::default().fg(Color::Red),
                ))]
            }
            LeaderboardView::Entries(entries) if entries.is_empty() => {
                vec![Line::from(Span::styled(
                    "No scores yet. Be the first!",
                    Style::default().fg(Color::Gray),
                ))]
            }
            LeaderboardView::Entries(entries) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:>2}. ", index + 1),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::styled(
                            format!("{:<20}", entry.name),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(
                            format!("{:>6}", entry.score),
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                })
                .collect(),
        };

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Leaderboard "),
        )
    }

    fn render_controls(&self, phase: Phase, showing_leaderboard: bool) -> Paragraph<'_> {
        let line = if showing_leaderboard {
            Line::from(vec![
                Span::styled("any key", Style::default().fg(Color::Cyan)),
                Span::raw(" to go back | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        } else if phase == Phase::EnteringName {
            Line::from(vec![
                Span::styled("Type", Style::default().fg(Color::Cyan)),
                Span::raw(" your name"),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("L", Style::default().fg(Color::Cyan)),
                Span::raw(" for scores | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangle `percent_x` wide and `height` rows tall in the middle of `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
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
