//! Results screen implementation
//!
//! Displays the final score, a per-question breakdown, and options to
//! restart the same quiz or return to the menu.

use crate::models::{AnswerOutcome, QuizDefinition, SessionSummary};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Available actions on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    Restart,
    Back,
}

impl ResultAction {
    /// Get all available actions
    pub fn all() -> Vec<Self> {
        vec![Self::Restart, Self::Back]
    }

    /// Get display text for the action
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Restart => "Restart",
            Self::Back => "Back to Menu",
        }
    }
}

/// Results screen component
///
/// Holds only the action selection. The summary and quiz are read from the
/// navigation state at draw time.
#[derive(Debug)]
pub struct ResultsScreen {
    selected_action: ResultAction,
}

impl ResultsScreen {
    /// Create a new results screen
    pub fn new() -> Self {
        Self {
            selected_action: ResultAction::Restart,
        }
    }

    /// Put the selection back on Restart for the next session
    pub fn reset_selection(&mut self) {
        self.selected_action = ResultAction::Restart;
    }

    /// "You scored X out of Y"
    pub fn score_line(summary: &SessionSummary) -> String {
        format!(
            "You scored {} out of {} question(s).",
            summary.score, summary.total
        )
    }

    /// Timed-out count and finish time
    pub fn detail_line(summary: &SessionSummary) -> String {
        format!(
            "{} timed out, finished {}",
            summary.timed_out_count(),
            summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }

    /// Get selected action
    pub fn selected_action(&self) -> ResultAction {
        self.selected_action
    }

    /// Select next action
    pub fn select_next_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        let next_index = (current_index + 1) % actions.len();
        self.selected_action = actions[next_index];
    }

    /// Select previous action
    pub fn select_previous_action(&mut self) {
        let actions = ResultAction::all();
        let current_index = actions
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        let prev_index = if current_index == 0 {
            actions.len() - 1
        } else {
            current_index - 1
        };
        self.selected_action = actions[prev_index];
    }

    /// Render the results of the last session played on `quiz`
    pub fn render(
        &mut self,
        f: &mut Frame,
        summary: Option<&SessionSummary>,
        quiz: Option<&QuizDefinition>,
    ) {
        let size = f.size();

        let Some(summary) = summary else {
            self.render_no_results(f, size);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Score
                Constraint::Min(4),    // Breakdown
                Constraint::Length(3), // Actions
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Quiz Results")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, chunks[0]);

        let color = if summary.ratio() >= 0.5 {
            Color::Green
        } else {
            Color::Yellow
        };
        let score = Paragraph::new(vec![
            Line::from(Span::styled(
                Self::score_line(summary),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Self::detail_line(summary)),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(score, chunks[1]);

        self.render_breakdown(f, chunks[2], summary, quiz);
        self.render_actions(f, chunks[3]);
        self.render_help(f, chunks[4]);
    }

    fn render_no_results(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let text = vec![
            Line::from(""),
            Line::from("No results available"),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to go back",
                Style::default().fg(Color::Yellow),
            )),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title("Results")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(paragraph, area);
    }

    fn render_breakdown(
        &self,
        f: &mut Frame,
        area: ratatui::layout::Rect,
        summary: &SessionSummary,
        quiz: Option<&QuizDefinition>,
    ) {
        let rows: Vec<Row> = summary
            .outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| {
                let prompt = quiz
                    .and_then(|q| q.get(i))
                    .map(|q| q.prompt().to_string())
                    .unwrap_or_default();
                let color = match outcome {
                    AnswerOutcome::Correct => Color::Green,
                    AnswerOutcome::Incorrect { .. } => Color::Red,
                    AnswerOutcome::TimedOut => Color::Yellow,
                };
                Row::new(vec![format!("{}.", i + 1), prompt, outcome.label().to_string()])
                    .style(Style::default().fg(color))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(20),
                Constraint::Length(10),
            ],
        )
        .block(
            Block::default()
                .title("Breakdown")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .column_spacing(2);

        f.render_widget(table, area);
    }

    fn render_actions(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let actions_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(40),
                Constraint::Min(0),
            ])
            .split(area)[1];

        let action_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(actions_area);

        for (i, action) in ResultAction::all().iter().enumerate() {
            let selected = *action == self.selected_action;
            let (style, border) = if selected {
                (
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Cyan),
                )
            } else {
                (Style::default().fg(Color::White), Style::default().fg(Color::White))
            };

            let button = Paragraph::new(action.display_text())
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            f.render_widget(button, action_chunks[i]);
        }
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("←→", key),
            Span::raw(" Navigate  "),
            Span::styled("Enter", key),
            Span::raw(" Select  "),
            Span::styled("Esc", key),
            Span::raw(" Back"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        f.render_widget(help, area);
    }
}

impl Default for ResultsScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{DraftUpdate, QuizBuilder};
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(
        screen: &mut ResultsScreen,
        summary: Option<&SessionSummary>,
        quiz: Option<&QuizDefinition>,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| screen.render(f, summary, quiz))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn summary(score: u32, outcomes: Vec<AnswerOutcome>) -> SessionSummary {
        SessionSummary {
            score,
            total: outcomes.len() as u32,
            outcomes,
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_score_line() {
        let summary = summary(1, vec![AnswerOutcome::Correct]);
        assert_eq!(
            ResultsScreen::score_line(&summary),
            "You scored 1 out of 1 question(s)."
        );
    }

    #[test]
    fn test_detail_line_counts_timeouts() {
        let summary = summary(
            1,
            vec![
                AnswerOutcome::TimedOut,
                AnswerOutcome::Correct,
                AnswerOutcome::TimedOut,
            ],
        );
        assert!(ResultsScreen::detail_line(&summary).starts_with("2 timed out, finished "));
    }

    #[test]
    fn test_renders_given_summary_and_prompts() {
        let mut builder = QuizBuilder::new();
        builder.update_draft_question(DraftUpdate::new().prompt("2+2=?"));
        builder.update_option(0, "4").unwrap();
        builder.add_option();
        builder.update_option(1, "5").unwrap();
        builder.mark_correct(0).unwrap();
        builder.add_question().unwrap();
        let quiz = builder.finalize().unwrap();

        let mut screen = ResultsScreen::new();
        let summary = summary(1, vec![AnswerOutcome::Correct]);
        let text = rendered(&mut screen, Some(&summary), Some(&quiz));
        assert!(text.contains("You scored 1 out of 1 question(s)."));
        assert!(text.contains("2+2=?"));

        let text = rendered(&mut screen, None, Some(&quiz));
        assert!(text.contains("No results available"));
    }

    #[test]
    fn test_action_cycle() {
        let mut screen = ResultsScreen::new();
        assert_eq!(screen.selected_action(), ResultAction::Restart);
        screen.select_next_action();
        assert_eq!(screen.selected_action(), ResultAction::Back);
        screen.select_next_action();
        assert_eq!(screen.selected_action(), ResultAction::Restart);
        screen.select_previous_action();
        assert_eq!(screen.selected_action(), ResultAction::Back);

        screen.reset_selection();
        assert_eq!(screen.selected_action(), ResultAction::Restart);
    }
}
