//! Player screen implementation
//!
//! Shows the current question with its countdown gauge, takes exactly one
//! answer per question and reports when the session is over.

use crate::error::user_friendly_message;
use crate::models::{AnswerOutcome, QuizDefinition, SessionSummary};
use crate::quiz::{Advance, SessionRunner, TickOutcome};
use crate::util::format_seconds;
use crate::app::state::{NavigationAction, StateManager};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// What the application should do after input on the player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    /// Abort the session and return to the menu
    Back,
    /// The current question was resolved by a selection
    Answered(AnswerOutcome),
    /// Moved on to the question at this index
    NextQuestion(usize),
    /// Last question passed
    Finished(SessionSummary),
}

/// Quiz player component
#[derive(Debug, Default)]
pub struct PlayerScreen {
    runner: Option<SessionRunner>,
    highlighted: usize,
    list_state: ListState,
    message: Option<String>,
}

impl PlayerScreen {
    /// Create an idle player screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh session on `quiz`
    pub fn start(&mut self, quiz: QuizDefinition) {
        self.runner = Some(SessionRunner::new(quiz));
        self.reset_highlight();
        self.message = None;
    }

    /// Drop the running session
    pub fn stop(&mut self) {
        self.runner = None;
        self.message = None;
    }

    pub fn runner(&self) -> Option<&SessionRunner> {
        self.runner.as_ref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Forward a countdown tick to the session
    pub fn tick(&mut self, question: usize) -> TickOutcome {
        match self.runner.as_mut() {
            Some(runner) => runner.tick(question),
            None => TickOutcome::Ignored,
        }
    }

    /// Handle key events for the player screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<PlayerAction> {
        let action = StateManager::key_to_navigation(key);
        if action == NavigationAction::Back {
            return Some(PlayerAction::Back);
        }

        let runner = self.runner.as_ref()?;
        let option_count = runner.current_question().options().len();
        let answered = runner.is_answered();

        match action {
            NavigationAction::Up if !answered => {
                self.set_highlight((self.highlighted + option_count - 1) % option_count);
                None
            }
            NavigationAction::Down if !answered => {
                self.set_highlight((self.highlighted + 1) % option_count);
                None
            }
            NavigationAction::Pick(index) if !answered && index < option_count => {
                self.set_highlight(index);
                self.answer(index)
            }
            NavigationAction::Select if !answered => self.answer(self.highlighted),
            NavigationAction::Select | NavigationAction::Right => self.advance(),
            _ => None,
        }
    }

    fn answer(&mut self, index: usize) -> Option<PlayerAction> {
        let runner = self.runner.as_mut()?;
        match runner.select_answer(index) {
            Ok(Some(outcome)) => Some(PlayerAction::Answered(outcome)),
            Ok(None) => None,
            Err(e) => {
                self.message = Some(user_friendly_message(&e));
                None
            }
        }
    }

    fn advance(&mut self) -> Option<PlayerAction> {
        let runner = self.runner.as_mut()?;
        match runner.next_question() {
            Ok(Advance::Next(index)) => {
                self.reset_highlight();
                self.message = None;
                Some(PlayerAction::NextQuestion(index))
            }
            Ok(Advance::Finished(summary)) => Some(PlayerAction::Finished(summary)),
            Err(e) => {
                self.message = Some(user_friendly_message(&e));
                None
            }
        }
    }

    fn set_highlight(&mut self, index: usize) {
        self.highlighted = index;
        self.list_state.select(Some(index));
    }

    fn reset_highlight(&mut self) {
        self.set_highlight(0);
    }

    /// Render the player screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let Some(runner) = self.runner.as_ref() else {
            let idle = Paragraph::new("No quiz running. Press Esc to go back.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Play"));
            f.render_widget(idle, size);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Prompt
                Constraint::Length(3), // Countdown
                Constraint::Min(4),    // Options
                Constraint::Length(4), // Score / status
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let question = runner.current_question();

        let title = Paragraph::new(format!(
            "Question {}/{}",
            runner.current_index() + 1,
            runner.total()
        ))
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

        let prompt = Paragraph::new(question.prompt())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(prompt, chunks[1]);

        let remaining = runner.time_remaining();
        let gauge_color = if remaining == 0 {
            Color::Red
        } else if runner.time_ratio() < 0.25 {
            Color::Yellow
        } else {
            Color::Green
        };
        let gauge = Gauge::default()
            .block(Block::default().title("Time left").borders(Borders::ALL))
            .gauge_style(Style::default().fg(gauge_color))
            .ratio(runner.time_ratio().clamp(0.0, 1.0))
            .label(format_seconds(remaining));
        f.render_widget(gauge, chunks[2]);

        let answered = runner.is_answered();
        let selected = runner.selected_index();
        let items: Vec<ListItem> = question
            .options()
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let text = format!("{}. {}", i + 1, option);
                let style = if !answered {
                    Style::default()
                } else if question.is_correct(i) {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else if selected == Some(i) {
                    Style::default().fg(Color::White).bg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(text).style(style)
            })
            .collect();

        let mut list = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
        if !answered {
            list = list
                .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
                .highlight_symbol(">> ");
        }
        let mut list_state = if answered {
            ListState::default()
        } else {
            self.list_state.clone()
        };
        f.render_stateful_widget(list, chunks[3], &mut list_state);

        let status_line = if let Some(message) = &self.message {
            Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red)))
        } else if answered && selected.is_none() {
            Line::from(Span::styled(
                "Time's up!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else if answered && selected.map(|s| question.is_correct(s)).unwrap_or(false) {
            Line::from(Span::styled("Correct!", Style::default().fg(Color::Green)))
        } else if answered {
            Line::from(Span::styled("Wrong answer.", Style::default().fg(Color::Red)))
        } else {
            Line::from("")
        };
        let status = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Score: {}", runner.score()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            status_line,
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, chunks[4]);

        self.render_help(f, chunks[5], answered, runner.is_last_question());
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect, answered: bool, last: bool) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let line = if answered {
            let next = if last { " Finish quiz  " } else { " Next question  " };
            Line::from(vec![
                Span::styled("Enter", key),
                Span::raw(next),
                Span::styled("Esc", key),
                Span::raw(" Back to Menu"),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓", key),
                Span::raw(" Navigate  "),
                Span::styled("Enter/1-9", key),
                Span::raw(" Answer  "),
                Span::styled("Esc", key),
                Span::raw(" Back to Menu"),
            ])
        };

        let help = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}
