//! Application state management
//!
//! Screen navigation as an explicit state machine, plus the mapping from
//! keyboard events to navigation actions.

use crate::models::{QuizDefinition, SessionSummary};
use crate::{QcmError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Main menu: create or play
    #[default]
    Menu,
    /// Quiz creator
    Create,
    /// Quiz player with countdown
    Play,
    /// Final score display
    Results,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Create => "create",
            Screen::Play => "play",
            Screen::Results => "results",
        }
    }
}

/// Events that move the application between screens
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    CreateRequested,
    PlayRequested,
    QuizFinalized(QuizDefinition),
    SessionFinished(SessionSummary),
    RestartRequested,
    BackRequested,
}

impl NavEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::CreateRequested => "create request",
            NavEvent::PlayRequested => "play request",
            NavEvent::QuizFinalized(_) => "quiz finalized",
            NavEvent::SessionFinished(_) => "session finished",
            NavEvent::RestartRequested => "restart request",
            NavEvent::BackRequested => "back request",
        }
    }
}

/// Navigation state: active screen, stored quiz and last result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    screen: Screen,
    quiz: Option<QuizDefinition>,
    last_summary: Option<SessionSummary>,
}

impl NavState {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The single stored quiz, if one has been created
    pub fn quiz(&self) -> Option<&QuizDefinition> {
        self.quiz.as_ref()
    }

    pub fn has_quiz(&self) -> bool {
        self.quiz.is_some()
    }

    /// Summary shown on the results screen
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.last_summary.as_ref()
    }
}

/// Compute the state that follows `event`. The input state is never modified.
pub fn transition(state: &NavState, event: NavEvent) -> Result<NavState> {
    let invalid = |event: &NavEvent| QcmError::InvalidTransition {
        from: state.screen.name(),
        event: event.name(),
    };

    let next = match (state.screen, event) {
        (Screen::Menu, NavEvent::CreateRequested) => NavState {
            screen: Screen::Create,
            ..state.clone()
        },
        (Screen::Menu, NavEvent::PlayRequested) => {
            if !state.has_quiz() {
                return Err(QcmError::NoQuizAvailable);
            }
            NavState {
                screen: Screen::Play,
                last_summary: None,
                ..state.clone()
            }
        }
        (Screen::Create, NavEvent::QuizFinalized(quiz)) => NavState {
            screen: Screen::Menu,
            quiz: Some(quiz),
            last_summary: None,
        },
        (Screen::Play, NavEvent::SessionFinished(summary)) => NavState {
            screen: Screen::Results,
            last_summary: Some(summary),
            ..state.clone()
        },
        (Screen::Results, NavEvent::RestartRequested) => NavState {
            screen: Screen::Play,
            last_summary: None,
            ..state.clone()
        },
        (Screen::Create | Screen::Play | Screen::Results, NavEvent::BackRequested) => NavState {
            screen: Screen::Menu,
            last_summary: None,
            ..state.clone()
        },
        (_, event) => return Err(invalid(&event)),
    };

    Ok(next)
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Pick an item directly by number (1-9)
    Pick(usize),
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Owns the navigation state and the quit flag
#[derive(Debug, Default)]
pub struct StateManager {
    state: NavState,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the main menu with no quiz
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_screen(&self) -> Screen {
        self.state.screen
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn quiz(&self) -> Option<&QuizDefinition> {
        self.state.quiz()
    }

    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.state.last_summary()
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Apply an event. On error the state is left as it was.
    pub fn apply(&mut self, event: NavEvent) -> Result<Screen> {
        let from = self.state.screen;
        let event_name = event.name();
        self.state = transition(&self.state, event)?;
        info!(
            "Navigation: {} -> {} ({})",
            from.name(),
            self.state.screen.name(),
            event_name
        );
        Ok(self.state.screen)
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Tab navigation
            KeyCode::Tab => NavigationAction::Next,
            KeyCode::BackTab => NavigationAction::Previous,

            KeyCode::Char(c @ '1'..='9') => NavigationAction::Pick(c as usize - '1' as usize),

            _ => NavigationAction::None,
        }
    }

    /// Whether the key must quit even while a text field has focus
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}
