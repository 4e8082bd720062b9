//! Creator screen implementation
//!
//! Edits the draft question field by field and feeds every change into the
//! [`QuizBuilder`]. Validation errors are shown in place and never alter the
//! draft.

use crate::error::{is_validation_error, user_friendly_message};
use crate::models::QuizDefinition;
use crate::quiz::{DraftUpdate, QuizBuilder};
use crate::util::TextInput;
use crate::{MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, warn};

/// 120 is the largest accepted limit, so three digits are enough
const TIME_LIMIT_DIGITS: usize = 3;

/// Field of the draft that has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorField {
    Prompt,
    Option(usize),
    TimeLimit,
}

/// What the application should do after a key press on the creator
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorAction {
    /// Leave without creating a quiz
    Back,
    /// Quiz created, hand it to the menu
    Finalized(QuizDefinition),
}

/// Quiz creator component
#[derive(Debug)]
pub struct CreatorScreen {
    builder: QuizBuilder,
    prompt: TextInput,
    options: Vec<TextInput>,
    time_limit: TextInput,
    focus: CreatorField,
    error: Option<String>,
    status: Option<String>,
}

impl CreatorScreen {
    /// Create a creator whose drafts start at `default_time_limit_secs`
    pub fn new(default_time_limit_secs: u32) -> Self {
        let mut screen = Self {
            builder: QuizBuilder::with_default_time_limit(default_time_limit_secs),
            prompt: TextInput::new(),
            options: Vec::new(),
            time_limit: TextInput::numeric().with_max_chars(TIME_LIMIT_DIGITS),
            focus: CreatorField::Prompt,
            error: None,
            status: None,
        };
        screen.reload_inputs();
        screen
    }

    /// Discard everything and start a new, empty quiz
    pub fn reset(&mut self) {
        *self = Self::new(self.builder.default_time_limit_secs());
    }

    pub fn builder(&self) -> &QuizBuilder {
        &self.builder
    }

    pub fn focus(&self) -> CreatorField {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Handle key events for the creator screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<CreatorAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('n') => {
                    self.add_option();
                    None
                }
                KeyCode::Char('d') => {
                    self.remove_focused_option();
                    None
                }
                KeyCode::Char('t') => {
                    self.mark_focused_correct();
                    None
                }
                KeyCode::Char('f') => self.finalize(),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => return Some(CreatorAction::Back),
            KeyCode::Up | KeyCode::BackTab => self.focus_previous(),
            KeyCode::Down | KeyCode::Tab => self.focus_next(),
            KeyCode::Enter => self.add_question(),
            code => self.edit_focused(code),
        }
        None
    }

    fn fields(&self) -> Vec<CreatorField> {
        let mut fields = vec![CreatorField::Prompt];
        fields.extend((0..self.options.len()).map(CreatorField::Option));
        fields.push(CreatorField::TimeLimit);
        fields
    }

    fn focus_position(&self) -> usize {
        self.fields()
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    fn focus_previous(&mut self) {
        let fields = self.fields();
        let pos = self.focus_position();
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    fn focus_next(&mut self) {
        let fields = self.fields();
        let pos = self.focus_position();
        self.focus = fields[(pos + 1) % fields.len()];
    }

    fn edit_focused(&mut self, code: KeyCode) {
        match self.focus {
            CreatorField::Prompt => {
                if self.prompt.handle_key(code) {
                    self.builder
                        .update_draft_question(DraftUpdate::new().prompt(self.prompt.text()));
                }
            }
            CreatorField::Option(index) => {
                let changed = match self.options.get_mut(index) {
                    Some(input) => input.handle_key(code),
                    None => false,
                };
                if changed {
                    let text = self.options[index].text().to_string();
                    if let Err(e) = self.builder.update_option(index, text) {
                        self.show_error(&e);
                    }
                }
            }
            CreatorField::TimeLimit => {
                if self.time_limit.handle_key(code) {
                    // An empty or unparsable field counts as 0 and fails validation later
                    let secs = self.time_limit.text().parse::<u32>().unwrap_or(0);
                    self.builder
                        .update_draft_question(DraftUpdate::new().time_limit(secs));
                }
            }
        }
    }

    fn add_option(&mut self) {
        self.builder.add_option();
        self.reload_inputs();
        self.focus = CreatorField::Option(self.options.len() - 1);
        self.error = None;
    }

    fn remove_focused_option(&mut self) {
        let CreatorField::Option(index) = self.focus else {
            return;
        };
        match self.builder.remove_option(index) {
            Ok(()) => {
                self.reload_inputs();
                let last = self.options.len().saturating_sub(1);
                self.focus = CreatorField::Option(index.min(last));
                self.error = None;
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn mark_focused_correct(&mut self) {
        let CreatorField::Option(index) = self.focus else {
            return;
        };
        match self.builder.mark_correct(index) {
            Ok(()) => self.error = None,
            Err(e) => self.show_error(&e),
        }
    }

    fn add_question(&mut self) {
        match self.builder.add_question().map(|_| ()) {
            Ok(()) => {
                self.status = Some(format!(
                    "Question {} added.",
                    self.builder.question_count()
                ));
                self.error = None;
                self.reload_inputs();
                self.focus = CreatorField::Prompt;
            }
            Err(e) => self.show_error(&e),
        }
    }

    fn finalize(&mut self) -> Option<CreatorAction> {
        match self.builder.finalize() {
            Ok(quiz) => Some(CreatorAction::Finalized(quiz)),
            Err(e) => {
                self.show_error(&e);
                None
            }
        }
    }

    fn show_error(&mut self, error: &crate::QcmError) {
        if is_validation_error(error) {
            debug!("Creator action rejected: {}", error);
        } else {
            warn!("Creator action failed: {}", error);
        }
        self.error = Some(user_friendly_message(error));
        self.status = None;
    }

    /// Rebuild the text fields from the builder's draft
    fn reload_inputs(&mut self) {
        let draft = self.builder.draft();
        self.prompt = TextInput::with_text(draft.prompt.as_str());
        self.options = draft
            .options
            .iter()
            .map(|o| TextInput::with_text(o.as_str()))
            .collect();
        self.time_limit = TextInput::numeric().with_max_chars(TIME_LIMIT_DIGITS);
        self.time_limit
            .set_text(draft.time_limit_secs.to_string());
    }

    /// Render the creator screen
    pub fn render(&mut self, f: &mut Frame) {
        let area = f.size();
        let field_rows = self.fields().len() as u16 * 3;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),          // Title
                Constraint::Length(3),          // Error / status
                Constraint::Length(field_rows), // Fields
                Constraint::Min(0),
                Constraint::Length(4), // Help text
            ])
            .split(area);

        self.render_title(f, chunks[0]);
        self.render_message(f, chunks[1]);
        self.render_fields(f, chunks[2]);
        self.render_help(f, chunks[4]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(format!(
            "Create a Quiz ({} question(s) so far)",
            self.builder.question_count()
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_message(&self, f: &mut Frame, area: Rect) {
        let (text, color) = match (&self.error, &self.status) {
            (Some(error), _) => (error.as_str(), Color::Red),
            (None, Some(status)) => (status.as_str(), Color::Green),
            (None, None) => ("", Color::White),
        };
        let message = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(message, area);
    }

    fn render_fields(&self, f: &mut Frame, area: Rect) {
        let fields = self.fields();
        let constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
        let field_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let correct = self.builder.draft().correct_index;

        for (i, field) in fields.iter().enumerate() {
            let (title, input) = match field {
                CreatorField::Prompt => ("Question".to_string(), &self.prompt),
                CreatorField::Option(index) => {
                    let mark = if correct == Some(*index) { " ✓ correct" } else { "" };
                    (format!("Option {}{}", index + 1, mark), &self.options[*index])
                }
                CreatorField::TimeLimit => (
                    format!(
                        "Time limit ({}-{} seconds)",
                        MIN_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS
                    ),
                    &self.time_limit,
                ),
            };

            let focused = *field == self.focus;
            let border = if focused {
                Style::default().fg(Color::Cyan)
            } else if matches!(field, CreatorField::Option(index) if correct == Some(*index)) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title);
            let p = Paragraph::new(input.text()).block(block);
            f.render_widget(p, field_chunks[i]);

            if focused {
                let rect = field_chunks[i];
                f.set_cursor(cursor_column(rect, input.cursor()), rect.y + 1);
            }
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from("↑↓/Tab: Field | Enter: Add question | Ctrl+F: Create quiz | Esc: Back"),
            Line::from("Ctrl+N: New option | Ctrl+D: Delete option | Ctrl+T: Mark correct"),
        ];
        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(help, area);
    }
}

/// Terminal column of the cursor inside a bordered field, kept off the right border
fn cursor_column(rect: Rect, cursor: usize) -> u16 {
    let offset = u16::try_from(cursor).unwrap_or(u16::MAX);
    rect.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(rect.right().saturating_sub(2))
}

impl Default for CreatorScreen {
    fn default() -> Self {
        Self::new(crate::DEFAULT_TIME_LIMIT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(screen: &mut CreatorScreen, code: KeyCode) -> Option<CreatorAction> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(screen: &mut CreatorScreen, c: char) -> Option<CreatorAction> {
        screen.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(screen: &mut CreatorScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_updates_draft() {
        let mut screen = CreatorScreen::default();
        type_text(&mut screen, "2+2=?");
        assert_eq!(screen.builder().draft().prompt, "2+2=?");

        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.focus(), CreatorField::Option(0));
        type_text(&mut screen, "4");
        assert_eq!(screen.builder().draft().options, vec!["4"]);
    }

    #[test]
    fn test_q_is_typed_not_quit() {
        let mut screen = CreatorScreen::default();
        assert_eq!(press(&mut screen, KeyCode::Char('q')), None);
        assert_eq!(screen.builder().draft().prompt, "q");
    }

    #[test]
    fn test_time_limit_field() {
        let mut screen = CreatorScreen::default();
        press(&mut screen, KeyCode::BackTab);
        assert_eq!(screen.focus(), CreatorField::TimeLimit);
        press(&mut screen, KeyCode::Backspace);
        press(&mut screen, KeyCode::Backspace);
        assert_eq!(screen.builder().draft().time_limit_secs, 0);
        type_text(&mut screen, "15x");
        assert_eq!(screen.builder().draft().time_limit_secs, 15);
    }

    #[test]
    fn test_time_limit_field_caps_digits() {
        let mut screen = CreatorScreen::default();
        press(&mut screen, KeyCode::BackTab);
        press(&mut screen, KeyCode::Backspace);
        press(&mut screen, KeyCode::Backspace);
        type_text(&mut screen, "99999999999");
        assert_eq!(screen.builder().draft().time_limit_secs, 999);

        press(&mut screen, KeyCode::BackTab);
        press(&mut screen, KeyCode::BackTab);
        type_text(&mut screen, "Too long?");
        press(&mut screen, KeyCode::Down);
        type_text(&mut screen, "yes");
        ctrl(&mut screen, 't');
        ctrl(&mut screen, 'n');
        type_text(&mut screen, "no");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.error(),
            Some("Time limit must be between 5 and 120 seconds (got 999).")
        );
    }

    #[test]
    fn test_cursor_column_saturates() {
        let rect = Rect::new(2, 0, 20, 3);
        assert_eq!(cursor_column(rect, 0), 3);
        assert_eq!(cursor_column(rect, 5), 8);
        assert_eq!(cursor_column(rect, 100_000), rect.right() - 2);

        let edge = Rect::new(u16::MAX - 10, 0, 10, 3);
        assert_eq!(cursor_column(edge, usize::MAX), edge.right() - 2);
    }

    #[test]
    fn test_add_question_flow() {
        let mut screen = CreatorScreen::default();
        type_text(&mut screen, "Capital of Italy?");
        press(&mut screen, KeyCode::Down);
        type_text(&mut screen, "Rome");
        ctrl(&mut screen, 't');
        ctrl(&mut screen, 'n');
        assert_eq!(screen.focus(), CreatorField::Option(1));
        type_text(&mut screen, "Milan");

        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.error(), None);
        assert_eq!(screen.status(), Some("Question 1 added."));
        assert_eq!(screen.builder().question_count(), 1);
        assert_eq!(screen.focus(), CreatorField::Prompt);
        assert!(screen.builder().draft().prompt.is_empty());

        match ctrl(&mut screen, 'f') {
            Some(CreatorAction::Finalized(quiz)) => {
                assert_eq!(quiz.len(), 1);
                assert_eq!(quiz[0].correct_index(), 0);
            }
            other => panic!("expected finalized quiz, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_error_shown_and_draft_kept() {
        let mut screen = CreatorScreen::default();
        type_text(&mut screen, "Only one option");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.error(), Some("Please add at least two options."));
        assert_eq!(screen.builder().draft().prompt, "Only one option");
    }

    #[test]
    fn test_finalize_empty_shows_error() {
        let mut screen = CreatorScreen::default();
        assert_eq!(ctrl(&mut screen, 'f'), None);
        assert!(screen.error().is_some());
    }

    #[test]
    fn test_remove_option_keeps_one_slot() {
        let mut screen = CreatorScreen::default();
        ctrl(&mut screen, 'n');
        ctrl(&mut screen, 'd');
        assert_eq!(screen.builder().draft().options.len(), 1);
        assert_eq!(screen.focus(), CreatorField::Option(0));
        ctrl(&mut screen, 'd');
        assert_eq!(screen.builder().draft().options.len(), 1);
        assert!(screen.error().is_some());
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = CreatorScreen::default();
        assert_eq!(press(&mut screen, KeyCode::Esc), Some(CreatorAction::Back));
    }

    #[test]
    fn test_reset_discards_draft() {
        let mut screen = CreatorScreen::new(45);
        type_text(&mut screen, "abandoned");
        screen.reset();
        assert!(screen.builder().draft().prompt.is_empty());
        assert_eq!(screen.builder().draft().time_limit_secs, 45);
    }
}
