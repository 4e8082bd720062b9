//! Menu screen implementation
//!
//! Main menu with Create Quiz, Play Quiz and Quit. Play is only offered
//! once a quiz has been created.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Create,
    Play,
    Quit,
}

impl MenuItem {
    pub fn all() -> [Self; 3] {
        [Self::Create, Self::Play, Self::Quit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Quiz editor",
            Self::Play => "Play quiz",
            Self::Quit => "Quit",
        }
    }
}

/// Main menu component
#[derive(Debug)]
pub struct MenuScreen {
    selected_index: usize,
    list_state: ListState,
    has_quiz: bool,
    quiz_len: usize,
    message: Option<String>,
}

impl MenuScreen {
    /// Create a new menu screen
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            selected_index: 0,
            list_state,
            has_quiz: false,
            quiz_len: 0,
            message: None,
        }
    }

    /// Tell the menu whether a quiz is stored, and its length
    pub fn set_quiz_available(&mut self, quiz_len: Option<usize>) {
        self.has_quiz = quiz_len.is_some();
        self.quiz_len = quiz_len.unwrap_or(0);
    }

    pub fn has_quiz(&self) -> bool {
        self.has_quiz
    }

    /// Whether `item` can currently be chosen
    pub fn is_enabled(&self, item: MenuItem) -> bool {
        item != MenuItem::Play || self.has_quiz
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::all()[self.selected_index]
    }

    /// Jump to an entry by position
    pub fn select(&mut self, index: usize) {
        if index < MenuItem::all().len() {
            self.selected_index = index;
            self.list_state.select(Some(index));
        }
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        let len = MenuItem::all().len();
        self.select((self.selected_index + len - 1) % len);
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let len = MenuItem::all().len();
        self.select((self.selected_index + 1) % len);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Render the menu screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Min(6),    // Menu
                Constraint::Length(3), // Status
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_menu(f, chunks[1]);
        self.render_status(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("QCM")
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
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Multiple-choice quizzes against the clock")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_menu(&mut self, f: &mut Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = MenuItem::all()
            .iter()
            .map(|item| {
                if self.is_enabled(*item) {
                    ListItem::new(item.label())
                } else {
                    ListItem::new(format!("{} (create a quiz first)", item.label()))
                        .style(Style::default().fg(Color::DarkGray))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Main Menu"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_status(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let line = match (&self.message, self.has_quiz) {
            (Some(message), _) => Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            )),
            (None, true) => Line::from(Span::styled(
                format!("Quiz ready: {} question(s)", self.quiz_len),
                Style::default().fg(Color::Green),
            )),
            (None, false) => Line::from("No quiz yet"),
        };

        let status = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

    fn render_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("↑↓", key),
            Span::raw(" Navigate  "),
            Span::styled("Enter", key),
            Span::raw(" Select  "),
            Span::styled("Q", key),
            Span::raw(" Quit"),
        ])];

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

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_creation() {
        let screen = MenuScreen::new();
        assert_eq!(screen.selected_item(), MenuItem::Create);
        assert!(!screen.has_quiz());
        assert!(!screen.is_enabled(MenuItem::Play));
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut screen = MenuScreen::new();
        screen.select_next();
        assert_eq!(screen.selected_item(), MenuItem::Play);
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected_item(), MenuItem::Create);

        screen.select_previous();
        assert_eq!(screen.selected_item(), MenuItem::Quit);
    }

    #[test]
    fn test_play_enabled_with_quiz() {
        let mut screen = MenuScreen::new();
        screen.set_quiz_available(Some(3));
        assert!(screen.is_enabled(MenuItem::Play));
        screen.set_quiz_available(None);
        assert!(!screen.is_enabled(MenuItem::Play));
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut screen = MenuScreen::new();
        screen.select(7);
        assert_eq!(screen.selected_item(), MenuItem::Create);
    }
}
