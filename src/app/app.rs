//! Main application controller
//!
//! Manages the TUI, navigation state, and the screen rendering loop.

use crate::{
    app::{
        play::PlayController,
        screens::{
            CreatorAction, CreatorScreen, MenuItem, MenuScreen, PlayerAction, ResultAction,
            ResultsScreen,
        },
        state::{NavEvent, NavigationAction, Screen, StateManager},
        tui::Tui,
    },
    config::QcmConfig,
    error::user_friendly_message,
    Result,
};
use crossterm::event::KeyEvent;
use std::io;
use tracing::{info, warn};

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Navigation state and quit flag
    state_manager: StateManager,
    /// Screen components
    menu_screen: MenuScreen,
    creator_screen: CreatorScreen,
    results_screen: ResultsScreen,
    /// Player and its countdown
    play: PlayController,
}

impl App {
    /// Create a new application instance
    pub fn new(config: QcmConfig) -> Result<Self> {
        Ok(Self {
            tui: Tui::new(config.ui_tick_rate())?,
            state_manager: StateManager::new(),
            menu_screen: MenuScreen::new(),
            creator_screen: CreatorScreen::new(config.default_time_limit_secs),
            results_screen: ResultsScreen::new(),
            play: PlayController::new(config.tick_interval()),
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui.init()?;
        info!("Terminal initialised");
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            self.play.drain_ticks();
            self.draw()?;
            self.handle_events()?;
        }
        self.play.stop();
        self.tui.restore()?;
        info!("Application exited");
        Ok(())
    }

    /// Draw the current screen
    fn draw(&mut self) -> io::Result<()> {
        if !self.tui.is_size_adequate()? {
            return self.tui.draw_too_small();
        }

        self.tui.draw(|f| match self.state_manager.current_screen() {
            Screen::Menu => self.menu_screen.render(f),
            Screen::Create => self.creator_screen.render(f),
            Screen::Play => self.play.render(f),
            Screen::Results => self.results_screen.render(
                f,
                self.state_manager.last_summary(),
                self.state_manager.quiz(),
            ),
        })
    }

    /// Handle keyboard events and update state
    fn handle_events(&mut self) -> Result<()> {
        let Some(key) = self.tui.next_key()? else {
            return Ok(());
        };

        // Global key handling
        if StateManager::is_force_quit(&key) {
            self.state_manager.quit();
            return Ok(());
        }

        let screen = self.state_manager.current_screen();
        // The editor takes every printable key, so 'q' only quits elsewhere
        if screen != Screen::Create
            && StateManager::key_to_navigation(key) == NavigationAction::Quit
        {
            self.state_manager.quit();
            return Ok(());
        }

        match screen {
            Screen::Menu => self.handle_menu_events(key),
            Screen::Create => self.handle_creator_events(key),
            Screen::Play => self.handle_player_events(key),
            Screen::Results => self.handle_results_events(key),
        }
        Ok(())
    }

    fn handle_menu_events(&mut self, key: KeyEvent) {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Up | NavigationAction::Previous => self.menu_screen.select_previous(),
            NavigationAction::Down | NavigationAction::Next => self.menu_screen.select_next(),
            NavigationAction::Pick(index) => {
                self.menu_screen.select(index);
                self.activate_menu_item();
            }
            NavigationAction::Select => self.activate_menu_item(),
            NavigationAction::Back => self.state_manager.quit(),
            _ => {}
        }
    }

    fn activate_menu_item(&mut self) {
        self.menu_screen.clear_message();
        match self.menu_screen.selected_item() {
            MenuItem::Create => {
                self.creator_screen.reset();
                self.navigate(NavEvent::CreateRequested);
            }
            MenuItem::Play => match self.state_manager.apply(NavEvent::PlayRequested) {
                Ok(_) => self.start_session(),
                Err(e) => {
                    warn!("Cannot start quiz: {}", e);
                    self.menu_screen.set_message(user_friendly_message(&e));
                }
            },
            MenuItem::Quit => self.state_manager.quit(),
        }
    }

    fn handle_creator_events(&mut self, key: KeyEvent) {
        match self.creator_screen.handle_key_event(key) {
            Some(CreatorAction::Back) => {
                self.creator_screen.reset();
                self.navigate(NavEvent::BackRequested);
            }
            Some(CreatorAction::Finalized(quiz)) => {
                let len = quiz.len();
                if self.navigate(NavEvent::QuizFinalized(quiz)) {
                    info!("Quiz ready with {} question(s)", len);
                    self.menu_screen.set_quiz_available(Some(len));
                    self.creator_screen.reset();
                }
            }
            None => {}
        }
    }

    fn handle_player_events(&mut self, key: KeyEvent) {
        match self.play.handle_key_event(key) {
            Some(PlayerAction::Finished(summary)) => {
                info!("Session finished: {}/{}", summary.score, summary.total);
                if self.navigate(NavEvent::SessionFinished(summary)) {
                    self.results_screen.reset_selection();
                }
            }
            Some(PlayerAction::Back) => {
                self.navigate(NavEvent::BackRequested);
            }
            Some(PlayerAction::Answered(_) | PlayerAction::NextQuestion(_)) | None => {}
        }
    }

    fn handle_results_events(&mut self, key: KeyEvent) {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Left | NavigationAction::Previous => {
                self.results_screen.select_previous_action()
            }
            NavigationAction::Right | NavigationAction::Next => {
                self.results_screen.select_next_action()
            }
            NavigationAction::Select => match self.results_screen.selected_action() {
                ResultAction::Restart => {
                    if self.navigate(NavEvent::RestartRequested) {
                        self.start_session();
                    }
                }
                ResultAction::Back => self.leave_results(),
            },
            NavigationAction::Back => self.leave_results(),
            _ => {}
        }
    }

    fn leave_results(&mut self) {
        self.play.stop();
        self.navigate(NavEvent::BackRequested);
    }

    /// Start playing the stored quiz from its first question
    fn start_session(&mut self) {
        if let Some(quiz) = self.state_manager.quiz().cloned() {
            self.play.start(quiz);
        }
    }

    /// Apply a navigation event, logging it if rejected
    fn navigate(&mut self, event: NavEvent) -> bool {
        match self.state_manager.apply(event) {
            Ok(_) => true,
            Err(e) => {
                warn!("Navigation rejected: {}", e);
                false
            }
        }
    }
}
