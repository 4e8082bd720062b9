//! Play controller
//!
//! Owns the player screen together with the countdown that drives it. At most
//! one countdown runs, and only ticks it sent reach the session.

use crate::app::screens::{PlayerAction, PlayerScreen};
use crate::models::QuizDefinition;
use crate::quiz::{Countdown, CountdownTick, TickOutcome};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Ticks buffered between two redraws
const TICK_CHANNEL_CAPACITY: usize = 32;

/// Player screen plus its per-question countdown
#[derive(Debug)]
pub struct PlayController {
    player: PlayerScreen,
    countdown: Option<Countdown>,
    tick_interval: Duration,
    tick_tx: mpsc::Sender<CountdownTick>,
    tick_rx: mpsc::Receiver<CountdownTick>,
}

impl PlayController {
    /// Create an idle controller whose countdowns tick every `tick_interval`
    pub fn new(tick_interval: Duration) -> Self {
        let (tick_tx, tick_rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);
        Self {
            player: PlayerScreen::new(),
            countdown: None,
            tick_interval,
            tick_tx,
            tick_rx,
        }
    }

    pub fn player(&self) -> &PlayerScreen {
        &self.player
    }

    /// Whether a countdown is running for the question on screen
    pub fn is_counting(&self) -> bool {
        self.countdown.is_some()
    }

    /// Start a fresh session on `quiz`, replacing any previous one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, quiz: QuizDefinition) {
        info!("Starting session with {} question(s)", quiz.len());
        self.player.start(quiz);
        self.start_countdown(0);
    }

    /// Abort the session and its countdown
    pub fn stop(&mut self) {
        self.countdown = None;
        self.player.stop();
    }

    /// Feed pending ticks to the session. Ticks from a countdown that is no
    /// longer current are dropped.
    pub fn drain_ticks(&mut self) {
        while let Ok(tick) = self.tick_rx.try_recv() {
            match &self.countdown {
                Some(countdown) if countdown.owns(&tick) => {}
                _ => {
                    debug!("Dropping stale tick for question {}", tick.question + 1);
                    continue;
                }
            }

            if let TickOutcome::TimedOut = self.player.tick(tick.question) {
                self.countdown = None;
            }
        }
    }

    /// Handle a key press on the player, keeping the countdown in step
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<PlayerAction> {
        let action = self.player.handle_key_event(key)?;
        match &action {
            PlayerAction::Answered(outcome) => {
                debug!("Answer recorded: {}", outcome.label());
                self.countdown = None;
            }
            PlayerAction::NextQuestion(index) => self.start_countdown(*index),
            PlayerAction::Finished(_) => self.countdown = None,
            PlayerAction::Back => self.stop(),
        }
        Some(action)
    }

    pub fn render(&mut self, f: &mut Frame) {
        self.player.render(f);
    }

    /// Replace the running countdown with a fresh one for `question`
    fn start_countdown(&mut self, question: usize) {
        self.countdown = Some(Countdown::start(
            question,
            self.tick_interval,
            self.tick_tx.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{DraftUpdate, QuizBuilder};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::time::sleep;

    fn quiz(count: usize, time_limit: u32) -> QuizDefinition {
        let mut builder = QuizBuilder::new();
        for i in 0..count {
            builder.update_draft_question(
                DraftUpdate::new()
                    .prompt(format!("Q{}", i + 1))
                    .time_limit(time_limit),
            );
            builder.update_option(0, "3").unwrap();
            builder.add_option();
            builder.update_option(1, "4").unwrap();
            builder.mark_correct(1).unwrap();
            builder.add_question().unwrap();
        }
        builder.finalize().unwrap()
    }

    fn press(play: &mut PlayController, code: KeyCode) -> Option<PlayerAction> {
        play.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn remaining(play: &PlayController) -> u32 {
        play.player().runner().unwrap().time_remaining()
    }

    fn current_id(play: &PlayController) -> u64 {
        play.countdown.as_ref().unwrap().id()
    }

    #[tokio::test]
    async fn test_restart_drops_previous_countdown_ticks() {
        let mut play = PlayController::new(Duration::from_secs(3600));
        play.start(quiz(1, 10));
        let old = current_id(&play);

        play.start(quiz(1, 10));
        let new = current_id(&play);
        assert_ne!(old, new);

        // A tick the old countdown queued for the same question index
        play.tick_tx
            .send(CountdownTick {
                countdown: old,
                question: 0,
            })
            .await
            .unwrap();
        play.drain_ticks();
        assert_eq!(remaining(&play), 10);

        play.tick_tx
            .send(CountdownTick {
                countdown: new,
                question: 0,
            })
            .await
            .unwrap();
        play.drain_ticks();
        assert_eq!(remaining(&play), 9);
    }

    #[tokio::test]
    async fn test_back_cancels_countdown() {
        let mut play = PlayController::new(Duration::from_millis(5));
        play.start(quiz(1, 120));
        sleep(Duration::from_millis(30)).await;

        assert_eq!(press(&mut play, KeyCode::Esc), Some(PlayerAction::Back));
        assert!(!play.is_counting());
        assert!(play.player().runner().is_none());

        play.drain_ticks();
        sleep(Duration::from_millis(30)).await;
        assert!(play.tick_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_answering_stops_ticks() {
        let mut play = PlayController::new(Duration::from_millis(5));
        play.start(quiz(1, 120));
        sleep(Duration::from_millis(30)).await;
        play.drain_ticks();
        let before = remaining(&play);
        assert!(before < 120);

        assert!(matches!(
            press(&mut play, KeyCode::Char('2')),
            Some(PlayerAction::Answered(_))
        ));
        assert!(!play.is_counting());

        sleep(Duration::from_millis(30)).await;
        assert!(play.tick_rx.try_recv().is_err());
        assert_eq!(remaining(&play), before);
    }

    #[tokio::test]
    async fn test_next_question_gets_own_countdown() {
        let mut play = PlayController::new(Duration::from_secs(3600));
        play.start(quiz(2, 10));
        let first = current_id(&play);

        press(&mut play, KeyCode::Char('1'));
        assert!(!play.is_counting());
        assert_eq!(
            press(&mut play, KeyCode::Enter),
            Some(PlayerAction::NextQuestion(1))
        );
        assert!(play.is_counting());
        assert_ne!(current_id(&play), first);
        assert_eq!(play.countdown.as_ref().unwrap().question(), 1);
    }

    #[tokio::test]
    async fn test_timeout_releases_countdown() {
        let mut play = PlayController::new(Duration::from_millis(1));
        play.start(quiz(1, 5));

        for _ in 0..200 {
            sleep(Duration::from_millis(5)).await;
            play.drain_ticks();
            if !play.is_counting() {
                break;
            }
        }
        assert!(!play.is_counting());
        assert_eq!(remaining(&play), 0);
        assert!(play.player().runner().unwrap().is_answered());
    }
}
