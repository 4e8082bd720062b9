//! Integration tests for the menu and navigation state

use qcm::app::screens::{MenuItem, MenuScreen};
use qcm::app::{NavEvent, Screen, StateManager};
use qcm::quiz::{DraftUpdate, QuizBuilder};
use qcm::QcmError;

fn one_question_quiz() -> qcm::models::QuizDefinition {
    let mut builder = QuizBuilder::new();
    builder.update_draft_question(DraftUpdate::new().prompt("Capital of France?"));
    builder.update_option(0, "Paris").unwrap();
    builder.add_option();
    builder.update_option(1, "Lyon").unwrap();
    builder.mark_correct(0).unwrap();
    builder.add_question().unwrap();
    builder.finalize().unwrap()
}

#[test]
fn test_menu_screen_integration() {
    let mut menu = MenuScreen::new();
    assert_eq!(menu.selected_item(), MenuItem::Create);
    assert!(!menu.is_enabled(MenuItem::Play));

    menu.select_next();
    assert_eq!(menu.selected_item(), MenuItem::Play);

    menu.set_quiz_available(Some(1));
    assert!(menu.is_enabled(MenuItem::Play));
}

#[test]
fn test_play_blocked_until_quiz_exists() {
    let mut manager = StateManager::new();
    assert_eq!(manager.current_screen(), Screen::Menu);

    assert!(matches!(
        manager.apply(NavEvent::PlayRequested),
        Err(QcmError::NoQuizAvailable)
    ));
    assert_eq!(manager.current_screen(), Screen::Menu);
}

#[test]
fn test_full_navigation_cycle() {
    let mut manager = StateManager::new();

    manager.apply(NavEvent::CreateRequested).unwrap();
    assert_eq!(manager.current_screen(), Screen::Create);

    manager
        .apply(NavEvent::QuizFinalized(one_question_quiz()))
        .unwrap();
    assert_eq!(manager.current_screen(), Screen::Menu);
    assert!(manager.state().has_quiz());

    manager.apply(NavEvent::PlayRequested).unwrap();
    assert_eq!(manager.current_screen(), Screen::Play);

    let mut runner = qcm::quiz::SessionRunner::new(manager.quiz().unwrap().clone());
    runner.select_answer(0).unwrap();
    let summary = match runner.next_question().unwrap() {
        qcm::quiz::Advance::Finished(summary) => summary,
        other => panic!("expected finish, got {:?}", other),
    };

    manager.apply(NavEvent::SessionFinished(summary)).unwrap();
    assert_eq!(manager.current_screen(), Screen::Results);
    assert_eq!(manager.last_summary().map(|s| s.score), Some(1));

    manager.apply(NavEvent::RestartRequested).unwrap();
    assert_eq!(manager.current_screen(), Screen::Play);
    assert!(manager.last_summary().is_none());

    manager.apply(NavEvent::BackRequested).unwrap();
    assert_eq!(manager.current_screen(), Screen::Menu);
    assert!(manager.state().has_quiz());
}

#[test]
fn test_invalid_event_keeps_state() {
    let mut manager = StateManager::new();
    let err = manager.apply(NavEvent::RestartRequested).unwrap_err();
    assert!(matches!(err, QcmError::InvalidTransition { .. }));
    assert_eq!(manager.current_screen(), Screen::Menu);
}
