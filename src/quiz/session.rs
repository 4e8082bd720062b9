//! Quiz session runner
//!
//! Steps through a [`QuizDefinition`] one question at a time. Each question is
//! resolved exactly once, either by a selection or by its countdown running out.

use crate::models::{AnswerOutcome, QuestionRecord, QuizDefinition, SessionSummary};
use crate::{QcmError, Result};
use chrono::Utc;
use tracing::{debug, info};

/// Per-question state of a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_index: usize,
    pub score: u32,
    pub time_remaining: u32,
    pub is_answered: bool,
    pub selected_index: Option<usize>,
}

/// Effect of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick was for another question, or the question is already resolved
    Ignored,
    /// One second elapsed
    Counting { remaining: u32 },
    /// Countdown reached zero and resolved the question
    TimedOut,
}

/// Result of advancing past an answered question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index
    Next(usize),
    /// The last question was passed
    Finished(SessionSummary),
}

/// Drives one run through a quiz
#[derive(Debug, Clone)]
pub struct SessionRunner {
    quiz: QuizDefinition,
    state: SessionState,
    outcomes: Vec<AnswerOutcome>,
}

impl SessionRunner {
    /// Start a session on the first question
    pub fn new(quiz: QuizDefinition) -> Self {
        let time_remaining = quiz.get(0).map(|q| q.time_limit_secs()).unwrap_or(0);
        info!("Session started ({} questions)", quiz.len());
        Self {
            state: SessionState {
                current_index: 0,
                score: 0,
                time_remaining,
                is_answered: false,
                selected_index: None,
            },
            outcomes: Vec::with_capacity(quiz.len()),
            quiz,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    pub fn current_question(&self) -> &QuestionRecord {
        &self.quiz[self.state.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn is_answered(&self) -> bool {
        self.state.is_answered
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected_index
    }

    pub fn is_last_question(&self) -> bool {
        self.state.current_index + 1 >= self.quiz.len()
    }

    /// Remaining time as a ratio of the question's limit, for the gauge
    pub fn time_ratio(&self) -> f64 {
        let limit = self.current_question().time_limit_secs();
        if limit == 0 {
            0.0
        } else {
            self.state.time_remaining as f64 / limit as f64
        }
    }

    /// Apply one countdown tick addressed to `question`.
    pub fn tick(&mut self, question: usize) -> TickOutcome {
        if question != self.state.current_index
            || self.state.is_answered
            || self.state.time_remaining == 0
        {
            return TickOutcome::Ignored;
        }

        if self.state.time_remaining <= 1 {
            self.state.time_remaining = 0;
            self.state.is_answered = true;
            self.outcomes.push(AnswerOutcome::TimedOut);
            info!("Question {} timed out", question + 1);
            TickOutcome::TimedOut
        } else {
            self.state.time_remaining -= 1;
            TickOutcome::Counting {
                remaining: self.state.time_remaining,
            }
        }
    }

    /// Record the user's choice for the current question.
    ///
    /// Returns `Ok(None)` when the question was already resolved.
    pub fn select_answer(&mut self, index: usize) -> Result<Option<AnswerOutcome>> {
        if self.state.is_answered {
            debug!("Ignoring late answer {} for resolved question", index);
            return Ok(None);
        }

        let question = self.current_question();
        let len = question.options().len();
        if index >= len {
            return Err(QcmError::OptionOutOfRange { index, len });
        }

        let outcome = if question.is_correct(index) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect { selected: index }
        };

        self.state.is_answered = true;
        self.state.selected_index = Some(index);
        if outcome.is_correct() {
            self.state.score += 1;
        }
        self.outcomes.push(outcome);
        info!(
            "Question {} answered: {} (score {})",
            self.state.current_index + 1,
            outcome.label(),
            self.state.score
        );
        Ok(Some(outcome))
    }

    /// Move past the current, answered question.
    pub fn next_question(&mut self) -> Result<Advance> {
        if !self.state.is_answered {
            return Err(QcmError::QuestionNotAnswered);
        }

        if self.is_last_question() {
            let summary = SessionSummary {
                score: self.state.score,
                total: self.quiz.len() as u32,
                outcomes: self.outcomes.clone(),
                finished_at: Utc::now(),
            };
            info!("Session finished: {}/{}", summary.score, summary.total);
            return Ok(Advance::Finished(summary));
        }

        let next = self.state.current_index + 1;
        self.state = SessionState {
            current_index: next,
            score: self.state.score,
            time_remaining: self.quiz[next].time_limit_secs(),
            is_answered: false,
            selected_index: None,
        };
        Ok(Advance::Next(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::builder::{DraftUpdate, QuizBuilder};

    fn quiz(limits: &[u32]) -> QuizDefinition {
        let mut builder = QuizBuilder::new();
        for (i, limit) in limits.iter().enumerate() {
            builder.update_draft_question(
                DraftUpdate::new()
                    .prompt(format!("Question {}", i))
                    .time_limit(*limit),
            );
            builder.update_option(0, "right").unwrap();
            builder.add_option();
            builder.update_option(1, "wrong").unwrap();
            builder.mark_correct(0).unwrap();
            builder.add_question().unwrap();
        }
        builder.finalize().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let runner = SessionRunner::new(quiz(&[15, 20]));
        assert_eq!(
            runner.state(),
            &SessionState {
                current_index: 0,
                score: 0,
                time_remaining: 15,
                is_answered: false,
                selected_index: None,
            }
        );
    }

    #[test]
    fn test_correct_answer_scores_once() {
        let mut runner = SessionRunner::new(quiz(&[10]));
        assert_eq!(runner.select_answer(0).unwrap(), Some(AnswerOutcome::Correct));
        assert_eq!(runner.score(), 1);

        assert_eq!(runner.select_answer(0).unwrap(), None);
        assert_eq!(runner.select_answer(1).unwrap(), None);
        assert_eq!(runner.score(), 1);
        assert_eq!(runner.selected_index(), Some(0));
    }

    #[test]
    fn test_wrong_answer_scores_nothing() {
        let mut runner = SessionRunner::new(quiz(&[10]));
        assert_eq!(
            runner.select_answer(1).unwrap(),
            Some(AnswerOutcome::Incorrect { selected: 1 })
        );
        assert_eq!(runner.score(), 0);
        assert!(runner.is_answered());
    }

    #[test]
    fn test_out_of_range_answer_rejected() {
        let mut runner = SessionRunner::new(quiz(&[10]));
        assert!(matches!(
            runner.select_answer(5),
            Err(QcmError::OptionOutOfRange { index: 5, len: 2 })
        ));
        assert!(!runner.is_answered());
    }

    #[test]
    fn test_countdown_times_out() {
        let mut runner = SessionRunner::new(quiz(&[5]));
        let mut last = runner.time_remaining();
        for _ in 0..4 {
            assert!(matches!(runner.tick(0), TickOutcome::Counting { .. }));
            assert!(runner.time_remaining() < last);
            last = runner.time_remaining();
        }
        assert_eq!(runner.time_remaining(), 1);
        assert_eq!(runner.tick(0), TickOutcome::TimedOut);
        assert_eq!(runner.time_remaining(), 0);
        assert!(runner.is_answered());
        assert_eq!(runner.selected_index(), None);

        assert_eq!(runner.tick(0), TickOutcome::Ignored);
        assert_eq!(runner.time_remaining(), 0);
        assert_eq!(runner.select_answer(0).unwrap(), None);
        assert_eq!(runner.score(), 0);
    }

    #[test]
    fn test_ticks_stop_after_answer() {
        let mut runner = SessionRunner::new(quiz(&[10]));
        runner.tick(0);
        runner.select_answer(0).unwrap();
        assert_eq!(runner.tick(0), TickOutcome::Ignored);
        assert_eq!(runner.time_remaining(), 9);
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut runner = SessionRunner::new(quiz(&[10, 10]));
        runner.select_answer(0).unwrap();
        assert_eq!(runner.next_question().unwrap(), Advance::Next(1));
        assert_eq!(runner.tick(0), TickOutcome::Ignored);
        assert_eq!(runner.time_remaining(), 10);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut runner = SessionRunner::new(quiz(&[10, 10]));
        assert!(matches!(
            runner.next_question(),
            Err(QcmError::QuestionNotAnswered)
        ));
        assert_eq!(runner.current_index(), 0);
    }

    #[test]
    fn test_advance_resets_question_fields() {
        let mut runner = SessionRunner::new(quiz(&[10, 25]));
        runner.tick(0);
        runner.select_answer(0).unwrap();
        runner.next_question().unwrap();
        assert_eq!(
            runner.state(),
            &SessionState {
                current_index: 1,
                score: 1,
                time_remaining: 25,
                is_answered: false,
                selected_index: None,
            }
        );
    }

    #[test]
    fn test_full_run_summary() {
        let mut runner = SessionRunner::new(quiz(&[5, 5, 5]));
        runner.select_answer(0).unwrap();
        runner.next_question().unwrap();
        for _ in 0..5 {
            runner.tick(1);
        }
        runner.next_question().unwrap();
        runner.select_answer(1).unwrap();

        match runner.next_question().unwrap() {
            Advance::Finished(summary) => {
                assert_eq!(summary.score, 1);
                assert_eq!(summary.total, 3);
                assert_eq!(
                    summary.outcomes,
                    vec![
                        AnswerOutcome::Correct,
                        AnswerOutcome::TimedOut,
                        AnswerOutcome::Incorrect { selected: 1 },
                    ]
                );
            }
            other => panic!("expected finished session, got {:?}", other),
        }
    }
}
