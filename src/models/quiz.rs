//! Quiz data models
//!
//! Contains the validated question record, the immutable quiz definition
//! handed from the creator to the player, and the summary reported when a
//! session ends.

use chrono::{DateTime, Utc};
use std::ops::Index;
use std::sync::Arc;

/// One validated quiz question
///
/// Records are only built by [`crate::quiz::QuizBuilder`], after every field
/// has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    time_limit_secs: u32,
}

impl QuestionRecord {
    pub(crate) fn new(
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
        time_limit_secs: u32,
    ) -> Self {
        Self {
            prompt,
            options,
            correct_index,
            time_limit_secs,
        }
    }

    /// Question text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answer options in display order
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Seconds allowed to answer
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    /// Whether `index` is the correct option
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Finalized, immutable, non-empty list of questions
///
/// Cloning is cheap and every clone shares the same questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    questions: Arc<[QuestionRecord]>,
}

impl QuizDefinition {
    /// Returns `None` when `questions` is empty
    pub(crate) fn from_questions(questions: Vec<QuestionRecord>) -> Option<Self> {
        if questions.is_empty() {
            None
        } else {
            Some(Self {
                questions: questions.into(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a definition built through the creator
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.questions.iter()
    }
}

impl Index<usize> for QuizDefinition {
    type Output = QuestionRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.questions[index]
    }
}

impl<'a> IntoIterator for &'a QuizDefinition {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// How a single question was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The correct option was selected in time
    Correct,
    /// A wrong option was selected
    Incorrect { selected: usize },
    /// The countdown reached zero without a selection
    TimedOut,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }

    /// Short label used on the results screen
    pub fn label(&self) -> &'static str {
        match self {
            AnswerOutcome::Correct => "correct",
            AnswerOutcome::Incorrect { .. } => "wrong",
            AnswerOutcome::TimedOut => "timed out",
        }
    }
}

/// Final result of one run through a quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of correctly answered questions
    pub score: u32,
    /// Number of questions in the quiz
    pub total: u32,
    /// Outcome per question, in quiz order
    pub outcomes: Vec<AnswerOutcome>,
    /// When the last question was advanced past
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn timed_out_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, AnswerOutcome::TimedOut))
            .count()
    }

    /// Score as a ratio between 0.0 and 1.0
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }
}
