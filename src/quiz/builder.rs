//! Quiz draft builder
//!
//! Holds the question currently being composed and the questions already
//! accepted. Every operation either applies fully or leaves the draft
//! untouched and returns the reason.

use crate::models::{QuestionRecord, QuizDefinition};
use crate::{QcmError, Result, DEFAULT_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS};
use tracing::{debug, info};

/// New position of the correct-answer mark after removing option `removed`.
pub fn reindex_after_removal(correct: Option<usize>, removed: usize) -> Option<usize> {
    match correct {
        Some(c) if c == removed => None,
        Some(c) if c > removed => Some(c - 1),
        other => other,
    }
}

/// Partial update of the draft's scalar fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftUpdate {
    pub prompt: Option<String>,
    pub time_limit_secs: Option<u32>,
}

impl DraftUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }
}

/// The question being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: Option<usize>,
    pub time_limit_secs: u32,
}

impl Draft {
    fn empty(time_limit_secs: u32) -> Self {
        Self {
            prompt: String::new(),
            options: vec![String::new()],
            correct_index: None,
            time_limit_secs,
        }
    }

    /// Checks run in a fixed order; the first failure wins.
    fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(QcmError::EmptyPrompt);
        }
        if self.options.len() < 2 {
            return Err(QcmError::InsufficientOptions);
        }
        if self.options.iter().any(|opt| opt.trim().is_empty()) {
            return Err(QcmError::BlankOption);
        }
        match self.correct_index {
            Some(index) if index < self.options.len() => {}
            _ => return Err(QcmError::NoCorrectAnswer),
        }
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&self.time_limit_secs) {
            return Err(QcmError::TimeLimitOutOfRange {
                got: self.time_limit_secs,
                min: MIN_TIME_LIMIT_SECS,
                max: MAX_TIME_LIMIT_SECS,
            });
        }
        Ok(())
    }
}

/// Accumulates validated questions into a quiz
#[derive(Debug, Clone)]
pub struct QuizBuilder {
    questions: Vec<QuestionRecord>,
    draft: Draft,
    default_time_limit_secs: u32,
}

impl QuizBuilder {
    /// Create a builder whose drafts start at the standard 30 second limit
    pub fn new() -> Self {
        Self::with_default_time_limit(DEFAULT_TIME_LIMIT_SECS)
    }

    /// Create a builder whose drafts start at `secs`
    pub fn with_default_time_limit(secs: u32) -> Self {
        Self {
            questions: Vec::new(),
            draft: Draft::empty(secs),
            default_time_limit_secs: secs,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Questions accepted so far
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn default_time_limit_secs(&self) -> u32 {
        self.default_time_limit_secs
    }

    pub fn update_draft_question(&mut self, update: DraftUpdate) {
        if let Some(prompt) = update.prompt {
            self.draft.prompt = prompt;
        }
        if let Some(secs) = update.time_limit_secs {
            self.draft.time_limit_secs = secs;
        }
    }

    /// Append an empty option slot
    pub fn add_option(&mut self) {
        self.draft.options.push(String::new());
    }

    /// Remove the option at `index`, keeping the correct mark on the same option.
    ///
    /// The draft always keeps at least one option slot.
    pub fn remove_option(&mut self, index: usize) -> Result<()> {
        self.check_option_index(index)?;
        if self.draft.options.len() == 1 {
            return Err(QcmError::LastOption);
        }
        self.draft.options.remove(index);
        self.draft.correct_index = reindex_after_removal(self.draft.correct_index, index);
        Ok(())
    }

    pub fn update_option(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.check_option_index(index)?;
        self.draft.options[index] = text.into();
        Ok(())
    }

    pub fn mark_correct(&mut self, index: usize) -> Result<()> {
        self.check_option_index(index)?;
        self.draft.correct_index = Some(index);
        Ok(())
    }

    /// Validate the draft and append it as a new question.
    ///
    /// On success the draft is reset to empty defaults. On failure nothing changes.
    pub fn add_question(&mut self) -> Result<&QuestionRecord> {
        if let Err(err) = self.draft.validate() {
            debug!("Draft rejected: {}", err);
            return Err(err);
        }

        let fresh = Draft::empty(self.default_time_limit_secs);
        let draft = std::mem::replace(&mut self.draft, fresh);
        let correct_index = draft.correct_index.ok_or(QcmError::NoCorrectAnswer)?;
        let record = QuestionRecord::new(
            draft.prompt,
            draft.options,
            correct_index,
            draft.time_limit_secs,
        );
        self.questions.push(record);
        let number = self.questions.len();
        let added = &self.questions[number - 1];
        info!(
            "Question {} added ({} options, {}s)",
            number,
            added.options().len(),
            added.time_limit_secs()
        );
        Ok(added)
    }

    /// Hand out the accepted questions as an immutable quiz.
    ///
    /// The builder keeps its own copy, so later edits never reach the returned quiz.
    pub fn finalize(&self) -> Result<QuizDefinition> {
        let quiz =
            QuizDefinition::from_questions(self.questions.clone()).ok_or(QcmError::EmptyQuiz)?;
        info!("Quiz finalized with {} questions", quiz.len());
        Ok(quiz)
    }

    fn check_option_index(&self, index: usize) -> Result<()> {
        let len = self.draft.options.len();
        if index >= len {
            return Err(QcmError::OptionOutOfRange { index, len });
        }
        Ok(())
    }
}

impl Default for QuizBuilder {
    fn default() -> Self {
        Self::new()
    }
}
