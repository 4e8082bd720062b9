//! QCM - terminal multiple-choice quizzes
//!
//! Build a quiz question by question, then play it back with a countdown
//! on every question and a final score.

pub mod app;
pub mod cli;
pub mod config;
pub mod models;
pub mod quiz;
pub mod util;

/// Common error type for quiz building, playing and the terminal front end
#[derive(Debug, thiserror::Error)]
pub enum QcmError {
    /// Prompt field blank when adding a question
    #[error("Please enter a question.")]
    EmptyPrompt,
    /// Fewer than two options when adding a question
    #[error("Please add at least two options.")]
    InsufficientOptions,
    /// One or more options blank when adding a question
    #[error("All options must be filled in.")]
    BlankOption,
    /// No option marked correct when adding a question
    #[error("Please select a correct answer.")]
    NoCorrectAnswer,
    /// Time limit outside the accepted range
    #[error("Time limit must be between {min} and {max} seconds (got {got}).")]
    TimeLimitOutOfRange { got: u32, min: u32, max: u32 },
    /// Finalize attempted with zero accumulated questions
    #[error("Please add at least one question before creating the quiz.")]
    EmptyQuiz,
    /// Option index does not exist
    #[error("Option {index} does not exist ({len} options).")]
    OptionOutOfRange { index: usize, len: usize },
    /// Removing the only remaining option slot
    #[error("A question needs at least one option slot.")]
    LastOption,
    /// Advance requested before the current question was resolved
    #[error("The current question has not been answered yet.")]
    QuestionNotAnswered,
    /// Play requested while no quiz has been created
    #[error("No quiz available. Create one first.")]
    NoQuizAvailable,
    /// Navigation event not permitted from the current screen
    #[error("Cannot handle {event} while on the {from} screen")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for QcmError {
    fn from(err: toml::de::Error) -> Self {
        QcmError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QcmError {
    fn from(err: toml::ser::Error) -> Self {
        QcmError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for QCM operations
pub type Result<T> = std::result::Result<T, QcmError>;

/// Error handling utilities
pub mod error {
    use super::QcmError;

    /// Whether the error is a local validation failure the user can correct
    pub fn is_validation_error(error: &QcmError) -> bool {
        matches!(
            error,
            QcmError::EmptyPrompt
                | QcmError::InsufficientOptions
                | QcmError::BlankOption
                | QcmError::NoCorrectAnswer
                | QcmError::TimeLimitOutOfRange { .. }
                | QcmError::EmptyQuiz
                | QcmError::OptionOutOfRange { .. }
                | QcmError::LastOption
        )
    }

    /// Convert error to the message shown on screen
    pub fn user_friendly_message(error: &QcmError) -> String {
        match error {
            QcmError::QuestionNotAnswered => {
                "Answer the question (or wait for the timer) before moving on.".to_string()
            }
            QcmError::InvalidTransition { .. } => "That action is not available here.".to_string(),
            QcmError::Config(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            _ => error.to_string(),
        }
    }
}

pub const APP_NAME: &str = "qcm";
pub const CONFIG_FILE: &str = "qcm.toml";
pub const LOG_FILE: &str = "qcm.log";
/// Shortest accepted per-question time limit
pub const MIN_TIME_LIMIT_SECS: u32 = 5;
/// Longest accepted per-question time limit
pub const MAX_TIME_LIMIT_SECS: u32 = 120;
/// Time limit a fresh draft starts with
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;
