//! Data models module
//!
//! Question records, finished quiz definitions and session summaries.

pub mod quiz;

pub use quiz::{AnswerOutcome, QuestionRecord, QuizDefinition, SessionSummary};
