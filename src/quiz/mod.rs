//! Quiz logic module
//!
//! Draft building, session running and the per-question countdown. Nothing
//! here depends on the terminal front end.

pub mod builder;
pub mod session;
pub mod timer;

pub use builder::{reindex_after_removal, Draft, DraftUpdate, QuizBuilder};
pub use session::{Advance, SessionRunner, SessionState, TickOutcome};
pub use timer::{Countdown, CountdownTick};
