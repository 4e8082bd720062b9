//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod creator;
pub mod menu;
pub mod player;
pub mod results;

pub use creator::{CreatorAction, CreatorField, CreatorScreen};
pub use menu::{MenuItem, MenuScreen};
pub use player::{PlayerAction, PlayerScreen};
pub use results::{ResultAction, ResultsScreen};
