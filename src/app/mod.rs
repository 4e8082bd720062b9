//! TUI application module
//!
//! Contains the terminal user interface components, screen management,
//! and application state handling.

pub mod app;
pub mod play;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::App;
pub use play::PlayController;
pub use screens::{CreatorScreen, MenuScreen, PlayerScreen, ResultAction, ResultsScreen};
pub use state::{transition, NavEvent, NavState, NavigationAction, Screen, StateManager};
pub use tui::Tui;
