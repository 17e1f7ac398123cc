//! Terminal UI components using ratatui

pub mod gallows;
mod terminal;
pub mod theme;
mod ui;

pub use gallows::{ArtCache, HangmanStyle};
pub use terminal::Tui;
pub use theme::Theme;
pub use ui::render;
