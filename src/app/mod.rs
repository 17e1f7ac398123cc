//! Application state and core logic

pub mod screen;
pub mod state;
pub mod wizard;

pub use screen::{AppCoordinator, Dialog, Screen};
pub use state::{App, Feedback, Stage};
pub use wizard::{Field, Wizard};
