//! Application state and logic

mod state;
mod handlers;
mod undo;
pub mod editor;

pub use state::*;
pub use undo::*;
