//! Host input handling

pub mod state;

pub use state::InputState;
