//! Display state machine
//!
//! Tracks whether the watchface window is visible and whether its element
//! set must be rebuilt before the next tick is rendered.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
