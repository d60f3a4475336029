//! Render scheduler
//!
//! Owns the settings, the element set and the display state, and decides
//! per tick what has to be rebuilt and what has to be repainted.

mod gate;
mod watchface;

pub use gate::TickGate;
pub use watchface::{TickReport, Watchface};
