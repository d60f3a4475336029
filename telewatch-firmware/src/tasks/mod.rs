//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod companion_rx;
pub mod companion_tx;
pub mod tick;
pub mod watchface;

pub use button::button_task;
pub use companion_rx::companion_rx_task;
pub use companion_tx::companion_tx_task;
pub use tick::{tick_task, CLOCK};
pub use watchface::watchface_task;
