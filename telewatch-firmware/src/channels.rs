//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Every watchface mutation happens in the watchface task; the other tasks
//! only post events to it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use telewatch_core::traits::Cadence;
use telewatch_core::WallTime;
use telewatch_protocol::{CompanionMessage, WatchMessage};

/// Channel capacity for watchface events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for messages to the companion
const OUTBOX_SIZE: usize = 4;

/// Something the watchface task must react to
pub enum WatchEvent {
    /// Subscribed time boundary crossed
    Tick(WallTime),
    /// Decoded message from the companion
    Companion(CompanionMessage),
    /// Window toggle button pressed
    Button,
}

/// Subscription change for the tick task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickCommand {
    Subscribe(Cadence),
    Unsubscribe,
}

/// Events for the watchface task
pub static EVENTS: Channel<CriticalSectionRawMutex, WatchEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Latest subscription request (updated by the watchface task)
pub static TICK_CMD: Signal<CriticalSectionRawMutex, TickCommand> = Signal::new();

/// Messages waiting to go to the companion
pub static OUTBOX: Channel<CriticalSectionRawMutex, WatchMessage, OUTBOX_SIZE> = Channel::new();
