//! Tick task for wall-clock updates
//!
//! Polls the RTC and posts a tick to the watchface task whenever the
//! subscribed boundary is crossed. Per-minute ticks therefore land on
//! second 0.

use core::cell::RefCell;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker};

use telewatch_core::scheduler::TickGate;
use telewatch_core::WallTime;
use telewatch_hal_rp2040::{ClockError, RtcClock};

use crate::channels::{TickCommand, WatchEvent, EVENTS, TICK_CMD};

/// RTC poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 100;

/// The RTC, shared by the tick and watchface tasks
pub static CLOCK: Mutex<CriticalSectionRawMutex, RefCell<Option<RtcClock<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Read the current time
pub fn read_clock() -> Result<WallTime, ClockError> {
    CLOCK.lock(|clock| match clock.borrow().as_ref() {
        Some(clock) => clock.now(),
        None => Err(ClockError::NotRunning),
    })
}

/// Set the RTC
pub fn set_clock(time: &WallTime) -> Result<(), ClockError> {
    CLOCK.lock(|clock| match clock.borrow_mut().as_mut() {
        Some(clock) => clock.set(time),
        None => Err(ClockError::NotRunning),
    })
}

/// Tick task - posts `WatchEvent::Tick` at the subscribed cadence
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut gate = TickGate::new();

    loop {
        match select(ticker.next(), TICK_CMD.wait()).await {
            Either::First(()) => {
                if gate.cadence().is_none() {
                    continue;
                }
                let now = match read_clock() {
                    Ok(now) => now,
                    Err(e) => {
                        warn!("RTC read failed: {:?}", e);
                        continue;
                    }
                };

                if let Some(now) = gate.poll(now) {
                    trace!("Tick {:?}", now);
                    EVENTS.send(WatchEvent::Tick(now)).await;
                }
            }
            Either::Second(command) => {
                debug!("Tick command: {:?}", command);
                match command {
                    // The subscriber rendered the current time itself
                    TickCommand::Subscribe(cadence) => gate.subscribe(cadence, read_clock().ok()),
                    TickCommand::Unsubscribe => gate.unsubscribe(),
                }
            }
        }
    }
}
