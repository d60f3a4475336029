//! Window toggle button task

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};

use crate::channels::{WatchEvent, EVENTS};

/// Contact bounce settle time
const DEBOUNCE_MS: u64 = 30;

/// Button task - each press toggles the watchface window
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>) {
    info!("Button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;

        if button.is_low() {
            debug!("Button pressed");
            EVENTS.send(WatchEvent::Button).await;
        }

        button.wait_for_high().await;
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
    }
}
