//! Board configuration
//!
//! Constants generated by build.rs from watch.toml.

use telewatch_core::WallTime;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// RTC seed used when the clock is not running after reset
pub fn initial_clock() -> Option<WallTime> {
    let (year, month, day, hour, minute, second) = INITIAL_CLOCK;
    WallTime::new(year, month, day, hour, minute, second)
}
