//! On-chip real-time clock
//!
//! The RP2040 RTC loses its value on reset, so the firmware seeds it at
//! boot and the companion can set it later.

use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use embassy_rp::Peri;
use telewatch_core::{WallTime, Weekday};

/// Errors from clock operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// RTC has not been started
    NotRunning,
    /// RTC rejected or returned an impossible date
    InvalidTime,
}

/// RTC speaking [`WallTime`]
pub struct RtcClock<'d> {
    rtc: Rtc<'d, RTC>,
}

impl<'d> RtcClock<'d> {
    pub fn new(rtc: Peri<'d, RTC>) -> Self {
        Self { rtc: Rtc::new(rtc) }
    }

    pub fn is_running(&self) -> bool {
        self.rtc.is_running()
    }

    /// Current time
    pub fn now(&self) -> Result<WallTime, ClockError> {
        let dt = self.rtc.now().map_err(|_| ClockError::NotRunning)?;
        WallTime::new(dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second)
            .ok_or(ClockError::InvalidTime)
    }

    /// Set and start the clock
    pub fn set(&mut self, time: &WallTime) -> Result<(), ClockError> {
        self.rtc
            .set_datetime(to_datetime(time))
            .map_err(|_| ClockError::InvalidTime)
    }
}

fn to_datetime(time: &WallTime) -> DateTime {
    DateTime {
        year: time.year(),
        month: time.month(),
        day: time.day(),
        day_of_week: day_of_week(time.weekday()),
        hour: time.hour(),
        minute: time.minute(),
        second: time.second(),
    }
}

fn day_of_week(weekday: Weekday) -> DayOfWeek {
    match weekday {
        Weekday::Sunday => DayOfWeek::Sunday,
        Weekday::Monday => DayOfWeek::Monday,
        Weekday::Tuesday => DayOfWeek::Tuesday,
        Weekday::Wednesday => DayOfWeek::Wednesday,
        Weekday::Thursday => DayOfWeek::Thursday,
        Weekday::Friday => DayOfWeek::Friday,
        Weekday::Saturday => DayOfWeek::Saturday,
    }
}
