//! Digital time and date text

use core::fmt::Write;

use heapless::String;

use crate::time::WallTime;

/// Longest time string, `HH:MM:SS`
pub const TIME_TEXT_LEN: usize = 8;

/// Date string length, `Day DD Mon`
pub const DATE_TEXT_LEN: usize = 10;

pub type TimeText = String<TIME_TEXT_LEN>;
pub type DateText = String<DATE_TEXT_LEN>;

/// One cell of the 12h/24h by seconds matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormat {
    /// `HH:MM:SS`
    Hour24Seconds,
    /// `HH:MM`
    Hour24,
    /// `hh:MM:SS`, hour space-padded
    Hour12Seconds,
    /// `hh:MM`, hour space-padded
    Hour12,
}

impl TimeFormat {
    pub const fn select(use_24h: bool, show_seconds: bool) -> Self {
        match (use_24h, show_seconds) {
            (true, true) => TimeFormat::Hour24Seconds,
            (true, false) => TimeFormat::Hour24,
            (false, true) => TimeFormat::Hour12Seconds,
            (false, false) => TimeFormat::Hour12,
        }
    }

    pub const fn is_24h(self) -> bool {
        matches!(self, TimeFormat::Hour24Seconds | TimeFormat::Hour24)
    }

    pub const fn has_seconds(self) -> bool {
        matches!(self, TimeFormat::Hour24Seconds | TimeFormat::Hour12Seconds)
    }

    /// Render `time` in this format
    pub fn render(self, time: &WallTime) -> TimeText {
        let mut text = TimeText::new();
        // Every format fits TIME_TEXT_LEN, so writes cannot fail
        let _ = if self.is_24h() {
            write!(text, "{:02}:{:02}", time.hour(), time.minute())
        } else {
            write!(text, "{:2}:{:02}", hour_12(time.hour()), time.minute())
        };
        if self.has_seconds() {
            let _ = write!(text, ":{:02}", time.second());
        }
        text
    }
}

/// Format the digital time readout
pub fn format_time(time: &WallTime, use_24h: bool, show_seconds: bool) -> TimeText {
    TimeFormat::select(use_24h, show_seconds).render(time)
}

/// Format the digital date readout, e.g. `Thu  7 Mar`
pub fn format_date(time: &WallTime) -> DateText {
    let mut text = DateText::new();
    let _ = write!(
        text,
        "{} {:2} {}",
        time.weekday().abbrev(),
        time.day(),
        time.month_abbrev()
    );
    text
}

fn hour_12(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime::new(2024, 3, 7, hour, minute, second).unwrap()
    }

    #[test]
    fn test_24h() {
        assert_eq!(format_time(&at(13, 5, 9), true, true), "13:05:09");
        assert_eq!(format_time(&at(13, 5, 9), true, false), "13:05");
        assert_eq!(format_time(&at(0, 0, 0), true, false), "00:00");
    }

    #[test]
    fn test_12h() {
        assert_eq!(format_time(&at(0, 5, 0), false, false), "12:05");
        assert_eq!(format_time(&at(1, 30, 0), false, false), " 1:30");
        assert_eq!(format_time(&at(13, 5, 9), false, true), " 1:05:09");
        assert_eq!(format_time(&at(12, 0, 0), false, false), "12:00");
        assert_eq!(format_time(&at(23, 59, 59), false, true), "11:59:59");
    }

    #[test]
    fn test_format_matrix() {
        assert_eq!(TimeFormat::select(true, true), TimeFormat::Hour24Seconds);
        assert_eq!(TimeFormat::select(false, false), TimeFormat::Hour12);
        assert!(TimeFormat::Hour12Seconds.has_seconds());
        assert!(!TimeFormat::Hour12Seconds.is_24h());
    }

    #[test]
    fn test_date() {
        assert_eq!(format_date(&at(0, 0, 0)), "Thu  7 Mar");
        let t = WallTime::new(2023, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_date(&t), "Sun 31 Dec");
    }

    proptest! {
        #[test]
        fn prop_date_is_ten_chars(
            year in 1970u16..2100,
            month in 1u8..=12,
            day in 1u8..=28,
        ) {
            let t = WallTime::new(year, month, day, 0, 0, 0).unwrap();
            prop_assert_eq!(format_date(&t).len(), DATE_TEXT_LEN);
        }

        #[test]
        fn prop_time_length_tracks_seconds(
            hour in 0u8..24,
            minute in 0u8..60,
            second in 0u8..60,
            use_24h in any::<bool>(),
        ) {
            let t = at(hour, minute, second);
            prop_assert_eq!(format_time(&t, use_24h, true).len(), 8);
            prop_assert_eq!(format_time(&t, use_24h, false).len(), 5);
        }
    }
}
