//! Wall-clock time values delivered by the tick source

use telewatch_protocol::ClockTime;

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Weekday from days since Sunday (wraps modulo 7)
    pub const fn from_days_from_sunday(days: u8) -> Self {
        match days % 7 {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    /// Days since Sunday (0-6)
    pub const fn days_from_sunday(self) -> u8 {
        self as u8
    }

    /// Three-letter English abbreviation
    pub const fn abbrev(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

/// Earliest year a [`WallTime`] can hold
pub const MIN_YEAR: u16 = 1;
/// Latest year a [`WallTime`] can hold, the RTC's 12-bit year field
pub const MAX_YEAR: u16 = 4095;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Broken-down local time
///
/// Only constructed through [`WallTime::new`], so every field is in range
/// and `weekday` agrees with the civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallTime {
    year: u16,
    month: u8,
    day: u8,
    weekday: Weekday,
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    /// Build a time from civil date and time of day
    ///
    /// Returns `None` when any field is out of range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return None;
        }

        Some(Self {
            year,
            month,
            day,
            weekday: weekday_of(year, month, day),
            hour,
            minute,
            second,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Month, 1-12
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, 1-31
    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Hour, 0-23
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Three-letter English month abbreviation
    pub fn month_abbrev(&self) -> &'static str {
        MONTH_ABBREV[(self.month - 1) as usize]
    }

    /// True exactly at hh:00:00
    pub const fn is_top_of_hour(&self) -> bool {
        self.minute == 0 && self.second == 0
    }

    /// Same time with the seconds field replaced
    pub fn with_second(self, second: u8) -> Option<Self> {
        (second <= 59).then_some(Self { second, ..self })
    }

    /// Check if `other` is in a different second, ignoring the date
    pub fn second_changed(&self, other: &Self) -> bool {
        self.second != other.second || self.minute_changed(other)
    }

    /// Check if `other` is in a different minute, ignoring the date
    pub fn minute_changed(&self, other: &Self) -> bool {
        self.minute != other.minute || self.hour != other.hour
    }
}

impl TryFrom<ClockTime> for WallTime {
    type Error = ();

    fn try_from(t: ClockTime) -> Result<Self, Self::Error> {
        WallTime::new(t.year, t.month, t.day, t.hour, t.minute, t.second).ok_or(())
    }
}

impl From<WallTime> for ClockTime {
    fn from(t: WallTime) -> Self {
        ClockTime {
            year: t.year,
            month: t.month,
            day: t.day,
            hour: t.hour,
            minute: t.minute,
            second: t.second,
        }
    }
}

const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

// Sakamoto's method; year must be at least 1, month 1-12
fn weekday_of(year: u16, month: u8, day: u8) -> Weekday {
    const OFFSETS: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = year as u32 - u32::from(month < 3);
    let days = y + y / 4 - y / 100 + y / 400 + OFFSETS[(month - 1) as usize] + day as u32;
    Weekday::from_days_from_sunday((days % 7) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_weekday_known_dates() {
        let cases = [
            (2024, 3, 7, Weekday::Thursday),
            (2000, 1, 1, Weekday::Saturday),
            (2024, 2, 29, Weekday::Thursday),
            (2023, 12, 31, Weekday::Sunday),
            (2013, 4, 11, Weekday::Thursday),
        ];
        for (year, month, day, expected) in cases {
            let t = WallTime::new(year, month, day, 0, 0, 0).unwrap();
            assert_eq!(t.weekday(), expected, "{}-{}-{}", year, month, day);
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(WallTime::new(2024, 0, 1, 0, 0, 0).is_none());
        assert!(WallTime::new(2024, 13, 1, 0, 0, 0).is_none());
        assert!(WallTime::new(2023, 2, 29, 0, 0, 0).is_none());
        assert!(WallTime::new(2024, 4, 31, 0, 0, 0).is_none());
        assert!(WallTime::new(2024, 1, 1, 24, 0, 0).is_none());
        assert!(WallTime::new(2024, 1, 1, 0, 60, 0).is_none());
        assert!(WallTime::new(2024, 1, 1, 0, 0, 60).is_none());
        assert!(WallTime::new(2024, 2, 29, 23, 59, 59).is_some());
    }

    #[test]
    fn test_top_of_hour() {
        assert!(WallTime::new(2024, 1, 1, 5, 0, 0).unwrap().is_top_of_hour());
        assert!(!WallTime::new(2024, 1, 1, 5, 0, 1).unwrap().is_top_of_hour());
        assert!(!WallTime::new(2024, 1, 1, 5, 1, 0).unwrap().is_top_of_hour());
    }

    #[test]
    fn test_boundaries() {
        let a = WallTime::new(2024, 1, 1, 5, 10, 59).unwrap();
        let b = WallTime::new(2024, 1, 1, 5, 11, 0).unwrap();
        assert!(a.second_changed(&b));
        assert!(a.minute_changed(&b));
        assert!(!a.minute_changed(&a.with_second(3).unwrap()));
        assert!(a.second_changed(&a.with_second(3).unwrap()));
    }

    #[test]
    fn test_clock_time_conversion() {
        let clock = ClockTime {
            year: 2024,
            month: 3,
            day: 7,
            hour: 13,
            minute: 5,
            second: 9,
        };
        let t = WallTime::try_from(clock).unwrap();
        assert_eq!(t.weekday(), Weekday::Thursday);
        assert_eq!(t.month_abbrev(), "Mar");
        assert_eq!(ClockTime::from(t), clock);

        let bad = ClockTime { month: 2, day: 30, ..clock };
        assert!(WallTime::try_from(bad).is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_years() {
        assert!(WallTime::new(0, 1, 1, 0, 0, 0).is_none());
        assert!(WallTime::new(0, 2, 28, 12, 0, 0).is_none());
        assert!(WallTime::new(0, 3, 1, 0, 0, 0).is_none());
        assert!(WallTime::new(MAX_YEAR + 1, 1, 1, 0, 0, 0).is_none());
        assert!(WallTime::new(u16::MAX, 12, 31, 23, 59, 59).is_none());

        let zero = ClockTime {
            year: 0,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        };
        assert!(WallTime::try_from(zero).is_err());
    }

    #[test]
    fn test_year_range_ends() {
        // 0001-01-01 is a Monday in the proleptic Gregorian calendar
        let first = WallTime::new(MIN_YEAR, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(first.weekday(), Weekday::Monday);

        let last = WallTime::new(MAX_YEAR, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(last.year(), MAX_YEAR);
    }

    proptest! {
        #[test]
        fn test_any_date_fields_never_panic(
            year in any::<u16>(),
            month in any::<u8>(),
            day in any::<u8>(),
        ) {
            if let Some(t) = WallTime::new(year, month, day, 0, 0, 0) {
                prop_assert!((MIN_YEAR..=MAX_YEAR).contains(&t.year()));
            } else {
                prop_assert!(
                    !(MIN_YEAR..=MAX_YEAR).contains(&year)
                        || !(1..=12).contains(&month)
                        || day == 0
                        || day > days_in_month(year, month)
                );
            }
        }

        #[test]
        fn test_weekday_advances_daily(year in MIN_YEAR..MAX_YEAR, month in 1u8..=12) {
            let last = days_in_month(year, month);
            let end = WallTime::new(year, month, last, 0, 0, 0).unwrap();
            let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
            let next = WallTime::new(ny, nm, 1, 0, 0, 0).unwrap();
            prop_assert_eq!(
                next.weekday().days_from_sunday(),
                (end.weekday().days_from_sunday() + 1) % 7
            );
        }
    }
}
