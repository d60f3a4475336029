//! Watchface settings
//!
//! [`Settings`] is the plain value; [`SettingsStore`] mirrors it to
//! persistent storage.

mod store;

pub use store::{Applied, SettingsStore, UpdateError};
pub use telewatch_protocol::SettingKey;

use crate::format::TimeFormat;
use crate::geometry::LayoutMode;
use crate::traits::Cadence;

/// The four user-facing switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub show_seconds: bool,
    pub show_digital_time: bool,
    pub show_digital_date: bool,
    pub use_24h_format: bool,
}

impl Settings {
    /// Values used for keys with nothing stored
    pub const fn defaults(locale_prefers_24h: bool) -> Self {
        Self {
            show_seconds: false,
            show_digital_time: true,
            show_digital_date: true,
            use_24h_format: locale_prefers_24h,
        }
    }

    pub const fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::ShowSeconds => self.show_seconds,
            SettingKey::ShowTime => self.show_digital_time,
            SettingKey::ShowDate => self.show_digital_date,
            SettingKey::Use24Hour => self.use_24h_format,
        }
    }

    /// Set one switch, returning whether it changed
    pub fn set(&mut self, key: SettingKey, enabled: bool) -> bool {
        let slot = match key {
            SettingKey::ShowSeconds => &mut self.show_seconds,
            SettingKey::ShowTime => &mut self.show_digital_time,
            SettingKey::ShowDate => &mut self.show_digital_date,
            SettingKey::Use24Hour => &mut self.use_24h_format,
        };
        let changed = *slot != enabled;
        *slot = enabled;
        changed
    }

    pub const fn layout_mode(&self) -> LayoutMode {
        LayoutMode::from_readouts(self.show_digital_time, self.show_digital_date)
    }

    /// Tick cadence these settings need
    pub const fn cadence(&self) -> Cadence {
        Cadence::for_seconds(self.show_seconds)
    }

    pub const fn time_format(&self) -> TimeFormat {
        TimeFormat::select(self.use_24h_format, self.show_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::defaults(false);
        assert!(!s.show_seconds);
        assert!(s.show_digital_time);
        assert!(s.show_digital_date);
        assert!(!s.use_24h_format);
        assert!(Settings::defaults(true).use_24h_format);
    }

    #[test]
    fn test_set_reports_change() {
        let mut s = Settings::defaults(false);
        assert!(s.set(SettingKey::ShowSeconds, true));
        assert!(!s.set(SettingKey::ShowSeconds, true));
        assert!(s.get(SettingKey::ShowSeconds));
        assert_eq!(s.cadence(), Cadence::PerSecond);
    }

    #[test]
    fn test_layout_mode() {
        let mut s = Settings::defaults(false);
        assert_eq!(s.layout_mode(), LayoutMode::Normal);
        s.set(SettingKey::ShowTime, false);
        assert_eq!(s.layout_mode(), LayoutMode::Normal);
        s.set(SettingKey::ShowDate, false);
        assert_eq!(s.layout_mode(), LayoutMode::Compact);
    }
}
