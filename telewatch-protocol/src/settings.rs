//! Setting identifiers and typed tuples
//!
//! The same small integer keys identify a setting on the wire and in the
//! watch's persistent storage.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Maximum length of a text tuple value
pub const MAX_TEXT_LEN: usize = 16;

/// The four boolean watchface settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SettingKey {
    /// Draw a second hand and tick every second
    ShowSeconds = 1,
    /// Show the digital time readout
    ShowTime = 2,
    /// Show the digital date readout
    ShowDate = 3,
    /// 24-hour digital time
    Use24Hour = 4,
}

impl SettingKey {
    /// All keys in wire order
    pub const ALL: [SettingKey; 4] = [
        SettingKey::ShowSeconds,
        SettingKey::ShowTime,
        SettingKey::ShowDate,
        SettingKey::Use24Hour,
    ];

    /// Get the key as its wire/storage id
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up a key by wire/storage id
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(SettingKey::ShowSeconds),
            2 => Some(SettingKey::ShowTime),
            3 => Some(SettingKey::ShowDate),
            4 => Some(SettingKey::Use24Hour),
            _ => None,
        }
    }
}

/// A typed value carried in a tuple
///
/// Settings only ever use `Uint8`; the other variants exist because the
/// companion side is free to send any tuple type and the watch has to be
/// able to decode and then reject them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleValue {
    Uint8(u8),
    Uint32(u32),
    Text(String<MAX_TEXT_LEN>),
}

/// One key/value entry of a dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple {
    /// Raw key; may not name a known setting
    pub key: u8,
    pub value: TupleValue,
}

impl Tuple {
    /// Build the tuple for a boolean setting
    pub fn setting(key: SettingKey, enabled: bool) -> Self {
        Self {
            key: key.as_u8(),
            value: TupleValue::Uint8(enabled as u8),
        }
    }

    /// The setting this tuple names, if any
    pub fn setting_key(&self) -> Option<SettingKey> {
        SettingKey::from_u8(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ids_are_stable() {
        assert_eq!(SettingKey::ShowSeconds.as_u8(), 1);
        assert_eq!(SettingKey::ShowTime.as_u8(), 2);
        assert_eq!(SettingKey::ShowDate.as_u8(), 3);
        assert_eq!(SettingKey::Use24Hour.as_u8(), 4);
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(SettingKey::from_u8(0), None);
        assert_eq!(SettingKey::from_u8(5), None);
        assert_eq!(SettingKey::from_u8(0xFF), None);
    }

    #[test]
    fn test_setting_tuple() {
        let tuple = Tuple::setting(SettingKey::ShowDate, true);
        assert_eq!(tuple.key, 3);
        assert_eq!(tuple.value, TupleValue::Uint8(1));
        assert_eq!(tuple.setting_key(), Some(SettingKey::ShowDate));
    }
}
