//! Settings mirror with write-through persistence

use telewatch_hal::{SettingsStorage, StorageError, StorageKey};
use telewatch_protocol::{Dictionary, SettingKey, Tuple, TupleValue};

use super::Settings;

/// Outcome of applying one setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Applied {
    pub key: SettingKey,
    pub enabled: bool,
    /// In-memory value differs from before
    pub changed: bool,
    /// Result of the storage write; the in-memory value is updated
    /// regardless
    pub persisted: Result<(), StorageError>,
}

/// Reasons an inbound tuple is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Key does not name a setting
    UnknownKey(u8),
    /// Setting carried something other than a `u8`
    UnexpectedType(SettingKey),
}

/// Current settings plus the storage they persist to
pub struct SettingsStore<S> {
    storage: S,
    settings: Settings,
}

fn storage_key(key: SettingKey) -> StorageKey {
    StorageKey(key.as_u8())
}

impl<S: SettingsStorage> SettingsStore<S> {
    /// Read every setting from `storage`
    ///
    /// Absent or unreadable keys take their default. Each key is read once;
    /// `NotFound` stands in for an `exists` check.
    pub fn load(mut storage: S, locale_prefers_24h: bool) -> Self {
        let mut settings = Settings::defaults(locale_prefers_24h);

        for key in SettingKey::ALL {
            if let Ok(value) = storage.read_int(storage_key(key)) {
                settings.set(key, value != 0);
            }
        }

        Self { storage, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Update one setting and write it through to storage
    pub fn apply(&mut self, key: SettingKey, enabled: bool) -> Applied {
        let changed = self.settings.set(key, enabled);
        let persisted = self.storage.write_int(storage_key(key), enabled as i32);
        Applied {
            key,
            enabled,
            changed,
            persisted,
        }
    }

    /// Apply a tuple received from the companion
    ///
    /// Nothing changes and nothing is written when the tuple is rejected.
    pub fn apply_tuple(&mut self, tuple: &Tuple) -> Result<Applied, UpdateError> {
        let key = tuple.setting_key().ok_or(UpdateError::UnknownKey(tuple.key))?;
        match tuple.value {
            TupleValue::Uint8(value) => Ok(self.apply(key, value != 0)),
            _ => Err(UpdateError::UnexpectedType(key)),
        }
    }

    /// Every setting as a dictionary, in key order
    pub fn export_all(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        for key in SettingKey::ALL {
            // Dictionary holds exactly one tuple per key
            let _ = dict.push(Tuple::setting(key, self.settings.get(key)));
        }
        dict
    }

    /// Give back the storage
    pub fn into_storage(self) -> S {
        self.storage
    }
}
