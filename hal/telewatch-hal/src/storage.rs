//! Persistent settings storage abstractions
//!
//! Provides a small integer key/value store that chip-specific HALs
//! implement on top of their flash memory.

use heapless::LinearMap;

/// Key identifying one persisted integer
///
/// Keys are small positive integers; the watchface uses 1-4 for its
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorageKey(pub u8);

impl StorageKey {
    /// Get the key as a byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash operation failed
    Flash,
    /// Key not found
    NotFound,
    /// Stored item did not decode as an integer
    Corrupted,
    /// Storage is full
    Full,
}

/// Integer key/value storage
///
/// Operations run to completion before returning; callers are
/// single-threaded event handlers that must not be preempted by a
/// half-finished write.
pub trait SettingsStorage {
    /// Check if a key has a stored value
    fn exists(&mut self, key: StorageKey) -> bool;

    /// Read the value stored under `key`
    fn read_int(&mut self, key: StorageKey) -> Result<i32, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn write_int(&mut self, key: StorageKey, value: i32) -> Result<(), StorageError>;
}

impl<T: SettingsStorage + ?Sized> SettingsStorage for &mut T {
    fn exists(&mut self, key: StorageKey) -> bool {
        (**self).exists(key)
    }

    fn read_int(&mut self, key: StorageKey) -> Result<i32, StorageError> {
        (**self).read_int(key)
    }

    fn write_int(&mut self, key: StorageKey, value: i32) -> Result<(), StorageError> {
        (**self).write_int(key, value)
    }
}

/// RAM-backed storage for host builds, simulators and tests
#[derive(Debug, Clone)]
pub struct RamStorage<const N: usize = 8> {
    items: LinearMap<StorageKey, i32, N>,
    write_protected: bool,
}

impl<const N: usize> RamStorage<N> {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            items: LinearMap::new(),
            write_protected: false,
        }
    }

    /// Make every subsequent write fail with [`StorageError::Flash`]
    pub fn set_write_protected(&mut self, protected: bool) {
        self.write_protected = protected;
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SettingsStorage for RamStorage<N> {
    fn exists(&mut self, key: StorageKey) -> bool {
        self.items.contains_key(&key)
    }

    fn read_int(&mut self, key: StorageKey) -> Result<i32, StorageError> {
        self.items.get(&key).copied().ok_or(StorageError::NotFound)
    }

    fn write_int(&mut self, key: StorageKey, value: i32) -> Result<(), StorageError> {
        if self.write_protected {
            return Err(StorageError::Flash);
        }
        self.items
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StorageError::Full)
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        match buffer.first() {
            Some(&byte) => Ok((StorageKey(byte), 1)),
            None => Err(sequential_storage::map::SerializationError::BufferTooSmall),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key() {
        let mut storage: RamStorage = RamStorage::new();
        assert!(!storage.exists(StorageKey(1)));
        assert_eq!(storage.read_int(StorageKey(1)), Err(StorageError::NotFound));
    }

    #[test]
    fn test_write_then_read() {
        let mut storage: RamStorage = RamStorage::new();
        storage.write_int(StorageKey(3), 1).unwrap();
        assert!(storage.exists(StorageKey(3)));
        assert_eq!(storage.read_int(StorageKey(3)), Ok(1));

        storage.write_int(StorageKey(3), 0).unwrap();
        assert_eq!(storage.read_int(StorageKey(3)), Ok(0));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_full() {
        let mut storage: RamStorage<2> = RamStorage::new();
        storage.write_int(StorageKey(1), 1).unwrap();
        storage.write_int(StorageKey(2), 1).unwrap();
        assert_eq!(storage.write_int(StorageKey(3), 1), Err(StorageError::Full));
        // Overwriting an existing key still works
        assert_eq!(storage.write_int(StorageKey(2), 0), Ok(()));
    }

    #[test]
    fn test_write_protect() {
        let mut storage: RamStorage = RamStorage::new();
        storage.set_write_protected(true);
        assert_eq!(storage.write_int(StorageKey(1), 1), Err(StorageError::Flash));
        assert!(storage.is_empty());
    }
}
