//! Flash settings storage for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage
//! in the last 64KB of flash.
//!
//! Implements the `SettingsStorage` trait from `telewatch-hal`. The trait
//! is blocking, so each call drives the async flash driver to completion
//! with `block_on`.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use telewatch_hal::{SettingsStorage, StorageError, StorageKey};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const SETTINGS_PARTITION_SIZE: usize = 64 * 1024;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range for the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

// Key byte plus an i32 with room for item headers
const ITEM_BUFFER_SIZE: usize = 32;

/// RP2040 flash-backed settings storage
pub struct Rp2040SettingsFlash<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040SettingsFlash<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    fn fetch(&mut self, key: StorageKey) -> Result<Option<i32>, StorageError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];

        block_on(map::fetch_item::<StorageKey, i32, _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        ))
        .map_err(map_error)
    }
}

fn map_error<E>(e: sequential_storage::Error<E>) -> StorageError {
    match e {
        sequential_storage::Error::FullStorage => StorageError::Full,
        sequential_storage::Error::Corrupted { .. }
        | sequential_storage::Error::SerializationError(_) => StorageError::Corrupted,
        _ => StorageError::Flash,
    }
}

impl<'d> SettingsStorage for Rp2040SettingsFlash<'d> {
    fn exists(&mut self, key: StorageKey) -> bool {
        matches!(self.fetch(key), Ok(Some(_)))
    }

    fn read_int(&mut self, key: StorageKey) -> Result<i32, StorageError> {
        self.fetch(key)?.ok_or(StorageError::NotFound)
    }

    fn write_int(&mut self, key: StorageKey, value: i32) -> Result<(), StorageError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];

        block_on(map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &value,
        ))
        .map_err(map_error)
    }
}
