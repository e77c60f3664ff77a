//! Flash storage driver for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage in the
//! last 64KB of flash. Holds the settings TOML and the corrected
//! brightness curve.
//!
//! Implements the `FlashStorage` trait from `lumen-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use lumen_hal::flash::{FlashError, StorageKey};

/// Flash size on a Raspberry Pi Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
/// Size of the key-value partition at the end of flash
pub const DATA_PARTITION_SIZE: usize = 64 * 1024;
pub const DATA_PARTITION_START: usize = FLASH_SIZE - DATA_PARTITION_SIZE;

/// Flash erase size for RP2040
pub const FLASH_ERASE_SIZE: usize = ERASE_SIZE;

/// Flash range for the key-value partition
pub const DATA_RANGE: core::ops::Range<u32> = (DATA_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Largest value sequential-storage has to buffer (the settings TOML)
const MAX_VALUE_SIZE: usize = 2048;

/// RP2040 flash storage
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl lumen_hal::FlashStorage for Rp2040FlashStorage<'_> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut data_buffer = [0u8; MAX_VALUE_SIZE];

        let result = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            DATA_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some(data)) => {
                let len = data.len();
                if buffer.len() < len {
                    return Err(FlashError::BufferTooSmall);
                }
                buffer[..len].copy_from_slice(data);
                Ok(len)
            }
            Ok(None) => Err(FlashError::NotFound),
            Err(_) => Err(FlashError::Storage),
        }
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut data_buffer = [0u8; MAX_VALUE_SIZE];

        map::store_item(
            &mut self.flash,
            DATA_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        )
        .await
        .map_err(|e| match e {
            sequential_storage::Error::FullStorage => FlashError::Full,
            _ => FlashError::Storage,
        })
    }
}
