//! Brightness curve persistence
//!
//! Saves the user-corrected curve to flash as a [`CurveRecord`] and
//! restores it at boot.

use defmt::*;

use lumen_core::curve::{BrightnessMap, CurveRecord, MAX_RECORD_SIZE};
use lumen_core::traits::{CurveStore, NoStore, StoreError};
use lumen_hal::{FlashError, FlashStorage, StorageKey};
use lumen_hal_rp2040::flash::Rp2040FlashStorage;

/// Curve store backed by the flash key-value partition
pub struct FlashCurveStore<S> {
    storage: S,
}

impl<S: FlashStorage> FlashCurveStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: FlashStorage> CurveStore for FlashCurveStore<S> {
    async fn load(&mut self) -> Result<Option<BrightnessMap>, StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = match self
            .storage
            .read(StorageKey::BrightnessCurve, &mut buffer)
            .await
        {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        debug!("Read {} bytes of curve from flash", len);

        let record = CurveRecord::decode(&buffer[..len])?;
        Ok(Some(record.into_map()?))
    }

    async fn save(&mut self, map: &BrightnessMap) -> Result<(), StoreError> {
        let record = CurveRecord::from_map(map);

        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = record.encode(&mut buffer)?;

        debug!("Saving {} bytes of curve to flash", bytes.len());

        self.storage
            .write(StorageKey::BrightnessCurve, bytes)
            .await?;

        info!("Saved brightness curve to flash");
        Ok(())
    }
}

/// The store the controller runs with, chosen by `[persist] enabled`
pub enum BoardStore {
    Memory(NoStore),
    Flash(FlashCurveStore<Rp2040FlashStorage<'static>>),
}

impl BoardStore {
    pub fn memory() -> Self {
        BoardStore::Memory(NoStore)
    }

    pub fn flash(storage: Rp2040FlashStorage<'static>) -> Self {
        BoardStore::Flash(FlashCurveStore::new(storage))
    }
}

impl CurveStore for BoardStore {
    async fn load(&mut self) -> Result<Option<BrightnessMap>, StoreError> {
        match self {
            BoardStore::Memory(store) => store.load().await,
            BoardStore::Flash(store) => store.load().await,
        }
    }

    async fn save(&mut self, map: &BrightnessMap) -> Result<(), StoreError> {
        match self {
            BoardStore::Memory(store) => store.save(map).await,
            BoardStore::Flash(store) => store.save(map).await,
        }
    }
}
