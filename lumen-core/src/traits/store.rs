//! Curve persistence trait
//!
//! Persistence is optional. The controller works the same with
//! [`NoStore`], which keeps corrections in memory only and loses them on
//! reboot.

use lumen_hal::FlashError;

use crate::curve::{BrightnessMap, RecordError};

/// Errors from a curve store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash operation failed
    Flash(FlashError),
    /// Stored record is unusable
    Record(RecordError),
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

impl From<RecordError> for StoreError {
    fn from(e: RecordError) -> Self {
        StoreError::Record(e)
    }
}

/// Storage for the user-corrected curve
pub trait CurveStore {
    /// Load the saved curve
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(
        &mut self,
    ) -> impl core::future::Future<Output = Result<Option<BrightnessMap>, StoreError>>;

    /// Save the curve, replacing any earlier one
    fn save(
        &mut self,
        map: &BrightnessMap,
    ) -> impl core::future::Future<Output = Result<(), StoreError>>;
}

/// In-memory only: nothing is loaded, saves are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl CurveStore for NoStore {
    async fn load(&mut self) -> Result<Option<BrightnessMap>, StoreError> {
        Ok(None)
    }

    async fn save(&mut self, _map: &BrightnessMap) -> Result<(), StoreError> {
        Ok(())
    }
}
