//! Persisted brightness curve
//!
//! Wraps the map levels with a header and checksum so a half-written or
//! stale flash record is recognised and ignored.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::map::{BrightnessMap, CurveError, BUCKET_COUNT};

/// Magic number to identify a curve record
pub const CURVE_MAGIC: u32 = 0x4C55_4D43; // "LUMC"

/// Current record layout version
pub const CURVE_VERSION: u8 = 1;

/// Upper bound for an encoded record
pub const MAX_RECORD_SIZE: usize = 64;

/// Reasons a stored record cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Postcard encoding failed
    Serialize,
    /// Postcard decoding failed
    Deserialize,
    /// Magic or version mismatch
    InvalidFormat,
    /// Checksum mismatch
    CrcMismatch,
    /// Levels decode but do not form a valid curve
    Curve(CurveError),
}

impl From<CurveError> for RecordError {
    fn from(e: CurveError) -> Self {
        RecordError::Curve(e)
    }
}

/// Curve record as stored in flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Map levels, lowest bucket first
    pub levels: [u8; BUCKET_COUNT],
    /// CRC32 over magic, version and levels
    pub crc: u32,
}

impl CurveRecord {
    /// Build a sealed record for a map
    pub fn from_map(map: &BrightnessMap) -> Self {
        let mut record = Self {
            magic: CURVE_MAGIC,
            version: CURVE_VERSION,
            levels: *map.levels(),
            crc: 0,
        };
        record.update_crc();
        record
    }

    /// Check magic and version
    pub fn is_valid(&self) -> bool {
        self.magic == CURVE_MAGIC && self.version == CURVE_VERSION
    }

    /// Calculate CRC32 for the record (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFF_FFFF;
        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);
        crc = crc32_update(crc, &self.levels);
        !crc
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Validate the record and turn it back into a map
    pub fn into_map(self) -> Result<BrightnessMap, RecordError> {
        if !self.is_valid() {
            return Err(RecordError::InvalidFormat);
        }
        if !self.verify_crc() {
            return Err(RecordError::CrcMismatch);
        }
        Ok(BrightnessMap::from_levels(self.levels)?)
    }

    /// Serialize with postcard into `buffer`
    #[cfg(feature = "serde")]
    pub fn encode<'b>(&self, buffer: &'b mut [u8]) -> Result<&'b mut [u8], RecordError> {
        postcard::to_slice(self, buffer).map_err(|_| RecordError::Serialize)
    }

    /// Deserialize from postcard bytes
    ///
    /// Only decodes; call [`CurveRecord::into_map`] to validate.
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        postcard::from_bytes(bytes).map_err(|_| RecordError::Deserialize)
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
