//! Light-bucket to brightness lookup table
//!
//! The table has one entry per 50-count bucket of the light sensor,
//! from bucket 0 up to bucket 1000 inclusive. Entries never decrease
//! as the light level rises.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of one light bucket in sensor counts
pub const BUCKET_WIDTH: u16 = 50;

/// Highest bucket boundary in the table
pub const MAX_BUCKET: u16 = 1000;

/// Number of buckets (0, 50, ..., 1000)
pub const BUCKET_COUNT: usize = (MAX_BUCKET / BUCKET_WIDTH) as usize + 1;

/// Highest brightness the monitor menu accepts
pub const MAX_LEVEL: u8 = 100;

/// Errors when rebuilding a map from stored levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurveError {
    /// A level was above [`MAX_LEVEL`]
    OutOfRange { bucket: u16, level: u8 },
    /// A level was lower than the one in the bucket below it
    NotMonotonic { bucket: u16 },
}

/// Quantize a light sample down to its bucket boundary
///
/// Samples above the table domain land in the top bucket.
pub const fn bucket_of(sample: u16) -> u16 {
    let bucket = sample - sample % BUCKET_WIDTH;
    if bucket > MAX_BUCKET {
        MAX_BUCKET
    } else {
        bucket
    }
}

const fn index_of(bucket: u16) -> usize {
    (bucket / BUCKET_WIDTH) as usize
}

const fn bucket_at(index: usize) -> u16 {
    index as u16 * BUCKET_WIDTH
}

/// Brightness map
///
/// Starts out linear (`bucket / 10`) and is bent by user corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrightnessMap {
    levels: [u8; BUCKET_COUNT],
}

impl Default for BrightnessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl BrightnessMap {
    /// Create the default linear curve
    pub const fn new() -> Self {
        let mut levels = [0u8; BUCKET_COUNT];
        let mut i = 0;
        while i < BUCKET_COUNT {
            levels[i] = (bucket_at(i) / 10) as u8;
            i += 1;
        }
        Self { levels }
    }

    /// Rebuild a map from stored levels
    ///
    /// Rejects tables that would break the lookup invariants instead of
    /// repairing them, so a corrupted record never silently reshapes the curve.
    pub fn from_levels(levels: [u8; BUCKET_COUNT]) -> Result<Self, CurveError> {
        for (i, &level) in levels.iter().enumerate() {
            if level > MAX_LEVEL {
                return Err(CurveError::OutOfRange {
                    bucket: bucket_at(i),
                    level,
                });
            }
            if i > 0 && level < levels[i - 1] {
                return Err(CurveError::NotMonotonic {
                    bucket: bucket_at(i),
                });
            }
        }
        Ok(Self { levels })
    }

    /// Raw levels, lowest bucket first
    pub fn levels(&self) -> &[u8; BUCKET_COUNT] {
        &self.levels
    }

    /// Level stored for a bucket boundary (or the bucket containing it)
    pub fn level_at(&self, bucket: u16) -> u8 {
        self.levels[index_of(bucket_of(bucket))]
    }

    /// Target brightness for a light sample
    pub fn lookup(&self, sample: u16) -> u8 {
        self.level_at(sample)
    }

    /// Record a user correction and flatten the curve around it
    ///
    /// The edited bucket gets `level`. Every bucket above it that is now
    /// lower, and every bucket below it that is now higher, is overwritten
    /// with `level`. This produces plateaus rather than gradients and may
    /// erase earlier corrections on the far side of the edit; that is the
    /// intended behaviour.
    pub fn update_on_user_correction(&mut self, sample: u16, level: u8) {
        let level = level.min(MAX_LEVEL);
        let edited = index_of(bucket_of(sample));
        self.levels[edited] = level;

        for (i, slot) in self.levels.iter_mut().enumerate() {
            if (i > edited && *slot < level) || (i < edited && *slot > level) {
                *slot = level;
            }
        }
    }

    /// Check that levels never decrease with rising light
    pub fn is_monotonic(&self) -> bool {
        self.levels.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Iterate over `(bucket, level)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, &level)| (bucket_at(i), level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_curve_is_linear() {
        let map = BrightnessMap::new();
        assert_eq!(BUCKET_COUNT, 21);
        for (bucket, level) in map.iter() {
            assert_eq!(level as u16, bucket / 10);
        }
        assert!(map.is_monotonic());
    }

    #[test]
    fn test_quantization() {
        let map = BrightnessMap::new();

        for x in 0..1050u16 {
            let bucket = x - x % 50;
            assert_eq!(bucket_of(x), bucket.min(MAX_BUCKET));
            assert_eq!(map.lookup(x), map.level_at(bucket));
        }

        assert_eq!(map.lookup(1024), map.lookup(1000));
        assert_eq!(map.lookup(49), 0);
        assert_eq!(map.lookup(50), 5);
        assert_eq!(map.lookup(u16::MAX), 100);
    }

    #[test]
    fn test_correction_flattens_above() {
        let mut map = BrightnessMap::new();
        map.update_on_user_correction(500, 80);

        assert_eq!(map.level_at(500), 80);
        for bucket in (550..=800).step_by(50) {
            assert_eq!(map.level_at(bucket), 80, "bucket {}", bucket);
        }
        // Already at or above 80 by default
        assert_eq!(map.level_at(850), 85);
        assert_eq!(map.level_at(1000), 100);

        // Nothing below exceeded 80, so the lower half is untouched
        for bucket in (0..500).step_by(50) {
            assert_eq!(map.level_at(bucket) as u16, bucket / 10);
        }
        assert!(map.is_monotonic());
    }

    #[test]
    fn test_correction_flattens_below() {
        let mut map = BrightnessMap::new();
        map.update_on_user_correction(620, 20);

        assert_eq!(map.level_at(600), 20);
        for bucket in (200..600).step_by(50) {
            assert_eq!(map.level_at(bucket), 20, "bucket {}", bucket);
        }
        assert_eq!(map.level_at(150), 15);
        assert_eq!(map.level_at(650), 65);
        assert!(map.is_monotonic());
    }

    #[test]
    fn test_correction_erases_far_side() {
        let mut map = BrightnessMap::new();
        map.update_on_user_correction(200, 60);
        map.update_on_user_correction(700, 30);

        // The later, lower correction at 700 pulls the 200 edit down with it
        assert_eq!(map.level_at(200), 30);
        assert_eq!(map.level_at(700), 30);
        assert!(map.is_monotonic());
    }

    #[test]
    fn test_correction_clamps_level() {
        let mut map = BrightnessMap::new();
        map.update_on_user_correction(0, 250);
        assert!(map.levels().iter().all(|&l| l == MAX_LEVEL));
    }

    #[test]
    fn test_from_levels_validation() {
        let default = BrightnessMap::new();
        assert_eq!(BrightnessMap::from_levels(*default.levels()), Ok(default));

        let mut levels = *default.levels();
        levels[3] = 101;
        assert_eq!(
            BrightnessMap::from_levels(levels),
            Err(CurveError::OutOfRange {
                bucket: 150,
                level: 101
            })
        );

        let mut levels = *default.levels();
        levels[5] = 0;
        assert_eq!(
            BrightnessMap::from_levels(levels),
            Err(CurveError::NotMonotonic { bucket: 250 })
        );

        // A dip reports the first bucket that falls below its neighbour
        let mut levels = *default.levels();
        levels[6] = 20;
        assert_eq!(
            BrightnessMap::from_levels(levels),
            Err(CurveError::NotMonotonic { bucket: 300 })
        );
    }

    proptest! {
        #[test]
        fn prop_corrections_keep_curve_monotonic(
            edits in proptest::collection::vec((0u16..1100, 0u8..=100), 1..40)
        ) {
            let mut map = BrightnessMap::new();
            for (sample, level) in edits {
                map.update_on_user_correction(sample, level);
                prop_assert!(map.is_monotonic());
                prop_assert_eq!(map.lookup(sample), level);
            }
        }
    }
}
