//! Brightness curve
//!
//! Maps quantized ambient light to a monitor brightness percentage and
//! keeps the mapping monotonic as the user corrects it.

pub mod map;
pub mod record;

pub use map::{
    bucket_of, BrightnessMap, CurveError, BUCKET_COUNT, BUCKET_WIDTH, MAX_BUCKET, MAX_LEVEL,
};
pub use record::{CurveRecord, RecordError, CURVE_MAGIC, CURVE_VERSION, MAX_RECORD_SIZE};
