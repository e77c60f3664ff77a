//! Monotonic clock backed by `embassy-time`

use embassy_time::Instant;

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl lumen_hal::Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
