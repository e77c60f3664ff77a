//! Time source abstraction
//!
//! Waiting is done through `embedded_hal_async::delay::DelayNs`; this
//! trait only covers reading the current time.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point (usually boot)
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
