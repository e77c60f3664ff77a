//! User-adjustment session
//!
//! Bookkeeping for the interactive loop entered when someone presses the
//! onboard buttons: button A steps brightness down, button B steps it up,
//! and the session ends after a stretch with no usable input. The loop
//! that drives the panel lives in the controller; this module decides
//! what each batch of presses means.

use lumen_hal::PressCounter;

use crate::config::SessionConfig;
use crate::curve::MAX_LEVEL;

/// Presses drained from both buttons in one read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Presses {
    /// Button A presses (brightness down)
    pub down: u32,
    /// Button B presses (brightness up)
    pub up: u32,
}

impl Presses {
    pub const fn new(down: u32, up: u32) -> Self {
        Self { down, up }
    }

    pub fn is_empty(&self) -> bool {
        self.down == 0 && self.up == 0
    }
}

/// The two onboard buttons
pub struct ButtonPair<B> {
    /// Button A
    down: B,
    /// Button B
    up: B,
}

impl<B: PressCounter> ButtonPair<B> {
    /// Pair button A (down) with button B (up)
    pub fn new(down: B, up: B) -> Self {
        Self { down, up }
    }

    /// Read and reset both press counters
    pub fn drain(&mut self) -> Presses {
        Presses {
            down: self.down.take_presses(),
            up: self.up.take_presses(),
        }
    }
}

/// State of one adjustment session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdjustSession {
    start: u8,
    level: u8,
    last_input_ms: u64,
    step: u8,
    idle_timeout_ms: u32,
}

impl AdjustSession {
    /// Start a session at `start` brightness; the idle timer starts at `now_ms`
    pub fn new(start: u8, now_ms: u64, config: &SessionConfig) -> Self {
        Self {
            start,
            level: start,
            last_input_ms: now_ms,
            step: config.step,
            idle_timeout_ms: config.idle_timeout_ms,
        }
    }

    /// Brightness the session started from
    pub fn start_level(&self) -> u8 {
        self.start
    }

    /// Brightness after all presses so far
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether the session moved away from its starting brightness
    pub fn changed(&self) -> bool {
        self.level != self.start
    }

    /// Apply a batch of presses
    ///
    /// Down presses are ignored while already at 0 and up presses while at
    /// 100. Returns the brightness delta to send to the panel, or `None`
    /// if nothing usable was pressed. The result is clamped to 0..=100.
    pub fn apply(&mut self, presses: Presses) -> Option<i16> {
        let down = if self.level > 0 { presses.down } else { 0 };
        let up = if self.level < MAX_LEVEL { presses.up } else { 0 };
        if down == 0 && up == 0 {
            return None;
        }

        let step = self.step as i64;
        let change = step * up as i64 - step * down as i64;
        let target = (self.level as i64 + change).clamp(0, MAX_LEVEL as i64);
        let delta = target - self.level as i64;

        self.level = target as u8;
        Some(delta as i16)
    }

    /// Restart the idle timer
    pub fn mark_input(&mut self, now_ms: u64) {
        self.last_input_ms = now_ms;
    }

    /// Whether the idle timeout has passed
    pub fn is_idle(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_input_ms) > self.idle_timeout_ms as u64
    }
}
