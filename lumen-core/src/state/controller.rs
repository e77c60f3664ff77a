//! Controller bookkeeping
//!
//! Owned by the main loop. The adjustment session gets a copy of the
//! current level and hands back the new one; nothing else writes here.

use super::machine::PowerState;

/// Process-wide controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    /// Whether the monitor is on
    pub power: PowerState,
    /// Best estimate of the brightness the monitor is showing (0-100)
    pub current_brightness: u8,
    /// Light sample at the last brightness change, for hysteresis
    pub last_applied_light: Option<u16>,
}

impl ControllerState {
    /// Fresh state for a monitor that just finished its wake calibration
    pub const fn calibrated() -> Self {
        Self {
            power: PowerState::Awake,
            current_brightness: 0,
            last_applied_light: None,
        }
    }

    /// Check if a light sample moved far enough to re-evaluate the curve
    ///
    /// Always true until a brightness has been applied since the last wake.
    pub fn light_moved(&self, sample: u16, hysteresis: u16) -> bool {
        match self.last_applied_light {
            None => true,
            Some(last) => sample.abs_diff(last) >= hysteresis,
        }
    }

    /// Record a brightness change made at `light`
    ///
    /// Returns false (and changes nothing) if `target` is already current.
    pub fn commit(&mut self, target: u8, light: u16) -> bool {
        if target == self.current_brightness {
            return false;
        }
        self.current_brightness = target;
        self.last_applied_light = Some(light);
        true
    }
}
