//! Configuration type definitions
//!
//! Defaults reproduce the timings the target monitor's menu firmware was
//! tuned against. Everything here is plain data; see [`super::parse`] for
//! the text format.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest value the scaled light and sense samples can take
pub const SENSOR_MAX: u16 = 1023;

/// Power-sense configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerConfig {
    /// Sense samples above this value mean the monitor is on
    pub threshold: u16,
    /// Wait after waking for the monitor's own power-on sequence (ms)
    pub wake_settle_ms: u32,
    /// Poll interval while asleep (ms)
    pub asleep_poll_ms: u32,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            threshold: 700,
            wake_settle_ms: 11_000,
            asleep_poll_ms: 1_000,
        }
    }
}

/// Automatic (light-following) brightness configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AutoConfig {
    /// Minimum light change before the curve is consulted again
    pub hysteresis: u16,
    /// Extra wait after an automatic change so the menu closes (ms)
    pub settle_ms: u32,
    /// Main loop interval while awake (ms)
    pub loop_interval_ms: u32,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            hysteresis: 50,
            settle_ms: 1_500,
            loop_interval_ms: 500,
        }
    }
}

/// Manual adjustment session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Brightness change per button press (percent)
    pub step: u8,
    /// Session ends after this long without input (ms)
    pub idle_timeout_ms: u32,
    /// Button poll interval inside the session (ms)
    pub poll_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step: 5,
            idle_timeout_ms: 3_000,
            poll_ms: 50,
        }
    }
}

/// Front-panel button timing
///
/// The monitor drops presses that arrive faster than about 65 ms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelTiming {
    /// How long a button line is held high per press (ms)
    pub pulse_ms: u32,
    /// Low time after each press (ms)
    pub gap_ms: u32,
    /// Wait after opening the brightness menu (ms)
    pub menu_open_ms: u32,
    /// Wait before closing the brightness menu (ms)
    pub menu_close_ms: u32,
    /// Wait after opening the menu during a reset (ms)
    pub reset_open_ms: u32,
    /// How long Down is held to reach brightness 0 (ms)
    pub reset_hold_ms: u32,
    /// Wait after releasing Down during a reset (ms)
    pub reset_release_ms: u32,
    /// Wait after closing the menu at the end of a reset (ms)
    pub reset_close_ms: u32,
}

impl Default for PanelTiming {
    fn default() -> Self {
        Self {
            pulse_ms: 65,
            gap_ms: 65,
            menu_open_ms: 500,
            menu_close_ms: 200,
            reset_open_ms: 100,
            reset_hold_ms: 6_500,
            reset_release_ms: 50,
            reset_close_ms: 400,
        }
    }
}

/// Curve persistence configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PersistConfig {
    /// Save user corrections to flash and restore them at boot
    pub enabled: bool,
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    pub power: PowerConfig,
    pub auto: AutoConfig,
    pub session: SessionConfig,
    pub panel: PanelTiming,
    pub persist: PersistConfig,
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Power threshold outside the sensor range
    ThresholdOutOfRange,
    /// A poll or loop interval is zero
    ZeroInterval,
    /// Session step is zero or larger than the brightness range
    InvalidStep,
    /// Press pulse is zero
    ZeroPulse,
}

impl ControllerConfig {
    /// Check values the control loop relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.power.threshold >= SENSOR_MAX {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        if self.power.asleep_poll_ms == 0
            || self.auto.loop_interval_ms == 0
            || self.session.poll_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        if self.session.step == 0 || self.session.step > crate::curve::MAX_LEVEL {
            return Err(ConfigError::InvalidStep);
        }
        if self.panel.pulse_ms == 0 {
            return Err(ConfigError::ZeroPulse);
        }
        Ok(())
    }
}
