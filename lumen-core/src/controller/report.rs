//! Per-iteration reports
//!
//! The control loop has no error path of its own. Instead every
//! iteration says what it did, so the firmware can log it and the tests
//! can assert on it.

use crate::state::PowerTransition;
use crate::traits::StoreError;

/// Outcome of saving the curve after a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreStatus {
    /// The session did not change the curve; nothing was written
    Unchanged,
    /// The corrected curve was handed to the store
    Saved,
    /// The store rejected the curve; the correction lives in memory only
    Failed(StoreError),
}

/// What the awake or asleep branch of the loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopAction {
    /// Monitor is off; only the power line was polled
    Asleep,
    /// Monitor just turned off; brightness bookkeeping was dropped
    Slept,
    /// A user session ran
    Adjusted { from: u8, to: u8, store: StoreStatus },
    /// The curve moved the brightness
    Applied { from: u8, to: u8, light: u16 },
    /// Light is within the hysteresis band of the last change
    Held { light: u16 },
    /// The curve already agrees with the current brightness
    Unchanged { light: u16 },
}

/// Result of one control-loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Power transition detected at the start of the iteration
    pub transition: Option<PowerTransition>,
    pub action: LoopAction,
}

impl StepReport {
    pub const fn new(transition: Option<PowerTransition>, action: LoopAction) -> Self {
        Self { transition, action }
    }

    /// Whether the monitor brightness was changed this iteration
    pub fn changed_brightness(&self) -> bool {
        match self.action {
            LoopAction::Adjusted { from, to, .. } | LoopAction::Applied { from, to, .. } => {
                from != to
            }
            _ => false,
        }
    }
}
