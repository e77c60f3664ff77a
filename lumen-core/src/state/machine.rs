//! Power-state detector
//!
//! The monitor gives no handshake. Whether it is on is inferred from the
//! voltage across its power LED, read on a second analog line.

use super::events::{PowerEvent, PowerTransition};

/// Monitor power states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Monitor off or in standby; no brightness logic runs
    #[default]
    Asleep,
    /// Monitor on and calibrated
    Awake,
}

impl PowerState {
    /// Check if brightness control is allowed in this state
    pub fn control_allowed(&self) -> bool {
        matches!(self, PowerState::Awake)
    }

    /// Process an event and return the next state plus the edge, if any
    pub fn transition(self, event: PowerEvent) -> (Self, Option<PowerTransition>) {
        use PowerEvent::*;
        use PowerState::*;

        match (self, event) {
            (Asleep, SenseHigh) => (Awake, Some(PowerTransition::Woke)),
            (Awake, SenseLow) => (Asleep, Some(PowerTransition::Slept)),
            // Default: stay in current state
            (state, _) => (state, None),
        }
    }
}

/// Threshold detector over the power-sense samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerDetector {
    state: PowerState,
    /// Samples strictly above this value mean the monitor is on
    threshold: u16,
}

impl PowerDetector {
    /// Create a detector that starts asleep
    pub const fn new(threshold: u16) -> Self {
        Self {
            state: PowerState::Asleep,
            threshold,
        }
    }

    /// Current state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Check if the monitor is considered on
    pub fn is_awake(&self) -> bool {
        self.state.control_allowed()
    }

    /// Classify a raw sense sample
    pub fn classify(&self, sample: u16) -> PowerEvent {
        if sample > self.threshold {
            PowerEvent::SenseHigh
        } else {
            PowerEvent::SenseLow
        }
    }

    /// Feed a sense sample; returns the edge if the state changed
    pub fn update(&mut self, sample: u16) -> Option<PowerTransition> {
        let (next, edge) = self.state.transition(self.classify(sample));
        self.state = next;
        edge
    }
}
