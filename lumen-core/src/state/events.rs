//! Events that drive the power state machine

/// Observation of the monitor's power-sense line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    /// Sense sample above the threshold (power LED lit)
    SenseHigh,
    /// Sense sample at or below the threshold
    SenseLow,
}

/// Edge reported when the power state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerTransition {
    /// Asleep -> Awake; the wake calibration must run
    Woke,
    /// Awake -> Asleep; brightness bookkeeping is abandoned
    Slept,
}
