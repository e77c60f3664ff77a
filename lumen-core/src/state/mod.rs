//! Power state machine and controller bookkeeping
//!
//! The power state gates everything else: no brightness logic runs
//! while the monitor is asleep.

pub mod controller;
pub mod events;
pub mod machine;

pub use controller::ControllerState;
pub use events::{PowerEvent, PowerTransition};
pub use machine::{PowerDetector, PowerState};
