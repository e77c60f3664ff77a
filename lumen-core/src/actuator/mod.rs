//! Actuator interface
//!
//! Turns brightness changes into button presses on the monitor.

pub mod panel;

pub use panel::{MonitorPanel, PanelButton, PressCommand, CALIBRATING_TEXT};
