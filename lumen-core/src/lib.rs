//! Board-agnostic core logic for the Lumen brightness controller
//!
//! Lumen follows the room's ambient light by pressing a monitor's own
//! front-panel buttons. This crate holds everything that does not depend
//! on a particular microcontroller:
//!
//! - Collaborator traits (sensors, feedback, curve storage)
//! - Front-panel button driver
//! - Brightness curve and its persisted record
//! - Power-state detection
//! - Manual adjustment sessions
//! - The main control loop
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod config;
pub mod controller;
pub mod curve;
pub mod session;
pub mod state;
pub mod traits;

#[cfg(test)]
mod testing;

pub use controller::{Controller, LoopAction, StepReport, StoreStatus};
