//! RP2040-specific HAL for the Lumen brightness controller
//!
//! This crate provides RP2040 implementations of the `lumen-hal` and
//! `lumen-core` collaborator traits:
//!
//! - Panel button output lines and debounced onboard buttons
//! - Light and power-sense ADC channels
//! - Monotonic clock backed by `embassy-time`
//! - Flash storage driver (implements `lumen_hal::FlashStorage`)

#![no_std]

pub mod adc;
pub mod flash;
pub mod gpio;
pub mod time;
