//! Lumen Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the brightness controller is
//! written against. Chip-specific crates implement them, and the host
//! test suite implements them with simulated parts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumen-firmware (embassy binary)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-core (control logic)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  lumen-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital outputs
//! - [`button::PressCounter`] - Drainable button press counters and the shared atomic counter
//! - [`time::Clock`] - Monotonic millisecond clock
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod flash;
pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use button::{PressCounter, SharedPressCounter};
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::OutputPin;
pub use time::Clock;
