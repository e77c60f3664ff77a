//! Configuration loading
//!
//! Settings TOML stored in flash takes priority over the `lumen.toml`
//! compiled into the firmware. Parsing uses `lumen_core::config`.

pub mod loader;

pub use loader::load_config;
