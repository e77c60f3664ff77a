//! Configuration types
//!
//! Board-agnostic controller settings plus the text format they are
//! loaded from.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
