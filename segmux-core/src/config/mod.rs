//! Configuration types
//!
//! Board-agnostic display configuration and its TOML representation.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_duration_ms, ParseError};
pub use types::*;
