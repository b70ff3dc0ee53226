//! Board-agnostic core logic for segmux displays
//!
//! This crate contains everything about driving a shift-register display
//! that does not depend on a particular chip:
//!
//! - Seven-segment glyph table
//! - Text renderer (padding, truncation, decimal point merging)
//! - Frame encoding for static and multiplexed wiring
//! - Poll cycle state machine
//! - Poll schedule
//! - Configuration types and parser
//! - Text source trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod frame;
pub mod glyph;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use config::{DisplayConfig, MAX_DIGITS};
pub use frame::{Frame, FrameEncoder};
pub use glyph::{glyph, DigitPattern, Segment};
pub use render::{render, DigitPatterns, Renderer};
