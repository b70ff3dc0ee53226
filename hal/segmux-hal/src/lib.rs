//! Segmux Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the display
//! driver is written against. Concrete banks (bit-banged GPIO, SPI) live in
//! `segmux-drivers`; board crates only have to hand them pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (segmux-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segmux-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  Sn74hc595    │       │ SpiSn74hc595  │
//! │  (GPIO)       │       │  (SPI bus)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`shift::ShiftRegisterBank`] - Cascaded serial-in/parallel-out registers

#![no_std]
#![deny(unsafe_code)]

pub mod shift;

// Re-export key types at crate root for convenience
pub use shift::{BusError, ShiftRegisterBank, REGISTER_WIDTH};
