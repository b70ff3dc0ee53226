//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! segmux-hal and segmux-core, plus the display driver that ties them
//! together:
//!
//! - Shift register banks (74HC595 over GPIO or SPI)
//! - Shared text cell and serial line assembler
//! - Output writer (atomic frame write + latch)
//! - Polling display driver

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod shift;
pub mod text;

pub use display::{CycleOutcome, DisplayDriver, DriverStats, HardwareWriteError, OutputWriter};
pub use shift::{SharedBank, Sn74hc595, SpiSn74hc595};
pub use text::{Line, LineAssembler, SharedText, TextError};
