//! Display driver
//!
//! [`OutputWriter`] pushes one frame into the bank and latches it.
//! [`DisplayDriver`] runs the poll cycle on top of it: snapshot the text,
//! render, encode, write.

pub mod driver;
pub mod writer;

pub use driver::{CycleOutcome, DisplayDriver, DriverStats};
pub use writer::{HardwareWriteError, OutputWriter};
