//! Shift register bank implementations

pub mod sn74hc595;
pub mod spi;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;

pub use sn74hc595::Sn74hc595;
pub use spi::SpiSn74hc595;

/// A bank shared between components
///
/// Whoever writes to the bank holds the mutex for the whole
/// shift-and-latch sequence, so frames from different writers never
/// interleave.
pub type SharedBank<M, B> = Mutex<M, RefCell<B>>;
