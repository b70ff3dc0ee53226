//! Poll scheduling
//!
//! Decides when the display driver's poll cycle is due. The executor side
//! (an embassy timer in the firmware) only sleeps until
//! [`Poller::next_due_ms`] and reports the wake-up time back.

pub mod poller;

pub use poller::{Poller, Tick};
