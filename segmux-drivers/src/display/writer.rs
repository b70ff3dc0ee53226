//! Frame writer
//!
//! A frame is written in one transaction: every bit is shifted while the
//! bank mutex is held, then a single latch makes it visible. If shifting
//! fails the latch is never issued, so the outputs keep the previous frame.

use embassy_sync::blocking_mutex::raw::RawMutex;

use segmux_core::config::BitOrder;
use segmux_core::Frame;
use segmux_hal::{BusError, ShiftRegisterBank};

use crate::shift::SharedBank;

/// Errors from writing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareWriteError {
    /// The bank reported a failure
    Bus(BusError),
    /// Frame does not cover the bank's outputs exactly
    FrameSize { expected: usize, found: usize },
    /// The bank is already borrowed by another write
    Busy,
}

impl From<BusError> for HardwareWriteError {
    fn from(e: BusError) -> Self {
        HardwareWriteError::Bus(e)
    }
}

/// Writes frames to a shared shift register bank
pub struct OutputWriter<'a, M: RawMutex, B> {
    bank: &'a SharedBank<M, B>,
    bit_order: BitOrder,
}

impl<'a, M, B> OutputWriter<'a, M, B>
where
    M: RawMutex,
    B: ShiftRegisterBank,
{
    pub fn new(bank: &'a SharedBank<M, B>, bit_order: BitOrder) -> Self {
        Self { bank, bit_order }
    }

    /// Registers in the bank, or `None` while another write holds it
    pub fn register_count(&self) -> Option<usize> {
        self.bank.lock(|cell| {
            cell.try_borrow()
                .ok()
                .map(|bank| bank.register_count())
        })
    }

    /// Shift `frame` into the bank and latch it
    pub fn write(&self, frame: &Frame) -> Result<(), HardwareWriteError> {
        let bits = frame.to_bits(self.bit_order);

        self.bank.lock(|cell| {
            let mut bank = cell.try_borrow_mut().map_err(|_| HardwareWriteError::Busy)?;

            let expected = bank.output_count();
            if bits.len() != expected {
                return Err(HardwareWriteError::FrameSize {
                    expected,
                    found: bits.len(),
                });
            }

            bank.write_bits(&bits)?;
            bank.latch()?;
            Ok(())
        })
    }
}
