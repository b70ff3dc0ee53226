//! Shift register bank abstraction
//!
//! A bank is a chain of cascaded 8-bit serial-in/parallel-out registers
//! (74HC595 and friends). Bits are shifted into the chain first and only
//! become visible on the parallel outputs after a latch pulse, which makes
//! the latch the one atomic operation the display can rely on.

/// Number of outputs per register in the chain
pub const REGISTER_WIDTH: usize = 8;

/// Errors reported by a shift register bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// A GPIO line (data, clock or latch) could not be driven
    Pin,
    /// The underlying serial transfer failed
    Transfer,
    /// The bus operation did not complete in time
    Timeout,
    /// The bit count does not fit the bank's transfer unit
    Length,
}

/// Cascaded shift register bank
///
/// Implementations must keep the parallel outputs unchanged until
/// [`latch`](ShiftRegisterBank::latch) succeeds. A failed
/// [`write_bits`](ShiftRegisterBank::write_bits) may leave garbage in the
/// shift stage, but never on the outputs.
pub trait ShiftRegisterBank {
    /// Number of 8-bit registers in the chain
    fn register_count(&self) -> usize;

    /// Total number of parallel outputs
    fn output_count(&self) -> usize {
        self.register_count() * REGISTER_WIDTH
    }

    /// Shift bits into the chain, first element first
    fn write_bits(&mut self, bits: &[bool]) -> Result<(), BusError>;

    /// Transfer the shift stage to the parallel outputs
    fn latch(&mut self) -> Result<(), BusError>;
}

impl<T: ShiftRegisterBank + ?Sized> ShiftRegisterBank for &mut T {
    fn register_count(&self) -> usize {
        (**self).register_count()
    }

    fn write_bits(&mut self, bits: &[bool]) -> Result<(), BusError> {
        (**self).write_bits(bits)
    }

    fn latch(&mut self) -> Result<(), BusError> {
        (**self).latch()
    }
}
