//! Bit-banged 74HC595 chain
//!
//! Drives a chain of 74HC595 shift registers with three GPIO lines:
//!
//! - DS (serial data), sampled on the rising edge of SHCP
//! - SHCP (shift clock)
//! - STCP (storage clock / latch), copies the shift stage to the outputs
//!   on its rising edge
//!
//! OE is assumed tied low and MR tied high.

use embedded_hal::digital::{OutputPin, PinState};

use segmux_hal::{BusError, ShiftRegisterBank};

/// 74HC595 chain driven over GPIO
pub struct Sn74hc595<DS, SHCP, STCP> {
    data: DS,
    shift_clock: SHCP,
    storage_clock: STCP,
    registers: usize,
}

impl<DS, SHCP, STCP> Sn74hc595<DS, SHCP, STCP>
where
    DS: OutputPin,
    SHCP: OutputPin,
    STCP: OutputPin,
{
    /// Create a driver for a chain of `registers` devices
    ///
    /// Both clock lines should already be low.
    pub fn new(data: DS, shift_clock: SHCP, storage_clock: STCP, registers: usize) -> Self {
        Self {
            data,
            shift_clock,
            storage_clock,
            registers,
        }
    }

    /// Release the pins
    pub fn release(self) -> (DS, SHCP, STCP) {
        (self.data, self.shift_clock, self.storage_clock)
    }

    fn shift_one(&mut self, bit: bool) -> Result<(), BusError> {
        self.data
            .set_state(PinState::from(bit))
            .map_err(|_| BusError::Pin)?;
        self.shift_clock.set_high().map_err(|_| BusError::Pin)?;
        self.shift_clock.set_low().map_err(|_| BusError::Pin)
    }
}

impl<DS, SHCP, STCP> ShiftRegisterBank for Sn74hc595<DS, SHCP, STCP>
where
    DS: OutputPin,
    SHCP: OutputPin,
    STCP: OutputPin,
{
    fn register_count(&self) -> usize {
        self.registers
    }

    fn write_bits(&mut self, bits: &[bool]) -> Result<(), BusError> {
        for &bit in bits {
            self.shift_one(bit)?;
        }
        Ok(())
    }

    fn latch(&mut self) -> Result<(), BusError> {
        self.storage_clock.set_high().map_err(|_| BusError::Pin)?;
        self.storage_clock.set_low().map_err(|_| BusError::Pin)
    }
}
