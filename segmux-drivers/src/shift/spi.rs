//! 74HC595 chain on an SPI bus
//!
//! SCK drives SHCP and MOSI drives DS; STCP is a separate GPIO. Bits are
//! packed eight to a byte, first bit in the MSB, so the bus must be in
//! MSB-first mode 0.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use segmux_hal::{BusError, ShiftRegisterBank, REGISTER_WIDTH};

/// Bytes sent per SPI transfer
const CHUNK_BYTES: usize = 8;

/// 74HC595 chain driven over SPI
pub struct SpiSn74hc595<SPI, STCP> {
    spi: SPI,
    storage_clock: STCP,
    registers: usize,
}

impl<SPI, STCP> SpiSn74hc595<SPI, STCP>
where
    SPI: SpiBus,
    STCP: OutputPin,
{
    /// Create a driver for a chain of `registers` devices
    pub fn new(spi: SPI, storage_clock: STCP, registers: usize) -> Self {
        Self {
            spi,
            storage_clock,
            registers,
        }
    }

    /// Release the bus and latch pin
    pub fn release(self) -> (SPI, STCP) {
        (self.spi, self.storage_clock)
    }
}

/// Pack up to 8 bits into a byte, first bit in the MSB
fn pack(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
}

impl<SPI, STCP> ShiftRegisterBank for SpiSn74hc595<SPI, STCP>
where
    SPI: SpiBus,
    STCP: OutputPin,
{
    fn register_count(&self) -> usize {
        self.registers
    }

    fn write_bits(&mut self, bits: &[bool]) -> Result<(), BusError> {
        if bits.len() % REGISTER_WIDTH != 0 {
            return Err(BusError::Length);
        }

        let mut buf = [0u8; CHUNK_BYTES];
        for chunk in bits.chunks(CHUNK_BYTES * REGISTER_WIDTH) {
            let len = chunk.len() / REGISTER_WIDTH;
            for (byte, bits) in buf.iter_mut().zip(chunk.chunks(REGISTER_WIDTH)) {
                *byte = pack(bits);
            }
            self.spi.write(&buf[..len]).map_err(|_| BusError::Transfer)?;
        }

        // The latch must not fire while bits are still on the wire
        self.spi.flush().map_err(|_| BusError::Transfer)
    }

    fn latch(&mut self) -> Result<(), BusError> {
        self.storage_clock.set_high().map_err(|_| BusError::Pin)?;
        self.storage_clock.set_low().map_err(|_| BusError::Pin)
    }
}
