//! Shift register frames
//!
//! A [`Frame`] holds the desired level of every parallel output in the bank,
//! indexed as `register * 8 + pin` with register 0 nearest the MCU.
//! [`FrameEncoder`] turns rendered digit patterns into frames for the
//! configured wiring:
//!
//! ```text
//! Static (one register per digit)
//!   register:   0        1        2        3
//!   pins 0-7:  A..G,DP  A..G,DP  A..G,DP  A..G,DP
//!   digit:      0        1        2        3      (0 = leftmost)
//!
//! Multiplexed (ES32A08 wiring)
//!   register 0, pins 0-7:  A..G,DP of the selected digit
//!   register 1, pins 0-7:  digit select lines 0..7
//! ```

use heapless::Vec;

use crate::config::{BitOrder, DisplayConfig, Wiring, MAX_DIGITS, MULTIPLEXED_REGISTERS};
use crate::glyph::{DigitPattern, Segment};

pub use segmux_hal::REGISTER_WIDTH;

/// Largest bank a frame can describe
pub const MAX_REGISTERS: usize = MAX_DIGITS;

/// Largest number of outputs in a frame
pub const MAX_FRAME_BITS: usize = MAX_REGISTERS * REGISTER_WIDTH;

/// Output levels for a whole bank
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    outputs: Vec<bool, MAX_FRAME_BITS>,
}

impl Frame {
    /// Frame with every output low
    ///
    /// `register_count` is clamped to [`MAX_REGISTERS`].
    pub fn new(register_count: usize) -> Self {
        let len = register_count.min(MAX_REGISTERS) * REGISTER_WIDTH;
        let mut outputs = Vec::new();
        outputs.extend(core::iter::repeat(false).take(len));
        Self { outputs }
    }

    /// Number of registers covered
    pub fn register_count(&self) -> usize {
        self.outputs.len() / REGISTER_WIDTH
    }

    /// Number of outputs covered
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Level of one output, `false` when out of range
    pub fn output(&self, index: usize) -> bool {
        self.outputs.get(index).copied().unwrap_or(false)
    }

    /// Set one output, ignoring indices past the end of the frame
    pub fn set_output(&mut self, index: usize, high: bool) {
        if let Some(output) = self.outputs.get_mut(index) {
            *output = high;
        }
    }

    /// Outputs of one register packed into a byte (pin 0 = bit 0)
    pub fn register(&self, register: usize) -> u8 {
        (0..REGISTER_WIDTH).fold(0u8, |acc, pin| {
            acc | ((self.output(register * REGISTER_WIDTH + pin) as u8) << pin)
        })
    }

    /// Outputs in the order they must be shifted into the bank
    pub fn shift_sequence(&self, order: BitOrder) -> impl Iterator<Item = bool> + '_ {
        let (forward, reverse) = match order {
            BitOrder::LsbFirst => (Some(self.outputs.iter()), None),
            BitOrder::MsbFirst => (None, Some(self.outputs.iter().rev())),
        };
        forward
            .into_iter()
            .flatten()
            .chain(reverse.into_iter().flatten())
            .copied()
    }

    /// Copy the shift sequence into a buffer
    pub fn to_bits(&self, order: BitOrder) -> Vec<bool, MAX_FRAME_BITS> {
        self.shift_sequence(order).collect()
    }

    fn write_pattern(&mut self, register: usize, pattern: DigitPattern, active_low: bool) {
        let base = register * REGISTER_WIDTH;
        for (pin, segment) in Segment::ALL.iter().enumerate() {
            self.set_output(base + pin, pattern.segment(*segment) != active_low);
        }
    }
}

/// Builds frames for a wiring and polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameEncoder {
    wiring: Wiring,
    digit_count: usize,
    segment_active_low: bool,
    select_active_low: bool,
}

impl FrameEncoder {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            wiring: config.wiring,
            digit_count: config.digits().min(MAX_DIGITS),
            segment_active_low: config.segment_active_low,
            select_active_low: config.select_active_low,
        }
    }

    /// Registers in each frame
    pub fn register_count(&self) -> usize {
        match self.wiring {
            Wiring::Static => self.digit_count,
            Wiring::Multiplexed => MULTIPLEXED_REGISTERS,
        }
    }

    /// Poll cycles needed to show every digit once
    pub fn cycle_length(&self) -> usize {
        match self.wiring {
            Wiring::Static => 1,
            Wiring::Multiplexed => self.digit_count.max(1),
        }
    }

    /// Frame with all segments dark and no digit selected
    pub fn blank(&self) -> Frame {
        let mut frame = Frame::new(self.register_count());
        match self.wiring {
            Wiring::Static => {
                for register in 0..self.digit_count {
                    frame.write_pattern(register, DigitPattern::BLANK, self.segment_active_low);
                }
            }
            Wiring::Multiplexed => {
                frame.write_pattern(0, DigitPattern::BLANK, self.segment_active_low);
                self.write_selects(&mut frame, None);
            }
        }
        frame
    }

    /// Encode the frame to latch on this poll cycle
    ///
    /// `active_digit` picks the digit to light on multiplexed wiring and is
    /// ignored on static wiring. Missing patterns are treated as blank.
    pub fn encode(&self, digits: &[DigitPattern], active_digit: usize) -> Frame {
        match self.wiring {
            Wiring::Static => self.encode_static(digits),
            Wiring::Multiplexed => self.encode_multiplexed(digits, active_digit),
        }
    }

    fn encode_static(&self, digits: &[DigitPattern]) -> Frame {
        let mut frame = Frame::new(self.register_count());
        for register in 0..self.digit_count {
            let pattern = digits.get(register).copied().unwrap_or_default();
            frame.write_pattern(register, pattern, self.segment_active_low);
        }
        frame
    }

    fn encode_multiplexed(&self, digits: &[DigitPattern], active_digit: usize) -> Frame {
        let mut frame = Frame::new(self.register_count());
        let active = active_digit % self.cycle_length();
        let pattern = digits.get(active).copied().unwrap_or_default();

        frame.write_pattern(0, pattern, self.segment_active_low);
        self.write_selects(&mut frame, Some(active));
        frame
    }

    fn write_selects(&self, frame: &mut Frame, active: Option<usize>) {
        for digit in 0..self.digit_count {
            let selected = active == Some(digit);
            frame.set_output(REGISTER_WIDTH + digit, selected != self.select_active_low);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::glyph;

    fn config(wiring: Wiring) -> DisplayConfig {
        DisplayConfig {
            wiring,
            ..Default::default()
        }
    }

    struct Chain(usize);

    impl segmux_hal::ShiftRegisterBank for Chain {
        fn register_count(&self) -> usize {
            self.0
        }

        fn write_bits(&mut self, _bits: &[bool]) -> Result<(), segmux_hal::BusError> {
            Ok(())
        }

        fn latch(&mut self) -> Result<(), segmux_hal::BusError> {
            Ok(())
        }
    }

    #[test]
    fn test_frame_matches_bank_outputs() {
        use segmux_hal::ShiftRegisterBank;

        for wiring in [Wiring::Static, Wiring::Multiplexed] {
            let encoder = FrameEncoder::new(&config(wiring));
            let bank = Chain(encoder.register_count());
            assert_eq!(encoder.blank().len(), bank.output_count());
            let bits = encoder.encode(&[], 0).to_bits(BitOrder::MsbFirst);
            assert_eq!(bits.len(), bank.output_count());
        }
    }

    fn digits(s: &str) -> heapless::Vec<DigitPattern, 8> {
        s.chars().map(|c| glyph(c).unwrap()).collect()
    }

    #[test]
    fn test_static_frame_registers() {
        let encoder = FrameEncoder::new(&config(Wiring::Static));
        let frame = encoder.encode(&digits("1234"), 0);

        assert_eq!(frame.register_count(), 4);
        assert_eq!(frame.len(), 32);
        // '1' lights B and C, which are pins 1 and 2
        assert_eq!(frame.register(0), 0b0000_0110);
        // '4' lights B, C, F and G
        assert_eq!(frame.register(3), 0b0110_0110);
    }

    #[test]
    fn test_static_blank_is_dark() {
        let encoder = FrameEncoder::new(&config(Wiring::Static));
        let frame = encoder.blank();
        assert!((0..4).all(|r| frame.register(r) == 0));
    }

    #[test]
    fn test_segment_active_low_inverts() {
        let encoder = FrameEncoder::new(&DisplayConfig {
            segment_active_low: true,
            ..Default::default()
        });
        assert_eq!(encoder.blank().register(0), 0xFF);
        assert_eq!(encoder.encode(&digits("1   "), 0).register(0), !0b0000_0110);
    }

    #[test]
    fn test_multiplexed_selects_one_digit() {
        let encoder = FrameEncoder::new(&config(Wiring::Multiplexed));
        assert_eq!(encoder.register_count(), 2);
        assert_eq!(encoder.cycle_length(), 4);

        let frame = encoder.encode(&digits("1234"), 2);
        // Segments of '3': A, B, C, D, G
        assert_eq!(frame.register(0), 0b0100_1111);
        assert_eq!(frame.register(1), 0b0000_0100);
    }

    #[test]
    fn test_multiplexed_active_digit_wraps() {
        let encoder = FrameEncoder::new(&config(Wiring::Multiplexed));
        let ds = digits("1234");
        assert_eq!(encoder.encode(&ds, 5), encoder.encode(&ds, 1));
    }

    #[test]
    fn test_multiplexed_select_active_low() {
        let encoder = FrameEncoder::new(&DisplayConfig {
            wiring: Wiring::Multiplexed,
            select_active_low: true,
            ..Default::default()
        });

        let frame = encoder.encode(&digits("1234"), 0);
        // Lines 0..3 are digit selects, 4..7 are unused and stay low
        assert_eq!(frame.register(1), 0b0000_1110);
        assert_eq!(encoder.blank().register(1), 0b0000_1111);
    }

    #[test]
    fn test_dp_maps_to_pin_7() {
        let encoder = FrameEncoder::new(&DisplayConfig {
            digit_count: 1,
            ..Default::default()
        });
        let frame = encoder.encode(&[DigitPattern::DOT], 0);
        assert_eq!(frame.register(0), 0b1000_0000);
    }

    #[test]
    fn test_shift_sequence_order() {
        let mut frame = Frame::new(1);
        frame.set_output(0, true);

        let msb: heapless::Vec<bool, 8> = frame.shift_sequence(BitOrder::MsbFirst).collect();
        let lsb: heapless::Vec<bool, 8> = frame.shift_sequence(BitOrder::LsbFirst).collect();

        assert_eq!(msb.last(), Some(&true));
        assert_eq!(lsb.first(), Some(&true));
        assert_eq!(msb.iter().filter(|b| **b).count(), 1);
    }

    #[test]
    fn test_set_output_out_of_range_is_ignored() {
        let mut frame = Frame::new(1);
        frame.set_output(100, true);
        assert!(!frame.output(100));
        assert_eq!(frame.len(), 8);
    }
}
