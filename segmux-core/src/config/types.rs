//! Configuration type definitions
//!
//! These types describe how a display is wired and how text is laid out on
//! it. The defaults give a 4-digit display refreshed every 25 ms that shows
//! the leading characters of long text. The wiring defaults to one
//! register per digit; boards with a shared segment register, like the
//! ES32A08, set `wiring = "multiplexed"`.

use crate::glyph::DigitPattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default poll interval in milliseconds
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 25;

/// Default number of digits
pub const DEFAULT_DIGIT_COUNT: u8 = 4;

/// Maximum number of digits a display may have
pub const MAX_DIGITS: usize = 8;

/// Registers used by a multiplexed display (segments + digit selects)
pub const MULTIPLEXED_REGISTERS: usize = 2;

/// Where text shorter than the display sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    /// Blanks pad the right side
    Left,
    /// Blanks pad the left side
    #[default]
    Right,
}

/// Which characters survive when text is longer than the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Truncation {
    /// Show the first characters
    #[default]
    KeepLeading,
    /// Show the last characters
    KeepTrailing,
}

/// How the shift registers are connected to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wiring {
    /// One register per digit, all digits latched at once
    #[default]
    Static,
    /// One segment register plus one digit-select register, one digit lit
    /// per poll cycle
    Multiplexed,
}

/// Order in which frame outputs are shifted into the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitOrder {
    /// Highest output first, so it ends up at the far end of the chain
    #[default]
    MsbFirst,
    /// Output 0 first, for chains wired in reverse
    LsbFirst,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Digit count is zero or above [`MAX_DIGITS`]
    InvalidDigitCount(u8),
    /// Poll interval of zero
    ZeroInterval,
    /// The bank does not have the registers the wiring needs
    RegisterCountMismatch { expected: usize, found: usize },
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Poll interval in milliseconds
    pub update_interval_ms: u32,
    /// Number of digits on the display
    pub digit_count: u8,
    /// Padding side for short text
    pub alignment: Alignment,
    /// Truncation side for long text
    pub truncation: Truncation,
    /// Fold a `.` into the preceding digit's decimal point
    pub merge_decimal_point: bool,
    /// Pattern shown for characters without a glyph
    pub unknown_glyph: DigitPattern,
    /// Register wiring
    pub wiring: Wiring,
    /// Shift order
    pub bit_order: BitOrder,
    /// Segments light when their output is low (common anode)
    pub segment_active_low: bool,
    /// Digits are selected by driving their line low
    pub select_active_low: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            digit_count: DEFAULT_DIGIT_COUNT,
            alignment: Alignment::Right,
            truncation: Truncation::KeepLeading,
            merge_decimal_point: true,
            unknown_glyph: DigitPattern::DASH,
            wiring: Wiring::Static,
            bit_order: BitOrder::MsbFirst,
            segment_active_low: false,
            select_active_low: false,
        }
    }
}

impl DisplayConfig {
    /// Number of digits as a `usize`
    pub fn digits(&self) -> usize {
        self.digit_count as usize
    }

    /// Number of registers the configured wiring needs
    pub fn register_count(&self) -> usize {
        match self.wiring {
            Wiring::Static => self.digits(),
            Wiring::Multiplexed => MULTIPLEXED_REGISTERS,
        }
    }

    /// Check the configuration for values the driver cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digit_count == 0 || self.digits() > MAX_DIGITS {
            return Err(ConfigError::InvalidDigitCount(self.digit_count));
        }
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Check that a bank has exactly the registers this wiring drives
    pub fn check_register_count(&self, found: usize) -> Result<(), ConfigError> {
        let expected = self.register_count();
        if found != expected {
            return Err(ConfigError::RegisterCountMismatch { expected, found });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.update_interval_ms, 25);
        assert_eq!(config.digit_count, 4);
        assert_eq!(config.alignment, Alignment::Right);
        assert_eq!(config.truncation, Truncation::KeepLeading);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_register_count_by_wiring() {
        let mut config = DisplayConfig {
            digit_count: 6,
            ..Default::default()
        };
        assert_eq!(config.register_count(), 6);

        config.wiring = Wiring::Multiplexed;
        assert_eq!(config.register_count(), 2);
    }

    #[test]
    fn test_invalid_digit_count() {
        for count in [0u8, 9, 255] {
            let config = DisplayConfig {
                digit_count: count,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::InvalidDigitCount(count)));
        }
    }

    #[test]
    fn test_zero_interval() {
        let config = DisplayConfig {
            update_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_register_count_mismatch() {
        let config = DisplayConfig::default();
        assert!(config.check_register_count(4).is_ok());
        assert_eq!(
            config.check_register_count(2),
            Err(ConfigError::RegisterCountMismatch {
                expected: 4,
                found: 2
            })
        );
    }
}
