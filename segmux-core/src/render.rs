//! Text to digit pattern rendering
//!
//! A [`Renderer`] only exists for a digit count the display can hold. Once
//! built it is pure and total: every input string, including an absent
//! one, produces exactly `digit_count` patterns.
//!
//! Text is first split into slots. Each character takes one slot, except
//! that a `.` directly after another character lights that character's
//! decimal point instead (when merging is enabled). Slots are then padded
//! with blanks or truncated to fit the display.

use core::iter::{self, Peekable};
use core::str::Chars;

use heapless::Vec;

use crate::config::{Alignment, ConfigError, DisplayConfig, Truncation, MAX_DIGITS};
use crate::glyph::{glyph, DigitPattern};

/// Rendered patterns, leftmost digit first
pub type DigitPatterns = Vec<DigitPattern, MAX_DIGITS>;

/// Render text with the default layout policy
///
/// Right-aligned, keeps leading characters, merges decimal points and
/// shows a dash for characters without a glyph. Fails only if
/// `digit_count` is zero or above [`MAX_DIGITS`].
pub fn render(text: Option<&str>, digit_count: usize) -> Result<DigitPatterns, ConfigError> {
    Ok(Renderer::new(digit_count)?.render(text))
}

/// Text renderer for a fixed number of digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Renderer {
    digit_count: usize,
    alignment: Alignment,
    truncation: Truncation,
    merge_decimal_point: bool,
    unknown_glyph: DigitPattern,
}

impl Renderer {
    /// Create a renderer with default policies
    ///
    /// `digit_count` must be in `1..=MAX_DIGITS`.
    pub fn new(digit_count: usize) -> Result<Self, ConfigError> {
        if digit_count == 0 || digit_count > MAX_DIGITS {
            let count = u8::try_from(digit_count).unwrap_or(u8::MAX);
            return Err(ConfigError::InvalidDigitCount(count));
        }

        let defaults = DisplayConfig::default();
        Ok(Self {
            digit_count,
            alignment: defaults.alignment,
            truncation: defaults.truncation,
            merge_decimal_point: defaults.merge_decimal_point,
            unknown_glyph: defaults.unknown_glyph,
        })
    }

    /// Create a renderer from display configuration
    pub fn from_config(config: &DisplayConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.digits())?
            .with_alignment(config.alignment)
            .with_truncation(config.truncation)
            .with_decimal_point_merging(config.merge_decimal_point)
            .with_unknown_glyph(config.unknown_glyph))
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn with_decimal_point_merging(mut self, merge: bool) -> Self {
        self.merge_decimal_point = merge;
        self
    }

    pub fn with_unknown_glyph(mut self, pattern: DigitPattern) -> Self {
        self.unknown_glyph = pattern;
        self
    }

    /// Number of digits produced per render
    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Render text into exactly [`digit_count`](Self::digit_count) patterns
    ///
    /// Absent and empty text render as all blanks.
    pub fn render(&self, text: Option<&str>) -> DigitPatterns {
        let mut out = DigitPatterns::new();

        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => {
                out.extend(blanks(self.digit_count));
                return out;
            }
        };

        let slot_count = self.slots(text).count();
        let shown = slot_count.min(self.digit_count);
        let padding = self.digit_count - shown;
        let skip = match self.truncation {
            Truncation::KeepLeading => 0,
            Truncation::KeepTrailing => slot_count - shown,
        };
        let visible = self.slots(text).skip(skip).take(shown);

        match self.alignment {
            Alignment::Right => {
                out.extend(blanks(padding));
                out.extend(visible);
            }
            Alignment::Left => {
                out.extend(visible);
                out.extend(blanks(padding));
            }
        }

        out
    }

    fn slots<'a>(&self, text: &'a str) -> Slots<'a> {
        Slots {
            chars: text.chars().peekable(),
            merge_decimal_point: self.merge_decimal_point,
            unknown_glyph: self.unknown_glyph,
        }
    }
}

fn blanks(count: usize) -> impl Iterator<Item = DigitPattern> {
    iter::repeat(DigitPattern::BLANK).take(count)
}

/// Iterator over display slots of a string
struct Slots<'a> {
    chars: Peekable<Chars<'a>>,
    merge_decimal_point: bool,
    unknown_glyph: DigitPattern,
}

impl Iterator for Slots<'_> {
    type Item = DigitPattern;

    fn next(&mut self) -> Option<DigitPattern> {
        let c = self.chars.next()?;
        let pattern = glyph(c).unwrap_or(self.unknown_glyph);

        if self.merge_decimal_point && c != '.' && self.chars.peek() == Some(&'.') {
            self.chars.next();
            return Some(pattern.with_dp());
        }

        Some(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(c: char) -> DigitPattern {
        glyph(c).unwrap()
    }

    const B: DigitPattern = DigitPattern::BLANK;

    #[test]
    fn test_right_aligned_padding() {
        let out = render(Some("12"), 4).unwrap();
        assert_eq!(out.as_slice(), &[B, B, g('1'), g('2')]);
    }

    #[test]
    fn test_left_aligned_padding() {
        let out = Renderer::new(4)
            .unwrap()
            .with_alignment(Alignment::Left)
            .render(Some("12"));
        assert_eq!(out.as_slice(), &[g('1'), g('2'), B, B]);
    }

    #[test]
    fn test_keep_trailing() {
        let out = Renderer::new(4)
            .unwrap()
            .with_truncation(Truncation::KeepTrailing)
            .render(Some("12345"));
        assert_eq!(out.as_slice(), &[g('2'), g('3'), g('4'), g('5')]);
    }

    #[test]
    fn test_keep_leading_by_default() {
        let out = render(Some("12345"), 4).unwrap();
        assert_eq!(out.as_slice(), &[g('1'), g('2'), g('3'), g('4')]);
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(render(None, 4).unwrap().as_slice(), &[B; 4]);
        assert_eq!(render(Some(""), 4).unwrap().as_slice(), &[B; 4]);
    }

    #[test]
    fn test_unmapped_uses_unknown_glyph() {
        let out = render(Some("K1"), 2).unwrap();
        assert_eq!(out.as_slice(), &[DigitPattern::DASH, g('1')]);

        let out = Renderer::new(2)
            .unwrap()
            .with_unknown_glyph(DigitPattern::BLANK)
            .render(Some("é1"));
        assert_eq!(out.as_slice(), &[B, g('1')]);
    }

    #[test]
    fn test_decimal_point_merges_into_previous_digit() {
        let out = render(Some("12.5"), 4).unwrap();
        assert_eq!(out.as_slice(), &[B, g('1'), g('2').with_dp(), g('5')]);
    }

    #[test]
    fn test_leading_and_repeated_dots_take_a_slot() {
        let out = render(Some(".5"), 3).unwrap();
        assert_eq!(out.as_slice(), &[B, DigitPattern::DOT, g('5')]);

        let out = render(Some("1.."), 3).unwrap();
        assert_eq!(out.as_slice(), &[B, g('1').with_dp(), DigitPattern::DOT]);
    }

    #[test]
    fn test_decimal_point_merging_disabled() {
        let out = Renderer::new(4)
            .unwrap()
            .with_decimal_point_merging(false)
            .render(Some("1.5"));
        assert_eq!(out.as_slice(), &[B, g('1'), DigitPattern::DOT, g('5')]);
    }

    #[test]
    fn test_truncation_counts_merged_slots() {
        // "21.50C" is five slots: 2, 1., 5, 0, C
        let out = render(Some("21.50C"), 4).unwrap();
        assert_eq!(out.as_slice(), &[g('2'), g('1').with_dp(), g('5'), g('0')]);

        let out = Renderer::new(4)
            .unwrap()
            .with_truncation(Truncation::KeepTrailing)
            .render(Some("21.50C"));
        assert_eq!(out.as_slice(), &[g('1').with_dp(), g('5'), g('0'), g('C')]);
    }

    #[test]
    fn test_digit_count_out_of_range_rejected() {
        assert_eq!(render(Some("1"), 12), Err(ConfigError::InvalidDigitCount(12)));
        assert_eq!(render(Some("1"), 0), Err(ConfigError::InvalidDigitCount(0)));
        assert_eq!(
            Renderer::new(300).map(|r| r.digit_count()),
            Err(ConfigError::InvalidDigitCount(u8::MAX))
        );
    }

    #[test]
    fn test_largest_display_gets_every_digit() {
        let out = render(Some("1"), MAX_DIGITS).unwrap();
        assert_eq!(out.len(), MAX_DIGITS);
        assert_eq!(out[MAX_DIGITS - 1], g('1'));
    }

    #[test]
    fn test_from_config_rejects_invalid_digit_count() {
        let config = DisplayConfig {
            digit_count: 9,
            ..Default::default()
        };
        assert_eq!(
            Renderer::from_config(&config),
            Err(ConfigError::InvalidDigitCount(9))
        );
    }

    #[test]
    fn test_from_config() {
        let config = DisplayConfig {
            digit_count: 3,
            alignment: Alignment::Left,
            ..Default::default()
        };
        let out = Renderer::from_config(&config).unwrap().render(Some("7"));
        assert_eq!(out.as_slice(), &[g('7'), B, B]);
    }
}
