//! Seven-segment glyphs
//!
//! Patterns use the bit layout of the ES32A08 character map:
//!
//! ```text
//!  bit   7    6   5   4   3   2   1   0
//!  seg   DP   A   B   C   D   E   F   G
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// First character covered by the glyph table (space)
pub const FIRST_GLYPH: char = ' ';

/// Last character covered by the glyph table (tilde)
pub const LAST_GLYPH: char = '~';

/// A single segment of a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    /// Decimal point
    Dp,
}

impl Segment {
    /// All segments in output pin order (pin 0 = A ... pin 7 = DP)
    pub const ALL: [Segment; 8] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
        Segment::Dp,
    ];

    /// Bit mask of this segment within a [`DigitPattern`]
    pub const fn mask(self) -> u8 {
        match self {
            Segment::A => 0b0100_0000,
            Segment::B => 0b0010_0000,
            Segment::C => 0b0001_0000,
            Segment::D => 0b0000_1000,
            Segment::E => 0b0000_0100,
            Segment::F => 0b0000_0010,
            Segment::G => 0b0000_0001,
            Segment::Dp => 0b1000_0000,
        }
    }
}

/// Segment state of one display position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DigitPattern(pub u8);

impl DigitPattern {
    /// All segments off
    pub const BLANK: Self = Self(0);
    /// Middle bar only
    pub const DASH: Self = Self(Segment::G.mask());
    /// Decimal point only
    pub const DOT: Self = Self(Segment::Dp.mask());

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Same pattern with the decimal point lit
    pub const fn with_dp(self) -> Self {
        Self(self.0 | Segment::Dp.mask())
    }

    /// Check if the decimal point is lit
    pub const fn has_dp(self) -> bool {
        self.0 & Segment::Dp.mask() != 0
    }

    /// Check if no segment is lit
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Check if a segment is lit
    pub const fn segment(self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }
}

impl From<u8> for DigitPattern {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

/// Glyphs for printable ASCII, indexed from [`FIRST_GLYPH`]
///
/// A zero entry other than space means the character has no usable
/// seven-segment shape.
#[rustfmt::skip]
const GLYPHS: [u8; 95] = [
    // ' '   '!'   '"'   '#'   '$'   '%'   '&'   '''
    0x00, 0xB0, 0x22, 0x00, 0x00, 0x49, 0x00, 0x02,
    // '('   ')'   '*'   '+'   ','   '-'   '.'   '/'
    0x4E, 0x78, 0x40, 0x00, 0x10, 0x01, 0x80, 0x00,
    // '0'   '1'   '2'   '3'   '4'   '5'   '6'   '7'
    0x7E, 0x30, 0x6D, 0x79, 0x33, 0x5B, 0x5F, 0x70,
    // '8'   '9'   ':'   ';'   '<'   '='   '>'   '?'
    0x7F, 0x7B, 0x48, 0x58, 0x00, 0x09, 0x00, 0x65,
    // '@'   'A'   'B'   'C'   'D'   'E'   'F'   'G'
    0x6F, 0x77, 0x1F, 0x4E, 0x3D, 0x4F, 0x47, 0x5E,
    // 'H'   'I'   'J'   'K'   'L'   'M'   'N'   'O'
    0x37, 0x30, 0x3C, 0x00, 0x0E, 0x00, 0x15, 0x7E,
    // 'P'   'Q'   'R'   'S'   'T'   'U'   'V'   'W'
    0x67, 0xFE, 0x05, 0x5B, 0x07, 0x3E, 0x3E, 0x3F,
    // 'X'   'Y'   'Z'   '['   '\'   ']'   '^'   '_'
    0x00, 0x27, 0x6D, 0x4E, 0x00, 0x78, 0x00, 0x08,
    // '`'   'a'   'b'   'c'   'd'   'e'   'f'   'g'
    0x20, 0x77, 0x1F, 0x0D, 0x3D, 0x4F, 0x47, 0x5E,
    // 'h'   'i'   'j'   'k'   'l'   'm'   'n'   'o'
    0x17, 0x10, 0x3C, 0x00, 0x0E, 0x00, 0x15, 0x1D,
    // 'p'   'q'   'r'   's'   't'   'u'   'v'   'w'
    0x67, 0x00, 0x05, 0x5B, 0x07, 0x1C, 0x1C, 0x00,
    // 'x'   'y'   'z'   '{'   '|'   '}'   '~' (degree)
    0x00, 0x27, 0x00, 0x31, 0x06, 0x07, 0x63,
];

/// Look up the glyph for a character
///
/// Returns `None` for characters outside printable ASCII and for
/// characters without a seven-segment shape (`K`, `M`, `#`, ...).
pub fn glyph(c: char) -> Option<DigitPattern> {
    if !(FIRST_GLYPH..=LAST_GLYPH).contains(&c) {
        return None;
    }

    let bits = GLYPHS[(c as u32 - FIRST_GLYPH as u32) as usize];
    if bits == 0 && c != ' ' {
        None
    } else {
        Some(DigitPattern(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(glyph('0'), Some(DigitPattern(0x7E)));
        assert_eq!(glyph('1'), Some(DigitPattern(0x30)));
        assert_eq!(glyph('8'), Some(DigitPattern(0x7F)));
    }

    #[test]
    fn test_digit_one_lights_b_and_c() {
        let one = glyph('1').unwrap();
        assert!(one.segment(Segment::B));
        assert!(one.segment(Segment::C));
        assert!(!one.segment(Segment::A));
        assert!(!one.has_dp());
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(glyph(' '), Some(DigitPattern::BLANK));
    }

    #[test]
    fn test_dot_and_dash() {
        assert_eq!(glyph('.'), Some(DigitPattern::DOT));
        assert_eq!(glyph('-'), Some(DigitPattern::DASH));
    }

    #[test]
    fn test_unmapped_characters() {
        for c in ['K', 'M', '#', 'w', '\n', '\0', 'é', '°', '\u{7F}'] {
            assert_eq!(glyph(c), None, "{:?} should be unmapped", c);
        }
    }

    #[test]
    fn test_with_dp() {
        let seven = glyph('7').unwrap().with_dp();
        assert!(seven.has_dp());
        assert_eq!(seven.bits(), 0xF0);
    }

    #[test]
    fn test_segment_masks_cover_byte() {
        let all = Segment::ALL.iter().fold(0u8, |acc, s| acc | s.mask());
        assert_eq!(all, 0xFF);
    }
}
