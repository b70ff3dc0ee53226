//! Minimal TOML parser for display configuration
//!
//! Handles only the subset needed for `display.toml`. Arrays and inline
//! tables are not supported.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - A single `[display]` section (keys before it are read the same way)
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Escapes inside strings

use super::types::{Alignment, BitOrder, ConfigError, DisplayConfig, Truncation, Wiring};
use crate::glyph::DigitPattern;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section other than `[display]`, or a malformed header
    InvalidSection,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Key is not a display setting
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// A raw value from the right-hand side of `key = value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a str),
    Int(u32),
    Bool(bool),
}

impl<'a> Value<'a> {
    fn parse(raw: &'a str) -> Result<Self, ParseError> {
        let raw = raw.trim();

        if let Some(inner) = raw.strip_prefix('"') {
            return inner
                .strip_suffix('"')
                .map(Value::Str)
                .ok_or(ParseError::InvalidValue);
        }

        match raw {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }

        parse_int(raw).map(Value::Int).ok_or(ParseError::InvalidValue)
    }

    fn as_str(self) -> Result<&'a str, ParseError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(ParseError::InvalidValue),
        }
    }

    fn as_bool(self) -> Result<bool, ParseError> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(ParseError::InvalidValue),
        }
    }

    fn as_u8(self) -> Result<u8, ParseError> {
        match self {
            Value::Int(n) => u8::try_from(n).map_err(|_| ParseError::InvalidValue),
            _ => Err(ParseError::InvalidValue),
        }
    }
}

/// Parse display configuration from TOML text
///
/// Missing keys keep their [`DisplayConfig::default`] values. The result
/// is validated before it is returned.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection)?
                .trim();
            if name != "display" {
                return Err(ParseError::InvalidSection);
            }
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidLine);
        }

        apply_key(&mut config, key, Value::parse(value)?)?;
    }

    config.validate()?;
    Ok(config)
}

fn apply_key(config: &mut DisplayConfig, key: &str, value: Value<'_>) -> Result<(), ParseError> {
    match key {
        "update_interval" => {
            config.update_interval_ms = match value {
                Value::Int(ms) => ms,
                Value::Str(s) => parse_duration_ms(s).ok_or(ParseError::InvalidValue)?,
                Value::Bool(_) => return Err(ParseError::InvalidValue),
            };
        }
        "digit_count" => config.digit_count = value.as_u8()?,
        "alignment" => {
            config.alignment = match value.as_str()? {
                "left" => Alignment::Left,
                "right" => Alignment::Right,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "truncation" => {
            config.truncation = match value.as_str()? {
                "keep_leading" | "leading" => Truncation::KeepLeading,
                "keep_trailing" | "trailing" => Truncation::KeepTrailing,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "merge_decimal_point" => config.merge_decimal_point = value.as_bool()?,
        "unknown_glyph" => {
            config.unknown_glyph = match value {
                Value::Str("dash") => DigitPattern::DASH,
                Value::Str("blank") => DigitPattern::BLANK,
                Value::Int(_) => DigitPattern(value.as_u8()?),
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "wiring" => {
            config.wiring = match value.as_str()? {
                "static" => Wiring::Static,
                "multiplexed" => Wiring::Multiplexed,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "bit_order" => {
            config.bit_order = match value.as_str()? {
                "msb_first" => BitOrder::MsbFirst,
                "lsb_first" => BitOrder::LsbFirst,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        "segment_active_low" => config.segment_active_low = value.as_bool()?,
        "select_active_low" => config.select_active_low = value.as_bool()?,
        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

/// Parse a duration such as `"25ms"`, `"1s"` or `"0.5s"` into milliseconds
///
/// A bare number is taken as milliseconds.
pub fn parse_duration_ms(s: &str) -> Option<u32> {
    let s = s.trim();

    if let Some(ms) = s.strip_suffix("ms") {
        return parse_int(ms.trim());
    }

    if let Some(secs) = s.strip_suffix('s') {
        let secs = secs.trim();
        let (whole, frac) = secs.split_once('.').unwrap_or((secs, ""));
        if frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut millis = 0u32;
        for (i, b) in frac.bytes().enumerate() {
            millis += (b - b'0') as u32 * 10u32.pow(2 - i as u32);
        }

        let whole = if whole.is_empty() { 0 } else { parse_int(whole)? };
        return whole.checked_mul(1000)?.checked_add(millis);
    }

    parse_int(s)
}

/// Parse a decimal or `0x`/`0b` prefixed integer, allowing `_` separators
fn parse_int(s: &str) -> Option<u32> {
    let mut digits: heapless::String<40> = heapless::String::new();
    for c in s.chars().filter(|&c| c != '_') {
        digits.push(c).ok()?;
    }
    let digits = digits.as_str();

    if let Some(hex) = digits.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u32::from_str_radix(bin, 2).ok()
    } else {
        digits.parse().ok()
    }
}

/// Strip a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(DisplayConfig::default()));
    }

    #[test]
    fn test_full_config() {
        let input = r#"
            # ES32A08 front panel
            [display]
            update_interval = "40ms"
            digit_count = 8
            alignment = "left"
            truncation = "keep_trailing"
            merge_decimal_point = false
            unknown_glyph = "blank"
            wiring = "multiplexed"   # two registers
            bit_order = "lsb_first"
            segment_active_low = true
            select_active_low = true
        "#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.update_interval_ms, 40);
        assert_eq!(config.digit_count, 8);
        assert_eq!(config.alignment, Alignment::Left);
        assert_eq!(config.truncation, Truncation::KeepTrailing);
        assert!(!config.merge_decimal_point);
        assert_eq!(config.unknown_glyph, DigitPattern::BLANK);
        assert_eq!(config.wiring, Wiring::Multiplexed);
        assert_eq!(config.bit_order, BitOrder::LsbFirst);
        assert!(config.segment_active_low);
        assert!(config.select_active_low);
    }

    #[test]
    fn test_interval_forms() {
        let ms = |s: &str| parse_config(s).map(|c| c.update_interval_ms);

        assert_eq!(ms("update_interval = 25"), Ok(25));
        assert_eq!(ms("update_interval = \"25ms\""), Ok(25));
        assert_eq!(ms("update_interval = \"1s\""), Ok(1000));
        assert_eq!(ms("update_interval = \"0.25s\""), Ok(250));
        assert_eq!(ms("update_interval = true"), Err(ParseError::InvalidValue));
        assert_eq!(ms("update_interval = \"fast\""), Err(ParseError::InvalidValue));
        assert_eq!(ms("update_interval = \"xs\""), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_duration_parser() {
        assert_eq!(parse_duration_ms("25ms"), Some(25));
        assert_eq!(parse_duration_ms("2s"), Some(2000));
        assert_eq!(parse_duration_ms("1.5s"), Some(1500));
        assert_eq!(parse_duration_ms(".1s"), Some(100));
        assert_eq!(parse_duration_ms("100"), Some(100));
        assert_eq!(parse_duration_ms("1.2345s"), None);
        assert_eq!(parse_duration_ms("ms"), None);
    }

    #[test]
    fn test_unknown_glyph_raw_bits() {
        let config = parse_config("unknown_glyph = 0b0000_1000").unwrap();
        assert_eq!(config.unknown_glyph, DigitPattern(0x08));

        let config = parse_config("unknown_glyph = 0x80").unwrap();
        assert_eq!(config.unknown_glyph, DigitPattern::DOT);

        assert_eq!(
            parse_config("unknown_glyph = 300"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_rejects_other_sections() {
        assert_eq!(
            parse_config("[heater]\nmax_temp = 50"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_config("[display"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_rejects_unknown_key() {
        assert_eq!(
            parse_config("[display]\ntext_id = \"uptime\""),
            Err(ParseError::UnknownKey)
        );
    }

    #[test]
    fn test_rejects_bad_lines() {
        assert_eq!(parse_config("digit_count"), Err(ParseError::InvalidLine));
        assert_eq!(parse_config("= 4"), Err(ParseError::InvalidLine));
        assert_eq!(
            parse_config("alignment = \"centre\""),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("alignment = \"left"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_validation_runs() {
        assert_eq!(
            parse_config("digit_count = 12"),
            Err(ParseError::Invalid(ConfigError::InvalidDigitCount(12)))
        );
        assert_eq!(
            parse_config("update_interval = \"0ms\""),
            Err(ParseError::Invalid(ConfigError::ZeroInterval))
        );
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        assert_eq!(strip_comment("a = \"#x\" # note"), "a = \"#x\" ");
    }
}
