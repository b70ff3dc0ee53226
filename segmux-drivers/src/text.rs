//! Text sources
//!
//! [`SharedText`] is the hand-off point between whatever produces the text
//! (a sensor task, a serial link) and the display driver. The producer
//! writes whole values; the driver copies a snapshot out under the same
//! mutex, so it never sees a half-updated string.
//!
//! [`LineAssembler`] turns a byte stream into newline-terminated values.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use segmux_core::traits::{TextSource, TextValue, MAX_TEXT_LEN};

/// Errors when publishing text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Text is longer than [`MAX_TEXT_LEN`] bytes
    TooLong,
}

/// Text value shared between a producer and the display driver
pub struct SharedText<M: RawMutex> {
    value: Mutex<M, RefCell<Option<TextValue>>>,
}

impl<M: RawMutex> SharedText<M> {
    /// Create an empty cell (the display shows blanks until a value arrives)
    pub const fn new() -> Self {
        Self {
            value: Mutex::new(RefCell::new(None)),
        }
    }

    /// Replace the current value
    ///
    /// Text longer than [`MAX_TEXT_LEN`] is rejected and the previous value
    /// is kept.
    pub fn publish(&self, text: &str) -> Result<(), TextError> {
        if text.len() > MAX_TEXT_LEN {
            return Err(TextError::TooLong);
        }

        let mut value = TextValue::new();
        value.push_str(text).map_err(|_| TextError::TooLong)?;
        self.set(value);
        Ok(())
    }

    /// Replace the current value with an owned snapshot
    pub fn set(&self, value: TextValue) {
        self.value.lock(|cell| *cell.borrow_mut() = Some(value));
    }

    /// Forget the current value
    pub fn clear(&self) {
        self.value.lock(|cell| *cell.borrow_mut() = None);
    }
}

impl<M: RawMutex> Default for SharedText<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> TextSource for SharedText<M> {
    fn current_value(&self) -> Option<TextValue> {
        self.value.lock(|cell| cell.borrow().clone())
    }
}

/// A complete line from [`LineAssembler`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Non-empty text
    Text(TextValue),
    /// Empty line, meaning "clear the display"
    Empty,
    /// Line exceeded [`MAX_TEXT_LEN`] and was dropped
    Overflow,
}

/// Assembles newline-terminated lines from a byte stream
///
/// `\r` is ignored so both `\n` and `\r\n` endings work. Bytes above 0x7F
/// are kept as Latin-1 characters; the renderer shows them as the unknown
/// glyph.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: TextValue,
    overflowed: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a single byte
    ///
    /// Returns a [`Line`] when a terminator completes one.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\r' => None,
            b'\n' => Some(self.finish()),
            _ => {
                if !self.overflowed && self.buffer.push(byte as char).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Line {
        let line = if self.overflowed {
            Line::Overflow
        } else if self.buffer.is_empty() {
            Line::Empty
        } else {
            Line::Text(self.buffer.clone())
        };

        self.buffer.clear();
        self.overflowed = false;
        line
    }
}
