//! Text source trait

use heapless::String;

/// Maximum length of a text snapshot in bytes
pub const MAX_TEXT_LEN: usize = 32;

/// Owned snapshot of the text to display
pub type TextValue = String<MAX_TEXT_LEN>;

/// Producer of the text shown on the display
///
/// The value is updated asynchronously by someone else (a sensor task, a
/// serial link). Implementations return a copy so the driver never sees a
/// half-written value, and must not block for longer than a fraction of
/// the poll interval.
pub trait TextSource {
    /// Current value, or `None` if nothing has been produced yet
    fn current_value(&self) -> Option<TextValue>;
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn current_value(&self) -> Option<TextValue> {
        (**self).current_value()
    }
}

/// A fixed string, mostly useful for tests and boot messages
impl TextSource for str {
    fn current_value(&self) -> Option<TextValue> {
        let mut value = TextValue::new();
        // Keep the head, like the default truncation policy
        let end = (0..=self.len().min(MAX_TEXT_LEN))
            .rev()
            .find(|&i| self.is_char_boundary(i))
            .unwrap_or(0);
        value.push_str(&self[..end]).ok()?;
        Some(value)
    }
}
