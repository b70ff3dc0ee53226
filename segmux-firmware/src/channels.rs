//! Shared state between tasks

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use segmux_drivers::SharedText;

/// Value shown on the display, published by the UART receive task
pub static TEXT: SharedText<CriticalSectionRawMutex> = SharedText::new();
