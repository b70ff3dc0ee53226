//! Polling display driver
//!
//! One call to [`DisplayDriver::update`] is one poll cycle:
//!
//! ```text
//! Idle ──Tick──► Rendering ──Rendered──► Writing ──WriteSucceeded──► Latched ──Complete──► Idle
//!                                           │
//!                                           └──WriteFailed──► Idle
//! ```
//!
//! The text is snapshotted once at the start of the cycle. Failures never
//! escape `update`; they are counted in [`DriverStats`] and the next tick
//! simply tries again.

use embassy_sync::blocking_mutex::raw::RawMutex;

use segmux_core::config::{ConfigError, DisplayConfig};
use segmux_core::state::{CycleEvent, CycleState};
use segmux_core::traits::TextSource;
use segmux_core::{Frame, FrameEncoder, Renderer};
use segmux_hal::ShiftRegisterBank;

use super::writer::{HardwareWriteError, OutputWriter};
use crate::shift::SharedBank;

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// A new frame is on the outputs
    Latched {
        /// The text source had no value (or an empty one)
        blank: bool,
    },
    /// The write failed; the previous frame is still shown
    Failed(HardwareWriteError),
}

impl CycleOutcome {
    pub fn is_latched(&self) -> bool {
        matches!(self, CycleOutcome::Latched { .. })
    }
}

/// Running counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverStats {
    pub cycles: u32,
    pub frames_latched: u32,
    /// Failed writes of any kind (bus, frame size, busy bank)
    pub write_errors: u32,
    /// Cycles where the source had nothing to show
    pub blank_cycles: u32,
    /// Failed cycles since the last successful latch
    pub consecutive_failures: u32,
    pub last_error: Option<HardwareWriteError>,
}

/// Renders a text source onto a shift register display
pub struct DisplayDriver<'a, T: ?Sized, M: RawMutex, B> {
    text: &'a T,
    writer: OutputWriter<'a, M, B>,
    config: DisplayConfig,
    renderer: Renderer,
    encoder: FrameEncoder,
    state: CycleState,
    active_digit: usize,
    last_latched: Option<Frame>,
    stats: DriverStats,
}

impl<'a, T, M, B> DisplayDriver<'a, T, M, B>
where
    T: TextSource + ?Sized,
    M: RawMutex,
    B: ShiftRegisterBank,
{
    /// Create a driver
    ///
    /// Fails if the configuration is invalid or the bank does not have the
    /// number of registers the wiring needs.
    pub fn new(
        text: &'a T,
        bank: &'a SharedBank<M, B>,
        config: DisplayConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let writer = OutputWriter::new(bank, config.bit_order);
        // A bank held elsewhere right now is still caught by the frame size
        // check on every write.
        if let Some(found) = writer.register_count() {
            config.check_register_count(found)?;
        }

        let renderer = Renderer::from_config(&config)?;

        Ok(Self {
            text,
            writer,
            renderer,
            encoder: FrameEncoder::new(&config),
            config,
            state: CycleState::Idle,
            active_digit: 0,
            last_latched: None,
            stats: DriverStats::default(),
        })
    }

    /// Latch an all-blank frame
    ///
    /// Registers power up in an unknown state, so call this once before
    /// the first poll.
    pub fn setup(&mut self) -> Result<(), HardwareWriteError> {
        let frame = self.encoder.blank();
        self.writer.write(&frame)?;
        self.last_latched = Some(frame);
        self.active_digit = 0;
        Ok(())
    }

    /// Run one poll cycle
    pub fn update(&mut self) -> CycleOutcome {
        self.stats.cycles = self.stats.cycles.wrapping_add(1);
        self.state = self.state.transition(CycleEvent::Tick);

        let value = self.text.current_value();
        let blank = value.as_deref().map_or(true, str::is_empty);
        if blank {
            self.stats.blank_cycles = self.stats.blank_cycles.wrapping_add(1);
        }

        let digits = self.renderer.render(value.as_deref());
        let frame = self.encoder.encode(&digits, self.active_digit);
        self.state = self.state.transition(CycleEvent::Rendered);

        match self.writer.write(&frame) {
            Ok(()) => {
                self.state = self.state.transition(CycleEvent::WriteSucceeded);
                self.last_latched = Some(frame);
                self.active_digit = (self.active_digit + 1) % self.encoder.cycle_length();
                self.stats.frames_latched = self.stats.frames_latched.wrapping_add(1);
                self.stats.consecutive_failures = 0;
                self.state = self.state.transition(CycleEvent::Complete);
                CycleOutcome::Latched { blank }
            }
            Err(e) => {
                self.state = self.state.transition(CycleEvent::WriteFailed);
                self.stats.write_errors = self.stats.write_errors.wrapping_add(1);
                self.stats.consecutive_failures = self.stats.consecutive_failures.saturating_add(1);
                self.stats.last_error = Some(e);

                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Display write failed: {} ({} in a row)",
                    e,
                    self.stats.consecutive_failures
                );

                CycleOutcome::Failed(e)
            }
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    /// The frame currently on the outputs, if this driver latched one
    pub fn last_latched(&self) -> Option<&Frame> {
        self.last_latched.as_ref()
    }

    /// Digit the next multiplexed cycle will light
    pub fn active_digit(&self) -> usize {
        self.active_digit
    }

    pub fn state(&self) -> CycleState {
        self.state
    }
}
