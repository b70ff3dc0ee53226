//! Display refresh task
//!
//! Sleeps until the next poll is due and runs one driver cycle. Late
//! wake-ups drop the missed ticks instead of running them back to back.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Instant, Timer};

use segmux_core::scheduler::{Poller, Tick};
use segmux_drivers::{CycleOutcome, DisplayDriver, SharedText, Sn74hc595};

/// Bit-banged 74HC595 chain on three GPIOs
pub type Bank = Sn74hc595<Output<'static>, Output<'static>, Output<'static>>;

/// The concrete driver this firmware runs
pub type Driver = DisplayDriver<
    'static,
    SharedText<CriticalSectionRawMutex>,
    CriticalSectionRawMutex,
    Bank,
>;

/// Report a streak of failures once every this many cycles
const FAILURE_REPORT_EVERY: u32 = 40;

#[embassy_executor::task]
pub async fn display_task(mut driver: Driver) {
    info!("Display task started");

    if let Err(e) = driver.setup() {
        warn!("Failed to blank display: {:?}", e);
    }

    let interval_ms = driver.config().update_interval_ms;
    let mut poller = Poller::new(interval_ms, Instant::now().as_millis());
    info!("Polling every {} ms", interval_ms);

    loop {
        Timer::at(Instant::from_millis(poller.next_due_ms())).await;

        match poller.on_tick(Instant::now().as_millis()) {
            Tick::NotDue => continue,
            Tick::Due { skipped } => {
                if skipped > 0 {
                    debug!("Skipped {} late ticks", skipped);
                }
            }
        }

        match driver.update() {
            CycleOutcome::Latched { blank } => {
                trace!("Frame latched (blank: {})", blank);
            }
            CycleOutcome::Failed(_) => {
                let failures = driver.stats().consecutive_failures;
                if failures % FAILURE_REPORT_EVERY == 0 {
                    error!("Display has failed {} cycles in a row", failures);
                }
            }
        }
    }
}
