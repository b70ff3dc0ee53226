//! segmux - shift register display firmware
//!
//! Shows the last line received on UART0 on a seven-segment display
//! driven through a chain of 74HC595 shift registers.
//!
//! Wiring:
//! - GP0 / GP1: UART0 TX / RX (115200 8N1)
//! - GP2: DS (serial data)
//! - GP3: SHCP (shift clock)
//! - GP4: STCP (latch)

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use segmux_core::config::{parse_config, DisplayConfig};
use segmux_drivers::{DisplayDriver, SharedBank, Sn74hc595};

use crate::channels::TEXT;
use crate::tasks::display::Bank;

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

static BANK: StaticCell<SharedBank<CriticalSectionRawMutex, Bank>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("segmux firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid display.toml ({:?}), using defaults", e);
            DisplayConfig::default()
        }
    };
    info!(
        "Display: {} digits, {:?} wiring, {} ms",
        config.digit_count, config.wiring, config.update_interval_ms
    );

    // Shift register chain
    let data = Output::new(p.PIN_2, Level::Low);
    let shift_clock = Output::new(p.PIN_3, Level::Low);
    let storage_clock = Output::new(p.PIN_4, Level::Low);
    let chain = Sn74hc595::new(data, shift_clock, storage_clock, config.register_count());
    let bank = BANK.init(Mutex::new(RefCell::new(chain)));

    let driver = match DisplayDriver::new(&TEXT, bank, config) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Display configuration rejected: {:?}", e);
            return;
        }
    };

    // Text input
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    spawner.spawn(tasks::display_task(driver)).unwrap();
    spawner.spawn(tasks::text_rx_task(rx)).unwrap();

    info!("All tasks spawned");
}
