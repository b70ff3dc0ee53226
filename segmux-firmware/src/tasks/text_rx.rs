//! Text receive task
//!
//! Reads newline-terminated values from the UART and publishes them for
//! the display task. An empty line clears the display.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use segmux_drivers::{Line, LineAssembler};

use crate::channels::TEXT;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn text_rx_task(mut rx: BufferedUartRx) {
    info!("Text RX task started");

    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.feed(byte) {
                        Some(Line::Text(value)) => {
                            debug!("Text: {}", value.as_str());
                            TEXT.set(value);
                        }
                        Some(Line::Empty) => TEXT.clear(),
                        Some(Line::Overflow) => warn!("Line too long, dropped"),
                        None => {}
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
