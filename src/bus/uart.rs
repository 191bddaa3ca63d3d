//! UART stream (push mode).
//!
//! UART0 TX on GPIO0, 8N1 at `UART_BAUD_RATE`. Writes are blocking: the
//! bridge returns only once the FIFO has taken every byte.

use defmt::{info, warn};
use embassy_rp::peripherals::{PIN_0, UART0};
use embassy_rp::uart::{Blocking, Config as UartConfig, UartTx};
use hid_relay::config::UART_BAUD_RATE;
use hid_relay::relay::StreamSink;
use hid_relay::Error;

/// Transmit half of UART0, as seen by the bridge.
pub struct UartSink {
    tx: UartTx<'static, UART0, Blocking>,
}

/// Configure UART0 for transmit only.
pub fn init(uart: UART0, tx_pin: PIN_0) -> UartSink {
    let mut config = UartConfig::default();
    config.baudrate = UART_BAUD_RATE;

    info!("UART0 streaming keys at {} baud", UART_BAUD_RATE);
    UartSink {
        tx: UartTx::new_blocking(uart, tx_pin, config),
    }
}

impl StreamSink for UartSink {
    fn publish(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.tx.blocking_write(bytes).map_err(|e| {
            warn!("UART write of {} bytes failed: {}", bytes.len(), e);
            Error::TransportWrite
        })
    }
}
