//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::relay::{PushFraming, TransportMode};

// Transport

/// What the UART writes per key when `transport-uart` is enabled.
pub const PUSH_FRAMING: PushFraming = if cfg!(feature = "transport-uart-raw") {
    PushFraming::RawReport
} else {
    PushFraming::Text
};

/// Delivery mode, fixed at build time.
///
///   (default)            → I²C slave, master pulls the last key
///   `transport-uart`     → UART, key text + line terminator per key
///   `transport-uart-raw` → UART, raw 8-byte report per key
pub const TRANSPORT: TransportMode = if cfg!(feature = "transport-uart") {
    TransportMode::Push(PUSH_FRAMING)
} else {
    TransportMode::Pull
};

/// Appended to every key in push text mode.
pub const LINE_TERMINATOR: &[u8] = b"\n";

// Relay

/// Relay slot size in bytes, NUL terminator included.
pub const RELAY_SLOT_CAPACITY: usize = 32;

/// Longest rendered key token ("Unknown (0xff)" is 14).
pub const TOKEN_TEXT_CAPACITY: usize = 16;

// I²C (pull mode)

/// 7-bit slave address the secondary MCU reads from.
pub const I2C_SLAVE_ADDR: u8 = 0x20;

// UART (push mode)

/// UART baud rate (8N1).
pub const UART_BAUD_RATE: u32 = 115_200;

// USB host

/// Root hub port the keyboard is attached to.
pub const USB_HOST_RHPORT: u8 = 0;

/// Interval between host-stack task polls (ms).
pub const USB_HOST_POLL_MS: u64 = 10;

// GPIO pin assignments (Raspberry Pi Pico defaults)
//
// These are logical names; actual `embassy_rp::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom board.
//
//   I²C1 SDA       → GPIO6
//   I²C1 SCL       → GPIO7
//   UART0 TX       → GPIO0
//   Status LED     → GPIO25

/// How long the activity LED stays lit per pulse (ms).
pub const ACTIVITY_PULSE_MS: u32 = 100;
