//! Bus transports towards the secondary MCU.
//!
//! Exactly one is compiled in, selected by cargo feature:
//!
//! - default          - I²C slave; the master pulls the last key
//! - `transport-uart` - UART push stream; every key is written as it arrives

#[cfg(not(feature = "transport-uart"))]
pub mod i2c;
#[cfg(feature = "transport-uart")]
pub mod uart;
