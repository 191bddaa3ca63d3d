//! Unified error type for hid-relay.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // HID
    /// Report shorter than the 8-byte boot keyboard layout (carries the
    /// received length).
    InvalidReportLength(usize),

    // Transport
    /// The push-mode stream did not accept the bytes. The stream logs
    /// the underlying cause before returning this.
    TransportWrite,
}
