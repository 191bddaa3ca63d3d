//! Single-slot key relay and transport adapters.
//!
//! The relay is "latest value wins": the producer (USB report callback)
//! overwrites one resident key, the consumer (bus responder) copies it
//! out. There is no queue - a key published before the previous one was
//! read replaces it.
//!
//! ## Components
//!
//! - [`RelaySlot`]: the resident key text, guarded by a critical section
//! - [`Bridge`]: report callback → decode → pull slot or push stream
//! - [`PullEndpoint`]: bus-slave side of pull mode
//! - [`ActivityIndicator`]: observational pulse per delivered key

pub mod bridge;
pub mod indicator;
pub mod pull;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::RELAY_SLOT_CAPACITY;
use crate::error::Error;

pub use bridge::{request_next_report, Bridge, Delivery, HostStack, Outcome};
pub use indicator::ActivityIndicator;
pub use pull::PullEndpoint;

/// Relay slot sized for the firmware.
pub type KeySlot = RelaySlot<RELAY_SLOT_CAPACITY>;

/// How keys leave the device. Chosen at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportMode {
    /// Bus master reads the last key on demand (I²C slave).
    Pull,
    /// Every key is written out as it is decoded (UART).
    Push(PushFraming),
}

/// What a push-mode transport writes per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushFraming {
    /// Rendered key text followed by the line terminator.
    Text,
    /// The received 8-byte report, unmodified.
    RawReport,
}

/// Byte stream a push-mode bridge writes into.
///
/// `publish` may block until the transport accepts the bytes. A failure
/// is logged by the implementation and reported as
/// [`Error::TransportWrite`].
pub trait StreamSink {
    fn publish(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

impl<T: StreamSink + ?Sized> StreamSink for &mut T {
    fn publish(&mut self, bytes: &[u8]) -> Result<(), Error> {
        T::publish(self, bytes)
    }
}

/// Stand-in stream for pull-mode bridges, which never publish.
impl StreamSink for core::convert::Infallible {
    fn publish(&mut self, _bytes: &[u8]) -> Result<(), Error> {
        match *self {}
    }
}

struct Frame<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

/// Overwrite-on-write store for the most recent key text.
///
/// Holds at most `N - 1` text bytes followed by a NUL. Every copy in and
/// out runs inside a critical section, so a reader in another context
/// (task or interrupt) always sees one whole key, never a mix of two.
pub struct RelaySlot<const N: usize> {
    frame: Mutex<CriticalSectionRawMutex, RefCell<Frame<N>>>,
}

impl<const N: usize> RelaySlot<N> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            frame: Mutex::new(RefCell::new(Frame {
                bytes: [0; N],
                len: 0,
            })),
        }
    }

    /// Longest text the slot keeps.
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    /// Replace the resident text.
    ///
    /// Text beyond [`capacity`](Self::capacity) is dropped, cut back to a
    /// char boundary. Returns the number of bytes stored.
    pub fn publish(&self, text: &str) -> usize {
        let mut end = text.len().min(self.capacity());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let stored = &text.as_bytes()[..end];

        self.frame.lock(|frame| {
            let mut frame = frame.borrow_mut();
            frame.bytes[..end].copy_from_slice(stored);
            if end < N {
                frame.bytes[end] = 0;
            }
            frame.len = end;
        });
        end
    }

    /// Copy the resident text (without NUL) into `out`.
    ///
    /// Returns the number of bytes copied; 0 if the slot is empty. The
    /// slot keeps its contents.
    pub fn read_into(&self, out: &mut [u8]) -> usize {
        self.frame.lock(|frame| {
            let frame = frame.borrow();
            let n = frame.len.min(out.len());
            out[..n].copy_from_slice(&frame.bytes[..n]);
            n
        })
    }

    /// Owned copy of the resident text.
    #[cfg(test)]
    pub fn snapshot(&self) -> heapless::Vec<u8, N> {
        self.frame.lock(|frame| {
            let frame = frame.borrow();
            let mut copy = heapless::Vec::new();
            // len <= N, cannot overflow.
            let _ = copy.extend_from_slice(&frame.bytes[..frame.len]);
            copy
        })
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.frame.lock(|frame| frame.borrow().len == 0)
    }
}

impl<const N: usize> Default for RelaySlot<N> {
    fn default() -> Self {
        Self::new()
    }
}
