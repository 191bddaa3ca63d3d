//! Bus-slave side of pull mode.
//!
//! The bus master decides when to read; we hand out whatever key is
//! resident at that moment. Reads never clear the slot, so the same key
//! can be read any number of times until the next one replaces it.

use super::{ActivityIndicator, KeySlot};

/// Consumer handle on a [`KeySlot`] for the bus responder.
pub struct PullEndpoint<'a, I> {
    slot: &'a KeySlot,
    indicator: I,
}

impl<'a, I: ActivityIndicator> PullEndpoint<'a, I> {
    pub const fn new(slot: &'a KeySlot, indicator: I) -> Self {
        Self { slot, indicator }
    }

    /// Master requested data: copy the resident key text into `out`.
    ///
    /// Returns the number of bytes to transmit. 0 means the slot is empty
    /// and nothing should be sent; that is not an error.
    pub fn on_bus_read_requested(&self, out: &mut [u8]) -> usize {
        let n = self.slot.read_into(out);
        if n == 0 {
            trace!("bus read with empty slot");
            return 0;
        }
        debug!("bus read served {} bytes", n);
        self.indicator.pulse();
        n
    }

    /// Master wrote to us. The relay has no commands; the bytes are only
    /// acknowledged in the log.
    pub fn on_bus_data_received(&self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        debug!("bus master wrote {} bytes, first {=u8:#x}", data.len(), data[0]);
        self.indicator.pulse();
    }
}
