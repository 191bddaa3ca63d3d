//! Report callback → decoder → transport.
//!
//! The USB host stack calls [`Bridge::on_report_received`] once per HID
//! input report. The bridge decodes it, hands the key to the configured
//! transport, pulses the activity indicator and re-arms the next report.

use core::convert::Infallible;

use super::{ActivityIndicator, KeySlot, PushFraming, StreamSink, TransportMode};
use crate::config::{LINE_TERMINATOR, TOKEN_TEXT_CAPACITY};
use crate::error::Error;
use crate::hid::keyboard::{KeyboardReport, KEYBOARD_REPORT_SIZE};
use crate::hid::KeyToken;

/// Largest text-mode frame: key text plus terminator.
const LINE_CAPACITY: usize = TOKEN_TEXT_CAPACITY + 4;

/// The slice of the USB host stack the bridge needs.
pub trait HostStack {
    /// Whether the interface speaks the boot keyboard protocol. Reports
    /// from other interfaces (a mouse on a combo receiver, say) are not
    /// decoded.
    fn is_keyboard(&self, dev_addr: u8, instance: u8) -> bool {
        let _ = (dev_addr, instance);
        true
    }

    /// Ask for the next input report on this interface. Returns `false`
    /// if the host stack refused.
    fn request_report(&mut self, dev_addr: u8, instance: u8) -> bool;
}

/// Ask `host` for the next report on an interface, logging a refusal.
///
/// Returns whatever the host stack answered.
pub fn request_next_report<H: HostStack + ?Sized>(
    host: &mut H,
    dev_addr: u8,
    instance: u8,
) -> bool {
    let armed = host.request_report(dev_addr, instance);
    if !armed {
        warn!(
            "could not request next report (dev {} instance {})",
            dev_addr, instance
        );
    }
    armed
}

/// Where decoded keys go.
pub enum Delivery<'a, S> {
    /// Overwrite the shared slot; the bus master reads it later.
    Pull(&'a KeySlot),
    /// Write to the stream right away.
    Push { sink: S, framing: PushFraming },
}

/// What one report callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A key was decoded and handed to the transport.
    Delivered(KeyToken),
    /// No key slot populated; the transport was not touched.
    NoKey,
    /// Report came from a non-keyboard interface.
    Skipped,
}

/// Producer side of the relay.
pub struct Bridge<'a, S, I> {
    delivery: Delivery<'a, S>,
    indicator: I,
}

impl<'a, I: ActivityIndicator> Bridge<'a, Infallible, I> {
    /// Bridge publishing into `slot` for a bus master to pull.
    pub const fn pull(slot: &'a KeySlot, indicator: I) -> Self {
        Self {
            delivery: Delivery::Pull(slot),
            indicator,
        }
    }
}

impl<'a, S: StreamSink, I: ActivityIndicator> Bridge<'a, S, I> {
    /// Bridge streaming every key into `sink`.
    pub const fn push(sink: S, framing: PushFraming, indicator: I) -> Self {
        Self {
            delivery: Delivery::Push { sink, framing },
            indicator,
        }
    }

    pub fn mode(&self) -> TransportMode {
        match &self.delivery {
            Delivery::Pull(_) => TransportMode::Pull,
            Delivery::Push { framing, .. } => TransportMode::Push(*framing),
        }
    }

    /// Handle one input report from the host stack.
    ///
    /// The next report is requested on every call, whatever the outcome.
    /// Errors are returned after re-arming: a short report leaves the
    /// relay untouched, a push write failure comes back from the stream.
    pub fn on_report_received<H: HostStack + ?Sized>(
        &mut self,
        host: &mut H,
        dev_addr: u8,
        instance: u8,
        report: &[u8],
    ) -> Result<Outcome, Error> {
        let outcome = self.relay(&*host, dev_addr, instance, report);
        request_next_report(host, dev_addr, instance);
        outcome
    }

    fn relay<H: HostStack + ?Sized>(
        &mut self,
        host: &H,
        dev_addr: u8,
        instance: u8,
        report: &[u8],
    ) -> Result<Outcome, Error> {
        if !host.is_keyboard(dev_addr, instance) {
            trace!("report from non-keyboard interface {}", instance);
            return Ok(Outcome::Skipped);
        }

        let parsed = KeyboardReport::from_bytes(report).inspect_err(|_| {
            warn!(
                "dropping {} byte report, need {}",
                report.len(),
                KEYBOARD_REPORT_SIZE
            )
        })?;

        let Some(token) = parsed.key_token() else {
            trace!("report without keys");
            return Ok(Outcome::NoKey);
        };

        let m = parsed.modifier;
        info!(
            "key {} (ctrl={} alt={} gui={})",
            token,
            m.ctrl(),
            m.alt(),
            m.gui()
        );

        self.deliver(&parsed, token)?;
        self.indicator.pulse();
        Ok(Outcome::Delivered(token))
    }

    fn deliver(&mut self, report: &KeyboardReport, token: KeyToken) -> Result<(), Error> {
        match &mut self.delivery {
            Delivery::Pull(slot) => {
                let text = token.render();
                let stored = slot.publish(&text);
                if stored < text.len() {
                    debug!("key text truncated to {} bytes", stored);
                }
                Ok(())
            }
            Delivery::Push {
                sink,
                framing: PushFraming::Text,
            } => {
                let mut line: heapless::Vec<u8, LINE_CAPACITY> = heapless::Vec::new();
                // Token text and terminator both fit LINE_CAPACITY.
                let _ = line.extend_from_slice(token.render().as_bytes());
                let _ = line.extend_from_slice(LINE_TERMINATOR);
                sink.publish(&line)
            }
            Delivery::Push {
                sink,
                framing: PushFraming::RawReport,
            } => {
                let mut raw = [0u8; KEYBOARD_REPORT_SIZE];
                let n = report.serialize(&mut raw);
                sink.publish(&raw[..n])
            }
        }
    }
}
