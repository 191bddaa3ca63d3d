//! Integration tests for hid-relay host-testable logic.

use std::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use hid_relay::config;
use hid_relay::hid::{decode, KeyToken};
use hid_relay::relay::{
    Bridge, HostStack, KeySlot, Outcome, PullEndpoint, PushFraming, StreamSink, TransportMode,
};
use hid_relay::Error;

/// Host stack stand-in that counts re-arm requests.
struct CountingHost {
    armed: Cell<usize>,
}

impl HostStack for CountingHost {
    fn request_report(&mut self, _dev_addr: u8, _instance: u8) -> bool {
        self.armed.set(self.armed.get() + 1);
        true
    }
}

#[derive(Default)]
struct SerialCapture(Vec<u8>);

impl StreamSink for SerialCapture {
    fn publish(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

#[test]
#[cfg(not(feature = "transport-uart"))]
fn default_build_is_pull_mode() {
    assert_eq!(config::TRANSPORT, TransportMode::Pull);
    assert_eq!(config::I2C_SLAVE_ADDR, 0x20);
}

#[test]
#[cfg(feature = "transport-uart")]
fn serial_build_pushes_configured_framing() {
    assert_eq!(config::TRANSPORT, TransportMode::Push(config::PUSH_FRAMING));
    let raw = cfg!(feature = "transport-uart-raw");
    assert_eq!(config::PUSH_FRAMING == PushFraming::RawReport, raw);
}

#[test]
fn typed_keys_reach_the_bus_master() {
    static SLOT: KeySlot = KeySlot::new();
    let activity: Signal<CriticalSectionRawMutex, ()> = Signal::new();

    let mut bridge = Bridge::pull(&SLOT, &activity);
    let endpoint = PullEndpoint::new(&SLOT, &activity);
    let mut host = CountingHost { armed: Cell::new(0) };

    let mut out = [0u8; config::RELAY_SLOT_CAPACITY];

    // Nothing typed yet: master reads nothing.
    assert_eq!(endpoint.on_bus_read_requested(&mut out), 0);
    assert!(!activity.signaled());

    // Shift + '1' → "!"
    let outcome = bridge.on_report_received(&mut host, 1, 0, &[0x02, 0, 0x1E, 0, 0, 0, 0, 0]);
    assert_eq!(outcome, Ok(Outcome::Delivered(KeyToken::Char('!'))));
    assert!(activity.signaled());
    activity.reset();

    let n = endpoint.on_bus_read_requested(&mut out);
    assert_eq!(&out[..n], b"!");

    // Release, then F5: the release leaves "!" in place until F5 lands.
    bridge.on_report_received(&mut host, 1, 0, &[0; 8]).unwrap();
    let n = endpoint.on_bus_read_requested(&mut out);
    assert_eq!(&out[..n], b"!");

    bridge.on_report_received(&mut host, 1, 0, &[0, 0, 0x3E, 0, 0, 0, 0, 0]).unwrap();
    let n = endpoint.on_bus_read_requested(&mut out);
    assert_eq!(&out[..n], b"F5");

    assert_eq!(host.armed.get(), 3);
}

#[test]
fn typed_keys_stream_over_serial() {
    let mut serial = SerialCapture::default();
    let activity: Signal<CriticalSectionRawMutex, ()> = Signal::new();
    let mut bridge = Bridge::push(&mut serial, PushFraming::Text, &activity);
    let mut host = CountingHost { armed: Cell::new(0) };

    let reports: [[u8; 8]; 6] = [
        [0x02, 0, 0x0B, 0, 0, 0, 0, 0], // H
        [0x00, 0, 0x0C, 0, 0, 0, 0, 0], // i
        [0x00, 0, 0x00, 0, 0, 0, 0, 0], // release
        [0x20, 0, 0x1E, 0, 0, 0, 0, 0], // !
        [0x00, 0, 0x2C, 0x04, 0, 0, 0, 0], // Space (a ignored)
        [0x00, 0, 0x28, 0, 0, 0, 0, 0], // Enter
    ];
    for report in &reports {
        bridge.on_report_received(&mut host, 1, 0, report).unwrap();
        let released = report[2] == 0;
        assert_eq!(activity.signaled(), !released);
        activity.reset();
    }
    drop(bridge);

    assert_eq!(serial.0, b"H\ni\n!\nSpace\nEnter\n");
    assert_eq!(host.armed.get(), reports.len());
}

#[test]
fn raw_forwarding_keeps_report_bytes() {
    let mut serial = SerialCapture::default();
    let activity: Signal<CriticalSectionRawMutex, ()> = Signal::new();
    let mut bridge = Bridge::push(&mut serial, PushFraming::RawReport, &activity);
    let mut host = CountingHost { armed: Cell::new(0) };

    let report = [0x01, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00];
    bridge.on_report_received(&mut host, 3, 1, &report).unwrap();
    drop(bridge);

    assert_eq!(serial.0, report);
}

#[test]
fn decode_is_usable_standalone() {
    assert_eq!(decode(&[0, 0, 0x2F, 0, 0, 0, 0, 0]), Ok(Some(KeyToken::Char('['))));
    assert_eq!(decode(&[0x20, 0, 0x2F, 0, 0, 0, 0, 0]), Ok(Some(KeyToken::Char('{'))));
    assert_eq!(decode(&[0, 0, 0x2F]), Err(Error::InvalidReportLength(3)));
}
