//! TinyUSB host-stack bindings.
//!
//! Declares the handful of TinyUSB entry points we call, implements the
//! callbacks TinyUSB expects, and routes HID input reports into the relay
//! bridge. All callbacks are dispatched from `tuh_task_ext`, i.e. from
//! [`run`] in thread mode, never from the USB interrupt.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_rp::interrupt::{self, InterruptExt};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, ThreadModeRawMutex};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use hid_relay::config;
use hid_relay::relay::{request_next_report, Bridge, HostStack};

/// HID interface protocol code of a boot keyboard.
const HID_ITF_PROTOCOL_KEYBOARD: u8 = 1;

extern "C" {
    fn tuh_init(rhport: u8) -> bool;
    fn tuh_task_ext(timeout_ms: u32, in_isr: bool);
    fn hcd_int_handler(rhport: u8, in_isr: bool);
    fn tuh_hid_receive_report(dev_addr: u8, idx: u8) -> bool;
    fn tuh_hid_interface_protocol(dev_addr: u8, idx: u8) -> u8;
}

#[cfg(not(feature = "transport-uart"))]
type Stream = core::convert::Infallible;
#[cfg(feature = "transport-uart")]
type Stream = crate::bus::uart::UartSink;

/// Bridge type for the configured transport.
pub type AppBridge = Bridge<'static, Stream, &'static Signal<CriticalSectionRawMutex, ()>>;

static BRIDGE: Mutex<ThreadModeRawMutex, RefCell<Option<AppBridge>>> =
    Mutex::new(RefCell::new(None));

/// Hand the bridge to the report callback. Call before spawning [`run`].
pub fn install(bridge: AppBridge) {
    let mode = bridge.mode();
    BRIDGE.lock(|cell| cell.replace(Some(bridge)));
    info!("Relay bridge installed ({})", mode);
}

/// [`HostStack`] backed by the linked TinyUSB.
struct TinyUsb;

impl HostStack for TinyUsb {
    fn is_keyboard(&self, dev_addr: u8, instance: u8) -> bool {
        // SAFETY: plain query into TinyUSB's interface table.
        unsafe { tuh_hid_interface_protocol(dev_addr, instance) == HID_ITF_PROTOCOL_KEYBOARD }
    }

    fn request_report(&mut self, dev_addr: u8, instance: u8) -> bool {
        // SAFETY: called from task context, as TinyUSB requires.
        unsafe { tuh_hid_receive_report(dev_addr, instance) }
    }
}

/// Run the USB host stack - must be spawned as a dedicated Embassy task.
///
/// Polls TinyUSB every `USB_HOST_POLL_MS`; all host callbacks, including
/// report delivery, happen inside this loop.
pub async fn run() -> ! {
    // SAFETY: single initialisation, before the interrupt is unmasked.
    if unsafe { tuh_init(config::USB_HOST_RHPORT) } {
        info!("USB host initialised on root port {}", config::USB_HOST_RHPORT);
    } else {
        warn!("USB host init failed - no keyboard will be seen");
    }

    interrupt::USBCTRL_IRQ.unpend();
    // SAFETY: the handler below only forwards into TinyUSB's HCD.
    unsafe { interrupt::USBCTRL_IRQ.enable() };

    loop {
        // SAFETY: thread-mode call with zero timeout; returns once the
        // event queue is drained.
        unsafe { tuh_task_ext(0, false) };
        Timer::after_millis(config::USB_HOST_POLL_MS).await;
    }
}

#[no_mangle]
#[allow(non_snake_case)]
extern "C" fn USBCTRL_IRQ() {
    // SAFETY: TinyUSB's controller interrupt handler, ISR context.
    unsafe { hcd_int_handler(config::USB_HOST_RHPORT, true) };
}

#[no_mangle]
extern "C" fn tuh_mount_cb(dev_addr: u8) {
    info!("USB device connected: address {}", dev_addr);
}

#[no_mangle]
extern "C" fn tuh_umount_cb(dev_addr: u8) {
    info!("USB device disconnected: address {}", dev_addr);
}

#[no_mangle]
extern "C" fn tuh_hid_mount_cb(dev_addr: u8, instance: u8, _desc_report: *const u8, _desc_len: u16) {
    let mut host = TinyUsb;
    info!(
        "HID interface {} mounted on device {} (keyboard: {})",
        instance,
        dev_addr,
        host.is_keyboard(dev_addr, instance)
    );

    request_next_report(&mut host, dev_addr, instance);
}

#[no_mangle]
extern "C" fn tuh_hid_umount_cb(dev_addr: u8, instance: u8) {
    info!("HID interface {} on device {} unmounted", instance, dev_addr);
}

#[no_mangle]
extern "C" fn tuh_hid_report_received_cb(dev_addr: u8, instance: u8, report: *const u8, len: u16) {
    let report: &[u8] = if report.is_null() {
        &[]
    } else {
        // SAFETY: TinyUSB passes `len` valid bytes that live for the
        // duration of this callback.
        unsafe { core::slice::from_raw_parts(report, usize::from(len)) }
    };

    let mut host = TinyUsb;
    BRIDGE.lock(|cell| match cell.borrow_mut().as_mut() {
        Some(bridge) => {
            if let Err(e) = bridge.on_report_received(&mut host, dev_addr, instance, report) {
                warn!("Report from device {} not relayed: {}", dev_addr, e);
            }
        }
        None => {
            // No bridge yet: keep the pipe alive anyway.
            request_next_report(&mut host, dev_addr, instance);
        }
    });
}
