//! hid-relay firmware - USB keyboard → I²C / UART key relay on RP2040.
//!
//! Tasks:
//!   - `usb_host_task`  polls the USB host stack; report callbacks run the bridge
//!   - `i2c_task`       (pull mode) answers the bus master from the key slot
//!   - `activity_task`  pulses the status LED for every relayed key
//!
//! Build: `cargo build --release --features embedded`
//! (add `transport-uart` or `transport-uart-raw` for the serial variants).

#![no_std]
#![no_main]

mod bus;
mod usb;

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Delay;
use hid_relay::config;
use hid_relay::relay::indicator::run_activity_led;
use hid_relay::relay::Bridge;
use panic_probe as _;

#[cfg(not(feature = "transport-uart"))]
use embassy_rp::{i2c_slave::I2cSlave, peripherals::I2C1};
#[cfg(not(feature = "transport-uart"))]
use hid_relay::relay::{KeySlot, PullEndpoint};

/// Last decoded key, written by the USB callback, read by the I²C task.
#[cfg(not(feature = "transport-uart"))]
static KEY_SLOT: KeySlot = KeySlot::new();

/// LED pulse requests from the bridge and the bus responder.
static ACTIVITY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("hid-relay starting (transport {})", config::TRANSPORT);

    let led = Output::new(p.PIN_25, Level::Low);
    unwrap!(spawner.spawn(activity_task(led)));

    #[cfg(not(feature = "transport-uart"))]
    {
        let responder = bus::i2c::init(p.I2C1, p.PIN_7, p.PIN_6);
        unwrap!(spawner.spawn(i2c_task(responder)));
        usb::host::install(Bridge::pull(&KEY_SLOT, &ACTIVITY));
    }

    #[cfg(feature = "transport-uart")]
    {
        let sink = bus::uart::init(p.UART0, p.PIN_0);
        usb::host::install(Bridge::push(sink, config::PUSH_FRAMING, &ACTIVITY));
    }

    unwrap!(spawner.spawn(usb_host_task()));
}

#[embassy_executor::task]
async fn usb_host_task() -> ! {
    usb::host::run().await
}

#[cfg(not(feature = "transport-uart"))]
#[embassy_executor::task]
async fn i2c_task(responder: I2cSlave<'static, I2C1>) -> ! {
    bus::i2c::serve(responder, PullEndpoint::new(&KEY_SLOT, &ACTIVITY)).await
}

#[embassy_executor::task]
async fn activity_task(led: Output<'static>) -> ! {
    run_activity_led(&ACTIVITY, led, Delay, config::ACTIVITY_PULSE_MS).await
}
