//! Activity indicator - a short LED pulse per relayed key.
//!
//! Producers only post a pulse request; the LED itself is driven by a
//! separate task awaiting the signal, so nobody on the data path sleeps
//! for the pulse length. Requests arriving while the LED is lit coalesce.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// Observational side channel, not part of the data contract.
pub trait ActivityIndicator {
    fn pulse(&self);
}

impl<T: ActivityIndicator + ?Sized> ActivityIndicator for &T {
    fn pulse(&self) {
        T::pulse(self)
    }
}

impl<M: RawMutex> ActivityIndicator for Signal<M, ()> {
    fn pulse(&self) {
        self.signal(());
    }
}

/// Light `led` for `pulse_ms`, then switch it off.
pub async fn drive_pulse<P, D>(led: &mut P, delay: &mut D, pulse_ms: u32) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    led.set_high()?;
    delay.delay_ms(pulse_ms).await;
    led.set_low()
}

/// LED loop: one pulse per received request, forever.
pub async fn run_activity_led<M, P, D>(
    requests: &Signal<M, ()>,
    mut led: P,
    mut delay: D,
    pulse_ms: u32,
) -> !
where
    M: RawMutex,
    P: OutputPin,
    D: DelayNs,
{
    loop {
        requests.wait().await;
        if drive_pulse(&mut led, &mut delay, pulse_ms).await.is_err() {
            warn!("activity LED write failed");
        }
    }
}
