//! USB Host subsystem - receives reports from the attached keyboard.
//!
//! The RP2040's USB controller runs in host mode under TinyUSB, linked
//! as a prebuilt static library (see `build.rs`).  TinyUSB owns
//! enumeration and transfers; we only see its callbacks:
//!
//! - mount / unmount of devices and HID interfaces (logged)
//! - one callback per HID input report, which runs the relay bridge
//!   and re-arms the next report

pub mod host;
