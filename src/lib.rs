//! Host-testable library interface for hid-relay.
//!
//! Everything between the USB host stack and the bus drivers lives here:
//! boot keyboard decoding, the single-slot relay, and the transport
//! adapters. None of it touches hardware, so it runs on the host.
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! It links this library and wires it to the RP2040 peripherals.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod error;
pub mod hid;
pub mod relay;

pub use error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - relay slot, bridge, pull endpoint, indicator
// ═══════════════════════════════════════════════════════════════════════════
