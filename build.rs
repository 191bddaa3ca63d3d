//! Build script - copies the linker script into the output directory
//! so that the linker can find it at link time, and links the TinyUSB
//! host stack for firmware builds.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to OUT_DIR
    fs::copy("memory.x", out_dir.join("memory.x")).unwrap();

    // Tell cargo to look for linker scripts in OUT_DIR
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Firmware only: cortex-m-rt / embassy-rp / defmt linker scripts and
    // the prebuilt TinyUSB host library (RP2040 port, host mode).
    if env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

        if let Some(dir) = env::var_os("TINYUSB_LIB_DIR") {
            println!("cargo:rustc-link-search={}", PathBuf::from(dir).display());
        }
        println!("cargo:rustc-link-lib=static=tinyusb");
    }

    // Rebuild if the linker script or library location changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TINYUSB_LIB_DIR");
}
