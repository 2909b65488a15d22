//! Build script for the bridge firmware
//!
//! Handles:
//! - Memory layout configuration
//! - Linker scripts for the firmware binary (embedded builds only)

fn main() {
    // Tell Cargo to re-run this if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Link memory.x from project directory
    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    // Only the firmware binary gets the cortex-m-rt and defmt linker scripts;
    // host test builds link normally.
    #[cfg(feature = "embedded")]
    {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
