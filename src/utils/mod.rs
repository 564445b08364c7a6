//! Low-level helpers for the macOS backends.
//!
//! - `ffi`: raw bindings for Mach, IOKit, IOPowerSources, CoreFoundation and Metal
//! - [`CfOwned`] / [`CfDictionary`]: ownership and typed property access for CoreFoundation values

pub mod ffi;

mod cf;

pub use cf::*;
