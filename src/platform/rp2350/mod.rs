//! RP2350 platform implementation for Raspberry Pi Pico 2 W
//!
//! This module provides concrete implementations of the platform abstraction
//! traits for the RP2350 microcontroller using the `embassy-rp` crate.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! imu_relay = { version = "0.1", features = ["pico2_w"] }
//! ```

mod console;
mod gpio;
mod i2c;

pub use console::DefmtConsole;
pub use gpio::Rp2350Gpio;
pub use i2c::Rp2350I2c;
