//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use imu_relay::platform::mock::{LineProbe, MockGpio};
//! use imu_relay::platform::traits::GpioInterface;
//!
//! let probe = LineProbe::new();
//! let mut led = MockGpio::new_output().with_probe(&probe, 0);
//! led.set_high().unwrap();
//! assert_eq!(probe.len(), 1);
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod i2c;
mod timer;

pub use gpio::{LineProbe, MockGpio};
pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockDelay;
