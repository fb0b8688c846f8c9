#![cfg_attr(not(test), no_std)]

//! imu_relay - 6-axis IMU sampling firmware for Raspberry Pi Pico 2 W
//!
//! Samples an accelerometer/gyroscope pair, hands the latest reading from the
//! capture context to a periodic console reporter without tearing, and drives a
//! tri-color status LED through the startup sequence.

#[cfg(feature = "mock")]
extern crate std;

// Platform abstraction layer (GPIO lines, I2C bus)
pub mod platform;

// Sensor capability and drivers
pub mod devices;

// Logging macros
pub mod core;

// Build-time application parameters
pub mod parameters;

// Sample relay and status indicator
pub mod subsystems;

// Startup sequence and reporting loop
pub mod app;
