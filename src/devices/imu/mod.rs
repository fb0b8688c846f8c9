//! IMU Drivers
//!
//! This module contains IMU drivers implementing the `SensorDevice` trait.
//!
//! ## Available Drivers
//!
//! - `lsm6dsl`: LSM6DSL 6-axis IMU over any `I2cInterface`
//! - `mock`: Mock sensor for testing (requires `mock` feature outside tests)
//!
//! ## Usage
//!
//! ```ignore
//! use imu_relay::devices::imu::Lsm6dsl;
//! use imu_relay::devices::traits::{ChannelGroup, SensorDevice};
//!
//! let mut imu = Lsm6dsl::new(i2c);
//! imu.probe()?;
//! imu.sample_fetch(ChannelGroup::All)?;
//! ```

pub mod lsm6dsl;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use lsm6dsl::Lsm6dsl;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockSample, MockSensor};
