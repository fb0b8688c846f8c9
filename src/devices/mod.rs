//! Device drivers
//!
//! Sensor capability traits and the drivers that implement them.

pub mod imu;
pub mod traits;
