//! LSM6DSL 6-axis IMU driver
//!
//! Accelerometer and gyroscope over blocking I2C, with data-ready routed to INT1.

mod driver;
pub mod registers;

pub use driver::Lsm6dsl;
