//! RP2350 I2C implementation
//!
//! This module provides blocking I2C support for RP2350 using Embassy's `embassy-rp` crate.
//! Blocking transfers let the sensor driver be serviced straight from the
//! data-ready path without an executor.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use embassy_rp::i2c::{Blocking, I2c as EmbassyI2c, Instance};
use embedded_hal::i2c::I2c as _;

/// RP2350 I2C implementation using Embassy blocking I2C
///
/// # Type Parameters
///
/// * `T` - I2C peripheral instance (I2C0 or I2C1)
pub struct Rp2350I2c<'d, T: Instance> {
    i2c: EmbassyI2c<'d, T, Blocking>,
    config: I2cConfig,
}

impl<'d, T: Instance> Rp2350I2c<'d, T> {
    /// Create a new RP2350 I2C instance
    ///
    /// The peripheral must already be set up with `embassy_rp::i2c::I2c::new_blocking`;
    /// `config` only records the frequency used there.
    pub fn new(i2c: EmbassyI2c<'d, T, Blocking>, config: I2cConfig) -> Self {
        Self { i2c, config }
    }

    /// Bus frequency the peripheral was created with
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }
}

impl<T: Instance> I2cInterface for Rp2350I2c<'_, T> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.i2c.write(addr, data).map_err(map_embassy_error)
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .write_read(addr, write_data, read_buffer)
            .map_err(map_embassy_error)
    }
}

/// Map Embassy I2C errors to platform I2C errors
fn map_embassy_error(error: embassy_rp::i2c::Error) -> PlatformError {
    use embassy_rp::i2c::{AbortReason, Error};

    match error {
        Error::Abort(AbortReason::NoAcknowledge) => PlatformError::I2c(I2cError::Nack),
        Error::Abort(AbortReason::ArbitrationLoss) => {
            PlatformError::I2c(I2cError::ArbitrationLost)
        }
        Error::AddressOutOfRange(_) | Error::AddressReserved(_) => {
            PlatformError::I2c(I2cError::InvalidAddress)
        }
        _ => PlatformError::I2c(I2cError::BusError),
    }
}
