//! RP2350 GPIO implementation
//!
//! This module provides GPIO support for RP2350 using `embassy-rp` flexible pins,
//! which can switch between input and output at runtime.

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use embassy_rp::gpio::Flex;

/// RP2350 GPIO implementation
///
/// Wraps an `embassy-rp` [`Flex`] pin to implement the `GpioInterface` trait.
pub struct Rp2350Gpio<'d> {
    pin: Flex<'d>,
    mode: GpioMode,
}

impl<'d> Rp2350Gpio<'d> {
    /// Create a new RP2350 GPIO instance
    ///
    /// The pin is left in input mode until `set_mode` is called.
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input();
        Self {
            pin,
            mode: GpioMode::Input,
        }
    }

    fn ensure_output(&self) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull => Ok(()),
            GpioMode::Input => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }
}

impl GpioInterface for Rp2350Gpio<'_> {
    fn is_ready(&self) -> bool {
        // SIO is clocked from reset, there is no port driver to wait for
        true
    }

    fn set_high(&mut self) -> Result<()> {
        self.ensure_output()?;
        self.pin.set_high();
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.ensure_output()?;
        self.pin.set_low();
        Ok(())
    }

    fn read(&self) -> bool {
        match self.mode {
            GpioMode::OutputPushPull => self.pin.is_set_high(),
            GpioMode::Input => self.pin.is_high(),
        }
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        match mode {
            GpioMode::OutputPushPull => {
                self.pin.set_low();
                self.pin.set_as_output();
            }
            GpioMode::Input => self.pin.set_as_input(),
        }
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
