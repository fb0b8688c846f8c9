//! LSM6DSL I2C Driver Implementation
//!
//! Blocking register access so that the data-ready interrupt can be serviced
//! directly from the interrupt path.

use super::registers;
use crate::devices::traits::{
    Channel, ChannelGroup, SensorAttribute, SensorDevice, SensorError, SensorValue,
    TriggerHandler, TriggerKind, TriggerSpec,
};
use crate::platform::traits::I2cInterface;

/// LSM6DSL driver
///
/// Implements `SensorDevice` for the LSM6DSL accelerometer and gyroscope.
/// Full scale stays at the power-on default (±2 g, ±250 dps).
pub struct Lsm6dsl<I: I2cInterface> {
    /// I2C bus handle
    i2c: I,

    /// 7-bit device address
    address: u8,

    /// Raw accelerometer counts from the last fetch
    accel_raw: [i16; 3],

    /// Raw gyroscope counts from the last fetch
    gyro_raw: [i16; 3],

    /// Armed trigger and its handler
    trigger: Option<(TriggerSpec, &'static dyn TriggerHandler)>,

    /// Initialization complete flag
    initialized: bool,
}

impl<I: I2cInterface> Lsm6dsl<I> {
    /// Create a driver at the default address
    ///
    /// The driver reports not ready until `probe` succeeds.
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, registers::LSM6DSL_ADDR)
    }

    /// Create a driver at a specific address
    pub fn with_address(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            accel_raw: [0; 3],
            gyro_raw: [0; 3],
            trigger: None,
            initialized: false,
        }
    }

    /// Verify the device identity and enable block data update
    ///
    /// # Errors
    ///
    /// `SensorError::NotReady` if the WHO_AM_I value does not match,
    /// `SensorError::Bus` if the device does not answer.
    pub fn probe(&mut self) -> Result<(), SensorError> {
        let whoami = self.read_register(registers::WHO_AM_I)?;
        if whoami != registers::WHO_AM_I_VALUE {
            crate::log_error!(
                "Unknown IMU WHO_AM_I: {} (expected {})",
                whoami,
                registers::WHO_AM_I_VALUE
            );
            return Err(SensorError::NotReady);
        }

        self.update_register(
            registers::CTRL3_C,
            registers::CTRL3_C_BDU | registers::CTRL3_C_IF_INC,
            registers::CTRL3_C_BDU | registers::CTRL3_C_IF_INC,
        )?;

        self.initialized = true;
        crate::log_info!("LSM6DSL detected at address {}", self.address);
        Ok(())
    }

    /// Dispatch a data-ready interrupt to the registered handler
    ///
    /// Call from the INT1 edge handler. Returns `false` if no trigger is armed.
    pub fn service_interrupt(&mut self) -> bool {
        match self.trigger {
            Some((spec, handler)) => {
                handler.on_trigger(self, spec);
                true
            }
            None => false,
        }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.read_registers(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .read_registers(self.address, reg, buf)
            .map_err(SensorError::Bus)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write_register(self.address, reg, value)
            .map_err(SensorError::Bus)
    }

    /// Read-modify-write the bits selected by `mask`
    fn update_register(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), SensorError> {
        let current = self.read_register(reg)?;
        self.write_register(reg, (current & !mask) | (value & mask))
    }

    fn ensure_ready(&self) -> Result<(), SensorError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SensorError::NotReady)
        }
    }

    /// ODR code for a requested rate: the slowest supported rate at or above it
    fn odr_code(value: SensorValue) -> Result<u8, SensorError> {
        let micros = value.to_micros();
        if micros <= 0 {
            return Err(SensorError::InvalidValue);
        }

        let tenths = (micros + 99_999) / 100_000;
        registers::ODR_TABLE
            .iter()
            .find(|(rate, _)| i64::from(*rate) >= tenths)
            .map(|(_, code)| *code)
            .ok_or(SensorError::InvalidValue)
    }

    fn decode(raw: &[u8]) -> [i16; 3] {
        [
            i16::from_le_bytes([raw[0], raw[1]]),
            i16::from_le_bytes([raw[2], raw[3]]),
            i16::from_le_bytes([raw[4], raw[5]]),
        ]
    }
}

impl<I: I2cInterface> SensorDevice for Lsm6dsl<I> {
    fn name(&self) -> &'static str {
        "lsm6dsl"
    }

    fn init(&mut self) -> Result<(), SensorError> {
        self.probe()
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }

    fn sample_fetch(&mut self, group: ChannelGroup) -> Result<(), SensorError> {
        self.ensure_ready()?;

        match group {
            ChannelGroup::AccelXyz => {
                let mut raw = [0u8; 6];
                self.read_registers(registers::OUTX_L_XL, &mut raw)?;
                self.accel_raw = Self::decode(&raw);
            }
            ChannelGroup::GyroXyz => {
                let mut raw = [0u8; 6];
                self.read_registers(registers::OUTX_L_G, &mut raw)?;
                self.gyro_raw = Self::decode(&raw);
            }
            ChannelGroup::All => {
                // Gyro and accel output registers are contiguous
                let mut raw = [0u8; 12];
                self.read_registers(registers::OUTX_L_G, &mut raw)?;
                self.gyro_raw = Self::decode(&raw[..6]);
                self.accel_raw = Self::decode(&raw[6..]);
            }
        }
        Ok(())
    }

    fn channel_get(&self, channel: Channel) -> Result<SensorValue, SensorError> {
        self.ensure_ready()?;

        let micros = if channel.is_accel() {
            let raw = i64::from(self.accel_raw[channel.axis()]);
            raw * registers::ACCEL_SENSITIVITY_UG * registers::GRAVITY_10UM_S2 / 100_000
        } else {
            let raw = i64::from(self.gyro_raw[channel.axis()]);
            raw * registers::GYRO_SENSITIVITY_UDPS
        };
        Ok(SensorValue::from_micros(micros))
    }

    fn attr_set(
        &mut self,
        group: ChannelGroup,
        attr: SensorAttribute,
        value: SensorValue,
    ) -> Result<(), SensorError> {
        self.ensure_ready()?;

        match attr {
            SensorAttribute::SamplingFrequency => {
                let code = Self::odr_code(value)?;
                let field = code << registers::ODR_SHIFT;
                if matches!(group, ChannelGroup::AccelXyz | ChannelGroup::All) {
                    self.update_register(registers::CTRL1_XL, registers::ODR_MASK, field)?;
                }
                if matches!(group, ChannelGroup::GyroXyz | ChannelGroup::All) {
                    self.update_register(registers::CTRL2_G, registers::ODR_MASK, field)?;
                }
                crate::log_debug!("{} ODR set to {} Hz", group, value);
            }
        }
        Ok(())
    }

    fn trigger_set(
        &mut self,
        trigger: TriggerSpec,
        handler: &'static dyn TriggerHandler,
    ) -> Result<(), SensorError> {
        self.ensure_ready()?;

        match trigger.kind {
            TriggerKind::DataReady => {
                let bits = match trigger.group {
                    ChannelGroup::AccelXyz => registers::INT1_DRDY_XL,
                    ChannelGroup::GyroXyz => registers::INT1_DRDY_G,
                    ChannelGroup::All => registers::INT1_DRDY_XL | registers::INT1_DRDY_G,
                };
                self.update_register(registers::INT1_CTRL, bits, bits)?;
            }
        }

        self.trigger = Some((trigger, handler));
        Ok(())
    }
}
