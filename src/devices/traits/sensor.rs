//! Sensor capability trait and value types
//!
//! Device-independent interface to a sampling sensor: fetch a sample into the
//! driver, read individual channels back, set attributes such as the output
//! data rate, and arm a trigger that calls back when new data is ready.
//!
//! ## Usage
//!
//! ```ignore
//! use imu_relay::devices::traits::{Channel, ChannelGroup, SensorDevice};
//!
//! fn read_accel_x<S: SensorDevice>(sensor: &mut S) -> Result<f32, SensorError> {
//!     sensor.sample_fetch(ChannelGroup::AccelXyz)?;
//!     Ok(sensor.channel_get(Channel::AccelX)?.to_f32())
//! }
//! ```

use crate::platform::PlatformError;
use core::fmt;

/// Sensor error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum SensorError {
    /// Device absent or driver not initialized
    NotReady,

    /// Bus communication failed
    Bus(PlatformError),

    /// Channel, attribute or trigger not supported by this device
    NotSupported,

    /// Attribute value outside the supported set
    InvalidValue,
}

impl From<PlatformError> for SensorError {
    fn from(error: PlatformError) -> Self {
        SensorError::Bus(error)
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::NotReady => write!(f, "device not ready"),
            SensorError::Bus(e) => write!(f, "{}", e),
            SensorError::NotSupported => write!(f, "not supported"),
            SensorError::InvalidValue => write!(f, "invalid value"),
        }
    }
}

/// Fixed-point sensor value
///
/// `val1` holds the integer part and `val2` the fractional part in millionths.
/// Both parts carry the sign of the value, e.g. -1.5 is `{ val1: -1, val2: -500000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct SensorValue {
    /// Integer part
    pub val1: i32,
    /// Fractional part (one-millionth parts)
    pub val2: i32,
}

impl SensorValue {
    /// Zero
    pub const ZERO: Self = Self { val1: 0, val2: 0 };

    /// Whole-number value
    pub const fn from_int(value: i32) -> Self {
        Self {
            val1: value,
            val2: 0,
        }
    }

    /// Value from a count of millionths
    pub const fn from_micros(micros: i64) -> Self {
        Self {
            val1: (micros / 1_000_000) as i32,
            val2: (micros % 1_000_000) as i32,
        }
    }

    /// Value from a float, rounded to the nearest millionth
    pub fn from_f32(value: f32) -> Self {
        let scaled = f64::from(value) * 1_000_000.0;
        let rounded = if scaled >= 0.0 {
            scaled + 0.5
        } else {
            scaled - 0.5
        };
        Self::from_micros(rounded as i64)
    }

    /// Total value in millionths
    pub const fn to_micros(self) -> i64 {
        self.val1 as i64 * 1_000_000 + self.val2 as i64
    }

    /// Convert to `f64`
    pub fn to_f64(self) -> f64 {
        f64::from(self.val1) + f64::from(self.val2) / 1_000_000.0
    }

    /// Convert to `f32`
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let micros = self.to_micros();
        let sign = if micros < 0 { "-" } else { "" };
        let abs = micros.unsigned_abs();
        write!(f, "{}{}.{:06}", sign, abs / 1_000_000, abs % 1_000_000)
    }
}

/// Group of channels fetched or configured together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum ChannelGroup {
    /// Accelerometer X/Y/Z
    AccelXyz,
    /// Gyroscope X/Y/Z
    GyroXyz,
    /// Every channel the device provides
    All,
}

impl ChannelGroup {
    /// Whether `channel` belongs to this group
    pub fn contains(self, channel: Channel) -> bool {
        match self {
            ChannelGroup::AccelXyz => channel.is_accel(),
            ChannelGroup::GyroXyz => !channel.is_accel(),
            ChannelGroup::All => true,
        }
    }
}

impl fmt::Display for ChannelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelGroup::AccelXyz => write!(f, "accel"),
            ChannelGroup::GyroXyz => write!(f, "gyro"),
            ChannelGroup::All => write!(f, "all"),
        }
    }
}

/// Single scalar channel
///
/// Acceleration channels are in m/s², angular rate channels in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum Channel {
    /// Acceleration along X (m/s²)
    AccelX,
    /// Acceleration along Y (m/s²)
    AccelY,
    /// Acceleration along Z (m/s²)
    AccelZ,
    /// Angular rate around X (°/s)
    GyroX,
    /// Angular rate around Y (°/s)
    GyroY,
    /// Angular rate around Z (°/s)
    GyroZ,
}

impl Channel {
    /// All six channels in snapshot order
    pub const ALL: [Channel; 6] = [
        Channel::AccelX,
        Channel::AccelY,
        Channel::AccelZ,
        Channel::GyroX,
        Channel::GyroY,
        Channel::GyroZ,
    ];

    /// Whether this is an accelerometer channel
    pub fn is_accel(self) -> bool {
        matches!(self, Channel::AccelX | Channel::AccelY | Channel::AccelZ)
    }

    /// Axis index (0 = X, 1 = Y, 2 = Z)
    pub fn axis(self) -> usize {
        match self {
            Channel::AccelX | Channel::GyroX => 0,
            Channel::AccelY | Channel::GyroY => 1,
            Channel::AccelZ | Channel::GyroZ => 2,
        }
    }
}

/// Configurable sensor attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum SensorAttribute {
    /// Output data rate in Hz
    SamplingFrequency,
}

/// Trigger condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum TriggerKind {
    /// New sample available
    DataReady,
}

/// Trigger condition on a channel group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct TriggerSpec {
    /// Condition that fires the trigger
    pub kind: TriggerKind,
    /// Channels the condition applies to
    pub group: ChannelGroup,
}

impl TriggerSpec {
    /// Data-ready trigger on `group`
    pub const fn data_ready(group: ChannelGroup) -> Self {
        Self {
            kind: TriggerKind::DataReady,
            group,
        }
    }
}

/// Callback invoked by a sensor when an armed trigger fires
///
/// Handlers may run in interrupt context, asynchronously to every other
/// context in the application, and must not block.
pub trait TriggerHandler: Sync {
    /// Called with the sensor that raised the trigger
    fn on_trigger(&self, sensor: &mut dyn SensorDevice, trigger: TriggerSpec);
}

/// Device-independent sampling sensor interface
///
/// This trait is object safe so that trigger handlers can receive the
/// raising device as `&mut dyn SensorDevice`.
pub trait SensorDevice {
    /// Short device name used in log messages
    fn name(&self) -> &'static str;

    /// Bring up the driver once the device is powered
    ///
    /// Drivers that need no bring-up keep the default.
    fn init(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    /// Whether the device is present and its driver initialized
    fn is_ready(&self) -> bool;

    /// Read a new sample for `group` from the device into the driver
    fn sample_fetch(&mut self, group: ChannelGroup) -> Result<(), SensorError>;

    /// Value of `channel` from the most recent fetch
    fn channel_get(&self, channel: Channel) -> Result<SensorValue, SensorError>;

    /// Set an attribute for a channel group
    fn attr_set(
        &mut self,
        group: ChannelGroup,
        attr: SensorAttribute,
        value: SensorValue,
    ) -> Result<(), SensorError>;

    /// Arm `trigger` and register `handler` for it
    ///
    /// Returns `SensorError::NotSupported` if the device cannot raise the trigger.
    fn trigger_set(
        &mut self,
        trigger: TriggerSpec,
        handler: &'static dyn TriggerHandler,
    ) -> Result<(), SensorError>;
}
