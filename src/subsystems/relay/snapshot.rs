//! Six-axis sensor snapshot

use crate::devices::traits::{Channel, SensorDevice, SensorError};
use nalgebra::Vector3;

/// Complete accelerometer and gyroscope reading from one capture
///
/// The six fields are only ever published together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSnapshot {
    /// Acceleration (m/s²)
    pub accel: Vector3<f32>,
    /// Angular rate (°/s)
    pub gyro: Vector3<f32>,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::ZERO
    }
}

impl SensorSnapshot {
    /// All-zero snapshot held before the first capture
    pub const ZERO: Self = Self {
        accel: Vector3::new(0.0, 0.0, 0.0),
        gyro: Vector3::new(0.0, 0.0, 0.0),
    };

    /// Create from accelerometer and gyroscope vectors
    pub const fn new(accel: Vector3<f32>, gyro: Vector3<f32>) -> Self {
        Self { accel, gyro }
    }

    /// Read all six channels from the sensor's most recent fetch
    pub fn read_from(sensor: &dyn SensorDevice) -> Result<Self, SensorError> {
        let mut values = [0.0f32; 6];
        for (slot, channel) in values.iter_mut().zip(Channel::ALL) {
            *slot = sensor.channel_get(channel)?.to_f32();
        }

        Ok(Self {
            accel: Vector3::new(values[0], values[1], values[2]),
            gyro: Vector3::new(values[3], values[4], values[5]),
        })
    }

    /// Value of a single channel
    pub fn channel(&self, channel: Channel) -> f32 {
        if channel.is_accel() {
            self.accel[channel.axis()]
        } else {
            self.gyro[channel.axis()]
        }
    }

    pub fn accel_x(&self) -> f32 {
        self.accel.x
    }

    pub fn accel_y(&self) -> f32 {
        self.accel.y
    }

    pub fn accel_z(&self) -> f32 {
        self.accel.z
    }

    pub fn gyro_x(&self) -> f32 {
        self.gyro.x
    }

    pub fn gyro_y(&self) -> f32 {
        self.gyro.y
    }

    pub fn gyro_z(&self) -> f32 {
        self.gyro.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::imu::{MockSample, MockSensor};
    use crate::devices::traits::ChannelGroup;

    #[test]
    fn test_zero_snapshot() {
        let snapshot = SensorSnapshot::default();
        assert_eq!(snapshot, SensorSnapshot::ZERO);
        assert_eq!(snapshot.gyro_z(), 0.0);
    }

    #[test]
    fn test_read_from_sensor() {
        let sample = MockSample::new(Vector3::new(0.5, -1.0, 9.75), Vector3::new(1.25, 0.0, -3.5));
        let mut sensor = MockSensor::with_samples(&[sample]);
        sensor.sample_fetch(ChannelGroup::All).unwrap();

        let snapshot = SensorSnapshot::read_from(&sensor).unwrap();
        assert_eq!(snapshot.accel, sample.accel);
        assert_eq!(snapshot.gyro, sample.gyro);
        assert_eq!(snapshot.channel(Channel::AccelZ), 9.75);
        assert_eq!(snapshot.channel(Channel::GyroZ), -3.5);
    }

    #[test]
    fn test_read_from_absent_sensor() {
        let sensor = MockSensor::not_ready();
        assert_eq!(
            SensorSnapshot::read_from(&sensor),
            Err(SensorError::NotReady)
        );
    }
}
