//! Mock sampling sensor for testing
//!
//! Provides a configurable mock that implements `SensorDevice`. Samples are
//! queued up front and latched one per fetch; the trigger registered through
//! `trigger_set` is raised on demand with `fire_trigger`.
//!
//! ## Usage
//!
//! ```ignore
//! use imu_relay::devices::imu::{MockSample, MockSensor};
//! use nalgebra::Vector3;
//!
//! let mut sensor = MockSensor::new();
//! sensor.push_sample(MockSample::new(Vector3::new(0.0, 0.0, 9.8), Vector3::zeros()));
//! sensor.fire_trigger();
//! ```

use crate::devices::traits::{
    Channel, ChannelGroup, SensorAttribute, SensorDevice, SensorError, SensorValue,
    TriggerHandler, TriggerSpec,
};
use crate::platform::error::{I2cError, PlatformError};
use nalgebra::Vector3;

/// Queue depth for preset samples
const SAMPLE_QUEUE_DEPTH: usize = 64;

/// Maximum number of recorded attribute writes
const ATTRIBUTE_LOG_DEPTH: usize = 8;

/// One six-axis sample served by the mock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MockSample {
    /// Acceleration (m/s²)
    pub accel: Vector3<f32>,
    /// Angular rate (°/s)
    pub gyro: Vector3<f32>,
}

impl MockSample {
    /// Create a sample from accelerometer and gyroscope vectors
    pub fn new(accel: Vector3<f32>, gyro: Vector3<f32>) -> Self {
        Self { accel, gyro }
    }

    /// Sample whose six channels all hold `value`
    pub fn uniform(value: f32) -> Self {
        Self {
            accel: Vector3::repeat(value),
            gyro: Vector3::repeat(value),
        }
    }
}

/// Mock sensor for testing
pub struct MockSensor {
    /// Queue of samples latched by successive fetches
    samples: heapless::Deque<MockSample, SAMPLE_QUEUE_DEPTH>,

    /// Sample visible through `channel_get`
    latched: MockSample,

    /// Presence (can be cleared to model an absent device)
    ready: bool,

    /// Fail every fetch with a bus error
    fail_fetch: bool,

    /// Reject sampling-frequency writes for this group
    fail_attr: Option<ChannelGroup>,

    /// Whether `trigger_set` is accepted
    trigger_supported: bool,

    /// Number of fetch attempts, successful or not
    fetch_count: u32,

    /// Attribute writes in call order
    attributes: heapless::Vec<(ChannelGroup, SensorAttribute, SensorValue), ATTRIBUTE_LOG_DEPTH>,

    /// Armed trigger and its handler
    trigger: Option<(TriggerSpec, &'static dyn TriggerHandler)>,
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSensor {
    /// Create a ready mock with no queued samples
    pub fn new() -> Self {
        Self {
            samples: heapless::Deque::new(),
            latched: MockSample::default(),
            ready: true,
            fail_fetch: false,
            fail_attr: None,
            trigger_supported: true,
            fetch_count: 0,
            attributes: heapless::Vec::new(),
            trigger: None,
        }
    }

    /// Create a mock that reports itself absent
    pub fn not_ready() -> Self {
        let mut sensor = Self::new();
        sensor.ready = false;
        sensor
    }

    /// Create a mock with a sequence of samples
    pub fn with_samples(samples: &[MockSample]) -> Self {
        let mut sensor = Self::new();
        for sample in samples.iter().take(SAMPLE_QUEUE_DEPTH) {
            let _ = sensor.samples.push_back(*sample);
        }
        sensor
    }

    /// Push a new sample onto the queue
    pub fn push_sample(&mut self, sample: MockSample) -> Result<(), MockSample> {
        self.samples.push_back(sample)
    }

    /// Number of samples still queued
    pub fn pending_samples(&self) -> usize {
        self.samples.len()
    }

    /// Make every fetch fail (for testing error handling)
    pub fn set_fail_fetch(&mut self, fail: bool) {
        self.fail_fetch = fail;
    }

    /// Reject attribute writes for `group`
    pub fn set_fail_attr(&mut self, group: Option<ChannelGroup>) {
        self.fail_attr = group;
    }

    /// Accept or reject trigger registration
    pub fn set_trigger_supported(&mut self, supported: bool) {
        self.trigger_supported = supported;
    }

    /// Number of fetch attempts so far
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count
    }

    /// Attribute writes accepted so far, in call order
    pub fn attributes(&self) -> &[(ChannelGroup, SensorAttribute, SensorValue)] {
        &self.attributes
    }

    /// Currently armed trigger
    pub fn armed_trigger(&self) -> Option<TriggerSpec> {
        self.trigger.map(|(spec, _)| spec)
    }

    /// Raise the armed trigger, as the device interrupt would
    ///
    /// Returns `false` if no trigger is armed.
    pub fn fire_trigger(&mut self) -> bool {
        match self.trigger {
            Some((spec, handler)) => {
                handler.on_trigger(self, spec);
                true
            }
            None => false,
        }
    }
}

impl SensorDevice for MockSensor {
    fn name(&self) -> &'static str {
        "mock-imu"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn sample_fetch(&mut self, _group: ChannelGroup) -> Result<(), SensorError> {
        if !self.ready {
            return Err(SensorError::NotReady);
        }

        self.fetch_count += 1;
        if self.fail_fetch {
            return Err(SensorError::Bus(PlatformError::I2c(I2cError::Nack)));
        }

        if let Some(sample) = self.samples.pop_front() {
            self.latched = sample;
        }
        Ok(())
    }

    fn channel_get(&self, channel: Channel) -> Result<SensorValue, SensorError> {
        if !self.ready {
            return Err(SensorError::NotReady);
        }

        let source = if channel.is_accel() {
            &self.latched.accel
        } else {
            &self.latched.gyro
        };
        Ok(SensorValue::from_f32(source[channel.axis()]))
    }

    fn attr_set(
        &mut self,
        group: ChannelGroup,
        attr: SensorAttribute,
        value: SensorValue,
    ) -> Result<(), SensorError> {
        if !self.ready {
            return Err(SensorError::NotReady);
        }
        if self.fail_attr == Some(group) {
            return Err(SensorError::InvalidValue);
        }

        let _ = self.attributes.push((group, attr, value));
        Ok(())
    }

    fn trigger_set(
        &mut self,
        trigger: TriggerSpec,
        handler: &'static dyn TriggerHandler,
    ) -> Result<(), SensorError> {
        if !self.ready {
            return Err(SensorError::NotReady);
        }
        if !self.trigger_supported {
            return Err(SensorError::NotSupported);
        }

        self.trigger = Some((trigger, handler));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    struct CountingHandler {
        calls: AtomicU32,
    }

    impl TriggerHandler for CountingHandler {
        fn on_trigger(&self, sensor: &mut dyn SensorDevice, trigger: TriggerSpec) {
            assert_eq!(trigger, TriggerSpec::data_ready(ChannelGroup::AccelXyz));
            sensor.sample_fetch(ChannelGroup::All).unwrap();
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_mock_sensor_latches_samples_in_order() {
        let mut sensor = MockSensor::with_samples(&[MockSample::uniform(1.0), MockSample::uniform(2.0)]);

        sensor.sample_fetch(ChannelGroup::All).unwrap();
        assert_eq!(sensor.channel_get(Channel::GyroZ).unwrap().to_f32(), 1.0);

        sensor.sample_fetch(ChannelGroup::All).unwrap();
        assert_eq!(sensor.channel_get(Channel::AccelX).unwrap().to_f32(), 2.0);

        // Queue exhausted: last sample stays latched
        sensor.sample_fetch(ChannelGroup::All).unwrap();
        assert_eq!(sensor.channel_get(Channel::AccelX).unwrap().to_f32(), 2.0);
        assert_eq!(sensor.fetch_count(), 3);
    }

    #[test]
    fn test_mock_sensor_channel_mapping() {
        let sample = MockSample::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        let mut sensor = MockSensor::with_samples(&[sample]);
        sensor.sample_fetch(ChannelGroup::All).unwrap();

        let values = Channel::ALL.map(|c| sensor.channel_get(c).unwrap().to_f32());
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_mock_sensor_fetch_failure() {
        let mut sensor = MockSensor::with_samples(&[MockSample::uniform(1.0)]);
        sensor.set_fail_fetch(true);

        let result = sensor.sample_fetch(ChannelGroup::All);
        assert_eq!(
            result,
            Err(SensorError::Bus(PlatformError::I2c(I2cError::Nack)))
        );
        assert_eq!(sensor.pending_samples(), 1);
    }

    #[test]
    fn test_mock_sensor_not_ready() {
        let mut sensor = MockSensor::not_ready();
        assert!(!sensor.is_ready());
        assert_eq!(
            sensor.sample_fetch(ChannelGroup::All),
            Err(SensorError::NotReady)
        );
        assert_eq!(sensor.fetch_count(), 0);
    }

    #[test]
    fn test_mock_sensor_records_attributes() {
        let mut sensor = MockSensor::new();
        sensor
            .attr_set(
                ChannelGroup::AccelXyz,
                SensorAttribute::SamplingFrequency,
                SensorValue::from_int(104),
            )
            .unwrap();

        sensor.set_fail_attr(Some(ChannelGroup::GyroXyz));
        let result = sensor.attr_set(
            ChannelGroup::GyroXyz,
            SensorAttribute::SamplingFrequency,
            SensorValue::from_int(104),
        );

        assert_eq!(result, Err(SensorError::InvalidValue));
        assert_eq!(sensor.attributes().len(), 1);
        assert_eq!(sensor.attributes()[0].0, ChannelGroup::AccelXyz);
    }

    #[test]
    fn test_mock_sensor_fire_trigger() {
        static HANDLER: CountingHandler = CountingHandler {
            calls: AtomicU32::new(0),
        };

        let mut sensor = MockSensor::new();
        assert!(!sensor.fire_trigger());

        let spec = TriggerSpec::data_ready(ChannelGroup::AccelXyz);
        sensor.trigger_set(spec, &HANDLER).unwrap();
        assert_eq!(sensor.armed_trigger(), Some(spec));

        assert!(sensor.fire_trigger());
        assert_eq!(HANDLER.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sensor.fetch_count(), 1);
    }

    #[test]
    fn test_mock_sensor_trigger_unsupported() {
        static HANDLER: CountingHandler = CountingHandler {
            calls: AtomicU32::new(0),
        };

        let mut sensor = MockSensor::new();
        sensor.set_trigger_supported(false);

        let result = sensor.trigger_set(TriggerSpec::data_ready(ChannelGroup::AccelXyz), &HANDLER);
        assert_eq!(result, Err(SensorError::NotSupported));
        assert_eq!(sensor.armed_trigger(), None);
    }
}
