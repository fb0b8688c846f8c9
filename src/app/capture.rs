//! Capture strategies
//!
//! A reporting cycle requests a capture, gives the strategy a chance to
//! satisfy it, and reads whatever snapshot the relay then holds.
//!
//! - [`PushCapture`]: the sensor's data-ready trigger calls the relay from the
//!   capture context, so nothing happens inline.
//! - [`PullCapture`]: no trigger is armed; the strategy owns the sensor and
//!   runs one capture event right after each request.

use crate::devices::traits::SensorDevice;
use crate::subsystems::relay::{CaptureOutcome, SampleRelay};

/// Inline capture hook for the reporting cycle
pub trait CaptureStrategy {
    /// Called right after the reporter requests a capture
    fn after_request(&mut self, relay: &SampleRelay);
}

/// Event-driven capture through the data-ready trigger
#[derive(Debug, Default, Clone, Copy)]
pub struct PushCapture;

impl CaptureStrategy for PushCapture {
    fn after_request(&mut self, _relay: &SampleRelay) {}
}

/// Poll-on-demand capture, once per reporting cycle
pub struct PullCapture<S: SensorDevice> {
    sensor: S,
}

impl<S: SensorDevice> PullCapture<S> {
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn into_sensor(self) -> S {
        self.sensor
    }
}

impl<S: SensorDevice> CaptureStrategy for PullCapture<S> {
    fn after_request(&mut self, relay: &SampleRelay) {
        if let CaptureOutcome::Failed(e) = relay.on_capture_event(&mut self.sensor) {
            crate::log_warn!("{}: capture failed: {}", self.sensor.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::imu::{MockSample, MockSensor};

    #[test]
    fn test_push_capture_leaves_request_pending() {
        let relay = SampleRelay::new();
        relay.request_capture();

        PushCapture.after_request(&relay);
        assert!(relay.is_capture_requested());
        assert_eq!(relay.stats().events, 0);
    }

    #[test]
    fn test_pull_capture_fetches_each_cycle() {
        let relay = SampleRelay::new();
        let sensor = MockSensor::with_samples(&[MockSample::uniform(1.0), MockSample::uniform(2.0)]);
        let mut strategy = PullCapture::new(sensor);

        relay.request_capture();
        strategy.after_request(&relay);
        assert_eq!(relay.read_snapshot().accel.x, 1.0);

        relay.request_capture();
        strategy.after_request(&relay);
        assert_eq!(relay.read_snapshot().accel.x, 2.0);
        assert_eq!(strategy.sensor().fetch_count(), 2);
    }

    #[test]
    fn test_pull_capture_failure_keeps_old_snapshot() {
        let relay = SampleRelay::new();
        let mut sensor = MockSensor::with_samples(&[MockSample::uniform(1.0)]);
        sensor.set_fail_fetch(true);
        let mut strategy = PullCapture::new(sensor);

        relay.request_capture();
        strategy.after_request(&relay);

        assert_eq!(relay.read_snapshot().accel.x, 0.0);
        assert_eq!(relay.stats().failures, 1);
        assert_eq!(strategy.into_sensor().pending_samples(), 1);
    }
}
