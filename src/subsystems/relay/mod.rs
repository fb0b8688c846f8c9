//! Sample Relay
//!
//! Latest-value hand-off between the capture context (sensor data-ready
//! handler, possibly in interrupt context) and the periodic reporter.
//!
//! # Protocol
//!
//! 1. The reporter calls [`SampleRelay::request_capture`].
//! 2. Each capture event fetches a sample from the sensor. If a capture is
//!    requested, all six values are published and the request is cleared in
//!    the same critical section.
//! 3. The reporter calls [`SampleRelay::read_snapshot`], which returns the
//!    latest published snapshot, possibly from an earlier cycle.
//!
//! The fetch runs outside the critical section so a slow bus transaction
//! never delays a reader. A reader always sees either the previous or the new
//! snapshot in full.
//!
//! # Usage
//!
//! ```ignore
//! use imu_relay::subsystems::relay::SampleRelay;
//!
//! static RELAY: SampleRelay = SampleRelay::new();
//!
//! // Reporter
//! RELAY.request_capture();
//! let snapshot = RELAY.read_snapshot();
//!
//! // Capture context
//! RELAY.on_capture_event(&mut sensor);
//! ```

mod snapshot;

pub use snapshot::SensorSnapshot;

use crate::devices::traits::{ChannelGroup, SensorDevice, SensorError, TriggerHandler, TriggerSpec};
use core::cell::Cell;
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Result of one capture event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureOutcome {
    /// A capture was requested; the sample was published and the request cleared
    Committed,
    /// No capture was requested; the sample was fetched and dropped
    Discarded,
    /// The fetch failed; the snapshot and any pending request are unchanged
    Failed(SensorError),
}

/// Relay activity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub struct RelayStats {
    /// Capture events handled
    pub events: u32,
    /// Snapshots published
    pub commits: u32,
    /// Capture events whose fetch failed
    pub failures: u32,
    /// Capture requests made by the reporter
    pub requests: u32,
}

#[derive(Clone, Copy)]
struct RelayState {
    requested: bool,
    snapshot: SensorSnapshot,
    stats: RelayStats,
}

impl RelayState {
    const INITIAL: Self = Self {
        requested: false,
        snapshot: SensorSnapshot::ZERO,
        stats: RelayStats {
            events: 0,
            commits: 0,
            failures: 0,
            requests: 0,
        },
    };
}

/// Single-slot latest-value relay
///
/// Safe to share as a `static` between the capture context and the reporter.
pub struct SampleRelay {
    state: Mutex<CriticalSectionRawMutex, Cell<RelayState>>,
}

impl Default for SampleRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleRelay {
    /// Create a relay holding the zero snapshot with no request pending
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(RelayState::INITIAL)),
        }
    }

    /// Ask the capture context for a fresh snapshot
    pub fn request_capture(&self) {
        self.update(|state| {
            state.requested = true;
            state.stats.requests = state.stats.requests.wrapping_add(1);
        });
    }

    /// Whether a capture request is pending
    pub fn is_capture_requested(&self) -> bool {
        self.state.lock(|cell| cell.get().requested)
    }

    /// Handle one capture event from `sensor`
    ///
    /// The sample is always fetched, since reading drains the device's
    /// data-ready condition. Only the first successful event after a request
    /// publishes; later events before the next request are discarded.
    pub fn on_capture_event(&self, sensor: &mut dyn SensorDevice) -> CaptureOutcome {
        let fetched = sensor
            .sample_fetch(ChannelGroup::All)
            .and_then(|()| SensorSnapshot::read_from(&*sensor));

        self.update(|state| {
            state.stats.events = state.stats.events.wrapping_add(1);

            match fetched {
                Ok(snapshot) if state.requested => {
                    state.snapshot = snapshot;
                    state.requested = false;
                    state.stats.commits = state.stats.commits.wrapping_add(1);
                    CaptureOutcome::Committed
                }
                Ok(_) => CaptureOutcome::Discarded,
                Err(e) => {
                    state.stats.failures = state.stats.failures.wrapping_add(1);
                    CaptureOutcome::Failed(e)
                }
            }
        })
    }

    /// Latest published snapshot
    ///
    /// Never blocks on the capture context beyond one critical section and
    /// never fails; returns the zero snapshot before the first commit.
    pub fn read_snapshot(&self) -> SensorSnapshot {
        self.state.lock(|cell| cell.get().snapshot)
    }

    /// Activity counters
    pub fn stats(&self) -> RelayStats {
        self.state.lock(|cell| cell.get().stats)
    }

    /// Return to the initial state
    pub fn reset(&self) {
        self.state.lock(|cell| cell.set(RelayState::INITIAL));
    }

    fn update<R>(&self, f: impl FnOnce(&mut RelayState) -> R) -> R {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let result = f(&mut state);
            cell.set(state);
            result
        })
    }
}

impl TriggerHandler for SampleRelay {
    fn on_trigger(&self, sensor: &mut dyn SensorDevice, _trigger: TriggerSpec) {
        if let CaptureOutcome::Failed(e) = self.on_capture_event(sensor) {
            crate::log_warn!("{}: capture failed: {}", sensor.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::imu::{MockSample, MockSensor};
    use crate::platform::error::{I2cError, PlatformError};
    use nalgebra::Vector3;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn sample(value: f32) -> MockSample {
        MockSample::uniform(value)
    }

    fn snapshot(value: f32) -> SensorSnapshot {
        SensorSnapshot::new(Vector3::repeat(value), Vector3::repeat(value))
    }

    #[test]
    fn test_initial_snapshot_is_zero() {
        let relay = SampleRelay::new();
        assert_eq!(relay.read_snapshot(), SensorSnapshot::ZERO);
        assert!(!relay.is_capture_requested());
        assert_eq!(relay.stats(), RelayStats::default());
    }

    #[test]
    fn test_event_without_request_fetches_and_discards() {
        let relay = SampleRelay::new();
        let mut sensor = MockSensor::with_samples(&[sample(1.0)]);

        assert_eq!(relay.on_capture_event(&mut sensor), CaptureOutcome::Discarded);
        assert_eq!(sensor.fetch_count(), 1);
        assert_eq!(relay.read_snapshot(), SensorSnapshot::ZERO);
    }

    #[test]
    fn test_request_then_event_commits() {
        let relay = SampleRelay::new();
        let mut sensor = MockSensor::with_samples(&[sample(2.0)]);

        relay.request_capture();
        assert!(relay.is_capture_requested());

        assert_eq!(relay.on_capture_event(&mut sensor), CaptureOutcome::Committed);
        assert!(!relay.is_capture_requested());
        assert_eq!(relay.read_snapshot(), snapshot(2.0));
    }

    #[test]
    fn test_rapid_events_commit_first_only() {
        let relay = SampleRelay::new();
        let samples: std::vec::Vec<MockSample> = (1..=10).map(|i| sample(i as f32)).collect();
        let mut sensor = MockSensor::with_samples(&samples);

        relay.request_capture();
        let outcomes: std::vec::Vec<CaptureOutcome> =
            (0..10).map(|_| relay.on_capture_event(&mut sensor)).collect();

        assert_eq!(outcomes[0], CaptureOutcome::Committed);
        assert!(outcomes[1..].iter().all(|o| *o == CaptureOutcome::Discarded));
        assert_eq!(relay.read_snapshot(), snapshot(1.0));
        assert_eq!(sensor.fetch_count(), 10);

        let stats = relay.stats();
        assert_eq!(stats.events, 10);
        assert_eq!(stats.commits, 1);
        assert_eq!(stats.requests, 1);
    }

    #[test]
    fn test_one_commit_per_request_window() {
        let relay = SampleRelay::new();
        let samples: std::vec::Vec<MockSample> = (1..=6).map(|i| sample(i as f32)).collect();
        let mut sensor = MockSensor::with_samples(&samples);

        relay.request_capture();
        for _ in 0..3 {
            relay.on_capture_event(&mut sensor);
        }
        assert_eq!(relay.read_snapshot(), snapshot(1.0));

        relay.request_capture();
        for _ in 0..3 {
            relay.on_capture_event(&mut sensor);
        }
        assert_eq!(relay.read_snapshot(), snapshot(4.0));
        assert_eq!(relay.stats().commits, 2);
    }

    #[test]
    fn test_read_after_request_without_event_is_stale() {
        let relay = SampleRelay::new();
        let mut sensor = MockSensor::with_samples(&[sample(3.0)]);

        relay.request_capture();
        relay.on_capture_event(&mut sensor);

        relay.request_capture();
        assert_eq!(relay.read_snapshot(), snapshot(3.0));
        assert!(relay.is_capture_requested());
    }

    #[test]
    fn test_failed_fetch_keeps_request_pending() {
        let relay = SampleRelay::new();
        let mut sensor = MockSensor::with_samples(&[sample(5.0)]);
        sensor.set_fail_fetch(true);

        relay.request_capture();
        assert_eq!(
            relay.on_capture_event(&mut sensor),
            CaptureOutcome::Failed(SensorError::Bus(PlatformError::I2c(I2cError::Nack)))
        );
        assert!(relay.is_capture_requested());
        assert_eq!(relay.read_snapshot(), SensorSnapshot::ZERO);
        assert_eq!(relay.stats().failures, 1);

        // Next good event satisfies the same request
        sensor.set_fail_fetch(false);
        assert_eq!(relay.on_capture_event(&mut sensor), CaptureOutcome::Committed);
        assert_eq!(relay.read_snapshot(), snapshot(5.0));
    }

    #[test]
    fn test_trigger_handler_commits() {
        static RELAY: SampleRelay = SampleRelay::new();

        let mut sensor = MockSensor::with_samples(&[sample(7.0)]);
        sensor
            .trigger_set(TriggerSpec::data_ready(ChannelGroup::All), &RELAY)
            .unwrap();

        RELAY.request_capture();
        assert!(sensor.fire_trigger());
        assert_eq!(RELAY.read_snapshot(), snapshot(7.0));
    }

    #[test]
    fn test_reset() {
        let relay = SampleRelay::new();
        let mut sensor = MockSensor::with_samples(&[sample(1.0)]);
        relay.request_capture();
        relay.on_capture_event(&mut sensor);
        relay.request_capture();

        relay.reset();
        assert_eq!(relay.read_snapshot(), SensorSnapshot::ZERO);
        assert!(!relay.is_capture_requested());
        assert_eq!(relay.stats(), RelayStats::default());
    }

    #[test]
    fn test_no_torn_reads_across_threads() {
        // Every committed snapshot has six equal fields; a torn read would mix two
        let relay = Arc::new(SampleRelay::new());
        let done = Arc::new(AtomicBool::new(false));

        let producer = {
            let relay = Arc::clone(&relay);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut sensor = MockSensor::new();
                for i in 1..=20_000u32 {
                    let _ = sensor.push_sample(sample(i as f32));
                    relay.request_capture();
                    relay.on_capture_event(&mut sensor);
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let mut reads = 0u32;
        let mut last = 0.0f32;
        while !done.load(Ordering::SeqCst) {
            let s = relay.read_snapshot();
            let first = s.accel.x;
            assert!(
                s.accel.iter().chain(s.gyro.iter()).all(|v| *v == first),
                "torn snapshot: {:?}",
                s
            );
            assert!(first >= last, "snapshot went backwards");
            last = first;
            reads += 1;
        }

        producer.join().unwrap();
        assert!(reads > 0);
        assert_eq!(relay.read_snapshot(), snapshot(20_000.0));
    }
}
