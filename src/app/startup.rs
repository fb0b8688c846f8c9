//! Startup sequence
//!
//! Linear bring-up from power-on to the ready state:
//!
//! ```text
//! Uninitialized ─► Configuring ─► Initializing ─► ConfiguringSensor ─► Arming ─► Ready
//!   (LED lines)      (red, supply, sensor)   (ODR accel, gyro)   (trigger, prime)  (green)
//! ```
//!
//! Every step is fatal on failure: the error is logged and returned, and no
//! later step runs. The indicator stays at whatever color was last shown.

use super::error::{InitError, StartupPhase};
use crate::devices::traits::{ChannelGroup, SensorAttribute, SensorDevice, TriggerSpec};
use crate::parameters::{AppParams, SamplingMode};
use crate::platform::traits::{GpioInterface, GpioMode};
use crate::subsystems::relay::SampleRelay;
use crate::subsystems::status::{StatusColor, StatusIndicator};
use embedded_hal_async::delay::DelayNs;

/// Time for the sensor to boot after its supply is enabled (LSM6DSL turn-on time)
pub const SUPPLY_SETTLE_MS: u32 = 35;

/// Peripherals consumed by the startup sequence
pub struct Board<G: GpioInterface, S: SensorDevice> {
    /// Red, green and blue LED lines
    pub leds: [G; 3],
    /// Optional sensor supply-enable line
    pub supply: Option<G>,
    /// Sampling sensor
    pub sensor: S,
}

/// Peripherals after a successful startup
pub struct Initialized<G: GpioInterface, S: SensorDevice> {
    /// Configured indicator, showing green
    pub indicator: StatusIndicator<G>,
    /// Sensor with ODR programmed and, in push mode, the trigger armed
    pub sensor: S,
    /// Supply line held high
    pub supply: Option<G>,
    /// Selected capture strategy
    pub mode: SamplingMode,
}

impl<G: GpioInterface, S: SensorDevice> Initialized<G, S> {
    /// Lifecycle phase reached
    pub fn phase(&self) -> StartupPhase {
        StartupPhase::Ready
    }
}

/// Run the startup sequence
///
/// In push mode `relay` is registered as the sensor's data-ready handler.
///
/// # Errors
///
/// The first failing step's [`InitError`]; see [`InitError::phase`].
pub async fn initialize<G, S, D>(
    board: Board<G, S>,
    relay: &'static SampleRelay,
    params: &AppParams,
    delay: &mut D,
) -> Result<Initialized<G, S>, InitError>
where
    G: GpioInterface,
    S: SensorDevice,
    D: DelayNs,
{
    let Board {
        leds,
        supply,
        mut sensor,
    } = board;

    // Configuring: LED lines
    let mut indicator = StatusIndicator::configure(leds)?;

    // Initializing: red, then power and check the sensor
    indicator.set_color(StatusColor::Initializing);
    crate::log_info!("Initializing ({} mode)", params.sampling_mode);

    let supply = match supply {
        Some(line) => {
            let line = enable_supply(line)?;
            delay.delay_ms(SUPPLY_SETTLE_MS).await;
            Some(line)
        }
        None => None,
    };

    if let Err(e) = sensor.init() {
        crate::log_error!("{}: init failed: {}", sensor.name(), e);
    }
    if !sensor.is_ready() {
        crate::log_error!("{}: not ready", sensor.name());
        return Err(InitError::SensorNotReady(sensor.name()));
    }

    // ConfiguringSensor: output data rate for both groups
    for group in [ChannelGroup::AccelXyz, ChannelGroup::GyroXyz] {
        sensor
            .attr_set(group, SensorAttribute::SamplingFrequency, params.odr_hz)
            .map_err(|e| {
                let error = InitError::SamplingFrequency(group, e);
                crate::log_error!("{}", error);
                error
            })?;
    }

    // Arming: trigger in push mode, then prime the pipeline
    if params.sampling_mode == SamplingMode::Push {
        sensor
            .trigger_set(TriggerSpec::data_ready(ChannelGroup::All), relay)
            .map_err(|e| {
                let error = InitError::TriggerRegistration(e);
                crate::log_error!("{}", error);
                error
            })?;
    }

    sensor.sample_fetch(ChannelGroup::All).map_err(|e| {
        let error = InitError::InitialFetch(e);
        crate::log_error!("{}", error);
        error
    })?;

    // Ready: green, held briefly
    indicator.set_color(StatusColor::Ready);
    crate::log_info!("{} ready, ODR {} Hz", sensor.name(), params.odr_hz);
    delay.delay_ms(params.ready_hold_ms).await;

    Ok(Initialized {
        indicator,
        sensor,
        supply,
        mode: params.sampling_mode,
    })
}

fn enable_supply<G: GpioInterface>(mut line: G) -> Result<G, InitError> {
    if !line.is_ready() {
        crate::log_error!("sensor supply: not ready");
        return Err(InitError::SupplyNotReady);
    }

    line.set_mode(GpioMode::OutputPushPull)
        .and_then(|()| line.set_high())
        .map_err(|e| {
            let error = InitError::SupplyConfigure(e);
            crate::log_error!("{}", error);
            error
        })?;

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::imu::{MockSample, MockSensor};
    use crate::devices::traits::{SensorError, SensorValue};
    use crate::platform::error::{GpioError, I2cError, PlatformError};
    use crate::platform::mock::{LineProbe, MockDelay, MockGpio};
    use crate::subsystems::status::LedLine;
    use std::boxed::Box;

    fn leaked_relay() -> &'static SampleRelay {
        Box::leak(Box::new(SampleRelay::new()))
    }

    fn probed_leds(probe: &LineProbe) -> [MockGpio; 3] {
        [
            MockGpio::new_input().with_probe(probe, 0),
            MockGpio::new_input().with_probe(probe, 1),
            MockGpio::new_input().with_probe(probe, 2),
        ]
    }

    fn board(probe: &LineProbe, sensor: MockSensor) -> Board<MockGpio, MockSensor> {
        Board {
            leds: probed_leds(probe),
            supply: None,
            sensor,
        }
    }

    #[tokio::test]
    async fn test_happy_path_push() {
        let probe = LineProbe::new();
        let relay = leaked_relay();
        let mut delay = MockDelay::new();
        let params = AppParams::default();

        let init = initialize(board(&probe, MockSensor::new()), relay, &params, &mut delay)
            .await
            .unwrap();

        // red on, then red off before green on
        let expected: [(u8, bool); 3] = [(0, true), (0, false), (1, true)];
        assert_eq!(probe.writes(), expected);
        assert_eq!(init.indicator.color(), StatusColor::Ready);
        assert_eq!(init.phase(), StartupPhase::Ready);
        assert_eq!(init.mode, SamplingMode::Push);

        let attrs = init.sensor.attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(
            attrs[0],
            (
                ChannelGroup::AccelXyz,
                SensorAttribute::SamplingFrequency,
                SensorValue::from_int(104)
            )
        );
        assert_eq!(attrs[1].0, ChannelGroup::GyroXyz);

        assert_eq!(
            init.sensor.armed_trigger(),
            Some(TriggerSpec::data_ready(ChannelGroup::All))
        );
        assert_eq!(init.sensor.fetch_count(), 1);
        assert_eq!(delay.elapsed_ms(), 500);
    }

    #[tokio::test]
    async fn test_armed_trigger_feeds_relay() {
        let probe = LineProbe::new();
        let relay = leaked_relay();
        let mut delay = MockDelay::new();

        let sensor = MockSensor::with_samples(&[MockSample::uniform(0.0), MockSample::uniform(4.5)]);
        let mut init = initialize(board(&probe, sensor), relay, &AppParams::default(), &mut delay)
            .await
            .unwrap();

        relay.request_capture();
        assert!(init.sensor.fire_trigger());
        assert_eq!(relay.read_snapshot().gyro.z, 4.5);
    }

    #[tokio::test]
    async fn test_pull_mode_skips_trigger() {
        let probe = LineProbe::new();
        let mut delay = MockDelay::new();
        let params = AppParams {
            sampling_mode: SamplingMode::Pull,
            ..AppParams::default()
        };

        let mut sensor = MockSensor::new();
        sensor.set_trigger_supported(false);

        let init = initialize(board(&probe, sensor), leaked_relay(), &params, &mut delay)
            .await
            .unwrap();

        assert_eq!(init.sensor.armed_trigger(), None);
        assert_eq!(init.mode, SamplingMode::Pull);
        assert_eq!(init.indicator.color(), StatusColor::Ready);
    }

    #[tokio::test]
    async fn test_device_absent_halts_after_red() {
        let probe = LineProbe::new();
        let mut delay = MockDelay::new();

        let result = initialize(
            board(&probe, MockSensor::not_ready()),
            leaked_relay(),
            &AppParams::default(),
            &mut delay,
        )
        .await;

        assert_eq!(result.err(), Some(InitError::SensorNotReady("mock-imu")));
        let expected: [(u8, bool); 1] = [(0, true)];
        assert_eq!(probe.writes(), expected);
        assert_eq!(delay.calls(), 0);
    }

    #[tokio::test]
    async fn test_line_not_ready_halts_before_any_color() {
        let probe = LineProbe::new();
        let mut leds = probed_leds(&probe);
        leds[2] = MockGpio::new_input().not_ready();
        let board = Board {
            leds,
            supply: None,
            sensor: MockSensor::new(),
        };

        let result = initialize(board, leaked_relay(), &AppParams::default(), &mut MockDelay::new()).await;

        let error = result.err().unwrap();
        assert_eq!(error, InitError::LineNotReady(LedLine::Blue));
        assert_eq!(error.phase(), StartupPhase::Configuring);
        assert!(probe.is_empty());
    }

    #[tokio::test]
    async fn test_sampling_frequency_failure() {
        let probe = LineProbe::new();
        let mut sensor = MockSensor::new();
        sensor.set_fail_attr(Some(ChannelGroup::GyroXyz));

        let result = initialize(
            board(&probe, sensor),
            leaked_relay(),
            &AppParams::default(),
            &mut MockDelay::new(),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(InitError::SamplingFrequency(
                ChannelGroup::GyroXyz,
                SensorError::InvalidValue
            ))
        );
        let expected: [(u8, bool); 1] = [(0, true)];
        assert_eq!(probe.writes(), expected);
    }

    #[tokio::test]
    async fn test_trigger_registration_failure() {
        let probe = LineProbe::new();
        let mut sensor = MockSensor::new();
        sensor.set_trigger_supported(false);

        let result = initialize(
            board(&probe, sensor),
            leaked_relay(),
            &AppParams::default(),
            &mut MockDelay::new(),
        )
        .await;

        let error = result.err().unwrap();
        assert_eq!(error, InitError::TriggerRegistration(SensorError::NotSupported));
        assert_eq!(error.phase(), StartupPhase::Arming);
    }

    #[tokio::test]
    async fn test_initial_fetch_failure() {
        let probe = LineProbe::new();
        let mut sensor = MockSensor::new();
        sensor.set_fail_fetch(true);

        let result = initialize(
            board(&probe, sensor),
            leaked_relay(),
            &AppParams::default(),
            &mut MockDelay::new(),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(InitError::InitialFetch(SensorError::Bus(PlatformError::I2c(
                I2cError::Nack
            ))))
        );
        // Never reaches green
        assert!(!probe.writes().contains(&(1, true)));
    }

    #[tokio::test]
    async fn test_supply_enabled_before_sensor_check() {
        let probe = LineProbe::new();
        let mut delay = MockDelay::new();
        let board = Board {
            leds: probed_leds(&probe),
            supply: Some(MockGpio::new_input().with_probe(&probe, 9)),
            sensor: MockSensor::new(),
        };

        let init = initialize(board, leaked_relay(), &AppParams::default(), &mut delay)
            .await
            .unwrap();

        let expected: [(u8, bool); 4] = [(0, true), (9, true), (0, false), (1, true)];
        assert_eq!(probe.writes(), expected);
        assert!(init.supply.map(|line| line.read()).unwrap_or(false));
        assert_eq!(delay.elapsed_ms(), u64::from(SUPPLY_SETTLE_MS) + 500);
    }

    #[tokio::test]
    async fn test_supply_failures() {
        let board = Board {
            leds: probed_leds(&LineProbe::new()),
            supply: Some(MockGpio::new_input().not_ready()),
            sensor: MockSensor::new(),
        };
        let result = initialize(board, leaked_relay(), &AppParams::default(), &mut MockDelay::new()).await;
        assert_eq!(result.err(), Some(InitError::SupplyNotReady));

        let board = Board {
            leds: probed_leds(&LineProbe::new()),
            supply: Some(MockGpio::new_input().failing_configure()),
            sensor: MockSensor::new(),
        };
        let result = initialize(board, leaked_relay(), &AppParams::default(), &mut MockDelay::new()).await;
        assert_eq!(
            result.err(),
            Some(InitError::SupplyConfigure(PlatformError::Gpio(
                GpioError::HardwareError
            )))
        );
    }
}
