//! Startup error types

use crate::devices::traits::{ChannelGroup, SensorError};
use crate::platform::PlatformError;
use crate::subsystems::status::{LedLine, StatusError};
use core::fmt;

/// Lifecycle phase of the firmware
///
/// Phases advance linearly; a failure stops in the phase where it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum StartupPhase {
    /// Nothing touched yet
    Uninitialized,
    /// Checking and configuring the LED lines
    Configuring,
    /// Red shown; powering and checking the sensor
    Initializing,
    /// Programming the output data rate
    ConfiguringSensor,
    /// Registering the data-ready trigger and priming the first sample
    Arming,
    /// Green shown; initialization complete
    Ready,
    /// Steady-state reporting loop
    Sampling,
}

impl fmt::Display for StartupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartupPhase::Uninitialized => "uninitialized",
            StartupPhase::Configuring => "configuring",
            StartupPhase::Initializing => "initializing",
            StartupPhase::ConfiguringSensor => "configuring sensor",
            StartupPhase::Arming => "arming",
            StartupPhase::Ready => "ready",
            StartupPhase::Sampling => "sampling",
        };
        write!(f, "{}", name)
    }
}

/// Fatal startup failure
///
/// Each variant stops the startup sequence; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum InitError {
    /// LED line's port controller not ready
    LineNotReady(LedLine),

    /// LED line could not be configured as an output
    LineConfigure(LedLine, PlatformError),

    /// Sensor supply-enable line not ready
    SupplyNotReady,

    /// Sensor supply-enable line could not be driven
    SupplyConfigure(PlatformError),

    /// Sensor absent or driver not ready
    SensorNotReady(&'static str),

    /// Output data rate rejected for a channel group
    SamplingFrequency(ChannelGroup, SensorError),

    /// Data-ready trigger could not be registered
    TriggerRegistration(SensorError),

    /// Priming fetch failed
    InitialFetch(SensorError),
}

impl InitError {
    /// Phase in which the failure occurred
    pub fn phase(&self) -> StartupPhase {
        match self {
            InitError::LineNotReady(_) | InitError::LineConfigure(..) => StartupPhase::Configuring,
            InitError::SupplyNotReady
            | InitError::SupplyConfigure(_)
            | InitError::SensorNotReady(_) => StartupPhase::Initializing,
            InitError::SamplingFrequency(..) => StartupPhase::ConfiguringSensor,
            InitError::TriggerRegistration(_) | InitError::InitialFetch(_) => StartupPhase::Arming,
        }
    }
}

impl From<StatusError> for InitError {
    fn from(error: StatusError) -> Self {
        match error {
            StatusError::LineNotReady(line) => InitError::LineNotReady(line),
            StatusError::LineConfigure(line, e) => InitError::LineConfigure(line, e),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::LineNotReady(line) => write!(f, "{}: not ready", line),
            InitError::LineConfigure(line, e) => {
                write!(f, "{}: cannot configure as output: {}", line, e)
            }
            InitError::SupplyNotReady => write!(f, "sensor supply: not ready"),
            InitError::SupplyConfigure(e) => write!(f, "sensor supply: cannot enable: {}", e),
            InitError::SensorNotReady(name) => write!(f, "{}: not ready", name),
            InitError::SamplingFrequency(group, e) => {
                let target = match group {
                    ChannelGroup::AccelXyz => "accelerometer",
                    ChannelGroup::GyroXyz => "gyroscope",
                    ChannelGroup::All => "all channels",
                };
                write!(f, "Cannot set sampling frequency for {}: {}", target, e)
            }
            InitError::TriggerRegistration(e) => write!(f, "Could not set trigger: {}", e),
            InitError::InitialFetch(e) => write!(f, "Initial sample fetch failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::GpioError;

    #[test]
    fn test_phase_mapping() {
        assert_eq!(
            InitError::LineNotReady(LedLine::Blue).phase(),
            StartupPhase::Configuring
        );
        assert_eq!(
            InitError::SensorNotReady("lsm6dsl").phase(),
            StartupPhase::Initializing
        );
        assert_eq!(
            InitError::SamplingFrequency(ChannelGroup::GyroXyz, SensorError::InvalidValue).phase(),
            StartupPhase::ConfiguringSensor
        );
        assert_eq!(
            InitError::InitialFetch(SensorError::NotReady).phase(),
            StartupPhase::Arming
        );
    }

    #[test]
    fn test_phases_are_ordered() {
        assert!(StartupPhase::Uninitialized < StartupPhase::Configuring);
        assert!(StartupPhase::Arming < StartupPhase::Ready);
        assert!(StartupPhase::Ready < StartupPhase::Sampling);
    }

    #[test]
    fn test_from_status_error() {
        let e = PlatformError::Gpio(GpioError::HardwareError);
        assert_eq!(
            InitError::from(StatusError::LineConfigure(LedLine::Red, e)),
            InitError::LineConfigure(LedLine::Red, e)
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            format!("{}", InitError::SensorNotReady("lsm6dsl")),
            "lsm6dsl: not ready"
        );
        assert_eq!(
            format!("{}", InitError::LineNotReady(LedLine::Green)),
            "led green: not ready"
        );
        assert_eq!(
            format!(
                "{}",
                InitError::SamplingFrequency(ChannelGroup::AccelXyz, SensorError::InvalidValue)
            ),
            "Cannot set sampling frequency for accelerometer: invalid value"
        );
    }
}
