//! Application Parameter Definitions
//!
//! Build-time parameters for the sampling and reporting loop.
//!
//! # Parameters
//!
//! - `IMU_REPORT_INTERVAL_MS` - Reporting cycle period (default 1000)
//! - `IMU_ODR_HZ` - Accelerometer and gyroscope output data rate, decimal Hz (default 104)
//! - `IMU_READY_HOLD_MS` - How long green is shown before sampling starts (default 500)
//! - `IMU_SAMPLING_MODE` - `push` (data-ready trigger) or `pull` (fetch per cycle), default `push`
//!
//! Values are baked in by `build.rs`. A value that does not parse falls back
//! to its default.
//!
//! # Example
//!
//! ```ignore
//! use imu_relay::parameters::AppParams;
//!
//! let params = AppParams::from_env();
//! ```

use crate::devices::traits::SensorValue;
use core::fmt;

/// Default reporting period
pub const DEFAULT_REPORT_INTERVAL_MS: u32 = 1000;

/// Default output data rate
pub const DEFAULT_ODR_HZ: SensorValue = SensorValue::from_int(104);

/// Default ready-color hold
pub const DEFAULT_READY_HOLD_MS: u32 = 500;

/// How capture events reach the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum SamplingMode {
    /// The sensor's data-ready trigger drives capture
    #[default]
    Push,
    /// The reporter fetches inline after each capture request
    Pull,
}

impl SamplingMode {
    /// Parse `push` or `pull` (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("push") {
            Some(SamplingMode::Push)
        } else if s.eq_ignore_ascii_case("pull") {
            Some(SamplingMode::Pull)
        } else {
            None
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingMode::Push => write!(f, "push"),
            SamplingMode::Pull => write!(f, "pull"),
        }
    }
}

/// Application parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppParams {
    /// Reporting cycle period in milliseconds
    pub report_interval_ms: u32,
    /// Output data rate for both channel groups
    pub odr_hz: SensorValue,
    /// Ready-color hold in milliseconds
    pub ready_hold_ms: u32,
    /// Capture strategy
    pub sampling_mode: SamplingMode,
}

impl Default for AppParams {
    fn default() -> Self {
        Self {
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            odr_hz: DEFAULT_ODR_HZ,
            ready_hold_ms: DEFAULT_READY_HOLD_MS,
            sampling_mode: SamplingMode::Push,
        }
    }
}

impl AppParams {
    /// Load parameters from build-time environment variables
    pub fn from_env() -> Self {
        Self::from_strs(
            env!("IMU_REPORT_INTERVAL_MS"),
            env!("IMU_ODR_HZ"),
            env!("IMU_READY_HOLD_MS"),
            env!("IMU_SAMPLING_MODE"),
        )
    }

    /// Parse parameters from their string forms, falling back per field
    pub fn from_strs(report_interval_ms: &str, odr_hz: &str, ready_hold_ms: &str, mode: &str) -> Self {
        let report_interval_ms = match report_interval_ms.trim().parse::<u32>() {
            Ok(ms) if ms > 0 => ms,
            _ => {
                crate::log_warn!("Invalid IMU_REPORT_INTERVAL_MS, using default");
                DEFAULT_REPORT_INTERVAL_MS
            }
        };

        let odr_hz = match parse_decimal(odr_hz) {
            Some(hz) if hz.to_micros() > 0 => hz,
            _ => {
                crate::log_warn!("Invalid IMU_ODR_HZ, using default");
                DEFAULT_ODR_HZ
            }
        };

        let ready_hold_ms = ready_hold_ms.trim().parse::<u32>().unwrap_or_else(|_| {
            crate::log_warn!("Invalid IMU_READY_HOLD_MS, using default");
            DEFAULT_READY_HOLD_MS
        });

        let sampling_mode = SamplingMode::parse(mode).unwrap_or_else(|| {
            crate::log_warn!("Invalid IMU_SAMPLING_MODE, using push");
            SamplingMode::Push
        });

        Self {
            report_interval_ms,
            odr_hz,
            ready_hold_ms,
            sampling_mode,
        }
    }
}

/// Parse an unsigned decimal such as `104` or `12.5` into a sensor value
///
/// At most six fractional digits are accepted.
fn parse_decimal(s: &str) -> Option<SensorValue> {
    let s = s.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if int_part.is_empty() || frac_part.len() > 6 {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    // whole part must fit `SensorValue::val1`
    let whole = int_part.parse::<i32>().ok()?;
    let mut micros: i64 = 0;
    let mut scale = 100_000;
    for digit in frac_part.bytes() {
        micros += i64::from(digit - b'0') * scale;
        scale /= 10;
    }

    Some(SensorValue::from_micros(i64::from(whole) * 1_000_000 + micros))
}
