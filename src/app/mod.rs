//! Application
//!
//! Wires the subsystems into the firmware's lifecycle:
//!
//! - [`startup::initialize`]: LED lines, sensor power and readiness, output
//!   data rate, trigger, priming fetch
//! - [`report::Reporter`]: the steady-state reporting loop
//! - [`capture`]: push (trigger-driven) or pull (fetch per cycle) capture
//!
//! # Usage
//!
//! ```ignore
//! static RELAY: SampleRelay = SampleRelay::new();
//!
//! let params = AppParams::from_env();
//! let init = initialize(board, &RELAY, &params, &mut delay).await?;
//! let mut reporter = Reporter::new(init.indicator, &RELAY, PullCapture::new(init.sensor), console);
//! reporter.run(&mut delay, params.report_interval_ms).await;
//! ```

pub mod capture;
pub mod error;
pub mod report;
pub mod startup;

pub use crate::parameters::SamplingMode;
pub use capture::{CaptureStrategy, PullCapture, PushCapture};
pub use error::{InitError, StartupPhase};
pub use report::{render, Reporter};
pub use startup::{initialize, Board, Initialized};
