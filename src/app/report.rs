//! Reporting loop
//!
//! Each cycle shows blue, requests a capture, lets the capture strategy run,
//! prints the latest snapshot, and turns the indicator off. The loop then
//! sleeps for the reporting interval. The printed snapshot may be up to one
//! interval old when no capture event arrived in time.

use super::capture::CaptureStrategy;
use super::error::StartupPhase;
use crate::platform::traits::GpioInterface;
use crate::subsystems::relay::{SampleRelay, SensorSnapshot};
use crate::subsystems::status::{StatusColor, StatusIndicator};
use core::fmt;
use embedded_hal_async::delay::DelayNs;

/// Clear screen and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Print one snapshot: clear screen, then an accel line and a gyro line
pub fn render<W: fmt::Write>(snapshot: &SensorSnapshot, out: &mut W) -> fmt::Result {
    out.write_str(CLEAR_SCREEN)?;
    writeln!(
        out,
        "accel x:{:.6} ms/2 y:{:.6} ms/2 z:{:.6} ms/2",
        snapshot.accel_x(),
        snapshot.accel_y(),
        snapshot.accel_z()
    )?;
    writeln!(
        out,
        "gyro x:{:.6} dps y:{:.6} dps z:{:.6} dps",
        snapshot.gyro_x(),
        snapshot.gyro_y(),
        snapshot.gyro_z()
    )
}

/// Steady-state reporter
pub struct Reporter<'a, G: GpioInterface, C: CaptureStrategy, W: fmt::Write> {
    indicator: StatusIndicator<G>,
    relay: &'a SampleRelay,
    capture: C,
    out: W,
    cycles: u32,
}

impl<'a, G, C, W> Reporter<'a, G, C, W>
where
    G: GpioInterface,
    C: CaptureStrategy,
    W: fmt::Write,
{
    pub fn new(indicator: StatusIndicator<G>, relay: &'a SampleRelay, capture: C, out: W) -> Self {
        Self {
            indicator,
            relay,
            capture,
            out,
            cycles: 0,
        }
    }

    /// Run one reporting cycle and return the snapshot it printed
    pub fn run_cycle(&mut self) -> SensorSnapshot {
        self.indicator.set_color(StatusColor::Sampling);

        self.relay.request_capture();
        self.capture.after_request(self.relay);

        let snapshot = self.relay.read_snapshot();
        if render(&snapshot, &mut self.out).is_err() {
            crate::log_warn!("console write failed");
        }

        self.indicator.set_color(StatusColor::Off);
        self.cycles = self.cycles.wrapping_add(1);
        snapshot
    }

    /// Run `count` cycles, sleeping `interval_ms` after each
    pub async fn run_cycles<D: DelayNs>(&mut self, delay: &mut D, interval_ms: u32, count: u32) {
        for _ in 0..count {
            self.run_cycle();
            delay.delay_ms(interval_ms).await;
        }
    }

    /// Report forever
    pub async fn run<D: DelayNs>(&mut self, delay: &mut D, interval_ms: u32) -> ! {
        crate::log_info!("Sampling every {} ms", interval_ms);
        loop {
            self.run_cycle();
            delay.delay_ms(interval_ms).await;

            if self.cycles % 60 == 0 {
                let stats = self.relay.stats();
                crate::log_debug!(
                    "relay: {} events, {} commits, {} failures",
                    stats.events,
                    stats.commits,
                    stats.failures
                );
            }
        }
    }

    /// Lifecycle phase of a running reporter
    pub fn phase(&self) -> StartupPhase {
        StartupPhase::Sampling
    }

    /// Completed cycles
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn indicator(&self) -> &StatusIndicator<G> {
        &self.indicator
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }
}
