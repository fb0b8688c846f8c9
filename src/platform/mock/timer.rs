//! Mock delay implementation for testing

use embedded_hal_async::delay::DelayNs;

/// Mock delay
///
/// Completes immediately and accumulates the requested time so tests can
/// assert on how long the code under test asked to wait.
#[derive(Debug, Default)]
pub struct MockDelay {
    elapsed_ns: u64,
    calls: u32,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in nanoseconds
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// Total requested delay in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    /// Number of delay requests
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns = self.elapsed_ns.wrapping_add(u64::from(ns));
        self.calls += 1;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns = self
            .elapsed_ns
            .wrapping_add(u64::from(ms).saturating_mul(1_000_000));
        self.calls += 1;
    }
}
