//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

/// Shared write log for a bank of mock lines
///
/// Every successful `set_high`/`set_low` on a probed [`MockGpio`] is appended
/// as `(line_id, level)`, so tests can replay the exact order in which lines
/// were driven.
#[derive(Debug, Clone, Default)]
pub struct LineProbe {
    writes: Rc<RefCell<Vec<(u8, bool)>>>,
}

impl LineProbe {
    /// Create an empty probe
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded writes, oldest first
    pub fn writes(&self) -> Vec<(u8, bool)> {
        self.writes.borrow().clone()
    }

    /// Number of recorded writes
    pub fn len(&self) -> usize {
        self.writes.borrow().len()
    }

    /// Whether no write has been recorded
    pub fn is_empty(&self) -> bool {
        self.writes.borrow().is_empty()
    }

    fn record(&self, line: u8, high: bool) {
        self.writes.borrow_mut().push((line, high));
    }
}

/// Mock GPIO implementation
///
/// Tracks pin state (high/low) and mode for test verification, and can be
/// told to report "not ready" or to reject configuration.
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    mode: GpioMode,
    ready: bool,
    fail_configure: bool,
    probe: Option<(LineProbe, u8)>,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode
    pub fn new_output() -> Self {
        Self {
            state: false,
            mode: GpioMode::OutputPushPull,
            ready: true,
            fail_configure: false,
            probe: None,
        }
    }

    /// Create a new mock GPIO in input mode (as after reset)
    pub fn new_input() -> Self {
        Self {
            mode: GpioMode::Input,
            ..Self::new_output()
        }
    }

    /// Report the port controller as not ready
    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    /// Reject every `set_mode` call
    pub fn failing_configure(mut self) -> Self {
        self.fail_configure = true;
        self
    }

    /// Record writes to `probe` under `line_id`
    pub fn with_probe(mut self, probe: &LineProbe, line_id: u8) -> Self {
        self.probe = Some((probe.clone(), line_id));
        self
    }

    fn drive(&mut self, high: bool) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull => {
                self.state = high;
                if let Some((probe, id)) = &self.probe {
                    probe.record(*id, high);
                }
                Ok(())
            }
            GpioMode::Input => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }
}

impl GpioInterface for MockGpio {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_high(&mut self) -> Result<()> {
        self.drive(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.drive(false)
    }

    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        if self.fail_configure {
            return Err(PlatformError::Gpio(GpioError::HardwareError));
        }
        self.mode = mode;
        if mode == GpioMode::OutputPushPull {
            self.state = false;
        }
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
