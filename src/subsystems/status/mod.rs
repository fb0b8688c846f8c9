//! Status Indicator
//!
//! Drives a tri-color LED from three independent digital lines to show the
//! lifecycle phase: red while initializing, green when ready, blue while a
//! reporting cycle is sampling, off between cycles.
//!
//! Target levels for all three lines are computed before any line is driven.
//! Lines that go low are driven before lines that go high, so a transition
//! passes through black rather than a mixed color, and lines already at their
//! target level are not touched.

use crate::platform::traits::{GpioInterface, GpioMode};
use crate::platform::PlatformError;
use core::fmt;

/// One of the three LED lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum LedLine {
    Red,
    Green,
    Blue,
}

impl LedLine {
    /// Lines in array order
    pub const ALL: [LedLine; 3] = [LedLine::Red, LedLine::Green, LedLine::Blue];

    /// Index into the line array
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedLine::Red => write!(f, "led red"),
            LedLine::Green => write!(f, "led green"),
            LedLine::Blue => write!(f, "led blue"),
        }
    }
}

/// Indicator color, one per lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum StatusColor {
    /// All lines inactive
    #[default]
    Off,
    /// Red: bringing up lines and sensor
    Initializing,
    /// Green: initialization complete
    Ready,
    /// Blue: reporting cycle in progress
    Sampling,
}

impl StatusColor {
    /// Line levels as `[red, green, blue]`
    pub const fn levels(self) -> [bool; 3] {
        match self {
            StatusColor::Off => [false, false, false],
            StatusColor::Initializing => [true, false, false],
            StatusColor::Ready => [false, true, false],
            StatusColor::Sampling => [false, false, true],
        }
    }
}

/// Line bring-up failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum StatusError {
    /// Port controller behind the line is not ready
    LineNotReady(LedLine),
    /// Line could not be configured as an output
    LineConfigure(LedLine, PlatformError),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::LineNotReady(line) => write!(f, "{}: not ready", line),
            StatusError::LineConfigure(line, e) => {
                write!(f, "{}: cannot configure as output: {}", line, e)
            }
        }
    }
}

/// Tri-color status LED
pub struct StatusIndicator<G: GpioInterface> {
    lines: [G; 3],
    levels: [bool; 3],
    color: StatusColor,
}

impl<G: GpioInterface> StatusIndicator<G> {
    /// Check and configure the red, green and blue lines
    ///
    /// Every line must report ready before any is configured. Lines are
    /// configured as outputs in the inactive state, so the indicator starts
    /// out `Off`.
    pub fn configure(mut lines: [G; 3]) -> Result<Self, StatusError> {
        for line in LedLine::ALL {
            if !lines[line.index()].is_ready() {
                crate::log_error!("{}: not ready", line);
                return Err(StatusError::LineNotReady(line));
            }
        }

        for line in LedLine::ALL {
            lines[line.index()]
                .set_mode(GpioMode::OutputPushPull)
                .map_err(|e| {
                    crate::log_error!("{}: cannot configure as output", line);
                    StatusError::LineConfigure(line, e)
                })?;
        }

        Ok(Self {
            lines,
            levels: [false; 3],
            color: StatusColor::Off,
        })
    }

    /// Show `color`
    ///
    /// Write failures are logged and otherwise ignored; a line whose write
    /// failed is retried on the next call.
    pub fn set_color(&mut self, color: StatusColor) {
        let targets = color.levels();

        // Falling lines first, then rising lines
        for rising in [false, true] {
            for line in LedLine::ALL {
                let i = line.index();
                if targets[i] != rising || self.levels[i] == targets[i] {
                    continue;
                }
                match self.lines[i].set_level(targets[i]) {
                    Ok(()) => self.levels[i] = targets[i],
                    Err(e) => crate::log_warn!("{}: write failed: {}", line, e),
                }
            }
        }

        self.color = color;
    }

    /// Color most recently requested
    pub fn color(&self) -> StatusColor {
        self.color
    }

    /// Give back the lines
    pub fn release(self) -> [G; 3] {
        self.lines
    }
}
