//! Console sink over defmt RTT
//!
//! Buffers text until a newline and emits each completed line as one defmt
//! print, so a report line is never interleaved with log output.

use core::fmt;
use heapless::String;

/// Longest line kept before a forced flush
const LINE_CAPACITY: usize = 128;

/// `core::fmt::Write` sink that forwards complete lines to defmt
#[derive(Default)]
pub struct DefmtConsole {
    line: String<LINE_CAPACITY>,
}

impl DefmtConsole {
    /// Create an empty console
    pub const fn new() -> Self {
        Self {
            line: String::new(),
        }
    }

    fn flush(&mut self) {
        defmt::println!("{=str}", self.line.as_str());
        self.line.clear();
    }
}

impl fmt::Write for DefmtConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if c == '\n' {
                self.flush();
                continue;
            }
            if self.line.push(c).is_err() {
                self.flush();
                self.line.push(c).map_err(|_| fmt::Error)?;
            }
        }
        Ok(())
    }
}
