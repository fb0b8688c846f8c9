//! Mock I2C implementation for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Emulates a single device with a 128-byte register file and auto-increment
/// addressing: the first written byte selects the register, later bytes fill
/// consecutive registers, and reads continue from the selected register.
/// All transactions are recorded for test verification.
#[derive(Debug)]
pub struct MockI2c {
    config: I2cConfig,
    device_addr: u8,
    registers: [u8; 128],
    transactions: Vec<I2cTransaction>,
    nack: bool,
}

impl MockI2c {
    /// Create a new mock bus with one device at `device_addr`
    pub fn new(config: I2cConfig, device_addr: u8) -> Self {
        Self {
            config,
            device_addr,
            registers: [0; 128],
            transactions: Vec::new(),
            nack: false,
        }
    }

    /// Preload a register
    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.registers[usize::from(reg & 0x7F)] = value;
    }

    /// Preload consecutive registers starting at `reg`
    pub fn set_registers(&mut self, reg: u8, values: &[u8]) {
        for (offset, value) in values.iter().enumerate() {
            self.set_register(reg.wrapping_add(offset as u8), *value);
        }
    }

    /// Current register content
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[usize::from(reg & 0x7F)]
    }

    /// Make every following transaction fail with a NACK
    pub fn set_nack(&mut self, nack: bool) {
        self.nack = nack;
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Get current frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn check_addr(&self, addr: u8) -> Result<()> {
        if self.nack || addr != self.device_addr {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });
        self.check_addr(addr)?;

        if let Some((reg, values)) = data.split_first() {
            self.set_registers(*reg, values);
        }
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });
        self.check_addr(addr)?;

        let start = write_data.first().copied().unwrap_or(0);
        for (offset, byte) in read_buffer.iter_mut().enumerate() {
            *byte = self.register(start.wrapping_add(offset as u8));
        }
        Ok(())
    }
}
