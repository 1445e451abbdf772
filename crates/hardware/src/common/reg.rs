//! General-purpose register file with a validity scoreboard.
//!
//! Each of the sixteen registers carries a value and a valid bit. A register is invalid
//! exactly while an issued instruction holds it as its pending destination; Writeback
//! commits the new value and sets the bit again.

use super::constants::NUM_REGS;
use super::error::{SimError, SimResult};

/// Register values plus one "value ready" bit per register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    values: [i32; NUM_REGS],
    valid: [bool; NUM_REGS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with every register zero and valid.
    pub const fn new() -> Self {
        Self {
            values: [0; NUM_REGS],
            valid: [true; NUM_REGS],
        }
    }

    fn slot(index: usize) -> SimResult<usize> {
        if index < NUM_REGS {
            Ok(index)
        } else {
            Err(SimError::RegisterOutOfRange {
                index,
                limit: NUM_REGS,
            })
        }
    }

    /// Reads the current value of register `index`, ignoring its valid bit.
    pub fn read(&self, index: usize) -> SimResult<i32> {
        Ok(self.values[Self::slot(index)?])
    }

    /// Clears the valid bit of `index`; an issued instruction now owns its next value.
    pub fn mark_pending(&mut self, index: usize) -> SimResult<()> {
        self.valid[Self::slot(index)?] = false;
        Ok(())
    }

    /// Writes `value` to register `index` and sets its valid bit.
    pub fn commit(&mut self, index: usize, value: i32) -> SimResult<()> {
        let i = Self::slot(index)?;
        self.values[i] = value;
        self.valid[i] = true;
        Ok(())
    }

    /// Returns whether register `index` holds a committed value.
    ///
    /// Indices outside the file are never ready; instruction operands are range-checked
    /// at load time, so the engine never asks.
    pub fn is_ready(&self, index: usize) -> bool {
        self.valid.get(index).copied().unwrap_or(false)
    }

    /// All register values, indexed by register number.
    pub const fn values(&self) -> &[i32; NUM_REGS] {
        &self.values
    }

    /// All valid bits, indexed by register number.
    pub const fn valid_bits(&self) -> &[bool; NUM_REGS] {
        &self.valid
    }

    /// Number of registers currently awaiting a Writeback commit.
    pub fn pending_count(&self) -> usize {
        self.valid.iter().filter(|v| !**v).count()
    }
}
