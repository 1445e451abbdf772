//! Data memory.
//!
//! A flat array of 32-bit words indexed by the effective address Execute-1 computes.
//! Only Memory-1 reads or writes it during a run; an address outside the array aborts
//! the run with [`SimError::AddressOutOfBounds`].

use crate::common::error::{SimError, SimResult};

/// Word-indexed data store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates `size` zeroed words.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
        }
    }

    /// Capacity in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the memory has no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn index(&self, address: i32, pc: u32) -> SimResult<usize> {
        usize::try_from(address)
            .ok()
            .filter(|i| *i < self.words.len())
            .ok_or(SimError::AddressOutOfBounds {
                pc,
                address,
                limit: self.words.len(),
            })
    }

    /// Loads the word at `address` on behalf of the instruction at `pc`.
    pub fn read(&self, address: i32, pc: u32) -> SimResult<i32> {
        let i = self.index(address, pc)?;
        Ok(self.words[i])
    }

    /// Stores `value` at `address` on behalf of the instruction at `pc`.
    pub fn write(&mut self, address: i32, value: i32, pc: u32) -> SimResult<()> {
        let i = self.index(address, pc)?;
        self.words[i] = value;
        Ok(())
    }

    /// Seeds a word outside of pipeline execution (preload, tests).
    pub fn poke(&mut self, index: usize, value: i32) -> SimResult<()> {
        let limit = self.words.len();
        let slot = self
            .words
            .get_mut(index)
            .ok_or_else(|| SimError::InvalidConfig(format!(
                "memory word {index} outside memory of {limit} words"
            )))?;
        *slot = value;
        Ok(())
    }

    /// All words, address order.
    pub fn words(&self) -> &[i32] {
        &self.words
    }
}
