//! Final architectural state.
//!
//! A [`FinalState`] is a snapshot taken after the clock loop stops. It renders as the
//! classic register and memory table via `Display` and serializes to JSON for tooling.

use std::fmt;

use serde::Serialize;

use super::simulator::RunState;
use crate::common::constants::MEMORY_DISPLAY_WORDS;
use crate::common::error::SimResult;

/// Registers, scoreboard bits, memory and counters at the end of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinalState {
    /// Why the run stopped.
    pub state: RunState,
    /// Cycles simulated.
    pub cycles: u64,
    /// Completion counter.
    pub instructions_completed: u64,
    /// Zero flag.
    pub zero_flag: bool,
    /// Register values, `R0` first.
    pub registers: Vec<i32>,
    /// Register valid bits, `R0` first.
    pub valid: Vec<bool>,
    /// Every data memory word, address order.
    pub memory: Vec<i32>,
}

impl FinalState {
    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for FinalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=============== STATE OF ARCHITECTURAL REGISTER FILE =========="
        )?;
        for (i, (value, valid)) in self.registers.iter().zip(&self.valid).enumerate() {
            let status = if *valid { "VALID" } else { "INVALID" };
            writeln!(f, "|  REG[{i:02}]  |  Value = {value:<10}|  Status = {status:<8}|")?;
        }
        writeln!(f)?;
        writeln!(f, "============== STATE OF DATA MEMORY =============")?;
        for (i, value) in self.memory.iter().take(MEMORY_DISPLAY_WORDS).enumerate() {
            writeln!(f, "|  MEM[{i:02}]  |  Data Value = {value:<10}|")?;
        }
        writeln!(f)?;
        write!(
            f,
            "{:?} after {} cycles, {} instructions completed, zero flag {}",
            self.state,
            self.cycles,
            self.instructions_completed,
            if self.zero_flag { "set" } else { "clear" }
        )
    }
}
