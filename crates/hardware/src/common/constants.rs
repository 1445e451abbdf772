//! Machine constants for the APEX core.
//!
//! These values fix the architectural shape of the machine. Run-time tunables
//! (memory size, program counter base, cycle budget) live in [`crate::config`]
//! and default to the values below.

/// Number of general-purpose registers (`R0`..`R15`).
pub const NUM_REGS: usize = 16;

/// Distance between consecutive instructions in the program address space, in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Program counter of the first instruction in the instruction store.
pub const PC_BASE: u32 = 4000;

/// Data memory capacity in words.
pub const DATA_MEMORY_WORDS: usize = 4000;

/// Number of data memory words shown in the final-state report.
pub const MEMORY_DISPLAY_WORDS: usize = 100;
