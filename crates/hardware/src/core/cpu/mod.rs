//! CPU architectural state.
//!
//! This module defines the `Cpu` structure, the simulator context handed to every stage
//! call. It holds:
//! 1. **Registers:** The register file with its scoreboard, the program counter and the zero flag.
//! 2. **Memory:** Word-indexed data memory, separate from the instruction store.
//! 3. **Run bookkeeping:** The clock, the completion counter, the halt signal and statistics.
//!
//! Nothing here outlives one simulation run; a new `Cpu` is built for every `Simulator`.

/// Word-indexed data memory.
pub mod memory;

use crate::common::RegisterFile;
use crate::common::error::SimResult;
use crate::config::Config;
use crate::stats::SimStats;

pub use self::memory::DataMemory;

/// Architectural and run state visited by the stage functions.
#[derive(Debug)]
pub struct Cpu {
    /// General-purpose registers and their valid bits.
    pub regs: RegisterFile,
    /// Data memory.
    pub memory: DataMemory,
    /// Address of the next instruction Fetch will read.
    pub pc: u32,
    /// Program counter of instruction index 0.
    pub pc_base: u32,
    /// Set when the latest qualifying arithmetic result was zero.
    pub zero_flag: bool,
    /// Cycles simulated so far.
    pub clock: u64,
    /// Completion counter: retirements plus halt-drain bookkeeping.
    pub instructions_completed: u64,
    /// Number of instructions in the loaded program.
    pub program_len: u64,
    /// Raised by Writeback when HALT retires.
    pub halted: bool,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Builds the reset state for a program of `program_len` instructions.
    ///
    /// Applies the configured memory preload. Fails if a preload address lies outside
    /// data memory.
    pub fn new(config: &Config, program_len: usize) -> SimResult<Self> {
        let mut memory = DataMemory::new(config.memory.size_words);
        for word in &config.memory.preload {
            memory.poke(word.address, word.value)?;
        }
        Ok(Self {
            regs: RegisterFile::new(),
            memory,
            pc: config.pipeline.pc_base,
            pc_base: config.pipeline.pc_base,
            zero_flag: config.pipeline.initial_zero_flag,
            clock: 0,
            instructions_completed: 0,
            program_len: program_len as u64,
            halted: false,
            stats: SimStats::default(),
        })
    }
}
