//! Configuration system for the APEX simulator.
//!
//! This module defines the run parameters. It provides:
//! 1. **Defaults:** Baseline machine constants (PC base, memory size, cycle budget).
//! 2. **Structures:** Hierarchical config for general, pipeline and memory settings.
//! 3. **Validation:** Rejection of parameters the engine cannot run with.
//!
//! Configuration is read from JSON (`Config::from_json`); every field is optional and falls
//! back to `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{DATA_MEMORY_WORDS, INSTRUCTION_SIZE, PC_BASE};
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Upper bound on simulated cycles when the caller does not supply one.
    pub const CYCLE_BUDGET: u64 = 1000;

    /// Program counter of the first instruction.
    pub const PC_BASE: u32 = super::PC_BASE;

    /// Data memory capacity in words.
    pub const MEMORY_WORDS: usize = super::DATA_MEMORY_WORDS;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use apex_pipe_core::config::Config;
///
/// let config = Config::from_json(r#"{
///     "general": { "cycle_budget": 50 },
///     "memory": { "preload": [ { "address": 3, "value": 42 } ] }
/// }"#).unwrap();
/// assert_eq!(config.general.cycle_budget, 50);
/// assert_eq!(config.pipeline.pc_base, 4000);
/// assert_eq!(config.memory.size_words, 4000);
/// assert_eq!(config.memory.preload[0].value, 42);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline reset state.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Data memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the cycle budget replaced.
    #[must_use]
    pub fn with_cycle_budget(mut self, cycles: u64) -> Self {
        self.general.cycle_budget = cycles;
        self
    }

    /// Checks that the engine can run with these parameters.
    pub fn validate(&self) -> SimResult<()> {
        if self.general.cycle_budget == 0 {
            return Err(SimError::InvalidConfig(
                "cycle_budget must be at least 1".into(),
            ));
        }
        if self.pipeline.pc_base % INSTRUCTION_SIZE != 0 {
            return Err(SimError::InvalidConfig(format!(
                "pc_base {} is not a multiple of {INSTRUCTION_SIZE}",
                self.pipeline.pc_base
            )));
        }
        if self.memory.size_words == 0 {
            return Err(SimError::InvalidConfig("memory size_words must be non-zero".into()));
        }
        if let Some(word) = self
            .memory
            .preload
            .iter()
            .find(|w| w.address >= self.memory.size_words)
        {
            return Err(SimError::InvalidConfig(format!(
                "preload address {} outside memory of {} words",
                word.address, self.memory.size_words
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Maximum number of cycles to simulate.
    #[serde(default = "GeneralConfig::default_cycle_budget")]
    pub cycle_budget: u64,
    /// Print per-cycle stage contents.
    #[serde(default)]
    pub trace_stages: bool,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    const fn default_cycle_budget() -> u64 {
        defaults::CYCLE_BUDGET
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cycle_budget: defaults::CYCLE_BUDGET,
            trace_stages: false,
        }
    }
}

/// Pipeline reset state.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Program counter of instruction index 0.
    #[serde(default = "PipelineConfig::default_pc_base")]
    pub pc_base: u32,
    /// Zero flag value before the first cycle.
    #[serde(default)]
    pub initial_zero_flag: bool,
}

impl PipelineConfig {
    /// Returns the default program counter base.
    const fn default_pc_base() -> u32 {
        defaults::PC_BASE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pc_base: defaults::PC_BASE,
            initial_zero_flag: false,
        }
    }
}

/// Data memory settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Capacity in words.
    #[serde(default = "MemoryConfig::default_size_words")]
    pub size_words: usize,
    /// Words written before the first cycle.
    #[serde(default)]
    pub preload: Vec<MemoryWord>,
}

impl MemoryConfig {
    /// Returns the default memory capacity.
    const fn default_size_words() -> usize {
        defaults::MEMORY_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_words: defaults::MEMORY_WORDS,
            preload: Vec::new(),
        }
    }
}

/// One preloaded data memory word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryWord {
    /// Word index.
    pub address: usize,
    /// Initial value.
    pub value: i32,
}
