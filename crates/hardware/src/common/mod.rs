//! Shared definitions used across the simulator.
//!
//! 1. **Constants:** Register count, instruction size, program counter base and memory capacity.
//! 2. **Errors:** The crate-wide `SimError` type and `SimResult` alias.
//! 3. **Registers:** The general-purpose register file and its scoreboard bits.

/// Machine-wide constants.
pub mod constants;
/// Error taxonomy for loading, configuration and runtime faults.
pub mod error;
/// General-purpose register file with validity scoreboard.
pub mod reg;

pub use error::{SimError, SimResult};
pub use reg::RegisterFile;
