//! APEX pipeline simulator library.
//!
//! This crate implements a cycle-accurate model of the in-order APEX pipeline with the following:
//! 1. **Core:** Seven stage transition functions (Fetch through Writeback) over per-stage latches,
//!    a register scoreboard, the zero flag, and word-indexed data memory.
//! 2. **Hazards:** Decode-time RAW detection, branch holds, back-pressure ripple and halt-drain.
//! 3. **ISA:** The closed APEX opcode set, instruction records and the text assembler.
//! 4. **Simulation:** Program loading, the clock loop, run configuration and statistics.

/// Common types and constants (register file, errors, machine constants).
pub mod common;
/// Simulator configuration (defaults and JSON-deserializable structures).
pub mod config;
/// CPU core (architectural state, data memory, pipeline).
pub mod core;
/// Instruction set (opcodes, instruction records, text assembler).
pub mod isa;
/// Program loading, run control and final-state reporting.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Architectural state visited by every stage.
pub use crate::core::Cpu;
/// Top-level simulator owning the CPU, the pipeline and the instruction store.
pub use crate::sim::simulator::Simulator;
/// Error type and result alias shared by the whole crate.
pub use crate::common::error::{SimError, SimResult};
