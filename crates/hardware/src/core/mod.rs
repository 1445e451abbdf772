//! Core processor implementation.
//!
//! This module contains the architectural state shared by all stages and the
//! pipeline engine that advances it one cycle at a time.

/// Architectural state and data memory.
pub mod cpu;

/// Instruction pipeline implementation (latches, hazards, stages, engine).
pub mod pipeline;

pub use self::cpu::Cpu;
