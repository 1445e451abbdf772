//! Simulator error definitions.
//!
//! This module defines every way a simulation can be refused or aborted. It provides:
//! 1. **Load errors:** Unreadable program files and malformed assembly text, tagged with the
//!    offending line.
//! 2. **Configuration errors:** Out-of-range register indices and invalid run parameters.
//! 3. **Runtime faults:** Data memory accesses outside the configured capacity.
//!
//! Hazard stalls are not errors. They are part of normal pipeline operation and never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or running a simulation.
///
/// All variants are fatal: construction fails or the run stops at the faulting cycle.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program file could not be read.
    #[error("cannot read program {path:?}: {source}")]
    ProgramRead {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A program line names a mnemonic outside the APEX opcode set.
    #[error("line {line}: unknown opcode '{mnemonic}'")]
    UnknownOpcode {
        /// 1-based source line.
        line: usize,
        /// Mnemonic as written.
        mnemonic: String,
    },

    /// A program line has the wrong shape (operand count, register or immediate syntax).
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based source line.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A register index does not name one of the architectural registers.
    #[error("register R{index} out of range (machine has {limit} registers)")]
    RegisterOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of registers.
        limit: usize,
    },

    /// A load or store computed an address outside data memory.
    #[error("pc {pc}: data address {address} outside memory of {limit} words")]
    AddressOutOfBounds {
        /// Program counter of the faulting instruction.
        pc: u32,
        /// Effective address computed in Execute-1.
        address: i32,
        /// Memory capacity in words.
        limit: usize,
    },

    /// Run parameters failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization of a configuration or report failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the simulator.
pub type SimResult<T> = Result<T, SimError>;
