//! Pipeline hazard detection.
//!
//! This module implements the checks that decide whether Decode may issue and whether
//! Writeback may touch the zero flag. It provides:
//! 1. **Data hazards:** An instruction issues only when every register it reads, and the
//!    register it will write, are valid in the scoreboard. Checking the destination keeps
//!    at most one pending writer per register.
//! 2. **Control hazards:** A conditional branch whose condition does not hold in Decode is
//!    held for one cycle so a flag update in Execute-1 can land first.
//! 3. **Flag ordering:** Writeback may re-assert the zero flag only when no younger
//!    arithmetic instruction is still in flight.

use super::latches::{Latches, Stage};
use crate::common::RegisterFile;
use crate::isa::{Instruction, Opcode};

/// Returns `true` when `instr` can issue: all its sources and its destination are valid.
pub fn operands_ready(regs: &RegisterFile, instr: &Instruction) -> bool {
    instr
        .source_registers()
        .into_iter()
        .flatten()
        .chain(instr.destination())
        .all(|r| regs.is_ready(r))
}

/// Returns `true` when a conditional branch's condition holds for `zero_flag`.
///
/// BZ is satisfied by a set flag, BNZ by a clear one. Any other opcode is trivially
/// satisfied.
pub const fn branch_condition_met(opcode: Opcode, zero_flag: bool) -> bool {
    match opcode {
        Opcode::Bz => zero_flag,
        Opcode::Bnz => !zero_flag,
        _ => true,
    }
}

/// Returns `true` if an arithmetic-class instruction occupies Execute-1 through Memory-2.
pub fn flag_writer_in_flight(latches: &Latches) -> bool {
    Stage::BACKEND
        .iter()
        .filter_map(|s| latches[*s].opcode())
        .any(Opcode::sets_zero_flag)
}
