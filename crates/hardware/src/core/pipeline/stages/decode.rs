//! Decode / Register File (RF) Stage.
//!
//! This module implements the second stage of the pipeline. It performs the following:
//! 1. **Hazard Detection:** Holds the instruction while any register it reads, or the
//!    register it will write, is pending in the scoreboard. The check repeats every cycle.
//! 2. **Branch Hold:** Holds BZ/BNZ for one cycle when the zero flag does not yet satisfy
//!    the branch, then lets it proceed regardless.
//! 3. **Register Read:** Latches source operand values into the in-flight entry.
//! 4. **Issue:** Claims the destination register and clears the zero flag for
//!    arithmetic-class instructions.

use super::{StageAction, advance};
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{InFlight, Latches, Stage};
use crate::core::pipeline::traits::TraceSink;
use crate::isa::Opcode;

/// Executes the decode stage.
///
/// # Arguments
///
/// * `cpu` - CPU state; the register file and zero flag are read and updated here.
/// * `latches` - Stage latches.
/// * `trace` - Trace sink.
pub fn decode_stage(
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    let retrying = latches[Stage::Decode].stalled;
    advance(Stage::Decode, cpu, latches, trace, |cpu, _, entry| {
        decode(cpu, entry, retrying)
    })
}

fn decode(cpu: &mut Cpu, entry: &mut InFlight, retrying: bool) -> SimResult<StageAction> {
    let instr = entry.instr;

    if instr.opcode.is_conditional_branch() {
        if !retrying && !hazards::branch_condition_met(instr.opcode, cpu.zero_flag) {
            cpu.stats.stalls_control += 1;
            tracing::trace!(pc = entry.pc, %instr, "branch held");
            return Ok(StageAction::Hold);
        }
        return Ok(StageAction::Forward);
    }
    if instr.opcode == Opcode::Halt {
        cpu.instructions_completed += 1;
        return Ok(StageAction::Forward);
    }

    if !hazards::operands_ready(&cpu.regs, &instr) {
        cpu.stats.stalls_data += 1;
        tracing::trace!(pc = entry.pc, %instr, "data hazard");
        return Ok(StageAction::Hold);
    }

    let [rs1, rs2, rs3] = instr.source_registers();
    if let Some(r) = rs1 {
        entry.rs1_value = cpu.regs.read(r)?;
    }
    if let Some(r) = rs2 {
        entry.rs2_value = cpu.regs.read(r)?;
    }
    if let Some(r) = rs3 {
        entry.rs3_value = cpu.regs.read(r)?;
    }
    if instr.opcode == Opcode::Ldr {
        // LDR latches R[rs2] over R[rs1]; its effective address is R[rs2].
        entry.rs1_value = entry.rs2_value;
        entry.rs2_value = 0;
    }

    if instr.opcode.sets_zero_flag() {
        cpu.zero_flag = false;
    }
    if let Some(rd) = instr.destination() {
        cpu.regs.mark_pending(rd)?;
    }
    Ok(StageAction::Forward)
}
