//! Execute Stages (EX1, EX2).
//!
//! Execute-1 does all the computation:
//! 1. **Address generation:** Effective addresses for STORE, STR, LOAD and LDR.
//! 2. **ALU:** Wrapping 32-bit arithmetic and bitwise logic. Arithmetic-class results set
//!    the zero flag to `result == 0`.
//! 3. **Control:** Jump and taken-branch targets. The PC is never redirected; the target is
//!    recorded on the entry for tracing only.
//! 4. **Halt-drain:** HALT disables Decode and Fetch.
//!
//! Execute-2 is a pass-through cycle that continues the halt-drain.

use super::{StageAction, advance};
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{InFlight, Latches, Stage};
use crate::core::pipeline::traits::TraceSink;
use crate::isa::Opcode;

/// Executes the Execute-1 stage.
pub fn execute1_stage(
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    advance(Stage::Execute1, cpu, latches, trace, |cpu, latches, entry| {
        execute(cpu, latches, entry);
        Ok(StageAction::Forward)
    })
}

/// Executes the Execute-2 stage.
pub fn execute2_stage(
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    advance(Stage::Execute2, cpu, latches, trace, |cpu, latches, entry| {
        if entry.opcode() == Opcode::Halt {
            latches[Stage::Execute1].busy = true;
            cpu.instructions_completed += 1;
        }
        Ok(StageAction::Forward)
    })
}

fn execute(cpu: &mut Cpu, latches: &mut Latches, entry: &mut InFlight) {
    let instr = entry.instr;
    let (a, b) = (entry.rs1_value, entry.rs2_value);

    match instr.opcode {
        Opcode::Store => entry.mem_address = b.wrapping_add(instr.imm),
        Opcode::Str => entry.mem_address = b.wrapping_add(entry.rs3_value),
        Opcode::Load => entry.mem_address = a.wrapping_add(instr.imm),
        Opcode::Ldr => entry.mem_address = a.wrapping_add(b),

        Opcode::Movc => entry.result = instr.imm,

        Opcode::Add => arithmetic(cpu, entry, a.wrapping_add(b)),
        Opcode::Addl => arithmetic(cpu, entry, a.wrapping_add(instr.imm)),
        Opcode::Sub => arithmetic(cpu, entry, a.wrapping_sub(b)),
        Opcode::Subl => arithmetic(cpu, entry, a.wrapping_sub(instr.imm)),
        Opcode::Mul => arithmetic(cpu, entry, a.wrapping_mul(b)),

        Opcode::And => entry.result = a & b,
        Opcode::Or => entry.result = a | b,
        Opcode::Xor => entry.result = a ^ b,

        Opcode::Jump => {
            entry.branch_target = Some(a.wrapping_add(instr.imm) as u32);
            cpu.stats.jumps += 1;
        }
        Opcode::Bz | Opcode::Bnz => {
            if hazards::branch_condition_met(instr.opcode, cpu.zero_flag) {
                entry.branch_target = Some(entry.pc.wrapping_add_signed(instr.imm));
                cpu.stats.branches_taken += 1;
            } else {
                cpu.stats.branches_not_taken += 1;
            }
        }

        Opcode::Halt => {
            latches[Stage::Decode].busy = true;
            latches[Stage::Fetch].busy = true;
            cpu.instructions_completed += 1;
        }
    }
}

fn arithmetic(cpu: &mut Cpu, entry: &mut InFlight, result: i32) {
    entry.result = result;
    cpu.zero_flag = result == 0;
}
