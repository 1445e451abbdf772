//! Writeback Stage.
//!
//! The last stage. It takes the instruction leaving Memory-2 and:
//! 1. **Commits** the result of register-writing instructions and sets the valid bit.
//! 2. **Re-asserts the zero flag** for a zero arithmetic result, unless another arithmetic
//!    instruction is still between Execute-1 and Memory-2.
//! 3. **Retires** the instruction, bumping the completion counter.
//! 4. **Ends the run** when HALT arrives: raises the halt signal and forces the completion
//!    counter to the program length.

use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{Latches, Stage};
use crate::core::pipeline::traits::TraceSink;
use crate::isa::Opcode;

/// Executes the writeback stage.
pub fn writeback_stage(
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    let latch = &mut latches[Stage::Writeback];
    if latch.busy {
        return Ok(());
    }
    let Some(wb) = latch.slot.take() else {
        return Ok(());
    };
    let instr = wb.instr;

    if instr.opcode == Opcode::Halt {
        cpu.halted = true;
        cpu.instructions_completed = cpu.program_len;
        latches[Stage::Fetch].busy = false;
        trace.on_stage(cpu.clock, Stage::Writeback, &wb, false);
        tracing::info!(cycle = cpu.clock, pc = wb.pc, "halt retired");
        return Ok(());
    }

    if let Some(rd) = instr.destination() {
        cpu.regs.commit(rd, wb.result)?;
        if instr.opcode.sets_zero_flag()
            && wb.result == 0
            && !hazards::flag_writer_in_flight(latches)
        {
            cpu.zero_flag = true;
        }
    }
    cpu.instructions_completed += 1;
    cpu.stats.record_retire(instr.opcode.class());

    trace.on_stage(cpu.clock, Stage::Writeback, &wb, false);
    tracing::debug!(
        cycle = cpu.clock,
        pc = wb.pc,
        %instr,
        result = wb.result,
        "retired"
    );
    Ok(())
}
