//! Instruction Fetch Stage.
//!
//! Reads the instruction at the PC into the Fetch latch and advances the PC by one
//! instruction. While Decode is stalled the fetched instruction stays in the latch and the
//! PC does not move; the cycle that finally forwards a held instruction fetches nothing new.
//! Past the end of the program Fetch simply idles.

use super::{StageAction, advance};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::latches::{InFlight, Latches, Slot, Stage};
use crate::core::pipeline::traits::TraceSink;
use crate::sim::loader::InstructionStore;

/// Executes the fetch stage.
///
/// # Arguments
///
/// * `cpu` - CPU state; supplies and advances the PC.
/// * `store` - Program being simulated.
/// * `latches` - Stage latches.
/// * `trace` - Trace sink.
pub fn fetch_stage(
    cpu: &mut Cpu,
    store: &InstructionStore,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    let latch = &mut latches[Stage::Fetch];
    if latch.busy {
        return Ok(());
    }

    if !latch.is_occupied() {
        if let Some(instr) = store.fetch(cpu.pc, cpu.pc_base) {
            tracing::trace!(pc = cpu.pc, %instr, "fetch");
            latch.slot = Slot::Occupied(InFlight::new(cpu.pc, instr));
            cpu.pc = cpu.pc.wrapping_add(INSTRUCTION_SIZE);
        }
    }

    advance(Stage::Fetch, cpu, latches, trace, |_, _, _| {
        Ok(StageAction::Forward)
    })
}
