//! Memory Stages (MEM1, MEM2).
//!
//! Memory-1 performs the data access at the address Execute-1 computed: stores write the
//! value latched from `rs1`, loads read into the result. Memory-2 models the second cycle
//! of memory latency and only passes instructions along. Both continue the halt-drain by
//! disabling their predecessor.

use super::{StageAction, advance};
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::core::pipeline::latches::{Latches, Stage};
use crate::core::pipeline::traits::TraceSink;
use crate::isa::Opcode;

/// Executes the Memory-1 stage.
///
/// Fails with [`SimError::AddressOutOfBounds`](crate::common::error::SimError::AddressOutOfBounds)
/// when the effective address lies outside data memory.
pub fn memory1_stage(
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    advance(Stage::Memory1, cpu, latches, trace, |cpu, latches, entry| {
        match entry.opcode() {
            Opcode::Store | Opcode::Str => {
                cpu.memory
                    .write(entry.mem_address, entry.rs1_value, entry.pc)?;
                tracing::trace!(
                    pc = entry.pc,
                    address = entry.mem_address,
                    value = entry.rs1_value,
                    "store"
                );
            }
            Opcode::Load | Opcode::Ldr => {
                entry.result = cpu.memory.read(entry.mem_address, entry.pc)?;
            }
            Opcode::Halt => {
                latches[Stage::Execute2].busy = true;
                cpu.instructions_completed += 1;
            }
            _ => {}
        }
        Ok(StageAction::Forward)
    })
}

/// Executes the Memory-2 stage.
pub fn memory2_stage(
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
) -> SimResult<()> {
    advance(Stage::Memory2, cpu, latches, trace, |cpu, latches, entry| {
        if entry.opcode() == Opcode::Halt {
            latches[Stage::Memory1].busy = true;
            cpu.instructions_completed += 1;
        }
        Ok(StageAction::Forward)
    })
}
