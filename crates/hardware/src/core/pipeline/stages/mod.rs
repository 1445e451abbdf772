//! Pipeline stage implementations.
//!
//! This module contains the transition functions for the seven APEX stages and the latch
//! protocol they share. It includes:
//! 1. **Fetch:** Reads the instruction at the PC and advances the PC.
//! 2. **Decode/RF:** Checks the scoreboard, reads operands and claims the destination.
//! 3. **Execute:** Computes results, effective addresses and branch targets (two cycles).
//! 4. **Memory:** Performs the data access (two cycles).
//! 5. **Writeback:** Commits results, retires instructions and raises the halt signal.
//!
//! Every stage but Writeback advances through `advance`: a busy stage does nothing, a
//! stage whose successor is stalled holds, otherwise the stage acts and either forwards
//! its instruction or holds it and sends a bubble downstream.

use super::latches::{InFlight, Latches, Slot, Stage};
use super::traits::TraceSink;
use crate::common::error::SimResult;
use crate::core::Cpu;

/// Decode/RF stage implementation.
pub mod decode;

/// Execute-1 and Execute-2 stage implementations.
pub mod execute;

/// Fetch stage implementation.
pub mod fetch;

/// Memory-1 and Memory-2 stage implementations.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::{execute1_stage, execute2_stage};
pub use fetch::fetch_stage;
pub use memory::{memory1_stage, memory2_stage};
pub use writeback::writeback_stage;

/// What a stage decided to do with its instruction this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAction {
    /// Hand the instruction to the next stage.
    Forward,
    /// Keep the instruction and retry next cycle. The entry must be left as it was found.
    Hold,
}

/// Runs one cycle of `stage` under the shared latch protocol.
///
/// # Arguments
///
/// * `stage` - Stage being advanced; must not be Writeback.
/// * `cpu` - Architectural state.
/// * `latches` - All stage latches.
/// * `trace` - Receives one event if the stage acts on or holds an instruction.
/// * `action` - The stage's per-opcode work, applied to the instruction taken from the latch.
pub(crate) fn advance<F>(
    stage: Stage,
    cpu: &mut Cpu,
    latches: &mut Latches,
    trace: &mut dyn TraceSink,
    action: F,
) -> SimResult<()>
where
    F: FnOnce(&mut Cpu, &mut Latches, &mut InFlight) -> SimResult<StageAction>,
{
    let Some(next) = stage.next() else {
        return Ok(());
    };
    if latches[stage].busy {
        return Ok(());
    }

    if latches[next].stalled {
        let latch = &mut latches[stage];
        latch.stalled = latch.is_occupied();
        if let Some(entry) = latch.entry() {
            cpu.stats.stalls_structural += 1;
            trace.on_stage(cpu.clock, stage, entry, true);
        }
        return Ok(());
    }

    let Some(mut entry) = latches[stage].slot.take() else {
        latches[stage].stalled = false;
        return Ok(());
    };

    match action(cpu, latches, &mut entry)? {
        StageAction::Forward => {
            trace.on_stage(cpu.clock, stage, &entry, false);
            latches[stage].stalled = false;
            latches.forward(stage, entry);
        }
        StageAction::Hold => {
            trace.on_stage(cpu.clock, stage, &entry, true);
            let latch = &mut latches[stage];
            latch.slot = Slot::Occupied(entry);
            latch.stalled = true;
            latches.insert_bubble(next);
            cpu.stats.bubbles += 1;
        }
    }
    Ok(())
}
