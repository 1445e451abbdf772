//! Per-cycle pipeline driver.
//!
//! The engine owns the stage latches and advances every stage once per cycle, from
//! Writeback back to Fetch. Running downstream stages first means each stage sees the
//! latch its successor held at the end of the previous cycle, so an instruction moves
//! exactly one stage per cycle. The cycle in which HALT retires ends right after
//! Writeback: nothing upstream moves again.

use super::latches::{Latch, Latches, Stage};
use super::stages::{
    decode_stage, execute1_stage, execute2_stage, fetch_stage, memory1_stage, memory2_stage,
    writeback_stage,
};
use super::traits::TraceSink;
use crate::common::error::SimResult;
use crate::core::Cpu;
use crate::sim::loader::InstructionStore;

/// The APEX pipeline: seven stage latches plus the cycle driver.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    latches: Latches,
}

impl Pipeline {
    /// Creates a pipeline in its reset state.
    pub fn new() -> Self {
        Self {
            latches: Latches::new(),
        }
    }

    /// All stage latches.
    pub const fn latches(&self) -> &Latches {
        &self.latches
    }

    /// The latch of one stage.
    pub fn latch(&self, stage: Stage) -> &Latch {
        &self.latches[stage]
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `cpu` - Architectural state; its clock is incremented first.
    /// * `store` - Program being executed.
    /// * `trace` - Trace sink receiving this cycle's events.
    pub fn tick(
        &mut self,
        cpu: &mut Cpu,
        store: &InstructionStore,
        trace: &mut dyn TraceSink,
    ) -> SimResult<()> {
        cpu.clock += 1;
        cpu.stats.cycles = cpu.clock;
        trace.on_cycle(cpu.clock);

        let latches = &mut self.latches;
        writeback_stage(cpu, latches, trace)?;
        if cpu.halted {
            return Ok(());
        }
        memory2_stage(cpu, latches, trace)?;
        memory1_stage(cpu, latches, trace)?;
        execute2_stage(cpu, latches, trace)?;
        execute1_stage(cpu, latches, trace)?;
        decode_stage(cpu, latches, trace)?;
        fetch_stage(cpu, store, latches, trace)?;
        Ok(())
    }
}
