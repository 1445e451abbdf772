//! Pipeline observation interface.
//!
//! This module defines the trace sink through which the engine reports stage activity.
//! It provides:
//! 1. **Trace Sink Interface:** One call per cycle and one per active stage per cycle.
//! 2. **Silent Sink:** `NullTrace`, for runs that only want the final state.
//! 3. **Console Sink:** `ConsoleTrace`, printing each cycle's stage contents to stdout.

use super::latches::{InFlight, Stage};

/// Receives stage activity from the engine.
///
/// Stages report only when they act on or hold an instruction; busy stages and
/// bubbles are silent. Calls within a cycle arrive in engine order, Writeback first.
pub trait TraceSink {
    /// Called once at the start of every cycle.
    ///
    /// # Arguments
    ///
    /// * `cycle` - 1-based number of the cycle about to run.
    fn on_cycle(&mut self, cycle: u64) {
        let _ = cycle;
    }

    /// Called for each stage that processed or held an instruction this cycle.
    ///
    /// # Arguments
    ///
    /// * `cycle` - Current cycle.
    /// * `stage` - Reporting stage.
    /// * `entry` - Latch content after the stage acted on it.
    /// * `stalled` - `true` if the stage held its content instead of forwarding.
    fn on_stage(&mut self, cycle: u64, stage: Stage, entry: &InFlight, stalled: bool);
}

/// Discards all trace events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn on_stage(&mut self, _cycle: u64, _stage: Stage, _entry: &InFlight, _stalled: bool) {}
}

/// Prints a cycle banner and one line per active stage to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleTrace;

impl TraceSink for ConsoleTrace {
    fn on_cycle(&mut self, cycle: u64) {
        println!("--------------------------------");
        println!("Clock Cycle #: {cycle}");
        println!("--------------------------------");
    }

    fn on_stage(&mut self, _cycle: u64, stage: Stage, entry: &InFlight, stalled: bool) {
        let note = if stalled { "  [stalled]" } else { "" };
        println!(
            "{:<15}: pc({}) {}{note}",
            stage.name(),
            entry.pc,
            entry.instr
        );
    }
}
