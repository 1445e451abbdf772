use apex_pipe_core::core::pipeline::{InFlight, Stage, TraceSink};

/// One `on_stage` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageEvent {
    pub cycle: u64,
    pub stage: Stage,
    pub stalled: bool,
    pub entry: InFlight,
}

/// Trace sink that keeps everything it is told.
#[derive(Debug, Default)]
pub struct Recorder {
    pub cycles: Vec<u64>,
    pub events: Vec<StageEvent>,
}

impl TraceSink for Recorder {
    fn on_cycle(&mut self, cycle: u64) {
        self.cycles.push(cycle);
    }

    fn on_stage(&mut self, cycle: u64, stage: Stage, entry: &InFlight, stalled: bool) {
        self.events.push(StageEvent {
            cycle,
            stage,
            stalled,
            entry: entry.clone(),
        });
    }
}

impl Recorder {
    /// Events reported by `stage` for the instruction at `pc`.
    pub fn at(&self, stage: Stage, pc: u32) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage == stage && e.entry.pc == pc)
            .collect()
    }

    /// Cycles in which `stage` held the instruction at `pc`.
    pub fn stalled_cycles(&self, stage: Stage, pc: u32) -> Vec<u64> {
        self.at(stage, pc)
            .into_iter()
            .filter(|e| e.stalled)
            .map(|e| e.cycle)
            .collect()
    }

    /// Cycle in which `stage` forwarded (or, for Writeback, retired) the instruction at `pc`.
    pub fn passed(&self, stage: Stage, pc: u32) -> Option<u64> {
        self.at(stage, pc)
            .into_iter()
            .find(|e| !e.stalled)
            .map(|e| e.cycle)
    }
}
