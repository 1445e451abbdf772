//! Simulator: owns the CPU, the pipeline and the instruction store side by side.
//!
//! The clock loop is a small state machine. Each `tick` either reports that the run has
//! already stopped or advances one cycle and then checks, in order, the halt signal and
//! the cycle budget. A fault raised by a stage stops the run for good.

use serde::Serialize;

use super::loader::{InstructionStore, ProgramSource};
use super::report::FinalState;
use crate::common::error::SimResult;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::{NullTrace, Pipeline, TraceSink};

/// Clock loop state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RunState {
    /// More cycles may be simulated.
    Running,
    /// HALT retired.
    Halted,
    /// The cycle budget was reached first.
    BudgetExhausted,
    /// A stage raised a fault; the cycle it happened in is incomplete.
    Aborted,
}

/// Summary returned by [`Simulator::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Final loop state; never `Running`.
    pub state: RunState,
    /// Cycles simulated.
    pub cycles: u64,
    /// Completion counter at the stop.
    pub instructions_completed: u64,
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    /// Architectural state.
    pub cpu: Cpu,
    /// Stage latches and cycle driver.
    pub pipeline: Pipeline,
    store: InstructionStore,
    cycle_budget: u64,
    state: RunState,
}

impl Simulator {
    /// Creates a simulator for `store` with the given configuration.
    ///
    /// Fails on an invalid configuration; no simulator is built in that case.
    pub fn new(store: InstructionStore, config: &Config) -> SimResult<Self> {
        config.validate()?;
        let cpu = Cpu::new(config, store.instruction_count())?;
        Ok(Self {
            cpu,
            pipeline: Pipeline::new(),
            store,
            cycle_budget: config.general.cycle_budget,
            state: RunState::Running,
        })
    }

    /// Loads a program from `source` and creates a simulator for it.
    pub fn from_source<S: ProgramSource + ?Sized>(source: &S, config: &Config) -> SimResult<Self> {
        Self::new(InstructionStore::load(source)?, config)
    }

    /// Current loop state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// The program being simulated.
    pub const fn store(&self) -> &InstructionStore {
        &self.store
    }

    /// Maximum number of cycles this run may take.
    pub const fn cycle_budget(&self) -> u64 {
        self.cycle_budget
    }

    /// Advances the simulation by one clock cycle.
    ///
    /// Does nothing once the run has stopped. An error moves the run to
    /// [`RunState::Aborted`], after which further ticks leave all state untouched.
    pub fn tick(&mut self, trace: &mut dyn TraceSink) -> SimResult<RunState> {
        if self.state != RunState::Running {
            return Ok(self.state);
        }
        if self.cpu.clock >= self.cycle_budget {
            self.state = RunState::BudgetExhausted;
            return Ok(self.state);
        }

        if let Err(err) = self.pipeline.tick(&mut self.cpu, &self.store, trace) {
            self.state = RunState::Aborted;
            tracing::error!(cycle = self.cpu.clock, %err, "simulation aborted");
            return Err(err);
        }

        if self.cpu.halted {
            self.state = RunState::Halted;
        } else if self.cpu.clock >= self.cycle_budget {
            self.state = RunState::BudgetExhausted;
        }
        Ok(self.state)
    }

    /// Runs until HALT retires or the cycle budget is spent.
    pub fn run(&mut self, trace: &mut dyn TraceSink) -> SimResult<RunOutcome> {
        tracing::info!(
            instructions = self.store.instruction_count(),
            budget = self.cycle_budget,
            "simulation started"
        );
        while self.tick(trace)? == RunState::Running {}
        let outcome = self.outcome();
        tracing::info!(
            state = ?outcome.state,
            cycles = outcome.cycles,
            completed = outcome.instructions_completed,
            "simulation stopped"
        );
        Ok(outcome)
    }

    /// Runs with no trace output.
    pub fn run_silent(&mut self) -> SimResult<RunOutcome> {
        self.run(&mut NullTrace)
    }

    /// Summary of the run so far.
    pub const fn outcome(&self) -> RunOutcome {
        RunOutcome {
            state: self.state,
            cycles: self.cpu.clock,
            instructions_completed: self.cpu.instructions_completed,
        }
    }

    /// Snapshot of registers, valid bits, memory and counters.
    pub fn final_state(&self) -> FinalState {
        FinalState {
            state: self.state,
            cycles: self.cpu.clock,
            instructions_completed: self.cpu.instructions_completed,
            zero_flag: self.cpu.zero_flag,
            registers: self.cpu.regs.values().to_vec(),
            valid: self.cpu.regs.valid_bits().to_vec(),
            memory: self.cpu.memory.words().to_vec(),
        }
    }
}
