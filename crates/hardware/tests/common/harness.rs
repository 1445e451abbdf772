use apex_pipe_core::config::{Config, MemoryWord};
use apex_pipe_core::core::Cpu;
use apex_pipe_core::core::pipeline::{Latch, NullTrace, Stage};
use apex_pipe_core::sim::{AsmText, FinalState, RunOutcome, RunState, Simulator};
use apex_pipe_core::stats::SimStats;
use tracing_subscriber::EnvFilter;

use super::recorder::Recorder;

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// Assemble `program` with the default configuration.
    pub fn from_asm(program: &str) -> Self {
        Self::with_config(program, Config::default())
    }

    /// Assemble `program` and build the simulator with `config`.
    pub fn with_config(program: &str, config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let sim = Simulator::from_source(&AsmText(program), &config)
            .expect("test program should assemble");
        Self { sim }
    }

    /// Assemble `program` with data memory words preloaded.
    pub fn with_memory(program: &str, words: &[(usize, i32)]) -> Self {
        let mut config = Config::default();
        config.memory.preload = words
            .iter()
            .map(|&(address, value)| MemoryWord { address, value })
            .collect();
        Self::with_config(program, config)
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Advance one cycle silently.
    pub fn step(&mut self) -> RunState {
        self.sim.tick(&mut NullTrace).expect("tick should not fault")
    }

    /// Advance up to `cycles` cycles silently.
    pub fn step_n(&mut self, cycles: u64) -> RunState {
        let mut state = self.sim.state();
        for _ in 0..cycles {
            state = self.step();
        }
        state
    }

    /// Run to completion silently.
    pub fn run(&mut self) -> RunOutcome {
        self.sim.run_silent().expect("run should not fault")
    }

    /// Run to completion, recording every stage event.
    pub fn run_recorded(&mut self) -> (RunOutcome, Recorder) {
        let mut recorder = Recorder::default();
        let outcome = self.sim.run(&mut recorder).expect("run should not fault");
        (outcome, recorder)
    }

    pub fn reg(&self, r: usize) -> i32 {
        self.sim.cpu.regs.read(r).expect("register index in range")
    }

    pub fn reg_valid(&self, r: usize) -> bool {
        self.sim.cpu.regs.is_ready(r)
    }

    pub fn mem(&self, address: usize) -> i32 {
        self.sim.cpu.memory.words()[address]
    }

    pub fn latch(&self, stage: Stage) -> &Latch {
        self.sim.pipeline.latch(stage)
    }

    pub fn zero_flag(&self) -> bool {
        self.sim.cpu.zero_flag
    }

    pub fn completed(&self) -> u64 {
        self.sim.cpu.instructions_completed
    }

    pub fn stats(&self) -> &SimStats {
        &self.sim.cpu.stats
    }

    pub fn final_state(&self) -> FinalState {
        self.sim.final_state()
    }
}
