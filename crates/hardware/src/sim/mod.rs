//! Simulation front end.
//!
//! Provides program loading into the instruction store, the clock loop that drives the
//! pipeline, and the final-state report exposed once a run stops.

/// Program sources and the instruction store.
pub mod loader;
/// Final architectural state reporting.
pub mod report;
/// Clock loop and run control.
pub mod simulator;

pub use loader::{AsmFile, AsmText, InstructionStore, ProgramSource};
pub use report::FinalState;
pub use simulator::{RunOutcome, RunState, Simulator};
