//! Instruction pipeline implementation.
//!
//! This module contains the seven-stage APEX pipeline. It includes the following components:
//! 1. **Latches:** One slot per stage holding the in-flight instruction and its scratch values.
//! 2. **Hazards:** Scoreboard checks, branch holds and zero-flag bookkeeping used by Decode
//!    and Writeback.
//! 3. **Stages:** Fetch, Decode/RF, Execute-1, Execute-2, Memory-1, Memory-2 and Writeback.
//! 4. **Engine:** The per-cycle driver that invokes stages from Writeback back to Fetch.
//! 5. **Traits:** The trace sink seam through which stage activity is observed.

/// Per-cycle pipeline driver.
pub mod engine;

/// Hazard detection helpers for Decode and Writeback.
pub mod hazards;

/// Stage latches and the bubble/occupied slot type.
pub mod latches;

/// Stage transition functions.
pub mod stages;

/// Trace sink trait and stock implementations.
pub mod traits;

pub use engine::Pipeline;
pub use latches::{InFlight, Latch, Latches, Slot, Stage};
pub use traits::{ConsoleTrace, NullTrace, TraceSink};
