//! # Pipeline Tests
//!
//! Cycle-level tests for the seven-stage pipeline. Most tests run a short program
//! through the `TestContext` harness and inspect latches, registers and trace events at
//! specific cycles.

/// Halt-drain: busy propagation and completion counter bookkeeping.
pub mod halt_drain;
