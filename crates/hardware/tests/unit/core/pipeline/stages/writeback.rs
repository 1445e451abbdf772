//! Writeback Stage Unit Tests.
//!
//! Verifies register commit timing, retirement counting and the end of run on HALT.

use apex_pipe_core::core::pipeline::Stage;
use apex_pipe_core::sim::RunState;

use crate::common::TestContext;

#[test]
fn commit_happens_in_cycle_seven() {
    let mut tc = TestContext::from_asm("MOVC,R1,#5\nHALT\n");
    let _ = tc.step_n(6);
    assert!(!tc.reg_valid(1));
    assert_eq!(tc.reg(1), 0);

    let _ = tc.step();
    assert!(tc.reg_valid(1));
    assert_eq!(tc.reg(1), 5);
    assert_eq!(tc.stats().instructions_retired, 1);
}

#[test]
fn halt_forces_counter_to_program_length() {
    let mut tc = TestContext::from_asm("MOVC,R1,#5\nHALT\n");
    assert_eq!(tc.step_n(7), RunState::Running);
    // HALT has been counted once per stage it passed, MOVC once at retirement.
    assert_eq!(tc.completed(), 6);

    assert_eq!(tc.step(), RunState::Halted);
    assert_eq!(tc.completed(), 2);
    assert!(tc.cpu().halted);
    assert!(!tc.latch(Stage::Fetch).busy);
    assert_eq!(tc.stats().instructions_retired, 1, "HALT itself is not a retirement");
}

#[test]
fn non_writers_retire_without_commit() {
    let mut tc = TestContext::from_asm("MOVC,R1,#1\nBNZ,#4\nSTORE,R1,R0,#0\nHALT\n");
    let _ = tc.run();
    assert_eq!(tc.stats().instructions_retired, 3);
    assert_eq!(tc.stats().inst_control, 1);
    assert_eq!(tc.stats().inst_store, 1);
    assert_eq!(tc.cpu().regs.pending_count(), 0);
}
