//! Fetch Stage Unit Tests.
//!
//! Verifies PC advance, holding behind a stalled Decode and idling past the end of
//! the program.

use apex_pipe_core::config::Config;
use apex_pipe_core::core::pipeline::Stage;
use apex_pipe_core::isa::Opcode;
use apex_pipe_core::sim::RunState;

use crate::common::TestContext;

#[test]
fn first_cycle_fetches_and_forwards() {
    let mut tc = TestContext::from_asm("MOVC,R1,#5\nHALT\n");
    let _ = tc.step();

    assert_eq!(tc.cpu().pc, 4004);
    assert!(!tc.latch(Stage::Fetch).is_occupied());
    let decode = tc.latch(Stage::Decode);
    assert!(!decode.busy, "arrival releases Decode");
    assert_eq!(decode.entry().map(|e| e.pc), Some(4000));
    assert_eq!(decode.opcode(), Some(Opcode::Movc));
}

#[test]
fn holds_behind_stalled_decode() {
    let mut tc = TestContext::from_asm("ADD,R1,R2,R3\nADD,R4,R1,R1\nHALT\n");
    let _ = tc.step_n(3);

    // HALT was fetched in cycle 3 and cannot enter the stalled Decode.
    let fetch = tc.latch(Stage::Fetch).clone();
    assert!(fetch.stalled);
    assert_eq!(fetch.entry().map(|e| e.pc), Some(4008));
    assert_eq!(tc.cpu().pc, 4012);

    let _ = tc.step_n(3);
    assert_eq!(tc.latch(Stage::Fetch), &fetch, "fetch latch frozen through cycle 6");
    assert_eq!(tc.cpu().pc, 4012, "PC does not move while holding");

    let _ = tc.step();
    assert!(!tc.latch(Stage::Fetch).is_occupied());
    assert_eq!(
        tc.latch(Stage::Decode).entry().map(|e| e.pc),
        Some(4008),
        "held HALT moves on once Decode issues"
    );
}

#[test]
fn idles_past_end_of_program() {
    let config = Config::default().with_cycle_budget(20);
    let mut tc = TestContext::with_config("MOVC,R1,#1\n", config);

    let outcome = tc.run();
    assert_eq!(outcome.state, RunState::BudgetExhausted);
    assert_eq!(outcome.cycles, 20);
    assert_eq!(tc.cpu().pc, 4004);
    assert!(!tc.latch(Stage::Fetch).is_occupied());
    assert_eq!(tc.reg(1), 1);
    assert_eq!(tc.completed(), 1);
}

#[test]
fn honours_configured_pc_base() {
    let mut config = Config::default();
    config.pipeline.pc_base = 0;
    let mut tc = TestContext::with_config("MOVC,R1,#5\nHALT\n", config);

    let _ = tc.step_n(2);
    assert_eq!(tc.latch(Stage::Execute1).entry().map(|e| e.pc), Some(0));
    assert_eq!(tc.latch(Stage::Decode).entry().map(|e| e.pc), Some(4));

    let outcome = tc.run();
    assert_eq!(outcome.state, RunState::Halted);
    assert_eq!(tc.reg(1), 5);
}
