//! Halt-Drain Tests.
//!
//! HALT switches off the stages behind it as it travels: Execute-1 disables Decode and
//! Fetch, and each later stage disables its predecessor. Every stage that handles HALT
//! before Writeback bumps the completion counter; Writeback overwrites it with the
//! program length. Nothing upstream moves in the cycle HALT retires.

use apex_pipe_core::core::pipeline::Stage;
use apex_pipe_core::sim::RunState;

use crate::common::TestContext;

const PROGRAM: &str = "HALT\nMOVC,R2,#2\nMOVC,R3,#3\n";

fn busy_bits(tc: &TestContext) -> Vec<bool> {
    Stage::ALL.iter().map(|s| tc.latch(*s).busy).collect()
}

#[test]
fn completion_counter_per_cycle() {
    let mut tc = TestContext::from_asm(PROGRAM);
    let mut seen = Vec::new();
    for _ in 0..6 {
        assert_eq!(tc.step(), RunState::Running);
        seen.push(tc.completed());
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);

    assert_eq!(tc.step(), RunState::Halted);
    assert_eq!(tc.completed(), 3);
    assert_eq!(tc.cpu().clock, 7);
}

#[test]
fn busy_bits_follow_the_halt() {
    let mut tc = TestContext::from_asm(PROGRAM);
    //                 F      D      E1     E2     M1     M2     WB
    let expected = [
        [false, false, true, true, true, true, true],
        [false, false, false, true, true, true, true],
        [true, true, false, false, true, true, true],
        [true, true, true, false, false, true, true],
        [true, true, true, true, false, false, true],
        [true, true, true, true, true, false, false],
        [false, true, true, true, true, false, false],
    ];
    for (cycle, want) in expected.iter().enumerate() {
        let _ = tc.step();
        assert_eq!(busy_bits(&tc), want.to_vec(), "after cycle {}", cycle + 1);
    }
}

#[test]
fn retire_cycle_fetches_nothing() {
    let mut tc = TestContext::from_asm(PROGRAM);
    let _ = tc.step_n(6);
    let pc = tc.cpu().pc;
    let decode = tc.latch(Stage::Decode).clone();
    let fetched = tc.latch(Stage::Fetch).entry().cloned();
    assert_eq!(decode.entry().map(|e| e.pc), Some(4004));

    assert_eq!(tc.step(), RunState::Halted);
    assert_eq!(tc.cpu().pc, pc, "PC frozen in the retire cycle");
    assert_eq!(tc.latch(Stage::Decode), &decode);
    assert_eq!(tc.latch(Stage::Fetch).entry().cloned(), fetched);
}

#[test]
fn younger_instructions_never_issue() {
    let mut tc = TestContext::from_asm(PROGRAM);
    let _ = tc.run();

    let decode = tc.latch(Stage::Decode);
    assert!(decode.busy);
    assert_eq!(decode.entry().map(|e| e.pc), Some(4004));
    assert!(tc.reg_valid(2));
    assert_eq!(tc.reg(2), 0);
    assert_eq!(tc.reg(3), 0);
    assert_eq!(tc.stats().instructions_retired, 0);
}

#[test]
fn halt_waits_for_older_instructions() {
    let mut tc = TestContext::from_asm("MOVC,R1,#5\nMOVC,R2,#10\nADD,R3,R1,R2\nHALT\n");
    let (outcome, rec) = tc.run_recorded();

    assert_eq!(rec.passed(Stage::Writeback, 4008), Some(13));
    assert_eq!(rec.passed(Stage::Writeback, 4012), Some(14));
    assert_eq!(outcome.state, RunState::Halted);
    assert_eq!(outcome.cycles, 14);
    assert_eq!(outcome.instructions_completed, 4);
    assert_eq!(tc.reg(3), 15);
}
