//! Execute Stage Unit Tests.
//!
//! Verifies ALU results (including wrap-around), effective address generation, jump and
//! branch targets, and the halt-drain steps taken in Execute-1 and Execute-2.

use apex_pipe_core::core::pipeline::Stage;
use rstest::rstest;

use crate::common::{Recorder, TestContext};

fn executed(rec: &Recorder, pc: u32) -> &apex_pipe_core::core::pipeline::InFlight {
    &rec.at(Stage::Execute1, pc)
        .into_iter()
        .find(|e| !e.stalled)
        .expect("instruction reaches Execute-1")
        .entry
}

// ══════════════════════════════════════════════════════════
// 1. ALU
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("ADD", 22)]
#[case("SUB", 2)]
#[case("MUL", 120)]
#[case("AND", 8)]
#[case("OR", 14)]
#[case("EX-OR", 6)]
fn register_register_ops(#[case] mnemonic: &str, #[case] expected: i32) {
    let program = format!("MOVC,R1,#12\nMOVC,R2,#10\n{mnemonic},R3,R1,R2\nHALT\n");
    let mut tc = TestContext::from_asm(&program);
    let (_, rec) = tc.run_recorded();

    assert_eq!(executed(&rec, 4008).result, expected);
    assert_eq!(tc.reg(3), expected);
    assert!(tc.reg_valid(3));
}

#[test]
fn register_immediate_ops() {
    let mut tc = TestContext::from_asm("MOVC,R1,#10\nADDL,R2,R1,#5\nSUBL,R3,R1,#10\nHALT\n");
    let _ = tc.run();
    assert_eq!(tc.reg(2), 15);
    assert_eq!(tc.reg(3), 0);
}

#[test]
fn arithmetic_wraps() {
    let mut tc = TestContext::from_asm(
        "MOVC,R1,#2147483647\nADDL,R2,R1,#1\nMUL,R3,R1,R1\nMOVC,R4,#-2147483648\nSUBL,R5,R4,#1\nHALT\n",
    );
    let _ = tc.run();
    assert_eq!(tc.reg(2), i32::MIN);
    assert_eq!(tc.reg(3), 1);
    assert_eq!(tc.reg(5), i32::MAX);
}

// ══════════════════════════════════════════════════════════
// 2. Address generation
// ══════════════════════════════════════════════════════════

#[test]
fn store_address_is_base_plus_immediate() {
    let mut tc = TestContext::from_asm("MOVC,R1,#55\nMOVC,R2,#20\nSTORE,R1,R2,#3\nHALT\n");
    let (_, rec) = tc.run_recorded();
    assert_eq!(executed(&rec, 4008).mem_address, 23);
    assert_eq!(tc.mem(23), 55);
}

#[test]
fn str_address_is_sum_of_second_and_third_source() {
    let mut tc =
        TestContext::from_asm("MOVC,R1,#77\nMOVC,R2,#10\nMOVC,R3,#2\nSTR,R1,R2,R3\nHALT\n");
    let (_, rec) = tc.run_recorded();
    assert_eq!(executed(&rec, 4012).mem_address, 12);
    assert_eq!(tc.mem(12), 77);
}

#[test]
fn load_address_is_base_plus_immediate() {
    let mut tc = TestContext::with_memory("MOVC,R1,#4\nLOAD,R2,R1,#6\nHALT\n", &[(10, 31)]);
    let (_, rec) = tc.run_recorded();
    assert_eq!(executed(&rec, 4004).mem_address, 10);
    assert_eq!(tc.reg(2), 31);
}

// ══════════════════════════════════════════════════════════
// 3. Control
// ══════════════════════════════════════════════════════════

#[test]
fn jump_records_target_without_redirect() {
    let mut tc = TestContext::from_asm("MOVC,R1,#4000\nJUMP,R1,#12\nMOVC,R2,#1\nHALT\n");
    let (_, rec) = tc.run_recorded();

    assert_eq!(executed(&rec, 4004).branch_target, Some(4012));
    // The instruction after the jump still executes.
    assert_eq!(tc.reg(2), 1);
    assert_eq!(tc.stats().jumps, 1);
}

#[test]
fn branch_target_is_pc_relative() {
    let mut tc = TestContext::from_asm("MOVC,R1,#1\nBNZ,#8\nHALT\n");
    let (_, rec) = tc.run_recorded();
    assert_eq!(executed(&rec, 4004).branch_target, Some(4012));
    assert_eq!(tc.stats().branches_taken, 1);
}

#[test]
fn untaken_branch_has_no_target() {
    let mut tc = TestContext::from_asm("MOVC,R1,#1\nBZ,#8\nHALT\n");
    let (_, rec) = tc.run_recorded();
    assert_eq!(executed(&rec, 4004).branch_target, None);
    assert_eq!(tc.stats().branches_not_taken, 1);
}

// ══════════════════════════════════════════════════════════
// 4. Halt-drain
// ══════════════════════════════════════════════════════════

#[test]
fn halt_disables_front_end_then_execute1() {
    let mut tc = TestContext::from_asm("HALT\n");
    let _ = tc.step_n(3);
    assert!(tc.latch(Stage::Fetch).busy);
    assert!(tc.latch(Stage::Decode).busy);
    assert!(!tc.latch(Stage::Execute1).busy);
    assert_eq!(tc.completed(), 2);

    let _ = tc.step();
    assert!(tc.latch(Stage::Execute1).busy);
    assert_eq!(tc.completed(), 3);
}
