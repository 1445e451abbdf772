//! APEX opcode enumeration.
//!
//! Every stage matches exhaustively on [`Opcode`], so adding an opcode forces each stage
//! to decide what it does with it. A pipeline bubble is not an opcode; see
//! [`Slot::Bubble`](crate::core::pipeline::latches::Slot::Bubble).

use std::fmt;

/// The closed set of APEX operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `STORE rs1, rs2, #imm`: `mem[R[rs2] + imm] = R[rs1]`.
    Store,
    /// `STR rs1, rs2, rs3`: `mem[R[rs2] + R[rs3]] = R[rs1]`.
    Str,
    /// `LOAD rd, rs1, #imm`: `R[rd] = mem[R[rs1] + imm]`.
    Load,
    /// `LDR rd, rs1, rs2`: register-indexed load.
    Ldr,
    /// `MOVC rd, #imm`: `R[rd] = imm`.
    Movc,
    /// `ADD rd, rs1, rs2`.
    Add,
    /// `ADDL rd, rs1, #imm`.
    Addl,
    /// `SUB rd, rs1, rs2`.
    Sub,
    /// `SUBL rd, rs1, #imm`.
    Subl,
    /// `MUL rd, rs1, rs2`.
    Mul,
    /// `AND rd, rs1, rs2`.
    And,
    /// `OR rd, rs1, rs2`.
    Or,
    /// `EX-OR rd, rs1, rs2`.
    Xor,
    /// `JUMP rs1, #imm`: computes `R[rs1] + imm`.
    Jump,
    /// `BZ #imm`: taken when the zero flag is set.
    Bz,
    /// `BNZ #imm`: taken when the zero flag is clear.
    Bnz,
    /// `HALT`: drains the pipeline and ends the run.
    Halt,
}

/// Operand layout of an instruction, in source order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandFormat {
    /// `rs1, rs2, #imm` (STORE).
    SrcSrcImm,
    /// `rs1, rs2, rs3` (STR).
    SrcSrcSrc,
    /// `rd, rs1, #imm` (LOAD, ADDL, SUBL).
    DestSrcImm,
    /// `rd, rs1, rs2` (LDR and register-register ALU operations).
    DestSrcSrc,
    /// `rd, #imm` (MOVC).
    DestImm,
    /// `rs1, #imm` (JUMP).
    SrcImm,
    /// `#imm` (BZ, BNZ).
    Imm,
    /// No operands (HALT).
    Nullary,
}

impl OperandFormat {
    /// Number of comma-separated operands the format expects.
    pub const fn arity(self) -> usize {
        match self {
            Self::SrcSrcImm | Self::SrcSrcSrc | Self::DestSrcImm | Self::DestSrcSrc => 3,
            Self::DestImm | Self::SrcImm => 2,
            Self::Imm => 1,
            Self::Nullary => 0,
        }
    }
}

/// Coarse instruction class, used for the retired-instruction mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrClass {
    /// Arithmetic, logical and move-immediate operations.
    Alu,
    /// LOAD and LDR.
    Load,
    /// STORE and STR.
    Store,
    /// JUMP, BZ and BNZ.
    Control,
    /// HALT.
    Halt,
}

const MNEMONICS: [(Opcode, &str); 17] = [
    (Opcode::Store, "STORE"),
    (Opcode::Str, "STR"),
    (Opcode::Load, "LOAD"),
    (Opcode::Ldr, "LDR"),
    (Opcode::Movc, "MOVC"),
    (Opcode::Add, "ADD"),
    (Opcode::Addl, "ADDL"),
    (Opcode::Sub, "SUB"),
    (Opcode::Subl, "SUBL"),
    (Opcode::Mul, "MUL"),
    (Opcode::And, "AND"),
    (Opcode::Or, "OR"),
    (Opcode::Xor, "EX-OR"),
    (Opcode::Jump, "JUMP"),
    (Opcode::Bz, "BZ"),
    (Opcode::Bnz, "BNZ"),
    (Opcode::Halt, "HALT"),
];

impl Opcode {
    /// Looks up an opcode by mnemonic, ignoring case. `XOR` is accepted for `EX-OR`.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("XOR") {
            return Some(Self::Xor);
        }
        MNEMONICS
            .iter()
            .find(|(_, m)| m.eq_ignore_ascii_case(text))
            .map(|(op, _)| *op)
    }

    /// Canonical upper-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Store => "STORE",
            Self::Str => "STR",
            Self::Load => "LOAD",
            Self::Ldr => "LDR",
            Self::Movc => "MOVC",
            Self::Add => "ADD",
            Self::Addl => "ADDL",
            Self::Sub => "SUB",
            Self::Subl => "SUBL",
            Self::Mul => "MUL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "EX-OR",
            Self::Jump => "JUMP",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Halt => "HALT",
        }
    }

    /// Operand layout used by the assembler and by `Display`.
    pub const fn format(self) -> OperandFormat {
        match self {
            Self::Store => OperandFormat::SrcSrcImm,
            Self::Str => OperandFormat::SrcSrcSrc,
            Self::Load | Self::Addl | Self::Subl => OperandFormat::DestSrcImm,
            Self::Ldr | Self::Add | Self::Sub | Self::Mul | Self::And | Self::Or | Self::Xor => {
                OperandFormat::DestSrcSrc
            }
            Self::Movc => OperandFormat::DestImm,
            Self::Jump => OperandFormat::SrcImm,
            Self::Bz | Self::Bnz => OperandFormat::Imm,
            Self::Halt => OperandFormat::Nullary,
        }
    }

    /// Class used for statistics.
    pub const fn class(self) -> InstrClass {
        match self {
            Self::Load | Self::Ldr => InstrClass::Load,
            Self::Store | Self::Str => InstrClass::Store,
            Self::Jump | Self::Bz | Self::Bnz => InstrClass::Control,
            Self::Halt => InstrClass::Halt,
            Self::Movc
            | Self::Add
            | Self::Addl
            | Self::Sub
            | Self::Subl
            | Self::Mul
            | Self::And
            | Self::Or
            | Self::Xor => InstrClass::Alu,
        }
    }

    /// Arithmetic-class operations: they clear the zero flag at issue and set it from
    /// their result in Execute-1.
    pub const fn sets_zero_flag(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Addl | Self::Sub | Self::Subl | Self::Mul
        )
    }

    /// Whether the instruction commits a value to `rd` in Writeback.
    pub const fn writes_register(self) -> bool {
        matches!(
            self.format(),
            OperandFormat::DestSrcImm | OperandFormat::DestSrcSrc | OperandFormat::DestImm
        )
    }

    /// Conditional branches, which Decode may hold for one cycle.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
