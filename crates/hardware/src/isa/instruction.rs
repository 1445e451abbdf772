//! Decoded APEX instruction records.
//!
//! An [`Instruction`] is built once at load time and never mutated. Operand fields that
//! the opcode's [`OperandFormat`] does not use are zero.

use std::fmt;

use super::opcode::{Opcode, OperandFormat};
use crate::common::constants::NUM_REGS;
use crate::common::error::{SimError, SimResult};

/// One decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Third source register index (STR only).
    pub rs3: usize,
    /// Signed immediate operand.
    pub imm: i32,
}

impl Instruction {
    /// Creates an instruction with all operand fields zero.
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            rd: 0,
            rs1: 0,
            rs2: 0,
            rs3: 0,
            imm: 0,
        }
    }

    /// Sets the destination register.
    #[must_use]
    pub const fn rd(mut self, rd: usize) -> Self {
        self.rd = rd;
        self
    }

    /// Sets the source registers in order; unused trailing sources stay zero.
    #[must_use]
    pub fn sources(mut self, regs: &[usize]) -> Self {
        let mut slots = [0usize; 3];
        for (slot, r) in slots.iter_mut().zip(regs) {
            *slot = *r;
        }
        [self.rs1, self.rs2, self.rs3] = slots;
        self
    }

    /// Sets the immediate.
    #[must_use]
    pub const fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    /// Source registers Decode must read, by operand slot (`rs1`, `rs2`, `rs3`).
    pub const fn source_registers(&self) -> [Option<usize>; 3] {
        match self.opcode.format() {
            OperandFormat::SrcSrcSrc => [Some(self.rs1), Some(self.rs2), Some(self.rs3)],
            OperandFormat::SrcSrcImm | OperandFormat::DestSrcSrc => {
                [Some(self.rs1), Some(self.rs2), None]
            }
            OperandFormat::DestSrcImm | OperandFormat::SrcImm => [Some(self.rs1), None, None],
            OperandFormat::DestImm | OperandFormat::Imm | OperandFormat::Nullary => {
                [None, None, None]
            }
        }
    }

    /// Register this instruction commits in Writeback, if any.
    pub const fn destination(&self) -> Option<usize> {
        if self.opcode.writes_register() {
            Some(self.rd)
        } else {
            None
        }
    }

    /// Checks that every register the instruction names exists.
    pub fn validate(&self) -> SimResult<()> {
        let used = self
            .source_registers()
            .into_iter()
            .flatten()
            .chain(self.destination());
        for index in used {
            if index >= NUM_REGS {
                return Err(SimError::RegisterOutOfRange {
                    index,
                    limit: NUM_REGS,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    /// Formats in program-text form, e.g. `ADD,R3,R1,R2` or `MOVC,R1,#5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode.mnemonic();
        match self.opcode.format() {
            OperandFormat::SrcSrcImm => {
                write!(f, "{op},R{},R{},#{}", self.rs1, self.rs2, self.imm)
            }
            OperandFormat::SrcSrcSrc => {
                write!(f, "{op},R{},R{},R{}", self.rs1, self.rs2, self.rs3)
            }
            OperandFormat::DestSrcImm => {
                write!(f, "{op},R{},R{},#{}", self.rd, self.rs1, self.imm)
            }
            OperandFormat::DestSrcSrc => {
                write!(f, "{op},R{},R{},R{}", self.rd, self.rs1, self.rs2)
            }
            OperandFormat::DestImm => write!(f, "{op},R{},#{}", self.rd, self.imm),
            OperandFormat::SrcImm => write!(f, "{op},R{},#{}", self.rs1, self.imm),
            OperandFormat::Imm => write!(f, "{op},#{}", self.imm),
            OperandFormat::Nullary => f.write_str(op),
        }
    }
}
