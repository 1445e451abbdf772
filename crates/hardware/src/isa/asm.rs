//! Program text assembler.
//!
//! Programs are one instruction per line with operands separated by commas and/or
//! whitespace: `MOVC,R1,#5`, `ADD R3, R1, R2`, `STORE,R1,R2,#0`. Registers are written
//! `R<n>` and immediates `#<n>`. Blank lines and lines starting with `;` or `//` are skipped.
//!
//! Every problem is reported with its 1-based line number so the caller can abort the
//! simulation before it starts.

use super::instruction::Instruction;
use super::opcode::{Opcode, OperandFormat};
use crate::common::constants::NUM_REGS;
use crate::common::error::{SimError, SimResult};

/// Parses a whole program, returning instructions in source order.
pub fn parse_program(text: &str) -> SimResult<Vec<Instruction>> {
    let mut program = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(instr) = parse_line(line, i + 1)? {
            program.push(instr);
        }
    }
    Ok(program)
}

/// Parses a single program line.
///
/// # Arguments
///
/// * `line` - Raw source line.
/// * `line_no` - 1-based line number used in error messages.
///
/// # Returns
///
/// `Ok(None)` for blank and comment lines, `Ok(Some(_))` for an instruction.
pub fn parse_line(line: &str, line_no: usize) -> SimResult<Option<Instruction>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(';') || line.starts_with("//") {
        return Ok(None);
    }

    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let Some(mnemonic) = tokens.next() else {
        return Ok(None);
    };
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| SimError::UnknownOpcode {
        line: line_no,
        mnemonic: mnemonic.to_string(),
    })?;

    let operands: Vec<&str> = tokens.collect();
    let format = opcode.format();
    if operands.len() != format.arity() {
        return Err(SimError::Parse {
            line: line_no,
            message: format!(
                "{} takes {} operand(s), found {}",
                opcode.mnemonic(),
                format.arity(),
                operands.len()
            ),
        });
    }

    let err = |message: String| SimError::Parse {
        line: line_no,
        message,
    };
    let reg = |i: usize| register(operands[i]).map_err(err);
    let imm = |i: usize| immediate(operands[i]).map_err(err);

    let base = Instruction::new(opcode);
    let instr = match format {
        OperandFormat::SrcSrcImm => base.sources(&[reg(0)?, reg(1)?]).imm(imm(2)?),
        OperandFormat::SrcSrcSrc => base.sources(&[reg(0)?, reg(1)?, reg(2)?]),
        OperandFormat::DestSrcImm => base.rd(reg(0)?).sources(&[reg(1)?]).imm(imm(2)?),
        OperandFormat::DestSrcSrc => base.rd(reg(0)?).sources(&[reg(1)?, reg(2)?]),
        OperandFormat::DestImm => base.rd(reg(0)?).imm(imm(1)?),
        OperandFormat::SrcImm => base.sources(&[reg(0)?]).imm(imm(1)?),
        OperandFormat::Imm => base.imm(imm(0)?),
        OperandFormat::Nullary => base,
    };
    Ok(Some(instr))
}

fn register(token: &str) -> Result<usize, String> {
    let digits = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .ok_or_else(|| format!("expected register, found '{token}'"))?;
    let index: usize = digits
        .parse()
        .map_err(|_| format!("malformed register '{token}'"))?;
    if index >= NUM_REGS {
        return Err(format!(
            "register R{index} out of range (machine has {NUM_REGS} registers)"
        ));
    }
    Ok(index)
}

fn immediate(token: &str) -> Result<i32, String> {
    let digits = token
        .strip_prefix('#')
        .ok_or_else(|| format!("expected immediate, found '{token}'"))?;
    digits
        .parse()
        .map_err(|_| format!("malformed immediate '{token}'"))
}
