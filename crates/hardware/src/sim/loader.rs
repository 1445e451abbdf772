//! Program loading and the instruction store.
//!
//! This module turns a program source into the immutable instruction store the pipeline
//! fetches from. It provides:
//! 1. **Sources:** The `ProgramSource` trait with file, in-memory text and pre-built
//!    instruction implementations.
//! 2. **Validation:** Every instruction's register operands are range-checked before the
//!    store is built, so a bad program never reaches the pipeline.
//! 3. **Addressing:** Lookup by program counter, `(pc - base) / 4`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::{SimError, SimResult};
use crate::isa::Instruction;
use crate::isa::asm::parse_program;

/// Something that can produce an ordered instruction sequence.
pub trait ProgramSource {
    /// Produces the program in execution order.
    fn load(&self) -> SimResult<Vec<Instruction>>;
}

/// A program text file on disk.
#[derive(Clone, Debug)]
pub struct AsmFile {
    path: PathBuf,
}

impl AsmFile {
    /// Refers to the program at `path`; nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the program file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgramSource for AsmFile {
    fn load(&self) -> SimResult<Vec<Instruction>> {
        let text = fs::read_to_string(&self.path).map_err(|source| SimError::ProgramRead {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "read program");
        parse_program(&text)
    }
}

/// Program text held in memory.
#[derive(Clone, Copy, Debug)]
pub struct AsmText<'a>(pub &'a str);

impl ProgramSource for AsmText<'_> {
    fn load(&self) -> SimResult<Vec<Instruction>> {
        parse_program(self.0)
    }
}

impl ProgramSource for [Instruction] {
    fn load(&self) -> SimResult<Vec<Instruction>> {
        Ok(self.to_vec())
    }
}

impl ProgramSource for Vec<Instruction> {
    fn load(&self) -> SimResult<Vec<Instruction>> {
        Ok(self.clone())
    }
}

/// Immutable, insertion-ordered program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionStore {
    instructions: Vec<Instruction>,
}

impl InstructionStore {
    /// Loads and validates a program from `source`.
    pub fn load<S: ProgramSource + ?Sized>(source: &S) -> SimResult<Self> {
        Self::new(source.load()?)
    }

    /// Builds a store from decoded instructions, rejecting out-of-range registers.
    pub fn new(instructions: Vec<Instruction>) -> SimResult<Self> {
        for instr in &instructions {
            instr.validate()?;
        }
        Ok(Self { instructions })
    }

    /// Number of instructions in the program.
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Instruction at `index`, program order.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Instruction addressed by `pc` when the program starts at `base`.
    ///
    /// Returns `None` below `base`, between instruction slots, or past the last instruction.
    pub fn fetch(&self, pc: u32, base: u32) -> Option<Instruction> {
        let offset = pc.checked_sub(base)?;
        if offset % INSTRUCTION_SIZE != 0 {
            return None;
        }
        self.get((offset / INSTRUCTION_SIZE) as usize).copied()
    }

    /// All instructions, program order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}
