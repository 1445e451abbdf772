//! APEX instruction set.
//!
//! 1. **Opcodes:** The closed opcode enumeration and its classification helpers.
//! 2. **Instructions:** Immutable decoded instruction records and their textual form.
//! 3. **Assembler:** Parsing of the line-oriented program text into instruction records.

/// Line-oriented assembly text parser.
pub mod asm;
/// Decoded instruction record.
pub mod instruction;
/// Opcode enumeration and operand formats.
pub mod opcode;

pub use instruction::Instruction;
pub use opcode::{InstrClass, Opcode, OperandFormat};
