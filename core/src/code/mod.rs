//! Instruction encoding subsystem.
//!
//! - `opcode`: the opcode table (names and operand widths)
//! - `encoding`: building instructions and reading their operands back
//! - `instructions`: the byte stream, back-patching and disassembly
//!
//! The byte layout produced here is the wire format between the compiler and
//! the virtual machine.

mod encoding;
mod error;
mod instructions;
mod opcode;


pub use encoding::{Instruction, Operands, encode_operands, make, read_operands, read_u16};
pub use error::CodeError;
pub use instructions::{DecodedInstruction, InstructionIter, Instructions, disassemble};
pub(crate) use instructions::write_listing;
pub use opcode::{DEFINITIONS, Definition, Opcode, lookup};
