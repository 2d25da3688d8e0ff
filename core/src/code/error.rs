//! Instruction encoding and decoding errors.

use thiserror::Error;

/// Errors raised while encoding, decoding or patching instructions.
///
/// None of these are recoverable inside the encoder itself; they are always
/// returned to the caller, which decides whether to abort or report and skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The byte does not correspond to any entry in the opcode table.
    #[error("opcode {0} undefined")]
    UndefinedOpcode(u8),

    /// The number of operands does not match the definition.
    #[error("{name} expects {expected} operand(s), got {actual}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The operand does not fit the declared width.
    #[error("operand {operand} of {name} does not fit in {width} byte(s)")]
    OperandOutOfRange {
        name: &'static str,
        operand: usize,
        width: usize,
    },

    /// A decoded operand does not fit a machine word.
    #[error("operand of {name} overflows a {width}-byte read")]
    OperandOverflow { name: &'static str, width: usize },

    /// The stream ends before the operands the definition requires.
    #[error("{name} needs {needed} operand byte(s), only {available} left")]
    Truncated {
        name: &'static str,
        needed: usize,
        available: usize,
    },

    /// A patch position is not inside the instruction stream.
    #[error("position {position} is out of bounds for {len} byte(s) of instructions")]
    PositionOutOfBounds { position: usize, len: usize },
}
