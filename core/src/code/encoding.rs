//! Operand packing and unpacking.
//!
//! Operands are unsigned and written most-significant byte first, in the order
//! the [`Definition`] lists them. Every width is supported; widths larger than
//! a machine word are zero-padded on the left.

use smallvec::SmallVec;

use super::{CodeError, Definition, Opcode};
use crate::{Vec, vec};

/// One encoded instruction: opcode byte followed by its operands.
pub type Instruction = Vec<u8>;

/// Decoded operand values. Every opcode in the table has at most one operand.
pub type Operands = SmallVec<[usize; 2]>;

const WORD: usize = core::mem::size_of::<usize>();

/// Encode a single instruction.
///
/// Fails if the operand count does not match the definition or an operand
/// does not fit its declared width. Never returns an empty instruction.
pub fn make(opcode: Opcode, operands: &[usize]) -> Result<Instruction, CodeError> {
    let definition = opcode.definition();

    let mut instruction = vec![0u8; definition.instruction_len()];
    instruction[0] = opcode.byte();
    write_operands(definition, operands, &mut instruction[1..])?;
    Ok(instruction)
}

/// Encode only the operand bytes of an instruction.
pub fn encode_operands(definition: &Definition, operands: &[usize]) -> Result<Vec<u8>, CodeError> {
    let mut bytes = vec![0u8; definition.operands_len()];
    write_operands(definition, operands, &mut bytes)?;
    Ok(bytes)
}

/// Write `operands` into `out`, which must be exactly `definition.operands_len()` long.
pub(crate) fn write_operands(
    definition: &Definition,
    operands: &[usize],
    out: &mut [u8],
) -> Result<(), CodeError> {
    if operands.len() != definition.arity() {
        return Err(CodeError::ArityMismatch {
            name: definition.name,
            expected: definition.arity(),
            actual: operands.len(),
        });
    }
    debug_assert_eq!(out.len(), definition.operands_len());

    let mut offset = 0;
    for (&operand, &width) in operands.iter().zip(definition.operand_widths) {
        if !fits(operand, width) {
            return Err(CodeError::OperandOutOfRange {
                name: definition.name,
                operand,
                width,
            });
        }
        write_be(operand, &mut out[offset..offset + width]);
        offset += width;
    }
    Ok(())
}

/// Decode the operands that follow an opcode byte.
///
/// `bytes` starts right after the opcode. Returns the operand values and the
/// number of bytes they took (the opcode byte is not counted).
pub fn read_operands(
    definition: &Definition,
    bytes: &[u8],
) -> Result<(Operands, usize), CodeError> {
    let needed = definition.operands_len();
    if bytes.len() < needed {
        return Err(CodeError::Truncated {
            name: definition.name,
            needed,
            available: bytes.len(),
        });
    }

    let mut operands = Operands::with_capacity(definition.arity());
    let mut offset = 0;
    for &width in definition.operand_widths {
        let Some(operand) = read_be(&bytes[offset..offset + width]) else {
            return Err(CodeError::OperandOverflow {
                name: definition.name,
                width,
            });
        };
        operands.push(operand);
        offset += width;
    }
    Ok((operands, offset))
}

/// Read one big-endian 2-byte operand.
///
/// `bytes` must hold at least two bytes; this is the machine's fast path and
/// the caller has already validated the instruction.
pub fn read_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn fits(operand: usize, width: usize) -> bool {
    width >= WORD || operand >> (width * 8) == 0
}

fn write_be(operand: usize, out: &mut [u8]) {
    let width = out.len();
    // Left padding for widths wider than a word stays zero.
    let padding = width.saturating_sub(WORD);
    let be = operand.to_be_bytes();
    let used = width - padding;
    out[padding..].copy_from_slice(&be[WORD - used..]);
}

fn read_be(bytes: &[u8]) -> Option<usize> {
    let padding = bytes.len().saturating_sub(WORD);
    if bytes[..padding].iter().any(|&b| b != 0) {
        return None;
    }
    Some(
        bytes[padding..]
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize),
    )
}
