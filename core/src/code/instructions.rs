//! The instruction stream and its disassembly.

use core::fmt;
use core::ops::Deref;

use super::encoding::{Operands, read_operands, write_operands};
use super::{CodeError, Definition, lookup};
use crate::{String, Vec};

/// Flat, offset-addressed byte buffer of concatenated instructions.
///
/// The buffer is append-only. The one exception is [`patch_operand`], which
/// rewrites the operand bytes of an already emitted single-operand
/// instruction in place (used to back-patch forward jumps).
///
/// [`patch_operand`]: Instructions::patch_operand
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Instructions(Vec<u8>);

impl Instructions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate encoded instructions into one stream.
    pub fn concat<I, B>(instructions: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut stream = Self::new();
        for instruction in instructions {
            stream.push(instruction.as_ref());
        }
        stream
    }

    /// Append one encoded instruction and return its start offset.
    pub fn push(&mut self, instruction: &[u8]) -> usize {
        let position = self.0.len();
        self.0.extend_from_slice(instruction);
        position
    }

    /// Overwrite the operand of the instruction starting at `position`.
    ///
    /// `position` must be the first byte of an emitted instruction whose
    /// definition has exactly one operand. The operand is re-encoded with the
    /// declared width, so the stream length never changes.
    pub fn patch_operand(&mut self, position: usize, operand: usize) -> Result<(), CodeError> {
        let len = self.0.len();
        let byte = *self
            .0
            .get(position)
            .ok_or(CodeError::PositionOutOfBounds { position, len })?;
        let definition = lookup(byte)?;
        if definition.arity() != 1 {
            return Err(CodeError::ArityMismatch {
                name: definition.name,
                expected: definition.arity(),
                actual: 1,
            });
        }

        let start = position + 1;
        let end = start + definition.operands_len();
        if end > len {
            return Err(CodeError::Truncated {
                name: definition.name,
                needed: definition.operands_len(),
                available: len - start,
            });
        }
        write_operands(definition, &[operand], &mut self.0[start..end])
    }

    /// Decode the stream front to back.
    pub fn iter(&self) -> InstructionIter<'_> {
        InstructionIter::new(&self.0)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Instructions {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Instructions {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Instructions {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl<'a> IntoIterator for &'a Instructions {
    type Item = (usize, Result<DecodedInstruction, CodeError>);
    type IntoIter = InstructionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// One instruction read back out of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub definition: &'static Definition,
    pub operands: Operands,
}

impl DecodedInstruction {
    /// Encoded size in bytes, opcode included.
    pub fn encoded_len(&self) -> usize {
        self.definition.instruction_len()
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition.name)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

/// Iterator over `(offset, decoded instruction)` pairs.
///
/// An undefined opcode yields an error and the scan moves on to the next
/// byte. Truncated operands yield an error and end the scan, since nothing
/// after them can be located.
#[derive(Debug, Clone)]
pub struct InstructionIter<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> InstructionIter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for InstructionIter<'_> {
    type Item = (usize, Result<DecodedInstruction, CodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset;
        let byte = *self.bytes.get(offset)?;

        let definition = match lookup(byte) {
            Ok(definition) => definition,
            Err(err) => {
                self.offset += 1;
                return Some((offset, Err(err)));
            }
        };

        match read_operands(definition, &self.bytes[offset + 1..]) {
            Ok((operands, _)) => {
                let decoded = DecodedInstruction {
                    definition,
                    operands,
                };
                self.offset += decoded.encoded_len();
                Some((offset, Ok(decoded)))
            }
            Err(err) => {
                self.offset = self.bytes.len();
                Some((offset, Err(err)))
            }
        }
    }
}

// ============================================================================
// Disassembly
// ============================================================================

/// Render a stream as one `"{offset:04} {name} {operands}"` line per instruction.
///
/// Undecodable positions render as `"{offset:04} ERROR: {message}"`.
pub fn disassemble(bytes: &[u8]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_listing(&mut out, bytes, "");
    out
}

/// Write the disassembly of `bytes`, each line prefixed with `indent`.
pub(crate) fn write_listing(out: &mut impl fmt::Write, bytes: &[u8], indent: &str) -> fmt::Result {
    for (offset, decoded) in InstructionIter::new(bytes) {
        match decoded {
            Ok(instruction) => writeln!(out, "{}{:04} {}", indent, offset, instruction)?,
            Err(err) => writeln!(out, "{}{:04} ERROR: {}", indent, offset, err)?,
        }
    }
    Ok(())
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, &self.0, "")
    }
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instructions [")?;
        write_listing(f, &self.0, "    ")?;
        write!(f, "]")
    }
}
