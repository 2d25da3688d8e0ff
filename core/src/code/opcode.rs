//! Opcode table - the single source of truth for operand shapes.
//!
//! # Instruction Format
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────┐
//! │   Opcode   │  Operands (big-endian, table order)  │
//! │  (8 bits)  │  sum(operand_widths) bytes           │
//! └────────────┴──────────────────────────────────────┘
//! ```
//!
//! Opcode byte values are part of the wire format shared with the virtual
//! machine. They are assigned densely from 0 so that [`DEFINITIONS`] can be
//! indexed directly by the opcode byte. Removing or renumbering an entry breaks
//! every stream emitted before the change; new opcodes are appended.
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`

use static_assertions::assert_eq_size;

use super::CodeError;

/// Operation tag, exactly one byte in the instruction stream.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    /// Push constant from pool
    /// Operand: u16 index | Stack: [...] -> [..., constants[index]]
    Constant = 0,

    /// Stack: [..., a, b] -> [..., a + b]
    Add = 1,

    /// Discard the top value
    /// Stack: [..., a] -> [...]
    Pop = 2,

    /// Stack: [..., a, b] -> [..., a - b]
    Sub = 3,

    /// Stack: [..., a, b] -> [..., a * b]
    Mul = 4,

    /// Stack: [..., a, b] -> [..., a / b]
    Div = 5,

    /// Stack: [...] -> [..., true]
    True = 6,

    /// Stack: [...] -> [..., false]
    False = 7,

    /// Stack: [..., a, b] -> [..., a == b]
    Equal = 8,

    /// Stack: [..., a, b] -> [..., a != b]
    NotEqual = 9,

    /// There is no less-than: the compiler swaps the operands instead.
    /// Stack: [..., a, b] -> [..., a > b]
    GreaterThan = 10,

    /// Stack: [..., a] -> [..., -a]
    Minus = 11,

    /// Stack: [..., a] -> [..., !a]
    Bang = 12,

    /// Pop and jump if the condition is not truthy
    /// Operand: u16 absolute byte offset | Stack: [..., cond] -> [...]
    JumpNotTruthy = 13,

    /// Unconditional jump
    /// Operand: u16 absolute byte offset | Stack: [...] -> [...]
    Jump = 14,

    /// Stack: [...] -> [..., null]
    Null = 15,

    /// Operand: u16 global index | Stack: [...] -> [..., globals[index]]
    GetGlobal = 16,

    /// Operand: u16 global index | Stack: [..., value] -> [...]
    SetGlobal = 17,
}

assert_eq_size!(Opcode, u8);

/// Shape of one opcode: its debugging name and operand widths in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition {
    pub opcode: Opcode,
    pub name: &'static str,
    pub operand_widths: &'static [usize],
}

impl Definition {
    /// Number of operands an instruction of this opcode carries.
    pub fn arity(&self) -> usize {
        self.operand_widths.len()
    }

    /// Bytes taken by the operands, excluding the opcode byte.
    pub fn operands_len(&self) -> usize {
        self.operand_widths.iter().sum()
    }

    /// Total encoded size, opcode byte included.
    pub fn instruction_len(&self) -> usize {
        1 + self.operands_len()
    }
}

const fn def(opcode: Opcode, name: &'static str, operand_widths: &'static [usize]) -> Definition {
    Definition {
        opcode,
        name,
        operand_widths,
    }
}

/// Opcode table, indexed by opcode byte. Immutable for the life of the process.
pub static DEFINITIONS: [Definition; Opcode::COUNT] = [
    def(Opcode::Constant, "OpConstant", &[2]),
    def(Opcode::Add, "OpAdd", &[]),
    def(Opcode::Pop, "OpPop", &[]),
    def(Opcode::Sub, "OpSub", &[]),
    def(Opcode::Mul, "OpMul", &[]),
    def(Opcode::Div, "OpDiv", &[]),
    def(Opcode::True, "OpTrue", &[]),
    def(Opcode::False, "OpFalse", &[]),
    def(Opcode::Equal, "OpEqual", &[]),
    def(Opcode::NotEqual, "OpNotEqual", &[]),
    def(Opcode::GreaterThan, "OpGreaterThan", &[]),
    def(Opcode::Minus, "OpMinus", &[]),
    def(Opcode::Bang, "OpBang", &[]),
    def(Opcode::JumpNotTruthy, "OpJumpNotTruthy", &[2]),
    def(Opcode::Jump, "OpJump", &[2]),
    def(Opcode::Null, "OpNull", &[]),
    def(Opcode::GetGlobal, "OpGetGlobal", &[2]),
    def(Opcode::SetGlobal, "OpSetGlobal", &[2]),
];

impl Opcode {
    /// Number of defined opcodes.
    pub const COUNT: usize = 18;

    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn definition(self) -> &'static Definition {
        &DEFINITIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

impl TryFrom<u8> for Opcode {
    type Error = CodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        lookup(byte).map(|definition| definition.opcode)
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode as u8
    }
}

/// Find the definition of a raw opcode byte.
pub fn lookup(byte: u8) -> Result<&'static Definition, CodeError> {
    DEFINITIONS
        .get(byte as usize)
        .ok_or(CodeError::UndefinedOpcode(byte))
}
