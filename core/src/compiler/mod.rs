//! Bytecode compiler for Monkey programs.
//!
//! This module transforms a syntax tree into a flat instruction stream plus a
//! constant pool ([`Bytecode`]) for the stack-based virtual machine.
//!
//! ## Design
//!
//! - Single depth-first pass, operands emitted before their operator
//! - Exhaustive dispatch over node kinds; unsupported kinds fail the compile
//! - Forward jumps are emitted with a placeholder and back-patched in place
//! - Integer literals always get a fresh constant pool slot (no deduplication)

mod bytecode;
mod compile;
mod error;
mod options;
mod symbol_table;

#[cfg(test)]
mod compile_test;

pub use bytecode::Bytecode;
pub use compile::{Compiler, compile};
pub use error::CompileError;
pub use options::{CompilationOptions, MAX_INDEXED_ENTRIES};
pub use symbol_table::{Symbol, SymbolTable};
