//! Bytecode compilation errors.

use thiserror::Error;

use crate::String;
use crate::code::CodeError;

/// Errors that can occur during bytecode compilation.
///
/// Compilation stops at the first error and produces no bytecode. Type errors
/// are not detected here; the virtual machine reports them at run time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The tree contains a node kind the compiler has no rule for.
    #[error("unsupported node: {kind}")]
    UnsupportedNode { kind: &'static str },

    /// An identifier was used before any `let` bound it.
    #[error("undefined variable {name}")]
    UndefinedVariable { name: String },

    /// The constant pool is full.
    #[error("too many constants (limit: {limit})")]
    TooManyConstants { limit: usize },

    /// The global binding table is full.
    #[error("too many global bindings (limit: {limit})")]
    TooManyGlobals { limit: usize },

    /// An instruction could not be encoded or patched.
    #[error(transparent)]
    Encoding(#[from] CodeError),
}
