//! Public error type for the Monkey API.

use miette::Diagnostic;
use monkey_core::code::CodeError;
use monkey_core::compiler::CompileError;

/// Error returned by the facade.
///
/// Wraps the core crate's errors and attaches a stable diagnostic code so
/// hosts can render them with `miette`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum Error {
    /// The syntax tree could not be compiled.
    #[error("compilation failed: {0}")]
    #[diagnostic(code(monkey::compile))]
    Compile(CompileError),

    /// An instruction could not be encoded, decoded or patched.
    #[error("invalid bytecode: {0}")]
    #[diagnostic(
        code(monkey::bytecode),
        help("operands must match the opcode's definition")
    )]
    Bytecode(#[from] CodeError),
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Encoding(err) => Error::Bytecode(err),
            err => Error::Compile(err),
        }
    }
}

impl Error {
    /// True if the error came from the compiler rather than the encoder.
    pub fn is_compile(&self) -> bool {
        matches!(self, Error::Compile(_))
    }
}
