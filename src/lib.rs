//! Monkey - bytecode compiler for the Monkey language
//!
//! # Overview
//!
//! This crate turns a Monkey syntax tree into bytecode for a stack-based
//! virtual machine: a flat, variable-width instruction stream plus a pool of
//! constants referenced by index.
//!
//! The pieces are usable on their own:
//!
//! - [`code`]: opcode table, operand encoding and decoding, disassembly
//! - [`ast`]: the syntax tree consumed by the compiler
//! - [`compiler`]: the tree-to-bytecode pass
//!
//! # Quick Start
//!
//! ```
//! use monkey::ast::{AstBuilder, InfixOp};
//! use monkey::bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//!
//! // 1 + 2
//! let program = ast.program([ast.expression_statement(
//!     ast.infix(InfixOp::Add, ast.int(1), ast.int(2)),
//! )]);
//!
//! let bytecode = monkey::compile(&program).unwrap();
//! assert_eq!(
//!     bytecode.instructions().to_string(),
//!     "0000 OpConstant 0\n0003 OpConstant 1\n0006 OpAdd\n",
//! );
//! ```

mod error;

pub use error::Error;

// Arena the syntax tree is built in
pub use bumpalo;

// Re-export public API from monkey_core
pub use monkey_core::{ast, code, compiler, object};

pub use monkey_core::code::{Instructions, Opcode, disassemble, make};
pub use monkey_core::compiler::{Bytecode, CompilationOptions, Compiler};
pub use monkey_core::object::Object;

/// Compile a program with default options.
pub fn compile(program: &ast::Program<'_>) -> Result<Bytecode, Error> {
    compile_with_options(program, CompilationOptions::default())
}

/// Compile a program with explicit limits.
pub fn compile_with_options(
    program: &ast::Program<'_>,
    options: CompilationOptions,
) -> Result<Bytecode, Error> {
    Ok(Compiler::new(options).compile(program)?)
}
