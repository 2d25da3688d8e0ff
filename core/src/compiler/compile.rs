//! Bytecode compiler implementation.

use crate::{
    ToString, Vec,
    ast::{BlockStatement, Expression, InfixOp, PrefixOp, Program, Statement},
    code::{Instructions, Opcode, make},
    compiler::{Bytecode, CompilationOptions, CompileError, SymbolTable},
    object::Object,
};

/// Placeholder operand for forward jumps, patched once the target is known.
const JUMP_PLACEHOLDER: usize = 9999;

/// Bytecode compiler that turns a syntax tree into VM bytecode.
///
/// The compiler walks the tree depth-first and emits instructions in
/// evaluation order: operands before the operator that consumes them. One
/// compiler compiles one program; [`Compiler::compile`] consumes it, so a
/// failed compilation can never leak a partially built [`Bytecode`].
pub struct Compiler<'ast> {
    /// Instruction stream under construction
    instructions: Instructions,

    /// Constant pool for literal values
    ///
    /// Append-only: every literal gets a fresh index, even if an equal value
    /// is already in the pool.
    constants: Vec<Object>,

    /// Global bindings introduced by `let`
    symbols: SymbolTable<'ast>,

    options: CompilationOptions,
}

impl<'ast> Compiler<'ast> {
    /// Create a new compiler with empty buffers.
    pub fn new(options: CompilationOptions) -> Self {
        Self {
            instructions: Instructions::new(),
            constants: Vec::new(),
            symbols: SymbolTable::new(),
            options,
        }
    }

    /// Compile a whole program.
    pub fn compile(mut self, program: &Program<'ast>) -> Result<Bytecode, CompileError> {
        tracing::debug!(
            statements = program.statements.len(),
            "Compiling program"
        );

        self.compile_statements(program.statements)?;

        tracing::debug!(
            bytes = self.instructions.len(),
            constants = self.constants.len(),
            globals = self.symbols.len(),
            "Compilation finished"
        );
        Ok(Bytecode::new(self.instructions, self.constants))
    }

    // === Statements ===

    /// Compile a statement sequence.
    ///
    /// Every expression statement except the last one is followed by `OpPop`,
    /// so a sequence leaves at most one value (its last) on the stack.
    fn compile_statements(&mut self, statements: &[Statement<'ast>]) -> Result<(), CompileError> {
        let last = statements.len().saturating_sub(1);
        for (i, statement) in statements.iter().enumerate() {
            self.compile_statement(statement)?;
            if matches!(statement, Statement::Expression(_)) && i != last {
                self.emit(Opcode::Pop, &[])?;
            }
        }
        Ok(())
    }

    fn compile_statement(&mut self, statement: &Statement<'ast>) -> Result<(), CompileError> {
        match statement {
            Statement::Expression(expr) => self.compile_expression(expr),

            Statement::Let { name, value } => {
                self.compile_expression(value)?;

                let limit = self.options.global_limit();
                if self.symbols.len() >= limit {
                    return Err(CompileError::TooManyGlobals { limit });
                }
                let symbol = self.symbols.define(*name);
                self.emit(Opcode::SetGlobal, &[symbol.index])?;
                Ok(())
            }

            Statement::Return(_) => Err(CompileError::UnsupportedNode {
                kind: statement.kind(),
            }),
        }
    }

    /// Compile a block used as an expression.
    ///
    /// A block must leave exactly one value, so one that does not end in an
    /// expression statement pushes `null`.
    fn compile_block(&mut self, block: &BlockStatement<'ast>) -> Result<(), CompileError> {
        self.compile_statements(block.statements)?;
        if !matches!(block.statements.last(), Some(Statement::Expression(_))) {
            self.emit(Opcode::Null, &[])?;
        }
        Ok(())
    }

    // === Expressions ===

    fn compile_expression(&mut self, expr: &Expression<'ast>) -> Result<(), CompileError> {
        match expr {
            // === Literals ===
            Expression::Integer(value) => {
                let index = self.add_constant(Object::from(*value))?;
                self.emit(Opcode::Constant, &[index])?;
            }

            Expression::Boolean(true) => {
                self.emit(Opcode::True, &[])?;
            }

            Expression::Boolean(false) => {
                self.emit(Opcode::False, &[])?;
            }

            // === Operators ===
            Expression::Prefix { op, right } => {
                self.compile_expression(right)?;
                let opcode = match op {
                    PrefixOp::Minus => Opcode::Minus,
                    PrefixOp::Bang => Opcode::Bang,
                };
                self.emit(opcode, &[])?;
            }

            Expression::Infix { op, left, right } => {
                // a < b is emitted as b > a
                let (first, second) = match op {
                    InfixOp::Lt => (right, left),
                    _ => (left, right),
                };
                self.compile_expression(first)?;
                self.compile_expression(second)?;

                let opcode = match op {
                    InfixOp::Add => Opcode::Add,
                    InfixOp::Sub => Opcode::Sub,
                    InfixOp::Mul => Opcode::Mul,
                    InfixOp::Div => Opcode::Div,
                    InfixOp::Eq => Opcode::Equal,
                    InfixOp::NotEq => Opcode::NotEqual,
                    InfixOp::Gt | InfixOp::Lt => Opcode::GreaterThan,
                };
                self.emit(opcode, &[])?;
            }

            // === Conditionals ===
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                self.compile_expression(condition)?;

                let jump_not_truthy = self.emit(Opcode::JumpNotTruthy, &[JUMP_PLACEHOLDER])?;
                self.compile_block(consequence)?;
                let jump = self.emit(Opcode::Jump, &[JUMP_PLACEHOLDER])?;

                let else_label = self.instructions.len();
                self.patch_jump(jump_not_truthy, else_label)?;

                match alternative {
                    Some(alternative) => self.compile_block(alternative)?,
                    None => {
                        self.emit(Opcode::Null, &[])?;
                    }
                }

                let end_label = self.instructions.len();
                self.patch_jump(jump, end_label)?;
            }

            // === Bindings ===
            Expression::Identifier(name) => {
                let Some(symbol) = self.symbols.resolve(name) else {
                    return Err(CompileError::UndefinedVariable {
                        name: name.to_string(),
                    });
                };
                self.emit(Opcode::GetGlobal, &[symbol.index])?;
            }

            Expression::String(_)
            | Expression::Function { .. }
            | Expression::Call { .. }
            | Expression::Array(_)
            | Expression::Index { .. } => {
                return Err(CompileError::UnsupportedNode { kind: expr.kind() });
            }
        }
        Ok(())
    }

    // === Instruction Emission ===

    /// Encode and append an instruction, returning its start offset.
    fn emit(&mut self, opcode: Opcode, operands: &[usize]) -> Result<usize, CompileError> {
        let instruction = make(opcode, operands)?;
        let position = self.instructions.push(&instruction);
        tracing::trace!(position, opcode = opcode.name(), ?operands, "emit");
        Ok(position)
    }

    /// Point the jump emitted at `position` to `target`.
    fn patch_jump(&mut self, position: usize, target: usize) -> Result<(), CompileError> {
        tracing::trace!(position, target, "patch jump");
        self.instructions.patch_operand(position, target)?;
        Ok(())
    }

    // === Constant Pool Management ===

    /// Append a constant to the pool and return its index.
    fn add_constant(&mut self, value: Object) -> Result<usize, CompileError> {
        let limit = self.options.constant_limit();
        if self.constants.len() >= limit {
            return Err(CompileError::TooManyConstants { limit });
        }
        self.constants.push(value);
        Ok(self.constants.len() - 1)
    }
}

impl Default for Compiler<'_> {
    fn default() -> Self {
        Self::new(CompilationOptions::default())
    }
}

/// Convenience function to compile a program in one call with default options.
pub fn compile(program: &Program<'_>) -> Result<Bytecode, CompileError> {
    Compiler::default().compile(program)
}
