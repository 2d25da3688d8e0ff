use bumpalo::Bump;

use super::{BlockStatement, Expression, InfixOp, PrefixOp, Program, Statement};

/// Builds syntax trees in a `bumpalo` arena.
///
/// Hosts without a parser (and the tests) use this to assemble programs.
///
/// # Example
///
/// ```
/// use monkey_core::ast::{AstBuilder, InfixOp};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let ast = AstBuilder::new(&arena);
///
/// // 1 + 2
/// let program = ast.program([ast.expression_statement(
///     ast.infix(InfixOp::Add, ast.int(1), ast.int(2)),
/// )]);
/// assert_eq!(program.to_string(), "(1 + 2)");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct AstBuilder<'a> {
    arena: &'a Bump,
}

impl<'a> AstBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self { arena }
    }

    fn alloc(self, expr: Expression<'a>) -> &'a Expression<'a> {
        self.arena.alloc(expr)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn program<I>(self, statements: I) -> Program<'a>
    where
        I: IntoIterator<Item = Statement<'a>>,
        I::IntoIter: ExactSizeIterator,
    {
        Program {
            statements: self.arena.alloc_slice_fill_iter(statements),
        }
    }

    pub fn block<I>(self, statements: I) -> BlockStatement<'a>
    where
        I: IntoIterator<Item = Statement<'a>>,
        I::IntoIter: ExactSizeIterator,
    {
        BlockStatement {
            statements: self.arena.alloc_slice_fill_iter(statements),
        }
    }

    pub fn let_statement(self, name: &str, value: &'a Expression<'a>) -> Statement<'a> {
        Statement::Let {
            name: self.arena.alloc_str(name),
            value,
        }
    }

    pub fn return_statement(self, value: &'a Expression<'a>) -> Statement<'a> {
        Statement::Return(value)
    }

    pub fn expression_statement(self, expr: &'a Expression<'a>) -> Statement<'a> {
        Statement::Expression(expr)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn ident(self, name: &str) -> &'a Expression<'a> {
        self.alloc(Expression::Identifier(self.arena.alloc_str(name)))
    }

    pub fn int(self, value: i64) -> &'a Expression<'a> {
        self.alloc(Expression::Integer(value))
    }

    pub fn boolean(self, value: bool) -> &'a Expression<'a> {
        self.alloc(Expression::Boolean(value))
    }

    pub fn string(self, value: &str) -> &'a Expression<'a> {
        self.alloc(Expression::String(self.arena.alloc_str(value)))
    }

    pub fn prefix(self, op: PrefixOp, right: &'a Expression<'a>) -> &'a Expression<'a> {
        self.alloc(Expression::Prefix { op, right })
    }

    pub fn infix(
        self,
        op: InfixOp,
        left: &'a Expression<'a>,
        right: &'a Expression<'a>,
    ) -> &'a Expression<'a> {
        self.alloc(Expression::Infix { op, left, right })
    }

    pub fn if_else(
        self,
        condition: &'a Expression<'a>,
        consequence: BlockStatement<'a>,
        alternative: Option<BlockStatement<'a>>,
    ) -> &'a Expression<'a> {
        self.alloc(Expression::If {
            condition,
            consequence,
            alternative,
        })
    }

    pub fn function(self, parameters: &[&str], body: BlockStatement<'a>) -> &'a Expression<'a> {
        let parameters = self
            .arena
            .alloc_slice_fill_iter(parameters.iter().map(|p| &*self.arena.alloc_str(p)));
        self.alloc(Expression::Function { parameters, body })
    }

    pub fn call<I>(self, function: &'a Expression<'a>, arguments: I) -> &'a Expression<'a>
    where
        I: IntoIterator<Item = &'a Expression<'a>>,
        I::IntoIter: ExactSizeIterator,
    {
        self.alloc(Expression::Call {
            function,
            arguments: self.arena.alloc_slice_fill_iter(arguments),
        })
    }

    pub fn array<I>(self, elements: I) -> &'a Expression<'a>
    where
        I: IntoIterator<Item = &'a Expression<'a>>,
        I::IntoIter: ExactSizeIterator,
    {
        let elements = self.arena.alloc_slice_fill_iter(elements);
        self.alloc(Expression::Array(elements))
    }

    pub fn index(self, left: &'a Expression<'a>, index: &'a Expression<'a>) -> &'a Expression<'a> {
        self.alloc(Expression::Index { left, index })
    }
}
