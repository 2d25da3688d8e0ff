//! Syntax tree consumed by the compiler.
//!
//! The tree is produced by an external parser (or by [`AstBuilder`]) and is
//! treated as already validated. All nodes live in a `bumpalo` arena: children
//! are `&'a` references and lists are `&'a` slices, so a tree is immutable and
//! acyclic by construction.

mod builder;

use core::fmt;

pub use builder::AstBuilder;

/// Root of a parsed program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Program<'a> {
    pub statements: &'a [Statement<'a>],
}

/// A `{ ... }` block, used by conditionals and function bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStatement<'a> {
    pub statements: &'a [Statement<'a>],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statement<'a> {
    /// `let <name> = <value>;`
    Let {
        name: &'a str,
        value: &'a Expression<'a>,
    },
    /// `return <value>;`
    Return(&'a Expression<'a>),
    /// An expression evaluated for its value.
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    /// `-x`
    Minus,
    /// `!x`
    Bang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expression<'a> {
    Identifier(&'a str),
    Integer(i64),
    Boolean(bool),
    String(&'a str),
    Prefix {
        op: PrefixOp,
        right: &'a Expression<'a>,
    },
    Infix {
        op: InfixOp,
        left: &'a Expression<'a>,
        right: &'a Expression<'a>,
    },
    If {
        condition: &'a Expression<'a>,
        consequence: BlockStatement<'a>,
        alternative: Option<BlockStatement<'a>>,
    },
    Function {
        parameters: &'a [&'a str],
        body: BlockStatement<'a>,
    },
    Call {
        function: &'a Expression<'a>,
        arguments: &'a [&'a Expression<'a>],
    },
    Array(&'a [&'a Expression<'a>]),
    Index {
        left: &'a Expression<'a>,
        index: &'a Expression<'a>,
    },
}

impl Statement<'_> {
    /// Static name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Let { .. } => "let statement",
            Statement::Return(_) => "return statement",
            Statement::Expression(_) => "expression statement",
        }
    }
}

impl Expression<'_> {
    /// Static name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "identifier",
            Expression::Integer(_) => "integer literal",
            Expression::Boolean(_) => "boolean literal",
            Expression::String(_) => "string literal",
            Expression::Prefix { .. } => "prefix expression",
            Expression::Infix { .. } => "infix expression",
            Expression::If { .. } => "if expression",
            Expression::Function { .. } => "function literal",
            Expression::Call { .. } => "call expression",
            Expression::Array(_) => "array literal",
            Expression::Index { .. } => "index expression",
        }
    }
}

impl PrefixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            PrefixOp::Minus => "-",
            PrefixOp::Bang => "!",
        }
    }
}

impl InfixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
        }
    }
}

// ============================================================================
// Display: source-like rendering for logs and test messages
// ============================================================================

impl fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for BlockStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for statement in self.statements {
            write!(f, "{}", statement)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::String(value) => write!(f, "{:?}", value),
            Expression::Prefix { op, right } => write!(f, "({}{})", op.symbol(), right),
            Expression::Infix { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "fn(")?;
                write_separated(f, parameters.iter())?;
                write!(f, ") {}", body)
            }
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                write_separated(f, arguments.iter())?;
                write!(f, ")")
            }
            Expression::Array(elements) => {
                write!(f, "[")?;
                write_separated(f, elements.iter())?;
                write!(f, "]")
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
