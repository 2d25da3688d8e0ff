//! Tests for the bytecode compiler.

use bumpalo::Bump;
use pretty_assertions::assert_eq;

use crate::{
    ast::{AstBuilder, Expression, InfixOp, PrefixOp, Program},
    code::{CodeError, Instructions, Opcode, make},
    compiler::{Bytecode, CompilationOptions, CompileError, Compiler, compile},
    object::Object,
    test_utils::init_test_logging,
};

/// Build the expected instruction stream from `(opcode, operands)` pairs.
fn instructions(expected: &[(Opcode, &[usize])]) -> Instructions {
    Instructions::concat(
        expected
            .iter()
            .map(|(opcode, operands)| make(*opcode, operands).unwrap()),
    )
}

fn integers(values: &[i64]) -> Vec<Object> {
    values.iter().copied().map(Object::Integer).collect()
}

/// Compile a program made of one expression statement.
fn compile_expression<'a>(ast: AstBuilder<'a>, expr: &'a Expression<'a>) -> Bytecode {
    let program = ast.program([ast.expression_statement(expr)]);
    compile(&program).unwrap()
}

fn assert_bytecode(bytecode: &Bytecode, constants: &[i64], expected: &[(Opcode, &[usize])]) {
    assert_eq!(bytecode.instructions(), &instructions(expected));
    assert_eq!(bytecode.constants(), integers(constants).as_slice());
}

#[test]
fn test_integer_addition() {
    init_test_logging();
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 1 + 2
    let bytecode = compile_expression(ast, ast.infix(InfixOp::Add, ast.int(1), ast.int(2)));

    assert_bytecode(
        &bytecode,
        &[1, 2],
        &[
            (Opcode::Constant, &[0]),
            (Opcode::Constant, &[1]),
            (Opcode::Add, &[]),
        ],
    );
}

#[test]
fn test_left_associative_addition() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 1 + 2 + 3
    let expr = ast.infix(
        InfixOp::Add,
        ast.infix(InfixOp::Add, ast.int(1), ast.int(2)),
        ast.int(3),
    );
    let bytecode = compile_expression(ast, expr);

    assert_bytecode(
        &bytecode,
        &[1, 2, 3],
        &[
            (Opcode::Constant, &[0]),
            (Opcode::Constant, &[1]),
            (Opcode::Add, &[]),
            (Opcode::Constant, &[2]),
            (Opcode::Add, &[]),
        ],
    );
}

#[test]
fn test_equal_literals_are_not_deduplicated() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 1 + 1
    let bytecode = compile_expression(ast, ast.infix(InfixOp::Add, ast.int(1), ast.int(1)));

    assert_bytecode(
        &bytecode,
        &[1, 1],
        &[
            (Opcode::Constant, &[0]),
            (Opcode::Constant, &[1]),
            (Opcode::Add, &[]),
        ],
    );
}

#[test]
fn test_arithmetic_operators() {
    let cases = [
        (InfixOp::Sub, Opcode::Sub),
        (InfixOp::Mul, Opcode::Mul),
        (InfixOp::Div, Opcode::Div),
        (InfixOp::Gt, Opcode::GreaterThan),
        (InfixOp::Eq, Opcode::Equal),
        (InfixOp::NotEq, Opcode::NotEqual),
    ];

    for (op, opcode) in cases {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);

        let bytecode = compile_expression(ast, ast.infix(op, ast.int(2), ast.int(1)));
        assert_bytecode(
            &bytecode,
            &[2, 1],
            &[
                (Opcode::Constant, &[0]),
                (Opcode::Constant, &[1]),
                (opcode, &[]),
            ],
        );
    }
}

#[test]
fn test_less_than_swaps_operands() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 1 < 2 compiles as 2 > 1
    let bytecode = compile_expression(ast, ast.infix(InfixOp::Lt, ast.int(1), ast.int(2)));

    assert_bytecode(
        &bytecode,
        &[2, 1],
        &[
            (Opcode::Constant, &[0]),
            (Opcode::Constant, &[1]),
            (Opcode::GreaterThan, &[]),
        ],
    );
}

#[test]
fn test_booleans() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // true == !false
    let expr = ast.infix(
        InfixOp::Eq,
        ast.boolean(true),
        ast.prefix(PrefixOp::Bang, ast.boolean(false)),
    );
    let bytecode = compile_expression(ast, expr);

    assert_bytecode(
        &bytecode,
        &[],
        &[
            (Opcode::True, &[]),
            (Opcode::False, &[]),
            (Opcode::Bang, &[]),
            (Opcode::Equal, &[]),
        ],
    );
}

#[test]
fn test_minus_prefix() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    let bytecode = compile_expression(ast, ast.prefix(PrefixOp::Minus, ast.int(7)));

    assert_bytecode(
        &bytecode,
        &[7],
        &[(Opcode::Constant, &[0]), (Opcode::Minus, &[])],
    );
}

#[test]
fn test_expression_statements_pop_all_but_last() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 1; 2; 3
    let program = ast.program([
        ast.expression_statement(ast.int(1)),
        ast.expression_statement(ast.int(2)),
        ast.expression_statement(ast.int(3)),
    ]);
    let bytecode = compile(&program).unwrap();

    assert_bytecode(
        &bytecode,
        &[1, 2, 3],
        &[
            (Opcode::Constant, &[0]),
            (Opcode::Pop, &[]),
            (Opcode::Constant, &[1]),
            (Opcode::Pop, &[]),
            (Opcode::Constant, &[2]),
        ],
    );
}

#[test]
fn test_empty_program() {
    let program = Program { statements: &[] };
    let bytecode = compile(&program).unwrap();

    assert!(bytecode.instructions().is_empty());
    assert!(bytecode.constants().is_empty());
}

#[test]
fn test_if_without_else() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // if (true) { 10 }; 3333;
    let program = ast.program([
        ast.expression_statement(ast.if_else(
            ast.boolean(true),
            ast.block([ast.expression_statement(ast.int(10))]),
            None,
        )),
        ast.expression_statement(ast.int(3333)),
    ]);
    let bytecode = compile(&program).unwrap();

    assert_bytecode(
        &bytecode,
        &[10, 3333],
        &[
            // 0000
            (Opcode::True, &[]),
            // 0001
            (Opcode::JumpNotTruthy, &[10]),
            // 0004
            (Opcode::Constant, &[0]),
            // 0007
            (Opcode::Jump, &[11]),
            // 0010
            (Opcode::Null, &[]),
            // 0011
            (Opcode::Pop, &[]),
            // 0012
            (Opcode::Constant, &[1]),
        ],
    );
}

#[test]
fn test_if_with_else() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // if (true) { 10 } else { 20 }; 3333;
    let program = ast.program([
        ast.expression_statement(ast.if_else(
            ast.boolean(true),
            ast.block([ast.expression_statement(ast.int(10))]),
            Some(ast.block([ast.expression_statement(ast.int(20))])),
        )),
        ast.expression_statement(ast.int(3333)),
    ]);
    let bytecode = compile(&program).unwrap();

    assert_bytecode(
        &bytecode,
        &[10, 20, 3333],
        &[
            // 0000
            (Opcode::True, &[]),
            // 0001
            (Opcode::JumpNotTruthy, &[10]),
            // 0004
            (Opcode::Constant, &[0]),
            // 0007
            (Opcode::Jump, &[13]),
            // 0010
            (Opcode::Constant, &[1]),
            // 0013
            (Opcode::Pop, &[]),
            // 0014
            (Opcode::Constant, &[2]),
        ],
    );
}

#[test]
fn test_block_values() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // if (true) { 1; 2 } else { let x = 3; }
    let expr = ast.if_else(
        ast.boolean(true),
        ast.block([
            ast.expression_statement(ast.int(1)),
            ast.expression_statement(ast.int(2)),
        ]),
        Some(ast.block([ast.let_statement("x", ast.int(3))])),
    );
    let bytecode = compile_expression(ast, expr);

    assert_bytecode(
        &bytecode,
        &[1, 2, 3],
        &[
            // 0000
            (Opcode::True, &[]),
            // 0001
            (Opcode::JumpNotTruthy, &[14]),
            // 0004
            (Opcode::Constant, &[0]),
            // 0007
            (Opcode::Pop, &[]),
            // 0008
            (Opcode::Constant, &[1]),
            // 0011
            (Opcode::Jump, &[21]),
            // 0014
            (Opcode::Constant, &[2]),
            // 0017
            (Opcode::SetGlobal, &[0]),
            // 0020
            (Opcode::Null, &[]),
        ],
    );
}

#[test]
fn test_global_let_statements() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // let one = 1; let two = one; two;
    let program = ast.program([
        ast.let_statement("one", ast.int(1)),
        ast.let_statement("two", ast.ident("one")),
        ast.expression_statement(ast.ident("two")),
    ]);
    let bytecode = compile(&program).unwrap();

    assert_bytecode(
        &bytecode,
        &[1],
        &[
            (Opcode::Constant, &[0]),
            (Opcode::SetGlobal, &[0]),
            (Opcode::GetGlobal, &[0]),
            (Opcode::SetGlobal, &[1]),
            (Opcode::GetGlobal, &[1]),
        ],
    );
}

#[test]
fn test_undefined_variable() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    let program = ast.program([ast.expression_statement(ast.ident("nope"))]);
    assert_eq!(
        compile(&program),
        Err(CompileError::UndefinedVariable {
            name: "nope".into(),
        })
    );
}

#[test]
fn test_unsupported_nodes_fail_closed() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    let identity_body = ast.block([ast.expression_statement(ast.ident("x"))]);
    let cases = [
        (ast.string("monkey"), "string literal"),
        (ast.array([ast.int(1)]), "array literal"),
        (ast.index(ast.ident("xs"), ast.int(0)), "index expression"),
        (ast.function(&["x"], identity_body), "function literal"),
        (ast.call(ast.ident("f"), [ast.int(1)]), "call expression"),
    ];

    for (expr, kind) in cases {
        let program = ast.program([ast.expression_statement(expr)]);
        let expected = CompileError::UnsupportedNode { kind };
        assert_eq!(compile(&program), Err(expected));
    }

    let program = ast.program([ast.return_statement(ast.int(1))]);
    assert_eq!(
        compile(&program),
        Err(CompileError::UnsupportedNode {
            kind: "return statement",
        })
    );
}

#[test]
fn test_unsupported_node_nested_in_supported_one() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 1 + "two"
    let expr = ast.infix(InfixOp::Add, ast.int(1), ast.string("two"));
    let program = ast.program([ast.expression_statement(expr)]);
    let err = compile(&program).unwrap_err();
    assert_eq!(err.to_string(), "unsupported node: string literal");
}

#[test]
fn test_constant_limit() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    let expr = ast.infix(InfixOp::Add, ast.int(1), ast.int(2));
    let program = ast.program([ast.expression_statement(expr)]);
    let options = CompilationOptions {
        max_constants: 1,
        ..CompilationOptions::default()
    };

    assert_eq!(
        Compiler::new(options).compile(&program),
        Err(CompileError::TooManyConstants { limit: 1 })
    );
}

#[test]
fn test_global_limit() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    let program = ast.program([
        ast.let_statement("a", ast.boolean(true)),
        ast.let_statement("b", ast.boolean(false)),
    ]);
    let options = CompilationOptions {
        max_globals: 1,
        ..CompilationOptions::default()
    };

    assert_eq!(
        Compiler::new(options).compile(&program),
        Err(CompileError::TooManyGlobals { limit: 1 })
    );
}

#[test]
fn test_constant_pool_fills_operand_range() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // 65536 literals fit; the 65537th does not.
    let statements: Vec<_> = (0..=65536)
        .map(|i| ast.expression_statement(ast.int(i)))
        .collect();
    let program = ast.program(statements);

    assert_eq!(
        compile(&program),
        Err(CompileError::TooManyConstants { limit: 65536 })
    );

    let program = Program {
        statements: &program.statements[..65536],
    };
    let bytecode = compile(&program).unwrap();
    assert_eq!(bytecode.constants().len(), 65536);
    assert_eq!(bytecode.constants()[65535], Object::Integer(65535));
}

#[test]
fn test_jump_target_beyond_operand_range() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    // if (true) { true; true; ... } with a consequence longer than 65535 bytes
    let statements: Vec<_> = (0..33_000)
        .map(|_| ast.expression_statement(ast.boolean(true)))
        .collect();
    let condition = ast.if_else(ast.boolean(true), ast.block(statements), None);
    let program = ast.program([ast.expression_statement(condition)]);

    // 4 bytes before the block, 65999 in it, 3 for the jump over the else branch
    assert_eq!(
        compile(&program),
        Err(CompileError::Encoding(CodeError::OperandOutOfRange {
            name: "OpJumpNotTruthy",
            operand: 66_006,
            width: 2,
        }))
    );
}

#[test]
fn test_bytecode_debug() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);

    let bytecode = compile_expression(ast, ast.infix(InfixOp::Add, ast.int(1), ast.int(2)));
    assert_eq!(
        format!("{:?}", bytecode),
        "Bytecode {
  constants: [
    [0] = 1
    [1] = 2
  ]
  instructions:
    0000 OpConstant 0
    0003 OpConstant 1
    0006 OpAdd
}"
    );
}
