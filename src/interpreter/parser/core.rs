use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{binary::parse_comparison, statement::parse_statement, utils::skip_newlines},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// Statements are parsed one after another until the end-of-input marker.
/// Blank lines between statements are skipped.
///
/// # Parameters
/// - `tokens`: The full token sequence produced by the lexer, including the
///   trailing end marker.
///
/// # Returns
/// The top-level statements in source order.
///
/// # Errors
/// Returns the first `ParseError` encountered; parsing does not recover.
///
/// # Example
/// ```
/// use pyrust::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let tokens = tokenize("let x = 1\n\nprint(x)\n").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Vec<Statement>> {
    let mut tokens = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        skip_newlines(&mut tokens);
        match tokens.peek() {
            Some(Token { kind: TokenKind::Eof,
                         .. }) => break,
            Some(_) => statements.push(parse_statement(&mut tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput),
        }
    }

    debug!(count = statements.len(), "parsed program");
    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, comparison, and recursively
/// descends through the precedence hierarchy. Parenthesized groups re-enter
/// here, so the native stack is grown first when it runs low.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    ensure_sufficient_stack(|| parse_comparison(tokens))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::{BinaryOperator, LiteralValue, TypeTag},
        interpreter::lexer::tokenize,
    };

    fn parse_source(source: &str) -> ParseResult<Vec<Statement>> {
        parse(&tokenize(source).unwrap())
    }

    fn literal(value: impl Into<LiteralValue>, line: usize) -> Expr {
        Expr::Literal { value: value.into(),
                        line }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let program = parse_source("\n\nprint(1)\n\n\nprint(2)\n").unwrap();

        assert_eq!(program,
                   vec![Statement::Print { value: literal(1, 3),
                                           line:  3, },
                        Statement::Print { value: literal(2, 6),
                                           line:  6, }]);
    }

    #[test]
    fn typed_mutable_declaration() {
        let program = parse_source("let mut y: i32 = 10").unwrap();

        assert_eq!(program,
                   vec![Statement::Assignment { name:     "y".to_string(),
                                                type_tag: Some(TypeTag::I32),
                                                mutable:  true,
                                                value:    literal(10, 1),
                                                line:     1, }]);
    }

    #[test]
    fn untyped_declaration_is_immutable() {
        let program = parse_source("let x = 1").unwrap();

        assert!(matches!(&program[0],
                         Statement::Assignment { type_tag: None,
                                                 mutable: false,
                                                 .. }));
    }

    #[test]
    fn bare_reassignment_is_mutable_and_untyped() {
        let program = parse_source("x = 2").unwrap();

        assert!(matches!(&program[0],
                         Statement::Assignment { type_tag: None,
                                                 mutable: true,
                                                 .. }));
    }

    #[test]
    fn precedence_and_left_associativity() {
        let program = parse_source("print(1 + 2 * 3 - 4 < 5)").unwrap();
        let Statement::Print { value, .. } = &program[0] else {
            panic!("expected print, got {program:?}");
        };

        let product = Expr::BinaryOp { left:  Box::new(literal(2, 1)),
                                       op:    BinaryOperator::Mul,
                                       right: Box::new(literal(3, 1)),
                                       line:  1, };
        let sum = Expr::BinaryOp { left:  Box::new(literal(1, 1)),
                                   op:    BinaryOperator::Add,
                                   right: Box::new(product),
                                   line:  1, };
        let difference = Expr::BinaryOp { left:  Box::new(sum),
                                          op:    BinaryOperator::Sub,
                                          right: Box::new(literal(4, 1)),
                                          line:  1, };
        let expected = Expr::BinaryOp { left:  Box::new(difference),
                                        op:    BinaryOperator::Less,
                                        right: Box::new(literal(5, 1)),
                                        line:  1, };

        assert_eq!(*value, expected);
    }

    #[test]
    fn parentheses_override_precedence() {
        let program = parse_source("print((1 + 2) * 3)").unwrap();
        let Statement::Print { value: Expr::BinaryOp { op, left, .. },
                               .. } = &program[0]
        else {
            panic!("expected binary print, got {program:?}");
        };

        assert_eq!(*op, BinaryOperator::Mul);
        assert!(matches!(**left,
                         Expr::BinaryOp { op: BinaryOperator::Add,
                                          .. }));
    }

    #[test]
    fn function_definition_with_types() {
        let program = parse_source("fn add(x: i32, y: f64) -> i32 {\n    return x + y\n}").unwrap();
        let Statement::Function(def) = &program[0] else {
            panic!("expected function, got {program:?}");
        };

        assert_eq!(def.name, "add");
        assert_eq!(def.params
                      .iter()
                      .map(|p| (p.name.as_str(), p.type_tag))
                      .collect::<Vec<_>>(),
                   vec![("x", TypeTag::I32), ("y", TypeTag::F64)]);
        assert_eq!(def.return_type, Some(TypeTag::I32));
        assert!(matches!(def.body.as_slice(),
                         [Statement::Return { value: Some(_), .. }]));
    }

    #[test]
    fn if_else_may_span_lines() {
        let program = parse_source("if x > 5 {\n print(1)\n}\nelse {\n print(2)\n}\n").unwrap();

        assert!(matches!(&program[..],
                         [Statement::If { else_branch: Some(_),
                                          .. }]));
    }

    #[test]
    fn return_without_value() {
        let program = parse_source("fn f() {\n return\n}\nfn g() { return }").unwrap();

        for statement in &program {
            let Statement::Function(def) = statement else {
                panic!("expected function");
            };
            assert!(matches!(def.body.as_slice(),
                             [Statement::Return { value: None, .. }]));
        }
    }

    #[test]
    fn bare_call_is_an_expression_statement() {
        let program = parse_source("greet(\"bob\", 2)").unwrap();

        assert!(matches!(&program[0],
                         Statement::Expression { expr: Expr::FunctionCall { arguments, .. },
                                                 .. } if arguments.len() == 2));
    }

    #[test]
    fn bad_type_annotation_is_an_error() {
        assert!(matches!(parse_source("let x: int = 1"),
                         Err(ParseError::ExpectedTypeAnnotation { line: 1,
                                                                  column: 8,
                                                                  .. })));
    }

    #[test]
    fn bare_expression_is_not_a_statement() {
        assert!(matches!(parse_source("1 + 2"),
                         Err(ParseError::InvalidStatement { .. })));
        assert!(matches!(parse_source("x"),
                         Err(ParseError::InvalidStatement { .. })));
    }

    #[test]
    fn missing_primary_reports_token_and_position() {
        assert_eq!(parse_source("print(1 + )"),
                   Err(ParseError::UnexpectedTokenInExpression { found:  "`)`".to_string(),
                                                                 line:   1,
                                                                 column: 11, }));
    }

    #[test]
    fn deeply_nested_parentheses() {
        let source = format!("print({}7{})", "(".repeat(4000), ")".repeat(4000));
        let program = parse_source(&source).unwrap();

        assert_eq!(program,
                   vec![Statement::Print { value: literal(7, 1),
                                           line:  1, }]);
    }

    #[test]
    fn long_sum_folds_left() {
        let source = format!("print({})", vec!["1"; 5000].join(" + "));
        let program = parse_source(&source).unwrap();
        let Statement::Print { value, .. } = &program[0] else {
            panic!("expected print");
        };

        let mut depth = 0;
        let mut node = value;
        while let Expr::BinaryOp { left, op, .. } = node {
            assert_eq!(*op, BinaryOperator::Add);
            depth += 1;
            node = &**left;
        }
        assert_eq!(depth, 4999);
    }

    #[test]
    fn unclosed_block_is_an_error() {
        assert!(matches!(parse_source("while true {\n print(1)\n"),
                         Err(ParseError::UnexpectedToken { .. })));
    }
}
