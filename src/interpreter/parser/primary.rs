use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, next_token, parse_comma_separated, parse_identifier, peek_token},
        },
    },
};

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals
/// - identifiers
/// - function calls (an identifier immediately followed by `(`)
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier "(" arguments ")"
///              | identifier
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
///
/// # Errors
/// Returns `UnexpectedTokenInExpression` when no alternative matches.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek_token(tokens)?;
    let line = token.line;

    let value = match &token.kind {
        TokenKind::Integer(value) => LiteralValue::Integer(*value),
        TokenKind::Float(value) => LiteralValue::Float(*value),
        TokenKind::Str(text) => LiteralValue::Str(text.as_str().into()),
        TokenKind::True => LiteralValue::Bool(true),
        TokenKind::False => LiteralValue::Bool(false),
        TokenKind::Identifier(name) => {
            if is_call(tokens) {
                return parse_call(tokens);
            }
            tokens.next();
            return Ok(Expr::Variable { name: name.clone(),
                                       line });
        },
        TokenKind::LParen => return parse_grouping(tokens),
        kind => {
            return Err(ParseError::UnexpectedTokenInExpression { found:  kind.to_string(),
                                                                 line,
                                                                 column: token.column, });
        },
    };

    tokens.next();
    Ok(Expr::Literal { value, line })
}

/// Parses a function call `name(arg, ...)`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the function name.
///
/// # Returns
/// An `Expr::FunctionCall` with its arguments in source order.
pub(crate) fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = peek_token(tokens)?.line;
    let name = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::LParen)?;

    let arguments = parse_comma_separated(tokens, parse_expression, &TokenKind::RParen)?;

    Ok(Expr::FunctionCall { name,
                            arguments,
                            line })
}

/// Returns `true` when the next two tokens are an identifier and `(`.
///
/// Uses a cloned iterator so nothing is consumed.
pub(crate) fn is_call<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut lookahead = tokens.clone();
    matches!(lookahead.next(),
             Some(Token { kind: TokenKind::Identifier(_),
                          .. }))
    && matches!(lookahead.next(),
                Some(Token { kind: TokenKind::LParen,
                             .. }))
}

/// Parses a parenthesized sub-expression.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    next_token(tokens)?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RParen)?;
    Ok(expr)
}
