use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{expect, peek_token, skip_newlines, unexpected},
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements, optionally separated by
/// blank lines. Parsing continues until the matching `}` token is consumed.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// The statements of the block in source order.
///
/// # Errors
/// Returns a `ParseError` if the opening brace is missing, a statement fails
/// to parse, or input ends before the closing brace.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, &TokenKind::LBrace)?;
    let mut statements = Vec::new();

    loop {
        skip_newlines(tokens);

        let token = peek_token(tokens)?;
        match token.kind {
            TokenKind::RBrace => {
                tokens.next();
                break;
            },
            TokenKind::Eof => return Err(unexpected(TokenKind::RBrace.to_string(), token)),
            _ => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(statements)
}
