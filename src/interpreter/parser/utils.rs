use std::iter::Peekable;

use crate::{
    ast::TypeTag,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Returns the next token without consuming it.
///
/// # Errors
/// Returns `UnexpectedEndOfInput` if the stream is exhausted, which only
/// happens when the token sequence lacks its end marker.
pub(in crate::interpreter::parser) fn peek_token<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().copied().ok_or(ParseError::UnexpectedEndOfInput)
}

/// Consumes and returns the next token.
///
/// # Errors
/// Returns `UnexpectedEndOfInput` if the stream is exhausted.
pub(in crate::interpreter::parser) fn next_token<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    tokens.next().ok_or(ParseError::UnexpectedEndOfInput)
}

/// Consumes the next token, which must be of kind `expected`.
///
/// Only payload-free kinds (delimiters, operators, keywords) are meaningful
/// here, since the comparison includes the payload.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the expected token.
/// - `expected`: The required token kind.
///
/// # Returns
/// The consumed token.
///
/// # Errors
/// Returns `UnexpectedToken` naming both kinds and the position of the token
/// actually found.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &TokenKind)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    let token = next_token(tokens)?;
    if token.kind == *expected {
        return Ok(token);
    }
    Err(unexpected(expected.to_string(), token))
}

/// Builds an `UnexpectedToken` error for `token`.
pub(in crate::interpreter::parser) fn unexpected(expected: impl Into<String>,
                                                 token: &Token)
                                                 -> ParseError {
    ParseError::UnexpectedToken { expected: expected.into(),
                                  found:    token.kind.to_string(),
                                  line:     token.line,
                                  column:   token.column, }
}

/// Skips any number of consecutive newline tokens (blank lines).
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while let Some(Token { kind: TokenKind::NewLine,
                           .. }) = tokens.peek()
    {
        tokens.next();
    }
}

/// Consumes a single newline token if one is next.
pub(in crate::interpreter::parser) fn skip_optional_newline<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    if let Some(Token { kind: TokenKind::NewLine,
                        .. }) = tokens.peek()
    {
        tokens.next();
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    let token = next_token(tokens)?;
    match &token.kind {
        TokenKind::Identifier(name) => Ok(name.clone()),
        _ => Err(unexpected("identifier", token)),
    }
}

/// Parses one of the four built-in type keywords.
///
/// # Errors
/// Returns `ExpectedTypeAnnotation` for any other token.
pub(in crate::interpreter::parser) fn parse_type_tag<'a, I>(tokens: &mut Peekable<I>)
                                                            -> ParseResult<TypeTag>
    where I: Iterator<Item = &'a Token>
{
    let token = next_token(tokens)?;
    token.kind
         .type_tag()
         .ok_or_else(|| ParseError::ExpectedTypeAnnotation { found:  token.kind.to_string(),
                                                             line:   token.line,
                                                             column: token.column, })
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by parameter lists and call argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g. `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if peek_token(tokens)?.kind == *closing {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        let token = next_token(tokens)?;
        match &token.kind {
            TokenKind::Comma => {},
            kind if kind == closing => break,
            _ => return Err(unexpected(format!("`,` or {closing}"), token)),
        }
    }
    Ok(items)
}
