use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDef, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            primary::{is_call, parse_call},
            utils::{
                expect, parse_comma_separated, parse_identifier, parse_type_tag,
                peek_token, skip_newlines, skip_optional_newline,
            },
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a declaration (`let [mut] name [: type] = expr`),
/// - a reassignment (`name = expr`),
/// - an `if` or `while` statement,
/// - a function definition,
/// - a `return` or `print` statement,
/// - a bare function call.
///
/// The form is chosen from the leading token (and, for identifiers, the token
/// after it). One trailing newline is consumed if present.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a statement.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns `InvalidStatement` when no statement form starts here, or any
/// error raised while parsing the chosen form.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let token = peek_token(tokens)?;

    let statement = match &token.kind {
        TokenKind::Let => parse_declaration(tokens)?,
        TokenKind::If => parse_if(tokens)?,
        TokenKind::While => parse_while(tokens)?,
        TokenKind::Fn => parse_function_definition(tokens)?,
        TokenKind::Return => parse_return(tokens)?,
        TokenKind::Print => parse_print(tokens)?,
        TokenKind::Identifier(_) if is_call(tokens) => {
            let expr = parse_call(tokens)?;
            Statement::Expression { expr,
                                    line: token.line }
        },
        TokenKind::Identifier(_) if is_reassignment(tokens) => parse_reassignment(tokens)?,
        kind => {
            return Err(ParseError::InvalidStatement { found:  kind.to_string(),
                                                      line:   token.line,
                                                      column: token.column, });
        },
    };

    skip_optional_newline(tokens);
    Ok(statement)
}

/// Returns `true` when the next two tokens are an identifier and `=`.
fn is_reassignment<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();
    matches!(lookahead.next(),
             Some(Token { kind: TokenKind::Equals,
                          .. }))
}

/// Parses a declaration of the form `let [mut] <identifier> [: <type>] =
/// <expression>`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `let`.
///
/// # Returns
/// A `Statement::Assignment` carrying the optional type tag and the `mut`
/// flag.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is not an identifier,
/// - the annotation after `:` is not a built-in type,
/// - `=` is missing,
/// - the expression is malformed.
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, &TokenKind::Let)?.line;

    let mutable = peek_token(tokens)?.kind == TokenKind::Mut;
    if mutable {
        tokens.next();
    }

    let name = parse_identifier(tokens)?;

    let type_tag = if peek_token(tokens)?.kind == TokenKind::Colon {
        tokens.next();
        Some(parse_type_tag(tokens)?)
    } else {
        None
    };

    expect(tokens, &TokenKind::Equals)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assignment { name,
                               type_tag,
                               mutable,
                               value,
                               line })
}

/// Parses a reassignment of the form `<identifier> = <expression>`.
///
/// The resulting node has no type tag; its `mutable` flag only matters if the
/// name turns out to be unbound at runtime, in which case a mutable binding is
/// created.
fn parse_reassignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = peek_token(tokens)?.line;
    let name = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::Equals)?;
    let value = parse_expression(tokens)?;

    Ok(Statement::Assignment { name,
                               type_tag: None,
                               mutable: true,
                               value,
                               line })
}

/// Parses an `if` statement with an optional `else` block.
///
/// Syntax:
/// ```text
///     if <condition> { <statements> }
///     else { <statements> }
/// ```
/// Blank lines between the closing brace of the first block and `else` are
/// allowed.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, &TokenKind::If)?.line;
    let condition = parse_expression(tokens)?;
    let then_branch = parse_block(tokens)?;

    let mut lookahead = tokens.clone();
    skip_newlines(&mut lookahead);
    let else_branch = if peek_token(&mut lookahead)?.kind == TokenKind::Else {
        *tokens = lookahead;
        tokens.next();
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses a `while` loop.
///
/// Syntax: `while <condition> { <statements> }`
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, &TokenKind::While)?.line;
    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::While { condition,
                          body,
                          line })
}

/// Parses a function definition of the form
/// `fn <name>(<param>: <type>, ...) [-> <type>] { <statements> }`.
///
/// Every parameter must carry a type annotation; the return annotation is
/// optional.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `fn`.
///
/// # Returns
/// A `Statement::Function` wrapping the shared definition.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name or a parameter name is not an identifier,
/// - a parameter lacks `: <type>`,
/// - the parameter list is not closed,
/// - the body block fails to parse.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, &TokenKind::Fn)?.line;
    let name = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::LParen)?;

    let params = parse_comma_separated(tokens, parse_parameter, &TokenKind::RParen)?;

    let return_type = if peek_token(tokens)?.kind == TokenKind::Arrow {
        tokens.next();
        Some(parse_type_tag(tokens)?)
    } else {
        None
    };

    let body = parse_block(tokens)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name,
                                                 params,
                                                 return_type,
                                                 body,
                                                 line })))
}

/// Parses a single `name: type` parameter.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a Token> + Clone
{
    let name = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::Colon)?;
    let type_tag = parse_type_tag(tokens)?;

    Ok(Parameter { name, type_tag })
}

/// Parses `return [<expression>]`.
///
/// The value is absent when `return` is directly followed by a newline, a
/// closing brace or the end of input.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, &TokenKind::Return)?.line;

    let value = match peek_token(tokens)?.kind {
        TokenKind::NewLine | TokenKind::RBrace | TokenKind::Eof => None,
        _ => Some(parse_expression(tokens)?),
    };

    Ok(Statement::Return { value, line })
}

/// Parses `print(<expression>)`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let line = expect(tokens, &TokenKind::Print)?.line;
    expect(tokens, &TokenKind::LParen)?;
    let value = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RParen)?;

    Ok(Statement::Print { value, line })
}
