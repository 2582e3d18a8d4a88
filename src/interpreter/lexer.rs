use std::fmt;

use logos::{Lexer, Logos};
use tracing::trace;

use crate::{ast::TypeTag, error::ScanError};

/// Represents the kind of a lexical token.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language; literal kinds carry
/// their payload (number, string contents or identifier name).
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
pub enum TokenKind {
    /// Floating-point literal tokens, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens delimited by `"` or `'`.
    ///
    /// The payload has escapes resolved. The two quote-less patterns only win
    /// when no closing quote exists and report an unterminated string.
    #[regex(r#""([^"\\]|\\(.|\n))*""#, parse_string, allow_greedy = true)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'"#, parse_string, allow_greedy = true)]
    #[regex(r#""([^"\\]|\\(.|\n))*"#, unterminated_string, allow_greedy = true)]
    #[regex(r#"'([^'\\]|\\(.|\n))*"#, unterminated_string, allow_greedy = true)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `add`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `let`
    #[token("let")]
    Let,
    /// `mut`
    #[token("mut")]
    Mut,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `print`
    #[token("print")]
    Print,
    /// `i32`
    #[token("i32")]
    TypeI32,
    /// `f64`
    #[token("f64")]
    TypeF64,
    /// `str`
    #[token("str")]
    TypeStr,
    /// `bool`
    #[token("bool")]
    TypeBool,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `:`
    #[token(":")]
    Colon,
    /// `->`
    #[token("->")]
    Arrow,
    /// `,`
    #[token(",")]
    Comma,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks terminate statements.
    #[token("\n", |lex| {
        lex.extras.line      += 1;
        lex.extras.line_start = lex.span().end;
        TokenKind::NewLine
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r]+", logos::skip)]
    Ignored,
    /// End of input. Never matched from text; appended by [`tokenize`].
    Eof,
}

impl TokenKind {
    /// Returns the annotation type named by this token, if it is one of the
    /// four type keywords.
    #[must_use]
    pub const fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Self::TypeI32 => Some(TypeTag::I32),
            Self::TypeF64 => Some(TypeTag::F64),
            Self::TypeStr => Some(TypeTag::Str),
            Self::TypeBool => Some(TypeTag::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Float(value) => return write!(f, "float `{value}`"),
            Self::Integer(value) => return write!(f, "integer `{value}`"),
            Self::Str(_) => "string literal",
            Self::Identifier(name) => return write!(f, "identifier `{name}`"),
            Self::Let => "`let`",
            Self::Mut => "`mut`",
            Self::Fn => "`fn`",
            Self::If => "`if`",
            Self::Else => "`else`",
            Self::While => "`while`",
            Self::Return => "`return`",
            Self::True => "`true`",
            Self::False => "`false`",
            Self::Print => "`print`",
            Self::TypeI32 => "`i32`",
            Self::TypeF64 => "`f64`",
            Self::TypeStr => "`str`",
            Self::TypeBool => "`bool`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::Equals => "`=`",
            Self::EqualEqual => "`==`",
            Self::BangEqual => "`!=`",
            Self::Less => "`<`",
            Self::Greater => "`>`",
            Self::LessEqual => "`<=`",
            Self::GreaterEqual => "`>=`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::LBrace => "`{`",
            Self::RBrace => "`}`",
            Self::Colon => "`:`",
            Self::Arrow => "`->`",
            Self::Comma => "`,`",
            Self::Comment => "comment",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
            Self::Eof => "end of input",
        };
        write!(f, "{symbol}")
    }
}

/// A classified token together with its source position.
///
/// Lines and columns are 1-based; columns count characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned, including any literal payload.
    pub kind:   TokenKind,
    /// Line of the token's first character.
    pub line:   usize,
    /// Column of the token's first character.
    pub column: usize,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which it starts so
/// that token columns can be derived from spans.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Failure categories reported by the generated lexer.
///
/// Converted into a positioned [`ScanError`] by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token pattern matches at this position.
    #[default]
    UnexpectedCharacter,
    /// A quote was opened but never closed.
    UnterminatedString,
    /// An integer literal exceeds `i64::MAX`.
    IntegerTooLarge,
}

/// Converts source text into an ordered sequence of tokens.
///
/// The whole input is consumed; the result always ends with exactly one
/// [`TokenKind::Eof`] token. Newlines are emitted as [`TokenKind::NewLine`]
/// tokens because they terminate statements.
///
/// # Errors
/// Returns a [`ScanError`] for an unrecognized character (including a `!`
/// not followed by `=`), an unterminated string or an integer literal too
/// large for 64 bits.
///
/// # Example
/// ```
/// use pyrust::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("let x = 1").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let,
///                 TokenKind::Identifier("x".to_string()),
///                 TokenKind::Equals,
///                 TokenKind::Integer(1),
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    loop {
        // Skipped input never contains a newline, so the line state before
        // `next` is the line state at the start of the token.
        let line = lexer.extras.line;
        let line_start = lexer.extras.line_start;

        let Some(result) = lexer.next() else {
            break;
        };
        let column = column_of(source, line_start, lexer.span().start);

        match result {
            Ok(kind) => tokens.push(Token { kind, line, column }),
            Err(kind) => return Err(scan_error(kind, lexer.slice(), line, column)),
        }
    }

    tokens.push(Token { kind:   TokenKind::Eof,
                        line:   lexer.extras.line,
                        column: column_of(source, lexer.extras.line_start, source.len()), });

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Computes the 1-based character column of `offset` on a line starting at
/// `line_start`.
fn column_of(source: &str, line_start: usize, offset: usize) -> usize {
    source.get(line_start..offset)
          .map_or(1, |prefix| prefix.chars().count() + 1)
}

/// Attaches a source position to an error reported by the generated lexer.
fn scan_error(kind: LexErrorKind, slice: &str, line: usize, column: usize) -> ScanError {
    match kind {
        LexErrorKind::UnexpectedCharacter => {
            ScanError::UnexpectedCharacter { character: slice.chars().next().unwrap_or('\0'),
                                             line,
                                             column }
        },
        LexErrorKind::UnterminatedString => ScanError::UnterminatedString { line, column },
        LexErrorKind::IntegerTooLarge => ScanError::IntegerTooLarge { literal: slice.to_string(),
                                                                      line,
                                                                      column },
    }
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals are 64-bit signed; anything larger is reported instead of being
/// silently wrapped.
fn parse_integer(lex: &Lexer<TokenKind>) -> Result<i64, LexErrorKind> {
    lex.slice()
       .parse()
       .map_err(|_| LexErrorKind::IntegerTooLarge)
}

/// Resolves a quoted string literal and keeps line tracking in sync when the
/// literal spans several lines.
fn parse_string(lex: &mut Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    let start = lex.span().start;

    if let Some(last_newline) = slice.rfind('\n') {
        lex.extras.line += slice.matches('\n').count();
        lex.extras.line_start = start + last_newline + 1;
    }

    // Both delimiters are single-byte ASCII quotes.
    unescape(&slice[1..slice.len() - 1])
}

#[allow(clippy::unnecessary_wraps)]
fn unterminated_string(_: &mut Lexer<TokenKind>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

/// Replaces escape sequences in the body of a string literal.
///
/// `\n`, `\t` and `\\` have their usual meaning; any other escaped character
/// (including either quote) stands for itself.
fn unescape(body: &str) -> String {
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => {},
        }
    }

    text
}
