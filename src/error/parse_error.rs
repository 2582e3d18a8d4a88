use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while parsing a token sequence.
///
/// Token descriptions (`found`) are produced by the `Display` implementation
/// of the lexer's token kind, e.g. ``identifier `x` `` or `` `}` ``.
pub enum ParseError {
    /// A specific token was required but another one was found.
    #[error("line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Description of what was required.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// No statement form starts with the token found.
    #[error("line {line}, column {column}: invalid statement starting with {found}")]
    InvalidStatement {
        /// The token encountered.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A type annotation was required but the token is not a built-in type.
    #[error("line {line}, column {column}: expected type annotation (i32, f64, str or bool), found {found}")]
    ExpectedTypeAnnotation {
        /// The token encountered.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// No primary expression starts with the token found.
    #[error("line {line}, column {column}: unexpected {found} in expression")]
    UnexpectedTokenInExpression {
        /// The token encountered.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The token sequence ended without an end-of-input marker.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
