use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while scanning source text.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
pub enum ScanError {
    /// A character that starts no token.
    #[error("line {line}, column {column}: unexpected character '{character}'")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// Input ended before the closing quote of a string literal.
    #[error("line {line}, column {column}: unterminated string")]
    UnterminatedString {
        /// The line of the opening quote.
        line:   usize,
        /// The column of the opening quote.
        column: usize,
    },
    /// An integer literal does not fit in a 64-bit signed integer.
    #[error("line {line}, column {column}: integer literal {literal} is too large")]
    IntegerTooLarge {
        /// The literal as written in the source.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
}

impl ScanError {
    /// Returns the `(line, column)` position the error refers to.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedCharacter { line, column, .. }
            | Self::UnterminatedString { line, column }
            | Self::IntegerTooLarge { line, column, .. } => (*line, *column),
        }
    }
}
