/// Scanning errors.
///
/// Raised while turning raw source text into tokens: unrecognized
/// characters, unterminated string literals and integer literals that do not
/// fit the interpreter's integer width.
pub mod scan_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// a token sequence. Parse errors include unexpected tokens, malformed type
/// annotations and missing delimiters.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and execution.
/// Runtime errors include undefined names, type mismatches, reassignment of
/// immutable bindings and division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use scan_error::ScanError;
use thiserror::Error;

/// Any failure produced by the scan → parse → evaluate pipeline.
///
/// Every variant is fatal to the current evaluation unit: the whole program in
/// file mode, or the current input line in the REPL.
#[derive(Debug, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// The token sequence did not form a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
