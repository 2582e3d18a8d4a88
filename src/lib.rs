//! `pyrust` is a small interpreted language with Python-style syntax and
//! Rust-style typed, mutable/immutable bindings.
//!
//! Source text goes through three phases: [`tokenize`] turns it into tokens,
//! [`parse`] builds statement trees, and an
//! [`interpreter::evaluator::core::Context`] executes them.
#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Statement,
    error::Error,
    interpreter::{
        evaluator::core::Context,
        lexer::{self, Token},
        parser,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is built
/// by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for scanning, parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. Each carries the source position of the failure so the
/// harness can report it in a single line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line (and, before evaluation, column) numbers.
/// - Wraps all phases in one `Error` so `?` composes across the pipeline.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and deep recursion.
pub mod util;

/// Converts source text into tokens ending with the end-of-input marker.
///
/// # Example
/// ```
/// let tokens = pyrust::tokenize("print(1)").unwrap();
/// assert_eq!(tokens.len(), 5);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Ok(lexer::tokenize(source)?)
}

/// Parses a token sequence into the program's top-level statements.
pub fn parse(tokens: &[Token]) -> Result<Vec<Statement>, Error> {
    Ok(parser::core::parse(tokens)?)
}

/// Runs a whole program, printing to standard output.
///
/// This function scans, parses and executes all statements in the provided
/// source string using a fresh evaluation context. If execution succeeds, it
/// returns `Ok(())`; otherwise, it returns the first error.
///
/// # Examples
/// ```
/// use pyrust::run_source;
///
/// assert!(run_source("let result = 2 + 2").is_ok());
///
/// // 'x' is not defined
/// assert!(run_source("let y = x + 1").is_err());
/// ```
pub fn run_source(source: &str) -> Result<(), Error> {
    Context::new().run(source)
}
