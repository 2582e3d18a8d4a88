/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and executes
/// statements against a chain of scopes, and writes `print` output to its
/// sink. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements.
/// - Manages variable scopes, the function table and `return` propagation.
/// - Reports runtime errors such as division by zero or immutable
///   reassignment.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Supports arithmetic, comparisons, function calls and blocks.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value kinds used during execution: integers,
/// floating-point numbers, strings and booleans. It also provides the numeric
/// promotion, type-tag checks and textual representation used by the
/// evaluator.
pub mod value;
