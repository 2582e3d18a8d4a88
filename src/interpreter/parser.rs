/// Core parsing entry points.
///
/// Contains the program-level `parse` function, the expression entry point
/// and the shared result type.
pub mod core;

/// Binary operator parsing.
///
/// Implements the comparison, additive and multiplicative precedence levels,
/// all left-associative.
pub mod binary;

/// Primary expression parsing.
///
/// Handles literals, identifiers, function calls and parenthesized
/// sub-expressions.
pub mod primary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences used by `if`, `while` and
/// function bodies.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectations, newline skipping, identifier and type
/// annotation parsing, and comma-separated lists.
pub mod utils;

/// Statement parsing.
///
/// Implements every statement form: declarations, reassignments, `if`,
/// `while`, function definitions, `return`, `print` and bare calls.
pub mod statement;
