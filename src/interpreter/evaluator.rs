/// Binary operator evaluation logic.
///
/// Handles arithmetic with integer/float promotion, string concatenation,
/// true division and comparisons.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, expression evaluation, the control-flow
/// result type and the entry points used by the library and the REPL.
pub mod core;

/// Function definition and invocation.
///
/// Handles the global function table, argument checking, per-call scopes and
/// return value propagation.
pub mod function;

/// Lexical scopes.
///
/// Defines the binding map with its parent link and the define, lookup and
/// assign operations on the chain.
pub mod scope;

/// Statement execution.
pub mod statement;
