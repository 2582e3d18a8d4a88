use thiserror::Error;

use crate::ast::{BinaryOperator, TypeTag};

#[derive(Debug, Error)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    #[error("line {line}: undefined variable '{name}'")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that was never defined.
    #[error("line {line}: undefined function '{name}'")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Defined a name twice in the same scope.
    #[error("line {line}: variable '{name}' already defined in this scope")]
    AlreadyDefined {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A typed declaration whose initializer has a different runtime kind.
    #[error("line {line}: type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// The declared type.
        expected: TypeTag,
        /// The runtime kind of the initializer.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("line {line}: function '{name}' expects {expected} arguments, got {found}")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A binary operator applied to kinds it is not defined for.
    #[error("line {line}: unsupported operand kinds for '{op}': {left} and {right}")]
    InvalidOperands {
        /// The operator.
        op:    BinaryOperator,
        /// Runtime kind of the left operand.
        left:  &'static str,
        /// Runtime kind of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A condition did not evaluate to a boolean.
    #[error("line {line}: expected bool condition, got {found}")]
    ExpectedBoolean {
        /// Runtime kind of the condition value.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A function call that returned nothing was used where a value is
    /// required.
    #[error("line {line}: expression produced no value")]
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reassigned a binding declared without `mut`.
    #[error("line {line}: cannot reassign immutable variable '{name}'")]
    ImmutableAssignment {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("line {line}: division by zero")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed 64 bits.
    #[error("line {line}: integer overflow")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer could not be represented exactly as a float.
    #[error("line {line}: integer {value} cannot be converted to f64 without losing precision")]
    PrecisionLoss {
        /// The integer being converted.
        value: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `return` executed outside of any function body.
    #[error("line {line}: 'return' outside of function")]
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing the output of `print` failed.
    #[error("line {line}: failed to write output")]
    Output {
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// Returns the error category this error belongs to.
    ///
    /// The categories are `NameError`, `TypeError`, `ImmutabilityError` and
    /// `ArithmeticError`, plus `ControlFlowError` for a `return` outside of
    /// any function and `OutputError` for a failed `print` write.
    ///
    /// ## Example
    /// ```
    /// use pyrust::error::RuntimeError;
    ///
    /// let error = RuntimeError::DivisionByZero { line: 3 };
    /// assert_eq!(error.kind(), "ArithmeticError");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownVariable { .. }
            | Self::UnknownFunction { .. }
            | Self::AlreadyDefined { .. } => "NameError",
            Self::TypeMismatch { .. }
            | Self::ArgumentCountMismatch { .. }
            | Self::InvalidOperands { .. }
            | Self::ExpectedBoolean { .. }
            | Self::MissingValue { .. } => "TypeError",
            Self::ImmutableAssignment { .. } => "ImmutabilityError",
            Self::DivisionByZero { .. } | Self::Overflow { .. } | Self::PrecisionLoss { .. } => {
                "ArithmeticError"
            },
            Self::ReturnOutsideFunction { .. } => "ControlFlowError",
            Self::Output { .. } => "OutputError",
        }
    }

    /// Returns the source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::AlreadyDefined { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::InvalidOperands { line, .. }
            | Self::ExpectedBoolean { line, .. }
            | Self::MissingValue { line }
            | Self::ImmutableAssignment { line, .. }
            | Self::DivisionByZero { line }
            | Self::Overflow { line }
            | Self::PrecisionLoss { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::Output { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_category() {
        let cases = [(RuntimeError::UnknownVariable { name: "x".to_string(),
                                                      line: 1, },
                      "NameError"),
                     (RuntimeError::AlreadyDefined { name: "x".to_string(),
                                                     line: 1, },
                      "NameError"),
                     (RuntimeError::TypeMismatch { expected: TypeTag::Bool,
                                                   found:    "i32",
                                                   line:     1, },
                      "TypeError"),
                     (RuntimeError::MissingValue { line: 1 }, "TypeError"),
                     (RuntimeError::ImmutableAssignment { name: "x".to_string(),
                                                          line: 1, },
                      "ImmutabilityError"),
                     (RuntimeError::PrecisionLoss { value: i64::MAX,
                                                    line:  1, },
                      "ArithmeticError"),
                     (RuntimeError::ReturnOutsideFunction { line: 1 }, "ControlFlowError"),
                     (RuntimeError::Output { source: std::io::Error::other("closed"),
                                             line:   1, },
                      "OutputError")];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{error}");
        }
    }

    #[test]
    fn messages_carry_the_line() {
        let error = RuntimeError::ImmutableAssignment { name: "x".to_string(),
                                                        line: 2, };

        assert_eq!(error.to_string(), "line 2: cannot reassign immutable variable 'x'");
        assert_eq!(error.line(), 2);
    }
}
