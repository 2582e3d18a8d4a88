use std::{fmt, rc::Rc};

use crate::{
    ast::{LiteralValue, TypeTag},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{i64_to_f64_checked, is_integral},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models the four kinds that can appear in expressions,
/// assignments, function returns and conditions. A function call that ends
/// without `return` produces no `Value` at all; the evaluator models that as
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// An immutable string. Cloning a value shares the text.
    Str(Rc<str>),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and required by `if` and `while`
    /// conditions.
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl Value {
    /// Returns the name of this value's kind, as used in type annotations.
    ///
    /// # Example
    /// ```
    /// use pyrust::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).kind_name(), "i32");
    /// assert_eq!(Value::from("hi").kind_name(), "str");
    /// ```
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "i32",
            Self::Float(_) => "f64",
            Self::Str(_) => "str",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns `true` if a binding annotated with `tag` may hold this value.
    ///
    /// `f64` accepts integers as well as floats; every other tag requires the
    /// exact kind.
    #[must_use]
    pub const fn matches_tag(&self, tag: TypeTag) -> bool {
        matches!((tag, self),
                 (TypeTag::I32, Self::Integer(_))
                 | (TypeTag::F64, Self::Integer(_) | Self::Float(_))
                 | (TypeTag::Str, Self::Str(_))
                 | (TypeTag::Bool, Self::Bool(_)))
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Float` and `Value::Integer`.
    /// For integers, conversion fails if the value is too large to be
    /// represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is a float or a safe integer.
    /// - `Err(RuntimeError::TypeMismatch | PrecisionLoss)`: If not numeric or
    ///   not representable.
    ///
    /// # Example
    /// ```
    /// use pyrust::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// let real = x.as_float(42).unwrap();
    ///
    /// assert_eq!(real, 10.0);
    /// ```
    pub fn as_float(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Float(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::PrecisionLoss { value: *n,
                                                                                   line }),
            _ => Err(RuntimeError::TypeMismatch { expected: TypeTag::F64,
                                                  found: self.kind_name(),
                                                  line }),
        }
    }

    /// Extracts a boolean for use as a condition.
    ///
    /// # Errors
    /// Returns `ExpectedBoolean` for any non-boolean value; there is no
    /// implicit truthiness.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { found: self.kind_name(),
                                                     line }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(r) if is_integral(*r) => write!(f, "{r:.1}"),
            Self::Float(r) => write!(f, "{r}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Float(n) => (*n).into(),
            LiteralValue::Str(s) => Self::Str(Rc::clone(s)),
            LiteralValue::Bool(b) => (*b).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::Float(5.0).to_string(), "5.0");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Float(10.0 / 3.0).to_string(), "3.3333333333333335");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::from("a \"quoted\" word").to_string(), "a \"quoted\" word");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn tag_acceptance() {
        assert!(Value::Integer(1).matches_tag(TypeTag::I32));
        assert!(Value::Integer(1).matches_tag(TypeTag::F64));
        assert!(Value::Float(1.0).matches_tag(TypeTag::F64));
        assert!(!Value::Float(1.0).matches_tag(TypeTag::I32));
        assert!(Value::from("x").matches_tag(TypeTag::Str));
        assert!(!Value::from("x").matches_tag(TypeTag::Bool));
        assert!(Value::Bool(false).matches_tag(TypeTag::Bool));
        assert!(!Value::Bool(false).matches_tag(TypeTag::I32));
    }

    #[test]
    fn float_conversion_rejects_lossy_integers() {
        assert_eq!(Value::Integer(7).as_float(1).unwrap(), 7.0);
        assert!(matches!(Value::Integer(i64::MAX).as_float(4),
                         Err(RuntimeError::PrecisionLoss { value: i64::MAX,
                                                           line: 4 })));
        assert!(matches!(Value::Bool(true).as_float(2),
                         Err(RuntimeError::TypeMismatch { found: "bool", .. })));
    }

    #[test]
    fn conditions_require_booleans() {
        assert!(Value::Bool(true).as_bool(1).unwrap());
        assert!(matches!(Value::Integer(1).as_bool(9),
                         Err(RuntimeError::ExpectedBoolean { found: "i32",
                                                             line:  9 })));
    }

    #[test]
    fn literals_convert_unchanged() {
        assert_eq!(Value::from(&LiteralValue::from(3)), Value::Integer(3));
        assert_eq!(Value::from(&LiteralValue::from(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(&LiteralValue::from("s")), Value::from("s"));
        assert_eq!(Value::from(&LiteralValue::from(true)), Value::Bool(true));
    }
}
