use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a binary operation on two already evaluated operands.
///
/// - `+`, `-` and `*` on two integers use checked 64-bit arithmetic. When
///   either side is a float, both sides are promoted and the result is a
///   float.
/// - `+` on two strings concatenates them.
/// - `/` always performs float division and fails on a zero divisor of either
///   numeric kind.
/// - Comparisons accept two numbers (promoting mixed pairs), two strings or
///   two booleans.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`, `right`: The operand values.
/// - `line`: Line of the operator, for error reporting.
///
/// # Errors
/// - `InvalidOperands` for any other combination of kinds.
/// - `Overflow` if integer arithmetic leaves the 64-bit range.
/// - `DivisionByZero` for a zero divisor.
/// - `PrecisionLoss` if `+`, `-` or `*` would promote an integer operand that
///   has no exact float form.
///
/// # Example
/// ```
/// use pyrust::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::core::Value},
/// };
///
/// let quotient = eval_binary(BinaryOperator::Div, &Value::Integer(10), &Value::Integer(4), 1);
/// assert_eq!(quotient.unwrap(), Value::Float(2.5));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    use BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
    };

    let ordered = |accept: fn(Option<Ordering>) -> bool| {
        compare(op, left, right, line).map(|ordering| Value::Bool(accept(ordering)))
    };

    match op {
        Add => {
            if let (Value::Str(a), Value::Str(b)) = (left, right) {
                return Ok(Value::Str(format!("{a}{b}").into()));
            }
            arithmetic(op, left, right, line, i64::checked_add, |a, b| a + b)
        },
        Sub => arithmetic(op, left, right, line, i64::checked_sub, |a, b| a - b),
        Mul => arithmetic(op, left, right, line, i64::checked_mul, |a, b| a * b),
        Div => divide(left, right, line),
        Less => ordered(|o| o == Some(Ordering::Less)),
        Greater => ordered(|o| o == Some(Ordering::Greater)),
        LessEqual => ordered(|o| matches!(o, Some(Ordering::Less | Ordering::Equal))),
        GreaterEqual => ordered(|o| matches!(o, Some(Ordering::Greater | Ordering::Equal))),
        Equal => ordered(|o| o == Some(Ordering::Equal)),
        NotEqual => ordered(|o| o != Some(Ordering::Equal)),
    }
}

/// Builds the error for an operator applied to unsupported kinds.
const fn invalid_operands(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> RuntimeError {
    RuntimeError::InvalidOperands { op,
                                    left: left.kind_name(),
                                    right: right.kind_name(),
                                    line }
}

const fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Integer(_) | Value::Float(_))
}

/// Converts a numeric value to the nearest `f64`.
///
/// Integers beyond 2^53 round to the closest representable float.
#[allow(clippy::cast_precision_loss)]
const fn rounded_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Float(r) => Some(*r),
        Value::Str(_) | Value::Bool(_) => None,
    }
}

/// Applies an arithmetic operator to two numbers.
///
/// Integer pairs go through `on_integers`, which returns `None` on overflow.
/// Any pair involving a float is promoted and goes through `on_floats`.
fn arithmetic(op: BinaryOperator,
              left: &Value,
              right: &Value,
              line: usize,
              on_integers: fn(i64, i64) -> Option<i64>,
              on_floats: fn(f64, f64) -> f64)
              -> EvalResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            on_integers(*a, *b).map(Value::Integer)
                               .ok_or(RuntimeError::Overflow { line })
        },
        _ if is_numeric(left) && is_numeric(right) => {
            Ok(Value::Float(on_floats(left.as_float(line)?, right.as_float(line)?)))
        },
        _ => Err(invalid_operands(op, left, right, line)),
    }
}

/// True division. The result is always a float.
fn divide(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    let (Some(dividend), Some(divisor)) = (rounded_f64(left), rounded_f64(right)) else {
        return Err(invalid_operands(BinaryOperator::Div, left, right, line));
    };

    if divisor == 0.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }

    Ok(Value::Float(dividend / divisor))
}

/// Orders two values of comparable kinds.
///
/// Returns `None` when the values are unordered, which only happens for
/// `NaN`.
fn compare(op: BinaryOperator,
           left: &Value,
           right: &Value,
           line: usize)
           -> EvalResult<Option<Ordering>> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (Value::Bool(a), Value::Bool(b)) => Ok(Some(a.cmp(b))),
        _ => match (rounded_f64(left), rounded_f64(right)) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            _ => Err(invalid_operands(op, left, right, line)),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::BinaryOperator::{
        Add, Div, Equal, Greater, GreaterEqual, Less, Mul, NotEqual, Sub,
    };

    fn eval(op: BinaryOperator,
            left: impl Into<Value>,
            right: impl Into<Value>)
            -> EvalResult<Value> {
        eval_binary(op, &left.into(), &right.into(), 1)
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(eval(Add, 2, 3).unwrap(), Value::Integer(5));
        assert_eq!(eval(Sub, 2, 3).unwrap(), Value::Integer(-1));
        assert_eq!(eval(Mul, -4, 3).unwrap(), Value::Integer(-12));
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        assert_eq!(eval(Add, 1, 0.5).unwrap(), Value::Float(1.5));
        assert_eq!(eval(Mul, 2.0, 3).unwrap(), Value::Float(6.0));
    }

    #[test]
    fn division_is_always_float() {
        assert_eq!(eval(Div, 10, 2).unwrap(), Value::Float(5.0));
        assert_eq!(eval(Div, 10, 3).unwrap(), Value::Float(10.0 / 3.0));
        assert_eq!(eval(Div, 1.0, 4).unwrap(), Value::Float(0.25));
    }

    #[test]
    fn division_by_zero_of_either_kind() {
        assert!(matches!(eval(Div, 1, 0), Err(RuntimeError::DivisionByZero { line: 1 })));
        assert!(matches!(eval(Div, 1.5, 0.0), Err(RuntimeError::DivisionByZero { .. })));
        assert!(matches!(eval(Div, 0, -0.0), Err(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn integer_overflow_is_an_error() {
        assert!(matches!(eval(Add, i64::MAX, 1), Err(RuntimeError::Overflow { .. })));
        assert!(matches!(eval(Mul, i64::MIN, -1), Err(RuntimeError::Overflow { .. })));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(eval(Add, "foo", "bar").unwrap(), Value::from("foobar"));
        assert!(matches!(eval(Add, "n = ", 1),
                         Err(RuntimeError::InvalidOperands { left: "str",
                                                             right: "i32",
                                                             .. })));
        assert!(matches!(eval(Sub, "a", "b"), Err(RuntimeError::InvalidOperands { .. })));
    }

    #[test]
    fn comparisons_of_matching_kinds() {
        assert_eq!(eval(Less, 1, 2).unwrap(), Value::Bool(true));
        assert_eq!(eval(Less, 2.5, 2).unwrap(), Value::Bool(false));
        assert_eq!(eval(GreaterEqual, 3, 3.0).unwrap(), Value::Bool(true));
        assert_eq!(eval(Equal, 1, 1.0).unwrap(), Value::Bool(true));
        assert_eq!(eval(Less, "apple", "banana").unwrap(), Value::Bool(true));
        assert_eq!(eval(NotEqual, true, false).unwrap(), Value::Bool(true));
        assert_eq!(eval(Equal, f64::NAN, f64::NAN).unwrap(), Value::Bool(false));
        assert_eq!(eval(NotEqual, f64::NAN, f64::NAN).unwrap(), Value::Bool(true));
    }

    #[test]
    fn comparing_different_kinds_is_an_error() {
        assert!(matches!(eval(Equal, 1, "1"),
                         Err(RuntimeError::InvalidOperands { op: Equal, .. })));
        assert!(matches!(eval(Less, true, 0), Err(RuntimeError::InvalidOperands { .. })));
    }

    #[test]
    fn lossy_promotion_is_an_error() {
        assert!(matches!(eval(Add, i64::MAX, 1.0),
                         Err(RuntimeError::PrecisionLoss { value: i64::MAX, .. })));
    }

    #[test]
    fn division_of_large_integers_rounds() {
        assert_eq!(eval(Div, 9_007_199_254_740_993_i64, 1).unwrap(),
                   Value::Float(9_007_199_254_740_992.0));
        assert_eq!(eval(Div, i64::MAX, i64::MAX).unwrap(), Value::Float(1.0));
    }

    #[test]
    fn mixed_comparison_of_large_integers_rounds() {
        assert_eq!(eval(Less, 9_007_199_254_740_993_i64, 1.5).unwrap(),
                   Value::Bool(false));
        assert_eq!(eval(Greater, i64::MAX, 1.0e18).unwrap(), Value::Bool(true));
    }
}
