/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Returns
/// - `Ok(f64)`: The converted value if it is safe.
/// - `Err(error)`: If the value is too large.
///
/// ## Example
/// ```
/// use pyrust::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// assert!(i64_to_f64_checked(-big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Returns `true` if `value` is finite and has no fractional part.
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_of_exact_conversion() {
        let max = i64::try_from(MAX_SAFE_U64_INT).unwrap();

        assert_eq!(i64_to_f64_checked(max, ()), Ok(9_007_199_254_740_991.0));
        assert_eq!(i64_to_f64_checked(-max, ()), Ok(-9_007_199_254_740_991.0));
        assert_eq!(i64_to_f64_checked(max + 1, ()), Err(()));
        assert_eq!(i64_to_f64_checked(i64::MIN, ()), Err(()));
    }

    #[test]
    fn integral_floats() {
        assert!(is_integral(5.0));
        assert!(is_integral(-0.0));
        assert!(!is_integral(2.5));
        assert!(!is_integral(f64::INFINITY));
        assert!(!is_integral(f64::NAN));
    }
}
