/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Returns the `i64` a computed `f64` result promotes to, if any.
///
/// A result promotes to an integer when it is finite, has no fractional
/// part, and lies within the range where `f64` represents integers exactly.
/// Everything else stays a real. This single predicate defines the
/// language's arithmetic promotion rule; the optimizer and the evaluator
/// both call it so that constant folding is indistinguishable from
/// evaluation.
///
/// ## Example
/// ```
/// use lisq::util::num::as_exact_i64;
///
/// assert_eq!(as_exact_i64(3.0), Some(3));
/// assert_eq!(as_exact_i64(1.5), None);
/// assert_eq!(as_exact_i64(f64::INFINITY), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn as_exact_i64(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    if value.abs() > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_I64_INT`] in
/// absolute value.
///
/// ## Example
/// ```
/// use lisq::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big"), Ok(42.0));
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}
