use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Converts a decimal to `i64` if and only if it is a whole number in range.
///
/// ## Errors
/// Returns `Err(error)` if the decimal has a fractional part or does not fit.
///
/// ## Example
/// ```
/// use morgana::util::num::decimal_to_i64_checked;
/// use rust_decimal::Decimal;
///
/// assert_eq!(decimal_to_i64_checked(Decimal::new(500, 2), "fractional"), Ok(5));
/// assert!(decimal_to_i64_checked(Decimal::new(55, 1), "fractional").is_err());
/// ```
pub fn decimal_to_i64_checked<E>(value: Decimal, error: E) -> Result<i64, E> {
    if !value.fract().is_zero() {
        return Err(error);
    }
    value.to_i64().ok_or(error)
}

/// Converts a count supplied by a program into a `usize`.
///
/// Negative counts become zero, so `take(-1, xs)` is the empty list.
///
/// ## Example
/// ```
/// use morgana::util::num::count_to_usize;
///
/// assert_eq!(count_to_usize(3), 3);
/// assert_eq!(count_to_usize(-4), 0);
/// ```
#[must_use]
pub fn count_to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(if value < 0 { 0 } else { usize::MAX })
}

/// Converts a length into the language's integer type, saturating at
/// `i64::MAX`.
#[must_use]
pub fn usize_to_i64_saturating(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
