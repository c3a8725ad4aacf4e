//! Checked integer helpers.
//!
//! All calendar arithmetic is exact integer arithmetic; overflow is reported as
//! [`Error::ArithmeticRange`] rather than wrapping or panicking.

use crate::common::{Error, Result};

#[inline]
pub fn safe_add(a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or_else(|| Error::overflow(format!("{} + {} overflows", a, b)))
}

#[inline]
pub fn safe_mul(a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b)
        .ok_or_else(|| Error::overflow(format!("{} * {} overflows", a, b)))
}

#[inline]
pub fn safe_neg(a: i64) -> Result<i64> {
    a.checked_neg()
        .ok_or_else(|| Error::overflow(format!("-({}) overflows", a)))
}

/// Floor division: rounds toward negative infinity for a positive divisor.
#[inline]
pub fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b)
}

/// Floor modulo: the result is always in `[0, b)` for a positive divisor.
#[inline]
pub fn floor_mod(a: i64, b: i64) -> i64 {
    a.rem_euclid(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div(7, 3), 2);
        assert_eq!(floor_div(-7, 3), -3);
        assert_eq!(floor_div(-86_400, 86_400), -1);
        assert_eq!(floor_div(-1, 86_400), -1);
        assert_eq!(floor_mod(-1, 86_400), 86_399);
        assert_eq!(floor_mod(-86_400, 86_400), 0);
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(safe_add(i64::MAX, 1), Err(Error::ArithmeticRange(_))));
        assert!(matches!(safe_mul(i64::MAX, 2), Err(Error::ArithmeticRange(_))));
        assert!(matches!(safe_neg(i64::MIN), Err(Error::ArithmeticRange(_))));
        assert_eq!(safe_add(2, 3), Ok(5));
    }
}
