use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Returns `true` if the integer fits into a signed 32-bit integer.
///
/// ## Example
/// ```
/// use lectern::util::num::fits_i32;
/// use num_bigint::BigInt;
///
/// assert!(fits_i32(&BigInt::from(i32::MIN)));
/// assert!(!fits_i32(&BigInt::from(i64::from(i32::MAX) + 1)));
/// ```
#[must_use]
pub fn fits_i32(value: &BigInt) -> bool {
    value.to_i32().is_some()
}

/// Returns `true` if the decimal's magnitude does not exceed the largest
/// finite `f64`.
///
/// The comparison is exact: the decimal is compared against the exact value of
/// `f64::MAX`, not against a rounded conversion of itself.
#[must_use]
pub fn fits_f64(value: &BigDecimal) -> bool {
    BigDecimal::try_from(f64::MAX).is_ok_and(|max| value.abs() <= max)
}

/// Divides two integers, truncating toward zero.
///
/// Returns `None` if the divisor is zero.
#[must_use]
pub fn div_integer(dividend: &BigInt, divisor: &BigInt) -> Option<BigInt> {
    if divisor.is_zero() {
        return None;
    }
    Some(dividend / divisor)
}

/// Divides two decimals, keeping the scale of the dividend and rounding half
/// to even.
///
/// The quotient is computed exactly on the unscaled integers before a single
/// rounding step, so no precision is lost to an intermediate approximation.
/// Returns `None` if the divisor is zero.
///
/// ## Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use lectern::util::num::div_decimal;
///
/// let dec = |s| BigDecimal::from_str(s).unwrap();
///
/// assert_eq!(div_decimal(&dec("10.0"), &dec("4")).unwrap().to_string(), "2.5");
/// // 2.5 rounds to the even neighbour 2, 3.5 to 4.
/// assert_eq!(div_decimal(&dec("5"), &dec("2")).unwrap().to_string(), "2");
/// assert_eq!(div_decimal(&dec("7"), &dec("2")).unwrap().to_string(), "4");
/// assert!(div_decimal(&dec("1.0"), &dec("0.0")).is_none());
/// ```
#[must_use]
pub fn div_decimal(dividend: &BigDecimal, divisor: &BigDecimal) -> Option<BigDecimal> {
    if divisor.is_zero() {
        return None;
    }
    let (dividend_digits, dividend_scale) = dividend.as_bigint_and_exponent();
    let (divisor_digits, divisor_scale) = divisor.as_bigint_and_exponent();

    // dividend / divisor * 10^dividend_scale
    //   = dividend_digits * 10^divisor_scale / divisor_digits
    let mut numerator = dividend_digits;
    let mut denominator = divisor_digits;
    match divisor_scale.cmp(&0) {
        Ordering::Greater => numerator *= pow10(divisor_scale.unsigned_abs()),
        Ordering::Less => denominator *= pow10(divisor_scale.unsigned_abs()),
        Ordering::Equal => {},
    }

    Some(BigDecimal::new(round_half_even(&numerator, &denominator), dividend_scale))
}

fn pow10(exponent: u64) -> BigInt {
    let mut result = BigInt::one();
    let ten = BigInt::from(10);
    for _ in 0..exponent {
        result *= &ten;
    }
    result
}

/// Integer division rounding to the nearest integer, ties to even.
fn round_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return quotient;
    }

    let twice_remainder: BigInt = remainder.abs() * 2;
    let away_from_zero = match twice_remainder.cmp(&denominator.abs()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => !(&quotient % 2u8).is_zero(),
    };
    if !away_from_zero {
        return quotient;
    }

    let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);
    if negative { quotient - 1 } else { quotient + 1 }
}
