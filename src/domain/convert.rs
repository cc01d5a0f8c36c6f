// ============================================================================
// Boundary Conversions
// Exact conversions between Decimal and integers, digit strings, rust_decimal
// ============================================================================

use crate::domain::context::{MAX_EMAX, MIN_ETINY};
use crate::domain::{Decimal, Sign};
use crate::numeric::{self, ConversionError, ConversionResult, Word, RDIGITS};

// ============================================================================
// Integers -> Decimal (exact)
// ============================================================================

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Decimal::finite(Sign::Positive, numeric::from_u128(value as u128), 0)
                }
            }
        )*
    };
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    let sign = Sign::from_negative(value < 0);
                    Decimal::finite(sign, numeric::from_u128(value.unsigned_abs() as u128), 0)
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, u128, usize);
from_signed!(i8, i16, i32, i64, i128, isize);

// ============================================================================
// Decimal -> Integers (integral values only)
// ============================================================================

/// Sign and magnitude of an integral value.
fn integral_magnitude(value: &Decimal) -> ConversionResult<(Sign, u128)> {
    if !value.is_finite() {
        return Err(ConversionError::NotFinite);
    }
    if !value.is_integer() {
        return Err(ConversionError::NotInteger);
    }
    if value.is_zero() {
        return Ok((value.sign(), 0));
    }
    let exp = value.exponent();
    let magnitude = if exp >= 0 {
        // 10^39 already exceeds u128
        if exp > 38 {
            return Err(ConversionError::OutOfRange);
        }
        let base = numeric::to_u128(value.coefficient()).ok_or(ConversionError::OutOfRange)?;
        base.checked_mul(10u128.pow(exp as u32))
            .ok_or(ConversionError::OutOfRange)?
    } else {
        let (q, _) = numeric::shift_right(value.coefficient(), exp.unsigned_abs() as usize);
        numeric::to_u128(&q).ok_or(ConversionError::OutOfRange)?
    };
    Ok((value.sign(), magnitude))
}

impl TryFrom<&Decimal> for u128 {
    type Error = ConversionError;

    fn try_from(value: &Decimal) -> Result<Self, Self::Error> {
        match integral_magnitude(value)? {
            (_, 0) => Ok(0),
            (Sign::Negative, _) => Err(ConversionError::OutOfRange),
            (Sign::Positive, m) => Ok(m),
        }
    }
}

impl TryFrom<&Decimal> for i128 {
    type Error = ConversionError;

    fn try_from(value: &Decimal) -> Result<Self, Self::Error> {
        let (sign, m) = integral_magnitude(value)?;
        match sign {
            Sign::Positive => i128::try_from(m).map_err(|_| ConversionError::OutOfRange),
            Sign::Negative if m == 1u128 << 127 => Ok(i128::MIN),
            Sign::Negative => i128::try_from(m)
                .map(|v| -v)
                .map_err(|_| ConversionError::OutOfRange),
        }
    }
}

impl TryFrom<&Decimal> for u64 {
    type Error = ConversionError;

    fn try_from(value: &Decimal) -> Result<Self, Self::Error> {
        let wide = u128::try_from(value)?;
        u64::try_from(wide).map_err(|_| ConversionError::OutOfRange)
    }
}

impl TryFrom<&Decimal> for i64 {
    type Error = ConversionError;

    fn try_from(value: &Decimal) -> Result<Self, Self::Error> {
        let wide = i128::try_from(value)?;
        i64::try_from(wide).map_err(|_| ConversionError::OutOfRange)
    }
}

// ============================================================================
// Digit Strings
// ============================================================================

impl Decimal {
    /// Builds a finite value from a validated string of decimal digits.
    ///
    /// Leading zeros are accepted and do not count as significant digits.
    ///
    /// # Errors
    ///
    /// `InvalidDigits` for an empty string or any non-digit character;
    /// `ExponentOutOfRange` when `exp` lies outside `MIN_ETINY..=MAX_EMAX`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decimal_engine::domain::{Decimal, Sign};
    ///
    /// let d = Decimal::from_digit_str(Sign::Positive, "12345678901234567890", -2).unwrap();
    /// assert_eq!(d.digits(), 20);
    /// assert!(Decimal::from_digit_str(Sign::Positive, "12a", 0).is_err());
    /// ```
    pub fn from_digit_str(sign: Sign, digits: &str, exp: i64) -> ConversionResult<Self> {
        let bytes = digits.as_bytes();
        if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ConversionError::InvalidDigits);
        }
        if !(MIN_ETINY..=MAX_EMAX).contains(&exp) {
            return Err(ConversionError::ExponentOutOfRange);
        }
        let words: Vec<Word> = bytes
            .rchunks(RDIGITS)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0 as Word, |acc, b| acc * 10 + Word::from(b - b'0'))
            })
            .collect();
        Ok(Decimal::finite(sign, words, exp))
    }

    /// Decimal digits of the coefficient (or NaN payload), most significant
    /// first; `"0"` for zero.
    pub fn coefficient_digits(&self) -> String {
        let words = self.coefficient();
        let len = numeric::significant_len(words).max(1);
        let mut out = words[len - 1].to_string();
        for w in words[..len - 1].iter().rev() {
            let chunk = w.to_string();
            out.extend(std::iter::repeat('0').take(RDIGITS - chunk.len()));
            out.push_str(&chunk);
        }
        out
    }
}

// ============================================================================
// rust_decimal
// ============================================================================

/// Largest scale rust_decimal supports.
const RUST_DECIMAL_MAX_SCALE: i64 = 28;

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        let sign = Sign::from_negative(value.is_sign_negative());
        let magnitude = value.mantissa().unsigned_abs();
        Decimal::finite(sign, numeric::from_u128(magnitude), -(value.scale() as i64))
    }
}

impl TryFrom<&Decimal> for rust_decimal::Decimal {
    type Error = ConversionError;

    /// Exact conversion; fails instead of rounding.
    fn try_from(value: &Decimal) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ConversionError::NotFinite);
        }
        let mut coeff = value.coefficient().to_vec();
        let mut exp = value.exponent();

        if exp > 0 {
            if exp as usize > 2 * RDIGITS {
                return Err(ConversionError::OutOfRange);
            }
            coeff = numeric::shift_left(&coeff, exp as usize);
            exp = 0;
        } else if -exp > RUST_DECIMAL_MAX_SCALE {
            // drop trailing zeros that only carry scale
            let excess = (-exp - RUST_DECIMAL_MAX_SCALE) as usize;
            if value.is_zero() {
                exp = -RUST_DECIMAL_MAX_SCALE;
            } else if numeric::trailing_zeros(&coeff) >= excess {
                coeff = numeric::shift_right(&coeff, excess).0;
                exp += excess as i64;
            } else {
                return Err(ConversionError::OutOfRange);
            }
        }

        let magnitude = numeric::to_u128(&coeff).ok_or(ConversionError::OutOfRange)?;
        let mantissa = i128::try_from(magnitude).map_err(|_| ConversionError::OutOfRange)?;
        let mut out = rust_decimal::Decimal::try_from_i128_with_scale(mantissa, (-exp) as u32)
            .map_err(|_| ConversionError::OutOfRange)?;
        out.set_sign_negative(value.is_negative());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_integer_round_trip() {
        for v in [0i64, 1, -1, i64::MAX, i64::MIN, 1_000_000_007] {
            let d = Decimal::from(v);
            assert_eq!(i64::try_from(&d), Ok(v));
        }
        assert_eq!(i128::try_from(&Decimal::from(i128::MIN)), Ok(i128::MIN));
        assert_eq!(u128::try_from(&Decimal::from(u128::MAX)), Ok(u128::MAX));
    }

    #[test]
    fn test_integral_extraction() {
        assert_eq!(i64::try_from(&Decimal::with_exponent(1200, -2)), Ok(12));
        assert_eq!(i64::try_from(&Decimal::with_exponent(-7, 3)), Ok(-7000));
        assert_eq!(
            i64::try_from(&Decimal::with_exponent(15, -1)),
            Err(ConversionError::NotInteger)
        );
        assert_eq!(
            u64::try_from(&Decimal::from(-1)),
            Err(ConversionError::OutOfRange)
        );
        assert_eq!(
            i64::try_from(&Decimal::with_exponent(1, 19)),
            Err(ConversionError::OutOfRange)
        );
        assert_eq!(
            i64::try_from(&Decimal::infinity(Sign::Positive)),
            Err(ConversionError::NotFinite)
        );
        assert_eq!(u64::try_from(&Decimal::zero(Sign::Negative, 0)), Ok(0));
    }

    #[test]
    fn test_digit_strings() {
        let d = Decimal::from_digit_str(Sign::Negative, "000123", 4).unwrap();
        assert_eq!(d.digits(), 3);
        assert_eq!(d.coefficient_digits(), "123");

        let long = "1".repeat(45);
        let d = Decimal::from_digit_str(Sign::Positive, &long, 0).unwrap();
        assert_eq!(d.digits(), 45);
        assert_eq!(d.coefficient_digits(), long);

        assert_eq!(
            Decimal::from_digit_str(Sign::Positive, "", 0),
            Err(ConversionError::InvalidDigits)
        );
        assert_eq!(
            Decimal::from_digit_str(Sign::Positive, "1", MIN_ETINY - 1),
            Err(ConversionError::ExponentOutOfRange)
        );
        assert_eq!(Decimal::zero(Sign::Positive, 0).coefficient_digits(), "0");
    }

    #[test]
    fn test_rust_decimal_round_trip() {
        let r = rust_decimal::Decimal::from_str("-1234.5678").unwrap();
        let d = Decimal::from(r);
        assert_eq!(d, Decimal::with_exponent(-12345678, -4));
        assert_eq!(rust_decimal::Decimal::try_from(&d), Ok(r));
    }

    #[test]
    fn test_rust_decimal_limits() {
        let scaled = Decimal::with_exponent(5, 3);
        assert_eq!(
            rust_decimal::Decimal::try_from(&scaled),
            Ok(rust_decimal::Decimal::from(5000))
        );
        let too_fine = Decimal::with_exponent(1, -29);
        assert_eq!(
            rust_decimal::Decimal::try_from(&too_fine),
            Err(ConversionError::OutOfRange)
        );
        let padded = Decimal::with_exponent(10, -29);
        assert!(rust_decimal::Decimal::try_from(&padded).is_ok());
        assert_eq!(
            rust_decimal::Decimal::try_from(&Decimal::nan()),
            Err(ConversionError::NotFinite)
        );
    }
}
