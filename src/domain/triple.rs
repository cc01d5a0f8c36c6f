// ============================================================================
// Interchange Triple
// Fixed-width (sign, 128-bit coefficient, exponent) view of a Decimal
// ============================================================================

use crate::domain::context::{MAX_EMAX, MIN_ETINY};
use crate::domain::{Decimal, Kind, Sign};
use crate::numeric::{self, ConversionError, ConversionResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Class tag of an interchange triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TripleClass {
    Normal,
    Infinite,
    QuietNan,
    SignalingNan,
    /// The value could not be represented
    Error,
}

/// Decimal value exchanged as plain integers.
///
/// The coefficient is `(hi << 64) | lo`. For NaNs it is the payload; for
/// infinities coefficient and exponent must be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triple {
    pub class: TripleClass,
    /// 0 for positive, 1 for negative
    pub sign: u8,
    pub hi: u64,
    pub lo: u64,
    pub exp: i64,
}

impl Triple {
    pub fn new(class: TripleClass, sign: u8, coefficient: u128, exp: i64) -> Self {
        Self {
            class,
            sign,
            hi: (coefficient >> 64) as u64,
            lo: coefficient as u64,
            exp,
        }
    }

    /// The error triple produced when a value has no triple form.
    pub fn error() -> Self {
        Self::new(TripleClass::Error, 0, 0, 0)
    }

    #[inline]
    pub fn coefficient(&self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }
}

impl Decimal {
    /// Builds a value from an interchange triple.
    ///
    /// # Errors
    ///
    /// `InvalidTriple` for the error class, a sign other than 0/1, a
    /// nonzero coefficient or exponent on an infinity, or a nonzero exponent
    /// on a NaN; `ExponentOutOfRange` for a finite exponent outside
    /// `MIN_ETINY..=MAX_EMAX`.
    pub fn from_triple(triple: &Triple) -> ConversionResult<Self> {
        let sign = match triple.sign {
            0 => Sign::Positive,
            1 => Sign::Negative,
            _ => return Err(ConversionError::InvalidTriple),
        };
        let coeff = triple.coefficient();
        match triple.class {
            TripleClass::Normal => {
                if !(MIN_ETINY..=MAX_EMAX).contains(&triple.exp) {
                    return Err(ConversionError::ExponentOutOfRange);
                }
                Ok(Decimal::finite(sign, numeric::from_u128(coeff), triple.exp))
            },
            TripleClass::Infinite => {
                if coeff != 0 || triple.exp != 0 {
                    return Err(ConversionError::InvalidTriple);
                }
                Ok(Decimal::infinity(sign))
            },
            TripleClass::QuietNan | TripleClass::SignalingNan => {
                if triple.exp != 0 {
                    return Err(ConversionError::InvalidTriple);
                }
                let kind = if triple.class == TripleClass::SignalingNan {
                    Kind::SignalingNan
                } else {
                    Kind::QuietNan
                };
                Ok(Decimal::nan_with_payload(kind, sign, numeric::from_u128(coeff)))
            },
            TripleClass::Error => Err(ConversionError::InvalidTriple),
        }
    }

    /// Destructures the value into a triple; a coefficient or payload wider
    /// than 128 bits yields [`Triple::error`].
    pub fn to_triple(&self) -> Triple {
        let sign = self.is_negative() as u8;
        let Some(coeff) = numeric::to_u128(self.coefficient()) else {
            return Triple::error();
        };
        match self.kind() {
            Kind::Finite => Triple::new(TripleClass::Normal, sign, coeff, self.exponent()),
            Kind::Infinite => Triple::new(TripleClass::Infinite, sign, 0, 0),
            Kind::QuietNan => Triple::new(TripleClass::QuietNan, sign, coeff, 0),
            Kind::SignalingNan => Triple::new(TripleClass::SignalingNan, sign, coeff, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_triple() {
        let t = Triple::new(TripleClass::Normal, 1, u128::MAX, -5);
        let d = Decimal::from_triple(&t).unwrap();
        assert!(d.is_negative());
        assert_eq!(d.digits(), 39);
        assert_eq!(d.to_triple(), t);
    }

    #[test]
    fn test_special_triples() {
        let inf = Triple::new(TripleClass::Infinite, 0, 0, 0);
        assert!(Decimal::from_triple(&inf).unwrap().is_infinite());

        let snan = Triple::new(TripleClass::SignalingNan, 1, 123, 0);
        let d = Decimal::from_triple(&snan).unwrap();
        assert!(d.is_snan() && d.is_negative());
        assert_eq!(d.coefficient(), &[123]);
        assert_eq!(d.to_triple(), snan);
    }

    #[test]
    fn test_malformed_triples() {
        let bad_sign = Triple::new(TripleClass::Normal, 2, 1, 0);
        assert_eq!(
            Decimal::from_triple(&bad_sign),
            Err(ConversionError::InvalidTriple)
        );
        let inf_payload = Triple::new(TripleClass::Infinite, 0, 7, 0);
        assert_eq!(
            Decimal::from_triple(&inf_payload),
            Err(ConversionError::InvalidTriple)
        );
        let nan_exp = Triple::new(TripleClass::QuietNan, 0, 0, 3);
        assert!(Decimal::from_triple(&nan_exp).is_err());
        assert!(Decimal::from_triple(&Triple::error()).is_err());
        let far = Triple::new(TripleClass::Normal, 0, 1, MAX_EMAX + 1);
        assert_eq!(
            Decimal::from_triple(&far),
            Err(ConversionError::ExponentOutOfRange)
        );
    }

    #[test]
    fn test_wide_coefficient_is_error() {
        let wide = Decimal::finite(Sign::Positive, vec![0, 0, 0, 1], 0);
        assert_eq!(wide.to_triple().class, TripleClass::Error);
    }
}
