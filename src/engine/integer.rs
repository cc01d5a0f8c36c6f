// ============================================================================
// Integer Boundary
// Machine-integer operands, context-aware construction and extraction,
// interchange triples and digit strings
// ============================================================================

use super::finalize::Unrounded;
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Sign, Status, Triple, TripleClass};
use crate::numeric::{ConversionError, Word};

impl DecimalEngine {
    /// Finalized value of an exact sign, coefficient and exponent.
    pub(crate) fn finalize_parts(
        &self,
        sign: Sign,
        coeff: Vec<Word>,
        exp: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.finalize_unrounded(Unrounded::new(sign, coeff, exp), ctx, status)
    }

    fn conversion_failed(&self, err: ConversionError, status: &mut Status) -> Decimal {
        tracing::debug!(error = %err, "conversion rejected");
        *status |= Status::CONVERSION_SYNTAX;
        Decimal::nan()
    }

    // ======== Integer operands ========

    pub(crate) fn add_i64_kernel(
        &self,
        a: &Decimal,
        b: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.add_kernel(a, &Decimal::from(b), ctx, status)
    }

    pub(crate) fn sub_i64_kernel(
        &self,
        a: &Decimal,
        b: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.sub_kernel(a, &Decimal::from(b), ctx, status)
    }

    pub(crate) fn mul_i64_kernel(
        &self,
        a: &Decimal,
        b: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.mul_kernel(a, &Decimal::from(b), ctx, status)
    }

    pub(crate) fn div_i64_kernel(
        &self,
        a: &Decimal,
        b: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.div_kernel(a, &Decimal::from(b), ctx, status)
    }

    // ======== Construction ========

    pub(crate) fn from_i64_kernel(&self, value: i64, ctx: &Context, status: &mut Status) -> Decimal {
        self.finalize_value(Decimal::from(value), ctx, status)
    }

    pub(crate) fn from_u64_kernel(&self, value: u64, ctx: &Context, status: &mut Status) -> Decimal {
        self.finalize_value(Decimal::from(value), ctx, status)
    }

    pub(crate) fn from_i128_kernel(&self, value: i128, ctx: &Context, status: &mut Status) -> Decimal {
        self.finalize_value(Decimal::from(value), ctx, status)
    }

    pub(crate) fn from_u128_kernel(&self, value: u128, ctx: &Context, status: &mut Status) -> Decimal {
        self.finalize_value(Decimal::from(value), ctx, status)
    }

    pub(crate) fn from_triple_kernel(
        &self,
        triple: &Triple,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        match Decimal::from_triple(triple) {
            Ok(dec) => self.finalize_value(dec, ctx, status),
            Err(err) => self.conversion_failed(err, status),
        }
    }

    pub(crate) fn from_digits_kernel(
        &self,
        sign: Sign,
        digits: &str,
        exp: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        match Decimal::from_digit_str(sign, digits, exp) {
            Ok(dec) => {
                let (sign, coeff, exp) = dec.into_parts();
                self.finalize_parts(sign, coeff, exp, ctx, status)
            },
            Err(err) => self.conversion_failed(err, status),
        }
    }

    // ======== Extraction ========

    pub(crate) fn to_i64_kernel(
        &self,
        a: &Decimal,
        _ctx: &Context,
        status: &mut Status,
    ) -> Option<i64> {
        match i64::try_from(a) {
            Ok(v) => Some(v),
            Err(_) => {
                *status |= Status::INVALID_OPERATION;
                None
            },
        }
    }

    pub(crate) fn to_u64_kernel(
        &self,
        a: &Decimal,
        _ctx: &Context,
        status: &mut Status,
    ) -> Option<u64> {
        match u64::try_from(a) {
            Ok(v) => Some(v),
            Err(_) => {
                *status |= Status::INVALID_OPERATION;
                None
            },
        }
    }

    pub(crate) fn to_triple_kernel(
        &self,
        a: &Decimal,
        _ctx: &Context,
        status: &mut Status,
    ) -> Triple {
        let triple = a.to_triple();
        if triple.class == TripleClass::Error {
            *status |= Status::INVALID_OPERATION;
        }
        triple
    }
}

entry_points! {
    /// `a + b` for an integer `b`.
    add_i64, add_i64_quiet => add_i64_kernel(a: &Decimal, b: i64) -> Decimal;

    /// `a - b` for an integer `b`.
    sub_i64, sub_i64_quiet => sub_i64_kernel(a: &Decimal, b: i64) -> Decimal;

    /// `a * b` for an integer `b`.
    mul_i64, mul_i64_quiet => mul_i64_kernel(a: &Decimal, b: i64) -> Decimal;

    /// `a / b` for an integer `b`.
    div_i64, div_i64_quiet => div_i64_kernel(a: &Decimal, b: i64) -> Decimal;

    /// Integer rounded to the context.
    from_i64, from_i64_quiet => from_i64_kernel(value: i64) -> Decimal;

    /// Integer rounded to the context.
    from_u64, from_u64_quiet => from_u64_kernel(value: u64) -> Decimal;

    /// Integer rounded to the context.
    from_i128, from_i128_quiet => from_i128_kernel(value: i128) -> Decimal;

    /// Integer rounded to the context.
    from_u128, from_u128_quiet => from_u128_kernel(value: u128) -> Decimal;

    /// Value of an interchange triple, rounded to the context. A malformed
    /// triple raises `Conversion_syntax` and yields NaN.
    from_triple, from_triple_quiet => from_triple_kernel(triple: &Triple) -> Decimal;

    /// Value of a digit string scaled by `10^exp`, rounded to the context.
    /// Anything but ASCII digits raises `Conversion_syntax` and yields NaN.
    from_digits, from_digits_quiet => from_digits_kernel(sign: Sign, digits: &str, exp: i64) -> Decimal;

    /// Exact integral value as `i64`; `Invalid_operation` and `None` for
    /// specials, fractions and values out of range.
    to_i64, to_i64_quiet => to_i64_kernel(a: &Decimal) -> Option<i64>;

    /// Exact integral value as `u64`; `Invalid_operation` and `None` for
    /// specials, fractions, negatives and values out of range.
    to_u64, to_u64_quiet => to_u64_kernel(a: &Decimal) -> Option<u64>;

    /// Interchange triple; a coefficient wider than 128 bits gives the error
    /// triple and raises `Invalid_operation`.
    to_triple, to_triple_quiet => to_triple_kernel(a: &Decimal) -> Triple;
}
