// ============================================================================
// Addition and Subtraction
// ============================================================================

use super::finalize::Unrounded;
use super::resolver::{nan_outcome, resolve, Op, Rule};
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Rounding, Sign, Status};
use crate::numeric::{self, Word};
use std::borrow::Cow;
use std::cmp::Ordering;

/// NaN with `Invalid_operation`.
pub(crate) fn invalid(status: &mut Status) -> Decimal {
    *status |= Status::INVALID_OPERATION;
    Decimal::nan()
}

impl DecimalEngine {
    pub(crate) fn add_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.add_signed(a, b, b.sign(), ctx, status)
    }

    pub(crate) fn sub_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.add_signed(a, b, b.sign().flip(), ctx, status)
    }

    /// `a + b` with `b` taken as having `sign_b`. NaN payloads keep the
    /// operand's own sign.
    pub(crate) fn add_signed(
        &self,
        a: &Decimal,
        b: &Decimal,
        sign_b: Sign,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        match resolve(Op::Add, a, b) {
            Rule::Compute => match self.add_exact(a, b, sign_b, ctx, status) {
                Some(sum) => self.finalize_unrounded(sum, ctx, status),
                None => Decimal::nan(),
            },
            Rule::InfinityA => Decimal::infinity(a.sign()),
            Rule::InfinityB => Decimal::infinity(sign_b),
            Rule::InfinitySum if a.sign() == sign_b => Decimal::infinity(sign_b),
            Rule::InfinitySum => invalid(status),
            rule => nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)),
        }
    }

    /// Exact sum of two finite operands, except that an operand far below
    /// the precision window of the other is replaced by a one-digit stand-in
    /// that rounds identically.
    fn add_exact(
        &self,
        a: &Decimal,
        b: &Decimal,
        sign_b: Sign,
        ctx: &Context,
        status: &mut Status,
    ) -> Option<Unrounded> {
        // `hi` carries the larger exponent
        let (hi, hi_sign, lo, lo_sign) = if a.exponent() >= b.exponent() {
            (a, a.sign(), b, sign_b)
        } else {
            (b, sign_b, a, a.sign())
        };

        let mut hi_coeff: Cow<'_, [Word]> = Cow::Borrowed(hi.coefficient());
        let mut lo_coeff: Cow<'_, [Word]> = Cow::Borrowed(lo.coefficient());
        let mut exp = lo.exponent();

        if hi.exponent() != lo.exponent() && !hi.is_zero() {
            let hi_digits = hi.digits() as i64;
            let floor = if hi_digits > ctx.prec() {
                hi.exponent() - 1
            } else {
                hi.exponent() + hi_digits - ctx.prec() - 2
            };
            if lo.adjusted_exponent() < floor {
                let stand_in = if lo.is_zero() { 0 } else { 1 };
                lo_coeff = Cow::Owned(vec![stand_in]);
                exp = floor;
            }
            let shift = (hi.exponent() - exp) as usize;
            hi_coeff = Cow::Owned(self.scaled(hi.coefficient(), shift, status)?);
        }

        if hi_sign == lo_sign {
            let (long, short) = if hi_coeff.len() >= lo_coeff.len() {
                (hi_coeff, lo_coeff)
            } else {
                (lo_coeff, hi_coeff)
            };
            let mut sum = long.into_owned();
            let carry = numeric::add_assign(&mut sum, &short);
            if carry != 0 {
                sum.push(carry);
            }
            return Some(Unrounded::new(hi_sign, sum, exp));
        }

        let (larger, smaller, sign) = match numeric::compare(&hi_coeff, &lo_coeff) {
            Ordering::Less => (lo_coeff, hi_coeff, lo_sign),
            _ => (hi_coeff, lo_coeff, hi_sign),
        };
        let mut diff = larger.into_owned();
        numeric::sub_assign(&mut diff, &smaller);

        let sign = if numeric::is_zero(&diff) {
            Sign::from_negative(ctx.rounding() == Rounding::Floor)
        } else {
            sign
        };
        Some(Unrounded::new(sign, diff, exp))
    }
}

entry_points! {
    /// Sum of two operands, rounded to the context.
    ///
    /// An exact zero sum of operands with opposite signs is `+0`, or `-0`
    /// when rounding toward negative infinity.
    add, add_quiet => add_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Difference `a - b`, rounded to the context.
    sub, sub_quiet => sub_kernel(a: &Decimal, b: &Decimal) -> Decimal;
}
