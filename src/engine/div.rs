// ============================================================================
// Division
// Correctly rounded quotient, integer division and remainders
// ============================================================================

use super::add::invalid;
use super::finalize::Unrounded;
use super::resolver::{nan_outcome, resolve, Op, Rule};
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Status};
use crate::numeric;
use std::cmp::Ordering;

impl DecimalEngine {
    pub(crate) fn div_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        let sign = a.sign().combine(b.sign());
        match resolve(Op::Div, a, b) {
            Rule::Compute => {},
            Rule::InfinitySigned => return Decimal::infinity(sign),
            Rule::ZeroEtiny => {
                *status |= Status::CLAMPED;
                return Decimal::zero(sign, ctx.etiny());
            },
            Rule::DivisionByZero => {
                *status |= Status::DIVISION_BY_ZERO;
                return Decimal::infinity(sign);
            },
            Rule::DivisionUndefined => {
                *status |= Status::DIVISION_UNDEFINED;
                return Decimal::nan();
            },
            rule => return nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)),
        }

        let ideal = a.exponent() - b.exponent();
        if a.is_zero() {
            return self.finalize_unrounded(Unrounded::new(sign, vec![0], ideal), ctx, status);
        }

        // at least prec + 1 quotient digits, so the last one is below the
        // rounding digit
        let shift = b.digits() as i64 - a.digits() as i64 + ctx.prec() + 1;
        let mut exp = ideal - shift;
        let scaled = if shift >= 0 {
            self.scaled(a.coefficient(), shift as usize, status)
                .map(|u| (u, b.coefficient().to_vec()))
        } else {
            self.scaled(b.coefficient(), shift.unsigned_abs() as usize, status)
                .map(|v| (a.coefficient().to_vec(), v))
        };
        let Some((u, v)) = scaled else {
            return Decimal::nan();
        };

        let (mut q, r) = numeric::divmod(&u, &v);
        if !numeric::is_zero(&r) {
            // sticky digit: an inexact quotient must never look exact or
            // exactly half
            let lsd = q[0] % 10;
            if lsd == 0 || lsd == 5 {
                q[0] += 1;
            }
        } else if ideal > exp {
            let strip = (numeric::trailing_zeros(&q) as i64).min(ideal - exp);
            q = numeric::shift_right(&q, strip as usize).0;
            exp += strip;
        }
        self.finalize_unrounded(Unrounded::new(sign, q, exp), ctx, status)
    }

    /// Integer quotient (exponent 0) and remainder (the smaller operand
    /// exponent) of finite operands with a nonzero divisor. Neither is
    /// rounded. `None` when the quotient does not fit in `prec` digits.
    fn divmod_finite(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Option<(Decimal, Decimal)> {
        let sign_q = a.sign().combine(b.sign());
        let ideal = a.exponent().min(b.exponent());

        if a.is_zero() {
            return Some((Decimal::zero(sign_q, 0), Decimal::zero(a.sign(), ideal)));
        }

        let expdiff = a.adjusted_exponent() - b.adjusted_exponent();
        if expdiff < 0 {
            let r = self.scaled(a.coefficient(), (a.exponent() - ideal) as usize, status)?;
            return Some((Decimal::zero(sign_q, 0), Decimal::finite(a.sign(), r, ideal)));
        }
        if expdiff > ctx.prec() {
            *status |= Status::DIVISION_IMPOSSIBLE;
            return None;
        }

        let u = self.scaled(a.coefficient(), (a.exponent() - ideal) as usize, status)?;
        let v = self.scaled(b.coefficient(), (b.exponent() - ideal) as usize, status)?;
        let (q, r) = numeric::divmod(&u, &v);
        if numeric::digit_count(&q) as i64 > ctx.prec() {
            *status |= Status::DIVISION_IMPOSSIBLE;
            return None;
        }
        Some((
            Decimal::finite(sign_q, q, 0),
            Decimal::finite(a.sign(), r, ideal),
        ))
    }

    pub(crate) fn divint_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        let sign = a.sign().combine(b.sign());
        match resolve(Op::DivInt, a, b) {
            Rule::Compute => match self.divmod_finite(a, b, ctx, status) {
                Some((q, _)) => self.finalize_value(q, ctx, status),
                None => Decimal::nan(),
            },
            Rule::InfinitySigned => Decimal::infinity(sign),
            Rule::IntegerZero => Decimal::zero(sign, 0),
            Rule::DivisionByZero => {
                *status |= Status::DIVISION_BY_ZERO;
                Decimal::infinity(sign)
            },
            Rule::DivisionUndefined => {
                *status |= Status::DIVISION_UNDEFINED;
                Decimal::nan()
            },
            rule => nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)),
        }
    }

    /// Shared special-operand handling of both remainder forms. `Ok` means
    /// the operands are finite with a nonzero divisor.
    fn rem_special(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Result<(), Decimal> {
        match resolve(Op::Rem, a, b) {
            Rule::Compute => Ok(()),
            Rule::KeepA => Err(self.finalize_value(a.clone(), ctx, status)),
            Rule::DivisionUndefined => {
                *status |= Status::DIVISION_UNDEFINED;
                Err(Decimal::nan())
            },
            rule => Err(nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status))),
        }
    }

    pub(crate) fn rem_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Err(special) = self.rem_special(a, b, ctx, status) {
            return special;
        }
        match self.divmod_finite(a, b, ctx, status) {
            Some((_, r)) => self.finalize_value(r, ctx, status),
            None => Decimal::nan(),
        }
    }

    /// `a - b * n` where `n` is the integer nearest `a / b`, ties to even.
    pub(crate) fn rem_near_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Err(special) = self.rem_special(a, b, ctx, status) {
            return special;
        }
        let Some((q, r)) = self.divmod_finite(a, b, ctx, status) else {
            return Decimal::nan();
        };
        if r.is_zero() {
            return self.finalize_value(r, ctx, status);
        }

        let exp = r.exponent();
        let Some(divisor) = self.scaled(b.coefficient(), (b.exponent() - exp) as usize, status)
        else {
            return Decimal::nan();
        };
        let half = numeric::summarize_remainder(r.coefficient(), &divisor).cmp_half();
        let odd = q.lsd() % 2 == 1;
        if half == Ordering::Greater || (half == Ordering::Equal && odd) {
            let mut next = q.coefficient().to_vec();
            if numeric::increment(&mut next) != 0 {
                next.push(1);
            }
            if numeric::digit_count(&next) as i64 > ctx.prec() {
                *status |= Status::DIVISION_IMPOSSIBLE;
                return Decimal::nan();
            }
            let mut diff = divisor;
            numeric::sub_assign(&mut diff, r.coefficient());
            let adjusted = Decimal::finite(a.sign().flip(), diff, exp);
            return self.finalize_value(adjusted, ctx, status);
        }
        self.finalize_value(r, ctx, status)
    }

    pub(crate) fn divmod_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> (Decimal, Decimal) {
        let sign = a.sign().combine(b.sign());
        match resolve(Op::DivMod, a, b) {
            Rule::Compute => match self.divmod_finite(a, b, ctx, status) {
                Some((q, r)) => {
                    let q = self.finalize_value(q, ctx, status);
                    (q, self.finalize_value(r, ctx, status))
                },
                None => (Decimal::nan(), Decimal::nan()),
            },
            Rule::IntegerZero => (
                Decimal::zero(sign, 0),
                self.finalize_value(a.clone(), ctx, status),
            ),
            Rule::InfinitySigned => {
                *status |= Status::INVALID_OPERATION;
                (Decimal::infinity(sign), Decimal::nan())
            },
            Rule::DivisionByZero => {
                *status |= Status::DIVISION_BY_ZERO | Status::INVALID_OPERATION;
                (Decimal::infinity(sign), Decimal::nan())
            },
            Rule::DivisionUndefined => {
                *status |= Status::DIVISION_UNDEFINED;
                (Decimal::nan(), Decimal::nan())
            },
            rule => {
                let nan = nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status));
                (nan.clone(), nan)
            },
        }
    }
}

entry_points! {
    /// Quotient `a / b`, correctly rounded. Exact quotients take the
    /// exponent closest to `exp(a) - exp(b)`.
    div, div_quiet => div_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Integer part of `a / b`, truncated toward zero.
    divide_integer, divide_integer_quiet => divint_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Remainder with the sign of `a`: `a - b * trunc(a / b)`.
    remainder, remainder_quiet => rem_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Remainder toward the nearest integer quotient, ties to even.
    remainder_near, remainder_near_quiet => rem_near_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Integer quotient and remainder together.
    divmod, divmod_quiet => divmod_kernel(a: &Decimal, b: &Decimal) -> (Decimal, Decimal);
}
