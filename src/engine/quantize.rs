// ============================================================================
// Quantization
// Exponent changes: quantize, rescale, reduce and integral rounding
// ============================================================================

use super::add::invalid;
use super::finalize::Unrounded;
use super::resolver::{check_nan, nan_outcome, resolve, Op, Rule};
use super::DecimalEngine;
use crate::domain::{ClampMode, Context, Decimal, Rounding, Status, MAX_EMAX, MAX_PREC, MIN_ETINY};

/// Flag behavior of the integral rounding family.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Integral {
    /// Raises `Rounded`, and `Inexact` when digits were lost
    Exact,
    Silent,
}

impl DecimalEngine {
    pub(crate) fn quantize_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        match resolve(Op::Quantize, a, b) {
            Rule::Compute => {},
            Rule::KeepA => return a.clone(),
            rule => return nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)),
        }

        let exp = b.exponent();
        if exp > ctx.emax() || exp < ctx.etiny() {
            return invalid(status);
        }
        if a.is_zero() {
            return self.finalize_unrounded(Unrounded::new(a.sign(), vec![0], exp), ctx, status);
        }
        if a.digits() as i64 + (a.exponent() - exp) > ctx.prec() {
            return invalid(status);
        }

        let Some((u, rest)) = self.round_to_exponent(a, exp, ctx.rounding(), status) else {
            return Decimal::nan();
        };
        if u.digits() > ctx.prec() || u.adjexp() > ctx.emax() {
            return invalid(status);
        }
        if exp > a.exponent() {
            *status |= Status::ROUNDED;
            if !rest.is_exact() {
                *status |= Status::INEXACT;
            }
        }
        self.finalize_unrounded(u, ctx, status)
    }

    /// Rounds or pads `a` to exponent `exp`. Not range checked against the
    /// context beyond the absolute limits; never finalized.
    pub(crate) fn rescale_kernel(
        &self,
        a: &Decimal,
        exp: i64,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if !(MIN_ETINY..=MAX_EMAX).contains(&exp) {
            return invalid(status);
        }
        if let Some(nan) = check_nan(a, ctx, status) {
            return nan;
        }
        if a.is_infinite() {
            return a.clone();
        }
        if a.is_zero() {
            return Decimal::zero(a.sign(), exp);
        }
        if exp < a.exponent() && a.digits() as i64 + (a.exponent() - exp) > MAX_PREC + 1 {
            return invalid(status);
        }

        let Some((u, rest)) = self.round_to_exponent(a, exp, ctx.rounding(), status) else {
            return Decimal::nan();
        };
        if exp > a.exponent() {
            *status |= Status::ROUNDED;
            if !rest.is_exact() {
                *status |= Status::INEXACT;
            }
        }
        let result = u.into_decimal();
        if result.is_subnormal(ctx) {
            *status |= Status::SUBNORMAL;
        }
        result
    }

    /// Finalizes, then strips trailing zeros as far as the exponent limit
    /// allows. Zero becomes `0` with exponent 0 and its sign.
    pub(crate) fn reduce_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        if let Some(nan) = check_nan(a, ctx, status) {
            return nan;
        }
        if a.is_infinite() {
            return a.clone();
        }
        let fitted = self.finalize_value(a.clone(), ctx, status);
        if !fitted.is_finite() {
            return fitted;
        }
        if fitted.is_zero() {
            return Decimal::zero(fitted.sign(), 0);
        }
        let max_exp = match ctx.clamp() {
            ClampMode::Ieee754 => ctx.etop(),
            ClampMode::Default => ctx.emax(),
        };
        let room = (max_exp - fitted.exponent()).max(0);
        let shift = (fitted.trailing_zeros() as i64).min(room);
        let mut u = Unrounded::from_decimal(&fitted);
        u.shift_right(shift as usize);
        u.into_decimal()
    }

    fn to_integral(
        &self,
        a: &Decimal,
        mode: Rounding,
        flags: Integral,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Some(nan) = check_nan(a, ctx, status) {
            return nan;
        }
        if a.is_infinite() || a.exponent() >= 0 {
            return a.clone();
        }
        let Some((u, rest)) = self.round_to_exponent(a, 0, mode, status) else {
            return Decimal::nan();
        };
        if flags == Integral::Exact {
            *status |= Status::ROUNDED;
            if !rest.is_exact() {
                *status |= Status::INEXACT;
            }
        }
        u.into_decimal()
    }

    pub(crate) fn round_to_integral_exact_kernel(
        &self,
        a: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.to_integral(a, ctx.rounding(), Integral::Exact, ctx, status)
    }

    pub(crate) fn round_to_integral_kernel(
        &self,
        a: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.to_integral(a, ctx.rounding(), Integral::Silent, ctx, status)
    }

    /// Integral rounding in a fixed direction; specials are invalid here.
    fn directed_integral(
        &self,
        a: &Decimal,
        mode: Rounding,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if a.is_special() {
            return invalid(status);
        }
        self.to_integral(a, mode, Integral::Silent, ctx, status)
    }

    pub(crate) fn trunc_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.directed_integral(a, Rounding::Down, ctx, status)
    }

    pub(crate) fn floor_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.directed_integral(a, Rounding::Floor, ctx, status)
    }

    pub(crate) fn ceil_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.directed_integral(a, Rounding::Ceiling, ctx, status)
    }
}

entry_points! {
    /// `a` rounded or padded to the exponent of `b`, then finalized.
    ///
    /// Invalid when the exponent is outside `[etiny, emax]` or the result
    /// would need more than `prec` digits.
    quantize, quantize_quiet => quantize_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// `a` rounded or padded to exponent `exp` without finalizing.
    rescale, rescale_quiet => rescale_kernel(a: &Decimal, exp: i64) -> Decimal;

    /// Simplest form: trailing zeros removed.
    reduce, reduce_quiet => reduce_kernel(a: &Decimal) -> Decimal;

    /// Integer value by context rounding, raising `Rounded`/`Inexact`.
    round_to_integral_exact, round_to_integral_exact_quiet => round_to_integral_exact_kernel(a: &Decimal) -> Decimal;

    /// Integer value by context rounding, without `Rounded`/`Inexact`.
    round_to_integral, round_to_integral_quiet => round_to_integral_kernel(a: &Decimal) -> Decimal;

    /// Integer value truncated toward zero.
    trunc, trunc_quiet => trunc_kernel(a: &Decimal) -> Decimal;

    /// Integer value rounded toward negative infinity.
    floor, floor_quiet => floor_kernel(a: &Decimal) -> Decimal;

    /// Integer value rounded toward positive infinity.
    ceil, ceil_quiet => ceil_kernel(a: &Decimal) -> Decimal;
}
