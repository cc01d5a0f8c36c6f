// ============================================================================
// Finalization
// Exponent range checks, clamping and rounding to the context precision
// ============================================================================

use super::DecimalEngine;
use crate::domain::{ClampMode, Context, Decimal, Kind, Rounding, Sign, Status};
use crate::numeric::{self, Discarded, Word, POW10, RDIGITS};
use std::cmp::Ordering;

/// Whether dropping `rest` below a coefficient ending in `lsd` increments
/// the magnitude under `mode`.
pub(crate) fn rounds_away(mode: Rounding, sign: Sign, lsd: u8, rest: Discarded) -> bool {
    if rest.is_exact() {
        return false;
    }
    match mode {
        Rounding::Up => true,
        Rounding::Down | Rounding::Trunc => false,
        Rounding::Ceiling => !sign.is_negative(),
        Rounding::Floor => sign.is_negative(),
        Rounding::HalfUp => rest.cmp_half() != Ordering::Less,
        Rounding::HalfDown => rest.cmp_half() == Ordering::Greater,
        Rounding::HalfEven => match rest.cmp_half() {
            Ordering::Greater => true,
            Ordering::Equal => lsd % 2 == 1,
            Ordering::Less => false,
        },
        Rounding::ZeroFiveUp => lsd == 0 || lsd == 5,
    }
}

/// Finite intermediate result that has not been fitted to a context yet.
#[derive(Debug, Clone)]
pub(crate) struct Unrounded {
    pub sign: Sign,
    pub coeff: Vec<Word>,
    pub exp: i64,
}

impl Unrounded {
    pub fn new(sign: Sign, mut coeff: Vec<Word>, exp: i64) -> Self {
        numeric::trim(&mut coeff);
        Self { sign, coeff, exp }
    }

    pub fn from_decimal(dec: &Decimal) -> Self {
        Self::new(dec.sign(), dec.coefficient().to_vec(), dec.exponent())
    }

    pub fn digits(&self) -> i64 {
        numeric::digit_count(&self.coeff) as i64
    }

    pub fn adjexp(&self) -> i64 {
        self.exp + self.digits().max(1) - 1
    }

    pub fn is_zero(&self) -> bool {
        numeric::is_zero(&self.coeff)
    }

    pub fn lsd(&self) -> u8 {
        (self.coeff[0] % 10) as u8
    }

    /// Drops the `n` lowest digits, raising the exponent to match.
    pub fn shift_right(&mut self, n: usize) -> Discarded {
        let (coeff, rest) = numeric::shift_right(&self.coeff, n);
        self.coeff = coeff;
        self.exp = self.exp.saturating_add(n as i64);
        rest
    }

    pub fn increment(&mut self) {
        if numeric::increment(&mut self.coeff) != 0 {
            self.coeff.push(1);
        }
    }

    /// Applies the rounding decision for `rest` and reports whether the
    /// coefficient was incremented.
    pub fn apply_round(&mut self, mode: Rounding, rest: Discarded) -> bool {
        let up = rounds_away(mode, self.sign, self.lsd(), rest);
        if up {
            self.increment();
        }
        up
    }

    pub fn into_decimal(self) -> Decimal {
        Decimal::from_raw(self.sign, self.coeff, self.exp)
    }
}

/// Keeps the lowest `prec - clamp` digits of a NaN payload.
pub(crate) fn fix_nan(nan: Decimal, ctx: &Context) -> Decimal {
    let limit = (ctx.prec() - ctx.clamp().code() as i64).max(0) as usize;
    if nan.digits() <= limit {
        return nan;
    }
    let (full, rest) = (limit / RDIGITS, limit % RDIGITS);
    let words = nan.coefficient();
    let mut payload = words[..full].to_vec();
    if rest > 0 {
        payload.push(words[full] % POW10[rest]);
    }
    Decimal::nan_with_payload(nan.kind(), nan.sign(), payload)
}

impl DecimalEngine {
    /// Fits an exact intermediate into the context: overflow, clamping,
    /// subnormal handling, then rounding to `prec` digits.
    pub(crate) fn finalize_unrounded(
        &self,
        mut u: Unrounded,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Some(special) = self.check_exp(&mut u, ctx, status) {
            return special;
        }
        self.check_round(u, ctx, status)
    }

    /// Finalizes any value: NaN payloads are truncated, infinities pass.
    pub(crate) fn finalize_value(&self, dec: Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        match dec.kind() {
            Kind::Finite => self.finalize_unrounded(Unrounded::from_decimal(&dec), ctx, status),
            Kind::Infinite => dec,
            Kind::QuietNan | Kind::SignalingNan => fix_nan(dec, ctx),
        }
    }

    pub(crate) fn finalize_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.finalize_value(a.clone(), ctx, status)
    }

    fn check_exp(&self, u: &mut Unrounded, ctx: &Context, status: &mut Status) -> Option<Decimal> {
        let adjexp = u.adjexp();

        if adjexp > ctx.emax() {
            if u.is_zero() {
                u.exp = match ctx.clamp() {
                    ClampMode::Ieee754 => ctx.etop(),
                    ClampMode::Default => ctx.emax(),
                };
                u.coeff = vec![0];
                *status |= Status::CLAMPED;
                return None;
            }
            *status |= Status::OVERFLOW | Status::INEXACT | Status::ROUNDED;
            return Some(self.overflow_result(u.sign, ctx, status));
        }

        if ctx.clamp() == ClampMode::Ieee754 && u.exp > ctx.etop() {
            let shift = (u.exp - ctx.etop()) as usize;
            match self.scaled(&u.coeff, shift, status) {
                Some(coeff) => u.coeff = coeff,
                None => return Some(Decimal::nan()),
            }
            u.exp -= shift as i64;
            *status |= Status::CLAMPED;
            if !u.is_zero() && adjexp < ctx.emin() {
                *status |= Status::SUBNORMAL;
            }
            return None;
        }

        if adjexp < ctx.emin() {
            let etiny = ctx.etiny();
            if u.is_zero() {
                if u.exp < etiny {
                    u.exp = etiny;
                    *status |= Status::CLAMPED;
                }
                return None;
            }

            *status |= Status::SUBNORMAL;
            if u.exp < etiny {
                let rest = u.shift_right((etiny - u.exp) as usize);
                u.apply_round(ctx.rounding(), rest);
                *status |= Status::ROUNDED;
                if !rest.is_exact() {
                    *status |= Status::INEXACT | Status::UNDERFLOW;
                    if u.is_zero() {
                        *status |= Status::CLAMPED;
                    }
                }
            }
        }
        None
    }

    fn check_round(&self, mut u: Unrounded, ctx: &Context, status: &mut Status) -> Decimal {
        let digits = u.digits();
        if digits <= ctx.prec() {
            return u.into_decimal();
        }

        let rest = u.shift_right((digits - ctx.prec()) as usize);
        *status |= Status::ROUNDED;
        if !rest.is_exact() {
            *status |= Status::INEXACT;
        }
        if u.apply_round(ctx.rounding(), rest) && u.digits() > ctx.prec() {
            // carried into a new digit: drop the trailing zero
            u.shift_right(1);
            if let Some(special) = self.check_exp(&mut u, ctx, status) {
                return special;
            }
        }
        u.into_decimal()
    }

    /// Infinity or the largest finite value, depending on the rounding
    /// direction relative to the sign.
    fn overflow_result(&self, sign: Sign, ctx: &Context, status: &mut Status) -> Decimal {
        let to_infinity = match ctx.rounding() {
            Rounding::HalfUp
            | Rounding::HalfEven
            | Rounding::HalfDown
            | Rounding::Up
            | Rounding::Trunc => true,
            Rounding::Down | Rounding::ZeroFiveUp => false,
            Rounding::Ceiling => !sign.is_negative(),
            Rounding::Floor => sign.is_negative(),
        };
        if to_infinity {
            return Decimal::infinity(sign);
        }
        match self.nines(ctx.digits(), status) {
            Some(coeff) => Decimal::finite(sign, coeff, ctx.emax() - ctx.prec() + 1),
            None => Decimal::nan(),
        }
    }

    /// Coefficient-level rounding of a finite value to `exp`, without any
    /// range checks. Returns the rounded value and the discarded summary.
    pub(crate) fn round_to_exponent(
        &self,
        a: &Decimal,
        exp: i64,
        mode: Rounding,
        status: &mut Status,
    ) -> Option<(Unrounded, Discarded)> {
        let mut u = Unrounded::from_decimal(a);
        if exp <= a.exponent() {
            u.coeff = self.scaled(&u.coeff, (a.exponent() - exp) as usize, status)?;
            u.exp = exp;
            return Some((u, Discarded::EXACT));
        }
        let rest = u.shift_right((exp - a.exponent()) as usize);
        u.exp = exp;
        u.apply_round(mode, rest);
        Some((u, rest))
    }
}

entry_points! {
    /// Fits a value into the context: NaN payloads are truncated to
    /// `prec - clamp` digits, finite values are range checked and rounded.
    finalize, finalize_quiet => finalize_kernel(a: &Decimal) -> Decimal;
}
