// ============================================================================
// Unary Operations
// Sign operations and stepping to adjacent representable values
// ============================================================================

use super::compare::numeric_order;
use super::resolver::{check_nan, check_nans};
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Rounding, Sign, Status};
use std::cmp::Ordering;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl DecimalEngine {
    /// Copy of `a` with `sign`, finalized. A zero turns positive unless
    /// rounding toward negative infinity.
    fn with_sign_finalized(
        &self,
        a: &Decimal,
        sign: Sign,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Some(nan) = check_nan(a, ctx, status) {
            return nan;
        }
        let sign = if a.is_zero() && ctx.rounding() != Rounding::Floor {
            Sign::Positive
        } else {
            sign
        };
        self.finalize_value(a.with_sign(sign), ctx, status)
    }

    pub(crate) fn plus_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.with_sign_finalized(a, a.sign(), ctx, status)
    }

    pub(crate) fn minus_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.with_sign_finalized(a, a.sign().flip(), ctx, status)
    }

    pub(crate) fn abs_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        if a.is_negative() {
            self.minus_kernel(a, ctx, status)
        } else {
            self.plus_kernel(a, ctx, status)
        }
    }

    /// Largest finite magnitude of the context with `sign`.
    fn largest_finite(&self, sign: Sign, ctx: &Context, status: &mut Status) -> Decimal {
        match self.nines(ctx.digits(), status) {
            Some(coeff) => Decimal::finite(sign, coeff, ctx.etop()),
            None => Decimal::nan(),
        }
    }

    fn next_kernel(
        &self,
        a: &Decimal,
        direction: Direction,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Some(nan) = check_nan(a, ctx, status) {
            return nan;
        }
        let (mode, toward) = match direction {
            Direction::Up => (Rounding::Ceiling, Sign::Positive),
            Direction::Down => (Rounding::Floor, Sign::Negative),
        };
        if a.is_infinite() {
            return if a.sign() == toward {
                a.clone()
            } else {
                self.largest_finite(a.sign(), ctx, status)
            };
        }

        let mut work_ctx = ctx.clone();
        work_ctx.set_rounding(mode);

        // a value that is not representable already rounds to the neighbor
        let mut work = Status::empty();
        let fitted = self.finalize_value(a.clone(), &work_ctx, &mut work);
        if work.intersects(Status::INEXACT | Status::ERRORS) {
            *status |= work & Status::ERRORS;
            return fitted;
        }

        // one unit below the smallest subnormal
        let tiny = Decimal::from_raw(toward, vec![1], ctx.etiny() - 1);
        let mut work = Status::empty();
        let stepped = self.add_kernel(a, &tiny, &work_ctx, &mut work);
        *status |= work & Status::ERRORS;
        stepped
    }

    pub(crate) fn next_plus_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.next_kernel(a, Direction::Up, ctx, status)
    }

    pub(crate) fn next_minus_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.next_kernel(a, Direction::Down, ctx, status)
    }

    /// Neighbor of `a` in the direction of `b`; `a` with the sign of `b`
    /// when they are numerically equal.
    pub(crate) fn next_toward_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Some(nan) = check_nans(a, b, ctx, status) {
            return nan;
        }
        let direction = match numeric_order(a, b) {
            Ordering::Equal => return a.with_sign(b.sign()),
            Ordering::Less => Direction::Up,
            Ordering::Greater => Direction::Down,
        };

        let mut work = Status::empty();
        let result = self.next_kernel(a, direction, ctx, &mut work);
        *status |= work;
        if result.is_infinite() {
            *status |= Status::OVERFLOW | Status::ROUNDED | Status::INEXACT;
        } else if result.is_finite() && result.adjusted_exponent() < ctx.emin() {
            *status |= Status::UNDERFLOW | Status::SUBNORMAL | Status::ROUNDED | Status::INEXACT;
            if result.is_zero() {
                *status |= Status::CLAMPED;
            }
        }
        result
    }
}

entry_points! {
    /// `0 + a`: finalized copy; `-0` becomes `+0` unless rounding is FLOOR.
    plus, plus_quiet => plus_kernel(a: &Decimal) -> Decimal;

    /// `0 - a`: finalized negation.
    minus, minus_quiet => minus_kernel(a: &Decimal) -> Decimal;

    /// Finalized absolute value.
    abs, abs_quiet => abs_kernel(a: &Decimal) -> Decimal;

    /// Smallest representable value greater than `a`.
    next_plus, next_plus_quiet => next_plus_kernel(a: &Decimal) -> Decimal;

    /// Largest representable value less than `a`.
    next_minus, next_minus_quiet => next_minus_kernel(a: &Decimal) -> Decimal;

    /// Representable value next to `a` in the direction of `b`.
    next_toward, next_toward_quiet => next_toward_kernel(a: &Decimal, b: &Decimal) -> Decimal;
}
