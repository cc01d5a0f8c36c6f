// ============================================================================
// Comparison
// Numeric ordering, signaling comparison and max/min selection
// ============================================================================

use super::add::invalid;
use super::resolver::{nan_outcome, resolve, Op, Rule};
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Sign, Status};
use std::cmp::Ordering;

/// Numeric order of two non-NaN operands, infinities included.
pub(crate) fn numeric_order(a: &Decimal, b: &Decimal) -> Ordering {
    match (a.is_infinite(), b.is_infinite()) {
        (true, true) => match (a.is_negative(), b.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            _ => Ordering::Equal,
        },
        (true, false) if a.is_negative() => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, true) if b.is_negative() => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp_finite(b),
    }
}

fn magnitude_order(a: &Decimal, b: &Decimal) -> Ordering {
    match (a.is_infinite(), b.is_infinite()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp_magnitude(b),
    }
}

/// Breaks a numeric tie: the positive sign wins, then the exponent
/// (larger for positives, smaller for negatives).
fn tie_break(a: &Decimal, b: &Decimal) -> Ordering {
    match (a.is_negative(), b.is_negative()) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => a.exponent().cmp(&b.exponent()),
        (true, true) => b.exponent().cmp(&a.exponent()),
    }
}

fn ordering_value(order: Ordering) -> Decimal {
    match order {
        Ordering::Less => Decimal::NEG_ONE,
        Ordering::Equal => Decimal::ZERO,
        Ordering::Greater => Decimal::ONE,
    }
}

/// Which operand a selection keeps.
#[derive(Clone, Copy)]
enum Pick {
    Max,
    Min,
    MaxMag,
    MinMag,
}

impl DecimalEngine {
    pub(crate) fn cmp_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        _ctx: &Context,
        status: &mut Status,
    ) -> Option<Ordering> {
        match resolve(Op::Compare, a, b) {
            Rule::Compute => Some(numeric_order(a, b)),
            _ => {
                if a.is_snan() || b.is_snan() {
                    *status |= Status::INVALID_OPERATION;
                }
                None
            },
        }
    }

    pub(crate) fn compare_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.compare_with(Op::Compare, a, b, ctx, status)
    }

    pub(crate) fn compare_signal_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        self.compare_with(Op::CompareSignal, a, b, ctx, status)
    }

    fn compare_with(
        &self,
        op: Op,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        match resolve(op, a, b) {
            Rule::Compute => ordering_value(numeric_order(a, b)),
            rule => nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)),
        }
    }

    fn select(
        &self,
        pick: Pick,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        let chosen = match resolve(Op::MaxMin, a, b) {
            Rule::Compute => {
                let order = match pick {
                    Pick::Max | Pick::Min => numeric_order(a, b),
                    Pick::MaxMag | Pick::MinMag => magnitude_order(a, b),
                }
                .then_with(|| numeric_order(a, b))
                .then_with(|| tie_break(a, b));
                let keep_a = match pick {
                    Pick::Max | Pick::MaxMag => order != Ordering::Less,
                    Pick::Min | Pick::MinMag => order != Ordering::Greater,
                };
                if keep_a {
                    a
                } else {
                    b
                }
            },
            Rule::NumberA => a,
            Rule::NumberB => b,
            rule => return nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)),
        };
        self.finalize_value(chosen.clone(), ctx, status)
    }

    pub(crate) fn max_kernel(&self, a: &Decimal, b: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.select(Pick::Max, a, b, ctx, status)
    }

    pub(crate) fn min_kernel(&self, a: &Decimal, b: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.select(Pick::Min, a, b, ctx, status)
    }

    pub(crate) fn max_mag_kernel(&self, a: &Decimal, b: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.select(Pick::MaxMag, a, b, ctx, status)
    }

    pub(crate) fn min_mag_kernel(&self, a: &Decimal, b: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        self.select(Pick::MinMag, a, b, ctx, status)
    }

    /// `-1`, `0` or `1` as a decimal for IEEE total ordering; never flags.
    pub fn compare_total(&self, a: &Decimal, b: &Decimal) -> Decimal {
        ordering_value(a.compare_total(b))
    }

    /// Total ordering of the absolute values.
    pub fn compare_total_mag(&self, a: &Decimal, b: &Decimal) -> Decimal {
        ordering_value(a.compare_total_mag(b))
    }

    /// Copy of `a` with the sign of `b`. Never flags, NaNs included.
    pub fn copy_sign(&self, a: &Decimal, b: &Decimal) -> Decimal {
        a.with_sign(b.sign())
    }

    pub fn copy_abs(&self, a: &Decimal) -> Decimal {
        a.with_sign(Sign::Positive)
    }

    pub fn copy_negate(&self, a: &Decimal) -> Decimal {
        a.copy_negate()
    }
}

entry_points! {
    /// Numeric ordering, `None` when either operand is a NaN. Only a
    /// signaling NaN raises `Invalid_operation`.
    cmp, cmp_quiet => cmp_kernel(a: &Decimal, b: &Decimal) -> Option<Ordering>;

    /// `-1`, `0` or `1` as a decimal; NaN for NaN operands.
    compare, compare_quiet => compare_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Like `compare`, but any NaN operand raises `Invalid_operation`.
    compare_signal, compare_signal_quiet => compare_signal_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Numerically larger operand; a number wins over a quiet NaN.
    max, max_quiet => max_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Numerically smaller operand; a number wins over a quiet NaN.
    min, min_quiet => min_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Operand with the larger absolute value.
    max_mag, max_mag_quiet => max_mag_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Operand with the smaller absolute value.
    min_mag, min_mag_quiet => min_mag_kernel(a: &Decimal, b: &Decimal) -> Decimal;
}
