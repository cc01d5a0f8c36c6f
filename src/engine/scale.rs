// ============================================================================
// Exponent Scaling
// logb reads the adjusted exponent, scaleb moves it by an integer
// ============================================================================

use super::add::invalid;
use super::finalize::Unrounded;
use super::resolver::{check_nan, check_nans};
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Sign, Status};

impl DecimalEngine {
    pub(crate) fn logb_kernel(&self, a: &Decimal, ctx: &Context, status: &mut Status) -> Decimal {
        if let Some(nan) = check_nan(a, ctx, status) {
            return nan;
        }
        if a.is_infinite() {
            return Decimal::infinity(Sign::Positive);
        }
        if a.is_zero() {
            *status |= Status::DIVISION_BY_ZERO;
            return Decimal::infinity(Sign::Negative);
        }
        self.finalize_value(Decimal::from(a.adjusted_exponent()), ctx, status)
    }

    pub(crate) fn scaleb_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        if let Some(nan) = check_nans(a, b, ctx, status) {
            return nan;
        }
        if b.is_infinite() || b.exponent() != 0 {
            return invalid(status);
        }
        let Ok(n) = i64::try_from(b) else {
            return invalid(status);
        };
        // |n| beyond this moves any coefficient past both overflow and
        // underflow
        let max_jump = 2 * (ctx.emax() + ctx.prec());
        if n.unsigned_abs() > max_jump as u64 {
            return invalid(status);
        }
        if a.is_infinite() {
            return a.clone();
        }

        let shifted = Unrounded::new(a.sign(), a.coefficient().to_vec(), a.exponent() + n);
        self.finalize_unrounded(shifted, ctx, status)
    }
}

entry_points! {
    /// Adjusted exponent of `a` as a decimal, rounded to the context.
    ///
    /// `-Infinity` with `Division_by_zero` for a zero, `+Infinity` for
    /// either infinity.
    logb, logb_quiet => logb_kernel(a: &Decimal) -> Decimal;

    /// `a * 10^b` for an integer `b` with exponent 0 and magnitude at most
    /// `2 * (emax + prec)`; anything else is invalid.
    scaleb, scaleb_quiet => scaleb_kernel(a: &Decimal, b: &Decimal) -> Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Kind, Rounding};

    fn engine() -> DecimalEngine {
        DecimalEngine::default()
    }

    fn dec(value: i64, exp: i64) -> Decimal {
        Decimal::with_exponent(value, exp)
    }

    fn small() -> Context {
        // emin = -99, etiny = -107
        Context::new_unchecked(9, 99, -99, Rounding::HalfEven)
    }

    #[test]
    fn test_logb_finite() {
        let ctx = small();
        let e = engine();
        assert_eq!(e.logb_quiet(&dec(250, 0), &ctx).value, dec(2, 0));
        assert_eq!(e.logb_quiet(&dec(-25, -3), &ctx).value, dec(-2, 0));
        assert_eq!(e.logb_quiet(&dec(1, 0), &ctx).value, Decimal::ZERO);

        let mut narrow = Context::default_context();
        narrow.set_prec(3).unwrap();
        let out = e.logb_quiet(&dec(1, 123_456), &narrow);
        assert_eq!(out.value, dec(123, 3));
        assert_eq!(out.status, Status::INEXACT | Status::ROUNDED);
    }

    #[test]
    fn test_logb_specials() {
        let ctx = small();
        let e = engine();

        let out = e.logb_quiet(&Decimal::zero(Sign::Negative, 5), &ctx);
        assert_eq!(out.value, Decimal::infinity(Sign::Negative));
        assert_eq!(out.status, Status::DIVISION_BY_ZERO);

        let out = e.logb_quiet(&Decimal::infinity(Sign::Negative), &ctx);
        assert_eq!(out.value, Decimal::infinity(Sign::Positive));
        assert!(out.status.is_empty());

        let snan = Decimal::nan_with_payload(Kind::SignalingNan, Sign::Positive, vec![8]);
        let out = e.logb_quiet(&snan, &ctx);
        assert_eq!(out.value, Decimal::nan_with_payload(Kind::QuietNan, Sign::Positive, vec![8]));
        assert_eq!(out.status, Status::INVALID_OPERATION);
    }

    #[test]
    fn test_scaleb_moves_exponent() {
        let ctx = small();
        let e = engine();
        let out = e.scaleb_quiet(&dec(750, -2), &dec(3, 0), &ctx);
        assert_eq!(out.value, dec(750, 1));
        assert!(out.status.is_empty());

        assert_eq!(e.scaleb_quiet(&dec(1, 0), &dec(-2, 0), &ctx).value, dec(1, -2));
        assert_eq!(
            e.scaleb_quiet(&Decimal::zero(Sign::Negative, 0), &dec(4, 0), &ctx).value,
            Decimal::zero(Sign::Negative, 4)
        );
        assert_eq!(
            e.scaleb_quiet(&Decimal::infinity(Sign::Negative), &dec(2, 0), &ctx).value,
            Decimal::infinity(Sign::Negative)
        );
    }

    #[test]
    fn test_scaleb_range_and_finalize() {
        let ctx = small();
        let e = engine();

        // 2 * (emax + prec) = 216
        let out = e.scaleb_quiet(&dec(1, 0), &dec(217, 0), &ctx);
        assert!(out.value.is_qnan());
        assert_eq!(out.status, Status::INVALID_OPERATION);

        let out = e.scaleb_quiet(&dec(1, 0), &dec(216, 0), &ctx);
        assert_eq!(out.value, Decimal::infinity(Sign::Positive));
        assert_eq!(out.status, Status::OVERFLOW | Status::INEXACT | Status::ROUNDED);

        let out = e.scaleb_quiet(&dec(1, 0), &dec(-216, 0), &ctx);
        assert_eq!(out.value, Decimal::zero(Sign::Positive, ctx.etiny()));
        assert!(out.status.contains(Status::UNDERFLOW | Status::SUBNORMAL | Status::CLAMPED));
    }

    #[test]
    fn test_scaleb_invalid_second_operand() {
        let ctx = small();
        let e = engine();
        for b in [
            dec(15, -1),
            dec(10, -1),
            dec(1, 1),
            Decimal::infinity(Sign::Positive),
            Decimal::from(u64::MAX),
        ] {
            let out = e.scaleb_quiet(&dec(1, 0), &b, &ctx);
            assert!(out.value.is_qnan(), "{b:?}");
            assert_eq!(out.status, Status::INVALID_OPERATION, "{b:?}");
        }

        let out = e.scaleb_quiet(&Decimal::infinity(Sign::Positive), &dec(15, -1), &ctx);
        assert_eq!(out.status, Status::INVALID_OPERATION);
    }

    #[test]
    fn test_scaleb_nans() {
        let ctx = small();
        let e = engine();
        let qnan = Decimal::nan_with_payload(Kind::QuietNan, Sign::Negative, vec![3]);
        let out = e.scaleb_quiet(&qnan, &dec(1, 0), &ctx);
        assert_eq!(out.value, qnan);
        assert!(out.status.is_empty());

        let out = e.scaleb_quiet(&dec(1, 0), &Decimal::snan(), &ctx);
        assert!(out.value.is_qnan());
        assert_eq!(out.status, Status::INVALID_OPERATION);
    }

    #[test]
    fn test_signaling_scaleb_records_status() {
        let mut ctx = small();
        ctx.set_traps(0).unwrap();
        let e = engine();
        let out = e.scaleb(&dec(1, 0), &dec(300, 0), &mut ctx);
        assert!(out.is_qnan());
        assert_eq!(ctx.status(), Status::INVALID_OPERATION);
    }
}
