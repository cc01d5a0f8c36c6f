// ============================================================================
// Multiplication and Fused Multiply-Add
// ============================================================================

use super::add::invalid;
use super::finalize::Unrounded;
use super::resolver::{nan_outcome, resolve, Op, Rule};
use super::DecimalEngine;
use crate::domain::{Context, Decimal, Status};

impl DecimalEngine {
    pub(crate) fn mul_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        match self.mul_exact(a, b, ctx, status) {
            Ok(product) => self.finalize_unrounded(product, ctx, status),
            Err(special) => special,
        }
    }

    /// Unrounded product, or the final value for special operands.
    fn mul_exact(
        &self,
        a: &Decimal,
        b: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Result<Unrounded, Decimal> {
        let sign = a.sign().combine(b.sign());
        match resolve(Op::Mul, a, b) {
            Rule::Compute => {},
            Rule::InfinitySigned => return Err(Decimal::infinity(sign)),
            rule => {
                return Err(nan_outcome(rule, a, b, ctx, status).unwrap_or_else(|| invalid(status)))
            },
        }

        let exp = a.exponent() + b.exponent();
        if a.is_zero() || b.is_zero() {
            return Ok(Unrounded::new(sign, vec![0], exp));
        }
        let (u, v) = (a.coefficient(), b.coefficient());
        match self.product(u, v, status) {
            Some(coeff) => Ok(Unrounded::new(sign, coeff, exp)),
            None => Err(Decimal::nan()),
        }
    }

    /// `a * b + c` with a single rounding. The NaN precedence is that of
    /// the product first, then `c`.
    pub(crate) fn fma_kernel(
        &self,
        a: &Decimal,
        b: &Decimal,
        c: &Decimal,
        ctx: &Context,
        status: &mut Status,
    ) -> Decimal {
        let mut work = Status::empty();
        let product = match self.mul_exact(a, b, ctx, &mut work) {
            Ok(product) => product.into_decimal(),
            Err(special) => special,
        };
        if work.intersects(Status::INVALID_OPERATION | Status::MALLOC_ERROR) {
            *status |= work;
            return product;
        }
        let sum = self.add_kernel(&product, c, ctx, &mut work);
        *status |= work;
        sum
    }
}

entry_points! {
    /// Product of two operands, rounded to the context.
    mul, mul_quiet => mul_kernel(a: &Decimal, b: &Decimal) -> Decimal;

    /// Fused multiply-add: the product is exact, only the sum is rounded.
    fma, fma_quiet => fma_kernel(a: &Decimal, b: &Decimal, c: &Decimal) -> Decimal;
}
