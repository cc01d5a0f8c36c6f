// ============================================================================
// Arithmetic Properties
// Randomized checks of the engine's algebraic guarantees
// ============================================================================

use decimal_engine::interfaces::{NoOpTrapHandler, SystemAllocator};
use decimal_engine::numeric::{self, RADIX};
use decimal_engine::prelude::*;
use proptest::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

const THRESHOLD: usize = 4;

fn engine() -> DecimalEngine {
    DecimalEngine::default()
}

fn engine_with(config: EngineConfig) -> DecimalEngine {
    create_from_config(&config, Arc::new(NoOpTrapHandler), Arc::new(SystemAllocator)).unwrap()
}

fn finite() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), -30i64..30).prop_map(|(m, e)| Decimal::with_exponent(m, e))
}

fn words(len: usize) -> impl Strategy<Value = Vec<u64>> {
    (prop::collection::vec(0..RADIX, len - 1), 1..RADIX).prop_map(|(mut low, top)| {
        low.push(top);
        low
    })
}

fn rounding() -> impl Strategy<Value = Rounding> {
    prop::sample::select(Rounding::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_sub_undoes_add(a in finite(), b in finite()) {
        let e = engine();
        let ctx = Context::max_context();
        let sum = e.add_quiet(&a, &b, &ctx);
        prop_assert!(sum.is_exact());
        let back = e.sub_quiet(&sum.value, &b, &ctx).value;
        prop_assert_eq!(e.cmp_quiet(&back, &a, &ctx).value, Some(Ordering::Equal));
    }

    #[test]
    fn prop_multiplication_strategies_agree(
        ulen in (THRESHOLD - 1)..=(THRESHOLD + 1),
        vlen in (THRESHOLD - 1)..=(THRESHOLD + 1),
        seed in any::<u64>(),
        exp in -50i64..50,
    ) {
        // xorshift words, top word nonzero
        let mut state = seed | 1;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % RADIX
        };
        let mut u: Vec<u64> = (0..ulen).map(|_| next()).collect();
        let mut v: Vec<u64> = (0..vlen).map(|_| next()).collect();
        u[ulen - 1] = u[ulen - 1].max(1);
        v[vlen - 1] = v[vlen - 1].max(1);

        let a = Decimal::finite(Sign::Positive, u, exp);
        let b = Decimal::finite(Sign::Negative, v, -exp);
        let ctx = Context::max_context();

        let schoolbook = engine_with(EngineConfig::schoolbook_only());
        let adaptive = engine_with(EngineConfig::new(MultiplierKind::Adaptive, THRESHOLD, 1 << 20));
        prop_assert_eq!(schoolbook.mul_quiet(&a, &b, &ctx), adaptive.mul_quiet(&a, &b, &ctx));
    }

    #[test]
    fn prop_transform_matches_schoolbook(u in words(6), v in words(9)) {
        let a = Decimal::finite(Sign::Positive, u, 0);
        let b = Decimal::finite(Sign::Positive, v, 0);
        let ctx = Context::max_context();
        let schoolbook = engine_with(EngineConfig::schoolbook_only());
        let transform = engine_with(EngineConfig::transform_only());
        prop_assert_eq!(schoolbook.mul_quiet(&a, &b, &ctx), transform.mul_quiet(&a, &b, &ctx));
    }

    #[test]
    fn prop_finalize_is_idempotent(
        coeff in any::<u128>(),
        negative in any::<bool>(),
        exp in -150i64..150,
        prec in 1i64..30,
        mode in rounding(),
    ) {
        let ctx = Context::new_unchecked(prec, 99, -99, mode);
        let sign = if negative { Sign::Negative } else { Sign::Positive };
        let x = Decimal::finite(sign, numeric::from_u128(coeff), exp);
        let e = engine();
        let once = e.finalize_quiet(&x, &ctx).value;
        let twice = e.finalize_quiet(&once, &ctx);
        prop_assert_eq!(&twice.value, &once);
        prop_assert!(!twice.status.intersects(Status::INEXACT | Status::ROUNDED));
    }

    #[test]
    fn prop_division_identity(a in any::<i64>(), b in any::<i64>().prop_filter("nonzero", |b| *b != 0)) {
        let e = engine();
        let ctx = Context::default_context();
        let (a, b) = (Decimal::from(a), Decimal::from(b));
        let out = e.divmod_quiet(&a, &b, &ctx);
        prop_assert!(out.status.is_empty());
        let (q, r) = out.value;

        // |r| < |b| and r carries the sign of a
        prop_assert_eq!(r.compare_total_mag(&b), Ordering::Less);
        if !r.is_zero() {
            prop_assert_eq!(r.is_negative(), a.is_negative());
        }

        let qb = e.mul_quiet(&q, &b, &ctx).value;
        let back = e.add_quiet(&qb, &r, &ctx).value;
        prop_assert_eq!(e.cmp_quiet(&back, &a, &ctx).value, Some(Ordering::Equal));
    }
}
