// ============================================================================
// End-to-End Scenarios
// Behaviour of the public API under representative contexts
// ============================================================================

use decimal_engine::numeric::ContextError;
use decimal_engine::prelude::*;
use std::sync::Arc;

fn dec(value: i64, exp: i64) -> Decimal {
    Decimal::with_exponent(value, exp)
}

fn context(prec: i64, emax: i64, rounding: Rounding) -> Context {
    let mut ctx = Context::default_context();
    ctx.set_prec(prec).unwrap();
    ctx.set_emax(emax).unwrap();
    ctx.set_emin(-emax).unwrap();
    ctx.set_rounding(rounding);
    ctx
}

#[test]
fn half_even_ties_round_to_even() {
    let engine = DecimalEngine::default();
    let ctx = context(9, 999, Rounding::HalfEven);
    assert_eq!(engine.rescale_quiet(&dec(25, -1), 0, &ctx).value, dec(2, 0));
    assert_eq!(engine.rescale_quiet(&dec(35, -1), 0, &ctx).value, dec(4, 0));
    assert_eq!(engine.rescale_quiet(&dec(-25, -1), 0, &ctx).value, dec(-2, 0));
}

#[test]
fn division_by_zero_and_undefined() {
    let engine = DecimalEngine::default();
    let ctx = context(9, 999, Rounding::HalfEven);

    let out = engine.div_quiet(&dec(5, 0), &Decimal::ZERO, &ctx);
    assert_eq!(out.value, Decimal::infinity(Sign::Positive));
    assert_eq!(out.status, Status::DIVISION_BY_ZERO);

    let out = engine.div_quiet(&dec(-5, 0), &Decimal::ZERO, &ctx);
    assert_eq!(out.value, Decimal::infinity(Sign::Negative));

    let out = engine.div_quiet(&Decimal::ZERO, &Decimal::ZERO, &ctx);
    assert!(out.value.is_qnan());
    assert_eq!(out.status, Status::DIVISION_UNDEFINED);
}

#[test]
fn overflow_by_rounding_mode() {
    let engine = DecimalEngine::default();
    let expected = Status::OVERFLOW | Status::INEXACT | Status::ROUNDED;
    let big = dec(1, 999);
    let ten = dec(10, 0);

    for (mode, operand, result) in [
        (Rounding::HalfUp, big.clone(), Decimal::infinity(Sign::Positive)),
        (Rounding::Ceiling, big.clone(), Decimal::infinity(Sign::Positive)),
        (Rounding::Floor, big.copy_negate(), Decimal::infinity(Sign::Negative)),
        (Rounding::Down, big.clone(), dec(999_999_999, 991)),
        (Rounding::Down, big.copy_negate(), dec(-999_999_999, 991)),
        (Rounding::Floor, big.clone(), dec(999_999_999, 991)),
        (Rounding::HalfDown, big.clone(), Decimal::infinity(Sign::Positive)),
        (Rounding::Up, big.clone(), Decimal::infinity(Sign::Positive)),
        (Rounding::Trunc, big.clone(), Decimal::infinity(Sign::Positive)),
        (Rounding::Trunc, big.copy_negate(), Decimal::infinity(Sign::Negative)),
    ] {
        let out = engine.mul_quiet(&operand, &ten, &context(9, 999, mode));
        assert_eq!(out.value, result, "{}", mode);
        assert_eq!(out.status, expected, "{}", mode);
    }
}

#[test]
fn trunc_truncates_in_range() {
    let engine = DecimalEngine::default();
    let ctx = context(9, 999, Rounding::Trunc);
    let out = engine.div_quiet(&dec(2, 0), &dec(3, 0), &ctx);
    assert_eq!(out.value, dec(666_666_666, -9));
    assert_eq!(out.status, Status::INEXACT | Status::ROUNDED);

    let out = engine.div_quiet(&dec(-2, 0), &dec(3, 0), &ctx);
    assert_eq!(out.value, dec(-666_666_666, -9));
}

#[test]
fn nan_propagation() {
    let engine = DecimalEngine::default();
    let ctx = context(9, 999, Rounding::HalfEven);
    let three = dec(3, 0);

    let out = engine.add_quiet(&Decimal::snan(), &three, &ctx);
    assert!(out.value.is_qnan());
    assert_eq!(out.status, Status::INVALID_OPERATION);

    let qnan = Decimal::nan_with_payload(Kind::QuietNan, Sign::Negative, vec![42]);
    let out = engine.add_quiet(&qnan, &three, &ctx);
    assert_eq!(out.value, qnan);
    assert!(out.status.is_empty());
}

#[test]
fn ieee_context_derivation() {
    let ctx = Context::ieee_context(64).unwrap();
    assert_eq!(ctx.prec(), 16);
    assert_eq!(ctx.emax(), 384);
    assert_eq!(ctx.emin(), -383);
    assert_eq!(ctx.clamp(), ClampMode::Ieee754);

    let ctx = Context::ieee_context(128).unwrap();
    assert_eq!((ctx.prec(), ctx.emax(), ctx.emin()), (34, 6144, -6143));

    assert_eq!(
        Context::ieee_context(33).err(),
        Some(ContextError::UnsupportedWidth(33))
    );
    assert_eq!(
        Context::ieee_context(0).err(),
        Some(ContextError::UnsupportedWidth(0))
    );
}

#[test]
fn status_is_sticky_across_operations() {
    let engine = DecimalEngine::default();
    let mut ctx = context(9, 999, Rounding::HalfEven);
    ctx.set_traps(0).unwrap();

    engine.div(&Decimal::ONE, &dec(3, 0), &mut ctx);
    engine.add(&Decimal::ONE, &Decimal::ONE, &mut ctx);
    engine.div(&Decimal::ONE, &Decimal::ZERO, &mut ctx);
    assert_eq!(
        ctx.status(),
        Status::INEXACT | Status::ROUNDED | Status::DIVISION_BY_ZERO
    );

    ctx.clear_status();
    assert!(ctx.status().is_empty());
}

#[test]
fn shared_engine_across_threads() {
    let engine = Arc::new(
        EngineBuilder::new()
            .with_trap_handler(Arc::new(NoOpTrapHandler))
            .build()
            .unwrap(),
    );

    std::thread::scope(|scope| {
        for i in 1..=4i64 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let mut ctx = context(9, 999, Rounding::HalfEven);
                let sum = (0..100).fold(Decimal::ZERO, |acc, _| {
                    engine.add(&acc, &dec(i, -2), &mut ctx)
                });
                assert_eq!(sum, dec(i * 100, -2));
                assert!(ctx.status().is_empty());
            });
        }
    });
}

#[test]
fn quantize_to_currency() {
    let engine = DecimalEngine::default();
    let ctx = context(9, 999, Rounding::HalfEven);
    let cents = dec(1, -2);

    assert_eq!(engine.quantize_quiet(&dec(2345, -3), &cents, &ctx).value, dec(234, -2));
    assert_eq!(engine.quantize_quiet(&dec(2355, -3), &cents, &ctx).value, dec(236, -2));

    // more digits than the precision allows
    let out = engine.quantize_quiet(&dec(1, 9), &cents, &ctx);
    assert!(out.value.is_qnan());
    assert_eq!(out.status, Status::INVALID_OPERATION);
}

#[test]
fn rust_decimal_boundary() {
    let engine = DecimalEngine::default();
    let ctx = context(28, 999, Rounding::HalfEven);
    let price = Decimal::from(rust_decimal::Decimal::new(-12345, 3));
    assert_eq!(price, dec(-12345, -3));

    let doubled = engine.mul_i64_quiet(&price, 2, &ctx).value;
    let back = rust_decimal::Decimal::try_from(&doubled).unwrap();
    assert_eq!(back, rust_decimal::Decimal::new(-24690, 3));

    assert!(rust_decimal::Decimal::try_from(&Decimal::nan()).is_err());
}
