// ============================================================================
// Decimal Engine Library
// Correctly rounded arbitrary-precision decimal floating point
// ============================================================================

//! # Decimal Engine
//!
//! Arbitrary-precision decimal floating point with the General Decimal
//! Arithmetic semantics: every result is correctly rounded to a [`Context`]
//! (precision, exponent limits, rounding mode) and every exceptional
//! condition is reported through a sticky [`Status`] mask.
//!
//! ## Features
//!
//! - **Nine rounding modes** and IEEE 754 interchange presets
//! - **Quiet and signaling entry points**: `*_quiet` returns an [`Outcome`],
//!   the signaling form merges into the context and dispatches traps
//! - **Pluggable hooks** for trap handling and coefficient allocation
//! - **Transform multiplication** (three-prime NTT) for large coefficients,
//!   chosen adaptively over schoolbook
//!
//! ## Example
//!
//! ```rust
//! use decimal_engine::prelude::*;
//!
//! let engine = DecimalEngine::default();
//! let mut ctx = Context::default_context();
//! ctx.set_prec(9).unwrap();
//!
//! let one = Decimal::from(1);
//! let three = Decimal::from(3);
//! let third = engine.div(&one, &three, &mut ctx);
//! assert_eq!(third, Decimal::with_exponent(333_333_333, -9));
//! assert!(ctx.status().contains(Status::INEXACT | Status::ROUNDED));
//!
//! // quiet form: the context is left alone
//! ctx.clear_status();
//! let out = engine.mul_quiet(&third, &three, &ctx);
//! assert_eq!(out.value, Decimal::with_exponent(999_999_999, -9));
//! assert!(out.is_exact());
//! assert!(ctx.status().is_empty());
//! ```
//!
//! [`Context`]: domain::Context
//! [`Status`]: domain::Status
//! [`Outcome`]: engine::Outcome

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod transform;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ClampMode, Context, Decimal, Kind, NumberClass, Rounding, Sign, Status, Triple,
        TripleClass,
    };
    pub use crate::engine::{
        create_from_config, DecimalEngine, EngineBuilder, EngineConfig, Outcome,
    };
    pub use crate::interfaces::{
        AbortTrapHandler, BoundedAllocator, CoefficientAllocator, LoggingTrapHandler,
        NoOpTrapHandler, RecordingTrapHandler, SystemAllocator, TrapHandler,
    };
    pub use crate::transform::{Multiplier, MultiplierKind};
}

/// Installs a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "logging")]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_arithmetic() {
        let engine = DecimalEngine::default();
        let mut ctx = Context::default_context();
        ctx.set_prec(9).unwrap();

        // (1.10 + 2.205) * 3 / 7
        let sum = engine.add(
            &Decimal::with_exponent(110, -2),
            &Decimal::with_exponent(2205, -3),
            &mut ctx,
        );
        assert_eq!(sum, Decimal::with_exponent(3315, -3));
        assert!(ctx.status().is_empty());

        let product = engine.mul_i64(&sum, 3, &mut ctx);
        assert_eq!(product, Decimal::with_exponent(9945, -3));

        let quotient = engine.div_i64(&product, 7, &mut ctx);
        assert_eq!(quotient, Decimal::with_exponent(142_071_429, -8));
        assert_eq!(ctx.status(), Status::INEXACT | Status::ROUNDED);

        let cents = engine.quantize(&quotient, &Decimal::with_exponent(1, -2), &mut ctx);
        assert_eq!(cents, Decimal::with_exponent(142, -2));
    }

    #[test]
    fn test_traps_reach_handler() {
        let recorder = Arc::new(RecordingTrapHandler::new());
        let engine = EngineBuilder::new()
            .with_trap_handler(recorder.clone())
            .build()
            .unwrap();
        let mut ctx = Context::default_context();

        let out = engine.div(&Decimal::ONE, &Decimal::ZERO, &mut ctx);
        assert_eq!(out, Decimal::infinity(Sign::Positive));
        assert_eq!(recorder.recorded(), vec![Status::DIVISION_BY_ZERO]);

        // untrapped conditions are only recorded in the context
        engine.div(&Decimal::ONE, &Decimal::from(3), &mut ctx);
        assert_eq!(recorder.recorded().len(), 1);
        assert!(ctx.status().contains(Status::INEXACT));
    }

    #[test]
    fn test_invalid_context_is_rejected() {
        let engine = DecimalEngine::default();
        let ctx = Context::new_unchecked(0, 99, -99, Rounding::HalfEven);
        let out = engine.add_quiet(&Decimal::ONE, &Decimal::ONE, &ctx);
        assert!(out.value.is_qnan());
        assert_eq!(out.status, Status::INVALID_CONTEXT);
    }
}
