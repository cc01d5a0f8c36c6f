// ============================================================================
// Decimal Engine
// Immutable arithmetic configuration shared by every operation
// ============================================================================

use crate::domain::{Context, Decimal, Status, Triple};
use crate::interfaces::{AbortTrapHandler, CoefficientAllocator, SystemAllocator, TrapHandler};
use crate::numeric::{self, Word};
use crate::transform::{AdaptiveMultiplier, Multiplier};
use std::sync::Arc;

/// Result of a quiet operation: the value plus every condition raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub status: Status,
}

impl<T> Outcome<T> {
    pub fn new(value: T, status: Status) -> Self {
        Self { value, status }
    }

    pub fn into_parts(self) -> (T, Status) {
        (self.value, self.status)
    }

    /// No digits were lost.
    pub fn is_exact(&self) -> bool {
        !self.status.contains(Status::INEXACT)
    }
}

/// Value an operation yields when it cannot run at all (invalid context).
pub trait ErrorValue {
    fn error_value() -> Self;
}

impl ErrorValue for Decimal {
    fn error_value() -> Self {
        Decimal::nan()
    }
}

impl ErrorValue for (Decimal, Decimal) {
    fn error_value() -> Self {
        (Decimal::nan(), Decimal::nan())
    }
}

impl<T> ErrorValue for Option<T> {
    fn error_value() -> Self {
        None
    }
}

impl ErrorValue for Triple {
    fn error_value() -> Self {
        Triple::error()
    }
}

impl ErrorValue for bool {
    fn error_value() -> Self {
        false
    }
}

/// Decimal arithmetic engine.
///
/// Holds the multiplication strategy, the trap handler and the coefficient
/// allocator. The engine itself is immutable and can be shared across
/// threads; each thread owns its `Context`.
///
/// # Example
///
/// ```rust
/// use decimal_engine::prelude::*;
///
/// let engine = DecimalEngine::default();
/// let mut ctx = Context::default_context();
/// let a = Decimal::with_exponent(125, -2); // 1.25
/// let b = Decimal::with_exponent(5, -1); // 0.5
/// let sum = engine.add(&a, &b, &mut ctx);
/// assert_eq!(sum, Decimal::with_exponent(175, -2));
/// assert!(ctx.status().is_empty());
/// ```
pub struct DecimalEngine {
    /// Coefficient multiplication strategy
    multiplier: Box<dyn Multiplier>,

    /// Invoked for trapped conditions by signaling entry points
    trap_handler: Arc<dyn TrapHandler>,

    /// Provides coefficient and large intermediate buffers
    allocator: Arc<dyn CoefficientAllocator>,
}

impl DecimalEngine {
    /// Create a new engine
    pub fn new(
        multiplier: Box<dyn Multiplier>,
        trap_handler: Arc<dyn TrapHandler>,
        allocator: Arc<dyn CoefficientAllocator>,
    ) -> Self {
        tracing::debug!(
            multiplier = multiplier.name(),
            trap_handler = trap_handler.name(),
            allocator = allocator.name(),
            "decimal engine created"
        );
        Self {
            multiplier,
            trap_handler,
            allocator,
        }
    }

    pub fn multiplier_name(&self) -> &'static str {
        self.multiplier.name()
    }

    pub fn trap_handler_name(&self) -> &'static str {
        self.trap_handler.name()
    }

    pub fn allocator_name(&self) -> &'static str {
        self.allocator.name()
    }

    // ======== Status Dispatch ========

    /// Merges `flags` into the context status and invokes the trap handler
    /// when any of them is enabled in the trap mask.
    pub fn raise_status(&self, ctx: &mut Context, flags: Status) {
        ctx.merge_status(flags);
        let trapped = flags & ctx.traps();
        if !trapped.is_empty() {
            ctx.set_newtrap(trapped);
            self.trap_handler.on_trap(ctx);
        }
    }

    // ======== Buffers ========

    /// Zeroed buffer from the allocator; failure raises `Malloc_error`.
    pub(crate) fn buffer(&self, words: usize, status: &mut Status) -> Option<Vec<Word>> {
        match self.allocator.allocate_zeroed(words) {
            Ok(buf) => Some(buf),
            Err(err) => {
                tracing::warn!(error = %err, allocator = self.allocator.name(), "allocation failed");
                *status |= Status::MALLOC_ERROR;
                None
            },
        }
    }

    /// `u * 10^n` in an allocator-provided buffer.
    pub(crate) fn scaled(&self, u: &[Word], n: usize, status: &mut Status) -> Option<Vec<Word>> {
        if n == 0 {
            return Some(u.to_vec());
        }
        let len = numeric::significant_len(u)
            .checked_add(n / numeric::RDIGITS + 1)
            .unwrap_or(usize::MAX);
        let mut out = self.buffer(len, status)?;
        numeric::shift_left_into(&mut out, u, n);
        numeric::trim(&mut out);
        Some(out)
    }

    /// Largest coefficient with `digits` digits.
    pub(crate) fn nines(&self, digits: usize, status: &mut Status) -> Option<Vec<Word>> {
        let mut out = self.buffer(digits.div_ceil(numeric::RDIGITS).max(1), status)?;
        let (full, rest) = (digits / numeric::RDIGITS, digits % numeric::RDIGITS);
        out[..full].fill(numeric::RADIX - 1);
        if rest > 0 {
            out[full] = numeric::POW10[rest] - 1;
        }
        Some(out)
    }

    /// Exact product through the configured strategy. A transform that
    /// cannot handle the operands raises `Invalid_operation`.
    pub(crate) fn product(&self, u: &[Word], v: &[Word], status: &mut Status) -> Option<Vec<Word>> {
        let mut out = self.buffer(u.len() + v.len(), status)?;
        if let Err(err) = self.multiplier.multiply_into(&mut out, u, v) {
            tracing::warn!(error = %err, strategy = self.multiplier.name(), "multiplication rejected");
            *status |= Status::INVALID_OPERATION;
            return None;
        }
        numeric::trim(&mut out);
        Some(out)
    }

    // ======== Storage ========

    /// Grows the storage of `dec` to at least `words` words through the
    /// allocator. On failure raises `Malloc_error` and leaves `dec` as it was.
    pub(crate) fn resize_kernel(
        &self,
        dec: &mut Decimal,
        words: usize,
        _ctx: &Context,
        status: &mut Status,
    ) -> bool {
        match dec.try_resize(words, self.allocator.as_ref()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "coefficient resize failed");
                *status |= Status::MALLOC_ERROR;
                false
            },
        }
    }
}

entry_points! {
    /// Resizes the coefficient storage of a value.
    resize, resize_quiet => resize_kernel(dec: &mut Decimal, words: usize) -> bool;
}

impl Default for DecimalEngine {
    /// Adaptive multiplication, aborting trap handler, system allocation.
    fn default() -> Self {
        Self::new(
            Box::new(AdaptiveMultiplier::default()),
            Arc::new(AbortTrapHandler),
            Arc::new(SystemAllocator),
        )
    }
}
