// ============================================================================
// Domain Models Module
// Decimal values, arithmetic contexts and status conditions
// ============================================================================

pub mod context;
mod convert;
pub mod decimal;
pub mod status;
pub mod storage;
pub mod triple;

pub use context::{
    ClampMode, Context, Rounding, DECIMAL128, DECIMAL32, DECIMAL64, IEEE_CONTEXT_MAX_BITS,
    MAX_EMAX, MAX_PREC, MIN_EMIN, MIN_ETINY,
};
pub use decimal::{Decimal, Kind, NumberClass, Sign};
pub use status::Status;
pub use storage::{Coefficient, Ownership, WordBuffer, MIN_ALLOC};
pub use triple::{Triple, TripleClass};
