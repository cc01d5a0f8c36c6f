// ============================================================================
// Interfaces Module
// Contains the injectable hooks: trap handling and coefficient allocation
// ============================================================================

mod allocator;
mod trap_handler;

pub use allocator::{BoundedAllocator, CoefficientAllocator, SystemAllocator};
pub use trap_handler::{
    AbortTrapHandler, LoggingTrapHandler, NoOpTrapHandler, PanicTrapHandler,
    RecordingTrapHandler, TrapHandler,
};
