// ============================================================================
// Trap Handler Interface
// Defines the contract for reacting to trapped status conditions
// ============================================================================

use crate::domain::{Context, Status};
use parking_lot::Mutex;

/// Handler invoked synchronously when an operation raises a condition that
/// is enabled in the context's trap mask.
///
/// The raised conditions are already merged into `ctx.status()`; the
/// trapped subset is available as `ctx.newtrap()`. The handler may inspect
/// and modify the context, abort, panic, or return to let the operation's
/// result through.
pub trait TrapHandler: Send + Sync {
    /// Handle trapped conditions
    fn on_trap(&self, ctx: &mut Context);

    /// Get handler name
    fn name(&self) -> &'static str;
}

/// Fail-fast default: logs the trapped conditions and aborts the process.
pub struct AbortTrapHandler;

impl TrapHandler for AbortTrapHandler {
    fn on_trap(&self, ctx: &mut Context) {
        tracing::error!(trapped = %ctx.newtrap(), context = %ctx, "decimal trap, aborting");
        std::process::abort();
    }

    fn name(&self) -> &'static str {
        "Abort"
    }
}

/// Panics with the trapped conditions; useful under `catch_unwind` and in
/// tests.
pub struct PanicTrapHandler;

impl TrapHandler for PanicTrapHandler {
    fn on_trap(&self, ctx: &mut Context) {
        panic!("decimal trap: {}", ctx.newtrap());
    }

    fn name(&self) -> &'static str {
        "Panic"
    }
}

/// Ignores traps.
pub struct NoOpTrapHandler;

impl TrapHandler for NoOpTrapHandler {
    fn on_trap(&self, _ctx: &mut Context) {
        // Do nothing
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }
}

/// Logs traps and lets the operation return its result.
pub struct LoggingTrapHandler;

impl TrapHandler for LoggingTrapHandler {
    fn on_trap(&self, ctx: &mut Context) {
        tracing::warn!(trapped = %ctx.newtrap(), status = %ctx.status(), "decimal trap");
    }

    fn name(&self) -> &'static str {
        "Logging"
    }
}

/// Records every trapped condition set, in order.
#[derive(Default)]
pub struct RecordingTrapHandler {
    trapped: Mutex<Vec<Status>>,
}

impl RecordingTrapHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded traps.
    pub fn recorded(&self) -> Vec<Status> {
        self.trapped.lock().clone()
    }

    /// Union of everything recorded so far.
    pub fn union(&self) -> Status {
        self.trapped
            .lock()
            .iter()
            .fold(Status::empty(), |acc, s| acc | *s)
    }

    pub fn clear(&self) {
        self.trapped.lock().clear();
    }
}

impl TrapHandler for RecordingTrapHandler {
    fn on_trap(&self, ctx: &mut Context) {
        self.trapped.lock().push(ctx.newtrap());
    }

    fn name(&self) -> &'static str {
        "Recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let mut ctx = Context::default_context();
        NoOpTrapHandler.on_trap(&mut ctx);
        assert_eq!(ctx, Context::default_context());
    }

    #[test]
    fn test_logging_handler() {
        let mut ctx = Context::default_context();
        LoggingTrapHandler.on_trap(&mut ctx);
        assert_eq!(LoggingTrapHandler.name(), "Logging");
    }

    #[test]
    fn test_recording_handler() {
        let handler = RecordingTrapHandler::new();
        let mut ctx = Context::default_context();
        ctx.set_newtrap(Status::OVERFLOW);
        handler.on_trap(&mut ctx);
        ctx.set_newtrap(Status::DIVISION_BY_ZERO);
        handler.on_trap(&mut ctx);
        assert_eq!(
            handler.recorded(),
            vec![Status::OVERFLOW, Status::DIVISION_BY_ZERO]
        );
        assert_eq!(handler.union(), Status::OVERFLOW | Status::DIVISION_BY_ZERO);
        handler.clear();
        assert!(handler.recorded().is_empty());
    }

    #[test]
    #[should_panic(expected = "decimal trap: [Division_by_zero]")]
    fn test_panic_handler() {
        let mut ctx = Context::default_context();
        ctx.set_newtrap(Status::DIVISION_BY_ZERO);
        PanicTrapHandler.on_trap(&mut ctx);
    }
}
