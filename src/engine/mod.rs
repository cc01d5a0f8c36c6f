// ============================================================================
// Engine Module
// Arithmetic kernels, rounding, special-value resolution and dispatch
// ============================================================================

/// Generates the quiet (`*_quiet`, returning [`Outcome`]) and signaling
/// (merging into the context and dispatching traps) entry points for a
/// kernel of the form `fn(&self, args.., &Context, &mut Status) -> T`.
macro_rules! entry_points {
    ($(
        $(#[$meta:meta])*
        $name:ident, $quiet:ident => $kernel:ident($($arg:ident: $ty:ty),*) -> $ret:ty;
    )*) => {
        impl $crate::engine::DecimalEngine {
            $(
                $(#[$meta])*
                ///
                /// Quiet form: returns the result together with the
                /// conditions it raised; the context is not touched.
                pub fn $quiet(
                    &self,
                    $($arg: $ty,)*
                    ctx: &$crate::domain::Context,
                ) -> $crate::engine::Outcome<$ret> {
                    let mut status = $crate::domain::Status::empty();
                    let value = if ctx.is_valid() {
                        self.$kernel($($arg,)* ctx, &mut status)
                    } else {
                        status |= $crate::domain::Status::INVALID_CONTEXT;
                        <$ret as $crate::engine::ErrorValue>::error_value()
                    };
                    $crate::engine::Outcome::new(value, status)
                }

                $(#[$meta])*
                ///
                /// Signaling form: merges the raised conditions into `ctx`
                /// and invokes the trap handler for trapped ones.
                pub fn $name(
                    &self,
                    $($arg: $ty,)*
                    ctx: &mut $crate::domain::Context,
                ) -> $ret {
                    let outcome = self.$quiet($($arg,)* ctx);
                    self.raise_status(ctx, outcome.status);
                    outcome.value
                }
            )*
        }
    };
}

mod add;
mod compare;
mod decimal_engine;
mod div;
mod finalize;
mod integer;
mod mul;
mod quantize;
mod resolver;
mod scale;
mod unary;

pub mod factory;

pub use decimal_engine::{DecimalEngine, ErrorValue, Outcome};
pub use factory::{create_from_config, EngineBuilder, EngineConfig};
