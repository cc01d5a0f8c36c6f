// ============================================================================
// Multiplication Strategies Module
// Schoolbook and number-theoretic-transform coefficient multiplication
//
// Strategies:
// - Schoolbook: quadratic, exact reference
// - Transform: convolution modulo three 64-bit primes, CRT recombined
// - Adaptive: schoolbook below a word-count threshold, transform above
// ============================================================================

pub mod modular;
mod ntt;
mod schoolbook;
mod selector;
mod traits;

pub use ntt::TransformMultiplier;
pub use schoolbook::Schoolbook;
pub use selector::{
    create_multiplier, AdaptiveMultiplier, MultiplierKind, DEFAULT_TRANSFORM_THRESHOLD,
};
pub use traits::Multiplier;
