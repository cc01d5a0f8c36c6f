// ============================================================================
// Numeric Module
// Coefficient arithmetic on base-10^19 word vectors
// ============================================================================
//
// This module provides:
// - words: add/sub with carry/borrow, word x vector multiply, comparison
// - shift: decimal shifts with a discarded-digit summary for rounding
// - division: word x vector and full long division
// - errors: typed errors for configuration, conversion and resources
//
// Design principles:
// - Little-endian word order, every word normalized below 10^19
// - u128 intermediates for products and partial quotients
// - No allocation failures surface here; sizing is the caller's job

mod division;
mod errors;
mod shift;
mod words;

pub use division::divmod;
pub use errors::{
    AllocError, ConfigError, ContextError, ConversionError, ConversionResult, TransformError,
};
pub use shift::{
    all_nines, pow10, shift_left, shift_left_into, shift_right, shifted_len, summarize_remainder,
    Discarded,
};
pub use words::{
    add_assign, add_into, compare, digit_at, digit_count, div_word_into, from_u128, increment,
    is_zero, mul_add_word, mul_schoolbook, mul_word_assign, mul_word_into, significant_len,
    sub_assign, sub_into, to_u128, trailing_zeros, trim, word_digits, Word, POW10, RADIX, RDIGITS,
};
