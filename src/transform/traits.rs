// ============================================================================
// Multiplier Trait
// Abstract interface for coefficient multiplication strategies
// ============================================================================

use crate::numeric::{TransformError, Word};

/// Strategy for multiplying two coefficient word vectors.
///
/// Every implementation must produce exactly the schoolbook product; the
/// choice between them is a performance decision only.
///
/// # Thread Safety
/// All implementations must be `Send + Sync` so one engine can be shared
/// across threads.
pub trait Multiplier: Send + Sync {
    /// Writes `u * v` into `out`.
    ///
    /// # Arguments
    /// - `out`: Zeroed buffer of exactly `u.len() + v.len()` words
    /// - `u`, `v`: Nonempty, normalized operands
    ///
    /// # Errors
    /// `TransformError::LengthExceeded` when the operands need a longer
    /// transform than the strategy supports. `out` is unspecified then.
    fn multiply_into(&self, out: &mut [Word], u: &[Word], v: &[Word])
        -> Result<(), TransformError>;

    /// Get the name of this strategy.
    ///
    /// Used for logging, debugging, and benchmarking.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single-word-only multiplier for testing the trait
    struct WordMultiplier;

    impl Multiplier for WordMultiplier {
        fn multiply_into(
            &self,
            out: &mut [Word],
            u: &[Word],
            v: &[Word],
        ) -> Result<(), TransformError> {
            if u.len() != 1 || v.len() != 1 {
                return Err(TransformError::LengthExceeded {
                    required: u.len() + v.len(),
                    maximum: 2,
                });
            }
            let (lo, hi) = crate::numeric::mul_add_word(u[0], v[0], 0);
            out[0] = lo;
            out[1] = hi;
            Ok(())
        }

        fn name(&self) -> &'static str {
            "Word"
        }
    }

    #[test]
    fn test_trait_object() {
        let m: Box<dyn Multiplier> = Box::new(WordMultiplier);
        let mut out = [0; 2];
        m.multiply_into(&mut out, &[3], &[4]).unwrap();
        assert_eq!(out, [12, 0]);
        assert!(m.multiply_into(&mut [0; 3], &[1, 1], &[1]).is_err());
        assert_eq!(m.name(), "Word");
    }
}
