// ============================================================================
// Schoolbook Multiplier
// Quadratic multiplication, the reference for every other strategy
// ============================================================================

use super::traits::Multiplier;
use crate::numeric::{self, TransformError, Word};

/// Word-by-word long multiplication.
#[derive(Debug, Default, Clone, Copy)]
pub struct Schoolbook;

impl Schoolbook {
    pub fn new() -> Self {
        Self
    }
}

impl Multiplier for Schoolbook {
    fn multiply_into(
        &self,
        out: &mut [Word],
        u: &[Word],
        v: &[Word],
    ) -> Result<(), TransformError> {
        debug_assert_eq!(out.len(), u.len() + v.len());
        match (u.len(), v.len()) {
            (_, 1) => {
                out[u.len()] = numeric::mul_word_into(&mut out[..u.len()], u, v[0]);
            },
            (1, _) => {
                out[v.len()] = numeric::mul_word_into(&mut out[..v.len()], v, u[0]);
            },
            _ => numeric::mul_schoolbook(out, u, v),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Schoolbook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::RADIX;

    #[test]
    fn test_single_word_paths() {
        let m = Schoolbook::new();
        let mut out = [0; 3];
        m.multiply_into(&mut out, &[RADIX - 1, 1], &[10]).unwrap();
        // (2 * 10^19 - 1) * 10
        assert_eq!(out, [RADIX - 10, 19, 0]);

        let mut swapped = [0; 3];
        m.multiply_into(&mut swapped, &[10], &[RADIX - 1, 1]).unwrap();
        assert_eq!(swapped, out);
    }

    #[test]
    fn test_multi_word() {
        let m = Schoolbook::new();
        let mut out = [0; 4];
        m.multiply_into(&mut out, &[0, 1], &[0, 1]).unwrap();
        assert_eq!(out, [0, 0, 1, 0]);
    }
}
