// ============================================================================
// Transform Multiplier
// Number-theoretic transform convolution over three primes
// ============================================================================

use super::modular::{self, Modulus, MAX_TRANSFORM_LENGTH, MODULI, U192};
use super::traits::Multiplier;
use crate::numeric::{ConfigError, TransformError, Word, RADIX};

/// Multiplies by convolving the word vectors modulo three primes and
/// recombining the residues.
///
/// Results are identical to schoolbook multiplication. Operands whose
/// product needs a transform longer than `max_length` are rejected.
#[derive(Debug, Clone, Copy)]
pub struct TransformMultiplier {
    max_length: usize,
}

impl TransformMultiplier {
    /// Multiplier accepting the full supported transform length (2^32).
    pub fn new() -> Self {
        Self {
            max_length: MAX_TRANSFORM_LENGTH,
        }
    }

    /// Multiplier limited to shorter transforms.
    ///
    /// # Errors
    /// `ConfigError` if `max_length` is not a power of two or exceeds 2^32.
    pub fn with_max_length(max_length: usize) -> Result<Self, ConfigError> {
        if !max_length.is_power_of_two() {
            return Err(ConfigError::TransformLengthNotPowerOfTwo(max_length));
        }
        if max_length > MAX_TRANSFORM_LENGTH {
            return Err(ConfigError::TransformLengthTooLarge(max_length));
        }
        Ok(Self { max_length })
    }

    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Transform length needed for operands of the given word counts.
    #[inline]
    pub fn transform_length(ulen: usize, vlen: usize) -> usize {
        (ulen + vlen).next_power_of_two()
    }
}

impl Default for TransformMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Transform
// ============================================================================

fn bit_reverse(a: &mut [u64]) {
    let n = a.len();
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            a.swap(i, j);
        }
    }
}

/// In-place iterative radix-2 transform. `inverse` uses the inverse root
/// and scales by `1/n`.
fn ntt(a: &mut [u64], m: &Modulus, inverse: bool) {
    let n = a.len();
    bit_reverse(a);

    let mut len = 2;
    while len <= n {
        let mut w_len = m.root_of_unity(len);
        if inverse {
            w_len = m.inv(w_len);
        }
        for start in (0..n).step_by(len) {
            let mut w = 1;
            for k in 0..len / 2 {
                let x = a[start + k];
                let y = m.mul(a[start + k + len / 2], w);
                a[start + k] = m.add(x, y);
                a[start + k + len / 2] = m.sub(x, y);
                w = m.mul(w, w_len);
            }
        }
        len <<= 1;
    }

    if inverse {
        let n_inv = m.inv(n as u64 % m.p);
        for x in a.iter_mut() {
            *x = m.mul(*x, n_inv);
        }
    }
}

/// Cyclic convolution of `u` and `v` modulo one prime, padded to `n`.
fn convolve(u: &[Word], v: &[Word], n: usize, m: &Modulus) -> Vec<u64> {
    let mut a = vec![0u64; n];
    let mut b = vec![0u64; n];
    a[..u.len()].copy_from_slice(u);
    b[..v.len()].copy_from_slice(v);

    ntt(&mut a, m, false);
    ntt(&mut b, m, false);
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x = m.mul(*x, *y);
    }
    ntt(&mut a, m, true);
    a
}

impl Multiplier for TransformMultiplier {
    fn multiply_into(
        &self,
        out: &mut [Word],
        u: &[Word],
        v: &[Word],
    ) -> Result<(), TransformError> {
        debug_assert_eq!(out.len(), u.len() + v.len());
        let n = Self::transform_length(u.len(), v.len());
        if n > self.max_length {
            tracing::warn!(
                required = n,
                maximum = self.max_length,
                "transform length exceeds maximum"
            );
            return Err(TransformError::LengthExceeded {
                required: n,
                maximum: self.max_length,
            });
        }
        tracing::trace!(
            ulen = u.len(),
            vlen = v.len(),
            transform_length = n,
            "transform multiplication"
        );

        let [c1, c2, c3] = MODULI.map(|m| convolve(u, v, n, &m));

        // carry-resolve the recombined terms into base 10^19
        let mut carry: U192 = [0; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let term = modular::crt(c1[i], c2[i], c3[i]);
            let total = modular::add_u192(carry, term);
            let (q, r) = modular::divrem_u192(total, RADIX);
            *slot = r;
            carry = q;
        }
        debug_assert_eq!(carry, [0; 3]);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Transform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Schoolbook;

    fn pseudo_words(len: usize, seed: u64) -> Vec<Word> {
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                x % RADIX
            })
            .collect()
    }

    fn both(u: &[Word], v: &[Word]) -> (Vec<Word>, Vec<Word>) {
        let mut a = vec![0; u.len() + v.len()];
        let mut b = vec![0; u.len() + v.len()];
        Schoolbook.multiply_into(&mut a, u, v).unwrap();
        TransformMultiplier::new().multiply_into(&mut b, u, v).unwrap();
        (a, b)
    }

    #[test]
    fn test_matches_schoolbook_small() {
        let (a, b) = both(&[12345], &[67890]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches_schoolbook_all_nines() {
        let u = vec![RADIX - 1; 33];
        let v = vec![RADIX - 1; 17];
        let (a, b) = both(&u, &v);
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches_schoolbook_uneven() {
        let u = pseudo_words(100, 1);
        let v = pseudo_words(7, 2);
        let (a, b) = both(&u, &v);
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_limit() {
        let m = TransformMultiplier::with_max_length(8).unwrap();
        let mut out = vec![0; 10];
        let err = m
            .multiply_into(&mut out, &pseudo_words(5, 3), &pseudo_words(5, 4))
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::LengthExceeded {
                required: 16,
                maximum: 8
            }
        );
    }

    #[test]
    fn test_invalid_max_length() {
        assert_eq!(
            TransformMultiplier::with_max_length(12).unwrap_err(),
            ConfigError::TransformLengthNotPowerOfTwo(12)
        );
        assert_eq!(
            TransformMultiplier::with_max_length(1 << 33).unwrap_err(),
            ConfigError::TransformLengthTooLarge(1 << 33)
        );
    }
}
