// ============================================================================
// Modular Arithmetic
// Three NTT-friendly primes and Chinese-remainder recombination
// ============================================================================
//
// Each prime has the form 2^64 - 2^k + 1, so every coefficient word (< 10^19)
// is already a residue and 2^32 divides p - 1 for all three. The product of
// the primes (about 6.3 * 10^57) bounds every convolution term of two
// operands up to 2^32 words: n * (10^19 - 1)^2 < 4.3 * 10^47.

use std::sync::OnceLock;

/// An NTT prime with a primitive root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus {
    pub p: u64,
    /// Generator of the full multiplicative group
    pub root: u64,
}

/// 2^64 - 2^32 + 1
pub const P1: Modulus = Modulus {
    p: 18_446_744_069_414_584_321,
    root: 7,
};

/// 2^64 - 2^34 + 1
pub const P2: Modulus = Modulus {
    p: 18_446_744_056_529_682_433,
    root: 10,
};

/// 2^64 - 2^40 + 1
pub const P3: Modulus = Modulus {
    p: 18_446_742_974_197_923_841,
    root: 19,
};

pub const MODULI: [Modulus; 3] = [P1, P2, P3];

/// Longest supported transform: the smallest two-adicity among the primes.
pub const MAX_TRANSFORM_LENGTH: usize = 1 << 32;

impl Modulus {
    #[inline]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let (s, overflow) = a.overflowing_add(b);
        if overflow || s >= self.p {
            s.wrapping_sub(self.p)
        } else {
            s
        }
    }

    #[inline]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + (self.p - b)
        }
    }

    #[inline]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.p as u128) as u64
    }

    pub fn pow(&self, mut base: u64, mut exp: u64) -> u64 {
        let mut acc = 1;
        base %= self.p;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }
        acc
    }

    /// Multiplicative inverse by Fermat's little theorem.
    #[inline]
    pub fn inv(&self, a: u64) -> u64 {
        self.pow(a, self.p - 2)
    }

    /// Principal `n`-th root of unity; `n` must be a power of two within
    /// the two-adicity of `p`.
    pub fn root_of_unity(&self, n: usize) -> u64 {
        debug_assert!(n.is_power_of_two() && (self.p - 1) % n as u64 == 0);
        self.pow(self.root, (self.p - 1) / n as u64)
    }
}

/// Constants for Garner's recombination.
struct CrtConstants {
    /// p1^-1 mod p2
    inv_p1_mod_p2: u64,
    /// (p1 * p2)^-1 mod p3
    inv_p1p2_mod_p3: u64,
    /// p1 mod p3
    p1_mod_p3: u64,
}

fn crt_constants() -> &'static CrtConstants {
    static CONSTANTS: OnceLock<CrtConstants> = OnceLock::new();
    CONSTANTS.get_or_init(|| {
        let p1_mod_p3 = P1.p % P3.p;
        let p1p2_mod_p3 = P3.mul(p1_mod_p3, P2.p % P3.p);
        CrtConstants {
            inv_p1_mod_p2: P2.inv(P1.p % P2.p),
            inv_p1p2_mod_p3: P3.inv(p1p2_mod_p3),
            p1_mod_p3,
        }
    })
}

/// 192-bit unsigned integer, little-endian limbs.
pub type U192 = [u64; 3];

/// Recombines residues modulo `P1`, `P2`, `P3` into the unique value below
/// `P1 * P2 * P3`.
pub fn crt(r1: u64, r2: u64, r3: u64) -> U192 {
    let c = crt_constants();

    // x12 = r1 + p1 * t2 reproduces r1 mod p1 and r2 mod p2
    let t2 = P2.mul(P2.sub(r2 % P2.p, r1 % P2.p), c.inv_p1_mod_p2);
    let x12 = r1 as u128 + P1.p as u128 * t2 as u128;

    // x = x12 + p1 * p2 * t3 adds r3 mod p3
    let x12_mod_p3 = P3.add(r1 % P3.p, P3.mul(c.p1_mod_p3, t2 % P3.p));
    let t3 = P3.mul(P3.sub(r3 % P3.p, x12_mod_p3), c.inv_p1p2_mod_p3);

    let p1p2 = P1.p as u128 * P2.p as u128;
    let high = mul_u128_u64(p1p2, t3);
    add_u128(high, x12)
}

fn mul_u128_u64(a: u128, b: u64) -> U192 {
    let lo = (a as u64) as u128 * b as u128;
    let hi = (a >> 64) * b as u128;
    let limb0 = lo as u64;
    let mid = (lo >> 64) + (hi as u64) as u128;
    let limb1 = mid as u64;
    let limb2 = ((hi >> 64) + (mid >> 64)) as u64;
    [limb0, limb1, limb2]
}

/// Adds a `u128` to a 192-bit value; the sum must fit 192 bits.
pub fn add_u128(a: U192, b: u128) -> U192 {
    let (l0, c0) = a[0].overflowing_add(b as u64);
    let (l1a, c1a) = a[1].overflowing_add((b >> 64) as u64);
    let (l1, c1b) = l1a.overflowing_add(c0 as u64);
    let l2 = a[2] + (c1a as u64) + (c1b as u64);
    [l0, l1, l2]
}

/// Adds two 192-bit values; the sum must fit 192 bits.
pub fn add_u192(a: U192, b: U192) -> U192 {
    let low = add_u128(a, b[0] as u128 | ((b[1] as u128) << 64));
    [low[0], low[1], low[2] + b[2]]
}

/// Divides a 192-bit value by a word, returning (quotient, remainder).
pub fn divrem_u192(a: U192, d: u64) -> (U192, u64) {
    let mut q = [0u64; 3];
    let mut rem: u128 = 0;
    for i in (0..3).rev() {
        let cur = (rem << 64) | a[i] as u128;
        q[i] = (cur / d as u128) as u64;
        rem = cur % d as u128;
    }
    (q, rem as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_shapes() {
        assert_eq!(P1.p, u64::MAX - (1u64 << 32) + 2);
        assert_eq!(P2.p, u64::MAX - (1u64 << 34) + 2);
        assert_eq!(P3.p, u64::MAX - (1u64 << 40) + 2);
        for m in MODULI {
            assert_eq!((m.p - 1) % MAX_TRANSFORM_LENGTH as u64, 0);
        }
    }

    #[test]
    fn test_roots_have_full_order() {
        for m in MODULI {
            let w = m.root_of_unity(MAX_TRANSFORM_LENGTH);
            // w^(2^32) == 1 but w^(2^31) == -1
            assert_eq!(m.pow(w, MAX_TRANSFORM_LENGTH as u64), 1);
            assert_eq!(m.pow(w, (MAX_TRANSFORM_LENGTH / 2) as u64), m.p - 1);
        }
    }

    #[test]
    fn test_inverse() {
        for m in MODULI {
            let a = 123_456_789_012_345_678;
            assert_eq!(m.mul(a, m.inv(a)), 1);
        }
    }

    #[test]
    fn test_add_sub_near_modulus() {
        let m = P1;
        assert_eq!(m.add(m.p - 1, m.p - 1), m.p - 2);
        assert_eq!(m.sub(0, 1), m.p - 1);
    }

    #[test]
    fn test_crt_small_value() {
        let x: u64 = 9_999_999_999_999_999_999;
        assert_eq!(crt(x % P1.p, x % P2.p, x % P3.p), [x, 0, 0]);
    }

    #[test]
    fn test_crt_large_value() {
        // x = 2^130 + 5
        let x: U192 = [5, 0, 4];
        let residue = |m: Modulus| -> u64 {
            let two64 = m.pow(2, 64);
            let hi = m.mul(m.mul(x[2] % m.p, two64), two64);
            m.add(hi, x[0] % m.p)
        };
        assert_eq!(crt(residue(P1), residue(P2), residue(P3)), x);
    }

    #[test]
    fn test_divrem_u192() {
        let (q, r) = divrem_u192([7, 0, 1], 10);
        // 2^128 + 7 = 10 * 34028236692093846346337460743176821146 + 3
        assert_eq!(r, 3);
        let back = add_u128(mul_u128_u64(q[0] as u128 | ((q[1] as u128) << 64), 10), 3);
        assert_eq!(back, [7, 0, 1]);
    }
}
