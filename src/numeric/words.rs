// ============================================================================
// Word Primitives
// Fixed-radix (10^19) word-vector arithmetic with carry/borrow threading
// ============================================================================
//
// All vectors are little-endian: index 0 holds the least significant word.
// Every primitive leaves its output fully normalized (each word < RADIX);
// carries never survive past the end of an operation except through the
// returned carry word.

use std::cmp::Ordering;

/// A single coefficient word holding 19 decimal digits.
pub type Word = u64;

/// The word radix, 10^19.
pub const RADIX: Word = 10_000_000_000_000_000_000;

/// Decimal digits per word.
pub const RDIGITS: usize = 19;

/// Powers of ten that fit a word, `POW10[i] == 10^i`.
pub const POW10: [Word; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

// ============================================================================
// Digit Counting
// ============================================================================

/// Number of decimal digits in a word. Zero counts as one digit.
#[inline]
pub const fn word_digits(word: Word) -> usize {
    let mut d = 1;
    while d < RDIGITS && word >= POW10[d] {
        d += 1;
    }
    d
}

/// Length of the vector without leading zero words.
#[inline]
pub fn significant_len(words: &[Word]) -> usize {
    words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1)
}

/// Number of significant decimal digits; zero for an all-zero vector.
#[inline]
pub fn digit_count(words: &[Word]) -> usize {
    match significant_len(words) {
        0 => 0,
        len => (len - 1) * RDIGITS + word_digits(words[len - 1]),
    }
}

/// Checks whether every word is zero.
#[inline]
pub fn is_zero(words: &[Word]) -> bool {
    words.iter().all(|&w| w == 0)
}

/// Returns the decimal digit at position `pos` (0 = least significant).
#[inline]
pub fn digit_at(words: &[Word], pos: usize) -> u8 {
    let (wi, di) = (pos / RDIGITS, pos % RDIGITS);
    match words.get(wi) {
        Some(&w) => ((w / POW10[di]) % 10) as u8,
        None => 0,
    }
}

/// Number of trailing zero digits of a nonzero vector (0 for zero).
pub fn trailing_zeros(words: &[Word]) -> usize {
    let Some(first) = words.iter().position(|&w| w != 0) else {
        return 0;
    };
    let mut word = words[first];
    let mut tz = first * RDIGITS;
    while word % 10 == 0 {
        word /= 10;
        tz += 1;
    }
    tz
}

/// Drops leading zero words, keeping at least one word.
#[inline]
pub fn trim(words: &mut Vec<Word>) {
    let len = significant_len(words).max(1);
    words.truncate(len);
    if words.is_empty() {
        words.push(0);
    }
}

/// Magnitude comparison of two vectors of any length.
pub fn compare(u: &[Word], v: &[Word]) -> Ordering {
    let (ul, vl) = (significant_len(u), significant_len(v));
    if ul != vl {
        return ul.cmp(&vl);
    }
    for i in (0..ul).rev() {
        match u[i].cmp(&v[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

// ============================================================================
// Single-Word Steps
// ============================================================================

/// `u + v + carry` split into (sum, carry) without leaving the word range.
#[inline]
const fn add_word(u: Word, v: Word, carry: Word) -> (Word, Word) {
    let t = u + carry;
    if t >= RADIX - v {
        (t - (RADIX - v), 1)
    } else {
        (t + v, 0)
    }
}

/// `u - v - borrow` split into (difference, borrow).
#[inline]
const fn sub_word(u: Word, v: Word, borrow: Word) -> (Word, Word) {
    let s = v + borrow;
    if u >= s {
        (u - s, 0)
    } else {
        (u + (RADIX - s), 1)
    }
}

/// `u * v + add` split into (low, high) words.
#[inline]
pub const fn mul_add_word(u: Word, v: Word, add: Word) -> (Word, Word) {
    let p = u as u128 * v as u128 + add as u128;
    ((p % RADIX as u128) as Word, (p / RADIX as u128) as Word)
}

// ============================================================================
// Vector Addition / Subtraction
// ============================================================================

/// `w = u + v`, where `u.len() >= v.len()` and `w.len() == u.len()`.
/// Returns the carry out of the most significant word.
pub fn add_into(w: &mut [Word], u: &[Word], v: &[Word]) -> Word {
    debug_assert!(u.len() >= v.len() && w.len() == u.len());
    let mut carry = 0;
    for i in 0..v.len() {
        let (s, c) = add_word(u[i], v[i], carry);
        w[i] = s;
        carry = c;
    }
    for i in v.len()..u.len() {
        let (s, c) = add_word(u[i], 0, carry);
        w[i] = s;
        carry = c;
    }
    carry
}

/// `w += v`, where `w.len() >= v.len()`. Returns the carry out.
pub fn add_assign(w: &mut [Word], v: &[Word]) -> Word {
    debug_assert!(w.len() >= v.len());
    let mut carry = 0;
    for i in 0..v.len() {
        let (s, c) = add_word(w[i], v[i], carry);
        w[i] = s;
        carry = c;
    }
    let mut i = v.len();
    while carry != 0 && i < w.len() {
        let (s, c) = add_word(w[i], 0, carry);
        w[i] = s;
        carry = c;
        i += 1;
    }
    carry
}

/// Adds one to the vector. Returns the carry out.
pub fn increment(w: &mut [Word]) -> Word {
    for word in w.iter_mut() {
        if *word == RADIX - 1 {
            *word = 0;
        } else {
            *word += 1;
            return 0;
        }
    }
    1
}

/// `w = u - v` for magnitudes with `u >= v`, `w.len() == u.len()`.
pub fn sub_into(w: &mut [Word], u: &[Word], v: &[Word]) {
    debug_assert!(w.len() == u.len());
    debug_assert!(compare(u, v) != Ordering::Less);
    let mut borrow = 0;
    for i in 0..u.len() {
        let vi = v.get(i).copied().unwrap_or(0);
        let (d, b) = sub_word(u[i], vi, borrow);
        w[i] = d;
        borrow = b;
    }
    debug_assert_eq!(borrow, 0);
}

/// `w -= v` for magnitudes with `w >= v`.
pub fn sub_assign(w: &mut [Word], v: &[Word]) {
    debug_assert!(compare(w, v) != Ordering::Less);
    let mut borrow = 0;
    for i in 0..w.len() {
        let vi = v.get(i).copied().unwrap_or(0);
        if vi == 0 && borrow == 0 && i >= v.len() {
            break;
        }
        let (d, b) = sub_word(w[i], vi, borrow);
        w[i] = d;
        borrow = b;
    }
    debug_assert_eq!(borrow, 0);
}

// ============================================================================
// Multiplication / Division by a Word
// ============================================================================

/// `w = u * v`, where `w.len() == u.len()`. Returns the high carry word.
pub fn mul_word_into(w: &mut [Word], u: &[Word], v: Word) -> Word {
    debug_assert!(w.len() == u.len());
    let mut carry = 0;
    for i in 0..u.len() {
        let (lo, hi) = mul_add_word(u[i], v, carry);
        w[i] = lo;
        carry = hi;
    }
    carry
}

/// `w *= v`. Returns the high carry word.
pub fn mul_word_assign(w: &mut [Word], v: Word) -> Word {
    let mut carry = 0;
    for word in w.iter_mut() {
        let (lo, hi) = mul_add_word(*word, v, carry);
        *word = lo;
        carry = hi;
    }
    carry
}

/// Schoolbook product `w = u * v`; `w` must be zeroed and hold
/// `u.len() + v.len()` words.
pub fn mul_schoolbook(w: &mut [Word], u: &[Word], v: &[Word]) {
    debug_assert!(w.len() == u.len() + v.len());
    for (j, &vj) in v.iter().enumerate() {
        if vj == 0 {
            continue;
        }
        let mut carry: u128 = 0;
        for (i, &ui) in u.iter().enumerate() {
            let t = ui as u128 * vj as u128 + w[i + j] as u128 + carry;
            w[i + j] = (t % RADIX as u128) as Word;
            carry = t / RADIX as u128;
        }
        // carry < RADIX and the slot is still untouched
        w[j + u.len()] = carry as Word;
    }
}

/// `q = u / v`, returning the remainder. `v` must be nonzero and below RADIX.
pub fn div_word_into(q: &mut [Word], u: &[Word], v: Word) -> Word {
    debug_assert!(v != 0 && q.len() == u.len());
    let mut rem: u128 = 0;
    for i in (0..u.len()).rev() {
        let t = rem * RADIX as u128 + u[i] as u128;
        q[i] = (t / v as u128) as Word;
        rem = t % v as u128;
    }
    rem as Word
}

/// Converts a `u128` into (at most three) words.
pub fn from_u128(mut value: u128) -> Vec<Word> {
    let mut words = Vec::with_capacity(3);
    loop {
        words.push((value % RADIX as u128) as Word);
        value /= RADIX as u128;
        if value == 0 {
            break;
        }
    }
    words
}

/// Converts a word vector into a `u128`, or `None` when it does not fit.
pub fn to_u128(words: &[Word]) -> Option<u128> {
    let mut value: u128 = 0;
    for &w in words[..significant_len(words)].iter().rev() {
        value = value.checked_mul(RADIX as u128)?.checked_add(w as u128)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn normalize(raw: Vec<u64>) -> Vec<Word> {
        let mut v: Vec<Word> = raw.into_iter().map(|w| w % RADIX).collect();
        if v.is_empty() {
            v.push(0);
        }
        v
    }

    #[test]
    fn test_word_digits() {
        assert_eq!(word_digits(0), 1);
        assert_eq!(word_digits(9), 1);
        assert_eq!(word_digits(10), 2);
        assert_eq!(word_digits(RADIX - 1), 19);
        assert_eq!(word_digits(POW10[18]), 19);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(&[0, 0]), 0);
        assert_eq!(digit_count(&[123]), 3);
        assert_eq!(digit_count(&[0, 1]), 20);
        assert_eq!(digit_count(&[5, 0, 0]), 1);
    }

    #[test]
    fn test_add_carry_across_all_words() {
        let u = [RADIX - 1, RADIX - 1, RADIX - 1];
        let mut w = [0; 3];
        let carry = add_into(&mut w, &u, &[1]);
        assert_eq!(carry, 1);
        assert_eq!(w, [0, 0, 0]);
    }

    #[test]
    fn test_add_max_words_no_overflow() {
        let mut w = [RADIX - 1];
        let carry = add_assign(&mut w, &[RADIX - 1]);
        assert_eq!(carry, 1);
        assert_eq!(w, [RADIX - 2]);
    }

    #[test]
    fn test_sub_borrow_across_all_words() {
        let u = [0, 0, 1];
        let mut w = [0; 3];
        sub_into(&mut w, &u, &[1]);
        assert_eq!(w, [RADIX - 1, RADIX - 1, 0]);
    }

    #[test]
    fn test_increment() {
        let mut w = [RADIX - 1, 7];
        assert_eq!(increment(&mut w), 0);
        assert_eq!(w, [0, 8]);

        let mut all_nines = [RADIX - 1, RADIX - 1];
        assert_eq!(increment(&mut all_nines), 1);
        assert_eq!(all_nines, [0, 0]);
    }

    #[test]
    fn test_mul_word() {
        let u = [RADIX - 1, RADIX - 1];
        let mut w = [0; 2];
        let carry = mul_word_into(&mut w, &u, RADIX - 1);
        // (R^2 - 1)(R - 1) = R^3 - R^2 - R + 1
        assert_eq!(w, [1, RADIX - 1]);
        assert_eq!(carry, RADIX - 2);
    }

    #[test]
    fn test_schoolbook_small() {
        let mut w = [0; 2];
        mul_schoolbook(&mut w, &[12345], &[67890]);
        assert_eq!(w, [12345 * 67890, 0]);
    }

    #[test]
    fn test_u128_conversion() {
        let big = u128::MAX;
        let words = from_u128(big);
        assert_eq!(words.len(), 3);
        assert_eq!(to_u128(&words), Some(big));
        assert_eq!(to_u128(&[0, 0, 0, 1]), None);
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(trailing_zeros(&[0]), 0);
        assert_eq!(trailing_zeros(&[1200]), 2);
        assert_eq!(trailing_zeros(&[0, 10]), 20);
    }

    quickcheck! {
        fn prop_add_then_sub_restores(a: Vec<u64>, b: Vec<u64>) -> bool {
            let (a, b) = (normalize(a), normalize(b));
            let (u, v) = if a.len() >= b.len() { (a, b) } else { (b, a) };
            let mut sum = vec![0; u.len() + 1];
            let carry = add_into(&mut sum[..u.len()], &u, &v);
            sum[u.len()] = carry;
            sub_assign(&mut sum, &v);
            compare(&sum, &u) == Ordering::Equal
        }

        fn prop_mul_word_matches_div_word(a: Vec<u64>, m: u64) -> bool {
            let a = normalize(a);
            let m = m % RADIX;
            if m == 0 {
                return true;
            }
            let mut prod = vec![0; a.len() + 1];
            let carry = mul_word_into(&mut prod[..a.len()], &a, m);
            prod[a.len()] = carry;
            let mut quot = vec![0; prod.len()];
            let rem = div_word_into(&mut quot, &prod, m);
            rem == 0 && compare(&quot, &a) == Ordering::Equal
        }

        fn prop_schoolbook_commutes(a: Vec<u64>, b: Vec<u64>) -> bool {
            let (a, b) = (normalize(a), normalize(b));
            let mut ab = vec![0; a.len() + b.len()];
            let mut ba = vec![0; a.len() + b.len()];
            mul_schoolbook(&mut ab, &a, &b);
            mul_schoolbook(&mut ba, &b, &a);
            ab == ba
        }
    }
}
