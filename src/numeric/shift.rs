// ============================================================================
// Decimal Digit Shifts
// Exact multiply / truncating divide by powers of ten
// ============================================================================

use super::words::{self, Word, POW10, RADIX, RDIGITS};
use std::cmp::Ordering;

/// Summary of the digits dropped by a right shift.
///
/// `leading` is the most significant discarded digit, `sticky` records
/// whether any digit below it was nonzero. Together they are enough to
/// apply every rounding mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discarded {
    pub leading: u8,
    pub sticky: bool,
}

impl Discarded {
    /// Nothing was discarded, or only zeros.
    pub const EXACT: Discarded = Discarded {
        leading: 0,
        sticky: false,
    };

    /// Summary for a remainder that is nonzero but strictly below half.
    pub const BELOW_HALF: Discarded = Discarded {
        leading: 0,
        sticky: true,
    };

    #[inline]
    pub fn is_exact(self) -> bool {
        self.leading == 0 && !self.sticky
    }

    /// Compares the discarded fraction to one half of a unit in the last place.
    #[inline]
    pub fn cmp_half(self) -> Ordering {
        match self.leading.cmp(&5) {
            Ordering::Equal if self.sticky => Ordering::Greater,
            other => other,
        }
    }

    /// Merges a further summary taken below this one.
    #[inline]
    pub fn absorb(self, lower: Discarded) -> Discarded {
        Discarded {
            leading: self.leading,
            sticky: self.sticky || !lower.is_exact(),
        }
    }
}

/// Words needed to hold `u * 10^n`.
#[inline]
pub fn shifted_len(u: &[Word], n: usize) -> usize {
    words::significant_len(u) + n / RDIGITS + 1
}

/// Writes `u * 10^n` into a zeroed buffer of at least `shifted_len(u, n)`
/// words. The buffer is not trimmed.
pub fn shift_left_into(out: &mut [Word], u: &[Word], n: usize) {
    let len = words::significant_len(u);
    if len == 0 {
        return;
    }
    let (q, r) = (n / RDIGITS, n % RDIGITS);
    debug_assert!(out.len() > q + len);
    if r == 0 {
        out[q..q + len].copy_from_slice(&u[..len]);
    } else {
        let carry = words::mul_word_into(&mut out[q..q + len], &u[..len], POW10[r]);
        out[q + len] = carry;
    }
}

/// Multiplies the coefficient by `10^n`. The result is trimmed.
pub fn shift_left(u: &[Word], n: usize) -> Vec<Word> {
    let mut out = vec![0; shifted_len(u, n)];
    shift_left_into(&mut out, u, n);
    words::trim(&mut out);
    out
}

/// Divides the coefficient by `10^n`, truncating, and summarizes the
/// discarded digits. Shifting out every digit yields zero.
pub fn shift_right(u: &[Word], n: usize) -> (Vec<Word>, Discarded) {
    let len = words::significant_len(u);
    if n == 0 || len == 0 {
        let mut out = u[..len.max(1).min(u.len())].to_vec();
        words::trim(&mut out);
        return (out, Discarded::EXACT);
    }

    let summary = discarded_summary(&u[..len], n);

    let (q, r) = (n / RDIGITS, n % RDIGITS);
    if q >= len {
        return (vec![0], summary);
    }
    let src = &u[q..len];
    let mut out = vec![0; src.len()];
    if r == 0 {
        out.copy_from_slice(src);
    } else {
        let high = POW10[RDIGITS - r];
        for i in 0..src.len() {
            let next = src.get(i + 1).copied().unwrap_or(0);
            out[i] = src[i] / POW10[r] + (next % POW10[r]) * high;
        }
    }
    words::trim(&mut out);
    (out, summary)
}

fn discarded_summary(u: &[Word], n: usize) -> Discarded {
    let pos = n - 1;
    let leading = words::digit_at(u, pos);
    let (wi, di) = (pos / RDIGITS, pos % RDIGITS);
    let sticky = if wi >= u.len() {
        !words::is_zero(u)
    } else {
        u[wi] % POW10[di] != 0 || !words::is_zero(&u[..wi])
    };
    Discarded { leading, sticky }
}

/// The vector for `10^n`.
pub fn pow10(n: usize) -> Vec<Word> {
    shift_left(&[1], n)
}

/// Rounds a summary to a word-level remainder class for a divisor:
/// compares `2 * rem` with `divisor` to produce a `Discarded`.
pub fn summarize_remainder(rem: &[Word], divisor: &[Word]) -> Discarded {
    if words::is_zero(rem) {
        return Discarded::EXACT;
    }
    let mut twice = vec![0; rem.len() + 1];
    let carry = words::add_into(&mut twice[..rem.len()], rem, rem);
    twice[rem.len()] = carry;
    match words::compare(&twice, divisor) {
        Ordering::Less => Discarded::BELOW_HALF,
        Ordering::Equal => Discarded {
            leading: 5,
            sticky: false,
        },
        Ordering::Greater => Discarded {
            leading: 5,
            sticky: true,
        },
    }
}

/// Largest coefficient with `n` digits (all nines).
pub fn all_nines(n: usize) -> Vec<Word> {
    let (q, r) = (n / RDIGITS, n % RDIGITS);
    let mut out = vec![RADIX - 1; q];
    if r > 0 {
        out.push(POW10[r] - 1);
    }
    if out.is_empty() {
        out.push(0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_shift_left_across_word_boundary() {
        let out = shift_left(&[123], 18);
        assert_eq!(out, vec![3 * POW10[18], 12]);
        assert_eq!(words::digit_count(&out), 21);
    }

    #[test]
    fn test_shift_left_whole_words() {
        assert_eq!(shift_left(&[7], 38), vec![0, 0, 7]);
        assert_eq!(shift_left(&[0], 5), vec![0]);
    }

    #[test]
    fn test_shift_right_summary() {
        let (q, d) = shift_right(&[12345], 2);
        assert_eq!(q, vec![123]);
        assert_eq!(d, Discarded { leading: 4, sticky: true });

        let (q, d) = shift_right(&[12350], 2);
        assert_eq!(q, vec![123]);
        assert_eq!(d, Discarded { leading: 5, sticky: false });
        assert_eq!(d.cmp_half(), Ordering::Equal);
    }

    #[test]
    fn test_shift_right_everything() {
        let (q, d) = shift_right(&[987], 3);
        assert_eq!(q, vec![0]);
        assert_eq!(d, Discarded { leading: 9, sticky: true });

        let (q, d) = shift_right(&[987], 10);
        assert_eq!(q, vec![0]);
        assert_eq!(d, Discarded::BELOW_HALF);
    }

    #[test]
    fn test_shift_right_across_words() {
        let u = shift_left(&[42], 30);
        let (q, d) = shift_right(&u, 29);
        assert_eq!(q, vec![420]);
        assert!(d.is_exact());
    }

    #[test]
    fn test_all_nines() {
        assert_eq!(all_nines(3), vec![999]);
        assert_eq!(all_nines(19), vec![RADIX - 1]);
        assert_eq!(words::digit_count(&all_nines(40)), 40);
    }

    #[test]
    fn test_summarize_remainder() {
        assert_eq!(summarize_remainder(&[5], &[10]).cmp_half(), Ordering::Equal);
        assert_eq!(summarize_remainder(&[4], &[10]).cmp_half(), Ordering::Less);
        assert_eq!(summarize_remainder(&[6], &[10]).cmp_half(), Ordering::Greater);
        assert!(summarize_remainder(&[0], &[10]).is_exact());
    }

    quickcheck! {
        fn prop_shift_left_then_right(raw: Vec<u64>, n: u8) -> bool {
            let u: Vec<Word> = raw.into_iter().take(6).map(|w| w % RADIX).collect();
            if u.is_empty() {
                return true;
            }
            let n = n as usize % 80;
            let (back, d) = shift_right(&shift_left(&u, n), n);
            d.is_exact() && words::compare(&back, &u) == Ordering::Equal
        }
    }
}
