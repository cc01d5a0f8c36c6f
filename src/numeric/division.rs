// ============================================================================
// Long Division
// Word-vector quotient and remainder (Knuth, TAOCP vol. 2, 4.3.1 D)
// ============================================================================

use super::words::{self, Word, RADIX};
use std::cmp::Ordering;

/// Divides `u` by `v`, returning trimmed `(quotient, remainder)`.
///
/// # Panics
///
/// Debug builds assert that `v` is nonzero; callers resolve zero divisors
/// before reaching the coefficient path.
pub fn divmod(u: &[Word], v: &[Word]) -> (Vec<Word>, Vec<Word>) {
    let ul = words::significant_len(u);
    let vl = words::significant_len(v);
    debug_assert!(vl > 0, "division by zero coefficient");
    if vl == 0 {
        return (vec![0], vec![0]);
    }

    if words::compare(&u[..ul], &v[..vl]) == Ordering::Less {
        let mut rem = u[..ul.max(1).min(u.len())].to_vec();
        words::trim(&mut rem);
        return (vec![0], rem);
    }

    if vl == 1 {
        let mut q = vec![0; ul];
        let r = words::div_word_into(&mut q, &u[..ul], v[0]);
        words::trim(&mut q);
        return (q, vec![r]);
    }

    knuth(&u[..ul], &v[..vl])
}

fn knuth(u: &[Word], v: &[Word]) -> (Vec<Word>, Vec<Word>) {
    let n = v.len();
    let m = u.len() - n;

    // D1: scale so the top divisor word is at least RADIX / 2
    let d = RADIX / (v[n - 1] + 1);
    let mut vn = vec![0; n];
    let vcarry = words::mul_word_into(&mut vn, v, d);
    debug_assert_eq!(vcarry, 0);
    let mut un = vec![0; u.len() + 1];
    let ucarry = words::mul_word_into(&mut un[..u.len()], u, d);
    un[u.len()] = ucarry;

    let vtop = vn[n - 1] as u128;
    let vnext = vn[n - 2] as u128;
    let radix = RADIX as u128;
    let mut q = vec![0; m + 1];
    let mut prod = vec![0; n + 1];

    for j in (0..=m).rev() {
        // D3: estimate, then correct the estimate at most twice
        let num = un[j + n] as u128 * radix + un[j + n - 1] as u128;
        let mut qhat = num / vtop;
        let mut rhat = num % vtop;
        while qhat >= radix || qhat * vnext > rhat * radix + un[j + n - 2] as u128 {
            qhat -= 1;
            rhat += vtop;
            if rhat >= radix {
                break;
            }
        }

        // D4: multiply and subtract; qhat is now at most one too large
        let mut qword = qhat as Word;
        let carry = words::mul_word_into(&mut prod[..n], &vn, qword);
        prod[n] = carry;
        let window = &mut un[j..=j + n];
        if words::compare(window, &prod) == Ordering::Less {
            qword -= 1;
            words::sub_assign(&mut prod, &vn);
        }
        words::sub_assign(window, &prod);
        q[j] = qword;
    }

    // D8: unnormalize the remainder
    let mut r = vec![0; n];
    let rem = words::div_word_into(&mut r, &un[..n], d);
    debug_assert_eq!(rem, 0);

    words::trim(&mut q);
    words::trim(&mut r);
    (q, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn normalize(raw: Vec<u64>, cap: usize) -> Vec<Word> {
        let mut v: Vec<Word> = raw.into_iter().take(cap).map(|w| w % RADIX).collect();
        words::trim(&mut v);
        v
    }

    fn recombine(q: &[Word], v: &[Word], r: &[Word]) -> Vec<Word> {
        let mut prod = vec![0; q.len() + v.len()];
        words::mul_schoolbook(&mut prod, q, v);
        let mut total = vec![0; prod.len() + 1];
        total[..prod.len()].copy_from_slice(&prod);
        words::add_assign(&mut total, r);
        words::trim(&mut total);
        total
    }

    #[test]
    fn test_single_word_divisor() {
        let (q, r) = divmod(&[0, 1], &[3]);
        // 10^19 = 3 * 3333333333333333333 + 1
        assert_eq!(q, vec![3_333_333_333_333_333_333]);
        assert_eq!(r, vec![1]);
    }

    #[test]
    fn test_smaller_dividend() {
        let (q, r) = divmod(&[5], &[0, 1]);
        assert_eq!(q, vec![0]);
        assert_eq!(r, vec![5]);
    }

    #[test]
    fn test_multi_word_exact() {
        let a = [RADIX - 1, RADIX - 1, 12];
        let b = [7, 9];
        let mut prod = vec![0; 5];
        words::mul_schoolbook(&mut prod, &a, &b);
        let (q, r) = divmod(&prod, &b);
        assert_eq!(q, a.to_vec());
        assert_eq!(r, vec![0]);
    }

    #[test]
    fn test_qhat_correction_path() {
        // top divisor word just above half the radix triggers D3 corrections
        let v = [RADIX - 1, RADIX / 2];
        let u = [0, 0, RADIX / 2 - 1, RADIX - 1];
        let (q, r) = divmod(&u, &v);
        assert_eq!(words::compare(&r, &v), Ordering::Less);
        assert_eq!(recombine(&q, &v, &r), u.to_vec());
    }

    quickcheck! {
        fn prop_division_identity(a: Vec<u64>, b: Vec<u64>) -> bool {
            let u = normalize(a, 8);
            let v = normalize(b, 5);
            if words::is_zero(&v) {
                return true;
            }
            let (q, r) = divmod(&u, &v);
            words::compare(&r, &v) == Ordering::Less
                && words::compare(&recombine(&q, &v, &r), &u) == Ordering::Equal
        }
    }
}
