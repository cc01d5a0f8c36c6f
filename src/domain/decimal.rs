// ============================================================================
// Decimal Value
// Sign-magnitude coefficient, exponent and special-value kind
// ============================================================================

use crate::domain::context::{MAX_EMAX, MIN_ETINY};
use crate::domain::storage::{Coefficient, Ownership};
use crate::domain::Context;
use crate::numeric::{self, ConversionError, ConversionResult, Word, RDIGITS};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Sign and Kind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }

    #[inline]
    pub fn from_negative(negative: bool) -> Self {
        if negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    /// The opposite sign.
    #[inline]
    pub fn flip(self) -> Self {
        Self::from_negative(!self.is_negative())
    }

    /// Sign of a product or quotient.
    #[inline]
    pub fn combine(self, other: Sign) -> Self {
        Self::from_negative(self.is_negative() != other.is_negative())
    }
}

/// Special-value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    Finite,
    Infinite,
    QuietNan,
    SignalingNan,
}

/// The ten IEEE 754 classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberClass {
    SignalingNan,
    QuietNan,
    NegativeInfinity,
    NegativeNormal,
    NegativeSubnormal,
    NegativeZero,
    PositiveZero,
    PositiveSubnormal,
    PositiveNormal,
    PositiveInfinity,
}

impl NumberClass {
    pub fn name(self) -> &'static str {
        match self {
            NumberClass::SignalingNan => "sNaN",
            NumberClass::QuietNan => "NaN",
            NumberClass::NegativeInfinity => "-Infinity",
            NumberClass::NegativeNormal => "-Normal",
            NumberClass::NegativeSubnormal => "-Subnormal",
            NumberClass::NegativeZero => "-Zero",
            NumberClass::PositiveZero => "+Zero",
            NumberClass::PositiveSubnormal => "+Subnormal",
            NumberClass::PositiveNormal => "+Normal",
            NumberClass::PositiveInfinity => "+Infinity",
        }
    }
}

impl fmt::Display for NumberClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Decimal
// ============================================================================

/// Arbitrary-precision decimal floating-point value.
///
/// A finite value is `(-1)^sign * coefficient * 10^exponent`. Zero has a
/// digit count of 0 and a single zero word. For NaNs the coefficient is the
/// diagnostic payload; for infinities it is ignored.
///
/// Equality (`==`) is representational: `2.0` and `2` differ. Use the
/// engine's comparison operations for numeric ordering.
#[derive(Clone)]
pub struct Decimal {
    sign: Sign,
    kind: Kind,
    exp: i64,
    digits: usize,
    coeff: Coefficient,
}

#[inline]
const fn const_digit_count(words: &[Word]) -> usize {
    let mut len = words.len();
    while len > 0 && words[len - 1] == 0 {
        len -= 1;
    }
    if len == 0 {
        0
    } else {
        (len - 1) * RDIGITS + numeric::word_digits(words[len - 1])
    }
}

/// Clamps a caller-supplied exponent to `MIN_ETINY..=MAX_EMAX`.
#[inline]
const fn bounded_exponent(exp: i64) -> i64 {
    if exp < MIN_ETINY {
        MIN_ETINY
    } else if exp > MAX_EMAX {
        MAX_EMAX
    } else {
        exp
    }
}

impl Decimal {
    pub const ZERO: Decimal = Decimal::from_const(Sign::Positive, &[0], 0);
    pub const ONE: Decimal = Decimal::from_const(Sign::Positive, &[1], 0);
    pub const NEG_ONE: Decimal = Decimal::from_const(Sign::Negative, &[1], 0);

    // ======== Construction ========

    /// Positive zero with exponent 0.
    pub fn new() -> Self {
        Self::zero(Sign::Positive, 0)
    }

    /// Zero with the given sign; the exponent is clamped like
    /// [`Decimal::finite`].
    pub fn zero(sign: Sign, exp: i64) -> Self {
        Self {
            sign,
            kind: Kind::Finite,
            exp: bounded_exponent(exp),
            digits: 0,
            coeff: Coefficient::new(),
        }
    }

    /// Finite value from little-endian base-10^19 words.
    ///
    /// The exponent is clamped to `MIN_ETINY..=MAX_EMAX`, the range every
    /// context can address; use [`Decimal::try_finite`] to reject it instead.
    pub fn finite(sign: Sign, words: Vec<Word>, exp: i64) -> Self {
        Self::from_raw(sign, words, bounded_exponent(exp))
    }

    /// Like [`Decimal::finite`], but an exponent outside
    /// `MIN_ETINY..=MAX_EMAX` is an error.
    pub fn try_finite(sign: Sign, words: Vec<Word>, exp: i64) -> ConversionResult<Self> {
        if !(MIN_ETINY..=MAX_EMAX).contains(&exp) {
            return Err(ConversionError::ExponentOutOfRange);
        }
        Ok(Self::from_raw(sign, words, exp))
    }

    /// Unchecked exponent, for exact intermediates inside the kernels.
    pub(crate) fn from_raw(sign: Sign, mut words: Vec<Word>, exp: i64) -> Self {
        numeric::trim(&mut words);
        let digits = numeric::digit_count(&words);
        Self {
            sign,
            kind: Kind::Finite,
            exp,
            digits,
            coeff: Coefficient::from_vec(words),
        }
    }

    /// Compile-time constant; the words are never copied unless mutated.
    pub const fn from_const(sign: Sign, words: &'static [Word], exp: i64) -> Self {
        Self {
            sign,
            kind: Kind::Finite,
            exp: bounded_exponent(exp),
            digits: const_digit_count(words),
            coeff: Coefficient::from_const(words),
        }
    }

    /// Finite value borrowing static words.
    pub fn from_static(sign: Sign, words: &'static [Word], exp: i64) -> Self {
        Self {
            sign,
            kind: Kind::Finite,
            exp: bounded_exponent(exp),
            digits: numeric::digit_count(words),
            coeff: Coefficient::from_static(words),
        }
    }

    pub fn infinity(sign: Sign) -> Self {
        Self {
            sign,
            kind: Kind::Infinite,
            exp: 0,
            digits: 0,
            coeff: Coefficient::new(),
        }
    }

    /// Positive quiet NaN without payload.
    pub fn nan() -> Self {
        Self::nan_with_payload(Kind::QuietNan, Sign::Positive, Vec::new())
    }

    /// Positive signaling NaN without payload.
    pub fn snan() -> Self {
        Self::nan_with_payload(Kind::SignalingNan, Sign::Positive, Vec::new())
    }

    /// NaN carrying a diagnostic payload. `kind` must be a NaN kind;
    /// anything else is treated as a quiet NaN.
    pub fn nan_with_payload(kind: Kind, sign: Sign, mut payload: Vec<Word>) -> Self {
        let kind = match kind {
            Kind::SignalingNan => Kind::SignalingNan,
            _ => Kind::QuietNan,
        };
        numeric::trim(&mut payload);
        let digits = numeric::digit_count(&payload);
        Self {
            sign,
            kind,
            exp: 0,
            digits,
            coeff: Coefficient::from_vec(payload),
        }
    }

    /// Exact finite value `value * 10^exp`, with `exp` clamped like
    /// [`Decimal::finite`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use decimal_engine::domain::Decimal;
    ///
    /// let d = Decimal::with_exponent(-25, -1); // -2.5
    /// assert!(d.is_negative());
    /// assert_eq!(d.exponent(), -1);
    /// assert_eq!(d.digits(), 2);
    /// ```
    pub fn with_exponent(value: i64, exp: i64) -> Self {
        let sign = Sign::from_negative(value < 0);
        Self::finite(sign, numeric::from_u128(value.unsigned_abs() as u128), exp)
    }

    /// Converts the coefficient storage into a shared, cheaply cloneable
    /// form.
    pub fn into_shared(mut self) -> Self {
        self.coeff = self.coeff.into_shared();
        self
    }

    // ======== Accessors ========

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exp
    }

    /// Significant digits of the coefficient; 0 for zero.
    #[inline]
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Significant coefficient words (at least one).
    #[inline]
    pub fn coefficient(&self) -> &[Word] {
        let words = self.coeff.as_slice();
        let len = self.digits.div_ceil(RDIGITS).max(1).min(words.len());
        &words[..len]
    }

    #[inline]
    pub fn storage(&self) -> &Coefficient {
        &self.coeff
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.coeff.ownership()
    }

    /// Exponent of the most significant digit.
    #[inline]
    pub fn adjusted_exponent(&self) -> i64 {
        self.exp + self.digits.max(1) as i64 - 1
    }

    /// Trailing zero digits of a finite nonzero coefficient.
    pub fn trailing_zeros(&self) -> usize {
        if self.kind != Kind::Finite {
            return 0;
        }
        numeric::trailing_zeros(self.coefficient())
    }

    /// Least significant digit of the coefficient.
    #[inline]
    pub(crate) fn lsd(&self) -> u8 {
        (self.coefficient()[0] % 10) as u8
    }

    // ======== Predicates ========

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.kind == Kind::Finite
    }

    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.kind == Kind::Infinite
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self.kind, Kind::QuietNan | Kind::SignalingNan)
    }

    #[inline]
    pub fn is_qnan(&self) -> bool {
        self.kind == Kind::QuietNan
    }

    #[inline]
    pub fn is_snan(&self) -> bool {
        self.kind == Kind::SignalingNan
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.kind != Kind::Finite
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.kind == Kind::Finite && self.digits == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.sign.is_negative()
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.sign.is_negative()
    }

    /// Every value has a single encoding here.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        true
    }

    /// Finite with no nonzero digits right of the decimal point.
    pub fn is_integer(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        if self.is_zero() || self.exp >= 0 {
            return true;
        }
        self.trailing_zeros() as i64 >= -self.exp
    }

    pub fn is_normal(&self, ctx: &Context) -> bool {
        self.is_finite() && !self.is_zero() && self.adjusted_exponent() >= ctx.emin()
    }

    pub fn is_subnormal(&self, ctx: &Context) -> bool {
        self.is_finite() && !self.is_zero() && self.adjusted_exponent() < ctx.emin()
    }

    /// IEEE 754 class of the value under `ctx`.
    pub fn class(&self, ctx: &Context) -> NumberClass {
        let neg = self.is_negative();
        match self.kind {
            Kind::SignalingNan => NumberClass::SignalingNan,
            Kind::QuietNan => NumberClass::QuietNan,
            Kind::Infinite if neg => NumberClass::NegativeInfinity,
            Kind::Infinite => NumberClass::PositiveInfinity,
            Kind::Finite if self.is_zero() => {
                if neg {
                    NumberClass::NegativeZero
                } else {
                    NumberClass::PositiveZero
                }
            },
            Kind::Finite if self.is_subnormal(ctx) => {
                if neg {
                    NumberClass::NegativeSubnormal
                } else {
                    NumberClass::PositiveSubnormal
                }
            },
            Kind::Finite => {
                if neg {
                    NumberClass::NegativeNormal
                } else {
                    NumberClass::PositiveNormal
                }
            },
        }
    }

    // ======== Exact Copies ========

    /// Same value with the given sign; no flags, NaNs included.
    pub fn with_sign(&self, sign: Sign) -> Self {
        let mut out = self.clone();
        out.sign = sign;
        out
    }

    pub fn copy_abs(&self) -> Self {
        self.with_sign(Sign::Positive)
    }

    pub fn copy_negate(&self) -> Self {
        self.with_sign(self.sign.flip())
    }

    /// Copy of `self` carrying the sign of `other`.
    pub fn copy_sign(&self, other: &Decimal) -> Self {
        self.with_sign(other.sign)
    }

    /// Quiet NaN with the sign and payload of this NaN.
    pub(crate) fn quieted(&self) -> Self {
        let mut out = self.clone();
        if out.kind == Kind::SignalingNan {
            out.kind = Kind::QuietNan;
        }
        out
    }

    // ======== Storage ========

    /// Grows the coefficient storage to `words` words, never shrinking
    /// below the significant digits. On failure nothing changes.
    pub fn try_resize(
        &mut self,
        words: usize,
        allocator: &dyn crate::interfaces::CoefficientAllocator,
    ) -> Result<(), numeric::AllocError> {
        let floor = self.digits.div_ceil(RDIGITS).max(1);
        self.coeff.try_resize(words.max(floor), allocator)
    }

    /// Decomposes a finite value into sign, coefficient words and exponent.
    pub(crate) fn into_parts(self) -> (Sign, Vec<Word>, i64) {
        let len = self.coefficient().len();
        let mut words = self.coeff.into_vec();
        words.truncate(len);
        (self.sign, words, self.exp)
    }

    // ======== Ordering ========

    /// Compares absolute numeric values of two finite operands.
    pub(crate) fn cmp_magnitude(&self, other: &Decimal) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {},
        }
        let (ea, eb) = (self.adjusted_exponent(), other.adjusted_exponent());
        if ea != eb {
            return ea.cmp(&eb);
        }
        // equal adjusted exponents: the shift is bounded by the digit counts
        match self.exp.cmp(&other.exp) {
            Ordering::Greater => {
                let shifted =
                    numeric::shift_left(self.coefficient(), (self.exp - other.exp) as usize);
                numeric::compare(&shifted, other.coefficient())
            },
            Ordering::Less => {
                let shifted =
                    numeric::shift_left(other.coefficient(), (other.exp - self.exp) as usize);
                numeric::compare(self.coefficient(), &shifted)
            },
            Ordering::Equal => numeric::compare(self.coefficient(), other.coefficient()),
        }
    }

    /// Numeric comparison of two finite operands, with signs.
    pub(crate) fn cmp_finite(&self, other: &Decimal) -> Ordering {
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }
        let (na, nb) = (
            self.is_negative() && !self.is_zero(),
            other.is_negative() && !other.is_zero(),
        );
        match (na, nb) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
        }
    }

    fn total_rank(&self) -> u8 {
        match self.kind {
            Kind::Finite => 0,
            Kind::Infinite => 1,
            Kind::SignalingNan => 2,
            Kind::QuietNan => 3,
        }
    }

    /// IEEE 754 total order on absolute values.
    pub fn compare_total_mag(&self, other: &Decimal) -> Ordering {
        let rank = self.total_rank().cmp(&other.total_rank());
        if rank != Ordering::Equal {
            return rank;
        }
        match self.kind {
            Kind::Finite => self
                .cmp_magnitude(other)
                .then_with(|| self.exp.cmp(&other.exp)),
            Kind::Infinite => Ordering::Equal,
            Kind::QuietNan | Kind::SignalingNan => {
                numeric::compare(self.coefficient(), other.coefficient())
            },
        }
    }

    /// IEEE 754 total order: `-NaN < -sNaN < -Inf < ... < -0 < +0 < ...
    /// < +Inf < +sNaN < +NaN`, with equal values ordered by exponent.
    pub fn compare_total(&self, other: &Decimal) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.compare_total_mag(other),
            (true, true) => self.compare_total_mag(other).reverse(),
        }
    }

    /// Whether both operands have the same exponent, or are both
    /// infinite, or both NaN.
    pub fn same_quantum(&self, other: &Decimal) -> bool {
        match (self.kind, other.kind) {
            (Kind::Finite, Kind::Finite) => self.exp == other.exp,
            (Kind::Infinite, Kind::Infinite) => true,
            _ => self.is_nan() && other.is_nan(),
        }
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.sign != other.sign {
            return false;
        }
        match self.kind {
            Kind::Infinite => true,
            Kind::Finite => {
                self.exp == other.exp
                    && self.digits == other.digits
                    && self.coefficient() == other.coefficient()
            },
            Kind::QuietNan | Kind::SignalingNan => {
                self.digits == other.digits && self.coefficient() == other.coefficient()
            },
        }
    }
}

impl Eq for Decimal {}

fn write_coefficient(f: &mut fmt::Formatter<'_>, words: &[Word]) -> fmt::Result {
    let len = numeric::significant_len(words).max(1);
    write!(f, "{}", words[len - 1])?;
    for w in words[..len - 1].iter().rev() {
        write!(f, "{:019}", w)?;
    }
    Ok(())
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "+" };
        match self.kind {
            Kind::Finite => {
                write!(f, "Decimal({}", sign)?;
                write_coefficient(f, self.coefficient())?;
                write!(f, "E{})", self.exp)
            },
            Kind::Infinite => write!(f, "Decimal({}Infinity)", sign),
            Kind::QuietNan | Kind::SignalingNan => {
                let tag = if self.is_snan() { "sNaN" } else { "NaN" };
                write!(f, "Decimal({}{}", sign, tag)?;
                if self.digits > 0 {
                    write_coefficient(f, self.coefficient())?;
                }
                write!(f, ")")
            },
        }
    }
}
