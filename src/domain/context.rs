// ============================================================================
// Arithmetic Context
// Precision, exponent bounds, rounding, clamping, traps and status
// ============================================================================

use crate::domain::Status;
use crate::numeric::ContextError;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Limits
// ============================================================================

/// Largest supported precision.
pub const MAX_PREC: i64 = 999_999_999_999_999_999;
/// Largest supported `emax`.
pub const MAX_EMAX: i64 = 999_999_999_999_999_999;
/// Smallest supported `emin`.
pub const MIN_EMIN: i64 = -MAX_EMAX;
/// Smallest exponent any finite result can carry.
pub const MIN_ETINY: i64 = MIN_EMIN - (MAX_PREC - 1);
/// Widest IEEE interchange format a context can be derived from.
pub const IEEE_CONTEXT_MAX_BITS: u32 = 512;

pub const DECIMAL32: u32 = 32;
pub const DECIMAL64: u32 = 64;
pub const DECIMAL128: u32 = 128;

// ============================================================================
// Rounding Mode
// ============================================================================

/// How discarded digits affect the retained coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rounding {
    /// Away from zero
    Up,
    /// Toward zero
    Down,
    /// Toward +Infinity
    Ceiling,
    /// Toward -Infinity
    Floor,
    /// Nearest, ties away from zero
    HalfUp,
    /// Nearest, ties toward zero
    HalfDown,
    /// Nearest, ties to an even last digit
    #[default]
    HalfEven,
    /// Away from zero only when the last kept digit is 0 or 5
    ZeroFiveUp,
    /// Toward zero, but overflow still produces Infinity
    Trunc,
}

impl Rounding {
    /// All modes in code order.
    pub const ALL: [Rounding; 9] = [
        Rounding::Up,
        Rounding::Down,
        Rounding::Ceiling,
        Rounding::Floor,
        Rounding::HalfUp,
        Rounding::HalfDown,
        Rounding::HalfEven,
        Rounding::ZeroFiveUp,
        Rounding::Trunc,
    ];

    /// Numeric code of this mode (0..=8).
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Canonical name, e.g. `ROUND_HALF_EVEN`.
    pub fn name(self) -> &'static str {
        match self {
            Rounding::Up => "ROUND_UP",
            Rounding::Down => "ROUND_DOWN",
            Rounding::Ceiling => "ROUND_CEILING",
            Rounding::Floor => "ROUND_FLOOR",
            Rounding::HalfUp => "ROUND_HALF_UP",
            Rounding::HalfDown => "ROUND_HALF_DOWN",
            Rounding::HalfEven => "ROUND_HALF_EVEN",
            Rounding::ZeroFiveUp => "ROUND_05UP",
            Rounding::Trunc => "ROUND_TRUNC",
        }
    }
}

impl TryFrom<u32> for Rounding {
    type Error = ContextError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Rounding::ALL
            .get(code as usize)
            .copied()
            .ok_or(ContextError::InvalidRounding(code))
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Clamp Mode
// ============================================================================

/// Exponent clamping behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClampMode {
    /// Exponents up to `emax` are allowed
    #[default]
    Default,
    /// Exponents are clamped to `etop` by padding the coefficient
    Ieee754,
}

impl ClampMode {
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ClampMode {
    type Error = ContextError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ClampMode::Default),
            1 => Ok(ClampMode::Ieee754),
            _ => Err(ContextError::InvalidClamp(code)),
        }
    }
}

// ============================================================================
// Context
// ============================================================================

/// Arithmetic context.
///
/// Holds the precision, exponent bounds, rounding mode, clamp mode, trap
/// mask, accumulated status, and the correctly-rounded flag. Every setter
/// validates its argument and leaves the context unchanged on failure.
/// Contexts built through [`Context::new_unchecked`] or deserialization are
/// not validated; the engine reports them with `Invalid_context` at use time.
///
/// # Example
///
/// ```rust
/// use decimal_engine::domain::{Context, Rounding};
///
/// let mut ctx = Context::default_context();
/// assert_eq!(ctx.prec(), 38);
/// ctx.set_prec(50).unwrap();
/// ctx.set_rounding(Rounding::Floor);
/// assert!(ctx.set_prec(0).is_err());
/// assert_eq!(ctx.prec(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Context {
    prec: i64,
    emax: i64,
    emin: i64,
    rounding: Rounding,
    clamp: ClampMode,
    traps: Status,
    status: Status,
    #[cfg_attr(feature = "serde", serde(skip))]
    newtrap: Status,
    allcr: bool,
}

impl Context {
    // ======== Presets ========

    /// Maximum range: `prec = emax = MAX_PREC`, `emin = MIN_EMIN`,
    /// half-even rounding, default traps.
    pub fn max_context() -> Self {
        Self {
            prec: MAX_PREC,
            emax: MAX_EMAX,
            emin: MIN_EMIN,
            rounding: Rounding::HalfEven,
            clamp: ClampMode::Default,
            traps: Status::TRAPS,
            status: Status::empty(),
            newtrap: Status::empty(),
            allcr: true,
        }
    }

    /// Conservative default: precision 38, half-up rounding, default traps.
    pub fn default_context() -> Self {
        Self {
            prec: 2 * 19,
            rounding: Rounding::HalfUp,
            ..Self::max_context()
        }
    }

    /// Strict context: precision 9, half-up rounding, default traps plus
    /// `Clamped`.
    pub fn basic_context() -> Self {
        Self {
            prec: 9,
            rounding: Rounding::HalfUp,
            traps: Status::TRAPS | Status::CLAMPED,
            ..Self::max_context()
        }
    }

    /// Context matching an IEEE 754 decimal interchange format.
    ///
    /// # Arguments
    ///
    /// * `bits` - Format width, a multiple of 32 in `32..=512`
    ///
    /// # Errors
    ///
    /// Returns `ContextError::UnsupportedWidth` for any other width.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decimal_engine::domain::Context;
    ///
    /// let ctx = Context::ieee_context(64).unwrap();
    /// assert_eq!((ctx.prec(), ctx.emax(), ctx.emin()), (16, 384, -383));
    /// assert!(Context::ieee_context(33).is_err());
    /// ```
    pub fn ieee_context(bits: u32) -> Result<Self, ContextError> {
        if bits == 0 || bits > IEEE_CONTEXT_MAX_BITS || bits % 32 != 0 {
            return Err(ContextError::UnsupportedWidth(bits));
        }
        let emax = 3 * (1i64 << (bits / 16 + 3));
        Ok(Self {
            prec: 9 * (bits / 32) as i64 - 2,
            emax,
            emin: 1 - emax,
            rounding: Rounding::HalfEven,
            clamp: ClampMode::Ieee754,
            traps: Status::empty(),
            status: Status::empty(),
            newtrap: Status::empty(),
            allcr: true,
        })
    }

    /// Builds a context without validating any field.
    ///
    /// Operations that receive an invalid context raise `Invalid_context`
    /// and return NaN.
    pub fn new_unchecked(prec: i64, emax: i64, emin: i64, rounding: Rounding) -> Self {
        Self {
            prec,
            emax,
            emin,
            rounding,
            ..Self::max_context()
        }
    }

    // ======== Accessors ========

    #[inline]
    pub fn prec(&self) -> i64 {
        self.prec
    }

    #[inline]
    pub fn emax(&self) -> i64 {
        self.emax
    }

    #[inline]
    pub fn emin(&self) -> i64 {
        self.emin
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    #[inline]
    pub fn clamp(&self) -> ClampMode {
        self.clamp
    }

    #[inline]
    pub fn traps(&self) -> Status {
        self.traps
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Trapped conditions of the most recent dispatch.
    #[inline]
    pub fn newtrap(&self) -> Status {
        self.newtrap
    }

    /// Correctly-rounded flag for functions that may otherwise be faithful.
    #[inline]
    pub fn correct_rounding(&self) -> bool {
        self.allcr
    }

    /// Smallest exponent of a subnormal: `emin - (prec - 1)`.
    #[inline]
    pub fn etiny(&self) -> i64 {
        self.emin - (self.prec - 1)
    }

    /// Largest exponent under IEEE clamping: `emax - (prec - 1)`.
    #[inline]
    pub fn etop(&self) -> i64 {
        self.emax - (self.prec - 1)
    }

    /// Precision as a digit count. Only meaningful on a valid context.
    #[inline]
    pub(crate) fn digits(&self) -> usize {
        self.prec.max(1) as usize
    }

    // ======== Validated Setters ========

    pub fn set_prec(&mut self, prec: i64) -> Result<(), ContextError> {
        if !(1..=MAX_PREC).contains(&prec) {
            return Err(ContextError::InvalidPrecision(prec));
        }
        self.prec = prec;
        Ok(())
    }

    pub fn set_emax(&mut self, emax: i64) -> Result<(), ContextError> {
        if !(0..=MAX_EMAX).contains(&emax) {
            return Err(ContextError::InvalidEmax(emax));
        }
        self.emax = emax;
        Ok(())
    }

    pub fn set_emin(&mut self, emin: i64) -> Result<(), ContextError> {
        if !(MIN_EMIN..=0).contains(&emin) {
            return Err(ContextError::InvalidEmin(emin));
        }
        self.emin = emin;
        Ok(())
    }

    #[inline]
    pub fn set_rounding(&mut self, rounding: Rounding) {
        self.rounding = rounding;
    }

    /// Sets the rounding mode from its numeric code.
    pub fn set_rounding_code(&mut self, code: u32) -> Result<(), ContextError> {
        self.rounding = Rounding::try_from(code)?;
        Ok(())
    }

    #[inline]
    pub fn set_clamp(&mut self, clamp: ClampMode) {
        self.clamp = clamp;
    }

    /// Sets the clamp mode from its numeric code.
    pub fn set_clamp_code(&mut self, code: u32) -> Result<(), ContextError> {
        self.clamp = ClampMode::try_from(code)?;
        Ok(())
    }

    /// Replaces the trap mask.
    pub fn set_traps(&mut self, bits: u32) -> Result<(), ContextError> {
        self.traps = Status::from_bits(bits).ok_or(ContextError::InvalidFlags(bits))?;
        Ok(())
    }

    /// Replaces the status mask.
    pub fn set_status(&mut self, bits: u32) -> Result<(), ContextError> {
        self.status = Status::from_bits(bits).ok_or(ContextError::InvalidFlags(bits))?;
        Ok(())
    }

    pub fn set_correct_rounding(&mut self, flag: u32) -> Result<(), ContextError> {
        match flag {
            0 | 1 => {
                self.allcr = flag == 1;
                Ok(())
            },
            _ => Err(ContextError::InvalidCorrectRounding(flag)),
        }
    }

    #[inline]
    pub fn add_traps(&mut self, traps: Status) {
        self.traps |= traps;
    }

    #[inline]
    pub fn clear_traps(&mut self, traps: Status) {
        self.traps &= !traps;
    }

    #[inline]
    pub fn clear_status(&mut self) {
        self.status = Status::empty();
    }

    /// Merges conditions into the status without dispatching traps.
    #[inline]
    pub(crate) fn merge_status(&mut self, flags: Status) {
        self.status |= flags;
    }

    #[inline]
    pub(crate) fn set_newtrap(&mut self, trapped: Status) {
        self.newtrap = trapped;
    }

    // ======== Validation ========

    /// Checks every field against the bounds the setters enforce, plus
    /// `emin <= 0 <= emax` consistency.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_PREC).contains(&self.prec)
            && (0..=MAX_EMAX).contains(&self.emax)
            && (MIN_EMIN..=0).contains(&self.emin)
            && self.traps.bits() <= Status::MAX_BITS
            && self.status.bits() <= Status::MAX_BITS
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::default_context()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Context(prec={}, emax={}, emin={}, rounding={}, clamp={}, traps={}, status={})",
            self.prec,
            self.emax,
            self.emin,
            self.rounding,
            self.clamp.code(),
            self.traps,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let max = Context::max_context();
        assert_eq!(max.prec(), MAX_PREC);
        assert_eq!(max.emin(), -MAX_EMAX);
        assert_eq!(max.rounding(), Rounding::HalfEven);
        assert_eq!(max.traps(), Status::TRAPS);

        let def = Context::default_context();
        assert_eq!(def.prec(), 38);
        assert_eq!(def.rounding(), Rounding::HalfUp);

        let basic = Context::basic_context();
        assert_eq!(basic.prec(), 9);
        assert!(basic.traps().contains(Status::CLAMPED));
    }

    #[test]
    fn test_ieee_context() {
        let d64 = Context::ieee_context(DECIMAL64).unwrap();
        assert_eq!((d64.prec(), d64.emax(), d64.emin()), (16, 384, -383));
        assert_eq!(d64.clamp(), ClampMode::Ieee754);
        assert!(d64.traps().is_empty());

        let d32 = Context::ieee_context(DECIMAL32).unwrap();
        assert_eq!((d32.prec(), d32.emax()), (7, 96));

        let d128 = Context::ieee_context(DECIMAL128).unwrap();
        assert_eq!((d128.prec(), d128.emax(), d128.emin()), (34, 6144, -6143));

        let widest = Context::ieee_context(IEEE_CONTEXT_MAX_BITS).unwrap();
        assert_eq!(widest.prec(), 142);
        assert!(widest.is_valid());
    }

    #[test]
    fn test_ieee_context_rejects_widths() {
        for bits in [0, 33, 48, 544] {
            assert_eq!(
                Context::ieee_context(bits),
                Err(ContextError::UnsupportedWidth(bits))
            );
        }
    }

    #[test]
    fn test_setters_leave_state_on_failure() {
        let mut ctx = Context::default_context();
        assert!(ctx.set_prec(MAX_PREC + 1).is_err());
        assert!(ctx.set_emax(-1).is_err());
        assert!(ctx.set_emin(1).is_err());
        assert!(ctx.set_traps(0x8000).is_err());
        assert!(ctx.set_status(0x10000).is_err());
        assert!(ctx.set_rounding_code(9).is_err());
        assert!(ctx.set_clamp_code(2).is_err());
        assert!(ctx.set_correct_rounding(2).is_err());
        assert_eq!(ctx, Context::default_context());
    }

    #[test]
    fn test_setters_apply() {
        let mut ctx = Context::default_context();
        ctx.set_prec(5).unwrap();
        ctx.set_emax(99).unwrap();
        ctx.set_emin(-99).unwrap();
        ctx.set_rounding_code(7).unwrap();
        ctx.set_clamp_code(1).unwrap();
        assert_eq!(ctx.rounding(), Rounding::ZeroFiveUp);
        assert_eq!(ctx.etiny(), -103);
        assert_eq!(ctx.etop(), 95);
        assert!(ctx.is_valid());
    }

    #[test]
    fn test_unchecked_context_is_invalid() {
        let ctx = Context::new_unchecked(0, 10, -10, Rounding::HalfUp);
        assert!(!ctx.is_valid());
    }

    #[test]
    fn test_rounding_codes() {
        for (code, mode) in Rounding::ALL.iter().enumerate() {
            assert_eq!(mode.code(), code as u32);
            assert_eq!(Rounding::try_from(code as u32), Ok(*mode));
        }
        assert_eq!(Rounding::HalfEven.to_string(), "ROUND_HALF_EVEN");
    }

    #[test]
    fn test_limits() {
        assert_eq!(MIN_ETINY, -1_999_999_999_999_999_997);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let ctx = Context::ieee_context(128).unwrap();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
