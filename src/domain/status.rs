// ============================================================================
// Status Conditions
// Accumulating condition flags and trap masks
// ============================================================================

use bitflags::bitflags;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Exceptional conditions raised by an operation.
    ///
    /// The same type serves as the status mask (conditions raised so far)
    /// and the trap mask (conditions that invoke the trap handler). Status
    /// accumulates by bitwise OR and is never cleared implicitly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Status: u32 {
        /// The exponent was altered to fit the representable range.
        const CLAMPED = 0x0001;
        /// A digit string or interchange triple was malformed.
        const CONVERSION_SYNTAX = 0x0002;
        /// A finite nonzero dividend was divided by zero.
        const DIVISION_BY_ZERO = 0x0004;
        /// The integer quotient would need more than `prec` digits.
        const DIVISION_IMPOSSIBLE = 0x0008;
        /// Zero was divided by zero.
        const DIVISION_UNDEFINED = 0x0010;
        const FPU_ERROR = 0x0020;
        /// Nonzero digits were discarded.
        const INEXACT = 0x0040;
        /// The context failed validation at use time.
        const INVALID_CONTEXT = 0x0080;
        const INVALID_OPERATION = 0x0100;
        /// The allocator refused to grow a coefficient.
        const MALLOC_ERROR = 0x0200;
        const NOT_IMPLEMENTED = 0x0400;
        const OVERFLOW = 0x0800;
        /// Digits were discarded, zero or not.
        const ROUNDED = 0x1000;
        const SUBNORMAL = 0x2000;
        /// The result is subnormal and inexact.
        const UNDERFLOW = 0x4000;

        /// Every condition IEEE 754 folds into "invalid operation".
        const IEEE_INVALID_OPERATION = Self::CONVERSION_SYNTAX.bits()
            | Self::DIVISION_IMPOSSIBLE.bits()
            | Self::DIVISION_UNDEFINED.bits()
            | Self::FPU_ERROR.bits()
            | Self::INVALID_CONTEXT.bits()
            | Self::INVALID_OPERATION.bits()
            | Self::MALLOC_ERROR.bits();

        /// Conditions that force a NaN or an infinite result.
        const ERRORS = Self::IEEE_INVALID_OPERATION.bits() | Self::DIVISION_BY_ZERO.bits();

        /// Default trap mask.
        const TRAPS = Self::IEEE_INVALID_OPERATION.bits()
            | Self::DIVISION_BY_ZERO.bits()
            | Self::OVERFLOW.bits()
            | Self::UNDERFLOW.bits();
    }
}

impl Status {
    /// Highest valid mask value (all 15 conditions).
    pub const MAX_BITS: u32 = 0x7fff;

    /// Individual condition names in bit order.
    const NAMES: [(Status, &'static str); 15] = [
        (Status::CLAMPED, "Clamped"),
        (Status::CONVERSION_SYNTAX, "Conversion_syntax"),
        (Status::DIVISION_BY_ZERO, "Division_by_zero"),
        (Status::DIVISION_IMPOSSIBLE, "Division_impossible"),
        (Status::DIVISION_UNDEFINED, "Division_undefined"),
        (Status::FPU_ERROR, "Fpu_error"),
        (Status::INEXACT, "Inexact"),
        (Status::INVALID_CONTEXT, "Invalid_context"),
        (Status::INVALID_OPERATION, "Invalid_operation"),
        (Status::MALLOC_ERROR, "Malloc_error"),
        (Status::NOT_IMPLEMENTED, "Not_implemented"),
        (Status::OVERFLOW, "Overflow"),
        (Status::ROUNDED, "Rounded"),
        (Status::SUBNORMAL, "Subnormal"),
        (Status::UNDERFLOW, "Underflow"),
    ];

    /// Names of the conditions set in this mask.
    pub fn condition_names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Whether any condition that forces a NaN or infinite result is set.
    #[inline]
    pub fn is_error(self) -> bool {
        self.intersects(Status::ERRORS)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::empty()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.condition_names().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values() {
        assert_eq!(Status::CLAMPED.bits(), 0x1);
        assert_eq!(Status::INVALID_OPERATION.bits(), 0x100);
        assert_eq!(Status::UNDERFLOW.bits(), 0x4000);
        assert_eq!(Status::all().bits(), Status::MAX_BITS);
    }

    #[test]
    fn test_groups() {
        assert_eq!(Status::IEEE_INVALID_OPERATION.bits(), 0x3ba);
        assert_eq!(Status::ERRORS.bits(), 0x3be);
        assert_eq!(Status::TRAPS.bits(), 0x4bbe);
        assert!(!Status::TRAPS.contains(Status::INEXACT));
    }

    #[test]
    fn test_display() {
        let s = Status::INEXACT | Status::ROUNDED;
        assert_eq!(s.to_string(), "[Inexact, Rounded]");
        assert_eq!(Status::empty().to_string(), "[]");
    }

    #[test]
    fn test_is_error() {
        assert!(Status::DIVISION_BY_ZERO.is_error());
        assert!(!Status::OVERFLOW.is_error());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let s = Status::OVERFLOW | Status::INEXACT;
        let json = serde_json::to_string(&s).unwrap();
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
