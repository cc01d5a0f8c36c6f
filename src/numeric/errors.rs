// ============================================================================
// Numeric Errors
// Error types for configuration, conversion and resource failures
// ============================================================================

use std::fmt;

/// Errors returned by the validated `Context` setters and presets.
///
/// A failing setter leaves the context untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextError {
    /// Precision outside `1..=MAX_PREC`
    InvalidPrecision(i64),
    /// Maximum exponent outside `0..=MAX_EMAX`
    InvalidEmax(i64),
    /// Minimum exponent outside `MIN_EMIN..=0`
    InvalidEmin(i64),
    /// Bits outside the defined status conditions
    InvalidFlags(u32),
    /// Unknown rounding mode code
    InvalidRounding(u32),
    /// Unknown clamp mode code
    InvalidClamp(u32),
    /// Correctly-rounded flag other than 0 or 1
    InvalidCorrectRounding(u32),
    /// Interchange width not a multiple of 32 in `32..=512`
    UnsupportedWidth(u32),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::InvalidPrecision(p) => write!(f, "invalid precision: {}", p),
            ContextError::InvalidEmax(e) => write!(f, "invalid maximum exponent: {}", e),
            ContextError::InvalidEmin(e) => write!(f, "invalid minimum exponent: {}", e),
            ContextError::InvalidFlags(bits) => {
                write!(f, "invalid status flags: {:#x}", bits)
            },
            ContextError::InvalidRounding(code) => write!(f, "invalid rounding mode: {}", code),
            ContextError::InvalidClamp(code) => write!(f, "invalid clamp mode: {}", code),
            ContextError::InvalidCorrectRounding(code) => {
                write!(f, "invalid correct-rounding flag: {}", code)
            },
            ContextError::UnsupportedWidth(bits) => {
                write!(f, "unsupported interchange width: {} bits", bits)
            },
        }
    }
}

impl std::error::Error for ContextError {}

/// Errors returned when validating an engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// The transform threshold must be at least one word
    ZeroThreshold,
    /// Transform lengths must be powers of two
    TransformLengthNotPowerOfTwo(usize),
    /// Requested transform length exceeds what the moduli support
    TransformLengthTooLarge(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroThreshold => write!(f, "transform threshold must be positive"),
            ConfigError::TransformLengthNotPowerOfTwo(n) => {
                write!(f, "transform length {} is not a power of two", n)
            },
            ConfigError::TransformLengthTooLarge(n) => {
                write!(f, "transform length {} exceeds the supported maximum", n)
            },
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when converting to or from a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionError {
    /// Digit string is empty or contains a non-digit
    InvalidDigits,
    /// Exponent outside the representable range
    ExponentOutOfRange,
    /// Value is NaN or infinite and the target cannot hold it
    NotFinite,
    /// Value is not an integer
    NotInteger,
    /// Value does not fit the target type
    OutOfRange,
    /// Interchange triple with an invalid class, sign or field combination
    InvalidTriple,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidDigits => write!(f, "invalid input: not a digit string"),
            ConversionError::ExponentOutOfRange => write!(f, "exponent out of range"),
            ConversionError::NotFinite => write!(f, "value is not finite"),
            ConversionError::NotInteger => write!(f, "value is not an integer"),
            ConversionError::OutOfRange => write!(f, "value does not fit the target type"),
            ConversionError::InvalidTriple => write!(f, "malformed interchange triple"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// The allocator refused to provide the requested number of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllocError {
    /// Number of words that was requested
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocation of {} coefficient words failed", self.requested)
    }
}

impl std::error::Error for AllocError {}

/// Errors raised by a multiplication strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformError {
    /// The convolution would need a transform longer than supported
    LengthExceeded {
        /// Transform length the operands need
        required: usize,
        /// Largest transform length available
        maximum: usize,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::LengthExceeded { required, maximum } => write!(
                f,
                "transform length {} exceeds maximum {}",
                required, maximum
            ),
        }
    }
}

impl std::error::Error for TransformError {}

/// Result type alias for conversions
pub type ConversionResult<T> = Result<T, ConversionError>;
