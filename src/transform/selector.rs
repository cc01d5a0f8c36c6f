// ============================================================================
// Multiplier Selection
// Threshold-based choice between schoolbook and transform multiplication
// ============================================================================

use super::ntt::TransformMultiplier;
use super::schoolbook::Schoolbook;
use super::traits::Multiplier;
use crate::numeric::{ConfigError, TransformError, Word};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default operand size, in words, from which the transform path is used.
pub const DEFAULT_TRANSFORM_THRESHOLD: usize = 128;

/// Multiplication strategy family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MultiplierKind {
    /// Always schoolbook
    Schoolbook,
    /// Always the transform
    Transform,
    /// Schoolbook below the threshold, transform from it on
    #[default]
    Adaptive,
}

impl std::fmt::Display for MultiplierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultiplierKind::Schoolbook => write!(f, "schoolbook"),
            MultiplierKind::Transform => write!(f, "transform"),
            MultiplierKind::Adaptive => write!(f, "adaptive"),
        }
    }
}

/// Uses the transform when the shorter operand has at least `threshold`
/// words, schoolbook otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveMultiplier {
    threshold: usize,
    schoolbook: Schoolbook,
    transform: TransformMultiplier,
}

impl AdaptiveMultiplier {
    pub fn new(threshold: usize, transform: TransformMultiplier) -> Self {
        Self {
            threshold,
            schoolbook: Schoolbook,
            transform,
        }
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    fn uses_transform(&self, u: &[Word], v: &[Word]) -> bool {
        u.len().min(v.len()) >= self.threshold
    }
}

impl Default for AdaptiveMultiplier {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFORM_THRESHOLD, TransformMultiplier::new())
    }
}

impl Multiplier for AdaptiveMultiplier {
    fn multiply_into(
        &self,
        out: &mut [Word],
        u: &[Word],
        v: &[Word],
    ) -> Result<(), TransformError> {
        if self.uses_transform(u, v) {
            self.transform.multiply_into(out, u, v)
        } else {
            self.schoolbook.multiply_into(out, u, v)
        }
    }

    fn name(&self) -> &'static str {
        "Adaptive"
    }
}

/// Creates the multiplication strategy for a configuration.
///
/// # Errors
/// `ConfigError` for a zero threshold or an invalid transform length.
///
/// # Example
/// ```
/// use decimal_engine::transform::{create_multiplier, MultiplierKind};
///
/// let m = create_multiplier(MultiplierKind::Adaptive, 64, 1 << 20).unwrap();
/// assert_eq!(m.name(), "Adaptive");
/// ```
pub fn create_multiplier(
    kind: MultiplierKind,
    threshold: usize,
    max_transform_length: usize,
) -> Result<Box<dyn Multiplier>, ConfigError> {
    if threshold == 0 {
        return Err(ConfigError::ZeroThreshold);
    }
    let transform = TransformMultiplier::with_max_length(max_transform_length)?;
    let multiplier: Box<dyn Multiplier> = match kind {
        MultiplierKind::Schoolbook => Box::new(Schoolbook),
        MultiplierKind::Transform => Box::new(transform),
        MultiplierKind::Adaptive => Box::new(AdaptiveMultiplier::new(threshold, transform)),
    };
    tracing::debug!(
        strategy = multiplier.name(),
        threshold,
        max_transform_length,
        "multiplier selected"
    );
    Ok(multiplier)
}
