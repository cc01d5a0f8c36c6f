// ============================================================================
// Engine Factory
// Creates decimal engines from configuration
// ============================================================================

use crate::engine::DecimalEngine;
use crate::interfaces::{AbortTrapHandler, CoefficientAllocator, SystemAllocator, TrapHandler};
use crate::numeric::ConfigError;
use crate::transform::modular::MAX_TRANSFORM_LENGTH;
use crate::transform::{create_multiplier, MultiplierKind, DEFAULT_TRANSFORM_THRESHOLD};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Engine configuration: how coefficients are multiplied.
///
/// Arithmetic parameters (precision, exponent limits, rounding) live in
/// [`Context`](crate::domain::Context) and are passed per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    pub multiplier: MultiplierKind,
    /// Shorter operand length, in words, from which the transform is used
    pub transform_threshold: usize,
    /// Longest transform accepted; a power of two up to 2^32
    pub max_transform_length: usize,
}

impl EngineConfig {
    pub fn new(
        multiplier: MultiplierKind,
        transform_threshold: usize,
        max_transform_length: usize,
    ) -> Self {
        Self {
            multiplier,
            transform_threshold,
            max_transform_length,
        }
    }

    /// Schoolbook multiplication only. Suited to small precisions.
    pub fn schoolbook_only() -> Self {
        Self {
            multiplier: MultiplierKind::Schoolbook,
            ..Self::default()
        }
    }

    /// Transform multiplication for every product.
    pub fn transform_only() -> Self {
        Self {
            multiplier: MultiplierKind::Transform,
            ..Self::default()
        }
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// `ZeroThreshold`, `TransformLengthNotPowerOfTwo` or
    /// `TransformLengthTooLarge`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transform_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if !self.max_transform_length.is_power_of_two() {
            return Err(ConfigError::TransformLengthNotPowerOfTwo(
                self.max_transform_length,
            ));
        }
        if self.max_transform_length > MAX_TRANSFORM_LENGTH {
            return Err(ConfigError::TransformLengthTooLarge(self.max_transform_length));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            MultiplierKind::Adaptive,
            DEFAULT_TRANSFORM_THRESHOLD,
            MAX_TRANSFORM_LENGTH,
        )
    }
}

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a decimal engine from configuration.
///
/// # Example
/// ```
/// use decimal_engine::engine::{create_from_config, EngineConfig};
/// use decimal_engine::interfaces::{NoOpTrapHandler, SystemAllocator};
/// use std::sync::Arc;
///
/// let engine = create_from_config(
///     &EngineConfig::schoolbook_only(),
///     Arc::new(NoOpTrapHandler),
///     Arc::new(SystemAllocator),
/// )
/// .unwrap();
/// assert_eq!(engine.multiplier_name(), "Schoolbook");
/// ```
pub fn create_from_config(
    config: &EngineConfig,
    trap_handler: Arc<dyn TrapHandler>,
    allocator: Arc<dyn CoefficientAllocator>,
) -> Result<DecimalEngine, ConfigError> {
    config.validate()?;
    let multiplier = create_multiplier(
        config.multiplier,
        config.transform_threshold,
        config.max_transform_length,
    )?;
    Ok(DecimalEngine::new(multiplier, trap_handler, allocator))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for decimal engines with a fluent API.
///
/// # Example
/// ```
/// use decimal_engine::engine::EngineBuilder;
/// use decimal_engine::interfaces::{BoundedAllocator, RecordingTrapHandler};
/// use std::sync::Arc;
///
/// let engine = EngineBuilder::new()
///     .adaptive(64)
///     .with_trap_handler(Arc::new(RecordingTrapHandler::new()))
///     .with_allocator(Arc::new(BoundedAllocator::new(1 << 16)))
///     .build()
///     .unwrap();
/// assert_eq!(engine.allocator_name(), "Bounded");
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    trap_handler: Arc<dyn TrapHandler>,
    allocator: Arc<dyn CoefficientAllocator>,
}

impl EngineBuilder {
    /// Default configuration, aborting trap handler, system allocator.
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            trap_handler: Arc::new(AbortTrapHandler),
            allocator: Arc::new(SystemAllocator),
        }
    }

    // ========================================================================
    // Multiplication Strategy
    // ========================================================================

    pub fn schoolbook(mut self) -> Self {
        self.config.multiplier = MultiplierKind::Schoolbook;
        self
    }

    pub fn transform(mut self) -> Self {
        self.config.multiplier = MultiplierKind::Transform;
        self
    }

    /// Schoolbook below `threshold` words, transform from there on.
    pub fn adaptive(mut self, threshold: usize) -> Self {
        self.config.multiplier = MultiplierKind::Adaptive;
        self.config.transform_threshold = threshold;
        self
    }

    pub fn with_max_transform_length(mut self, length: usize) -> Self {
        self.config.max_transform_length = length;
        self
    }

    // ========================================================================
    // Hooks
    // ========================================================================

    pub fn with_trap_handler(mut self, trap_handler: Arc<dyn TrapHandler>) -> Self {
        self.trap_handler = trap_handler;
        self
    }

    pub fn with_allocator(mut self, allocator: Arc<dyn CoefficientAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    pub fn build(self) -> Result<DecimalEngine, ConfigError> {
        create_from_config(&self.config, self.trap_handler, self.allocator)
    }

    /// Configuration without building (for inspection)
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
