// ============================================================================
// Coefficient Allocator Interface
// Injected allocation hooks for coefficient storage
// ============================================================================

use crate::numeric::{AllocError, Word};

/// Allocation hooks used for coefficient buffers.
///
/// Freeing is ownership drop. Every method leaves its input untouched on
/// failure so callers can roll back.
pub trait CoefficientAllocator: Send + Sync {
    /// Empty buffer with capacity for at least `words` words.
    fn allocate(&self, words: usize) -> Result<Vec<Word>, AllocError>;

    /// Buffer holding `words` zero words.
    fn allocate_zeroed(&self, words: usize) -> Result<Vec<Word>, AllocError> {
        let mut buf = self.allocate(words)?;
        buf.resize(words, 0);
        Ok(buf)
    }

    /// Resizes `buf` to exactly `words` words, zero-filling growth.
    fn reallocate(&self, buf: &mut Vec<Word>, words: usize) -> Result<(), AllocError>;

    /// Get allocator name
    fn name(&self) -> &'static str;
}

/// Allocation through the global allocator, reporting failure instead of
/// aborting.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl CoefficientAllocator for SystemAllocator {
    fn allocate(&self, words: usize) -> Result<Vec<Word>, AllocError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(words)
            .map_err(|_| AllocError { requested: words })?;
        Ok(buf)
    }

    fn reallocate(&self, buf: &mut Vec<Word>, words: usize) -> Result<(), AllocError> {
        if words > buf.len() {
            buf.try_reserve_exact(words - buf.len())
                .map_err(|_| AllocError { requested: words })?;
        }
        buf.resize(words, 0);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "System"
    }
}

/// Allocator that refuses any buffer above a fixed word count.
///
/// Useful for bounding memory per value and for exercising the
/// `Malloc_error` paths.
#[derive(Debug, Clone, Copy)]
pub struct BoundedAllocator {
    max_words: usize,
}

impl BoundedAllocator {
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    #[inline]
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    fn admit(&self, words: usize) -> Result<(), AllocError> {
        if words > self.max_words {
            Err(AllocError { requested: words })
        } else {
            Ok(())
        }
    }
}

impl CoefficientAllocator for BoundedAllocator {
    fn allocate(&self, words: usize) -> Result<Vec<Word>, AllocError> {
        self.admit(words)?;
        SystemAllocator.allocate(words)
    }

    fn reallocate(&self, buf: &mut Vec<Word>, words: usize) -> Result<(), AllocError> {
        self.admit(words)?;
        SystemAllocator.reallocate(buf, words)
    }

    fn name(&self) -> &'static str {
        "Bounded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_allocator() {
        let alloc = SystemAllocator;
        let buf = alloc.allocate_zeroed(6).unwrap();
        assert_eq!(buf, vec![0; 6]);

        let mut grow = vec![1, 2];
        alloc.reallocate(&mut grow, 4).unwrap();
        assert_eq!(grow, vec![1, 2, 0, 0]);
    }

    #[test]
    fn test_system_allocator_reports_failure() {
        let result = SystemAllocator.allocate(usize::MAX / 4);
        assert_eq!(
            result.unwrap_err(),
            AllocError {
                requested: usize::MAX / 4
            }
        );
    }

    #[test]
    fn test_bounded_allocator_rolls_back() {
        let alloc = BoundedAllocator::new(4);
        assert!(alloc.allocate(4).is_ok());
        assert!(alloc.allocate(5).is_err());

        let mut buf = vec![7, 8, 9];
        assert!(alloc.reallocate(&mut buf, 10).is_err());
        assert_eq!(buf, vec![7, 8, 9]);
        assert_eq!(alloc.name(), "Bounded");
    }
}
