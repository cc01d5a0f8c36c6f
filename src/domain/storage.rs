// ============================================================================
// Coefficient Storage
// Inline-first owned buffers plus static, shared and constant borrows
// ============================================================================

use crate::interfaces::CoefficientAllocator;
use crate::numeric::{AllocError, Word};
use smallvec::SmallVec;
use std::sync::Arc;

/// Words kept inline before an owned coefficient spills to the heap.
pub const MIN_ALLOC: usize = 4;

/// Inline-first word buffer of an owned coefficient.
pub type WordBuffer = SmallVec<[Word; MIN_ALLOC]>;

/// Who owns the words of a coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Exclusively owned, growable
    Owned,
    /// Borrowed from static storage
    BorrowedStatic,
    /// Reference-counted and immutable
    Shared,
    /// Compile-time constant
    Const,
}

#[derive(Debug, Clone)]
enum Repr {
    Owned(WordBuffer),
    Static(&'static [Word]),
    Shared(Arc<[Word]>),
    Const(&'static [Word]),
}

/// Coefficient words, little-endian, base 10^19.
///
/// Non-owned variants are immutable; any mutation first copies the words
/// into an owned buffer.
#[derive(Debug, Clone)]
pub struct Coefficient {
    repr: Repr,
}

impl Coefficient {
    // ======== Construction ========

    /// A single zero word, stored inline.
    pub fn new() -> Self {
        let mut buf = WordBuffer::new();
        buf.push(0);
        Self {
            repr: Repr::Owned(buf),
        }
    }

    /// Takes ownership of a word vector. An empty vector becomes zero.
    pub fn from_vec(words: Vec<Word>) -> Self {
        if words.is_empty() {
            return Self::new();
        }
        Self {
            repr: Repr::Owned(SmallVec::from_vec(words)),
        }
    }

    pub fn from_slice(words: &[Word]) -> Self {
        if words.is_empty() {
            return Self::new();
        }
        Self {
            repr: Repr::Owned(SmallVec::from_slice(words)),
        }
    }

    /// Borrows static words without copying.
    pub fn from_static(words: &'static [Word]) -> Self {
        Self {
            repr: Repr::Static(words),
        }
    }

    /// Compile-time constant words.
    pub const fn from_const(words: &'static [Word]) -> Self {
        Self {
            repr: Repr::Const(words),
        }
    }

    /// Shares words through a reference count.
    pub fn shared(words: Arc<[Word]>) -> Self {
        Self {
            repr: Repr::Shared(words),
        }
    }

    // ======== Accessors ========

    #[inline]
    pub fn ownership(&self) -> Ownership {
        match self.repr {
            Repr::Owned(_) => Ownership::Owned,
            Repr::Static(_) => Ownership::BorrowedStatic,
            Repr::Shared(_) => Ownership::Shared,
            Repr::Const(_) => Ownership::Const,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Word] {
        match &self.repr {
            Repr::Owned(buf) => buf.as_slice(),
            Repr::Static(words) | Repr::Const(words) => words,
            Repr::Shared(words) => words,
        }
    }

    /// Number of stored words, including unused leading words.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated capacity in words. Borrowed storage reports its length.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Owned(buf) => buf.capacity(),
            _ => self.len(),
        }
    }

    /// Whether an owned buffer still lives inline.
    pub fn is_inline(&self) -> bool {
        matches!(&self.repr, Repr::Owned(buf) if !buf.spilled())
    }

    // ======== Mutation ========

    /// Mutable access, copying borrowed words into an owned buffer first.
    pub fn make_mut(&mut self) -> &mut WordBuffer {
        if !matches!(self.repr, Repr::Owned(_)) {
            self.repr = Repr::Owned(SmallVec::from_slice(self.as_slice()));
        }
        match &mut self.repr {
            Repr::Owned(buf) => buf,
            // converted just above
            _ => unreachable!("coefficient is owned after copy-on-write"),
        }
    }

    /// Converts into a shared coefficient; cheap to clone afterwards.
    pub fn into_shared(self) -> Self {
        match self.repr {
            Repr::Shared(_) => self,
            _ => Self::shared(Arc::from(self.as_slice())),
        }
    }

    /// Resizes storage to `words` words through the allocator.
    ///
    /// Growth is zero-filled. On failure the coefficient is unchanged.
    pub fn try_resize(
        &mut self,
        words: usize,
        allocator: &dyn CoefficientAllocator,
    ) -> Result<(), AllocError> {
        let words = words.max(1);
        if words == self.len() {
            return Ok(());
        }
        if words <= MIN_ALLOC {
            let buf = self.make_mut();
            buf.resize(words, 0);
            return Ok(());
        }
        let mut heap = allocator.allocate(words)?;
        heap.extend_from_slice(&self.as_slice()[..self.len().min(words)]);
        allocator.reallocate(&mut heap, words)?;
        self.repr = Repr::Owned(SmallVec::from_vec(heap));
        Ok(())
    }

    /// Consumes the coefficient into a plain vector.
    pub fn into_vec(self) -> Vec<Word> {
        match self.repr {
            Repr::Owned(buf) => buf.into_vec(),
            other => Coefficient { repr: other }.as_slice().to_vec(),
        }
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Self::new()
    }
}
