//! Arena allocation for the IR.
//!
//! Every IR node produced by a parse lives in one bump arena. The tree is
//! dropped all at once together with the arena.

use bumpalo::Bump;

/// Owner of the bump allocator a parse session borrows from.
///
/// The parser itself only needs `&Bump`; this wrapper exists so callers
/// (CLI, tests, benches) can keep the arena and report its footprint.
pub struct ParseArena {
    bump: Bump,
}

impl ParseArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena sized for roughly `source_len` bytes of input.
    pub fn for_source(source_len: usize) -> Self {
        // IR is typically a small multiple of the source size.
        Self {
            bump: Bump::with_capacity(source_len.saturating_mul(8)),
        }
    }

    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Returns the total bytes allocated in this arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Reset the arena, dropping every tree allocated from it.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for ParseArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Move the contents of a `Vec` into the arena as a slice.
#[inline]
pub fn alloc_list<T>(bump: &Bump, items: Vec<T>) -> &[T] {
    if items.is_empty() {
        return &[];
    }
    bump.alloc_slice_fill_iter(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_list_moves_items() {
        let arena = ParseArena::new();
        let names = vec![String::from("a"), String::from("b")];
        let slice = alloc_list(arena.bump(), names);
        assert_eq!(slice.len(), 2);
        assert_eq!(slice[1], "b");
    }

    #[test]
    fn test_alloc_list_empty() {
        let arena = ParseArena::new();
        let slice: &[u32] = alloc_list(arena.bump(), Vec::new());
        assert!(slice.is_empty());
    }
}
