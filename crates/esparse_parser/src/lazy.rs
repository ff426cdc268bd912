//! Lazy reparse support.
//!
//! After a full parse, the function table records every function's flags
//! and the position of its closing brace. Reparsing the same source with a
//! target function parses everything up to and including the target and
//! jumps over the braced bodies of all later functions.

use esparse_ast::function_table::{FunctionDescriptor, FunctionTable};
use esparse_ast::types::FunctionId;

/// Configuration of a lazy reparse.
#[derive(Debug, Clone)]
pub struct LazyReparse {
    pub table: FunctionTable,
    /// Functions with a higher id than this are skipped.
    pub target: FunctionId,
}

impl LazyReparse {
    pub fn new(table: FunctionTable, target: FunctionId) -> Self {
        Self { table, target }
    }

    /// The descriptor to skip function `id` with, if it may be skipped.
    pub fn skippable(&self, id: FunctionId) -> Option<&FunctionDescriptor> {
        if id <= self.target {
            return None;
        }
        self.table.get(id).filter(|descriptor| descriptor.has_block_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esparse_ast::types::{Checkpoint, FunctionFlags, FunctionKind};

    fn descriptor(has_block_body: bool) -> FunctionDescriptor {
        FunctionDescriptor {
            flags: FunctionFlags::NONE,
            kind: FunctionKind::Normal,
            end_checkpoint: Checkpoint::new(10, 0, 10),
            has_block_body,
        }
    }

    #[test]
    fn test_only_later_braced_bodies_are_skippable() {
        let mut table = FunctionTable::new();
        table.insert(FunctionId(1), descriptor(true));
        table.insert(FunctionId(2), descriptor(true));
        table.insert(FunctionId(3), descriptor(false));
        let lazy = LazyReparse::new(table, FunctionId(1));

        assert!(lazy.skippable(FunctionId(1)).is_none());
        assert!(lazy.skippable(FunctionId(2)).is_some());
        assert!(lazy.skippable(FunctionId(3)).is_none());
        assert!(lazy.skippable(FunctionId(4)).is_none());
    }
}
