//! Function descriptors collected from a completed tree.
//!
//! A lazy reparse consults this table to decide which bodies it may skip
//! and to restore the flags those bodies would have produced.

use crate::node::FunctionNode;
use crate::types::{Checkpoint, FunctionFlags, FunctionId, FunctionKind};
use crate::visitor::{walk_function, Visitor};
use esparse_core::collections::FxHashMap;

/// What a previous full parse learned about one function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub flags: FunctionFlags,
    pub kind: FunctionKind,
    pub end_checkpoint: Checkpoint,
    /// Whether the body was written in braces (concise bodies are never skipped).
    pub has_block_body: bool,
}

impl FunctionDescriptor {
    pub fn of(function: &FunctionNode<'_>) -> Self {
        Self {
            flags: function.flags,
            kind: function.kind,
            end_checkpoint: function.end_checkpoint,
            has_block_body: !function.flags.contains(FunctionFlags::HAS_EXPRESSION_BODY),
        }
    }
}

/// `FunctionId -> FunctionDescriptor` for every function of a tree.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    descriptors: FxHashMap<FunctionId, FunctionDescriptor>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the descriptors of `program` and every function nested in it.
    pub fn collect(program: &FunctionNode<'_>) -> Self {
        let mut collector = Collector {
            table: FunctionTable::new(),
        };
        collector.visit_function(program);
        collector.table
    }

    pub fn insert(&mut self, id: FunctionId, descriptor: FunctionDescriptor) {
        self.descriptors.insert(id, descriptor);
    }

    pub fn get(&self, id: FunctionId) -> Option<&FunctionDescriptor> {
        self.descriptors.get(&id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The highest id nested inside function `id`, whose body closes at
    /// `end_offset`; `id` itself when it has no nested functions. Ids are
    /// assigned in source order, so the nested functions are exactly the
    /// later ids that also close before `end_offset`.
    pub fn last_nested_id(&self, id: FunctionId, end_offset: u32) -> FunctionId {
        self.descriptors
            .iter()
            .filter(|(other, d)| **other > id && d.end_checkpoint.offset < end_offset)
            .map(|(other, _)| *other)
            .max()
            .unwrap_or(id)
    }

    /// Descriptors sorted by id.
    pub fn iter_sorted(&self) -> Vec<(FunctionId, &FunctionDescriptor)> {
        let mut entries: Vec<_> = self.descriptors.iter().map(|(id, d)| (*id, d)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

struct Collector {
    table: FunctionTable,
}

impl<'a> Visitor<'a> for Collector {
    fn visit_function(&mut self, function: &FunctionNode<'a>) {
        self.table.insert(function.id, FunctionDescriptor::of(function));
        walk_function(self, function);
    }
}
