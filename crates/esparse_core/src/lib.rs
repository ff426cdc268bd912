//! esparse_core: Core utilities shared by every esparse crate.
//!
//! Provides the IR arena, the name interner, source positions and line maps,
//! and the hash collections used for scope bookkeeping.

pub mod arena;
pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::{alloc_list, ParseArena};
pub use intern::{Atom, StringInterner};
pub use text::{LineAndColumn, LineMap, TextRange, TextSpan};
