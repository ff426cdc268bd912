//! esparse_ast: the IR produced by the parser.
//!
//! This module defines the IR node types, the SyntaxKind enum, flag types,
//! the Module Record and the function table used by lazy reparsing.

pub mod function_table;
pub mod module;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use function_table::{FunctionDescriptor, FunctionTable};
pub use module::*;
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::Visitor;
