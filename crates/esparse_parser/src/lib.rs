//! esparse_parser: recursive descent parser for ECMAScript.
//!
//! Parses the token stream of the scanner into an arena-allocated IR tree
//! rooted at a [`FunctionNode`](esparse_ast::node::FunctionNode), enforcing
//! the early errors of the language as it goes.

mod classes;
mod context;
mod error;
mod expressions;
mod functions;
mod lazy;
mod modules;
mod parser;
mod patterns;
mod precedence;
mod statements;
mod utilities;

use bumpalo::Bump;
use esparse_options::ParserOptions;

pub use error::{ParseError, ParseResult};
pub use lazy::LazyReparse;
pub use parser::{ExpressionOutput, ParseOutput, Parser, MAX_RECURSION_DEPTH};

/// Parse `source` as a script.
pub fn parse_script<'a>(
    arena: &'a Bump,
    file_name: &str,
    source: &'a str,
    options: ParserOptions,
) -> ParseResult<ParseOutput<'a>> {
    Parser::new(arena, file_name, source, options).parse_script()
}

/// Parse `source` as a module. The root function carries the Module Record.
pub fn parse_module<'a>(
    arena: &'a Bump,
    file_name: &str,
    source: &'a str,
    options: ParserOptions,
) -> ParseResult<ParseOutput<'a>> {
    Parser::new(arena, file_name, source, options).parse_module()
}

/// Parse `source` as the body of a function, as `new Function` does.
pub fn parse_function_body<'a>(
    arena: &'a Bump,
    file_name: &str,
    source: &'a str,
    options: ParserOptions,
) -> ParseResult<ParseOutput<'a>> {
    Parser::new(arena, file_name, source, options).parse_function_body(false, false)
}

/// Parse `source` as a single expression.
pub fn parse_expression<'a>(
    arena: &'a Bump,
    file_name: &str,
    source: &'a str,
    options: ParserOptions,
) -> ParseResult<ExpressionOutput<'a>> {
    Parser::new(arena, file_name, source, options).parse_expression()
}
