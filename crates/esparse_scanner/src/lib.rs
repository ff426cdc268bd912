//! esparse_scanner: Lexer and token source for ECMAScript source text.
//!
//! The scanner produces tokens from source text with support for:
//! - All ECMAScript punctuators, keywords and contextual keywords
//! - Template literals with nested substitutions
//! - Regular expression literals
//! - Numeric literals in every radix, with separators and BigInt suffixes
//! - Unicode identifiers and escapes
//!
//! [`TokenStream`] wraps the scanner with the lookahead window the parser
//! consumes.

mod char_codes;
mod scanner;
mod token;
mod token_stream;

pub use char_codes::{is_identifier_part, is_identifier_start};
pub use scanner::{numeric_value, Scanner, ScannerState};
pub use token::Token;
pub use token_stream::TokenStream;
