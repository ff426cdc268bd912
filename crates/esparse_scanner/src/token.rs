//! Tokens produced by the scanner.

use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::TokenFlags;
use std::borrow::Cow;

/// A scanned token.
///
/// `value` is the cooked text for identifiers, strings and template parts
/// and the raw text for everything else. The raw form of any token is
/// `source[start..end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    /// Start offset in the source text.
    pub start: u32,
    /// End offset in the source text (exclusive).
    pub end: u32,
    /// 0-based line of `start`.
    pub line: u32,
    /// 0-based byte column of `start`.
    pub column: u32,
    pub flags: TokenFlags,
    pub value: Cow<'a, str>,
}

impl<'a> Token<'a> {
    pub fn new(kind: SyntaxKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            start,
            end,
            line: 0,
            column: 0,
            flags: TokenFlags::NONE,
            value: Cow::Borrowed(""),
        }
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether this token has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether there was a line break before this token.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Whether an identifier or keyword was written with unicode escapes.
    #[inline]
    pub fn has_escape(&self) -> bool {
        self.flags.contains(TokenFlags::UNICODE_ESCAPE)
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }
}
