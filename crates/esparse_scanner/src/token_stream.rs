//! The Token Source the parser reads from.
//!
//! A window of scanned tokens over the [`Scanner`]. The parser looks ahead
//! by index, consumes with [`TokenStream::advance`], and periodically
//! commits, which drops consumed history. The window also supports the
//! jumps a lazy reparse needs: fast-forwarding to a buffered `}` or
//! reseeding the scanner at a saved checkpoint.

use crate::scanner::{Scanner, ScannerState};
use crate::token::Token;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::Checkpoint;
use esparse_diagnostics::DiagnosticCollection;
use std::collections::VecDeque;

struct BufferedToken<'a> {
    token: Token<'a>,
    /// Scanner state right after this token was scanned.
    resume: ScannerState,
}

pub struct TokenStream<'a> {
    scanner: Scanner<'a>,
    window: VecDeque<BufferedToken<'a>>,
    /// Index of the current token in `window`.
    cursor: usize,
    /// Window index recorded by the last `mark_commit_point`.
    commit_point: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a stream positioned on the first token.
    pub fn new(scanner: Scanner<'a>) -> Self {
        let mut stream = Self {
            scanner,
            window: VecDeque::with_capacity(8),
            cursor: 0,
            commit_point: 0,
        };
        stream.scan_one();
        stream
    }

    fn scan_one(&mut self) {
        self.scanner.scan();
        let token = self.scanner.token_info();
        let resume = self.scanner.save_state();
        self.window.push_back(BufferedToken { token, resume });
    }

    fn fill_to(&mut self, index: usize) {
        while self.window.len() <= index {
            if let Some(last) = self.window.back() {
                if last.token.kind == SyntaxKind::EndOfFileToken {
                    let eof = BufferedToken {
                        token: last.token.clone(),
                        resume: last.resume.clone(),
                    };
                    self.window.push_back(eof);
                    continue;
                }
            }
            self.scan_one();
        }
    }

    /// The source text.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.scanner.text()
    }

    /// The current token.
    #[inline]
    pub fn current(&self) -> &Token<'a> {
        &self.window[self.cursor].token
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.current().kind
    }

    /// The most recently consumed token, if it is still in the window.
    pub fn previous(&self) -> Option<&Token<'a>> {
        self.cursor.checked_sub(1).map(|i| &self.window[i].token)
    }

    /// Consume the current token.
    pub fn advance(&mut self) {
        if self.kind() == SyntaxKind::EndOfFileToken {
            return;
        }
        self.cursor += 1;
        self.fill_to(self.cursor);
    }

    /// The token `k` positions ahead; `peek_at(0)` is the current token.
    pub fn peek_at(&mut self, k: usize) -> &Token<'a> {
        self.fill_to(self.cursor + k);
        &self.window[self.cursor + k].token
    }

    /// Record the current position as the commit point.
    pub fn mark_commit_point(&mut self) {
        self.commit_point = self.cursor;
    }

    /// Discard the history before the commit point. The token just before
    /// it stays available as `previous()`.
    pub fn commit(&mut self) {
        let drop = self.commit_point.saturating_sub(1).min(self.cursor.saturating_sub(1));
        if drop > 0 {
            self.window.drain(..drop);
            self.cursor -= drop;
            self.commit_point -= drop;
        }
    }

    /// Make the buffered `}` starting at `offset` the current token.
    /// Returns `false` if no such token is in the window.
    pub fn fast_forward_to(&mut self, offset: u32) -> bool {
        let found = self
            .window
            .iter()
            .enumerate()
            .skip(self.cursor)
            .find(|(_, b)| b.token.kind == SyntaxKind::CloseBraceToken && b.token.start == offset)
            .map(|(i, _)| i);
        match found {
            Some(index) => {
                self.cursor = index;
                self.commit_point = self.commit_point.min(index);
                true
            }
            None => false,
        }
    }

    /// Discard everything after the current token and restart scanning at
    /// `checkpoint`. The current token must be the `{` that opens the
    /// skipped region; the next token scanned is the `}` at the checkpoint.
    pub fn reseed(&mut self, checkpoint: Checkpoint) {
        let resume = self.window[self.cursor].resume.clone();
        self.window.truncate(self.cursor + 1);
        self.scanner.restore_state(resume);
        self.scanner
            .reseed(checkpoint.offset as usize, checkpoint.line, checkpoint.column);
        self.cursor += 1;
        self.scan_one();
    }

    /// Rescan the current `/` or `/=` as a regular expression literal.
    /// Only possible when nothing has been buffered past the current token.
    pub fn rescan_slash_as_regex(&mut self) -> bool {
        if self.cursor + 1 != self.window.len()
            || !matches!(self.kind(), SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken)
        {
            return false;
        }
        let kind = self.scanner.rescan_slash_token();
        let mut token = self.scanner.token_info();
        // Keep the line-break flag of the original token.
        token.flags |= self.window[self.cursor].token.flags;
        let resume = self.scanner.save_state();
        self.window[self.cursor] = BufferedToken { token, resume };
        kind == SyntaxKind::RegularExpressionLiteral
    }

    /// Lexical diagnostics reported so far.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        self.scanner.take_diagnostics()
    }

    /// Number of tokens currently held in the window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'_> {
        TokenStream::new(Scanner::new(text))
    }

    #[test]
    fn test_advance_and_previous() {
        let mut ts = stream("a + b");
        assert_eq!(ts.kind(), SyntaxKind::Identifier);
        assert!(ts.previous().is_none());
        ts.advance();
        assert_eq!(ts.kind(), SyntaxKind::PlusToken);
        assert_eq!(ts.previous().map(|t| t.value.as_ref()), Some("a"));
    }

    #[test]
    fn test_peek_is_pure() {
        let mut ts = stream("x => y");
        assert_eq!(ts.peek_at(1).kind, SyntaxKind::EqualsGreaterThanToken);
        assert_eq!(ts.peek_at(5).kind, SyntaxKind::EndOfFileToken);
        assert_eq!(ts.kind(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_commit_drops_history() {
        let mut ts = stream("a b c d e");
        ts.advance();
        ts.advance();
        ts.advance();
        ts.mark_commit_point();
        ts.commit();
        assert_eq!(ts.window_len(), 2);
        assert_eq!(ts.current().value, "d");
        assert_eq!(ts.previous().map(|t| t.value.as_ref()), Some("c"));
    }

    #[test]
    fn test_fast_forward_to_buffered_brace() {
        let mut ts = stream("{ a; } b");
        let close = ts.peek_at(3).start;
        assert!(ts.fast_forward_to(close));
        assert_eq!(ts.kind(), SyntaxKind::CloseBraceToken);
        ts.advance();
        assert_eq!(ts.current().value, "b");
        assert!(!ts.fast_forward_to(0));
    }

    #[test]
    fn test_reseed_at_checkpoint() {
        let text = "{\n  a;\n  b;\n} c";
        let mut ts = stream(text);
        let offset = text.rfind('}').map(|i| i as u32).unwrap_or_default();
        ts.reseed(Checkpoint::new(offset, 3, 0));
        assert_eq!(ts.kind(), SyntaxKind::CloseBraceToken);
        assert_eq!(ts.current().line, 3);
        ts.advance();
        assert_eq!(ts.current().value, "c");
    }
}
