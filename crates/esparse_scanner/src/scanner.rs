//! The ECMAScript scanner.
//!
//! Converts source text into tokens on demand. Positions are byte offsets;
//! line and column are tracked as the scanner moves so every token knows
//! where it starts. Whether `/` starts a regular expression is decided from
//! the previous significant token, and template continuations after `}` are
//! recognized with a brace-depth stack.

use crate::char_codes::*;
use crate::token::Token;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::TokenFlags;
use esparse_core::text::TextSpan;
use esparse_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use memchr::{memchr3, memmem};
use std::borrow::Cow;

/// Saved scanner state, enough to resume scanning from `pos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannerState {
    pub pos: usize,
    pub line: u32,
    pub line_start: usize,
    prev_significant: Option<SyntaxKind>,
    template_braces: Vec<u32>,
}

/// The scanner converts ECMAScript source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    bytes: &'a [u8],
    /// Current position in the text.
    pos: usize,
    /// 0-based line of `pos`.
    line: u32,
    /// Offset of the first byte of the current line.
    line_start: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token_line: u32,
    token_column: u32,
    /// The current token kind.
    token: SyntaxKind,
    /// The cooked value of the current token.
    token_value: Cow<'a, str>,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// The last non-trivia token, used for the regex/divide decision.
    prev_significant: Option<SyntaxKind>,
    /// One entry per open template substitution: the `{` depth inside it.
    template_braces: Vec<u32>,
    /// `#` starts a line comment.
    scripting: bool,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line: 0,
            line_start: 0,
            token_start: 0,
            token_line: 0,
            token_column: 0,
            token: SyntaxKind::Unknown,
            token_value: Cow::Borrowed(""),
            token_flags: TokenFlags::NONE,
            prev_significant: None,
            template_braces: Vec::new(),
            scripting: false,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Enable `#` line comments.
    pub fn set_scripting(&mut self, scripting: bool) {
        self.scripting = scripting;
    }

    /// Skip a shebang line at the very beginning of the file (e.g., `#!/usr/bin/env node`).
    /// Call this before the first `scan()` call.
    pub fn skip_shebang(&mut self) {
        if self.pos == 0 && self.bytes.starts_with(b"#!") {
            self.pos = self.find_line_end(2);
        }
    }

    /// The full source text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's cooked value.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get the current token flags.
    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Whether the current token was preceded by a line break.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a Token for the current token.
    pub fn token_info(&self) -> Token<'a> {
        Token {
            kind: self.token,
            start: self.token_start as u32,
            end: self.pos as u32,
            line: self.token_line,
            column: self.token_column,
            flags: self.token_flags,
            value: self.token_value.clone(),
        }
    }

    /// Save the full scanner state.
    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            line: self.line,
            line_start: self.line_start,
            prev_significant: self.prev_significant,
            template_braces: self.template_braces.clone(),
        }
    }

    /// Restore a saved scanner state.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.line = state.line;
        self.line_start = state.line_start;
        self.prev_significant = state.prev_significant;
        self.template_braces = state.template_braces;
    }

    /// Move the scanner to `offset`, which lies at `line`/`column`.
    pub fn reseed(&mut self, offset: usize, line: u32, column: u32) {
        let offset = offset.min(self.bytes.len());
        self.pos = offset;
        self.line = line;
        self.line_start = offset.saturating_sub(column as usize);
        self.token_start = offset;
        self.token = SyntaxKind::Unknown;
        self.token_value = Cow::Borrowed("");
        self.token_flags = TokenFlags::NONE;
    }

    fn error(&mut self, start: usize, end: usize, message: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(start as u32, end.max(start) as u32);
        self.diagnostics.add(Diagnostic::at(span, message, args));
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn new_line(&mut self, next_line_start: usize) {
        self.line += 1;
        self.line_start = next_line_start;
    }

    /// Offset of the next line terminator at or after `from`, or the end of text.
    fn find_line_end(&self, from: usize) -> usize {
        let mut i = from;
        while let Some(found) = memchr3(b'\n', b'\r', LS_PS_LEAD, &self.bytes[i.min(self.bytes.len())..]) {
            let at = i + found;
            if self.bytes[at] != LS_PS_LEAD || is_ls_ps_at(self.bytes, at) {
                return at;
            }
            i = at + 1;
        }
        self.bytes.len()
    }

    /// Account for line terminators in `bytes[from..to]`. Returns whether
    /// any were found.
    fn note_line_breaks(&mut self, from: usize, to: usize) -> bool {
        let mut found_any = false;
        let mut i = from;
        while i < to {
            let Some(found) = memchr3(b'\n', b'\r', LS_PS_LEAD, &self.bytes[i..to]) else {
                break;
            };
            let at = i + found;
            match self.bytes[at] {
                b'\n' => {
                    self.new_line(at + 1);
                    found_any = true;
                }
                b'\r' => {
                    // `\r\n` counts once, at the `\n`.
                    if self.bytes.get(at + 1) != Some(&b'\n') {
                        self.new_line(at + 1);
                    }
                    found_any = true;
                }
                _ if is_ls_ps_at(self.bytes, at) => {
                    self.new_line(at + 3);
                    found_any = true;
                }
                _ => {}
            }
            i = at + 1;
        }
        found_any
    }

    /// Skip whitespace and comments (trivia), setting token_flags for line breaks.
    fn skip_trivia(&mut self) {
        loop {
            let Some(b) = self.byte_at(0) else {
                return;
            };
            match b {
                b'\n' => {
                    self.pos += 1;
                    self.new_line(self.pos);
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                b'\r' => {
                    self.pos += 1;
                    if self.byte_at(0) == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.new_line(self.pos);
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.byte_at(1) == Some(b'/') => {
                    self.pos = self.find_line_end(self.pos + 2);
                }
                b'/' if self.byte_at(1) == Some(b'*') => self.skip_block_comment(),
                b'#' if self.scripting => {
                    self.pos = self.find_line_end(self.pos + 1);
                }
                _ if b < 0x80 => return,
                _ => match self.current_char() {
                    Some(LINE_SEPARATOR) | Some(PARAGRAPH_SEPARATOR) => {
                        self.pos += 3;
                        self.new_line(self.pos);
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => return,
                },
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.pos;
        let body = start + 2;
        let end = match memmem::find(&self.bytes[body..], b"*/") {
            Some(found) => body + found + 2,
            None => {
                self.error(start, self.bytes.len(), &messages::UNTERMINATED_COMMENT, &[]);
                self.bytes.len()
            }
        };
        if self.note_line_breaks(body, end) {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        self.pos = end;
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value = Cow::Borrowed("");

        // Skip trivia (whitespace, comments)
        self.skip_trivia();
        self.token_start = self.pos;
        self.token_line = self.line;
        self.token_column = (self.pos - self.line_start) as u32;

        if self.is_eof() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let b = self.bytes[self.pos];
        self.token = match b {
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'{' => {
                if let Some(depth) = self.template_braces.last_mut() {
                    *depth += 1;
                }
                self.single(SyntaxKind::OpenBraceToken)
            }
            b'}' => match self.template_braces.last().copied() {
                Some(0) => self.scan_template(false),
                Some(depth) => {
                    if let Some(top) = self.template_braces.last_mut() {
                        *top = depth - 1;
                    }
                    self.single(SyntaxKind::CloseBraceToken)
                }
                None => self.single(SyntaxKind::CloseBraceToken),
            },
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b'~' => self.single(SyntaxKind::TildeToken),
            b':' => self.single(SyntaxKind::ColonToken),
            b'#' => self.single(SyntaxKind::HashToken),

            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'<' => self.scan_operator(&[
                ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
                ("<<", SyntaxKind::LessThanLessThanToken),
                ("<=", SyntaxKind::LessThanEqualsToken),
                ("<", SyntaxKind::LessThanToken),
            ]),
            b'>' => self.scan_operator(&[
                (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
                (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
                (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
                (">>", SyntaxKind::GreaterThanGreaterThanToken),
                (">=", SyntaxKind::GreaterThanEqualsToken),
                (">", SyntaxKind::GreaterThanToken),
            ]),
            b'=' => self.scan_operator(&[
                ("===", SyntaxKind::EqualsEqualsEqualsToken),
                ("==", SyntaxKind::EqualsEqualsToken),
                ("=>", SyntaxKind::EqualsGreaterThanToken),
                ("=", SyntaxKind::EqualsToken),
            ]),
            b'!' => self.scan_operator(&[
                ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
                ("!=", SyntaxKind::ExclamationEqualsToken),
                ("!", SyntaxKind::ExclamationToken),
            ]),
            b'+' => self.scan_operator(&[
                ("++", SyntaxKind::PlusPlusToken),
                ("+=", SyntaxKind::PlusEqualsToken),
                ("+", SyntaxKind::PlusToken),
            ]),
            b'-' => self.scan_operator(&[
                ("--", SyntaxKind::MinusMinusToken),
                ("-=", SyntaxKind::MinusEqualsToken),
                ("-", SyntaxKind::MinusToken),
            ]),
            b'*' => self.scan_operator(&[
                ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
                ("**", SyntaxKind::AsteriskAsteriskToken),
                ("*=", SyntaxKind::AsteriskEqualsToken),
                ("*", SyntaxKind::AsteriskToken),
            ]),
            b'/' => {
                if regex_allowed_after(self.prev_significant) {
                    self.scan_regular_expression()
                } else {
                    self.scan_operator(&[
                        ("/=", SyntaxKind::SlashEqualsToken),
                        ("/", SyntaxKind::SlashToken),
                    ])
                }
            }
            b'%' => self.scan_operator(&[
                ("%=", SyntaxKind::PercentEqualsToken),
                ("%", SyntaxKind::PercentToken),
            ]),
            b'&' => self.scan_operator(&[
                ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
                ("&&", SyntaxKind::AmpersandAmpersandToken),
                ("&=", SyntaxKind::AmpersandEqualsToken),
                ("&", SyntaxKind::AmpersandToken),
            ]),
            b'|' => self.scan_operator(&[
                ("||=", SyntaxKind::BarBarEqualsToken),
                ("||", SyntaxKind::BarBarToken),
                ("|=", SyntaxKind::BarEqualsToken),
                ("|", SyntaxKind::BarToken),
            ]),
            b'^' => self.scan_operator(&[
                ("^=", SyntaxKind::CaretEqualsToken),
                ("^", SyntaxKind::CaretToken),
            ]),

            b'\'' | b'"' => self.scan_string_literal(b),
            b'`' => self.scan_template(true),

            b'0'..=b'9' => self.scan_number(),

            b'\\' => self.scan_identifier(),
            _ => match self.current_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(),
                Some(ch) => {
                    let start = self.pos;
                    self.pos += ch.len_utf8();
                    self.error(start, self.pos, &messages::INVALID_CHARACTER, &[]);
                    SyntaxKind::Unknown
                }
                None => {
                    self.pos += 1;
                    SyntaxKind::Unknown
                }
            },
        };

        if self.token != SyntaxKind::Unknown {
            self.prev_significant = Some(self.token);
        }
        self.token
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    ///
    /// Used by the parser when an expression is expected at a slash the
    /// previous-token rule classified as division.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            self.pos = self.token_start;
            self.token = self.scan_regular_expression();
            self.prev_significant = Some(self.token);
        }
        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// Longest match among `candidates`, which must be ordered longest first.
    fn scan_operator(&mut self, candidates: &[(&str, SyntaxKind)]) -> SyntaxKind {
        let rest = &self.bytes[self.pos..];
        for (text, kind) in candidates {
            if rest.starts_with(text.as_bytes()) {
                self.pos += text.len();
                return *kind;
            }
        }
        self.pos += 1;
        SyntaxKind::Unknown
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'.') && self.byte_at(2) == Some(b'.') {
            self.pos += 3;
            SyntaxKind::DotDotDotToken
        } else if self.byte_at(1).map_or(false, is_digit) {
            self.scan_number()
        } else {
            self.single(SyntaxKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'?') {
            if self.byte_at(2) == Some(b'=') {
                self.pos += 3;
                SyntaxKind::QuestionQuestionEqualsToken
            } else {
                self.pos += 2;
                SyntaxKind::QuestionQuestionToken
            }
        } else if self.byte_at(1) == Some(b'.') && !self.byte_at(2).map_or(false, is_digit) {
            // `a?.5:b` is a conditional, not an optional chain.
            self.pos += 2;
            SyntaxKind::QuestionDotToken
        } else {
            self.single(SyntaxKind::QuestionToken)
        }
    }

    fn scan_string_literal(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1; // skip opening quote
        let content_start = self.pos;
        let mut cooked: Option<String> = None;
        loop {
            let Some(b) = self.byte_at(0) else {
                self.error(start, self.pos, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            };
            if b == quote {
                self.pos += 1;
                break;
            }
            if b == b'\n' || b == b'\r' {
                self.error(start, self.pos, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            if b == b'\\' {
                let out = cooked.get_or_insert_with(|| self.text[content_start..self.pos].to_string());
                let mut buf = std::mem::take(out);
                self.token_flags |= TokenFlags::HAS_ESCAPE;
                self.scan_escape_sequence(&mut buf, false);
                cooked = Some(buf);
                continue;
            }
            let len = if b < 0x80 { 1 } else { self.current_char().map_or(1, char::len_utf8) };
            if let Some(out) = cooked.as_mut() {
                out.push_str(&self.text[self.pos..self.pos + len]);
            }
            self.pos += len;
        }
        let content_end = if self.token_flags.contains(TokenFlags::UNTERMINATED) {
            self.pos
        } else {
            self.pos - 1
        };
        self.token_value = match cooked {
            Some(value) => Cow::Owned(value),
            None => Cow::Borrowed(&self.text[content_start..content_end]),
        };
        SyntaxKind::StringLiteral
    }

    /// Scan a template part. `from_backtick` is true at an opening `` ` ``
    /// and false at the `}` closing a substitution.
    fn scan_template(&mut self, from_backtick: bool) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1; // skip ` or }
        let content_start = self.pos;
        let mut cooked: Option<String> = None;
        let mut valid = true;

        let kind = loop {
            let Some(b) = self.byte_at(0) else {
                self.error(start, self.pos, &messages::UNTERMINATED_TEMPLATE_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break if from_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match b {
                b'`' => {
                    self.pos += 1;
                    break if from_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                b'$' if self.byte_at(1) == Some(b'{') => {
                    self.pos += 2;
                    break if from_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                b'\\' => {
                    let out = cooked.get_or_insert_with(|| self.text[content_start..self.pos].to_string());
                    let mut buf = std::mem::take(out);
                    if !self.scan_escape_sequence(&mut buf, true) {
                        valid = false;
                    }
                    cooked = Some(buf);
                }
                b'\r' => {
                    // Cooked and raw values both normalize `\r\n` and `\r` to `\n`.
                    let out = cooked.get_or_insert_with(|| self.text[content_start..self.pos].to_string());
                    out.push('\n');
                    self.pos += 1;
                    if self.byte_at(0) == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.new_line(self.pos);
                }
                b'\n' => {
                    if let Some(out) = cooked.as_mut() {
                        out.push('\n');
                    }
                    self.pos += 1;
                    self.new_line(self.pos);
                }
                _ => {
                    let len = if b < 0x80 { 1 } else { self.current_char().map_or(1, char::len_utf8) };
                    if is_ls_ps_at(self.bytes, self.pos) {
                        self.new_line(self.pos + len);
                    }
                    if let Some(out) = cooked.as_mut() {
                        out.push_str(&self.text[self.pos..self.pos + len]);
                    }
                    self.pos += len;
                }
            }
        };

        match kind {
            SyntaxKind::TemplateHead => self.template_braces.push(0),
            SyntaxKind::TemplateTail => {
                self.template_braces.pop();
            }
            _ => {}
        }

        if !valid {
            self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
            self.token_value = Cow::Borrowed("");
        } else {
            let content_end = match kind {
                _ if self.token_flags.contains(TokenFlags::UNTERMINATED) => self.pos,
                SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle => self.pos - 2,
                _ => self.pos - 1,
            };
            self.token_value = match cooked {
                Some(value) => Cow::Owned(value),
                None => Cow::Borrowed(&self.text[content_start..content_end]),
            };
        }
        kind
    }

    /// Scan an escape sequence starting at `\`, appending the cooked
    /// character to `out`. Returns false if the escape is invalid; strings
    /// report that as an error, templates only mark the token.
    fn scan_escape_sequence(&mut self, out: &mut String, in_template: bool) -> bool {
        let start = self.pos;
        self.pos += 1; // skip backslash
        let Some(ch) = self.current_char() else {
            if !in_template {
                self.error(start, self.pos, &messages::UNEXPECTED_END_OF_TEXT, &[]);
            }
            return false;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '\r' => {
                // Line continuation.
                if self.byte_at(0) == Some(b'\n') {
                    self.pos += 1;
                }
                self.new_line(self.pos);
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => self.new_line(self.pos),
            '0' if !self.byte_at(0).map_or(false, is_digit) => out.push('\0'),
            '0'..='7' => {
                if in_template {
                    return false;
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                let first = ch as u32 - '0' as u32;
                let max_len = if first <= 3 { 3 } else { 2 };
                let mut value = first;
                let mut len = 1;
                while len < max_len {
                    match self.byte_at(0) {
                        Some(d) if is_octal_digit(d) => {
                            value = value * 8 + (d - b'0') as u32;
                            self.pos += 1;
                            len += 1;
                        }
                        _ => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
            }
            '8' | '9' => {
                if in_template {
                    return false;
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                out.push(ch);
            }
            'x' => match (self.byte_at(0).and_then(hex_value), self.byte_at(1).and_then(hex_value)) {
                (Some(hi), Some(lo)) => {
                    self.pos += 2;
                    out.push(char::from_u32(hi * 16 + lo).unwrap_or('\u{FFFD}'));
                }
                _ => {
                    if !in_template {
                        self.error(start, self.pos, &messages::HEXADECIMAL_DIGIT_EXPECTED, &[]);
                    }
                    return false;
                }
            },
            'u' => match self.scan_unicode_escape_value(start, !in_template) {
                Some(code) => self.push_code_unit(out, code),
                None => return false,
            },
            other => out.push(other),
        }
        true
    }

    /// Scan the part of a `\u` escape after the `u`: `XXXX` or `{X...}`.
    fn scan_unicode_escape_value(&mut self, start: usize, report: bool) -> Option<u32> {
        if self.byte_at(0) == Some(b'{') {
            self.pos += 1;
            let digits_start = self.pos;
            let mut value: u32 = 0;
            let mut overflow = false;
            while let Some(d) = self.byte_at(0).and_then(hex_value) {
                value = value.saturating_mul(16).saturating_add(d);
                if value > 0x10FFFF {
                    overflow = true;
                }
                self.pos += 1;
            }
            let has_digits = self.pos > digits_start;
            if !has_digits || self.byte_at(0) != Some(b'}') {
                if report {
                    self.error(start, self.pos, &messages::HEXADECIMAL_DIGIT_EXPECTED, &[]);
                }
                return None;
            }
            self.pos += 1;
            if overflow {
                if report {
                    self.error(
                        start,
                        self.pos,
                        &messages::AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF,
                        &[],
                    );
                }
                return None;
            }
            return Some(value);
        }

        let mut value = 0;
        for i in 0..4 {
            match self.byte_at(i).and_then(hex_value) {
                Some(d) => value = value * 16 + d,
                None => {
                    if report {
                        self.error(start, self.pos + i, &messages::HEXADECIMAL_DIGIT_EXPECTED, &[]);
                    }
                    return None;
                }
            }
        }
        self.pos += 4;
        Some(value)
    }

    /// Append a UTF-16 code unit or code point, pairing a high surrogate with
    /// an immediately following `\uDCxx` escape.
    fn push_code_unit(&mut self, out: &mut String, code: u32) {
        if (0xD800..0xDC00).contains(&code) && self.bytes[self.pos..].starts_with(b"\\u") {
            let save = self.pos;
            self.pos += 2;
            if let Some(low) = self.scan_unicode_escape_value(save, false) {
                if (0xDC00..0xE000).contains(&low) {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                    return;
                }
            }
            self.pos = save;
        }
        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
    }

    fn scan_regular_expression(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1; // after the /
        let mut in_character_class = false;

        loop {
            let Some(b) = self.byte_at(0) else {
                self.error(start, self.pos, &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            };
            if b == b'\n' || b == b'\r' || is_ls_ps_at(self.bytes, self.pos) {
                self.error(start, self.pos, &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, &[]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            match b {
                b'\\' => {
                    self.pos += 1;
                    match self.current_char() {
                        Some(ch) if !is_line_break(ch) => self.pos += ch.len_utf8(),
                        _ => {}
                    }
                    continue;
                }
                b'[' => in_character_class = true,
                b']' => in_character_class = false,
                b'/' if !in_character_class => {
                    self.pos += 1;
                    // Scan flags
                    while let Some(ch) = self.current_char() {
                        if !is_identifier_part(ch) {
                            break;
                        }
                        self.pos += ch.len_utf8();
                    }
                    break;
                }
                _ => {}
            }
            self.pos += if b < 0x80 { 1 } else { self.current_char().map_or(1, char::len_utf8) };
        }

        self.token_value = Cow::Borrowed(&self.text[start..self.pos]);
        SyntaxKind::RegularExpressionLiteral
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::NumericLiteral;

        if self.bytes[start] == b'0' {
            let radix = match self.byte_at(1) {
                Some(b'x') | Some(b'X') => Some((TokenFlags::HEX_SPECIFIER, is_hex_digit as fn(u8) -> bool)),
                Some(b'b') | Some(b'B') => Some((TokenFlags::BINARY_SPECIFIER, is_binary_digit as fn(u8) -> bool)),
                Some(b'o') | Some(b'O') => Some((TokenFlags::OCTAL_SPECIFIER, is_octal_digit as fn(u8) -> bool)),
                _ => None,
            };
            if let Some((flag, is_radix_digit)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                if !self.scan_digits(is_radix_digit) {
                    let message = if flag == TokenFlags::HEX_SPECIFIER {
                        &messages::HEXADECIMAL_DIGIT_EXPECTED
                    } else {
                        &messages::DIGIT_EXPECTED
                    };
                    self.error(start, self.pos, message, &[]);
                }
                if self.byte_at(0) == Some(b'n') {
                    self.pos += 1;
                    kind = SyntaxKind::BigIntLiteral;
                }
                return self.finish_number(start, kind);
            }

            if self.byte_at(1).map_or(false, is_digit) {
                // Legacy octal (`017`) or decimal with a leading zero (`089`).
                self.token_flags |= TokenFlags::OCTAL;
                self.pos += 1;
                while self.byte_at(0).map_or(false, is_digit) {
                    self.pos += 1;
                }
                if self.byte_at(0) == Some(b'_') {
                    self.error(self.pos, self.pos + 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
                    self.pos += 1;
                }
                return self.finish_number(start, kind);
            }
        }

        // Decimal number
        let has_integer = self.byte_at(0) != Some(b'.');
        if has_integer {
            self.scan_digits(is_digit);
        }
        let mut is_integer = true;

        if self.byte_at(0) == Some(b'.') {
            self.pos += 1;
            is_integer = false;
            self.scan_digits(is_digit);
        }

        // Exponent
        if let Some(b'e') | Some(b'E') = self.byte_at(0) {
            self.pos += 1;
            is_integer = false;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some(b'+') | Some(b'-') = self.byte_at(0) {
                self.pos += 1;
            }
            if !self.scan_digits(is_digit) {
                self.error(start, self.pos, &messages::DIGIT_EXPECTED, &[]);
            }
        }

        // BigInt suffix
        if is_integer && self.byte_at(0) == Some(b'n') {
            self.pos += 1;
            kind = SyntaxKind::BigIntLiteral;
        }

        self.finish_number(start, kind)
    }

    /// Scan digits accepted by `is_valid` with `_` separators between them.
    /// Returns whether at least one digit was consumed.
    fn scan_digits(&mut self, is_valid: fn(u8) -> bool) -> bool {
        let mut any = false;
        let mut last_was_separator = false;
        while let Some(b) = self.byte_at(0) {
            if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if last_was_separator {
                    self.error(self.pos, self.pos + 1, &messages::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS, &[]);
                } else if !any {
                    self.error(self.pos, self.pos + 1, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
                }
                last_was_separator = true;
                self.pos += 1;
            } else if is_valid(b) {
                any = true;
                last_was_separator = false;
                self.pos += 1;
            } else {
                break;
            }
        }
        if last_was_separator {
            self.error(self.pos - 1, self.pos, &messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, &[]);
        }
        any
    }

    fn finish_number(&mut self, start: usize, kind: SyntaxKind) -> SyntaxKind {
        if let Some(ch) = self.current_char() {
            if is_identifier_start(ch) || is_digit(self.bytes[self.pos]) {
                self.error(
                    self.pos,
                    self.pos + ch.len_utf8(),
                    &messages::AN_IDENTIFIER_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
                    &[],
                );
            }
        }
        self.token_value = Cow::Borrowed(&self.text[start..self.pos]);
        kind
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut cooked: Option<String> = None;
        let mut first = true;

        loop {
            match self.byte_at(0) {
                Some(b'\\') => {
                    let escape_start = self.pos;
                    let out = cooked.get_or_insert_with(|| self.text[start..self.pos].to_string());
                    let mut buf = std::mem::take(out);
                    self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                    let value = if self.byte_at(1) == Some(b'u') {
                        self.pos += 2;
                        self.scan_unicode_escape_value(escape_start, true)
                    } else {
                        self.pos += 1;
                        None
                    };
                    match value.and_then(char::from_u32) {
                        Some(ch) if (first && is_identifier_start(ch)) || (!first && is_identifier_part(ch)) => {
                            buf.push(ch);
                        }
                        _ => self.error(escape_start, self.pos, &messages::INVALID_CHARACTER, &[]),
                    }
                    cooked = Some(buf);
                }
                Some(_) => match self.current_char() {
                    Some(ch) if (first && is_identifier_start(ch)) || (!first && is_identifier_part(ch)) => {
                        if let Some(out) = cooked.as_mut() {
                            out.push(ch);
                        }
                        self.pos += ch.len_utf8();
                    }
                    _ => break,
                },
                None => break,
            }
            first = false;
        }

        match cooked {
            // Escaped identifiers never act as keywords.
            Some(value) => {
                self.token_value = Cow::Owned(value);
                SyntaxKind::Identifier
            }
            None => {
                let text = &self.text[start..self.pos];
                self.token_value = Cow::Borrowed(text);
                SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
            }
        }
    }
}

/// Whether a `/` after `prev` starts a regular expression rather than a
/// division operator.
fn regex_allowed_after(prev: Option<SyntaxKind>) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    match prev {
        SyntaxKind::Identifier
        | SyntaxKind::NumericLiteral
        | SyntaxKind::BigIntLiteral
        | SyntaxKind::StringLiteral
        | SyntaxKind::RegularExpressionLiteral
        | SyntaxKind::NoSubstitutionTemplateLiteral
        | SyntaxKind::TemplateTail
        | SyntaxKind::CloseParenToken
        | SyntaxKind::CloseBracketToken
        | SyntaxKind::CloseBraceToken
        | SyntaxKind::PlusPlusToken
        | SyntaxKind::MinusMinusToken
        | SyntaxKind::ThisKeyword
        | SyntaxKind::SuperKeyword
        | SyntaxKind::NullKeyword
        | SyntaxKind::TrueKeyword
        | SyntaxKind::FalseKeyword => false,
        SyntaxKind::YieldKeyword | SyntaxKind::AwaitKeyword => true,
        // Other contextual and future reserved words are usually identifiers.
        kind if kind.is_contextual_keyword() || kind.is_future_reserved_word() => false,
        _ => true,
    }
}

/// Compute the value of a numeric literal from its source text and flags.
pub fn numeric_value(text: &str, flags: TokenFlags) -> f64 {
    let digits: Cow<'_, str> = if flags.contains(TokenFlags::CONTAINS_SEPARATOR) {
        Cow::Owned(text.replace('_', ""))
    } else {
        Cow::Borrowed(text)
    };
    let radix = if flags.contains(TokenFlags::HEX_SPECIFIER) {
        16
    } else if flags.contains(TokenFlags::BINARY_SPECIFIER) {
        2
    } else if flags.contains(TokenFlags::OCTAL_SPECIFIER) {
        8
    } else if flags.contains(TokenFlags::OCTAL) && digits.bytes().all(is_octal_digit) {
        return radix_value(&digits[1..], 8);
    } else {
        10
    };
    if radix != 10 {
        return radix_value(&digits[2..], radix);
    }
    digits.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_value(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * radix as f64 + d as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                return out;
            }
            out.push(kind);
        }
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , :"),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CommaToken,
                SyntaxKind::ColonToken,
            ]
        );
    }

    #[test]
    fn test_scan_shift_operators() {
        assert_eq!(
            kinds("a >>>= b >> c <<= d"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
                SyntaxKind::Identifier,
                SyntaxKind::GreaterThanGreaterThanToken,
                SyntaxKind::Identifier,
                SyntaxKind::LessThanLessThanEqualsToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_line_and_column() {
        let mut scanner = Scanner::new("a\r\n  b\u{2028}c");
        scanner.scan();
        scanner.scan();
        let b = scanner.token_info();
        assert_eq!((b.line, b.column), (1, 2));
        assert!(b.has_preceding_line_break());
        scanner.scan();
        let c = scanner.token_info();
        assert_eq!((c.line, c.column), (2, 0));
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value("0x1F", TokenFlags::HEX_SPECIFIER), 31.0);
        assert_eq!(numeric_value("017", TokenFlags::OCTAL), 15.0);
        assert_eq!(numeric_value("089", TokenFlags::OCTAL), 89.0);
        assert_eq!(numeric_value("1_000", TokenFlags::CONTAINS_SEPARATOR), 1000.0);
        assert_eq!(numeric_value(".5", TokenFlags::NONE), 0.5);
        assert_eq!(numeric_value("0b101", TokenFlags::BINARY_SPECIFIER), 5.0);
    }

    #[test]
    fn test_regex_after_keyword_and_divide_after_identifier() {
        assert_eq!(
            kinds("return /a/g"),
            vec![SyntaxKind::ReturnKeyword, SyntaxKind::RegularExpressionLiteral]
        );
        assert_eq!(
            kinds("a / b"),
            vec![SyntaxKind::Identifier, SyntaxKind::SlashToken, SyntaxKind::Identifier]
        );
    }

    #[test]
    fn test_rescan_slash() {
        let mut scanner = Scanner::new(")/x/g");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "/x/g");
    }
}
