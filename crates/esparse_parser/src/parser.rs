//! The ECMAScript parser.
//!
//! A recursive descent parser over a [`TokenStream`]. The grammar rules are
//! split over `statements`, `expressions`, `functions`, `classes` and
//! `modules`, all of them `impl Parser` blocks. This module holds the parser
//! state, the entry points, the token helpers and the statement-list loop
//! with its error recovery.

use std::borrow::Cow;

use bumpalo::Bump;
use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_core::{alloc_list, LineMap, TextRange, TextSpan};
use esparse_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use esparse_options::{EcmaVersion, ParserOptions};
use esparse_scanner::{Scanner, Token, TokenStream};
use tracing::{debug, debug_span};

use crate::context::{BlockFrame, ContextStack, Frame, FunctionFrame, ModuleBuilder};
use crate::error::{ParseError, ParseResult};
use crate::functions::FunctionParts;
use crate::lazy::LazyReparse;
use crate::statements::StatementPosition;
use crate::utilities::{is_strict_mode_reserved_word, skip_mode_after};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
pub const MAX_RECURSION_DEPTH: u32 = 200;

/// A parsed script, module or function body.
#[derive(Debug)]
pub struct ParseOutput<'a> {
    pub program: &'a FunctionNode<'a>,
    pub diagnostics: DiagnosticCollection,
}

impl<'a> ParseOutput<'a> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// A parsed standalone expression.
#[derive(Debug)]
pub struct ExpressionOutput<'a> {
    pub expression: &'a Expression<'a>,
    pub diagnostics: DiagnosticCollection,
}

/// The parser produces an IR tree from ECMAScript source text.
pub struct Parser<'a> {
    pub(crate) arena: &'a Bump,
    pub(crate) tokens: TokenStream<'a>,
    pub(crate) source_text: &'a str,
    pub(crate) file_name: String,
    pub(crate) options: ParserOptions,
    pub(crate) context: ContextStack<'a>,
    pub(crate) diagnostics: DiagnosticCollection,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    pub(crate) recursion_depth: u32,
    pub(crate) next_function_id: FunctionId,
    /// Names for anonymous functions and classes, with the offset of the
    /// value they apply to.
    pub(crate) default_names: Vec<(&'a str, u32)>,
    pub(crate) is_module_goal: bool,
    pub(crate) lazy: Option<LazyReparse>,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &'a str, options: ParserOptions) -> Self {
        let mut scanner = Scanner::new(source_text);
        scanner.set_scripting(options.scripting);
        if options.shebang {
            scanner.skip_shebang();
        }
        Self {
            arena,
            tokens: TokenStream::new(scanner),
            source_text,
            file_name: file_name.to_string(),
            options,
            context: ContextStack::new(),
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            next_function_id: FunctionId::PROGRAM,
            default_names: Vec::new(),
            is_module_goal: false,
            lazy: None,
        }
    }

    /// Skip function bodies a previous parse has already seen.
    pub fn with_lazy_reparse(mut self, lazy: LazyReparse) -> Self {
        self.lazy = Some(lazy);
        self
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    pub fn parse_script(mut self) -> ParseResult<ParseOutput<'a>> {
        let span = debug_span!("parse", file = %self.file_name, goal = "script");
        let _enter = span.enter();
        let program = self.parse_program(FunctionKind::Script)?;
        Ok(ParseOutput {
            program,
            diagnostics: self.finish_diagnostics(),
        })
    }

    pub fn parse_module(mut self) -> ParseResult<ParseOutput<'a>> {
        let span = debug_span!("parse", file = %self.file_name, goal = "module");
        let _enter = span.enter();
        self.is_module_goal = true;
        let program = self.parse_program(FunctionKind::Module)?;
        Ok(ParseOutput {
            program,
            diagnostics: self.finish_diagnostics(),
        })
    }

    /// Parse the source as the body of a function, as `new Function` does.
    pub fn parse_function_body(mut self, is_generator: bool, is_async: bool) -> ParseResult<ParseOutput<'a>> {
        let span = debug_span!("parse", file = %self.file_name, goal = "function body");
        let _enter = span.enter();

        let id = self.allocate_function_id();
        let kind = if is_generator { FunctionKind::Generator } else { FunctionKind::Normal };
        let mut flags = FunctionFlags::ANONYMOUS;
        if is_async {
            flags |= FunctionFlags::IS_ASYNC;
        }
        if self.options.strict {
            flags |= FunctionFlags::STRICT;
        }
        let frame = FunctionFrame::new(id, kind, flags);
        let ((statements, block_flags), frame) =
            self.with_function_frame(frame, |p| p.parse_body_statements(SyntaxKind::EndOfFileToken))?;
        let end = self.source_text.len() as u32;
        let program = self.finish_function(
            frame,
            FunctionParts {
                pos: 0,
                end,
                node_kind: SyntaxKind::FunctionExpression,
                ident: None,
                name: "anonymous",
                parameters: Vec::new(),
                prologue: Vec::new(),
                statements,
                body_range: TextRange::new(0, end),
                block_flags,
                end_checkpoint: self.eof_checkpoint(),
                module: None,
                lazily_skipped: false,
            },
        );
        Ok(ParseOutput {
            program,
            diagnostics: self.finish_diagnostics(),
        })
    }

    /// Parse the whole source as a single expression.
    pub fn parse_expression(mut self) -> ParseResult<ExpressionOutput<'a>> {
        let span = debug_span!("parse", file = %self.file_name, goal = "expression");
        let _enter = span.enter();

        let id = self.allocate_function_id();
        let mut flags = FunctionFlags::PROGRAM;
        if self.options.strict {
            flags |= FunctionFlags::STRICT;
        }
        let frame = FunctionFrame::new(id, FunctionKind::Script, flags);
        let (expression, _) = self.with_function_frame(frame, |p| {
            let expression = p.parse_expression_and_alloc(false)?;
            if p.current_token() != SyntaxKind::EndOfFileToken {
                return Err(p.unexpected_token());
            }
            Ok(expression)
        })?;
        Ok(ExpressionOutput {
            expression,
            diagnostics: self.finish_diagnostics(),
        })
    }

    fn parse_program(&mut self, kind: FunctionKind) -> ParseResult<&'a FunctionNode<'a>> {
        let id = self.allocate_function_id();
        let mut flags = FunctionFlags::PROGRAM;
        if kind == FunctionKind::Module || self.options.strict {
            flags |= FunctionFlags::STRICT;
        }
        let frame = FunctionFrame::new(id, kind, flags);
        let ((statements, block_flags, module), frame) = self.with_function_frame(frame, |p| {
            if kind != FunctionKind::Module {
                let (statements, block_flags) = p.parse_body_statements(SyntaxKind::EndOfFileToken)?;
                return Ok((statements, block_flags, None));
            }
            let ((statements, block_flags), module) = p.with_frame_returning(
                Frame::Module(ModuleBuilder::default()),
                |p| p.parse_body_statements(SyntaxKind::EndOfFileToken),
            )?;
            let Frame::Module(module) = module else {
                return Err(ParseError::Internal("module frame expected"));
            };
            let record: &'a _ = p.arena.alloc(module.finish(p.arena));
            Ok((statements, block_flags, Some(record)))
        })?;

        let end = self.source_text.len() as u32;
        Ok(self.finish_function(
            frame,
            FunctionParts {
                pos: 0,
                end,
                node_kind: SyntaxKind::Program,
                ident: None,
                name: ":program",
                parameters: Vec::new(),
                prologue: Vec::new(),
                statements,
                body_range: TextRange::new(0, end),
                block_flags,
                end_checkpoint: self.eof_checkpoint(),
                module,
                lazily_skipped: false,
            },
        ))
    }

    /// Parse the statements of a function or program body up to
    /// `terminator`, inside a body block frame.
    pub(crate) fn parse_body_statements(
        &mut self,
        terminator: SyntaxKind,
    ) -> ParseResult<(Vec<Statement<'a>>, BlockFlags)> {
        let (statements, frame) = self.with_frame_returning(
            Frame::Block(BlockFrame::new(BlockFlags::IS_BODY)),
            |p| p.parse_statement_list(terminator, true),
        )?;
        let flags = match frame {
            Frame::Block(block) => block.flags,
            _ => return Err(ParseError::Internal("block frame expected")),
        };
        Ok((statements, flags))
    }

    fn eof_checkpoint(&self) -> Checkpoint {
        let token = self.tokens.current();
        Checkpoint::new(token.start, token.line, token.column)
    }

    /// Collect scanner and parser diagnostics, sorted and located.
    fn finish_diagnostics(&mut self) -> DiagnosticCollection {
        let mut all = self.tokens.take_diagnostics();
        all.extend(std::mem::take(&mut self.diagnostics));
        all.sort();
        let line_map = LineMap::new(self.source_text);
        let mut out = DiagnosticCollection::new();
        for mut diagnostic in all.into_diagnostics() {
            if diagnostic.location.is_none() {
                if let Some(span) = diagnostic.span {
                    diagnostic.location = Some(line_map.line_and_column_of(span.start));
                }
            }
            if diagnostic.file.is_none() {
                diagnostic.file = Some(self.file_name.clone());
            }
            out.add(diagnostic);
        }
        out
    }

    // ========================================================================
    // Frames
    // ========================================================================

    /// Run `f` with `frame` pushed. The frame is popped on every exit path.
    pub(crate) fn with_frame<T>(
        &mut self,
        frame: Frame<'a>,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.with_frame_returning(frame, f).map(|(value, _)| value)
    }

    /// Like [`Parser::with_frame`], also handing back the popped frame.
    pub(crate) fn with_frame_returning<T>(
        &mut self,
        frame: Frame<'a>,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<(T, Frame<'a>)> {
        let depth = self.context.push(frame);
        let result = f(self);
        match self.context.pop_to(depth) {
            Some(frame) => result.map(|value| (value, frame)),
            None => Err(ParseError::Internal("frame stack imbalance")),
        }
    }

    pub(crate) fn with_function_frame<T>(
        &mut self,
        frame: FunctionFrame<'a>,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<(T, FunctionFrame<'a>)> {
        let (value, frame) = self.with_frame_returning(Frame::Function(frame), f)?;
        match frame {
            Frame::Function(frame) => Ok((value, frame)),
            _ => Err(ParseError::Internal("function frame expected")),
        }
    }

    pub(crate) fn allocate_function_id(&mut self) -> FunctionId {
        let id = self.next_function_id;
        self.next_function_id = id.next();
        id
    }

    /// Run `f` with `name` as the inferred name of an anonymous function or
    /// class starting at the current token.
    pub(crate) fn with_default_name<T>(
        &mut self,
        name: &'a str,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        self.default_names.push((name, self.token_pos()));
        let result = f(self);
        self.default_names.pop();
        result
    }

    /// The inferred name for an anonymous definition starting at `pos`.
    pub(crate) fn default_name_at(&self, pos: u32) -> Option<&'a str> {
        match self.default_names.last() {
            Some((name, at)) if *at == pos => Some(name),
            _ => None,
        }
    }

    pub(crate) fn with_recursion<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(ParseError::RecursionLimit(MAX_RECURSION_DEPTH, self.token_pos()));
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn current_token(&self) -> SyntaxKind {
        self.tokens.kind()
    }

    #[inline]
    pub(crate) fn token(&self) -> &Token<'a> {
        self.tokens.current()
    }

    #[inline]
    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.tokens.advance();
        self.tokens.kind()
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.tokens.current().start
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.tokens.current().end
    }

    #[inline]
    pub(crate) fn token_value(&self) -> Cow<'a, str> {
        self.tokens.current().value.clone()
    }

    #[inline]
    pub(crate) fn token_flags(&self) -> TokenFlags {
        self.tokens.current().flags
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.tokens.current().has_preceding_line_break()
    }

    /// Kind of the token `k` positions ahead.
    pub(crate) fn peek_kind(&mut self, k: usize) -> SyntaxKind {
        self.tokens.peek_at(k).kind
    }

    /// Whether the token `k` positions ahead is on a new line.
    pub(crate) fn peek_has_line_break(&mut self, k: usize) -> bool {
        self.tokens.peek_at(k).has_preceding_line_break()
    }

    /// End offset of the most recently consumed token.
    pub(crate) fn last_token_end(&self) -> u32 {
        self.tokens.previous().map_or(0, |t| t.end)
    }

    pub(crate) fn expect_token(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.current_token() == kind {
            self.next_token();
            Ok(())
        } else {
            Err(self.error(&messages::_0_EXPECTED, &[kind.describe()]))
        }
    }

    pub(crate) fn optional_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Whether a statement may end before the current token.
    pub(crate) fn can_insert_semicolon(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Consume a statement terminator: `;`, or one inferred before a line
    /// break, `}` or the end of input.
    pub(crate) fn parse_expected_semicolon(&mut self) -> ParseResult<()> {
        if self.optional_token(SyntaxKind::SemicolonToken) || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.error(&messages::_0_EXPECTED, &[";"]))
        }
    }

    // ========================================================================
    // Arena helpers
    // ========================================================================

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub(crate) fn alloc_list<T>(&self, items: Vec<T>) -> &'a [T] {
        alloc_list(self.arena, items)
    }

    pub(crate) fn alloc_str(&self, text: &str) -> &'a str {
        self.arena.alloc_str(text)
    }

    /// Move a token value into the arena, borrowing when it is source text.
    pub(crate) fn intern_value(&self, value: Cow<'a, str>) -> &'a str {
        match value {
            Cow::Borrowed(text) => text,
            Cow::Owned(text) => self.arena.alloc_str(&text),
        }
    }

    pub(crate) fn source_slice(&self, pos: u32, end: u32) -> &'a str {
        self.source_text.get(pos as usize..end as usize).unwrap_or("")
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    pub(crate) fn error_at(&self, pos: u32, end: u32, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        ParseError::syntax(Diagnostic::at(TextSpan::from_bounds(pos, end.max(pos)), message, args))
    }

    /// A syntax error at the current token.
    pub(crate) fn error(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        self.error_at(self.token_pos(), self.token_end(), message, args)
    }

    pub(crate) fn unexpected_token(&self) -> ParseError {
        match self.current_token() {
            SyntaxKind::EndOfFileToken => self.error(&messages::UNEXPECTED_END_OF_TEXT, &[]),
            kind => {
                let text = self.source_slice(self.token_pos(), self.token_end());
                let shown = if text.is_empty() { kind.describe() } else { text };
                self.error(&messages::UNEXPECTED_TOKEN_0, &[shown])
            }
        }
    }

    /// Record a recoverable error without unwinding.
    pub(crate) fn report(&mut self, error: ParseError) {
        if let ParseError::Syntax(diagnostic) = error {
            self.diagnostics.add(*diagnostic);
        }
    }

    pub(crate) fn report_at(&mut self, pos: u32, end: u32, message: &DiagnosticMessage, args: &[&str]) {
        let error = self.error_at(pos, end, message, args);
        self.report(error);
    }

    /// Report `feature` when the configured edition predates `version`.
    /// Parsing continues as if the syntax were supported.
    pub(crate) fn require_version(&mut self, version: EcmaVersion, feature: &str, pos: u32, end: u32) {
        if !self.options.supports(version) {
            self.report_at(pos, end, &messages::_0_REQUIRES_ECMASCRIPT_1_OR_LATER, &[feature, version.display_name()]);
        }
    }

    // ========================================================================
    // Context queries
    // ========================================================================

    #[inline]
    pub(crate) fn is_strict(&self) -> bool {
        self.context.is_strict()
    }

    pub(crate) fn current_function_kind(&self) -> Option<FunctionKind> {
        self.context.current_function().map(|f| f.kind)
    }

    pub(crate) fn current_function_flags(&self) -> FunctionFlags {
        self.context.current_function().map_or(FunctionFlags::NONE, |f| f.flags)
    }

    pub(crate) fn in_generator(&self) -> bool {
        self.current_function_kind() == Some(FunctionKind::Generator)
    }

    /// Whether `await` is reserved here: in modules, and in async functions
    /// including arrows nested in them.
    pub(crate) fn await_is_keyword(&self) -> bool {
        if self.is_module_goal {
            return true;
        }
        for func in self.context.functions() {
            if func.flags.contains(FunctionFlags::IS_ASYNC) {
                return true;
            }
            if !func.is_arrow() {
                break;
            }
        }
        false
    }

    /// Whether an `await` expression may appear here.
    pub(crate) fn can_await(&self) -> bool {
        match self.context.current_function() {
            Some(func) => {
                func.flags.contains(FunctionFlags::IS_ASYNC)
                    || (func.kind == FunctionKind::Module && !func.in_parameters)
            }
            None => false,
        }
    }

    pub(crate) fn in_parameters(&self) -> bool {
        self.context.current_function().is_some_and(|f| f.in_parameters)
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Whether the current token can be used as an identifier reference or
    /// binding in the current context.
    pub(crate) fn is_identifier_token(&self) -> bool {
        self.is_identifier_kind(self.current_token())
    }

    pub(crate) fn is_identifier_kind(&self, kind: SyntaxKind) -> bool {
        match kind {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword => !self.in_generator() && !self.is_strict(),
            SyntaxKind::AwaitKeyword => !self.await_is_keyword(),
            kind if kind.is_contextual_keyword() => true,
            kind if kind.is_future_reserved_word() => !self.is_strict(),
            _ => false,
        }
    }

    /// Parse an identifier reference or binding identifier.
    pub(crate) fn parse_identifier(&mut self) -> ParseResult<Identifier<'a>> {
        let kind = self.current_token();
        if !self.is_identifier_token() {
            let text = self.source_slice(self.token_pos(), self.token_end());
            let err = if kind.is_future_reserved_word() {
                self.error(&messages::_0_IS_A_RESERVED_WORD_IN_STRICT_MODE, &[text])
            } else if kind.is_keyword() {
                self.error(&messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE, &[text])
            } else {
                self.error(&messages::IDENTIFIER_EXPECTED, &[])
            };
            return Err(err);
        }
        let pos = self.token_pos();
        let end = self.token_end();
        let escaped = self.token().has_escape();
        let name = self.intern_value(self.token_value());
        if escaped && self.is_escaped_keyword(name) {
            return Err(self.error(&messages::KEYWORDS_CANNOT_CONTAIN_ESCAPE_CHARACTERS, &[]));
        }
        self.next_token();
        let mut data = NodeData::new(SyntaxKind::Identifier, pos, end);
        if escaped {
            data.flags |= NodeFlags::ESCAPED;
        }
        Ok(Identifier { data, name })
    }

    /// Whether an identifier written with escapes spells a word that is
    /// reserved here.
    pub(crate) fn is_escaped_keyword(&self, name: &str) -> bool {
        match SyntaxKind::from_keyword(name) {
            Some(kind) if kind.is_reserved_word() => true,
            Some(kind) if kind.is_future_reserved_word() => {
                self.is_strict() || (kind == SyntaxKind::YieldKeyword && self.in_generator())
            }
            Some(SyntaxKind::AwaitKeyword) => self.await_is_keyword(),
            _ => false,
        }
    }

    /// Parse an identifier that declares a binding.
    pub(crate) fn parse_binding_identifier(&mut self) -> ParseResult<Identifier<'a>> {
        let id = self.parse_identifier()?;
        self.check_binding_identifier(&id)?;
        Ok(id)
    }

    /// Strict mode restrictions on a binding name.
    pub(crate) fn check_binding_identifier(&self, id: &Identifier<'a>) -> ParseResult<()> {
        self.check_strict_name(id.name, id.data.pos(), id.data.end())
    }

    pub(crate) fn check_strict_name(&self, name: &str, pos: u32, end: u32) -> ParseResult<()> {
        if !self.is_strict() {
            return Ok(());
        }
        if name == "eval" || name == "arguments" {
            return Err(self.error_at(pos, end, &messages::INVALID_USE_OF_0_IN_STRICT_MODE, &[name]));
        }
        if is_strict_mode_reserved_word(name) {
            return Err(self.error_at(pos, end, &messages::_0_IS_A_RESERVED_WORD_IN_STRICT_MODE, &[name]));
        }
        Ok(())
    }

    /// Parse any identifier name, keywords included (`a.if`, `{class: 1}`).
    pub(crate) fn parse_identifier_name(&mut self) -> ParseResult<Identifier<'a>> {
        if !self.current_token().is_identifier_name() {
            return Err(self.error(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        let pos = self.token_pos();
        let end = self.token_end();
        let name = self.intern_value(self.token_value());
        self.next_token();
        Ok(Identifier {
            data: NodeData::new(SyntaxKind::Identifier, pos, end),
            name,
        })
    }

    /// Whether the current token is the contextual word `text`, not escaped.
    pub(crate) fn is_contextual(&self, kind: SyntaxKind) -> bool {
        self.current_token() == kind && !self.token().has_escape()
    }

    // ========================================================================
    // Statement lists
    // ========================================================================

    /// Parse statements up to `terminator`, recovering from syntax errors.
    ///
    /// With `directives`, leading string-literal statements form the
    /// directive prologue and `"use strict"` switches the current function
    /// to strict mode.
    pub(crate) fn parse_statement_list(
        &mut self,
        terminator: SyntaxKind,
        directives: bool,
    ) -> ParseResult<Vec<Statement<'a>>> {
        let mut statements = Vec::new();
        let mut in_prologue = directives;
        let mut prologue_flags: Vec<(u32, u32, TokenFlags)> = Vec::new();

        loop {
            let kind = self.current_token();
            if kind == terminator || kind == SyntaxKind::EndOfFileToken {
                break;
            }
            let start = self.token_pos();
            let start_flags = self.token_flags();
            let starts_with_string = kind == SyntaxKind::StringLiteral;

            match self.parse_statement(StatementPosition::List) {
                Ok(mut statement) => {
                    if in_prologue {
                        if starts_with_string && mark_directive(&mut statement) {
                            self.process_directive(&statement, start_flags, &mut prologue_flags);
                        } else {
                            in_prologue = false;
                        }
                    }
                    statements.push(statement);
                }
                Err(err) if err.is_recoverable() => {
                    in_prologue = false;
                    self.report(err);
                    let end = self.token_pos().max(start);
                    statements.push(Statement::ErrorStatement(
                        NodeData::new(SyntaxKind::ErrorStatement, start, end)
                            .with_flags(NodeFlags::THIS_NODE_HAS_ERROR),
                    ));
                    self.skip_to_next_statement(start);
                    debug!(offset = start, resumed_at = self.token_pos(), "recovered from syntax error");
                }
                Err(err) => return Err(err),
            }

            // No progress: drop the offending token so the loop terminates.
            let current = self.current_token();
            if self.token_pos() == start && current != terminator && current != SyntaxKind::EndOfFileToken {
                self.next_token();
            }
            self.tokens.mark_commit_point();
            self.tokens.commit();
        }
        Ok(statements)
    }

    /// Error recovery: skip to the end of the broken statement. Stops at a
    /// token on a new line, after a `;`, or before a `}` that closes an
    /// enclosing block. Braces opened while skipping are skipped as a whole.
    fn skip_to_next_statement(&mut self, statement_start: u32) {
        let mut depth = 0u32;
        let mut first = self.token_pos() == statement_start;
        loop {
            let kind = self.current_token();
            if !first && depth == 0 && skip_mode_after(kind, self.has_preceding_line_break()) {
                break;
            }
            match kind {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    break;
                }
                SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseBraceToken if depth == 0 => break,
                SyntaxKind::CloseBraceToken => {
                    depth -= 1;
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                _ => {}
            }
            self.next_token();
            first = false;
        }
    }

    /// Handle one directive of a prologue.
    fn process_directive(
        &mut self,
        statement: &Statement<'a>,
        flags: TokenFlags,
        prologue_flags: &mut Vec<(u32, u32, TokenFlags)>,
    ) {
        let Some(literal) = statement.directive() else {
            return;
        };
        let (pos, end) = (literal.data.pos(), literal.data.end());
        prologue_flags.push((pos, end, flags));

        let raw = literal.raw;
        let is_use_strict = raw.len() == 12 && &raw[1..11] == "use strict";
        if !is_use_strict {
            return;
        }
        if self.current_function_flags().contains(FunctionFlags::HAS_NON_SIMPLE_PARAMETERS) {
            self.report_at(pos, end, &messages::USE_STRICT_WITH_NON_SIMPLE_PARAMETERS, &[]);
        }
        if self.is_strict() {
            return;
        }
        self.context.set_strict();

        for (pos, end, flags) in prologue_flags.iter().copied() {
            if flags.contains(TokenFlags::OCTAL_ESCAPE) {
                self.report_at(pos, end, &messages::OCTAL_ESCAPE_SEQUENCES_NOT_ALLOWED_IN_STRICT_MODE, &[]);
            }
        }
        self.revalidate_strict_bindings();
    }

    /// Re-check the function name and parameters once the body turned out
    /// to be strict.
    fn revalidate_strict_bindings(&mut self) {
        let Some(func) = self.context.current_function() else {
            return;
        };
        let mut names: Vec<(&'a str, TextRange)> = Vec::new();
        if let Some(binding) = func.binding_name {
            names.push(binding);
        }
        let parameters = func.parameter_bindings.clone();
        // Those lists already reject duplicates regardless of strictness.
        let duplicates_checked = func.is_arrow()
            || func
                .flags
                .intersects(FunctionFlags::IS_METHOD | FunctionFlags::HAS_NON_SIMPLE_PARAMETERS);

        let mut errors = Vec::new();
        for (name, range) in names.iter().chain(parameters.iter()) {
            if let Err(err) = self.check_strict_name(name, range.pos, range.end) {
                errors.push(err);
            }
        }
        for (i, (name, range)) in parameters.iter().enumerate() {
            if duplicates_checked {
                break;
            }
            if parameters[..i].iter().any(|(other, _)| other == name) {
                errors.push(self.error_at(range.pos, range.end, &messages::DUPLICATE_PARAMETER_NAME_0, &[name]));
            }
        }
        for err in errors {
            self.report(err);
        }
    }
}

/// Flag `statement` as a directive if it is a lone string literal.
fn mark_directive(statement: &mut Statement<'_>) -> bool {
    match statement {
        Statement::ExpressionStatement(s) => {
            let is_plain_string = matches!(s.expression, Expression::StringLiteral(lit)
                if !lit.data.flags.contains(NodeFlags::PARENTHESIZED));
            if is_plain_string {
                s.data.flags |= NodeFlags::DIRECTIVE;
            }
            is_plain_string
        }
        _ => false,
    }
}
