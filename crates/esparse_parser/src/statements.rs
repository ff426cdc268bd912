//! Statement parsing.

use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_diagnostics::messages;
use esparse_options::EcmaVersion;

use crate::context::{BlockFrame, Frame, JumpTarget};
use crate::error::{ParseError, ParseResult};
use crate::functions::FunctionContext;
use crate::parser::Parser;
use crate::patterns::{is_simple_binding, BindingKind};

/// Where a statement appears. Declarations are restricted in the nested
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatementPosition {
    /// A statement list: a block, a clause or a body.
    List,
    IfBody,
    /// The body of a loop or a `with`.
    LoopBody,
    LabelBody,
    /// A label body inside an `if` or loop body, directly or through
    /// further labels.
    NestedLabelBody,
}

/// A declaration list as parsed, with what the surrounding rule still
/// needs to check.
struct Declarations<'a> {
    statement: VariableStatement<'a>,
    /// Offsets of declarations without an initializer that need one
    /// outside `for-in`/`for-of`.
    missing_initializers: Vec<(u32, u32, bool)>,
}

impl<'a> Parser<'a> {
    /// Parse one statement.
    pub(crate) fn parse_statement(&mut self, position: StatementPosition) -> ParseResult<Statement<'a>> {
        self.with_recursion(|p| p.parse_statement_worker(position))
    }

    fn parse_statement_worker(&mut self, position: StatementPosition) -> ParseResult<Statement<'a>> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::OpenBraceToken => Ok(Statement::Block(self.parse_block()?)),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                Ok(Statement::EmptyStatement(NodeData::new(SyntaxKind::EmptyStatement, pos, self.last_token_end())))
            }
            SyntaxKind::VarKeyword => {
                self.next_token();
                self.parse_variable_statement(pos, VariableKind::Var)
            }
            SyntaxKind::ConstKeyword => {
                self.check_declaration_position(position, "const")?;
                self.next_token();
                let kind = if self.options.const_as_var { VariableKind::Var } else { VariableKind::Const };
                self.parse_variable_statement(pos, kind)
            }
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.check_declaration_position(position, "let")?;
                self.next_token();
                self.parse_variable_statement(pos, VariableKind::Let)
            }
            SyntaxKind::FunctionKeyword => {
                let is_generator = self.peek_kind(1) == SyntaxKind::AsteriskToken;
                self.check_function_position(position, is_generator || self.is_strict())?;
                let function = self.parse_function(pos, false, FunctionContext::Declaration)?;
                Ok(Statement::FunctionDeclaration(function))
            }
            SyntaxKind::AsyncKeyword
                if self.is_contextual(SyntaxKind::AsyncKeyword)
                    && self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.peek_has_line_break(1) =>
            {
                self.check_function_position(position, true)?;
                self.require_version(EcmaVersion::Es2017, "async function", pos, self.token_end());
                self.next_token();
                let function = self.parse_function(pos, true, FunctionContext::Declaration)?;
                Ok(Statement::FunctionDeclaration(function))
            }
            SyntaxKind::ClassKeyword => {
                self.check_declaration_position(position, "class")?;
                let class = self.parse_class(pos, FunctionContext::Declaration)?;
                Ok(Statement::ClassDeclaration(class))
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(pos),
            SyntaxKind::DoKeyword => self.parse_do_statement(pos),
            SyntaxKind::WhileKeyword => self.parse_while_statement(pos),
            SyntaxKind::ForKeyword => self.parse_for_statement(pos),
            SyntaxKind::ContinueKeyword => self.parse_continue_statement(pos),
            SyntaxKind::BreakKeyword => self.parse_break_statement(pos),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(pos),
            SyntaxKind::WithKeyword => self.parse_with_statement(pos),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(pos),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(pos),
            SyntaxKind::TryKeyword => self.parse_try_statement(pos),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_expected_semicolon()?;
                Ok(Statement::DebuggerStatement(NodeData::new(
                    SyntaxKind::DebuggerStatement,
                    pos,
                    self.last_token_end(),
                )))
            }
            SyntaxKind::ImportKeyword => {
                let top_level = position == StatementPosition::List && self.context.is_module_top_level();
                self.parse_import_declaration(pos, top_level)
            }
            SyntaxKind::ExportKeyword => {
                let top_level = position == StatementPosition::List && self.context.is_module_top_level();
                self.parse_export_declaration(pos, top_level)
            }
            kind if self.is_identifier_kind(kind) && self.peek_kind(1) == SyntaxKind::ColonToken => {
                self.parse_labeled_statement(pos, position)
            }
            _ => self.parse_expression_statement(pos),
        }
    }

    /// `let` starts a declaration only when a binding follows it.
    fn is_let_declaration(&mut self) -> bool {
        if self.token().has_escape() {
            return false;
        }
        let next = self.peek_kind(1);
        matches!(next, SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken)
            || self.is_identifier_kind(next)
            || matches!(next, SyntaxKind::YieldKeyword | SyntaxKind::AwaitKeyword | SyntaxKind::LetKeyword)
    }

    fn check_declaration_position(&self, position: StatementPosition, keyword: &str) -> ParseResult<()> {
        if position != StatementPosition::List {
            return Err(self.error(&messages::_0_DECLARATIONS_ONLY_IN_BLOCK, &[keyword]));
        }
        Ok(())
    }

    /// Function declarations as the body of `if` or of a label are legacy
    /// syntax, allowed for plain functions in sloppy code. A labelled
    /// function is never the body of an `if` or a loop.
    fn check_function_position(&self, position: StatementPosition, restricted: bool) -> ParseResult<()> {
        let allowed = match position {
            StatementPosition::List => true,
            StatementPosition::IfBody | StatementPosition::LabelBody => !restricted,
            StatementPosition::LoopBody | StatementPosition::NestedLabelBody => false,
        };
        if !allowed {
            return Err(self.error(&messages::FUNCTION_DECLARATION_NOT_ALLOWED_HERE, &[]));
        }
        Ok(())
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    pub(crate) fn parse_block(&mut self) -> ParseResult<Block<'a>> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let (statements, frame) = self.with_frame_returning(Frame::Block(BlockFrame::new(BlockFlags::NONE)), |p| {
            p.parse_statement_list(SyntaxKind::CloseBraceToken, false)
        })?;
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        let block_flags = match frame {
            Frame::Block(block) => block.flags,
            _ => return Err(ParseError::Internal("block frame expected")),
        };
        Ok(Block {
            data: NodeData::new(SyntaxKind::Block, pos, self.last_token_end()),
            statements: self.alloc_list(statements),
            block_flags,
        })
    }

    // ========================================================================
    // Variable declarations
    // ========================================================================

    fn parse_variable_statement(&mut self, pos: u32, kind: VariableKind) -> ParseResult<Statement<'a>> {
        let declarations = self.parse_variable_declarations(pos, kind, false)?;
        self.check_missing_initializers(&declarations.missing_initializers)?;
        self.parse_expected_semicolon()?;
        let mut statement = declarations.statement;
        statement.data = NodeData::new(SyntaxKind::VariableStatement, pos, self.last_token_end());
        Ok(Statement::VariableStatement(statement))
    }

    /// The declaration list after `var`, `let` or `const`. Bound names are
    /// declared as they are found.
    fn parse_variable_declarations(
        &mut self,
        pos: u32,
        kind: VariableKind,
        no_in: bool,
    ) -> ParseResult<Declarations<'a>> {
        if kind.is_lexical() {
            self.require_version(EcmaVersion::Es2015, kind.as_str(), pos, self.last_token_end());
        }
        let binding_kind = if kind.is_lexical() { BindingKind::Lexical } else { BindingKind::Var };
        let mut declarations = Vec::new();
        let mut missing_initializers = Vec::new();
        loop {
            let decl_pos = self.token_pos();
            let target = self.parse_binding_target()?;
            let mut names = Vec::new();
            self.verify_binding_pattern(&target, binding_kind, &mut names)?;

            let initializer = if self.optional_token(SyntaxKind::EqualsToken) {
                let value = match &target {
                    Expression::Identifier(id) => {
                        let name = id.name;
                        self.with_default_name(name, |p| p.parse_assignment_expression(no_in))?
                    }
                    _ => self.parse_assignment_expression(no_in)?,
                };
                Some(self.alloc(value))
            } else {
                if kind == VariableKind::Const || !is_simple_binding(&target) {
                    missing_initializers.push((decl_pos, self.last_token_end(), is_simple_binding(&target)));
                }
                None
            };
            declarations.push(VariableDeclaration {
                data: NodeData::new(SyntaxKind::VariableDeclaration, decl_pos, self.last_token_end()),
                target: self.alloc(target),
                initializer,
            });
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        Ok(Declarations {
            statement: VariableStatement {
                data: NodeData::new(SyntaxKind::VariableStatement, pos, self.last_token_end()),
                kind,
                declarations: self.alloc_list(declarations),
            },
            missing_initializers,
        })
    }

    /// `const x;` and `var [a];` outside a `for-in`/`for-of` head.
    fn check_missing_initializers(&self, missing: &[(u32, u32, bool)]) -> ParseResult<()> {
        match missing.first() {
            Some(&(pos, end, true)) => Err(self.error_at(pos, end, &messages::CONST_DECLARATIONS_MUST_BE_INITIALIZED, &[])),
            Some(&(pos, end, false)) => Err(self.error_at(
                pos,
                end,
                &messages::DESTRUCTURING_DECLARATION_MUST_HAVE_INITIALIZER,
                &[],
            )),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Expression statements and labels
    // ========================================================================

    fn parse_expression_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        let expression = self.parse_expression_and_alloc(false)?;
        self.parse_expected_semicolon()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            data: NodeData::new(SyntaxKind::ExpressionStatement, pos, self.last_token_end()),
            expression,
        }))
    }

    fn parse_labeled_statement(&mut self, pos: u32, position: StatementPosition) -> ParseResult<Statement<'a>> {
        let label = self.parse_identifier()?;
        let atom = self.context.intern(label.name);
        if self.context.find_label(atom).is_some() {
            return Err(self.error_at(
                label.data.pos(),
                label.data.end(),
                &messages::DUPLICATE_LABEL_0,
                &[label.name],
            ));
        }
        self.expect_token(SyntaxKind::ColonToken)?;
        let body_position = match position {
            StatementPosition::List | StatementPosition::LabelBody => StatementPosition::LabelBody,
            _ => StatementPosition::NestedLabelBody,
        };
        let statement = self.with_frame(Frame::Label(atom), |p| p.parse_statement(body_position))?;
        Ok(Statement::LabeledStatement(LabeledStatement {
            data: NodeData::new(SyntaxKind::LabeledStatement, pos, self.last_token_end()),
            label,
            statement: self.alloc(statement),
        }))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_parenthesized_condition(&mut self) -> ParseResult<&'a Expression<'a>> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let condition = self.parse_expression_and_alloc(false)?;
        self.expect_token(SyntaxKind::CloseParenToken)?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::IfKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        let then_statement = self.parse_statement(StatementPosition::IfBody)?;
        let then_statement = self.alloc(then_statement);
        let else_statement = if self.optional_token(SyntaxKind::ElseKeyword) {
            let statement = self.parse_statement(StatementPosition::IfBody)?;
            Some(self.alloc(statement))
        } else {
            None
        };
        Ok(Statement::IfStatement(IfStatement {
            data: NodeData::new(SyntaxKind::IfStatement, pos, self.last_token_end()),
            condition,
            then_statement,
            else_statement,
        }))
    }

    fn parse_loop_body(&mut self) -> ParseResult<&'a Statement<'a>> {
        let body = self.with_frame(Frame::Loop, |p| p.parse_statement(StatementPosition::LoopBody))?;
        Ok(self.alloc(body))
    }

    fn parse_do_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::DoKeyword)?;
        let body = self.parse_loop_body()?;
        self.expect_token(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        // A `;` may always be inserted after the closing `)`.
        self.optional_token(SyntaxKind::SemicolonToken);
        Ok(Statement::DoStatement(DoStatement {
            data: NodeData::new(SyntaxKind::DoStatement, pos, self.last_token_end()),
            body,
            condition,
        }))
    }

    fn parse_while_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        let body = self.parse_loop_body()?;
        Ok(Statement::WhileStatement(WhileStatement {
            data: NodeData::new(SyntaxKind::WhileStatement, pos, self.last_token_end()),
            condition,
            body,
        }))
    }

    /// `for (init; test; update)`, `for (x in o)`, `for (x of o)`,
    /// `for await (x of o)` and `for each (x in o)`.
    fn parse_for_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::ForKeyword)?;
        let mut is_each = false;
        let mut is_await = false;
        if self.is_contextual(SyntaxKind::EachKeyword) && self.options.syntax_extensions {
            is_each = true;
            self.next_token();
        } else if self.current_token() == SyntaxKind::AwaitKeyword {
            let (await_pos, await_end) = (self.token_pos(), self.token_end());
            self.require_version(EcmaVersion::Es2018, "for await", await_pos, await_end);
            if !self.can_await() {
                return Err(self.error(&messages::FOR_AWAIT_OUTSIDE_ASYNC, &[]));
            }
            is_await = true;
            self.next_token();
        }
        self.expect_token(SyntaxKind::OpenParenToken)?;
        // Head declarations get their own scope, which the body sits in.
        self.with_frame(Frame::Block(BlockFrame::new(BlockFlags::NONE)), |p| {
            p.parse_for_rest(pos, is_each, is_await)
        })
    }

    fn parse_for_rest(&mut self, pos: u32, is_each: bool, is_await: bool) -> ParseResult<Statement<'a>> {
        let init_pos = self.token_pos();
        let mut declarations = None;
        let initializer = match self.current_token() {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::VarKeyword => {
                self.next_token();
                let parsed = self.parse_variable_declarations(init_pos, VariableKind::Var, true)?;
                Some(self.for_declarations(parsed, &mut declarations))
            }
            SyntaxKind::ConstKeyword => {
                self.next_token();
                let kind = if self.options.const_as_var { VariableKind::Var } else { VariableKind::Const };
                let parsed = self.parse_variable_declarations(init_pos, kind, true)?;
                Some(self.for_declarations(parsed, &mut declarations))
            }
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.next_token();
                let parsed = self.parse_variable_declarations(init_pos, VariableKind::Let, true)?;
                Some(self.for_declarations(parsed, &mut declarations))
            }
            _ => {
                let expression = self.parse_assignment_expression_cover(true, true)?;
                if self.current_token() == SyntaxKind::InKeyword || self.is_contextual(SyntaxKind::OfKeyword) {
                    let target = self.to_for_target(expression)?;
                    Some(ForInitializer::Expression(self.alloc(target)))
                } else {
                    self.reject_cover(&expression)?;
                    let expression = self.continue_sequence(init_pos, expression)?;
                    Some(ForInitializer::Expression(self.alloc(expression)))
                }
            }
        };

        let is_in = self.current_token() == SyntaxKind::InKeyword;
        let is_of = !is_in && self.is_contextual(SyntaxKind::OfKeyword);
        if is_each && !is_in {
            return Err(self.error(&messages::FOR_EACH_REQUIRES_IN, &[]));
        }
        if is_await && !is_of {
            return Err(self.error(&messages::FOR_AWAIT_REQUIRES_OF, &[]));
        }

        match initializer {
            Some(initializer) if is_in || is_of => {
                let what = if is_in { "for-in" } else { "for-of" };
                if let Some((statement, _)) = declarations {
                    self.check_for_in_of_declarations(statement, is_in, what)?;
                }
                if is_of {
                    self.require_version(EcmaVersion::Es2015, "for-of", self.token_pos(), self.token_end());
                }
                self.next_token();
                let expression = if is_in {
                    self.parse_expression_and_alloc(false)?
                } else {
                    let expression = self.parse_assignment_expression(false)?;
                    self.alloc(expression)
                };
                self.expect_token(SyntaxKind::CloseParenToken)?;
                let body = self.parse_loop_body()?;
                let data = NodeData::new(
                    if is_in { SyntaxKind::ForInStatement } else { SyntaxKind::ForOfStatement },
                    pos,
                    self.last_token_end(),
                );
                Ok(if is_in {
                    let flags = if is_each { NodeFlags::FOR_EACH } else { NodeFlags::NONE };
                    Statement::ForInStatement(ForInStatement {
                        data: data.with_flags(flags),
                        initializer,
                        expression,
                        body,
                    })
                } else {
                    let flags = if is_await { NodeFlags::FOR_AWAIT } else { NodeFlags::NONE };
                    Statement::ForOfStatement(ForOfStatement {
                        data: data.with_flags(flags),
                        initializer,
                        expression,
                        body,
                    })
                })
            }
            initializer => {
                if let Some((_, missing)) = &declarations {
                    self.check_missing_initializers(missing)?;
                }
                self.expect_token(SyntaxKind::SemicolonToken)?;
                let condition = if self.current_token() == SyntaxKind::SemicolonToken {
                    self.empty_join(self.token_pos())
                } else {
                    let condition = self.parse_sequence_expression(false)?;
                    self.join(condition)
                };
                self.expect_token(SyntaxKind::SemicolonToken)?;
                let incrementor = if self.current_token() == SyntaxKind::CloseParenToken {
                    self.empty_join(self.token_pos())
                } else {
                    let incrementor = self.parse_sequence_expression(false)?;
                    self.join(incrementor)
                };
                self.expect_token(SyntaxKind::CloseParenToken)?;
                let body = self.parse_loop_body()?;
                Ok(Statement::ForStatement(ForStatement {
                    data: NodeData::new(SyntaxKind::ForStatement, pos, self.last_token_end()),
                    initializer,
                    condition,
                    incrementor,
                    body,
                }))
            }
        }
    }

    /// Allocate a head declaration, keeping what the checks after `in`,
    /// `of` or `;` need.
    fn for_declarations(
        &mut self,
        parsed: Declarations<'a>,
        slot: &mut Option<(&'a VariableStatement<'a>, Vec<(u32, u32, bool)>)>,
    ) -> ForInitializer<'a> {
        let statement = self.alloc(parsed.statement);
        *slot = Some((statement, parsed.missing_initializers));
        ForInitializer::Variable(statement)
    }

    /// `for (var i = 0 in o)` survives only as legacy sloppy `var` syntax.
    fn check_for_in_of_declarations(
        &self,
        statement: &VariableStatement<'a>,
        is_in: bool,
        what: &str,
    ) -> ParseResult<()> {
        let [declaration] = statement.declarations else {
            return Err(self.error(&messages::ONLY_SINGLE_VARIABLE_IN_FOR_0, &[what]));
        };
        if declaration.initializer.is_some() {
            let legacy = self.options.legacy_for_in_initializer
                && !self.is_strict()
                && is_in
                && statement.kind == VariableKind::Var
                && is_simple_binding(declaration.target);
            if !legacy {
                let (pos, end) = (declaration.data.pos(), declaration.data.end());
                return Err(self.error_at(pos, end, &messages::FOR_0_DECLARATION_CANNOT_HAVE_INITIALIZER, &[what]));
            }
        }
        Ok(())
    }

    /// The left side of `for-in`/`for-of` written as an expression.
    fn to_for_target(&mut self, expression: Expression<'a>) -> ParseResult<Expression<'a>> {
        let what = if self.current_token() == SyntaxKind::InKeyword { "for-in" } else { "for-of" };
        match &expression {
            Expression::Identifier(_)
            | Expression::PropertyAccess(_)
            | Expression::ElementAccess(_)
            | Expression::ArrayLiteral(_)
            | Expression::ObjectLiteral(_) => self.to_assignment_target(expression),
            _ => {
                let range = expression.range();
                Err(self.error_at(range.pos, range.end, &messages::INVALID_FOR_0_TARGET, &[what]))
            }
        }
    }

    /// The rest of a comma expression whose first operand is `first`.
    fn continue_sequence(&mut self, pos: u32, first: Expression<'a>) -> ParseResult<Expression<'a>> {
        if self.current_token() != SyntaxKind::CommaToken {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.optional_token(SyntaxKind::CommaToken) {
            expressions.push(self.parse_assignment_expression(true)?);
        }
        Ok(Expression::Sequence(SequenceExpression {
            data: NodeData::new(SyntaxKind::SequenceExpression, pos, self.last_token_end()),
            expressions: self.alloc_list(expressions),
        }))
    }

    // ========================================================================
    // Jumps
    // ========================================================================

    /// The label of `break` or `continue`, if one follows on the same line.
    fn parse_jump_label(&mut self) -> ParseResult<Option<Identifier<'a>>> {
        if self.is_identifier_token() && !self.has_preceding_line_break() {
            return Ok(Some(self.parse_identifier()?));
        }
        Ok(None)
    }

    fn parse_continue_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::ContinueKeyword)?;
        let label = self.parse_jump_label()?;
        let atom = label.map(|l| self.context.intern(l.name));
        match (self.context.continuable_for(atom), label) {
            (JumpTarget::Found, _) => {}
            (JumpTarget::Missing, Some(l)) => {
                return Err(self.error_at(l.data.pos(), l.data.end(), &messages::UNDEFINED_LABEL_0, &[l.name]))
            }
            (JumpTarget::Missing, None) => {
                return Err(self.error_at(pos, self.last_token_end(), &messages::CONTINUE_OUTSIDE_ITERATION, &[]))
            }
            (JumpTarget::NotIteration, _) => {
                return Err(self.error_at(pos, self.last_token_end(), &messages::CONTINUE_TARGET_NOT_ITERATION, &[]))
            }
        }
        self.parse_expected_semicolon()?;
        Ok(Statement::ContinueStatement(JumpStatement {
            data: NodeData::new(SyntaxKind::ContinueStatement, pos, self.last_token_end()),
            label,
        }))
    }

    fn parse_break_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::BreakKeyword)?;
        let label = self.parse_jump_label()?;
        let atom = label.map(|l| self.context.intern(l.name));
        if !self.context.breakable_for(atom) {
            return Err(match label {
                Some(l) => self.error_at(l.data.pos(), l.data.end(), &messages::UNDEFINED_LABEL_0, &[l.name]),
                None => self.error_at(pos, self.last_token_end(), &messages::BREAK_OUTSIDE_ITERATION_OR_SWITCH, &[]),
            });
        }
        self.parse_expected_semicolon()?;
        Ok(Statement::BreakStatement(JumpStatement {
            data: NodeData::new(SyntaxKind::BreakStatement, pos, self.last_token_end()),
            label,
        }))
    }

    fn parse_return_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        if self.current_function_kind().map_or(true, FunctionKind::is_program) {
            return Err(self.error(&messages::RETURN_OUTSIDE_FUNCTION, &[]));
        }
        self.expect_token(SyntaxKind::ReturnKeyword)?;
        let expression = if self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression_and_alloc(false)?)
        };
        self.parse_expected_semicolon()?;
        Ok(Statement::ReturnStatement(ReturnStatement {
            data: NodeData::new(SyntaxKind::ReturnStatement, pos, self.last_token_end()),
            expression,
        }))
    }

    fn parse_throw_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::ThrowKeyword)?;
        if self.has_preceding_line_break() {
            return Err(self.error(&messages::LINE_BREAK_NOT_PERMITTED_HERE, &[]));
        }
        let expression = self.parse_expression_and_alloc(false)?;
        self.parse_expected_semicolon()?;
        Ok(Statement::ThrowStatement(ThrowStatement {
            data: NodeData::new(SyntaxKind::ThrowStatement, pos, self.last_token_end()),
            expression,
        }))
    }

    // ========================================================================
    // with, switch, try
    // ========================================================================

    fn parse_with_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        if self.is_strict() {
            return Err(self.error(&messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE, &[]));
        }
        self.expect_token(SyntaxKind::WithKeyword)?;
        let expression = self.parse_parenthesized_condition()?;
        let body = self.parse_statement(StatementPosition::LoopBody)?;
        Ok(Statement::WithStatement(WithStatement {
            data: NodeData::new(SyntaxKind::WithStatement, pos, self.last_token_end()),
            expression,
            body: self.alloc(body),
        }))
    }

    fn parse_switch_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::SwitchKeyword)?;
        let expression = self.parse_parenthesized_condition()?;
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let clauses = self.with_frame(Frame::Switch, |p| {
            p.with_frame(Frame::Block(BlockFrame::new(BlockFlags::IS_SWITCH)), |p| p.parse_case_clauses())
        })?;
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        Ok(Statement::SwitchStatement(SwitchStatement {
            data: NodeData::new(SyntaxKind::SwitchStatement, pos, self.last_token_end()),
            expression,
            clauses: self.alloc_list(clauses),
        }))
    }

    fn parse_case_clauses(&mut self) -> ParseResult<Vec<CaseClause<'a>>> {
        let mut clauses = Vec::new();
        let mut seen_default = false;
        while self.current_token() != SyntaxKind::CloseBraceToken {
            let pos = self.token_pos();
            let test = match self.current_token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    Some(self.parse_expression_and_alloc(false)?)
                }
                SyntaxKind::DefaultKeyword => {
                    if seen_default {
                        return Err(self.error(&messages::DUPLICATE_DEFAULT_CLAUSE, &[]));
                    }
                    seen_default = true;
                    self.next_token();
                    None
                }
                _ => return Err(self.error(&messages::CASE_OR_DEFAULT_EXPECTED, &[])),
            };
            self.expect_token(SyntaxKind::ColonToken)?;
            let mut statements = Vec::new();
            while !matches!(
                self.current_token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                statements.push(self.parse_statement(StatementPosition::List)?);
            }
            let kind = if test.is_some() { SyntaxKind::CaseClause } else { SyntaxKind::DefaultClause };
            clauses.push(CaseClause {
                data: NodeData::new(kind, pos, self.last_token_end()),
                test,
                statements: self.alloc_list(statements),
            });
        }
        Ok(clauses)
    }

    fn parse_try_statement(&mut self, pos: u32) -> ParseResult<Statement<'a>> {
        self.expect_token(SyntaxKind::TryKeyword)?;
        let try_block = self.parse_block()?;

        let catch_clause = if self.current_token() == SyntaxKind::CatchKeyword {
            Some(self.parse_catch_clause()?)
        } else {
            None
        };
        let finally_block = if self.optional_token(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if catch_clause.is_none() && finally_block.is_none() {
            return Err(self.error(&messages::CATCH_OR_FINALLY_EXPECTED, &[]));
        }
        Ok(Statement::TryStatement(TryStatement {
            data: NodeData::new(SyntaxKind::TryStatement, pos, self.last_token_end()),
            try_block,
            catch_clause,
            finally_block,
        }))
    }

    fn parse_catch_clause(&mut self) -> ParseResult<CatchClause<'a>> {
        let pos = self.token_pos();
        let catch_end = self.token_end();
        self.expect_token(SyntaxKind::CatchKeyword)?;
        self.with_frame(Frame::Block(BlockFrame::new(BlockFlags::NONE)), |p| {
            let parameter = if p.optional_token(SyntaxKind::OpenParenToken) {
                let target = p.parse_binding_target()?;
                let mut names = Vec::new();
                p.verify_binding_pattern(&target, BindingKind::Catch, &mut names)?;
                p.expect_token(SyntaxKind::CloseParenToken)?;
                Some(p.alloc(target))
            } else {
                p.require_version(EcmaVersion::Es2019, "Optional catch binding", pos, catch_end);
                None
            };
            let block = p.parse_block()?;
            Ok(CatchClause {
                data: NodeData::new(SyntaxKind::CatchClause, pos, p.last_token_end()),
                parameter,
                block,
            })
        })
    }
}
