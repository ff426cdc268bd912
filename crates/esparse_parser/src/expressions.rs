//! Expression grammar.
//!
//! Assignment and conditional expressions sit on top of a precedence
//! climbing loop for binary operators. Below it come unary and update
//! operators, member/call chains and primary expressions. Array and object
//! literals are parsed as expressions first and converted to patterns when
//! an `=` or `=>` shows they were destructuring targets.

use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_core::collections::FxHashMap;
use esparse_diagnostics::messages;
use esparse_options::EcmaVersion;
use esparse_scanner::numeric_value;

use crate::error::ParseResult;
use crate::functions::{ArrowHead, FunctionContext};
use crate::parser::Parser;
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::*;

/// An arrow function written without parentheses around it ends every
/// operator chain it appears in.
pub(crate) fn is_bare_arrow(expression: &Expression<'_>, start: u32) -> bool {
    matches!(expression, Expression::ArrowFunction(f) if f.data.pos() == start)
}

/// The name an anonymous function assigned to `target` would take.
fn inferred_name<'a>(target: &Expression<'a>) -> Option<&'a str> {
    match target {
        Expression::Identifier(id) => Some(id.name),
        Expression::PropertyAccess(access) => Some(access.name.name),
        _ => None,
    }
}

/// The name an anonymous function stored under `key` would take.
pub(crate) fn key_name<'a>(key: &PropertyKey<'a>) -> Option<&'a str> {
    match key {
        PropertyKey::Identifier(id) => Some(id.name),
        PropertyKey::StringLiteral(s) => Some(s.value),
        PropertyKey::NumericLiteral(n) => Some(n.raw),
        PropertyKey::BigIntLiteral(b) => Some(b.raw),
        PropertyKey::Computed(_) => None,
    }
}

fn propagate_cover(flags: &mut NodeFlags, expression: &Expression<'_>) {
    if expression.data().flags.contains(NodeFlags::COVER_INITIALIZED_NAME) {
        *flags |= NodeFlags::COVER_INITIALIZED_NAME;
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Sequence and assignment
    // ========================================================================

    /// Expression: AssignmentExpression (`,` AssignmentExpression)*
    pub(crate) fn parse_sequence_expression(&mut self, no_in: bool) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let first = self.parse_assignment_expression(no_in)?;
        if self.current_token() != SyntaxKind::CommaToken {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.optional_token(SyntaxKind::CommaToken) {
            expressions.push(self.parse_assignment_expression(no_in)?);
        }
        Ok(Expression::Sequence(SequenceExpression {
            data: NodeData::new(SyntaxKind::SequenceExpression, pos, self.last_token_end()),
            expressions: self.alloc_list(expressions),
        }))
    }

    pub(crate) fn parse_expression_and_alloc(&mut self, no_in: bool) -> ParseResult<&'a Expression<'a>> {
        let expression = self.parse_sequence_expression(no_in)?;
        Ok(self.alloc(expression))
    }

    pub(crate) fn parse_assignment_expression(&mut self, no_in: bool) -> ParseResult<Expression<'a>> {
        self.parse_assignment_expression_cover(no_in, false)
    }

    /// With `allow_cover`, an array or object literal containing `{a = 1}`
    /// shorthand initializers is returned flagged instead of rejected; the
    /// caller decides whether it turns into a pattern.
    pub(crate) fn parse_assignment_expression_cover(
        &mut self,
        no_in: bool,
        allow_cover: bool,
    ) -> ParseResult<Expression<'a>> {
        self.with_recursion(|p| p.parse_assignment_expression_worker(no_in, allow_cover))
    }

    fn parse_assignment_expression_worker(&mut self, no_in: bool, allow_cover: bool) -> ParseResult<Expression<'a>> {
        if self.current_token() == SyntaxKind::YieldKeyword && self.in_generator() {
            return self.parse_yield_expression(no_in);
        }
        let pos = self.token_pos();
        let expression = self.parse_conditional_expression(no_in)?;
        if is_bare_arrow(&expression, pos) {
            return Ok(expression);
        }
        let operator = self.current_token();
        if operator.is_assignment_operator() {
            return self.parse_assignment_rest(pos, expression, operator, no_in);
        }
        if !allow_cover {
            self.reject_cover(&expression)?;
        }
        Ok(expression)
    }

    fn parse_assignment_rest(
        &mut self,
        pos: u32,
        target: Expression<'a>,
        operator: SyntaxKind,
        no_in: bool,
    ) -> ParseResult<Expression<'a>> {
        let target = if operator == SyntaxKind::EqualsToken {
            self.to_assignment_target(target)?
        } else {
            if !is_simple_assignment_target(&target) {
                let range = target.range();
                return Err(self.error_at(range.pos, range.end, &messages::INVALID_ASSIGNMENT_TARGET, &[]));
            }
            self.check_assignment_identifier(&target)?;
            target
        };
        let (op_pos, op_end) = (self.token_pos(), self.token_end());
        if operator.is_logical_assignment() {
            self.require_version(EcmaVersion::Es2021, "Logical assignment", op_pos, op_end);
        } else if operator == SyntaxKind::AsteriskAsteriskEqualsToken {
            self.require_version(EcmaVersion::Es2016, "**=", op_pos, op_end);
        }
        self.next_token();

        let value = match inferred_name(&target) {
            Some(name) => self.with_default_name(name, |p| p.parse_assignment_expression(no_in))?,
            None => self.parse_assignment_expression(no_in)?,
        };
        Ok(Expression::Assignment(AssignmentExpression {
            data: NodeData::new(SyntaxKind::AssignmentExpression, pos, self.last_token_end()),
            operator,
            target: self.alloc(target),
            value: self.alloc(value),
        }))
    }

    /// Validate the left side of `=`, converting array and object literals
    /// to assignment patterns.
    pub(crate) fn to_assignment_target(&mut self, mut target: Expression<'a>) -> ParseResult<Expression<'a>> {
        let range = target.range();
        match &target {
            Expression::Identifier(_) => {
                self.check_assignment_identifier(&target)?;
                Ok(target)
            }
            Expression::PropertyAccess(_) | Expression::ElementAccess(_)
                if !target.data().flags.contains(NodeFlags::OPTIONAL_CHAIN) =>
            {
                Ok(target)
            }
            Expression::ArrayLiteral(_) | Expression::ObjectLiteral(_) if !target.is_parenthesized() => {
                self.require_version(EcmaVersion::Es2015, "Destructuring assignment", range.pos, range.end);
                self.verify_assignment_pattern(&target)?;
                if let Some(data) = target.data_mut() {
                    data.flags |= NodeFlags::DESTRUCTURING;
                }
                Ok(target)
            }
            _ => Err(self.error_at(range.pos, range.end, &messages::INVALID_ASSIGNMENT_TARGET, &[])),
        }
    }

    /// `eval` and `arguments` cannot be assigned in strict mode.
    pub(crate) fn check_assignment_identifier(&self, target: &Expression<'a>) -> ParseResult<()> {
        match target {
            Expression::Identifier(id) if self.is_strict() && (id.is("eval") || id.is("arguments")) => Err(
                self.error_at(id.data.pos(), id.data.end(), &messages::INVALID_USE_OF_0_IN_STRICT_MODE, &[id.name]),
            ),
            _ => Ok(()),
        }
    }

    pub(crate) fn reject_cover(&self, expression: &Expression<'a>) -> ParseResult<()> {
        if expression.data().flags.contains(NodeFlags::COVER_INITIALIZED_NAME) {
            let range = expression.range();
            return Err(self.error_at(range.pos, range.end, &messages::INVALID_SHORTHAND_INITIALIZER, &[]));
        }
        Ok(())
    }

    fn parse_yield_expression(&mut self, no_in: bool) -> ParseResult<Expression<'a>> {
        if self.in_parameters() {
            return Err(self.error(&messages::YIELD_IN_PARAMETER_INITIALIZER, &[]));
        }
        let pos = self.token_pos();
        self.next_token();
        let mut flags = NodeFlags::NONE;
        let mut expression = None;
        if !self.has_preceding_line_break() {
            if self.optional_token(SyntaxKind::AsteriskToken) {
                flags |= NodeFlags::DELEGATE;
                let operand = self.parse_assignment_expression(no_in)?;
                expression = Some(self.alloc(operand));
            } else if can_start_expression(self.current_token()) {
                let operand = self.parse_assignment_expression(no_in)?;
                expression = Some(self.alloc(operand));
            }
        }
        Ok(Expression::Yield(YieldExpression {
            data: NodeData::new(SyntaxKind::YieldExpression, pos, self.last_token_end()).with_flags(flags),
            expression,
        }))
    }

    // ========================================================================
    // Conditional and binary
    // ========================================================================

    fn parse_conditional_expression(&mut self, no_in: bool) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let condition = self.parse_binary_expression(OperatorPrecedence::Lowest, no_in)?;
        if is_bare_arrow(&condition, pos) || self.current_token() != SyntaxKind::QuestionToken {
            return Ok(condition);
        }
        self.reject_cover(&condition)?;
        self.next_token();
        // `in` is always allowed between `?` and `:`.
        let when_true = self.parse_assignment_expression(false)?;
        self.expect_token(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression(no_in)?;
        Ok(Expression::Conditional(ConditionalExpression {
            data: NodeData::new(SyntaxKind::ConditionalExpression, pos, self.last_token_end()),
            condition: self.alloc(condition),
            when_true: self.join(when_true),
            when_false: self.join(when_false),
        }))
    }

    /// Precedence climbing over binary and logical operators. Only
    /// operators binding tighter than `min` are consumed.
    fn parse_binary_expression(&mut self, min: OperatorPrecedence, no_in: bool) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression()?;
        if is_bare_arrow(&left, pos) {
            return Ok(left);
        }
        loop {
            let operator = self.current_token();
            let precedence = get_binary_operator_precedence(operator, no_in);
            if precedence == OperatorPrecedence::Invalid || precedence <= min {
                break;
            }
            let (op_pos, op_end) = (self.token_pos(), self.token_end());
            match operator {
                SyntaxKind::AsteriskAsteriskToken => {
                    self.require_version(EcmaVersion::Es2016, "**", op_pos, op_end);
                    self.check_exponentiation_base(&left)?;
                }
                SyntaxKind::QuestionQuestionToken => {
                    self.require_version(EcmaVersion::Es2020, "??", op_pos, op_end);
                }
                _ => {}
            }
            self.reject_cover(&left)?;
            self.next_token();

            // `**` is right-associative: its right side may hold another `**`.
            let right_min = if precedence.is_right_associative() {
                OperatorPrecedence::Multiplicative
            } else {
                precedence
            };
            let right_pos = self.token_pos();
            let right = self.parse_binary_expression(right_min, no_in)?;
            if is_bare_arrow(&right, right_pos) {
                return Err(self.error_at(right_pos, right.range().end, &messages::EXPRESSION_EXPECTED, &[]));
            }
            self.reject_cover(&right)?;

            let end = self.last_token_end();
            left = if operator.is_logical_operator() {
                self.check_nullish_mixing(operator, &left, &right)?;
                Expression::Logical(LogicalExpression {
                    data: NodeData::new(SyntaxKind::LogicalExpression, pos, end),
                    left: self.join(left),
                    operator,
                    right: self.join(right),
                })
            } else {
                Expression::Binary(BinaryExpression {
                    data: NodeData::new(SyntaxKind::BinaryExpression, pos, end),
                    left: self.alloc(left),
                    operator,
                    right: self.alloc(right),
                })
            };
        }
        Ok(left)
    }

    /// `-x ** y` is ambiguous and rejected; `(-x) ** y` is fine.
    fn check_exponentiation_base(&self, base: &Expression<'a>) -> ParseResult<()> {
        if base.is_parenthesized() {
            return Ok(());
        }
        let operator = match base {
            Expression::PrefixUnary(unary)
                if !matches!(unary.operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) =>
            {
                operator_text(unary.operator)
            }
            Expression::Await(_) => "await",
            _ => return Ok(()),
        };
        let range = base.range();
        Err(self.error_at(
            range.pos,
            range.end,
            &messages::UNARY_EXPRESSION_NOT_ALLOWED_BEFORE_EXPONENTIATION,
            &[operator],
        ))
    }

    fn check_nullish_mixing(
        &self,
        operator: SyntaxKind,
        left: &Expression<'a>,
        right: &Expression<'a>,
    ) -> ParseResult<()> {
        let is_nullish = operator == SyntaxKind::QuestionQuestionToken;
        for operand in [left, right] {
            let Expression::Logical(inner) = operand else {
                continue;
            };
            if operand.is_parenthesized() {
                continue;
            }
            let inner_nullish = inner.operator == SyntaxKind::QuestionQuestionToken;
            if is_nullish != inner_nullish {
                let other = if is_nullish { inner.operator } else { operator };
                let range = operand.range();
                return Err(self.error_at(
                    range.pos,
                    range.end,
                    &messages::_0_AND_NULLISH_CANNOT_BE_MIXED_WITHOUT_PARENTHESES,
                    &[operator_text(other)],
                ));
            }
        }
        Ok(())
    }

    /// Wrap `expression` as one predecessor of a control-flow join.
    pub(crate) fn join(&self, expression: Expression<'a>) -> &'a Expression<'a> {
        let expression = self.alloc(expression);
        self.join_ref(expression)
    }

    pub(crate) fn join_ref(&self, expression: &'a Expression<'a>) -> &'a Expression<'a> {
        let range = expression.range();
        self.alloc(Expression::JoinPredecessor(JoinPredecessorExpression {
            data: NodeData::new(SyntaxKind::JoinPredecessorExpression, range.pos, range.end),
            expression: Some(expression),
        }))
    }

    /// A join predecessor for an omitted `for` test or update.
    pub(crate) fn empty_join(&self, pos: u32) -> &'a Expression<'a> {
        self.alloc(Expression::JoinPredecessor(JoinPredecessorExpression {
            data: NodeData::new(SyntaxKind::JoinPredecessorExpression, pos, pos),
            expression: None,
        }))
    }

    // ========================================================================
    // Unary and update
    // ========================================================================

    fn parse_unary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let operator = self.current_token();
        match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword => {
                self.next_token();
                let operand_pos = self.token_pos();
                let operand = self.with_recursion(|p| p.parse_unary_expression())?;
                if is_bare_arrow(&operand, operand_pos) {
                    return Err(self.error_at(operand_pos, operand.range().end, &messages::EXPRESSION_EXPECTED, &[]));
                }
                self.reject_cover(&operand)?;
                let end = self.last_token_end();
                if operator == SyntaxKind::DeleteKeyword
                    && self.is_strict()
                    && matches!(operand, Expression::Identifier(_))
                {
                    self.report_at(pos, end, &messages::DELETE_OF_IDENTIFIER_IN_STRICT_MODE, &[]);
                }
                Ok(Expression::PrefixUnary(PrefixUnaryExpression {
                    data: NodeData::new(SyntaxKind::PrefixUnaryExpression, pos, end),
                    operator,
                    operand: self.alloc(operand),
                }))
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token();
                let operand = self.with_recursion(|p| p.parse_unary_expression())?;
                self.check_update_operand(&operand)?;
                Ok(Expression::PrefixUnary(PrefixUnaryExpression {
                    data: NodeData::new(SyntaxKind::PrefixUnaryExpression, pos, self.last_token_end()),
                    operator,
                    operand: self.alloc(operand),
                }))
            }
            SyntaxKind::AwaitKeyword if self.await_is_keyword() => self.parse_await_expression(),
            _ => self.parse_postfix_expression(),
        }
    }

    fn check_update_operand(&self, operand: &Expression<'a>) -> ParseResult<()> {
        if !is_simple_assignment_target(operand) {
            let range = operand.range();
            return Err(self.error_at(range.pos, range.end, &messages::INVALID_INCREMENT_OPERAND, &[]));
        }
        self.check_assignment_identifier(operand)
    }

    fn parse_await_expression(&mut self) -> ParseResult<Expression<'a>> {
        if self.in_parameters() {
            return Err(self.error(&messages::AWAIT_IN_PARAMETER_INITIALIZER, &[]));
        }
        if !self.can_await() {
            return Err(self.error(&messages::AWAIT_OUTSIDE_ASYNC, &[]));
        }
        let pos = self.token_pos();
        self.next_token();
        let operand = self.with_recursion(|p| p.parse_unary_expression())?;
        self.reject_cover(&operand)?;
        Ok(Expression::Await(AwaitExpression {
            data: NodeData::new(SyntaxKind::AwaitExpression, pos, self.last_token_end()),
            expression: self.alloc(operand),
        }))
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression()?;
        if is_bare_arrow(&expression, pos) {
            return Ok(expression);
        }
        let operator = self.current_token();
        if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            self.check_update_operand(&expression)?;
            self.next_token();
            return Ok(Expression::PostfixUnary(PostfixUnaryExpression {
                data: NodeData::new(SyntaxKind::PostfixUnaryExpression, pos, self.last_token_end()),
                operator,
                operand: self.alloc(expression),
            }));
        }
        Ok(expression)
    }

    // ========================================================================
    // Member and call chains
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let expression = match self.current_token() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => self.parse_super_expression()?,
            _ => self.parse_primary_expression()?,
        };
        if is_bare_arrow(&expression, pos) {
            return Ok(expression);
        }
        self.parse_member_tail(pos, expression, true)
    }

    /// Property accesses, element accesses, tagged templates and, with
    /// `allow_calls`, calls and optional chains following `expression`.
    fn parse_member_tail(
        &mut self,
        pos: u32,
        mut expression: Expression<'a>,
        allow_calls: bool,
    ) -> ParseResult<Expression<'a>> {
        let mut in_chain = false;
        loop {
            let chain = if in_chain { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.reject_cover(&expression)?;
                    self.next_token();
                    let name = self.parse_identifier_name()?;
                    expression = Expression::PropertyAccess(PropertyAccessExpression {
                        data: NodeData::new(SyntaxKind::PropertyAccessExpression, pos, name.data.end())
                            .with_flags(chain),
                        object: self.alloc(expression),
                        name,
                    });
                }
                SyntaxKind::QuestionDotToken => {
                    if !allow_calls {
                        return Err(self.error(&messages::OPTIONAL_CHAIN_NOT_ALLOWED_IN_NEW_EXPRESSION, &[]));
                    }
                    let (op_pos, op_end) = (self.token_pos(), self.token_end());
                    self.require_version(EcmaVersion::Es2020, "?.", op_pos, op_end);
                    self.reject_cover(&expression)?;
                    self.next_token();
                    in_chain = true;
                    let flags = NodeFlags::OPTIONAL_CHAIN | NodeFlags::OPTIONAL;
                    expression = match self.current_token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments()?;
                            Expression::Call(CallExpression {
                                data: NodeData::new(SyntaxKind::CallExpression, pos, self.last_token_end())
                                    .with_flags(flags),
                                callee: self.alloc(expression),
                                arguments,
                            })
                        }
                        SyntaxKind::OpenBracketToken => {
                            self.next_token();
                            let index = self.parse_expression_and_alloc(false)?;
                            self.expect_token(SyntaxKind::CloseBracketToken)?;
                            Expression::ElementAccess(ElementAccessExpression {
                                data: NodeData::new(SyntaxKind::ElementAccessExpression, pos, self.last_token_end())
                                    .with_flags(flags),
                                object: self.alloc(expression),
                                index,
                            })
                        }
                        SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                            return Err(self.error(
                                &messages::TAGGED_TEMPLATE_EXPRESSIONS_NOT_PERMITTED_IN_OPTIONAL_CHAIN,
                                &[],
                            ));
                        }
                        _ => {
                            let name = self.parse_identifier_name()?;
                            Expression::PropertyAccess(PropertyAccessExpression {
                                data: NodeData::new(SyntaxKind::PropertyAccessExpression, pos, name.data.end())
                                    .with_flags(flags),
                                object: self.alloc(expression),
                                name,
                            })
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    self.reject_cover(&expression)?;
                    self.next_token();
                    let index = self.parse_expression_and_alloc(false)?;
                    self.expect_token(SyntaxKind::CloseBracketToken)?;
                    expression = Expression::ElementAccess(ElementAccessExpression {
                        data: NodeData::new(SyntaxKind::ElementAccessExpression, pos, self.last_token_end())
                            .with_flags(chain),
                        object: self.alloc(expression),
                        index,
                    });
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    // `1\n(x)` is two statements: a literal is never called.
                    if self.has_preceding_line_break() && is_uncallable_literal(&expression) {
                        break;
                    }
                    self.reject_cover(&expression)?;
                    let mut flags = chain;
                    if !in_chain && expression.is_identifier_named("eval") {
                        flags |= NodeFlags::DIRECT_EVAL;
                        self.context.mark_eval();
                    }
                    let arguments = self.parse_arguments()?;
                    expression = Expression::Call(CallExpression {
                        data: NodeData::new(SyntaxKind::CallExpression, pos, self.last_token_end()).with_flags(flags),
                        callee: self.alloc(expression),
                        arguments,
                    });
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    if in_chain {
                        return Err(self.error(
                            &messages::TAGGED_TEMPLATE_EXPRESSIONS_NOT_PERMITTED_IN_OPTIONAL_CHAIN,
                            &[],
                        ));
                    }
                    self.reject_cover(&expression)?;
                    let template = self.parse_template_literal(true)?;
                    expression = Expression::TaggedTemplate(TaggedTemplateExpression {
                        data: NodeData::new(SyntaxKind::TaggedTemplateExpression, pos, self.last_token_end()),
                        tag: self.alloc(expression),
                        template: self.alloc(template),
                    });
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    pub(crate) fn parse_arguments(&mut self) -> ParseResult<&'a [Expression<'a>]> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let mut arguments = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken {
            if self.current_token() == SyntaxKind::DotDotDotToken {
                arguments.push(self.parse_spread_element()?);
            } else {
                arguments.push(self.parse_assignment_expression(false)?);
            }
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken)?;
        Ok(self.alloc_list(arguments))
    }

    fn parse_spread_element(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        self.require_version(EcmaVersion::Es2015, "Spread", pos, self.token_end());
        self.next_token();
        let expression = self.parse_assignment_expression(false)?;
        Ok(Expression::Spread(SpreadElement {
            data: NodeData::new(SyntaxKind::SpreadElement, pos, self.last_token_end()),
            expression: self.alloc(expression),
        }))
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        self.next_token();
        if self.optional_token(SyntaxKind::DotToken) {
            if self.current_token() != SyntaxKind::TargetKeyword {
                let text = self.source_slice(self.token_pos(), self.token_end());
                return Err(self.error(&messages::_0_IS_NOT_A_VALID_META_PROPERTY_FOR_NEW, &[text]));
            }
            let end = self.token_end();
            self.require_version(EcmaVersion::Es2015, "new.target", pos, end);
            let in_function = self
                .context
                .nearest_non_arrow_function()
                .is_some_and(|f| !f.kind.is_program());
            if !in_function {
                return Err(self.error_at(pos, end, &messages::NEW_TARGET_OUTSIDE_FUNCTION, &[]));
            }
            self.next_token();
            self.context.mark_new_target();
            return Ok(Expression::NewTarget(NodeData::new(SyntaxKind::MetaProperty, pos, end)));
        }

        let callee_pos = self.token_pos();
        let callee = match self.current_token() {
            SyntaxKind::NewKeyword => self.with_recursion(|p| p.parse_new_expression())?,
            SyntaxKind::SuperKeyword => self.parse_super_expression()?,
            _ => self.parse_primary_expression()?,
        };
        if is_bare_arrow(&callee, callee_pos) {
            return Err(self.error_at(callee_pos, callee.range().end, &messages::EXPRESSION_EXPECTED, &[]));
        }
        let callee = self.parse_member_tail(callee_pos, callee, false)?;
        let arguments = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(Expression::New(NewExpression {
            data: NodeData::new(SyntaxKind::NewExpression, pos, self.last_token_end()),
            callee: self.alloc(callee),
            arguments,
        }))
    }

    /// `super` must be followed by a call (derived constructors) or a
    /// member access (methods).
    fn parse_super_expression(&mut self) -> ParseResult<Expression<'a>> {
        let (pos, end) = (self.token_pos(), self.token_end());
        self.next_token();
        let owner = self.context.nearest_non_arrow_function().map(|f| f.flags);
        match self.current_token() {
            SyntaxKind::OpenParenToken => {
                if !owner.is_some_and(|f| f.contains(FunctionFlags::IS_SUBCLASS_CONSTRUCTOR)) {
                    return Err(self.error_at(pos, end, &messages::SUPER_CALL_OUTSIDE_DERIVED_CONSTRUCTOR, &[]));
                }
                self.context.mark_super_call();
                self.context.mark_this();
            }
            SyntaxKind::DotToken | SyntaxKind::OpenBracketToken => {
                let allowed = owner.is_some_and(|f| {
                    f.intersects(FunctionFlags::IS_METHOD | FunctionFlags::IS_CLASS_CONSTRUCTOR)
                });
                if !allowed {
                    return Err(self.error_at(pos, end, &messages::SUPER_PROPERTY_OUTSIDE_METHOD, &[]));
                }
                self.context.mark_super();
                self.context.mark_this();
            }
            _ => {
                return Err(self.error_at(pos, end, &messages::SUPER_MUST_BE_FOLLOWED_BY_ARGUMENTS_OR_MEMBER_ACCESS, &[]));
            }
        }
        Ok(Expression::SuperKeyword(NodeData::new(SyntaxKind::SuperKeyword, pos, end)))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let end = self.token_end();
        match self.current_token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                self.context.mark_this();
                Ok(Expression::ThisKeyword(NodeData::new(SyntaxKind::ThisKeyword, pos, end)))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Ok(Expression::NullLiteral(NodeData::new(SyntaxKind::NullKeyword, pos, end)))
            }
            kind @ (SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword) => {
                self.next_token();
                Ok(Expression::BooleanLiteral(BooleanLiteral {
                    data: NodeData::new(kind, pos, end),
                    value: kind == SyntaxKind::TrueKeyword,
                }))
            }
            SyntaxKind::NumericLiteral => Ok(Expression::NumericLiteral(self.parse_numeric_literal())),
            SyntaxKind::BigIntLiteral => Ok(Expression::BigIntLiteral(self.parse_bigint_literal())),
            SyntaxKind::StringLiteral => Ok(Expression::StringLiteral(self.parse_string_literal())),
            SyntaxKind::RegularExpressionLiteral => Ok(self.parse_regular_expression_literal()),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                if self.tokens.rescan_slash_as_regex() {
                    Ok(self.parse_regular_expression_literal())
                } else {
                    Err(self.error(&messages::EXPRESSION_EXPECTED, &[]))
                }
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                Ok(Expression::TemplateLiteral(self.parse_template_literal(false)?))
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression_or_arrow(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                let function = self.parse_function(pos, false, FunctionContext::Expression)?;
                Ok(Expression::FunctionExpression(function))
            }
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class(pos, FunctionContext::Expression)?;
                Ok(Expression::ClassExpression(class))
            }
            SyntaxKind::AsyncKeyword => self.parse_async_primary(),
            _ if self.is_identifier_token() => {
                if self.peek_kind(1) == SyntaxKind::EqualsGreaterThanToken && !self.peek_has_line_break(1) {
                    let parameter = self.parse_identifier()?;
                    return self.parse_arrow_function(pos, ArrowHead::Identifier(parameter), false);
                }
                let id = self.parse_identifier()?;
                if id.is("arguments") {
                    self.context.mark_arguments();
                }
                Ok(Expression::Identifier(id))
            }
            _ => Err(self.unexpected_or_expected_expression()),
        }
    }

    fn unexpected_or_expected_expression(&self) -> crate::error::ParseError {
        let kind = self.current_token();
        if kind.is_keyword() {
            let text = self.source_slice(self.token_pos(), self.token_end());
            if kind.is_future_reserved_word() {
                return self.error(&messages::_0_IS_A_RESERVED_WORD_IN_STRICT_MODE, &[text]);
            }
            return self.error(&messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE, &[text]);
        }
        if kind == SyntaxKind::EndOfFileToken {
            return self.unexpected_token();
        }
        self.error(&messages::EXPRESSION_EXPECTED, &[])
    }

    /// `async function`, `async x => ...`, `async (...) => ...`, a call of
    /// a function named `async`, or the identifier itself.
    fn parse_async_primary(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let next = self.peek_kind(1);
        let line_break = self.peek_has_line_break(1);

        if !line_break && next == SyntaxKind::FunctionKeyword {
            self.require_version(EcmaVersion::Es2017, "async function", pos, self.token_end());
            self.next_token();
            let function = self.parse_function(pos, true, FunctionContext::Expression)?;
            return Ok(Expression::FunctionExpression(function));
        }
        let next_is_name = next == SyntaxKind::Identifier || next.is_contextual_keyword() || next.is_future_reserved_word();
        if !line_break
            && next_is_name
            && self.peek_kind(2) == SyntaxKind::EqualsGreaterThanToken
            && !self.peek_has_line_break(2)
        {
            self.require_version(EcmaVersion::Es2017, "async arrow function", pos, self.token_end());
            self.next_token();
            let parameter = self.parse_identifier()?;
            if parameter.is("await") {
                return Err(self.error_at(
                    parameter.data.pos(),
                    parameter.data.end(),
                    &messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE,
                    &["await"],
                ));
            }
            return self.parse_arrow_function(pos, ArrowHead::Identifier(parameter), true);
        }
        let id = self.parse_identifier()?;
        if line_break || self.current_token() != SyntaxKind::OpenParenToken {
            return Ok(Expression::Identifier(id));
        }

        let (items, _) = self.parse_cover_parenthesized_items(true)?;
        if self.current_token() == SyntaxKind::EqualsGreaterThanToken && !self.has_preceding_line_break() {
            self.require_version(EcmaVersion::Es2017, "async arrow function", pos, id.data.end());
            return self.parse_arrow_function(pos, ArrowHead::Parenthesized(items), true);
        }
        for item in &items {
            self.reject_cover(item)?;
        }
        Ok(Expression::Call(CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, pos, self.last_token_end()),
            callee: self.alloc(Expression::Identifier(id)),
            arguments: self.alloc_list(items),
        }))
    }

    fn parse_parenthesized_expression_or_arrow(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        let (mut items, trailing_comma) = self.parse_cover_parenthesized_items(false)?;
        if self.current_token() == SyntaxKind::EqualsGreaterThanToken {
            if self.has_preceding_line_break() {
                return Err(self.error(&messages::LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW, &[]));
            }
            return self.parse_arrow_function(pos, ArrowHead::Parenthesized(items), false);
        }

        let end = self.last_token_end();
        let has_rest = items.iter().any(|e| matches!(e, Expression::Spread(_)));
        if items.is_empty() || trailing_comma || has_rest {
            return Err(self.error_at(pos, end, &messages::EXPRESSION_EXPECTED, &[]));
        }
        for item in &items {
            self.reject_cover(item)?;
        }
        let mut expression = if items.len() == 1 {
            match items.pop() {
                Some(item) => item,
                None => return Err(crate::error::ParseError::Internal("empty parenthesized list")),
            }
        } else {
            let first = items[0].range().pos;
            let last = items[items.len() - 1].range().end;
            Expression::Sequence(SequenceExpression {
                data: NodeData::new(SyntaxKind::SequenceExpression, first, last),
                expressions: self.alloc_list(items),
            })
        };
        if let Some(data) = expression.data_mut() {
            data.flags |= NodeFlags::PARENTHESIZED;
        }
        Ok(expression)
    }

    /// `( items )` where the items may turn out to be arrow parameters:
    /// cover-initialized names are kept, and a trailing `...rest` and a
    /// trailing comma are accepted. With `as_arguments`, spreads may appear
    /// anywhere because the list may also be a call's arguments.
    fn parse_cover_parenthesized_items(
        &mut self,
        as_arguments: bool,
    ) -> ParseResult<(Vec<Expression<'a>>, bool)> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        while self.current_token() != SyntaxKind::CloseParenToken {
            if self.current_token() == SyntaxKind::DotDotDotToken {
                let pos = self.token_pos();
                self.next_token();
                let target = self.parse_assignment_expression_cover(false, true)?;
                items.push(Expression::Spread(SpreadElement {
                    data: NodeData::new(SyntaxKind::SpreadElement, pos, self.last_token_end()),
                    expression: self.alloc(target),
                }));
                if !as_arguments && self.current_token() == SyntaxKind::CommaToken {
                    return Err(self.error(&messages::REST_PARAMETER_MUST_BE_LAST, &[]));
                }
            } else {
                items.push(self.parse_assignment_expression_cover(false, true)?);
            }
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
            if self.current_token() == SyntaxKind::CloseParenToken {
                trailing_comma = true;
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken)?;
        Ok((items, trailing_comma))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub(crate) fn parse_numeric_literal(&mut self) -> NumericLiteral<'a> {
        let (pos, end, flags) = (self.token_pos(), self.token_end(), self.token_flags());
        if flags.contains(TokenFlags::OCTAL) && self.is_strict() {
            self.report_at(pos, end, &messages::OCTAL_LITERALS_NOT_ALLOWED_IN_STRICT_MODE, &[]);
        }
        let raw = self.source_slice(pos, end);
        self.next_token();
        NumericLiteral {
            data: NodeData::new(SyntaxKind::NumericLiteral, pos, end),
            value: numeric_value(raw, flags),
            raw,
            numeric_literal_flags: flags & TokenFlags::NUMERIC_LITERAL_FLAGS,
        }
    }

    pub(crate) fn parse_bigint_literal(&mut self) -> BigIntLiteral<'a> {
        let (pos, end) = (self.token_pos(), self.token_end());
        self.require_version(EcmaVersion::Es2020, "BigInt literal", pos, end);
        let raw = self.source_slice(pos, end);
        self.next_token();
        BigIntLiteral {
            data: NodeData::new(SyntaxKind::BigIntLiteral, pos, end),
            raw,
        }
    }

    pub(crate) fn parse_string_literal(&mut self) -> StringLiteral<'a> {
        let (pos, end, flags) = (self.token_pos(), self.token_end(), self.token_flags());
        if flags.contains(TokenFlags::OCTAL_ESCAPE) && self.is_strict() {
            self.report_at(pos, end, &messages::OCTAL_ESCAPE_SEQUENCES_NOT_ALLOWED_IN_STRICT_MODE, &[]);
        }
        let value = self.intern_value(self.token_value());
        self.next_token();
        StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, pos, end),
            value,
            raw: self.source_slice(pos, end),
        }
    }

    fn parse_regular_expression_literal(&mut self) -> Expression<'a> {
        let (pos, end) = (self.token_pos(), self.token_end());
        let (pattern, flags) = split_regex(self.source_slice(pos, end));
        self.next_token();
        Expression::RegularExpressionLiteral(RegularExpressionLiteral {
            data: NodeData::new(SyntaxKind::RegularExpressionLiteral, pos, end),
            pattern,
            flags,
        })
    }

    /// A template literal. Invalid escapes leave the cooked value absent,
    /// which is only legal when the template is tagged.
    pub(crate) fn parse_template_literal(&mut self, tagged: bool) -> ParseResult<TemplateLiteral<'a>> {
        let pos = self.token_pos();
        self.require_version(EcmaVersion::Es2015, "Template literal", pos, self.token_end());
        let head = self.current_token();
        let mut quasis = vec![self.parse_template_element(tagged)];
        let mut expressions = Vec::new();
        if head == SyntaxKind::TemplateHead {
            loop {
                expressions.push(self.parse_sequence_expression(false)?);
                match self.current_token() {
                    SyntaxKind::TemplateMiddle => quasis.push(self.parse_template_element(tagged)),
                    SyntaxKind::TemplateTail => {
                        quasis.push(self.parse_template_element(tagged));
                        break;
                    }
                    _ => return Err(self.error(&messages::_0_EXPECTED, &["}"])),
                }
            }
        }
        Ok(TemplateLiteral {
            data: NodeData::new(SyntaxKind::TemplateExpression, pos, self.last_token_end()),
            quasis: self.alloc_list(quasis),
            expressions: self.alloc_list(expressions),
        })
    }

    fn parse_template_element(&mut self, tagged: bool) -> TemplateElement<'a> {
        let token = self.token();
        let (kind, start, end, flags) = (token.kind, token.start, token.end, token.flags);
        let (raw_start, raw_end) =
            template_raw_bounds(kind, start, end, flags.contains(TokenFlags::UNTERMINATED));
        let raw = match normalize_template_raw(self.source_slice(raw_start, raw_end)) {
            std::borrow::Cow::Borrowed(text) => text,
            std::borrow::Cow::Owned(text) => self.alloc_str(&text),
        };
        let cooked = if flags.contains(TokenFlags::CONTAINS_INVALID_ESCAPE) {
            if !tagged {
                self.report_at(start, end, &messages::INVALID_ESCAPE_IN_TEMPLATE, &[]);
            }
            None
        } else {
            Some(self.intern_value(self.token_value()))
        };
        self.next_token();
        TemplateElement {
            data: NodeData::new(SyntaxKind::TemplateElement, start, end),
            cooked,
            raw,
        }
    }

    pub(crate) fn parse_array_literal(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken)?;
        let mut elements = Vec::new();
        let mut flags = NodeFlags::NONE;
        loop {
            match self.current_token() {
                SyntaxKind::CloseBracketToken => break,
                SyntaxKind::CommaToken => {
                    let at = self.token_pos();
                    elements.push(Expression::Omitted(NodeData::new(SyntaxKind::OmittedExpression, at, at)));
                    self.next_token();
                    continue;
                }
                SyntaxKind::DotDotDotToken => {
                    let spread_pos = self.token_pos();
                    self.require_version(EcmaVersion::Es2015, "Spread", spread_pos, self.token_end());
                    self.next_token();
                    let argument = self.parse_assignment_expression_cover(false, true)?;
                    propagate_cover(&mut flags, &argument);
                    elements.push(Expression::Spread(SpreadElement {
                        data: NodeData::new(SyntaxKind::SpreadElement, spread_pos, self.last_token_end()),
                        expression: self.alloc(argument),
                    }));
                }
                _ => {
                    let element = self.parse_assignment_expression_cover(false, true)?;
                    propagate_cover(&mut flags, &element);
                    elements.push(element);
                }
            }
            if self.current_token() == SyntaxKind::CloseBracketToken {
                break;
            }
            self.expect_token(SyntaxKind::CommaToken)?;
            if self.current_token() == SyntaxKind::CloseBracketToken {
                flags |= NodeFlags::TRAILING_COMMA;
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken)?;
        Ok(Expression::ArrayLiteral(ArrayLiteralExpression {
            data: NodeData::new(SyntaxKind::ArrayLiteralExpression, pos, self.last_token_end()).with_flags(flags),
            elements: self.alloc_list(elements),
        }))
    }

    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Expression<'a>> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut properties = Vec::new();
        let mut last_named: FxHashMap<String, usize> = FxHashMap::default();
        let mut has_proto = false;
        let mut flags = NodeFlags::NONE;

        while self.current_token() != SyntaxKind::CloseBraceToken {
            let element = self.parse_object_literal_element(&mut flags)?;
            if let ObjectLiteralElement::PropertyAssignment(property) = &element {
                if !property.key.is_computed() && property.key.is_named("__proto__") {
                    if has_proto {
                        let data = property.key.data();
                        self.report_at(data.pos(), data.end(), &messages::DUPLICATE_PROTO_PROPERTY, &[]);
                    }
                    has_proto = true;
                }
            }
            let name = match &element {
                ObjectLiteralElement::Spread(_) => None,
                ObjectLiteralElement::ShorthandPropertyAssignment(s) => Some(s.name.name.to_string()),
                ObjectLiteralElement::PropertyAssignment(p) => p.key.static_name().map(|n| n.into_owned()),
                ObjectLiteralElement::Method(m) => m.key.static_name().map(|n| n.into_owned()),
                ObjectLiteralElement::Accessor(a) => a.key.static_name().map(|n| n.into_owned()),
            };
            push_object_element(&mut properties, &mut last_named, name, element);

            if self.current_token() == SyntaxKind::CloseBraceToken {
                break;
            }
            self.expect_token(SyntaxKind::CommaToken)?;
            if self.current_token() == SyntaxKind::CloseBraceToken {
                flags |= NodeFlags::TRAILING_COMMA;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        Ok(Expression::ObjectLiteral(ObjectLiteralExpression {
            data: NodeData::new(SyntaxKind::ObjectLiteralExpression, pos, self.last_token_end()).with_flags(flags),
            properties: self.alloc_list(properties),
        }))
    }

    fn parse_object_literal_element(&mut self, flags: &mut NodeFlags) -> ParseResult<ObjectLiteralElement<'a>> {
        let pos = self.token_pos();
        if self.current_token() == SyntaxKind::DotDotDotToken {
            self.require_version(EcmaVersion::Es2018, "Object spread", pos, self.token_end());
            self.next_token();
            let argument = self.parse_assignment_expression_cover(false, true)?;
            propagate_cover(flags, &argument);
            return Ok(ObjectLiteralElement::Spread(SpreadElement {
                data: NodeData::new(SyntaxKind::SpreadElement, pos, self.last_token_end()),
                expression: self.alloc(argument),
            }));
        }

        let modifiers = self.parse_method_modifiers()?;
        let key_kind = self.current_token();
        let key_escaped = self.token().has_escape();
        let key = self.parse_property_key()?;

        if let Some(kind) = modifiers.accessor {
            let function = self.parse_method(pos, &key, kind, false, FunctionFlags::NONE)?;
            let (getter, setter) = match kind {
                FunctionKind::Getter => (Some(function), None),
                _ => (None, Some(function)),
            };
            return Ok(ObjectLiteralElement::Accessor(AccessorProperty {
                data: NodeData::new(SyntaxKind::AccessorProperty, pos, self.last_token_end()),
                key,
                getter,
                setter,
                is_static: false,
            }));
        }
        if modifiers.is_async || modifiers.is_generator || self.current_token() == SyntaxKind::OpenParenToken {
            let kind = if modifiers.is_generator { FunctionKind::Generator } else { FunctionKind::Normal };
            let function = self.parse_method(pos, &key, kind, modifiers.is_async, FunctionFlags::NONE)?;
            return Ok(ObjectLiteralElement::Method(MethodDefinition {
                data: NodeData::new(SyntaxKind::MethodDefinition, pos, self.last_token_end()),
                key,
                function,
                is_static: false,
            }));
        }

        if self.optional_token(SyntaxKind::ColonToken) {
            let value = match key_name(&key) {
                Some(name) => self.with_default_name(name, |p| p.parse_assignment_expression_cover(false, true))?,
                None => self.parse_assignment_expression_cover(false, true)?,
            };
            propagate_cover(flags, &value);
            return Ok(ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                data: NodeData::new(SyntaxKind::PropertyAssignment, pos, self.last_token_end()),
                key,
                value: self.alloc(value),
            }));
        }

        // Shorthand `{a}` or, as a pattern only, `{a = 1}`.
        let PropertyKey::Identifier(name) = key else {
            return Err(self.error(&messages::_0_EXPECTED, &[":"]));
        };
        if !self.is_identifier_kind(key_kind) || (key_escaped && self.is_escaped_keyword(name.name)) {
            return Err(self.error_at(
                name.data.pos(),
                name.data.end(),
                &messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE,
                &[name.name],
            ));
        }
        if name.is("arguments") {
            self.context.mark_arguments();
        }
        if self.current_token() == SyntaxKind::EqualsToken {
            self.next_token();
            let initializer = self.with_default_name(name.name, |p| p.parse_assignment_expression(false))?;
            *flags |= NodeFlags::COVER_INITIALIZED_NAME;
            return Ok(ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
                data: NodeData::new(SyntaxKind::ShorthandPropertyAssignment, pos, self.last_token_end())
                    .with_flags(NodeFlags::COVER_INITIALIZED_NAME),
                name,
                initializer: Some(self.alloc(initializer)),
            }));
        }
        Ok(ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
            data: NodeData::new(SyntaxKind::ShorthandPropertyAssignment, pos, self.last_token_end()),
            name,
            initializer: None,
        }))
    }

    /// A property name: identifier name, string, number or `[computed]`.
    pub(crate) fn parse_property_key(&mut self) -> ParseResult<PropertyKey<'a>> {
        match self.current_token() {
            SyntaxKind::StringLiteral => Ok(PropertyKey::StringLiteral(self.parse_string_literal())),
            SyntaxKind::NumericLiteral => Ok(PropertyKey::NumericLiteral(self.parse_numeric_literal())),
            SyntaxKind::BigIntLiteral => Ok(PropertyKey::BigIntLiteral(self.parse_bigint_literal())),
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.require_version(EcmaVersion::Es2015, "Computed property name", pos, self.token_end());
                self.next_token();
                let expression = self.parse_assignment_expression(false)?;
                self.expect_token(SyntaxKind::CloseBracketToken)?;
                Ok(PropertyKey::Computed(ComputedPropertyName {
                    data: NodeData::new(SyntaxKind::ComputedPropertyName, pos, self.last_token_end()),
                    expression: self.alloc(expression),
                }))
            }
            kind if kind.is_identifier_name() => Ok(PropertyKey::Identifier(self.parse_identifier_name()?)),
            _ => Err(self.error(&messages::PROPERTY_ASSIGNMENT_EXPECTED, &[])),
        }
    }
}

/// Append an element. An accessor joins the element that last used its
/// name when that element is an accessor too. Every other repeated name is
/// kept as its own element.
pub(crate) fn push_object_element<'a>(
    properties: &mut Vec<ObjectLiteralElement<'a>>,
    last_named: &mut FxHashMap<String, usize>,
    name: Option<String>,
    element: ObjectLiteralElement<'a>,
) {
    let Some(name) = name else {
        properties.push(element);
        return;
    };
    if let ObjectLiteralElement::Accessor(incoming) = &element {
        if let Some(&index) = last_named.get(&name) {
            if let Some(ObjectLiteralElement::Accessor(existing)) = properties.get_mut(index) {
                if incoming.getter.is_some() {
                    existing.getter = incoming.getter;
                }
                if incoming.setter.is_some() {
                    existing.setter = incoming.setter;
                }
                return;
            }
        }
    }
    last_named.insert(name, properties.len());
    properties.push(element);
}
