//! Functions: declarations, expressions, arrows and methods.
//!
//! Every function gets a fresh [`FunctionFrame`] and its id in source order
//! of the function heads. Default values and destructured parameters are
//! lowered into a synthesized prologue at the top of the body, so the
//! parameter list itself only ever binds plain names.

use esparse_ast::module::ModuleRecord;
use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_ast::visitor::{walk_expression, Visitor};
use esparse_core::TextRange;
use esparse_diagnostics::messages;
use esparse_options::EcmaVersion;
use tracing::{debug, trace};

use crate::context::FunctionFrame;
use crate::error::{ParseError, ParseResult};
use crate::expressions::key_name;
use crate::parser::Parser;
use crate::patterns::BindingKind;
use crate::utilities::is_property_name_start;

/// Where a `function` keyword was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionContext {
    Declaration,
    Expression,
    /// `export default function`, where the name is optional.
    ExportDefault,
}

/// Everything [`Parser::finish_function`] needs besides the frame.
pub(crate) struct FunctionParts<'a> {
    pub pos: u32,
    pub end: u32,
    pub node_kind: SyntaxKind,
    pub ident: Option<Identifier<'a>>,
    pub name: &'a str,
    pub parameters: Vec<Parameter<'a>>,
    pub prologue: Vec<Statement<'a>>,
    pub statements: Vec<Statement<'a>>,
    pub body_range: TextRange,
    pub block_flags: BlockFlags,
    pub end_checkpoint: Checkpoint,
    pub module: Option<&'a ModuleRecord<'a>>,
    pub lazily_skipped: bool,
}

/// A parameter as written, before lowering.
pub(crate) struct ParsedParameter<'a> {
    pos: u32,
    end: u32,
    target: ParameterTarget<'a>,
    initializer: Option<&'a Expression<'a>>,
    rest: bool,
    bound_names: Vec<Identifier<'a>>,
}

enum ParameterTarget<'a> {
    Name(Identifier<'a>),
    Pattern(&'a Expression<'a>),
}

/// What came before the `=>` of an arrow function.
pub(crate) enum ArrowHead<'a> {
    Identifier(Identifier<'a>),
    Parenthesized(Vec<Expression<'a>>),
}

/// `async`, `*`, `get` and `set` in front of a method name.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MethodModifiers {
    pub is_async: bool,
    pub is_generator: bool,
    pub accessor: Option<FunctionKind>,
}

struct FunctionBody<'a> {
    statements: Vec<Statement<'a>>,
    block_flags: BlockFlags,
    range: TextRange,
    end_checkpoint: Checkpoint,
    lazily_skipped: bool,
}

/// Finds `yield` and `await` expressions outside nested functions.
#[derive(Default)]
struct SuspendFinder {
    found_yield: Option<TextRange>,
    found_await: Option<TextRange>,
}

impl<'a> Visitor<'a> for SuspendFinder {
    fn visit_function(&mut self, _function: &FunctionNode<'a>) {}

    fn visit_expression(&mut self, expression: &Expression<'a>) {
        match expression {
            Expression::Yield(y) if self.found_yield.is_none() => self.found_yield = Some(y.data.range),
            Expression::Await(a) if self.found_await.is_none() => self.found_await = Some(a.data.range),
            _ => {}
        }
        walk_expression(self, expression);
    }
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Function declarations and expressions
    // ========================================================================

    /// Parse `function [*] [name] (params) { body }`. `pos` is the start
    /// of the definition, which is the `async` keyword when there is one.
    pub(crate) fn parse_function(
        &mut self,
        pos: u32,
        is_async: bool,
        context: FunctionContext,
    ) -> ParseResult<&'a FunctionNode<'a>> {
        self.expect_token(SyntaxKind::FunctionKeyword)?;
        let mut is_generator = false;
        if self.current_token() == SyntaxKind::AsteriskToken {
            let (star_pos, star_end) = (self.token_pos(), self.token_end());
            if is_async {
                self.require_version(EcmaVersion::Es2018, "Async generator", star_pos, star_end);
            } else {
                self.require_version(EcmaVersion::Es2015, "Generator", star_pos, star_end);
            }
            self.next_token();
            is_generator = true;
        }

        let ident = match context {
            FunctionContext::Declaration => Some(self.parse_identifier()?),
            _ if self.current_token() == SyntaxKind::OpenParenToken => None,
            FunctionContext::ExportDefault => Some(self.parse_identifier()?),
            FunctionContext::Expression => {
                let id = self.parse_identifier()?;
                // The name of a function expression is bound inside it.
                if (is_generator && id.is("yield")) || (is_async && id.is("await")) {
                    return Err(self.error_at(
                        id.data.pos(),
                        id.data.end(),
                        &messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE,
                        &[id.name],
                    ));
                }
                Some(id)
            }
        };
        let is_declaration = context != FunctionContext::Expression;
        if let Some(id) = &ident {
            self.check_binding_identifier(id)?;
            if is_declaration {
                self.declare_function_name(id)?;
            }
        }

        let mut flags = self.current_function_flags() & FunctionFlags::STRICT;
        if is_declaration {
            flags |= FunctionFlags::IS_STATEMENT | FunctionFlags::IS_DECLARED;
        }
        if ident.is_none() {
            flags |= FunctionFlags::ANONYMOUS;
        }
        if is_async {
            flags |= FunctionFlags::IS_ASYNC;
        }
        let kind = if is_generator { FunctionKind::Generator } else { FunctionKind::Normal };
        let id = self.allocate_function_id();
        let mut frame = FunctionFrame::new(id, kind, flags);
        frame.default_name = self.default_name_at(pos);
        frame.binding_name = ident.map(|i| (i.name, i.data.range));

        let allow_concise = self.options.syntax_extensions;
        let ((parameters, prologue, body), frame) = self.with_function_frame(frame, |p| {
            let parsed = p.parse_formal_parameters()?;
            let (parameters, prologue) = p.assemble_parameters(parsed, false)?;
            let body = p.parse_function_body_block(id, allow_concise)?;
            Ok((parameters, prologue, body))
        })?;

        let node_kind = if is_declaration { SyntaxKind::FunctionDeclaration } else { SyntaxKind::FunctionExpression };
        Ok(self.finish_function(
            frame,
            FunctionParts {
                pos,
                end: body.range.end,
                node_kind,
                ident,
                name: ident.map_or("", |i| i.name),
                parameters,
                prologue,
                statements: body.statements,
                body_range: body.range,
                block_flags: body.block_flags,
                end_checkpoint: body.end_checkpoint,
                module: None,
                lazily_skipped: body.lazily_skipped,
            },
        ))
    }

    /// Bind a function declaration's name in the enclosing scope. At the top
    /// of a body it behaves like `var`; inside a block it is block scoped,
    /// and sloppy code may redeclare it.
    fn declare_function_name(&mut self, id: &Identifier<'a>) -> ParseResult<()> {
        let ok = if self.context.in_function_body_block() {
            self.context.declare_var(id.name)
        } else {
            self.context.declare_lexical(id.name) || !self.is_strict()
        };
        if !ok {
            return Err(self.error_at(
                id.data.pos(),
                id.data.end(),
                &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0,
                &[id.name],
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    fn set_in_parameters(&mut self, value: bool) {
        if let Some(func) = self.context.current_function_mut() {
            func.in_parameters = value;
        }
    }

    /// `( a, b = 1, [c, d], ...rest )`. Names are declared on the current
    /// function frame as they are parsed.
    pub(crate) fn parse_formal_parameters(&mut self) -> ParseResult<Vec<ParsedParameter<'a>>> {
        self.set_in_parameters(true);
        let result = self.parse_formal_parameter_list();
        self.set_in_parameters(false);
        result
    }

    fn parse_formal_parameter_list(&mut self) -> ParseResult<Vec<ParsedParameter<'a>>> {
        self.expect_token(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken {
            let pos = self.token_pos();
            let rest = self.current_token() == SyntaxKind::DotDotDotToken;
            if rest {
                self.require_version(EcmaVersion::Es2015, "Rest parameter", pos, self.token_end());
                self.next_token();
            }
            let target = self.parse_binding_target()?;

            let mut initializer = None;
            if self.current_token() == SyntaxKind::EqualsToken {
                if rest {
                    return Err(self.error(&messages::REST_ELEMENT_CANNOT_HAVE_INITIALIZER, &[]));
                }
                let (eq_pos, eq_end) = (self.token_pos(), self.token_end());
                self.require_version(EcmaVersion::Es2015, "Default parameter", eq_pos, eq_end);
                self.next_token();
                let value = match &target {
                    Expression::Identifier(id) => {
                        let name = id.name;
                        self.with_default_name(name, |p| p.parse_assignment_expression(false))?
                    }
                    _ => self.parse_assignment_expression(false)?,
                };
                initializer = Some(self.alloc(value));
            }

            let mut bound_names = Vec::new();
            self.verify_binding_pattern(&target, BindingKind::Parameter, &mut bound_names)?;
            let target = match target {
                Expression::Identifier(id) => ParameterTarget::Name(id),
                pattern => ParameterTarget::Pattern(self.alloc(pattern)),
            };
            parameters.push(ParsedParameter {
                pos,
                end: self.last_token_end(),
                target,
                initializer,
                rest,
                bound_names,
            });

            if rest && self.current_token() != SyntaxKind::CloseParenToken {
                return Err(self.error(&messages::REST_PARAMETER_MUST_BE_LAST, &[]));
            }
            let comma = (self.token_pos(), self.token_end());
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
            if self.current_token() == SyntaxKind::CloseParenToken {
                self.require_version(EcmaVersion::Es2017, "Trailing comma in parameter list", comma.0, comma.1);
            }
        }
        self.expect_token(SyntaxKind::CloseParenToken)?;
        Ok(parameters)
    }

    /// Lower parsed parameters into [`Parameter`] nodes and the prologue
    /// statements that apply defaults and destructuring.
    ///
    /// `p = d` becomes `p = (p === undefined) ? d : p`. A pattern binds the
    /// temporary `:paramN` and the prologue declares the pattern's names
    /// with `var` before assigning the temporary to the pattern.
    fn assemble_parameters(
        &mut self,
        parsed: Vec<ParsedParameter<'a>>,
        unique_names: bool,
    ) -> ParseResult<(Vec<Parameter<'a>>, Vec<Statement<'a>>)> {
        let non_simple = parsed
            .iter()
            .any(|p| p.rest || p.initializer.is_some() || matches!(p.target, ParameterTarget::Pattern(_)));
        let Some(func) = self.context.current_function_mut() else {
            return Err(ParseError::Internal("parameters outside a function"));
        };
        if non_simple {
            func.flags |= FunctionFlags::HAS_NON_SIMPLE_PARAMETERS;
        }
        let check_duplicates = unique_names
            || non_simple
            || func.is_strict()
            || func.is_arrow()
            || func.flags.contains(FunctionFlags::IS_METHOD);
        if check_duplicates {
            let bindings = &func.parameter_bindings;
            let duplicate = bindings
                .iter()
                .enumerate()
                .find(|(i, (name, _))| bindings[..*i].iter().any(|(other, _)| other == name))
                .map(|(_, binding)| *binding);
            if let Some((name, range)) = duplicate {
                return Err(self.error_at(range.pos, range.end, &messages::DUPLICATE_PARAMETER_NAME_0, &[name]));
            }
        }

        let mut parameters = Vec::with_capacity(parsed.len());
        let mut prologue = Vec::new();
        for (index, param) in parsed.into_iter().enumerate() {
            let data = NodeData::new(SyntaxKind::Parameter, param.pos, param.end);
            match param.target {
                ParameterTarget::Name(name) => {
                    if let Some(default) = param.initializer {
                        let target = self.alloc(Expression::Identifier(synthesized_identifier(name.name, param.pos)));
                        prologue.push(self.parameter_assignment(target, name.name, Some(default), param.pos));
                    }
                    parameters.push(Parameter {
                        data,
                        name,
                        pattern: None,
                        initializer: param.initializer,
                        rest: param.rest,
                    });
                }
                ParameterTarget::Pattern(pattern) => {
                    let temp = self.alloc_str(&format!(":param{index}"));
                    if !param.bound_names.is_empty() {
                        prologue.push(self.synthesized_var(&param.bound_names, param.pos));
                    }
                    prologue.push(self.parameter_assignment(pattern, temp, param.initializer, param.pos));
                    parameters.push(Parameter {
                        data,
                        name: synthesized_identifier(temp, param.pos),
                        pattern: Some(pattern),
                        initializer: param.initializer,
                        rest: param.rest,
                    });
                }
            }
        }
        Ok((parameters, prologue))
    }

    /// `target = source` or `target = (source === undefined) ? default : source`.
    fn parameter_assignment(
        &self,
        target: &'a Expression<'a>,
        source: &'a str,
        default: Option<&'a Expression<'a>>,
        pos: u32,
    ) -> Statement<'a> {
        let synthesized = |kind| NodeData::new(kind, pos, pos).with_flags(NodeFlags::SYNTHESIZED);
        let read = || Expression::Identifier(synthesized_identifier(source, pos));
        let value = match default {
            None => read(),
            Some(default) => {
                let condition = Expression::Binary(BinaryExpression {
                    data: synthesized(SyntaxKind::BinaryExpression),
                    left: self.alloc(read()),
                    operator: SyntaxKind::EqualsEqualsEqualsToken,
                    right: self.alloc(Expression::Identifier(synthesized_identifier("undefined", pos))),
                });
                Expression::Conditional(ConditionalExpression {
                    data: synthesized(SyntaxKind::ConditionalExpression),
                    condition: self.alloc(condition),
                    when_true: self.join_ref(default),
                    when_false: self.join(read()),
                })
            }
        };
        let assignment = Expression::Assignment(AssignmentExpression {
            data: synthesized(SyntaxKind::AssignmentExpression),
            operator: SyntaxKind::EqualsToken,
            target,
            value: self.alloc(value),
        });
        Statement::ExpressionStatement(ExpressionStatement {
            data: synthesized(SyntaxKind::ExpressionStatement),
            expression: self.alloc(assignment),
        })
    }

    /// `var a, b, c;` for the names bound by a parameter pattern.
    fn synthesized_var(&self, names: &[Identifier<'a>], pos: u32) -> Statement<'a> {
        let declarations: Vec<_> = names
            .iter()
            .map(|name| VariableDeclaration {
                data: NodeData::new(SyntaxKind::VariableDeclaration, pos, pos).with_flags(NodeFlags::SYNTHESIZED),
                target: self.alloc(Expression::Identifier(synthesized_identifier(name.name, pos))),
                initializer: None,
            })
            .collect();
        Statement::VariableStatement(VariableStatement {
            data: NodeData::new(SyntaxKind::VariableStatement, pos, pos).with_flags(NodeFlags::SYNTHESIZED),
            kind: VariableKind::Var,
            declarations: self.alloc_list(declarations),
        })
    }

    // ========================================================================
    // Bodies
    // ========================================================================

    /// A `{ ... }` body, or with `allow_concise` a single expression that
    /// becomes a synthesized `return`.
    fn parse_function_body_block(&mut self, id: FunctionId, allow_concise: bool) -> ParseResult<FunctionBody<'a>> {
        if self.current_token() != SyntaxKind::OpenBraceToken {
            if !allow_concise {
                return Err(self.error(&messages::_0_EXPECTED, &["{"]));
            }
            return self.parse_concise_body();
        }

        let open = self.token_pos();
        let skip_to = self
            .lazy
            .as_ref()
            .and_then(|lazy| lazy.skippable(id))
            .map(|descriptor| descriptor.end_checkpoint);
        if let Some(checkpoint) = skip_to {
            return self.skip_function_body(id, open, checkpoint);
        }

        self.next_token();
        let (statements, block_flags) = self.parse_body_statements(SyntaxKind::CloseBraceToken)?;
        let close = self.token();
        let end_checkpoint = Checkpoint::new(close.start, close.line, close.column);
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        Ok(FunctionBody {
            statements,
            block_flags,
            range: TextRange::new(open, self.last_token_end()),
            end_checkpoint,
            lazily_skipped: false,
        })
    }

    fn parse_concise_body(&mut self) -> ParseResult<FunctionBody<'a>> {
        let pos = self.token_pos();
        let expression = self.parse_assignment_expression(false)?;
        let end = self.last_token_end();
        let end_checkpoint = match self.tokens.previous() {
            Some(token) => Checkpoint::new(token.end, token.line, token.column + token.len()),
            None => Checkpoint::new(end, 0, end),
        };
        if let Some(func) = self.context.current_function_mut() {
            func.flags |= FunctionFlags::HAS_EXPRESSION_BODY;
        }
        let statement = Statement::ReturnStatement(ReturnStatement {
            data: NodeData::new(SyntaxKind::ReturnStatement, pos, end).with_flags(NodeFlags::SYNTHESIZED),
            expression: Some(self.alloc(expression)),
        });
        Ok(FunctionBody {
            statements: vec![statement],
            block_flags: BlockFlags::IS_BODY | BlockFlags::IS_SYNTHETIC,
            range: TextRange::new(pos, end),
            end_checkpoint,
            lazily_skipped: false,
        })
    }

    /// Jump from the `{` of a body a previous parse has seen to its `}`.
    fn skip_function_body(&mut self, id: FunctionId, open: u32, checkpoint: Checkpoint) -> ParseResult<FunctionBody<'a>> {
        if self.tokens.fast_forward_to(checkpoint.offset) {
            debug!(function = %id, offset = checkpoint.offset, "skipped buffered function body");
        } else {
            self.tokens.reseed(checkpoint);
            debug!(function = %id, offset = checkpoint.offset, line = checkpoint.line, "reseeded scanner past function body");
        }
        if self.current_token() != SyntaxKind::CloseBraceToken || self.token_pos() != checkpoint.offset {
            return Err(ParseError::Internal("lazy reparse checkpoint does not close a body"));
        }
        if let Some(lazy) = &self.lazy {
            self.next_function_id = lazy.table.last_nested_id(id, checkpoint.offset).next();
        }
        self.next_token();
        Ok(FunctionBody {
            statements: Vec::new(),
            block_flags: BlockFlags::IS_BODY,
            range: TextRange::new(open, self.last_token_end()),
            end_checkpoint: checkpoint,
            lazily_skipped: true,
        })
    }

    /// Build the node of a function whose frame has been popped.
    pub(crate) fn finish_function(&mut self, frame: FunctionFrame<'a>, parts: FunctionParts<'a>) -> &'a FunctionNode<'a> {
        let mut flags = frame.flags;
        if let Some(descriptor) = self.lazy.as_ref().and_then(|lazy| lazy.table.get(frame.id)) {
            flags = descriptor.flags;
            if flags.contains(FunctionFlags::HAS_NESTED_EVAL) {
                flags |= FunctionFlags::HAS_SCOPE_BLOCK;
            }
        }
        let name = match parts.name {
            "" => frame.default_name.unwrap_or(""),
            name => name,
        };
        trace!(function = %frame.id, name, ?flags, skipped = parts.lazily_skipped, "finished function");

        let mut statements = parts.prologue;
        statements.extend(parts.statements);
        let body = Block {
            data: NodeData::new(SyntaxKind::Block, parts.body_range.pos, parts.body_range.end),
            statements: self.alloc_list(statements),
            block_flags: parts.block_flags | frame.body_flags,
        };
        self.alloc(FunctionNode {
            data: NodeData::new(parts.node_kind, parts.pos, parts.end),
            id: frame.id,
            ident: parts.ident,
            name,
            kind: frame.kind,
            flags,
            parameters: self.alloc_list(parts.parameters),
            body,
            end_checkpoint: parts.end_checkpoint,
            module: parts.module,
            lazily_skipped: parts.lazily_skipped,
        })
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Parse from `=>` on, converting the already parsed head into
    /// parameters. `pos` is the start of the head.
    pub(crate) fn parse_arrow_function(
        &mut self,
        pos: u32,
        head: ArrowHead<'a>,
        is_async: bool,
    ) -> ParseResult<Expression<'a>> {
        let (arrow_pos, arrow_end) = (self.token_pos(), self.token_end());
        if self.has_preceding_line_break() {
            return Err(self.error(&messages::LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW, &[]));
        }
        self.require_version(EcmaVersion::Es2015, "Arrow function", arrow_pos, arrow_end);
        self.expect_token(SyntaxKind::EqualsGreaterThanToken)?;

        let mut flags = (self.current_function_flags() & FunctionFlags::STRICT) | FunctionFlags::ANONYMOUS;
        if is_async {
            flags |= FunctionFlags::IS_ASYNC;
        }
        let id = self.allocate_function_id();
        let mut frame = FunctionFrame::new(id, FunctionKind::Arrow, flags);
        frame.default_name = self.default_name_at(pos);

        let ((parameters, prologue, body), frame) = self.with_function_frame(frame, |p| {
            let parsed = p.convert_arrow_head(head, is_async)?;
            let (parameters, prologue) = p.assemble_parameters(parsed, true)?;
            let body = p.parse_function_body_block(id, true)?;
            Ok((parameters, prologue, body))
        })?;

        let function = self.finish_function(
            frame,
            FunctionParts {
                pos,
                end: body.range.end,
                node_kind: SyntaxKind::ArrowFunction,
                ident: None,
                name: "",
                parameters,
                prologue,
                statements: body.statements,
                body_range: body.range,
                block_flags: body.block_flags,
                end_checkpoint: body.end_checkpoint,
                module: None,
                lazily_skipped: body.lazily_skipped,
            },
        );
        Ok(Expression::ArrowFunction(function))
    }

    /// Turn the cover grammar before `=>` into parameters.
    fn convert_arrow_head(&mut self, head: ArrowHead<'a>, is_async: bool) -> ParseResult<Vec<ParsedParameter<'a>>> {
        let items = match head {
            ArrowHead::Identifier(name) => {
                self.declare_binding(&name, BindingKind::Parameter)?;
                return Ok(vec![ParsedParameter {
                    pos: name.data.pos(),
                    end: name.data.end(),
                    target: ParameterTarget::Name(name),
                    initializer: None,
                    rest: false,
                    bound_names: vec![name],
                }]);
            }
            ArrowHead::Parenthesized(mut items) => {
                for item in items.iter_mut() {
                    if matches!(item, Expression::ArrayLiteral(_) | Expression::ObjectLiteral(_)) {
                        if let Some(data) = item.data_mut() {
                            data.flags |= NodeFlags::DESTRUCTURING;
                        }
                    }
                }
                self.alloc_list(items)
            }
        };

        let mut finder = SuspendFinder::default();
        for item in items {
            finder.visit_expression(item);
        }
        if let Some(range) = finder.found_yield {
            return Err(self.error_at(range.pos, range.end, &messages::YIELD_IN_PARAMETER_INITIALIZER, &[]));
        }
        if let Some(range) = finder.found_await {
            return Err(self.error_at(range.pos, range.end, &messages::AWAIT_IN_PARAMETER_INITIALIZER, &[]));
        }

        let mut parameters = Vec::with_capacity(items.len());
        for item in items {
            let range = item.range();
            let (target, initializer, rest) = match item {
                Expression::Spread(spread) => (spread.expression, None, true),
                Expression::Assignment(assignment)
                    if assignment.operator == SyntaxKind::EqualsToken && !item.is_parenthesized() =>
                {
                    (assignment.target, Some(assignment.value), false)
                }
                _ => (item, None, false),
            };
            if rest && matches!(target, Expression::Assignment(_)) {
                let r = target.range();
                return Err(self.error_at(r.pos, r.end, &messages::REST_ELEMENT_CANNOT_HAVE_INITIALIZER, &[]));
            }
            let target = match target {
                Expression::Identifier(id) if !target.is_parenthesized() => ParameterTarget::Name(*id),
                Expression::ArrayLiteral(_) | Expression::ObjectLiteral(_) if !target.is_parenthesized() => {
                    ParameterTarget::Pattern(target)
                }
                _ => {
                    return Err(self.error_at(range.pos, range.end, &messages::INVALID_ARROW_FUNCTION_PARAMETER_LIST, &[]));
                }
            };
            let mut bound_names = Vec::new();
            match &target {
                ParameterTarget::Name(id) => {
                    let name = Expression::Identifier(*id);
                    self.verify_binding_pattern(&name, BindingKind::Parameter, &mut bound_names)?;
                }
                ParameterTarget::Pattern(pattern) => {
                    self.verify_binding_pattern(pattern, BindingKind::Parameter, &mut bound_names)?;
                }
            }
            self.check_async_arrow_names(&bound_names, is_async)?;
            parameters.push(ParsedParameter {
                pos: range.pos,
                end: range.end,
                target,
                initializer,
                rest,
                bound_names,
            });
        }
        Ok(parameters)
    }

    fn check_async_arrow_names(&self, names: &[Identifier<'a>], is_async: bool) -> ParseResult<()> {
        match names.iter().find(|n| is_async && n.is("await")) {
            Some(name) => Err(self.error_at(
                name.data.pos(),
                name.data.end(),
                &messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE,
                &["await"],
            )),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Methods
    // ========================================================================

    /// `async`, `*`, `get` or `set` before a method name. A modifier word
    /// followed by something that cannot start a name is the name itself.
    pub(crate) fn parse_method_modifiers(&mut self) -> ParseResult<MethodModifiers> {
        let mut modifiers = MethodModifiers::default();
        if self.is_contextual(SyntaxKind::AsyncKeyword) && !self.peek_has_line_break(1) {
            let next = self.peek_kind(1);
            if is_property_name_start(next) || next == SyntaxKind::AsteriskToken {
                self.require_version(EcmaVersion::Es2017, "Async method", self.token_pos(), self.token_end());
                self.next_token();
                modifiers.is_async = true;
            }
        }
        if self.current_token() == SyntaxKind::AsteriskToken {
            let (pos, end) = (self.token_pos(), self.token_end());
            if modifiers.is_async {
                self.require_version(EcmaVersion::Es2018, "Async generator", pos, end);
            } else {
                self.require_version(EcmaVersion::Es2015, "Generator", pos, end);
            }
            self.next_token();
            modifiers.is_generator = true;
            return Ok(modifiers);
        }
        if !modifiers.is_async && is_property_name_start(self.peek_kind(1)) {
            if self.is_contextual(SyntaxKind::GetKeyword) {
                modifiers.accessor = Some(FunctionKind::Getter);
                self.next_token();
            } else if self.is_contextual(SyntaxKind::SetKeyword) {
                modifiers.accessor = Some(FunctionKind::Setter);
                self.next_token();
            }
        }
        Ok(modifiers)
    }

    /// Parse the parameters and body of a method whose key has been
    /// parsed. `pos` is the start of the whole element.
    pub(crate) fn parse_method(
        &mut self,
        pos: u32,
        key: &PropertyKey<'a>,
        kind: FunctionKind,
        is_async: bool,
        extra_flags: FunctionFlags,
    ) -> ParseResult<&'a FunctionNode<'a>> {
        let mut flags = (self.current_function_flags() & FunctionFlags::STRICT) | FunctionFlags::IS_METHOD | extra_flags;
        if is_async {
            flags |= FunctionFlags::IS_ASYNC;
        }
        let id = self.allocate_function_id();
        let frame = FunctionFrame::new(id, kind, flags);

        let ((parameters, prologue, body), frame) = self.with_function_frame(frame, |p| {
            let params_pos = p.token_pos();
            let parsed = p.parse_formal_parameters()?;
            let params_end = p.last_token_end();
            match kind {
                FunctionKind::Getter if !parsed.is_empty() => {
                    return Err(p.error_at(params_pos, params_end, &messages::GETTER_CANNOT_HAVE_PARAMETERS, &[]));
                }
                FunctionKind::Setter if parsed.len() != 1 => {
                    return Err(p.error_at(params_pos, params_end, &messages::SETTER_MUST_HAVE_ONE_PARAMETER, &[]));
                }
                FunctionKind::Setter if parsed[0].rest => {
                    return Err(p.error_at(params_pos, params_end, &messages::SETTER_CANNOT_HAVE_REST_PARAMETER, &[]));
                }
                _ => {}
            }
            let (parameters, prologue) = p.assemble_parameters(parsed, false)?;
            let body = p.parse_function_body_block(id, false)?;
            Ok((parameters, prologue, body))
        })?;

        Ok(self.finish_function(
            frame,
            FunctionParts {
                pos,
                end: body.range.end,
                node_kind: SyntaxKind::FunctionExpression,
                ident: None,
                name: key_name(key).unwrap_or(""),
                parameters,
                prologue,
                statements: body.statements,
                body_range: body.range,
                block_flags: body.block_flags,
                end_checkpoint: body.end_checkpoint,
                module: None,
                lazily_skipped: body.lazily_skipped,
            },
        ))
    }
}

/// An identifier the parser made up, positioned at `pos`.
pub(crate) fn synthesized_identifier(name: &str, pos: u32) -> Identifier<'_> {
    Identifier {
        data: NodeData::new(SyntaxKind::Identifier, pos, pos).with_flags(NodeFlags::SYNTHESIZED),
        name,
    }
}
