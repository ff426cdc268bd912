//! Destructuring patterns.
//!
//! Patterns are parsed as array and object literals and checked here once
//! the parser knows they are targets. Assignment patterns may contain
//! member expressions; binding patterns only identifiers, which are
//! declared in the current scope as they are found.

use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_core::TextRange;
use esparse_diagnostics::messages;

use crate::error::ParseResult;
use crate::parser::Parser;

/// What a binding declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindingKind {
    Var,
    /// `let`, `const` and class names.
    Lexical,
    Parameter,
    Catch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternMode {
    Assignment,
    Binding(BindingKind),
}

impl<'a> Parser<'a> {
    /// Parse the target of a declaration: an identifier, or an array or
    /// object pattern. Nothing is declared yet.
    pub(crate) fn parse_binding_target(&mut self) -> ParseResult<Expression<'a>> {
        match self.current_token() {
            SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => {
                let pos = self.token_pos();
                self.require_version(esparse_options::EcmaVersion::Es2015, "Destructuring", pos, self.token_end());
                let mut pattern = if self.current_token() == SyntaxKind::OpenBracketToken {
                    self.parse_array_literal()?
                } else {
                    self.parse_object_literal()?
                };
                if let Some(data) = pattern.data_mut() {
                    data.flags |= NodeFlags::DESTRUCTURING;
                }
                Ok(pattern)
            }
            _ => Ok(Expression::Identifier(self.parse_identifier()?)),
        }
    }

    /// Declare one bound name.
    pub(crate) fn declare_binding(&mut self, id: &Identifier<'a>, kind: BindingKind) -> ParseResult<()> {
        let (pos, end) = (id.data.pos(), id.data.end());
        self.check_binding_identifier(id)?;
        match kind {
            BindingKind::Var => {
                if !self.context.declare_var(id.name) {
                    return Err(self.error_at(pos, end, &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0, &[id.name]));
                }
                if id.is("arguments") {
                    self.mark_defines_arguments();
                }
            }
            BindingKind::Lexical => {
                if id.is("let") {
                    return Err(self.error_at(pos, end, &messages::LET_NOT_ALLOWED_AS_LEXICAL_NAME, &[]));
                }
                if !self.context.declare_lexical(id.name) {
                    return Err(self.error_at(pos, end, &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0, &[id.name]));
                }
            }
            BindingKind::Parameter => {
                if let Some(func) = self.context.current_function_mut() {
                    func.parameter_bindings.push((id.name, TextRange::new(pos, end)));
                }
                // Duplicates are judged once the whole list is known.
                self.context.declare_parameter(id.name);
                if id.is("arguments") {
                    self.mark_defines_arguments();
                }
            }
            BindingKind::Catch => {}
        }
        Ok(())
    }

    fn mark_defines_arguments(&mut self) {
        if let Some(func) = self.context.current_function_mut() {
            func.flags |= FunctionFlags::DEFINES_ARGUMENTS;
        }
    }

    /// Check a declaration target and declare every name it binds, adding
    /// them to `names` in source order.
    pub(crate) fn verify_binding_pattern(
        &mut self,
        target: &Expression<'a>,
        kind: BindingKind,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        self.verify_pattern(target, PatternMode::Binding(kind), names)
    }

    /// Check the left side of a destructuring assignment.
    pub(crate) fn verify_assignment_pattern(&mut self, target: &Expression<'a>) -> ParseResult<()> {
        let mut unused = Vec::new();
        self.verify_pattern(target, PatternMode::Assignment, &mut unused)
    }

    fn verify_pattern(
        &mut self,
        target: &Expression<'a>,
        mode: PatternMode,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        match target {
            Expression::ArrayLiteral(array) if !target.is_parenthesized() => {
                self.verify_array_pattern(array, mode, names)
            }
            Expression::ObjectLiteral(object) if !target.is_parenthesized() => {
                self.verify_object_pattern(object, mode, names)
            }
            _ => self.verify_pattern_leaf(target, mode, names),
        }
    }

    /// An element that is not itself a nested pattern: an identifier, or a
    /// member expression when assigning.
    fn verify_pattern_leaf(
        &mut self,
        target: &Expression<'a>,
        mode: PatternMode,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        let range = target.range();
        match (target, mode) {
            (Expression::Identifier(id), PatternMode::Binding(kind)) if !target.is_parenthesized() => {
                self.declare_binding(id, kind)?;
                names.push(*id);
                Ok(())
            }
            (Expression::Identifier(_), PatternMode::Assignment) => self.check_assignment_identifier(target),
            (Expression::PropertyAccess(_) | Expression::ElementAccess(_), PatternMode::Assignment)
                if !target.data().flags.contains(NodeFlags::OPTIONAL_CHAIN) =>
            {
                Ok(())
            }
            _ => Err(self.error_at(range.pos, range.end, &messages::INVALID_DESTRUCTURING_TARGET, &[])),
        }
    }

    /// A pattern element with an optional `= default`.
    fn verify_pattern_element(
        &mut self,
        element: &Expression<'a>,
        mode: PatternMode,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        match element {
            Expression::Assignment(assignment)
                if assignment.operator == SyntaxKind::EqualsToken && !element.is_parenthesized() =>
            {
                self.verify_pattern(assignment.target, mode, names)
            }
            _ => self.verify_pattern(element, mode, names),
        }
    }

    fn verify_rest_element(
        &mut self,
        spread: &SpreadElement<'a>,
        is_last: bool,
        trailing_comma: bool,
        mode: PatternMode,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        let (pos, end) = (spread.data.pos(), spread.data.end());
        if !is_last || trailing_comma {
            return Err(self.error_at(pos, end, &messages::REST_ELEMENT_MUST_BE_LAST, &[]));
        }
        if let Expression::Assignment(assignment) = spread.expression {
            let range = assignment.data.range;
            return Err(self.error_at(range.pos, range.end, &messages::REST_ELEMENT_CANNOT_HAVE_INITIALIZER, &[]));
        }
        self.verify_pattern(spread.expression, mode, names)
    }

    fn verify_array_pattern(
        &mut self,
        array: &ArrayLiteralExpression<'a>,
        mode: PatternMode,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        let trailing_comma = array.data.flags.contains(NodeFlags::TRAILING_COMMA);
        let count = array.elements.len();
        for (i, element) in array.elements.iter().enumerate() {
            match element {
                Expression::Omitted(_) => {}
                Expression::Spread(spread) => {
                    self.verify_rest_element(spread, i + 1 == count, trailing_comma, mode, names)?;
                }
                _ => self.verify_pattern_element(element, mode, names)?,
            }
        }
        Ok(())
    }

    fn verify_object_pattern(
        &mut self,
        object: &ObjectLiteralExpression<'a>,
        mode: PatternMode,
        names: &mut Vec<Identifier<'a>>,
    ) -> ParseResult<()> {
        let trailing_comma = object.data.flags.contains(NodeFlags::TRAILING_COMMA);
        let count = object.properties.len();
        for (i, property) in object.properties.iter().enumerate() {
            match property {
                ObjectLiteralElement::PropertyAssignment(p) => self.verify_pattern_element(p.value, mode, names)?,
                ObjectLiteralElement::ShorthandPropertyAssignment(s) => {
                    let target = Expression::Identifier(s.name);
                    self.verify_pattern_leaf(&target, mode, names)?;
                }
                ObjectLiteralElement::Spread(spread) => {
                    // `{...{a}}` is never a valid target.
                    if matches!(spread.expression, Expression::ArrayLiteral(_) | Expression::ObjectLiteral(_)) {
                        let range = spread.expression.range();
                        return Err(self.error_at(range.pos, range.end, &messages::INVALID_DESTRUCTURING_TARGET, &[]));
                    }
                    self.verify_rest_element(spread, i + 1 == count, trailing_comma, mode, names)?;
                }
                ObjectLiteralElement::Method(_) | ObjectLiteralElement::Accessor(_) => {
                    let data = property.data();
                    return Err(self.error_at(data.pos(), data.end(), &messages::INVALID_DESTRUCTURING_TARGET, &[]));
                }
            }
        }
        Ok(())
    }
}

/// Whether `target` is a plain identifier binding.
pub(crate) fn is_simple_binding(target: &Expression<'_>) -> bool {
    matches!(target, Expression::Identifier(_))
}

/// Collect the names a declaration target binds, in source order.
pub(crate) fn bound_names<'a>(target: &Expression<'a>, names: &mut Vec<Identifier<'a>>) {
    match target {
        Expression::Identifier(id) => names.push(*id),
        Expression::Assignment(assignment) => bound_names(assignment.target, names),
        Expression::Spread(spread) => bound_names(spread.expression, names),
        Expression::ArrayLiteral(array) => {
            for element in array.elements {
                bound_names(element, names);
            }
        }
        Expression::ObjectLiteral(object) => {
            for property in object.properties {
                match property {
                    ObjectLiteralElement::PropertyAssignment(p) => bound_names(p.value, names),
                    ObjectLiteralElement::ShorthandPropertyAssignment(s) => names.push(s.name),
                    ObjectLiteralElement::Spread(spread) => bound_names(spread.expression, names),
                    ObjectLiteralElement::Method(_) | ObjectLiteralElement::Accessor(_) => {}
                }
            }
        }
        _ => {}
    }
}
