//! Class declarations and expressions.

use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_core::collections::FxIndexMap;
use esparse_core::TextRange;
use esparse_diagnostics::messages;
use esparse_options::EcmaVersion;

use crate::context::FunctionFrame;
use crate::error::ParseResult;
use crate::functions::{synthesized_identifier, FunctionContext, FunctionParts};
use crate::parser::Parser;
use crate::patterns::BindingKind;
use crate::utilities::{is_property_name_start, is_strict_mode_reserved_word};

/// Position of a class element for duplicate handling. Computed keys never
/// collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ElementSlot {
    Named { is_static: bool, name: String },
    Unique(usize),
}

/// Insert a class element, merging a getter and a setter of the same name
/// and replacing anything else in place.
fn insert_class_element<'a>(
    slots: &mut FxIndexMap<ElementSlot, ClassElement<'a>>,
    slot: ElementSlot,
    element: ClassElement<'a>,
) {
    if let ClassElement::Accessor(incoming) = &element {
        if let Some(ClassElement::Accessor(existing)) = slots.get_mut(&slot) {
            if incoming.getter.is_some() {
                existing.getter = incoming.getter;
            }
            if incoming.setter.is_some() {
                existing.setter = incoming.setter;
            }
            return;
        }
    }
    slots.insert(slot, element);
}

impl<'a> Parser<'a> {
    /// `class [name] [extends expr] { elements }`. The whole class, from
    /// the name through the closing brace, is strict mode code.
    pub(crate) fn parse_class(&mut self, pos: u32, context: FunctionContext) -> ParseResult<&'a ClassNode<'a>> {
        self.require_version(EcmaVersion::Es2015, "Class", pos, self.token_end());
        self.expect_token(SyntaxKind::ClassKeyword)?;

        let was_strict = self.is_strict();
        self.context.set_strict();
        let class = self.parse_class_tail(pos, context);
        if !was_strict {
            self.context.clear_strict();
        }
        class
    }

    fn parse_class_tail(&mut self, pos: u32, context: FunctionContext) -> ParseResult<&'a ClassNode<'a>> {
        let named = self.is_identifier_token() && self.current_token() != SyntaxKind::ExtendsKeyword;
        let ident = match context {
            FunctionContext::Declaration => Some(self.parse_class_name()?),
            _ if named => Some(self.parse_class_name()?),
            _ => None,
        };
        if context != FunctionContext::Expression {
            if let Some(id) = &ident {
                self.declare_binding(id, BindingKind::Lexical)?;
            }
        }
        let name = match ident {
            Some(id) => id.name,
            None => self.default_name_at(pos).unwrap_or(""),
        };

        let heritage = if self.optional_token(SyntaxKind::ExtendsKeyword) {
            let expression = self.parse_left_hand_side_expression()?;
            Some(self.alloc(expression))
        } else {
            None
        };
        let is_derived = heritage.is_some();

        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut slots: FxIndexMap<ElementSlot, ClassElement<'a>> = FxIndexMap::default();
        let mut constructor = None;
        let mut unique = 0usize;
        while self.current_token() != SyntaxKind::CloseBraceToken {
            if self.optional_token(SyntaxKind::SemicolonToken) {
                continue;
            }
            let element_pos = self.token_pos();
            let is_static = self.is_contextual(SyntaxKind::StaticKeyword) && {
                let next = self.peek_kind(1);
                is_property_name_start(next) || next == SyntaxKind::AsteriskToken
            };
            if is_static {
                self.next_token();
            }
            let modifiers = self.parse_method_modifiers()?;
            let key = self.parse_property_key()?;
            let key_data = *key.data();

            let is_constructor = !is_static && !key.is_computed() && key.is_named("constructor");
            if is_constructor {
                let invalid = if modifiers.is_generator {
                    Some("generator")
                } else if modifiers.is_async {
                    Some("async method")
                } else {
                    match modifiers.accessor {
                        Some(FunctionKind::Getter) => Some("getter"),
                        Some(_) => Some("setter"),
                        None => None,
                    }
                };
                if let Some(what) = invalid {
                    return Err(self.error_at(key_data.pos(), key_data.end(), &messages::CLASS_CONSTRUCTOR_MAY_NOT_BE_A_0, &[what]));
                }
                if constructor.is_some() {
                    return Err(self.error_at(key_data.pos(), key_data.end(), &messages::MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS, &[]));
                }
                let mut flags = FunctionFlags::STRICT | FunctionFlags::IS_CLASS_CONSTRUCTOR;
                if is_derived {
                    flags |= FunctionFlags::IS_SUBCLASS_CONSTRUCTOR;
                }
                let function = self.parse_method(element_pos, &key, FunctionKind::Normal, false, flags)?;
                constructor = Some(function);
                continue;
            }
            if is_static && !key.is_computed() && key.is_named("prototype") {
                return Err(self.error_at(key_data.pos(), key_data.end(), &messages::STATIC_PROTOTYPE_PROPERTY, &[]));
            }

            let element = if let Some(kind) = modifiers.accessor {
                let function = self.parse_method(element_pos, &key, kind, false, FunctionFlags::STRICT)?;
                let (getter, setter) = match kind {
                    FunctionKind::Getter => (Some(function), None),
                    _ => (None, Some(function)),
                };
                ClassElement::Accessor(AccessorProperty {
                    data: NodeData::new(SyntaxKind::AccessorProperty, element_pos, self.last_token_end()),
                    key,
                    getter,
                    setter,
                    is_static,
                })
            } else {
                let kind = if modifiers.is_generator { FunctionKind::Generator } else { FunctionKind::Normal };
                let function =
                    self.parse_method(element_pos, &key, kind, modifiers.is_async, FunctionFlags::STRICT)?;
                ClassElement::Method(MethodDefinition {
                    data: NodeData::new(SyntaxKind::MethodDefinition, element_pos, self.last_token_end()),
                    key,
                    function,
                    is_static,
                })
            };
            let slot = match element.key().static_name() {
                Some(name) => ElementSlot::Named {
                    is_static,
                    name: name.into_owned(),
                },
                None => {
                    unique += 1;
                    ElementSlot::Unique(unique)
                }
            };
            insert_class_element(&mut slots, slot, element);
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        let end = self.last_token_end();

        let constructor = match constructor {
            Some(function) => function,
            None => self.default_constructor(name, is_derived, pos, end),
        };
        let elements: Vec<_> = slots.into_values().collect();
        let node_kind = match context {
            FunctionContext::Expression => SyntaxKind::ClassExpression,
            _ => SyntaxKind::ClassDeclaration,
        };
        Ok(self.alloc(ClassNode {
            data: NodeData::new(node_kind, pos, end),
            ident,
            heritage,
            constructor,
            elements: self.alloc_list(elements),
        }))
    }

    /// A class name follows strict mode rules whatever the surrounding code.
    fn parse_class_name(&mut self) -> ParseResult<Identifier<'a>> {
        let id = self.parse_identifier()?;
        let (pos, end) = (id.data.pos(), id.data.end());
        if id.is("eval") || id.is("arguments") {
            return Err(self.error_at(pos, end, &messages::INVALID_USE_OF_0_IN_STRICT_MODE, &[id.name]));
        }
        if is_strict_mode_reserved_word(id.name) || id.is("await") && self.is_module_goal {
            return Err(self.error_at(pos, end, &messages::_0_IS_A_RESERVED_WORD_IN_STRICT_MODE, &[id.name]));
        }
        Ok(id)
    }

    /// `constructor() {}` for a base class and
    /// `constructor(...args) { super(...args); }` for a derived one.
    fn default_constructor(&mut self, name: &'a str, is_derived: bool, pos: u32, end: u32) -> &'a FunctionNode<'a> {
        let id = self.allocate_function_id();
        let mut flags = FunctionFlags::STRICT
            | FunctionFlags::IS_METHOD
            | FunctionFlags::IS_CLASS_CONSTRUCTOR
            | FunctionFlags::IS_DEFAULT_CONSTRUCTOR;
        let synthesized = |kind| NodeData::new(kind, pos, pos).with_flags(NodeFlags::SYNTHESIZED);

        let mut parameters = Vec::new();
        let mut statements = Vec::new();
        if is_derived {
            flags |= FunctionFlags::IS_SUBCLASS_CONSTRUCTOR
                | FunctionFlags::HAS_DIRECT_SUPER
                | FunctionFlags::USES_THIS
                | FunctionFlags::HAS_NON_SIMPLE_PARAMETERS;
            let args = synthesized_identifier("args", pos);
            parameters.push(Parameter {
                data: synthesized(SyntaxKind::Parameter),
                name: args,
                pattern: None,
                initializer: None,
                rest: true,
            });
            let spread = Expression::Spread(SpreadElement {
                data: synthesized(SyntaxKind::SpreadElement),
                expression: self.alloc(Expression::Identifier(args)),
            });
            let call = Expression::Call(CallExpression {
                data: synthesized(SyntaxKind::CallExpression),
                callee: self.alloc(Expression::SuperKeyword(synthesized(SyntaxKind::SuperKeyword))),
                arguments: self.alloc_list(vec![spread]),
            });
            statements.push(Statement::ExpressionStatement(ExpressionStatement {
                data: synthesized(SyntaxKind::ExpressionStatement),
                expression: self.alloc(call),
            }));
        }

        let frame = FunctionFrame::new(id, FunctionKind::Normal, flags);
        self.finish_function(
            frame,
            FunctionParts {
                pos,
                end,
                node_kind: SyntaxKind::FunctionExpression,
                ident: None,
                name,
                parameters,
                prologue: Vec::new(),
                statements,
                body_range: TextRange::new(pos, pos),
                block_flags: BlockFlags::IS_BODY | BlockFlags::IS_SYNTHETIC,
                end_checkpoint: Checkpoint::new(end, 0, 0),
                module: None,
                lazily_skipped: false,
            },
        )
    }
}
