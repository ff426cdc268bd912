//! IR node definitions.
//!
//! Every node lives in the parse arena. Children are arena references or
//! arena slices, and all text is borrowed from the arena, so a tree never
//! owns heap memory and can be dropped together with its arena.

use crate::module::ModuleRecord;
use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use esparse_core::text::TextRange;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all IR nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source range: start of the first token to the finish offset.
    pub range: TextRange,
    /// Node flags.
    pub flags: NodeFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.range.end
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.flags.contains(NodeFlags::SYNTHESIZED)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Identifiers and Literals
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// Cooked name, escapes resolved.
    pub name: &'a str,
}

impl<'a> Identifier<'a> {
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// Cooked value.
    pub value: &'a str,
    /// Source text including quotes.
    pub raw: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct NumericLiteral<'a> {
    pub data: NodeData,
    pub value: f64,
    pub raw: &'a str,
    pub numeric_literal_flags: TokenFlags,
}

#[derive(Debug, Clone, Copy)]
pub struct BigIntLiteral<'a> {
    pub data: NodeData,
    /// Source text including the trailing `n`.
    pub raw: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct BooleanLiteral {
    pub data: NodeData,
    pub value: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RegularExpressionLiteral<'a> {
    pub data: NodeData,
    pub pattern: &'a str,
    pub flags: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateElement<'a> {
    pub data: NodeData,
    /// `None` when the part contains an escape that is invalid in templates
    /// (only legal in tagged templates).
    pub cooked: Option<&'a str>,
    /// Raw text between the delimiters, line terminators normalized to `\n`.
    pub raw: &'a str,
}

/// A template literal: `quasis.len() == expressions.len() + 1`.
#[derive(Debug)]
pub struct TemplateLiteral<'a> {
    pub data: NodeData,
    pub quasis: NodeList<'a, TemplateElement<'a>>,
    pub expressions: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub template: &'a TemplateLiteral<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    NullLiteral(NodeData),
    BooleanLiteral(BooleanLiteral),
    NumericLiteral(NumericLiteral<'a>),
    BigIntLiteral(BigIntLiteral<'a>),
    StringLiteral(StringLiteral<'a>),
    RegularExpressionLiteral(RegularExpressionLiteral<'a>),
    TemplateLiteral(TemplateLiteral<'a>),
    TaggedTemplate(TaggedTemplateExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    FunctionExpression(&'a FunctionNode<'a>),
    ArrowFunction(&'a FunctionNode<'a>),
    ClassExpression(&'a ClassNode<'a>),
    PrefixUnary(PrefixUnaryExpression<'a>),
    PostfixUnary(PostfixUnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Logical(LogicalExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Sequence(SequenceExpression<'a>),
    Call(CallExpression<'a>),
    New(NewExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Spread(SpreadElement<'a>),
    Yield(YieldExpression<'a>),
    Await(AwaitExpression<'a>),
    JoinPredecessor(JoinPredecessorExpression<'a>),
    ThisKeyword(NodeData),
    SuperKeyword(NodeData),
    /// `new.target`.
    NewTarget(NodeData),
    /// An array hole.
    Omitted(NodeData),
    /// Placeholder for an expression that failed to parse.
    Error(NodeData),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::NullLiteral(d) => d,
            Expression::BooleanLiteral(n) => &n.data,
            Expression::NumericLiteral(n) => &n.data,
            Expression::BigIntLiteral(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::RegularExpressionLiteral(n) => &n.data,
            Expression::TemplateLiteral(n) => &n.data,
            Expression::TaggedTemplate(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::FunctionExpression(n) => &n.data,
            Expression::ArrowFunction(n) => &n.data,
            Expression::ClassExpression(n) => &n.data,
            Expression::PrefixUnary(n) => &n.data,
            Expression::PostfixUnary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Logical(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Assignment(n) => &n.data,
            Expression::Sequence(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::JoinPredecessor(n) => &n.data,
            Expression::ThisKeyword(d)
            | Expression::SuperKeyword(d)
            | Expression::NewTarget(d)
            | Expression::Omitted(d)
            | Expression::Error(d) => d,
        }
    }

    /// Mutable node data. `None` for functions and classes, which are
    /// already shared arena references.
    pub fn data_mut(&mut self) -> Option<&mut NodeData> {
        let data = match self {
            Expression::Identifier(n) => &mut n.data,
            Expression::NullLiteral(d) => d,
            Expression::BooleanLiteral(n) => &mut n.data,
            Expression::NumericLiteral(n) => &mut n.data,
            Expression::BigIntLiteral(n) => &mut n.data,
            Expression::StringLiteral(n) => &mut n.data,
            Expression::RegularExpressionLiteral(n) => &mut n.data,
            Expression::TemplateLiteral(n) => &mut n.data,
            Expression::TaggedTemplate(n) => &mut n.data,
            Expression::ArrayLiteral(n) => &mut n.data,
            Expression::ObjectLiteral(n) => &mut n.data,
            Expression::FunctionExpression(_)
            | Expression::ArrowFunction(_)
            | Expression::ClassExpression(_) => return None,
            Expression::PrefixUnary(n) => &mut n.data,
            Expression::PostfixUnary(n) => &mut n.data,
            Expression::Binary(n) => &mut n.data,
            Expression::Logical(n) => &mut n.data,
            Expression::Conditional(n) => &mut n.data,
            Expression::Assignment(n) => &mut n.data,
            Expression::Sequence(n) => &mut n.data,
            Expression::Call(n) => &mut n.data,
            Expression::New(n) => &mut n.data,
            Expression::PropertyAccess(n) => &mut n.data,
            Expression::ElementAccess(n) => &mut n.data,
            Expression::Spread(n) => &mut n.data,
            Expression::Yield(n) => &mut n.data,
            Expression::Await(n) => &mut n.data,
            Expression::JoinPredecessor(n) => &mut n.data,
            Expression::ThisKeyword(d)
            | Expression::SuperKeyword(d)
            | Expression::NewTarget(d)
            | Expression::Omitted(d)
            | Expression::Error(d) => d,
        };
        Some(data)
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    pub fn is_parenthesized(&self) -> bool {
        self.data().flags.contains(NodeFlags::PARENTHESIZED)
    }

    pub fn as_identifier(&self) -> Option<&Identifier<'a>> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this is the plain identifier `name`.
    pub fn is_identifier_named(&self, name: &str) -> bool {
        matches!(self, Expression::Identifier(id) if id.name == name)
    }

    /// Strip join-predecessor wrappers.
    pub fn unwrap_join(&self) -> &Expression<'a> {
        let mut expr = self;
        while let Expression::JoinPredecessor(JoinPredecessorExpression {
            expression: Some(inner),
            ..
        }) = expr
        {
            expr = inner;
        }
        expr
    }
}

#[derive(Debug)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    /// Holes are `Expression::Omitted`, spreads are `Expression::Spread`.
    pub elements: NodeList<'a, Expression<'a>>,
}

/// Every property in source order. Only a getter/setter pair whose name
/// was last written by an accessor shares one `Accessor`; repeated data
/// properties each keep their own element.
#[derive(Debug)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment<'a>),
    Spread(SpreadElement<'a>),
    Method(MethodDefinition<'a>),
    Accessor(AccessorProperty<'a>),
}

impl<'a> ObjectLiteralElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ObjectLiteralElement::PropertyAssignment(n) => &n.data,
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => &n.data,
            ObjectLiteralElement::Spread(n) => &n.data,
            ObjectLiteralElement::Method(n) => &n.data,
            ObjectLiteralElement::Accessor(n) => &n.data,
        }
    }
}

/// `key: value`.
#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub key: PropertyKey<'a>,
    pub value: &'a Expression<'a>,
}

/// `{a}` or, only valid as a pattern, `{a = 1}`.
#[derive(Debug)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

/// A property name in an object literal or class body.
#[derive(Debug)]
pub enum PropertyKey<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(NumericLiteral<'a>),
    BigIntLiteral(BigIntLiteral<'a>),
    Computed(ComputedPropertyName<'a>),
}

impl<'a> PropertyKey<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyKey::Identifier(n) => &n.data,
            PropertyKey::StringLiteral(n) => &n.data,
            PropertyKey::NumericLiteral(n) => &n.data,
            PropertyKey::BigIntLiteral(n) => &n.data,
            PropertyKey::Computed(n) => &n.data,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyKey::Computed(_))
    }

    /// The property name when it is known statically. Numeric keys are
    /// canonicalized the way `ToString` would render small numbers.
    pub fn static_name(&self) -> Option<std::borrow::Cow<'a, str>> {
        use std::borrow::Cow;
        match self {
            PropertyKey::Identifier(id) => Some(Cow::Borrowed(id.name)),
            PropertyKey::StringLiteral(s) => Some(Cow::Borrowed(s.value)),
            PropertyKey::NumericLiteral(n) => Some(Cow::Owned(number_to_key(n.value))),
            PropertyKey::BigIntLiteral(b) => {
                Some(Cow::Borrowed(b.raw.trim_end_matches('n')))
            }
            PropertyKey::Computed(_) => None,
        }
    }

    /// Whether the key is the literal name `name` (identifier or string).
    pub fn is_named(&self, name: &str) -> bool {
        match self {
            PropertyKey::Identifier(id) => id.name == name,
            PropertyKey::StringLiteral(s) => s.value == name,
            _ => false,
        }
    }
}

fn number_to_key(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// A method in an object literal or class body.
#[derive(Debug)]
pub struct MethodDefinition<'a> {
    pub data: NodeData,
    pub key: PropertyKey<'a>,
    pub function: &'a FunctionNode<'a>,
    pub is_static: bool,
}

/// A getter, a setter, or a merged getter/setter pair.
#[derive(Debug)]
pub struct AccessorProperty<'a> {
    pub data: NodeData,
    pub key: PropertyKey<'a>,
    pub getter: OptionalNode<'a, FunctionNode<'a>>,
    pub setter: OptionalNode<'a, FunctionNode<'a>>,
    pub is_static: bool,
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `!x`, `-x`, `typeof x`, `delete x`, `++x`, ...
#[derive(Debug)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

/// `x++` and `x--`.
#[derive(Debug)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

/// `&&`, `||` and `??`. Both operands are join predecessors.
#[derive(Debug)]
pub struct LogicalExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

/// `test ? when_true : when_false`. Both branches are join predecessors.
#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct AssignmentExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    /// Identifier, member access, or (for `=`) a destructuring literal.
    pub target: &'a Expression<'a>,
    pub value: &'a Expression<'a>,
}

/// `a, b, c`.
#[derive(Debug)]
pub struct SequenceExpression<'a> {
    pub data: NodeData,
    pub expressions: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub callee: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub callee: &'a Expression<'a>,
    /// `None` for `new X` without an argument list.
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

/// `object.name`.
#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub object: &'a Expression<'a>,
    pub name: Identifier<'a>,
}

/// `object[index]`.
#[derive(Debug)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub object: &'a Expression<'a>,
    pub index: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// Marks an expression whose evaluation is one of several control-flow
/// predecessors of a join point. `expression` is `None` for an absent
/// `for` test or update.
#[derive(Debug)]
pub struct JoinPredecessorExpression<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Functions
// ============================================================================

/// A positional parameter.
///
/// Destructured parameters bind a synthetic `:paramN` name; `pattern`
/// keeps the source pattern and the body prologue performs the
/// destructuring. `initializer` keeps the source default value, which the
/// prologue also applies.
#[derive(Debug)]
pub struct Parameter<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub pattern: OptionalNode<'a, Expression<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
    pub rest: bool,
}

/// Every function, including the script or module root.
#[derive(Debug)]
pub struct FunctionNode<'a> {
    pub data: NodeData,
    pub id: FunctionId,
    /// The binding identifier written in the source, if any.
    pub ident: Option<Identifier<'a>>,
    /// The identifier or the name inferred from the enclosing definition.
    pub name: &'a str,
    pub kind: FunctionKind,
    pub flags: FunctionFlags,
    pub parameters: NodeList<'a, Parameter<'a>>,
    /// The body. The parameter prologue comes first; a concise body is a
    /// single synthesized `return`.
    pub body: Block<'a>,
    /// Position of the closing `}` (or the end of a concise body).
    pub end_checkpoint: Checkpoint,
    /// Present on module roots.
    pub module: Option<&'a ModuleRecord<'a>>,
    /// The body was skipped by a lazy reparse.
    pub lazily_skipped: bool,
}

impl<'a> FunctionNode<'a> {
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.flags.contains(FunctionFlags::STRICT)
    }

    #[inline]
    pub fn is_async(&self) -> bool {
        self.flags.contains(FunctionFlags::IS_ASYNC)
    }

    #[inline]
    pub fn is_arrow(&self) -> bool {
        self.kind == FunctionKind::Arrow
    }

    #[inline]
    pub fn is_generator(&self) -> bool {
        self.kind == FunctionKind::Generator
    }

    /// The statements that were written in the source, without the
    /// parameter prologue.
    pub fn source_statements(&self) -> impl Iterator<Item = &Statement<'a>> {
        self.body.statements.iter().filter(|s| !s.data().is_synthesized())
    }
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug)]
pub struct ClassNode<'a> {
    pub data: NodeData,
    pub ident: Option<Identifier<'a>>,
    pub heritage: OptionalNode<'a, Expression<'a>>,
    /// Explicit or synthesized constructor.
    pub constructor: &'a FunctionNode<'a>,
    /// Elements in source order, keyed by static-ness and name. A getter
    /// and a setter of one key share an `Accessor`. A later method or
    /// accessor replaces the earlier element of its key in place. Computed
    /// keys are never merged.
    pub elements: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug)]
pub enum ClassElement<'a> {
    Method(MethodDefinition<'a>),
    Accessor(AccessorProperty<'a>),
}

impl<'a> ClassElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ClassElement::Method(m) => &m.data,
            ClassElement::Accessor(a) => &a.data,
        }
    }

    pub fn key(&self) -> &PropertyKey<'a> {
        match self {
            ClassElement::Method(m) => &m.key,
            ClassElement::Accessor(a) => &a.key,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            ClassElement::Method(m) => m.is_static,
            ClassElement::Accessor(a) => a.is_static,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    Block(Block<'a>),
    EmptyStatement(NodeData),
    VariableStatement(VariableStatement<'a>),
    ExpressionStatement(ExpressionStatement<'a>),
    IfStatement(IfStatement<'a>),
    DoStatement(DoStatement<'a>),
    WhileStatement(WhileStatement<'a>),
    ForStatement(ForStatement<'a>),
    ForInStatement(ForInStatement<'a>),
    ForOfStatement(ForOfStatement<'a>),
    ContinueStatement(JumpStatement<'a>),
    BreakStatement(JumpStatement<'a>),
    ReturnStatement(ReturnStatement<'a>),
    WithStatement(WithStatement<'a>),
    SwitchStatement(SwitchStatement<'a>),
    LabeledStatement(LabeledStatement<'a>),
    ThrowStatement(ThrowStatement<'a>),
    TryStatement(TryStatement<'a>),
    DebuggerStatement(NodeData),
    FunctionDeclaration(&'a FunctionNode<'a>),
    ClassDeclaration(&'a ClassNode<'a>),
    ImportDeclaration(ImportDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    /// Placeholder left where a statement failed to parse.
    ErrorStatement(NodeData),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::EmptyStatement(d) => d,
            Statement::VariableStatement(n) => &n.data,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::DoStatement(n) => &n.data,
            Statement::WhileStatement(n) => &n.data,
            Statement::ForStatement(n) => &n.data,
            Statement::ForInStatement(n) => &n.data,
            Statement::ForOfStatement(n) => &n.data,
            Statement::ContinueStatement(n) => &n.data,
            Statement::BreakStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::WithStatement(n) => &n.data,
            Statement::SwitchStatement(n) => &n.data,
            Statement::LabeledStatement(n) => &n.data,
            Statement::ThrowStatement(n) => &n.data,
            Statement::TryStatement(n) => &n.data,
            Statement::DebuggerStatement(d) => d,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::ClassDeclaration(n) => &n.data,
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ErrorStatement(d) => d,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// The string value if this is a directive prologue entry.
    pub fn directive(&self) -> Option<&StringLiteral<'a>> {
        match self {
            Statement::ExpressionStatement(s) if s.data.flags.contains(NodeFlags::DIRECTIVE) => {
                match s.expression {
                    Expression::StringLiteral(lit) => Some(lit),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub block_flags: BlockFlags,
}

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub kind: VariableKind,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    /// An identifier or a destructuring literal.
    pub target: &'a Expression<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub body: &'a Statement<'a>,
    pub condition: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

/// The head of a `for` statement before the first `;`, or the left side of
/// `for-in`/`for-of`.
#[derive(Debug)]
pub enum ForInitializer<'a> {
    Variable(&'a VariableStatement<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    /// Join predecessor; its inner expression is `None` when omitted.
    pub condition: &'a Expression<'a>,
    /// Join predecessor; its inner expression is `None` when omitted.
    pub incrementor: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

/// `for (x in o)` and `for each (x in o)`.
#[derive(Debug)]
pub struct ForInStatement<'a> {
    pub data: NodeData,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

/// `for (x of o)` and `for await (x of o)`.
#[derive(Debug)]
pub struct ForOfStatement<'a> {
    pub data: NodeData,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

/// `break` or `continue`.
#[derive(Debug)]
pub struct JumpStatement<'a> {
    pub data: NodeData,
    pub label: Option<Identifier<'a>>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub clauses: NodeList<'a, CaseClause<'a>>,
}

/// `case test:` or, when `test` is `None`, `default:`.
#[derive(Debug)]
pub struct CaseClause<'a> {
    pub data: NodeData,
    pub test: OptionalNode<'a, Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: Identifier<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_block: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    /// Identifier or destructuring literal; `None` for `catch {}`.
    pub parameter: OptionalNode<'a, Expression<'a>>,
    pub block: Block<'a>,
}

// ============================================================================
// Modules
// ============================================================================

/// A name in an import/export specifier: an identifier name or, from
/// ES2022, a string literal.
#[derive(Debug, Clone, Copy)]
pub enum ModuleExportName<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
}

impl<'a> ModuleExportName<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ModuleExportName::Identifier(id) => id.name,
            ModuleExportName::StringLiteral(s) => s.value,
        }
    }

    pub fn data(&self) -> &NodeData {
        match self {
            ModuleExportName::Identifier(id) => &id.data,
            ModuleExportName::StringLiteral(s) => &s.data,
        }
    }
}

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub default_binding: Option<Identifier<'a>>,
    pub namespace_binding: Option<Identifier<'a>>,
    /// `None` when no `{...}` clause was written.
    pub named_bindings: Option<NodeList<'a, ImportSpecifier<'a>>>,
    pub module_specifier: StringLiteral<'a>,
}

/// `imported as local`, or just `local`.
#[derive(Debug)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub imported: Option<ModuleExportName<'a>>,
    pub local: Identifier<'a>,
}

#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub clause: ExportClause<'a>,
}

#[derive(Debug)]
pub enum ExportClause<'a> {
    /// `export * from "m"` and `export * as ns from "m"`.
    Star {
        alias: Option<ModuleExportName<'a>>,
        module_specifier: StringLiteral<'a>,
    },
    /// `export {a, b as c}` with an optional `from "m"`.
    Named {
        specifiers: NodeList<'a, ExportSpecifier<'a>>,
        module_specifier: Option<StringLiteral<'a>>,
    },
    /// `export var|let|const|function|class ...`.
    Declaration(&'a Statement<'a>),
    /// `export default ...`. `local_name` is the bound name, `*default*`
    /// for anonymous values.
    Default {
        value: ExportDefaultValue<'a>,
        local_name: &'a str,
    },
}

#[derive(Debug)]
pub enum ExportDefaultValue<'a> {
    Function(&'a FunctionNode<'a>),
    Class(&'a ClassNode<'a>),
    Expression(&'a Expression<'a>),
}

/// `local as exported`, or just `local`.
#[derive(Debug)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub local: ModuleExportName<'a>,
    pub exported: Option<ModuleExportName<'a>>,
}

impl<'a> ExportSpecifier<'a> {
    pub fn export_name(&self) -> &'a str {
        self.exported.as_ref().unwrap_or(&self.local).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier<'_> {
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, 0, name.len() as u32),
            name,
        }
    }

    #[test]
    fn test_expression_data_and_flags() {
        let mut expr = Expression::Identifier(ident("x"));
        assert_eq!(expr.kind(), SyntaxKind::Identifier);
        assert!(!expr.is_parenthesized());
        if let Some(data) = expr.data_mut() {
            data.flags |= NodeFlags::PARENTHESIZED;
        }
        assert!(expr.is_parenthesized());
        assert!(expr.is_identifier_named("x"));
    }

    #[test]
    fn test_unwrap_join() {
        let inner = Expression::Identifier(ident("y"));
        let join = Expression::JoinPredecessor(JoinPredecessorExpression {
            data: NodeData::new(SyntaxKind::JoinPredecessorExpression, 0, 1),
            expression: Some(&inner),
        });
        assert!(join.unwrap_join().is_identifier_named("y"));
    }

    #[test]
    fn test_property_key_static_name() {
        let key = PropertyKey::NumericLiteral(NumericLiteral {
            data: NodeData::new(SyntaxKind::NumericLiteral, 0, 3),
            value: 1.0,
            raw: "1.0",
            numeric_literal_flags: TokenFlags::NONE,
        });
        assert_eq!(key.static_name().as_deref(), Some("1"));
        let key = PropertyKey::StringLiteral(StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, 0, 13),
            value: "constructor",
            raw: "'constructor'",
        });
        assert!(key.is_named("constructor"));
    }
}
