//! esparse_printer: IR to source text.
//!
//! Prints a parsed program back as ECMAScript. Parentheses are derived from
//! operator precedence rather than from the source, so printing the result
//! of parsing printed output yields the same text again.

use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::{FunctionFlags, NodeFlags};

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// Print a program with the default options.
pub fn print_program(program: &FunctionNode<'_>) -> String {
    Printer::new().print_program(program)
}

/// Print a single expression with the default options.
pub fn print_expression(expression: &Expression<'_>) -> String {
    Printer::new().print_standalone_expression(expression)
}

// Precedence levels, loosest first.
const SEQUENCE: u8 = 0;
const ASSIGNMENT: u8 = 1;
const CONDITIONAL: u8 = 2;
const COALESCE: u8 = 3;
const EXPONENT: u8 = 14;
const UNARY: u8 = 15;
const POSTFIX: u8 = 16;
const NEW_WITHOUT_ARGUMENTS: u8 = 17;
const MEMBER: u8 = 18;
const PRIMARY: u8 = 19;

fn binary_precedence(operator: SyntaxKind) -> u8 {
    match operator {
        SyntaxKind::QuestionQuestionToken => COALESCE,
        SyntaxKind::BarBarToken => 4,
        SyntaxKind::AmpersandAmpersandToken => 5,
        SyntaxKind::BarToken => 6,
        SyntaxKind::CaretToken => 7,
        SyntaxKind::AmpersandToken => 8,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 9,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 10,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 11,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 12,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 13,
        SyntaxKind::AsteriskAsteriskToken => EXPONENT,
        _ => PRIMARY,
    }
}

fn precedence(expression: &Expression<'_>) -> u8 {
    match expression {
        Expression::Sequence(_) => SEQUENCE,
        Expression::Assignment(_) | Expression::Yield(_) | Expression::ArrowFunction(_) | Expression::Spread(_) => {
            ASSIGNMENT
        }
        Expression::Conditional(_) => CONDITIONAL,
        Expression::Binary(n) => binary_precedence(n.operator),
        Expression::Logical(n) => binary_precedence(n.operator),
        Expression::PrefixUnary(_) | Expression::Await(_) => UNARY,
        Expression::PostfixUnary(_) => POSTFIX,
        Expression::New(n) if n.arguments.is_none() => NEW_WITHOUT_ARGUMENTS,
        Expression::New(_)
        | Expression::Call(_)
        | Expression::PropertyAccess(_)
        | Expression::ElementAccess(_)
        | Expression::TaggedTemplate(_) => MEMBER,
        Expression::JoinPredecessor(n) => n.expression.map_or(PRIMARY, precedence),
        _ => PRIMARY,
    }
}

fn is_short_circuit(expression: &Expression<'_>) -> bool {
    matches!(
        expression.unwrap_join(),
        Expression::Logical(n) if matches!(n.operator, SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken)
    )
}

fn is_optional_chain(expression: &Expression<'_>) -> bool {
    expression.unwrap_join().data().flags.contains(NodeFlags::OPTIONAL_CHAIN)
}

/// `new` binds to the first argument list, so a callee containing a call
/// must be parenthesized.
fn contains_call(expression: &Expression<'_>) -> bool {
    match expression.unwrap_join() {
        Expression::Call(_) => true,
        Expression::PropertyAccess(n) => contains_call(n.object),
        Expression::ElementAccess(n) => contains_call(n.object),
        Expression::TaggedTemplate(n) => contains_call(n.tag),
        _ => false,
    }
}

/// `1.x` would scan as a number followed by an identifier.
fn is_bare_integer(expression: &Expression<'_>) -> bool {
    match expression.unwrap_join() {
        Expression::NumericLiteral(n) => n.raw.bytes().all(|b| b.is_ascii_digit() || b == b'_'),
        _ => false,
    }
}

/// Text that would be read as a declaration or a block at the start of a
/// statement.
fn needs_statement_parens(text: &str) -> bool {
    let keyword = |word: &str| {
        text.strip_prefix(word)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$'))
    };
    text.starts_with('{')
        || keyword("function")
        || keyword("class")
        || text.starts_with("async function")
        || text.starts_with("let[")
}

/// An `if` without `else` at the end of `statement` would capture a
/// following `else`.
fn ends_with_open_if(statement: &Statement<'_>) -> bool {
    match statement {
        Statement::IfStatement(n) => match n.else_statement {
            Some(else_statement) => ends_with_open_if(else_statement),
            None => true,
        },
        Statement::ForStatement(n) => ends_with_open_if(n.body),
        Statement::ForInStatement(n) => ends_with_open_if(n.body),
        Statement::ForOfStatement(n) => ends_with_open_if(n.body),
        Statement::WhileStatement(n) => ends_with_open_if(n.body),
        Statement::WithStatement(n) => ends_with_open_if(n.body),
        Statement::LabeledStatement(n) => ends_with_open_if(n.statement),
        _ => false,
    }
}

/// The printer converts IR nodes to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    /// Inside the head of a classic `for`, where `in` must be parenthesized.
    in_for_init: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
            in_for_init: false,
        }
    }

    /// Print the statements of a script or module.
    pub fn print_program(&mut self, program: &FunctionNode<'_>) -> String {
        self.output.clear();
        for (i, statement) in program.source_statements().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_indent();
            self.print_statement(statement);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    pub fn print_standalone_expression(&mut self, expression: &Expression<'_>) -> String {
        self.output.clear();
        self.print_expression_at(expression, SEQUENCE);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::Block(n) => self.print_block(n),
            Statement::EmptyStatement(_) | Statement::ErrorStatement(_) => self.write(";"),
            Statement::VariableStatement(n) => {
                self.print_variable_declarations(n);
                self.write(";");
            }
            Statement::ExpressionStatement(n) => {
                self.print_leading_expression(n.expression, SEQUENCE);
                self.write(";");
            }
            Statement::IfStatement(n) => self.print_if_statement(n),
            Statement::DoStatement(n) => {
                self.write("do ");
                self.print_statement(n.body);
                self.write(" while (");
                self.print_expression(n.condition);
                self.write(");");
            }
            Statement::WhileStatement(n) => {
                self.write("while (");
                self.print_expression(n.condition);
                self.write(") ");
                self.print_statement(n.body);
            }
            Statement::ForStatement(n) => self.print_for_statement(n),
            Statement::ForInStatement(n) => {
                let keyword = if n.data.flags.contains(NodeFlags::FOR_EACH) { "for each (" } else { "for (" };
                self.write(keyword);
                self.print_for_initializer(&n.initializer);
                self.write(" in ");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.body);
            }
            Statement::ForOfStatement(n) => {
                let keyword = if n.data.flags.contains(NodeFlags::FOR_AWAIT) { "for await (" } else { "for (" };
                self.write(keyword);
                self.print_for_initializer(&n.initializer);
                self.write(" of ");
                self.print_expression_at(n.expression, ASSIGNMENT);
                self.write(") ");
                self.print_statement(n.body);
            }
            Statement::ContinueStatement(n) => self.print_jump("continue", n),
            Statement::BreakStatement(n) => self.print_jump("break", n),
            Statement::ReturnStatement(n) => {
                self.write("return");
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression(expr);
                }
                self.write(";");
            }
            Statement::WithStatement(n) => {
                self.write("with (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.body);
            }
            Statement::SwitchStatement(n) => self.print_switch_statement(n),
            Statement::LabeledStatement(n) => {
                self.write(n.label.name);
                self.write(": ");
                self.print_statement(n.statement);
            }
            Statement::ThrowStatement(n) => {
                self.write("throw ");
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::TryStatement(n) => self.print_try_statement(n),
            Statement::DebuggerStatement(_) => self.write("debugger;"),
            Statement::FunctionDeclaration(n) => self.print_function(n),
            Statement::ClassDeclaration(n) => self.print_class(n),
            Statement::ImportDeclaration(n) => self.print_import_declaration(n),
            Statement::ExportDeclaration(n) => self.print_export_declaration(n),
        }
    }

    /// An expression in a position where a leading `{`, `function` or
    /// `class` would change how the text is read.
    fn print_leading_expression(&mut self, expr: &Expression<'_>, min: u8) {
        let start = self.output.len();
        self.print_expression_at(expr, min);
        if needs_statement_parens(&self.output[start..]) {
            self.output.insert(start, '(');
            self.write(")");
        }
    }

    fn print_jump(&mut self, keyword: &str, node: &JumpStatement<'_>) {
        self.write(keyword);
        if let Some(label) = &node.label {
            self.write(" ");
            self.write(label.name);
        }
        self.write(";");
    }

    fn print_variable_declarations(&mut self, node: &VariableStatement<'_>) {
        self.write(node.kind.as_str());
        self.write(" ");
        for (i, decl) in node.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression_at(decl.target, ASSIGNMENT);
            if let Some(init) = decl.initializer {
                self.write(" = ");
                self.print_expression_at(init, ASSIGNMENT);
            }
        }
    }

    fn print_if_statement(&mut self, node: &IfStatement<'_>) {
        self.write("if (");
        self.print_expression(node.condition);
        self.write(") ");
        match node.else_statement {
            Some(else_stmt) => {
                if ends_with_open_if(node.then_statement) {
                    self.write("{");
                    self.increase_indent();
                    self.write_newline();
                    self.write_indent();
                    self.print_statement(node.then_statement);
                    self.decrease_indent();
                    self.write_newline();
                    self.write_indent();
                    self.write("}");
                } else {
                    self.print_statement(node.then_statement);
                }
                self.write(" else ");
                self.print_statement(else_stmt);
            }
            None => self.print_statement(node.then_statement),
        }
    }

    fn print_block(&mut self, node: &Block<'_>) {
        self.print_statement_list(node.statements);
    }

    fn print_statement_list(&mut self, statements: &[Statement<'_>]) {
        self.write("{");
        let mut any = false;
        self.increase_indent();
        for stmt in statements.iter().filter(|s| !s.data().is_synthesized()) {
            any = true;
            self.write_newline();
            self.write_indent();
            self.print_statement(stmt);
        }
        self.decrease_indent();
        if any {
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_for_statement(&mut self, node: &ForStatement<'_>) {
        self.write("for (");
        if let Some(init) = &node.initializer {
            self.print_for_initializer(init);
        }
        self.write(";");
        if !is_empty_join(node.condition) {
            self.write(" ");
            self.print_expression(node.condition);
        }
        self.write(";");
        if !is_empty_join(node.incrementor) {
            self.write(" ");
            self.print_expression(node.incrementor);
        }
        self.write(") ");
        self.print_statement(node.body);
    }

    fn print_for_initializer(&mut self, init: &ForInitializer<'_>) {
        let saved = std::mem::replace(&mut self.in_for_init, true);
        match init {
            ForInitializer::Variable(declarations) => self.print_variable_declarations(declarations),
            ForInitializer::Expression(expr) => self.print_leading_expression(expr, SEQUENCE),
        }
        self.in_for_init = saved;
    }

    fn print_switch_statement(&mut self, node: &SwitchStatement<'_>) {
        self.write("switch (");
        self.print_expression(node.expression);
        self.write(") {");
        self.increase_indent();
        for clause in node.clauses.iter() {
            self.write_newline();
            self.write_indent();
            match clause.test {
                Some(test) => {
                    self.write("case ");
                    self.print_expression(test);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.increase_indent();
            for stmt in clause.statements.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
        }
        self.decrease_indent();
        if !node.clauses.is_empty() {
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_try_statement(&mut self, node: &TryStatement<'_>) {
        self.write("try ");
        self.print_block(&node.try_block);
        if let Some(catch) = &node.catch_clause {
            self.write(" catch ");
            if let Some(param) = catch.parameter {
                self.write("(");
                self.print_expression_at(param, ASSIGNMENT);
                self.write(") ");
            }
            self.print_block(&catch.block);
        }
        if let Some(finally) = &node.finally_block {
            self.write(" finally ");
            self.print_block(finally);
        }
    }

    // ========================================================================
    // Modules
    // ========================================================================

    fn print_import_declaration(&mut self, node: &ImportDeclaration<'_>) {
        self.write("import ");
        let mut has_clause = false;
        if let Some(default) = &node.default_binding {
            self.write(default.name);
            has_clause = true;
        }
        if let Some(namespace) = &node.namespace_binding {
            if has_clause {
                self.write(", ");
            }
            self.write("* as ");
            self.write(namespace.name);
            has_clause = true;
        }
        if let Some(named) = node.named_bindings {
            if has_clause {
                self.write(", ");
            }
            self.write("{");
            for (i, specifier) in named.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                if let Some(imported) = &specifier.imported {
                    self.print_module_export_name(imported);
                    self.write(" as ");
                }
                self.write(specifier.local.name);
            }
            self.write("}");
            has_clause = true;
        }
        if has_clause {
            self.write(" from ");
        }
        self.write(node.module_specifier.raw);
        self.write(";");
    }

    fn print_export_declaration(&mut self, node: &ExportDeclaration<'_>) {
        self.write("export ");
        match &node.clause {
            ExportClause::Star { alias, module_specifier } => {
                self.write("*");
                if let Some(alias) = alias {
                    self.write(" as ");
                    self.print_module_export_name(alias);
                }
                self.write(" from ");
                self.write(module_specifier.raw);
                self.write(";");
            }
            ExportClause::Named { specifiers, module_specifier } => {
                self.write("{");
                for (i, specifier) in specifiers.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_module_export_name(&specifier.local);
                    if let Some(exported) = &specifier.exported {
                        self.write(" as ");
                        self.print_module_export_name(exported);
                    }
                }
                self.write("}");
                if let Some(from) = module_specifier {
                    self.write(" from ");
                    self.write(from.raw);
                }
                self.write(";");
            }
            ExportClause::Declaration(statement) => self.print_statement(statement),
            ExportClause::Default { value, .. } => {
                self.write("default ");
                match value {
                    ExportDefaultValue::Function(function) => self.print_function(function),
                    ExportDefaultValue::Class(class) => self.print_class(class),
                    ExportDefaultValue::Expression(expr) => {
                        self.print_leading_expression(expr, ASSIGNMENT);
                        self.write(";");
                    }
                }
            }
        }
    }

    fn print_module_export_name(&mut self, name: &ModuleExportName<'_>) {
        match name {
            ModuleExportName::Identifier(id) => self.write(id.name),
            ModuleExportName::StringLiteral(s) => self.write(s.raw),
        }
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    fn print_function(&mut self, function: &FunctionNode<'_>) {
        if function.is_async() {
            self.write("async ");
        }
        self.write("function");
        if function.is_generator() {
            self.write("*");
        }
        if let Some(ident) = &function.ident {
            self.write(" ");
            self.write(ident.name);
        }
        self.print_function_tail(function);
    }

    /// `(params) { body }`.
    fn print_function_tail(&mut self, function: &FunctionNode<'_>) {
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.print_parameters(function.parameters);
        self.write(" ");
        self.print_block(&function.body);
        self.in_for_init = saved;
    }

    fn print_parameters(&mut self, params: &[Parameter<'_>]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.rest {
                self.write("...");
            }
            match param.pattern {
                Some(pattern) => self.print_expression_at(pattern, ASSIGNMENT),
                None => self.write(param.name.name),
            }
            if let Some(init) = param.initializer {
                self.write(" = ");
                self.print_expression_at(init, ASSIGNMENT);
            }
        }
        self.write(")");
    }

    fn print_arrow_function(&mut self, function: &FunctionNode<'_>) {
        if function.is_async() {
            self.write("async ");
        }
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.print_parameters(function.parameters);
        self.write(" => ");
        let concise = function
            .flags
            .contains(FunctionFlags::HAS_EXPRESSION_BODY)
            .then(|| function.body.statements.last())
            .flatten();
        match concise {
            Some(Statement::ReturnStatement(ReturnStatement { expression: Some(expr), .. })) => {
                self.print_leading_expression(expr, ASSIGNMENT);
            }
            _ => self.print_block(&function.body),
        }
        self.in_for_init = saved;
    }

    fn print_class(&mut self, class: &ClassNode<'_>) {
        self.write("class");
        if let Some(ident) = &class.ident {
            self.write(" ");
            self.write(ident.name);
        }
        if let Some(heritage) = class.heritage {
            self.write(" extends ");
            self.print_expression_at(heritage, MEMBER);
        }
        self.write(" {");
        let explicit_constructor = !class.constructor.flags.contains(FunctionFlags::IS_DEFAULT_CONSTRUCTOR);
        self.increase_indent();
        if explicit_constructor {
            self.write_newline();
            self.write_indent();
            self.write("constructor");
            self.print_function_tail(class.constructor);
        }
        for element in class.elements.iter() {
            self.write_newline();
            self.write_indent();
            match element {
                ClassElement::Method(method) => self.print_method(method),
                ClassElement::Accessor(accessor) => self.print_accessor(accessor, true),
            }
        }
        self.decrease_indent();
        if explicit_constructor || !class.elements.is_empty() {
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_method(&mut self, method: &MethodDefinition<'_>) {
        if method.is_static {
            self.write("static ");
        }
        if method.function.is_async() {
            self.write("async ");
        }
        if method.function.is_generator() {
            self.write("*");
        }
        self.print_property_key(&method.key);
        self.print_function_tail(method.function);
    }

    /// A getter and a setter of one accessor. Class elements go on separate
    /// lines, object members are separated by a comma.
    fn print_accessor(&mut self, accessor: &AccessorProperty<'_>, in_class: bool) {
        let halves = [(accessor.getter, "get "), (accessor.setter, "set ")];
        let mut first = true;
        for (function, keyword) in halves {
            let Some(function) = function else { continue };
            if !first {
                if in_class {
                    self.write_newline();
                    self.write_indent();
                } else {
                    self.write(", ");
                }
            }
            first = false;
            if accessor.is_static {
                self.write("static ");
            }
            self.write(keyword);
            self.print_property_key(&accessor.key);
            self.print_function_tail(function);
        }
    }

    fn print_property_key(&mut self, key: &PropertyKey<'_>) {
        match key {
            PropertyKey::Identifier(id) => self.write(id.name),
            PropertyKey::StringLiteral(s) => self.write(s.raw),
            PropertyKey::NumericLiteral(n) => self.write(n.raw),
            PropertyKey::BigIntLiteral(n) => self.write(n.raw),
            PropertyKey::Computed(computed) => {
                self.write("[");
                self.print_expression_at(computed.expression, ASSIGNMENT);
                self.write("]");
            }
        }
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression<'_>) {
        self.print_expression_at(expr, SEQUENCE);
    }

    /// Print `expr` in a position that requires at least precedence `min`,
    /// adding parentheses when it binds looser.
    fn print_expression_at(&mut self, expr: &Expression<'_>, min: u8) {
        let in_operator = self.in_for_init
            && matches!(expr.unwrap_join(), Expression::Binary(n) if n.operator == SyntaxKind::InKeyword);
        if precedence(expr) < min || in_operator {
            let saved = std::mem::replace(&mut self.in_for_init, false);
            self.write("(");
            self.print_expression_inner(expr);
            self.write(")");
            self.in_for_init = saved;
        } else {
            self.print_expression_inner(expr);
        }
    }

    fn print_expression_inner(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Identifier(id) => self.write(id.name),
            Expression::NullLiteral(_) => self.write("null"),
            Expression::BooleanLiteral(n) => self.write(if n.value { "true" } else { "false" }),
            Expression::NumericLiteral(n) => self.write(n.raw),
            Expression::BigIntLiteral(n) => self.write(n.raw),
            Expression::StringLiteral(n) => self.write(n.raw),
            Expression::RegularExpressionLiteral(n) => {
                self.write("/");
                self.write(n.pattern);
                self.write("/");
                self.write(n.flags);
            }
            Expression::TemplateLiteral(n) => self.print_template(n),
            Expression::TaggedTemplate(n) => {
                self.print_member_object(n.tag, false);
                self.print_template(n.template);
            }
            Expression::ArrayLiteral(n) => {
                self.write("[");
                for (i, element) in n.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expression_at(element, ASSIGNMENT);
                }
                if matches!(n.elements.last(), Some(Expression::Omitted(_))) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::ObjectLiteral(n) => self.print_object_literal(n),
            Expression::FunctionExpression(function) => self.print_function(function),
            Expression::ArrowFunction(function) => self.print_arrow_function(function),
            Expression::ClassExpression(class) => self.print_class(class),
            Expression::PrefixUnary(n) => {
                let text = operator_to_string(n.operator);
                self.write(text);
                let keyword = text.starts_with(|c: char| c.is_ascii_alphabetic());
                let same_sign = match n.operand.unwrap_join() {
                    Expression::PrefixUnary(inner) => {
                        let inner_text = operator_to_string(inner.operator);
                        inner_text.starts_with('+') && text.starts_with('+')
                            || inner_text.starts_with('-') && text.starts_with('-')
                    }
                    _ => false,
                };
                if keyword || same_sign {
                    self.write(" ");
                }
                self.print_expression_at(n.operand, UNARY);
            }
            Expression::PostfixUnary(n) => {
                self.print_expression_at(n.operand, POSTFIX);
                self.write(operator_to_string(n.operator));
            }
            Expression::Binary(n) => self.print_binary(n.left, n.operator, n.right),
            Expression::Logical(n) => self.print_binary(n.left, n.operator, n.right),
            Expression::Conditional(n) => {
                self.print_expression_at(n.condition, COALESCE);
                self.write(" ? ");
                self.print_expression_at(n.when_true, ASSIGNMENT);
                self.write(" : ");
                self.print_expression_at(n.when_false, ASSIGNMENT);
            }
            Expression::Assignment(n) => {
                self.print_expression_at(n.target, POSTFIX);
                self.write(" ");
                self.write(operator_to_string(n.operator));
                self.write(" ");
                self.print_expression_at(n.value, ASSIGNMENT);
            }
            Expression::Sequence(n) => {
                for (i, e) in n.expressions.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expression_at(e, ASSIGNMENT);
                }
            }
            Expression::Call(n) => {
                self.print_member_object(n.callee, n.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
                if n.data.flags.contains(NodeFlags::OPTIONAL) {
                    self.write("?.");
                }
                self.print_arguments(n.arguments);
            }
            Expression::New(n) => {
                self.write("new ");
                if contains_call(n.callee) || precedence(n.callee) < MEMBER || is_optional_chain(n.callee) {
                    self.write("(");
                    self.print_expression_inner(n.callee);
                    self.write(")");
                } else {
                    self.print_expression_inner(n.callee);
                }
                if let Some(arguments) = n.arguments {
                    self.print_arguments(arguments);
                }
            }
            Expression::PropertyAccess(n) => {
                self.print_member_object(n.object, n.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
                self.write(if n.data.flags.contains(NodeFlags::OPTIONAL) { "?." } else { "." });
                self.write(n.name.name);
            }
            Expression::ElementAccess(n) => {
                self.print_member_object(n.object, n.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
                self.write(if n.data.flags.contains(NodeFlags::OPTIONAL) { "?.[" } else { "[" });
                self.print_expression(n.index);
                self.write("]");
            }
            Expression::Spread(n) => {
                self.write("...");
                self.print_expression_at(n.expression, ASSIGNMENT);
            }
            Expression::Yield(n) => {
                self.write("yield");
                if n.data.flags.contains(NodeFlags::DELEGATE) {
                    self.write("*");
                }
                if let Some(argument) = n.expression {
                    self.write(" ");
                    self.print_expression_at(argument, ASSIGNMENT);
                }
            }
            Expression::Await(n) => {
                self.write("await ");
                self.print_expression_at(n.expression, UNARY);
            }
            Expression::JoinPredecessor(n) => {
                if let Some(inner) = n.expression {
                    self.print_expression_inner(inner);
                }
            }
            Expression::ThisKeyword(_) => self.write("this"),
            Expression::SuperKeyword(_) => self.write("super"),
            Expression::NewTarget(_) => self.write("new.target"),
            Expression::Omitted(_) | Expression::Error(_) => {}
        }
    }

    fn print_binary(&mut self, left: &Expression<'_>, operator: SyntaxKind, right: &Expression<'_>) {
        let prec = binary_precedence(operator);
        let (left_min, right_min) = if operator == SyntaxKind::AsteriskAsteriskToken {
            (POSTFIX, EXPONENT)
        } else {
            (prec, prec + 1)
        };
        let coalesce = operator == SyntaxKind::QuestionQuestionToken;
        if coalesce && is_short_circuit(left) {
            self.print_expression_at(left, PRIMARY);
        } else {
            self.print_expression_at(left, left_min);
        }
        self.write(" ");
        self.write(operator_to_string(operator));
        self.write(" ");
        if coalesce && is_short_circuit(right) {
            self.print_expression_at(right, PRIMARY);
        } else {
            self.print_expression_at(right, right_min);
        }
    }

    /// The object of a member access or the callee of a call. An optional
    /// chain is parenthesized when the outer link does not continue it.
    fn print_member_object(&mut self, object: &Expression<'_>, continues_chain: bool) {
        let breaks_chain = is_optional_chain(object) && !continues_chain;
        if precedence(object) < MEMBER || breaks_chain || is_bare_integer(object) {
            let saved = std::mem::replace(&mut self.in_for_init, false);
            self.write("(");
            self.print_expression_inner(object);
            self.write(")");
            self.in_for_init = saved;
        } else {
            self.print_expression_inner(object);
        }
    }

    fn print_arguments(&mut self, arguments: &[Expression<'_>]) {
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.write("(");
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression_at(arg, ASSIGNMENT);
        }
        self.write(")");
        self.in_for_init = saved;
    }

    fn print_template(&mut self, template: &TemplateLiteral<'_>) {
        self.write("`");
        for (i, quasi) in template.quasis.iter().enumerate() {
            if i > 0 {
                self.write("}");
            }
            self.write(quasi.raw);
            if let Some(expr) = template.expressions.get(i) {
                self.write("${");
                self.print_expression(expr);
            }
        }
        self.write("`");
    }

    fn print_object_literal(&mut self, node: &ObjectLiteralExpression<'_>) {
        let saved = std::mem::replace(&mut self.in_for_init, false);
        self.write("{");
        for (i, prop) in node.properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match prop {
                ObjectLiteralElement::PropertyAssignment(p) => {
                    self.print_property_key(&p.key);
                    self.write(": ");
                    self.print_expression_at(p.value, ASSIGNMENT);
                }
                ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                    self.write(p.name.name);
                    if let Some(init) = p.initializer {
                        self.write(" = ");
                        self.print_expression_at(init, ASSIGNMENT);
                    }
                }
                ObjectLiteralElement::Spread(s) => {
                    self.write("...");
                    self.print_expression_at(s.expression, ASSIGNMENT);
                }
                ObjectLiteralElement::Method(m) => self.print_method(m),
                ObjectLiteralElement::Accessor(a) => self.print_accessor(a, false),
            }
        }
        self.write("}");
        self.in_for_init = saved;
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

fn is_empty_join(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::JoinPredecessor(JoinPredecessorExpression { expression: None, .. }))
}

fn operator_to_string(kind: SyntaxKind) -> &'static str {
    kind.token_text().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use esparse_options::ParserOptions;

    fn print_script(source: &str) -> String {
        let arena = Bump::new();
        let output = esparse_parser::parse_script(&arena, "test.js", source, ParserOptions::default())
            .expect("parse failed");
        assert!(!output.has_errors(), "{source}: {:?}", output.diagnostics);
        print_program(output.program)
    }

    fn print_module(source: &str) -> String {
        let arena = Bump::new();
        let output = esparse_parser::parse_module(&arena, "test.mjs", source, ParserOptions::default())
            .expect("parse failed");
        assert!(!output.has_errors(), "{source}: {:?}", output.diagnostics);
        print_program(output.program)
    }

    #[test]
    fn test_operator_to_string() {
        assert_eq!(operator_to_string(SyntaxKind::PlusToken), "+");
        assert_eq!(operator_to_string(SyntaxKind::AsteriskAsteriskToken), "**");
        assert_eq!(operator_to_string(SyntaxKind::QuestionQuestionToken), "??");
        assert_eq!(operator_to_string(SyntaxKind::TypeOfKeyword), "typeof");
    }

    #[test]
    fn test_statement_start_detection() {
        assert!(needs_statement_parens("{a: 1}"));
        assert!(needs_statement_parens("function() {}()"));
        assert!(needs_statement_parens("class {}"));
        assert!(!needs_statement_parens("functional()"));
        assert!(!needs_statement_parens("classes.x"));
        assert!(needs_statement_parens("let[0] = 1"));
    }

    #[test]
    fn test_precedence_parentheses() {
        assert_eq!(print_script("1 + 2 * 3"), "1 + 2 * 3;\n");
        assert_eq!(print_script("(1 + 2) * 3"), "(1 + 2) * 3;\n");
        assert_eq!(print_script("a - (b - c)"), "a - (b - c);\n");
        assert_eq!(print_script("2 ** 3 ** 2"), "2 ** 3 ** 2;\n");
        assert_eq!(print_script("(2 ** 3) ** 2"), "(2 ** 3) ** 2;\n");
        assert_eq!(print_script("(-a) ** 2"), "(-a) ** 2;\n");
        assert_eq!(print_script("a ?? (b || c)"), "a ?? (b || c);\n");
        assert_eq!(print_script("(a, b)"), "a, b;\n");
        assert_eq!(print_script("x = (a, b)"), "x = (a, b);\n");
    }

    #[test]
    fn test_unary_spacing() {
        assert_eq!(print_script("- -a"), "- -a;\n");
        assert_eq!(print_script("typeof x"), "typeof x;\n");
        assert_eq!(print_script("!(a && b)"), "!(a && b);\n");
    }

    #[test]
    fn test_member_and_new() {
        assert_eq!(print_script("(1).toString()"), "(1).toString();\n");
        assert_eq!(print_script("new (f())()"), "new (f())();\n");
        assert_eq!(print_script("new a.b(c)"), "new a.b(c);\n");
        assert_eq!(print_script("a?.b.c"), "a?.b.c;\n");
        assert_eq!(print_script("(a?.b).c"), "(a?.b).c;\n");
    }

    #[test]
    fn test_leading_function_and_object() {
        assert_eq!(print_script("(function() {})()"), "(function() {}());\n");
        assert_eq!(print_script("({a: 1})"), "({a: 1});\n");
        assert_eq!(print_script("x = () => ({})"), "x = () => ({});\n");
    }

    #[test]
    fn test_default_constructor_is_omitted() {
        assert_eq!(print_script("class A extends B {}"), "class A extends B {}\n");
        assert_eq!(
            print_script("class A { constructor(x) { this.x = x; } get y() { return 1; } }"),
            "class A {\n    constructor(x) {\n        this.x = x;\n    }\n    get y() {\n        return 1;\n    }\n}\n"
        );
    }

    #[test]
    fn test_for_head() {
        assert_eq!(print_script("for (;;) {}"), "for (;;) {}\n");
        assert_eq!(print_script("for (var i = 0; i < n; i++) f(i);"), "for (var i = 0; i < n; i++) f(i);\n");
        assert_eq!(print_script("for (var x = (a in b);;) {}"), "for (var x = (a in b);;) {}\n");
        assert_eq!(print_script("for (const [k, v] of m) {}"), "for (const [k, v] of m) {}\n");
    }

    #[test]
    fn test_modules() {
        let source = "import d, {a as b, c} from \"m\";\nexport {b as e};\nexport * as ns from \"n\";\nexport default 1;\n";
        assert_eq!(print_module(source), source);
    }

    #[test]
    fn test_print_parse_print_fixpoint() {
        let source = r#"
            "use strict";
            var a = 1, b = [1, , 2,], {c, d: [e = 3]} = obj;
            function* gen(x, y = 2, ...rest) { yield* x; yield; }
            async function run() { await (a || b); for await (const v of it) {} }
            label: for (let i = 0; i < 10; i++) { if (i) continue label; else break; }
            switch (a) { case 1: f(); break; default: }
            try { g(); } catch ({message}) { h(message); } finally { k(); }
            try {} catch {}
            x = a ? b : c ? d : e;
            y = `t${a + 1}u${b}`;
            z = tag`raw\n${c}`;
            o = {p: 1, [q]: 2, m() {}, get g() { return 1; }, set g(v) {}, ...s, async *ag() {}};
            f = async (a, {b}) => a + b;
            new Foo;
            do x++; while (x < 5);
            class K extends (a, b) { static s() {} *[Symbol.iterator]() {} }
            if (a) if (b) c(); else d();
        "#;
        let once = print_script(source);
        let twice = print_script(&once);
        assert_eq!(once, twice);
    }
}
