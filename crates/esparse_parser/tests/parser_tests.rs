//! Parser integration tests.
//!
//! Verifies the IR shapes, flags, Module Records and early errors the parser
//! produces from ECMAScript source.

use bumpalo::Bump;
use esparse_ast::function_table::FunctionTable;
use esparse_ast::module::{ExportEntry, ImportEntry, ImportName};
use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::{BlockFlags, FunctionFlags, FunctionKind, NodeFlags, VariableKind};
use esparse_diagnostics::{messages, DiagnosticMessage};
use esparse_options::{EcmaVersion, ParserOptions};
use esparse_parser::{parse_expression, parse_function_body, parse_module, parse_script, LazyReparse, ParseOutput, Parser};

/// Helper: parse a script with the default options.
fn script<'a>(arena: &'a Bump, source: &'a str) -> ParseOutput<'a> {
    script_with(arena, source, ParserOptions::default())
}

fn script_with<'a>(arena: &'a Bump, source: &'a str, options: ParserOptions) -> ParseOutput<'a> {
    parse_script(arena, "test.js", source, options).expect("parse aborted")
}

fn module<'a>(arena: &'a Bump, source: &'a str) -> ParseOutput<'a> {
    parse_module(arena, "test.mjs", source, ParserOptions::default()).expect("parse aborted")
}

fn has_code(output: &ParseOutput<'_>, message: &DiagnosticMessage) -> bool {
    output.diagnostics.diagnostics().iter().any(|d| d.code == message.code)
}

/// Helper: assert that a script parses without diagnostics.
fn assert_valid(source: &str) {
    let arena = Bump::new();
    let output = script(&arena, source);
    assert!(!output.has_errors(), "source: {source}\n{:?}", output.diagnostics.diagnostics());
}

/// Helper: assert that a script reports `message`.
fn assert_error(source: &str, message: &DiagnosticMessage) {
    let arena = Bump::new();
    let output = script(&arena, source);
    assert!(
        has_code(&output, message),
        "source: {source}\nexpected {}: {}\ngot {:?}",
        message.code,
        message.message,
        output.diagnostics.diagnostics()
    );
}

fn statements<'a>(output: &ParseOutput<'a>) -> Vec<&'a Statement<'a>> {
    output.program.body.statements.iter().filter(|s| !s.data().is_synthesized()).collect()
}

fn function_declaration<'a>(statement: &'a Statement<'a>) -> &'a FunctionNode<'a> {
    match statement {
        Statement::FunctionDeclaration(function) => function,
        other => panic!("expected a function declaration, got {other:?}"),
    }
}

fn class_declaration<'a>(statement: &'a Statement<'a>) -> &'a ClassNode<'a> {
    match statement {
        Statement::ClassDeclaration(class) => class,
        other => panic!("expected a class declaration, got {other:?}"),
    }
}

// ============================================================================
// Statements and automatic semicolon insertion
// ============================================================================

#[test]
fn test_parse_variable_declarations() {
    let arena = Bump::new();
    let output = script(&arena, "var a = 1, b; let c = 2; const d = 3;");
    assert!(!output.has_errors());
    let kinds: Vec<_> = statements(&output)
        .iter()
        .map(|s| match s {
            Statement::VariableStatement(v) => (v.kind, v.declarations.len()),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(kinds, vec![(VariableKind::Var, 2), (VariableKind::Let, 1), (VariableKind::Const, 1)]);
}

#[test]
fn test_asi_after_return() {
    let arena = Bump::new();
    let output = script(&arena, "function f() { return\n1 }");
    assert!(!output.has_errors());
    let function = function_declaration(statements(&output)[0]);
    let body: Vec<_> = function.source_statements().collect();
    assert_eq!(body.len(), 2);
    assert!(matches!(body[0], Statement::ReturnStatement(ReturnStatement { expression: None, .. })));
    assert!(matches!(body[1], Statement::ExpressionStatement(_)));
}

#[test]
fn test_asi_before_parenthesized_statement_after_literal() {
    let arena = Bump::new();
    let output = script(&arena, "a=1\n(b)=2");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let stmts = statements(&output);
    assert_eq!(stmts.len(), 2);
    for statement in stmts {
        let Statement::ExpressionStatement(s) = statement else {
            panic!("expected expression statement");
        };
        assert!(matches!(s.expression, Expression::Assignment(_)));
    }
}

#[test]
fn test_asi_before_prefix_increment() {
    let arena = Bump::new();
    let output = script(&arena, "a\n++b");
    assert!(!output.has_errors());
    let stmts = statements(&output);
    assert_eq!(stmts.len(), 2);
    let Statement::ExpressionStatement(second) = stmts[1] else {
        panic!("expected expression statement");
    };
    assert!(matches!(
        second.expression,
        Expression::PrefixUnary(PrefixUnaryExpression { operator: SyntaxKind::PlusPlusToken, .. })
    ));
}

#[test]
fn test_missing_semicolon_on_one_line() {
    assert_error("a b", &messages::_0_EXPECTED);
}

#[test]
fn test_throw_requires_expression_on_same_line() {
    assert_error("throw\nx;", &messages::LINE_BREAK_NOT_PERMITTED_HERE);
}

#[test]
fn test_control_flow_statements() {
    assert_valid(
        "outer: for (var i = 0; i < 3; i++) { for (;;) { if (i) continue outer; break outer; } }\n\
         do { x--; } while (x > 0)\n\
         while (false) {}\n\
         switch (k) { case 1: case 2: f(); break; default: g(); }\n\
         try { t(); } catch (e) { c(e); } finally { done(); }\n\
         debugger;",
    );
}

#[test]
fn test_jump_errors() {
    assert_error("return 1;", &messages::RETURN_OUTSIDE_FUNCTION);
    assert_error("break;", &messages::BREAK_OUTSIDE_ITERATION_OR_SWITCH);
    assert_error("continue;", &messages::CONTINUE_OUTSIDE_ITERATION);
    assert_error("x: { for (;;) { continue x; } }", &messages::CONTINUE_TARGET_NOT_ITERATION);
    assert_error("while (1) { break nowhere; }", &messages::UNDEFINED_LABEL_0);
    assert_error("a: a: ;", &messages::DUPLICATE_LABEL_0);
}

#[test]
fn test_switch_and_try_errors() {
    assert_error("switch (x) { default: default: }", &messages::DUPLICATE_DEFAULT_CLAUSE);
    assert_error("try {}", &messages::CATCH_OR_FINALLY_EXPECTED);
}

#[test]
fn test_declaration_errors() {
    assert_error("const a;", &messages::CONST_DECLARATIONS_MUST_BE_INITIALIZED);
    assert_error("var [a];", &messages::DESTRUCTURING_DECLARATION_MUST_HAVE_INITIALIZER);
    assert_error("let a; let a;", &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0);
    assert_error("if (x) let y = 1;", &messages::_0_DECLARATIONS_ONLY_IN_BLOCK);
}

#[test]
fn test_labelled_function_declarations() {
    assert_valid("l: function f() {}");
    assert_valid("a: b: function f() {}");
    assert_valid("if (x) function f() {}");
    assert_valid("if (x) l: ;");

    let rejected = [
        "if (x) l: function f() {}",
        "if (x) ; else l: function f() {}",
        "while (1) l: function f() {}",
        "for (;;) l: function f() {}",
        "do l: function f() {} while (0)",
        "for (var k in o) l: function f() {}",
        "with (o) l: function f() {}",
        "while (1) a: b: function f() {}",
        "while (1) function f() {}",
        "l: function* g() {}",
        "\"use strict\"; l: function f() {}",
    ];
    for source in rejected {
        assert_error(source, &messages::FUNCTION_DECLARATION_NOT_ALLOWED_HERE);
    }
}

#[test]
fn test_var_may_redeclare_var() {
    assert_valid("var a; var a; function f(b) { var b; }");
}

#[test]
fn test_let_as_identifier_in_sloppy_mode() {
    assert_valid("var let = 1; let\nx = 2;");
}

#[test]
fn test_recovery_continues_after_broken_statement() {
    let arena = Bump::new();
    let output = script(&arena, "var = ;\nvar ok = 1;");
    assert!(output.has_errors());
    let stmts = statements(&output);
    assert_eq!(stmts.len(), 2);
    assert!(matches!(stmts[0], Statement::ErrorStatement(_)));
    assert!(matches!(stmts[1], Statement::VariableStatement(_)));
}

// ============================================================================
// Strict mode
// ============================================================================

#[test]
fn test_strict_eval_binding() {
    assert_error("\"use strict\"; var eval = 1;", &messages::INVALID_USE_OF_0_IN_STRICT_MODE);
    assert_valid("var eval = 1;");
}

#[test]
fn test_strict_option_applies_from_the_start() {
    let arena = Bump::new();
    let output = script_with(&arena, "var arguments;", ParserOptions::default().with_strict(true));
    assert!(has_code(&output, &messages::INVALID_USE_OF_0_IN_STRICT_MODE));
    assert!(output.program.is_strict());
}

#[test]
fn test_directive_prologue() {
    let arena = Bump::new();
    let output = script(&arena, "'use strict'; x;");
    assert!(output.program.is_strict());
    let Statement::ExpressionStatement(directive) = statements(&output)[0] else {
        panic!("expected directive");
    };
    assert!(directive.data.flags.contains(NodeFlags::DIRECTIVE));
}

#[test]
fn test_strict_mode_errors() {
    assert_error("\"use strict\"; with (a) {}", &messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE);
    assert_error("\"use strict\"; delete x;", &messages::DELETE_OF_IDENTIFIER_IN_STRICT_MODE);
    assert_error("\"use strict\"; var implements;", &messages::_0_IS_A_RESERVED_WORD_IN_STRICT_MODE);
    assert_error("\"use strict\"; function f(a, a) {}", &messages::DUPLICATE_PARAMETER_NAME_0);
    assert_error("function f(a = 1) { \"use strict\"; }", &messages::USE_STRICT_WITH_NON_SIMPLE_PARAMETERS);
}

#[test]
fn test_function_body_directive_revalidates_name() {
    assert_error("function eval() { \"use strict\"; }", &messages::INVALID_USE_OF_0_IN_STRICT_MODE);
    assert_valid("function eval() {}");
}

// ============================================================================
// Expressions
// ============================================================================

fn expression<'a>(arena: &'a Bump, source: &'a str) -> &'a Expression<'a> {
    let output = parse_expression(arena, "test.js", source, ParserOptions::default()).expect("parse aborted");
    assert!(!output.diagnostics.has_errors(), "{:?}", output.diagnostics.diagnostics());
    output.expression
}

#[test]
fn test_multiplication_binds_tighter() {
    let arena = Bump::new();
    let Expression::Binary(sum) = expression(&arena, "1 + 2 * 3") else {
        panic!("expected binary");
    };
    assert_eq!(sum.operator, SyntaxKind::PlusToken);
    assert!(matches!(sum.left, Expression::NumericLiteral(NumericLiteral { raw: "1", .. })));
    assert!(matches!(
        sum.right,
        Expression::Binary(BinaryExpression { operator: SyntaxKind::AsteriskToken, .. })
    ));
}

#[test]
fn test_exponent_is_right_associative() {
    let arena = Bump::new();
    let Expression::Binary(power) = expression(&arena, "2 ** 3 ** 2") else {
        panic!("expected binary");
    };
    assert_eq!(power.operator, SyntaxKind::AsteriskAsteriskToken);
    assert!(matches!(power.left, Expression::NumericLiteral(NumericLiteral { raw: "2", .. })));
    let Expression::Binary(inner) = power.right else {
        panic!("expected nested exponent");
    };
    assert_eq!(inner.operator, SyntaxKind::AsteriskAsteriskToken);
}

#[test]
fn test_subtraction_is_left_associative() {
    let arena = Bump::new();
    let Expression::Binary(outer) = expression(&arena, "a - b - c") else {
        panic!("expected binary");
    };
    assert!(matches!(outer.left, Expression::Binary(_)));
    assert!(outer.right.is_identifier_named("c"));
}

#[test]
fn test_logical_and_conditional() {
    let arena = Bump::new();
    let Expression::Conditional(conditional) = expression(&arena, "a || b && c ? d : e") else {
        panic!("expected conditional");
    };
    let Expression::Logical(or) = conditional.condition else {
        panic!("expected logical");
    };
    assert_eq!(or.operator, SyntaxKind::BarBarToken);
    assert!(matches!(
        or.right,
        Expression::Logical(LogicalExpression { operator: SyntaxKind::AmpersandAmpersandToken, .. })
    ));
}

#[test]
fn test_operator_mixing_errors() {
    assert_error("a ?? b || c;", &messages::_0_AND_NULLISH_CANNOT_BE_MIXED_WITHOUT_PARENTHESES);
    assert_error("-2 ** 2;", &messages::UNARY_EXPRESSION_NOT_ALLOWED_BEFORE_EXPONENTIATION);
    assert_valid("(a ?? b) || c; (-2) ** 2;");
}

#[test]
fn test_optional_chain_flags() {
    let arena = Bump::new();
    let Expression::PropertyAccess(outer) = expression(&arena, "a?.b.c") else {
        panic!("expected property access");
    };
    assert!(outer.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
    assert!(!outer.data.flags.contains(NodeFlags::OPTIONAL));
    let Expression::PropertyAccess(inner) = outer.object else {
        panic!("expected property access");
    };
    assert!(inner.data.flags.contains(NodeFlags::OPTIONAL_CHAIN | NodeFlags::OPTIONAL));
    assert_error("new a?.b();", &messages::OPTIONAL_CHAIN_NOT_ALLOWED_IN_NEW_EXPRESSION);
    assert_error("a?.b`t`;", &messages::TAGGED_TEMPLATE_EXPRESSIONS_NOT_PERMITTED_IN_OPTIONAL_CHAIN);
}

#[test]
fn test_direct_eval_marks_functions() {
    let arena = Bump::new();
    let output = script(&arena, "function f() { eval('x'); }");
    let function = function_declaration(statements(&output)[0]);
    assert!(function.flags.contains(FunctionFlags::HAS_EVAL));
    assert!(output.program.flags.contains(FunctionFlags::HAS_NESTED_EVAL));
    let Statement::ExpressionStatement(call) = function.source_statements().next().expect("body") else {
        panic!("expected call statement");
    };
    assert!(call.expression.data().flags.contains(NodeFlags::DIRECT_EVAL));
}

#[test]
fn test_assignment_targets() {
    assert_error("1 = 2;", &messages::INVALID_ASSIGNMENT_TARGET);
    assert_error("a + b = c;", &messages::INVALID_ASSIGNMENT_TARGET);
    assert_valid("a.b = c[d] = (e) = 1; [x, y] = [y, x]; ({p: q, r = 1} = s);");
}

#[test]
fn test_template_and_regex_literals() {
    let arena = Bump::new();
    let Expression::TemplateLiteral(template) = expression(&arena, "`a${b}c`") else {
        panic!("expected template");
    };
    assert_eq!(template.quasis.len(), 2);
    assert_eq!(template.expressions.len(), 1);
    assert_eq!(template.quasis[0].raw, "a");
    assert_eq!(template.quasis[1].cooked, Some("c"));

    let arena = Bump::new();
    let Expression::RegularExpressionLiteral(regex) = expression(&arena, "/ab+c/gi") else {
        panic!("expected regex");
    };
    assert_eq!(regex.pattern, "ab+c");
    assert_eq!(regex.flags, "gi");
}

#[test]
fn test_new_target_requires_function() {
    assert_error("new.target;", &messages::NEW_TARGET_OUTSIDE_FUNCTION);
    assert_valid("function F() { return new.target; }");
}

#[test]
fn test_object_literal_errors() {
    assert_error("({ get x(a) {} });", &messages::GETTER_CANNOT_HAVE_PARAMETERS);
    assert_error("({ set x() {} });", &messages::SETTER_MUST_HAVE_ONE_PARAMETER);
    assert_error("({ __proto__: a, __proto__: b });", &messages::DUPLICATE_PROTO_PROPERTY);
    assert_error("({ a = 1 });", &messages::INVALID_SHORTHAND_INITIALIZER);
}

#[test]
fn test_accessor_pairs_merge() {
    let arena = Bump::new();
    let Expression::ObjectLiteral(object) = expression(&arena, "({ get x() { return 1; }, set x(v) {}, y: 2 })") else {
        panic!("expected object literal");
    };
    assert_eq!(object.properties.len(), 2);
    let ObjectLiteralElement::Accessor(accessor) = &object.properties[0] else {
        panic!("expected accessor");
    };
    assert!(accessor.getter.is_some() && accessor.setter.is_some());
}

#[test]
fn test_repeated_data_properties_are_kept() {
    let arena = Bump::new();
    let Expression::ObjectLiteral(object) = expression(&arena, "({a: f(), a: g()})") else {
        panic!("expected object literal");
    };
    assert_eq!(object.properties.len(), 2);
    let values: Vec<_> = object
        .properties
        .iter()
        .map(|property| match property {
            ObjectLiteralElement::PropertyAssignment(p) => match p.value {
                Expression::Call(call) => call.callee,
                other => panic!("expected call, got {other:?}"),
            },
            other => panic!("expected property assignment, got {other:?}"),
        })
        .collect();
    assert!(values[0].is_identifier_named("f"));
    assert!(values[1].is_identifier_named("g"));
}

#[test]
fn test_accessor_after_data_property_is_not_merged() {
    let arena = Bump::new();
    let Expression::ObjectLiteral(object) = expression(&arena, "({get a() {}, a: 1, set a(v) {}})") else {
        panic!("expected object literal");
    };
    assert_eq!(object.properties.len(), 3);
    let ObjectLiteralElement::Accessor(getter) = &object.properties[0] else {
        panic!("expected accessor");
    };
    assert!(getter.getter.is_some() && getter.setter.is_none());
    let ObjectLiteralElement::Accessor(setter) = &object.properties[2] else {
        panic!("expected accessor");
    };
    assert!(setter.getter.is_none() && setter.setter.is_some());

    // A getter and setter written after the data property still pair up.
    let arena = Bump::new();
    let Expression::ObjectLiteral(object) = expression(&arena, "({a: 1, get a() {}, b, set a(v) {}})") else {
        panic!("expected object literal");
    };
    assert_eq!(object.properties.len(), 3);
    let ObjectLiteralElement::Accessor(accessor) = &object.properties[1] else {
        panic!("expected accessor");
    };
    assert!(accessor.getter.is_some() && accessor.setter.is_some());
}

// ============================================================================
// Patterns
// ============================================================================

#[test]
fn test_rest_element_must_be_last() {
    assert_error("var [...a, b] = c;", &messages::REST_ELEMENT_MUST_BE_LAST);
    assert_error("[...a, b] = c;", &messages::REST_ELEMENT_MUST_BE_LAST);
    assert_error("({...a, b} = c);", &messages::REST_ELEMENT_MUST_BE_LAST);
    assert_error("var [...a,] = c;", &messages::REST_ELEMENT_MUST_BE_LAST);
    assert_error("function f(...a, b) {}", &messages::REST_PARAMETER_MUST_BE_LAST);
    assert_error("((...a, b) => a);", &messages::REST_PARAMETER_MUST_BE_LAST);
    assert_valid("var [a, ...b] = c; var {d, ...e} = f; function g(h, ...i) {} ((...j) => j);");
}

#[test]
fn test_rest_element_cannot_have_initializer() {
    assert_error("[...a = 1] = b;", &messages::REST_ELEMENT_CANNOT_HAVE_INITIALIZER);
}

#[test]
fn test_repeated_key_binds_every_target() {
    assert_error("let {a: x, a: y} = o; let x = 1;", &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0);
    assert_error("let {a: x, a: y} = o; let y = 1;", &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0);
    assert_error("let {a, a} = o;", &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0);
    assert_valid("var {a: x, a: y} = o; var {b, b} = o;");

    let arena = Bump::new();
    let output = script(&arena, "let {a: x, a: y} = o;");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let Statement::VariableStatement(statement) = statements(&output)[0] else {
        panic!("expected variable statement");
    };
    let Expression::ObjectLiteral(pattern) = statement.declarations[0].target else {
        panic!("expected object pattern");
    };
    assert_eq!(pattern.properties.len(), 2);
}

#[test]
fn test_repeated_key_assigns_every_target() {
    let arena = Bump::new();
    let output = script(&arena, "({a: x, a: y} = o);");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let Statement::ExpressionStatement(statement) = statements(&output)[0] else {
        panic!("expected expression statement");
    };
    let Expression::Assignment(assignment) = statement.expression else {
        panic!("expected assignment, got {:?}", statement.expression);
    };
    let Expression::ObjectLiteral(pattern) = assignment.target else {
        panic!("expected object pattern");
    };
    let targets: Vec<_> = pattern
        .properties
        .iter()
        .map(|property| match property {
            ObjectLiteralElement::PropertyAssignment(p) => p.value,
            other => panic!("expected property assignment, got {other:?}"),
        })
        .collect();
    assert_eq!(targets.len(), 2);
    assert!(targets[0].is_identifier_named("x"));
    assert!(targets[1].is_identifier_named("y"));
}

#[test]
fn test_destructuring_declaration_shape() {
    let arena = Bump::new();
    let output = script(&arena, "var {a, b: [c = 1]} = d;");
    assert!(!output.has_errors());
    let Statement::VariableStatement(statement) = statements(&output)[0] else {
        panic!("expected variable statement");
    };
    let declaration = &statement.declarations[0];
    assert!(matches!(declaration.target, Expression::ObjectLiteral(_)));
    assert!(declaration.initializer.is_some_and(|init| init.is_identifier_named("d")));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_flags() {
    let arena = Bump::new();
    let output = script(&arena, "async function f() { await g(); } function* h() { yield 1; } function k(a, b = 1) { return this; }");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let stmts = statements(&output);
    let f = function_declaration(stmts[0]);
    assert!(f.is_async());
    let h = function_declaration(stmts[1]);
    assert!(h.is_generator());
    let k = function_declaration(stmts[2]);
    assert!(k.flags.contains(FunctionFlags::HAS_NON_SIMPLE_PARAMETERS));
    assert!(k.flags.contains(FunctionFlags::USES_THIS));
    assert_eq!(k.parameters.len(), 2);
    assert_eq!(k.name, "k");
}

#[test]
fn test_arrow_functions() {
    let arena = Bump::new();
    let Expression::ArrowFunction(arrow) = expression(&arena, "(a, {b}, ...c) => a + b") else {
        panic!("expected arrow");
    };
    assert!(arrow.is_arrow());
    assert_eq!(arrow.parameters.len(), 3);
    assert!(arrow.parameters[2].rest);
    assert!(arrow.flags.contains(FunctionFlags::HAS_EXPRESSION_BODY));

    let arena = Bump::new();
    let Expression::ArrowFunction(arrow) = expression(&arena, "async x => { await x; }") else {
        panic!("expected arrow");
    };
    assert!(arrow.is_async());
    assert!(!arrow.flags.contains(FunctionFlags::HAS_EXPRESSION_BODY));
}

#[test]
fn test_arrow_line_terminator() {
    assert_error("var f = (a)\n=> a;", &messages::LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW);
}

#[test]
fn test_anonymous_function_takes_binding_name() {
    let arena = Bump::new();
    let output = script(&arena, "var f = function () {};");
    let Statement::VariableStatement(statement) = statements(&output)[0] else {
        panic!("expected variable statement");
    };
    let Some(Expression::FunctionExpression(function)) = statement.declarations[0].initializer else {
        panic!("expected function expression");
    };
    assert_eq!(function.name, "f");
    assert!(function.ident.is_none());
}

#[test]
fn test_yield_and_await_errors() {
    assert_error("function* g(a = yield) {}", &messages::YIELD_IN_PARAMETER_INITIALIZER);
    assert_error("async function f(a = await 1) {}", &messages::AWAIT_IN_PARAMETER_INITIALIZER);
    assert_error("function f() { for await (x of y) {} }", &messages::FOR_AWAIT_OUTSIDE_ASYNC);
}

#[test]
fn test_parse_function_body_entry() {
    let arena = Bump::new();
    let output = parse_function_body(&arena, "body.js", "return a + b;", ParserOptions::default()).expect("parse aborted");
    assert!(!output.has_errors());
    assert_eq!(output.program.name, "anonymous");
    assert!(matches!(output.program.body.statements[0], Statement::ReturnStatement(_)));
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_base_class_default_constructor() {
    let arena = Bump::new();
    let output = script(&arena, "class A {}");
    assert!(!output.has_errors());
    let class = class_declaration(statements(&output)[0]);
    let constructor = class.constructor;
    assert!(constructor.flags.contains(FunctionFlags::IS_DEFAULT_CONSTRUCTOR | FunctionFlags::IS_CLASS_CONSTRUCTOR));
    assert!(!constructor.flags.contains(FunctionFlags::IS_SUBCLASS_CONSTRUCTOR));
    assert!(constructor.is_strict());
    assert!(constructor.parameters.is_empty());
    assert!(constructor.body.statements.is_empty());
    assert_eq!(constructor.name, "A");
}

#[test]
fn test_derived_class_default_constructor_forwards_args() {
    let arena = Bump::new();
    let output = script(&arena, "class A {} class B extends A {}");
    assert!(!output.has_errors());
    let class = class_declaration(statements(&output)[1]);
    let constructor = class.constructor;
    assert!(constructor.flags.contains(
        FunctionFlags::IS_DEFAULT_CONSTRUCTOR | FunctionFlags::IS_SUBCLASS_CONSTRUCTOR | FunctionFlags::HAS_DIRECT_SUPER
    ));
    assert_eq!(constructor.parameters.len(), 1);
    let parameter = &constructor.parameters[0];
    assert!(parameter.rest);
    assert_eq!(parameter.name.name, "args");

    assert_eq!(constructor.body.statements.len(), 1);
    assert!(constructor.body.block_flags.contains(BlockFlags::IS_SYNTHETIC));
    let Statement::ExpressionStatement(statement) = &constructor.body.statements[0] else {
        panic!("expected super call statement");
    };
    let Expression::Call(call) = statement.expression else {
        panic!("expected call");
    };
    assert!(matches!(call.callee, Expression::SuperKeyword(_)));
    assert_eq!(call.arguments.len(), 1);
    let Expression::Spread(spread) = &call.arguments[0] else {
        panic!("expected spread argument");
    };
    assert!(spread.expression.is_identifier_named("args"));
}

#[test]
fn test_class_elements() {
    let arena = Bump::new();
    let output = script(
        &arena,
        "class C extends D { constructor() { super(); } static create() {} get v() { return 1; } set v(x) {} *gen() {} async run() {} }",
    );
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let class = class_declaration(statements(&output)[0]);
    assert!(!class.constructor.flags.contains(FunctionFlags::IS_DEFAULT_CONSTRUCTOR));
    assert!(class.constructor.flags.contains(FunctionFlags::HAS_DIRECT_SUPER));
    assert_eq!(class.elements.len(), 4);
    assert!(class.elements[0].is_static());
    assert!(matches!(class.elements[1], ClassElement::Accessor(_)));
}

#[test]
fn test_class_errors() {
    assert_error("class A { constructor() {} constructor() {} }", &messages::MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS);
    assert_error("class A { *constructor() {} }", &messages::CLASS_CONSTRUCTOR_MAY_NOT_BE_A_0);
    assert_error("class A { get constructor() {} }", &messages::CLASS_CONSTRUCTOR_MAY_NOT_BE_A_0);
    assert_error("class A { static prototype() {} }", &messages::STATIC_PROTOTYPE_PROPERTY);
    assert_error("class A { constructor() { super(); } }", &messages::SUPER_CALL_OUTSIDE_DERIVED_CONSTRUCTOR);
    assert_error("class eval {}", &messages::INVALID_USE_OF_0_IN_STRICT_MODE);
}

#[test]
fn test_later_class_method_replaces_in_place() {
    let arena = Bump::new();
    let output = script(&arena, "class C { m(a) {} n() {} m(a, b) {} }");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let class = class_declaration(statements(&output)[0]);
    assert_eq!(class.elements.len(), 2);
    let ClassElement::Method(method) = &class.elements[0] else {
        panic!("expected method");
    };
    assert!(method.key.is_named("m"));
    assert_eq!(method.function.parameters.len(), 2);
    assert!(class.elements[1].key().is_named("n"));
}

#[test]
fn test_class_accessors_merge_per_static_key() {
    let arena = Bump::new();
    let output = script(&arena, "class C { get x() {} static set x(v) {} set x(v) {} static get x() {} }");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let class = class_declaration(statements(&output)[0]);
    assert_eq!(class.elements.len(), 2);
    for element in class.elements {
        let ClassElement::Accessor(accessor) = element else {
            panic!("expected accessor");
        };
        assert!(accessor.getter.is_some() && accessor.setter.is_some());
    }
    assert!(!class.elements[0].is_static());
    assert!(class.elements[1].is_static());
}

#[test]
fn test_class_accessor_replaces_method() {
    let arena = Bump::new();
    let output = script(&arena, "class C { x() {} get x() {} [x]() {} [x]() {} }");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let class = class_declaration(statements(&output)[0]);
    // Computed keys are never merged.
    assert_eq!(class.elements.len(), 3);
    assert!(matches!(class.elements[0], ClassElement::Accessor(_)));
}

#[test]
fn test_class_body_is_strict() {
    assert_error("class A { m() { with (a) {} } }", &messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE);
}

#[test]
fn test_class_heritage_and_computed_keys_are_strict() {
    assert_error(
        "class A extends (function () { with (o) {} }) {}",
        &messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE,
    );
    assert_error(
        "class A { [function () { with (o) {} }]() {} }",
        &messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE,
    );
    assert_error("var C = class extends (function () { with (o) {} }) {};", &messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE);

    let arena = Bump::new();
    let output = script(&arena, "class A extends (function () { var yield; }) {}");
    assert!(output.has_errors());
}

#[test]
fn test_sloppy_mode_resumes_after_class() {
    assert_valid("class A extends (B) { [k]() {} } with (o) {} var yield;");
    assert_valid("function f() { var C = class {}; with (o) {} }");

    let arena = Bump::new();
    let output = script(&arena, "class A {} function f() {}");
    assert!(!output.program.is_strict());
    let f = function_declaration(statements(&output)[1]);
    assert!(!f.is_strict());
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_reexported_import_becomes_indirect_export() {
    let arena = Bump::new();
    let output = module(&arena, "import {a as b} from \"m\"; export {b as c};");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let record = output.program.module.expect("module record");
    assert_eq!(record.requested_modules, &["m"]);
    assert_eq!(record.import_entries, &[ImportEntry::import_specifier("m", "a", "b")]);
    let [export] = record.indirect_export_entries else {
        panic!("expected one export entry, got {:?}", record.indirect_export_entries);
    };
    assert_eq!(export.local_name, Some("b"));
    assert_eq!(export.export_name, Some("c"));
    assert_eq!(export.module_request, Some("m"));
    assert_eq!(export.import_name, Some(ImportName::Name("a")));
    assert!(record.local_export_entries.is_empty());
    assert!(record.star_export_entries.is_empty());
    assert_eq!(record.exported_names().collect::<Vec<_>>(), vec!["c"]);
}

#[test]
fn test_reexported_default_import_keeps_local_name() {
    let arena = Bump::new();
    let output = module(&arena, "import d, * as ns from \"m\"; export {d as e, ns};");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let record = output.program.module.expect("module record");
    assert_eq!(
        record.indirect_export_entries,
        &[ExportEntry::export_imported("e", "d", &ImportEntry::import_default("m", "d"))]
    );
    assert_eq!(record.local_export_entries, &[ExportEntry::export_local("ns", "ns")]);
}

#[test]
fn test_module_entries() {
    let arena = Bump::new();
    let output = module(
        &arena,
        "import d, * as ns from \"x\";\n\
         import \"y\";\n\
         export var v = 1;\n\
         export function f() {}\n\
         export * from \"z\";\n\
         export * as all from \"x\";\n\
         export {ns};\n\
         export default class {}",
    );
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let record = output.program.module.expect("module record");
    assert_eq!(record.requested_modules, &["x", "y", "z"]);
    assert_eq!(
        record.import_entries,
        &[ImportEntry::import_default("x", "d"), ImportEntry::import_namespace("x", "ns")]
    );
    assert_eq!(
        record.local_export_entries,
        &[
            ExportEntry::export_local("v", "v"),
            ExportEntry::export_local("f", "f"),
            ExportEntry::export_local("ns", "ns"),
            ExportEntry::export_default("*default*"),
        ]
    );
    assert_eq!(record.star_export_entries, &[ExportEntry::export_star_from("z")]);
    assert_eq!(record.indirect_export_entries, &[ExportEntry::export_indirect("all", "x", ImportName::Namespace)]);
    assert!(record.has_default_export);
}

#[test]
fn test_module_code_is_strict() {
    let arena = Bump::new();
    let output = module(&arena, "var x = 1;");
    assert!(output.program.is_strict());
    assert_eq!(output.program.kind, FunctionKind::Module);
    let arena = Bump::new();
    let output = module(&arena, "with (a) {}");
    assert!(has_code(&output, &messages::WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE));
}

#[test]
fn test_module_errors() {
    let arena = Bump::new();
    let output = module(&arena, "var a, c; export {a as b, c as b};");
    assert!(has_code(&output, &messages::DUPLICATE_EXPORT_0));

    let arena = Bump::new();
    let output = module(&arena, "export default 1; export default 2;");
    assert!(has_code(&output, &messages::DUPLICATE_EXPORT_0));

    let arena = Bump::new();
    let output = module(&arena, "export {\"s\"};");
    assert!(has_code(&output, &messages::STRING_EXPORT_NAME_REQUIRES_FROM));

    let arena = Bump::new();
    let output = module(&arena, "{ import a from \"m\"; }");
    assert!(has_code(&output, &messages::IMPORT_OUTSIDE_MODULE));

    assert_error("import a from \"m\";", &messages::IMPORT_OUTSIDE_MODULE);
    assert_error("export var a;", &messages::EXPORT_OUTSIDE_MODULE);
}

// ============================================================================
// For statements
// ============================================================================

#[test]
fn test_for_in_and_of() {
    let arena = Bump::new();
    let output = script(&arena, "for (var k in o) {} for (const v of a) {} for (x.y of z) {}");
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let stmts = statements(&output);
    assert!(matches!(stmts[0], Statement::ForInStatement(_)));
    assert!(matches!(stmts[1], Statement::ForOfStatement(_)));
    let Statement::ForOfStatement(for_of) = stmts[2] else {
        panic!("expected for-of");
    };
    assert!(matches!(for_of.initializer, ForInitializer::Expression(Expression::PropertyAccess(_))));
}

#[test]
fn test_for_in_of_errors() {
    assert_error("for (var a, b in o) {}", &messages::ONLY_SINGLE_VARIABLE_IN_FOR_0);
    assert_error("for (let a = 1 of o) {}", &messages::FOR_0_DECLARATION_CANNOT_HAVE_INITIALIZER);
    assert_error("for (a + b in o) {}", &messages::INVALID_FOR_0_TARGET);
}

#[test]
fn test_legacy_for_in_initializer_enabled() {
    let arena = Bump::new();
    let options = ParserOptions::default().with_legacy_for_in_initializer(true);
    let output = script_with(&arena, "for (var i = 0 in o) {}", options.clone());
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let Statement::ForInStatement(for_in) = statements(&output)[0] else {
        panic!("expected for-in");
    };
    let ForInitializer::Variable(declarations) = for_in.initializer else {
        panic!("expected declaration head");
    };
    assert!(declarations.declarations[0].initializer.is_some());

    // Strict code never accepts it.
    let output = script_with(&arena, "for (var i = 0 in o) {}", options.with_strict(true));
    assert!(has_code(&output, &messages::FOR_0_DECLARATION_CANNOT_HAVE_INITIALIZER));
}

#[test]
fn test_legacy_for_in_initializer_disabled() {
    let arena = Bump::new();
    let options = ParserOptions::default().with_legacy_for_in_initializer(false);
    let output = script_with(&arena, "for (var i = 0 in o) {}", options);
    assert!(has_code(&output, &messages::FOR_0_DECLARATION_CANNOT_HAVE_INITIALIZER));
}

#[test]
fn test_classic_for_joins() {
    let arena = Bump::new();
    let output = script(&arena, "for (;;) {}");
    let Statement::ForStatement(for_statement) = statements(&output)[0] else {
        panic!("expected for");
    };
    assert!(for_statement.initializer.is_none());
    assert!(matches!(
        for_statement.condition,
        Expression::JoinPredecessor(JoinPredecessorExpression { expression: None, .. })
    ));
}

#[test]
fn test_for_each_requires_extensions() {
    let arena = Bump::new();
    let options = ParserOptions::default().with_syntax_extensions(true);
    let output = script_with(&arena, "for each (var v in o) {}", options);
    assert!(!output.has_errors(), "{:?}", output.diagnostics.diagnostics());
    let Statement::ForInStatement(for_in) = statements(&output)[0] else {
        panic!("expected for-in");
    };
    assert!(for_in.data.flags.contains(NodeFlags::FOR_EACH));

    let arena = Bump::new();
    let output = script(&arena, "for each (var v in o) {}");
    assert!(output.has_errors());
}

// ============================================================================
// Edition gates
// ============================================================================

#[test]
fn test_edition_gates() {
    let cases = [
        ("var f = () => 1;", EcmaVersion::Es5),
        ("class A {}", EcmaVersion::Es5),
        ("var x = 2 ** 3;", EcmaVersion::Es2015),
        ("async function f() {}", EcmaVersion::Es2016),
        ("var {...r} = o;", EcmaVersion::Es2017),
        ("try {} catch {}", EcmaVersion::Es2018),
        ("a ?? b;", EcmaVersion::Es2019),
        ("a?.b;", EcmaVersion::Es2019),
    ];
    for (source, version) in cases {
        let arena = Bump::new();
        let output = script_with(&arena, source, ParserOptions::default().with_ecma_version(version));
        assert!(
            has_code(&output, &messages::_0_REQUIRES_ECMASCRIPT_1_OR_LATER),
            "{source} should be rejected by {version}"
        );
        let arena = Bump::new();
        let output = script(&arena, source);
        assert!(!output.has_errors(), "{source} should be accepted by default");
    }
}

// ============================================================================
// Lazy reparse
// ============================================================================

#[test]
fn test_lazy_reparse_skips_later_bodies() {
    let source = "function a(x) { return x + 1; }\n\
                  function b() { var y = this; eval('y'); return function () {}; }\n\
                  var c = () => 1;";
    let arena = Bump::new();
    let full = script(&arena, source);
    assert!(!full.has_errors());
    let table = FunctionTable::collect(full.program);
    let full_stmts = statements(&full);
    let full_a = function_declaration(full_stmts[0]);
    let full_b = function_declaration(full_stmts[1]);

    let lazy = Parser::new(&arena, "test.js", source, ParserOptions::default())
        .with_lazy_reparse(LazyReparse::new(table, full_a.id))
        .parse_script()
        .expect("parse aborted");
    assert!(!lazy.has_errors(), "{:?}", lazy.diagnostics.diagnostics());
    let lazy_stmts = statements(&lazy);
    let lazy_a = function_declaration(lazy_stmts[0]);
    let lazy_b = function_declaration(lazy_stmts[1]);

    // The target itself is parsed in full.
    assert!(!lazy_a.lazily_skipped);
    assert_eq!(lazy_a.source_statements().count(), 1);

    assert!(lazy_b.lazily_skipped);
    assert!(lazy_b.body.statements.is_empty());
    assert_eq!(lazy_b.flags, full_b.flags);
    assert_eq!(lazy_b.id, full_b.id);
    assert_eq!(lazy.program.flags, full.program.flags);

    // Concise arrow bodies are never skipped.
    let Statement::VariableStatement(c) = lazy_stmts[2] else {
        panic!("expected variable statement");
    };
    let Some(Expression::ArrowFunction(arrow)) = c.declarations[0].initializer else {
        panic!("expected arrow");
    };
    assert!(!arrow.lazily_skipped);
}

#[test]
fn test_function_ids_follow_source_order() {
    let arena = Bump::new();
    let output = script(&arena, "function a() { function b() {} } function c() {}");
    let stmts = statements(&output);
    let a = function_declaration(stmts[0]);
    let Some(Statement::FunctionDeclaration(b)) = a.source_statements().next() else {
        panic!("expected nested function");
    };
    let c = function_declaration(stmts[1]);
    assert!(output.program.id < a.id);
    assert!(a.id < b.id);
    assert!(b.id < c.id);
    let table = FunctionTable::collect(output.program);
    assert_eq!(table.len(), 4);
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = esparse_parser::MAX_RECURSION_DEPTH as usize + 10;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let arena = Bump::new();
    let result = parse_script(&arena, "deep.js", &source, ParserOptions::default());
    match result {
        Ok(output) => assert!(output.has_errors()),
        Err(error) => assert!(!error.is_recoverable()),
    }
}
