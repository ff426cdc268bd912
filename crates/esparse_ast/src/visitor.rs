//! IR visitor trait for traversing the tree.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children. Override a `visit_*` method and call the
//! `walk_*` function from it to keep descending.

use crate::node::*;

pub trait Visitor<'a>: Sized {
    fn visit_function(&mut self, function: &FunctionNode<'a>) {
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &ClassNode<'a>) {
        walk_class(self, class);
    }

    fn visit_block(&mut self, block: &Block<'a>) {
        walk_block(self, block);
    }

    fn visit_statement(&mut self, statement: &Statement<'a>) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &Expression<'a>) {
        walk_expression(self, expression);
    }

    fn visit_property_key(&mut self, key: &PropertyKey<'a>) {
        if let PropertyKey::Computed(computed) = key {
            self.visit_expression(computed.expression);
        }
    }
}

pub fn walk_function<'a, V: Visitor<'a>>(v: &mut V, function: &FunctionNode<'a>) {
    for param in function.parameters.iter() {
        if let Some(pattern) = param.pattern {
            v.visit_expression(pattern);
        }
        if let Some(init) = param.initializer {
            v.visit_expression(init);
        }
    }
    v.visit_block(&function.body);
}

pub fn walk_class<'a, V: Visitor<'a>>(v: &mut V, class: &ClassNode<'a>) {
    if let Some(heritage) = class.heritage {
        v.visit_expression(heritage);
    }
    v.visit_function(class.constructor);
    for element in class.elements.iter() {
        match element {
            ClassElement::Method(m) => {
                v.visit_property_key(&m.key);
                v.visit_function(m.function);
            }
            ClassElement::Accessor(a) => walk_accessor(v, a),
        }
    }
}

fn walk_accessor<'a, V: Visitor<'a>>(v: &mut V, accessor: &AccessorProperty<'a>) {
    v.visit_property_key(&accessor.key);
    if let Some(getter) = accessor.getter {
        v.visit_function(getter);
    }
    if let Some(setter) = accessor.setter {
        v.visit_function(setter);
    }
}

pub fn walk_block<'a, V: Visitor<'a>>(v: &mut V, block: &Block<'a>) {
    for stmt in block.statements.iter() {
        v.visit_statement(stmt);
    }
}

fn walk_for_initializer<'a, V: Visitor<'a>>(v: &mut V, init: &ForInitializer<'a>) {
    match init {
        ForInitializer::Variable(var) => walk_variable_statement(v, var),
        ForInitializer::Expression(expr) => v.visit_expression(expr),
    }
}

fn walk_variable_statement<'a, V: Visitor<'a>>(v: &mut V, var: &VariableStatement<'a>) {
    for decl in var.declarations.iter() {
        v.visit_expression(decl.target);
        if let Some(init) = decl.initializer {
            v.visit_expression(init);
        }
    }
}

pub fn walk_statement<'a, V: Visitor<'a>>(v: &mut V, statement: &Statement<'a>) {
    match statement {
        Statement::Block(n) => v.visit_block(n),
        Statement::VariableStatement(n) => walk_variable_statement(v, n),
        Statement::ExpressionStatement(n) => v.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            v.visit_expression(n.condition);
            v.visit_statement(n.then_statement);
            if let Some(else_statement) = n.else_statement {
                v.visit_statement(else_statement);
            }
        }
        Statement::DoStatement(n) => {
            v.visit_statement(n.body);
            v.visit_expression(n.condition);
        }
        Statement::WhileStatement(n) => {
            v.visit_expression(n.condition);
            v.visit_statement(n.body);
        }
        Statement::ForStatement(n) => {
            if let Some(init) = &n.initializer {
                walk_for_initializer(v, init);
            }
            v.visit_expression(n.condition);
            v.visit_expression(n.incrementor);
            v.visit_statement(n.body);
        }
        Statement::ForInStatement(n) => {
            walk_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.body);
        }
        Statement::ForOfStatement(n) => {
            walk_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.body);
        }
        Statement::ReturnStatement(n) => {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }
        Statement::WithStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.body);
        }
        Statement::SwitchStatement(n) => {
            v.visit_expression(n.expression);
            for clause in n.clauses.iter() {
                if let Some(test) = clause.test {
                    v.visit_expression(test);
                }
                for stmt in clause.statements.iter() {
                    v.visit_statement(stmt);
                }
            }
        }
        Statement::LabeledStatement(n) => v.visit_statement(n.statement),
        Statement::ThrowStatement(n) => v.visit_expression(n.expression),
        Statement::TryStatement(n) => {
            v.visit_block(&n.try_block);
            if let Some(catch) = &n.catch_clause {
                if let Some(param) = catch.parameter {
                    v.visit_expression(param);
                }
                v.visit_block(&catch.block);
            }
            if let Some(finally) = &n.finally_block {
                v.visit_block(finally);
            }
        }
        Statement::FunctionDeclaration(f) => v.visit_function(f),
        Statement::ClassDeclaration(c) => v.visit_class(c),
        Statement::ExportDeclaration(n) => match &n.clause {
            ExportClause::Declaration(decl) => v.visit_statement(decl),
            ExportClause::Default { value, .. } => match value {
                ExportDefaultValue::Function(f) => v.visit_function(f),
                ExportDefaultValue::Class(c) => v.visit_class(c),
                ExportDefaultValue::Expression(e) => v.visit_expression(e),
            },
            ExportClause::Star { .. } | ExportClause::Named { .. } => {}
        },
        Statement::EmptyStatement(_)
        | Statement::ContinueStatement(_)
        | Statement::BreakStatement(_)
        | Statement::DebuggerStatement(_)
        | Statement::ImportDeclaration(_)
        | Statement::ErrorStatement(_) => {}
    }
}

pub fn walk_expression<'a, V: Visitor<'a>>(v: &mut V, expression: &Expression<'a>) {
    match expression {
        Expression::TemplateLiteral(t) => {
            for e in t.expressions.iter() {
                v.visit_expression(e);
            }
        }
        Expression::TaggedTemplate(t) => {
            v.visit_expression(t.tag);
            for e in t.template.expressions.iter() {
                v.visit_expression(e);
            }
        }
        Expression::ArrayLiteral(a) => {
            for e in a.elements.iter() {
                v.visit_expression(e);
            }
        }
        Expression::ObjectLiteral(o) => {
            for p in o.properties.iter() {
                match p {
                    ObjectLiteralElement::PropertyAssignment(p) => {
                        v.visit_property_key(&p.key);
                        v.visit_expression(p.value);
                    }
                    ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                        if let Some(init) = p.initializer {
                            v.visit_expression(init);
                        }
                    }
                    ObjectLiteralElement::Spread(s) => v.visit_expression(s.expression),
                    ObjectLiteralElement::Method(m) => {
                        v.visit_property_key(&m.key);
                        v.visit_function(m.function);
                    }
                    ObjectLiteralElement::Accessor(a) => walk_accessor(v, a),
                }
            }
        }
        Expression::FunctionExpression(f) | Expression::ArrowFunction(f) => v.visit_function(f),
        Expression::ClassExpression(c) => v.visit_class(c),
        Expression::PrefixUnary(u) => v.visit_expression(u.operand),
        Expression::PostfixUnary(u) => v.visit_expression(u.operand),
        Expression::Binary(b) => {
            v.visit_expression(b.left);
            v.visit_expression(b.right);
        }
        Expression::Logical(l) => {
            v.visit_expression(l.left);
            v.visit_expression(l.right);
        }
        Expression::Conditional(c) => {
            v.visit_expression(c.condition);
            v.visit_expression(c.when_true);
            v.visit_expression(c.when_false);
        }
        Expression::Assignment(a) => {
            v.visit_expression(a.target);
            v.visit_expression(a.value);
        }
        Expression::Sequence(s) => {
            for e in s.expressions.iter() {
                v.visit_expression(e);
            }
        }
        Expression::Call(c) => {
            v.visit_expression(c.callee);
            for arg in c.arguments.iter() {
                v.visit_expression(arg);
            }
        }
        Expression::New(n) => {
            v.visit_expression(n.callee);
            for arg in n.arguments.unwrap_or(&[]).iter() {
                v.visit_expression(arg);
            }
        }
        Expression::PropertyAccess(p) => v.visit_expression(p.object),
        Expression::ElementAccess(e) => {
            v.visit_expression(e.object);
            v.visit_expression(e.index);
        }
        Expression::Spread(s) => v.visit_expression(s.expression),
        Expression::Yield(y) => {
            if let Some(e) = y.expression {
                v.visit_expression(e);
            }
        }
        Expression::Await(a) => v.visit_expression(a.expression),
        Expression::JoinPredecessor(j) => {
            if let Some(e) = j.expression {
                v.visit_expression(e);
            }
        }
        Expression::Identifier(_)
        | Expression::NullLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::ThisKeyword(_)
        | Expression::SuperKeyword(_)
        | Expression::NewTarget(_)
        | Expression::Omitted(_)
        | Expression::Error(_) => {}
    }
}
