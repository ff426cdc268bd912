//! Import and export declarations.
//!
//! Every form is recorded in the [`ModuleBuilder`] of the module frame as
//! it is parsed. Imported names are bound as lexical declarations of the
//! module body.

use esparse_ast::module::*;
use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::*;
use esparse_diagnostics::{messages, DiagnosticMessage};
use esparse_options::EcmaVersion;

use crate::context::ModuleBuilder;
use crate::error::{ParseError, ParseResult};
use crate::functions::FunctionContext;
use crate::parser::Parser;
use crate::patterns::{bound_names, BindingKind};
use crate::statements::StatementPosition;

impl<'a> Parser<'a> {
    fn check_module_item(&self, top_level: bool, message: &DiagnosticMessage) -> ParseResult<()> {
        if !self.is_module_goal || !top_level {
            return Err(self.error(message, &[]));
        }
        Ok(())
    }

    fn module_builder(&mut self) -> ParseResult<&mut ModuleBuilder<'a>> {
        self.context
            .module_mut()
            .ok_or(ParseError::Internal("module frame expected"))
    }

    fn expect_contextual(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.is_contextual(kind) {
            self.next_token();
            return Ok(());
        }
        Err(self.error(&messages::_0_EXPECTED, &[kind.describe()]))
    }

    fn parse_module_specifier(&mut self) -> ParseResult<StringLiteral<'a>> {
        if self.current_token() != SyntaxKind::StringLiteral {
            return Err(self.error(&messages::STRING_LITERAL_EXPECTED, &[]));
        }
        Ok(self.parse_string_literal())
    }

    /// An identifier name or, from ES2022, a string literal.
    fn parse_module_export_name(&mut self) -> ParseResult<ModuleExportName<'a>> {
        if self.current_token() == SyntaxKind::StringLiteral {
            let (pos, end) = (self.token_pos(), self.token_end());
            self.require_version(EcmaVersion::Es2022, "String export name", pos, end);
            return Ok(ModuleExportName::StringLiteral(self.parse_string_literal()));
        }
        Ok(ModuleExportName::Identifier(self.parse_identifier_name()?))
    }

    /// Reserved words are fine as exported names but not as bindings or
    /// local references.
    fn check_reference_name(&self, id: &Identifier<'a>) -> ParseResult<()> {
        match SyntaxKind::from_keyword(id.name) {
            Some(kind)
                if kind.is_reserved_word() || kind.is_future_reserved_word() || kind == SyntaxKind::AwaitKeyword =>
            {
                Err(self.error_at(
                    id.data.pos(),
                    id.data.end(),
                    &messages::_0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE,
                    &[id.name],
                ))
            }
            _ => Ok(()),
        }
    }

    fn record_export_name(&mut self, name: &'a str, data: &NodeData) -> ParseResult<()> {
        let module = self.module_builder()?;
        let fresh = module.add_export_name(name);
        if name == DEFAULT_NAME {
            module.has_default_export = true;
        }
        if !fresh {
            return Err(self.error_at(data.pos(), data.end(), &messages::DUPLICATE_EXPORT_0, &[name]));
        }
        Ok(())
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// `import "m"`, `import d, * as ns from "m"`, `import d, {a as b} from "m"`.
    pub(crate) fn parse_import_declaration(&mut self, pos: u32, top_level: bool) -> ParseResult<Statement<'a>> {
        self.check_module_item(top_level, &messages::IMPORT_OUTSIDE_MODULE)?;
        self.expect_token(SyntaxKind::ImportKeyword)?;

        let mut default_binding = None;
        let mut namespace_binding = None;
        let mut named_bindings = None;
        if self.current_token() != SyntaxKind::StringLiteral {
            let mut more = true;
            if self.is_identifier_token() {
                default_binding = Some(self.parse_import_binding()?);
                more = self.optional_token(SyntaxKind::CommaToken);
            }
            if more {
                match self.current_token() {
                    SyntaxKind::AsteriskToken => {
                        self.next_token();
                        self.expect_contextual(SyntaxKind::AsKeyword)?;
                        namespace_binding = Some(self.parse_import_binding()?);
                    }
                    SyntaxKind::OpenBraceToken => named_bindings = Some(self.parse_import_specifiers()?),
                    _ => return Err(self.error(&messages::IMPORT_CLAUSE_EXPECTED, &[])),
                }
            }
            self.expect_contextual(SyntaxKind::FromKeyword)?;
        }
        let module_specifier = self.parse_module_specifier()?;
        self.parse_expected_semicolon()?;

        let request = module_specifier.value;
        let module = self.module_builder()?;
        module.add_request(request);
        if let Some(local) = &default_binding {
            module.import_entries.push(ImportEntry::import_default(request, local.name));
        }
        if let Some(local) = &namespace_binding {
            module.import_entries.push(ImportEntry::import_namespace(request, local.name));
        }
        for specifier in named_bindings.as_deref().unwrap_or_default() {
            let import_name = specifier.imported.map_or(specifier.local.name, |name| name.name());
            module
                .import_entries
                .push(ImportEntry::import_specifier(request, import_name, specifier.local.name));
        }

        Ok(Statement::ImportDeclaration(ImportDeclaration {
            data: NodeData::new(SyntaxKind::ImportDeclaration, pos, self.last_token_end()),
            default_binding,
            namespace_binding,
            named_bindings: named_bindings.map(|list| self.alloc_list(list)),
            module_specifier,
        }))
    }

    fn parse_import_binding(&mut self) -> ParseResult<Identifier<'a>> {
        let id = self.parse_binding_identifier()?;
        self.declare_binding(&id, BindingKind::Lexical)?;
        Ok(id)
    }

    fn parse_import_specifiers(&mut self) -> ParseResult<Vec<ImportSpecifier<'a>>> {
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken {
            let pos = self.token_pos();
            let name = self.parse_module_export_name()?;
            let (imported, local) = if self.is_contextual(SyntaxKind::AsKeyword) {
                self.next_token();
                (Some(name), self.parse_import_binding()?)
            } else {
                let ModuleExportName::Identifier(id) = name else {
                    return Err(self.error(&messages::_0_EXPECTED, &["as"]));
                };
                self.check_reference_name(&id)?;
                self.declare_binding(&id, BindingKind::Lexical)?;
                (None, id)
            };
            specifiers.push(ImportSpecifier {
                data: NodeData::new(SyntaxKind::ImportSpecifier, pos, self.last_token_end()),
                imported,
                local,
            });
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        Ok(specifiers)
    }

    // ========================================================================
    // Exports
    // ========================================================================

    pub(crate) fn parse_export_declaration(&mut self, pos: u32, top_level: bool) -> ParseResult<Statement<'a>> {
        self.check_module_item(top_level, &messages::EXPORT_OUTSIDE_MODULE)?;
        self.expect_token(SyntaxKind::ExportKeyword)?;

        let clause = match self.current_token() {
            SyntaxKind::AsteriskToken => self.parse_export_star()?,
            SyntaxKind::OpenBraceToken => self.parse_export_named()?,
            SyntaxKind::DefaultKeyword => self.parse_export_default()?,
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => self.parse_exported_declaration()?,
            SyntaxKind::AsyncKeyword
                if self.is_contextual(SyntaxKind::AsyncKeyword)
                    && self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.peek_has_line_break(1) =>
            {
                self.parse_exported_declaration()?
            }
            _ => return Err(self.error(&messages::EXPORT_DECLARATION_EXPECTED, &[])),
        };
        Ok(Statement::ExportDeclaration(ExportDeclaration {
            data: NodeData::new(SyntaxKind::ExportDeclaration, pos, self.last_token_end()),
            clause,
        }))
    }

    /// `export * from "m"` and `export * as ns from "m"`.
    fn parse_export_star(&mut self) -> ParseResult<ExportClause<'a>> {
        self.expect_token(SyntaxKind::AsteriskToken)?;
        let alias = if self.is_contextual(SyntaxKind::AsKeyword) {
            let (as_pos, as_end) = (self.token_pos(), self.token_end());
            self.require_version(EcmaVersion::Es2020, "export * as", as_pos, as_end);
            self.next_token();
            Some(self.parse_module_export_name()?)
        } else {
            None
        };
        self.expect_contextual(SyntaxKind::FromKeyword)?;
        let module_specifier = self.parse_module_specifier()?;
        self.parse_expected_semicolon()?;

        let request = module_specifier.value;
        if let Some(alias) = &alias {
            self.record_export_name(alias.name(), alias.data())?;
        }
        let module = self.module_builder()?;
        module.add_request(request);
        match &alias {
            Some(alias) => module
                .indirect_export_entries
                .push(ExportEntry::export_indirect(alias.name(), request, ImportName::Namespace)),
            None => module.star_export_entries.push(ExportEntry::export_star_from(request)),
        }
        Ok(ExportClause::Star { alias, module_specifier })
    }

    /// `export {a, b as c}` and `export {a as b} from "m"`.
    fn parse_export_named(&mut self) -> ParseResult<ExportClause<'a>> {
        self.expect_token(SyntaxKind::OpenBraceToken)?;
        let mut specifiers = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken {
            let pos = self.token_pos();
            let local = self.parse_module_export_name()?;
            let exported = if self.is_contextual(SyntaxKind::AsKeyword) {
                self.next_token();
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            specifiers.push(ExportSpecifier {
                data: NodeData::new(SyntaxKind::ExportSpecifier, pos, self.last_token_end()),
                local,
                exported,
            });
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken)?;
        let module_specifier = if self.is_contextual(SyntaxKind::FromKeyword) {
            self.next_token();
            Some(self.parse_module_specifier()?)
        } else {
            None
        };
        self.parse_expected_semicolon()?;

        for specifier in &specifiers {
            if module_specifier.is_none() {
                match &specifier.local {
                    ModuleExportName::Identifier(id) => self.check_reference_name(id)?,
                    ModuleExportName::StringLiteral(s) => {
                        return Err(self.error_at(
                            s.data.pos(),
                            s.data.end(),
                            &messages::STRING_EXPORT_NAME_REQUIRES_FROM,
                            &[],
                        ))
                    }
                }
            }
            let name_data = *specifier.exported.as_ref().unwrap_or(&specifier.local).data();
            self.record_export_name(specifier.export_name(), &name_data)?;
        }

        let module = self.module_builder()?;
        for specifier in &specifiers {
            let export_name = specifier.export_name();
            let local_name = specifier.local.name();
            match &module_specifier {
                Some(request) => module.indirect_export_entries.push(ExportEntry::export_indirect(
                    export_name,
                    request.value,
                    ImportName::Name(local_name),
                )),
                None => module.export_entries.push(ExportEntry::export_local(export_name, local_name)),
            }
        }
        if let Some(request) = &module_specifier {
            module.add_request(request.value);
        }
        Ok(ExportClause::Named {
            specifiers: self.alloc_list(specifiers),
            module_specifier,
        })
    }

    /// `export var|let|const|function|async function|class ...`.
    fn parse_exported_declaration(&mut self) -> ParseResult<ExportClause<'a>> {
        let mut statement = self.parse_statement(StatementPosition::List)?;
        let mut names: Vec<Identifier<'a>> = Vec::new();
        match &mut statement {
            Statement::VariableStatement(variables) => {
                variables.data.flags |= NodeFlags::EXPORT_CONTEXT;
                for declaration in variables.declarations {
                    bound_names(declaration.target, &mut names);
                }
            }
            Statement::FunctionDeclaration(function) => names.extend(function.ident),
            Statement::ClassDeclaration(class) => names.extend(class.ident),
            _ => return Err(ParseError::Internal("exported declaration expected")),
        }
        let module = self.module_builder()?;
        module
            .export_entries
            .extend(names.iter().map(|id| ExportEntry::export_local(id.name, id.name)));
        for id in &names {
            self.record_export_name(id.name, &id.data)?;
        }
        Ok(ExportClause::Declaration(self.alloc(statement)))
    }

    /// `export default` followed by a function, a class or an expression.
    fn parse_export_default(&mut self) -> ParseResult<ExportClause<'a>> {
        let (default_pos, default_end) = (self.token_pos(), self.token_end());
        self.expect_token(SyntaxKind::DefaultKeyword)?;
        let value_pos = self.token_pos();

        let (value, local_name) = match self.current_token() {
            SyntaxKind::FunctionKeyword => {
                let function = self.with_default_name(DEFAULT_NAME, |p| {
                    p.parse_function(value_pos, false, FunctionContext::ExportDefault)
                })?;
                let local = function.ident.map_or(DEFAULT_EXPORT_BINDING_NAME, |id| id.name);
                (ExportDefaultValue::Function(function), local)
            }
            SyntaxKind::AsyncKeyword
                if self.is_contextual(SyntaxKind::AsyncKeyword)
                    && self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.peek_has_line_break(1) =>
            {
                self.require_version(EcmaVersion::Es2017, "async function", value_pos, self.token_end());
                let function = self.with_default_name(DEFAULT_NAME, |p| {
                    p.next_token();
                    p.parse_function(value_pos, true, FunctionContext::ExportDefault)
                })?;
                let local = function.ident.map_or(DEFAULT_EXPORT_BINDING_NAME, |id| id.name);
                (ExportDefaultValue::Function(function), local)
            }
            SyntaxKind::ClassKeyword => {
                let class = self.with_default_name(DEFAULT_NAME, |p| {
                    p.parse_class(value_pos, FunctionContext::ExportDefault)
                })?;
                let local = class.ident.map_or(DEFAULT_EXPORT_BINDING_NAME, |id| id.name);
                (ExportDefaultValue::Class(class), local)
            }
            _ => {
                let expression =
                    self.with_default_name(DEFAULT_NAME, |p| p.parse_assignment_expression(false))?;
                self.parse_expected_semicolon()?;
                (ExportDefaultValue::Expression(self.alloc(expression)), DEFAULT_EXPORT_BINDING_NAME)
            }
        };

        let default_data = NodeData::new(SyntaxKind::DefaultKeyword, default_pos, default_end);
        self.record_export_name(DEFAULT_NAME, &default_data)?;
        self.module_builder()?
            .export_entries
            .push(ExportEntry::export_default(local_name));
        Ok(ExportClause::Default { value, local_name })
    }
}
