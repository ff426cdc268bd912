//! esparse_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every syntax and early error the scanner and parser can report is listed
//! in [`messages`]. Diagnostics carry a code, a category, the resolved message
//! text and, once the parser has located them, a span plus line/column.

use esparse_core::text::{LineAndColumn, TextSpan};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1005, 1100).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source name this diagnostic belongs to, if any.
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    /// 0-based line and column of `span.start`, filled in by the parser.
    pub location: Option<LineAndColumn>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
    /// Related diagnostics (e.g. the first of two duplicate declarations).
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            location: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a diagnostic attached to a span of the current source.
    pub fn at(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Create a new diagnostic with file and span info.
    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line_and_column(mut self, location: LineAndColumn) -> Self {
        self.location = Some(location);
        self
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Start offset of the span, or 0 for global diagnostics.
    pub fn start(&self) -> u32 {
        self.span.map(|s| s.start).unwrap_or(0)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            match (self.location, self.span) {
                (Some(lc), _) => write!(f, "({},{})", lc.line + 1, lc.character + 1)?,
                (None, Some(span)) => write!(f, "({})", span.start)?,
                (None, None) => {}
            }
            write!(f, ": ")?;
        } else if let Some(lc) = self.location {
            write!(f, "{}: ", lc)?;
        }
        write!(f, "{} ES{}: {}", self.category, self.code, self.message_text)
    }
}

impl std::error::Error for Diagnostic {}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Whether a diagnostic with `code` was already reported at `start`.
    pub fn contains_at(&self, start: u32, code: u32) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.code == code && d.start() == start)
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            let file_cmp = a.file.cmp(&b.file);
            if file_cmp != std::cmp::Ordering::Equal {
                return file_cmp;
            }
            a.start().cmp(&b.start())
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

/// Helper macro for defining diagnostic messages.
macro_rules! diag {
    ($code:expr, $cat:ident, $msg:expr) => {
        DiagnosticMessage {
            code: $code,
            category: DiagnosticCategory::$cat,
            message: $msg,
        }
    };
}

pub mod messages {
    use super::*;

    // ========================================================================
    // Lexical errors
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1020, Error, "Invalid escape sequence.");
    pub const OCTAL_LITERALS_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1121, Error, "Octal literals are not allowed in strict mode.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, Error, "Digit expected.");
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1125, Error, "Hexadecimal digit expected.");
    pub const UNEXPECTED_END_OF_TEXT: DiagnosticMessage = diag!(1126, Error, "Unexpected end of text.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF: DiagnosticMessage = diag!(1198, Error, "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.");
    pub const KEYWORDS_CANNOT_CONTAIN_ESCAPE_CHARACTERS: DiagnosticMessage = diag!(1260, Error, "Keywords cannot contain escape characters.");
    pub const AN_IDENTIFIER_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL: DiagnosticMessage = diag!(1351, Error, "An identifier or keyword cannot immediately follow a numeric literal.");
    pub const OCTAL_ESCAPE_SEQUENCES_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1487, Error, "Octal escape sequences are not allowed in strict mode.");
    pub const INVALID_ESCAPE_IN_TEMPLATE: DiagnosticMessage = diag!(1488, Error, "Invalid escape sequence in template literal.");
    pub const NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(6188, Error, "Numeric separators are not allowed here.");
    pub const MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS: DiagnosticMessage = diag!(6189, Error, "Multiple consecutive numeric separators are not permitted.");

    // ========================================================================
    // Syntax errors
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token.");
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(1013, Error, "Unexpected token '{0}'.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const CASE_OR_DEFAULT_EXPECTED: DiagnosticMessage = diag!(1130, Error, "'case' or 'default' expected.");
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1136, Error, "Property assignment expected.");
    pub const STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1141, Error, "String literal expected.");
    pub const LINE_BREAK_NOT_PERMITTED_HERE: DiagnosticMessage = diag!(1142, Error, "Line break not permitted here.");
    pub const LINE_TERMINATOR_NOT_PERMITTED_BEFORE_ARROW: DiagnosticMessage = diag!(1200, Error, "Line terminator not permitted before arrow.");
    pub const _0_REQUIRES_ECMASCRIPT_1_OR_LATER: DiagnosticMessage = diag!(1300, Error, "'{0}' requires ECMAScript {1} or later.");
    pub const INVALID_ARROW_FUNCTION_PARAMETER_LIST: DiagnosticMessage = diag!(1352, Error, "Invalid arrow function parameter list.");
    pub const TAGGED_TEMPLATE_EXPRESSIONS_NOT_PERMITTED_IN_OPTIONAL_CHAIN: DiagnosticMessage = diag!(1358, Error, "Tagged template expressions are not permitted in an optional chain.");
    pub const OPTIONAL_CHAIN_NOT_ALLOWED_IN_NEW_EXPRESSION: DiagnosticMessage = diag!(1209, Error, "Invalid optional chain from new expression.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1400, Error, "Maximum nesting depth exceeded.");
    pub const _0_AND_NULLISH_CANNOT_BE_MIXED_WITHOUT_PARENTHESES: DiagnosticMessage = diag!(5076, Error, "'{0}' and '??' operations cannot be mixed without parentheses.");
    pub const UNARY_EXPRESSION_NOT_ALLOWED_BEFORE_EXPONENTIATION: DiagnosticMessage = diag!(17006, Error, "An unary expression with the '{0}' operator is not allowed in the left-hand side of an exponentiation expression. Consider enclosing the expression in parentheses.");

    // ========================================================================
    // Statement errors
    // ========================================================================
    pub const WITH_STATEMENTS_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1101, Error, "'with' statements are not allowed in strict mode.");
    pub const CONTINUE_OUTSIDE_ITERATION: DiagnosticMessage = diag!(1104, Error, "A 'continue' statement can only be used within an enclosing iteration statement.");
    pub const BREAK_OUTSIDE_ITERATION_OR_SWITCH: DiagnosticMessage = diag!(1105, Error, "A 'break' statement can only be used within an enclosing iteration or switch statement.");
    pub const RETURN_OUTSIDE_FUNCTION: DiagnosticMessage = diag!(1108, Error, "A 'return' statement can only be used within a function body.");
    pub const DUPLICATE_DEFAULT_CLAUSE: DiagnosticMessage = diag!(1113, Error, "A 'default' clause cannot appear more than once in a 'switch' statement.");
    pub const DUPLICATE_LABEL_0: DiagnosticMessage = diag!(1114, Error, "Duplicate label '{0}'.");
    pub const CONTINUE_TARGET_NOT_ITERATION: DiagnosticMessage = diag!(1115, Error, "A 'continue' statement can only jump to a label of an enclosing iteration statement.");
    pub const UNDEFINED_LABEL_0: DiagnosticMessage = diag!(1116, Error, "Undefined label '{0}'.");
    pub const CONST_DECLARATIONS_MUST_BE_INITIALIZED: DiagnosticMessage = diag!(1155, Error, "'const' declarations must be initialized.");
    pub const _0_DECLARATIONS_ONLY_IN_BLOCK: DiagnosticMessage = diag!(1156, Error, "'{0}' declarations can only be declared inside a block.");
    pub const DESTRUCTURING_DECLARATION_MUST_HAVE_INITIALIZER: DiagnosticMessage = diag!(1182, Error, "A destructuring declaration must have an initializer.");
    pub const ONLY_SINGLE_VARIABLE_IN_FOR_0: DiagnosticMessage = diag!(1188, Error, "Only a single variable declaration is allowed in a 'for...{0}' statement.");
    pub const FOR_0_DECLARATION_CANNOT_HAVE_INITIALIZER: DiagnosticMessage = diag!(1189, Error, "The variable declaration of a 'for...{0}' statement cannot have an initializer.");
    pub const FOR_EACH_REQUIRES_IN: DiagnosticMessage = diag!(1190, Error, "A 'for each' statement requires an 'in' clause.");
    pub const FOR_AWAIT_OUTSIDE_ASYNC: DiagnosticMessage = diag!(1103, Error, "'for await' loops are only allowed within async functions and at the top levels of modules.");
    pub const FOR_AWAIT_REQUIRES_OF: DiagnosticMessage = diag!(1107, Error, "A 'for await' statement requires an 'of' clause.");
    pub const FUNCTION_DECLARATION_NOT_ALLOWED_HERE: DiagnosticMessage = diag!(1250, Error, "Function declarations are not allowed as the body of a statement in strict mode.");
    pub const CATCH_OR_FINALLY_EXPECTED: DiagnosticMessage = diag!(1472, Error, "'catch' or 'finally' expected.");
    pub const LET_NOT_ALLOWED_AS_LEXICAL_NAME: DiagnosticMessage = diag!(2480, Error, "'let' is not allowed to be used as a name in 'let' or 'const' declarations.");
    pub const CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0: DiagnosticMessage = diag!(2451, Error, "Cannot redeclare block-scoped variable '{0}'.");

    // ========================================================================
    // Strict mode and reserved words
    // ========================================================================
    pub const INVALID_USE_OF_0_IN_STRICT_MODE: DiagnosticMessage = diag!(1100, Error, "Invalid use of '{0}' in strict mode.");
    pub const DELETE_OF_IDENTIFIER_IN_STRICT_MODE: DiagnosticMessage = diag!(1102, Error, "'delete' cannot be called on an identifier in strict mode.");
    pub const _0_IS_A_RESERVED_WORD_IN_STRICT_MODE: DiagnosticMessage = diag!(1212, Error, "Identifier expected. '{0}' is a reserved word in strict mode.");
    pub const _0_IS_A_RESERVED_WORD_THAT_CANNOT_BE_USED_HERE: DiagnosticMessage = diag!(1359, Error, "Identifier expected. '{0}' is a reserved word that cannot be used here.");
    pub const USE_STRICT_WITH_NON_SIMPLE_PARAMETERS: DiagnosticMessage = diag!(1347, Error, "'use strict' directive cannot be used with non-simple parameter list.");
    pub const DUPLICATE_PARAMETER_NAME_0: DiagnosticMessage = diag!(2300, Error, "Duplicate parameter name '{0}'.");

    // ========================================================================
    // Assignment targets and patterns
    // ========================================================================
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(2364, Error, "The left-hand side of an assignment expression must be a variable or a property access.");
    pub const INVALID_FOR_0_TARGET: DiagnosticMessage = diag!(2406, Error, "The left-hand side of a 'for...{0}' statement must be a variable or a property access.");
    pub const INVALID_INCREMENT_OPERAND: DiagnosticMessage = diag!(2357, Error, "The operand of an increment or decrement operator must be a variable or a property access.");
    pub const INVALID_DESTRUCTURING_TARGET: DiagnosticMessage = diag!(2365, Error, "Invalid destructuring assignment target.");
    pub const REST_ELEMENT_MUST_BE_LAST: DiagnosticMessage = diag!(2462, Error, "A rest element must be last in a destructuring pattern.");
    pub const REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(1014, Error, "A rest parameter must be last in a parameter list.");
    pub const REST_ELEMENT_CANNOT_HAVE_INITIALIZER: DiagnosticMessage = diag!(1186, Error, "A rest element cannot have an initializer.");
    pub const INVALID_SHORTHAND_INITIALIZER: DiagnosticMessage = diag!(1312, Error, "Did you mean to use a ':'? An '=' can only follow a property name when the containing object literal is part of a destructuring pattern.");
    pub const DUPLICATE_PROTO_PROPERTY: DiagnosticMessage = diag!(1117, Error, "Duplicate '__proto__' fields are not allowed in object literals.");

    // ========================================================================
    // Functions, generators, async
    // ========================================================================
    pub const GETTER_CANNOT_HAVE_PARAMETERS: DiagnosticMessage = diag!(1054, Error, "A 'get' accessor cannot have parameters.");
    pub const SETTER_MUST_HAVE_ONE_PARAMETER: DiagnosticMessage = diag!(1049, Error, "A 'set' accessor must have exactly one parameter.");
    pub const SETTER_CANNOT_HAVE_REST_PARAMETER: DiagnosticMessage = diag!(1053, Error, "A 'set' accessor cannot have rest parameter.");
    pub const AWAIT_OUTSIDE_ASYNC: DiagnosticMessage = diag!(1308, Error, "'await' expressions are only allowed within async functions and at the top levels of modules.");
    pub const YIELD_IN_PARAMETER_INITIALIZER: DiagnosticMessage = diag!(2523, Error, "'yield' expressions cannot be used in a parameter initializer.");
    pub const AWAIT_IN_PARAMETER_INITIALIZER: DiagnosticMessage = diag!(2524, Error, "'await' expressions cannot be used in a parameter initializer.");

    // ========================================================================
    // super and new.target
    // ========================================================================
    pub const SUPER_MUST_BE_FOLLOWED_BY_ARGUMENTS_OR_MEMBER_ACCESS: DiagnosticMessage = diag!(1034, Error, "'super' must be followed by an argument list or member access.");
    pub const SUPER_CALL_OUTSIDE_DERIVED_CONSTRUCTOR: DiagnosticMessage = diag!(2337, Error, "Super calls are not permitted outside constructors or in nested functions inside constructors.");
    pub const SUPER_PROPERTY_OUTSIDE_METHOD: DiagnosticMessage = diag!(2338, Error, "'super' property access is permitted only in a constructor, member function, or member accessor of a derived class.");
    pub const NEW_TARGET_OUTSIDE_FUNCTION: DiagnosticMessage = diag!(17013, Error, "Meta-property 'new.target' is only allowed in the body of a function declaration, function expression, or constructor.");
    pub const _0_IS_NOT_A_VALID_META_PROPERTY_FOR_NEW: DiagnosticMessage = diag!(17012, Error, "'{0}' is not a valid meta-property for keyword 'new'. Did you mean 'target'?");

    // ========================================================================
    // Classes
    // ========================================================================
    pub const CLASS_NAME_REQUIRED: DiagnosticMessage = diag!(1211, Error, "A class declaration without the 'default' modifier must have a name.");
    pub const MULTIPLE_CONSTRUCTOR_IMPLEMENTATIONS: DiagnosticMessage = diag!(2392, Error, "Multiple constructor implementations are not allowed.");
    pub const CLASS_CONSTRUCTOR_MAY_NOT_BE_A_0: DiagnosticMessage = diag!(1368, Error, "Class constructor may not be a '{0}'.");
    pub const STATIC_PROTOTYPE_PROPERTY: DiagnosticMessage = diag!(2699, Error, "Classes may not have a static property named 'prototype'.");

    // ========================================================================
    // Modules
    // ========================================================================
    pub const IMPORT_OUTSIDE_MODULE: DiagnosticMessage = diag!(1473, Error, "An import declaration can only be used at the top level of a module.");
    pub const EXPORT_OUTSIDE_MODULE: DiagnosticMessage = diag!(1474, Error, "An export declaration can only be used at the top level of a module.");
    pub const DUPLICATE_EXPORT_0: DiagnosticMessage = diag!(2308, Error, "Duplicate export '{0}'.");
    pub const IMPORT_CLAUSE_EXPECTED: DiagnosticMessage = diag!(1475, Error, "Import clause or module specifier expected.");
    pub const EXPORT_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1476, Error, "Declaration, specifier list or '*' expected after 'export'.");
    pub const STRING_EXPORT_NAME_REQUIRES_FROM: DiagnosticMessage = diag!(1477, Error, "A string literal export name can only be used with a 'from' clause.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Only a single variable declaration is allowed in a 'for...{0}' statement.", &["in"]);
        assert_eq!(msg, "Only a single variable declaration is allowed in a 'for...in' statement.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Unexpected token.", &[]);
        assert_eq!(msg, "Unexpected token.");
    }

    #[test]
    fn test_format_message_repeated_placeholder() {
        let msg = format_message("'{0}' then '{1}' then '{0}'", &["a", "b"]);
        assert_eq!(msg, "'a' then 'b' then 'a'");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "test.js".to_string(),
            TextSpan::new(10, 5),
            &messages::INVALID_USE_OF_0_IN_STRICT_MODE,
            &["eval"],
        );
        let display = format!("{}", diag);
        assert_eq!(display, "test.js(10): error ES1100: Invalid use of 'eval' in strict mode.");
    }

    #[test]
    fn test_diagnostic_display_with_line_and_column() {
        let diag = Diagnostic::at(TextSpan::new(7, 1), &messages::_0_EXPECTED, &[";"])
            .with_file("a.js")
            .with_line_and_column(LineAndColumn::new(1, 0));
        assert_eq!(diag.to_string(), "a.js(2,1): error ES1005: ';' expected.");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]);
        assert!(diag.file.is_none());
        assert!(diag.span.is_none());
        assert_eq!(diag.code, 1012);
        assert_eq!(diag.start(), 0);
        assert!(diag.is_error());
    }

    #[test]
    fn test_diagnostic_collection() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);

        collection.add(Diagnostic::at(TextSpan::new(4, 1), &messages::UNEXPECTED_TOKEN, &[]));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert!(collection.contains_at(4, 1012));
        assert!(!collection.contains_at(5, 1012));
    }

    #[test]
    fn test_diagnostic_collection_sort() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location(
            "b.js".to_string(),
            TextSpan::new(10, 1),
            &messages::UNEXPECTED_TOKEN,
            &[],
        ));
        collection.add(Diagnostic::with_location(
            "a.js".to_string(),
            TextSpan::new(5, 1),
            &messages::IDENTIFIER_EXPECTED,
            &[],
        ));
        collection.add(Diagnostic::with_location(
            "a.js".to_string(),
            TextSpan::new(1, 1),
            &messages::EXPRESSION_EXPECTED,
            &[],
        ));
        collection.sort();
        let order: Vec<_> = collection.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(order, vec![1109, 1003, 1012]);
    }

    #[test]
    fn test_diagnostic_with_related() {
        let primary = Diagnostic::new(&messages::DUPLICATE_LABEL_0, &["outer"]);
        let related = Diagnostic::new(&messages::DUPLICATE_LABEL_0, &["outer"]);
        let combined = primary.with_related(related);
        assert_eq!(combined.related_information.len(), 1);
    }
}
