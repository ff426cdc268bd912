//! Parser utility functions.

use esparse_ast::node::*;
use esparse_ast::syntax_kind::SyntaxKind;
use std::borrow::Cow;

/// Words that are identifiers in sloppy mode and reserved in strict mode.
pub fn is_strict_mode_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "implements" | "interface" | "let" | "package" | "private" | "protected" | "public" | "static" | "yield"
    )
}

/// Whether error recovery stops before `kind`: the first token of a new
/// line, or the start of an obvious statement.
pub fn skip_mode_after(kind: SyntaxKind, preceded_by_line_break: bool) -> bool {
    preceded_by_line_break || is_statement_keyword(kind)
}

/// Keywords that can only start a statement.
pub fn is_statement_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VarKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
    )
}

/// Check if a token kind can start an expression.
pub fn can_start_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RegularExpressionLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DotDotDotToken
    ) || kind.is_contextual_keyword()
        || kind.is_future_reserved_word()
}

/// Whether `kind` can begin a property name after `get`, `set`, `async`
/// or `static`.
pub fn is_property_name_start(kind: SyntaxKind) -> bool {
    kind.is_identifier_name()
        || matches!(
            kind,
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
        )
}

/// Whether `expr` may be the target of `++`, `--` or a compound assignment.
pub fn is_simple_assignment_target(expr: &Expression<'_>) -> bool {
    matches!(
        expr,
        Expression::Identifier(_) | Expression::PropertyAccess(_) | Expression::ElementAccess(_)
    ) && !expr
        .data()
        .flags
        .contains(esparse_ast::types::NodeFlags::OPTIONAL_CHAIN)
}

/// Whether a `(` on a new line after `callee` starts a new statement
/// instead of calling it. Primitive literals are never callable.
pub fn is_uncallable_literal(callee: &Expression<'_>) -> bool {
    !callee.is_parenthesized()
        && matches!(
            callee,
            Expression::NumericLiteral(_)
                | Expression::BigIntLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::BooleanLiteral(_)
                | Expression::NullLiteral(_)
                | Expression::RegularExpressionLiteral(_)
                | Expression::TemplateLiteral(_)
        )
}

/// Split the raw text of a regular expression literal into pattern and flags.
pub fn split_regex(raw: &str) -> (&str, &str) {
    match raw.rfind('/') {
        Some(close) if close > 0 => (&raw[1..close], &raw[close + 1..]),
        _ => (raw.get(1..).unwrap_or(""), ""),
    }
}

/// Raw text of a template part, line terminators normalized to `\n`.
pub fn normalize_template_raw(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Offsets of the raw text inside a template token, without delimiters.
pub fn template_raw_bounds(kind: SyntaxKind, start: u32, end: u32, unterminated: bool) -> (u32, u32) {
    let closing = match kind {
        _ if unterminated => 0,
        SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle => 2,
        _ => 1,
    };
    let content_start = (start + 1).min(end);
    (content_start, end.saturating_sub(closing).max(content_start))
}

/// The operator text of a binary or logical node, for diagnostics.
pub fn operator_text(kind: SyntaxKind) -> &'static str {
    kind.token_text().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_regex() {
        assert_eq!(split_regex("/a\\/b/gi"), ("a\\/b", "gi"));
        assert_eq!(split_regex("/x/"), ("x", ""));
    }

    #[test]
    fn test_template_raw_bounds() {
        // `abc`
        assert_eq!(
            template_raw_bounds(SyntaxKind::NoSubstitutionTemplateLiteral, 0, 5, false),
            (1, 4)
        );
        // `a${
        assert_eq!(template_raw_bounds(SyntaxKind::TemplateHead, 0, 4, false), (1, 2));
        // }b`
        assert_eq!(template_raw_bounds(SyntaxKind::TemplateTail, 10, 13, false), (11, 12));
    }

    #[test]
    fn test_normalize_template_raw() {
        assert_eq!(normalize_template_raw("a\r\nb\rc"), "a\nb\nc");
        assert!(matches!(normalize_template_raw("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_property_name_start() {
        assert!(is_property_name_start(SyntaxKind::Identifier));
        assert!(is_property_name_start(SyntaxKind::ClassKeyword));
        assert!(is_property_name_start(SyntaxKind::OpenBracketToken));
        assert!(!is_property_name_start(SyntaxKind::OpenParenToken));
        assert!(!is_property_name_start(SyntaxKind::ColonToken));
    }

    #[test]
    fn test_strict_reserved_words() {
        assert!(is_strict_mode_reserved_word("yield"));
        assert!(is_strict_mode_reserved_word("static"));
        assert!(!is_strict_mode_reserved_word("async"));
    }
}
