//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes ECMAScript constructs.

use esparse_ast::syntax_kind::SyntaxKind;
use esparse_ast::types::TokenFlags;
use esparse_scanner::{Scanner, TokenStream};

/// Helper: scan all tokens from source and return as (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: scan a single token and return its flags.
fn first_flags(source: &str) -> TokenFlags {
    let mut scanner = Scanner::new(source);
    scanner.scan();
    scanner.token_flags()
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_and_comments_only() {
    assert!(scan_all("   \n\t  // line\n/* block\n */ \u{FEFF}").is_empty());
}

#[test]
fn test_numeric_literals() {
    let tokens = scan_all("42 3.14 .5 1e10 0xFF 0b1010 0o17 1_000 017 42n");
    let values: Vec<&str> = tokens.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(
        values,
        vec!["42", "3.14", ".5", "1e10", "0xFF", "0b1010", "0o17", "1_000", "017", "42n"]
    );
    assert_eq!(tokens[9].0, SyntaxKind::BigIntLiteral);
    assert!(tokens[..9].iter().all(|(k, _)| *k == SyntaxKind::NumericLiteral));
}

#[test]
fn test_numeric_flags() {
    assert!(first_flags("017").contains(TokenFlags::OCTAL));
    assert!(first_flags("0x1").contains(TokenFlags::HEX_SPECIFIER));
    assert!(first_flags("1e3").contains(TokenFlags::SCIENTIFIC));
    assert!(first_flags("1_0").contains(TokenFlags::CONTAINS_SEPARATOR));
}

#[test]
fn test_numeric_separator_errors() {
    let mut scanner = Scanner::new("1__0 1_");
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.diagnostics().len(), 2);
}

#[test]
fn test_identifier_directly_after_number() {
    let mut scanner = Scanner::new("3in x");
    scanner.scan();
    assert!(scanner.diagnostics().has_errors());
}

#[test]
fn test_string_literals_cooked() {
    let tokens = scan_all(r#""hello" 'wo\'rld' "\x41B\u{43}" "a\
b""#);
    assert_eq!(tokens[0].1, "hello");
    assert_eq!(tokens[1].1, "wo'rld");
    assert_eq!(tokens[2].1, "ABC");
    assert_eq!(tokens[3].1, "ab");
}

#[test]
fn test_surrogate_pair_escape() {
    let tokens = scan_all(r#""\uD83D\uDE00""#);
    assert_eq!(tokens[0].1, "\u{1F600}");
}

#[test]
fn test_legacy_octal_escape_flag() {
    assert!(first_flags(r#""\07""#).contains(TokenFlags::OCTAL_ESCAPE));
    assert!(first_flags(r#""\8""#).contains(TokenFlags::OCTAL_ESCAPE));
    assert!(!first_flags(r#""\0""#).contains(TokenFlags::OCTAL_ESCAPE));
}

#[test]
fn test_unterminated_string() {
    let mut scanner = Scanner::new("\"abc\nx");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
    assert!(scanner.diagnostics().has_errors());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_template_with_substitutions() {
    let tokens = scan_all("`a${x}b${ {y} }c`");
    let kinds: Vec<SyntaxKind> = tokens.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateMiddle,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::TemplateTail,
        ]
    );
    assert_eq!(tokens[0].1, "a");
    assert_eq!(tokens[2].1, "b");
    assert_eq!(tokens[6].1, "c");
}

#[test]
fn test_nested_template() {
    assert_eq!(
        scan_kinds("`${`${a}`}`"),
        vec![
            SyntaxKind::TemplateHead,
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateTail,
            SyntaxKind::TemplateTail,
        ]
    );
}

#[test]
fn test_template_invalid_escape_is_flagged_not_reported() {
    let mut scanner = Scanner::new(r"`\unicode`");
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn test_template_normalizes_carriage_returns() {
    let tokens = scan_all("`a\r\nb`");
    assert_eq!(tokens[0].1, "a\nb");
}

#[test]
fn test_keywords_and_contextual_keywords() {
    assert_eq!(
        scan_kinds("var let of async yield await target"),
        vec![
            SyntaxKind::VarKeyword,
            SyntaxKind::LetKeyword,
            SyntaxKind::OfKeyword,
            SyntaxKind::AsyncKeyword,
            SyntaxKind::YieldKeyword,
            SyntaxKind::AwaitKeyword,
            SyntaxKind::TargetKeyword,
        ]
    );
}

#[test]
fn test_escaped_keyword_is_identifier() {
    let mut scanner = Scanner::new(r"v\u0061r");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "var");
    assert!(scanner.token_flags().contains(TokenFlags::UNICODE_ESCAPE));
}

#[test]
fn test_unicode_identifiers() {
    let tokens = scan_all("café ünïcödé $_ x\u{200C}y");
    assert_eq!(tokens.len(), 4);
    assert!(tokens.iter().all(|(k, _)| *k == SyntaxKind::Identifier));
    assert_eq!(tokens[0].1, "café");
}

#[test]
fn test_regex_versus_division() {
    assert_eq!(
        scan_kinds("x = a / b / c"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
        ]
    );
    assert_eq!(
        scan_kinds("x = /[/]+/g.test(y)")[2],
        SyntaxKind::RegularExpressionLiteral
    );
    let tokens = scan_all("(/a\\/b/i)");
    assert_eq!(tokens[1].1, "/a\\/b/i");
}

#[test]
fn test_optional_chain_versus_conditional_number() {
    assert_eq!(
        scan_kinds("a?.b a?.5:1"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_shebang_and_scripting_comments() {
    let mut scanner = Scanner::new("#!/usr/bin/env node\nlet x;");
    scanner.skip_shebang();
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);

    let mut scanner = Scanner::new("# comment\nx");
    scanner.set_scripting(true);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());

    assert_eq!(scan_kinds("#")[0], SyntaxKind::HashToken);
}

#[test]
fn test_line_break_inside_block_comment_sets_flag() {
    let mut scanner = Scanner::new("a /*\n*/ b");
    scanner.scan();
    scanner.scan();
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.token_info().line, 1);
}

#[test]
fn test_unterminated_comment() {
    let mut scanner = Scanner::new("/* open");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert!(scanner.diagnostics().has_errors());
}

#[test]
fn test_invalid_character() {
    let mut scanner = Scanner::new("a @ b");
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert!(scanner.diagnostics().has_errors());
}

#[test]
fn test_token_stream_regex_rescan() {
    let mut ts = TokenStream::new(Scanner::new("}/re/g"));
    ts.advance();
    assert_eq!(ts.kind(), SyntaxKind::SlashToken);
    assert!(ts.rescan_slash_as_regex());
    assert_eq!(ts.kind(), SyntaxKind::RegularExpressionLiteral);
    ts.advance();
    assert_eq!(ts.kind(), SyntaxKind::EndOfFileToken);
}
